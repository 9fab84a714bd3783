// Copyright 2018-2023 the Deno authors. All rights reserved. MIT license.

use std::fmt;

use deno_error::JsError;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::format::join;

const SNAPSHOT_TEXT: &str = "SNAPSHOT";
const SNAPSHOT_LABEL_DELIMITER: &str = ".";

#[derive(Error, Debug, Clone, JsError, PartialEq, Eq)]
pub enum QualifierError {
  #[class(type)]
  #[error("Unsupported qualifier kind: '{code}'")]
  UnknownKind { code: String },
  #[class(type)]
  #[error("Label must be empty for qualifier kind '{kind}'")]
  LabelNotAllowed { kind: QualifierKind },
  #[class(type)]
  #[error("Label is required for qualifier kind '{kind}'")]
  LabelRequired { kind: QualifierKind },
}

/// The release stage a qualifier expresses.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum QualifierKind {
  /// A moving development build, rendered as `SNAPSHOT` or
  /// `SNAPSHOT.<label>`.
  Snapshot,
  PreRelease,
  /// No qualifier at all.
  Release,
  PostRelease,
}

impl QualifierKind {
  pub const ALL: [QualifierKind; 4] = [
    Self::Snapshot,
    Self::PreRelease,
    Self::Release,
    Self::PostRelease,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Snapshot => "snapshot",
      Self::PreRelease => "pre-release",
      Self::Release => "release",
      Self::PostRelease => "post-release",
    }
  }

  pub fn find_by_code(code: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|kind| kind.as_str() == code)
  }

  pub fn from_code(code: &str) -> Result<Self, QualifierError> {
    Self::find_by_code(code).ok_or_else(|| QualifierError::UnknownKind {
      code: code.to_string(),
    })
  }

  pub fn is_label_allowed(self) -> bool {
    self != Self::Release
  }

  pub fn is_label_required(self) -> bool {
    matches!(self, Self::PreRelease | Self::PostRelease)
  }

  /// Renders the qualifier text without any qualifier delimiter.
  ///
  /// A blank label counts as no label. Release renders as an empty string.
  pub fn format_qualifier_text(
    self,
    label: Option<&str>,
  ) -> Result<String, QualifierError> {
    let label = label.filter(|label| !label.trim().is_empty());
    match (self, label) {
      (Self::Release, None) => Ok(String::new()),
      (Self::Release, Some(_)) => {
        Err(QualifierError::LabelNotAllowed { kind: self })
      }
      (Self::PreRelease | Self::PostRelease, None) => {
        Err(QualifierError::LabelRequired { kind: self })
      }
      (Self::PreRelease | Self::PostRelease, Some(label)) => {
        Ok(label.to_string())
      }
      (Self::Snapshot, None) => Ok(SNAPSHOT_TEXT.to_string()),
      (Self::Snapshot, Some(label)) => {
        Ok(join(&[SNAPSHOT_TEXT, SNAPSHOT_LABEL_DELIMITER, label]))
      }
    }
  }

  /// Infers the kind of text produced by [`Self::format_qualifier_text`].
  ///
  /// Pre-release and post-release texts cannot be told apart, so any
  /// labelled text that is not a snapshot is read as a pre-release.
  pub fn detect_from_qualifier_text(text: &str) -> Self {
    if text.trim().is_empty() {
      Self::Release
    } else if snapshot_label(text).is_some() {
      Self::Snapshot
    } else {
      Self::PreRelease
    }
  }
}

impl fmt::Display for QualifierKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Returns the label of a snapshot qualifier text, which is empty for a bare
/// `SNAPSHOT`, or `None` when the text is not a snapshot.
fn snapshot_label(text: &str) -> Option<&str> {
  let prefix_len = SNAPSHOT_TEXT.len();
  let prefix = text.get(..prefix_len)?;
  if !prefix.eq_ignore_ascii_case(SNAPSHOT_TEXT) {
    return None;
  }
  let rest = &text[prefix_len..];
  if rest.is_empty() {
    Some(rest)
  } else {
    rest.strip_prefix(SNAPSHOT_LABEL_DELIMITER)
  }
}

/// A qualifier kind together with its label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VersionQualifier {
  kind: QualifierKind,
  label: Option<String>,
}

impl VersionQualifier {
  /// Checks the label against the kind's rules. A blank label counts as no
  /// label.
  pub fn new(
    kind: QualifierKind,
    label: Option<&str>,
  ) -> Result<Self, QualifierError> {
    let label = label.filter(|label| !label.trim().is_empty());
    if label.is_some() && !kind.is_label_allowed() {
      return Err(QualifierError::LabelNotAllowed { kind });
    }
    if label.is_none() && kind.is_label_required() {
      return Err(QualifierError::LabelRequired { kind });
    }
    Ok(Self {
      kind,
      label: label.map(|label| label.to_string()),
    })
  }

  pub fn release() -> Self {
    Self {
      kind: QualifierKind::Release,
      label: None,
    }
  }

  /// Reads qualifier text, the inverse of [`Self::to_qualifier_text`] up to
  /// the pre-release and post-release ambiguity.
  pub fn parse(text: &str) -> Self {
    match QualifierKind::detect_from_qualifier_text(text) {
      QualifierKind::Release => Self::release(),
      QualifierKind::Snapshot => {
        let label = snapshot_label(text).filter(|label| !label.is_empty());
        Self {
          kind: QualifierKind::Snapshot,
          label: label.map(|label| label.to_string()),
        }
      }
      kind => Self {
        kind,
        label: Some(text.to_string()),
      },
    }
  }

  pub fn kind(&self) -> QualifierKind {
    self.kind
  }

  pub fn label(&self) -> Option<&str> {
    self.label.as_deref()
  }

  pub fn to_qualifier_text(&self) -> Result<String, QualifierError> {
    self.kind.format_qualifier_text(self.label())
  }
}

#[cfg(test)]
mod test {
  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn kind_codes() {
    for kind in QualifierKind::ALL {
      assert_eq!(QualifierKind::find_by_code(kind.as_str()), Some(kind));
    }
    assert_eq!(
      QualifierKind::from_code("beta").unwrap_err().to_string(),
      "Unsupported qualifier kind: 'beta'"
    );
    let json = serde_json::to_string(&QualifierKind::PostRelease).unwrap();
    assert_eq!(json, "\"post-release\"");
  }

  #[test]
  fn label_rules() {
    use QualifierKind::*;

    assert!(!Release.is_label_allowed());
    assert!(Snapshot.is_label_allowed());
    assert!(!Snapshot.is_label_required());
    assert!(PreRelease.is_label_required());
    assert!(PostRelease.is_label_required());
  }

  #[test]
  fn formats_qualifier_text() {
    use QualifierKind::*;

    assert_eq!(Release.format_qualifier_text(None).unwrap(), "");
    assert_eq!(Release.format_qualifier_text(Some("  ")).unwrap(), "");
    assert_eq!(
      Release.format_qualifier_text(Some("rc1")).unwrap_err(),
      QualifierError::LabelNotAllowed { kind: Release }
    );
    assert_eq!(PreRelease.format_qualifier_text(Some("rc1")).unwrap(), "rc1");
    assert_eq!(
      PostRelease.format_qualifier_text(Some(" ")).unwrap_err().to_string(),
      "Label is required for qualifier kind 'post-release'"
    );
    assert_eq!(Snapshot.format_qualifier_text(None).unwrap(), "SNAPSHOT");
    assert_eq!(
      Snapshot.format_qualifier_text(Some("feature-x")).unwrap(),
      "SNAPSHOT.feature-x"
    );
  }

  #[test]
  fn detects_kind() {
    use QualifierKind::*;

    let detect = QualifierKind::detect_from_qualifier_text;
    assert_eq!(detect(""), Release);
    assert_eq!(detect("  "), Release);
    assert_eq!(detect("SNAPSHOT"), Snapshot);
    assert_eq!(detect("snapshot.nightly"), Snapshot);
    assert_eq!(detect("SNAPSHOTS"), PreRelease);
    assert_eq!(detect("rc1"), PreRelease);
    assert_eq!(detect("sp1"), PreRelease);
    assert_eq!(detect("ünïcode"), PreRelease);
  }

  #[test]
  fn qualifier_values() {
    let qualifier =
      VersionQualifier::new(QualifierKind::Snapshot, Some("nightly")).unwrap();
    assert_eq!(qualifier.to_qualifier_text().unwrap(), "SNAPSHOT.nightly");
    assert_eq!(VersionQualifier::parse("SNAPSHOT.nightly"), qualifier);

    let bare = VersionQualifier::parse("snapshot");
    assert_eq!(bare.kind(), QualifierKind::Snapshot);
    assert_eq!(bare.label(), None);
    assert_eq!(bare.to_qualifier_text().unwrap(), "SNAPSHOT");

    let pre = VersionQualifier::parse("beta.2");
    assert_eq!(pre.kind(), QualifierKind::PreRelease);
    assert_eq!(pre.label(), Some("beta.2"));
    assert_eq!(VersionQualifier::parse(""), VersionQualifier::release());

    assert_eq!(
      VersionQualifier::new(QualifierKind::PreRelease, None).unwrap_err(),
      QualifierError::LabelRequired {
        kind: QualifierKind::PreRelease
      }
    );
    assert_eq!(
      VersionQualifier::new(QualifierKind::Release, Some("x")).unwrap_err(),
      QualifierError::LabelNotAllowed {
        kind: QualifierKind::Release
      }
    );
  }
}
