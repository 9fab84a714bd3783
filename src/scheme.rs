// Copyright 2018-2023 the Deno authors. All rights reserved. MIT license.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use deno_error::JsError;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::build::compare_with_structure;
use crate::codec::DefaultVersionCodec;
use crate::codec::VersionCodec;
use crate::comparator::CalverLikeComparator;
use crate::comparator::ComparatorFamily;
use crate::comparator::MavenLikeComparator;
use crate::comparator::SemverLikeComparator;
use crate::comparator::VersionComparator;
use crate::format;
use crate::format::FormatVersionError;
use crate::format::VersionFormatSpec;
use crate::structure;
use crate::structure::VersionStructure;
use crate::structure::VersionTextParts;
use crate::Version;

#[derive(Error, Debug, Clone, JsError, PartialEq, Eq)]
pub enum SchemeError {
  #[class(type)]
  #[error("Version scheme code must not be empty or blank")]
  BlankCode,
  #[class(type)]
  #[error("Unknown version scheme: {code}")]
  UnknownScheme { code: String },
  #[class(type)]
  #[error("Version scheme '{code}' is already registered")]
  DuplicateCode { code: String },
}

/// A named bundle of a comparator, a build structure, a format spec and a
/// codec that fully defines how a family of version strings is read.
pub trait VersionScheme: Send + Sync {
  /// Unique, non-blank identifier.
  fn code(&self) -> &str;

  /// The base comparator, without any build handling.
  fn version_comparator(&self) -> &dyn VersionComparator;

  fn version_structure(&self) -> &VersionStructure;

  fn version_format_spec(&self) -> &VersionFormatSpec;

  fn version_codec(&self) -> &dyn VersionCodec {
    &DefaultVersionCodec
  }

  fn split_version_and_build_text<'a>(
    &self,
    text: &'a str,
  ) -> VersionTextParts<'a> {
    self.version_structure().split_version_and_build_text(text)
  }

  /// Compares two versions, honoring the build section of the structure.
  fn compare(&self, left: &Version, right: &Version) -> Ordering {
    compare_with_structure(
      self.version_comparator(),
      self.version_structure(),
      left,
      right,
    )
  }

  fn parse_version(&self, text: &str) -> Version {
    self.version_codec().parse_version(text)
  }

  fn format_version_text(
    &self,
    version: &Version,
  ) -> Result<String, FormatVersionError> {
    self.version_codec().format_version_text(
      version,
      self.version_structure(),
      self.version_format_spec(),
    )
  }

  fn normalize_version_text(
    &self,
    text: &str,
  ) -> Result<String, FormatVersionError> {
    self.version_codec().normalize_version_text(
      text,
      self.version_structure(),
      self.version_format_spec(),
    )
  }
}

/// The fixed set of schemes that ship with the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinVersionScheme {
  MavenDefault,
  MavenBuildMetadataIgnored,
  SemverDefault,
  SemverBuildFirst,
  SemverBuildOrdered,
  CalverDefault,
}

impl BuiltinVersionScheme {
  pub const ALL: [BuiltinVersionScheme; 6] = [
    Self::MavenDefault,
    Self::MavenBuildMetadataIgnored,
    Self::SemverDefault,
    Self::SemverBuildFirst,
    Self::SemverBuildOrdered,
    Self::CalverDefault,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      Self::MavenDefault => "maven-default",
      Self::MavenBuildMetadataIgnored => "maven-build-metadata-ignored",
      Self::SemverDefault => "semver-default",
      Self::SemverBuildFirst => "semver-build-first",
      Self::SemverBuildOrdered => "semver-build-ordered",
      Self::CalverDefault => "calver-default",
    }
  }

  /// Finds a built-in scheme by code, ignoring ASCII case.
  pub fn find_by_code(code: &str) -> Option<Self> {
    Self::ALL
      .into_iter()
      .find(|scheme| scheme.as_str().eq_ignore_ascii_case(code))
  }

  pub fn from_code(code: &str) -> Result<Self, SchemeError> {
    Self::find_by_code(code).ok_or_else(|| SchemeError::UnknownScheme {
      code: code.to_string(),
    })
  }

  pub fn family(self) -> ComparatorFamily {
    match self {
      Self::MavenDefault | Self::MavenBuildMetadataIgnored => {
        ComparatorFamily::MavenLike
      }
      Self::SemverDefault
      | Self::SemverBuildFirst
      | Self::SemverBuildOrdered => ComparatorFamily::SemverLike,
      Self::CalverDefault => ComparatorFamily::CalverLike,
    }
  }
}

impl VersionScheme for BuiltinVersionScheme {
  fn code(&self) -> &str {
    self.as_str()
  }

  fn version_comparator(&self) -> &dyn VersionComparator {
    self.family().comparator()
  }

  fn version_structure(&self) -> &VersionStructure {
    match self {
      Self::MavenDefault | Self::CalverDefault => &structure::NO_BUILD,
      Self::MavenBuildMetadataIgnored | Self::SemverDefault => {
        &structure::BUILD_AFTER_PLUS_IGNORED
      }
      Self::SemverBuildFirst => &structure::BUILD_BEFORE_PLUS_IGNORED,
      Self::SemverBuildOrdered => &structure::BUILD_AFTER_PLUS_ORDERED,
    }
  }

  fn version_format_spec(&self) -> &VersionFormatSpec {
    match self {
      Self::MavenDefault | Self::CalverDefault => &format::OMIT_BUILD,
      Self::MavenBuildMetadataIgnored => &format::MAP_BUILD_TO_QUALIFIER,
      Self::SemverDefault
      | Self::SemverBuildFirst
      | Self::SemverBuildOrdered => &format::EMIT_BUILD,
    }
  }
}

impl fmt::Display for BuiltinVersionScheme {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl Serialize for BuiltinVersionScheme {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(self.as_str())
  }
}

impl<'de> Deserialize<'de> for BuiltinVersionScheme {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: serde::Deserializer<'de>,
  {
    let text = String::deserialize(deserializer)?;
    match BuiltinVersionScheme::from_code(&text) {
      Ok(scheme) => Ok(scheme),
      Err(err) => Err(serde::de::Error::custom(err)),
    }
  }
}

/// A user-defined scheme.
#[derive(Clone)]
pub struct CustomVersionScheme {
  code: String,
  comparator: Arc<dyn VersionComparator>,
  structure: VersionStructure,
  format_spec: VersionFormatSpec,
  codec: Arc<dyn VersionCodec>,
}

impl CustomVersionScheme {
  /// Creates a scheme using the [`DefaultVersionCodec`]. The code is
  /// trimmed and must not be blank.
  pub fn new(
    code: &str,
    comparator: Arc<dyn VersionComparator>,
    structure: VersionStructure,
    format_spec: VersionFormatSpec,
  ) -> Result<Self, SchemeError> {
    let code = code.trim();
    if code.is_empty() {
      return Err(SchemeError::BlankCode);
    }
    Ok(Self {
      code: code.to_string(),
      comparator,
      structure,
      format_spec,
      codec: Arc::new(DefaultVersionCodec),
    })
  }

  pub fn with_codec(mut self, codec: Arc<dyn VersionCodec>) -> Self {
    self.codec = codec;
    self
  }
}

impl VersionScheme for CustomVersionScheme {
  fn code(&self) -> &str {
    &self.code
  }

  fn version_comparator(&self) -> &dyn VersionComparator {
    self.comparator.as_ref()
  }

  fn version_structure(&self) -> &VersionStructure {
    &self.structure
  }

  fn version_format_spec(&self) -> &VersionFormatSpec {
    &self.format_spec
  }

  fn version_codec(&self) -> &dyn VersionCodec {
    self.codec.as_ref()
  }
}

impl fmt::Debug for CustomVersionScheme {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CustomVersionScheme")
      .field("code", &self.code)
      .field("structure", &self.structure)
      .field("format_spec", &self.format_spec)
      .finish_non_exhaustive()
  }
}

/// Serializable description of a custom scheme built from a comparator
/// family.
///
/// ```json
/// {
///   "code": "internal",
///   "comparator": "semver-like",
///   "structure": {
///     "build-delimiter": "+",
///     "build-comparison-policy": "token-compare"
///   },
///   "format": { "build-format-policy": "emit" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct VersionSchemeConfig {
  pub code: String,
  pub comparator: ComparatorFamily,
  #[serde(default)]
  pub structure: VersionStructure,
  #[serde(default)]
  pub format: VersionFormatSpec,
}

impl VersionSchemeConfig {
  pub fn into_scheme(self) -> Result<CustomVersionScheme, SchemeError> {
    let comparator: Arc<dyn VersionComparator> = match self.comparator {
      ComparatorFamily::MavenLike => Arc::new(MavenLikeComparator),
      ComparatorFamily::SemverLike => Arc::new(SemverLikeComparator),
      ComparatorFamily::CalverLike => Arc::new(CalverLikeComparator),
    };
    CustomVersionScheme::new(
      &self.code,
      comparator,
      self.structure,
      self.format,
    )
  }
}
