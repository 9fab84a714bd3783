// Copyright 2018-2023 the Deno authors. All rights reserved. MIT license.

use std::borrow::Cow;

use capacity_builder::StringBuilder;
use deno_error::JsError;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::structure::VersionStructure;
use crate::Version;

#[derive(Error, Debug, Clone, JsError, PartialEq, Eq)]
pub enum FormatVersionError {
  #[class(type)]
  #[error("Build format policy EMIT requires a non-empty build delimiter")]
  EmitWithoutDelimiter,
}

/// How the build section is rendered when a version is formatted.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum BuildFormatPolicy {
  /// Drop the build section.
  #[default]
  Omit,
  /// Keep the build section with the structure's delimiter and ordering.
  Emit,
  /// Fold the build section into the qualifier, `1.2.3+7` becoming
  /// `1.2.3-build.7`.
  MapToQualifier,
}

const DEFAULT_MAPPED_BUILD_PREFIX: &str = "build";
const DEFAULT_QUALIFIER_DELIMITER: &str = "-";
const DEFAULT_QUALIFIER_TOKEN_DELIMITER: &str = ".";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct VersionFormatSpec {
  #[serde(default)]
  build_format_policy: BuildFormatPolicy,
  #[serde(default = "default_mapped_build_prefix")]
  mapped_build_prefix: Cow<'static, str>,
  #[serde(default = "default_qualifier_delimiter")]
  qualifier_delimiter: Cow<'static, str>,
  #[serde(default = "default_qualifier_token_delimiter")]
  qualifier_token_delimiter: Cow<'static, str>,
}

pub(crate) static EMIT_BUILD: VersionFormatSpec = VersionFormatSpec::EMIT_BUILD;
pub(crate) static OMIT_BUILD: VersionFormatSpec = VersionFormatSpec::OMIT_BUILD;
pub(crate) static MAP_BUILD_TO_QUALIFIER: VersionFormatSpec =
  VersionFormatSpec::MAP_BUILD_TO_QUALIFIER;

fn default_mapped_build_prefix() -> Cow<'static, str> {
  Cow::Borrowed(DEFAULT_MAPPED_BUILD_PREFIX)
}

fn default_qualifier_delimiter() -> Cow<'static, str> {
  Cow::Borrowed(DEFAULT_QUALIFIER_DELIMITER)
}

fn default_qualifier_token_delimiter() -> Cow<'static, str> {
  Cow::Borrowed(DEFAULT_QUALIFIER_TOKEN_DELIMITER)
}

impl Default for VersionFormatSpec {
  fn default() -> Self {
    Self::OMIT_BUILD
  }
}

impl VersionFormatSpec {
  pub const EMIT_BUILD: VersionFormatSpec =
    VersionFormatSpec::with_policy(BuildFormatPolicy::Emit);
  pub const OMIT_BUILD: VersionFormatSpec =
    VersionFormatSpec::with_policy(BuildFormatPolicy::Omit);
  pub const MAP_BUILD_TO_QUALIFIER: VersionFormatSpec =
    VersionFormatSpec::with_policy(BuildFormatPolicy::MapToQualifier);

  /// A spec using the default prefix (`build`), qualifier delimiter (`-`)
  /// and qualifier token delimiter (`.`).
  pub const fn with_policy(build_format_policy: BuildFormatPolicy) -> Self {
    Self {
      build_format_policy,
      mapped_build_prefix: Cow::Borrowed(DEFAULT_MAPPED_BUILD_PREFIX),
      qualifier_delimiter: Cow::Borrowed(DEFAULT_QUALIFIER_DELIMITER),
      qualifier_token_delimiter: Cow::Borrowed(
        DEFAULT_QUALIFIER_TOKEN_DELIMITER,
      ),
    }
  }

  pub fn new(
    build_format_policy: BuildFormatPolicy,
    mapped_build_prefix: impl Into<Cow<'static, str>>,
    qualifier_delimiter: impl Into<Cow<'static, str>>,
    qualifier_token_delimiter: impl Into<Cow<'static, str>>,
  ) -> Self {
    Self {
      build_format_policy,
      mapped_build_prefix: mapped_build_prefix.into(),
      qualifier_delimiter: qualifier_delimiter.into(),
      qualifier_token_delimiter: qualifier_token_delimiter.into(),
    }
  }

  /// Looks up one of the built-in format specs by its kebab-case code.
  pub fn builtin(code: &str) -> Option<&'static VersionFormatSpec> {
    match code {
      "emit-build" => Some(&EMIT_BUILD),
      "omit-build" => Some(&OMIT_BUILD),
      "map-build-to-qualifier" => Some(&MAP_BUILD_TO_QUALIFIER),
      _ => None,
    }
  }

  pub fn build_format_policy(&self) -> BuildFormatPolicy {
    self.build_format_policy
  }

  pub fn mapped_build_prefix(&self) -> &str {
    &self.mapped_build_prefix
  }

  pub fn qualifier_delimiter(&self) -> &str {
    &self.qualifier_delimiter
  }

  pub fn qualifier_token_delimiter(&self) -> &str {
    &self.qualifier_token_delimiter
  }
}

/// Renders a version back to text according to a structure and format spec.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultVersionFormatter;

impl DefaultVersionFormatter {
  pub fn format_version_text(
    &self,
    version: &Version,
    structure: &VersionStructure,
    format_spec: &VersionFormatSpec,
  ) -> Result<String, FormatVersionError> {
    let parts =
      structure.split_version_and_build_text(version.original_text());
    let version_text = parts.version_text;
    let build_text = parts.build_text;
    let policy = format_spec.build_format_policy();
    if build_text.is_empty() || policy == BuildFormatPolicy::Omit {
      return Ok(version_text.to_string());
    }

    match policy {
      BuildFormatPolicy::Omit => Ok(version_text.to_string()),
      BuildFormatPolicy::Emit => {
        let delimiter = structure.build_delimiter();
        if delimiter.is_empty() {
          return Err(FormatVersionError::EmitWithoutDelimiter);
        }
        let (first, second) = if structure.version_before_build() {
          (version_text, build_text)
        } else {
          (build_text, version_text)
        };
        Ok(join(&[first, delimiter, second]))
      }
      BuildFormatPolicy::MapToQualifier => {
        let token_delimiter = format_spec.qualifier_token_delimiter();
        // a version without a qualifier section gets a new one, otherwise
        // the build becomes another token of the existing qualifier
        let section_delimiter =
          if version_text.contains(format_spec.qualifier_delimiter()) {
            token_delimiter
          } else {
            format_spec.qualifier_delimiter()
          };
        Ok(join(&[
          version_text,
          section_delimiter,
          format_spec.mapped_build_prefix(),
          token_delimiter,
          build_text,
        ]))
      }
    }
  }
}

pub(crate) fn join(parts: &[&str]) -> String {
  // only fails when the computed capacity overflows
  StringBuilder::<String>::build(|builder| {
    for part in parts {
      builder.append(*part);
    }
  })
  .unwrap_or_else(|_| parts.concat())
}
