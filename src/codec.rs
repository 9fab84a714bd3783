// Copyright 2018-2023 the Deno authors. All rights reserved. MIT license.

use crate::format::DefaultVersionFormatter;
use crate::format::FormatVersionError;
use crate::format::VersionFormatSpec;
use crate::structure::VersionStructure;
use crate::Version;

/// Converts between version text and [`Version`] values for a scheme.
pub trait VersionCodec: Send + Sync {
  fn parse_version(&self, text: &str) -> Version;

  fn format_version_text(
    &self,
    version: &Version,
    structure: &VersionStructure,
    format_spec: &VersionFormatSpec,
  ) -> Result<String, FormatVersionError>;

  /// Parses and then formats the text.
  fn normalize_version_text(
    &self,
    text: &str,
    structure: &VersionStructure,
    format_spec: &VersionFormatSpec,
  ) -> Result<String, FormatVersionError> {
    let version = self.parse_version(text);
    self.format_version_text(&version, structure, format_spec)
  }
}

/// Trims on parse and formats with [`DefaultVersionFormatter`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultVersionCodec;

impl VersionCodec for DefaultVersionCodec {
  fn parse_version(&self, text: &str) -> Version {
    Version::new(text.trim())
  }

  fn format_version_text(
    &self,
    version: &Version,
    structure: &VersionStructure,
    format_spec: &VersionFormatSpec,
  ) -> Result<String, FormatVersionError> {
    DefaultVersionFormatter.format_version_text(version, structure, format_spec)
  }
}

#[cfg(test)]
mod test {
  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn parse_trims() {
    let version = DefaultVersionCodec.parse_version("  1.2.3+4 \n");
    assert_eq!(version.original_text(), "1.2.3+4");
  }

  #[test]
  fn normalize() {
    let codec = DefaultVersionCodec;
    let normalized = codec
      .normalize_version_text(
        " 1.2.3+7 ",
        &VersionStructure::BUILD_AFTER_PLUS_IGNORED,
        &VersionFormatSpec::MAP_BUILD_TO_QUALIFIER,
      )
      .unwrap();
    assert_eq!(normalized, "1.2.3-build.7");

    let normalized = codec
      .normalize_version_text(
        "1.2.3+7",
        &VersionStructure::NO_BUILD,
        &VersionFormatSpec::OMIT_BUILD,
      )
      .unwrap();
    assert_eq!(normalized, "1.2.3+7");
  }
}
