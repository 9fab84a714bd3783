// Copyright 2018-2023 the Deno authors. All rights reserved. MIT license.

use std::borrow::Cow;

use serde::Deserialize;
use serde::Serialize;

/// Whether build metadata takes part in precedence.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum BuildComparisonPolicy {
  /// Build metadata never affects precedence.
  #[default]
  Ignore,
  /// Build metadata breaks ties between otherwise equal versions.
  TokenCompare,
}

/// The version and build sections of a version string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionTextParts<'a> {
  pub version_text: &'a str,
  pub build_text: &'a str,
}

/// Where the build metadata section of a version string lives and how it
/// takes part in comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct VersionStructure {
  #[serde(default = "default_version_before_build")]
  version_before_build: bool,
  #[serde(default)]
  build_delimiter: Cow<'static, str>,
  #[serde(default)]
  build_comparison_policy: BuildComparisonPolicy,
}

pub(crate) static NO_BUILD: VersionStructure = VersionStructure::NO_BUILD;
pub(crate) static BUILD_AFTER_PLUS_IGNORED: VersionStructure =
  VersionStructure::BUILD_AFTER_PLUS_IGNORED;
pub(crate) static BUILD_AFTER_PLUS_ORDERED: VersionStructure =
  VersionStructure::BUILD_AFTER_PLUS_ORDERED;
pub(crate) static BUILD_BEFORE_PLUS_IGNORED: VersionStructure =
  VersionStructure::BUILD_BEFORE_PLUS_IGNORED;

fn default_version_before_build() -> bool {
  true
}

impl Default for VersionStructure {
  fn default() -> Self {
    Self::NO_BUILD
  }
}

impl VersionStructure {
  /// No build section at all.
  pub const NO_BUILD: VersionStructure = VersionStructure {
    version_before_build: true,
    build_delimiter: Cow::Borrowed(""),
    build_comparison_policy: BuildComparisonPolicy::Ignore,
  };

  /// `<version>+<build>` where the build is ignored for precedence.
  pub const BUILD_AFTER_PLUS_IGNORED: VersionStructure = VersionStructure {
    version_before_build: true,
    build_delimiter: Cow::Borrowed("+"),
    build_comparison_policy: BuildComparisonPolicy::Ignore,
  };

  /// `<version>+<build>` where the build breaks precedence ties.
  pub const BUILD_AFTER_PLUS_ORDERED: VersionStructure = VersionStructure {
    version_before_build: true,
    build_delimiter: Cow::Borrowed("+"),
    build_comparison_policy: BuildComparisonPolicy::TokenCompare,
  };

  /// `<build>+<version>` where the build is ignored for precedence.
  pub const BUILD_BEFORE_PLUS_IGNORED: VersionStructure = VersionStructure {
    version_before_build: false,
    build_delimiter: Cow::Borrowed("+"),
    build_comparison_policy: BuildComparisonPolicy::Ignore,
  };

  pub fn new(
    version_before_build: bool,
    build_delimiter: impl Into<Cow<'static, str>>,
    build_comparison_policy: BuildComparisonPolicy,
  ) -> Self {
    Self {
      version_before_build,
      build_delimiter: build_delimiter.into(),
      build_comparison_policy,
    }
  }

  /// Looks up one of the built-in structures by its kebab-case code.
  pub fn builtin(code: &str) -> Option<&'static VersionStructure> {
    match code {
      "no-build" => Some(&NO_BUILD),
      "build-after-plus-ignored" => Some(&BUILD_AFTER_PLUS_IGNORED),
      "build-after-plus-ordered" => Some(&BUILD_AFTER_PLUS_ORDERED),
      "build-before-plus-ignored" => Some(&BUILD_BEFORE_PLUS_IGNORED),
      _ => None,
    }
  }

  pub fn version_before_build(&self) -> bool {
    self.version_before_build
  }

  /// An empty delimiter means there is no build section.
  pub fn build_delimiter(&self) -> &str {
    &self.build_delimiter
  }

  pub fn has_build_section(&self) -> bool {
    !self.build_delimiter.is_empty()
  }

  /// The policy in effect. Always [`BuildComparisonPolicy::Ignore`] when
  /// there is no build section.
  pub fn build_comparison_policy(&self) -> BuildComparisonPolicy {
    if self.has_build_section() {
      self.build_comparison_policy
    } else {
      BuildComparisonPolicy::Ignore
    }
  }

  /// Splits at the first occurrence of the build delimiter. When the
  /// delimiter is empty or absent, the whole text is the version part.
  pub fn split_version_and_build_text<'a>(
    &self,
    text: &'a str,
  ) -> VersionTextParts<'a> {
    let delimiter = self.build_delimiter();
    let whole = VersionTextParts {
      version_text: text,
      build_text: "",
    };
    if delimiter.is_empty() {
      return whole;
    }
    let Some(index) = text.find(delimiter) else {
      return whole;
    };
    let first = &text[..index];
    let second = &text[index + delimiter.len()..];
    if self.version_before_build {
      VersionTextParts {
        version_text: first,
        build_text: second,
      }
    } else {
      VersionTextParts {
        version_text: second,
        build_text: first,
      }
    }
  }
}
