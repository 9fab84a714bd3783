// Copyright 2018-2023 the Deno authors. All rights reserved. MIT license.

//! Scheme-driven version precedence and version intervals.
//!
//! A [`Version`] is any string. How two versions order is decided by a
//! [`VersionScheme`], which bundles a comparator, rules for where build
//! metadata lives, and rules for rendering a version back to text.
//! [`Interval`] and [`VersionInterval`] provide range algebra on top.

use std::cmp::Ordering;
use std::hash::Hash;

use capacity_builder::CapacityDisplay;
use capacity_builder::StringAppendable;
use capacity_builder::StringBuilder;
use capacity_builder::StringType;
use serde::Deserialize;
use serde::Serialize;

mod build;
mod codec;
mod comparator;
mod format;
mod interval;
mod item;
mod qualifier;
mod registry;
mod scheme;
mod string;
mod structure;
mod tokenizer;
mod version_interval;

pub use self::build::needs_build_aware_comparator;
pub use self::build::BuildAwareComparator;
pub use self::codec::DefaultVersionCodec;
pub use self::codec::VersionCodec;
pub use self::comparator::CalverLikeComparator;
pub use self::comparator::ComparatorFamily;
pub use self::comparator::MavenLikeComparator;
pub use self::comparator::SemverLikeComparator;
pub use self::comparator::VersionComparator;
pub use self::format::BuildFormatPolicy;
pub use self::format::DefaultVersionFormatter;
pub use self::format::FormatVersionError;
pub use self::format::VersionFormatSpec;
pub use self::interval::Interval;
pub use self::interval::IntervalBoundary;
pub use self::interval::IntervalError;
pub use self::qualifier::QualifierError;
pub use self::qualifier::QualifierKind;
pub use self::qualifier::VersionQualifier;
pub use self::registry::VersionSchemeRegistry;
pub use self::scheme::BuiltinVersionScheme;
pub use self::scheme::CustomVersionScheme;
pub use self::scheme::SchemeError;
pub use self::scheme::VersionScheme;
pub use self::scheme::VersionSchemeConfig;
pub use self::string::TokenText;
pub use self::string::VersionText;
pub use self::structure::BuildComparisonPolicy;
pub use self::structure::VersionStructure;
pub use self::structure::VersionTextParts;
pub use self::tokenizer::tokenize;
pub use self::tokenizer::Token;
pub use self::tokenizer::TokenKind;
pub use self::version_interval::VersionInterval;

/// A version string together with its tokens.
///
/// Versions have no order of their own. Use [`compare`] or
/// [`Version::compare_to`] with a scheme.
#[derive(Clone, Debug, CapacityDisplay)]
pub struct Version {
  original_text: VersionText,
  tokens: Vec<Token>,
}

impl Version {
  /// Creates a version from any text. Never fails; surrounding whitespace
  /// is ignored by the tokens but kept in the original text.
  pub fn new(text: &str) -> Self {
    Self {
      original_text: VersionText::from_str(text),
      tokens: tokenize(text),
    }
  }

  pub fn original_text(&self) -> &str {
    self.original_text.as_str()
  }

  pub fn tokens(&self) -> &[Token] {
    &self.tokens
  }

  /// Compares using the scheme, including its build metadata rules.
  pub fn compare_to(
    &self,
    other: &Version,
    scheme: &dyn VersionScheme,
  ) -> Ordering {
    compare(self, other, scheme)
  }

  pub fn compare_with(
    &self,
    other: &Version,
    comparator: &dyn VersionComparator,
  ) -> Ordering {
    comparator.compare(self, other)
  }
}

impl PartialEq for Version {
  fn eq(&self, other: &Self) -> bool {
    self.original_text == other.original_text
  }
}

impl Eq for Version {}

impl Hash for Version {
  fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
    self.original_text.hash(state);
  }
}

impl<'a> StringAppendable<'a> for &'a Version {
  fn append_to_builder<TString: StringType>(
    self,
    builder: &mut StringBuilder<'a, TString>,
  ) {
    builder.append(&self.original_text);
  }
}

impl From<&str> for Version {
  fn from(text: &str) -> Self {
    Version::new(text)
  }
}

impl Serialize for Version {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(self.original_text())
  }
}

impl<'de> Deserialize<'de> for Version {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: serde::Deserializer<'de>,
  {
    let text = String::deserialize(deserializer)?;
    Ok(Version {
      tokens: tokenize(&text),
      original_text: VersionText::from_string(text),
    })
  }
}

/// Compares two versions under a scheme.
///
/// The scheme's comparator is wrapped in a [`BuildAwareComparator`] when the
/// scheme's structure declares a build section.
pub fn compare(
  left: &Version,
  right: &Version,
  scheme: &dyn VersionScheme,
) -> Ordering {
  scheme.compare(left, right)
}

/// Compares two versions with a bare comparator, ignoring any scheme rules.
pub fn compare_with(
  left: &Version,
  right: &Version,
  comparator: &dyn VersionComparator,
) -> Ordering {
  comparator.compare(left, right)
}
