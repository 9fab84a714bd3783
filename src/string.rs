// Copyright 2018-2023 the Deno authors. All rights reserved. MIT license.

use std::borrow::Borrow;
use std::ops::Deref;

use capacity_builder::StringAppendable;
use serde::Deserialize;
use serde::Serialize;

macro_rules! shared {
  ($ident:ident) => {
    impl $ident {
      #[inline(always)]
      pub fn as_str(&self) -> &str {
        self.0.as_str()
      }

      #[inline(always)]
      pub fn is_empty(&self) -> bool {
        self.0.is_empty()
      }
    }

    impl std::fmt::Display for $ident {
      #[inline(always)]
      fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
      }
    }

    impl Deref for $ident {
      type Target = str;

      #[inline(always)]
      fn deref(&self) -> &Self::Target {
        self.0.as_str()
      }
    }

    impl Borrow<str> for $ident {
      #[inline(always)]
      fn borrow(&self) -> &str {
        self.as_str()
      }
    }

    impl PartialEq<str> for $ident {
      #[inline(always)]
      fn eq(&self, other: &str) -> bool {
        self.0.as_str() == other
      }
    }

    impl PartialEq<&str> for $ident {
      #[inline(always)]
      fn eq(&self, other: &&str) -> bool {
        self.0.as_str() == *other
      }
    }

    impl PartialEq<$ident> for &str {
      #[inline(always)]
      fn eq(&self, other: &$ident) -> bool {
        *self == other.0.as_str()
      }
    }

    impl From<&str> for $ident {
      #[inline(always)]
      fn from(s: &str) -> Self {
        Self::from_str(s)
      }
    }

    impl<'a> StringAppendable<'a> for &'a $ident {
      #[inline(always)]
      fn append_to_builder<TString: capacity_builder::StringType>(
        self,
        builder: &mut capacity_builder::StringBuilder<'a, TString>,
      ) {
        builder.append(self.0.as_str())
      }
    }
  };
}

/// Text of a whole version string. Inline when shorter than 24 bytes,
/// which covers nearly every real version.
#[derive(
  Debug,
  Default,
  Clone,
  PartialOrd,
  Ord,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
)]
pub struct VersionText(hipstr::HipStr<'static>);

shared!(VersionText);

impl VersionText {
  /// Creates a `VersionText` from a `&str`.
  #[allow(clippy::should_implement_trait)]
  #[inline(always)]
  pub fn from_str(s: &str) -> Self {
    Self(hipstr::HipStr::from(s))
  }

  #[inline(always)]
  pub fn from_string(s: String) -> Self {
    Self(hipstr::HipStr::from(s))
  }
}

/// Text of a single token. Tokens are short runs like `1`, `.` or `rc1`,
/// so a 16 byte inline string is enough.
#[derive(
  Debug,
  Default,
  Clone,
  PartialOrd,
  Ord,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
)]
pub struct TokenText(ecow::EcoString);

shared!(TokenText);

impl TokenText {
  /// Creates a `TokenText` from a `&str`.
  #[allow(clippy::should_implement_trait)]
  #[inline(always)]
  pub fn from_str(s: &str) -> Self {
    Self(ecow::EcoString::from(s))
  }
}
