// Copyright 2018-2023 the Deno authors. All rights reserved. MIT license.

use std::cmp::Ordering;
use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Deserialize;
use serde::Serialize;

use crate::item::compare_items;
use crate::item::normalize;
use crate::item::QualifierOrder;
use crate::Version;

/// Defines the precedence of two versions.
pub trait VersionComparator: Send + Sync {
  fn compare(&self, left: &Version, right: &Version) -> Ordering;
}

impl<F> VersionComparator for F
where
  F: Fn(&Version, &Version) -> Ordering + Send + Sync,
{
  fn compare(&self, left: &Version, right: &Version) -> Ordering {
    self(left, right)
  }
}

/// The built-in comparator families.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ComparatorFamily {
  MavenLike,
  SemverLike,
  CalverLike,
}

impl ComparatorFamily {
  pub fn comparator(self) -> &'static dyn VersionComparator {
    match self {
      Self::MavenLike => &MavenLikeComparator,
      Self::SemverLike => &SemverLikeComparator,
      Self::CalverLike => &CalverLikeComparator,
    }
  }
}

static MAVEN_QUALIFIER_RANKS: Lazy<HashMap<&'static str, i32>> =
  Lazy::new(|| {
    HashMap::from([
      ("snapshot", -50),
      ("alpha", -40),
      ("a", -40),
      ("beta", -30),
      ("b", -30),
      ("milestone", -20),
      ("m", -20),
      ("rc", -10),
      ("", 0),
      ("sp", 10),
    ])
  });

/// Maven/Gradle style precedence.
///
/// Qualifiers are case-insensitive. `ga`, `final` and `release` mean no
/// qualifier at all and `cr` is read as `rc`. Known qualifiers are ordered
/// `snapshot < alpha < beta < milestone < rc < (release) < sp`; anything
/// else ranks like a release and is then ordered lexicographically.
#[derive(Debug, Clone, Copy, Default)]
pub struct MavenLikeComparator;

impl VersionComparator for MavenLikeComparator {
  fn compare(&self, left: &Version, right: &Version) -> Ordering {
    compare_maven_like(left, right)
  }
}

pub(crate) fn compare_maven_like(left: &Version, right: &Version) -> Ordering {
  compare_items(
    &normalize(left.tokens(), false),
    &normalize(right.tokens(), false),
    &MavenQualifiers,
  )
}

struct MavenQualifiers;

impl MavenQualifiers {
  fn normalize(qualifier: &str) -> String {
    let lower = qualifier.to_ascii_lowercase();
    match lower.as_str() {
      "ga" | "final" | "release" => String::new(),
      "cr" => "rc".to_string(),
      _ => lower,
    }
  }

  fn rank(qualifier: &str) -> i32 {
    MAVEN_QUALIFIER_RANKS.get(qualifier).copied().unwrap_or(0)
  }
}

impl QualifierOrder for MavenQualifiers {
  fn compare_qualifiers(&self, left: &str, right: &str) -> Ordering {
    let left = Self::normalize(left);
    let right = Self::normalize(right);
    Self::rank(&left)
      .cmp(&Self::rank(&right))
      .then_with(|| left.cmp(&right))
  }

  fn compare_to_release(&self, qualifier: &str) -> Ordering {
    self.compare_qualifiers(qualifier, "")
  }
}

/// Semantic Versioning style precedence.
///
/// Everything after a `+` separator is build metadata and is ignored.
/// Qualifiers compare as raw, case-sensitive strings and any qualifier
/// ranks below the corresponding release.
#[derive(Debug, Clone, Copy, Default)]
pub struct SemverLikeComparator;

impl VersionComparator for SemverLikeComparator {
  fn compare(&self, left: &Version, right: &Version) -> Ordering {
    compare_items(
      &normalize(left.tokens(), true),
      &normalize(right.tokens(), true),
      &SemverQualifiers,
    )
  }
}

struct SemverQualifiers;

impl QualifierOrder for SemverQualifiers {
  fn compare_qualifiers(&self, left: &str, right: &str) -> Ordering {
    left.cmp(right)
  }

  fn compare_to_release(&self, _qualifier: &str) -> Ordering {
    Ordering::Less
  }
}

const CALVER_PART_COUNT: usize = 3;

/// Calendar versioning precedence.
///
/// Compares the first three numeric runs (year, month, patch) numerically,
/// treating missing runs as zero, and breaks ties with
/// [`MavenLikeComparator`]. Versions without usable numeric runs sort before
/// all others and are ordered among themselves by [`MavenLikeComparator`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CalverLikeComparator;

impl VersionComparator for CalverLikeComparator {
  fn compare(&self, left: &Version, right: &Version) -> Ordering {
    match (calver_parts(left), calver_parts(right)) {
      (Some(left_parts), Some(right_parts)) => {
        compare_calver_parts(&left_parts, &right_parts)
          .then_with(|| compare_maven_like(left, right))
      }
      (None, None) => {
        log::debug!(
          "no calendar parts in '{}' and '{}', using maven-like ordering",
          left,
          right
        );
        compare_maven_like(left, right)
      }
      (None, Some(_)) => Ordering::Less,
      (Some(_), None) => Ordering::Greater,
    }
  }
}

fn compare_calver_parts(left: &[u64], right: &[u64]) -> Ordering {
  let len = left.len().max(right.len());
  (0..len)
    .map(|i| {
      let a = left.get(i).copied().unwrap_or(0);
      let b = right.get(i).copied().unwrap_or(0);
      a.cmp(&b)
    })
    .find(|ordering| *ordering != Ordering::Equal)
    .unwrap_or(Ordering::Equal)
}

/// Extracts up to three leading numeric runs. Returns `None` when there are
/// none or when a run does not fit in a `u64`.
fn calver_parts(version: &Version) -> Option<Vec<u64>> {
  let mut parts = Vec::with_capacity(CALVER_PART_COUNT);
  let runs = version
    .tokens()
    .iter()
    .filter(|token| token.is_alphanumeric())
    .flat_map(|token| {
      token
        .text()
        .split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
    });
  for run in runs.take(CALVER_PART_COUNT) {
    parts.push(run.parse::<u64>().ok()?);
  }
  if parts.is_empty() {
    None
  } else {
    Some(parts)
  }
}
