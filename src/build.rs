// Copyright 2018-2023 the Deno authors. All rights reserved. MIT license.

use std::cmp::Ordering;

use crate::comparator::VersionComparator;
use crate::item::Magnitude;
use crate::structure::BuildComparisonPolicy;
use crate::structure::VersionStructure;
use crate::tokenizer::is_alphanumeric_char;
use crate::Version;

/// Gets if comparing under this structure needs more than the base
/// comparator, which is the case as soon as a build section may exist,
/// sits in front of the version, or takes part in precedence.
pub fn needs_build_aware_comparator(structure: &VersionStructure) -> bool {
  structure.has_build_section()
    || !structure.version_before_build()
    || structure.build_comparison_policy() != BuildComparisonPolicy::Ignore
}

/// Compares the version parts with the base comparator and, under
/// [`BuildComparisonPolicy::TokenCompare`], breaks ties on the build parts.
pub struct BuildAwareComparator<'a> {
  base: &'a dyn VersionComparator,
  structure: &'a VersionStructure,
}

impl<'a> BuildAwareComparator<'a> {
  pub fn new(
    base: &'a dyn VersionComparator,
    structure: &'a VersionStructure,
  ) -> Self {
    Self { base, structure }
  }
}

impl VersionComparator for BuildAwareComparator<'_> {
  fn compare(&self, left: &Version, right: &Version) -> Ordering {
    let left_parts =
      self.structure.split_version_and_build_text(left.original_text());
    let right_parts =
      self.structure.split_version_and_build_text(right.original_text());

    let ordering = self.base.compare(
      &Version::new(left_parts.version_text),
      &Version::new(right_parts.version_text),
    );
    if ordering != Ordering::Equal {
      return ordering;
    }
    match self.structure.build_comparison_policy() {
      BuildComparisonPolicy::Ignore => Ordering::Equal,
      BuildComparisonPolicy::TokenCompare => {
        compare_build_text(left_parts.build_text, right_parts.build_text)
      }
    }
  }
}

/// Compares with `base`, going through a [`BuildAwareComparator`] only when
/// the structure asks for it.
pub(crate) fn compare_with_structure(
  base: &dyn VersionComparator,
  structure: &VersionStructure,
  left: &Version,
  right: &Version,
) -> Ordering {
  if needs_build_aware_comparator(structure) {
    BuildAwareComparator::new(base, structure).compare(left, right)
  } else {
    base.compare(left, right)
  }
}

#[derive(Debug, PartialEq, Eq)]
enum BuildToken<'a> {
  Numeric(Magnitude),
  Text(&'a str),
}

impl PartialOrd for BuildToken<'_> {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for BuildToken<'_> {
  fn cmp(&self, other: &Self) -> Ordering {
    match (self, other) {
      (BuildToken::Numeric(a), BuildToken::Numeric(b)) => a.cmp(b),
      (BuildToken::Numeric(_), BuildToken::Text(_)) => Ordering::Less,
      (BuildToken::Text(_), BuildToken::Numeric(_)) => Ordering::Greater,
      (BuildToken::Text(a), BuildToken::Text(b)) => a
        .bytes()
        .map(|c| c.to_ascii_lowercase())
        .cmp(b.bytes().map(|c| c.to_ascii_lowercase())),
    }
  }
}

fn build_tokens(text: &str) -> impl Iterator<Item = BuildToken<'_>> {
  text
    .split(|c: char| !is_alphanumeric_char(c))
    .filter(|part| !part.is_empty())
    .map(|part| match Magnitude::parse(part) {
      Some(value) => BuildToken::Numeric(value),
      None => BuildToken::Text(part),
    })
}

/// Orders build texts token by token. Digit-only tokens compare by value
/// and sort before text tokens, which compare ignoring ASCII case. An empty
/// build text and a shorter token sequence both sort first.
fn compare_build_text(left: &str, right: &str) -> Ordering {
  match (left.is_empty(), right.is_empty()) {
    (true, true) => return Ordering::Equal,
    (true, false) => return Ordering::Less,
    (false, true) => return Ordering::Greater,
    (false, false) => {}
  }
  build_tokens(left).cmp(build_tokens(right))
}
