// Copyright 2018-2023 the Deno authors. All rights reserved. MIT license.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::interval::Interval;
use crate::interval::IntervalBoundary;
use crate::interval::IntervalError;
use crate::scheme::VersionScheme;
use crate::Version;

/// An interval of versions ordered by a scheme.
///
/// Every comparison, including validation on construction and of derived
/// intersections, goes through the scheme's build-aware comparison.
#[derive(Clone)]
pub struct VersionInterval {
  interval: Interval<Version>,
  scheme: Arc<dyn VersionScheme>,
}

impl VersionInterval {
  pub fn new(
    left_boundary: IntervalBoundary,
    left_value: Option<Version>,
    right_boundary: IntervalBoundary,
    right_value: Option<Version>,
    scheme: Arc<dyn VersionScheme>,
  ) -> Result<Self, IntervalError> {
    let interval = Interval::new_by(
      left_boundary,
      left_value,
      right_boundary,
      right_value,
      |a, b| scheme.compare(a, b),
    )?;
    Ok(Self { interval, scheme })
  }

  /// Every version, `(*, *)`.
  pub fn unbounded(scheme: Arc<dyn VersionScheme>) -> Self {
    Self {
      interval: Interval::unbounded(),
      scheme,
    }
  }

  pub fn interval(&self) -> &Interval<Version> {
    &self.interval
  }

  pub fn scheme(&self) -> &dyn VersionScheme {
    self.scheme.as_ref()
  }

  pub fn left_boundary(&self) -> IntervalBoundary {
    self.interval.left_boundary()
  }

  pub fn left_value(&self) -> Option<&Version> {
    self.interval.left_value()
  }

  pub fn right_boundary(&self) -> IntervalBoundary {
    self.interval.right_boundary()
  }

  pub fn right_value(&self) -> Option<&Version> {
    self.interval.right_value()
  }

  pub fn contains(&self, version: &Version) -> bool {
    self.interval.contains_by(version, self.comparison())
  }

  pub fn is_satisfiable(&self) -> bool {
    self.interval.is_satisfiable_by(self.comparison())
  }

  /// Intersects under this interval's scheme. The result keeps the scheme.
  ///
  /// Both intervals are expected to share a scheme. Debug builds panic
  /// when the scheme codes differ.
  pub fn try_intersect(&self, other: &VersionInterval) -> Option<Self> {
    self.debug_assert_same_scheme(other);
    let interval = self
      .interval
      .try_intersect_by(&other.interval, self.comparison())?;
    Some(Self {
      interval,
      scheme: self.scheme.clone(),
    })
  }

  pub fn intersect(
    &self,
    other: &VersionInterval,
  ) -> Result<Self, IntervalError> {
    self.try_intersect(other).ok_or(IntervalError::NoOverlap)
  }

  pub fn overlaps(&self, other: &VersionInterval) -> bool {
    self.try_intersect(other).is_some()
  }

  /// Orders under this interval's scheme, like [`Self::try_intersect`].
  pub fn compare(&self, other: &VersionInterval) -> Ordering {
    self.debug_assert_same_scheme(other);
    self.interval.compare_by(&other.interval, self.comparison())
  }

  pub fn is_strictly_before(&self, other: &VersionInterval) -> bool {
    self.debug_assert_same_scheme(other);
    self
      .interval
      .is_strictly_before_by(&other.interval, self.comparison())
  }

  fn debug_assert_same_scheme(&self, other: &VersionInterval) {
    debug_assert_eq!(
      self.scheme.code(),
      other.scheme.code(),
      "version intervals under different schemes"
    );
  }

  fn comparison(&self) -> impl Fn(&Version, &Version) -> Ordering + '_ {
    move |a: &Version, b: &Version| self.scheme.compare(a, b)
  }
}

impl fmt::Display for VersionInterval {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.interval.fmt(f)
  }
}

impl fmt::Debug for VersionInterval {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("VersionInterval")
      .field("interval", &self.interval)
      .field("scheme", &self.scheme.code())
      .finish()
  }
}

#[cfg(test)]
mod test {
  use pretty_assertions::assert_eq;

  use super::*;
  use crate::interval::IntervalBoundary::*;
  use crate::scheme::BuiltinVersionScheme;

  fn semver() -> Arc<dyn VersionScheme> {
    Arc::new(BuiltinVersionScheme::SemverDefault)
  }

  fn bound(boundary: IntervalBoundary, text: &str) -> Option<Version> {
    match boundary {
      Unbounded => None,
      _ => Some(Version::new(text)),
    }
  }

  #[track_caller]
  fn interval(
    left_boundary: IntervalBoundary,
    left: &str,
    right_boundary: IntervalBoundary,
    right: &str,
    scheme: Arc<dyn VersionScheme>,
  ) -> VersionInterval {
    VersionInterval::new(
      left_boundary,
      bound(left_boundary, left),
      right_boundary,
      bound(right_boundary, right),
      scheme,
    )
    .unwrap()
  }

  #[test]
  fn contains_ignores_build_metadata() {
    let range = interval(Closed, "1.0.0", Open, "2.0.0", semver());
    assert!(range.contains(&Version::new("1.9.9+meta")));
    assert!(range.contains(&Version::new("1.0.0+meta")));
    assert!(!range.contains(&Version::new("2.0.0+meta")));
    assert!(!range.contains(&Version::new("0.9.9")));
    assert!(range.is_satisfiable());
  }

  #[test]
  fn intersects_under_scheme() {
    let a = interval(Closed, "1.0.0", Open, "2.0.0", semver());
    let b = interval(Open, "1.5.0", Closed, "3.0.0", semver());
    let result = a.intersect(&b).unwrap();
    assert_eq!(result.to_string(), "(1.5.0, 2.0.0)");
    assert_eq!(result.scheme().code(), "semver-default");
    assert!(a.overlaps(&b));

    let a = interval(Closed, "1.0.0", Open, "1.1.0", semver());
    let b = interval(Closed, "1.1.0", Closed, "2.0.0", semver());
    assert!(a.try_intersect(&b).is_none());
    assert_eq!(a.intersect(&b).unwrap_err(), IntervalError::NoOverlap);
    assert!(a.is_strictly_before(&b));
    assert!(!b.is_strictly_before(&a));
  }

  #[test]
  fn rejects_reversed_bounds() {
    let err = VersionInterval::new(
      Closed,
      Some(Version::new("2.0.0")),
      Closed,
      Some(Version::new("1.0.0")),
      semver(),
    )
    .unwrap_err();
    assert_eq!(err, IntervalError::LeftGreaterThanRight);
  }

  #[test]
  fn point_intervals_follow_scheme_equality() {
    let maven: Arc<dyn VersionScheme> =
      Arc::new(BuiltinVersionScheme::MavenDefault);
    // equal under maven trailing zero rules
    let point = interval(Closed, "1.0", Closed, "1.0.0", maven.clone());
    assert!(point.contains(&Version::new("1")));
    let err = VersionInterval::new(
      Open,
      Some(Version::new("1.0")),
      Closed,
      Some(Version::new("1.0.0")),
      maven,
    )
    .unwrap_err();
    assert_eq!(err, IntervalError::OpenPointInterval);

    // build metadata only matters for the ordered scheme
    let point = interval(Closed, "1.0.0+2", Closed, "1.0.0+1", semver());
    assert!(point.contains(&Version::new("1.0.0")));
    let ordered: Arc<dyn VersionScheme> =
      Arc::new(BuiltinVersionScheme::SemverBuildOrdered);
    let err = VersionInterval::new(
      Closed,
      Some(Version::new("1.0.0+2")),
      Closed,
      Some(Version::new("1.0.0+1")),
      ordered.clone(),
    )
    .unwrap_err();
    assert_eq!(err, IntervalError::LeftGreaterThanRight);
    let range = interval(Closed, "1.0.0+1", Closed, "1.0.0+3", ordered);
    assert!(range.contains(&Version::new("1.0.0+2")));
    assert!(!range.contains(&Version::new("1.0.0+4")));
    assert!(!range.contains(&Version::new("1.0.0")));
  }

  #[test]
  #[cfg(debug_assertions)]
  #[should_panic(expected = "version intervals under different schemes")]
  fn rejects_mixed_schemes_in_debug() {
    let maven: Arc<dyn VersionScheme> =
      Arc::new(BuiltinVersionScheme::MavenDefault);
    let a = interval(Closed, "1.0", Open, "2.0", semver());
    let b = interval(Closed, "1.5", Open, "3.0", maven);
    let _ = a.compare(&b);
  }

  #[test]
  fn ordering_and_display() {
    let calver: Arc<dyn VersionScheme> =
      Arc::new(BuiltinVersionScheme::CalverDefault);
    let mut intervals = vec![
      interval(Closed, "2024.10", Unbounded, "", calver.clone()),
      interval(Open, "2024.2", Closed, "2024.9", calver.clone()),
      interval(Unbounded, "", Open, "2024.1", calver.clone()),
      interval(Closed, "2024.2", Closed, "2024.9", calver.clone()),
      VersionInterval::unbounded(calver),
    ];
    intervals.sort_by(|a, b| a.compare(b));
    let rendered = intervals.iter().map(|i| i.to_string()).collect::<Vec<_>>();
    assert_eq!(
      rendered,
      vec![
        "(*, 2024.1)",
        "(*, *)",
        "[2024.2, 2024.9]",
        "(2024.2, 2024.9]",
        "[2024.10, *)",
      ]
    );
    assert_eq!(intervals[1].left_boundary(), Unbounded);
    assert_eq!(intervals[2].left_value(), Some(&Version::new("2024.2")));
  }
}
