// Copyright 2018-2023 the Deno authors. All rights reserved. MIT license.

use std::cmp::Ordering;
use std::fmt;

use deno_error::JsError;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, JsError, PartialEq, Eq)]
pub enum IntervalError {
  #[class(type)]
  #[error(
    "Left value must not be null when left boundary does not ignore the boundary value"
  )]
  MissingLeftValue,
  #[class(type)]
  #[error(
    "Right value must not be null when right boundary does not ignore the boundary value"
  )]
  MissingRightValue,
  #[class(type)]
  #[error("Invalid interval: left value is greater than right value")]
  LeftGreaterThanRight,
  #[class(type)]
  #[error(
    "Invalid interval: point interval requires both boundaries to be closed"
  )]
  OpenPointInterval,
  #[class(type)]
  #[error("Intervals do not overlap")]
  NoOverlap,
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum IntervalBoundary {
  /// Excludes the boundary value.
  Open,
  /// Includes the boundary value.
  Closed,
  /// No constraint on this side. Any value is dropped.
  Unbounded,
}

/// An interval over any total order.
///
/// Construction validates that bounded sides carry a value, that the left
/// value does not exceed the right one, and that a point interval is closed
/// on both sides, so an `Interval` is never empty.
///
/// Methods come in two flavors: the plain ones use the natural order of
/// `T: Ord`, and the `*_by` ones take the comparison to use. Versions only
/// have the latter (see [`crate::VersionInterval`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Interval<T> {
  left_boundary: IntervalBoundary,
  left_value: Option<T>,
  right_boundary: IntervalBoundary,
  right_value: Option<T>,
}

impl<T> Interval<T> {
  pub fn new_by(
    left_boundary: IntervalBoundary,
    left_value: Option<T>,
    right_boundary: IntervalBoundary,
    right_value: Option<T>,
    cmp: impl Fn(&T, &T) -> Ordering,
  ) -> Result<Self, IntervalError> {
    let left_value = match left_boundary {
      IntervalBoundary::Unbounded => None,
      _ => Some(left_value.ok_or(IntervalError::MissingLeftValue)?),
    };
    let right_value = match right_boundary {
      IntervalBoundary::Unbounded => None,
      _ => Some(right_value.ok_or(IntervalError::MissingRightValue)?),
    };
    if let (Some(left), Some(right)) = (&left_value, &right_value) {
      match cmp(left, right) {
        Ordering::Greater => return Err(IntervalError::LeftGreaterThanRight),
        Ordering::Equal
          if left_boundary != IntervalBoundary::Closed
            || right_boundary != IntervalBoundary::Closed =>
        {
          return Err(IntervalError::OpenPointInterval);
        }
        _ => {}
      }
    }
    Ok(Self {
      left_boundary,
      left_value,
      right_boundary,
      right_value,
    })
  }

  /// The interval containing every value, `(*, *)`.
  pub fn unbounded() -> Self {
    Self {
      left_boundary: IntervalBoundary::Unbounded,
      left_value: None,
      right_boundary: IntervalBoundary::Unbounded,
      right_value: None,
    }
  }

  /// The interval containing only `value`, `[value, value]`.
  pub fn point(value: T) -> Self
  where
    T: Clone,
  {
    Self {
      left_boundary: IntervalBoundary::Closed,
      left_value: Some(value.clone()),
      right_boundary: IntervalBoundary::Closed,
      right_value: Some(value),
    }
  }

  pub fn left_boundary(&self) -> IntervalBoundary {
    self.left_boundary
  }

  pub fn left_value(&self) -> Option<&T> {
    self.left_value.as_ref()
  }

  pub fn right_boundary(&self) -> IntervalBoundary {
    self.right_boundary
  }

  pub fn right_value(&self) -> Option<&T> {
    self.right_value.as_ref()
  }

  pub fn is_left_unbounded(&self) -> bool {
    self.left_boundary == IntervalBoundary::Unbounded
  }

  pub fn is_right_unbounded(&self) -> bool {
    self.right_boundary == IntervalBoundary::Unbounded
  }

  pub fn contains_by(
    &self,
    value: &T,
    cmp: impl Fn(&T, &T) -> Ordering,
  ) -> bool {
    if let Some(left) = &self.left_value {
      match cmp(value, left) {
        Ordering::Less => return false,
        Ordering::Equal if self.left_boundary == IntervalBoundary::Open => {
          return false
        }
        _ => {}
      }
    }
    if let Some(right) = &self.right_value {
      match cmp(value, right) {
        Ordering::Greater => return false,
        Ordering::Equal if self.right_boundary == IntervalBoundary::Open => {
          return false
        }
        _ => {}
      }
    }
    true
  }

  /// Gets if at least one value lies in the interval under `cmp`.
  ///
  /// Always true for an interval validated with the same order, but an
  /// interval built under one order may be empty under another.
  pub fn is_satisfiable_by(&self, cmp: impl Fn(&T, &T) -> Ordering) -> bool {
    match (&self.left_value, &self.right_value) {
      (Some(left), Some(right)) => match cmp(left, right) {
        Ordering::Less => true,
        Ordering::Equal => {
          self.left_boundary == IntervalBoundary::Closed
            && self.right_boundary == IntervalBoundary::Closed
        }
        Ordering::Greater => false,
      },
      _ => true,
    }
  }

  /// The intersection, or `None` when the intervals share no value.
  pub fn try_intersect_by(
    &self,
    other: &Self,
    cmp: impl Fn(&T, &T) -> Ordering,
  ) -> Option<Self>
  where
    T: Clone,
  {
    let (left_boundary, left_value) = tighter_side(
      (self.left_boundary, &self.left_value),
      (other.left_boundary, &other.left_value),
      Ordering::Greater,
      &cmp,
    );
    let (right_boundary, right_value) = tighter_side(
      (self.right_boundary, &self.right_value),
      (other.right_boundary, &other.right_value),
      Ordering::Less,
      &cmp,
    );
    Self::new_by(
      left_boundary,
      left_value.cloned(),
      right_boundary,
      right_value.cloned(),
      cmp,
    )
    .ok()
  }

  pub fn intersect_by(
    &self,
    other: &Self,
    cmp: impl Fn(&T, &T) -> Ordering,
  ) -> Result<Self, IntervalError>
  where
    T: Clone,
  {
    self
      .try_intersect_by(other, cmp)
      .ok_or(IntervalError::NoOverlap)
  }

  pub fn overlaps_by(
    &self,
    other: &Self,
    cmp: impl Fn(&T, &T) -> Ordering,
  ) -> bool
  where
    T: Clone,
  {
    self.try_intersect_by(other, cmp).is_some()
  }

  /// Orders by left endpoint, then by right endpoint.
  ///
  /// An unbounded left sorts first and an unbounded right sorts last. At
  /// equal left values a closed boundary sorts first, while at equal right
  /// values a closed boundary sorts last.
  pub fn compare_by(
    &self,
    other: &Self,
    cmp: impl Fn(&T, &T) -> Ordering,
  ) -> Ordering {
    let left = match (&self.left_value, &other.left_value) {
      (None, None) => Ordering::Equal,
      (None, Some(_)) => Ordering::Less,
      (Some(_), None) => Ordering::Greater,
      (Some(a), Some(b)) => cmp(a, b).then_with(|| {
        closed_first(self.left_boundary, other.left_boundary)
      }),
    };
    left.then_with(|| match (&self.right_value, &other.right_value) {
      (None, None) => Ordering::Equal,
      (None, Some(_)) => Ordering::Greater,
      (Some(_), None) => Ordering::Less,
      (Some(a), Some(b)) => cmp(a, b).then_with(|| {
        closed_first(self.right_boundary, other.right_boundary).reverse()
      }),
    })
  }

  /// Gets if every value of this interval lies before every value of the
  /// other one. Intervals that touch at an excluded value count as apart.
  pub fn is_strictly_before_by(
    &self,
    other: &Self,
    cmp: impl Fn(&T, &T) -> Ordering,
  ) -> bool {
    let (Some(right), Some(left)) = (&self.right_value, &other.left_value)
    else {
      return false;
    };
    match cmp(right, left) {
      Ordering::Less => true,
      Ordering::Equal => {
        self.right_boundary == IntervalBoundary::Open
          || other.left_boundary == IntervalBoundary::Open
      }
      Ordering::Greater => false,
    }
  }
}

/// Picks the side that constrains more. `prefer` is the ordering of a
/// value that wins, `Greater` for left sides and `Less` for right sides.
fn tighter_side<'a, T>(
  a: (IntervalBoundary, &'a Option<T>),
  b: (IntervalBoundary, &'a Option<T>),
  prefer: Ordering,
  cmp: &impl Fn(&T, &T) -> Ordering,
) -> (IntervalBoundary, Option<&'a T>) {
  match (a.1, b.1) {
    (None, None) => (IntervalBoundary::Unbounded, None),
    (Some(value), None) => (a.0, Some(value)),
    (None, Some(value)) => (b.0, Some(value)),
    (Some(a_value), Some(b_value)) => {
      let ordering = cmp(a_value, b_value);
      if ordering == prefer {
        (a.0, Some(a_value))
      } else if ordering == Ordering::Equal {
        let boundary = if a.0 == IntervalBoundary::Closed
          && b.0 == IntervalBoundary::Closed
        {
          IntervalBoundary::Closed
        } else {
          IntervalBoundary::Open
        };
        (boundary, Some(a_value))
      } else {
        (b.0, Some(b_value))
      }
    }
  }
}

fn closed_first(a: IntervalBoundary, b: IntervalBoundary) -> Ordering {
  fn rank(boundary: IntervalBoundary) -> u8 {
    match boundary {
      IntervalBoundary::Closed => 0,
      IntervalBoundary::Open | IntervalBoundary::Unbounded => 1,
    }
  }
  rank(a).cmp(&rank(b))
}

impl<T: Ord> Interval<T> {
  pub fn new(
    left_boundary: IntervalBoundary,
    left_value: Option<T>,
    right_boundary: IntervalBoundary,
    right_value: Option<T>,
  ) -> Result<Self, IntervalError> {
    Self::new_by(
      left_boundary,
      left_value,
      right_boundary,
      right_value,
      T::cmp,
    )
  }

  /// `[left, right]`
  pub fn closed(left: T, right: T) -> Result<Self, IntervalError> {
    Self::new(
      IntervalBoundary::Closed,
      Some(left),
      IntervalBoundary::Closed,
      Some(right),
    )
  }

  /// `(left, right)`
  pub fn open(left: T, right: T) -> Result<Self, IntervalError> {
    Self::new(
      IntervalBoundary::Open,
      Some(left),
      IntervalBoundary::Open,
      Some(right),
    )
  }

  pub fn contains(&self, value: &T) -> bool {
    self.contains_by(value, T::cmp)
  }

  pub fn is_satisfiable(&self) -> bool {
    self.is_satisfiable_by(T::cmp)
  }

  pub fn is_strictly_before(&self, other: &Self) -> bool {
    self.is_strictly_before_by(other, T::cmp)
  }
}

impl<T: Ord + Clone> Interval<T> {
  pub fn try_intersect(&self, other: &Self) -> Option<Self> {
    self.try_intersect_by(other, T::cmp)
  }

  pub fn intersect(&self, other: &Self) -> Result<Self, IntervalError> {
    self.intersect_by(other, T::cmp)
  }

  pub fn overlaps(&self, other: &Self) -> bool {
    self.overlaps_by(other, T::cmp)
  }
}

impl<T: Ord> PartialOrd for Interval<T> {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl<T: Ord> Ord for Interval<T> {
  fn cmp(&self, other: &Self) -> Ordering {
    self.compare_by(other, T::cmp)
  }
}

impl<T: fmt::Display> fmt::Display for Interval<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match (self.left_boundary, &self.left_value) {
      (IntervalBoundary::Closed, Some(value)) => write!(f, "[{value}")?,
      (IntervalBoundary::Open, Some(value)) => write!(f, "({value}")?,
      _ => write!(f, "(*")?,
    }
    write!(f, ", ")?;
    match (self.right_boundary, &self.right_value) {
      (IntervalBoundary::Closed, Some(value)) => write!(f, "{value}]"),
      (IntervalBoundary::Open, Some(value)) => write!(f, "{value})"),
      _ => write!(f, "*)"),
    }
  }
}
