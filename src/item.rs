// Copyright 2018-2023 the Deno authors. All rights reserved. MIT license.

use std::cmp::Ordering;

use crate::tokenizer::Token;

/// A non-negative integer of arbitrary size, kept as its decimal digits.
///
/// Leading zeros are stripped on construction, so ordering by length and
/// then by digits is the same as ordering by numeric value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Magnitude(String);

impl Magnitude {
  /// Returns `None` when the text is empty or contains a non-digit.
  pub fn parse(digits: &str) -> Option<Self> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
      return None;
    }
    let trimmed = digits.trim_start_matches('0');
    Some(Self(trimmed.to_string()))
  }

  pub fn zero() -> Self {
    Self(String::new())
  }

  pub fn is_zero(&self) -> bool {
    self.0.is_empty()
  }
}

impl Ord for Magnitude {
  fn cmp(&self, other: &Self) -> Ordering {
    self
      .0
      .len()
      .cmp(&other.0.len())
      .then_with(|| self.0.cmp(&other.0))
  }
}

impl PartialOrd for Magnitude {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
  Numeric(Magnitude),
  Qualifier(String),
  /// Pads the shorter side of a comparison. Ranks like `Numeric(0)`.
  ReleaseMarker,
}

/// Qualifier semantics of a comparator family.
pub(crate) trait QualifierOrder {
  fn compare_qualifiers(&self, left: &str, right: &str) -> Ordering;

  /// Orders a qualifier against the absence of any qualifier.
  fn compare_to_release(&self, qualifier: &str) -> Ordering;
}

/// Converts tokens into comparison items.
///
/// When `stop_at_plus` is set, everything from the first separator that
/// contains a `+` onwards is dropped.
pub(crate) fn normalize(tokens: &[Token], stop_at_plus: bool) -> Vec<Item> {
  let mut items = Vec::with_capacity(tokens.len());
  for token in tokens {
    if !token.is_alphanumeric() {
      if stop_at_plus && token.text().contains('+') {
        break;
      }
      continue;
    }
    split_alphanumeric(token.text(), &mut items);
  }
  trim_trailing(&mut items);
  items
}

/// Splits `"1a2"` into `Numeric(1), Qualifier("a"), Numeric(2)`.
fn split_alphanumeric(text: &str, items: &mut Vec<Item>) {
  let mut rest = text;
  while let Some(first) = rest.chars().next() {
    let digit = first.is_ascii_digit();
    let end = rest
      .find(|c: char| c.is_ascii_digit() != digit)
      .unwrap_or(rest.len());
    let (part, next) = rest.split_at(end);
    items.push(if digit {
      // part is all digits, so parsing cannot fail
      Item::Numeric(Magnitude::parse(part).unwrap_or(Magnitude::zero()))
    } else {
      Item::Qualifier(part.to_string())
    });
    rest = next;
  }
}

fn trim_trailing(items: &mut Vec<Item>) {
  while let Some(last) = items.last() {
    match last {
      Item::Numeric(value) if value.is_zero() => {}
      Item::ReleaseMarker => {}
      Item::Numeric(_) | Item::Qualifier(_) => break,
    }
    items.pop();
  }
}

/// Compares two normalized item sequences position by position, padding the
/// shorter one with [`Item::ReleaseMarker`].
pub(crate) fn compare_items(
  left: &[Item],
  right: &[Item],
  order: &impl QualifierOrder,
) -> Ordering {
  let len = left.len().max(right.len());
  for i in 0..len {
    let a = left.get(i).unwrap_or(&Item::ReleaseMarker);
    let b = right.get(i).unwrap_or(&Item::ReleaseMarker);
    let ordering = compare_item(a, b, order);
    if ordering != Ordering::Equal {
      return ordering;
    }
  }
  Ordering::Equal
}

fn compare_item(
  left: &Item,
  right: &Item,
  order: &impl QualifierOrder,
) -> Ordering {
  use Item::*;

  match (left, right) {
    (Numeric(a), Numeric(b)) => a.cmp(b),
    (ReleaseMarker, ReleaseMarker) => Ordering::Equal,
    (ReleaseMarker, Numeric(value)) => {
      if value.is_zero() {
        Ordering::Equal
      } else {
        Ordering::Less
      }
    }
    (Numeric(value), ReleaseMarker) => {
      if value.is_zero() {
        Ordering::Equal
      } else {
        Ordering::Greater
      }
    }
    (ReleaseMarker, Qualifier(q)) => order.compare_to_release(q).reverse(),
    (Qualifier(q), ReleaseMarker) => order.compare_to_release(q),
    // a zero ranks like the release marker it would be trimmed to
    (Numeric(value), Qualifier(q)) if value.is_zero() => {
      order.compare_to_release(q).reverse()
    }
    (Qualifier(q), Numeric(value)) if value.is_zero() => {
      order.compare_to_release(q)
    }
    (Numeric(_), Qualifier(_)) => Ordering::Greater,
    (Qualifier(_), Numeric(_)) => Ordering::Less,
    (Qualifier(a), Qualifier(b)) => order.compare_qualifiers(a, b),
  }
}

#[cfg(test)]
mod test {
  use pretty_assertions::assert_eq;

  use super::*;
  use crate::tokenizer::tokenize;

  struct Lexicographic;

  impl QualifierOrder for Lexicographic {
    fn compare_qualifiers(&self, left: &str, right: &str) -> Ordering {
      left.cmp(right)
    }

    fn compare_to_release(&self, _qualifier: &str) -> Ordering {
      Ordering::Less
    }
  }

  fn num(value: &str) -> Item {
    Item::Numeric(Magnitude::parse(value).unwrap())
  }

  fn qual(value: &str) -> Item {
    Item::Qualifier(value.to_string())
  }

  #[test]
  fn magnitude_orders_by_value() {
    let m = |s: &str| Magnitude::parse(s).unwrap();
    assert!(m("10") > m("2"));
    assert_eq!(m("007"), m("7"));
    assert!(m("0").is_zero());
    assert!(m("000").is_zero());
    assert!(
      m("123456789012345678901234567890") > m("99999999999999999999")
    );
    assert_eq!(Magnitude::parse(""), None);
    assert_eq!(Magnitude::parse("1a"), None);
  }

  #[test]
  fn splits_mixed_runs() {
    let items = normalize(&tokenize("1a2"), false);
    assert_eq!(items, vec![num("1"), qual("a"), num("2")]);
  }

  #[test]
  fn trims_trailing_zeros() {
    assert_eq!(normalize(&tokenize("1.0.0"), false), vec![num("1")]);
    assert_eq!(normalize(&tokenize("0.0"), false), vec![]);
    assert_eq!(
      normalize(&tokenize("1.0-rc.0"), false),
      vec![num("1"), num("0"), qual("rc")]
    );
  }

  #[test]
  fn stops_at_plus_separator() {
    assert_eq!(
      normalize(&tokenize("1.2.3+build.5"), true),
      vec![num("1"), num("2"), num("3")]
    );
    assert_eq!(
      normalize(&tokenize("1.2.3-a+b"), true),
      vec![num("1"), num("2"), num("3"), qual("a")]
    );
    assert_eq!(normalize(&tokenize("1.2+3"), false).len(), 3);
  }

  #[test]
  fn pads_with_release_marker() {
    let order = Lexicographic;
    let cmp = |a: &str, b: &str| {
      compare_items(
        &normalize(&tokenize(a), false),
        &normalize(&tokenize(b), false),
        &order,
      )
    };
    assert_eq!(cmp("1.0", "1"), Ordering::Equal);
    assert_eq!(cmp("1.1", "1"), Ordering::Greater);
    assert_eq!(cmp("1", "1.1"), Ordering::Less);
    assert_eq!(cmp("1.a", "1"), Ordering::Less);
    assert_eq!(cmp("1", "1.a"), Ordering::Greater);
    assert_eq!(cmp("1.1", "1.a"), Ordering::Greater);
    assert_eq!(cmp("1.a", "1.b"), Ordering::Less);
  }

  struct AboveRelease;

  impl QualifierOrder for AboveRelease {
    fn compare_qualifiers(&self, left: &str, right: &str) -> Ordering {
      left.cmp(right)
    }

    fn compare_to_release(&self, _qualifier: &str) -> Ordering {
      Ordering::Greater
    }
  }

  #[track_caller]
  fn assert_zero_like_marker(order: &impl QualifierOrder, qualifier: &str) {
    let q = qual(qualifier);
    assert_eq!(
      compare_item(&num("0"), &q, order),
      compare_item(&Item::ReleaseMarker, &q, order)
    );
    assert_eq!(
      compare_item(&q, &num("0"), order),
      compare_item(&q, &Item::ReleaseMarker, order)
    );
  }

  #[test]
  fn zero_compares_like_release_marker() {
    assert_zero_like_marker(&Lexicographic, "sp");
    assert_zero_like_marker(&AboveRelease, "sp");

    // [1, 0, sp] against [1, sp] and [1]
    let order = AboveRelease;
    let zero_padded = [num("1"), num("0"), qual("sp")];
    assert_eq!(
      compare_items(&zero_padded, &[num("1"), qual("sp")], &order),
      Ordering::Less
    );
    assert_eq!(
      compare_items(&zero_padded, &[num("1")], &order),
      Ordering::Greater
    );
    // non-zero numbers still beat any qualifier
    assert_eq!(
      compare_item(&num("1"), &qual("sp"), &order),
      Ordering::Greater
    );
  }
}
