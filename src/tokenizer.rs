// Copyright 2018-2023 the Deno authors. All rights reserved. MIT license.

use monch::*;
use serde::Serialize;

use crate::string::TokenText;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenKind {
  /// A maximal run of `[A-Za-z0-9]`.
  Alphanumeric,
  /// A maximal run of anything else.
  Separator,
}

/// A run of characters of a single [`TokenKind`] within a version string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Token {
  kind: TokenKind,
  text: TokenText,
}

impl Token {
  pub fn new(kind: TokenKind, text: &str) -> Self {
    Self {
      kind,
      text: TokenText::from_str(text),
    }
  }

  pub fn kind(&self) -> TokenKind {
    self.kind
  }

  pub fn text(&self) -> &str {
    self.text.as_str()
  }

  pub fn is_alphanumeric(&self) -> bool {
    self.kind == TokenKind::Alphanumeric
  }
}

/// Splits a version string into alternating alphanumeric and separator runs.
///
/// Leading and trailing whitespace is trimmed first. The concatenated token
/// texts always reproduce the trimmed input, and two adjacent tokens never
/// share a kind. Only ASCII letters and digits count as alphanumeric.
pub fn tokenize(text: &str) -> Vec<Token> {
  let mut input = text.trim();
  let mut tokens = Vec::new();
  while !input.is_empty() {
    match token(input) {
      Ok((rest, token)) => {
        tokens.push(token);
        input = rest;
      }
      // unreachable for non-empty input since one of the runs always matches
      Err(_) => break,
    }
  }
  tokens
}

pub(crate) fn is_alphanumeric_char(c: char) -> bool {
  c.is_ascii_alphanumeric()
}

// token ::= alphanumeric-run | separator-run
fn token(input: &str) -> ParseResult<'_, Token> {
  or(
    map(alphanumeric_run, |text| Token::new(TokenKind::Alphanumeric, text)),
    map(separator_run, |text| Token::new(TokenKind::Separator, text)),
  )(input)
}

// alphanumeric-run ::= [A-Za-z0-9]+
fn alphanumeric_run(input: &str) -> ParseResult<'_, &str> {
  if_true(take_while(is_alphanumeric_char), |result| !result.is_empty())(
    input,
  )
}

// separator-run ::= [^A-Za-z0-9]+
fn separator_run(input: &str) -> ParseResult<'_, &str> {
  if_true(take_while(|c| !is_alphanumeric_char(c)), |result| {
    !result.is_empty()
  })(input)
}

#[cfg(test)]
mod test {
  use pretty_assertions::assert_eq;

  use super::*;

  fn texts(tokens: &[Token]) -> Vec<(TokenKind, &str)> {
    tokens.iter().map(|t| (t.kind(), t.text())).collect()
  }

  #[test]
  fn splits_alphanumeric_and_separators() {
    let tokens = tokenize("1.0-rc1+build.7");
    assert_eq!(
      texts(&tokens),
      vec![
        (TokenKind::Alphanumeric, "1"),
        (TokenKind::Separator, "."),
        (TokenKind::Alphanumeric, "0"),
        (TokenKind::Separator, "-"),
        (TokenKind::Alphanumeric, "rc1"),
        (TokenKind::Separator, "+"),
        (TokenKind::Alphanumeric, "build"),
        (TokenKind::Separator, "."),
        (TokenKind::Alphanumeric, "7"),
      ]
    );
  }

  #[test]
  fn trims_and_handles_empty() {
    assert!(tokenize("").is_empty());
    assert!(tokenize("   \t ").is_empty());
    let tokens = tokenize("  v2 ");
    assert_eq!(texts(&tokens), vec![(TokenKind::Alphanumeric, "v2")]);
  }

  #[test]
  fn groups_consecutive_separators() {
    let tokens = tokenize("--1..2__");
    assert_eq!(
      texts(&tokens),
      vec![
        (TokenKind::Separator, "--"),
        (TokenKind::Alphanumeric, "1"),
        (TokenKind::Separator, ".."),
        (TokenKind::Alphanumeric, "2"),
        (TokenKind::Separator, "__"),
      ]
    );
  }

  #[test]
  fn non_ascii_is_separator() {
    let tokens = tokenize("1é2");
    assert_eq!(
      texts(&tokens),
      vec![
        (TokenKind::Alphanumeric, "1"),
        (TokenKind::Separator, "é"),
        (TokenKind::Alphanumeric, "2"),
      ]
    );
  }

  #[test]
  fn reconstructs_input_with_alternating_kinds() {
    for text in [
      "1.2.3",
      " 2024.01.15-hotfix ",
      "a",
      "...",
      "1.0.0-alpha+001",
      "x-y_z~9",
      "ü1ß",
    ] {
      let tokens = tokenize(text);
      let joined = tokens.iter().map(|t| t.text()).collect::<String>();
      assert_eq!(joined, text.trim());
      for pair in tokens.windows(2) {
        assert_ne!(pair[0].kind(), pair[1].kind(), "{text}");
      }
    }
  }
}
