// Copyright 2018-2023 the Deno authors. All rights reserved. MIT license.

use std::collections::HashMap;
use std::sync::Arc;

use crate::scheme::BuiltinVersionScheme;
use crate::scheme::SchemeError;
use crate::scheme::VersionScheme;

/// Resolves schemes by code.
///
/// Codes are matched ignoring ASCII case. Schemes can be added but never
/// replaced or removed.
#[derive(Clone)]
pub struct VersionSchemeRegistry {
  schemes: HashMap<String, Arc<dyn VersionScheme>>,
}

impl Default for VersionSchemeRegistry {
  fn default() -> Self {
    Self::new()
  }
}

impl VersionSchemeRegistry {
  /// A registry holding every [`BuiltinVersionScheme`].
  pub fn new() -> Self {
    let mut registry = Self::empty();
    for scheme in BuiltinVersionScheme::ALL {
      registry
        .schemes
        .insert(scheme.as_str().to_string(), Arc::new(scheme));
    }
    registry
  }

  pub fn empty() -> Self {
    Self {
      schemes: HashMap::new(),
    }
  }

  pub fn register(
    &mut self,
    scheme: Arc<dyn VersionScheme>,
  ) -> Result<(), SchemeError> {
    let code = scheme.code().trim();
    if code.is_empty() {
      return Err(SchemeError::BlankCode);
    }
    let key = code.to_ascii_lowercase();
    if self.schemes.contains_key(&key) {
      return Err(SchemeError::DuplicateCode {
        code: code.to_string(),
      });
    }
    log::debug!("registering version scheme '{}'", code);
    self.schemes.insert(key, scheme);
    Ok(())
  }

  pub fn get(&self, code: &str) -> Option<Arc<dyn VersionScheme>> {
    self
      .schemes
      .get(&code.trim().to_ascii_lowercase())
      .cloned()
  }

  pub fn get_or_err(
    &self,
    code: &str,
  ) -> Result<Arc<dyn VersionScheme>, SchemeError> {
    self.get(code).ok_or_else(|| SchemeError::UnknownScheme {
      code: code.to_string(),
    })
  }

  pub fn contains(&self, code: &str) -> bool {
    self.get(code).is_some()
  }

  /// Registered codes in sorted order.
  pub fn codes(&self) -> Vec<&str> {
    let mut codes = self
      .schemes
      .values()
      .map(|scheme| scheme.code())
      .collect::<Vec<_>>();
    codes.sort_unstable();
    codes
  }

  pub fn len(&self) -> usize {
    self.schemes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.schemes.is_empty()
  }
}

impl std::fmt::Debug for VersionSchemeRegistry {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("VersionSchemeRegistry")
      .field("codes", &self.codes())
      .finish()
  }
}
