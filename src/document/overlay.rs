// Copyright 2026, The config-examples Authors
// SPDX-License-Identifier: Apache-2.0

//! Flat `key=value` overlays read from `.conf` files.

use crate::error::{Result, ScenarioError};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Replacement values keyed by simple field name (`Issuer`), not by path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlayMap {
    values: BTreeMap<String, String>,
}

impl OverlayMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an overlay file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            ScenarioError::OverlayLoadError(format!("failed to read {}: {}", path.display(), e))
        })?;

        Self::parse(&text).map_err(|e| match e {
            ScenarioError::OverlayLoadError(msg) => {
                ScenarioError::OverlayLoadError(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Parse `key=value` lines. Blank lines and `#` comments are skipped,
    /// keys and values are trimmed, and a later key overrides an earlier one.
    pub fn parse(text: &str) -> Result<Self> {
        let mut values = BTreeMap::new();

        for (i, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                return Err(ScenarioError::OverlayLoadError(format!(
                    "invalid format at line {}: {} (expected key=value)",
                    i + 1,
                    line
                )));
            };

            let key = key.trim();
            if key.is_empty() {
                return Err(ScenarioError::OverlayLoadError(format!(
                    "empty key at line {}",
                    i + 1
                )));
            }

            values.insert(key.to_string(), value.trim().to_string());
        }

        Ok(Self { values })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// New overlay with `f` applied to every value
    pub fn map_values<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&str) -> String,
    {
        Self {
            values: self
                .values
                .iter()
                .map(|(k, v)| (k.clone(), f(v)))
                .collect(),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for OverlayMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
