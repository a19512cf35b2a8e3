// Copyright 2026, The config-examples Authors
// SPDX-License-Identifier: Apache-2.0

//! Dot-notation assignments such as `spec.fulcio.certificate.commonName=fulcio.example.com`.
//!
//! Intermediate segments that are missing are created as empty mappings.
//! Intermediate segments holding anything other than a mapping (a string, a
//! list) are replaced by an empty mapping, discarding the old value. Leaf
//! values are always stored as YAML strings, never typed.

use super::ConfigDocument;
use crate::error::{Result, ScenarioError};
use serde_yaml::{Mapping, Value};

/// Apply a combined `path=value` assignment. Both sides are trimmed and the
/// value may itself contain `=`.
pub fn apply_assignment(doc: &mut ConfigDocument, assignment: &str) -> Result<()> {
    let Some((path, value)) = assignment.split_once('=') else {
        return Err(ScenarioError::InvalidPath(format!(
            "invalid path=value format: {}",
            assignment
        )));
    };

    set_path(doc, path.trim(), value.trim())
}

/// Store `value` at the dot-separated `path`, creating or replacing intermediate mappings
pub fn set_path(doc: &mut ConfigDocument, path: &str, value: &str) -> Result<()> {
    let segments = parse_path(path)?;
    let Some((leaf, parents)) = segments.split_last() else {
        return Err(ScenarioError::InvalidPath("path cannot be empty".to_string()));
    };

    let mut current: &mut Mapping = doc.data_mut();
    for segment in parents {
        let key = Value::String(segment.to_string());
        if !matches!(current.get(&key), Some(Value::Mapping(_))) {
            current.insert(key.clone(), Value::Mapping(Mapping::new()));
        }
        current = match current.get_mut(&key) {
            Some(Value::Mapping(next)) => next,
            _ => {
                return Err(ScenarioError::InvalidPath(format!(
                    "segment '{}' of {} is not a mapping",
                    segment, path
                )))
            }
        };
    }

    current.insert(
        Value::String(leaf.to_string()),
        Value::String(value.to_string()),
    );
    Ok(())
}

fn parse_path(path: &str) -> Result<Vec<&str>> {
    if path.is_empty() {
        return Err(ScenarioError::InvalidPath("path cannot be empty".to_string()));
    }

    let segments: Vec<&str> = path.split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(ScenarioError::InvalidPath(format!(
            "path contains an empty segment: {}",
            path
        )));
    }

    Ok(segments)
}
