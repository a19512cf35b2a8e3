// Copyright 2026, The config-examples Authors
// SPDX-License-Identifier: Apache-2.0

//! Schema-less Kubernetes manifests and the flat overlays that parameterize them.

pub mod overlay;
pub mod path;

pub use overlay::OverlayMap;
pub use path::{apply_assignment, set_path};

use crate::error::{Result, ScenarioError};
use crate::types::identity::{parse_api_version, ResourceIdentity};
use kube::api::{DynamicObject, GroupVersionKind};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// One parsed YAML document, kept as an untyped tree.
///
/// `apiVersion`, `kind` and `metadata.name` are only required once a
/// [`ResourceIdentity`] is derived; parsing accepts any mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigDocument {
    data: Mapping,
}

impl ConfigDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a single YAML document
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_indexed(text, 1)
    }

    /// Parse a single YAML document, reporting failures against the 1-based `document` index
    pub(crate) fn parse_indexed(text: &str, document: usize) -> Result<Self> {
        let value: Value = serde_yaml::from_str(text)
            .map_err(|source| ScenarioError::ParseError { document, source })?;

        let data = match value {
            // Comment-only documents
            Value::Null => Mapping::new(),
            other => serde_yaml::from_value(other)
                .map_err(|source| ScenarioError::ParseError { document, source })?,
        };

        Ok(Self { data })
    }

    /// Parse every non-blank document of a `---` separated stream
    pub fn parse_all(text: &str) -> Result<Vec<Self>> {
        split_documents(text)
            .iter()
            .enumerate()
            .map(|(i, doc)| Self::parse_indexed(doc, i + 1))
            .collect()
    }

    /// Load the first document of a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| ScenarioError::io(path, e))?;
        Ok(Self::parse_all(&text)?.into_iter().next().unwrap_or_default())
    }

    /// Load every document of a YAML file
    pub fn load_all(path: impl AsRef<Path>) -> Result<Vec<Self>> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| ScenarioError::io(path, e))?;
        Self::parse_all(&text)
    }

    pub fn data(&self) -> &Mapping {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut Mapping {
        &mut self.data
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.data).map_err(|e| ScenarioError::SerializeError(e.to_string()))
    }

    /// Assign `value` at a dot-separated `path`, see [`set_path`]
    pub fn set(&mut self, path: &str, value: &str) -> Result<()> {
        set_path(self, path, value)
    }

    /// Read the value at a dot-separated path; `None` if any segment is absent or not a mapping
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.data.get(first)?;
        for segment in segments {
            current = current.as_mapping()?.get(segment)?;
        }
        Some(current)
    }

    pub fn get_str(&self, path: &str) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }

    pub fn kind(&self) -> Option<&str> {
        self.get_str("kind")
    }

    pub fn api_version(&self) -> Option<&str> {
        self.get_str("apiVersion")
    }

    pub fn name(&self) -> Option<&str> {
        self.get_str("metadata.name")
    }

    pub fn namespace(&self) -> Option<&str> {
        self.get_str("metadata.namespace")
    }

    /// Split `apiVersion` (`group/version` or core `version`) and pair it with `kind`
    pub fn group_version_kind(&self) -> Option<GroupVersionKind> {
        let (group, version) = parse_api_version(self.api_version()?);
        Some(GroupVersionKind::gvk(&group, &version, self.kind()?))
    }

    /// Identity used to look the resource up in the cluster
    pub fn identity(&self) -> Result<ResourceIdentity> {
        let api_version = self
            .api_version()
            .ok_or_else(|| ScenarioError::InvalidDocument("missing apiVersion".to_string()))?;
        let kind = self
            .kind()
            .ok_or_else(|| ScenarioError::InvalidDocument("missing kind".to_string()))?;
        let name = self
            .name()
            .ok_or_else(|| ScenarioError::InvalidDocument("missing metadata.name".to_string()))?;

        let (group, version) = parse_api_version(api_version);
        Ok(ResourceIdentity::new(
            GroupVersionKind::gvk(&group, &version, kind),
            self.namespace().map(str::to_string),
            name,
        ))
    }

    /// Convert into the untyped object the cluster API accepts
    pub fn to_dynamic_object(&self) -> Result<DynamicObject> {
        let json = serde_json::to_value(&self.data)
            .map_err(|e| ScenarioError::SerializeError(e.to_string()))?;
        serde_json::from_value(json).map_err(|e| ScenarioError::SerializeError(e.to_string()))
    }
}

/// Split a multi-document YAML stream on lines that are exactly `---` once trimmed.
///
/// Blank documents are dropped, so input without any content yields an empty list.
pub fn split_documents(content: &str) -> Vec<String> {
    let mut documents = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in content.split('\n') {
        if line.trim() == "---" {
            flush_document(&mut current, &mut documents);
            continue;
        }
        current.push(line);
    }
    flush_document(&mut current, &mut documents);

    documents
}

fn flush_document(current: &mut Vec<&str>, documents: &mut Vec<String>) {
    let doc = current.join("\n");
    if !doc.trim().is_empty() {
        documents.push(doc);
    }
    current.clear();
}

/// Join rendered documents the way generated scenario files are written
pub fn join_documents(documents: &[String]) -> String {
    documents.join(crate::constants::files::DOCUMENT_SEPARATOR)
}
