// Copyright 2026, The config-examples Authors
// SPDX-License-Identifier: Apache-2.0
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Failed to parse YAML document {document}: {source}")]
    ParseError {
        document: usize,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to load overlay: {0}")]
    OverlayLoadError(String),

    #[error("Failed to read scenarios directory {}: {source}", path.display())]
    DiscoveryError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to install resource {index} ({identity}): {reason}")]
    InstallError {
        index: usize,
        identity: String,
        reason: String,
    },

    #[error("Timed out waiting for {identity} to become ready (last observed: {last_observed})")]
    VerificationTimeout {
        identity: String,
        last_observed: String,
    },

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize document: {0}")]
    SerializeError(String),

    #[error("Namespace operation failed: {0}")]
    NamespaceError(String),
}

impl ScenarioError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScenarioError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ScenarioError>;
