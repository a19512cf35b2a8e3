// Copyright 2026, The config-examples Authors
// SPDX-License-Identifier: Apache-2.0

//! Create-or-replace installation of rendered manifests

use super::client::ClusterApi;
use crate::document::ConfigDocument;
use crate::error::{Result, ScenarioError};
use crate::types::identity::ResourceIdentity;
use std::path::Path;
use tracing::{info, instrument};

/// Apply every document in order. A missing object is created; an existing
/// one is replaced whole, carrying over its resourceVersion. The first
/// failure stops the sequence and nothing already applied is rolled back.
#[instrument(skip_all, fields(documents = documents.len()))]
pub async fn install_documents<C>(
    client: &C,
    documents: &[ConfigDocument],
) -> Result<Vec<ResourceIdentity>>
where
    C: ClusterApi + ?Sized,
{
    let mut installed = Vec::with_capacity(documents.len());

    for (i, doc) in documents.iter().enumerate() {
        let index = i + 1;
        let identity = doc.identity().map_err(|e| ScenarioError::InstallError {
            index,
            identity: "<unknown>".to_string(),
            reason: e.to_string(),
        })?;
        install_document(client, index, &identity, doc).await?;
        installed.push(identity);
    }

    Ok(installed)
}

/// Load a generated scenario file and apply all of its documents
pub async fn install_file<C>(client: &C, path: impl AsRef<Path>) -> Result<Vec<ResourceIdentity>>
where
    C: ClusterApi + ?Sized,
{
    let documents = ConfigDocument::load_all(path)?;
    install_documents(client, &documents).await
}

async fn install_document<C>(
    client: &C,
    index: usize,
    identity: &ResourceIdentity,
    doc: &ConfigDocument,
) -> Result<()>
where
    C: ClusterApi + ?Sized,
{
    let install_error = |reason: String| ScenarioError::InstallError {
        index,
        identity: identity.to_string(),
        reason,
    };

    let mut obj = doc
        .to_dynamic_object()
        .map_err(|e| install_error(e.to_string()))?;

    match client.get(identity).await {
        Ok(None) => {
            client
                .create(identity, &obj)
                .await
                .map_err(|e| install_error(format!("failed to create: {}", e)))?;
            info!("Created {}", identity);
        }
        Ok(Some(existing)) => {
            obj.metadata.resource_version = existing.metadata.resource_version;
            client
                .replace(identity, &obj)
                .await
                .map_err(|e| install_error(format!("failed to update: {}", e)))?;
            info!("Updated {}", identity);
        }
        Err(e) => {
            return Err(install_error(format!(
                "failed to check if resource exists: {}",
                e
            )))
        }
    }

    Ok(())
}
