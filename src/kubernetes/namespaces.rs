// Copyright 2026, The config-examples Authors
// SPDX-License-Identifier: Apache-2.0

//! Throwaway namespaces for scenario runs

use crate::constants::defaults;
use crate::error::{Result, ScenarioError};
use k8s_openapi::api::core::v1::Namespace;
use kube::{
    api::{DeleteParams, ObjectMeta, PostParams},
    Api, Client,
};
use tracing::{debug, info, instrument};

/// Namespace prefix for a scenario: `{default prefix}-{folder}-{scenario}`,
/// lowercased and reduced to `[a-z0-9-]`.
pub fn namespace_prefix(folder: &str, scenario: &str) -> String {
    let raw = format!("{}-{}-{}", defaults::NAMESPACE_PREFIX, folder, scenario);
    let mut prefix = String::with_capacity(raw.len());
    for c in raw.to_lowercase().chars() {
        let c = if c.is_ascii_alphanumeric() { c } else { '-' };
        if c == '-' && prefix.ends_with('-') {
            continue;
        }
        prefix.push(c);
    }

    // generateName adds five characters; names are capped at 63
    prefix.truncate(57);
    prefix.trim_matches('-').to_string()
}

/// Create a namespace named by the server from `prefix` and return its name
#[instrument(skip(client))]
pub async fn create_test_namespace(client: &Client, prefix: &str) -> Result<String> {
    let namespaces: Api<Namespace> = Api::all(client.clone());
    let ns = Namespace {
        metadata: ObjectMeta {
            generate_name: Some(format!("{}-", prefix)),
            ..Default::default()
        },
        ..Default::default()
    };

    let created = namespaces
        .create(&PostParams::default(), &ns)
        .await
        .map_err(|e| {
            ScenarioError::NamespaceError(format!(
                "Failed to create namespace with prefix {}: {}",
                prefix, e
            ))
        })?;

    let name = created.metadata.name.ok_or_else(|| {
        ScenarioError::NamespaceError(format!(
            "Server returned no name for namespace with prefix {}",
            prefix
        ))
    })?;
    info!("Created namespace {}", name);
    Ok(name)
}

/// Delete a namespace; one that is already gone counts as deleted
#[instrument(skip(client))]
pub async fn delete_namespace(client: &Client, name: &str) -> Result<()> {
    let namespaces: Api<Namespace> = Api::all(client.clone());

    match namespaces.delete(name, &DeleteParams::default()).await {
        Ok(_) => {
            info!("Deleted namespace {}", name);
            Ok(())
        }
        Err(kube::Error::Api(err)) if err.code == 404 => {
            debug!("Namespace {} already gone", name);
            Ok(())
        }
        Err(e) => Err(ScenarioError::NamespaceError(format!(
            "Failed to delete namespace {}: {}",
            name, e
        ))),
    }
}
