// Copyright 2026, The config-examples Authors
// SPDX-License-Identifier: Apache-2.0

//! Cluster access over arbitrary GroupVersionKinds

use crate::error::Result;
use crate::types::identity::ResourceIdentity;
use async_trait::async_trait;
use kube::{
    api::{DynamicObject, PostParams},
    Api, Client,
};
use tracing::{debug, info, instrument};

/// The operations the installer and verifier need from a cluster.
///
/// One implementation is shared by every concurrent scenario run.
#[async_trait]
pub trait ClusterApi: Send + Sync {
    /// Fetch an object; `Ok(None)` when it does not exist
    async fn get(&self, id: &ResourceIdentity) -> Result<Option<DynamicObject>>;

    async fn create(&self, id: &ResourceIdentity, obj: &DynamicObject) -> Result<DynamicObject>;

    /// Replace the whole object; `obj` must carry the current resourceVersion
    async fn replace(&self, id: &ResourceIdentity, obj: &DynamicObject) -> Result<DynamicObject>;
}

/// Connect using the ambient kubeconfig or in-cluster configuration
pub async fn create_client() -> Result<Client> {
    let client = Client::try_default().await?;
    info!("Connected to Kubernetes cluster");
    Ok(client)
}

fn dynamic_api(client: &Client, id: &ResourceIdentity) -> Api<DynamicObject> {
    let ar = id.api_resource();
    match &id.namespace {
        Some(ns) => Api::namespaced_with(client.clone(), ns, &ar),
        None => Api::all_with(client.clone(), &ar),
    }
}

#[async_trait]
impl ClusterApi for Client {
    #[instrument(skip(self), fields(resource = %id))]
    async fn get(&self, id: &ResourceIdentity) -> Result<Option<DynamicObject>> {
        let obj = dynamic_api(self, id).get_opt(&id.name).await?;
        debug!("Lookup returned {}", if obj.is_some() { "object" } else { "nothing" });
        Ok(obj)
    }

    #[instrument(skip(self, obj), fields(resource = %id))]
    async fn create(&self, id: &ResourceIdentity, obj: &DynamicObject) -> Result<DynamicObject> {
        Ok(dynamic_api(self, id)
            .create(&PostParams::default(), obj)
            .await?)
    }

    #[instrument(skip(self, obj), fields(resource = %id))]
    async fn replace(&self, id: &ResourceIdentity, obj: &DynamicObject) -> Result<DynamicObject> {
        Ok(dynamic_api(self, id)
            .replace(&id.name, &PostParams::default(), obj)
            .await?)
    }
}
