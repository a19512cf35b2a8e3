// Copyright 2026, The config-examples Authors
// SPDX-License-Identifier: Apache-2.0

//! Test doubles for the cluster: an HTTP-level mock behind a real `kube::Client`
//! and an in-memory `ClusterApi` implementation.

use crate::error::{Result as ScenarioResult, ScenarioError};
use crate::kubernetes::ClusterApi;
use crate::types::identity::ResourceIdentity;
use async_trait::async_trait;
use http::{Request, Response};
use kube::api::DynamicObject;
use kube::client::Body;
use kube::Client;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

/// A mock HTTP service that returns predefined responses based on request paths.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(String, String), (u16, String)>>>,
    requests: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn on(self, method: &str, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), (status, body.to_string()));
        self
    }

    /// Add a response for GET requests matching the exact path
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.on("GET", path, status, body)
    }

    /// Add a response for POST requests matching the exact path
    pub fn on_post(self, path: &str, status: u16, body: &str) -> Self {
        self.on("POST", path, status, body)
    }

    /// Add a response for PUT requests matching the exact path
    pub fn on_put(self, path: &str, status: u16, body: &str) -> Self {
        self.on("PUT", path, status, body)
    }

    /// Add a response for DELETE requests matching the exact path
    pub fn on_delete(self, path: &str, status: u16, body: &str) -> Self {
        self.on("DELETE", path, status, body)
    }

    /// Every (method, path) received so far, in order
    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().unwrap().clone()
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    fn find_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
        let responses = self.responses.lock().unwrap();

        if let Some(resp) = responses.get(&(method.to_string(), path.to_string())) {
            return Some(resp.clone());
        }

        // Prefix match for paths like /api/v1/namespaces/foo
        for ((m, p), resp) in responses.iter() {
            if m == method && path.starts_with(p) {
                return Some(resp.clone());
            }
        }

        None
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();

        self.requests
            .lock()
            .unwrap()
            .push((method.clone(), path.clone()));
        let response = self.find_response(&method, &path);

        Box::pin(async move {
            let (status, body) =
                response.unwrap_or_else(|| (404, not_found_json("resource", &path)));
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

/// A Securesign object as the API server would return it
pub fn securesign_json(namespace: &str, name: &str, resource_version: Option<&str>) -> String {
    let mut metadata = serde_json::json!({ "name": name, "namespace": namespace });
    if let Some(rv) = resource_version {
        metadata["resourceVersion"] = serde_json::json!(rv);
    }

    serde_json::json!({
        "apiVersion": "rhtas.redhat.com/v1alpha1",
        "kind": "Securesign",
        "metadata": metadata,
        "spec": { "fulcio": { "enabled": true } }
    })
    .to_string()
}

/// Create a mock namespace JSON response
pub fn namespace_json(name: &str) -> String {
    serde_json::json!({
        "apiVersion": "v1",
        "kind": "Namespace",
        "metadata": {
            "name": name,
            "uid": "test-uid"
        }
    })
    .to_string()
}

/// Create a 404 not found response
pub fn not_found_json(resource: &str, name: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": format!("{} \"{}\" not found", resource, name),
        "reason": "NotFound",
        "code": 404
    })
    .to_string()
}

/// A call received by [`FakeCluster`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClusterCall {
    Get(String),
    Create(String),
    Replace {
        name: String,
        resource_version: Option<String>,
    },
}

/// In-memory cluster keyed by resource identity. Assigns increasing
/// resourceVersions and records every call.
#[derive(Default)]
pub struct FakeCluster {
    objects: Mutex<BTreeMap<String, DynamicObject>>,
    calls: Mutex<Vec<ClusterCall>>,
    fail_get: Mutex<Option<String>>,
    fail_create: Mutex<Option<String>>,
    next_version: Mutex<u64>,
}

impl FakeCluster {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(id: &ResourceIdentity) -> String {
        id.to_string()
    }

    pub fn calls(&self) -> Vec<ClusterCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn creates(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, ClusterCall::Create(_)))
            .count()
    }

    pub fn replaces(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, ClusterCall::Replace { .. }))
            .count()
    }

    pub fn object(&self, id: &ResourceIdentity) -> Option<DynamicObject> {
        self.objects.lock().unwrap().get(&Self::key(id)).cloned()
    }

    /// Store an object directly, as if another actor had created it
    pub fn insert(&self, id: &ResourceIdentity, mut obj: DynamicObject) {
        obj.metadata.resource_version = Some(self.bump());
        self.objects.lock().unwrap().insert(Self::key(id), obj);
    }

    /// Set `status` on a stored object, as the operator would
    pub fn set_status(&self, id: &ResourceIdentity, status: serde_json::Value) {
        if let Some(obj) = self.objects.lock().unwrap().get_mut(&Self::key(id)) {
            obj.data["status"] = status;
        }
    }

    /// Make lookups of `name` fail with a server error
    pub fn fail_get_for(&self, name: &str) {
        *self.fail_get.lock().unwrap() = Some(name.to_string());
    }

    /// Make creates of `name` fail with a server error
    pub fn fail_create_for(&self, name: &str) {
        *self.fail_create.lock().unwrap() = Some(name.to_string());
    }

    fn bump(&self) -> String {
        let mut version = self.next_version.lock().unwrap();
        *version += 1;
        version.to_string()
    }

    fn server_error(message: &str) -> ScenarioError {
        ScenarioError::KubeError(kube::Error::Api(kube::core::ErrorResponse {
            status: "Failure".to_string(),
            message: message.to_string(),
            reason: "InternalError".to_string(),
            code: 500,
        }))
    }
}

#[async_trait]
impl ClusterApi for FakeCluster {
    async fn get(&self, id: &ResourceIdentity) -> ScenarioResult<Option<DynamicObject>> {
        self.calls
            .lock()
            .unwrap()
            .push(ClusterCall::Get(id.name.clone()));
        if self.fail_get.lock().unwrap().as_deref() == Some(id.name.as_str()) {
            return Err(Self::server_error("lookup failed"));
        }
        Ok(self.object(id))
    }

    async fn create(&self, id: &ResourceIdentity, obj: &DynamicObject) -> ScenarioResult<DynamicObject> {
        self.calls
            .lock()
            .unwrap()
            .push(ClusterCall::Create(id.name.clone()));
        if self.fail_create.lock().unwrap().as_deref() == Some(id.name.as_str()) {
            return Err(Self::server_error("create rejected"));
        }
        if self.object(id).is_some() {
            return Err(Self::server_error("already exists"));
        }

        self.insert(id, obj.clone());
        Ok(self.object(id).unwrap_or_else(|| obj.clone()))
    }

    async fn replace(&self, id: &ResourceIdentity, obj: &DynamicObject) -> ScenarioResult<DynamicObject> {
        self.calls.lock().unwrap().push(ClusterCall::Replace {
            name: id.name.clone(),
            resource_version: obj.metadata.resource_version.clone(),
        });

        let current = self.object(id).and_then(|o| o.metadata.resource_version);
        if current.is_none() || current != obj.metadata.resource_version {
            return Err(Self::server_error("resourceVersion conflict"));
        }

        self.insert(id, obj.clone());
        Ok(self.object(id).unwrap_or_else(|| obj.clone()))
    }
}
