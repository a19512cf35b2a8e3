// Copyright 2026, The config-examples Authors
// SPDX-License-Identifier: Apache-2.0
use kube::api::{ApiResource, GroupVersionKind};
use std::fmt;

/// Lookup key for install and verify: GroupVersionKind plus namespace and name
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResourceIdentity {
    pub gvk: GroupVersionKind,
    /// `None` for cluster-scoped resources
    pub namespace: Option<String>,
    pub name: String,
}

impl ResourceIdentity {
    pub fn new(gvk: GroupVersionKind, namespace: Option<String>, name: impl Into<String>) -> Self {
        Self {
            gvk,
            namespace,
            name: name.into(),
        }
    }

    pub fn namespaced(
        gvk: GroupVersionKind,
        namespace: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self::new(gvk, Some(namespace.into()), name)
    }

    pub fn api_version(&self) -> String {
        self.gvk.api_version()
    }

    /// Resource description for dynamic API calls; the plural is inferred from the kind
    pub fn api_resource(&self) -> ApiResource {
        ApiResource::from_gvk(&self.gvk)
    }
}

impl fmt::Display for ResourceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(
                f,
                "{} {}/{} ({})",
                self.gvk.kind,
                ns,
                self.name,
                self.api_version()
            ),
            None => write!(f, "{} {} ({})", self.gvk.kind, self.name, self.api_version()),
        }
    }
}

/// Parse apiVersion into (group, version); core resources have an empty group
pub fn parse_api_version(api_version: &str) -> (String, String) {
    match api_version.split_once('/') {
        Some((group, version)) => (group.to_string(), version.to_string()),
        None => (String::new(), api_version.to_string()),
    }
}
