// Copyright 2026, The config-examples Authors
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes utilities for client creation, resource installation, readiness
//! verification and namespace management.

pub mod client;
pub mod installer;
pub mod namespaces;
pub mod verifier;

pub use client::{create_client, ClusterApi};
pub use installer::{install_documents, install_file};
pub use namespaces::{create_test_namespace, delete_namespace, namespace_prefix};
pub use verifier::{get_snapshot, verify, verify_until, PollPolicy, VerifyPhase};
