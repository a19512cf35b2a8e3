// Copyright 2026, The config-examples Authors
// SPDX-License-Identifier: Apache-2.0

/// Placeholders substituted in the raw template text before YAML parsing
pub mod placeholders {
    /// Replaced with the namespace the scenario runs in
    pub const NAMESPACE: &str = "NAMESPACE";
    /// Replaced with the name of the primary resource instance
    pub const INSTANCE_NAME: &str = "INSTANCE_NAME";
    /// Field value marking a slot filled from the overlay by field name
    pub const SENTINEL: &str = "https://your-oidc-issuer-url";
}

/// File naming inside `{root}/{folder}/{scenario}/`
pub mod files {
    pub const TEMPLATE_SUFFIX: &str = "-template.yaml";
    pub const OVERLAY_EXTENSION: &str = ".conf";
    pub const OUTPUT_SUFFIX: &str = "-scenario.yaml";
    /// Separator written between generated documents
    pub const DOCUMENT_SEPARATOR: &str = "---\n";
}

/// Readiness condition contract of installed resources
pub mod readiness {
    pub const CONDITION_TYPE: &str = "Ready";
    pub const CONDITION_TRUE: &str = "True";
}

/// Runtime defaults, overridable through the environment
pub mod defaults {
    pub const SCENARIOS_DIR: &str = "scenarios";
    pub const INSTANCE_NAME: &str = "securesign-sample";
    pub const VERIFY_TIMEOUT_SECS: u64 = 600;
    pub const POLL_INTERVAL_SECS: u64 = 5;
    pub const CONCURRENCY: usize = 1;
    /// Leading part of every test namespace name
    pub const NAMESPACE_PREFIX: &str = "rhtas-test";
}
