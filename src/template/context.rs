// Copyright 2026, The config-examples Authors
// SPDX-License-Identifier: Apache-2.0
use crate::constants::placeholders;
use crate::document::OverlayMap;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(\w+)\}\}").expect("placeholder pattern is valid"));

/// Values available to every template as `{{NAMESPACE}}` and `{{INSTANCE_NAME}}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeContext {
    pub namespace: String,
    pub instance_name: String,
}

impl RuntimeContext {
    pub fn new(namespace: impl Into<String>, instance_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            instance_name: instance_name.into(),
        }
    }

    /// Replace known `{{IDENTIFIER}}` tokens; unknown ones are left as they are
    pub fn substitute(&self, text: &str) -> String {
        PLACEHOLDER
            .replace_all(text, |caps: &Captures| match &caps[1] {
                placeholders::NAMESPACE => self.namespace.clone(),
                placeholders::INSTANCE_NAME => self.instance_name.clone(),
                _ => caps[0].to_string(),
            })
            .into_owned()
    }

    /// Overlay values may reference runtime placeholders too
    pub fn substitute_overlay(&self, overlay: &OverlayMap) -> OverlayMap {
        overlay.map_values(|value| self.substitute(value))
    }
}
