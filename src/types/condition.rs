// Copyright 2026, The config-examples Authors
// SPDX-License-Identifier: Apache-2.0
use crate::constants::readiness::{CONDITION_TRUE, CONDITION_TYPE};
use kube::api::DynamicObject;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(rename = "type")]
    pub condition_type: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Entries of `status.conditions`; entries without string `type`/`status` are skipped
pub fn conditions_of(obj: &DynamicObject) -> Vec<Condition> {
    obj.data
        .pointer("/status/conditions")
        .and_then(|c| c.as_array())
        .map(|conditions| {
            conditions
                .iter()
                .filter_map(|c| serde_json::from_value(c.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

/// Check whether the object reports `Ready=True`. The first `Ready` entry decides.
pub fn is_ready(obj: &DynamicObject) -> bool {
    conditions_of(obj)
        .iter()
        .find(|c| c.condition_type == CONDITION_TYPE)
        .is_some_and(|c| c.status == CONDITION_TRUE)
}
