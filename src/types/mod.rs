// Copyright 2026, The config-examples Authors
// SPDX-License-Identifier: Apache-2.0

//! Typed views over untyped cluster objects.

pub mod condition;
pub mod identity;

pub use condition::{conditions_of, is_ready, Condition};
pub use identity::{parse_api_version, ResourceIdentity};
