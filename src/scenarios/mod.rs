// Copyright 2026, The config-examples Authors
// SPDX-License-Identifier: Apache-2.0

//! Scenario discovery and manifest generation from `{folder}/{scenario}/` directories.

pub mod discovery;
pub mod generate;

pub use discovery::{discover_all, find_config_files, log_found_templates, ScenarioVariant};
pub use generate::{process_variant, GeneratedScenario};
