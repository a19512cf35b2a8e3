// Copyright 2026, The config-examples Authors
// SPDX-License-Identifier: Apache-2.0
pub mod config;
pub mod constants;
pub mod document;
pub mod error;
pub mod kubernetes;
pub mod runner;
pub mod scenarios;
pub mod template;
pub mod types;

#[cfg(test)]
pub mod test_utils;
