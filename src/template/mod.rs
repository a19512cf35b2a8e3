// Copyright 2026, The config-examples Authors
// SPDX-License-Identifier: Apache-2.0

//! Two-phase template rendering: runtime placeholders on the raw text, then
//! overlay sentinels on the parsed document tree.

pub mod context;
pub mod processor;
pub mod visitor;

pub use context::RuntimeContext;
pub use processor::TemplateProcessor;
pub use visitor::{replace_document_sentinels, replace_sentinels, SubstitutionReport};
