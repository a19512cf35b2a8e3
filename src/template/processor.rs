// Copyright 2026, The config-examples Authors
// SPDX-License-Identifier: Apache-2.0

//! Render a parameterized multi-document template into concrete manifests.

use super::context::RuntimeContext;
use super::visitor::replace_document_sentinels;
use crate::constants::placeholders::SENTINEL;
use crate::document::{split_documents, ConfigDocument, OverlayMap};
use crate::error::Result;
use tracing::{debug, warn};

/// Renders templates in two passes:
///
/// 1. runtime placeholders (`{{NAMESPACE}}`, `{{INSTANCE_NAME}}`) are replaced
///    in the raw text, before any parsing, since they are not valid YAML in
///    every position;
/// 2. the text is split into documents and, in each parsed tree, every field
///    whose value is the sentinel is replaced by the overlay entry with the
///    same field name.
#[derive(Debug, Clone)]
pub struct TemplateProcessor {
    sentinel: String,
}

impl Default for TemplateProcessor {
    fn default() -> Self {
        Self::with_sentinel(SENTINEL)
    }
}

impl TemplateProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sentinel(sentinel: impl Into<String>) -> Self {
        Self {
            sentinel: sentinel.into(),
        }
    }

    /// Render into parsed documents. A template without any content yields no documents.
    pub fn render(
        &self,
        template: &str,
        overlay: &OverlayMap,
        ctx: &RuntimeContext,
    ) -> Result<Vec<ConfigDocument>> {
        let overlay = ctx.substitute_overlay(overlay);
        let text = ctx.substitute(template);

        let mut documents = Vec::new();
        for (i, raw) in split_documents(&text).iter().enumerate() {
            let mut doc = ConfigDocument::parse_indexed(raw, i + 1)?;

            let report = replace_document_sentinels(&mut doc, &self.sentinel, &overlay);
            debug!(
                "Document {}: replaced {} placeholder value(s)",
                i + 1,
                report.replaced
            );
            if !report.unresolved.is_empty() {
                warn!(
                    "Document {}: no overlay value for field(s) {:?}, placeholder left in place",
                    i + 1,
                    report.unresolved
                );
            }

            documents.push(doc);
        }

        Ok(documents)
    }

    /// Render into serialized documents. A template without any content
    /// yields a single empty document.
    pub fn process(
        &self,
        template: &str,
        overlay: &OverlayMap,
        ctx: &RuntimeContext,
    ) -> Result<Vec<String>> {
        let documents = self.render(template, overlay, ctx)?;
        if documents.is_empty() {
            return Ok(vec![String::new()]);
        }

        documents.iter().map(ConfigDocument::to_yaml).collect()
    }
}
