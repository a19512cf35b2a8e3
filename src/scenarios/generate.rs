// Copyright 2026, The config-examples Authors
// SPDX-License-Identifier: Apache-2.0
use super::discovery::ScenarioVariant;
use crate::document::{join_documents, ConfigDocument, OverlayMap};
use crate::error::{Result, ScenarioError};
use crate::template::{RuntimeContext, TemplateProcessor};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Rendered manifests of one variant and the file they were written to
#[derive(Debug, Clone)]
pub struct GeneratedScenario {
    pub output_path: PathBuf,
    pub documents: Vec<ConfigDocument>,
}

impl GeneratedScenario {
    /// The first document, the resource the scenario is about
    pub fn primary(&self) -> Option<&ConfigDocument> {
        self.documents.first()
    }

    pub fn primary_mut(&mut self) -> Option<&mut ConfigDocument> {
        self.documents.first_mut()
    }

    /// Rewrite the output file, e.g. after overrides were applied
    pub fn write(&self) -> Result<()> {
        write_documents(&self.output_path, &self.documents)
    }
}

/// Render the template of `variant` with its overlay and write
/// `{folder}-{scenario}-{variant}-scenario.yaml`, replacing any previous output.
#[instrument(skip(root, processor, ctx), fields(variant = %variant))]
pub fn process_variant(
    root: &Path,
    variant: &ScenarioVariant,
    processor: &TemplateProcessor,
    ctx: &RuntimeContext,
) -> Result<GeneratedScenario> {
    let template_path = variant.template_path(root);
    let overlay_path = variant.overlay_path(root);
    let output_path = variant.output_path(root);

    info!(
        "Processing: {}, {}, {}",
        template_path.display(),
        overlay_path.display(),
        output_path.display()
    );

    let overlay = OverlayMap::load(&overlay_path)?;
    let template =
        fs::read_to_string(&template_path).map_err(|e| ScenarioError::io(&template_path, e))?;

    let documents = processor.render(&template, &overlay, ctx)?;
    write_documents(&output_path, &documents)?;
    debug!("Wrote {} document(s)", documents.len());

    Ok(GeneratedScenario {
        output_path,
        documents,
    })
}

fn write_documents(path: &Path, documents: &[ConfigDocument]) -> Result<()> {
    let rendered = documents
        .iter()
        .map(ConfigDocument::to_yaml)
        .collect::<Result<Vec<_>>>()?;
    fs::write(path, join_documents(&rendered)).map_err(|e| ScenarioError::io(path, e))
}
