// Copyright 2026, The config-examples Authors
// SPDX-License-Identifier: Apache-2.0

//! Scenario runner - drives each variant from template to a ready resource.

use crate::config::Config;
use crate::document::{apply_assignment, ConfigDocument};
use crate::kubernetes::{
    create_test_namespace, delete_namespace, install_documents, namespace_prefix, verify,
    PollPolicy,
};
use crate::scenarios::{process_variant, GeneratedScenario, ScenarioVariant};
use crate::template::{RuntimeContext, TemplateProcessor};
use crate::types::ResourceIdentity;
use anyhow::{bail, Context, Result};
use futures::{stream, StreamExt};
use kube::Client;
use serde_yaml::Value;
use std::fmt;
use std::path::PathBuf;
use tracing::{error, info, instrument, warn};

/// Outcome of one scenario variant
#[derive(Debug, Clone)]
pub struct VariantReport {
    pub variant: ScenarioVariant,
    pub namespace: Option<String>,
    pub output_path: Option<PathBuf>,
    pub installed: Vec<ResourceIdentity>,
    pub error: Option<String>,
}

impl VariantReport {
    fn new(variant: ScenarioVariant) -> Self {
        Self {
            variant,
            namespace: None,
            output_path: None,
            installed: Vec::new(),
            error: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

impl fmt::Display for VariantReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error {
            None => write!(
                f,
                "PASS {} (namespace {}, {} resource(s))",
                self.variant,
                self.namespace.as_deref().unwrap_or("-"),
                self.installed.len()
            ),
            Some(e) => write!(f, "FAIL {}: {}", self.variant, e),
        }
    }
}

/// Runs scenario variants. Without a client, or with `dry_run` set, only the
/// rendering and structural checks happen.
pub struct ScenarioRunner {
    config: Config,
    client: Option<Client>,
    processor: TemplateProcessor,
    overrides: Vec<String>,
}

impl ScenarioRunner {
    pub fn new(config: Config, client: Option<Client>) -> Self {
        Self {
            config,
            client,
            processor: TemplateProcessor::new(),
            overrides: Vec::new(),
        }
    }

    /// `path=value` assignments applied to the primary document of every variant
    pub fn with_overrides(mut self, overrides: Vec<String>) -> Self {
        self.overrides = overrides;
        self
    }

    fn cluster(&self) -> Option<&Client> {
        if self.config.dry_run {
            None
        } else {
            self.client.as_ref()
        }
    }

    /// Run all variants, at most `config.concurrency` at a time. Reports come
    /// back in variant order.
    pub async fn run(&self, variants: &[ScenarioVariant]) -> Vec<VariantReport> {
        let mut reports: Vec<VariantReport> = stream::iter(variants.iter().cloned())
            .map(|variant| self.run_variant(variant))
            .buffer_unordered(self.config.concurrency)
            .collect()
            .await;

        reports.sort_by(|a, b| a.variant.cmp(&b.variant));
        reports
    }

    #[instrument(skip(self), fields(variant = %variant))]
    pub async fn run_variant(&self, variant: ScenarioVariant) -> VariantReport {
        let mut report = VariantReport::new(variant.clone());
        let prefix = namespace_prefix(&variant.folder, &variant.scenario);

        let result = match self.cluster() {
            None => self.dry_run(&variant, &prefix, &mut report),
            Some(client) => self.run_in_cluster(client, &variant, &prefix, &mut report).await,
        };

        match result {
            Ok(()) => info!("Scenario {} passed", variant),
            Err(e) => {
                error!("Scenario {} failed: {:#}", variant, e);
                report.error = Some(format!("{:#}", e));
            }
        }
        report
    }

    fn dry_run(&self, variant: &ScenarioVariant, prefix: &str, report: &mut VariantReport) -> Result<()> {
        let namespace = format!("{}-dry-run", prefix);
        report.namespace = Some(namespace.clone());

        let generated = self.prepare(variant, &namespace)?;
        report.output_path = Some(generated.output_path);
        info!("Dry run: skipping install and verification");
        Ok(())
    }

    async fn run_in_cluster(
        &self,
        client: &Client,
        variant: &ScenarioVariant,
        prefix: &str,
        report: &mut VariantReport,
    ) -> Result<()> {
        let namespace = create_test_namespace(client, prefix)
            .await
            .context("Failed to create test namespace")?;
        report.namespace = Some(namespace.clone());

        let result = self.deploy(client, variant, &namespace, report).await;

        if self.config.keep_namespaces {
            info!("Keeping namespace {}", namespace);
        } else if let Err(e) = delete_namespace(client, &namespace).await {
            warn!("Cleanup of namespace {} failed: {}", namespace, e);
        }

        result
    }

    async fn deploy(
        &self,
        client: &Client,
        variant: &ScenarioVariant,
        namespace: &str,
        report: &mut VariantReport,
    ) -> Result<()> {
        let generated = self.prepare(variant, namespace)?;
        report.output_path = Some(generated.output_path.clone());

        let installed = install_documents(client, &generated.documents)
            .await
            .context("Failed to install scenario")?;
        report.installed = installed;

        let primary = report
            .installed
            .first()
            .context("Scenario rendered no resources")?;
        let policy = PollPolicy::new(self.config.verify_timeout, self.config.poll_interval);
        verify(client, primary, &policy)
            .await
            .context("Scenario resource did not become ready")?;

        Ok(())
    }

    /// Render the variant for `namespace`, apply overrides and check the
    /// primary document's shape
    fn prepare(&self, variant: &ScenarioVariant, namespace: &str) -> Result<GeneratedScenario> {
        let ctx = RuntimeContext::new(namespace, self.config.instance_name.as_str());
        let mut generated = process_variant(&self.config.scenarios_dir, variant, &self.processor, &ctx)
            .with_context(|| format!("Failed to generate scenario {}", variant))?;

        let primary = generated
            .primary_mut()
            .context("Template rendered no documents")?;
        for assignment in &self.overrides {
            apply_assignment(primary, assignment)
                .with_context(|| format!("Failed to apply override {}", assignment))?;
        }
        if !self.overrides.is_empty() {
            generated.write().context("Failed to write overridden scenario")?;
        }

        let primary = generated
            .primary()
            .context("Template rendered no documents")?;
        check_structure(primary, namespace)?;
        Ok(generated)
    }
}

/// Narrow discovered variants down to the ones matching any selector; no
/// selectors keeps all of them. Finding nothing to run is an error, as is a
/// selector that matches no variant.
pub fn select_variants(
    variants: Vec<ScenarioVariant>,
    selectors: &[String],
) -> Result<Vec<ScenarioVariant>> {
    if variants.is_empty() {
        bail!("No scenarios found");
    }
    if selectors.is_empty() {
        return Ok(variants);
    }

    let unmatched: Vec<&str> = selectors
        .iter()
        .filter(|s| !variants.iter().any(|v| v.matches(s)))
        .map(String::as_str)
        .collect();
    if !unmatched.is_empty() {
        bail!("No scenario matches selector(s): {}", unmatched.join(", "));
    }

    Ok(variants
        .into_iter()
        .filter(|v| selectors.iter().any(|s| v.matches(s)))
        .collect())
}

/// The primary document must identify itself, carry a `spec` mapping and
/// live in the run's namespace
pub fn check_structure(doc: &ConfigDocument, namespace: &str) -> Result<()> {
    for field in ["apiVersion", "kind", "metadata.name"] {
        if doc.get_str(field).is_none() {
            bail!("Primary document has no {}", field);
        }
    }

    if !matches!(doc.get("spec"), Some(Value::Mapping(_))) {
        bail!("Primary document has no spec mapping");
    }

    match doc.namespace() {
        Some(ns) if ns == namespace => Ok(()),
        Some(ns) => bail!(
            "Primary document namespace {} does not match run namespace {}",
            ns,
            namespace
        ),
        None => bail!("Primary document has no metadata.namespace"),
    }
}
