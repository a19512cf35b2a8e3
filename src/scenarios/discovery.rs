// Copyright 2026, The config-examples Authors
// SPDX-License-Identifier: Apache-2.0
use crate::constants::files::{OUTPUT_SUFFIX, OVERLAY_EXTENSION, TEMPLATE_SUFFIX};
use crate::error::{Result, ScenarioError};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// One template + overlay pair found under `{root}/{folder}/{scenario}/`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScenarioVariant {
    pub folder: String,
    pub scenario: String,
    pub variant: String,
}

impl ScenarioVariant {
    pub fn new(
        folder: impl Into<String>,
        scenario: impl Into<String>,
        variant: impl Into<String>,
    ) -> Self {
        Self {
            folder: folder.into(),
            scenario: scenario.into(),
            variant: variant.into(),
        }
    }

    /// `{folder}/{scenario}/{variant}`
    pub fn id(&self) -> String {
        format!("{}/{}/{}", self.folder, self.scenario, self.variant)
    }

    /// File name prefix shared by template, overlays and outputs: `{folder}-{scenario}`
    pub fn base_name(&self) -> String {
        format!("{}-{}", self.folder, self.scenario)
    }

    pub fn scenario_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.folder).join(&self.scenario)
    }

    pub fn template_path(&self, root: &Path) -> PathBuf {
        self.scenario_dir(root)
            .join(format!("{}{}", self.base_name(), TEMPLATE_SUFFIX))
    }

    pub fn overlay_path(&self, root: &Path) -> PathBuf {
        self.scenario_dir(root).join(format!(
            "{}-{}{}",
            self.base_name(),
            self.variant,
            OVERLAY_EXTENSION
        ))
    }

    pub fn output_path(&self, root: &Path) -> PathBuf {
        self.scenario_dir(root).join(format!(
            "{}-{}{}",
            self.base_name(),
            self.variant,
            OUTPUT_SUFFIX
        ))
    }

    /// Match a selector of the form `folder`, `folder/scenario` or `folder/scenario/variant`
    pub fn matches(&self, selector: &str) -> bool {
        let parts: Vec<&str> = selector.trim_matches('/').split('/').collect();
        let own = [
            self.folder.as_str(),
            self.scenario.as_str(),
            self.variant.as_str(),
        ];

        parts.len() <= own.len() && parts.iter().zip(own.iter()).all(|(want, have)| want == have)
    }
}

impl fmt::Display for ScenarioVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Find every scenario variant under `root`.
///
/// A scenario counts only when `{folder}-{scenario}-template.yaml` exists in
/// its directory; each `{folder}-{scenario}-{variant}.conf` next to it is one
/// variant. Scenarios with a template but no overlay are skipped with a
/// warning. An unreadable `root` is an error, unreadable subdirectories are
/// skipped. Results are sorted.
pub fn discover_all(root: impl AsRef<Path>) -> Result<Vec<ScenarioVariant>> {
    let root = root.as_ref();
    let folders = list_dirs(root).map_err(|source| ScenarioError::DiscoveryError {
        path: root.to_path_buf(),
        source,
    })?;

    let mut variants = Vec::new();
    for folder in folders {
        let folder_path = root.join(&folder);
        let scenarios = match list_dirs(&folder_path) {
            Ok(s) => s,
            Err(e) => {
                debug!("Skipping unreadable folder {}: {}", folder_path.display(), e);
                continue;
            }
        };

        for scenario in scenarios {
            let found = discover_variants(root, &folder, &scenario);
            variants.extend(found);
        }
    }

    variants.sort();
    Ok(variants)
}

fn discover_variants(root: &Path, folder: &str, scenario: &str) -> Vec<ScenarioVariant> {
    let probe = ScenarioVariant::new(folder, scenario, "");
    let template = probe.template_path(root);
    if !template.is_file() {
        return Vec::new();
    }

    let dir = probe.scenario_dir(root);
    let entries = match fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("Skipping unreadable scenario {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let prefix = format!("{}-", probe.base_name());
    let mut variants: Vec<ScenarioVariant> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| {
            let file_name = entry.file_name().to_string_lossy().into_owned();
            let variant = file_name
                .strip_prefix(&prefix)?
                .strip_suffix(OVERLAY_EXTENSION)?
                .to_string();
            (!variant.is_empty()).then(|| ScenarioVariant::new(folder, scenario, variant))
        })
        .collect();

    if variants.is_empty() {
        warn!(
            "Scenario {}/{} has a template but no {}-*{} overlay, skipping",
            folder,
            scenario,
            probe.base_name(),
            OVERLAY_EXTENSION
        );
    }

    variants.sort();
    variants
}

fn list_dirs(path: &Path) -> std::io::Result<Vec<String>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            dirs.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// Log the template, overlay and output file of every discovered variant
pub fn log_found_templates(variants: &[ScenarioVariant], root: &Path) {
    info!("Found {} scenario variant(s)", variants.len());

    for variant in variants {
        let file_name = |p: PathBuf| {
            p.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default()
        };
        info!(
            "  {} {} + {} -> {}",
            variant.scenario_dir(root).display(),
            file_name(variant.template_path(root)),
            file_name(variant.overlay_path(root)),
            file_name(variant.output_path(root))
        );
    }
}

/// Recursively list `.yaml` and `.yml` files below `dir`
pub fn find_config_files(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| ScenarioError::DiscoveryError {
            path: dir.to_path_buf(),
            source: e.into(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let is_yaml = entry
            .path()
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .is_some_and(|ext| ext == "yaml" || ext == "yml");
        if is_yaml {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "kind: Test\n").unwrap();
    }

    fn layout() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(root, "rhtas/basic/rhtas-basic-template.yaml");
        touch(root, "rhtas/basic/rhtas-basic-default.conf");
        touch(root, "rhtas/basic/rhtas-basic-keycloak.conf");
        touch(root, "rhtas/basic/rhtas-basic-default-scenario.yaml");
        touch(root, "rhtas/simple/rhtas-simple-template.yaml");
        touch(root, "rhtas/simple/rhtas-simple-default.conf");
        // Template without overlays
        touch(root, "rhtas/lonely/rhtas-lonely-template.yaml");
        // Overlay without template
        touch(root, "rhtas/orphan/rhtas-orphan-default.conf");
        // Template named for another folder
        touch(root, "ctlog/basic/rhtas-basic-template.yaml");
        touch(root, "ctlog/standalone/ctlog-standalone-template.yaml");
        touch(root, "ctlog/standalone/ctlog-standalone-default.conf");
        touch(root, "README.md");
        dir
    }

    #[test]
    fn test_discover_all_finds_variants() {
        let dir = layout();
        let variants = discover_all(dir.path()).unwrap();

        assert_eq!(
            variants,
            vec![
                ScenarioVariant::new("ctlog", "standalone", "default"),
                ScenarioVariant::new("rhtas", "basic", "default"),
                ScenarioVariant::new("rhtas", "basic", "keycloak"),
                ScenarioVariant::new("rhtas", "simple", "default"),
            ]
        );
    }

    #[test]
    fn test_discover_all_is_restartable() {
        let dir = layout();
        assert_eq!(discover_all(dir.path()).unwrap(), discover_all(dir.path()).unwrap());
    }

    #[test]
    fn test_discover_all_missing_root() {
        let err = discover_all("/nonexistent/scenarios").unwrap_err();
        assert!(matches!(err, ScenarioError::DiscoveryError { .. }));
    }

    /// Run `check` with `dir` set to `mode`, restoring it afterwards. `check`
    /// is skipped when the directory stays listable, as it does for root.
    #[cfg(unix)]
    fn with_mode(dir: &Path, mode: u32, check: impl FnOnce()) {
        use std::os::unix::fs::PermissionsExt;

        fs::set_permissions(dir, fs::Permissions::from_mode(mode)).unwrap();
        if fs::read_dir(dir).is_err() {
            check();
        }
        fs::set_permissions(dir, fs::Permissions::from_mode(0o755)).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_all_skips_unreadable_scenario_dir() {
        let dir = layout();
        let basic = dir.path().join("rhtas/basic");

        // Traversable but not listable: the template is found, the overlays are not
        with_mode(&basic, 0o100, || {
            let variants = discover_all(dir.path()).unwrap();
            assert_eq!(
                variants,
                vec![
                    ScenarioVariant::new("ctlog", "standalone", "default"),
                    ScenarioVariant::new("rhtas", "simple", "default"),
                ]
            );
        });
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_all_skips_unreadable_folder() {
        let dir = layout();
        let ctlog = dir.path().join("ctlog");

        with_mode(&ctlog, 0o000, || {
            let variants = discover_all(dir.path()).unwrap();
            assert_eq!(variants.len(), 3);
            assert!(variants.iter().all(|v| v.folder == "rhtas"));
        });
    }

    #[test]
    fn test_discover_all_empty_root() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover_all(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_variant_paths() {
        let variant = ScenarioVariant::new("rhtas", "basic", "default");
        let root = Path::new("scenarios");

        assert_eq!(
            variant.template_path(root),
            PathBuf::from("scenarios/rhtas/basic/rhtas-basic-template.yaml")
        );
        assert_eq!(
            variant.overlay_path(root),
            PathBuf::from("scenarios/rhtas/basic/rhtas-basic-default.conf")
        );
        assert_eq!(
            variant.output_path(root),
            PathBuf::from("scenarios/rhtas/basic/rhtas-basic-default-scenario.yaml")
        );
    }

    #[test]
    fn test_matches_selectors() {
        let variant = ScenarioVariant::new("rhtas", "basic", "default");

        assert!(variant.matches("rhtas"));
        assert!(variant.matches("rhtas/basic"));
        assert!(variant.matches("rhtas/basic/default"));
        assert!(variant.matches("/rhtas/basic/"));
        assert!(!variant.matches("rhtas/simple"));
        assert!(!variant.matches("ctlog"));
        assert!(!variant.matches("rhtas/basic/default/extra"));
    }

    #[test]
    fn test_find_config_files_both_extensions() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "test.yaml");
        touch(dir.path(), "nested/test.yml");
        touch(dir.path(), "nested/test.conf");

        let files = find_config_files(dir.path()).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_find_config_files_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(find_config_files(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_find_config_files_missing_dir() {
        assert!(find_config_files("/nonexistent/dir").is_err());
    }
}
