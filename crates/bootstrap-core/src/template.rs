//! The bundled project template
//!
//! Handles template materialization, the post-copy dotfile rename rules,
//! and the dependency manifest (`package.json`) shipped with the template.

use crate::fsops;
use anyhow::{Context, Result};
use include_dir::{include_dir, Dir};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

/// The default template compiled into the binary
static EMBEDDED_TEMPLATE: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/../../templates/default");

/// Template filenames renamed to their dotfile form after copy.
/// npm strips dotfiles when publishing packages, so the template ships them
/// bare. Applies to exact names at the project root only, each rule
/// independently.
pub const RENAME_FILES: &[&str] = &[
    "editorconfig",
    "eslintignore",
    "eslintrc.js",
    "gitignore",
    "prettierignore",
];

/// Where template files come from
#[derive(Debug, Clone)]
pub enum TemplateSource {
    /// The template bundled into the binary
    Embedded,
    /// A local template directory (development use, `--template-dir`)
    Local(PathBuf),
}

impl TemplateSource {
    /// Copy every template file into `target`, preserving directory structure
    pub fn materialize(&self, target: &Path) -> io::Result<()> {
        match self {
            TemplateSource::Embedded => EMBEDDED_TEMPLATE.extract(target),
            TemplateSource::Local(dir) => fsops::copy_dir(dir, target),
        }
    }

    /// Read and parse the template's dependency manifest
    pub fn load_manifest(&self) -> Result<PackageManifest> {
        let content = match self {
            TemplateSource::Embedded => EMBEDDED_TEMPLATE
                .get_file("package.json")
                .context("bundled template is missing package.json")?
                .contents()
                .to_vec(),
            TemplateSource::Local(dir) => std::fs::read(dir.join("package.json"))
                .with_context(|| format!("failed to read {}/package.json", dir.display()))?,
        };
        serde_json::from_slice(&content).context("failed to parse template package.json")
    }
}

/// Dependency spec bundled with the template, partitioned into runtime and
/// development groups. Read-only; BTreeMap keeps install order deterministic.
#[derive(Debug, Clone, Deserialize)]
pub struct PackageManifest {
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default, rename = "devDependencies")]
    pub dev_dependencies: BTreeMap<String, String>,
}

impl PackageManifest {
    /// Runtime group as `name@version` specs
    pub fn runtime_specs(&self) -> Vec<String> {
        Self::specs(&self.dependencies)
    }

    /// Development group as `name@version` specs
    pub fn dev_specs(&self) -> Vec<String> {
        Self::specs(&self.dev_dependencies)
    }

    fn specs(group: &BTreeMap<String, String>) -> Vec<String> {
        group
            .iter()
            .map(|(name, version)| format!("{}@{}", name, version))
            .collect()
    }
}

/// Rename bare template filenames at the project root to their dotfile form.
/// Only files the template actually shipped are touched.
pub fn apply_rename_rules(root: &Path) -> io::Result<()> {
    for name in RENAME_FILES {
        let from = root.join(name);
        if from.exists() {
            std::fs::rename(&from, root.join(format!(".{}", name)))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_rename_rules_produce_dotfiles() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["gitignore", "editorconfig", "eslintrc.js"] {
            fs::write(dir.path().join(name), "x").unwrap();
        }

        apply_rename_rules(dir.path()).unwrap();

        for name in ["gitignore", "editorconfig", "eslintrc.js"] {
            assert!(!dir.path().join(name).exists(), "{} should be renamed", name);
            assert!(dir.path().join(format!(".{}", name)).exists());
        }
    }

    #[test]
    fn test_rename_rules_skip_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("gitignore"), "node_modules\n").unwrap();

        // only one of the five rule files exists; the rest are skipped
        apply_rename_rules(dir.path()).unwrap();
        assert!(dir.path().join(".gitignore").exists());
    }

    #[test]
    fn test_rename_rules_do_not_recurse() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/gitignore"), "x").unwrap();

        apply_rename_rules(dir.path()).unwrap();
        assert!(dir.path().join("nested/gitignore").exists());
        assert!(!dir.path().join("nested/.gitignore").exists());
    }

    #[test]
    fn test_embedded_template_has_manifest() {
        let manifest = TemplateSource::Embedded.load_manifest().unwrap();
        assert!(!manifest.dependencies.is_empty());
        assert!(!manifest.dev_dependencies.is_empty());
    }

    #[test]
    fn test_embedded_template_ships_rename_sources() {
        // the bundled template must carry the bare files the rules rename
        assert!(EMBEDDED_TEMPLATE.get_file("gitignore").is_some());
        assert!(EMBEDDED_TEMPLATE.get_file("editorconfig").is_some());
    }

    #[test]
    fn test_manifest_specs_format() {
        let manifest: PackageManifest = serde_json::from_str(
            r#"{
                "dependencies": { "react": "^17.0.2", "lodash": "^4.17.21" },
                "devDependencies": { "eslint": "^8.0.0" }
            }"#,
        )
        .unwrap();

        // BTreeMap ordering: alphabetical, stable across runs
        assert_eq!(
            manifest.runtime_specs(),
            vec!["lodash@^4.17.21", "react@^17.0.2"]
        );
        assert_eq!(manifest.dev_specs(), vec!["eslint@^8.0.0"]);
    }

    #[test]
    fn test_manifest_groups_default_to_empty() {
        let manifest: PackageManifest = serde_json::from_str("{}").unwrap();
        assert!(manifest.runtime_specs().is_empty());
        assert!(manifest.dev_specs().is_empty());
    }

    #[test]
    fn test_local_source_materializes_tree() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        fs::write(src.path().join("package.json"), "{}").unwrap();
        fs::create_dir(src.path().join("configs")).unwrap();
        fs::write(src.path().join("configs/config.yaml"), "server: {}\n").unwrap();

        TemplateSource::Local(src.path().to_path_buf())
            .materialize(dst.path())
            .unwrap();

        assert!(dst.path().join("package.json").is_file());
        assert!(dst.path().join("configs/config.yaml").is_file());
    }
}
