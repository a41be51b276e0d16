//! Bundle manifest generation.
//!
//! Every bundle carries a `manifest.json` at its root recording what was
//! built: package identity, entry point, search paths, forced modules (and
//! which of them the bundle expects from the runtime environment), the
//! output flags, target, and build timestamp.

use super::staging::StagedBundle;
use crate::bundler::descriptor::Descriptor;
use crate::bundler::error::{ErrorExt, Result};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Manifest written into the bundle root.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BundleManifest {
    /// Product name.
    pub name: String,
    /// Package version.
    pub version: String,
    /// Package description.
    pub description: String,
    /// Entry script, relative to the bundle root.
    pub entry: String,
    /// Module search paths, relative to the bundle root.
    pub search_paths: Vec<String>,
    /// All forced module includes from the descriptor.
    pub modules: Vec<String>,
    /// Forced includes the bundle expects the runtime environment to
    /// provide (they did not resolve under any search path).
    pub external_modules: Vec<String>,
    /// Icon file, relative to the bundle root, when one was staged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Console-window visibility flag.
    pub console: bool,
    /// Debug-bundle flag.
    pub debug: bool,
    /// Whether the payload archive is compressed.
    pub compressed: bool,
    /// Target the bundle was built for.
    pub target: String,
    /// Architecture label.
    pub arch: String,
    /// Build timestamp.
    pub created_at: DateTime<Utc>,
}

impl BundleManifest {
    /// File name of the manifest inside the bundle.
    pub const FILE_NAME: &'static str = "manifest.json";

    /// Builds the manifest for a staged bundle.
    pub fn new(descriptor: &Descriptor, staged: &StagedBundle, target: &str) -> Self {
        Self {
            name: descriptor.product_name().to_string(),
            version: descriptor.version_string().to_string(),
            description: descriptor.description().to_string(),
            entry: staged.entry.to_string_lossy().into_owned(),
            search_paths: staged.search_path_names.clone(),
            modules: descriptor.modules.include.clone(),
            external_modules: staged.unresolved_modules.clone(),
            icon: staged
                .icon
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned()),
            console: descriptor.output.console,
            debug: descriptor.output.debug,
            compressed: descriptor.output.compress,
            target: target.to_string(),
            arch: descriptor.binary_arch(target).label().to_string(),
            created_at: Utc::now(),
        }
    }

    /// Writes the manifest as pretty-printed JSON into `root`.
    pub async fn write(&self, root: &Path) -> Result<PathBuf> {
        let path = root.join(Self::FILE_NAME);
        let raw = serde_json::to_vec_pretty(self)?;
        tokio::fs::write(&path, raw)
            .await
            .fs_context("writing bundle manifest", &path)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::descriptor::{DescriptorBuilder, PackageSettings};

    #[tokio::test]
    async fn manifest_records_build_facts() {
        let descriptor = DescriptorBuilder::new()
            .package_settings(PackageSettings {
                name: "demo".into(),
                version: "0.2.0".into(),
                description: "demo app".into(),
                ..Default::default()
            })
            .entry_script("src/main.py")
            .output_name("demo")
            .module("requests")
            .console(false)
            .build()
            .unwrap();

        let staged = StagedBundle {
            root: PathBuf::from("/tmp/stage"),
            entry: PathBuf::from("main.py"),
            search_path_names: vec!["src".into()],
            unresolved_modules: vec!["requests".into()],
            icon: None,
        };

        let manifest = BundleManifest::new(&descriptor, &staged, "x86_64-unknown-linux-gnu");
        assert_eq!(manifest.version, "0.2.0");
        assert_eq!(manifest.external_modules, vec!["requests".to_string()]);
        assert!(!manifest.console);
        assert_eq!(manifest.arch, "x86_64");

        let dir = tempfile::tempdir().unwrap();
        let path = manifest.write(dir.path()).await.unwrap();
        let raw = std::fs::read_to_string(path).unwrap();
        let parsed: BundleManifest = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.entry, "main.py");
    }
}
