//! Core Descriptor struct and implementations.

use super::{Arch, DataMapping, EntrySettings, ModuleSettings, OutputSettings, PackageSettings};
use crate::bundler::error::{ErrorExt, Result};
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// A parsed build descriptor.
///
/// Central configuration for the bundler, loaded from a TOML file with
/// [`Descriptor::load`] or constructed via [`DescriptorBuilder`]. All
/// relative paths inside the descriptor are resolved against the
/// descriptor file's directory, never the process working directory.
///
/// # Examples
///
/// ```no_run
/// use scriptpack::bundler::Descriptor;
///
/// # async fn example() -> scriptpack::bundler::Result<()> {
/// let descriptor = Descriptor::load("bundle.toml".as_ref()).await?;
/// println!("bundling {} {}", descriptor.product_name(), descriptor.version_string());
/// # Ok(())
/// # }
/// ```
///
/// # See Also
///
/// - [`DescriptorBuilder`] - In-process construction
/// - [`crate::bundler::validate`] - Structural validation
///
/// [`DescriptorBuilder`]: super::DescriptorBuilder
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
pub struct Descriptor {
    /// Package metadata.
    pub package: PackageSettings,

    /// Entry point configuration.
    pub entry: EntrySettings,

    /// Data mappings copied verbatim into the bundle.
    #[serde(default, rename = "data")]
    pub data: Vec<DataMapping>,

    /// Forced module includes.
    #[serde(default)]
    pub modules: ModuleSettings,

    /// Output-binary settings.
    pub output: OutputSettings,

    /// Directory relative paths are resolved against.
    ///
    /// Set to the descriptor file's parent on load; not part of the TOML.
    #[serde(skip)]
    base_dir: PathBuf,
}

impl Descriptor {
    /// Loads a descriptor from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid
    /// descriptor TOML.
    pub async fn load(path: &Path) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .fs_context("reading descriptor", path)?;
        let base_dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Self::from_toml_str(&raw, base_dir)
    }

    /// Parses a descriptor from a TOML string.
    ///
    /// `base_dir` becomes the directory relative descriptor paths resolve
    /// against.
    pub fn from_toml_str(raw: &str, base_dir: PathBuf) -> Result<Self> {
        let mut descriptor: Descriptor = toml::from_str(raw)?;
        descriptor.base_dir = base_dir
            .absolutize()
            .map(|p| p.to_path_buf())
            .unwrap_or(base_dir);
        Ok(descriptor)
    }

    /// Serializes the descriptor to TOML and writes it to `path`.
    pub async fn write(&self, path: &Path) -> Result<()> {
        let raw = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .fs_context("creating descriptor directory", parent)?;
        }
        tokio::fs::write(path, raw)
            .await
            .fs_context("writing descriptor", path)?;
        Ok(())
    }

    /// Produces the default descriptor written on first build when no
    /// descriptor exists yet: `src/main.py` entry, `assets` data mapping,
    /// windowed launcher, compressed payload.
    pub fn scaffold(name: &str, base_dir: PathBuf) -> Self {
        Self {
            package: PackageSettings {
                name: name.to_string(),
                version: "0.1.0".to_string(),
                description: String::new(),
                homepage: None,
                authors: None,
            },
            entry: EntrySettings::default(),
            data: vec![DataMapping::new("assets", "assets")],
            modules: ModuleSettings::default(),
            output: OutputSettings {
                name: name.to_string(),
                icon: Some(PathBuf::from("assets/icon.ico")),
                console: false,
                ..Default::default()
            },
            base_dir,
        }
    }

    /// Returns the product name.
    pub fn product_name(&self) -> &str {
        &self.package.name
    }

    /// Returns the version string.
    pub fn version_string(&self) -> &str {
        &self.package.version
    }

    /// Parses the version string as semver.
    pub fn version(&self) -> Result<semver::Version> {
        Ok(self.package.version.parse()?)
    }

    /// Returns the package description.
    pub fn description(&self) -> &str {
        &self.package.description
    }

    /// Returns the directory relative descriptor paths resolve against.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolves a descriptor-relative path against the base directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Returns the resolved entry script path.
    pub fn entry_script(&self) -> PathBuf {
        self.resolve(&self.entry.script)
    }

    /// Returns the resolved module search paths.
    pub fn search_paths(&self) -> Vec<PathBuf> {
        self.entry
            .search_paths
            .iter()
            .map(|p| self.resolve(p))
            .collect()
    }

    /// Returns the resolved icon path, if one is configured.
    pub fn icon_path(&self) -> Option<PathBuf> {
        self.output.icon.as_ref().map(|p| self.resolve(p))
    }

    /// Loads and returns icon metadata.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IconPathError`] if no icon path is configured.
    ///
    /// [`Error::IconPathError`]: crate::bundler::Error::IconPathError
    pub fn icon_file(&self) -> Result<crate::bundler::resources::icons::IconInfo> {
        use crate::bundler::resources::icons::load_icon;

        match self.icon_path() {
            Some(path) => load_icon(&path),
            None => Err(crate::bundler::Error::IconPathError),
        }
    }

    /// Detects the bundle architecture.
    ///
    /// An explicit `[output] arch` wins; otherwise the architecture is
    /// detected from the target triple.
    pub fn binary_arch(&self, target: &str) -> Arch {
        self.output.arch.unwrap_or_else(|| Arch::from_triple(target))
    }

    /// Creates a new Descriptor instance (used by DescriptorBuilder).
    pub(super) fn new(
        package: PackageSettings,
        entry: EntrySettings,
        data: Vec<DataMapping>,
        modules: ModuleSettings,
        output: OutputSettings,
        base_dir: PathBuf,
    ) -> Self {
        let base_dir = base_dir
            .absolutize()
            .map(|p| p.to_path_buf())
            .unwrap_or(base_dir);
        Self {
            package,
            entry,
            data,
            modules,
            output,
            base_dir,
        }
    }

    /// Artifact file stem: `{name}_{version}_{arch}`.
    pub fn artifact_stem(&self, target: &str) -> String {
        format!(
            "{}_{}_{}",
            self.output.name,
            self.package.version,
            self.binary_arch(target)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        [package]
        name = "aichat"
        version = "0.1.0"

        [entry]
        script = "src/main.py"

        [output]
        name = "aichat"
    "#;

    #[test]
    fn parses_minimal_descriptor_with_defaults() {
        let d = Descriptor::from_toml_str(MINIMAL, PathBuf::from("/tmp/app")).unwrap();
        assert_eq!(d.product_name(), "aichat");
        assert_eq!(d.entry.search_paths, vec![PathBuf::from("src")]);
        assert!(d.output.console);
        assert!(d.output.compress);
        assert!(!d.output.debug);
        assert!(d.data.is_empty());
        assert!(d.modules.include.is_empty());
    }

    #[test]
    fn resolves_relative_paths_against_base_dir() {
        let d = Descriptor::from_toml_str(MINIMAL, PathBuf::from("/tmp/app")).unwrap();
        assert_eq!(d.entry_script(), PathBuf::from("/tmp/app/src/main.py"));
    }

    #[test]
    fn explicit_arch_overrides_triple_detection() {
        let raw = r#"
            [package]
            name = "demo"
            version = "1.0.0"

            [entry]
            script = "main.py"

            [output]
            name = "demo"
            arch = "aarch64"
        "#;
        let d = Descriptor::from_toml_str(raw, PathBuf::from(".")).unwrap();
        assert_eq!(d.binary_arch("x86_64-unknown-linux-gnu"), Arch::AArch64);
    }

    #[test]
    fn artifact_stem_includes_version_and_arch() {
        let d = Descriptor::from_toml_str(MINIMAL, PathBuf::from(".")).unwrap();
        assert_eq!(
            d.artifact_stem("x86_64-unknown-linux-gnu"),
            "aichat_0.1.0_x86_64"
        );
    }

    #[test]
    fn scaffold_round_trips_through_toml() {
        let scaffold = Descriptor::scaffold("aichat", PathBuf::from("."));
        let raw = toml::to_string_pretty(&scaffold).unwrap();
        let parsed = Descriptor::from_toml_str(&raw, PathBuf::from(".")).unwrap();
        assert_eq!(parsed.output.name, "aichat");
        assert!(!parsed.output.console);
        assert_eq!(parsed.data.len(), 1);
    }

    #[test]
    fn rejects_bad_version() {
        let raw = MINIMAL.replace("0.1.0", "not-a-version");
        let d = Descriptor::from_toml_str(&raw, PathBuf::from(".")).unwrap();
        assert!(d.version().is_err());
    }
}
