//! Builder for constructing Descriptors in-process.

use super::{DataMapping, Descriptor, EntrySettings, ModuleSettings, OutputSettings, PackageSettings};
use std::path::{Path, PathBuf};

/// Builder for constructing a [`Descriptor`] without a TOML file.
///
/// Provides a fluent API with required-field validation on [`build`].
///
/// # Examples
///
/// ```no_run
/// use scriptpack::bundler::{DescriptorBuilder, PackageSettings};
///
/// # fn example() -> scriptpack::bundler::Result<()> {
/// let descriptor = DescriptorBuilder::new()
///     .package_settings(PackageSettings {
///         name: "aichat".into(),
///         version: "0.1.0".into(),
///         ..Default::default()
///     })
///     .entry_script("src/main.py")
///     .output_name("aichat")
///     .data("assets", "assets")
///     .module("requests")
///     .build()?;
/// # Ok(())
/// # }
/// ```
///
/// [`build`]: DescriptorBuilder::build
#[derive(Default)]
pub struct DescriptorBuilder {
    package_settings: Option<PackageSettings>,
    entry_script: Option<PathBuf>,
    search_paths: Vec<PathBuf>,
    data: Vec<DataMapping>,
    modules: Vec<String>,
    output_name: Option<String>,
    output: OutputSettings,
    base_dir: Option<PathBuf>,
}

impl DescriptorBuilder {
    /// Creates a new descriptor builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets package metadata.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn package_settings(mut self, settings: PackageSettings) -> Self {
        self.package_settings = Some(settings);
        self
    }

    /// Sets the entry script path.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn entry_script<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.entry_script = Some(path.as_ref().to_path_buf());
        self
    }

    /// Adds a module search path.
    ///
    /// Default: `["src"]` when none are added.
    pub fn search_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.search_paths.push(path.as_ref().to_path_buf());
        self
    }

    /// Adds a data mapping.
    pub fn data<P: AsRef<Path>>(mut self, source: &str, dest: P) -> Self {
        self.data
            .push(DataMapping::new(source, dest.as_ref().to_path_buf()));
        self
    }

    /// Adds a forced module include.
    pub fn module(mut self, name: &str) -> Self {
        self.modules.push(name.to_string());
        self
    }

    /// Sets the output artifact name.
    ///
    /// # Required
    ///
    /// This field is required for building.
    pub fn output_name(mut self, name: &str) -> Self {
        self.output_name = Some(name.to_string());
        self
    }

    /// Sets the icon path.
    ///
    /// Default: None
    pub fn icon<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output.icon = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets console-window visibility.
    ///
    /// Default: true
    pub fn console(mut self, console: bool) -> Self {
        self.output.console = console;
        self
    }

    /// Sets the debug flag.
    ///
    /// Default: false
    pub fn debug(mut self, debug: bool) -> Self {
        self.output.debug = debug;
        self
    }

    /// Sets payload compression.
    ///
    /// Default: true
    pub fn compress(mut self, compress: bool) -> Self {
        self.output.compress = compress;
        self
    }

    /// Sets an explicit target architecture.
    ///
    /// Default: None (detect from triple)
    pub fn arch(mut self, arch: super::Arch) -> Self {
        self.output.arch = Some(arch);
        self
    }

    /// Sets the directory relative paths resolve against.
    ///
    /// Default: the process working directory.
    pub fn base_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.base_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Builds the descriptor.
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing:
    /// - `package_settings`
    /// - `entry_script`
    /// - `output_name`
    pub fn build(self) -> crate::bundler::Result<Descriptor> {
        use crate::bundler::error::Context;

        let package = self.package_settings.context("package_settings is required")?;
        let script = self.entry_script.context("entry_script is required")?;
        let name = self.output_name.context("output_name is required")?;

        let search_paths = if self.search_paths.is_empty() {
            EntrySettings::default().search_paths
        } else {
            self.search_paths
        };

        let base_dir = self
            .base_dir
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Descriptor::new(
            package,
            EntrySettings {
                script,
                search_paths,
            },
            self.data,
            ModuleSettings {
                include: self.modules,
            },
            OutputSettings {
                name,
                ..self.output
            },
            base_dir,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_with_required_fields() {
        let d = DescriptorBuilder::new()
            .package_settings(PackageSettings {
                name: "demo".into(),
                version: "1.2.3".into(),
                ..Default::default()
            })
            .entry_script("main.py")
            .output_name("demo")
            .build()
            .unwrap();
        assert_eq!(d.version_string(), "1.2.3");
        assert_eq!(d.entry.search_paths, vec![PathBuf::from("src")]);
    }

    #[test]
    fn missing_output_name_is_an_error() {
        let err = DescriptorBuilder::new()
            .package_settings(PackageSettings::default())
            .entry_script("main.py")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("output_name"));
    }
}
