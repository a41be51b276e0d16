//! Output-binary configuration.

use super::Arch;
use std::path::PathBuf;

fn default_true() -> bool {
    true
}

/// Output-binary settings.
///
/// Controls the name and behavior of the produced artifact.
///
/// # Configuration
///
/// ```toml
/// [output]
/// name = "aichat"
/// icon = "assets/icon.ico"
/// console = false
/// debug = false
/// compress = true
/// arch = "x86_64"
/// ```
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct OutputSettings {
    /// Base name of the output artifact (no extension).
    pub name: String,

    /// Icon file path (.ico, .png, .icns), relative to the descriptor file.
    ///
    /// Default: None
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<PathBuf>,

    /// Whether the launcher keeps a console window attached.
    ///
    /// Windowed applications set this to false; the launcher then starts
    /// the interpreter detached from the console on Windows.
    ///
    /// Default: true
    #[serde(default = "default_true")]
    pub console: bool,

    /// Whether to build a debug bundle.
    ///
    /// Debug bundles launch the interpreter with verbose flags and record
    /// the flag in the manifest.
    ///
    /// Default: false
    #[serde(default)]
    pub debug: bool,

    /// Whether the payload archive is compressed.
    ///
    /// Default: true
    #[serde(default = "default_true")]
    pub compress: bool,

    /// Explicit target architecture.
    ///
    /// Overrides detection from the target triple.
    ///
    /// Default: None (detect from triple)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arch: Option<Arch>,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            name: String::new(),
            icon: None,
            console: true,
            debug: false,
            compress: true,
            arch: None,
        }
    }
}
