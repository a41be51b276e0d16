//! Package metadata.

/// Package metadata carried into the bundle manifest.
///
/// Maps from the descriptor's `[package]` section.
///
/// # Configuration
///
/// ```toml
/// [package]
/// name = "aichat"
/// version = "0.1.0"
/// description = "Desktop chat client"
/// authors = ["Author Name <email@example.com>"]
/// homepage = "https://example.com"
/// ```
#[derive(Debug, Clone, Default, serde::Deserialize, serde::Serialize)]
pub struct PackageSettings {
    /// Product name displayed to users.
    ///
    /// Human-readable name recorded in the bundle manifest. The output
    /// binary name lives separately in `[output] name`.
    pub name: String,

    /// Version string in semantic versioning format.
    ///
    /// Example: "1.0.0", "0.2.3-beta.1"
    pub version: String,

    /// Brief description of the application.
    #[serde(default)]
    pub description: String,

    /// Homepage URL for the application.
    ///
    /// Default: None
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,

    /// List of package authors.
    ///
    /// Format: "Name <email@example.com>"
    ///
    /// Default: None
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<Vec<String>>,
}
