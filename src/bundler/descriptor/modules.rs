//! Forced module inclusion configuration.

/// Forced module includes.
///
/// Module names listed here are guaranteed present in the bundle regardless
/// of whether a dependency scanner would have detected them (the usual
/// escape hatch for dynamically loaded or plugin-style modules).
///
/// Names resolving to files under the entry search paths are staged
/// directly; the rest are recorded in the bundle manifest for the runtime
/// environment to provide.
///
/// # Configuration
///
/// ```toml
/// [modules]
/// include = ["requests", "dotenv", "sqlite3", "ui.components"]
/// ```
#[derive(Debug, Clone, Default, serde::Deserialize, serde::Serialize)]
pub struct ModuleSettings {
    /// Dotted module names to force-include.
    ///
    /// Default: empty
    #[serde(default)]
    pub include: Vec<String>,
}
