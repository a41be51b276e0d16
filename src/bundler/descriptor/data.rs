//! Data-mapping configuration.

use std::path::PathBuf;

/// A single (source, destination) data mapping.
///
/// Sources are copied verbatim into the bundle at the declared destination.
/// The source may be a literal file, a directory (copied recursively), or a
/// glob pattern (each match copied into the destination directory).
///
/// # Configuration
///
/// ```toml
/// [[data]]
/// source = "assets"
/// dest = "assets"
///
/// [[data]]
/// source = "config/*.toml"
/// dest = "config"
/// ```
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct DataMapping {
    /// Source path or glob pattern, relative to the descriptor file.
    pub source: String,

    /// Destination directory inside the bundle.
    ///
    /// Must be relative and must not traverse out of the bundle root.
    pub dest: PathBuf,
}

impl DataMapping {
    /// Creates a new data mapping.
    pub fn new(source: impl Into<String>, dest: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
        }
    }

    /// Whether the source is a glob pattern rather than a literal path.
    pub fn is_glob(&self) -> bool {
        self.source.contains(['*', '?', '['])
    }
}
