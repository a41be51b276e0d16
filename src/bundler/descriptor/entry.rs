//! Entry point configuration.

use std::path::PathBuf;

fn default_search_paths() -> Vec<PathBuf> {
    vec![PathBuf::from("src")]
}

/// Entry point configuration.
///
/// Declares the script the bundled application starts from and the
/// directories whose module trees are shipped alongside it.
///
/// # Configuration
///
/// ```toml
/// [entry]
/// script = "src/main.py"
/// search_paths = ["src"]
/// ```
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
pub struct EntrySettings {
    /// Path to the entry script, relative to the descriptor file.
    pub script: PathBuf,

    /// Directories whose module trees are bundled and put on the module
    /// search path at launch.
    ///
    /// Default: `["src"]`
    #[serde(default = "default_search_paths")]
    pub search_paths: Vec<PathBuf>,
}

impl Default for EntrySettings {
    fn default() -> Self {
        Self {
            script: PathBuf::from("src/main.py"),
            search_paths: default_search_paths(),
        }
    }
}
