//! Error types for the bundling pipeline.
//!
//! Every fallible bundling operation returns [`Result`]. File-system errors
//! carry the action and path that failed via [`ErrorExt::fs_context`] so the
//! CLI can report what the bundler was doing when it stopped.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for bundling operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for bundling operations
#[derive(Error, Debug)]
pub enum Error {
    /// Generic error with a formatted message (see [`crate::bail!`])
    #[error("{0}")]
    GenericError(String),

    /// IO errors without path context
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// IO errors annotated with the failing action and path
    #[error("{action} failed for {}: {source}", path.display())]
    FsContext {
        /// What the bundler was doing
        action: &'static str,
        /// Path the operation was applied to
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Descriptor failed structural validation
    #[error("descriptor validation failed:\n{0}")]
    ValidationFailed(crate::bundler::validate::ValidationReport),

    /// Entry script declared in the descriptor does not exist
    #[error("entry script not found: {}", .0.display())]
    EntryScriptMissing(PathBuf),

    /// No icon is configured in the descriptor's [output] section
    #[error("no icon path configured in [output]")]
    IconPathError,

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization errors
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Version string is not valid semver
    #[error("invalid version: {0}")]
    Semver(#[from] semver::Error),

    /// Launcher template registration errors
    #[error("launcher template error: {0}")]
    Template(#[from] Box<handlebars::TemplateError>),

    /// Launcher template rendering errors
    #[error("launcher render error: {0}")]
    Render(#[from] handlebars::RenderError),

    /// Invalid glob pattern in a data mapping
    #[error("glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),

    /// Glob iteration errors
    #[error("glob error: {0}")]
    Glob(#[from] glob::GlobError),

    /// Directory traversal errors
    #[error("directory walk error: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// Path prefix errors during staging
    #[error("path prefix error: {0}")]
    StripPrefix(#[from] std::path::StripPrefixError),

    /// ZIP payload errors
    #[error("zip archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Icon decoding errors
    #[error("icon error: {0}")]
    Image(#[from] image::ImageError),
}

/// Bail out of a bundling operation with a formatted error message.
///
/// Expands to an early `return Err(...)` carrying [`Error::GenericError`],
/// converted into the caller's error type.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::bundler::error::Error::GenericError(format!($($arg)*)).into())
    };
}

/// Extension trait attaching action/path context to IO results.
pub trait ErrorExt<T> {
    /// Annotates an IO error with the failing action and path.
    fn fs_context(self, action: &'static str, path: &Path) -> Result<T>;
}

impl<T> ErrorExt<T> for std::io::Result<T> {
    fn fs_context(self, action: &'static str, path: &Path) -> Result<T> {
        self.map_err(|source| Error::FsContext {
            action,
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Extension trait turning `Option` into `Result` with a message.
pub trait Context<T> {
    /// Converts `None` into [`Error::GenericError`] with the given message.
    fn context(self, msg: &str) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context(self, msg: &str) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(msg.to_string()))
    }
}
