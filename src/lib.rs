//! Descriptor-driven bundler library for script applications.
//!
//! This library provides the core bundling functionality for turning a build
//! descriptor into a standalone distributable bundle:
//! - TOML build descriptors (entry script, data mappings, forced modules,
//!   output settings)
//! - Structural validation of descriptors
//! - Staging, launcher generation, and payload archive creation
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;

// Re-export commonly used types
pub use error::{CliError, Result, ScriptpackError};
