//! Bundling pipeline: descriptor parsing, validation, staging, and payload
//! creation.
//!
//! The pipeline consumes a build descriptor and produces a standalone
//! distributable bundle:
//!
//! 1. [`Descriptor`] is loaded from TOML (or built in-process via
//!    [`DescriptorBuilder`])
//! 2. [`validate`] checks the descriptor's structural properties
//! 3. [`Bundler`] stages the tree, renders the launcher, creates the payload
//!    archive, and returns a [`BundledArtifact`] with size and checksum

pub mod builder;
pub mod descriptor;
pub mod error;
pub mod resources;
pub mod utils;
pub mod validate;

// Re-export the main pipeline types
pub use builder::{BundledArtifact, Bundler};
pub use descriptor::{
    Arch, DataMapping, Descriptor, DescriptorBuilder, EntrySettings, ModuleSettings,
    OutputSettings, PackageSettings,
};
pub use error::{Error, Result};
