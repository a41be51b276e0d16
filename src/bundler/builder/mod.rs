//! Bundle orchestration and coordination.
//!
//! This module provides the main [`Bundler`] orchestrator that turns a
//! validated descriptor into a distributable bundle.
//!
//! # Overview
//!
//! The bundler:
//! 1. Validates the [`Descriptor`](crate::bundler::Descriptor)
//! 2. Stages the bundle tree (entry script, module trees, data, icon)
//! 3. Renders the launcher script
//! 4. Writes the bundle manifest
//! 5. Creates the payload archive, calculates its checksum, and moves it to
//!    the output directory
//!
//! # Example
//!
//! ```no_run
//! use scriptpack::bundler::{Bundler, Descriptor};
//!
//! # async fn example() -> scriptpack::bundler::Result<()> {
//! let descriptor = Descriptor::load("bundle.toml".as_ref()).await?;
//! let bundler = Bundler::new(descriptor);
//! let artifact = bundler.bundle("bin".as_ref()).await?;
//!
//! println!("Created: {} ({} bytes)", artifact.path.display(), artifact.size);
//! println!("SHA256: {}", artifact.checksum);
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`archive`] - Payload archive creation (tar.gz / zip)
//! - [`checksum`] - SHA256 checksum calculation for artifacts
//! - [`launcher`] - Launcher script rendering
//! - [`manifest`] - Bundle manifest generation
//! - [`orchestrator`] - Main [`Bundler`] struct and bundling operations
//! - [`staging`] - Bundle tree assembly
//! - [`tool_detection`] - Interpreter availability checking

pub mod archive;
pub mod checksum;
pub mod launcher;
pub mod manifest;
mod orchestrator;
pub mod staging;
pub mod tool_detection;

pub use orchestrator::{BundledArtifact, Bundler};

/// Operating system family a bundle targets.
///
/// Selects the payload format and launcher flavor.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TargetOs {
    /// Windows targets: batch launcher, zip payload
    Windows,
    /// macOS targets: shell launcher, tar.gz payload
    MacOs,
    /// Linux and other unix targets: shell launcher, tar.gz payload
    Linux,
}

impl TargetOs {
    /// Detects the OS family from a target triple or OS name.
    pub fn from_target(target: &str) -> Self {
        if target.contains("windows") {
            TargetOs::Windows
        } else if target.contains("apple") || target.contains("darwin") || target.contains("macos")
        {
            TargetOs::MacOs
        } else {
            TargetOs::Linux
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn os_family_detection() {
        assert_eq!(
            TargetOs::from_target("x86_64-pc-windows-msvc"),
            TargetOs::Windows
        );
        assert_eq!(TargetOs::from_target("aarch64-apple-darwin"), TargetOs::MacOs);
        assert_eq!(
            TargetOs::from_target("x86_64-unknown-linux-gnu"),
            TargetOs::Linux
        );
        assert_eq!(TargetOs::from_target("x86_64-unknown-macos"), TargetOs::MacOs);
    }
}
