//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap, with proper
//! validation and error handling.

use clap::Parser;
use std::path::PathBuf;

/// Descriptor-driven bundler for script applications
#[derive(Parser, Debug)]
#[command(
    name = "scriptpack",
    version,
    about = "Descriptor-driven bundler for script applications",
    long_about = "Reads a build descriptor and packs an application (entry script, module \
trees, data files, launcher) into a standalone distributable bundle.

Usage:
  scriptpack                                  # bundle using ./bundle.toml into ./bin
  scriptpack -d app/bundle.toml -o dist
  scriptpack --check                          # validate the descriptor only
  scriptpack --init                           # write a default descriptor

Exit code 0 = artifact guaranteed to exist in the output directory
(with --check: the descriptor is structurally valid)."
)]
pub struct Args {
    /// Path to the build descriptor
    #[arg(short = 'd', long, value_name = "PATH", default_value = "bundle.toml")]
    pub descriptor: PathBuf,

    /// Output directory for the created artifact
    ///
    /// Created if it does not exist. The artifact file name includes the
    /// package version and architecture (e.g., aichat_0.1.0_x86_64.tar.gz).
    #[arg(short = 'o', long, value_name = "DIR", default_value = "bin")]
    pub output_dir: PathBuf,

    /// Target triple to bundle for (defaults to the host)
    #[arg(long, value_name = "TRIPLE")]
    pub target: Option<String>,

    /// Staging/archive work directory (defaults to the user cache dir)
    #[arg(long, value_name = "DIR")]
    pub work_dir: Option<PathBuf>,

    /// Validate the descriptor without bundling
    #[arg(long)]
    pub check: bool,

    /// Write a default descriptor and exit
    #[arg(long)]
    pub init: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), crate::error::CliError> {
        if self.check && self.init {
            return Err(crate::error::CliError::ConflictingArguments {
                arguments: vec!["--check".to_string(), "--init".to_string()],
            });
        }

        if self.descriptor.as_os_str().is_empty() {
            return Err(crate::error::CliError::InvalidArguments {
                reason: "descriptor path cannot be empty".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_descriptor_and_bin() {
        let args = Args::parse_from(["scriptpack"]);
        assert_eq!(args.descriptor, PathBuf::from("bundle.toml"));
        assert_eq!(args.output_dir, PathBuf::from("bin"));
        assert!(!args.check);
        assert!(!args.init);
    }

    #[test]
    fn check_and_init_conflict() {
        let args = Args::parse_from(["scriptpack", "--check", "--init"]);
        let err = args.validate().unwrap_err();
        assert!(err.to_string().contains("Conflicting"));
    }

    #[test]
    fn check_alone_is_valid() {
        let args = Args::parse_from(["scriptpack", "--check"]);
        assert!(args.validate().is_ok());
    }
}
