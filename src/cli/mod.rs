//! Command line interface for scriptpack.
//!
//! This module provides the CLI for bundling operations, with argument
//! parsing, command execution, and user feedback.

mod args;

pub use args::Args;

use crate::bundler::{Bundler, Descriptor, validate};
use crate::error::Result;
use std::path::Path;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    args.validate()?;

    if args.init {
        return init_descriptor(&args.descriptor).await;
    }

    let descriptor = Descriptor::load(&args.descriptor).await?;

    if args.check {
        validate::validate(&descriptor)?;
        println!("{} is valid", args.descriptor.display());
        return Ok(0);
    }

    let mut bundler = Bundler::new(descriptor);
    if let Some(target) = args.target {
        bundler = bundler.with_target(target);
    }
    if let Some(work_dir) = args.work_dir {
        bundler = bundler.with_work_dir(work_dir);
    }

    let artifact = bundler.bundle(&args.output_dir).await?;
    println!("Created: {}", artifact.path.display());
    println!("  size:   {} bytes", artifact.size);
    println!("  sha256: {}", artifact.checksum);

    Ok(0)
}

/// Writes a default descriptor, refusing to overwrite an existing one.
async fn init_descriptor(path: &Path) -> Result<i32> {
    if path.exists() {
        return Err(crate::error::CliError::InvalidArguments {
            reason: format!("{} already exists", path.display()),
        }
        .into());
    }

    let base_dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::path::PathBuf::from("."),
    };
    let name = base_dir
        .canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "app".to_string());

    Descriptor::scaffold(&name, base_dir).write(path).await?;
    println!("Wrote {}", path.display());
    Ok(0)
}
