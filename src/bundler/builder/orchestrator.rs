//! Main bundler orchestration and coordination.
//!
//! This module provides the [`Bundler`] orchestrator that runs the full
//! pipeline: validate, stage, render the launcher, write the manifest,
//! archive, checksum, and place the artifact in the output directory.

use super::{
    TargetOs,
    archive::{self, PayloadFormat},
    checksum::calculate_sha256,
    launcher, manifest::BundleManifest, staging,
    tool_detection::INTERPRETER,
};
use crate::bail;
use crate::bundler::descriptor::Descriptor;
use crate::bundler::error::{ErrorExt, Result};
use std::path::{Path, PathBuf};

/// A successfully built bundle artifact.
#[derive(Debug, Clone)]
pub struct BundledArtifact {
    /// Final artifact path inside the output directory.
    pub path: PathBuf,
    /// Artifact size in bytes.
    pub size: u64,
    /// Hex-encoded SHA-256 checksum of the artifact.
    pub checksum: String,
}

/// Main bundler orchestrator.
///
/// Consumes a [`Descriptor`] and produces a distributable bundle archive.
///
/// # Examples
///
/// ```no_run
/// use scriptpack::bundler::{Bundler, Descriptor};
///
/// # async fn example(descriptor: Descriptor) -> scriptpack::bundler::Result<()> {
/// let bundler = Bundler::new(descriptor)
///     .with_target("x86_64-unknown-linux-gnu".into());
/// let artifact = bundler.bundle("bin".as_ref()).await?;
/// println!("Created: {}", artifact.path.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Bundler {
    descriptor: Descriptor,
    target: String,
    work_dir: PathBuf,
}

impl Bundler {
    /// Creates a new bundler with the given descriptor.
    ///
    /// The target defaults to the `TARGET` environment variable or the host,
    /// and the work directory to a `scriptpack` subdirectory of the user
    /// cache directory.
    pub fn new(descriptor: Descriptor) -> Self {
        let target = std::env::var("TARGET").unwrap_or_else(|_| {
            format!(
                "{}-unknown-{}",
                std::env::consts::ARCH,
                std::env::consts::OS
            )
        });
        let work_dir = dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("scriptpack");

        Self {
            descriptor,
            target,
            work_dir,
        }
    }

    /// Sets the target triple the bundle is built for.
    pub fn with_target(mut self, target: String) -> Self {
        self.target = target;
        self
    }

    /// Sets the staging/archive work directory.
    pub fn with_work_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.work_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Returns a reference to the descriptor.
    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    /// Runs the full bundling pipeline.
    ///
    /// # Pipeline
    ///
    /// 1. Validate the descriptor ([`crate::bundler::validate`])
    /// 2. Stage the bundle tree under the work directory
    /// 3. Render the launcher and write the bundle manifest
    /// 4. Create the payload archive and calculate its checksum
    /// 5. Byte-compile the staged entry script when an interpreter is
    ///    available (launch smoke check; skipped with a warning otherwise)
    /// 6. Move the artifact into `output_dir`, creating it if missing
    ///
    /// # Returns
    ///
    /// A [`BundledArtifact`] with the final path, size, and checksum.
    /// The artifact is guaranteed to exist at `BundledArtifact::path` on
    /// success.
    pub async fn bundle(&self, output_dir: &Path) -> Result<BundledArtifact> {
        crate::bundler::validate::validate(&self.descriptor)?;

        let target_os = TargetOs::from_target(&self.target);
        let format = PayloadFormat::for_target(target_os);

        // Stage
        let staging_root = self
            .work_dir
            .join(format!("{}-stage", self.descriptor.output.name));
        log::info!(
            "staging {} {} for {}",
            self.descriptor.product_name(),
            self.descriptor.version_string(),
            self.target
        );
        let staged = staging::stage(&self.descriptor, &staging_root).await?;

        if !staged.unresolved_modules.is_empty() {
            log::info!(
                "{} forced module(s) recorded for the runtime environment: {}",
                staged.unresolved_modules.len(),
                staged.unresolved_modules.join(", ")
            );
        }

        // Launcher + manifest
        let launcher_path = launcher::write(&self.descriptor, &staged, target_os).await?;
        log::debug!("launcher written to {}", launcher_path.display());
        BundleManifest::new(&self.descriptor, &staged, &self.target)
            .write(&staged.root)
            .await?;

        // Archive
        let artifact_name = format!(
            "{}.{}",
            self.descriptor.artifact_stem(&self.target),
            format.extension()
        );
        let archive_path = self.work_dir.join(&artifact_name);
        archive::create_payload(
            &staged.root,
            &archive_path,
            format,
            self.descriptor.output.compress,
        )
        .await?;

        let checksum = calculate_sha256(&archive_path).await?;

        // Launch smoke check runs after archiving: byte-compilation drops
        // __pycache__ into the staging tree, which must not end up in the
        // payload.
        self.smoke_check(&staged.root.join(&staged.entry)).await?;

        // Move into the output directory
        let final_path = output_dir.join(&artifact_name);
        move_artifact(&archive_path, &final_path).await?;

        let size = tokio::fs::metadata(&final_path)
            .await
            .fs_context("reading artifact metadata", &final_path)?
            .len();

        log::info!(
            "created {} ({} bytes, sha256 {})",
            final_path.display(),
            size,
            checksum
        );

        Ok(BundledArtifact {
            path: final_path,
            size,
            checksum,
        })
    }

    /// Byte-compiles the staged entry script to verify the bundle launches
    /// into its declared entry point.
    ///
    /// Skipped with a warning when no interpreter is available.
    async fn smoke_check(&self, entry: &Path) -> Result<()> {
        let Some(interpreter) = INTERPRETER.as_ref() else {
            log::warn!("no interpreter available - skipping launch smoke check");
            return Ok(());
        };

        let output = tokio::process::Command::new(interpreter)
            .arg("-m")
            .arg("py_compile")
            .arg(entry)
            .output()
            .await
            .fs_context("running launch smoke check", entry)?;

        if !output.status.success() {
            bail!(
                "entry script {} failed to byte-compile (exit code: {:?}): {}",
                entry.display(),
                output.status.code(),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        log::debug!("launch smoke check passed for {}", entry.display());
        Ok(())
    }
}

/// Moves the artifact to its final path, falling back to copy-and-remove
/// when the rename crosses file systems.
async fn move_artifact(from: &Path, to: &Path) -> Result<()> {
    if let Some(parent) = to.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .fs_context("creating output directory", parent)?;
    }

    match tokio::fs::rename(from, to).await {
        Ok(()) => Ok(()),
        Err(_) => {
            tokio::fs::copy(from, to)
                .await
                .fs_context("copying artifact to output", to)?;
            tokio::fs::remove_file(from)
                .await
                .fs_context("removing staged artifact", from)?;
            Ok(())
        }
    }
}
