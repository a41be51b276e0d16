//! Bundle tree assembly.
//!
//! Staging turns a validated descriptor into an on-disk bundle tree:
//!
//! 1. The entry script is copied to the staging root
//! 2. Each module search path tree is copied alongside it, with package
//!    marker files (`__init__.py`) created in every staged directory
//! 3. Forced module includes are resolved against the search paths; names
//!    that do not resolve are recorded for the bundle manifest
//! 4. Data mappings (literal paths and glob patterns) are copied to their
//!    declared destinations
//! 5. The icon, when configured, is copied into the staging root

use crate::bail;
use crate::bundler::descriptor::Descriptor;
use crate::bundler::error::{Error, ErrorExt, Result};
use crate::bundler::utils::fs as fs_utils;
use std::path::{Path, PathBuf};

/// Marker file making a staged directory an importable package.
const PACKAGE_MARKER: &str = "__init__.py";

/// Result of staging a bundle tree.
#[derive(Debug)]
pub struct StagedBundle {
    /// Root of the staged tree.
    pub root: PathBuf,

    /// Entry script path relative to the root.
    pub entry: PathBuf,

    /// Names of the staged search-path directories, relative to the root.
    ///
    /// These go on the module search path at launch.
    pub search_path_names: Vec<String>,

    /// Forced module includes that did not resolve under any search path.
    ///
    /// Recorded in the bundle manifest for the runtime environment to
    /// provide (the forced-inclusion contract: presence guaranteed,
    /// detection not required).
    pub unresolved_modules: Vec<String>,

    /// Icon path relative to the root, when one was staged.
    pub icon: Option<PathBuf>,
}

/// Stages the bundle tree for `descriptor` under `staging_root`.
///
/// The staging root is erased first, so repeated builds never see stale
/// files.
pub async fn stage(descriptor: &Descriptor, staging_root: &Path) -> Result<StagedBundle> {
    fs_utils::create_dir_all(staging_root, true).await?;

    let entry = stage_entry(descriptor, staging_root).await?;
    let search_path_names = stage_search_paths(descriptor, staging_root).await?;
    let unresolved_modules = resolve_forced_modules(descriptor);
    stage_data(descriptor, staging_root).await?;
    let icon = stage_icon(descriptor, staging_root).await?;

    Ok(StagedBundle {
        root: staging_root.to_path_buf(),
        entry,
        search_path_names,
        unresolved_modules,
        icon,
    })
}

/// Copies the entry script into the staging root.
async fn stage_entry(descriptor: &Descriptor, root: &Path) -> Result<PathBuf> {
    let script = descriptor.entry_script();
    if !script.is_file() {
        return Err(Error::EntryScriptMissing(script));
    }

    let file_name = script
        .file_name()
        .ok_or_else(|| Error::GenericError(format!("entry script {script:?} has no file name")))?;
    let dest = root.join(file_name);
    fs_utils::copy_file(&script, &dest).await?;
    Ok(PathBuf::from(file_name))
}

/// Copies each search-path tree into the staging root and creates package
/// markers throughout.
async fn stage_search_paths(descriptor: &Descriptor, root: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();

    for source in descriptor.search_paths() {
        let Some(name) = source.file_name().and_then(|n| n.to_str()) else {
            bail!("search path {source:?} has no usable directory name");
        };
        let dest = root.join(name);
        fs_utils::copy_dir(&source, &dest).await?;
        create_package_markers(&dest).await?;
        names.push(name.to_string());
    }

    Ok(names)
}

/// Creates a `__init__.py` in every directory of the staged tree that lacks
/// one, so every staged directory is importable as a package.
async fn create_package_markers(tree: &Path) -> Result<()> {
    let tree = tree.to_path_buf();
    tokio::task::spawn_blocking(move || -> Result<()> {
        for entry in walkdir::WalkDir::new(&tree) {
            let entry = entry?;
            if !entry.file_type().is_dir() {
                continue;
            }
            let marker = entry.path().join(PACKAGE_MARKER);
            if !marker.exists() {
                std::fs::write(&marker, b"")
                    .fs_context("creating package marker", &marker)?;
            }
        }
        Ok(())
    })
    .await
    .map_err(|e| Error::GenericError(format!("Package marker task panicked: {}", e)))?
}

/// Resolves forced module includes against the search paths.
///
/// A dotted name resolves when a matching `.py` file or package directory
/// exists under any search path; whole trees are already staged, so
/// resolution is purely a membership check. Unresolved names are returned
/// for the manifest.
fn resolve_forced_modules(descriptor: &Descriptor) -> Vec<String> {
    let search_paths = descriptor.search_paths();
    descriptor
        .modules
        .include
        .iter()
        .filter(|name| {
            let rel: PathBuf = name.split('.').collect();
            !search_paths.iter().any(|sp| {
                sp.join(&rel).with_extension("py").is_file() || sp.join(&rel).is_dir()
            })
        })
        .cloned()
        .collect()
}

/// Copies data mappings into the staging root.
async fn stage_data(descriptor: &Descriptor, root: &Path) -> Result<()> {
    for mapping in &descriptor.data {
        let dest_dir = root.join(&mapping.dest);

        if mapping.is_glob() {
            let pattern = descriptor
                .resolve(Path::new(&mapping.source))
                .to_string_lossy()
                .into_owned();
            let mut matched = false;
            for entry in glob::glob(&pattern)? {
                let source = entry?;
                matched = true;
                copy_into(&source, &dest_dir).await?;
            }
            if !matched {
                bail!("data pattern {:?} matched no files", mapping.source);
            }
        } else {
            let source = descriptor.resolve(Path::new(&mapping.source));
            if source.is_dir() {
                // Literal directory: its tree becomes the destination
                fs_utils::copy_dir(&source, &dest_dir).await?;
            } else {
                copy_into(&source, &dest_dir).await?;
            }
        }
    }
    Ok(())
}

/// Copies a file or directory into `dest_dir`, keeping its base name.
async fn copy_into(source: &Path, dest_dir: &Path) -> Result<()> {
    let Some(name) = source.file_name() else {
        bail!("data source {source:?} has no usable file name");
    };
    let dest = dest_dir.join(name);
    if source.is_dir() {
        fs_utils::copy_dir(source, &dest).await
    } else {
        fs_utils::copy_file(source, &dest).await
    }
}

/// Copies the configured icon into the staging root.
async fn stage_icon(descriptor: &Descriptor, root: &Path) -> Result<Option<PathBuf>> {
    let Some(icon) = descriptor.icon_path() else {
        return Ok(None);
    };

    // Inspect before staging so a corrupt icon fails the build here
    let info = descriptor.icon_file()?;
    if let Some((w, h)) = info.dimensions {
        log::debug!("staging icon {} ({}x{})", icon.display(), w, h);
    }

    let Some(name) = icon.file_name() else {
        bail!("icon {icon:?} has no usable file name");
    };
    let dest = root.join(name);
    fs_utils::copy_file(&icon, &dest).await?;
    Ok(Some(PathBuf::from(name)))
}
