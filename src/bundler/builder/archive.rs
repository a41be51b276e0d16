//! Payload archive creation.
//!
//! The staged bundle tree is packed into a single payload archive: ZIP for
//! Windows targets, tar.gz for unix targets. Archive members are added in
//! sorted path order so repeated builds of the same tree produce identical
//! archives and checksums. The descriptor's `compress` toggle switches
//! between real compression and plain storage without changing the
//! container format.

use super::TargetOs;
use crate::bundler::error::{Error, ErrorExt, Result};
use flate2::{Compression, write::GzEncoder};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Payload container format.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PayloadFormat {
    /// Gzipped tarball - unix targets
    TarGz,
    /// ZIP archive - Windows targets
    Zip,
}

impl PayloadFormat {
    /// Selects the payload format for a target OS family.
    pub fn for_target(target_os: TargetOs) -> Self {
        match target_os {
            TargetOs::Windows => PayloadFormat::Zip,
            TargetOs::MacOs | TargetOs::Linux => PayloadFormat::TarGz,
        }
    }

    /// Archive file extension (no leading dot).
    pub fn extension(&self) -> &'static str {
        match self {
            PayloadFormat::TarGz => "tar.gz",
            PayloadFormat::Zip => "zip",
        }
    }
}

/// Packs the staged tree at `root` into an archive at `dest`.
///
/// Members are stored under a top-level directory named after the archive
/// stem, so unpacking never scatters files into the current directory.
pub async fn create_payload(
    root: &Path,
    dest: &Path,
    format: PayloadFormat,
    compress: bool,
) -> Result<()> {
    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .fs_context("creating archive directory", parent)?;
    }

    let root = root.to_path_buf();
    let dest = dest.to_path_buf();

    // Archive writing is synchronous; run it off the async runtime
    tokio::task::spawn_blocking(move || match format {
        PayloadFormat::TarGz => write_tar_gz(&root, &dest, compress),
        PayloadFormat::Zip => write_zip(&root, &dest, compress),
    })
    .await
    .map_err(|e| Error::GenericError(format!("Archive task panicked: {}", e)))?
}

/// Collects the files and directories under `root`, sorted by path.
fn sorted_entries(root: &Path) -> Result<Vec<walkdir::DirEntry>> {
    let mut entries: Vec<_> = walkdir::WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .into_iter()
        .collect::<std::result::Result<_, _>>()?;
    entries.sort_by_key(|e| e.path().to_path_buf());
    Ok(entries)
}

/// Top-level directory name archive members are placed under.
fn member_prefix(dest: &Path) -> PathBuf {
    let stem = dest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "bundle".to_string());
    // Strip the full ".tar.gz" / ".zip" suffix, not just the last extension
    let stem = stem
        .trim_end_matches(".tar.gz")
        .trim_end_matches(".zip")
        .to_string();
    PathBuf::from(stem)
}

fn write_tar_gz(root: &Path, dest: &Path, compress: bool) -> Result<()> {
    let file = File::create(dest).fs_context("creating archive", dest)?;
    let level = if compress {
        Compression::default()
    } else {
        Compression::none()
    };
    let encoder = GzEncoder::new(BufWriter::new(file), level);
    let mut builder = tar::Builder::new(encoder);
    builder.follow_symlinks(false);

    let prefix = member_prefix(dest);
    for entry in sorted_entries(root)? {
        let rel = entry.path().strip_prefix(root)?;
        let member = prefix.join(rel);
        if entry.file_type().is_dir() {
            builder.append_dir(&member, entry.path())?;
        } else {
            builder.append_path_with_name(entry.path(), &member)?;
        }
    }

    let encoder = builder.into_inner()?;
    encoder.finish()?.flush()?;
    Ok(())
}

fn write_zip(root: &Path, dest: &Path, compress: bool) -> Result<()> {
    use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

    let file = File::create(dest).fs_context("creating archive", dest)?;
    let mut writer = ZipWriter::new(BufWriter::new(file));
    let method = if compress {
        CompressionMethod::Deflated
    } else {
        CompressionMethod::Stored
    };
    let options = SimpleFileOptions::default().compression_method(method);

    let prefix = member_prefix(dest);
    for entry in sorted_entries(root)? {
        let rel = entry.path().strip_prefix(root)?;
        let member = prefix.join(rel).to_string_lossy().replace('\\', "/");
        if entry.file_type().is_dir() {
            writer.add_directory(member, options)?;
        } else {
            writer.start_file(member, options)?;
            let mut reader =
                File::open(entry.path()).fs_context("reading archive member", entry.path())?;
            std::io::copy(&mut reader, &mut writer)
                .fs_context("writing archive member", entry.path())?;
        }
    }

    writer.finish()?.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_tree(root: &Path) {
        std::fs::create_dir_all(root.join("src")).unwrap();
        std::fs::write(root.join("main.py"), "print('hi')\n").unwrap();
        std::fs::write(root.join("src/mod.py"), "X = 1\n").unwrap();
    }

    #[test]
    fn format_per_target() {
        assert_eq!(PayloadFormat::for_target(TargetOs::Windows), PayloadFormat::Zip);
        assert_eq!(PayloadFormat::for_target(TargetOs::Linux), PayloadFormat::TarGz);
        assert_eq!(PayloadFormat::for_target(TargetOs::MacOs), PayloadFormat::TarGz);
    }

    #[tokio::test]
    async fn tar_payload_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("stage");
        write_tree(&root);

        let dest = dir.path().join("demo_0.1.0_x86_64.tar.gz");
        create_payload(&root, &dest, PayloadFormat::TarGz, true)
            .await
            .unwrap();

        let file = File::open(&dest).unwrap();
        let mut archive = tar::Archive::new(flate2::read::GzDecoder::new(file));
        let names: Vec<String> = archive
            .entries()
            .unwrap()
            .map(|e| e.unwrap().path().unwrap().to_string_lossy().into_owned())
            .collect();
        assert!(names.contains(&"demo_0.1.0_x86_64/main.py".to_string()));
        assert!(names.contains(&"demo_0.1.0_x86_64/src/mod.py".to_string()));
    }

    #[tokio::test]
    async fn zip_payload_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("stage");
        write_tree(&root);

        let dest = dir.path().join("demo_0.1.0_x86_64.zip");
        create_payload(&root, &dest, PayloadFormat::Zip, false)
            .await
            .unwrap();

        let mut archive = zip::ZipArchive::new(File::open(&dest).unwrap()).unwrap();
        assert!(archive.by_name("demo_0.1.0_x86_64/main.py").is_ok());
        assert!(archive.by_name("demo_0.1.0_x86_64/src/mod.py").is_ok());
    }

    #[tokio::test]
    async fn repeated_builds_are_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("stage");
        write_tree(&root);

        let first = dir.path().join("one").join("demo.tar.gz");
        let second = dir.path().join("two").join("demo.tar.gz");
        create_payload(&root, &first, PayloadFormat::TarGz, true)
            .await
            .unwrap();
        create_payload(&root, &second, PayloadFormat::TarGz, true)
            .await
            .unwrap();

        assert_eq!(
            std::fs::read(&first).unwrap(),
            std::fs::read(&second).unwrap()
        );
    }
}
