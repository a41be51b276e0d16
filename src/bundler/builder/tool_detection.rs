//! Interpreter detection and availability checking.
//!
//! The bundler does not require an interpreter to build a bundle, but when
//! one is available it byte-compiles the staged entry script as a launch
//! smoke check. Detection runs once and is cached.

use std::path::PathBuf;
use std::sync::LazyLock;

/// Interpreter binaries probed in order.
const CANDIDATES: &[&str] = &["python3", "python"];

/// The detected interpreter, if any.
///
/// Cached result to avoid repeated subprocess calls during bundling.
pub static INTERPRETER: LazyLock<Option<PathBuf>> = LazyLock::new(|| {
    for candidate in CANDIDATES {
        match which::which(candidate) {
            Ok(path) => {
                log::debug!("Found {} at: {}", candidate, path.display());

                match std::process::Command::new(&path).arg("--version").output() {
                    Ok(output) if output.status.success() => {
                        let version = String::from_utf8_lossy(&output.stdout);
                        let version = if version.trim().is_empty() {
                            // Old interpreters print the version on stderr
                            String::from_utf8_lossy(&output.stderr).trim().to_string()
                        } else {
                            version.trim().to_string()
                        };
                        log::info!("✓ interpreter available: {}", version);
                        return Some(path);
                    }
                    Ok(output) => {
                        log::warn!(
                            "{} found at {} but --version check failed (exit code: {:?}). \
                                 Launch smoke check will be skipped. \
                                 Stderr: {}",
                            candidate,
                            path.display(),
                            output.status.code(),
                            String::from_utf8_lossy(&output.stderr)
                        );
                    }
                    Err(e) => {
                        log::warn!(
                            "{} found at {} but failed to execute: {}. \
                                 Launch smoke check will be skipped. \
                                 Check file permissions.",
                            candidate,
                            path.display(),
                            e
                        );
                    }
                }
            }
            Err(e) => {
                log::debug!("{} not found in PATH: {}", candidate, e);
            }
        }
    }

    log::debug!("No interpreter available - launch smoke check will be skipped");
    None
});
