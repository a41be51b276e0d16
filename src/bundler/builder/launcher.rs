//! Launcher script rendering.
//!
//! Every bundle ships a generated launcher at its root that puts the staged
//! module trees on the interpreter search path and starts the entry script.
//! Unix targets get a POSIX shell launcher; Windows targets get a batch
//! launcher that honors the descriptor's console-visibility setting by
//! starting the windowed interpreter detached from the console.

use super::{TargetOs, staging::StagedBundle};
use crate::bundler::descriptor::Descriptor;
use crate::bundler::error::{ErrorExt, Result};
use handlebars::Handlebars;
use serde_json::json;
use std::path::{Path, PathBuf};

/// POSIX shell launcher.
const UNIX_TEMPLATE: &str = r#"#!/bin/sh
# {{name}} launcher - generated by scriptpack
{{#if debug}}set -x
{{/if}}BUNDLE_DIR="$(cd "$(dirname "$0")" && pwd)"
PYTHONPATH="$BUNDLE_DIR{{#each search_paths}}:$BUNDLE_DIR/{{this}}{{/each}}${PYTHONPATH:+:$PYTHONPATH}"
export PYTHONPATH
exec {{interpreter}}{{#if debug}} -v{{/if}} "$BUNDLE_DIR/{{entry}}" "$@"
"#;

/// Windows batch launcher.
const WINDOWS_TEMPLATE: &str = r#"@echo off
rem {{name}} launcher - generated by scriptpack
set "BUNDLE_DIR=%~dp0"
set "PYTHONPATH=%BUNDLE_DIR%{{#each search_paths}};%BUNDLE_DIR%{{this}}{{/each}}"
{{#if console}}{{interpreter}}{{#if debug}} -v{{/if}} "%BUNDLE_DIR%{{entry}}" %*
{{else}}start "" {{interpreter}}{{#if debug}} -v{{/if}} "%BUNDLE_DIR%{{entry}}" %*
{{/if}}"#;

/// Returns the launcher file name for a target.
///
/// Unix launchers carry the bare output name; Windows launchers get a
/// `.bat` extension.
pub fn file_name(descriptor: &Descriptor, target_os: TargetOs) -> String {
    match target_os {
        TargetOs::Windows => format!("{}.bat", descriptor.output.name),
        TargetOs::MacOs | TargetOs::Linux => descriptor.output.name.clone(),
    }
}

/// Renders the launcher script content for a target.
pub fn render(
    descriptor: &Descriptor,
    staged: &StagedBundle,
    target_os: TargetOs,
) -> Result<String> {
    let (template, interpreter) = match target_os {
        TargetOs::Windows => {
            let interpreter = if descriptor.output.console {
                "python"
            } else {
                "pythonw"
            };
            (WINDOWS_TEMPLATE, interpreter)
        }
        TargetOs::MacOs | TargetOs::Linux => (UNIX_TEMPLATE, "python3"),
    };

    let mut handlebars = Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars
        .register_template_string("launcher", template)
        .map_err(Box::new)?;

    let rendered = handlebars.render(
        "launcher",
        &json!({
            "name": descriptor.product_name(),
            "entry": staged.entry.to_string_lossy(),
            "search_paths": staged.search_path_names,
            "interpreter": interpreter,
            "console": descriptor.output.console,
            "debug": descriptor.output.debug,
        }),
    )?;

    Ok(rendered)
}

/// Renders the launcher and writes it into the staged bundle root.
///
/// Unix launchers are made executable.
pub async fn write(
    descriptor: &Descriptor,
    staged: &StagedBundle,
    target_os: TargetOs,
) -> Result<PathBuf> {
    let content = render(descriptor, staged, target_os)?;
    let path = staged.root.join(file_name(descriptor, target_os));
    tokio::fs::write(&path, content)
        .await
        .fs_context("writing launcher", &path)?;

    if target_os != TargetOs::Windows {
        set_executable(&path).await?;
    }

    Ok(path)
}

#[cfg(unix)]
async fn set_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = tokio::fs::metadata(path)
        .await
        .fs_context("reading launcher metadata", path)?
        .permissions();
    perms.set_mode(0o755);
    tokio::fs::set_permissions(path, perms)
        .await
        .fs_context("marking launcher executable", path)
}

#[cfg(not(unix))]
async fn set_executable(_path: &Path) -> Result<()> {
    Ok(())
}
