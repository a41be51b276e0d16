//! Structural validation of build descriptors.
//!
//! Checks the properties a descriptor must satisfy before bundling starts:
//! the entry script exists, every data source resolves to something, every
//! forced module name is an importable dotted identifier, the icon (when
//! configured) exists with a recognized extension, and no data destination
//! escapes the bundle root.
//!
//! Violations are collected and reported together rather than fail-fast, so
//! a descriptor author sees every problem in one run.

use crate::bundler::descriptor::Descriptor;
use crate::bundler::{Error, Result};
use std::path::Component;

/// Icon extensions accepted in `[output] icon`.
const ICON_EXTENSIONS: &[&str] = &["ico", "png", "icns"];

/// Collected validation problems for one descriptor.
///
/// Rendered one problem per line, bullet-prefixed, in the order the checks
/// ran.
#[derive(Debug, Default)]
pub struct ValidationReport {
    problems: Vec<String>,
}

impl ValidationReport {
    /// Records a problem.
    pub fn push(&mut self, problem: impl Into<String>) {
        self.problems.push(problem.into());
    }

    /// Whether any problem was recorded.
    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    /// The recorded problems, in check order.
    pub fn problems(&self) -> &[String] {
        &self.problems
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, problem) in self.problems.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  - {}", problem)?;
        }
        Ok(())
    }
}

/// Validates a descriptor, collecting every violation.
///
/// # Errors
///
/// Returns [`Error::ValidationFailed`] carrying the full report when any
/// check fails.
pub fn validate(descriptor: &Descriptor) -> Result<()> {
    let report = check(descriptor);
    if report.is_empty() {
        Ok(())
    } else {
        Err(Error::ValidationFailed(report))
    }
}

/// Runs all checks and returns the report without converting it to an error.
pub fn check(descriptor: &Descriptor) -> ValidationReport {
    let mut report = ValidationReport::default();

    check_names(descriptor, &mut report);
    check_version(descriptor, &mut report);
    check_entry(descriptor, &mut report);
    check_data(descriptor, &mut report);
    check_modules(descriptor, &mut report);
    check_icon(descriptor, &mut report);

    report
}

fn check_names(descriptor: &Descriptor, report: &mut ValidationReport) {
    if descriptor.package.name.trim().is_empty() {
        report.push("[package] name must not be empty");
    }
    if descriptor.output.name.trim().is_empty() {
        report.push("[output] name must not be empty");
    }
}

fn check_version(descriptor: &Descriptor, report: &mut ValidationReport) {
    if let Err(e) = descriptor.version() {
        report.push(format!(
            "[package] version {:?} is not valid semver: {}",
            descriptor.version_string(),
            e
        ));
    }
}

fn check_entry(descriptor: &Descriptor, report: &mut ValidationReport) {
    let script = descriptor.entry_script();
    if !script.is_file() {
        report.push(format!(
            "[entry] script {} does not exist or is not a file",
            script.display()
        ));
    }
    for path in descriptor.search_paths() {
        if !path.is_dir() {
            report.push(format!(
                "[entry] search path {} does not exist or is not a directory",
                path.display()
            ));
        }
    }
}

fn check_data(descriptor: &Descriptor, report: &mut ValidationReport) {
    for mapping in &descriptor.data {
        if mapping.is_glob() {
            let pattern = descriptor
                .resolve(std::path::Path::new(&mapping.source))
                .to_string_lossy()
                .into_owned();
            match glob::glob(&pattern) {
                Ok(matches) => {
                    if matches.filter_map(|m| m.ok()).next().is_none() {
                        report.push(format!(
                            "[[data]] pattern {:?} matches no files",
                            mapping.source
                        ));
                    }
                }
                Err(e) => {
                    report.push(format!("[[data]] pattern {:?} is invalid: {}", mapping.source, e));
                }
            }
        } else {
            let source = descriptor.resolve(std::path::Path::new(&mapping.source));
            if !source.exists() {
                report.push(format!(
                    "[[data]] source {} does not exist",
                    source.display()
                ));
            }
        }

        if mapping.dest.is_absolute() {
            report.push(format!(
                "[[data]] dest {} must be relative to the bundle root",
                mapping.dest.display()
            ));
        } else if mapping
            .dest
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            report.push(format!(
                "[[data]] dest {} must not traverse out of the bundle root",
                mapping.dest.display()
            ));
        }
    }
}

fn check_modules(descriptor: &Descriptor, report: &mut ValidationReport) {
    for name in &descriptor.modules.include {
        if !is_importable_name(name) {
            report.push(format!(
                "[modules] include entry {:?} is not a valid importable module name",
                name
            ));
        }
    }
}

fn check_icon(descriptor: &Descriptor, report: &mut ValidationReport) {
    let Some(icon) = descriptor.icon_path() else {
        return;
    };
    if !icon.is_file() {
        report.push(format!("[output] icon {} does not exist", icon.display()));
        return;
    }
    let recognized = icon
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| ICON_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false);
    if !recognized {
        report.push(format!(
            "[output] icon {} must be one of: {}",
            icon.display(),
            ICON_EXTENSIONS.join(", ")
        ));
    }
}

/// Whether `name` is a valid importable dotted module name.
///
/// Segments are ASCII identifiers (letters, digits, underscore, not
/// starting with a digit) separated by single dots.
pub fn is_importable_name(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    name.split('.').all(|segment| {
        let mut chars = segment.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
            _ => return false,
        }
        chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::descriptor::Descriptor;
    use std::path::PathBuf;

    fn descriptor_in(dir: &std::path::Path, raw: &str) -> Descriptor {
        Descriptor::from_toml_str(raw, dir.to_path_buf()).unwrap()
    }

    fn write_fixture_app(dir: &std::path::Path) {
        std::fs::create_dir_all(dir.join("src")).unwrap();
        std::fs::create_dir_all(dir.join("assets")).unwrap();
        std::fs::write(dir.join("src/main.py"), "print('hi')\n").unwrap();
        std::fs::write(dir.join("assets/icon.png"), b"\x89PNG").unwrap();
    }

    const VALID: &str = r#"
        [package]
        name = "demo"
        version = "0.1.0"

        [entry]
        script = "src/main.py"

        [[data]]
        source = "assets"
        dest = "assets"

        [modules]
        include = ["requests", "ui.components"]

        [output]
        name = "demo"
        icon = "assets/icon.png"
    "#;

    #[test]
    fn importable_names() {
        assert!(is_importable_name("requests"));
        assert!(is_importable_name("ui.components"));
        assert!(is_importable_name("_private.mod_2"));
        assert!(!is_importable_name(""));
        assert!(!is_importable_name("2fast"));
        assert!(!is_importable_name("a..b"));
        assert!(!is_importable_name("a.b-c"));
        assert!(!is_importable_name(".leading"));
    }

    #[test]
    fn valid_descriptor_passes() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture_app(dir.path());
        let d = descriptor_in(dir.path(), VALID);
        assert!(validate(&d).is_ok());
    }

    #[test]
    fn missing_entry_and_data_are_both_reported() {
        let dir = tempfile::tempdir().unwrap();
        // No files written: entry, search path, data source, icon all missing
        let d = descriptor_in(dir.path(), VALID);
        let report = check(&d);
        assert!(report.problems().len() >= 4, "report: {}", report);
        assert!(report.problems().iter().any(|p| p.contains("script")));
        assert!(report.problems().iter().any(|p| p.contains("source")));
    }

    #[test]
    fn parent_dir_traversal_in_dest_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture_app(dir.path());
        let raw = VALID.replace("dest = \"assets\"", "dest = \"../assets\"");
        let d = descriptor_in(dir.path(), &raw);
        let report = check(&d);
        assert!(report.problems().iter().any(|p| p.contains("traverse")));
    }

    #[test]
    fn invalid_module_name_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture_app(dir.path());
        let raw = VALID.replace("\"requests\"", "\"not a module\"");
        let d = descriptor_in(dir.path(), &raw);
        let report = check(&d);
        assert!(
            report
                .problems()
                .iter()
                .any(|p| p.contains("importable module name"))
        );
    }

    #[test]
    fn glob_pattern_matching_nothing_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture_app(dir.path());
        let raw = VALID.replace("source = \"assets\"", "source = \"assets/*.toml\"");
        let d = descriptor_in(dir.path(), &raw);
        let report = check(&d);
        assert!(report.problems().iter().any(|p| p.contains("matches no files")));
    }

    #[test]
    fn unrecognized_icon_extension_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        write_fixture_app(dir.path());
        std::fs::write(dir.path().join("assets/icon.svg"), b"<svg/>").unwrap();
        let raw = VALID.replace("assets/icon.png", "assets/icon.svg");
        let d = descriptor_in(dir.path(), &raw);
        let report = check(&d);
        assert!(report.problems().iter().any(|p| p.contains("must be one of")));
    }

    #[test]
    fn validation_error_displays_all_problems() {
        let d = Descriptor::from_toml_str(VALID, PathBuf::from("/nonexistent/base")).unwrap();
        let err = validate(&d).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("descriptor validation failed"));
        assert!(message.contains("  - "));
    }
}
