//! Icon loading and inspection.
//!
//! The descriptor's `[output] icon` is validated and inspected before it is
//! staged into the bundle. PNG icons are decoded for their dimensions;
//! container formats (.ico, .icns) are accepted by extension without
//! decoding, since the packaging targets consume them as-is.

use crate::bundler::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Icon container format.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IconFormat {
    /// Portable Network Graphics - dimensions are decoded
    Png,
    /// Windows icon container
    Ico,
    /// macOS icon container
    Icns,
}

impl IconFormat {
    fn from_path(path: &Path) -> Option<Self> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("png") => Some(IconFormat::Png),
            Some("ico") => Some(IconFormat::Ico),
            Some("icns") => Some(IconFormat::Icns),
            _ => None,
        }
    }
}

/// Metadata about a loaded icon file.
#[derive(Clone, Debug)]
pub struct IconInfo {
    /// Path the icon was loaded from.
    pub path: PathBuf,
    /// Container format.
    pub format: IconFormat,
    /// Pixel dimensions (width, height), when the format is decoded.
    pub dimensions: Option<(u32, u32)>,
}

/// Loads icon metadata from a path.
///
/// # Errors
///
/// Returns an error if the file does not exist, carries an unrecognized
/// extension, or a PNG fails to decode.
pub fn load_icon(path: &Path) -> Result<IconInfo> {
    if !path.is_file() {
        return Err(Error::GenericError(format!(
            "icon {} does not exist",
            path.display()
        )));
    }

    let format = IconFormat::from_path(path).ok_or_else(|| {
        Error::GenericError(format!(
            "icon {} has an unrecognized extension (expected .png, .ico, or .icns)",
            path.display()
        ))
    })?;

    let dimensions = match format {
        IconFormat::Png => Some(image::image_dimensions(path)?),
        IconFormat::Ico | IconFormat::Icns => None,
    };

    Ok(IconInfo {
        path: path.to_path_buf(),
        format,
        dimensions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_icon_reports_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icon.png");
        image::RgbaImage::new(32, 32).save(&path).unwrap();

        let info = load_icon(&path).unwrap();
        assert_eq!(info.format, IconFormat::Png);
        assert_eq!(info.dimensions, Some((32, 32)));
    }

    #[test]
    fn ico_icon_is_accepted_without_decoding() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icon.ico");
        std::fs::write(&path, b"\x00\x00\x01\x00").unwrap();

        let info = load_icon(&path).unwrap();
        assert_eq!(info.format, IconFormat::Ico);
        assert_eq!(info.dimensions, None);
    }

    #[test]
    fn missing_icon_is_an_error() {
        assert!(load_icon(Path::new("/nonexistent/icon.png")).is_err());
    }

    #[test]
    fn unrecognized_extension_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icon.svg");
        std::fs::write(&path, b"<svg/>").unwrap();
        assert!(load_icon(&path).is_err());
    }
}
