//! # svg3d
//!
//! Converts SVG outlines into a validated outer contour with holes, the
//! input of a two-layer extrusion:
//! - a solid footprint of the outer contour over the full base depth,
//! - a top layer of `pocket_depth` where the holes become blind pockets.
//!
//! ## Architecture
//!
//! 1. **svg3d-core** - Geometry types, constants and errors
//! 2. **svg3d-contours** - Parsing, flattening, classification, response envelope
//! 3. **svg3d-settings** - Configuration files and validation
//! 4. **svg3d** - Command-line front end and logging setup

pub use svg3d_contours as contours;
pub use svg3d_settings as settings;

pub use svg3d_contours::{
    ContourGeometry, ContourImporter, ExtrusionLayer, ExtrusionPlan, ImportResponse,
};
pub use svg3d_core::{
    BBox, Contour, Error, ExtrusionParams, ImportError, ImportOptions, Point, Result,
    ValidationError, ValidationErrors,
};
pub use svg3d_settings::{Config, LoggingSettings};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date, `YYYY-MM-DD` (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Read and import a file from disk.
///
/// A missing file reports `MissingFile`; other read failures are I/O errors.
pub fn import_path(importer: &ContourImporter, path: &std::path::Path) -> Result<ContourGeometry> {
    match std::fs::read(path) {
        Ok(bytes) => importer.import_upload(Some(&bytes)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => importer.import_upload(None),
        Err(e) => Err(Error::from(e)),
    }
}

/// [`import_path`] wrapped in a response envelope.
pub fn import_file(importer: &ContourImporter, path: &std::path::Path) -> ImportResponse {
    ImportResponse::from_result(&import_path(importer, path))
}

/// Initialize logging from settings
///
/// Sets up structured logging with:
/// - Output on stderr, so stdout carries only the JSON response
/// - RUST_LOG environment variable support, falling back to the configured level
/// - Pretty or JSON lines formatting
pub fn init_logging(settings: &LoggingSettings) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(settings.level.to_lowercase()))?;

    if settings.json {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .json();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_thread_names(true)
            .with_line_number(true)
            .pretty();

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_import_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"<svg><rect width="100" height="50"/></svg>"#).unwrap();

        let response = import_file(&ContourImporter::default(), file.path());
        assert!(response.ok);
        assert_eq!(response.meta.unwrap().outer_area, 5000.0);
    }

    #[test]
    fn test_missing_file_maps_to_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let response = import_file(&ContourImporter::default(), &dir.path().join("absent.svg"));
        assert!(!response.ok);
        assert_eq!(response.errors, vec!["No file provided".to_string()]);
    }

    #[test]
    fn test_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = import_path(&ContourImporter::default(), dir.path()).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
        // YYYY-MM-DD
        assert_eq!(BUILD_DATE.len(), 10);
        assert_eq!(BUILD_DATE.as_bytes()[4], b'-');
        assert_eq!(BUILD_DATE.as_bytes()[7], b'-');
    }
}
