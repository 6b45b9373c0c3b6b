//! Catalog snapshots stored as JSON.
//!
//! The file holds a serialised [`Catalog`]: a `facilities` array plus
//! optional `products` and `variants`. Every facility is validated after
//! decoding so malformed radii or capacities never reach the engine.

use std::io::{BufReader, Read};

use camino::{Utf8Path, Utf8PathBuf};
use catchment_core::{Catalog, FacilityError};
use thiserror::Error;

/// Errors raised while loading a catalog snapshot.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    /// The file could not be opened.
    #[error("failed to open catalog at {path}")]
    Open {
        /// Catalog location.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The contents were not a valid catalog document.
    #[error("failed to parse catalog at {path}")]
    Parse {
        /// Catalog location.
        path: Utf8PathBuf,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },
    /// A facility failed validation.
    #[error("catalog at {path} contains an invalid facility")]
    Invalid {
        /// Catalog location.
        path: Utf8PathBuf,
        /// First violation found.
        #[source]
        source: FacilityError,
    },
}

/// Load and validate the catalog stored at `path`.
///
/// # Errors
/// Returns [`CatalogLoadError::Open`] when the file cannot be opened,
/// [`CatalogLoadError::Parse`] for malformed JSON and
/// [`CatalogLoadError::Invalid`] when a facility breaks its invariants.
///
/// # Examples
/// ```no_run
/// use camino::Utf8Path;
/// use catchment_data::load_catalog;
///
/// let catalog = load_catalog(Utf8Path::new("catalog.json"))?;
/// println!("{} facilities", catalog.facilities.len());
/// # Ok::<(), catchment_data::CatalogLoadError>(())
/// ```
pub fn load_catalog(path: &Utf8Path) -> Result<Catalog, CatalogLoadError> {
    let file = catchment_fs::open_utf8_file(path).map_err(|source| CatalogLoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = parse_catalog(path, BufReader::new(file))?;
    log::debug!(
        "loaded {} facilities and {} variants from {path}",
        catalog.facilities.len(),
        catalog.variants.len()
    );
    Ok(catalog)
}

/// Decode and validate a catalog from `reader`; `path` labels errors.
///
/// # Errors
/// See [`load_catalog`]; this never returns [`CatalogLoadError::Open`].
pub fn parse_catalog<R: Read>(path: &Utf8Path, reader: R) -> Result<Catalog, CatalogLoadError> {
    let catalog: Catalog =
        serde_json::from_reader(reader).map_err(|source| CatalogLoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    catalog
        .validate()
        .map_err(|source| CatalogLoadError::Invalid {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use catchment_core::test_support::seed_catalog;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    struct CatalogDir {
        _dir: TempDir,
        root: Utf8PathBuf,
    }

    #[fixture]
    fn catalog_dir() -> CatalogDir {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 tempdir");
        CatalogDir { _dir: dir, root }
    }

    #[rstest]
    fn loads_serialised_seed_catalog(catalog_dir: CatalogDir) {
        let path = catalog_dir.root.join("catalog.json");
        let json = serde_json::to_vec(&seed_catalog()).expect("serialise seed");
        catchment_fs::write_utf8_file(&path, &json).expect("write catalog");

        let catalog = load_catalog(&path).expect("catalog should load");
        assert_eq!(catalog, seed_catalog());
    }

    #[rstest]
    fn missing_file_reports_open_error(catalog_dir: CatalogDir) {
        let path = catalog_dir.root.join("absent.json");
        let err = load_catalog(&path).expect_err("file is missing");
        assert!(matches!(err, CatalogLoadError::Open { path: ref p, .. } if *p == path));
    }

    #[rstest]
    #[case::not_json("not json")]
    #[case::missing_facilities(r#"{"products": []}"#)]
    #[case::wrong_kind(
        r#"{"facilities": [{"id": "x", "name": "X", "kind": "shed",
            "coordinates": {"lat": 0.0, "lng": 0.0}, "radius_metres": 10.0,
            "is_active": true, "products": [], "capacity": 1, "current_load": 0}]}"#
    )]
    fn malformed_json_reports_parse_error(#[case] body: &str) {
        let err = parse_catalog(Utf8Path::new("inline.json"), body.as_bytes())
            .expect_err("payload is malformed");
        assert!(matches!(err, CatalogLoadError::Parse { .. }), "got {err:?}");
    }

    #[rstest]
    fn zero_capacity_reports_invalid_facility() {
        let body = r#"{"facilities": [{"id": "wh-zero", "name": "Zero", "kind": "warehouse",
            "coordinates": {"lat": 40.0, "lng": -74.0}, "radius_metres": 500.0,
            "is_active": true, "products": [], "capacity": 0, "current_load": 0}]}"#;
        let err = parse_catalog(Utf8Path::new("inline.json"), body.as_bytes())
            .expect_err("capacity must be positive");
        assert!(
            matches!(
                err,
                CatalogLoadError::Invalid {
                    source: FacilityError::ZeroCapacity { ref id },
                    ..
                } if id == "wh-zero"
            ),
            "got {err:?}"
        );
    }
}
