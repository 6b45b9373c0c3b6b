//! Test helpers: catalog workspaces and a geocoder builder that stays offline.

use std::cell::Cell;

use camino::{Utf8Path, Utf8PathBuf};
use catchment_core::test_support::{StubGeocoder, seed_catalog};
use catchment_core::{GeoPoint, GeocodeError, Geocoder};
use tempfile::TempDir;

use crate::CliError;
use crate::query::{GeocoderBuilder, QueryConfig};

/// A temporary directory holding (optionally) the seed catalog.
pub(super) struct CatalogWorkspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl CatalogWorkspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub(super) fn catalog_path(&self) -> Utf8PathBuf {
        self.root.join("catalog.json")
    }

    pub(super) fn write_seed_catalog(&self) -> Utf8PathBuf {
        let path = self.catalog_path();
        let payload = serde_json::to_vec_pretty(&seed_catalog()).expect("serialise catalog");
        write_utf8(&path, &payload);
        path
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    catchment_fs::write_utf8_file(path, contents).expect("write test file");
}

pub(super) fn read_json(path: &Utf8Path) -> serde_json::Value {
    let contents = std::fs::read_to_string(path.as_std_path()).expect("read output file");
    serde_json::from_str(&contents).expect("output should be JSON")
}

/// Builds [`StubGeocoder`]s answering with a fixed point or error.
pub(super) struct StubGeocoderBuilder {
    outcome: Result<GeoPoint, GeocodeError>,
    builds: Cell<usize>,
}

impl StubGeocoderBuilder {
    pub(super) const fn new(outcome: Result<GeoPoint, GeocodeError>) -> Self {
        Self {
            outcome,
            builds: Cell::new(0),
        }
    }

    pub(super) fn builds(&self) -> usize {
        self.builds.get()
    }
}

impl GeocoderBuilder for StubGeocoderBuilder {
    fn build(&self, _config: &QueryConfig) -> Result<Box<dyn Geocoder>, CliError> {
        self.builds.set(self.builds.get() + 1);
        let geocoder = match &self.outcome {
            Ok(point) => StubGeocoder::at(*point, "Stub match"),
            Err(error) => StubGeocoder::with_error(error.clone()),
        };
        Ok(Box::new(geocoder))
    }
}
