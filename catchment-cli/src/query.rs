//! Shared implementation of the `coverage` and `simulate` subcommands.

use std::io::Write;
use std::num::NonZeroU32;

use camino::{Utf8Path, Utf8PathBuf};
use catchment_core::{
    Catalog, GeoPoint, Geocoder, OrderType, SimulationEngine, SimulationRequest, resolve_address,
};
use catchment_data::{DEFAULT_BASE_URL, NominatimGeocoder, load_catalog};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_ADDRESS, ARG_CATALOG, ARG_GEOCODER_URL, ARG_LAT, ARG_LNG, ARG_ORDER_TYPE, ARG_OUTPUT,
    ARG_PRODUCT, ARG_QUANTITY, ARG_VARIANT, CliError, ENV_CATALOG, ENV_LAT, ENV_LNG,
};

/// Which result a query prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum QueryKind {
    /// Every facility's coverage, in catalog order.
    Coverage,
    /// The ranked simulation result.
    Simulate,
}

/// CLI arguments shared by the `coverage` and `simulate` subcommands.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "query",
    long_about = "Locate a delivery by coordinates or by geocoding a free-text \
                 address, then evaluate it against a JSON catalog of \
                 facilities. Options can come from CLI flags, configuration \
                 files, or environment variables.",
    about = "Evaluate a delivery location against a facility catalog"
)]
#[ortho_config(prefix = "CATCHMENT")]
pub(crate) struct QueryArgs {
    /// Path to a JSON catalog of facilities, products and variants.
    #[arg(long = ARG_CATALOG, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog: Option<Utf8PathBuf>,
    /// Delivery latitude in decimal degrees.
    #[arg(long = ARG_LAT, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lat: Option<f64>,
    /// Delivery longitude in decimal degrees.
    #[arg(long = ARG_LNG, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lng: Option<f64>,
    /// Free-text delivery address to geocode instead of coordinates.
    #[arg(long = ARG_ADDRESS, value_name = "text")]
    #[serde(default)]
    pub(crate) address: Option<String>,
    /// Product name to require; `any` disables the filter.
    #[arg(long = ARG_PRODUCT, value_name = "name")]
    #[serde(default)]
    pub(crate) product: Option<String>,
    /// Catalog variant identifier to require.
    #[arg(long = ARG_VARIANT, value_name = "id")]
    #[serde(default)]
    pub(crate) variant: Option<String>,
    /// One of `standard`, `express`, `same-day` or `scheduled`.
    #[arg(long = ARG_ORDER_TYPE, value_name = "type")]
    #[serde(default)]
    pub(crate) order_type: Option<String>,
    /// Units ordered (default 1).
    #[arg(long = ARG_QUANTITY, value_name = "count")]
    #[serde(default)]
    pub(crate) quantity: Option<u32>,
    /// Base URL of a Nominatim-compatible geocoder.
    #[arg(long = ARG_GEOCODER_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) geocoder_url: Option<String>,
    /// Write the JSON result here instead of stdout.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl QueryArgs {
    pub(crate) fn into_config(self) -> Result<QueryConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        QueryConfig::try_from(merged)
    }
}

/// Where the delivery goes.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Location {
    /// Validated coordinates.
    Point(GeoPoint),
    /// Trimmed, non-empty address awaiting geocoding.
    Address(String),
}

impl Location {
    fn from_parts(
        latitude: Option<f64>,
        longitude: Option<f64>,
        address: Option<String>,
    ) -> Result<Self, CliError> {
        let trimmed = address
            .map(|raw| raw.trim().to_owned())
            .filter(|text| !text.is_empty());
        match (latitude, longitude, trimmed) {
            (None, None, None) => Err(CliError::MissingLocation),
            (None, None, Some(text)) => Ok(Self::Address(text)),
            (Some(_), _, Some(_)) | (_, Some(_), Some(_)) => Err(CliError::AmbiguousLocation),
            (Some(_), None, None) => Err(CliError::MissingArgument {
                field: ARG_LNG,
                env: ENV_LNG,
            }),
            (None, Some(_), None) => Err(CliError::MissingArgument {
                field: ARG_LAT,
                env: ENV_LAT,
            }),
            (Some(lat), Some(lng), None) => {
                let point = GeoPoint::new(lat, lng);
                point.validate().map_err(CliError::InvalidCoordinates)?;
                Ok(Self::Point(point))
            }
        }
    }
}

/// Resolved query configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct QueryConfig {
    /// Path to the JSON catalog.
    pub(crate) catalog: Utf8PathBuf,
    /// Delivery location.
    pub(crate) location: Location,
    /// Required product, if any.
    pub(crate) product: Option<String>,
    /// Required variant identifier, if any.
    pub(crate) variant: Option<String>,
    /// Requested order type.
    pub(crate) order_type: OrderType,
    /// Units ordered.
    pub(crate) quantity: NonZeroU32,
    /// Geocoder service root.
    pub(crate) geocoder_url: String,
    /// Result file; stdout when absent.
    pub(crate) output: Option<Utf8PathBuf>,
}

impl QueryConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.catalog, ARG_CATALOG)
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match catchment_fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<QueryArgs> for QueryConfig {
    type Error = CliError;

    fn try_from(args: QueryArgs) -> Result<Self, Self::Error> {
        let catalog = args.catalog.ok_or(CliError::MissingArgument {
            field: ARG_CATALOG,
            env: ENV_CATALOG,
        })?;
        let location = Location::from_parts(args.lat, args.lng, args.address)?;
        let order_type = args
            .order_type
            .map_or(Ok(OrderType::Standard), |value| {
                value
                    .parse()
                    .map_err(|message| CliError::InvalidOrderType { value, message })
            })?;
        let quantity = args.quantity.map_or(Ok(NonZeroU32::MIN), |count| {
            NonZeroU32::new(count).ok_or(CliError::ZeroQuantity)
        })?;
        let geocoder_url = args
            .geocoder_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());

        Ok(Self {
            catalog,
            location,
            product: args.product,
            variant: args.variant,
            order_type,
            quantity,
            geocoder_url,
            output: args.output,
        })
    }
}

/// Builds the geocoder used to resolve address queries.
pub(crate) trait GeocoderBuilder {
    fn build(&self, config: &QueryConfig) -> Result<Box<dyn Geocoder>, CliError>;
}

pub(crate) struct NominatimGeocoderBuilder;

impl GeocoderBuilder for NominatimGeocoderBuilder {
    fn build(&self, config: &QueryConfig) -> Result<Box<dyn Geocoder>, CliError> {
        let geocoder = NominatimGeocoder::new(config.geocoder_url.clone()).map_err(|source| {
            CliError::BuildGeocoder {
                base_url: config.geocoder_url.clone(),
                source,
            }
        })?;
        Ok(Box::new(geocoder))
    }
}

pub(crate) fn run_query(kind: QueryKind, args: QueryArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_query_with(kind, args, &NominatimGeocoderBuilder, &mut stdout)
}

pub(crate) fn run_query_with(
    kind: QueryKind,
    args: QueryArgs,
    builder: &dyn GeocoderBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    execute_query(kind, &config, builder, writer)
}

pub(crate) fn execute_query(
    kind: QueryKind,
    config: &QueryConfig,
    builder: &dyn GeocoderBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let catalog = load_catalog(&config.catalog)?;
    let request = build_request(config, &catalog, builder)?;
    let engine = SimulationEngine::new();
    let payload = match kind {
        QueryKind::Coverage => serde_json::to_string_pretty(&engine.analyze_coverage(
            request.point,
            &request,
            &catalog.facilities,
        )),
        QueryKind::Simulate => {
            serde_json::to_string_pretty(&engine.simulate(&request, &catalog.facilities))
        }
    }
    .map_err(CliError::SerialiseOutput)?;
    write_payload(writer, config.output.as_deref(), &payload)
}

fn build_request(
    config: &QueryConfig,
    catalog: &Catalog,
    builder: &dyn GeocoderBuilder,
) -> Result<SimulationRequest, CliError> {
    let point = locate(config, builder)?;
    let mut request =
        SimulationRequest::new(point, config.order_type).with_quantity(config.quantity);
    if let Some(product) = &config.product {
        request = request.with_product(product.clone());
    }
    if let Some(id) = &config.variant {
        let variant = catalog
            .variant(id)
            .cloned()
            .ok_or_else(|| CliError::UnknownVariant { id: id.clone() })?;
        if request.product.is_none() {
            request = request.with_product(variant.product.clone());
        }
        request = request.with_variant(variant);
    }
    Ok(request)
}

fn locate(config: &QueryConfig, builder: &dyn GeocoderBuilder) -> Result<GeoPoint, CliError> {
    match &config.location {
        Location::Point(point) => Ok(*point),
        Location::Address(address) => {
            let geocoder = builder.build(config)?;
            resolve_address(&*geocoder, address)
                .map(|candidate| candidate.point)
                .map_err(|source| CliError::Geocode {
                    address: address.clone(),
                    source,
                })
        }
    }
}

fn write_payload(
    writer: &mut dyn Write,
    output: Option<&Utf8Path>,
    payload: &str,
) -> Result<(), CliError> {
    if let Some(path) = output {
        let contents = format!("{payload}\n");
        return catchment_fs::write_utf8_file(path, contents.as_bytes()).map_err(|source| {
            CliError::WriteOutputFile {
                path: path.to_path_buf(),
                source,
            }
        });
    }
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}
