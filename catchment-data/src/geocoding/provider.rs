//! Blocking [`Geocoder`] backed by an asynchronous HTTP client.

use std::num::NonZeroU8;
use std::time::Duration;

use catchment_core::{GeocodeCandidate, GeocodeError, Geocoder};
use reqwest::Client;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use url::Url;

use super::nominatim::SearchResult;

/// Error type for [`NominatimGeocoder`] construction failures.
#[derive(Debug)]
pub enum ProviderBuildError {
    /// The base URL could not be used to build search requests.
    InvalidBaseUrl {
        /// URL as supplied.
        url: String,
        /// Why it was rejected.
        message: String,
    },
    /// Failed to build the HTTP client.
    HttpClient(reqwest::Error),
    /// Failed to build the Tokio runtime.
    Runtime(std::io::Error),
}

impl std::fmt::Display for ProviderBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBaseUrl { url, message } => {
                write!(f, "invalid geocoder base URL '{url}': {message}")
            }
            Self::HttpClient(err) => write!(f, "failed to build HTTP client: {err}"),
            Self::Runtime(err) => write!(f, "failed to build Tokio runtime: {err}"),
        }
    }
}

impl std::error::Error for ProviderBuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidBaseUrl { .. } => None,
            Self::HttpClient(err) => Some(err),
            Self::Runtime(err) => Some(err),
        }
    }
}

/// Public Nominatim instance operated by the OpenStreetMap Foundation.
pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// Default user agent for search requests.
///
/// The public instance rejects requests without an identifying agent.
pub const DEFAULT_USER_AGENT: &str = "catchment-geocoder/0.1";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

const DEFAULT_LIMIT: NonZeroU8 = match NonZeroU8::new(5) {
    Some(limit) => limit,
    None => NonZeroU8::MIN,
};

/// Configuration for [`NominatimGeocoder`].
#[derive(Debug, Clone)]
pub struct NominatimGeocoderConfig {
    /// Service root, e.g. `"https://nominatim.openstreetmap.org"`.
    pub base_url: String,
    /// Connect and request timeout.
    pub timeout: Duration,
    /// User agent sent with every request.
    pub user_agent: String,
    /// Maximum candidates requested per address.
    pub limit: NonZeroU8,
}

impl Default for NominatimGeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            limit: DEFAULT_LIMIT,
        }
    }
}

impl NominatimGeocoderConfig {
    /// Create a configuration pointing at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the maximum number of candidates requested.
    #[must_use]
    pub const fn with_limit(mut self, limit: NonZeroU8) -> Self {
        self.limit = limit;
        self
    }
}

/// Geocoder querying a Nominatim `/search` endpoint.
///
/// The provider owns a current-thread Tokio runtime reused across calls.
/// Called from inside a multi-threaded runtime it borrows that runtime via
/// [`tokio::task::block_in_place`]. Inside a `current_thread` runtime the
/// request runs on a scoped worker thread driving the owned runtime, so the
/// caller's thread is blocked until it finishes. Outside any runtime it
/// blocks on the owned runtime directly.
///
/// Dropping the provider shuts the owned runtime down in the background, so
/// it may be dropped from async code.
pub struct NominatimGeocoder {
    client: Client,
    config: NominatimGeocoderConfig,
    base_url: Url,
    // Always `Some` until dropped.
    runtime: Option<Runtime>,
}

impl std::fmt::Debug for NominatimGeocoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NominatimGeocoder")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish_non_exhaustive()
    }
}

impl NominatimGeocoder {
    /// Create a geocoder for `base_url` with default settings.
    ///
    /// # Errors
    /// Returns an error if the URL is unusable or the HTTP client or Tokio
    /// runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(NominatimGeocoderConfig::new(base_url))
    }

    /// Create a geocoder with explicit configuration.
    ///
    /// # Errors
    /// Returns an error if the URL is unusable or the HTTP client or Tokio
    /// runtime fails to build.
    pub fn with_config(config: NominatimGeocoderConfig) -> Result<Self, ProviderBuildError> {
        let base_url = parse_base_url(&config.base_url)?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            base_url,
            runtime: Some(runtime),
        })
    }

    /// The configuration this geocoder was built with.
    #[must_use]
    pub const fn config(&self) -> &NominatimGeocoderConfig {
        &self.config
    }

    /// Build `{base}/search?format=json&limit={limit}&q={address}`.
    fn search_url(&self, address: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("search");
        }
        url.query_pairs_mut()
            .clear()
            .append_pair("format", "json")
            .append_pair("limit", &self.config.limit.to_string())
            .append_pair("q", address);
        url
    }

    /// Search for `address` asynchronously.
    ///
    /// # Errors
    /// Returns a transport [`GeocodeError`] when the request fails or the
    /// body cannot be decoded, and [`GeocodeError::InvalidCoordinates`] when
    /// a candidate lies outside the valid range.
    pub async fn search_async(
        &self,
        address: &str,
    ) -> Result<Vec<GeocodeCandidate>, GeocodeError> {
        let url = self.search_url(address);
        log::debug!("geocoding '{address}' via {}", self.base_url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;

        let results: Vec<SearchResult> =
            response.json().await.map_err(|err| GeocodeError::Parse {
                message: err.to_string(),
            })?;

        results
            .into_iter()
            .map(SearchResult::into_candidate)
            .collect()
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &Url) -> GeocodeError {
        if error.is_timeout() {
            return GeocodeError::Timeout {
                url: url.to_string(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return GeocodeError::Http {
                url: url.to_string(),
                status: status.as_u16(),
                message: error.to_string(),
            };
        }

        GeocodeError::Network {
            url: url.to_string(),
            message: error.to_string(),
        }
    }

    fn block_on_owned(
        &self,
        runtime: &Runtime,
        address: &str,
    ) -> Result<Vec<GeocodeCandidate>, GeocodeError> {
        runtime.block_on(self.search_async(address))
    }

    /// Run the request on a scoped thread outside the caller's runtime.
    fn block_on_worker(
        &self,
        runtime: &Runtime,
        address: &str,
    ) -> Result<Vec<GeocodeCandidate>, GeocodeError> {
        std::thread::scope(|scope| {
            scope
                .spawn(|| self.block_on_owned(runtime, address))
                .join()
                .unwrap_or_else(|_| {
                    Err(GeocodeError::Network {
                        url: self.base_url.to_string(),
                        message: "geocoder worker thread panicked".to_owned(),
                    })
                })
        })
    }

    fn owned_runtime(&self) -> Result<&Runtime, GeocodeError> {
        self.runtime.as_ref().ok_or_else(|| GeocodeError::Network {
            url: self.base_url.to_string(),
            message: "geocoder runtime has been shut down".to_owned(),
        })
    }
}

impl Drop for NominatimGeocoder {
    fn drop(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

impl Geocoder for NominatimGeocoder {
    /// Search for `address`, blocking the calling thread.
    ///
    /// Works outside any runtime and inside both multi-threaded and
    /// `current_thread` Tokio runtimes.
    fn geocode(&self, address: &str) -> Result<Vec<GeocodeCandidate>, GeocodeError> {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(self.search_async(address)))
            }
            Ok(_) => self.block_on_worker(self.owned_runtime()?, address),
            Err(_) => self.block_on_owned(self.owned_runtime()?, address),
        }
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ProviderBuildError> {
    let invalid = |message: String| ProviderBuildError::InvalidBaseUrl {
        url: raw.to_owned(),
        message,
    };
    let url = Url::parse(raw).map_err(|err| invalid(err.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(invalid("URL cannot carry a path".to_owned()));
    }
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    Ok(url)
}
