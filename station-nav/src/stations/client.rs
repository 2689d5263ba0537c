//! Station feed HTTP client.

use futures::future::BoxFuture;
use serde::{Deserialize, Deserializer, Serialize};

use super::error::StationError;
use super::StationSource;

/// Default station feed endpoint.
pub const DEFAULT_STATIONS_URL: &str = "https://maps.wahke.lu/api/get_stations.php";

/// Wire form of a station, exactly as the feed sends it.
///
/// Coordinates arrive as text and are parsed when converting to
/// [`crate::domain::Station`]. A coordinate or team that is a number,
/// `null` or missing is read as text (empty when absent), so one bad
/// record cannot fail the whole feed.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StationDto {
    pub id: String,
    pub u_nummer: String,
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub latitude: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub longitude: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub equipe: String,
}

/// Accept a string, a number or `null` where the feed should send text.
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// Configuration for the station feed client.
#[derive(Debug, Clone)]
pub struct StationClientConfig {
    /// Full URL of the station list endpoint
    pub url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl StationClientConfig {
    /// Create a config pointing at the default endpoint.
    pub fn new() -> Self {
        Self {
            url: DEFAULT_STATIONS_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom endpoint URL (for testing or mirrors).
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for StationClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the remote station feed.
#[derive(Debug, Clone)]
pub struct StationClient {
    http: reqwest::Client,
    url: String,
}

impl StationClient {
    /// Create a new station feed client.
    pub fn new(config: StationClientConfig) -> Result<Self, StationError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: config.url,
        })
    }

    /// Fetch every station in the feed.
    pub async fn fetch_all(&self) -> Result<Vec<StationDto>, StationError> {
        let response = self.http.get(&self.url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StationError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        parse_station_list(&body)
    }
}

impl StationSource for StationClient {
    fn fetch_all(&self) -> BoxFuture<'_, Result<Vec<StationDto>, StationError>> {
        Box::pin(StationClient::fetch_all(self))
    }
}

/// Parse the feed body. A JSON `null` body is an empty feed.
pub fn parse_station_list(body: &str) -> Result<Vec<StationDto>, StationError> {
    let stations: Option<Vec<StationDto>> =
        serde_json::from_str(body).map_err(|e| StationError::Json {
            message: e.to_string(),
        })?;

    Ok(stations.unwrap_or_default())
}
