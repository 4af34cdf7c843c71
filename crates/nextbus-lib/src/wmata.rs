//! Thin HTTP client for the WMATA bus API.
//!
//! The client is bound to one base URL and one API key. Requests carry a
//! fixed header set derived from the key; any non-2xx status propagates as
//! an error.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONNECTION};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::params::{ParameterStore, WMATA_API_KEY};

/// Base URL for all WMATA API resources.
pub const BASE_URL: &str = "https://api.wmata.com/";

const PREDICTIONS_RESOURCE: &str = "NextBusService.svc/json/jPredictions";
const POSITIONS_RESOURCE: &str = "Bus.svc/json/jBusPositions";

/// One upstream arrival estimate for a stop.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Prediction {
    #[serde(rename = "RouteID")]
    pub route_id: String,
    #[serde(rename = "DirectionText")]
    pub direction_text: String,
    #[serde(rename = "Minutes")]
    pub minutes: i64,
}

/// Response of the next-bus predictions resource for a single stop.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionResponse {
    #[serde(rename = "StopName")]
    pub stop_name: String,
    #[serde(rename = "Predictions")]
    pub predictions: Vec<Prediction>,
}

/// Read access to real-time bus predictions.
///
/// The aggregator and the Lambda handler depend on this seam so tests can
/// substitute a fake for the live [`Wmata`] client.
#[allow(async_fn_in_trait)]
pub trait TransitApi {
    async fn next_bus_prediction(&self, stop_id: u32) -> Result<PredictionResponse>;
}

/// HTTP client bound to the WMATA base URL and one API key.
#[derive(Debug, Clone)]
pub struct Wmata {
    http: Client,
}

impl Wmata {
    /// Build a client around the given API key.
    pub fn new(api_key: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(crate::user_agent())
            .default_headers(headers(api_key)?)
            .build()?;
        Ok(Self { http })
    }

    /// Build a client whose API key is resolved from the parameter store.
    pub async fn from_store<P: ParameterStore>(store: &P) -> Result<Self> {
        let api_key = store.get_parameter(WMATA_API_KEY).await?;
        Self::new(&api_key)
    }

    /// Issue a GET against a resource path, returning the parsed JSON body.
    pub async fn get(&self, resource: &str, query: &[(&str, String)]) -> Result<Value> {
        // Resource paths are relative, so joining is plain concatenation.
        let url = format!("{BASE_URL}{resource}");
        debug!(%url, "GET");

        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    /// Current positions of buses on the given route.
    ///
    /// `route_id` accepts only base route names, no variations: use `10A`
    /// rather than `10Av1`.
    pub async fn bus_positions(&self, route_id: &str) -> Result<Value> {
        self.get(POSITIONS_RESOURCE, &[("RouteID", route_id.to_string())])
            .await
    }

    /// Nearby stop listing. Declared capability without an implementation.
    pub fn bus_stops(&self) -> Result<Value> {
        Err(Error::NotImplemented {
            operation: "bus_stops",
        })
    }

    /// Buses scheduled at a stop for a date. Declared capability without an
    /// implementation.
    pub fn schedule_at_stop(&self) -> Result<Value> {
        Err(Error::NotImplemented {
            operation: "schedule_at_stop",
        })
    }

    /// Route variant listing. Declared capability without an implementation.
    pub fn routes(&self) -> Result<Value> {
        Err(Error::NotImplemented {
            operation: "routes",
        })
    }

    /// Route schedule for a date. Declared capability without an
    /// implementation.
    pub fn schedule(&self) -> Result<Value> {
        Err(Error::NotImplemented {
            operation: "schedule",
        })
    }
}

impl TransitApi for Wmata {
    async fn next_bus_prediction(&self, stop_id: u32) -> Result<PredictionResponse> {
        let value = self
            .get(PREDICTIONS_RESOURCE, &[("StopID", stop_id.to_string())])
            .await?;
        serde_json::from_value(value).map_err(|err| Error::UnexpectedResponse {
            context: "next bus prediction",
            message: err.to_string(),
        })
    }
}

/// Fixed header set sent with every request, derived from the API key.
fn headers(api_key: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        "api_key",
        HeaderValue::from_str(api_key).map_err(|_| Error::InvalidApiKey)?,
    );
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    Ok(headers)
}
