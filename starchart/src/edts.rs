//! EDTS procedural-coordinate HTTP client.
//!
//! EDTS computes approximate positions for procedurally named systems that
//! no catalog knows, straight from the position encoding in the name. The
//! upstream answers HTTP 400 for names that do not decode; syntactically
//! invalid names are rejected locally without a network round trip.

use serde::Deserialize;
use tracing::debug;

use crate::backend::{ProceduralPositions, ProceduralSystem};
use crate::domain::{Location, ProcGenName};
use crate::error::ResolveError;

/// Default base URL for the public EDTS instance.
const DEFAULT_BASE_URL: &str = "http://edts.thargoid.space/api/v1";

/// Configuration for the EDTS client.
#[derive(Debug, Clone)]
pub struct EdtsConfig {
    /// Base URL for the API (defaults to the public instance).
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl EdtsConfig {
    /// Create a config with production defaults.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for EdtsConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Response wrapper of the `system_position` endpoint.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    result: ApiSystemPosition,
}

/// A computed system position.
#[derive(Debug, Deserialize)]
struct ApiSystemPosition {
    name: Option<String>,
    position: ApiPosition,
    uncertainty: f64,
}

#[derive(Debug, Deserialize)]
struct ApiPosition {
    x: f64,
    y: f64,
    z: f64,
}

/// EDTS procedural-coordinate client.
#[derive(Debug, Clone)]
pub struct EdtsClient {
    http: reqwest::Client,
    base_url: String,
}

impl EdtsClient {
    /// Create a new EDTS client with the given configuration.
    pub fn new(config: EdtsConfig) -> Result<Self, ResolveError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    fn decode(body: &str, name: &str) -> Result<ProceduralSystem, ResolveError> {
        let response: ApiResponse = serde_json::from_str(body).map_err(|e| {
            ResolveError::transient(format!("EDTS response did not parse: {e}"))
        })?;

        let result = response.result;
        Ok(ProceduralSystem {
            name: result.name.unwrap_or_else(|| name.to_owned()),
            location: Location::new(
                result.position.x,
                result.position.y,
                result.position.z,
                result.uncertainty.ceil() as u32,
            ),
        })
    }
}

impl ProceduralPositions for EdtsClient {
    async fn find_by_name(&self, name: &str) -> Result<ProceduralSystem, ResolveError> {
        // Garbage input never reaches the network.
        ProcGenName::parse(name)
            .map_err(|e| ResolveError::invalid_key(name, e.to_string()))?;

        let url = format!(
            "{}/system_position/{}",
            self.base_url,
            name.replace(' ', "%20")
        );
        debug!(system = name, "querying EDTS for a procedural position");

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        // EDTS answers 400 for names that are shaped right but do not
        // decode, e.g. an unknown sector name.
        if status == reqwest::StatusCode::BAD_REQUEST {
            return Err(ResolveError::invalid_key(
                name,
                "name does not decode to a procedural position",
            ));
        }

        if !status.is_success() {
            return Err(ResolveError::transient(format!(
                "EDTS returned status {}",
                status.as_u16()
            )));
        }

        let body = response.text().await?;
        Self::decode(&body, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> EdtsClient {
        // Unroutable base URL: these tests must not hit the network.
        EdtsClient::new(EdtsConfig::new().with_base_url("http://127.0.0.1:9")).unwrap()
    }

    #[test]
    fn config_defaults() {
        let config = EdtsConfig::new();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
    }

    #[tokio::test]
    async fn malformed_name_rejected_before_network() {
        for name in ["Ysaveo YG+S D0", "Oevasy SG-Y", "Oevasy SG-Y D", "Oevasy SG-Y 0"] {
            match client().find_by_name(name).await {
                Err(ResolveError::InvalidKey { key, .. }) => assert_eq!(key, name),
                other => panic!("expected InvalidKey for {name:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn decode_system_position() {
        let body = r#"{
            "result": {
                "name": "Oevasy SG-Y D0",
                "position": { "x": -1465, "y": 15, "z": 65615 },
                "uncertainty": 40
            }
        }"#;

        let system = EdtsClient::decode(body, "Oevasy SG-Y D0").unwrap();
        assert_eq!(system.name, "Oevasy SG-Y D0");
        assert_eq!(system.location.x(), -1465.0);
        assert_eq!(system.location.y(), 15.0);
        assert_eq!(system.location.z(), 65615.0);
        assert_eq!(system.location.precision(), 40);
    }

    #[test]
    fn fractional_uncertainty_rounds_up() {
        let body = r#"{
            "result": {
                "name": "Lysoorb AA-A b0",
                "position": { "x": -55, "y": -15, "z": 6625 },
                "uncertainty": 9.25
            }
        }"#;

        let system = EdtsClient::decode(body, "Lysoorb AA-A b0").unwrap();
        assert_eq!(system.location.precision(), 10);
    }

    #[test]
    fn garbled_body_is_transient() {
        let result = EdtsClient::decode("<!doctype html>", "Oevasy SG-Y D0");
        assert!(matches!(result, Err(ResolveError::Transient { .. })));
    }
}
