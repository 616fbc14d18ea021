//! EDSM activity-log HTTP client.
//!
//! One endpoint, `get-position`, with a status-code scheme that takes some
//! care to classify: `msgNum` 100 means "OK" both for a real result and
//! for a commander whose profile is hidden. The hidden case answers with
//! `system`, `firstDiscover` and `date` all null at once; no single field
//! is a reliable discriminant, so the classification inspects the
//! combination. This is an upstream quirk, not a design choice.

use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::debug;

use crate::backend::{CatalogActivity, CommanderRecord};
use crate::domain::Location;
use crate::error::ResolveError;

use super::types::ApiCmdr;

/// Default base URL for the EDSM activity log.
const DEFAULT_BASE_URL: &str = "https://www.edsm.net/api-logs-v1";

/// `msgNum` for a successful request (including hidden profiles).
const MSG_OK: u32 = 100;

/// `msgNum` for a missing commander name parameter.
const MSG_MISSING_NAME: u32 = 201;

/// `msgNum` for an unknown commander (or a mismatched API key).
const MSG_NOT_FOUND: u32 = 203;

/// Timestamp format used throughout the EDSM APIs (UTC).
const EDSM_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Configuration for the activity-log client.
#[derive(Debug, Clone)]
pub struct LogsConfig {
    /// Base URL for the API (defaults to production EDSM).
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl LogsConfig {
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

impl Default for LogsConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// EDSM activity-log client.
#[derive(Debug, Clone)]
pub struct LogsClient {
    http: reqwest::Client,
    base_url: String,
}

impl LogsClient {
    /// Create a new activity-log client with the given configuration.
    pub fn new(config: LogsConfig) -> Result<Self, ResolveError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }
}

impl CatalogActivity for LogsClient {
    async fn find_commander(
        &self,
        name: &str,
        api_key: Option<&str>,
    ) -> Result<CommanderRecord, ResolveError> {
        let url = format!("{}/get-position", self.base_url);
        debug!(commander = name, "querying EDSM activity log");

        let mut params = vec![
            ("commanderName", name.to_owned()),
            ("showId", "1".to_owned()),
            ("showCoordinates", "1".to_owned()),
        ];
        if let Some(key) = api_key {
            params.push(("apiKey", key.to_owned()));
        }

        let response = self.http.get(&url).query(&params).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(ResolveError::transient(format!(
                "EDSM logs API returned status {}",
                status.as_u16()
            )));
        }

        let body = response.text().await?;
        let dto: ApiCmdr = serde_json::from_str(&body).map_err(|e| {
            ResolveError::transient(format!("EDSM logs response did not parse: {e}"))
        })?;

        classify(name, dto)
    }
}

/// Classify a `get-position` response into a record or a failure.
///
/// The hidden-profile check must test `system`, `firstDiscover` and `date`
/// together: a public profile with hidden timestamps has a null `date` but
/// a populated `system`, and must not be mistaken for a hidden one.
fn classify(name: &str, dto: ApiCmdr) -> Result<CommanderRecord, ResolveError> {
    match dto.msg_num {
        MSG_OK => {
            if dto.system.is_none() && dto.first_discover.is_none() && dto.date.is_none() {
                return Err(ResolveError::AccessRestricted {
                    key: name.to_owned(),
                });
            }

            Ok(CommanderRecord {
                system_name: dto.system,
                system_id64: dto.system_id64,
                location: dto
                    .coordinates
                    .map(|c| Location::exact(c.x, c.y, c.z)),
                first_discover: dto.first_discover,
                last_active_at: dto.date_last_activity.as_deref().and_then(parse_edsm_date),
                profile_url: dto.url,
                is_docked: dto.is_docked,
                station: dto.station,
                ship_type: dto.ship_type,
            })
        }
        MSG_MISSING_NAME => Err(ResolveError::invalid_key(name, dto.msg)),
        MSG_NOT_FOUND => Err(ResolveError::not_found(name)),
        other => Err(ResolveError::transient(format!(
            "EDSM logs API answered msgNum {other}: {}",
            dto.msg
        ))),
    }
}

/// Parse an EDSM timestamp. Unparseable values degrade to `None` rather
/// than failing the whole lookup; the timestamps are auxiliary data.
fn parse_edsm_date(s: &str) -> Option<DateTime<Utc>> {
    match NaiveDateTime::parse_from_str(s, EDSM_DATE_FORMAT) {
        Ok(naive) => Some(naive.and_utc()),
        Err(_) => {
            tracing::warn!(timestamp = s, "unparseable EDSM timestamp");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok_dto() -> ApiCmdr {
        serde_json::from_str(
            r#"{
                "msgNum": 100,
                "msg": "OK",
                "system": "Dromi",
                "firstDiscover": false,
                "date": "2021-03-21 15:51:28",
                "systemId": 38324688,
                "systemId64": 1213084977515,
                "coordinates": { "x": 25.40625, "y": -31.0625, "z": 41.625 },
                "isDocked": true,
                "station": "Mawson Dock",
                "shipType": "Anaconda",
                "dateLastActivity": "2021-03-21 16:04:03",
                "url": "https://www.edsm.net/en/user/profile/id/86423/cmdr/IHaveFuelYouDont"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn known_commander_classified_as_record() {
        let record = classify("IHaveFuelYouDont", ok_dto()).unwrap();

        assert_eq!(record.system_name.as_deref(), Some("Dromi"));
        assert_eq!(record.system_id64, Some(1_213_084_977_515));
        assert_eq!(
            record.location,
            Some(Location::exact(25.40625, -31.0625, 41.625))
        );
        assert_eq!(record.first_discover, Some(false));
        assert_eq!(record.is_docked, Some(true));
        assert_eq!(record.ship_type.as_deref(), Some("Anaconda"));
        assert!(record.last_active_at.is_some());
        assert!(record.profile_url.is_some());
    }

    #[test]
    fn hidden_profile_is_access_restricted_not_not_found() {
        // Upstream answers "OK" for hidden profiles; only the combination
        // of null system, firstDiscover and date reveals the difference.
        let dto: ApiCmdr = serde_json::from_str(
            r#"{ "msgNum": 100, "msg": "OK", "system": null, "firstDiscover": null, "date": null }"#,
        )
        .unwrap();

        assert_eq!(
            classify("Hojothefool", dto),
            Err(ResolveError::AccessRestricted {
                key: "Hojothefool".into()
            })
        );
    }

    #[test]
    fn hidden_timestamps_alone_are_not_a_hidden_profile() {
        let mut dto = ok_dto();
        dto.date = None;
        dto.date_last_activity = None;

        let record = classify("IHaveFuelYouDont", dto).unwrap();
        assert_eq!(record.system_name.as_deref(), Some("Dromi"));
        assert!(record.last_active_at.is_none());
    }

    #[test]
    fn hidden_coordinates_yield_record_without_location() {
        let mut dto = ok_dto();
        dto.coordinates = None;

        let record = classify("IHaveFuelYouDont", dto).unwrap();
        assert!(record.location.is_none());
        assert_eq!(record.system_name.as_deref(), Some("Dromi"));
    }

    #[test]
    fn unknown_commander_is_not_found() {
        let dto: ApiCmdr = serde_json::from_str(
            r#"{ "msgNum": 203, "msg": "Commander name/API Key not found" }"#,
        )
        .unwrap();

        assert_eq!(
            classify("IHaveFuelYouDoButDontExistLOL", dto),
            Err(ResolveError::not_found("IHaveFuelYouDoButDontExistLOL"))
        );
    }

    #[test]
    fn missing_name_is_invalid_key() {
        let dto: ApiCmdr =
            serde_json::from_str(r#"{ "msgNum": 201, "msg": "Missing commander name" }"#).unwrap();

        assert!(matches!(
            classify("", dto),
            Err(ResolveError::InvalidKey { .. })
        ));
    }

    #[test]
    fn unexpected_msgnum_is_transient() {
        let dto: ApiCmdr =
            serde_json::from_str(r#"{ "msgNum": 500, "msg": "Server maintenance" }"#).unwrap();

        assert!(matches!(
            classify("IHaveFuelYouDont", dto),
            Err(ResolveError::Transient { .. })
        ));
    }

    #[test]
    fn edsm_timestamps_parse_as_utc() {
        let parsed = parse_edsm_date("2021-03-21 16:04:03").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2021-03-21T16:04:03+00:00");

        assert!(parse_edsm_date("yesterday-ish").is_none());
    }
}
