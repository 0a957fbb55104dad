//! Proxy access with the fallback policy applied.
//!
//! Every public method returns data, never an error. A failed call, or a
//! response without the expected shape, is logged and replaced by the
//! matching value from [`fallback`](super::fallback).

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, warn};

use super::clock::{Clock, SystemClock};
use super::fallback;
use super::{ClientResult, ProxyApi, ProxyClient};
use crate::api::{Area, AreaScheduleResponse, AreaSearchResponse, ScheduleDay, StageStatus, StatusEnvelope};

pub struct LoadSheddingService<A, C = SystemClock> {
    api: A,
    clock: C,
}

impl Default for LoadSheddingService<ProxyClient, SystemClock> {
    fn default() -> Self {
        Self::new(ProxyClient::default(), SystemClock)
    }
}

impl<A: ProxyApi, C: Clock> LoadSheddingService<A, C> {
    pub fn new(api: A, clock: C) -> Self {
        Self { api, clock }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Current national stage.
    pub async fn current_status(&self) -> StageStatus {
        match decode::<StatusEnvelope>(self.api.status().await) {
            Ok(envelope) => {
                info!(stage = envelope.status.eskom.stage, "Status received");
                envelope.status.eskom
            }
            Err(reason) => {
                warn!(%reason, "Error fetching status, using fallback");
                fallback::stage_status(self.clock.now())
            }
        }
    }

    /// Areas matching `text`. Falls back to filtering the built-in areas.
    pub async fn search_areas(&self, text: &str) -> Vec<Area> {
        match decode::<AreaSearchResponse>(self.api.search_areas(text).await) {
            Ok(response) => {
                info!(found = response.areas.len(), "Search results received");
                response.areas
            }
            Err(reason) => {
                let areas = fallback::search_areas(text);
                warn!(%reason, found = areas.len(), "Error searching areas, using mock data");
                areas
            }
        }
    }

    /// Outage schedule for an area. Falls back to a synthetic three-day schedule.
    pub async fn area_schedule(&self, area_id: &str) -> Vec<ScheduleDay> {
        match decode::<AreaScheduleResponse>(self.api.area_schedule(area_id).await) {
            Ok(response) => {
                info!(area_id, days = response.schedule.days.len(), "Schedule received");
                response.schedule.days
            }
            Err(reason) => {
                warn!(%reason, area_id, "Error fetching schedule, using mock data");
                fallback::schedule(self.clock.now())
            }
        }
    }
}

/// Collapses transport and shape failures into a single reason string.
fn decode<T: DeserializeOwned>(result: ClientResult<Value>) -> Result<T, String> {
    let value = result.map_err(|e| e.to_string())?;
    serde_json::from_value(value).map_err(|e| format!("Unexpected payload: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ClientError, FixedClock};
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    /// Replays canned results per endpoint.
    struct StubApi {
        status: ClientResult<Value>,
        search: ClientResult<Value>,
        schedule: ClientResult<Value>,
    }

    impl StubApi {
        fn failing() -> Self {
            let err = || Err(ClientError::Transport("connection refused".to_string()));
            Self {
                status: err(),
                search: err(),
                schedule: err(),
            }
        }
    }

    #[async_trait]
    impl ProxyApi for StubApi {
        async fn status(&self) -> ClientResult<Value> {
            self.status.clone()
        }

        async fn search_areas(&self, _text: &str) -> ClientResult<Value> {
            self.search.clone()
        }

        async fn area_schedule(&self, _area_id: &str) -> ClientResult<Value> {
            self.schedule.clone()
        }
    }

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2025, 10, 25, 8, 0, 0).unwrap())
    }

    #[tokio::test]
    async fn test_status_success_unwraps_envelope() {
        let api = StubApi {
            status: Ok(json!({
                "status": {
                    "capetown": {"stage": "1", "next_stages": []},
                    "eskom": {
                        "name": "National",
                        "stage": "2",
                        "next_stages": [{"stage": "0", "stage_start_timestamp": "2025-10-25T22:00:00+02:00"}]
                    }
                }
            })),
            ..StubApi::failing()
        };
        let status = LoadSheddingService::new(api, clock()).current_status().await;

        assert_eq!(status.stage, 2);
        assert_eq!(status.next_stages.len(), 1);
        assert_eq!(status.next_stages[0].start_timestamp, "2025-10-25T22:00:00+02:00");
    }

    #[tokio::test]
    async fn test_status_failure_uses_fallback() {
        let service = LoadSheddingService::new(StubApi::failing(), clock());
        assert_eq!(service.current_status().await, fallback::stage_status(clock().0));
    }

    #[tokio::test]
    async fn test_status_error_status_uses_fallback() {
        let api = StubApi {
            status: Err(ClientError::Status {
                status: 500,
                body: "{\"error\":\"Failed to fetch status\"}".to_string(),
            }),
            ..StubApi::failing()
        };
        let status = LoadSheddingService::new(api, clock()).current_status().await;
        assert_eq!(status.stage, fallback::FALLBACK_STAGE);
    }

    #[tokio::test]
    async fn test_status_without_eskom_uses_fallback() {
        let api = StubApi {
            status: Ok(json!({"status": {}})),
            ..StubApi::failing()
        };
        let status = LoadSheddingService::new(api, clock()).current_status().await;
        assert_eq!(status.stage, fallback::FALLBACK_STAGE);
    }

    #[tokio::test]
    async fn test_search_success_returns_areas() {
        let api = StubApi {
            search: Ok(json!({"areas": [{"id": "eskde-10-x", "name": "Fourways", "region": "Eskom Direct"}]})),
            ..StubApi::failing()
        };
        let areas = LoadSheddingService::new(api, clock()).search_areas("four").await;
        assert_eq!(areas, vec![Area::new("eskde-10-x", "Fourways", "Eskom Direct")]);
        assert_eq!(areas[0].name, "Fourways");
    }

    #[tokio::test]
    async fn test_search_success_without_areas_is_empty() {
        let api = StubApi {
            search: Ok(json!({})),
            ..StubApi::failing()
        };
        let areas = LoadSheddingService::new(api, clock()).search_areas("cape").await;
        assert!(areas.is_empty());
    }

    #[tokio::test]
    async fn test_search_failure_filters_mock_areas() {
        let service = LoadSheddingService::new(StubApi::failing(), clock());
        let ids: Vec<String> = service
            .search_areas("cape")
            .await
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ids, vec!["cpt-cbd", "cpt-seapoint"]);
    }

    #[tokio::test]
    async fn test_schedule_success_returns_days() {
        let api = StubApi {
            schedule: Ok(json!({
                "events": [],
                "info": {"name": "Fourways", "region": "Eskom Direct"},
                "schedule": {"days": [
                    {"date": "2025-10-25", "name": "Saturday", "stages": [[1, ["00:00-02:30"]]]}
                ]}
            })),
            ..StubApi::failing()
        };
        let days = LoadSheddingService::new(api, clock()).area_schedule("eskde-10-x").await;
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].name.as_deref(), Some("Saturday"));
        assert_eq!(days[0].stages[0].ranges(), ["00:00-02:30"]);
    }

    #[tokio::test]
    async fn test_schedule_failure_uses_fallback() {
        let service = LoadSheddingService::new(StubApi::failing(), clock());
        let days = service.area_schedule("anything").await;
        assert_eq!(days, fallback::schedule(clock().0));
        assert_eq!(days[0].date, "2025-10-25");
    }
}
