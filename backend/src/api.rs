//! Data types exchanged between the upstream status API, the proxy, and the
//! client-side modules.
//!
//! All types derive `Serialize`/`Deserialize` so they can travel through the
//! proxy unchanged. Field names follow the upstream JSON payloads.

use serde::{de, Deserialize, Deserializer, Serialize};
use std::hash::{Hash, Hasher};

// =========================================================
// Areas
// =========================================================

/// A named geographic region with an opaque upstream identifier.
///
/// Equality and hashing consider `id` only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Area {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub region: String,
}

impl Area {
    pub fn new(id: impl Into<String>, name: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            region: region.into(),
        }
    }
}

impl PartialEq for Area {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Area {}

impl Hash for Area {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Response of the area search endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AreaSearchResponse {
    #[serde(default)]
    pub areas: Vec<Area>,
}

// =========================================================
// Stage status
// =========================================================

/// Current load-shedding stage and the announced upcoming changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageStatus {
    #[serde(deserialize_with = "stage_number")]
    pub stage: u32,
    /// Upstream order is authoritative; never re-sorted.
    #[serde(default)]
    pub next_stages: Vec<StageChange>,
}

/// A scheduled stage transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageChange {
    #[serde(deserialize_with = "stage_number")]
    pub stage: u32,
    #[serde(alias = "stage_start_timestamp")]
    pub start_timestamp: String,
}

/// Status payload as returned by `/api/status`: `{"status": {"eskom": {...}}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusEnvelope {
    pub status: NationalStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NationalStatus {
    pub eskom: StageStatus,
}

// =========================================================
// Schedules
// =========================================================

/// One stage entry of a day: the stage number and its outage windows
/// (`"HH:MM-HH:MM"`). Serialized as `[stage, [ranges...]]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageSlot(pub u32, pub Vec<String>);

impl StageSlot {
    pub fn new<I, S>(stage: u32, ranges: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(stage, ranges.into_iter().map(Into::into).collect())
    }

    pub fn stage(&self) -> u32 {
        self.0
    }

    pub fn ranges(&self) -> &[String] {
        &self.1
    }
}

/// Outage schedule for a single calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleDay {
    /// `YYYY-MM-DD`
    pub date: String,
    /// Weekday label, when upstream provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub stages: Vec<StageSlot>,
}

/// Schedule payload as returned by `/api/area`: `{"schedule": {"days": [...]}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaScheduleResponse {
    pub schedule: AreaSchedule,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaSchedule {
    pub days: Vec<ScheduleDay>,
}

/// Upstream reports stages either as numbers or as numeric strings.
fn stage_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("invalid stage number '{}'", s))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn test_area_equality_uses_id_only() {
        let a = Area::new("cpt-cbd", "Cape Town - CBD", "Western Cape");
        let b = Area::new("cpt-cbd", "Renamed", "Elsewhere");
        assert_eq!(a, b);

        let set: HashSet<Area> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_stage_accepts_numeric_string() {
        let status: StageStatus = serde_json::from_value(json!({
            "stage": "4",
            "next_stages": [
                {"stage": "3", "stage_start_timestamp": "2025-10-26T00:00:00+02:00"},
                {"stage": 2, "start_timestamp": "2025-10-26T16:00:00+02:00"}
            ]
        }))
        .unwrap();

        assert_eq!(status.stage, 4);
        assert_eq!(status.next_stages.len(), 2);
        assert_eq!(status.next_stages[0].stage, 3);
        assert_eq!(status.next_stages[0].start_timestamp, "2025-10-26T00:00:00+02:00");
        assert_eq!(status.next_stages[1].stage, 2);
    }

    #[test]
    fn test_stage_rejects_garbage() {
        let result: Result<StageStatus, _> =
            serde_json::from_value(json!({"stage": "four", "next_stages": []}));
        assert!(result.is_err());
    }

    #[test]
    fn test_stage_slot_serializes_as_pair() {
        let day = ScheduleDay {
            date: "2025-10-26".to_string(),
            name: None,
            stages: vec![StageSlot::new(4, ["16:00-18:30", "20:00-22:30"])],
        };

        let value = serde_json::to_value(&day).unwrap();
        assert_eq!(
            value,
            json!({"date": "2025-10-26", "stages": [[4, ["16:00-18:30", "20:00-22:30"]]]})
        );
    }

    #[test]
    fn test_search_response_missing_areas_is_empty() {
        let response: AreaSearchResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.areas.is_empty());
    }
}
