//! Shared fixtures for the proxy integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::sync::Arc;

use powerup_sa::upstream::{UpstreamClient, UpstreamError, UpstreamResult};

/// One outbound call observed by [`RecordingUpstream`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamCall {
    Status,
    Search(String),
    Schedule(String),
}

/// Fake upstream that records calls and replays a fixed outcome.
#[derive(Clone)]
pub struct RecordingUpstream {
    calls: Arc<Mutex<Vec<UpstreamCall>>>,
    failure: Option<UpstreamError>,
}

impl RecordingUpstream {
    pub fn healthy() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            failure: None,
        }
    }

    pub fn failing(error: UpstreamError) -> Self {
        Self {
            failure: Some(error),
            ..Self::healthy()
        }
    }

    pub fn calls(&self) -> Vec<UpstreamCall> {
        self.calls.lock().clone()
    }

    fn respond(&self, call: UpstreamCall, payload: Value) -> UpstreamResult<Value> {
        self.calls.lock().push(call);
        match &self.failure {
            Some(error) => Err(error.clone()),
            None => Ok(payload),
        }
    }
}

pub fn status_payload() -> Value {
    json!({
        "status": {
            "eskom": {
                "name": "National",
                "stage": "2",
                "stage_updated": "2025-10-25T10:00:00+02:00",
                "next_stages": [
                    {"stage": "1", "stage_start_timestamp": "2025-10-25T16:00:00+02:00"},
                    {"stage": "0", "stage_start_timestamp": "2025-10-25T22:00:00+02:00"}
                ]
            }
        }
    })
}

pub fn search_payload(text: &str) -> Value {
    json!({
        "areas": [
            {"id": "eskde-10-fourwaysext10cityofjohannesburggauteng", "name": format!("{} Ext 10", text), "region": "Eskom Direct, City of Johannesburg, Gauteng"}
        ]
    })
}

pub fn schedule_payload(id: &str) -> Value {
    json!({
        "events": [],
        "info": {"name": id, "region": "Eskom Direct"},
        "schedule": {
            "days": [
                {"date": "2025-10-25", "name": "Saturday", "stages": [[2, ["10:00-12:30"]]]}
            ],
            "source": "https://loadshedding.eskom.co.za/"
        }
    })
}

#[async_trait]
impl UpstreamClient for RecordingUpstream {
    async fn fetch_status(&self) -> UpstreamResult<Value> {
        self.respond(UpstreamCall::Status, status_payload())
    }

    async fn search_areas(&self, text: &str) -> UpstreamResult<Value> {
        self.respond(UpstreamCall::Search(text.to_string()), search_payload(text))
    }

    async fn fetch_schedule(&self, area_id: &str) -> UpstreamResult<Value> {
        self.respond(UpstreamCall::Schedule(area_id.to_string()), schedule_payload(area_id))
    }
}
