//! Canonical substitute data used when the proxy cannot answer.
//!
//! This is the only definition of mock data in the crate. Dates and
//! timestamps are derived from the supplied "now" so the data stays
//! plausible on any day.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};

use super::clock::sast;
use crate::api::{Area, ScheduleDay, StageChange, StageSlot, StageStatus};

/// Built-in example areas: `(id, name, region)`.
pub const MOCK_AREAS: [(&str, &str, &str); 8] = [
    ("jhb-sandton", "Johannesburg - Sandton", "Gauteng"),
    ("jhb-soweto", "Johannesburg - Soweto", "Gauteng"),
    ("jhb-rosebank", "Johannesburg - Rosebank", "Gauteng"),
    ("pta-centurion", "Pretoria - Centurion", "Gauteng"),
    ("cpt-cbd", "Cape Town - CBD", "Western Cape"),
    ("cpt-seapoint", "Cape Town - Sea Point", "Western Cape"),
    ("dbn-umhlanga", "Durban - Umhlanga", "KwaZulu-Natal"),
    ("dbn-durban-north", "Durban - Durban North", "KwaZulu-Natal"),
];

pub const FALLBACK_STAGE: u32 = 4;

/// Per-day pattern for the substitute schedule, starting today.
const SCHEDULE_PATTERN: [(u32, [&str; 2]); 3] = [
    (4, ["16:00-18:30", "20:00-22:30"]),
    (3, ["08:00-10:30", "18:00-20:30"]),
    (3, ["12:00-14:30", "20:00-22:30"]),
];

pub fn mock_areas() -> Vec<Area> {
    MOCK_AREAS
        .iter()
        .map(|(id, name, region)| Area::new(*id, *name, *region))
        .collect()
}

/// Mock areas whose name contains `query`, ignoring case.
pub fn search_areas(query: &str) -> Vec<Area> {
    let needle = query.to_lowercase();
    mock_areas()
        .into_iter()
        .filter(|area| area.name.to_lowercase().contains(&needle))
        .collect()
}

/// Stage 4 now, dropping to 3 at midnight and to 2 at 16:00 tomorrow.
///
/// "Tomorrow" and the wall-clock times are South African; the timestamps
/// are rendered in UTC.
pub fn stage_status(now: DateTime<Utc>) -> StageStatus {
    let tomorrow = now.with_timezone(&sast()).date_naive() + Duration::days(1);
    let midnight = sast_to_utc(tomorrow.and_time(NaiveTime::MIN));
    let afternoon = midnight + Duration::hours(16);

    StageStatus {
        stage: FALLBACK_STAGE,
        next_stages: vec![
            StageChange {
                stage: 3,
                start_timestamp: iso_timestamp(midnight),
            },
            StageChange {
                stage: 2,
                start_timestamp: iso_timestamp(afternoon),
            },
        ],
    }
}

/// Three days starting today, one stage entry each.
pub fn schedule(now: DateTime<Utc>) -> Vec<ScheduleDay> {
    let today = now.date_naive();
    SCHEDULE_PATTERN
        .iter()
        .enumerate()
        .map(|(offset, (stage, ranges))| ScheduleDay {
            date: iso_date(today + Duration::days(offset as i64)),
            name: None,
            stages: vec![StageSlot::new(*stage, *ranges)],
        })
        .collect()
}

fn sast_to_utc(local: NaiveDateTime) -> DateTime<Utc> {
    (local - Duration::seconds(i64::from(sast().local_minus_utc()))).and_utc()
}

fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
