//! State container behind the schedule view.
//!
//! All UI state lives in [`ViewState`]. The [`Presenter`] is the only thing
//! that mutates it, one action at a time; a renderer reads the state after
//! each action completes.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::api::{Area, ScheduleDay, StageChange};
use crate::client::clock::sast;
use crate::client::{Clock, LoadSheddingService, ProxyApi};
use crate::favorites::{FavoritesStore, KeyValueStore, StorageResult};

/// Searches run only once the term is longer than this.
const SEARCH_TRIGGER_CHARS: usize = 2;

/// Stage as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageView {
    pub stage: u32,
    /// When the stage was last refreshed, in SAST.
    pub updated: String,
    pub next_stages: Vec<StageChange>,
}

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub stage: Option<StageView>,
    pub search_term: String,
    pub areas: Vec<Area>,
    pub selected_area: Option<Area>,
    pub schedule: Vec<ScheduleDay>,
    pub loading: bool,
    /// Mirrors the favorites store after every toggle.
    pub favorites: Vec<Area>,
}

/// Visual severity band of a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Low,
    Moderate,
    Severe,
}

pub fn stage_severity(stage: u32) -> Severity {
    match stage {
        0..=2 => Severity::Low,
        3..=4 => Severity::Moderate,
        _ => Severity::Severe,
    }
}

/// One outage window of a day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleSlot {
    pub date: String,
    pub time: String,
    pub stage: u32,
}

/// Flatten a day into its outage windows, preserving order.
pub fn schedule_slots(day: &ScheduleDay) -> Vec<ScheduleSlot> {
    day.stages
        .iter()
        .flat_map(|slot| {
            slot.ranges().iter().map(move |range| ScheduleSlot {
                date: day.date.clone(),
                time: range.clone(),
                stage: slot.stage(),
            })
        })
        .collect()
}

fn format_updated(at: DateTime<Utc>) -> String {
    at.with_timezone(&sast()).format("%Y/%m/%d, %H:%M:%S").to_string()
}

pub struct Presenter<A, C, S> {
    service: LoadSheddingService<A, C>,
    clock: C,
    favorites: FavoritesStore<S>,
    state: ViewState,
}

impl<A, C, S> Presenter<A, C, S>
where
    A: ProxyApi,
    C: Clock + Clone,
    S: KeyValueStore,
{
    /// Favorites are loaded from `storage` immediately.
    pub fn new(api: A, clock: C, storage: S) -> Self {
        let favorites = FavoritesStore::open(storage);
        let state = ViewState {
            favorites: favorites.favorites().to_vec(),
            ..ViewState::default()
        };
        Self {
            service: LoadSheddingService::new(api, clock.clone()),
            clock,
            favorites,
            state,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn favorites(&self) -> &[Area] {
        self.favorites.favorites()
    }

    pub fn is_favorite(&self, area_id: &str) -> bool {
        self.favorites.is_favorite(area_id)
    }

    /// Refresh the national stage.
    pub async fn load_current_status(&mut self) {
        self.state.loading = true;
        let status = self.service.current_status().await;
        self.state.stage = Some(StageView {
            stage: status.stage,
            updated: format_updated(self.clock.now()),
            next_stages: status.next_stages,
        });
        self.state.loading = false;
    }

    /// Update the search term; query once it is long enough, else clear results.
    pub async fn handle_search(&mut self, value: &str) {
        self.state.search_term = value.to_string();
        if value.chars().count() > SEARCH_TRIGGER_CHARS {
            self.state.loading = true;
            self.state.areas = self.service.search_areas(value).await;
            self.state.loading = false;
        } else {
            self.state.areas.clear();
        }
        debug!(term = value, results = self.state.areas.len(), "Search state updated");
    }

    /// Select an area and load its schedule.
    pub async fn select_area(&mut self, area: Area) {
        self.state.search_term = area.name.clone();
        self.state.areas.clear();
        self.state.loading = true;
        self.state.schedule = self.service.area_schedule(&area.id).await;
        self.state.selected_area = Some(area);
        self.state.loading = false;
    }

    pub fn toggle_favorite(&mut self, area: &Area) -> StorageResult<&[Area]> {
        self.favorites.toggle(area)?;
        self.state.favorites = self.favorites.favorites().to_vec();
        Ok(&self.state.favorites)
    }
}
