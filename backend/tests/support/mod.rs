//! Hand-written scripted doubles shared by the integration suites.

#![allow(dead_code, reason = "each suite uses a different subset of helpers")]

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use horizon::domain::event::SourceKind;
use horizon::domain::geo::Coordinates;
use horizon::domain::ports::{
    AlertNotifier, AlertNotifierError, HazardSource, PlaceSearch, PlaceSource, RawGeometry,
    RawHazardRecord, RawPlaceRecord, SourceError,
};
use horizon::domain::resource::ResourceAlert;

/// What a scripted source does when polled.
#[derive(Debug, Clone)]
pub enum Script<T> {
    Respond(Vec<T>),
    Fail(SourceError),
    Stall(Duration),
}

/// Hazard feed replaying a fixed script.
pub struct ScriptedHazardSource {
    kind: SourceKind,
    script: Script<RawHazardRecord>,
}

impl ScriptedHazardSource {
    pub fn new(kind: SourceKind, script: Script<RawHazardRecord>) -> Arc<Self> {
        Arc::new(Self { kind, script })
    }
}

#[async_trait]
impl HazardSource for ScriptedHazardSource {
    fn kind(&self) -> SourceKind {
        self.kind
    }

    async fn fetch_hazards(&self) -> Result<Vec<RawHazardRecord>, SourceError> {
        match &self.script {
            Script::Respond(records) => Ok(records.clone()),
            Script::Fail(error) => Err(error.clone()),
            Script::Stall(delay) => {
                tokio::time::sleep(*delay).await;
                Ok(Vec::new())
            }
        }
    }
}

/// Place feed returning queued batches in order, then nothing.
#[derive(Default)]
pub struct ScriptedPlaceSource {
    batches: Mutex<Vec<Result<Vec<RawPlaceRecord>, SourceError>>>,
    searches: Mutex<Vec<PlaceSearch>>,
}

impl ScriptedPlaceSource {
    pub fn with_batches(batches: Vec<Result<Vec<RawPlaceRecord>, SourceError>>) -> Arc<Self> {
        let mut batches = batches;
        batches.reverse();
        Arc::new(Self {
            batches: Mutex::new(batches),
            searches: Mutex::new(Vec::new()),
        })
    }

    pub fn searches(&self) -> Vec<PlaceSearch> {
        self.searches.lock().expect("searches lock").clone()
    }
}

#[async_trait]
impl PlaceSource for ScriptedPlaceSource {
    async fn fetch_places(&self, search: &PlaceSearch) -> Result<Vec<RawPlaceRecord>, SourceError> {
        self.searches.lock().expect("searches lock").push(*search);
        self.batches
            .lock()
            .expect("batches lock")
            .pop()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Notifier remembering every alert it accepted.
#[derive(Default)]
pub struct RecordingNotifier {
    alerts: Mutex<Vec<ResourceAlert>>,
}

impl RecordingNotifier {
    pub fn alerts(&self) -> Vec<ResourceAlert> {
        self.alerts.lock().expect("alerts lock").clone()
    }
}

#[async_trait]
impl AlertNotifier for RecordingNotifier {
    async fn notify(&self, alert: &ResourceAlert) -> Result<(), AlertNotifierError> {
        self.alerts.lock().expect("alerts lock").push(alert.clone());
        Ok(())
    }
}

pub fn observed(day: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).single()
}

/// Raw hazard with a single dated point geometry.
pub fn hazard(
    id: &str,
    source: SourceKind,
    title: &str,
    category: &str,
    lon: f64,
    lat: f64,
) -> RawHazardRecord {
    RawHazardRecord {
        id: id.to_owned(),
        source,
        title: title.to_owned(),
        categories: vec![category.to_owned()],
        geometries: vec![RawGeometry {
            observed_at: observed(1),
            coordinates: Some(Coordinates::new(lon, lat)),
        }],
        source_links: vec![format!("https://feeds.example/{id}")],
    }
}

/// Raw map node with the given tags.
pub fn node(id: i64, lon: f64, lat: f64, tags: &[(&str, &str)]) -> RawPlaceRecord {
    RawPlaceRecord {
        element_type: "node".to_owned(),
        element_id: id,
        coordinates: Some(Coordinates::new(lon, lat)),
        tags: tags
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect::<BTreeMap<_, _>>(),
    }
}
