//! In-process fakes for every outbound port.
//!
//! Serve demo mode (no backend, no API key) and the use-case tests. Each fake
//! records what it was asked so tests can assert on the traffic.

pub mod csv_export;

use crate::domain::{
    BusinessRecord, DomainError, ExportPayload, ExportSink, LooseNumber, PlaceCandidate,
    ResolvedPlace, SearchRequest,
};
use crate::ports::{
    AutocompletePort, ExportSinkPort, FileSaverPort, GeocodingPort, PreferencePort,
    SearchBackendPort, UrlOpenerPort,
};
use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use tracing::info;

fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

async fn simulate_latency(latency: Duration) {
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
}

/// Fake geocoding and autocomplete provider over a fixed list of places.
/// Lookups are case-insensitive on the place key.
#[derive(Default)]
pub struct MockGeocoder {
    places: Vec<(String, ResolvedPlace)>,
    latency: Duration,
    queries: Mutex<Vec<String>>,
}

impl MockGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_place(mut self, key: impl Into<String>, place: ResolvedPlace) -> Self {
        self.places.push((key.into(), place));
        self
    }

    /// Delay applied to geocode and resolve calls.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Geocode queries received so far, in order.
    pub fn queries(&self) -> Vec<String> {
        lock(&self.queries).clone()
    }

    fn find(&self, key: &str) -> Option<&(String, ResolvedPlace)> {
        self.places
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key.trim()))
    }
}

#[async_trait::async_trait]
impl GeocodingPort for MockGeocoder {
    async fn geocode(&self, query: &str) -> Result<Option<ResolvedPlace>, DomainError> {
        lock(&self.queries).push(query.to_string());
        simulate_latency(self.latency).await;
        Ok(self.find(query).map(|(_, place)| place.clone()))
    }
}

#[async_trait::async_trait]
impl AutocompletePort for MockGeocoder {
    async fn suggest(&self, partial: &str) -> Result<Vec<PlaceCandidate>, DomainError> {
        let needle = partial.trim().to_lowercase();
        Ok(self
            .places
            .iter()
            .filter(|(key, _)| key.to_lowercase().starts_with(&needle))
            .map(|(key, place)| PlaceCandidate {
                place_id: key.clone(),
                description: place.label.clone().unwrap_or_else(|| key.clone()),
            })
            .collect())
    }

    async fn resolve(&self, candidate: &PlaceCandidate) -> Result<ResolvedPlace, DomainError> {
        simulate_latency(self.latency).await;
        let (key, place) = self.find(&candidate.place_id).ok_or_else(|| {
            DomainError::Resolution(format!("unknown place '{}'", candidate.place_id))
        })?;
        Ok(ResolvedPlace {
            label: place.label.clone().or_else(|| Some(key.clone())),
            coordinate: place.coordinate,
        })
    }
}

type Scripted = (Duration, Result<Vec<BusinessRecord>, DomainError>);

/// Fake search backend. Answers from a FIFO script; once the script is empty
/// it returns a handful of sample businesses for the requested keyword.
#[derive(Default)]
pub struct MockSearchBackend {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<SearchRequest>>,
}

impl MockSearchBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_ok(&self, records: Vec<BusinessRecord>) {
        self.push_delayed(Duration::ZERO, Ok(records));
    }

    pub fn push_err(&self, error: DomainError) {
        self.push_delayed(Duration::ZERO, Err(error));
    }

    pub fn push_delayed(&self, delay: Duration, outcome: Result<Vec<BusinessRecord>, DomainError>) {
        lock(&self.script).push_back((delay, outcome));
    }

    pub fn requests(&self) -> Vec<SearchRequest> {
        lock(&self.requests).clone()
    }
}

#[async_trait::async_trait]
impl SearchBackendPort for MockSearchBackend {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<BusinessRecord>, DomainError> {
        lock(&self.requests).push(request.clone());
        let next = lock(&self.script).pop_front();
        match next {
            Some((delay, outcome)) => {
                simulate_latency(delay).await;
                outcome
            }
            None => {
                info!(keyword = %request.keyword, city = %request.city, "[MOCK] serving sample results");
                simulate_latency(Duration::from_millis(300)).await;
                Ok(sample_records(&request.keyword, &request.city))
            }
        }
    }
}

/// Plausible businesses for demo mode. The first one is flagged as already exported.
pub fn sample_records(keyword: &str, city: &str) -> Vec<BusinessRecord> {
    let city = city.split(" [").next().unwrap_or(city);
    let label = if keyword.trim().is_empty() {
        "Commerce"
    } else {
        keyword.trim()
    };
    let rows: [(&str, &str, Option<f64>, u32); 4] = [
        ("Le Comptoir", "12 rue de la République", Some(4.6), 212),
        ("Maison Durand", "3 place Bellecour", Some(4.2), 87),
        ("L'Atelier", "45 avenue Jean Jaurès", None, 0),
        ("Chez Martin", "8 quai Saint-Antoine", Some(3.9), 31),
    ];
    rows.iter()
        .enumerate()
        .map(|(i, (name, street, rating, total))| {
            let mut record = BusinessRecord::new(
                format!("demo-{}", i + 1),
                format!("{} {}", label, name),
                format!("{}, {}", street, city),
            );
            record.phone = Some(format!("04 78 00 00 {:02}", i + 10));
            record.rating = Some(match rating {
                Some(r) => serde_json::Number::from_f64(*r)
                    .map(LooseNumber::Number)
                    .unwrap_or_else(|| LooseNumber::Text("N/A".into())),
                None => LooseNumber::Text("N/A".into()),
            });
            record.total_ratings = Some(LooseNumber::Number((*total).into()));
            record.already_exported = Some(i == 0);
            record.extra.insert(
                "business_status".into(),
                serde_json::Value::String("OPERATIONAL".into()),
            );
            record
        })
        .collect()
}

/// Fake export sinks. Sheets answers with a link, CSV renders the payload
/// locally, Notion acknowledges. Per-sink overrides replace the default body.
#[derive(Default)]
pub struct MockExportSink {
    responses: HashMap<ExportSink, Result<Vec<u8>, String>>,
    calls: Mutex<Vec<(ExportSink, ExportPayload)>>,
}

impl MockExportSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, sink: ExportSink, body: Vec<u8>) -> Self {
        self.responses.insert(sink, Ok(body));
        self
    }

    pub fn with_failure(mut self, sink: ExportSink, reason: impl Into<String>) -> Self {
        self.responses.insert(sink, Err(reason.into()));
        self
    }

    pub fn calls(&self) -> Vec<(ExportSink, ExportPayload)> {
        lock(&self.calls).clone()
    }

    fn default_body(sink: ExportSink, payload: &ExportPayload) -> Result<Vec<u8>, DomainError> {
        match sink {
            ExportSink::Sheets => Ok(serde_json::json!({
                "url": "https://docs.google.com/spreadsheets/d/demo-pro-finder"
            })
            .to_string()
            .into_bytes()),
            ExportSink::Csv => csv_export::records_to_csv(&payload.keyword, &payload.results)
                .map(String::into_bytes)
                .map_err(|e| DomainError::Export {
                    sink,
                    reason: e.to_string(),
                }),
            ExportSink::Notion => Ok(serde_json::json!({
                "success": true,
                "message": format!("{} entreprises exportées vers Notion", payload.results.len())
            })
            .to_string()
            .into_bytes()),
        }
    }
}

#[async_trait::async_trait]
impl ExportSinkPort for MockExportSink {
    async fn export(
        &self,
        sink: ExportSink,
        payload: &ExportPayload,
    ) -> Result<Vec<u8>, DomainError> {
        lock(&self.calls).push((sink, payload.clone()));
        info!(%sink, records = payload.results.len(), "[MOCK] export received");
        match self.responses.get(&sink) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(reason)) => Err(DomainError::Export {
                sink,
                reason: reason.clone(),
            }),
            None => Self::default_body(sink, payload),
        }
    }
}

/// Remembers every link it was asked to open.
#[derive(Default)]
pub struct RecordingUrlOpener {
    opened: Mutex<Vec<String>>,
}

impl RecordingUrlOpener {
    pub fn opened(&self) -> Vec<String> {
        lock(&self.opened).clone()
    }
}

#[async_trait::async_trait]
impl UrlOpenerPort for RecordingUrlOpener {
    async fn open(&self, url: &str) -> Result<(), DomainError> {
        lock(&self.opened).push(url.to_string());
        Ok(())
    }
}

/// Keeps "saved" files in memory. The returned path is the bare file name.
#[derive(Default)]
pub struct MemoryFileSaver {
    saved: Mutex<Vec<(String, Vec<u8>)>>,
}

impl MemoryFileSaver {
    pub fn saved(&self) -> Vec<(String, Vec<u8>)> {
        lock(&self.saved).clone()
    }
}

#[async_trait::async_trait]
impl FileSaverPort for MemoryFileSaver {
    async fn save(&self, filename: &str, contents: &[u8]) -> Result<PathBuf, DomainError> {
        lock(&self.saved).push((filename.to_string(), contents.to_vec()));
        Ok(PathBuf::from(filename))
    }
}

/// Volatile preference store.
#[derive(Default)]
pub struct MemoryPreferences {
    dark_mode: Mutex<bool>,
}

impl MemoryPreferences {
    pub fn get(&self) -> bool {
        *lock(&self.dark_mode)
    }

    pub fn set(&self, enabled: bool) {
        *lock(&self.dark_mode) = enabled;
    }
}

#[async_trait::async_trait]
impl PreferencePort for MemoryPreferences {
    async fn dark_mode(&self) -> Result<bool, DomainError> {
        Ok(self.get())
    }

    async fn set_dark_mode(&self, enabled: bool) -> Result<(), DomainError> {
        self.set(enabled);
        Ok(())
    }
}
