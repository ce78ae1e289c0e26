//! Export jobs: a filtered, ordered subset of results sent to one sink.

use crate::domain::{BusinessRecord, SearchParameters, SelectionSet};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportSink {
    Sheets,
    Csv,
    Notion,
}

impl ExportSink {
    pub const ALL: [ExportSink; 3] = [ExportSink::Sheets, ExportSink::Csv, ExportSink::Notion];

    /// Path of the sink endpoint, relative to the API base URL.
    pub fn endpoint_path(self) -> &'static str {
        match self {
            ExportSink::Sheets => "/api/export-sheets",
            ExportSink::Csv => "/api/export-csv",
            ExportSink::Notion => "/api/export-notion",
        }
    }
}

impl fmt::Display for ExportSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExportSink::Sheets => "Google Sheets",
            ExportSink::Csv => "CSV",
            ExportSink::Notion => "Notion",
        })
    }
}

/// Wire body shared by the three export endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportPayload {
    pub keyword: String,
    pub city: String,
    pub radius: String,
    pub results: Vec<BusinessRecord>,
}

/// One dispatch. Lives only for the duration of the call.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportJob {
    pub sink: ExportSink,
    pub parameters: SearchParameters,
    /// Selected records, in original result order.
    pub records: Vec<BusinessRecord>,
}

impl ExportJob {
    pub fn new(
        sink: ExportSink,
        parameters: SearchParameters,
        records: &[BusinessRecord],
        selection: &SelectionSet,
    ) -> Self {
        Self {
            sink,
            parameters,
            records: selection.filter(records),
        }
    }

    /// City is the plain label: exports never carry the coordinate annotation.
    pub fn payload(&self) -> ExportPayload {
        ExportPayload {
            keyword: self.parameters.keyword.clone(),
            city: self.parameters.city_label.clone(),
            radius: self.parameters.radius_km.to_string(),
            results: self.records.clone(),
        }
    }
}

/// What a successful export left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportArtifact {
    /// Link handed to the opener (Sheets).
    Link(String),
    /// File written by the saver (CSV).
    File(PathBuf),
}

/// Terminal state of an export job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportStatus {
    Succeeded(Option<ExportArtifact>),
    Failed(String),
}

impl ExportStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, ExportStatus::Succeeded(_))
    }
}

/// Download name for a CSV export: `recherche_<keyword>_<city>_<YYYY-MM-DD>.csv`.
/// Path separators are replaced so the name stays a single file name.
pub fn csv_filename(keyword: &str, city: &str, date: NaiveDate) -> String {
    let name = format!("recherche_{}_{}_{}.csv", keyword, city, date.format("%Y-%m-%d"));
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '\0' => '_',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Coordinate;

    #[test]
    fn test_payload_keeps_order_and_plain_city() {
        let records = vec![
            BusinessRecord::new("1", "One", "a"),
            BusinessRecord::new("2", "Two", "b"),
            BusinessRecord::new("3", "Three", "c"),
        ];
        let mut selection = SelectionSet::default();
        selection.toggle("3", &records);
        selection.toggle("1", &records);
        let params = SearchParameters::new(
            "boulangerie",
            "Lyon, France",
            10,
            Some(Coordinate::new(45.764, 4.8357)),
        );
        let payload = ExportJob::new(ExportSink::Csv, params, &records, &selection).payload();
        assert_eq!(payload.city, "Lyon, France");
        assert_eq!(payload.radius, "10");
        let ids: Vec<_> = payload.results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
    }

    #[test]
    fn test_csv_filename() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(
            csv_filename("boulangerie", "Lyon", date),
            "recherche_boulangerie_Lyon_2024-03-09.csv"
        );
        assert_eq!(
            csv_filename("a/b", "c:d", date),
            "recherche_a_b_c_d_2024-03-09.csv"
        );
    }
}
