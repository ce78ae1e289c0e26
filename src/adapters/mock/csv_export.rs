//! CSV rendering of export payloads. Uses the `csv` crate for quoting/escaping.
//!
//! Column layout matches what the backend's CSV sink produces, so demo mode
//! downloads look like the real thing.

use crate::domain::{BusinessRecord, LooseNumber};

/// Header row, in output order.
pub const CSV_HEADERS: [&str; 8] = [
    "Nom",
    "Adresse",
    "Téléphone",
    "Site Web",
    "Note Google",
    "Nombre d'avis",
    "Statut",
    "Mot-clé recherché",
];

/// Render `records` as CSV, one row per record, with the searched keyword
/// repeated on every row.
pub fn records_to_csv(keyword: &str, records: &[BusinessRecord]) -> Result<String, csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(Vec::new());

    wtr.write_record(CSV_HEADERS)?;

    for record in records {
        let status = record
            .extra
            .get("business_status")
            .and_then(|v| v.as_str())
            .unwrap_or_default();
        let rating = loose(record.rating.as_ref());
        let total_ratings = loose(record.total_ratings.as_ref());
        wtr.write_record([
            record.name.as_str(),
            record.address.as_str(),
            record.phone().unwrap_or_default(),
            record.website().unwrap_or_default(),
            rating.as_str(),
            total_ratings.as_str(),
            status,
            keyword,
        ])?;
    }

    wtr.flush()?;
    let bytes = wtr
        .into_inner()
        .map_err(|e| csv::Error::from(std::io::Error::other(e.to_string())))?;

    String::from_utf8(bytes).map_err(|e| {
        csv::Error::from(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            e.to_string(),
        ))
    })
}

fn loose(value: Option<&LooseNumber>) -> String {
    value.map(ToString::to_string).unwrap_or_default()
}
