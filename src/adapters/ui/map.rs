//! Text rendering of the map overlay and the results list.

use crate::domain::{BusinessRecord, LocationSource, RadiusCircle, SelectionSet};

/// One-line description of the radius circle.
pub fn render_circle(circle: &RadiusCircle, source: Option<LocationSource>) -> String {
    match circle.center {
        Some(center) if circle.visible => {
            let origin = match source {
                Some(LocationSource::MapClick) => "map click",
                Some(LocationSource::Autocomplete) => "autocomplete",
                Some(LocationSource::Text) => "typed city",
                None => "pinned",
            };
            format!(
                "◉ {}  ⟳ {} m ({} km)  [{}]",
                center,
                circle.radius_meters,
                circle.radius_meters / 1000,
                origin
            )
        }
        _ => "○ no pinned location; the city name is searched as text".to_string(),
    }
}

/// One line per record: checkbox, name, address, phone, website, rating with its
/// review count, and the badge for businesses already sent to Notion.
pub fn render_results(records: &[BusinessRecord], selection: &SelectionSet) -> Vec<String> {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let mark = if selection.contains(&r.id) { "[x]" } else { "[ ]" };
            let mut line = format!("{} {:>2}. {} | {}", mark, i + 1, r.name, r.address);
            if let Some(phone) = r.phone() {
                line.push_str(&format!(" | {}", phone));
            }
            if let Some(website) = r.website() {
                line.push_str(&format!(" | {}", website));
            }
            if let Some(rating) = &r.rating {
                line.push_str(&format!(" | ★ {}", rating));
                if let Some(total) = &r.total_ratings {
                    line.push_str(&format!(" ({} avis)", total));
                }
            }
            if r.is_already_exported() {
                line.push_str("  (already in Notion)");
            }
            line
        })
        .collect()
}
