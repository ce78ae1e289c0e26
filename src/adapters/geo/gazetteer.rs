//! Offline geocoder over a built-in list of French cities.
//!
//! Used when no Google Maps key is configured. Matching ignores case and
//! accents; autocomplete is a prefix match on the city name.

use crate::domain::{Coordinate, DomainError, PlaceCandidate, ResolvedPlace};
use crate::ports::{AutocompletePort, GeocodingPort};

/// (name, latitude, longitude)
const CITIES: &[(&str, f64, f64)] = &[
    ("Paris", 48.8566, 2.3522),
    ("Marseille", 43.2965, 5.3698),
    ("Lyon", 45.7640, 4.8357),
    ("Toulouse", 43.6047, 1.4442),
    ("Nice", 43.7102, 7.2620),
    ("Nantes", 47.2184, -1.5536),
    ("Montpellier", 43.6108, 3.8767),
    ("Strasbourg", 48.5734, 7.7521),
    ("Bordeaux", 44.8378, -0.5792),
    ("Lille", 50.6292, 3.0573),
    ("Rennes", 48.1173, -1.6778),
    ("Reims", 49.2583, 4.0317),
    ("Toulon", 43.1242, 5.9280),
    ("Saint-Étienne", 45.4397, 4.3872),
    ("Le Havre", 49.4944, 0.1079),
    ("Grenoble", 45.1885, 5.7245),
    ("Dijon", 47.3220, 5.0415),
    ("Angers", 47.4784, -0.5632),
    ("Nîmes", 43.8367, 4.3601),
    ("Villeurbanne", 45.7719, 4.8902),
    ("Clermont-Ferrand", 45.7772, 3.0870),
    ("Aix-en-Provence", 43.5297, 5.4474),
    ("Le Mans", 48.0061, 0.1996),
    ("Brest", 48.3904, -4.4861),
    ("Tours", 47.3941, 0.6848),
    ("Amiens", 49.8941, 2.2958),
    ("Limoges", 45.8336, 1.2611),
    ("Annecy", 45.8992, 6.1294),
    ("Perpignan", 42.6887, 2.8948),
    ("Metz", 49.1193, 6.1757),
    ("Besançon", 47.2378, 6.0241),
    ("Orléans", 47.9030, 1.9093),
    ("Rouen", 49.4432, 1.0999),
    ("Mulhouse", 47.7508, 7.3359),
    ("Caen", 49.1829, -0.3707),
    ("Nancy", 48.6921, 6.1844),
    ("Avignon", 43.9493, 4.8055),
    ("La Rochelle", 46.1603, -1.1511),
    ("Cannes", 43.5528, 7.0174),
    ("Biarritz", 43.4832, -1.5586),
];

const MAX_SUGGESTIONS: usize = 5;

#[derive(Debug, Default, Clone, Copy)]
pub struct GazetteerGeocoder;

impl GazetteerGeocoder {
    pub fn new() -> Self {
        Self
    }

    fn lookup(name: &str) -> Option<&'static (&'static str, f64, f64)> {
        let wanted = fold(name.split(',').next().unwrap_or(name));
        CITIES.iter().find(|(city, _, _)| fold(city) == wanted)
    }
}

/// Lowercase, strip common French accents, treat hyphens as spaces.
fn fold(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            'à' | 'â' | 'ä' | 'À' | 'Â' => 'a',
            'é' | 'è' | 'ê' | 'ë' | 'É' | 'È' => 'e',
            'î' | 'ï' => 'i',
            'ô' | 'ö' => 'o',
            'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            '-' => ' ',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

fn place(entry: &(&str, f64, f64)) -> ResolvedPlace {
    let (name, lat, lng) = *entry;
    ResolvedPlace {
        label: Some(format!("{}, France", name)),
        coordinate: Coordinate::new(lat, lng),
    }
}

#[async_trait::async_trait]
impl GeocodingPort for GazetteerGeocoder {
    async fn geocode(&self, query: &str) -> Result<Option<ResolvedPlace>, DomainError> {
        Ok(Self::lookup(query).map(place))
    }
}

#[async_trait::async_trait]
impl AutocompletePort for GazetteerGeocoder {
    async fn suggest(&self, partial: &str) -> Result<Vec<PlaceCandidate>, DomainError> {
        let prefix = fold(partial);
        if prefix.is_empty() {
            return Ok(Vec::new());
        }
        Ok(CITIES
            .iter()
            .filter(|(city, _, _)| fold(city).starts_with(&prefix))
            .take(MAX_SUGGESTIONS)
            .map(|(city, _, _)| PlaceCandidate {
                place_id: (*city).to_string(),
                description: format!("{}, France", city),
            })
            .collect())
    }

    async fn resolve(&self, candidate: &PlaceCandidate) -> Result<ResolvedPlace, DomainError> {
        Self::lookup(&candidate.place_id)
            .map(place)
            .ok_or_else(|| DomainError::Resolution(format!("unknown city '{}'", candidate.place_id)))
    }
}
