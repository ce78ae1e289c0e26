//! Map overlay derived from the location state and the radius field.

use crate::domain::{Coordinate, LocationState, clamp_radius_km};

/// What the map widget draws. Never stored; recomputed on every read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusCircle {
    pub visible: bool,
    pub center: Option<Coordinate>,
    pub radius_meters: u32,
}

impl RadiusCircle {
    pub fn derive(location: &LocationState, radius_km: u32) -> Self {
        let center = location.effective_center();
        Self {
            visible: center.is_some(),
            center,
            radius_meters: clamp_radius_km(i64::from(radius_km)) * 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LocationInput;

    #[test]
    fn test_hidden_without_center() {
        let circle = RadiusCircle::derive(&LocationState::default(), 5);
        assert!(!circle.visible);
        assert_eq!(circle.center, None);
        assert_eq!(circle.radius_meters, 5000);
    }

    #[test]
    fn test_autocomplete_then_radius_edit() {
        let lyon = Coordinate::new(45.764, 4.8357);
        let mut location = LocationState::default();
        location.activate(LocationInput::AutocompleteSelection {
            label: "Lyon, France".into(),
            coordinate: lyon,
        });
        let circle = RadiusCircle::derive(&location, 10);
        assert_eq!(
            circle,
            RadiusCircle {
                visible: true,
                center: Some(lyon),
                radius_meters: 10_000,
            }
        );
    }

    #[test]
    fn test_cleared_text_hides_overlay() {
        let mut location = LocationState::default();
        location.activate(LocationInput::MapClick {
            coordinate: Coordinate::new(43.6, 1.44),
        });
        location.activate(LocationInput::TextCity { raw: String::new() });
        assert!(!RadiusCircle::derive(&location, 5).visible);
    }
}
