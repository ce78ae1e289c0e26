//! Location reconciliation: three input channels, one authoritative center.
//!
//! Rules:
//! - Every activation advances the generation, cancelling in-flight text lookups.
//! - Map click and autocomplete resolve immediately and always beat a stale text lookup.
//! - A map click unlinks the text channel: later edits only change the label
//!   until the text is cleared or explicitly re-resolved.
//! - Clearing the text resets the center, whatever generation is in flight.

use crate::domain::{Completion, Coordinate, DomainError, Generation, GenerationCounter};
use crate::domain::{LocationInput, ResolvedPlace};

/// Which channel produced the current center.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationSource {
    Text,
    Autocomplete,
    MapClick,
}

/// Effect of activating an input, as seen by the async layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Activation {
    /// Center known now; nothing to fetch.
    Resolved(Coordinate),
    /// A debounced lookup for `query` must be issued, tagged with `generation`.
    Lookup { generation: Generation, query: String },
    /// Text edited while unlinked from the map pin; center untouched.
    LabelOnly,
    /// Text cleared: center and overlay reset.
    Cleared,
}

#[derive(Debug, Clone, Default)]
pub struct LocationState {
    city_text: String,
    center: Option<Coordinate>,
    source: Option<LocationSource>,
    generations: GenerationCounter,
    /// False after a map click until the text is cleared or re-resolved.
    unlinked: bool,
    /// Last resolution of the current text failed; overlay hidden, search goes text-only.
    failed: bool,
    last_error: Option<String>,
    /// Generation of the text lookup still awaited, if any.
    pending: Option<Generation>,
}

impl LocationState {
    pub fn activate(&mut self, input: LocationInput) -> Activation {
        match input {
            LocationInput::TextCity { raw } => self.edit_text(raw),
            LocationInput::AutocompleteSelection { label, coordinate } => {
                self.generations.advance();
                self.pending = None;
                if !label.is_empty() {
                    self.city_text = label;
                }
                self.pin(coordinate, LocationSource::Autocomplete);
                self.unlinked = false;
                Activation::Resolved(coordinate)
            }
            LocationInput::MapClick { coordinate } => {
                self.generations.advance();
                self.pending = None;
                self.pin(coordinate, LocationSource::MapClick);
                self.unlinked = true;
                Activation::Resolved(coordinate)
            }
        }
    }

    fn edit_text(&mut self, raw: String) -> Activation {
        if raw.trim().is_empty() {
            self.generations.advance();
            self.city_text.clear();
            self.center = None;
            self.source = None;
            self.unlinked = false;
            self.failed = false;
            self.last_error = None;
            self.pending = None;
            return Activation::Cleared;
        }
        self.city_text = raw;
        if self.unlinked {
            return Activation::LabelOnly;
        }
        self.issue_lookup()
    }

    /// Relinks the text channel after a map click and asks for a fresh lookup.
    /// Returns `None` when there is no text to resolve.
    pub fn relink_text(&mut self) -> Option<Activation> {
        if self.city_text.trim().is_empty() {
            return None;
        }
        self.unlinked = false;
        Some(self.issue_lookup())
    }

    fn issue_lookup(&mut self) -> Activation {
        let generation = self.generations.advance();
        self.pending = Some(generation);
        Activation::Lookup {
            generation,
            query: self.city_text.trim().to_string(),
        }
    }

    fn pin(&mut self, coordinate: Coordinate, source: LocationSource) {
        self.center = Some(coordinate);
        self.source = Some(source);
        self.failed = false;
        self.last_error = None;
    }

    /// True while `generation` is still the one a lookup should be issued for.
    pub fn is_current(&self, generation: Generation) -> bool {
        self.generations.is_current(generation)
    }

    /// Applies a text lookup result if its generation is still current.
    /// A failure (error or no match) keeps the previous center but hides the
    /// overlay and drops the coordinate from the next search.
    pub fn complete_lookup(
        &mut self,
        generation: Generation,
        result: Result<Option<ResolvedPlace>, DomainError>,
    ) -> Completion {
        if !self.generations.is_current(generation) {
            return Completion::Stale;
        }
        self.pending = None;
        match result {
            Ok(Some(place)) => {
                self.pin(place.coordinate, LocationSource::Text);
                Completion::Applied
            }
            Ok(None) => {
                self.fail(format!("no place found for '{}'", self.city_text.trim()));
                Completion::Failed
            }
            Err(e) => {
                self.fail(e.to_string());
                Completion::Failed
            }
        }
    }

    fn fail(&mut self, message: String) {
        self.failed = true;
        self.last_error = Some(message);
    }

    pub fn city_text(&self) -> &str {
        &self.city_text
    }

    /// Last resolved center, including one whose overlay is currently hidden.
    pub fn center(&self) -> Option<Coordinate> {
        self.center
    }

    /// Center used for the overlay and the search annotation.
    pub fn effective_center(&self) -> Option<Coordinate> {
        if self.failed { None } else { self.center }
    }

    pub fn source(&self) -> Option<LocationSource> {
        self.source
    }

    pub fn is_unlinked(&self) -> bool {
        self.unlinked
    }

    pub fn is_resolving(&self) -> bool {
        self.pending.is_some()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn generation(&self) -> Generation {
        self.generations.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LYON: Coordinate = Coordinate {
        latitude: 45.764,
        longitude: 4.8357,
    };
    const CLICK: Coordinate = Coordinate {
        latitude: 45.75,
        longitude: 4.85,
    };

    fn text(raw: &str) -> LocationInput {
        LocationInput::TextCity { raw: raw.into() }
    }

    fn lookup_generation(activation: Activation) -> Generation {
        match activation {
            Activation::Lookup { generation, .. } => generation,
            other => panic!("expected lookup, got {:?}", other),
        }
    }

    fn lyon() -> ResolvedPlace {
        ResolvedPlace {
            label: Some("Lyon, France".into()),
            coordinate: LYON,
        }
    }

    #[test]
    fn test_text_lookup_applies_when_current() {
        let mut state = LocationState::default();
        let generation = lookup_generation(state.activate(text("Lyon")));
        assert!(state.is_resolving());
        assert_eq!(
            state.complete_lookup(generation, Ok(Some(lyon()))),
            Completion::Applied
        );
        assert_eq!(state.effective_center(), Some(LYON));
        assert_eq!(state.source(), Some(LocationSource::Text));
        assert!(!state.is_resolving());
    }

    #[test]
    fn test_map_click_beats_late_text_lookup() {
        let mut state = LocationState::default();
        let mut last = lookup_generation(state.activate(text("Ly")));
        for raw in ["Lyo", "Lyon"] {
            last = lookup_generation(state.activate(text(raw)));
        }
        state.activate(LocationInput::MapClick { coordinate: CLICK });
        assert_eq!(
            state.complete_lookup(last, Ok(Some(lyon()))),
            Completion::Stale
        );
        assert_eq!(state.effective_center(), Some(CLICK));
        assert_eq!(state.source(), Some(LocationSource::MapClick));
    }

    #[test]
    fn test_autocomplete_beats_late_text_lookup() {
        let mut state = LocationState::default();
        let generation = lookup_generation(state.activate(text("Par")));
        state.activate(LocationInput::AutocompleteSelection {
            label: "Lyon, France".into(),
            coordinate: LYON,
        });
        let paris = ResolvedPlace {
            label: None,
            coordinate: Coordinate::new(48.8566, 2.3522),
        };
        assert_eq!(
            state.complete_lookup(generation, Ok(Some(paris))),
            Completion::Stale
        );
        assert_eq!(state.effective_center(), Some(LYON));
        assert_eq!(state.city_text(), "Lyon, France");
    }

    #[test]
    fn test_older_text_lookup_is_stale() {
        let mut state = LocationState::default();
        let first = lookup_generation(state.activate(text("Lille")));
        let second = lookup_generation(state.activate(text("Lyon")));
        assert_eq!(
            state.complete_lookup(first, Ok(Some(lyon()))),
            Completion::Stale
        );
        assert!(state.is_resolving());
        assert_eq!(
            state.complete_lookup(second, Ok(Some(lyon()))),
            Completion::Applied
        );
    }

    #[test]
    fn test_failure_keeps_center_but_hides_it() {
        let mut state = LocationState::default();
        state.activate(LocationInput::MapClick { coordinate: CLICK });
        let generation = state.relink_text().map(lookup_generation);
        assert!(generation.is_none(), "no text to relink yet");

        state.activate(text("Lyon"));
        let generation = state.relink_text().map(lookup_generation).unwrap();
        let outcome = state.complete_lookup(
            generation,
            Err(DomainError::Resolution("ZERO_RESULTS".into())),
        );
        assert_eq!(outcome, Completion::Failed);
        assert_eq!(state.center(), Some(CLICK));
        assert_eq!(state.effective_center(), None);
        assert!(state.last_error().is_some());
    }

    #[test]
    fn test_no_match_is_a_failure() {
        let mut state = LocationState::default();
        let generation = lookup_generation(state.activate(text("Atlantis")));
        assert_eq!(state.complete_lookup(generation, Ok(None)), Completion::Failed);
        assert_eq!(state.effective_center(), None);
    }

    #[test]
    fn test_map_click_unlinks_text_channel() {
        let mut state = LocationState::default();
        state.activate(LocationInput::MapClick { coordinate: CLICK });
        assert!(state.is_unlinked());
        assert_eq!(state.activate(text("Marseille")), Activation::LabelOnly);
        assert_eq!(state.city_text(), "Marseille");
        assert_eq!(state.effective_center(), Some(CLICK));

        let generation = state.relink_text().map(lookup_generation).unwrap();
        assert!(!state.is_unlinked());
        let marseille = ResolvedPlace {
            label: None,
            coordinate: Coordinate::new(43.2965, 5.3698),
        };
        state.complete_lookup(generation, Ok(Some(marseille.clone())));
        assert_eq!(state.effective_center(), Some(marseille.coordinate));
    }

    #[test]
    fn test_clearing_text_resets_everything() {
        let mut state = LocationState::default();
        let generation = lookup_generation(state.activate(text("Lyon")));
        state.activate(LocationInput::MapClick { coordinate: CLICK });
        assert_eq!(state.activate(text("")), Activation::Cleared);
        assert_eq!(state.center(), None);
        assert!(!state.is_unlinked());
        assert_eq!(
            state.complete_lookup(generation, Ok(Some(lyon()))),
            Completion::Stale
        );
        assert_eq!(state.center(), None);
    }
}
