//! The coordinator-owned state object.
//!
//! Use cases mutate it under the coordinator's lock; everything else reads clones.

use crate::domain::{
    BusinessRecord, Completion, DomainError, Generation, LocationState, Notification,
    RadiusCircle, SearchParameters, SearchSession, SelectionSet, parse_radius_input,
};
use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone)]
pub struct AppState {
    keyword: String,
    radius_input: String,
    default_radius_km: u32,
    location: LocationState,
    session: SearchSession,
    selection: SelectionSet,
    dark_mode: bool,
    notification: Option<Notification>,
    exports_in_flight: usize,
}

impl AppState {
    pub fn new(default_radius_km: u32) -> Self {
        Self {
            keyword: String::new(),
            radius_input: default_radius_km.to_string(),
            default_radius_km,
            location: LocationState::default(),
            session: SearchSession::default(),
            selection: SelectionSet::default(),
            dark_mode: false,
            notification: None,
            exports_in_flight: 0,
        }
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn radius_input(&self) -> &str {
        &self.radius_input
    }

    /// Radius from the text field, clamped; falls back to the default when unparseable.
    pub fn radius_km(&self) -> u32 {
        parse_radius_input(&self.radius_input, self.default_radius_km)
    }

    pub fn location(&self) -> &LocationState {
        &self.location
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    pub fn records(&self) -> &[BusinessRecord] {
        self.session.records()
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn exports_in_flight(&self) -> usize {
        self.exports_in_flight
    }

    pub fn circle(&self) -> RadiusCircle {
        RadiusCircle::derive(&self.location, self.radius_km())
    }

    /// Parameters a submit would send right now.
    pub fn current_parameters(&self) -> SearchParameters {
        SearchParameters::new(
            self.keyword.clone(),
            self.location.city_text().to_string(),
            i64::from(self.radius_km()),
            self.location.effective_center(),
        )
    }

    pub fn active_notification(&self, now: DateTime<Utc>, ttl: Duration) -> Option<&Notification> {
        self.notification.as_ref().filter(|n| n.is_active(now, ttl))
    }

    pub(crate) fn set_keyword(&mut self, keyword: String) {
        self.keyword = keyword;
    }

    pub(crate) fn set_radius_input(&mut self, input: String) {
        self.radius_input = input;
    }

    pub(crate) fn location_mut(&mut self) -> &mut LocationState {
        &mut self.location
    }

    /// Starts a new session and empties the selection, even for an identical search.
    pub(crate) fn begin_search(&mut self, parameters: SearchParameters) -> Generation {
        self.selection.clear();
        self.session.begin(parameters)
    }

    pub(crate) fn complete_search(
        &mut self,
        token: Generation,
        outcome: Result<Vec<BusinessRecord>, DomainError>,
    ) -> Completion {
        let completion = self.session.complete(token, outcome);
        if completion != Completion::Stale {
            self.selection.retain_known(self.session.records());
        }
        completion
    }

    pub(crate) fn dismiss_search_error(&mut self) {
        self.session.dismiss_error();
    }

    pub(crate) fn toggle_selection(&mut self, id: &str) -> bool {
        self.selection.toggle(id, self.session.records())
    }

    pub(crate) fn select_all(&mut self) {
        self.selection.select_all(self.session.records());
    }

    pub(crate) fn set_dark_mode(&mut self, enabled: bool) {
        self.dark_mode = enabled;
    }

    pub(crate) fn notify(&mut self, notification: Notification) {
        self.notification = Some(notification);
    }

    pub(crate) fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    pub(crate) fn export_started(&mut self) {
        self.exports_in_flight += 1;
    }

    pub(crate) fn export_finished(&mut self) {
        self.exports_in_flight = self.exports_in_flight.saturating_sub(1);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(crate::domain::DEFAULT_RADIUS_KM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LocationInput;

    fn three() -> Vec<BusinessRecord> {
        (1..=3)
            .map(|i| BusinessRecord::new(i.to_string(), format!("B{}", i), "x"))
            .collect()
    }

    #[test]
    fn test_new_search_empties_selection_even_if_identical() {
        let mut state = AppState::default();
        state.set_keyword("spa".into());
        let token = state.begin_search(state.current_parameters());
        state.complete_search(token, Ok(three()));
        state.select_all();
        assert_eq!(state.selection().len(), 3);

        state.begin_search(state.current_parameters());
        assert!(state.selection().is_empty());
    }

    #[test]
    fn test_current_parameters_use_effective_center() {
        let mut state = AppState::default();
        state.set_radius_input("70".into());
        state.location_mut().activate(LocationInput::AutocompleteSelection {
            label: "Nice, France".into(),
            coordinate: crate::domain::Coordinate::new(43.7, 7.26),
        });
        let params = state.current_parameters();
        assert_eq!(params.radius_km, 50);
        assert_eq!(params.city_label, "Nice, France");
        assert!(params.center.is_some());
    }

    #[test]
    fn test_export_counter_never_underflows() {
        let mut state = AppState::default();
        state.export_finished();
        assert_eq!(state.exports_in_flight(), 0);
        state.export_started();
        state.export_started();
        state.export_finished();
        assert_eq!(state.exports_in_flight(), 1);
    }
}
