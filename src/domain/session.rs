//! Search session state machine: `Idle -> Submitting -> Succeeded | Failed`.
//!
//! Exactly one session is live. Each submission gets a fresh token; a response
//! carrying an older token is discarded (last submit wins).

use crate::domain::{BusinessRecord, Completion, DomainError, Generation, GenerationCounter};
use crate::domain::SearchParameters;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone)]
pub struct SearchSession {
    phase: SessionPhase,
    records: Vec<BusinessRecord>,
    error: Option<String>,
    last_parameters: Option<SearchParameters>,
    tokens: GenerationCounter,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self {
            phase: SessionPhase::Idle,
            records: Vec::new(),
            error: None,
            last_parameters: None,
            tokens: GenerationCounter::default(),
        }
    }
}

impl SearchSession {
    /// Starts a new session, superseding any in-flight one. The caller must
    /// have validated `parameters` and must clear the selection.
    pub fn begin(&mut self, parameters: SearchParameters) -> Generation {
        let token = self.tokens.advance();
        self.phase = SessionPhase::Submitting;
        self.records.clear();
        self.error = None;
        self.last_parameters = Some(parameters);
        token
    }

    /// Applies the backend outcome if `token` is still the live submission.
    pub fn complete(
        &mut self,
        token: Generation,
        outcome: Result<Vec<BusinessRecord>, DomainError>,
    ) -> Completion {
        if !self.tokens.is_current(token) || self.phase != SessionPhase::Submitting {
            return Completion::Stale;
        }
        match outcome {
            Ok(records) => {
                self.records = records;
                self.phase = SessionPhase::Succeeded;
                Completion::Applied
            }
            Err(e) => {
                self.records.clear();
                self.error = Some(e.user_message());
                self.phase = SessionPhase::Failed;
                Completion::Failed
            }
        }
    }

    /// Dismisses a failure message. `Failed -> Idle`; other phases are untouched.
    pub fn dismiss_error(&mut self) {
        if self.phase == SessionPhase::Failed {
            self.error = None;
            self.phase = SessionPhase::Idle;
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == SessionPhase::Submitting
    }

    pub fn records(&self) -> &[BusinessRecord] {
        &self.records
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Parameters of the latest submission; exports are built from these.
    pub fn last_parameters(&self) -> Option<&SearchParameters> {
        self.last_parameters.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(keyword: &str) -> SearchParameters {
        SearchParameters::new(keyword, "Lyon", 5, None)
    }

    #[test]
    fn test_success_stores_records() {
        let mut session = SearchSession::default();
        assert_eq!(session.phase(), SessionPhase::Idle);
        let token = session.begin(params("spa"));
        assert!(session.is_submitting());
        let records = vec![BusinessRecord::new("1", "Spa", "Lyon")];
        assert_eq!(session.complete(token, Ok(records)), Completion::Applied);
        assert_eq!(session.phase(), SessionPhase::Succeeded);
        assert_eq!(session.records().len(), 1);
    }

    #[test]
    fn test_failure_empties_records_and_keeps_message() {
        let mut session = SearchSession::default();
        let token = session.begin(params("spa"));
        session.complete(token, Ok(vec![BusinessRecord::new("1", "Spa", "Lyon")]));
        let token = session.begin(params("spa"));
        let outcome = session.complete(token, Err(DomainError::Backend("boom".into())));
        assert_eq!(outcome, Completion::Failed);
        assert_eq!(session.phase(), SessionPhase::Failed);
        assert!(session.records().is_empty());
        assert_eq!(session.error(), Some("Search failed: boom"));

        session.dismiss_error();
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert_eq!(session.error(), None);
    }

    #[test]
    fn test_last_submit_wins() {
        let mut session = SearchSession::default();
        let first = session.begin(params("café"));
        let second = session.begin(params("bar"));
        let late = vec![BusinessRecord::new("old", "Old", "x")];
        assert_eq!(session.complete(first, Ok(late)), Completion::Stale);
        assert!(session.is_submitting());
        assert_eq!(session.last_parameters().unwrap().keyword, "bar");
        assert_eq!(session.complete(second, Ok(vec![])), Completion::Applied);
    }

    #[test]
    fn test_duplicate_completion_is_stale() {
        let mut session = SearchSession::default();
        let token = session.begin(params("spa"));
        session.complete(token, Ok(vec![]));
        assert_eq!(session.complete(token, Ok(vec![])), Completion::Stale);
    }
}
