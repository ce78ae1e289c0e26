//! Which result records are checked for export.

use crate::domain::BusinessRecord;
use std::collections::HashSet;

/// Set of record ids. Only ids of the live result list are ever members.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: HashSet<String>,
}

impl SelectionSet {
    /// Flips membership of `id`. Ids absent from `records` are ignored.
    /// Returns whether the id is selected afterwards.
    pub fn toggle(&mut self, id: &str, records: &[BusinessRecord]) -> bool {
        if self.ids.remove(id) {
            return false;
        }
        if records.iter().any(|r| r.id == id) {
            self.ids.insert(id.to_string());
            return true;
        }
        false
    }

    /// Selects every record, or clears the set if everything is already selected.
    pub fn select_all(&mut self, records: &[BusinessRecord]) {
        if self.covers(records) || records.is_empty() {
            self.ids.clear();
        } else {
            self.ids = records.iter().map(|r| r.id.clone()).collect();
        }
    }

    /// Drops ids that no longer belong to `records`.
    pub fn retain_known(&mut self, records: &[BusinessRecord]) {
        self.ids.retain(|id| records.iter().any(|r| &r.id == id));
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// True when every record of a non-empty list is selected (drives the "Deselect all" label).
    /// Duplicate ids in `records` count once.
    pub fn covers(&self, records: &[BusinessRecord]) -> bool {
        !records.is_empty() && records.iter().all(|r| self.ids.contains(&r.id))
    }

    /// Selected records, in result order.
    pub fn filter(&self, records: &[BusinessRecord]) -> Vec<BusinessRecord> {
        records
            .iter()
            .filter(|r| self.ids.contains(&r.id))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<BusinessRecord> {
        vec![
            BusinessRecord::new("a", "Alpha", "1 rue A"),
            BusinessRecord::new("b", "Beta", "2 rue B"),
            BusinessRecord::new("c", "Gamma", "3 rue C"),
        ]
    }

    #[test]
    fn test_toggle_flips_membership() {
        let records = records();
        let mut selection = SelectionSet::default();
        assert!(selection.toggle("b", &records));
        assert!(selection.contains("b"));
        assert!(!selection.toggle("b", &records));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_toggle_unknown_id_is_ignored() {
        let mut selection = SelectionSet::default();
        assert!(!selection.toggle("zzz", &records()));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_select_all_twice_returns_to_empty() {
        let records = records();
        let mut selection = SelectionSet::default();
        selection.toggle("a", &records);
        selection.select_all(&records);
        assert_eq!(selection.len(), 3);
        assert!(selection.covers(&records));
        selection.select_all(&records);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_select_all_on_empty_results_stays_empty() {
        let mut selection = SelectionSet::default();
        selection.select_all(&[]);
        assert!(selection.is_empty());
        assert!(!selection.covers(&[]));
    }

    #[test]
    fn test_select_all_with_duplicate_ids_toggles_back() {
        let mut records = records();
        records.push(BusinessRecord::new("b", "Beta (page 2)", "2 rue B"));
        let mut selection = SelectionSet::default();
        selection.select_all(&records);
        assert_eq!(selection.len(), 3);
        assert!(selection.covers(&records));
        selection.select_all(&records);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_filter_preserves_result_order() {
        let records = records();
        let mut selection = SelectionSet::default();
        selection.toggle("c", &records);
        selection.toggle("a", &records);
        let ids: Vec<_> = selection
            .filter(&records)
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_retain_known_drops_vanished_ids() {
        let records = records();
        let mut selection = SelectionSet::default();
        selection.select_all(&records);
        selection.retain_known(&records[..1]);
        assert_eq!(selection.len(), 1);
        assert!(selection.contains("a"));
    }
}
