//! Per-scope registry of live mocks

use crate::models::{MockRecord, MockState};
use indexmap::IndexMap;

/// Mock name → lifecycle record for one test body or one group's hooks.
///
/// Holds at most one record per name; a later creation replaces the earlier
/// one in place.
#[derive(Debug, Default)]
pub struct MockRegistry {
    records: IndexMap<String, MockRecord>,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, name: &str) {
        log::trace!("mock created: {}", name);
        self.records
            .insert(name.to_string(), MockRecord::created(name));
    }

    /// Releasing a name that was never recorded (or already reported) is a no-op.
    pub fn mark_released(&mut self, name: &str) {
        if let Some(record) = self.records.get_mut(name) {
            log::trace!("mock released: {}", name);
            record.state = MockState::Released;
        }
    }

    pub fn mark_all_released(&mut self) {
        for record in self.records.values_mut() {
            record.state = MockState::Released;
        }
    }

    /// Remove and return every record still in `Created`, in insertion order.
    pub fn drain_unreleased(&mut self) -> Vec<MockRecord> {
        let (unreleased, kept): (IndexMap<_, _>, IndexMap<_, _>) =
            std::mem::take(&mut self.records)
                .into_iter()
                .partition(|(_, record)| record.state == MockState::Created);
        self.records = kept;
        unreleased.into_values().collect()
    }

    pub fn state(&self, name: &str) -> Option<MockState> {
        self.records.get(name).map(|record| record.state)
    }

    pub fn has_unreleased(&self) -> bool {
        self.records.values().any(|record| !record.is_released())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names(records: &[MockRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_drain_returns_created_in_insertion_order() {
        let mut registry = MockRegistry::new();
        registry.record("ajaxSpy");
        registry.record("someStub");
        registry.record("anotherSpy");
        registry.mark_released("someStub");

        let drained = registry.drain_unreleased();
        assert_eq!(names(&drained), vec!["ajaxSpy", "anotherSpy"]);
    }

    #[test]
    fn test_drain_is_destructive() {
        let mut registry = MockRegistry::new();
        registry.record("stub");

        assert_eq!(registry.drain_unreleased().len(), 1);
        assert!(registry.drain_unreleased().is_empty());
        assert_eq!(registry.state("stub"), None);
    }

    #[test]
    fn test_released_records_survive_drain() {
        let mut registry = MockRegistry::new();
        registry.record("spy");
        registry.mark_released("spy");

        assert!(registry.drain_unreleased().is_empty());
        assert_eq!(registry.state("spy"), Some(MockState::Released));
    }

    #[test]
    fn test_release_of_unknown_name_is_ignored() {
        let mut registry = MockRegistry::new();
        registry.mark_released("neverCreated");
        assert!(registry.is_empty());
    }

    #[test]
    fn test_recreation_resets_state() {
        let mut registry = MockRegistry::new();
        registry.record("stub");
        registry.mark_released("stub");
        registry.record("stub");

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.state("stub"), Some(MockState::Created));
    }

    #[test]
    fn test_mark_all_released() {
        let mut registry = MockRegistry::new();
        registry.record("a");
        registry.record("b");
        registry.mark_all_released();

        assert!(!registry.has_unreleased());
        assert!(registry.drain_unreleased().is_empty());
    }
}
