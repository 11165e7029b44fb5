//! Owned, ordered record lists with add/edit/delete.
//!
//! Products, categories, customers, suppliers and sales are all kept the
//! same way: a list unique by id, mutated one call at a time.

use crate::error::MarketError;
use crate::search::Filter;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Active/inactive flag shared by every managed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    #[default]
    Active,
    Inactive,
}

impl RecordStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordStatus::Active => "active",
            RecordStatus::Inactive => "inactive",
        }
    }

    pub fn is_active(&self) -> bool {
        *self == RecordStatus::Active
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RecordStatus {
    type Err = MarketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(RecordStatus::Active),
            "inactive" => Ok(RecordStatus::Inactive),
            other => Err(MarketError::validation(format!("unknown status '{}'", other))),
        }
    }
}

/// A record that can live in a [`Registry`].
pub trait Record {
    type Id: Clone + PartialEq + fmt::Display;

    fn id(&self) -> &Self::Id;

    /// Field checks run before insert and update.
    fn validate(&self) -> Result<(), MarketError> {
        Ok(())
    }
}

/// Ordered list of records, unique by id.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Registry<T> {
    records: Vec<T>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T: Record> Registry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from seed records, rejecting invalid or duplicate ones.
    pub fn from_records(records: impl IntoIterator<Item = T>) -> Result<Self, MarketError> {
        let mut registry = Self::new();
        for record in records {
            registry.insert(record)?;
        }
        Ok(registry)
    }

    /// Append a new record.
    pub fn insert(&mut self, record: T) -> Result<(), MarketError> {
        record.validate()?;
        if self.contains(record.id()) {
            return Err(MarketError::Duplicate(record.id().to_string()));
        }
        debug!(id = %record.id(), "record inserted");
        self.records.push(record);
        Ok(())
    }

    /// Replace the record with the same id.
    ///
    /// Returns `Ok(false)` without touching anything when the id is unknown.
    pub fn update(&mut self, record: T) -> Result<bool, MarketError> {
        record.validate()?;
        match self.records.iter_mut().find(|r| r.id() == record.id()) {
            Some(slot) => {
                debug!(id = %record.id(), "record updated");
                *slot = record;
                Ok(true)
            }
            None => {
                debug!(id = %record.id(), "update ignored, unknown id");
                Ok(false)
            }
        }
    }

    /// Remove a record. Unknown ids are a no-op.
    pub fn remove(&mut self, id: &T::Id) -> Option<T> {
        let index = self.records.iter().position(|r| r.id() == id)?;
        debug!(id = %id, "record removed");
        Some(self.records.remove(index))
    }

    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn get_mut(&mut self, id: &T::Id) -> Option<&mut T> {
        self.records.iter_mut().find(|r| r.id() == id)
    }

    pub fn contains(&self, id: &T::Id) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Lazily filter the records, keeping insertion order.
    pub fn filter<'s>(&'s self, filter: &'s Filter<T>) -> impl Iterator<Item = &'s T> + 's {
        filter.apply(self.records.iter())
    }
}

impl<'a, T> IntoIterator for &'a Registry<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Note {
        id: u32,
        body: String,
    }

    impl Record for Note {
        type Id = u32;

        fn id(&self) -> &u32 {
            &self.id
        }

        fn validate(&self) -> Result<(), MarketError> {
            if self.body.is_empty() {
                return Err(MarketError::validation("body is required"));
            }
            Ok(())
        }
    }

    fn note(id: u32, body: &str) -> Note {
        Note {
            id,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_insert_and_get() {
        let mut registry = Registry::new();
        registry.insert(note(1, "first")).unwrap();
        registry.insert(note(2, "second")).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(&2).unwrap().body, "second");
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut registry = Registry::new();
        registry.insert(note(1, "first")).unwrap();
        let err = registry.insert(note(1, "again")).unwrap_err();
        assert_eq!(err, MarketError::Duplicate("1".to_string()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_validation_runs_on_insert_and_update() {
        let mut registry = Registry::new();
        assert!(registry.insert(note(1, "")).is_err());

        registry.insert(note(1, "ok")).unwrap();
        assert!(registry.update(note(1, "")).is_err());
        assert_eq!(registry.get(&1).unwrap().body, "ok");
    }

    #[test]
    fn test_update_unknown_is_noop() {
        let mut registry = Registry::from_records(vec![note(1, "a")]).unwrap();
        let before = registry.clone();
        assert!(!registry.update(note(9, "b")).unwrap());
        assert_eq!(registry, before);
    }

    #[test]
    fn test_remove() {
        let mut registry = Registry::from_records(vec![note(1, "a"), note(2, "b")]).unwrap();
        assert_eq!(registry.remove(&1), Some(note(1, "a")));
        assert_eq!(registry.remove(&1), None);
        assert_eq!(registry.iter().map(|n| n.id).collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_filter_keeps_order() {
        let registry =
            Registry::from_records(vec![note(1, "apple"), note(2, "pear"), note(3, "apricot")])
                .unwrap();
        let filter = Filter::new().text("ap").field(|n: &Note| n.body.as_str());
        let ids: Vec<_> = registry.filter(&filter).map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_status_parse() {
        assert_eq!("Active".parse::<RecordStatus>().unwrap(), RecordStatus::Active);
        assert!("archived".parse::<RecordStatus>().is_err());
    }
}
