//! # Status Center
//!
//! User-visible problems with the bridge description are posted to a status
//! center instead of being buried in a log. The rules engine posts an item,
//! then returns [`SpecError::Configuration`](crate::errors::SpecError) that
//! refers to it.
//!
//! [`StatusLog`] is an in-memory status center suitable for tools and tests.

use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Severity of a status item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusSeverity {
    Information,
    Warning,
    Error,
}

/// Status item categories posted by the rules engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusCategory {
    /// Hauling configuration problems (no haul truck, etc.)
    Hauling,
    /// Missing library entries
    Library,
}

/// A single status center entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusItem {
    pub id: Uuid,
    pub category: StatusCategory,
    pub severity: StatusSeverity,
    pub message: String,
    pub posted_at: DateTime<Utc>,
}

impl StatusItem {
    pub fn new(category: StatusCategory, severity: StatusSeverity, message: impl Into<String>) -> Self {
        StatusItem {
            id: Uuid::new_v4(),
            category,
            severity,
            message: message.into(),
            posted_at: Utc::now(),
        }
    }
}

/// Collects user-visible configuration problems
pub trait StatusCenter {
    /// Post an item and return its id. An item repeating the category and
    /// message of one already posted is not added again; the id of the
    /// posted item is returned instead.
    fn add(&self, item: StatusItem) -> Uuid;

    /// Remove every item in a category
    fn remove_by_category(&self, category: StatusCategory);
}

/// In-memory status center
#[derive(Debug, Default)]
pub struct StatusLog {
    items: Mutex<Vec<StatusItem>>,
}

impl StatusLog {
    pub fn new() -> Self {
        StatusLog::default()
    }

    /// Snapshot of the posted items, oldest first
    pub fn items(&self) -> Vec<StatusItem> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<StatusItem>> {
        // A panic while holding the lock cannot leave the list half-written
        self.items.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl StatusCenter for StatusLog {
    fn add(&self, item: StatusItem) -> Uuid {
        let mut items = self.lock();
        if let Some(posted) = items
            .iter()
            .find(|posted| posted.category == item.category && posted.message == item.message)
        {
            return posted.id;
        }
        let id = item.id;
        items.push(item);
        id
    }

    fn remove_by_category(&self, category: StatusCategory) {
        self.lock().retain(|item| item.category != category);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_remove() {
        let log = StatusLog::new();
        let id = log.add(StatusItem::new(StatusCategory::Hauling, StatusSeverity::Error, "No haul truck"));
        log.add(StatusItem::new(StatusCategory::Library, StatusSeverity::Warning, "Missing entry"));
        assert_eq!(log.len(), 2);
        assert_eq!(log.items()[0].id, id);

        log.remove_by_category(StatusCategory::Hauling);
        assert_eq!(log.len(), 1);
        assert_eq!(log.items()[0].category, StatusCategory::Library);
    }

    #[test]
    fn test_repeated_item_posted_once() {
        let log = StatusLog::new();
        let first = log.add(StatusItem::new(StatusCategory::Hauling, StatusSeverity::Error, "No haul truck"));
        let again = log.add(StatusItem::new(StatusCategory::Hauling, StatusSeverity::Error, "No haul truck"));
        assert_eq!(first, again);
        assert_eq!(log.len(), 1);

        // same message in another category is a different problem
        log.add(StatusItem::new(StatusCategory::Library, StatusSeverity::Error, "No haul truck"));
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_items_have_unique_ids() {
        let a = StatusItem::new(StatusCategory::Hauling, StatusSeverity::Error, "a");
        let b = StatusItem::new(StatusCategory::Hauling, StatusSeverity::Error, "a");
        assert_ne!(a.id, b.id);
    }
}
