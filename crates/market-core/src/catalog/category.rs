//! Product categories.

use crate::error::MarketError;
use crate::ids::CategoryId;
use crate::registry::{Record, RecordStatus};
use crate::search::{Filter, Selection};
use serde::{Deserialize, Serialize};

/// A flat product category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    /// Unique category identifier.
    pub id: CategoryId,
    /// Category name, as referenced by items.
    pub name: String,
    /// Category description.
    pub description: Option<String>,
    pub status: RecordStatus,
    /// Unix timestamp of creation.
    pub created_at: i64,
}

impl Category {
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            status: RecordStatus::Active,
            created_at: crate::current_timestamp(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Filter by name or description, optionally by status.
    pub fn filter(query: &str, status: Selection<RecordStatus>) -> Filter<Category> {
        Filter::new()
            .text(query)
            .field(|c: &Category| c.name.as_str())
            .field(|c: &Category| c.description.as_deref().unwrap_or(""))
            .select(status, |c: &Category| &c.status)
    }
}

impl Record for Category {
    type Id = CategoryId;

    fn id(&self) -> &CategoryId {
        &self.id
    }

    fn validate(&self) -> Result<(), MarketError> {
        if self.name.trim().is_empty() {
            return Err(MarketError::Validation("category name is required".to_string()));
        }
        Ok(())
    }
}
