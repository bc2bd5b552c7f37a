//! Data access for the items collection.
//!
//! `ItemStore` is the seam between the HTTP handlers and the database. The
//! production implementation talks to MongoDB; the test suite swaps in an
//! in-memory store with the same query semantics.

pub mod mongo;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::item::{Item, ItemPatch, NewItem, SchemaError};

pub use mongo::MongoItemStore;

/// Errors returned by data access operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Validation(#[from] SchemaError),

    #[error("{0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Database unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Field an ordered listing can be sorted on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    Quantity,
    Id,
}

impl SortField {
    /// Document key of the field
    pub fn key(self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Quantity => "quantity",
            SortField::Id => "_id",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    fn as_i32(self) -> i32 {
        match self {
            SortDirection::Ascending => 1,
            SortDirection::Descending => -1,
        }
    }
}

/// Match/modify counts of a single-document update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateOutcome {
    pub matched_count: u64,
    pub modified_count: u64,
}

/// One row of the per-name quantity aggregation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameTotal {
    #[serde(rename = "_id")]
    pub name: String,
    #[serde(rename = "totalQuantity")]
    pub total_quantity: i64,
}

/// Operations over the items collection
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// All items in natural order
    async fn list(&self) -> StoreResult<Vec<Item>>;

    /// Validate and insert a single item
    async fn insert_one(&self, item: NewItem) -> StoreResult<Item>;

    /// Insert a batch. Nothing is written if any element fails validation.
    async fn insert_many(&self, items: Vec<NewItem>) -> StoreResult<Vec<Item>>;

    async fn find_by_name(&self, name: &str) -> StoreResult<Vec<Item>>;

    async fn find_by_quantity_greater_than(&self, threshold: i64) -> StoreResult<Vec<Item>>;

    async fn list_sorted(
        &self,
        field: SortField,
        direction: SortDirection,
    ) -> StoreResult<Vec<Item>>;

    /// Merge the supplied fields and return the updated item, or `None` when
    /// no item has this id
    async fn update_by_id(&self, id: ObjectId, patch: ItemPatch) -> StoreResult<Option<Item>>;

    async fn set_quantity_by_id(&self, id: ObjectId, quantity: i64) -> StoreResult<UpdateOutcome>;

    /// Remove and return the item, or `None` when no item has this id
    async fn delete_by_id(&self, id: ObjectId) -> StoreResult<Option<Item>>;

    /// Remove every item with quantity strictly below the threshold
    async fn delete_many_by_quantity_less_than(&self, threshold: i64) -> StoreResult<u64>;

    async fn count_all(&self) -> StoreResult<u64>;

    /// Sum of quantity per distinct name, ordered by name
    async fn group_by_name_sum(&self) -> StoreResult<Vec<NameTotal>>;

    /// Round-trip to the database
    async fn ping(&self) -> StoreResult<()>;

    /// Release driver resources
    async fn close(&self) {}
}
