pub mod create;
pub mod delete;
pub mod health;
pub mod list;
pub mod query;
pub mod stats;
pub mod update;

pub use create::{bulk_handler, create_handler};
pub use delete::{delete_handler, delete_many_handler};
pub use health::health_handler;
pub use list::{list_handler, sorted_handler};
pub use query::{filter_handler, quantity_handler};
pub use stats::{count_handler, grouped_handler};
pub use update::{set_quantity_handler, update_handler};

use mongodb::bson::oid::ObjectId;

use crate::error::ApiError;

/// Parse the `{id}` path segment
pub(crate) fn parse_item_id(raw: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(raw).map_err(|_| ApiError::MalformedId(raw.to_string()))
}
