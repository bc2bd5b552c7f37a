use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::item::Item;
use crate::store::{NameTotal, UpdateOutcome};

pub const DEFAULT_FILTER_NAME: &str = "Banana";
pub const DEFAULT_QUANTITY_ABOVE: i64 = 5;
pub const DEFAULT_PATCH_QUANTITY: i64 = 20;
pub const DEFAULT_DELETE_BELOW: i64 = 5;

/// An item as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ItemResponse {
    /// 24-character hex ObjectId
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub quantity: i64,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id.to_hex(),
            name: item.name,
            quantity: item.quantity,
        }
    }
}

pub fn item_responses(items: Vec<Item>) -> Vec<ItemResponse> {
    items.into_iter().map(ItemResponse::from).collect()
}

/// Response type for successful DELETE /items/{id}
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub message: String,
    pub item: ItemResponse,
}

/// Acknowledgement of a single-document update
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAckResponse {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
}

impl From<UpdateOutcome> for UpdateAckResponse {
    fn from(outcome: UpdateOutcome) -> Self {
        Self {
            acknowledged: true,
            matched_count: outcome.matched_count,
            modified_count: outcome.modified_count,
        }
    }
}

/// Acknowledgement of a bulk delete
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteManyResponse {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CountResponse {
    #[serde(rename = "totalItems")]
    pub total_items: u64,
}

/// Total quantity for one distinct name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NameTotalResponse {
    #[serde(rename = "_id")]
    pub name: String,
    #[serde(rename = "totalQuantity")]
    pub total_quantity: i64,
}

impl From<NameTotal> for NameTotalResponse {
    fn from(total: NameTotal) -> Self {
        Self {
            name: total.name,
            total_quantity: total.total_quantity,
        }
    }
}

/// Query parameters for the exact-name filter
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NameQuery {
    /// Exact name to match (default: Banana)
    #[serde(default = "default_filter_name")]
    pub name: String,
}

fn default_filter_name() -> String {
    DEFAULT_FILTER_NAME.to_string()
}

/// Query parameters for the quantity filter
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct QuantityQuery {
    /// Return items with quantity strictly greater than this (default: 5)
    #[serde(default = "default_quantity_above")]
    pub gt: i64,
}

fn default_quantity_above() -> i64 {
    DEFAULT_QUANTITY_ABOVE
}

/// Query parameters for the sorted listing
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SortQuery {
    /// Field to sort on: name, quantity or _id (default: name)
    pub field: Option<String>,
    /// Direction: asc or desc (default: asc)
    pub order: Option<String>,
}

/// Query parameters for PATCH /items/{id}
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SetQuantityQuery {
    /// New quantity (default: 20)
    #[serde(default = "default_patch_quantity")]
    pub quantity: i64,
}

fn default_patch_quantity() -> i64 {
    DEFAULT_PATCH_QUANTITY
}

/// Query parameters for the bulk delete
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DeleteManyQuery {
    /// Remove items with quantity strictly less than this (default: 5)
    #[serde(default = "default_delete_below")]
    pub lt: i64,
}

fn default_delete_below() -> i64 {
    DEFAULT_DELETE_BELOW
}
