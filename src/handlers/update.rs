use super::parse_item_id;
use crate::error::ApiError;
use crate::item::ItemPatch;
use crate::models::{ItemResponse, SetQuantityQuery, UpdateAckResponse};
use crate::routes;
use crate::state::AppState;
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

/// PUT /items/{id} handler - Merge the supplied fields into an item
///
/// Fields absent from the body keep their stored value.
#[utoipa::path(
    put,
    path = routes::ITEM,
    params(
        ("id" = String, Path, description = "ObjectId of the item")
    ),
    request_body = ItemPatch,
    responses(
        (status = 200, description = "Updated item", body = ItemResponse),
        (status = 404, description = "Item not found", body = String, content_type = "text/plain"),
        (status = 500, description = "Malformed id, validation or database error", body = String, content_type = "text/plain")
    ),
    tag = "items"
)]
pub async fn update_handler(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    payload: Result<Json<ItemPatch>, JsonRejection>,
) -> Result<(StatusCode, Json<ItemResponse>), ApiError> {
    let id = parse_item_id(&id_str)?;
    let Json(patch) = payload?;

    match state.store.update_by_id(id, patch).await? {
        Some(item) => {
            tracing::info!("Successfully updated item with id: {}", id);
            Ok((StatusCode::OK, Json(item.into())))
        }
        None => {
            tracing::info!("Item not found with id: {}", id);
            Err(ApiError::NotFound(id))
        }
    }
}

/// PATCH /items/{id} handler - Set the quantity of one item
///
/// A missing id is not an error: the acknowledgement reports zero matches.
#[utoipa::path(
    patch,
    path = routes::ITEM,
    params(
        ("id" = String, Path, description = "ObjectId of the item"),
        SetQuantityQuery
    ),
    responses(
        (status = 200, description = "Update acknowledgement", body = UpdateAckResponse),
        (status = 500, description = "Malformed id, validation or database error", body = String, content_type = "text/plain")
    ),
    tag = "items"
)]
pub async fn set_quantity_handler(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    query: Result<Query<SetQuantityQuery>, QueryRejection>,
) -> Result<(StatusCode, Json<UpdateAckResponse>), ApiError> {
    let id = parse_item_id(&id_str)?;
    let Query(query) = query?;

    let outcome = state.store.set_quantity_by_id(id, query.quantity).await?;

    tracing::info!(
        "Set quantity={} on item {}: matched={}, modified={}",
        query.quantity,
        id,
        outcome.matched_count,
        outcome.modified_count
    );
    Ok((StatusCode::OK, Json(outcome.into())))
}
