use super::parse_item_id;
use crate::error::ApiError;
use crate::models::{DeleteManyQuery, DeleteManyResponse, DeleteResponse};
use crate::routes;
use crate::state::AppState;
use axum::{
    extract::rejection::QueryRejection,
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

/// DELETE /items/{id} handler - Remove one item
#[utoipa::path(
    delete,
    path = routes::ITEM,
    params(
        ("id" = String, Path, description = "ObjectId of the item")
    ),
    responses(
        (status = 200, description = "Item removed", body = DeleteResponse),
        (status = 404, description = "Item not found", body = String, content_type = "text/plain"),
        (status = 500, description = "Malformed id or database error", body = String, content_type = "text/plain")
    ),
    tag = "items"
)]
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<(StatusCode, Json<DeleteResponse>), ApiError> {
    let id = parse_item_id(&id_str)?;

    match state.store.delete_by_id(id).await? {
        Some(item) => {
            tracing::info!("Successfully deleted item with id: {}", id);
            Ok((
                StatusCode::OK,
                Json(DeleteResponse {
                    message: "Item deleted successfully".to_string(),
                    item: item.into(),
                }),
            ))
        }
        None => {
            tracing::info!("Item not found with id: {}", id);
            Err(ApiError::NotFound(id))
        }
    }
}

/// DELETE /items/deleteMany handler - Remove items below a quantity
///
/// Query parameters:
/// - lt: remove items with quantity strictly less than this (optional, default: 5)
#[utoipa::path(
    delete,
    path = routes::ITEMS_DELETE_MANY,
    params(DeleteManyQuery),
    responses(
        (status = 200, description = "Deletion acknowledgement", body = DeleteManyResponse),
        (status = 500, description = "Invalid query parameter or database error", body = String, content_type = "text/plain")
    ),
    tag = "items"
)]
pub async fn delete_many_handler(
    State(state): State<AppState>,
    query: Result<Query<DeleteManyQuery>, QueryRejection>,
) -> Result<(StatusCode, Json<DeleteManyResponse>), ApiError> {
    let Query(query) = query?;

    let deleted_count = state.store.delete_many_by_quantity_less_than(query.lt).await?;

    tracing::info!("Deleted {} items with quantity < {}", deleted_count, query.lt);
    Ok((
        StatusCode::OK,
        Json(DeleteManyResponse {
            acknowledged: true,
            deleted_count,
        }),
    ))
}
