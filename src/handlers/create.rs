use crate::error::ApiError;
use crate::item::{demo_batch, NewItem};
use crate::models::{item_responses, ItemResponse};
use crate::routes;
use crate::state::AppState;
use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};

/// POST /items handler - Create a single item
#[utoipa::path(
    post,
    path = routes::ITEMS,
    request_body = NewItem,
    responses(
        (status = 200, description = "Item created", body = ItemResponse),
        (status = 500, description = "Validation, body or database error", body = String, content_type = "text/plain")
    ),
    tag = "items"
)]
pub async fn create_handler(
    State(state): State<AppState>,
    payload: Result<Json<NewItem>, JsonRejection>,
) -> Result<(StatusCode, Json<ItemResponse>), ApiError> {
    let Json(new_item) = payload?;

    let item = state.store.insert_one(new_item).await?;

    tracing::info!("Created item with id: {}", item.id);
    Ok((StatusCode::OK, Json(item.into())))
}

/// POST /items/bulk handler - Insert the fixed demo batch
///
/// The request body is ignored; the same ten items are inserted every time.
#[utoipa::path(
    post,
    path = routes::ITEMS_BULK,
    responses(
        (status = 200, description = "Inserted items", body = Vec<ItemResponse>),
        (status = 500, description = "Database error", body = String, content_type = "text/plain")
    ),
    tag = "items"
)]
pub async fn bulk_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Vec<ItemResponse>>), ApiError> {
    let items = state.store.insert_many(demo_batch()).await?;

    tracing::info!("Inserted demo batch of {} items", items.len());
    Ok((StatusCode::OK, Json(item_responses(items))))
}
