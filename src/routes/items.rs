//! Item endpoints: one handler per CRUD verb

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::AppResult;
use crate::models::{DeleteResponse, Item, ItemCreate};
use crate::server::AppState;

/// GET /items - list every stored item
pub async fn list_items(State(state): State<AppState>) -> AppResult<Json<Vec<Item>>> {
    let items = state.db.list_items().await?;
    Ok(Json(items))
}

/// POST /items - create an item, returning it with its assigned id
pub async fn create_item(
    State(state): State<AppState>,
    Json(body): Json<ItemCreate>,
) -> AppResult<Json<Item>> {
    let item = state.db.create_item(&body).await?;
    Ok(Json(item))
}

/// PUT /items/{item_id} - full overwrite of name and description
pub async fn update_item(
    Path(item_id): Path<i64>,
    State(state): State<AppState>,
    Json(body): Json<ItemCreate>,
) -> AppResult<Json<Item>> {
    let item = state.db.update_item(item_id, &body).await?;
    Ok(Json(item))
}

/// DELETE /items/{item_id} - physical delete, returns a confirmation
pub async fn delete_item(
    Path(item_id): Path<i64>,
    State(state): State<AppState>,
) -> AppResult<Json<DeleteResponse>> {
    state.db.delete_item(item_id).await?;
    Ok(Json(DeleteResponse {
        message: "Item deleted successfully".to_string(),
    }))
}
