use axum::{
    routing::{get, put},
    Router,
};

use crate::server::AppState;

pub mod health;
pub mod items;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/items", get(items::list_items).post(items::create_item))
        .route(
            "/items/{item_id}",
            put(items::update_item).delete(items::delete_item),
        )
        .with_state(state)
}
