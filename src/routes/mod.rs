use axum::{routing::get, Router};

use crate::handlers::{self, delivery};
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/delivery-order-price", get(delivery::delivery_order_price));

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api/v1", api_routes)
        .with_state(state)
}
