use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::config::{create_cors_layer, Config, SecurityHeaders};
use crate::handlers::health_check;
use crate::handlers::purchase::{
    confirm_purchase, show_confirmation, show_purchase_dialog, submit_purchase_dialog,
};
use crate::purchase::handoff::CONFIRMATION_PATH;
use crate::state::AppState;

pub fn create_routes(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .route("/health", get(health_check))
        .route(
            "/events/:event_id/purchase",
            get(show_purchase_dialog).post(submit_purchase_dialog),
        )
        .route(
            CONFIRMATION_PATH,
            get(show_confirmation).post(confirm_purchase),
        )
        .with_state(state);

    SecurityHeaders::new(config.production)
        .apply(router)
        .layer(create_cors_layer(&config.allowed_origins))
        .layer(TraceLayer::new_for_http())
}
