pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::forms::handlers as forms;
use crate::pages::handlers as pages;
use crate::settings::handlers as settings;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Pages
        .route("/", get(pages::handle_home))
        .route("/about", get(pages::handle_about))
        .route("/careers", get(pages::handle_careers))
        .route(
            "/sell-your-store",
            get(pages::handle_sell_your_store).post(forms::handle_acquisition),
        )
        // Form submissions that re-render the home page
        .route("/feedback", post(forms::handle_feedback))
        .route("/contact", post(forms::handle_contact))
        // Settings proxy
        .route("/api/settings", get(settings::handle_get_settings))
        .fallback(not_found)
        .with_state(state)
}
