use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use tower_cookies::CookieManagerLayer;
use tower_http::{
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

pub mod config;
pub mod db;
pub mod error;
pub mod flash;
pub mod pages;
pub mod state;

pub mod models {
    pub mod matches;
    pub mod session;
    pub mod user;
}

pub mod repositories {
    pub mod user;
}

pub mod services {
    pub mod auth;
    pub mod search;
}

pub mod handlers {
    pub mod auth;
    pub mod search;
}

pub mod middleware_layer {
    pub mod auth;
}

pub mod validation {
    pub mod auth;
    pub mod upload;
}

use state::AppState;

/// Builds the application router.
///
/// Public routes handle login, registration, and logout; everything else
/// sits behind the session guard and redirects to `/login` when no valid
/// session is present. Uploaded files are served back out of the upload
/// root under `/static/uploads`.
pub fn app(state: AppState) -> Router {
    let public_routes = Router::new()
        .route(
            "/login",
            get(handlers::auth::login_page).post(handlers::auth::login),
        )
        .route(
            "/register",
            get(handlers::auth::register_page).post(handlers::auth::register),
        )
        .route("/logout", get(handlers::auth::logout))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route("/", get(handlers::search::dashboard))
        .route("/search-image", post(handlers::search::search_image))
        .route("/search-video", post(handlers::search::search_video))
        .route_layer(from_fn_with_state(
            state.clone(),
            middleware_layer::auth::require_auth,
        ))
        .with_state(state.clone());

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .nest_service(
            "/static/uploads",
            ServeDir::new(state.config.upload_root.clone()),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default())
                .on_request(DefaultOnRequest::default().level(Level::DEBUG))
                .on_response(DefaultOnResponse::default().level(Level::DEBUG))
                .on_failure(DefaultOnFailure::default().level(Level::ERROR)),
        )
        .layer(CookieManagerLayer::new())
        .layer(DefaultBodyLimit::max(1024 * 1024 * 1024))
}
