pub mod redirect;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for short links (mounted at /s)
pub fn router() -> Router<AppState> {
    Router::new().route("/{code}", get(redirect::follow_short_link))
}

#[derive(OpenApi)]
#[openapi(paths(redirect::follow_short_link))]
pub struct ApiDoc;
