use crate::api::ErrorResponse;
use crate::config::Config;
use crate::db::DbPool;
use crate::error::ApiError;
use crate::get_conn;
use crate::store::DieselShortLinkStore;
use axum::{
    extract::{Path, State},
    response::Redirect,
};
use foodgram_core::resolve_link;
use std::sync::Arc;
use uuid::Uuid;

/// Frontend path of a recipe page
pub fn recipe_page_path(recipe_id: Uuid) -> String {
    format!("/recipes/{}", recipe_id)
}

#[utoipa::path(
    get,
    path = "/s/{code}",
    tag = "short_links",
    params(
        ("code" = String, Path, description = "Short code")
    ),
    responses(
        (status = 307, description = "Redirect to the recipe page"),
        (status = 404, description = "Unknown short code", body = ErrorResponse)
    )
)]
pub async fn follow_short_link(
    State(pool): State<Arc<DbPool>>,
    State(config): State<Arc<Config>>,
    Path(code): Path<String>,
) -> Result<Redirect, ApiError> {
    let mut conn = get_conn!(pool);

    let recipe_id = resolve_link(&mut DieselShortLinkStore::new(&mut conn), &code)?;
    tracing::debug!(%code, %recipe_id, "Resolved short link");

    Ok(Redirect::temporary(
        &config.public_url(&recipe_page_path(recipe_id)),
    ))
}
