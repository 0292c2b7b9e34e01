use crate::api::recipes::get::find_recipe;
use crate::api::ErrorResponse;
use crate::config::Config;
use crate::db::DbPool;
use crate::error::ApiError;
use crate::get_conn;
use crate::store::DieselShortLinkStore;
use axum::{
    extract::{Path, State},
    Json,
};
use foodgram_core::{generate_short_code, get_or_create_link};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ShortLinkResponse {
    /// Absolute URL that redirects to the recipe page
    #[serde(rename = "short-link")]
    pub short_link: String,
}

/// Public path for a short code
pub fn short_link_path(code: &str) -> String {
    format!("/s/{}", code)
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}/get-link",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Stable short link for the recipe", body = ShortLinkResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn get_link(
    State(pool): State<Arc<DbPool>>,
    State(config): State<Arc<Config>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ShortLinkResponse>, ApiError> {
    let mut conn = get_conn!(pool);

    find_recipe(&mut conn, id)?;
    let code = get_or_create_link(
        &mut DieselShortLinkStore::new(&mut conn),
        id,
        generate_short_code,
    )?;

    Ok(Json(ShortLinkResponse {
        short_link: config.public_url(&short_link_path(&code)),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_uses_hyphenated_key() {
        let body = serde_json::to_value(ShortLinkResponse {
            short_link: "http://localhost:3000/s/abcd1234".to_string(),
        })
        .unwrap();
        assert_eq!(body["short-link"], "http://localhost:3000/s/abcd1234");
    }
}
