use crate::api::recipes::view::{load_recipe_view, RecipeResponse};
use crate::api::ErrorResponse;
use crate::auth::MaybeAuthUser;
use crate::db::DbPool;
use crate::error::ApiError;
use crate::get_conn;
use crate::models::Recipe;
use crate::schema::recipes;
use axum::{
    extract::{Path, State},
    Json,
};
use diesel::prelude::*;
use foodgram_core::DomainError;
use std::sync::Arc;
use uuid::Uuid;

/// Load a recipe row or fail with 404.
pub fn find_recipe(conn: &mut PgConnection, id: Uuid) -> Result<Recipe, ApiError> {
    recipes::table
        .find(id)
        .select(Recipe::as_select())
        .first(conn)
        .optional()?
        .ok_or_else(|| ApiError::not_found("Recipe not found"))
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Recipe details", body = RecipeResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn get_recipe(
    viewer: MaybeAuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let mut conn = get_conn!(pool);

    let recipe = find_recipe(&mut conn, id)?;
    let response = load_recipe_view(&mut conn, viewer.id(), recipe)?;

    Ok(Json(response))
}

/// Only the author may change or delete a recipe.
pub fn ensure_author(recipe: &Recipe, user_id: Uuid) -> Result<(), ApiError> {
    if recipe.author_id != user_id {
        return Err(DomainError::PermissionDenied(
            "Only the author can modify this recipe".to_string(),
        )
        .into());
    }
    Ok(())
}
