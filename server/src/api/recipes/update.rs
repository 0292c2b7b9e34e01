use crate::api::recipes::create::IngredientAmountRequest;
use crate::api::recipes::get::ensure_author;
use crate::api::recipes::view::{load_recipe_view, RecipeResponse};
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::error::ApiError;
use crate::get_conn;
use crate::models::{Recipe, RecipeChangeset};
use crate::schema::recipes;
use crate::store::recipes::{ensure_ingredients_exist, replace_recipe_ingredients};
use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use diesel::prelude::*;
use foodgram_core::{validate_patch, RecipePatch};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

/// Any subset of the recipe fields. A present `ingredients` list replaces
/// the stored one entirely.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateRecipeRequest {
    pub name: Option<String>,
    pub text: Option<String>,
    pub image: Option<String>,
    pub cooking_time: Option<i32>,
    pub ingredients: Option<Vec<IngredientAmountRequest>>,
}

impl From<UpdateRecipeRequest> for RecipePatch {
    fn from(request: UpdateRecipeRequest) -> Self {
        RecipePatch {
            name: request.name,
            text: request.text,
            image: request.image,
            cooking_time: request.cooking_time,
            ingredients: request
                .ingredients
                .map(|items| items.into_iter().map(Into::into).collect()),
        }
    }
}

#[utoipa::path(
    patch,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(
        ("id" = Uuid, Path, description = "Recipe ID")
    ),
    request_body = UpdateRecipeRequest,
    responses(
        (status = 200, description = "Recipe updated", body = RecipeResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not the author", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateRecipeRequest>,
) -> Result<Json<RecipeResponse>, ApiError> {
    let patch = RecipePatch::from(request);

    let mut conn = get_conn!(pool);

    let recipe = conn.transaction::<_, ApiError, _>(|conn| {
        let existing: Recipe = recipes::table
            .find(id)
            .select(Recipe::as_select())
            .for_update()
            .first(conn)
            .optional()?
            .ok_or_else(|| ApiError::not_found("Recipe not found"))?;

        ensure_author(&existing, user.id)?;
        validate_patch(&patch)?;

        if let Some(ref items) = patch.ingredients {
            ensure_ingredients_exist(conn, items)?;
            replace_recipe_ingredients(conn, id, items)?;
        }

        let changes = RecipeChangeset {
            name: patch.name.as_deref(),
            image: patch.image.as_deref(),
            text: patch.text.as_deref(),
            cooking_time: patch.cooking_time,
            updated_at: Utc::now(),
        };

        let recipe: Recipe = diesel::update(recipes::table.find(id))
            .set(&changes)
            .returning(Recipe::as_returning())
            .get_result(conn)?;

        Ok(recipe)
    })?;

    tracing::info!(
        recipe_id = %id,
        ingredients_replaced = patch.ingredients.is_some(),
        "Updated recipe"
    );

    let response = load_recipe_view(&mut conn, Some(user.id), recipe)?;
    Ok(Json(response))
}
