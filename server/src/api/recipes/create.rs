use crate::api::recipes::view::{load_recipe_view, RecipeResponse};
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::error::ApiError;
use crate::get_conn;
use crate::models::{NewRecipe, Recipe};
use crate::schema::recipes;
use crate::store::recipes::{ensure_ingredients_exist, insert_recipe_ingredients};
use axum::{extract::State, http::StatusCode, Json};
use diesel::prelude::*;
use foodgram_core::{validate_draft, IngredientAmountInput, RecipeDraft};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct IngredientAmountRequest {
    /// Catalog ingredient ID
    pub id: Uuid,
    pub amount: i32,
}

impl From<IngredientAmountRequest> for IngredientAmountInput {
    fn from(item: IngredientAmountRequest) -> Self {
        IngredientAmountInput {
            id: item.id,
            amount: item.amount,
        }
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateRecipeRequest {
    pub name: String,
    pub text: String,
    /// Image reference (URL or storage key)
    pub image: String,
    /// Minutes, at least 1
    pub cooking_time: i32,
    pub ingredients: Vec<IngredientAmountRequest>,
}

impl From<CreateRecipeRequest> for RecipeDraft {
    fn from(request: CreateRecipeRequest) -> Self {
        RecipeDraft {
            name: request.name,
            text: request.text,
            image: request.image,
            cooking_time: request.cooking_time,
            ingredients: request.ingredients.into_iter().map(Into::into).collect(),
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/recipes",
    tag = "recipes",
    request_body = CreateRecipeRequest,
    responses(
        (status = 201, description = "Recipe created successfully", body = RecipeResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Json(request): Json<CreateRecipeRequest>,
) -> Result<(StatusCode, Json<RecipeResponse>), ApiError> {
    let draft = RecipeDraft::from(request);
    validate_draft(&draft)?;

    let mut conn = get_conn!(pool);

    let recipe = conn.transaction::<_, ApiError, _>(|conn| {
        ensure_ingredients_exist(conn, &draft.ingredients)?;

        let new_recipe = NewRecipe {
            author_id: user.id,
            name: &draft.name,
            image: &draft.image,
            text: &draft.text,
            cooking_time: draft.cooking_time,
        };

        let recipe: Recipe = diesel::insert_into(recipes::table)
            .values(&new_recipe)
            .returning(Recipe::as_returning())
            .get_result(conn)?;

        insert_recipe_ingredients(conn, recipe.id, &draft.ingredients)?;

        Ok(recipe)
    })?;

    tracing::info!(recipe_id = %recipe.id, author_id = %user.id, "Created recipe");

    let response = load_recipe_view(&mut conn, Some(user.id), recipe)?;
    Ok((StatusCode::CREATED, Json(response)))
}
