use crate::api::recipes::view::{load_recipe_views, RecipeResponse};
use crate::api::ErrorResponse;
use crate::auth::MaybeAuthUser;
use crate::db::DbPool;
use crate::error::ApiError;
use crate::get_conn;
use crate::models::Recipe;
use crate::schema::{favorites, recipes, shopping_cart};
use axum::{
    extract::{Query, State},
    Json,
};
use diesel::prelude::*;
use serde::{Deserialize, Deserializer};
use std::sync::Arc;
use utoipa::IntoParams;
use uuid::Uuid;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListRecipesParams {
    /// Only recipes by this author
    pub author: Option<Uuid>,
    /// `1`/`true`: only the viewer's favorites. Ignored for anonymous viewers.
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_favorited: Option<bool>,
    /// `1`/`true`: only recipes in the viewer's cart. Ignored for anonymous viewers.
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub is_in_shopping_cart: Option<bool>,
}

/// Accepts `1`/`0` as well as `true`/`false`, matching what web clients send.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::to_ascii_lowercase).as_deref() {
        None | Some("") => Ok(None),
        Some("1") | Some("true") => Ok(Some(true)),
        Some("0") | Some("false") => Ok(Some(false)),
        Some(other) => Err(serde::de::Error::custom(format!(
            "invalid boolean: {}",
            other
        ))),
    }
}

#[utoipa::path(
    get,
    path = "/api/recipes",
    tag = "recipes",
    params(ListRecipesParams),
    responses(
        (status = 200, description = "Recipes, newest first", body = Vec<RecipeResponse>),
        (status = 401, description = "Invalid token", body = ErrorResponse)
    )
)]
pub async fn list_recipes(
    viewer: MaybeAuthUser,
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<ListRecipesParams>,
) -> Result<Json<Vec<RecipeResponse>>, ApiError> {
    let mut conn = get_conn!(pool);

    let mut query = recipes::table
        .select(Recipe::as_select())
        .order(recipes::created_at.desc())
        .into_boxed();

    if let Some(author) = params.author {
        query = query.filter(recipes::author_id.eq(author));
    }

    if let Some(viewer_id) = viewer.id() {
        if params.is_favorited == Some(true) {
            query = query.filter(
                recipes::id.eq_any(
                    favorites::table
                        .filter(favorites::user_id.eq(viewer_id))
                        .select(favorites::recipe_id),
                ),
            );
        }
        if params.is_in_shopping_cart == Some(true) {
            query = query.filter(
                recipes::id.eq_any(
                    shopping_cart::table
                        .filter(shopping_cart::user_id.eq(viewer_id))
                        .select(shopping_cart::recipe_id),
                ),
            );
        }
    }

    let rows: Vec<Recipe> = query.load(&mut conn)?;
    let response = load_recipe_views(&mut conn, viewer.id(), rows)?;

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn try_parse(query: &str) -> Result<ListRecipesParams, String> {
        let uri: axum::http::Uri = format!("/api/recipes?{}", query).parse().unwrap();
        Query::<ListRecipesParams>::try_from_uri(&uri)
            .map(|Query(params)| params)
            .map_err(|e| e.to_string())
    }

    fn parse(query: &str) -> ListRecipesParams {
        try_parse(query).unwrap()
    }

    #[test]
    fn test_flags_accept_numeric_and_words() {
        let params = parse("is_favorited=1&is_in_shopping_cart=false");
        assert_eq!(params.is_favorited, Some(true));
        assert_eq!(params.is_in_shopping_cart, Some(false));

        let params = parse("is_favorited=TRUE&is_in_shopping_cart=0");
        assert_eq!(params.is_favorited, Some(true));
        assert_eq!(params.is_in_shopping_cart, Some(false));
    }

    #[test]
    fn test_flags_absent() {
        let params = parse("");
        assert_eq!(params.is_favorited, None);
        assert_eq!(params.author, None);
    }

    #[test]
    fn test_invalid_flag_rejected() {
        assert!(try_parse("is_favorited=maybe").is_err());
    }
}
