use crate::api::users::view::{load_authors_with_recipes, AuthorWithRecipes};
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::error::ApiError;
use crate::get_conn;
use crate::models::User;
use crate::schema::{follows, users};
use axum::{
    extract::{Query, State},
    Json,
};
use diesel::prelude::*;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct SubscriptionsParams {
    /// Maximum number of recipes listed per author
    pub recipes_limit: Option<usize>,
}

#[utoipa::path(
    get,
    path = "/api/users/subscriptions",
    tag = "users",
    params(SubscriptionsParams),
    responses(
        (
            status = 200,
            description = "Followed authors with their recipes",
            body = Vec<AuthorWithRecipes>
        ),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_subscriptions(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Query(params): Query<SubscriptionsParams>,
) -> Result<Json<Vec<AuthorWithRecipes>>, ApiError> {
    let mut conn = get_conn!(pool);

    let authors: Vec<User> = follows::table
        .inner_join(users::table.on(users::id.eq(follows::author_id)))
        .filter(follows::user_id.eq(user.id))
        .order(users::username.asc())
        .select(User::as_select())
        .load(&mut conn)?;

    let response =
        load_authors_with_recipes(&mut conn, Some(user.id), authors, params.recipes_limit)?;

    Ok(Json(response))
}
