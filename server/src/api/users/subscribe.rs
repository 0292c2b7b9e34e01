use crate::api::users::get::find_user;
use crate::api::users::view::{load_authors_with_recipes, AuthorWithRecipes};
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::error::ApiError;
use crate::get_conn;
use crate::store::DieselPairStore;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use foodgram_core::{add_pair, remove_pair, RelationKind};
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/api/users/{id}/subscribe",
    tag = "users",
    params(
        ("id" = Uuid, Path, description = "Author ID")
    ),
    responses(
        (status = 201, description = "Subscribed", body = AuthorWithRecipes),
        (status = 400, description = "Cannot subscribe to yourself", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Already subscribed", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn subscribe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<AuthorWithRecipes>), ApiError> {
    let mut conn = get_conn!(pool);

    let author = find_user(&mut conn, id)?;
    add_pair(
        &mut DieselPairStore::new(&mut conn),
        RelationKind::Follow,
        user.id,
        author.id,
    )?;

    tracing::info!(user_id = %user.id, author_id = %author.id, "Subscribed to author");

    let mut entries = load_authors_with_recipes(&mut conn, Some(user.id), vec![author], None)?;
    let entry = entries
        .pop()
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok((StatusCode::CREATED, Json(entry)))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}/subscribe",
    tag = "users",
    params(
        ("id" = Uuid, Path, description = "Author ID")
    ),
    responses(
        (status = 204, description = "Unsubscribed"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "User not found or not subscribed", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn unsubscribe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let mut conn = get_conn!(pool);

    find_user(&mut conn, id)?;
    remove_pair(
        &mut DieselPairStore::new(&mut conn),
        RelationKind::Follow,
        user.id,
        id,
    )?;

    tracing::info!(user_id = %user.id, author_id = %id, "Unsubscribed from author");

    Ok(StatusCode::NO_CONTENT)
}
