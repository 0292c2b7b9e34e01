use crate::api::users::view::{subscribed_authors, UserProfile};
use crate::auth::MaybeAuthUser;
use crate::db::DbPool;
use crate::error::ApiError;
use crate::get_conn;
use crate::models::User;
use crate::schema::users;
use axum::{extract::State, Json};
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    responses(
        (status = 200, description = "All users, ordered by username", body = Vec<UserProfile>)
    )
)]
pub async fn list_users(
    viewer: MaybeAuthUser,
    State(pool): State<Arc<DbPool>>,
) -> Result<Json<Vec<UserProfile>>, ApiError> {
    let mut conn = get_conn!(pool);

    let all: Vec<User> = users::table
        .order(users::username.asc())
        .select(User::as_select())
        .load(&mut conn)?;

    let ids: Vec<Uuid> = all.iter().map(|u| u.id).collect();
    let subscribed = subscribed_authors(&mut conn, viewer.id(), &ids)?;

    let profiles = all
        .into_iter()
        .map(|user| {
            let is_subscribed = subscribed.contains(&user.id);
            UserProfile::new(user, is_subscribed)
        })
        .collect();

    Ok(Json(profiles))
}
