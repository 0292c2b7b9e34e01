//! Favorites and the shopping cart share the same add/remove flow; only the
//! relation differs.

use crate::api::recipes::get::find_recipe;
use crate::api::recipes::view::RecipeMinified;
use crate::db::DbPool;
use crate::error::ApiError;
use crate::get_conn;
use crate::store::DieselPairStore;
use foodgram_core::{add_pair, remove_pair, RelationKind};
use uuid::Uuid;

pub fn add_recipe(
    pool: &DbPool,
    kind: RelationKind,
    user_id: Uuid,
    recipe_id: Uuid,
) -> Result<RecipeMinified, ApiError> {
    let mut conn = get_conn!(pool);

    let recipe = find_recipe(&mut conn, recipe_id)?;
    add_pair(&mut DieselPairStore::new(&mut conn), kind, user_id, recipe_id)?;

    tracing::info!(?kind, %user_id, %recipe_id, "Added recipe");
    Ok(RecipeMinified::from(&recipe))
}

pub fn remove_recipe(
    pool: &DbPool,
    kind: RelationKind,
    user_id: Uuid,
    recipe_id: Uuid,
) -> Result<(), ApiError> {
    let mut conn = get_conn!(pool);

    find_recipe(&mut conn, recipe_id)?;
    remove_pair(&mut DieselPairStore::new(&mut conn), kind, user_id, recipe_id)?;

    tracing::info!(?kind, %user_id, %recipe_id, "Removed recipe");
    Ok(())
}
