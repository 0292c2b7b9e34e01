use diesel::prelude::*;
use foodgram_core::{aggregate_shopping_list, CartLine, ShoppingListEntry};
use uuid::Uuid;

use crate::schema::{ingredients, recipe_ingredients, shopping_cart};

/// Every ingredient line of every recipe in the user's cart, unmerged.
pub fn load_cart_lines(conn: &mut PgConnection, user_id: Uuid) -> QueryResult<Vec<CartLine>> {
    let rows: Vec<(String, String, i32)> = recipe_ingredients::table
        .inner_join(ingredients::table)
        .inner_join(
            shopping_cart::table.on(shopping_cart::recipe_id.eq(recipe_ingredients::recipe_id)),
        )
        .filter(shopping_cart::user_id.eq(user_id))
        .select((
            ingredients::name,
            ingredients::measurement_unit,
            recipe_ingredients::amount,
        ))
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|(name, measurement_unit, amount)| CartLine {
            name,
            measurement_unit,
            amount,
        })
        .collect())
}

pub fn load_shopping_list(
    conn: &mut PgConnection,
    user_id: Uuid,
) -> QueryResult<Vec<ShoppingListEntry>> {
    let lines = load_cart_lines(conn, user_id)?;
    tracing::debug!(%user_id, lines = lines.len(), "Loaded shopping cart lines");
    Ok(aggregate_shopping_list(lines))
}
