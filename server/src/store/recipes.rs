use std::collections::HashSet;

use diesel::prelude::*;
use foodgram_core::{DomainError, IngredientAmountInput};
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::NewRecipeIngredient;
use crate::schema::{ingredients, recipe_ingredients, recipes};

/// Reject ingredient ids that are not in the catalog.
pub fn ensure_ingredients_exist(
    conn: &mut PgConnection,
    items: &[IngredientAmountInput],
) -> Result<(), ApiError> {
    let wanted: Vec<Uuid> = items.iter().map(|i| i.id).collect();
    let found: HashSet<Uuid> = ingredients::table
        .filter(ingredients::id.eq_any(&wanted))
        .select(ingredients::id)
        .load::<Uuid>(conn)?
        .into_iter()
        .collect();

    match wanted.iter().find(|id| !found.contains(id)) {
        Some(missing) => Err(DomainError::validation(
            "ingredients",
            format!("Ingredient {} does not exist", missing),
        )
        .into()),
        None => Ok(()),
    }
}

pub fn insert_recipe_ingredients(
    conn: &mut PgConnection,
    recipe_id: Uuid,
    items: &[IngredientAmountInput],
) -> QueryResult<usize> {
    let rows: Vec<NewRecipeIngredient> = items
        .iter()
        .map(|item| NewRecipeIngredient {
            recipe_id,
            ingredient_id: item.id,
            amount: item.amount,
        })
        .collect();

    diesel::insert_into(recipe_ingredients::table)
        .values(&rows)
        .execute(conn)
}

/// Swap the recipe's ingredient list for `items`. Run inside a transaction.
pub fn replace_recipe_ingredients(
    conn: &mut PgConnection,
    recipe_id: Uuid,
    items: &[IngredientAmountInput],
) -> QueryResult<()> {
    diesel::delete(recipe_ingredients::table.filter(recipe_ingredients::recipe_id.eq(recipe_id)))
        .execute(conn)?;
    insert_recipe_ingredients(conn, recipe_id, items)?;
    Ok(())
}

/// Delete a recipe. Ingredient lines, favorites, cart entries and the short
/// link cascade with it.
pub fn delete_recipe(conn: &mut PgConnection, recipe_id: Uuid) -> QueryResult<usize> {
    diesel::delete(recipes::table.find(recipe_id)).execute(conn)
}

/// These need a live PostgreSQL; they return early unless DATABASE_URL is set.
#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_pool;
    use crate::models::NewRecipe;
    use crate::schema::{favorites, shopping_cart, short_links, users};
    use diesel::dsl::count_star;

    fn with_database(f: impl FnOnce(&mut PgConnection) -> QueryResult<()>) {
        let Ok(url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set, skipping");
            return;
        };
        let pool = create_pool(&url, 1).unwrap();
        let mut pooled = pool.get().unwrap();
        let conn: &mut PgConnection = &mut pooled;
        conn.test_transaction::<_, diesel::result::Error, _>(|conn| f(conn));
    }

    fn insert_user(conn: &mut PgConnection, username: &str) -> QueryResult<Uuid> {
        diesel::insert_into(users::table)
            .values((
                users::username.eq(username),
                users::email.eq(format!("{}@example.com", username)),
            ))
            .returning(users::id)
            .get_result(conn)
    }

    fn insert_ingredient(conn: &mut PgConnection, name: &str) -> QueryResult<Uuid> {
        diesel::insert_into(ingredients::table)
            .values((
                ingredients::name.eq(name),
                ingredients::measurement_unit.eq("g"),
            ))
            .returning(ingredients::id)
            .get_result(conn)
    }

    fn insert_recipe(conn: &mut PgConnection, author_id: Uuid) -> QueryResult<Uuid> {
        diesel::insert_into(recipes::table)
            .values(NewRecipe {
                author_id,
                name: "Borscht",
                image: "data:image/png;base64,AAAA",
                text: "Boil everything.",
                cooking_time: 90,
            })
            .returning(recipes::id)
            .get_result(conn)
    }

    fn lines(conn: &mut PgConnection, recipe_id: Uuid) -> QueryResult<Vec<(Uuid, i32)>> {
        recipe_ingredients::table
            .filter(recipe_ingredients::recipe_id.eq(recipe_id))
            .select((recipe_ingredients::ingredient_id, recipe_ingredients::amount))
            .load(conn)
    }

    #[test]
    fn test_replace_drops_previous_lines() {
        with_database(|conn| {
            let author = insert_user(conn, "replace_author")?;
            let beet = insert_ingredient(conn, "replace beet")?;
            let salt = insert_ingredient(conn, "replace salt")?;
            let recipe = insert_recipe(conn, author)?;

            insert_recipe_ingredients(
                conn,
                recipe,
                &[IngredientAmountInput { id: beet, amount: 5 }],
            )?;
            replace_recipe_ingredients(
                conn,
                recipe,
                &[IngredientAmountInput { id: salt, amount: 3 }],
            )?;

            assert_eq!(lines(conn, recipe)?, vec![(salt, 3)]);
            Ok(())
        });
    }

    #[test]
    fn test_delete_cascades_to_dependents() {
        with_database(|conn| {
            let author = insert_user(conn, "cascade_author")?;
            let reader = insert_user(conn, "cascade_reader")?;
            let beet = insert_ingredient(conn, "cascade beet")?;
            let recipe = insert_recipe(conn, author)?;

            insert_recipe_ingredients(
                conn,
                recipe,
                &[IngredientAmountInput { id: beet, amount: 5 }],
            )?;
            diesel::insert_into(favorites::table)
                .values((favorites::user_id.eq(reader), favorites::recipe_id.eq(recipe)))
                .execute(conn)?;
            diesel::insert_into(shopping_cart::table)
                .values((
                    shopping_cart::user_id.eq(reader),
                    shopping_cart::recipe_id.eq(recipe),
                ))
                .execute(conn)?;
            diesel::insert_into(short_links::table)
                .values((
                    short_links::recipe_id.eq(recipe),
                    short_links::short_code.eq("CASCADE1"),
                ))
                .execute(conn)?;

            assert_eq!(delete_recipe(conn, recipe)?, 1);

            assert!(lines(conn, recipe)?.is_empty());
            let favorited: i64 = favorites::table
                .filter(favorites::recipe_id.eq(recipe))
                .select(count_star())
                .first(conn)?;
            let carted: i64 = shopping_cart::table
                .filter(shopping_cart::recipe_id.eq(recipe))
                .select(count_star())
                .first(conn)?;
            let linked: i64 = short_links::table
                .filter(short_links::recipe_id.eq(recipe))
                .select(count_star())
                .first(conn)?;
            assert_eq!((favorited, carted, linked), (0, 0, 0));

            // The ingredient itself stays in the catalog
            let catalog: i64 = ingredients::table
                .filter(ingredients::id.eq(beet))
                .select(count_star())
                .first(conn)?;
            assert_eq!(catalog, 1);
            Ok(())
        });
    }
}
