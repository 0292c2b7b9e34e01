use diesel::prelude::*;
use foodgram_core::{InsertOutcome, PairStore, RelationKind};
use uuid::Uuid;

use crate::error::{is_foreign_key_violation, is_unique_violation};
use crate::schema::{favorites, follows, shopping_cart};

/// Pairings backed by the `favorites`, `shopping_cart` and `follows` tables.
/// Each insert is one statement, so the primary key decides races.
pub struct DieselPairStore<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> DieselPairStore<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        Self { conn }
    }
}

impl PairStore for DieselPairStore<'_> {
    type Error = diesel::result::Error;

    fn insert_pair(
        &mut self,
        kind: RelationKind,
        owner: Uuid,
        target: Uuid,
    ) -> Result<InsertOutcome, Self::Error> {
        let conn = &mut *self.conn;
        let result = match kind {
            RelationKind::Favorite => diesel::insert_into(favorites::table)
                .values((favorites::user_id.eq(owner), favorites::recipe_id.eq(target)))
                .execute(conn),
            RelationKind::ShoppingCart => diesel::insert_into(shopping_cart::table)
                .values((
                    shopping_cart::user_id.eq(owner),
                    shopping_cart::recipe_id.eq(target),
                ))
                .execute(conn),
            RelationKind::Follow => diesel::insert_into(follows::table)
                .values((follows::user_id.eq(owner), follows::author_id.eq(target)))
                .execute(conn),
        };

        match result {
            Ok(_) => Ok(InsertOutcome::Inserted),
            Err(e) if is_unique_violation(&e) => Ok(InsertOutcome::AlreadyPresent),
            Err(e) if is_foreign_key_violation(&e) => Ok(InsertOutcome::TargetMissing),
            Err(e) => Err(e),
        }
    }

    fn delete_pair(
        &mut self,
        kind: RelationKind,
        owner: Uuid,
        target: Uuid,
    ) -> Result<bool, Self::Error> {
        let conn = &mut *self.conn;
        let deleted = match kind {
            RelationKind::Favorite => diesel::delete(
                favorites::table
                    .filter(favorites::user_id.eq(owner))
                    .filter(favorites::recipe_id.eq(target)),
            )
            .execute(conn)?,
            RelationKind::ShoppingCart => diesel::delete(
                shopping_cart::table
                    .filter(shopping_cart::user_id.eq(owner))
                    .filter(shopping_cart::recipe_id.eq(target)),
            )
            .execute(conn)?,
            RelationKind::Follow => diesel::delete(
                follows::table
                    .filter(follows::user_id.eq(owner))
                    .filter(follows::author_id.eq(target)),
            )
            .execute(conn)?,
        };
        Ok(deleted > 0)
    }
}
