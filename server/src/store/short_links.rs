use diesel::prelude::*;
use foodgram_core::{LinkInsert, ShortLinkStore};
use uuid::Uuid;

use crate::error::{is_foreign_key_violation, is_unique_violation};
use crate::schema::short_links;

pub struct DieselShortLinkStore<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> DieselShortLinkStore<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        Self { conn }
    }
}

impl ShortLinkStore for DieselShortLinkStore<'_> {
    type Error = diesel::result::Error;

    fn find_by_recipe(&mut self, recipe_id: Uuid) -> Result<Option<String>, Self::Error> {
        short_links::table
            .find(recipe_id)
            .select(short_links::short_code)
            .first(self.conn)
            .optional()
    }

    fn find_by_code(&mut self, code: &str) -> Result<Option<Uuid>, Self::Error> {
        short_links::table
            .filter(short_links::short_code.eq(code))
            .select(short_links::recipe_id)
            .first(self.conn)
            .optional()
    }

    fn try_insert(&mut self, recipe_id: Uuid, code: &str) -> Result<LinkInsert, Self::Error> {
        // The recipe_id conflict is absorbed; a short_code conflict still raises
        let result = diesel::insert_into(short_links::table)
            .values((
                short_links::recipe_id.eq(recipe_id),
                short_links::short_code.eq(code),
            ))
            .on_conflict(short_links::recipe_id)
            .do_nothing()
            .execute(self.conn);

        match result {
            Ok(0) => Ok(LinkInsert::RecipeAlreadyLinked),
            Ok(_) => Ok(LinkInsert::Inserted),
            Err(e) if is_unique_violation(&e) => Ok(LinkInsert::CodeTaken),
            Err(e) if is_foreign_key_violation(&e) => Ok(LinkInsert::RecipeMissing),
            Err(e) => Err(e),
        }
    }
}
