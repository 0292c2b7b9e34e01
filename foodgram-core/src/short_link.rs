//! Short links: one random code per recipe, created on first request and
//! stable afterwards.

use std::collections::HashMap;
use std::convert::Infallible;

use rand::distr::Alphanumeric;
use rand::Rng;
use thiserror::Error;
use uuid::Uuid;

use crate::error::DomainError;

pub const SHORT_CODE_LENGTH: usize = 8;

/// Give up after this many code collisions in a row.
pub const MAX_GENERATION_ATTEMPTS: usize = 10;

pub fn generate_short_code() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(SHORT_CODE_LENGTH)
        .map(char::from)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkInsert {
    Inserted,
    /// Another link for this recipe won the race
    RecipeAlreadyLinked,
    /// The code belongs to a different recipe
    CodeTaken,
    /// The recipe does not exist (or was deleted mid-request)
    RecipeMissing,
}

/// Storage for short links. `try_insert` must be atomic on both uniqueness
/// constraints (one link per recipe, codes unique).
pub trait ShortLinkStore {
    type Error;

    fn find_by_recipe(&mut self, recipe_id: Uuid) -> Result<Option<String>, Self::Error>;

    fn find_by_code(&mut self, code: &str) -> Result<Option<Uuid>, Self::Error>;

    fn try_insert(&mut self, recipe_id: Uuid, code: &str) -> Result<LinkInsert, Self::Error>;
}

#[derive(Debug, Error)]
pub enum ShortLinkError<E> {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("No free short code after {0} attempts")]
    Exhausted(usize),

    #[error("Short link storage failed: {0}")]
    Storage(E),
}

/// Return the recipe's short code, creating it with `generate` if needed.
pub fn get_or_create_link<S, G>(
    store: &mut S,
    recipe_id: Uuid,
    mut generate: G,
) -> Result<String, ShortLinkError<S::Error>>
where
    S: ShortLinkStore,
    G: FnMut() -> String,
{
    if let Some(code) = store
        .find_by_recipe(recipe_id)
        .map_err(ShortLinkError::Storage)?
    {
        return Ok(code);
    }

    for attempt in 1..=MAX_GENERATION_ATTEMPTS {
        let code = generate();
        match store
            .try_insert(recipe_id, &code)
            .map_err(ShortLinkError::Storage)?
        {
            LinkInsert::Inserted => {
                tracing::debug!(%recipe_id, %code, "Created short link");
                return Ok(code);
            }
            LinkInsert::RecipeAlreadyLinked => {
                return store
                    .find_by_recipe(recipe_id)
                    .map_err(ShortLinkError::Storage)?
                    .ok_or_else(|| {
                        DomainError::NotFound("Recipe not found".to_string()).into()
                    });
            }
            LinkInsert::CodeTaken => {
                tracing::warn!(%recipe_id, attempt, "Short code collision, regenerating");
            }
            LinkInsert::RecipeMissing => {
                return Err(DomainError::NotFound("Recipe not found".to_string()).into());
            }
        }
    }

    Err(ShortLinkError::Exhausted(MAX_GENERATION_ATTEMPTS))
}

pub fn resolve_link<S: ShortLinkStore>(
    store: &mut S,
    code: &str,
) -> Result<Uuid, ShortLinkError<S::Error>> {
    store
        .find_by_code(code)
        .map_err(ShortLinkError::Storage)?
        .ok_or_else(|| DomainError::NotFound("Short link not found".to_string()).into())
}

/// In-memory [`ShortLinkStore`] for tests and tooling.
#[derive(Debug, Default, Clone)]
pub struct MemoryShortLinkStore {
    by_recipe: HashMap<Uuid, String>,
    by_code: HashMap<String, Uuid>,
}

impl MemoryShortLinkStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.by_recipe.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_recipe.is_empty()
    }
}

impl ShortLinkStore for MemoryShortLinkStore {
    type Error = Infallible;

    fn find_by_recipe(&mut self, recipe_id: Uuid) -> Result<Option<String>, Self::Error> {
        Ok(self.by_recipe.get(&recipe_id).cloned())
    }

    fn find_by_code(&mut self, code: &str) -> Result<Option<Uuid>, Self::Error> {
        Ok(self.by_code.get(code).copied())
    }

    fn try_insert(&mut self, recipe_id: Uuid, code: &str) -> Result<LinkInsert, Self::Error> {
        if self.by_recipe.contains_key(&recipe_id) {
            return Ok(LinkInsert::RecipeAlreadyLinked);
        }
        if self.by_code.contains_key(code) {
            return Ok(LinkInsert::CodeTaken);
        }
        self.by_recipe.insert(recipe_id, code.to_string());
        self.by_code.insert(code.to_string(), recipe_id);
        Ok(LinkInsert::Inserted)
    }
}
