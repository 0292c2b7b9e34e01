use std::collections::{HashMap, HashSet};

use diesel::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::recipes::view::RecipeMinified;
use crate::models::{Recipe, User};
use crate::schema::{follows, recipes};

/// Public view of a user
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    /// Whether the viewer follows this user (false for anonymous viewers)
    pub is_subscribed: bool,
}

impl UserProfile {
    pub fn new(user: User, is_subscribed: bool) -> Self {
        Self {
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            is_subscribed,
        }
    }
}

/// A followed author together with (some of) their recipes
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthorWithRecipes {
    #[serde(flatten)]
    pub profile: UserProfile,
    pub recipes: Vec<RecipeMinified>,
    /// Total number of recipes, regardless of `recipes_limit`
    pub recipes_count: i64,
}

/// Which of `author_ids` the viewer follows.
pub fn subscribed_authors(
    conn: &mut PgConnection,
    viewer: Option<Uuid>,
    author_ids: &[Uuid],
) -> QueryResult<HashSet<Uuid>> {
    let Some(viewer) = viewer else {
        return Ok(HashSet::new());
    };

    Ok(follows::table
        .filter(follows::user_id.eq(viewer))
        .filter(follows::author_id.eq_any(author_ids))
        .select(follows::author_id)
        .load::<Uuid>(conn)?
        .into_iter()
        .collect())
}

pub fn load_profile(
    conn: &mut PgConnection,
    viewer: Option<Uuid>,
    user: User,
) -> QueryResult<UserProfile> {
    let subscribed = subscribed_authors(conn, viewer, &[user.id])?;
    let is_subscribed = subscribed.contains(&user.id);
    Ok(UserProfile::new(user, is_subscribed))
}

/// Build [`AuthorWithRecipes`] for each author, newest recipes first,
/// keeping at most `recipes_limit` recipes per author.
pub fn load_authors_with_recipes(
    conn: &mut PgConnection,
    viewer: Option<Uuid>,
    authors: Vec<User>,
    recipes_limit: Option<usize>,
) -> QueryResult<Vec<AuthorWithRecipes>> {
    let author_ids: Vec<Uuid> = authors.iter().map(|a| a.id).collect();
    let subscribed = subscribed_authors(conn, viewer, &author_ids)?;

    let all_recipes: Vec<Recipe> = recipes::table
        .filter(recipes::author_id.eq_any(&author_ids))
        .order(recipes::created_at.desc())
        .select(Recipe::as_select())
        .load(conn)?;

    let mut by_author: HashMap<Uuid, Vec<Recipe>> = HashMap::new();
    for recipe in all_recipes {
        by_author.entry(recipe.author_id).or_default().push(recipe);
    }

    Ok(authors
        .into_iter()
        .map(|author| {
            let recipes = by_author.remove(&author.id).unwrap_or_default();
            let recipes_count = recipes.len() as i64;
            let shown = recipes_limit.unwrap_or(recipes.len());
            let is_subscribed = subscribed.contains(&author.id);
            AuthorWithRecipes {
                profile: UserProfile::new(author, is_subscribed),
                recipes: recipes.iter().take(shown).map(RecipeMinified::from).collect(),
                recipes_count,
            }
        })
        .collect())
}
