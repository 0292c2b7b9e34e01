//! Recipe input validation. Catalog existence of ingredient ids is checked by
//! the storage layer; everything that can be decided from the input alone is
//! checked here.

use std::collections::HashSet;

use crate::error::DomainError;
use crate::types::{IngredientAmountInput, RecipeDraft, RecipePatch};

pub const MAX_NAME_LENGTH: usize = 200;

pub fn validate_draft(draft: &RecipeDraft) -> Result<(), DomainError> {
    validate_name(&draft.name)?;
    validate_required("text", &draft.text)?;
    validate_required("image", &draft.image)?;
    validate_cooking_time(draft.cooking_time)?;
    validate_ingredients(&draft.ingredients)
}

pub fn validate_patch(patch: &RecipePatch) -> Result<(), DomainError> {
    if let Some(ref name) = patch.name {
        validate_name(name)?;
    }
    if let Some(ref text) = patch.text {
        validate_required("text", text)?;
    }
    if let Some(ref image) = patch.image {
        validate_required("image", image)?;
    }
    if let Some(cooking_time) = patch.cooking_time {
        validate_cooking_time(cooking_time)?;
    }
    if let Some(ref ingredients) = patch.ingredients {
        validate_ingredients(ingredients)?;
    }
    Ok(())
}

fn validate_name(name: &str) -> Result<(), DomainError> {
    validate_required("name", name)?;
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(DomainError::validation(
            "name",
            format!("Name must be at most {} characters", MAX_NAME_LENGTH),
        ));
    }
    Ok(())
}

fn validate_required(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(field, "This field is required"));
    }
    Ok(())
}

fn validate_cooking_time(minutes: i32) -> Result<(), DomainError> {
    if minutes < 1 {
        return Err(DomainError::validation(
            "cooking_time",
            "Cooking time must be at least 1 minute",
        ));
    }
    Ok(())
}

fn validate_ingredients(ingredients: &[IngredientAmountInput]) -> Result<(), DomainError> {
    if ingredients.is_empty() {
        return Err(DomainError::validation(
            "ingredients",
            "At least one ingredient is required",
        ));
    }

    let mut seen = HashSet::with_capacity(ingredients.len());
    for ingredient in ingredients {
        if ingredient.amount < 1 {
            return Err(DomainError::validation(
                "ingredients",
                format!("Amount for ingredient {} must be at least 1", ingredient.id),
            ));
        }
        if !seen.insert(ingredient.id) {
            return Err(DomainError::validation(
                "ingredients",
                format!("Ingredient {} is listed more than once", ingredient.id),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn draft() -> RecipeDraft {
        RecipeDraft {
            name: "Pancakes".to_string(),
            text: "Mix and fry.".to_string(),
            image: "recipes/pancakes.png".to_string(),
            cooking_time: 20,
            ingredients: vec![IngredientAmountInput {
                id: Uuid::new_v4(),
                amount: 200,
            }],
        }
    }

    fn failed_field(result: Result<(), DomainError>) -> String {
        match result {
            Err(DomainError::Validation { field, .. }) => field,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_draft() {
        assert!(validate_draft(&draft()).is_ok());
    }

    #[test]
    fn test_empty_ingredients() {
        let mut d = draft();
        d.ingredients.clear();
        assert_eq!(failed_field(validate_draft(&d)), "ingredients");
    }

    #[test]
    fn test_duplicate_ingredient_ids() {
        let mut d = draft();
        let id = d.ingredients[0].id;
        d.ingredients.push(IngredientAmountInput { id, amount: 1 });
        assert_eq!(failed_field(validate_draft(&d)), "ingredients");
    }

    #[test]
    fn test_non_positive_amount() {
        let mut d = draft();
        d.ingredients[0].amount = 0;
        assert_eq!(failed_field(validate_draft(&d)), "ingredients");
    }

    #[test]
    fn test_non_positive_cooking_time() {
        let mut d = draft();
        d.cooking_time = 0;
        assert_eq!(failed_field(validate_draft(&d)), "cooking_time");
    }

    #[test]
    fn test_blank_fields() {
        let mut d = draft();
        d.name = "   ".to_string();
        assert_eq!(failed_field(validate_draft(&d)), "name");

        let mut d = draft();
        d.text = String::new();
        assert_eq!(failed_field(validate_draft(&d)), "text");

        let mut d = draft();
        d.image = String::new();
        assert_eq!(failed_field(validate_draft(&d)), "image");
    }

    #[test]
    fn test_name_too_long() {
        let mut d = draft();
        d.name = "a".repeat(MAX_NAME_LENGTH + 1);
        assert_eq!(failed_field(validate_draft(&d)), "name");
    }

    #[test]
    fn test_empty_patch_is_valid() {
        assert!(validate_patch(&RecipePatch::default()).is_ok());
    }

    #[test]
    fn test_patch_with_empty_ingredient_list() {
        let patch = RecipePatch {
            ingredients: Some(Vec::new()),
            ..Default::default()
        };
        assert_eq!(failed_field(validate_patch(&patch)), "ingredients");
    }
}
