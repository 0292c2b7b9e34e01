//! Golden file tests for the shopping list pipeline (aggregate + text export).
//!
//! Each fixture in `fixtures/shopping_list/` describes a cart as a list of
//! recipes with their ingredient lines, plus the exact text document expected.

use foodgram_core::{
    aggregate_shopping_list, render_shopping_list, CartLine, ExportFormat, ExportOutcome,
};
use glob::glob;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
struct TestCase {
    cart: Vec<CartRecipe>,
    expected_text: String,
}

#[derive(Debug, Deserialize)]
struct CartRecipe {
    #[allow(dead_code)]
    recipe: String,
    ingredients: Vec<CartLine>,
}

fn load_test_cases() -> Vec<(String, TestCase)> {
    let pattern = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/shopping_list")
        .join("*.json");

    let mut cases = Vec::new();
    for entry in glob(&pattern.to_string_lossy()).expect("Failed to read glob pattern") {
        let path = entry.expect("Failed to read directory entry");
        let name = path.file_stem().unwrap().to_string_lossy().into_owned();
        let content = fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
        let case: TestCase = serde_json::from_str(&content)
            .unwrap_or_else(|e| panic!("Failed to parse {}: {}", path.display(), e));
        cases.push((name, case));
    }

    assert!(!cases.is_empty(), "No shopping list fixtures found");
    cases
}

fn export_text<'a>(recipes: impl Iterator<Item = &'a CartRecipe>) -> String {
    let lines = recipes.flat_map(|r| r.ingredients.iter().cloned());
    let entries = aggregate_shopping_list(lines);
    match render_shopping_list(&entries, ExportFormat::Text).expect("text export failed") {
        ExportOutcome::Document(doc) => String::from_utf8(doc.bytes).expect("not UTF-8"),
        ExportOutcome::Empty(notice) => notice.to_string(),
    }
}

#[test]
fn test_golden_shopping_lists() {
    let mut failures = Vec::new();

    for (name, case) in load_test_cases() {
        let actual = export_text(case.cart.iter());
        if actual != case.expected_text {
            failures.push(format!(
                "{}:\n  expected: {:?}\n  actual:   {:?}",
                name, case.expected_text, actual
            ));
        }
    }

    assert!(
        failures.is_empty(),
        "{} fixture(s) failed:\n{}",
        failures.len(),
        failures.join("\n")
    );
}

#[test]
fn test_golden_cart_order_does_not_matter() {
    for (name, case) in load_test_cases() {
        let forward = export_text(case.cart.iter());
        let reversed = export_text(case.cart.iter().rev());
        assert_eq!(forward, reversed, "{} depends on cart order", name);
    }
}
