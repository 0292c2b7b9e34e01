//! Shopping list aggregation.
//!
//! Lines are merged on `(name, measurement_unit)`, not on ingredient id: two
//! catalog rows that read the same to the user must end up on one line.

use std::collections::BTreeMap;

use crate::types::{CartLine, ShoppingListEntry};

/// Merge every cart line into one entry per `(name, measurement_unit)`,
/// summing amounts.
///
/// The result is sorted by name, then unit, so the output does not depend on
/// the order recipes were added to the cart. An empty input yields an empty
/// list.
pub fn aggregate_shopping_list<I>(lines: I) -> Vec<ShoppingListEntry>
where
    I: IntoIterator<Item = CartLine>,
{
    let mut totals: BTreeMap<(String, String), i64> = BTreeMap::new();

    for line in lines {
        let total = totals
            .entry((line.name, line.measurement_unit))
            .or_insert(0);
        *total = total.saturating_add(i64::from(line.amount));
    }

    totals
        .into_iter()
        .map(|((name, measurement_unit), total_amount)| ShoppingListEntry {
            name,
            measurement_unit,
            total_amount,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cart() {
        assert!(aggregate_shopping_list(Vec::new()).is_empty());
    }

    #[test]
    fn test_merges_same_name_and_unit() {
        let entries = aggregate_shopping_list(vec![
            CartLine::new("Salt", "g", 10),
            CartLine::new("Salt", "g", 15),
        ]);
        assert_eq!(
            entries,
            vec![ShoppingListEntry {
                name: "Salt".to_string(),
                measurement_unit: "g".to_string(),
                total_amount: 25,
            }]
        );
    }

    #[test]
    fn test_different_units_stay_separate() {
        let entries = aggregate_shopping_list(vec![
            CartLine::new("Milk", "ml", 200),
            CartLine::new("Milk", "cup", 1),
        ]);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].measurement_unit, "cup");
        assert_eq!(entries[1].measurement_unit, "ml");
    }

    #[test]
    fn test_sorted_by_name_then_unit() {
        let entries = aggregate_shopping_list(vec![
            CartLine::new("Sugar", "g", 1),
            CartLine::new("Butter", "g", 1),
            CartLine::new("Apple", "pcs", 1),
        ]);
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Apple", "Butter", "Sugar"]);
    }

    #[test]
    fn test_large_totals_do_not_overflow_i32() {
        let entries = aggregate_shopping_list(vec![
            CartLine::new("Water", "ml", i32::MAX),
            CartLine::new("Water", "ml", i32::MAX),
        ]);
        assert_eq!(entries[0].total_amount, 2 * i64::from(i32::MAX));
    }
}
