//! Bulk import of the ingredient catalog from a JSON dump.

use std::path::Path;

use anyhow::Context;
use diesel::dsl::{exists, select};
use diesel::prelude::*;

use crate::models::NewIngredient;
use crate::schema::ingredients;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    pub inserted: usize,
    pub skipped: usize,
}

/// Parse a JSON array of `{"name", "measurement_unit"}` objects. Surrounding
/// whitespace is dropped; entries with a blank field are rejected.
pub fn parse_catalog(json: &str) -> anyhow::Result<Vec<NewIngredient>> {
    let raw: Vec<NewIngredient> =
        serde_json::from_str(json).context("Ingredient file must be a JSON array")?;

    raw.into_iter()
        .enumerate()
        .map(|(index, item)| {
            let name = item.name.trim().to_string();
            let measurement_unit = item.measurement_unit.trim().to_string();
            if name.is_empty() || measurement_unit.is_empty() {
                anyhow::bail!("Entry {} has a blank name or measurement_unit", index);
            }
            Ok(NewIngredient {
                name,
                measurement_unit,
            })
        })
        .collect()
}

/// Insert every (name, unit) pair not already in the catalog, in one transaction.
pub fn load_catalog(
    conn: &mut PgConnection,
    items: &[NewIngredient],
) -> QueryResult<LoadSummary> {
    conn.transaction(|conn| {
        let mut summary = LoadSummary::default();

        for item in items {
            let present: bool = select(exists(
                ingredients::table
                    .filter(ingredients::name.eq(&item.name))
                    .filter(ingredients::measurement_unit.eq(&item.measurement_unit)),
            ))
            .get_result(conn)?;

            if present {
                summary.skipped += 1;
                continue;
            }

            diesel::insert_into(ingredients::table)
                .values(item)
                .execute(conn)?;
            summary.inserted += 1;
        }

        Ok(summary)
    })
}

pub fn load_catalog_file(conn: &mut PgConnection, path: &Path) -> anyhow::Result<LoadSummary> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let items = parse_catalog(&json)?;

    let summary = load_catalog(conn, &items)?;
    tracing::info!(
        file = %path.display(),
        inserted = summary.inserted,
        skipped = summary.skipped,
        "Loaded ingredient catalog"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_catalog() {
        let items = parse_catalog(
            r#"[
                {"name": "абрикосовое варенье", "measurement_unit": "г"},
                {"name": " salt ", "measurement_unit": "g "}
            ]"#,
        )
        .unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].name, "абрикосовое варенье");
        assert_eq!(items[1].name, "salt");
        assert_eq!(items[1].measurement_unit, "g");
    }

    #[test]
    fn test_parse_catalog_rejects_blank_fields() {
        let err = parse_catalog(r#"[{"name": "  ", "measurement_unit": "g"}]"#).unwrap_err();
        assert!(err.to_string().contains("Entry 0"));
    }

    #[test]
    fn test_parse_catalog_rejects_non_array() {
        assert!(parse_catalog(r#"{"name": "salt"}"#).is_err());
    }
}
