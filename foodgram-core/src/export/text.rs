use super::{format_entry, ExportFormat, ShoppingListRenderer, EMPTY_NOTICE, HEADER};
use crate::error::ExportError;
use crate::types::ShoppingListEntry;

/// Plain UTF-8 text: header, blank line, one entry per line.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextRenderer;

impl ShoppingListRenderer for TextRenderer {
    fn format(&self) -> ExportFormat {
        ExportFormat::Text
    }

    fn content_type(&self) -> &'static str {
        "text/plain; charset=utf-8"
    }

    fn empty_notice(&self) -> Option<&'static str> {
        Some(EMPTY_NOTICE)
    }

    fn render(&self, entries: &[ShoppingListEntry]) -> Result<Vec<u8>, ExportError> {
        let mut content = format!("{}\n\n", HEADER);
        for entry in entries {
            content.push_str(&format_entry(entry));
            content.push('\n');
        }
        Ok(content.into_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_lines() {
        let entries = vec![
            ShoppingListEntry {
                name: "Flour".to_string(),
                measurement_unit: "g".to_string(),
                total_amount: 500,
            },
            ShoppingListEntry {
                name: "Яйца".to_string(),
                measurement_unit: "шт".to_string(),
                total_amount: 3,
            },
        ];
        let bytes = TextRenderer.render(&entries).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "Shopping list\n\nFlour - 500 g\nЯйца - 3 шт\n"
        );
    }

    #[test]
    fn test_render_empty_is_header_only() {
        let bytes = TextRenderer.render(&[]).unwrap();
        assert_eq!(bytes, b"Shopping list\n\n");
    }
}
