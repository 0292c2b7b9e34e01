use std::io::Cursor;

use printpdf::{Mm, PdfDocument};

use super::{format_entry, ExportFormat, ShoppingListRenderer, HEADER};
use crate::error::ExportError;
use crate::types::ShoppingListEntry;

// A4, all lengths in millimetres
const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_TOP: f32 = 20.0;
const MARGIN_BOTTOM: f32 = 20.0;
const MARGIN_LEFT: f32 = 20.0;
const LINE_HEIGHT: f32 = 8.0;

/// DejaVu Sans covers Latin, Cyrillic and Greek; the PDF built-in fonts are
/// WinAnsi only and drop everything else.
static FONT_DATA: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

const HEADER_FONT_SIZE: f32 = 16.0;
const ENTRY_FONT_SIZE: f32 = 12.0;

/// A line of text with its vertical position on the page (measured from the
/// bottom edge, as PDF does).
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub font_size: f32,
    pub y: f32,
}

/// Lay out the header and entries on pages. The first page always exists,
/// so empty input yields one page holding only the header.
pub fn layout_pages(entries: &[ShoppingListEntry]) -> Vec<Vec<PlacedLine>> {
    let top = PAGE_HEIGHT - MARGIN_TOP;

    let mut pages = vec![vec![PlacedLine {
        text: HEADER.to_string(),
        font_size: HEADER_FONT_SIZE,
        y: top,
    }]];
    // header plus one blank line
    let mut cursor = top - 2.0 * LINE_HEIGHT;

    for entry in entries {
        if cursor < MARGIN_BOTTOM {
            pages.push(Vec::new());
            cursor = top;
        }
        if let Some(page) = pages.last_mut() {
            page.push(PlacedLine {
                text: format_entry(entry),
                font_size: ENTRY_FONT_SIZE,
                y: cursor,
            });
        }
        cursor -= LINE_HEIGHT;
    }

    pages
}

#[derive(Debug, Clone)]
pub struct PdfRenderer {
    font: &'static [u8],
}

impl Default for PdfRenderer {
    fn default() -> Self {
        Self { font: FONT_DATA }
    }
}

impl ShoppingListRenderer for PdfRenderer {
    fn format(&self) -> ExportFormat {
        ExportFormat::Pdf
    }

    fn content_type(&self) -> &'static str {
        "application/pdf"
    }

    fn render(&self, entries: &[ShoppingListEntry]) -> Result<Vec<u8>, ExportError> {
        let (doc, first_page, first_layer) =
            PdfDocument::new(HEADER, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Page 1");
        let font = doc
            .add_external_font(Cursor::new(self.font))
            .map_err(|e| ExportError::Pdf(format!("{:?}", e)))?;

        for (index, lines) in layout_pages(entries).iter().enumerate() {
            let (page, layer) = if index == 0 {
                (first_page, first_layer)
            } else {
                doc.add_page(
                    Mm(PAGE_WIDTH),
                    Mm(PAGE_HEIGHT),
                    format!("Page {}", index + 1),
                )
            };
            let layer = doc.get_page(page).get_layer(layer);
            for line in lines {
                layer.use_text(
                    line.text.clone(),
                    line.font_size,
                    Mm(MARGIN_LEFT),
                    Mm(line.y),
                    &font,
                );
            }
        }

        doc.save_to_bytes()
            .map_err(|e| ExportError::Pdf(format!("{:?}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(n: usize) -> Vec<ShoppingListEntry> {
        (0..n)
            .map(|i| ShoppingListEntry {
                name: format!("Item {:03}", i),
                measurement_unit: "g".to_string(),
                total_amount: i as i64 + 1,
            })
            .collect()
    }

    #[test]
    fn test_empty_layout_has_header_page() {
        let pages = layout_pages(&[]);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].len(), 1);
        assert_eq!(pages[0][0].text, "Shopping list");
    }

    #[test]
    fn test_first_page_capacity() {
        // header + 31 entries fit on the first page
        assert_eq!(layout_pages(&entries(31)).len(), 1);
        assert_eq!(layout_pages(&entries(32)).len(), 2);
    }

    #[test]
    fn test_following_pages_hold_more() {
        // 31 on the first page, 33 on each following page
        assert_eq!(layout_pages(&entries(64)).len(), 2);
        assert_eq!(layout_pages(&entries(65)).len(), 3);
    }

    #[test]
    fn test_cursor_resets_on_new_page() {
        let pages = layout_pages(&entries(40));
        let first_on_second = &pages[1][0];
        assert_eq!(first_on_second.y, PAGE_HEIGHT - MARGIN_TOP);
        assert_eq!(first_on_second.text, "Item 031 - 32 g");
        for page in &pages {
            for line in page {
                assert!(line.y >= MARGIN_BOTTOM);
            }
        }
    }

    #[test]
    fn test_render_produces_pdf() {
        let bytes = PdfRenderer::default().render(&entries(70)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    /// Hex operands of every `Tj` operator, in document order. Page content
    /// streams are written uncompressed.
    fn shown_strings(pdf: &[u8]) -> Vec<String> {
        let text = String::from_utf8_lossy(pdf);
        text.match_indices("> Tj")
            .filter_map(|(end, _)| {
                let start = text[..end].rfind('<')?;
                let hex = &text[start + 1..end];
                hex.chars()
                    .all(|c| c.is_ascii_hexdigit())
                    .then(|| hex.to_string())
            })
            .collect()
    }

    #[test]
    fn test_cyrillic_glyphs_are_embedded() {
        let entry = ShoppingListEntry {
            name: "Свёкла".to_string(),
            measurement_unit: "г".to_string(),
            total_amount: 300,
        };
        let bytes = PdfRenderer::default().render(&[entry.clone()]).unwrap();

        let shown = shown_strings(&bytes);
        assert_eq!(shown.len(), 2, "header and one entry");

        // Two bytes (four hex digits) per glyph; a dropped character shortens the string
        let line = format_entry(&entry);
        assert_eq!(shown[1].len(), line.chars().count() * 4);
        assert_eq!(shown[0].len(), HEADER.chars().count() * 4);

        // Distinct Cyrillic letters map to distinct glyphs
        let glyphs: Vec<&str> = (0..shown[1].len())
            .step_by(4)
            .map(|i| &shown[1][i..i + 4])
            .collect();
        assert_ne!(glyphs[0], glyphs[1]);
        assert!(glyphs.iter().all(|g| *g != "0000"));
    }
}
