//! Shopping list export.
//!
//! Each output format is a [`ShoppingListRenderer`]; callers pick one through
//! [`ExportFormat`] and never branch on the format themselves.

mod pdf;
mod text;

pub use pdf::{layout_pages, PdfRenderer, PlacedLine};
pub use text::TextRenderer;

use std::fmt;
use std::str::FromStr;

use crate::error::ExportError;
use crate::types::ShoppingListEntry;

/// First line of every exported document
pub const HEADER: &str = "Shopping list";

/// Returned instead of a document when a renderer refuses empty input
pub const EMPTY_NOTICE: &str = "Shopping list is empty.";

const FILENAME_STEM: &str = "shopping_cart";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    #[default]
    Text,
    Pdf,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Pdf => "pdf",
        }
    }

    /// Suggested download name, e.g. `shopping_cart.pdf`
    pub fn filename(self) -> String {
        format!("{}.{}", FILENAME_STEM, self.extension())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "txt" | "text" => Ok(ExportFormat::Text),
            "pdf" => Ok(ExportFormat::Pdf),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// A document format the shopping list can be written to.
pub trait ShoppingListRenderer: Send + Sync {
    fn format(&self) -> ExportFormat;

    fn content_type(&self) -> &'static str;

    /// Short notice returned in place of a document for an empty list.
    /// Renderers that return `None` must render empty input themselves.
    fn empty_notice(&self) -> Option<&'static str> {
        None
    }

    fn render(&self, entries: &[ShoppingListEntry]) -> Result<Vec<u8>, ExportError>;
}

#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub filename: String,
}

#[derive(Debug, Clone)]
pub enum ExportOutcome {
    /// Nothing to export; carries the notice to show instead
    Empty(&'static str),
    Document(RenderedDocument),
}

pub fn renderer_for(format: ExportFormat) -> Box<dyn ShoppingListRenderer> {
    match format {
        ExportFormat::Text => Box::new(TextRenderer),
        ExportFormat::Pdf => Box::new(PdfRenderer::default()),
    }
}

/// Render an aggregated shopping list in the requested format.
pub fn render_shopping_list(
    entries: &[ShoppingListEntry],
    format: ExportFormat,
) -> Result<ExportOutcome, ExportError> {
    let renderer = renderer_for(format);

    if entries.is_empty() {
        if let Some(notice) = renderer.empty_notice() {
            return Ok(ExportOutcome::Empty(notice));
        }
    }

    let bytes = renderer.render(entries)?;
    tracing::debug!(
        format = %format,
        entries = entries.len(),
        bytes = bytes.len(),
        "Rendered shopping list"
    );

    Ok(ExportOutcome::Document(RenderedDocument {
        bytes,
        content_type: renderer.content_type(),
        filename: format.filename(),
    }))
}

/// `"{name} - {total_amount} {unit}"`
pub fn format_entry(entry: &ShoppingListEntry) -> String {
    format!(
        "{} - {} {}",
        entry.name, entry.total_amount, entry.measurement_unit
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, unit: &str, total: i64) -> ShoppingListEntry {
        ShoppingListEntry {
            name: name.to_string(),
            measurement_unit: unit.to_string(),
            total_amount: total,
        }
    }

    #[test]
    fn test_parse_format() {
        assert_eq!("txt".parse::<ExportFormat>().unwrap(), ExportFormat::Text);
        assert_eq!("PDF".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);
        assert!("docx".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_filenames() {
        assert_eq!(ExportFormat::Text.filename(), "shopping_cart.txt");
        assert_eq!(ExportFormat::Pdf.filename(), "shopping_cart.pdf");
    }

    #[test]
    fn test_text_empty_returns_notice() {
        match render_shopping_list(&[], ExportFormat::Text).unwrap() {
            ExportOutcome::Empty(notice) => assert_eq!(notice, EMPTY_NOTICE),
            ExportOutcome::Document(_) => panic!("expected empty notice"),
        }
    }

    #[test]
    fn test_pdf_empty_still_renders() {
        match render_shopping_list(&[], ExportFormat::Pdf).unwrap() {
            ExportOutcome::Document(doc) => {
                assert_eq!(doc.content_type, "application/pdf");
                assert!(doc.bytes.starts_with(b"%PDF"));
            }
            ExportOutcome::Empty(_) => panic!("expected a document"),
        }
    }

    #[test]
    fn test_text_document_metadata() {
        let outcome = render_shopping_list(&[entry("Salt", "g", 25)], ExportFormat::Text).unwrap();
        let ExportOutcome::Document(doc) = outcome else {
            panic!("expected a document");
        };
        assert_eq!(doc.content_type, "text/plain; charset=utf-8");
        assert_eq!(doc.filename, "shopping_cart.txt");
    }

    #[test]
    fn test_format_entry() {
        assert_eq!(format_entry(&entry("Salt", "g", 25)), "Salt - 25 g");
    }
}
