pub mod aggregation;
pub mod error;
pub mod export;
pub mod pairing;
pub mod short_link;
pub mod types;
pub mod validation;

pub use aggregation::aggregate_shopping_list;
pub use error::{DomainError, ExportError};
pub use export::{
    render_shopping_list, renderer_for, ExportFormat, ExportOutcome, PdfRenderer,
    RenderedDocument, ShoppingListRenderer, TextRenderer,
};
pub use pairing::{
    add_pair, remove_pair, InsertOutcome, MemoryPairStore, PairStore, PairingError, RelationKind,
};
pub use short_link::{
    generate_short_code, get_or_create_link, resolve_link, LinkInsert, MemoryShortLinkStore,
    ShortLinkError, ShortLinkStore,
};
pub use types::{CartLine, IngredientAmountInput, RecipeDraft, RecipePatch, ShoppingListEntry};
pub use validation::{validate_draft, validate_patch};
