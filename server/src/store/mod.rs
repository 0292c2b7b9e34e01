//! Diesel implementations of the storage seams defined in `foodgram_core`,
//! plus the multi-table queries the handlers share.

pub mod pairs;
pub mod recipes;
pub mod shopping_cart;
pub mod short_links;

pub use pairs::DieselPairStore;
pub use short_links::DieselShortLinkStore;
