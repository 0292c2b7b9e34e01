//! Identity lookup. Sessions are issued by the identity service; this module
//! only resolves bearer tokens to users.

mod crypto;
mod db;
mod extractor;

pub use extractor::{AuthUser, MaybeAuthUser};
