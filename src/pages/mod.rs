//! Page assembly and the per-interaction handlers.
//!
//! The hosting UI re-renders the whole page on every interaction. Each
//! handler here takes the storage handle explicitly and returns either a
//! view struct or an outcome enum; nothing holds state between cycles.

pub mod admin;
pub mod comments;
pub mod home;
pub mod map;
pub mod stats;

pub use home::{HomePage, ImageStatus, ListingParams, RecipeCard};
