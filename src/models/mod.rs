//! Record types the storage layer owns.

pub mod comment;
pub mod recipe;
pub mod spotlight;
