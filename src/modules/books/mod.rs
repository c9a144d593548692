//! Book copies and the work-level views built from them.

pub mod models;

pub use models::{Book, BookId, Holding, WorkKey};
