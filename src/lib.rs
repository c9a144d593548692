//! Libris application library
//!
//! An in-memory library catalog: copies are grouped into works, searched,
//! and lent to a single logged-in patron at a time.

pub mod error;
pub mod modules;
pub mod session;
pub mod utils;

pub use error::{CatalogError, ErrorKind};
pub use modules::books::{Book, BookId, Holding, WorkKey};
pub use modules::catalog::Catalog;
pub use modules::patrons::Patron;
pub use session::Session;
