//! Error handling for catalog and loan operations

use thiserror::Error;

/// Broad class of a catalog failure, as seen by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The requested title is not where the operation looked for it.
    NotFound,
    /// A listing or search produced nothing to show.
    EmptyResult,
}

/// Recoverable failures of catalog and patron operations.
///
/// None of these leave partial state behind: an operation that returns an
/// error has not mutated the catalog or the patron.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("no available copy titled '{title}'")]
    NotAvailable { title: String },

    #[error("no borrowed copy titled '{title}'")]
    NotBorrowed { title: String },

    #[error("the catalog has no available copies")]
    EmptyCatalog,

    #[error("nothing matches '{term}'")]
    NoResults { term: String },

    #[error("{patron} has no borrowed books")]
    NoLoans { patron: String },
}

impl CatalogError {
    /// Create a checkout failure
    pub fn not_available(title: impl Into<String>) -> Self {
        Self::NotAvailable {
            title: title.into(),
        }
    }

    /// Create a check-in failure
    pub fn not_borrowed(title: impl Into<String>) -> Self {
        Self::NotBorrowed {
            title: title.into(),
        }
    }

    /// Create an empty search result
    pub fn no_results(term: impl Into<String>) -> Self {
        Self::NoResults { term: term.into() }
    }

    /// Create an empty loan listing
    pub fn no_loans(patron: impl Into<String>) -> Self {
        Self::NoLoans {
            patron: patron.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotAvailable { .. } | Self::NotBorrowed { .. } => ErrorKind::NotFound,
            Self::EmptyCatalog | Self::NoResults { .. } | Self::NoLoans { .. } => {
                ErrorKind::EmptyResult
            }
        }
    }

    /// Stable machine-readable code, used in structured logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotAvailable { .. } => "not_available",
            Self::NotBorrowed { .. } => "not_borrowed",
            Self::EmptyCatalog => "empty_catalog",
            Self::NoResults { .. } => "no_results",
            Self::NoLoans { .. } => "no_loans",
        }
    }
}
