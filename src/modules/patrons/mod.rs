//! The logged-in patron and the copies they hold.

use crate::error::CatalogError;
use crate::modules::books::{Book, BookId};
use crate::utils;

/// A user identified by a free-text name, holding borrowed copies in
/// borrow order.
#[derive(Debug)]
pub struct Patron {
    name: String,
    borrowed: Vec<Book>,
}

impl Patron {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            borrowed: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Take ownership of a copy handed out by the catalog.
    pub(crate) fn borrow(&mut self, copy: Book) {
        tracing::debug!(patron = %self.name, copy_id = %copy.id(), "copy borrowed");
        self.borrowed.push(copy);
    }

    /// Give back the copy with the given id, if this patron holds it.
    pub(crate) fn return_copy(&mut self, id: BookId) -> Option<Book> {
        let position = self.borrowed.iter().position(|copy| copy.id() == id)?;
        let copy = self.borrowed.remove(position);
        tracing::debug!(patron = %self.name, copy_id = %id, "copy returned");
        Some(copy)
    }

    /// Earliest-borrowed copy whose title matches exactly, ignoring case.
    pub fn find_borrowed(&self, title: &str) -> Option<&Book> {
        self.borrowed
            .iter()
            .find(|copy| utils::eq_ignore_case(copy.title(), title))
    }

    /// Copies held, in borrow order. Possibly empty.
    pub fn borrowed(&self) -> &[Book] {
        &self.borrowed
    }

    /// Copies held, in borrow order, or `NoLoans` when there are none.
    pub fn list_borrowed(&self) -> Result<&[Book], CatalogError> {
        if self.borrowed.is_empty() {
            return Err(CatalogError::no_loans(&self.name));
        }
        Ok(&self.borrowed)
    }
}
