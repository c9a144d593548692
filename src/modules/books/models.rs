use std::fmt;

use serde::Serialize;

/// Identifier of a single copy. Assigned by the catalog, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct BookId(u64);

impl BookId {
    pub(crate) const FIRST: BookId = BookId(1);

    pub fn get(self) -> u64 {
        self.0
    }

    pub(crate) fn next(self) -> BookId {
        BookId(self.0 + 1)
    }

    #[cfg(test)]
    pub(crate) fn from_raw(raw: u64) -> BookId {
        BookId(raw)
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The abstract work several copies may share.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkKey {
    pub title: String,
    pub author: String,
}

/// One loanable copy of a book.
///
/// Copies cannot be cloned or built outside the crate, so each one lives in
/// exactly one place: on the catalog shelf or with a single patron.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Book {
    id: BookId,
    title: String,
    author: String,
    year: i32,
}

impl Book {
    pub(crate) fn new(
        id: BookId,
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            year,
        }
    }

    pub fn id(&self) -> BookId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Whether this copy belongs to the given work.
    pub fn is_work(&self, key: &WorkKey) -> bool {
        self.title == key.title && self.author == key.author
    }

    pub fn work_key(&self) -> WorkKey {
        WorkKey {
            title: self.title.clone(),
            author: self.author.clone(),
        }
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[ID: {}] \"{}\" - {} ({})",
            self.id, self.title, self.author, self.year
        )
    }
}

/// A work on the shelf together with how many of its copies are available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Holding {
    /// Title of the work
    pub title: String,
    /// Author of the work
    pub author: String,
    /// Publication year, taken from the representative copy
    pub year: i32,
    /// Number of available copies, always at least one
    pub count: usize,
}

impl Holding {
    pub(crate) fn of(representative: &Book, count: usize) -> Self {
        Self {
            title: representative.title.clone(),
            author: representative.author.clone(),
            year: representative.year,
            count,
        }
    }
}
