//! Console rendering of catalog results.

use std::io::{self, Write};

use crate::modules::books::{Book, Holding};

/// Full catalog listing: one block per work.
pub fn catalog<W: Write>(out: &mut W, holdings: &[Holding]) -> io::Result<()> {
    writeln!(out, "\nLIBRARY CATALOG")?;
    for holding in holdings {
        writeln!(out, "\n {}", holding.title)?;
        writeln!(out, "   Author: {}", holding.author)?;
        writeln!(out, "   Year: {}", holding.year)?;
        writeln!(out, "   Copies available: {}", holding.count)?;
    }
    Ok(())
}

/// Compact one-line-per-work search results.
pub fn search_results<W: Write>(out: &mut W, holdings: &[Holding]) -> io::Result<()> {
    writeln!(out, "\nSearch results")?;
    for holding in holdings {
        writeln!(
            out,
            "\"{}\" - {} ({}); available: {}",
            holding.title, holding.author, holding.year, holding.count
        )?;
    }
    Ok(())
}

pub fn loans<W: Write>(out: &mut W, books: &[Book]) -> io::Result<()> {
    writeln!(out, "\n=== Your books ===")?;
    for book in books {
        writeln!(out, "{}", book)?;
    }
    Ok(())
}
