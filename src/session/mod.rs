//! Interactive text-menu session over a catalog.
//!
//! The session only parses input, calls catalog and patron operations and
//! prints their outcome. All state changes happen in the catalog.

pub mod render;

use std::io::{BufRead, Write};

use libris_kernel::settings::SessionSettings;

use crate::modules::catalog::Catalog;
use crate::modules::patrons::Patron;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Entries of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ListBooks,
    Search,
    Borrow,
    MyBooks,
    Return,
    LogOut,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::ListBooks),
            "2" => Some(Self::Search),
            "3" => Some(Self::Borrow),
            "4" => Some(Self::MyBooks),
            "5" => Some(Self::Return),
            "6" => Some(Self::LogOut),
            "0" => Some(Self::Exit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// One console session. At most one patron is logged in at a time.
///
/// A patron who logs out while holding books is parked, and logging in
/// again under the same name resumes them with their loans.
pub struct Session<'a, R, W> {
    catalog: &'a mut Catalog,
    input: R,
    output: W,
    settings: SessionSettings,
    current: Option<Patron>,
    parked: Vec<Patron>,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(catalog: &'a mut Catalog, input: R, output: W, settings: SessionSettings) -> Self {
        Self {
            catalog,
            input,
            output,
            settings,
            current: None,
            parked: Vec::new(),
        }
    }

    /// Run until the user exits or input ends.
    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            if self.current.is_none() {
                if self.login()? == Flow::Exit {
                    break;
                }
                continue;
            }

            self.draw_menu()?;
            let Some(line) = self.read_line()? else {
                break;
            };

            let flow = match MenuChoice::parse(&line) {
                Some(choice) => self.dispatch(choice)?,
                None => {
                    writeln!(self.output, "\nError: invalid choice, please try again.")?;
                    Flow::Continue
                }
            };
            if flow == Flow::Exit {
                break;
            }
        }

        self.output.flush()?;
        Ok(())
    }

    fn dispatch(&mut self, choice: MenuChoice) -> anyhow::Result<Flow> {
        tracing::debug!(?choice, "menu choice");
        match choice {
            MenuChoice::ListBooks => self.list_books()?,
            MenuChoice::Search => self.search()?,
            MenuChoice::Borrow => self.borrow()?,
            MenuChoice::MyBooks => self.my_books()?,
            MenuChoice::Return => self.return_book()?,
            MenuChoice::LogOut => self.log_out()?,
            MenuChoice::Exit => {
                writeln!(self.output, "\nGoodbye!")?;
                return Ok(Flow::Exit);
            }
        }
        Ok(Flow::Continue)
    }

    fn login(&mut self) -> anyhow::Result<Flow> {
        self.clear()?;
        writeln!(self.output, "LIBRARY MENU")?;
        let Some(name) = self.prompt("\nEnter your name: ")? else {
            return Ok(Flow::Exit);
        };

        let patron = match self.parked.iter().position(|patron| patron.name() == name) {
            Some(position) => {
                let patron = self.parked.remove(position);
                writeln!(
                    self.output,
                    "\nWelcome back, {}! You still hold {} book(s).",
                    patron.name(),
                    patron.borrowed().len()
                )?;
                patron
            }
            None => {
                writeln!(self.output, "\nWelcome, {}!", name)?;
                Patron::new(name)
            }
        };

        tracing::info!(patron = %patron.name(), "patron logged in");
        self.current = Some(patron);
        Ok(Flow::Continue)
    }

    fn log_out(&mut self) -> anyhow::Result<()> {
        let Some(patron) = self.current.take() else {
            return Ok(());
        };

        writeln!(self.output, "\nGoodbye, {}!", patron.name())?;
        tracing::info!(
            patron = %patron.name(),
            loans = patron.borrowed().len(),
            "patron logged out"
        );
        if !patron.borrowed().is_empty() {
            self.parked.push(patron);
        }
        Ok(())
    }

    fn list_books(&mut self) -> anyhow::Result<()> {
        match self.catalog.list_grouped() {
            Ok(holdings) => render::catalog(&mut self.output, &holdings)?,
            Err(_) => writeln!(self.output, "\nThe library is empty.")?,
        }
        Ok(())
    }

    fn search(&mut self) -> anyhow::Result<()> {
        let Some(term) = self.prompt("\nEnter a title or author to search for: ")? else {
            return Ok(());
        };

        match self.catalog.search(&term) {
            Ok(holdings) => render::search_results(&mut self.output, &holdings)?,
            Err(_) => writeln!(self.output, "\nError: nothing found.")?,
        }
        Ok(())
    }

    fn borrow(&mut self) -> anyhow::Result<()> {
        let Some(title) = self.prompt("\nEnter the title of the book to borrow: ")? else {
            return Ok(());
        };
        let Some(patron) = self.current.as_mut() else {
            return Ok(());
        };

        match self.catalog.checkout(patron, &title) {
            Ok(id) => {
                let borrowed = patron
                    .borrowed()
                    .iter()
                    .find(|copy| copy.id() == id)
                    .map_or(title.as_str(), |copy| copy.title());
                writeln!(self.output, "\n{} borrowed: {}", patron.name(), borrowed)?;
            }
            Err(error) => {
                tracing::debug!(code = error.code(), "borrow failed");
                writeln!(
                    self.output,
                    "\nError: that book is not in the catalog or all copies are out."
                )?;
            }
        }
        Ok(())
    }

    fn my_books(&mut self) -> anyhow::Result<()> {
        let Some(patron) = self.current.as_ref() else {
            return Ok(());
        };

        match patron.list_borrowed() {
            Ok(books) => render::loans(&mut self.output, books)?,
            Err(_) => writeln!(self.output, "\nYou have no borrowed books.")?,
        }
        Ok(())
    }

    fn return_book(&mut self) -> anyhow::Result<()> {
        let Some(title) = self.prompt("\nEnter the title of the book to return: ")? else {
            return Ok(());
        };
        let Some(patron) = self.current.as_mut() else {
            return Ok(());
        };

        match self.catalog.checkin(patron, &title) {
            Ok(id) => {
                let returned = self
                    .catalog
                    .copies()
                    .find(|copy| copy.id() == id)
                    .map_or(title.as_str(), |copy| copy.title());
                writeln!(self.output, "\n{} returned: {}", patron.name(), returned)?;
            }
            Err(error) => {
                tracing::debug!(code = error.code(), "return failed");
                writeln!(self.output, "\nError: you do not have that book.")?;
            }
        }
        Ok(())
    }

    fn draw_menu(&mut self) -> anyhow::Result<()> {
        self.clear()?;
        writeln!(self.output, "\n                  MAIN MENU")?;
        writeln!(self.output, "  1.  Browse all books")?;
        writeln!(self.output, "  2.  Search for a book")?;
        writeln!(self.output, "  3.  Borrow a book")?;
        writeln!(self.output, "  4.  My books")?;
        writeln!(self.output, "  5.  Return a book")?;
        writeln!(self.output, "  6.  Log out")?;
        writeln!(self.output, "  0.  Exit")?;
        write!(self.output, "\nYour choice: ")?;
        self.output.flush()?;
        Ok(())
    }

    fn clear(&mut self) -> anyhow::Result<()> {
        if self.settings.clear_screen {
            write!(self.output, "{}", CLEAR_SCREEN)?;
        }
        Ok(())
    }

    fn prompt(&mut self, label: &str) -> anyhow::Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;
        self.read_line()
    }

    /// Next input line without surrounding whitespace, or `None` at end of input.
    fn read_line(&mut self) -> anyhow::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
