//! The shelf of available copies and the checkout/check-in flow.

pub mod seed;

use indexmap::IndexMap;

use crate::error::CatalogError;
use crate::modules::books::{Book, BookId, Holding, WorkKey};
use crate::modules::patrons::Patron;
use crate::utils;

/// A copy on the shelf, stamped with when it was put there.
#[derive(Debug)]
struct Shelved {
    stamp: u64,
    copy: Book,
}

/// Available copies grouped by work.
///
/// Every copy is stamped when it is shelved, and works are listed in order
/// of their earliest-stamped remaining copy. A work whose oldest copy leaves
/// slides behind works shelved before its next copy. Every group is
/// non-empty and its copies are sorted by id, so checkout always hands out
/// the lowest-id copy of a work.
#[derive(Debug)]
pub struct Catalog {
    shelves: IndexMap<WorkKey, Vec<Shelved>>,
    next_id: BookId,
    next_stamp: u64,
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            shelves: IndexMap::new(),
            next_id: BookId::FIRST,
            next_stamp: 0,
        }
    }

    /// A catalog holding the bundled seed collection.
    pub fn seeded() -> Self {
        let mut catalog = Self::new();
        seed::populate(&mut catalog);
        catalog
    }

    /// Register a new copy and put it on the shelf.
    ///
    /// There is no duplicate check: adding the same work again is how extra
    /// copies are modelled.
    pub fn add_book(
        &mut self,
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
    ) -> BookId {
        let id = self.next_id;
        self.next_id = id.next();

        let copy = Book::new(id, title, author, year);
        tracing::debug!(
            copy_id = %id,
            title = %copy.title(),
            author = %copy.author(),
            "copy added"
        );
        self.shelve(copy);
        id
    }

    /// Number of copies currently on the shelf.
    pub fn available_count(&self) -> usize {
        self.shelves.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.shelves.is_empty()
    }

    /// Available copies, work by work in listing order.
    pub fn copies(&self) -> impl Iterator<Item = &Book> + '_ {
        self.shelves.values().flatten().map(|shelved| &shelved.copy)
    }

    /// One holding per available work, in listing order.
    pub fn list_grouped(&self) -> Result<Vec<Holding>, CatalogError> {
        if self.shelves.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }
        Ok(self.holdings(|_| true))
    }

    /// Holdings whose title or author contains `term`, ignoring case.
    pub fn search(&self, term: &str) -> Result<Vec<Holding>, CatalogError> {
        let results = self.holdings(|work| {
            utils::contains_ignore_case(&work.title, term)
                || utils::contains_ignore_case(&work.author, term)
        });

        if results.is_empty() {
            tracing::debug!(term = %term, "search found nothing");
            return Err(CatalogError::no_results(term));
        }
        Ok(results)
    }

    /// Move one copy of the first listed work titled exactly `title`
    /// (ignoring case) to the patron.
    pub fn checkout(&mut self, patron: &mut Patron, title: &str) -> Result<BookId, CatalogError> {
        let Some(index) = self.shelves.iter().position(|(work, copies)| {
            !copies.is_empty() && utils::eq_ignore_case(&work.title, title)
        }) else {
            tracing::debug!(patron = %patron.name(), title = %title, "checkout refused");
            return Err(CatalogError::not_available(title));
        };

        let Some((_, copies)) = self.shelves.get_index_mut(index) else {
            return Err(CatalogError::not_available(title));
        };
        let copy = copies.remove(0).copy;
        if copies.is_empty() {
            // Keep the relative order of the remaining works.
            self.shelves.shift_remove_index(index);
        } else {
            self.reorder(index);
        }

        let id = copy.id();
        tracing::info!(
            patron = %patron.name(),
            copy_id = %id,
            title = %copy.title(),
            "copy checked out"
        );
        patron.borrow(copy);
        Ok(id)
    }

    /// Take back the patron's earliest-borrowed copy titled exactly `title`
    /// (ignoring case).
    pub fn checkin(&mut self, patron: &mut Patron, title: &str) -> Result<BookId, CatalogError> {
        let Some(copy) = patron
            .find_borrowed(title)
            .map(Book::id)
            .and_then(|id| patron.return_copy(id))
        else {
            tracing::debug!(patron = %patron.name(), title = %title, "checkin refused");
            return Err(CatalogError::not_borrowed(title));
        };

        let id = copy.id();
        tracing::info!(
            patron = %patron.name(),
            copy_id = %id,
            title = %copy.title(),
            "copy checked in"
        );
        self.shelve(copy);
        Ok(id)
    }

    /// A fresh stamp is newer than every copy on the shelf, so the work's
    /// place only changes when it is new (appended at the end).
    fn shelve(&mut self, copy: Book) {
        let stamp = self.next_stamp;
        self.next_stamp += 1;

        let copies = self.shelves.entry(copy.work_key()).or_default();
        let position = copies.partition_point(|held| held.copy.id() < copy.id());
        copies.insert(position, Shelved { stamp, copy });
    }

    /// Slide the work at `index` past every later work shelved before its
    /// oldest remaining copy.
    fn reorder(&mut self, index: usize) {
        let Some(stamp) = self
            .shelves
            .get_index(index)
            .and_then(|(_, copies)| earliest_stamp(copies))
        else {
            return;
        };

        let mut target = index;
        while let Some((_, next)) = self.shelves.get_index(target + 1) {
            if earliest_stamp(next).is_some_and(|next_stamp| next_stamp < stamp) {
                target += 1;
            } else {
                break;
            }
        }
        if target != index {
            self.shelves.move_index(index, target);
        }
    }

    fn holdings(&self, keep: impl Fn(&WorkKey) -> bool) -> Vec<Holding> {
        self.shelves
            .iter()
            .filter(|&(work, _)| keep(work))
            .filter_map(|(_, copies)| {
                copies
                    .first()
                    .map(|first| Holding::of(&first.copy, copies.len()))
            })
            .collect()
    }
}

fn earliest_stamp(copies: &[Shelved]) -> Option<u64> {
    copies.iter().map(|shelved| shelved.stamp).min()
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn kobzar_and_forest_song() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.add_book("Кобзар", "Тарас Шевченко", 1840);
        catalog.add_book("Кобзар", "Тарас Шевченко", 1840);
        catalog.add_book("Лісова пісня", "Леся Українка", 1911);
        catalog
    }

    fn counts(catalog: &Catalog) -> Vec<(String, usize)> {
        catalog
            .list_grouped()
            .map(|holdings| {
                holdings
                    .into_iter()
                    .map(|holding| (holding.title, holding.count))
                    .collect()
            })
            .unwrap_or_default()
    }

    #[test]
    fn ids_are_sequential_from_one() {
        let mut catalog = Catalog::new();
        let first = catalog.add_book("Кобзар", "Тарас Шевченко", 1840);
        let second = catalog.add_book("Кобзар", "Тарас Шевченко", 1840);
        let third = catalog.add_book("Intermezzo", "Михайло Коцюбинський", 1908);

        assert_eq!([first.get(), second.get(), third.get()], [1, 2, 3]);
        assert_eq!(catalog.available_count(), 3);
    }

    #[test]
    fn empty_catalog_signals_empty() {
        let catalog = Catalog::new();
        let error = catalog.list_grouped().unwrap_err();
        assert_eq!(error, CatalogError::EmptyCatalog);
        assert_eq!(error.kind(), ErrorKind::EmptyResult);
        assert!(catalog.search("").is_err());
    }

    #[test]
    fn grouping_follows_first_appearance() {
        let mut catalog = Catalog::new();
        catalog.add_book("Тигролови", "Іван Багряний", 1944);
        catalog.add_book("Захар Беркут", "Іван Франко", 1883);
        catalog.add_book("Тигролови", "Іван Багряний", 1944);
        catalog.add_book("Intermezzo", "Михайло Коцюбинський", 1908);

        assert_eq!(
            counts(&catalog),
            vec![
                ("Тигролови".to_string(), 2),
                ("Захар Беркут".to_string(), 1),
                ("Intermezzo".to_string(), 1),
            ]
        );
    }

    #[test]
    fn same_title_different_author_is_a_different_work() {
        let mut catalog = Catalog::new();
        catalog.add_book("Кобзар", "Тарас Шевченко", 1840);
        catalog.add_book("Кобзар", "Інший автор", 2001);

        let holdings = catalog.list_grouped().unwrap();
        assert_eq!(holdings.len(), 2);
        assert_eq!(holdings[1].author, "Інший автор");
        assert_eq!(holdings[1].year, 2001);
    }

    #[test]
    fn checkout_scenario_drains_a_work() {
        let mut catalog = kobzar_and_forest_song();
        let mut patron = Patron::new("Olena");

        assert_eq!(
            counts(&catalog),
            vec![("Кобзар".to_string(), 2), ("Лісова пісня".to_string(), 1)]
        );

        assert!(catalog.checkout(&mut patron, "кобзар").is_ok());
        assert_eq!(
            counts(&catalog),
            vec![("Кобзар".to_string(), 1), ("Лісова пісня".to_string(), 1)]
        );

        assert!(catalog.checkout(&mut patron, "кобзар").is_ok());
        assert_eq!(counts(&catalog), vec![("Лісова пісня".to_string(), 1)]);

        let error = catalog.checkout(&mut patron, "кобзар").unwrap_err();
        assert_eq!(error, CatalogError::not_available("кобзар"));
        assert_eq!(error.kind(), ErrorKind::NotFound);
        assert_eq!(patron.borrowed().len(), 2);
        assert_eq!(catalog.available_count(), 1);
    }

    #[test]
    fn checkout_hands_out_lowest_id_first() {
        let mut catalog = kobzar_and_forest_song();
        let mut patron = Patron::new("Olena");

        assert_eq!(catalog.checkout(&mut patron, "Кобзар").unwrap().get(), 1);
        assert_eq!(catalog.checkout(&mut patron, "Кобзар").unwrap().get(), 2);
    }

    #[test]
    fn checkout_requires_exact_title() {
        let mut catalog = kobzar_and_forest_song();
        let mut patron = Patron::new("Olena");

        assert!(catalog.checkout(&mut patron, "Кобз").is_err());
        assert!(catalog.checkout(&mut patron, "Лісова").is_err());
        assert!(catalog.checkout(&mut patron, "Тарас Шевченко").is_err());
        assert!(patron.borrowed().is_empty());
        assert_eq!(catalog.available_count(), 3);
    }

    #[test]
    fn checkin_restores_counts_and_returns_original_id() {
        let mut catalog = kobzar_and_forest_song();
        let mut patron = Patron::new("Olena");
        let before = counts(&catalog);

        let borrowed = catalog.checkout(&mut patron, "КОБЗАР").unwrap();
        let returned = catalog.checkin(&mut patron, "кобзар").unwrap();

        assert_eq!(borrowed, returned);
        assert_eq!(counts(&catalog), before);
        assert!(patron.borrowed().is_empty());
    }

    #[test]
    fn checkin_of_unborrowed_title_fails() {
        let mut catalog = Catalog::seeded();
        let mut patron = Patron::new("Olena");
        let before = counts(&catalog);

        let error = catalog.checkin(&mut patron, "Тигролови").unwrap_err();
        assert_eq!(error, CatalogError::not_borrowed("Тигролови"));
        assert_eq!(counts(&catalog), before);
    }

    #[test]
    fn checkin_requires_exact_title() {
        let mut catalog = kobzar_and_forest_song();
        let mut patron = Patron::new("Olena");
        catalog.checkout(&mut patron, "Лісова пісня").unwrap();

        assert!(catalog.checkin(&mut patron, "Лісова").is_err());
        assert_eq!(patron.borrowed().len(), 1);
        assert!(catalog.checkin(&mut patron, "ЛІСОВА ПІСНЯ").is_ok());
    }

    #[test]
    fn drained_work_returns_at_the_end() {
        let mut catalog = kobzar_and_forest_song();
        let mut patron = Patron::new("Olena");

        catalog.checkout(&mut patron, "Кобзар").unwrap();
        catalog.checkout(&mut patron, "Кобзар").unwrap();
        catalog.checkin(&mut patron, "Кобзар").unwrap();

        assert_eq!(
            counts(&catalog),
            vec![("Лісова пісня".to_string(), 1), ("Кобзар".to_string(), 1)]
        );
    }

    #[test]
    fn partially_borrowed_work_keeps_its_place() {
        let mut catalog = kobzar_and_forest_song();
        let mut patron = Patron::new("Olena");

        let first = catalog.checkout(&mut patron, "Кобзар").unwrap();
        catalog.checkin(&mut patron, "Кобзар").unwrap();

        assert_eq!(
            counts(&catalog),
            vec![("Кобзар".to_string(), 2), ("Лісова пісня".to_string(), 1)]
        );
        // The returned copy is again the next one handed out.
        assert_eq!(catalog.checkout(&mut patron, "Кобзар").unwrap(), first);
    }

    #[test]
    fn work_follows_its_oldest_remaining_copy() {
        let mut catalog = kobzar_and_forest_song();
        let mut patron = Patron::new("Olena");

        catalog.checkout(&mut patron, "Кобзар").unwrap();
        catalog.checkout(&mut patron, "Кобзар").unwrap();
        catalog.checkout(&mut patron, "Лісова пісня").unwrap();
        catalog.checkin(&mut patron, "Кобзар").unwrap();
        catalog.checkin(&mut patron, "Лісова пісня").unwrap();
        catalog.checkin(&mut patron, "Кобзар").unwrap();
        assert_eq!(
            counts(&catalog),
            vec![("Кобзар".to_string(), 2), ("Лісова пісня".to_string(), 1)]
        );

        // Copy 2 went back on the shelf after Лісова пісня did.
        assert_eq!(catalog.checkout(&mut patron, "Кобзар").unwrap().get(), 1);
        assert_eq!(
            counts(&catalog),
            vec![("Лісова пісня".to_string(), 1), ("Кобзар".to_string(), 1)]
        );
    }

    #[test]
    fn shared_title_checks_out_from_first_listed_work() {
        let mut catalog = Catalog::new();
        catalog.add_book("Кобзар", "Тарас Шевченко", 1840);
        catalog.add_book("Кобзар", "Інший автор", 2001);
        catalog.add_book("Кобзар", "Тарас Шевченко", 1840);
        let mut patron = Patron::new("Olena");

        assert_eq!(catalog.checkout(&mut patron, "кобзар").unwrap().get(), 1);
        assert_eq!(patron.borrowed()[0].author(), "Тарас Шевченко");

        // Copy 3 is now Шевченко's oldest, shelved after Інший автор's copy 2.
        let holdings = catalog.list_grouped().unwrap();
        assert_eq!(holdings[0].author, "Інший автор");
        assert_eq!(holdings[1].author, "Тарас Шевченко");
        assert_eq!(catalog.checkout(&mut patron, "КОБЗАР").unwrap().get(), 2);
        assert_eq!(catalog.checkout(&mut patron, "Кобзар").unwrap().get(), 3);
    }

    #[test]
    fn ids_are_not_reused_after_loans() {
        let mut catalog = kobzar_and_forest_song();
        let mut patron = Patron::new("Olena");

        catalog.checkout(&mut patron, "Лісова пісня").unwrap();
        let added = catalog.add_book("Лісова пісня", "Леся Українка", 1911);
        assert_eq!(added.get(), 4);
    }

    #[test]
    fn search_matches_title_or_author_substring() {
        let catalog = Catalog::seeded();

        let by_author = catalog.search("коцюбинськ").unwrap();
        let titles: Vec<&str> = by_author.iter().map(|h| h.title.as_str()).collect();
        assert_eq!(titles, vec!["Тіні забутих предків", "Intermezzo"]);

        let by_title = catalog.search("BERKUT").unwrap();
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].title, "Zahar Berkut");

        let error = catalog.search("Гоголь").unwrap_err();
        assert_eq!(error, CatalogError::no_results("Гоголь"));
    }

    #[test]
    fn empty_search_lists_everything() {
        let catalog = Catalog::seeded();
        assert_eq!(catalog.search("").unwrap(), catalog.list_grouped().unwrap());
    }

    #[test]
    fn search_excludes_borrowed_copies() {
        let mut catalog = kobzar_and_forest_song();
        let mut patron = Patron::new("Olena");
        catalog.checkout(&mut patron, "Лісова пісня").unwrap();

        assert!(catalog.search("Українка").is_err());
        assert_eq!(catalog.search("шевченко").unwrap()[0].count, 2);
    }
}
