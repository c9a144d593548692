//! The collection a fresh catalog starts with.

use super::Catalog;

/// `(title, author, year)` for each seeded copy, in shelving order.
pub const SEED_COPIES: &[(&str, &str, i32)] = &[
    ("Кобзар", "Тарас Шевченко", 1840),
    ("Кобзар", "Тарас Шевченко", 1840),
    ("Тіні забутих предків", "Михайло Коцюбинський", 1911),
    ("Захар Беркут", "Іван Франко", 1883),
    ("Захар Беркут", "Іван Франко", 1883),
    ("Zahar Berkut", "Іван Франко", 1883),
    ("Лісова пісня", "Леся Українка", 1911),
    ("Intermezzo", "Михайло Коцюбинський", 1908),
    ("Тигролови", "Іван Багряний", 1944),
    ("Тигролови", "Іван Багряний", 1944),
];

pub fn populate(catalog: &mut Catalog) {
    for &(title, author, year) in SEED_COPIES {
        catalog.add_book(title, author, year);
    }
    tracing::info!(copies = SEED_COPIES.len(), "catalog seeded");
}
