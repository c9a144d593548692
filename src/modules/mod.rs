pub mod books;
pub mod catalog;
pub mod patrons;

use libris_kernel::settings::CatalogSettings;

use catalog::Catalog;

/// Build the catalog the application starts with.
pub fn bootstrap(settings: &CatalogSettings) -> Catalog {
    if settings.seed {
        Catalog::seeded()
    } else {
        tracing::info!("starting with an empty catalog");
        Catalog::new()
    }
}
