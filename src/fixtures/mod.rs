//! Fixture acquisition and storage
//!
//! - `scrape` - fetch a problem's example pairs from the public API
//! - `store` - persist them as paired `input_<n>.txt` / `output_<n>.txt` files

pub mod scrape;
pub mod store;

/// One example pair scraped from a problem description.
///
/// Identity is the 1-based index of the pair in scrape order; cases are
/// immutable once created and written to disk exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureCase {
    pub input: String,
    pub output: String,
}
