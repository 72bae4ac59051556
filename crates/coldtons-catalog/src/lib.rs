//! coldtons-catalog: Catalog data model, upstream astronomy clients and the
//! in-memory catalog caches behind the ColDToNs API.
//!
//! - `table`: schema-free rows of typed values
//! - `votable` / `heasarc`: HEASARC TAP all-sky fetch (NICER master catalog)
//! - `cache`: build-once identifier index with availability lookups
//! - `psrcat`: ATNF pulsar catalogue parsing and parameter queries
//! - `export`: CSV/JSON file rendering for downloads

pub mod error;
pub mod table;
pub mod votable;
pub mod heasarc;
pub mod cache;
pub mod psrcat;
pub mod export;

pub use cache::{CacheStatus, CatalogCache, FetchPolicy, Lookup};
pub use error::CatalogError;
pub use heasarc::{CatalogSource, HeasarcClient};
pub use psrcat::PulsarCatalogue;
pub use table::{ObservationTable, Row, Value};
