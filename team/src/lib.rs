//! Roster persistence and creature catalog
//!
//! - [`RosterStore`] - the gateway every roster read and write goes through
//! - [`JsonRosterStore`] - one JSON file per player
//! - [`MemoryRosterStore`] - process-local store for tests
//! - [`Catalog`] - read-only creature definitions loaded at start-up

mod catalog;
mod record;
mod store;

pub use catalog::{Catalog, CatalogError};
pub use record::{CreatureRecord, StatRecord};
pub use store::{JsonRosterStore, MemoryRosterStore, RosterStore, StoreError};
