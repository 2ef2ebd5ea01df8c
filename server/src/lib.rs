//! Datagram server for the duel creature-battle service
//!
//! Each datagram carries one request line; the [`Dispatcher`] resolves it
//! against the [`SessionRegistry`] and the roster store and produces exactly
//! one response line, sent back to the originating address.

pub mod config;
pub mod dispatcher;
pub mod registry;
pub mod transport;

pub use config::{Config, ConfigError};
pub use dispatcher::Dispatcher;
pub use registry::{RegistryError, SessionRegistry, SharedBattle};
