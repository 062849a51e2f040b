//! Section/key string settings storage
//!
//! The plugin manager only needs four operations from its settings backend,
//! captured by [`ConfigStore`]. Two implementations ship with the crate:
//!
//! - [`TomlConfigStore`]: file-backed, one TOML table per section
//! - [`MemoryConfigStore`]: in-memory, for tests and embedding

mod error;
mod store;
mod toml_store;

pub use error::ConfigError;
pub use store::{ConfigStore, MemoryConfigStore, Sections};
pub use toml_store::TomlConfigStore;
