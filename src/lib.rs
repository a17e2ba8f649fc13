pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::storage::{LocalStorage, MemoryStorage};
pub use config::toml_config::TomlConfig;
pub use core::geo::haversine_distance;
pub use core::pin_store::{CorruptDataPolicy, PinStore, StoreOptions};
pub use domain::model::{Coordinate, Pin};
pub use domain::ports::{ConfigProvider, KeyValueStore};
pub use utils::error::{PinError, Result};
