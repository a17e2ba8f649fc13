pub mod codec;
pub mod geo;
pub mod pin_store;

pub use crate::domain::model::{Coordinate, Pin};
pub use crate::domain::ports::{ConfigProvider, KeyValueStore};
pub use crate::utils::error::Result;
