// Adapters layer: concrete storage backends behind the KeyValueStore port.

pub mod storage;
