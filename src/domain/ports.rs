use crate::core::pin_store::CorruptDataPolicy;
use crate::utils::error::Result;

/// String key-value persistence the pin store reads and writes through.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    fn remove(&mut self, key: &str) -> Result<()>;

    /// Make every completed `set` durable before returning.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}

pub trait ConfigProvider {
    fn storage_dir(&self) -> &str;
    fn storage_key(&self) -> &str;
    fn radius_meters(&self) -> f64;
    fn corrupt_data_policy(&self) -> CorruptDataPolicy;
}
