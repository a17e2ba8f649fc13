use crate::core::codec::{decode_pins, encode_pins};
use crate::core::geo::haversine_distance;
use crate::domain::model::{Coordinate, Pin};
use crate::domain::ports::{ConfigProvider, KeyValueStore};
use crate::utils::error::{PinError, Result};
use crate::utils::validation::{validate_coordinate, validate_non_empty_string, validate_radius};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

pub const SAVED_PINS_KEY: &str = "SavedAnnotations";
pub const DEFAULT_RADIUS_METERS: f64 = 100.0;
pub const CORRUPT_BACKUP_SUFFIX: &str = ".corrupt";

/// What to do when the stored value exists but does not decode as a pin list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorruptDataPolicy {
    /// Return `PinError::CorruptDataError` and leave storage untouched.
    Fail,
    /// Drop the stored value and start with no pins.
    Discard,
    /// Copy the stored value to `<key>.corrupt` (or the next free `<key>.corrupt.N`), then start
    /// with no pins.
    #[default]
    Backup,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoreOptions {
    pub key: String,
    pub radius_meters: f64,
    pub corrupt_data_policy: CorruptDataPolicy,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            key: SAVED_PINS_KEY.to_string(),
            radius_meters: DEFAULT_RADIUS_METERS,
            corrupt_data_policy: CorruptDataPolicy::default(),
        }
    }
}

impl StoreOptions {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self {
            key: config.storage_key().to_string(),
            radius_meters: config.radius_meters(),
            corrupt_data_policy: config.corrupt_data_policy(),
        }
    }
}

/// Saved pins backed by a [`KeyValueStore`].
///
/// The whole collection is rewritten under one key on every append. Only one `PinStore` may own a
/// given key at a time; concurrent instances or processes sharing a key will overwrite each other.
pub struct PinStore<S: KeyValueStore> {
    storage: S,
    key: String,
    pins: Vec<Pin>,
    radius: f64,
}

impl<S: KeyValueStore> PinStore<S> {
    /// Load pins stored under `SavedAnnotations` with the default options.
    pub fn initialize(storage: S) -> Result<Self> {
        Self::with_options(storage, StoreOptions::default())
    }

    pub fn with_options(mut storage: S, options: StoreOptions) -> Result<Self> {
        validate_non_empty_string("storage.key", &options.key)?;

        let pins = load_pins(&mut storage, &options.key, options.corrupt_data_policy)?;
        info!(
            "Loaded {} saved pin(s) from '{}' (radius {} m)",
            pins.len(),
            options.key,
            options.radius_meters
        );

        Ok(Self {
            storage,
            key: options.key,
            pins,
            radius: options.radius_meters,
        })
    }

    /// Every saved pin as a coordinate, in insertion order.
    pub fn all_coordinates(&self) -> Vec<Coordinate> {
        self.pins.iter().map(Pin::coordinate).collect()
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    /// Append a pin and write the full collection back to storage.
    ///
    /// The coordinate is range-checked first. If encoding, writing or flushing fails the pin is
    /// not kept. A failed flush also puts the previous stored value back, so storage and memory
    /// agree on the last successful write.
    pub fn save_annotation(&mut self, coordinate: Coordinate) -> Result<()> {
        validate_coordinate(coordinate.latitude, coordinate.longitude)?;

        let previous = self.storage.get(&self.key)?;
        self.pins.push(Pin::from(coordinate));
        if let Err(e) = self.persist(previous) {
            self.pins.pop();
            warn!("Failed to save pin ({}, {}): {}", coordinate.latitude, coordinate.longitude, e);
            return Err(e);
        }

        debug!(
            "Saved pin ({}, {}), {} total",
            coordinate.latitude,
            coordinate.longitude,
            self.pins.len()
        );
        Ok(())
    }

    /// Pins no farther than the current radius from `reference`, in insertion order.
    pub fn filtered_coordinates(&self, reference: Coordinate) -> Vec<Coordinate> {
        self.pins
            .iter()
            .map(Pin::coordinate)
            .filter(|coordinate| haversine_distance(*coordinate, reference) <= self.radius)
            .collect()
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Replace the radius as given. Zero, negative or NaN values make every filter come back empty.
    pub fn set_radius(&mut self, value: f64) {
        debug!("Radius set to {} m", value);
        self.radius = value;
    }

    /// Like [`set_radius`](Self::set_radius) but rejects non-finite and non-positive values.
    pub fn try_set_radius(&mut self, value: f64) -> Result<()> {
        validate_radius(value)?;
        self.set_radius(value);
        Ok(())
    }

    /// Apply a radius typed by the user. Returns `false` and keeps the current radius when the
    /// text is not a finite number.
    pub fn set_radius_from_text(&mut self, text: &str) -> bool {
        match text.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => {
                self.set_radius(value);
                true
            }
            _ => {
                debug!("Ignoring radius input '{}'", text);
                false
            }
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    fn persist(&mut self, previous: Option<String>) -> Result<()> {
        let encoded = encode_pins(&self.pins)?;
        self.storage.set(&self.key, &encoded)?;

        if let Err(e) = self.storage.flush() {
            // restore errors win: they mean storage may still hold the rejected pin
            match previous {
                Some(raw) => self.storage.set(&self.key, &raw)?,
                None => self.storage.remove(&self.key)?,
            }
            self.storage.flush()?;
            return Err(e);
        }
        Ok(())
    }
}

fn load_pins<S: KeyValueStore>(
    storage: &mut S,
    key: &str,
    policy: CorruptDataPolicy,
) -> Result<Vec<Pin>> {
    let Some(raw) = storage.get(key)? else {
        debug!("No saved pins under '{}'", key);
        return Ok(Vec::new());
    };

    let source = match decode_pins(&raw) {
        Ok(pins) => return Ok(pins),
        Err(source) => source,
    };

    match policy {
        CorruptDataPolicy::Fail => Err(PinError::CorruptDataError {
            key: key.to_string(),
            source,
        }),
        CorruptDataPolicy::Discard => {
            warn!("Discarding malformed pins under '{}': {}", key, source);
            storage.remove(key)?;
            storage.flush()?;
            Ok(Vec::new())
        }
        CorruptDataPolicy::Backup => {
            let backup_key = free_backup_key(storage, key)?;
            warn!(
                "Malformed pins under '{}' moved to '{}': {}",
                key, backup_key, source
            );
            storage.set(&backup_key, &raw)?;
            storage.remove(key)?;
            storage.flush()?;
            Ok(Vec::new())
        }
    }
}

/// `<key>.corrupt`, or `<key>.corrupt.N` with the first unused N when earlier backups exist.
fn free_backup_key<S: KeyValueStore>(storage: &S, key: &str) -> Result<String> {
    let base = format!("{}{}", key, CORRUPT_BACKUP_SUFFIX);
    if storage.get(&base)?.is_none() {
        return Ok(base);
    }

    let mut n = 1usize;
    loop {
        let candidate = format!("{}.{}", base, n);
        if storage.get(&candidate)?.is_none() {
            return Ok(candidate);
        }
        n += 1;
    }
}
