//! Text encoding of the saved pin list.
//!
//! The stored value is a JSON array of `{"longitude": .., "latitude": ..}` records with no
//! version marker, so values written by earlier releases stay readable.

use crate::domain::model::Pin;
use crate::utils::error::{PinError, Result};

pub fn encode_pins(pins: &[Pin]) -> Result<String> {
    // serde_json writes NaN/inf as null, which would not decode back into a Pin
    if let Some((index, pin)) = pins.iter().enumerate().find(|(_, pin)| !pin.is_finite()) {
        return Err(PinError::NonFiniteCoordinateError {
            index,
            latitude: pin.latitude(),
            longitude: pin.longitude(),
        });
    }

    Ok(serde_json::to_string(pins)?)
}

pub fn decode_pins(raw: &str) -> serde_json::Result<Vec<Pin>> {
    serde_json::from_str(raw)
}
