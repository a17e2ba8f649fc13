use crate::utils::error::{PinError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(PinError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(PinError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PinError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Keys become file names in `LocalStorage`, so they must stay inside the data directory.
pub fn validate_storage_key(field_name: &str, key: &str) -> Result<()> {
    validate_non_empty_string(field_name, key)?;
    validate_path(field_name, key)?;

    if key.contains('/') || key.contains('\\') || key == "." || key == ".." {
        return Err(PinError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: key.to_string(),
            reason: "Key cannot contain path separators".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    // NaN fails both comparisons, so test containment instead of exclusion
    if !(value >= min && value <= max) {
        return Err(PinError::InvalidCoordinateError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_coordinate(latitude: f64, longitude: f64) -> Result<()> {
    validate_range("latitude", latitude, -90.0, 90.0)?;
    validate_range("longitude", longitude, -180.0, 180.0)
}

pub fn validate_radius(value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(PinError::InvalidRadiusError {
            value,
            reason: "Radius must be a finite number".to_string(),
        });
    }
    if value <= 0.0 {
        return Err(PinError::InvalidRadiusError {
            value,
            reason: "Radius must be greater than zero".to_string(),
        });
    }
    Ok(())
}
