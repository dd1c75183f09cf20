use crate::constants::Degree;
use crate::starminal_errors::StarminalError;

/// Geographic position of the observer.
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverLocation {
    // geodetic latitude, north positive
    pub latitude: Degree,
    // east of Greenwich
    pub longitude: Degree,
    pub country: String,
}

impl ObserverLocation {
    /// Build a location, rejecting coordinates outside `[-90, 90]` × `[-180, 180]`.
    pub fn new(
        latitude: Degree,
        longitude: Degree,
        country: impl Into<String>,
    ) -> Result<Self, StarminalError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(StarminalError::InvalidCoordinate(format!(
                "latitude {latitude} out of range"
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(StarminalError::InvalidCoordinate(format!(
                "longitude {longitude} out of range"
            )));
        }
        Ok(ObserverLocation {
            latitude,
            longitude,
            country: country.into(),
        })
    }
}
