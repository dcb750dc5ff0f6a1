use serde::{Deserialize, Serialize};
use std::convert::TryFrom;
use std::fmt;

use crate::error::{invalid_input_error, Error};

// WGS84, validated on construction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinates")]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawCoordinates {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinates> for Coordinates {
    type Error = Error;

    fn try_from(raw: RawCoordinates) -> Result<Self, Self::Error> {
        Coordinates::new(raw.latitude, raw.longitude)
    }
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, Error> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(invalid_input_error());
        }

        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(invalid_input_error());
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn lon_lat(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

#[test]
fn rejects_out_of_range_values() {
    assert!(Coordinates::new(90.0, 180.0).is_ok());
    assert!(Coordinates::new(-90.0, -180.0).is_ok());
    assert!(Coordinates::new(90.1, 0.0).is_err());
    assert!(Coordinates::new(0.0, -180.5).is_err());
    assert!(Coordinates::new(f64::NAN, 0.0).is_err());
    assert!(Coordinates::new(0.0, f64::INFINITY).is_err());
}

#[test]
fn deserialization_validates() {
    let ok: Result<Coordinates, _> =
        serde_json::from_str(r#"{"latitude": 40.7128, "longitude": -74.006}"#);
    assert_eq!(ok.unwrap(), Coordinates::new(40.7128, -74.006).unwrap());

    let bad: Result<Coordinates, _> =
        serde_json::from_str(r#"{"latitude": 140.0, "longitude": 0.0}"#);
    assert!(bad.is_err());
}

#[test]
fn displays_six_decimals() {
    let coordinates = Coordinates::new(40.7128, -74.006).unwrap();
    assert_eq!(coordinates.to_string(), "40.712800, -74.006000");
    assert_eq!(coordinates.lon_lat(), [-74.006, 40.7128]);
}
