//! Location - A geographic coordinate
//!
//! Location is a Value Object: two locations with the same coordinates
//! are equal. It is stored and returned verbatim, never computed over.

use crate::error::{FleetError, InvalidCoordinate};

/// Lowest accepted altitude, in meters (Mariana Trench)
pub const MIN_ALTITUDE: f64 = -11_000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    latitude: f64,
    longitude: f64,
    altitude: Option<f64>,
}

impl Location {
    /// Validate and build a location.
    ///
    /// Bounds are checked in order: latitude, longitude, altitude.
    /// NaN is outside every range and is rejected.
    pub fn new(latitude: f64, longitude: f64, altitude: Option<f64>) -> Result<Self, FleetError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(InvalidCoordinate::Latitude(latitude).into());
        }

        if !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidCoordinate::Longitude(longitude).into());
        }

        if let Some(altitude) = altitude {
            if altitude.is_nan() || altitude < MIN_ALTITUDE {
                return Err(InvalidCoordinate::Altitude(altitude).into());
            }
        }

        Ok(Self {
            latitude,
            longitude,
            altitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn altitude(&self) -> Option<f64> {
        self.altitude
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invalid(result: Result<Location, FleetError>) -> InvalidCoordinate {
        match result {
            Err(FleetError::InvalidLocation(coordinate)) => coordinate,
            other => panic!("expected invalid location, got {:?}", other),
        }
    }

    #[test]
    fn test_bounds_are_inclusive() {
        for (lat, lon) in [(90.0, 180.0), (-90.0, -180.0), (0.0, 0.0), (48.8566, 2.3522)] {
            let location = Location::new(lat, lon, None).unwrap();
            assert_eq!(location.latitude(), lat);
            assert_eq!(location.longitude(), lon);
            assert_eq!(location.altitude(), None);
        }

        let deepest = Location::new(0.0, 0.0, Some(-11_000.0)).unwrap();
        assert_eq!(deepest.altitude(), Some(-11_000.0));
    }

    #[test]
    fn test_latitude_out_of_range() {
        assert_eq!(
            invalid(Location::new(91.0, 0.0, None)),
            InvalidCoordinate::Latitude(91.0)
        );
        assert_eq!(
            invalid(Location::new(-91.0, 0.0, None)),
            InvalidCoordinate::Latitude(-91.0)
        );
    }

    #[test]
    fn test_longitude_out_of_range() {
        assert_eq!(
            invalid(Location::new(0.0, 181.0, None)),
            InvalidCoordinate::Longitude(181.0)
        );
        assert_eq!(
            invalid(Location::new(0.0, -181.0, None)),
            InvalidCoordinate::Longitude(-181.0)
        );
    }

    #[test]
    fn test_altitude_floor() {
        assert_eq!(
            invalid(Location::new(0.0, 0.0, Some(-11_001.0))),
            InvalidCoordinate::Altitude(-11_001.0)
        );
    }

    #[test]
    fn test_latitude_checked_first() {
        // Every bound is broken; latitude is reported
        assert!(matches!(
            invalid(Location::new(100.0, 200.0, Some(-20_000.0))),
            InvalidCoordinate::Latitude(_)
        ));
        assert!(matches!(
            invalid(Location::new(0.0, 200.0, Some(-20_000.0))),
            InvalidCoordinate::Longitude(_)
        ));
    }

    #[test]
    fn test_nan_rejected() {
        assert!(Location::new(f64::NAN, 0.0, None).is_err());
        assert!(Location::new(0.0, f64::NAN, None).is_err());
        assert!(Location::new(0.0, 0.0, Some(f64::NAN)).is_err());
    }

    #[test]
    fn test_value_equality() {
        let a = Location::new(48.8566, 2.3522, Some(35.0)).unwrap();
        let b = Location::new(48.8566, 2.3522, Some(35.0)).unwrap();
        let c = Location::new(48.8566, 2.3522, None).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
