//! Geographic positions and great-circle distance.
//!
//! Departure points arrive as `"<lat>,<lon>"` strings in decimal degrees.
//! They are parsed once into [`GeoCoordinate`] and all distance work is
//! done in `f64` on a spherical Earth.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, Result};

/// Mean Earth radius used for haversine distances (kilometres)
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Geographic coordinates (latitude, longitude)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl GeoCoordinate {
    /// Create a new geographic coordinate
    ///
    /// # Arguments
    /// * `latitude` - Latitude in degrees (-90 to 90)
    /// * `longitude` - Longitude in degrees (-180 to 180)
    ///
    /// # Returns
    /// * `Ok(GeoCoordinate)` - Valid coordinate
    /// * `Err(CoreError::InvalidCoordinate)` - Out of range or not finite
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CoreError::InvalidCoordinate(format!(
                "Latitude must be between -90 and 90, got {}",
                latitude
            )));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CoreError::InvalidCoordinate(format!(
                "Longitude must be between -180 and 180, got {}",
                longitude
            )));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Calculate haversine distance to another coordinate in kilometres
    ///
    /// Great-circle distance on a sphere of radius [`EARTH_RADIUS_KM`].
    /// Symmetric in its two points.
    pub fn haversine_distance_km(&self, other: &GeoCoordinate) -> f64 {
        let lat1_rad = self.latitude.to_radians();
        let lat2_rad = other.latitude.to_radians();
        let delta_lat = (other.latitude - self.latitude).abs().to_radians();
        let delta_lon = (other.longitude - self.longitude).abs().to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_KM * c
    }
}

impl FromStr for GeoCoordinate {
    type Err = CoreError;

    /// Parse `"<lat>,<lon>"`; whitespace around either number is ignored.
    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split(',');
        let (lat, lon) = match (parts.next(), parts.next(), parts.next()) {
            (Some(lat), Some(lon), None) => (lat.trim(), lon.trim()),
            _ => {
                return Err(CoreError::InvalidCoordinate(format!(
                    "expected '<lat>,<lon>', got '{}'",
                    s
                )))
            }
        };

        let latitude = lat
            .parse::<f64>()
            .map_err(|_| CoreError::InvalidCoordinate(format!("latitude '{}' is not a number", lat)))?;
        let longitude = lon
            .parse::<f64>()
            .map_err(|_| CoreError::InvalidCoordinate(format!("longitude '{}' is not a number", lon)))?;

        Self::new(latitude, longitude)
    }
}

impl fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinate() {
        let coord: GeoCoordinate = "40.0,-73.0".parse().unwrap();
        assert_eq!(coord.latitude, 40.0);
        assert_eq!(coord.longitude, -73.0);

        let spaced: GeoCoordinate = " 51.47 , -0.4543 ".parse().unwrap();
        assert_eq!(spaced.latitude, 51.47);
        assert_eq!(spaced.longitude, -0.4543);
    }

    #[test]
    fn test_parse_rejects_bad_shapes() {
        for bad in ["", "40.0", "40.0;-73.0", "40.0,-73.0,12", "north,west", "40.0,"] {
            assert!(bad.parse::<GeoCoordinate>().is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert!(GeoCoordinate::new(90.5, 0.0).is_err());
        assert!(GeoCoordinate::new(0.0, -180.5).is_err());
        assert!(GeoCoordinate::new(f64::NAN, 0.0).is_err());
        assert!("91,0".parse::<GeoCoordinate>().is_err());
    }

    #[test]
    fn test_identical_points_zero_distance() {
        let coord = GeoCoordinate::new(40.0, -73.0).unwrap();
        assert_eq!(coord.haversine_distance_km(&coord), 0.0);
    }

    #[test]
    fn test_antipodal_distance() {
        let a = GeoCoordinate::new(0.0, 0.0).unwrap();
        let b = GeoCoordinate::new(0.0, 180.0).unwrap();
        let distance = a.haversine_distance_km(&b);
        assert!((distance - 20015.0).abs() < 1.0, "distance was {}", distance);

        let north = GeoCoordinate::new(90.0, 0.0).unwrap();
        let south = GeoCoordinate::new(-90.0, 0.0).unwrap();
        assert!((north.haversine_distance_km(&south) - 20015.0).abs() < 1.0);
    }

    #[test]
    fn test_distance_symmetric() {
        let jfk = GeoCoordinate::new(40.6413, -73.7781).unwrap();
        let lhr = GeoCoordinate::new(51.47, -0.4543).unwrap();
        let there = jfk.haversine_distance_km(&lhr);
        let back = lhr.haversine_distance_km(&jfk);
        assert_eq!(there, back);
        // JFK-LHR is roughly 5540 km
        assert!((there - 5540.0).abs() < 10.0, "distance was {}", there);
    }

    #[test]
    fn test_display_round_trips() {
        let coord = GeoCoordinate::new(40.1, -73.1).unwrap();
        assert_eq!(coord.to_string(), "40.1,-73.1");
        assert_eq!(coord.to_string().parse::<GeoCoordinate>().unwrap(), coord);
    }
}
