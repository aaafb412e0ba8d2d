/*
Copyright 2021 Jakub Lewandowski

This file is part of SatLink Analyzer (SLA).

SatLink Analyzer (SLA) is a free software: you can redistribute it and/or modify
it under the terms of the GNU General Public License as published by
the Free Software Foundation; either version 3 of the License, or
(at your option) any later version.

SatLink Analyzer (SLA) is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
GNU General Public License for more details.

You should have received a copy of the GNU General Public License
along with SatLink Analyzer (SLA). If not, see https://www.gnu.org/licenses/.
*/

//! Module with methods to compute look angles from a ground
//! station to a geostationary satellite.
//!
//! The Earth is a sphere of radius [`EARTH_RADIUS`] and the satellite
//! sits exactly on the equator at [`GEOSTATIONARY_RADIUS`] from the
//! Earth centre, so the geometry depends only on station latitude and the longitude
//! difference between station and sub-satellite point.

use float_cmp::approx_eq;

use crate::constants::{EARTH_RADIUS, GEOSTATIONARY_RADIUS};
use crate::Float;

/// Pointing geometry of a ground station antenna.
///
/// Values are kept in full precision, rounding happens
/// only when results are presented.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug)]
pub struct LookAngles {
    /// Azimuth in degrees.
    pub azimuth: Float,

    /// Elevation in degrees, never clamped. The sign follows
    /// `sin(lat)`, so southern stations always get negative values.
    pub elevation: Float,

    /// Slant range in km.
    pub range: Float,

    /// Set when the station lies on the equator and the elevation
    /// formula divides by zero. Azimuth and elevation then hold
    /// whatever IEEE special value the division produced.
    pub indeterminate: bool,
}

impl LookAngles {
    pub fn has_negative_elevation(&self) -> bool {
        self.elevation < 0.0
    }
}

/// Computes azimuth, elevation and slant range from a station
/// at given latitude and longitude to a geostationary satellite
/// above given longitude. All angles in degrees.
///
/// A station directly below the satellite meridian (equal longitudes)
/// gets azimuth 0° on the northern and 180° on the southern hemisphere.
pub fn resolve_geometry(station_lat: Float, station_lon: Float, satellite_lon: Float) -> LookAngles {
    let phi = station_lat.to_radians();
    let delta = (station_lon - satellite_lon).to_radians();

    let cos_gamma = phi.cos() * delta.cos();

    let range = (EARTH_RADIUS.powi(2) + GEOSTATIONARY_RADIUS.powi(2)
        - 2.0 * EARTH_RADIUS * GEOSTATIONARY_RADIUS * cos_gamma)
        .sqrt();

    let elevation = ((GEOSTATIONARY_RADIUS * cos_gamma - EARTH_RADIUS)
        / (GEOSTATIONARY_RADIUS * phi.sin()))
    .atan()
    .to_degrees();

    let azimuth = azimuth(station_lat, phi, delta);

    LookAngles {
        azimuth,
        elevation,
        range,
        indeterminate: approx_eq!(Float, phi.sin(), 0.0),
    }
}

/// Azimuth from north with hemisphere correction.
fn azimuth(station_lat: Float, phi: Float, delta: Float) -> Float {
    let az_0 = (delta.abs().tan() / phi.sin()).atan().to_degrees();

    if station_lat < 0.0 {
        if delta > 0.0 {
            360.0 - az_0
        } else {
            180.0 + az_0
        }
    } else if delta > 0.0 {
        180.0 - az_0
    } else {
        az_0
    }
}

#[cfg(test)]
mod tests {
    use super::resolve_geometry;
    use crate::constants::{EARTH_RADIUS, GEOSTATIONARY_RADIUS};
    use crate::Float;
    use float_cmp::approx_eq;
    use nalgebra::Vector3;
    use proptest::prelude::*;

    #[test]
    fn madrid() {
        let geo = resolve_geometry(40.41, -3.70, -61.0);

        assert!(approx_eq!(Float, geo.azimuth, 112.60, epsilon = 0.005));
        assert!(approx_eq!(Float, geo.elevation, 21.87, epsilon = 0.005));
        assert!(approx_eq!(Float, geo.range, 39960.46, epsilon = 0.005));
        assert!(!geo.indeterminate);
        assert!(!geo.has_negative_elevation());
    }

    #[test]
    fn los_angeles() {
        let geo = resolve_geometry(34.05, -118.24, -61.0);

        assert!(approx_eq!(Float, geo.azimuth, 70.19, epsilon = 0.005));
        assert!(approx_eq!(Float, geo.elevation, 27.96, epsilon = 0.005));
        assert!(approx_eq!(Float, geo.range, 39711.04, epsilon = 0.005));
    }

    #[test]
    fn below_satellite() {
        let north = resolve_geometry(0.01, 10.0, 10.0);
        assert!(approx_eq!(Float, north.elevation, 90.0, epsilon = 0.05));
        assert_eq!(north.azimuth, 0.0);

        let south = resolve_geometry(-0.01, 10.0, 10.0);
        assert!(approx_eq!(Float, south.elevation.abs(), 90.0, epsilon = 0.05));
        assert_eq!(south.azimuth, 180.0);
    }

    #[test]
    fn southern_hemisphere_quadrants() {
        let west = resolve_geometry(-30.0, 5.0, 10.0);
        assert!(approx_eq!(Float, west.azimuth, 170.075, epsilon = 0.001));

        let east = resolve_geometry(-30.0, 15.0, 10.0);
        assert!(approx_eq!(Float, east.azimuth, 369.925, epsilon = 0.001));

        // sign of sin(lat) carries into the elevation formula
        assert!(approx_eq!(Float, east.elevation, -54.91, epsilon = 0.005));
        assert!(east.has_negative_elevation());
    }

    #[test]
    fn equator_is_indeterminate() {
        let geo = resolve_geometry(0.0, 20.0, 10.0);

        assert!(geo.indeterminate);
        assert!(geo.range.is_finite());
        // x/0 saturates atan instead of panicking
        assert_eq!(geo.elevation, 90.0);

        let geo = resolve_geometry(0.0, 10.0, 10.0);
        assert!(geo.indeterminate);
        assert!(geo.azimuth.is_nan());
    }

    #[test]
    fn deterministic() {
        assert_eq!(
            resolve_geometry(40.41, -3.70, -61.0),
            resolve_geometry(40.41, -3.70, -61.0)
        );
    }

    fn position(radius: Float, lat: Float, lon: Float) -> Vector3<Float> {
        let (phi, lambda) = (lat.to_radians(), lon.to_radians());
        Vector3::new(
            radius * phi.cos() * lambda.cos(),
            radius * phi.cos() * lambda.sin(),
            radius * phi.sin(),
        )
    }

    proptest! {
        #[test]
        fn range_symmetric_in_longitude_difference(
            lat in -89.0f64..89.0,
            lon in -90.0f64..90.0,
            diff in 0.0f64..90.0,
        ) {
            let east = resolve_geometry(lat, lon + diff, lon);
            let west = resolve_geometry(lat, lon - diff, lon);

            prop_assert!(approx_eq!(Float, east.range, west.range, epsilon = 1e-6));
        }

        #[test]
        fn range_is_distance_between_positions(
            lat in -90.0f64..90.0,
            lon in -180.0f64..180.0,
            sat_lon in -180.0f64..180.0,
        ) {
            let station = position(EARTH_RADIUS, lat, lon);
            let satellite = position(GEOSTATIONARY_RADIUS, 0.0, sat_lon);

            let geo = resolve_geometry(lat, lon, sat_lon);

            prop_assert!(approx_eq!(Float, geo.range, (satellite - station).norm(), epsilon = 1e-6));
        }
    }
}
