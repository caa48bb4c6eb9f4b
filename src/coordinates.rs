//! Coordinates normalization and geodetic helpers
use crate::{fields, record::PositionFix, timeseries::Table};

use dms_coordinates::DMS;
use map_3d::{deg2rad, ecef2geodetic, geodetic2ecef, rad2deg, Ellipsoid};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

impl PositionFix {
    /// Returns true if decimal coordinates were already derived
    pub fn is_normalized(&self) -> bool {
        self.latitude_ddeg.is_some() || self.longitude_ddeg.is_some()
    }
    /// Derives decimal latitude and longitude from the raw angles.
    /// Fixes that were already normalized are left untouched, so this
    /// never converts twice.
    pub fn normalize(&mut self) {
        if self.is_normalized() {
            return;
        }
        self.latitude_ddeg = fields::angle(self.latitude, self.north_south);
        self.longitude_ddeg = fields::angle(self.longitude, self.east_west);
    }
    /// Latitude as [DMS], once normalized
    pub fn latitude_dms(&self) -> Option<DMS> {
        self.latitude_ddeg.map(DMS::from_ddeg_latitude)
    }
    /// Longitude as [DMS], once normalized
    pub fn longitude_dms(&self) -> Option<DMS> {
        self.longitude_ddeg.map(DMS::from_ddeg_longitude)
    }
    /// Ellipsoidal height: antenna altitude above mean sea level
    /// plus geoid separation, in meters.
    pub fn ellipsoidal_height(&self) -> Option<f64> {
        let altitude = self
            .altitude_unit
            .unwrap_or_default()
            .to_meters(self.altitude?);
        let separation = self
            .geoid_separation_unit
            .unwrap_or_default()
            .to_meters(self.geoid_separation?);
        Some(altitude + separation)
    }
    /// Returns this fix as a [GroundPosition], once normalized
    pub fn ground_position(&self) -> Option<GroundPosition> {
        Some(GroundPosition::from_geodetic((
            self.latitude_ddeg?,
            self.longitude_ddeg?,
            self.ellipsoidal_height()?,
        )))
    }
}

impl Table {
    /// Derives decimal coordinates for every [PositionFix].
    /// Idempotent: running it twice is the same as running it once.
    pub fn normalize_coordinates(&mut self) {
        for row in self.rows.values_mut() {
            if let Some(fix) = row.position_fix.as_mut() {
                fix.normalize();
            }
        }
    }
}

/// ECEF WGS84 position, in meters
#[derive(Default, Copy, Debug, Clone, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GroundPosition(f64, f64, f64);

impl GroundPosition {
    /// Builds Self from ECEF WGS84 coordinates
    pub fn from_ecef_wgs84(pos: (f64, f64, f64)) -> Self {
        Self(pos.0, pos.1, pos.2)
    }
    /// Builds Self from geodetic coordinates: (latitude ddeg, longitude ddeg,
    /// ellipsoidal height m)
    pub fn from_geodetic(pos: (f64, f64, f64)) -> Self {
        let (lat, lon, h) = pos;
        let (x, y, z) = geodetic2ecef(deg2rad(lat), deg2rad(lon), h, Ellipsoid::WGS84);
        Self(x, y, z)
    }
    /// Converts Self to ECEF WGS84
    pub fn to_ecef_wgs84(&self) -> (f64, f64, f64) {
        (self.0, self.1, self.2)
    }
    /// Converts Self to geodetic coordinates in ddeg
    pub fn to_geodetic(&self) -> (f64, f64, f64) {
        let (lat, lon, h) = ecef2geodetic(self.0, self.1, self.2, Ellipsoid::WGS84);
        (rad2deg(lat), rad2deg(lon), h)
    }
}

impl std::fmt::Display for GroundPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "WGS84 ({:.3}m {:.3}m {:.3}m)", self.0, self.1, self.2)
    }
}
