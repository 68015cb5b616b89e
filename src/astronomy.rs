//! Solar geometry for a given latitude and day of the year.
//!
//! Everything here is a pure function of `(latitude, day_of_year)`; nothing is
//! cached between days.

use std::f64::consts::PI;

use serde::Serialize;
use tracing::warn;

/// Solar constant (MJ m^-2 min^-1).
const SOLAR_CONSTANT: f64 = 0.0820;

/// Solar declination (rad).
pub fn solar_declination(day_of_year: u16) -> f64 {
    0.409 * (2. * PI * (f64::from(day_of_year) + 284.) / 365.).sin()
}

/// Inverse relative distance Earth-Sun.
pub fn relative_sun_earth_distance(day_of_year: u16) -> f64 {
    1. + 0.033 * (2. * PI * f64::from(day_of_year) / 365.).cos()
}

/// A value computed from an argument that had to be forced into range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Clamped {
    pub value: f64,
    pub was_clamped: bool,
}

/// Sunset hour angle (rad), always within `[0, π]`.
///
/// Above the polar circles `-tan(φ)·tan(δ)` leaves `[-1, 1]` and the arccosine
/// is undefined. The argument is clamped so that polar night gives `0` and
/// polar day gives `π`, and the result is flagged.
pub fn sunset_hour_angle(latitude: f64, declination: f64) -> Clamped {
    let argument = -latitude.to_radians().tan() * declination.tan();
    let clamped = argument.clamp(-1., 1.);
    let was_clamped = clamped != argument;
    if was_clamped {
        warn!(
            latitude,
            declination, argument, "sunset hour angle argument outside [-1, 1], clamped"
        );
    }
    Clamped {
        value: clamped.acos(),
        was_clamped,
    }
}

/// Extraterrestrial radiation (MJ m^-2 day^-1).
pub fn extraterrestrial_radiation(latitude: f64, day_of_year: u16) -> f64 {
    AstronomicalFactors::compute(latitude, day_of_year).extraterrestrial_radiation
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AstronomicalFactors {
    /// rad
    pub declination: f64,
    pub relative_distance: f64,
    /// rad
    pub sunset_hour_angle: f64,
    /// MJ m^-2 day^-1
    pub extraterrestrial_radiation: f64,
    pub hour_angle_clamped: bool,
}

impl AstronomicalFactors {
    pub fn compute(latitude: f64, day_of_year: u16) -> Self {
        let lat_rad = latitude.to_radians();
        let ds = solar_declination(day_of_year);
        let dr = relative_sun_earth_distance(day_of_year);
        let omega = sunset_hour_angle(latitude, ds);
        let ws = omega.value;
        let re = (24. * 60. * SOLAR_CONSTANT) / PI
            * dr
            * (ws * lat_rad.sin() * ds.sin() + lat_rad.cos() * ds.cos() * ws.sin());

        AstronomicalFactors {
            declination: ds,
            relative_distance: dr,
            sunset_hour_angle: ws,
            extraterrestrial_radiation: re,
            hour_angle_clamped: omega.was_clamped,
        }
    }
}
