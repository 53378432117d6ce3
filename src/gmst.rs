// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Greenwich Mean Sidereal Time.
//!
//! [`GmstDateTime`] only stores the angle and the reference epoch it was
//! computed with. The computation itself lives in
//! [`JsdDateTime::to_gmst`](crate::JsdDateTime::to_gmst), which has the split
//! day/second representation at hand: the epoch polynomial is evaluated at
//! 0h UT and the time of day is then added at the sidereal rate.
//!
//! Three polynomial families are available through [`SiderealEpoch`]:
//!
//! | Epoch | Origin | Expression at 0h UT |
//! |-------|--------|---------------------|
//! | [`An1900`](SiderealEpoch::An1900) | JD 2 415 020.0 | Newcomb, seconds of time |
//! | [`An1950`](SiderealEpoch::An1950) | JD 2 433 281.5 | linear, radians |
//! | [`An2000`](SiderealEpoch::An2000) | JD 2 451 545.0 | IAU 1982, seconds of time |

use std::f64::consts::TAU;
use std::fmt;

use crate::JulianDate;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize};

/// Earth rotation rate relative to the mean equinox, in radians per SI second.
pub const EARTH_ROTATION_RATE: f64 = TAU / 86_164.090_54;

/// Day-count origin of the 1950 linear expression.
const AN1950_ORIGIN: f64 = 2_433_281.5;

/// Seconds of sidereal time to radians.
const TIME_SECONDS_TO_RADIANS: f64 = TAU / 86_400.0;

/// Reference epoch selecting the sidereal-time polynomial.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SiderealEpoch {
    An1900,
    An1950,
    An2000,
}

impl SiderealEpoch {
    /// Mean sidereal angle, in radians and not wrapped, at `day0h_tu`.
    ///
    /// `day0h_tu` is expected on a 0h UT boundary; the time of day is added
    /// separately by the caller.
    pub fn angle_at_0h(self, day0h_tu: JulianDate) -> f64 {
        match self {
            SiderealEpoch::An1900 => {
                let t = day0h_tu.julian_centuries_since(JulianDate::J1900).value();
                (23_925.836 + t * (8_640_184.542 + t * 0.0929)) * TIME_SECONDS_TO_RADIANS
            }
            SiderealEpoch::An1950 => {
                let t = day0h_tu.value() - AN1950_ORIGIN;
                1.729_444_94 + t * 6.300_388_098_7
            }
            SiderealEpoch::An2000 => {
                let t = day0h_tu.julian_centuries().value();
                (24_110.548_41 + t * (8_640_184.812_866 + t * (0.093_103 - t * 6.210e-6)))
                    * TIME_SECONDS_TO_RADIANS
            }
        }
    }
}

impl fmt::Display for SiderealEpoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SiderealEpoch::An1900 => "AN1900",
            SiderealEpoch::An1950 => "AN1950",
            SiderealEpoch::An2000 => "AN2000",
        };
        f.write_str(label)
    }
}

/// Reduce an angle to `[0, 2π)`.
pub(crate) fn wrap_two_pi(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Greenwich Mean Sidereal Time, in radians, tagged with its reference epoch.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct GmstDateTime {
    tms: f64,
    origin: SiderealEpoch,
}

impl GmstDateTime {
    /// Store `tms` (wrapped to `[0, 2π)`) with the epoch it refers to.
    pub fn new(tms: f64, origin: SiderealEpoch) -> Self {
        Self {
            tms: wrap_two_pi(tms),
            origin,
        }
    }

    /// Sidereal angle in radians, in `[0, 2π)`.
    pub fn tms(&self) -> f64 {
        self.tms
    }

    pub fn origin(&self) -> SiderealEpoch {
        self.origin
    }

    /// Sidereal angle in degrees, in `[0, 360)`.
    pub fn degrees(&self) -> f64 {
        self.tms.to_degrees()
    }
}

impl fmt::Display for GmstDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GMST {:.9} rad ({})", self.tms, self.origin)
    }
}

/// Deserialized angles are wrapped like [`GmstDateTime::new`]; non-finite
/// angles are rejected.
#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for GmstDateTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            tms: f64,
            origin: SiderealEpoch,
        }

        let raw = Raw::deserialize(deserializer)?;
        if !raw.tms.is_finite() {
            return Err(serde::de::Error::custom(format!(
                "sidereal angle {} is not finite",
                raw.tms
            )));
        }
        Ok(GmstDateTime::new(raw.tms, raw.origin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_wraps_into_range() {
        let g = GmstDateTime::new(-0.5, SiderealEpoch::An2000);
        assert!((g.tms() - (TAU - 0.5)).abs() < 1e-15);
        assert_eq!(g.origin(), SiderealEpoch::An2000);

        let g = GmstDateTime::new(3.0 * TAU + 1.0, SiderealEpoch::An1950);
        assert!((g.tms() - 1.0).abs() < 1e-12);
        assert_eq!(GmstDateTime::new(-1e-18, SiderealEpoch::An1900).tms(), 0.0);
    }

    #[test]
    fn an2000_at_j2000_midnight() {
        // 2000-01-01T00:00 UT: GMST = 6h 39m 51.27s ≈ 99.968°.
        let angle = wrap_two_pi(SiderealEpoch::An2000.angle_at_0h(JulianDate::new(2_451_544.5)));
        assert!((angle - 1.744_767_163).abs() < 1e-8, "{angle}");
    }

    #[test]
    fn an1900_at_its_origin_is_constant_term() {
        // JD 2415020.0 is the polynomial origin, t = 0.
        let angle = SiderealEpoch::An1900.angle_at_0h(JulianDate::J1900);
        assert!((angle - 23_925.836 * TIME_SECONDS_TO_RADIANS).abs() < 1e-15);
    }

    #[test]
    fn an1950_daily_advance_exceeds_full_turn() {
        let a = SiderealEpoch::An1950.angle_at_0h(JulianDate::new(2_440_000.5));
        let b = SiderealEpoch::An1950.angle_at_0h(JulianDate::new(2_440_001.5));
        let advance = b - a - TAU;
        // Roughly 3m56s of sidereal time per solar day.
        assert!((advance - 0.017_202_791).abs() < 1e-8, "{advance}");
    }

    #[test]
    fn degrees_and_display() {
        let g = GmstDateTime::new(std::f64::consts::PI, SiderealEpoch::An2000);
        assert!((g.degrees() - 180.0).abs() < 1e-12);
        assert!(g.to_string().contains("AN2000"));
    }
}
