// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Julian split dates.
//!
//! A [`JsdDateTime`] keeps an instant as three limbs:
//!
//! | Limb | Meaning | Range once normalized |
//! |------|---------|-----------------------|
//! | `day0h_tu` | Julian Date of the preceding 0h UT | `n + 0.5` |
//! | `second` | whole seconds since that midnight | `0 ≤ s < 86400` |
//! | `decimal` | fraction of the current second | `0 ≤ d < 1` |
//!
//! Packing a present-day Julian Date and a time of day into one `f64` leaves
//! only tens of microseconds of resolution. Orbit interpolation and azimuth
//! timing need better, so the limbs are kept apart and every arithmetic step
//! ends with a carry pass, [`JsdDateTime::normalized`].

use log::trace;
use qtty::*;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Sub};

use crate::civil::{calendar_from_day0h, CivilDateTime};
use crate::error::{SarError, SarResult};
use crate::gmst::{GmstDateTime, SiderealEpoch, EARTH_ROTATION_RATE};
use crate::JulianDate;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Length of a civil day in seconds.
pub const JOURCIVIL_LENGTH: f64 = 86_400.0;

/// Distance to the nearest integer under which a limb snaps to it.
pub const NORMALIZATION_EPSILON: f64 = 1e-12;

/// Split a limb into an integral part and a remainder in `[0, 1)`.
///
/// Values within [`NORMALIZATION_EPSILON`] of an integer snap to it with a
/// zero remainder; otherwise the split floors, so negative values borrow
/// from the integral part. Both parts stay `f64`, so any finite limb splits
/// without overflow.
fn split_limb(x: f64) -> (f64, f64) {
    let nearest = x.round();
    if (x - nearest).abs() < NORMALIZATION_EPSILON {
        (nearest, 0.0)
    } else {
        let whole = x.floor();
        (whole, x - whole)
    }
}

/// An instant split into day at 0h UT, whole seconds and sub-second fraction.
///
/// Fields may be out of range after construction through [`JsdDateTime::new`];
/// every conversion normalizes first. Equality and ordering compare the
/// normalized instants, so `(2451545.5, 86400, 0)` equals `(2451546.5, 0, 0)`.
#[derive(Debug, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct JsdDateTime {
    day0h_tu: JulianDate,
    second: f64,
    decimal: f64,
}

impl JsdDateTime {
    /// Store the three limbs as given, without normalization.
    pub const fn new(day0h_tu: JulianDate, second: f64, decimal: f64) -> Self {
        Self {
            day0h_tu,
            second,
            decimal,
        }
    }

    /// Split a Julian Date on its preceding 0h UT boundary.
    pub fn from_julian_date(jd: JulianDate) -> Self {
        let day0h_tu = JulianDate::new((jd.value() - 0.5).floor() + 0.5);
        let seconds = (jd - day0h_tu).to::<Second>().value();
        let second = seconds.floor();
        Self::new(day0h_tu, second, seconds - second).normalized()
    }

    pub fn day0h_tu(&self) -> JulianDate {
        self.day0h_tu
    }

    pub fn second(&self) -> f64 {
        self.second
    }

    pub fn decimal(&self) -> f64 {
        self.decimal
    }

    /// Fold out-of-range limbs into the next coarser one.
    ///
    /// The result satisfies `0 ≤ second < 86400`, `0 ≤ decimal < 1` and has
    /// `day0h_tu` on a 0h boundary. Applying it twice changes nothing.
    pub fn normalized(self) -> Self {
        let (iw, rw) = split_limb(self.day0h_tu.value() - 0.5);
        let (iv, rv) = split_limb(self.second + rw * JOURCIVIL_LENGTH);
        let (iu, ru) = split_limb(self.decimal + rv);

        // Whole seconds are integral, so the Euclidean split is exact.
        let iv = iv + iu;
        let carry = iv.div_euclid(JOURCIVIL_LENGTH);
        let iv = iv.rem_euclid(JOURCIVIL_LENGTH);
        let iw = iw + carry;
        if carry != 0.0 {
            trace!("normalization carried {carry} day(s) into JD {}", iw + 0.5);
        }

        Self {
            day0h_tu: JulianDate::new(iw + 0.5),
            second: iv,
            decimal: ru,
        }
    }

    /// In-place form of [`normalized`](Self::normalized).
    pub fn normalize(&mut self) {
        *self = self.normalized();
    }

    /// Shift by `seconds` (any sign) and normalize.
    pub fn add_seconds(self, seconds: f64) -> Self {
        Self {
            second: self.second + seconds,
            ..self
        }
        .normalized()
    }

    /// Julian Date of this instant, `day0h_tu + (second + decimal) / 86400`.
    pub fn to_julian_date(&self) -> JulianDate {
        self.day0h_tu + Seconds::new(self.second + self.decimal).to::<Day>()
    }

    /// Calendar representation of this instant.
    ///
    /// # Errors
    /// [`SarError::Calendar`] when the instant falls outside years 1..=9999.
    pub fn to_civil(&self) -> SarResult<CivilDateTime> {
        let norm = self.normalized();
        let (year, month, day) = calendar_from_day0h(norm.day0h_tu);
        let year = i32::try_from(year)
            .map_err(|_| SarError::calendar(i32::MAX, month, day, "year overflows i32"))?;
        CivilDateTime::new(year, month, day, norm.second as u32, norm.decimal)
    }

    /// Greenwich Mean Sidereal Time with the polynomial of `epoch`.
    ///
    /// The polynomial is evaluated at 0h UT of the current day and the time
    /// of day is added at [`EARTH_ROTATION_RATE`].
    pub fn to_gmst(&self, epoch: SiderealEpoch) -> GmstDateTime {
        let norm = self.normalized();
        let date_0h = Self::new(norm.day0h_tu, 0.0, 0.0);
        let tsm_0h = epoch.angle_at_0h(date_0h.to_julian_date());
        let tsm = tsm_0h + (norm.second + norm.decimal) * EARTH_ROTATION_RATE;
        GmstDateTime::new(tsm, epoch)
    }

    /// Signed duration `self − other`, computed limb by limb.
    pub fn seconds_since(&self, other: &Self) -> Seconds {
        let a = self.normalized();
        let b = other.normalized();
        let days = (a.day0h_tu - b.day0h_tu).to::<Second>();
        days + Seconds::new((a.second - b.second) + (a.decimal - b.decimal))
    }
}

impl PartialEq for JsdDateTime {
    fn eq(&self, other: &Self) -> bool {
        let a = self.normalized();
        let b = other.normalized();
        a.day0h_tu == b.day0h_tu && a.second == b.second && a.decimal == b.decimal
    }
}

impl PartialOrd for JsdDateTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let a = self.normalized();
        let b = other.normalized();
        match a.day0h_tu.partial_cmp(&b.day0h_tu)? {
            Ordering::Equal => {}
            ord => return Some(ord),
        }
        match a.second.partial_cmp(&b.second)? {
            Ordering::Equal => {}
            ord => return Some(ord),
        }
        a.decimal.partial_cmp(&b.decimal)
    }
}

impl Add<Seconds> for JsdDateTime {
    type Output = Self;

    fn add(self, rhs: Seconds) -> Self::Output {
        self.add_seconds(rhs.value())
    }
}

impl Sub<Seconds> for JsdDateTime {
    type Output = Self;

    fn sub(self, rhs: Seconds) -> Self::Output {
        self.add_seconds(-rhs.value())
    }
}

impl Sub for JsdDateTime {
    type Output = Seconds;

    fn sub(self, rhs: Self) -> Self::Output {
        self.seconds_since(&rhs)
    }
}

impl From<CivilDateTime> for JsdDateTime {
    fn from(civil: CivilDateTime) -> Self {
        civil.to_jsd()
    }
}

impl From<JulianDate> for JsdDateTime {
    fn from(jd: JulianDate) -> Self {
        Self::from_julian_date(jd)
    }
}

impl fmt::Display for JsdDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "JSD {:.1} + {} s + {:.9}",
            self.day0h_tu.value(),
            self.second,
            self.decimal
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_normalized(jsd: &JsdDateTime) {
        assert!((0.0..JOURCIVIL_LENGTH).contains(&jsd.second()), "{jsd}");
        assert!((0.0..1.0).contains(&jsd.decimal()), "{jsd}");
        assert_eq!(jsd.second().fract(), 0.0, "{jsd}");
        assert_eq!((jsd.day0h_tu().value() - 0.5).fract(), 0.0, "{jsd}");
    }

    /// `a − b` in seconds, limb by limb, without normalizing either side.
    fn raw_difference(a: &JsdDateTime, b: &JsdDateTime) -> f64 {
        (a.day0h_tu().value() - b.day0h_tu().value()) * JOURCIVIL_LENGTH
            + (a.second() - b.second())
            + (a.decimal() - b.decimal())
    }

    #[test]
    fn split_limb_snaps_and_borrows() {
        assert_eq!(split_limb(3.0), (3.0, 0.0));
        assert_eq!(split_limb(2.999_999_999_999_9), (3.0, 0.0));
        assert_eq!(split_limb(-1e-13).1, 0.0);
        assert_eq!(split_limb(-1e-13).0.abs(), 0.0);
        assert_eq!(split_limb(-0.25), (-1.0, 0.75));
        assert_eq!(split_limb(5.5), (5.0, 0.5));
    }

    #[test]
    fn carries_one_day_forward() {
        let jsd = JsdDateTime::new(JulianDate::new(2_451_545.0), 90_000.0, 0.0).normalized();
        assert_eq!(jsd.day0h_tu(), JulianDate::new(2_451_545.5));
        assert_eq!(jsd.second(), 46_800.0);
        assert_eq!(jsd.decimal(), 0.0);
        // Same instant as JD 2451546.0 + 3600 s.
        let expected = JsdDateTime::new(JulianDate::new(2_451_546.0), 3_600.0, 0.0);
        assert_eq!(jsd, expected);
        assert_eq!(raw_difference(&jsd, &expected), 0.0);
    }

    #[test]
    fn borrows_from_negative_limbs() {
        let raw = JsdDateTime::new(JulianDate::new(2_451_544.5), -1.0, -0.25);
        let jsd = raw.normalized();
        assert_eq!(jsd.day0h_tu(), JulianDate::new(2_451_543.5));
        assert_eq!(jsd.second(), 86_398.0);
        assert_eq!(jsd.decimal(), 0.75);
    }

    #[test]
    fn mixed_denormalized_input() {
        let raw = JsdDateTime::new(JulianDate::new(2_451_545.0), 100_000.0, -0.5);
        let jsd = raw.normalized();
        assert_normalized(&jsd);
        assert_eq!(jsd.day0h_tu(), JulianDate::new(2_451_545.5));
        assert_eq!(jsd.second(), 56_799.0);
        assert_eq!(jsd.decimal(), 0.5);
        assert!(raw_difference(&jsd, &raw).abs() < 1e-9);
    }

    #[test]
    fn decimal_carry_reaches_the_day() {
        let raw = JsdDateTime::new(JulianDate::new(2_451_544.5), 86_399.0, 1.5);
        let jsd = raw.normalized();
        assert_eq!(jsd.day0h_tu(), JulianDate::new(2_451_545.5));
        assert_eq!(jsd.second(), 0.0);
        assert_eq!(jsd.decimal(), 0.5);
    }

    #[test]
    fn normalization_is_idempotent_and_preserving() {
        let inputs = [
            (2_451_545.0, 90_000.0, 0.0),
            (2_451_545.0, 100_000.0, -0.5),
            (2_451_544.5, -200_000.25, 3.75),
            (2_455_000.25, 12.0, 0.999_999_999_999_9),
            (2_440_000.75, -0.000_001, 0.0),
            (2_460_000.5, 86_399.0, 0.999_999),
            (2_433_282.5, 1e6, -1e3),
        ];
        for (day, second, decimal) in inputs {
            let raw = JsdDateTime::new(JulianDate::new(day), second, decimal);
            let once = raw.normalized();
            let twice = once.normalized();
            assert_normalized(&once);
            assert_eq!(once.day0h_tu(), twice.day0h_tu());
            assert_eq!(once.second(), twice.second());
            assert_eq!(once.decimal(), twice.decimal());
            let drift = raw_difference(&once, &raw);
            assert!(drift.abs() < 1e-6, "{raw} drifted {drift} s");
        }
    }

    #[test]
    fn extreme_finite_limbs_normalize_without_overflow() {
        for (second, decimal) in [(9.0e18, 1.0e18), (-9.0e18, -1.0e18), (1e300, 0.5)] {
            let raw = JsdDateTime::new(JulianDate::new(2_451_545.5), second, decimal);
            let jsd = raw.normalized();
            assert!((0.0..JOURCIVIL_LENGTH).contains(&jsd.second()), "{jsd}");
            assert!((0.0..1.0).contains(&jsd.decimal()), "{jsd}");
            assert_eq!(jsd.second().fract(), 0.0, "{jsd}");

            let expected = 2_451_545.5 + (second + decimal) / JOURCIVIL_LENGTH;
            let total = jsd.day0h_tu().value() + jsd.second() / JOURCIVIL_LENGTH;
            assert!(((total - expected) / expected).abs() < 1e-12, "{jsd}");
        }
    }

    #[test]
    fn julian_date_split_roundtrip() {
        let jd = JulianDate::new(2_455_197.75);
        let jsd = JsdDateTime::from_julian_date(jd);
        assert_eq!(jsd.day0h_tu(), JulianDate::new(2_455_197.5));
        assert_eq!(jsd.second(), 21_600.0);
        assert_eq!(jsd.decimal(), 0.0);
        assert!((jsd.to_julian_date() - jd).abs() < Days::new(1e-12));
    }

    #[test]
    fn arithmetic_preserves_sub_microsecond_offsets() {
        let start = JsdDateTime::new(JulianDate::new(2_455_197.5), 43_200.0, 0.123_456_789);
        let later = start + Seconds::new(7.000_000_1);
        let elapsed = later - start;
        assert!((elapsed - Seconds::new(7.000_000_1)).abs() < Seconds::new(1e-9));
        assert!(later > start);
        let back = later - Seconds::new(7.000_000_1);
        assert!((back - start).abs() < Seconds::new(1e-9));
    }

    #[test]
    fn seconds_since_crosses_days() {
        let a = JsdDateTime::new(JulianDate::new(2_451_545.5), 10.0, 0.5);
        let b = JsdDateTime::new(JulianDate::new(2_451_544.5), 86_390.0, 0.25);
        assert!((a.seconds_since(&b) - Seconds::new(20.25)).abs() < Seconds::new(1e-12));
        assert!(b < a);
    }

    #[test]
    fn to_civil_reads_calendar_fields() {
        let jsd = JsdDateTime::new(JulianDate::new(2_451_544.5), 86_400.0 + 3_723.0, 0.5);
        let civil = jsd.to_civil().unwrap();
        assert_eq!((civil.year(), civil.month(), civil.day()), (2000, 1, 2));
        assert_eq!(civil.second(), 3_723);
        assert_eq!(civil.decimal(), 0.5);
    }

    #[test]
    fn gmst_ignores_denormalized_limbs() {
        let canonical = JsdDateTime::new(JulianDate::new(2_451_545.5), 3_600.0, 0.0);
        let skewed = JsdDateTime::new(JulianDate::new(2_451_544.5), 90_000.0, 0.0);
        let a = canonical.to_gmst(SiderealEpoch::An2000);
        let b = skewed.to_gmst(SiderealEpoch::An2000);
        assert_eq!(a, b);
    }
}
