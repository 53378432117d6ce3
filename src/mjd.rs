// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! ENVISAT state-vector timestamps.
//!
//! ENVISAT products stamp orbit records as a signed day count from
//! 2000-01-01T00:00:00 UTC, whole seconds into that day and microseconds.

use qtty::*;

use crate::jsd::JsdDateTime;
use crate::scales::MJD2000_EPOCH;
use crate::{JulianDate, Mjd2000Date};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Day, second and microsecond counted from the MJD2000 origin.
///
/// Out-of-range `second` or `microsecond` values are carried into the day
/// when converting to a [`JsdDateTime`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MjdDateTime {
    day: i64,
    second: u32,
    microsecond: u32,
}

impl MjdDateTime {
    pub const fn new(day: i64, second: u32, microsecond: u32) -> Self {
        Self {
            day,
            second,
            microsecond,
        }
    }

    pub fn day(&self) -> i64 {
        self.day
    }

    pub fn second(&self) -> u32 {
        self.second
    }

    pub fn microsecond(&self) -> u32 {
        self.microsecond
    }

    /// Fractional day count on the MJD2000 scale.
    ///
    /// Loses the sub-microsecond resolution of the split form; prefer
    /// [`JsdDateTime::from`] for timing.
    pub fn day_count(&self) -> Mjd2000Date {
        let time_of_day = Seconds::new(self.second as f64 + self.microsecond as f64 * 1e-6);
        Mjd2000Date::new(self.day as f64) + time_of_day.to::<Day>()
    }
}

impl From<MjdDateTime> for JsdDateTime {
    fn from(mjd: MjdDateTime) -> Self {
        let day0h_tu = JulianDate::from_days(MJD2000_EPOCH + Days::new(mjd.day as f64));
        JsdDateTime::new(
            day0h_tu,
            mjd.second as f64,
            mjd.microsecond as f64 * 1e-6,
        )
        .normalized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_is_2000_midnight() {
        let jsd = JsdDateTime::from(MjdDateTime::new(0, 0, 0));
        assert_eq!(jsd.day0h_tu(), JulianDate::new(2_451_544.5));
        assert_eq!(jsd.second(), 0.0);

        let civil = jsd.to_civil().unwrap();
        assert_eq!((civil.year(), civil.month(), civil.day()), (2000, 1, 1));
    }

    #[test]
    fn microseconds_land_in_decimal() {
        let jsd = JsdDateTime::from(MjdDateTime::new(1_234, 43_210, 250_000));
        assert_eq!(jsd.day0h_tu(), JulianDate::new(2_451_544.5 + 1_234.0));
        assert_eq!(jsd.second(), 43_210.0);
        assert!((jsd.decimal() - 0.25).abs() < 1e-15);
    }

    #[test]
    fn negative_days_precede_the_origin() {
        let jsd = JsdDateTime::from(MjdDateTime::new(-1, 86_399, 0));
        let civil = jsd.to_civil().unwrap();
        assert_eq!((civil.year(), civil.month(), civil.day()), (1999, 12, 31));
        assert_eq!(civil.second(), 86_399);
    }

    #[test]
    fn overflowing_seconds_carry_into_the_day() {
        let jsd = JsdDateTime::from(MjdDateTime::new(10, 86_400 + 5, 2_000_000));
        assert_eq!(jsd.day0h_tu(), JulianDate::new(2_451_544.5 + 11.0));
        assert_eq!(jsd.second(), 7.0);
        assert_eq!(jsd.decimal(), 0.0);
    }

    #[test]
    fn day_count_matches_split_form() {
        let mjd = MjdDateTime::new(3_000, 21_600, 0);
        assert!((mjd.day_count().value() - 3_000.25).abs() < 1e-12);
        let via_split: JulianDate = JsdDateTime::from(mjd).into();
        assert!((mjd.day_count().julian_day() - via_split.quantity()).abs() < Days::new(1e-9));
    }
}
