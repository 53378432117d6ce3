// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar date and time of day.
//!
//! [`CivilDateTime`] is the entry point of the kernel: product annotations
//! carry UTC strings, which are parsed here and then converted to Julian
//! dates, split dates or sidereal time.
//!
//! # UTC layout
//!
//! [`CivilDateTime::parse_utc`] accepts exactly one layout:
//!
//! ```text
//! YYYY-MM-DDTHH:MM:SS[.f][Z]
//! ```
//!
//! All fields are fixed width and zero padded, the `T` separator is
//! mandatory, the fraction holds 1 to 9 digits and the trailing `Z` is
//! optional. Leap seconds (`:60`) are rejected.
//!
//! # Calendar
//!
//! Dates are proleptic Gregorian, restricted to years 1 through 9999.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeDelta, Timelike, Utc};
use log::debug;
use qtty::*;
use std::fmt;
use std::str::FromStr;

use crate::error::{SarError, SarResult};
use crate::gmst::{GmstDateTime, SiderealEpoch};
use crate::jsd::JsdDateTime;
use crate::JulianDate;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize};

/// Seconds in a civil day, as an integer count.
pub(crate) const SECONDS_PER_DAY: u32 = 86_400;

/// Month lengths of a common year, January first.
const MONTH_LENGTHS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

/// Number of fraction digits accepted by the UTC parser.
const MAX_FRACTION_DIGITS: usize = 9;

/// Whether `year` is a Gregorian leap year.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Length of `month` in `year`, or `None` when `month` is not in `1..=12`.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let index = usize::try_from(month).ok()?.checked_sub(1)?;
    let length = *MONTH_LENGTHS.get(index)?;
    if month == 2 && is_leap_year(year) {
        Some(length + 1)
    } else {
        Some(length)
    }
}

/// A validated calendar date with integer second of day and sub-second fraction.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct CivilDateTime {
    year: i32,
    month: u32,
    day: u32,
    second: u32,
    decimal: f64,
}

impl CivilDateTime {
    /// Build from calendar fields.
    ///
    /// `second` counts seconds since midnight (`0..86400`) and `decimal` is
    /// the fraction of the current second (`[0, 1)`).
    ///
    /// # Errors
    /// [`SarError::Calendar`] when any field is out of range.
    pub fn new(year: i32, month: u32, day: u32, second: u32, decimal: f64) -> SarResult<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(SarError::calendar(
                year,
                month,
                day,
                format!("year outside {MIN_YEAR}..={MAX_YEAR}"),
            ));
        }
        let month_length = days_in_month(year, month)
            .ok_or_else(|| SarError::calendar(year, month, day, "month outside 1..=12"))?;
        if day == 0 || day > month_length {
            return Err(SarError::calendar(
                year,
                month,
                day,
                format!("day outside 1..={month_length}"),
            ));
        }
        if second >= SECONDS_PER_DAY {
            return Err(SarError::calendar(
                year,
                month,
                day,
                format!("second of day {second} outside 0..{SECONDS_PER_DAY}"),
            ));
        }
        if !(0.0..1.0).contains(&decimal) {
            return Err(SarError::calendar(
                year,
                month,
                day,
                format!("fraction of second {decimal} outside [0, 1)"),
            ));
        }
        Ok(Self {
            year,
            month,
            day,
            second,
            decimal,
        })
    }

    /// Build from a broken-down time of day.
    pub fn from_time_of_day(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        decimal: f64,
    ) -> SarResult<Self> {
        if hour >= 24 || minute >= 60 || second >= 60 {
            return Err(SarError::calendar(
                year,
                month,
                day,
                format!("time of day {hour:02}:{minute:02}:{second:02} out of range"),
            ));
        }
        Self::new(year, month, day, hour * 3600 + minute * 60 + second, decimal)
    }

    /// Parse a UTC string in the layout described in the module docs.
    ///
    /// # Errors
    /// [`SarError::Parse`] when the layout does not match, and
    /// [`SarError::Calendar`] when it matches but a field is out of range.
    pub fn parse_utc(input: &str) -> SarResult<Self> {
        let result = parse_utc_fields(input);
        if let Err(err) = &result {
            debug!("rejected UTC string {input:?}: {err}");
        }
        result
    }

    /// Inverse of [`to_julian_date`](Self::to_julian_date).
    ///
    /// Goes through a [`JsdDateTime`] so that the time of day is recovered
    /// from the split representation rather than from a fractional day.
    pub fn from_julian_date(jd: JulianDate) -> SarResult<Self> {
        JsdDateTime::from_julian_date(jd).to_civil()
    }

    /// Build from a chrono naive timestamp interpreted as UTC.
    pub fn from_naive(datetime: NaiveDateTime) -> SarResult<Self> {
        let nanos = datetime.nanosecond();
        if nanos >= 1_000_000_000 {
            return Err(SarError::calendar(
                datetime.year(),
                datetime.month(),
                datetime.day(),
                "leap seconds are not representable",
            ));
        }
        Self::new(
            datetime.year(),
            datetime.month(),
            datetime.day(),
            datetime.num_seconds_from_midnight(),
            nanos as f64 / 1e9,
        )
    }

    /// Build from a chrono UTC timestamp.
    pub fn from_utc(datetime: DateTime<Utc>) -> SarResult<Self> {
        Self::from_naive(datetime.naive_utc())
    }

    /// Convert to a chrono naive timestamp, rounded to the nearest nanosecond.
    ///
    /// A fraction that rounds up to a whole second carries into the next
    /// second, and past midnight into the next day.
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        let nanos = (self.decimal * 1e9).round() as i64;
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)?
            .and_hms_opt(self.hour(), self.minute(), self.second_of_minute())?
            .checked_add_signed(TimeDelta::nanoseconds(nanos))
    }

    /// Convert to a chrono UTC timestamp.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        self.to_naive().map(|naive| naive.and_utc())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// Seconds elapsed since midnight.
    pub fn second(&self) -> u32 {
        self.second
    }

    /// Fraction of the current second.
    pub fn decimal(&self) -> f64 {
        self.decimal
    }

    pub fn hour(&self) -> u32 {
        self.second / 3600
    }

    pub fn minute(&self) -> u32 {
        (self.second % 3600) / 60
    }

    pub fn second_of_minute(&self) -> u32 {
        self.second % 60
    }

    /// Julian Date of midnight starting this calendar day.
    ///
    /// January and February count as months 13 and 14 of the previous year,
    /// and the Gregorian correction is `2 − A + ⌊A/4⌋` with `A = ⌊Y/100⌋`.
    fn day0h_julian(&self) -> JulianDate {
        let (mut y, mut m) = (self.year as f64, self.month as f64);
        if self.month <= 2 {
            y -= 1.0;
            m += 12.0;
        }
        let a = (y / 100.0).floor();
        let b = 2.0 - a + (a / 4.0).floor();
        JulianDate::new(
            (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + self.day as f64 + b
                - 1524.5,
        )
    }

    /// Julian Date of this instant.
    pub fn to_julian_date(&self) -> JulianDate {
        let time_of_day = Seconds::new(self.second as f64 + self.decimal);
        self.day0h_julian() + time_of_day.to::<Day>()
    }

    /// Split representation: the day at 0h UT plus this time of day.
    pub fn to_jsd(&self) -> JsdDateTime {
        JsdDateTime::new(self.day0h_julian(), self.second as f64, self.decimal).normalized()
    }

    /// Greenwich Mean Sidereal Time for this instant.
    pub fn to_gmst(&self, epoch: SiderealEpoch) -> GmstDateTime {
        self.to_jsd().to_gmst(epoch)
    }
}

/// Inverse of the Julian-day formula used by [`CivilDateTime`], valid for the
/// proleptic Gregorian calendar. `day0h` must sit on a 0h boundary (`n + 0.5`).
pub(crate) fn calendar_from_day0h(day0h: JulianDate) -> (i64, u32, u32) {
    let z = (day0h.value() + 0.5).floor();
    let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
    let a = z + 1.0 + alpha - (alpha / 4.0).floor();
    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day = (b - d - (30.6001 * e).floor()) as u32;
    let month = (if e < 14.0 { e - 1.0 } else { e - 13.0 }) as u32;
    let year = (if month > 2 { c - 4716.0 } else { c - 4715.0 }) as i64;
    (year, month, day)
}

fn parse_utc_fields(input: &str) -> SarResult<CivilDateTime> {
    let body = input.strip_suffix('Z').unwrap_or(input).as_bytes();
    if body.len() < 19 {
        return Err(SarError::parse(input, "expected YYYY-MM-DDTHH:MM:SS[.f][Z]"));
    }
    for (index, expected) in [(4, b'-'), (7, b'-'), (10, b'T'), (13, b':'), (16, b':')] {
        if body[index] != expected {
            return Err(SarError::parse(
                input,
                format!("expected '{}' at position {index}", expected as char),
            ));
        }
    }

    let year = fixed_digits(input, &body[0..4], 0)? as i32;
    let month = fixed_digits(input, &body[5..7], 5)?;
    let day = fixed_digits(input, &body[8..10], 8)?;
    let hour = fixed_digits(input, &body[11..13], 11)?;
    let minute = fixed_digits(input, &body[14..16], 14)?;
    let second = fixed_digits(input, &body[17..19], 17)?;

    let decimal = match &body[19..] {
        [] => 0.0,
        [b'.', fraction @ ..]
            if (1..=MAX_FRACTION_DIGITS).contains(&fraction.len())
                && fraction.iter().all(u8::is_ascii_digit) =>
        {
            let numerator = fraction
                .iter()
                .fold(0u64, |acc, &b| acc * 10 + u64::from(b - b'0'));
            numerator as f64 / 10f64.powi(fraction.len() as i32)
        }
        [b'.', ..] => {
            return Err(SarError::parse(
                input,
                format!("fraction must hold 1 to {MAX_FRACTION_DIGITS} digits"),
            ))
        }
        _ => return Err(SarError::parse(input, "unexpected text after seconds")),
    };

    CivilDateTime::from_time_of_day(year, month, day, hour, minute, second, decimal)
}

/// Value of a fixed-width run of ASCII digits starting at `position`.
fn fixed_digits(input: &str, field: &[u8], position: usize) -> SarResult<u32> {
    if !field.iter().all(u8::is_ascii_digit) {
        return Err(SarError::parse(
            input,
            format!("expected {} digits at position {position}", field.len()),
        ));
    }
    Ok(field
        .iter()
        .fold(0u32, |acc, &b| acc * 10 + u32::from(b - b'0')))
}

impl FromStr for CivilDateTime {
    type Err = SarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_utc(s)
    }
}

/// Renders the UTC layout accepted by [`CivilDateTime::parse_utc`], with the
/// fraction rounded to the nearest microsecond.
///
/// A fraction that rounds up to a whole second carries into the second of
/// day. On the last second of the day it stays at `.999999` instead.
impl fmt::Display for CivilDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let micros = (self.decimal * 1e6).round() as u32;
        let (second, micros) = match micros {
            0..=999_999 => (self.second, micros),
            _ if self.second + 1 < SECONDS_PER_DAY => (self.second + 1, 0),
            _ => (self.second, 999_999),
        };
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:06}Z",
            self.year,
            self.month,
            self.day,
            second / 3600,
            (second % 3600) / 60,
            second % 60,
            micros
        )
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for CivilDateTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            year: i32,
            month: u32,
            day: u32,
            second: u32,
            decimal: f64,
        }

        let raw = Raw::deserialize(deserializer)?;
        CivilDateTime::new(raw.year, raw.month, raw.day, raw.second, raw.decimal)
            .map_err(serde::de::Error::custom)
    }
}
