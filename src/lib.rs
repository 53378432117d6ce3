// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! SAR sensor time kernel
//!
//! Date and time representations used by SAR (synthetic-aperture radar)
//! geometric sensor models, plus the acquisition parameter record those
//! models carry around.
//!
//! # Core types
//!
//! - [`Time<S>`]: generic day count parameterised by a [`TimeScale`] marker.
//! - [`JulianDate`]: type alias for `Time<JD>`.
//! - [`CivilDateTime`]: validated calendar date with second of day and fraction.
//! - [`JsdDateTime`]: split Julian date (day at 0h UT, seconds, fraction)
//!   keeping sub-microsecond resolution.
//! - [`MjdDateTime`]: ENVISAT day/second/microsecond stamp.
//! - [`GmstDateTime`]: Greenwich Mean Sidereal Time tagged with its
//!   [`SiderealEpoch`].
//! - [`SensorParams`]: radar acquisition parameters, persisted through any
//!   [`KeywordStore`].
//!
//! # Conversions
//!
//! ```text
//! "2008-03-07T05:45:46.5Z" ──parse_utc──▶ CivilDateTime ──to_julian_date──▶ JulianDate
//!                                              │                                 │
//!                                           to_jsd                       from_julian_date
//!                                              ▼                                 ▼
//!                          MjdDateTime ──▶ JsdDateTime ──to_gmst(epoch)──▶ GmstDateTime
//! ```
//!
//! All scales share the UTC axis. There is no ΔT, TAI or TT handling and leap
//! seconds are not representable.
//!
//! # Errors
//!
//! Fallible operations return [`SarResult`]. [`SarError::code`] maps each
//! variant to a non-zero integer status for callers that need one.

mod civil;
mod error;
mod gmst;
mod instant;
mod jsd;
mod julian_date_ext;
mod keywords;
mod mjd;
mod scales;
mod sensor;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use civil::{days_in_month, is_leap_year, CivilDateTime};
pub use error::{SarError, SarResult};
pub use gmst::{GmstDateTime, SiderealEpoch, EARTH_ROTATION_RATE};
pub use instant::{Time, TimeScale};
pub use jsd::{JsdDateTime, JOURCIVIL_LENGTH, NORMALIZATION_EPSILON};
pub use keywords::{KeywordStore, Keywordlist};
pub use mjd::MjdDateTime;
pub use scales::{JD, MJD, MJD2000};
pub use sensor::{
    SensorParams, SightDirection, SPEED_OF_LIGHT, WGS84_SEMI_MAJOR_AXIS, WGS84_SEMI_MINOR_AXIS,
};

// ── Type aliases ──────────────────────────────────────────────────────────

/// Julian Date: continuous count of days since the Julian Period.
///
/// This is a type alias for [`Time<JD>`].
pub type JulianDate = Time<JD>;

/// Modified Julian Date, `JD − 2 400 000.5`.
///
/// This is a type alias for [`Time<MJD>`].
pub type ModifiedJulianDate = Time<MJD>;

/// Day count since 2000-01-01T00:00:00 UTC, `JD − 2 451 544.5`.
///
/// This is a type alias for [`Time<MJD2000>`].
pub type Mjd2000Date = Time<MJD2000>;
