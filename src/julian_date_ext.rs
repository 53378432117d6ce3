// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Julian Date (`Time<JD>`) specific extensions.

use qtty::*;

use super::civil::CivilDateTime;
use super::instant::Time;
use super::jsd::JsdDateTime;
use super::scales::{JD, MJD};

impl Time<JD> {
    /// J2000.0 epoch: 2000-01-01T12:00:00 (JD 2 451 545.0).
    pub const J2000: Self = Self::new(2_451_545.0);

    /// J1900.0 epoch: 1899-12-31T12:00:00 (JD 2 415 020.0), origin of
    /// Newcomb's sidereal-time polynomial.
    pub const J1900: Self = Self::new(2_415_020.0);

    /// One Julian century expressed in days.
    pub const JULIAN_CENTURY: Days = Days::new(36_525.0);

    /// Julian centuries since J2000.0.
    #[inline]
    pub fn julian_centuries(&self) -> Centuries {
        self.julian_centuries_since(Self::J2000)
    }

    /// Julian centuries elapsed since an arbitrary `epoch`.
    #[inline]
    pub fn julian_centuries_since(&self, epoch: Self) -> Centuries {
        Centuries::new(((*self - epoch) / Self::JULIAN_CENTURY).simplify().value())
    }

    /// Modified Julian Date of this instant.
    #[inline]
    pub fn to_mjd(&self) -> Time<MJD> {
        self.to::<MJD>()
    }
}

impl From<CivilDateTime> for Time<JD> {
    fn from(civil: CivilDateTime) -> Self {
        civil.to_julian_date()
    }
}

impl From<JsdDateTime> for Time<JD> {
    fn from(jsd: JsdDateTime) -> Self {
        jsd.to_julian_date()
    }
}
