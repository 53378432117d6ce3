// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! SAR acquisition parameters.
//!
//! [`SensorParams`] is a plain record of the radar settings that geometric
//! SAR sensor models need: pulse repetition frequency, range sampling
//! frequency, wavelength, image scan directions, look counts, Doppler
//! centroid and the reference ellipsoid. It persists itself to any
//! [`KeywordStore`] under `<prefix>sensor_params.<name>` keys.

use log::warn;
use qtty::*;
use std::fmt;

use crate::error::{SarError, SarResult};
use crate::jsd::JsdDateTime;
use crate::keywords::{prefixed, KeywordStore};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize};

/// Speed of light in vacuum, m/s.
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// WGS84 semi-major axis, metres.
pub const WGS84_SEMI_MAJOR_AXIS: f64 = 6_378_137.0;

/// WGS84 semi-minor axis, metres.
pub const WGS84_SEMI_MINOR_AXIS: f64 = 6_356_752.3141;

const KEYWORD_GROUP: &str = "sensor_params.";

const PRF_KW: &str = "prf";
const SF_KW: &str = "sampling_frequency";
const RWL_KW: &str = "radar_wave_length";
const COL_DIRECTION_KW: &str = "column_direction";
const LIN_DIRECTION_KW: &str = "line_direction";
const SIGHT_DIRECTION_KW: &str = "sight_direction";
const SEMI_MAJOR_AXIS_KW: &str = "semi_major_axis";
const SEMI_MINOR_AXIS_KW: &str = "semi_minor_axis";
const N_AZIMUTH_LOOK_KW: &str = "number_azimuth_looks";
const N_RANGE_LOOK_KW: &str = "number_range_looks";
const DOPCEN_KW: &str = "doppler_centroid";
const DOPCEN_LINEAR_KW: &str = "doppler_centroid_linear_term";

/// Side of the ground track the antenna looks at.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(i32)]
pub enum SightDirection {
    Left = 0,
    #[default]
    Right = 1,
}

impl SightDirection {
    /// Integer code used in keyword lists.
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(SightDirection::Left),
            1 => Some(SightDirection::Right),
            _ => None,
        }
    }
}

impl fmt::Display for SightDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SightDirection::Left => f.write_str("left"),
            SightDirection::Right => f.write_str("right"),
        }
    }
}

/// Acquisition parameters of a SAR image.
///
/// Frequencies are in Hz, lengths in metres. `col_direction` and
/// `lin_direction` are `+1` when pixel indices grow with slant range and
/// azimuth time respectively, `-1` otherwise.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SensorParams {
    prf: f64,
    sf: f64,
    rwl: f64,
    col_direction: i32,
    lin_direction: i32,
    sight_direction: SightDirection,
    semi_major_axis: f64,
    semi_minor_axis: f64,
    n_azimuth_look: f64,
    n_range_look: f64,
    dopcen: f64,
    dopcen_linear: f64,
}

impl Default for SensorParams {
    fn default() -> Self {
        Self {
            prf: 0.0,
            sf: 0.0,
            rwl: 0.0,
            col_direction: 1,
            lin_direction: 1,
            sight_direction: SightDirection::Right,
            semi_major_axis: WGS84_SEMI_MAJOR_AXIS,
            semi_minor_axis: WGS84_SEMI_MINOR_AXIS,
            n_azimuth_look: 1.0,
            n_range_look: 1.0,
            dopcen: 0.0,
            dopcen_linear: 0.0,
        }
    }
}

fn check_finite(name: &'static str, value: f64) -> SarResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SarError::InvalidParameter {
            name,
            reason: format!("{value} is not finite"),
        })
    }
}

fn check_positive(name: &'static str, value: f64) -> SarResult<f64> {
    if check_finite(name, value)? > 0.0 {
        Ok(value)
    } else {
        Err(SarError::InvalidParameter {
            name,
            reason: format!("expected a positive value, got {value}"),
        })
    }
}

fn check_direction(name: &'static str, value: i32) -> SarResult<i32> {
    match value {
        1 | -1 => Ok(value),
        _ => Err(SarError::InvalidParameter {
            name,
            reason: format!("expected +1 or -1, got {value}"),
        }),
    }
}

impl SensorParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pulse repetition frequency, Hz.
    pub fn prf(&self) -> f64 {
        self.prf
    }

    /// # Errors
    /// [`SarError::InvalidParameter`] unless `prf` is strictly positive and finite.
    pub fn set_prf(&mut self, prf: f64) -> SarResult<()> {
        self.prf = check_positive("prf", prf)?;
        Ok(())
    }

    /// Range sampling frequency, Hz.
    pub fn sf(&self) -> f64 {
        self.sf
    }

    /// # Errors
    /// [`SarError::InvalidParameter`] unless `sf` is strictly positive and finite.
    pub fn set_sf(&mut self, sf: f64) -> SarResult<()> {
        self.sf = check_positive("sf", sf)?;
        Ok(())
    }

    /// Radar wavelength, metres.
    pub fn rwl(&self) -> f64 {
        self.rwl
    }

    /// # Errors
    /// [`SarError::InvalidParameter`] unless `rwl` is strictly positive and finite.
    pub fn set_rwl(&mut self, rwl: f64) -> SarResult<()> {
        self.rwl = check_positive("rwl", rwl)?;
        Ok(())
    }

    pub fn col_direction(&self) -> i32 {
        self.col_direction
    }

    /// # Errors
    /// [`SarError::InvalidParameter`] unless `dir` is `+1` or `-1`.
    pub fn set_col_direction(&mut self, dir: i32) -> SarResult<()> {
        self.col_direction = check_direction("col_direction", dir)?;
        Ok(())
    }

    pub fn lin_direction(&self) -> i32 {
        self.lin_direction
    }

    /// # Errors
    /// [`SarError::InvalidParameter`] unless `dir` is `+1` or `-1`.
    pub fn set_lin_direction(&mut self, dir: i32) -> SarResult<()> {
        self.lin_direction = check_direction("lin_direction", dir)?;
        Ok(())
    }

    pub fn sight_direction(&self) -> SightDirection {
        self.sight_direction
    }

    pub fn set_sight_direction(&mut self, sight: SightDirection) {
        self.sight_direction = sight;
    }

    pub fn semi_major_axis(&self) -> f64 {
        self.semi_major_axis
    }

    /// # Errors
    /// [`SarError::InvalidParameter`] unless `axis` is strictly positive and finite.
    pub fn set_semi_major_axis(&mut self, axis: f64) -> SarResult<()> {
        self.semi_major_axis = check_positive("semi_major_axis", axis)?;
        Ok(())
    }

    pub fn semi_minor_axis(&self) -> f64 {
        self.semi_minor_axis
    }

    /// # Errors
    /// [`SarError::InvalidParameter`] unless `axis` is strictly positive and finite.
    pub fn set_semi_minor_axis(&mut self, axis: f64) -> SarResult<()> {
        self.semi_minor_axis = check_positive("semi_minor_axis", axis)?;
        Ok(())
    }

    pub fn n_azimuth_look(&self) -> f64 {
        self.n_azimuth_look
    }

    /// # Errors
    /// [`SarError::InvalidParameter`] unless `looks` is strictly positive and finite.
    pub fn set_n_azimuth_look(&mut self, looks: f64) -> SarResult<()> {
        self.n_azimuth_look = check_positive("n_azimuth_look", looks)?;
        Ok(())
    }

    pub fn n_range_look(&self) -> f64 {
        self.n_range_look
    }

    /// # Errors
    /// [`SarError::InvalidParameter`] unless `looks` is strictly positive and finite.
    pub fn set_n_range_look(&mut self, looks: f64) -> SarResult<()> {
        self.n_range_look = check_positive("n_range_look", looks)?;
        Ok(())
    }

    /// Doppler centroid, Hz.
    pub fn dopcen(&self) -> f64 {
        self.dopcen
    }

    /// # Errors
    /// [`SarError::InvalidParameter`] unless `dopcen` is finite.
    pub fn set_dopcen(&mut self, dopcen: f64) -> SarResult<()> {
        self.dopcen = check_finite("dopcen", dopcen)?;
        Ok(())
    }

    /// Linear term of the Doppler centroid polynomial.
    pub fn dopcen_linear(&self) -> f64 {
        self.dopcen_linear
    }

    /// # Errors
    /// [`SarError::InvalidParameter`] unless `term` is finite.
    pub fn set_dopcen_linear(&mut self, term: f64) -> SarResult<()> {
        self.dopcen_linear = check_finite("dopcen_linear", term)?;
        Ok(())
    }

    /// Azimuth time elapsed from `ref_line` to `line`.
    ///
    /// # Errors
    /// [`SarError::InvalidParameter`] when the PRF is unset (zero) or the
    /// line numbers give a non-finite offset.
    pub fn line_time_offset(&self, line: f64, ref_line: f64) -> SarResult<Seconds> {
        let prf = check_positive("prf", self.prf)?;
        let dt = self.lin_direction as f64 * (line - ref_line) * self.n_azimuth_look / prf;
        Ok(Seconds::new(check_finite("line", dt)?))
    }

    /// Acquisition time of `line`, given the time `ref_time` of `ref_line`.
    ///
    /// # Errors
    /// As [`line_time_offset`](Self::line_time_offset).
    pub fn azimuth_time(
        &self,
        ref_time: JsdDateTime,
        line: f64,
        ref_line: f64,
    ) -> SarResult<JsdDateTime> {
        Ok(ref_time + self.line_time_offset(line, ref_line)?)
    }

    /// Slant-range distance, in metres, from column `ref_col` to `col`.
    ///
    /// # Errors
    /// [`SarError::InvalidParameter`] when the sampling frequency is unset
    /// (zero) or the columns give a non-finite distance.
    pub fn slant_range_offset(&self, col: f64, ref_col: f64) -> SarResult<f64> {
        let sf = check_positive("sf", self.sf)?;
        let dr = self.col_direction as f64 * (col - ref_col) * (SPEED_OF_LIGHT / 2.0)
            * self.n_range_look
            / sf;
        check_finite("col", dr)
    }

    fn float_fields(&self) -> [(&'static str, f64); 9] {
        [
            (PRF_KW, self.prf),
            (SF_KW, self.sf),
            (RWL_KW, self.rwl),
            (SEMI_MAJOR_AXIS_KW, self.semi_major_axis),
            (SEMI_MINOR_AXIS_KW, self.semi_minor_axis),
            (N_AZIMUTH_LOOK_KW, self.n_azimuth_look),
            (N_RANGE_LOOK_KW, self.n_range_look),
            (DOPCEN_KW, self.dopcen),
            (DOPCEN_LINEAR_KW, self.dopcen_linear),
        ]
    }

    /// Write every field to `kwl` under `<prefix>sensor_params.<name>`.
    ///
    /// # Errors
    /// [`SarError::Serialization`] when a field is not finite. Nothing is
    /// written in that case.
    pub fn save_state<K: KeywordStore + ?Sized>(
        &self,
        kwl: &mut K,
        prefix: Option<&str>,
    ) -> SarResult<()> {
        let group = prefixed(prefix, KEYWORD_GROUP);
        let floats = self.float_fields();

        if let Some((name, value)) = floats.iter().find(|(_, v)| !v.is_finite()) {
            return Err(SarError::serialization(
                &format!("{group}{name}"),
                &value.to_string(),
                "value is not finite",
            ));
        }

        for (name, value) in &floats {
            kwl.add(&format!("{group}{name}"), value.to_string());
        }
        kwl.add(
            &format!("{group}{COL_DIRECTION_KW}"),
            self.col_direction.to_string(),
        );
        kwl.add(
            &format!("{group}{LIN_DIRECTION_KW}"),
            self.lin_direction.to_string(),
        );
        kwl.add(
            &format!("{group}{SIGHT_DIRECTION_KW}"),
            self.sight_direction.code().to_string(),
        );
        Ok(())
    }

    /// Replace every field with the values stored in `kwl`.
    ///
    /// All keys are read and decoded before `self` is touched, so a failed
    /// load leaves the record unchanged.
    ///
    /// # Errors
    /// [`SarError::MissingKeyword`] when a key is absent and
    /// [`SarError::Serialization`] when a value cannot be decoded.
    pub fn load_state<K: KeywordStore + ?Sized>(
        &mut self,
        kwl: &K,
        prefix: Option<&str>,
    ) -> SarResult<()> {
        let group = prefixed(prefix, KEYWORD_GROUP);
        match Self::read_keywords(kwl, &group) {
            Ok(loaded) => {
                *self = loaded;
                Ok(())
            }
            Err(err) => {
                warn!("sensor parameters not loaded from '{group}*': {err}");
                Err(err)
            }
        }
    }

    fn read_keywords<K: KeywordStore + ?Sized>(kwl: &K, group: &str) -> SarResult<Self> {
        let (sight_key, sight_raw, sight_code) = read_integer(kwl, group, SIGHT_DIRECTION_KW)?;
        let sight_direction = SightDirection::from_code(sight_code).ok_or_else(|| {
            SarError::serialization(&sight_key, sight_raw, "expected 0 (left) or 1 (right)")
        })?;

        Ok(Self {
            prf: read_float(kwl, group, PRF_KW)?,
            sf: read_float(kwl, group, SF_KW)?,
            rwl: read_float(kwl, group, RWL_KW)?,
            col_direction: read_direction(kwl, group, COL_DIRECTION_KW)?,
            lin_direction: read_direction(kwl, group, LIN_DIRECTION_KW)?,
            sight_direction,
            semi_major_axis: read_float(kwl, group, SEMI_MAJOR_AXIS_KW)?,
            semi_minor_axis: read_float(kwl, group, SEMI_MINOR_AXIS_KW)?,
            n_azimuth_look: read_float(kwl, group, N_AZIMUTH_LOOK_KW)?,
            n_range_look: read_float(kwl, group, N_RANGE_LOOK_KW)?,
            dopcen: read_float(kwl, group, DOPCEN_KW)?,
            dopcen_linear: read_float(kwl, group, DOPCEN_LINEAR_KW)?,
        })
    }
}

fn lookup<'a, K: KeywordStore + ?Sized>(
    kwl: &'a K,
    group: &str,
    name: &str,
) -> SarResult<(String, &'a str)> {
    let key = format!("{group}{name}");
    match kwl.find(&key) {
        Some(raw) => Ok((key, raw)),
        None => Err(SarError::MissingKeyword { key }),
    }
}

fn read_float<K: KeywordStore + ?Sized>(kwl: &K, group: &str, name: &str) -> SarResult<f64> {
    let (key, raw) = lookup(kwl, group, name)?;
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        Ok(_) => Err(SarError::serialization(&key, raw, "value is not finite")),
        Err(e) => Err(SarError::serialization(&key, raw, e.to_string())),
    }
}

fn read_integer<'a, K: KeywordStore + ?Sized>(
    kwl: &'a K,
    group: &str,
    name: &str,
) -> SarResult<(String, &'a str, i32)> {
    let (key, raw) = lookup(kwl, group, name)?;
    let value = raw
        .trim()
        .parse::<i32>()
        .map_err(|e| SarError::serialization(&key, raw, e.to_string()))?;
    Ok((key, raw, value))
}

fn read_direction<K: KeywordStore + ?Sized>(kwl: &K, group: &str, name: &str) -> SarResult<i32> {
    let (key, raw, value) = read_integer(kwl, group, name)?;
    match value {
        1 | -1 => Ok(value),
        _ => Err(SarError::serialization(&key, raw, "expected +1 or -1")),
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for SensorParams {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            prf: f64,
            sf: f64,
            rwl: f64,
            col_direction: i32,
            lin_direction: i32,
            sight_direction: SightDirection,
            semi_major_axis: f64,
            semi_minor_axis: f64,
            n_azimuth_look: f64,
            n_range_look: f64,
            dopcen: f64,
            dopcen_linear: f64,
        }

        let raw = Raw::deserialize(deserializer)?;
        let mut params = SensorParams {
            prf: raw.prf,
            sf: raw.sf,
            rwl: raw.rwl,
            sight_direction: raw.sight_direction,
            semi_major_axis: raw.semi_major_axis,
            semi_minor_axis: raw.semi_minor_axis,
            n_azimuth_look: raw.n_azimuth_look,
            n_range_look: raw.n_range_look,
            dopcen: raw.dopcen,
            dopcen_linear: raw.dopcen_linear,
            ..SensorParams::default()
        };
        params
            .set_col_direction(raw.col_direction)
            .map_err(serde::de::Error::custom)?;
        params
            .set_lin_direction(raw.lin_direction)
            .map_err(serde::de::Error::custom)?;
        let floats = params.float_fields();
        if let Some((name, value)) = floats.iter().find(|(_, v)| !v.is_finite()) {
            return Err(serde::de::Error::custom(format!(
                "{name} = {value} is not finite"
            )));
        }
        Ok(params)
    }
}
