// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error type shared by the date/time kernel and the sensor parameter record.
//!
//! Every fallible operation returns [`SarResult<T>`]. Callers that still speak
//! the legacy status-code convention (`0` = success, `>0` = failure) can map an
//! error to its code with [`SarError::code`].

use thiserror::Error;

/// Failure modes of the SAR time kernel.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SarError {
    /// A UTC string did not match the accepted layout.
    #[error("cannot parse UTC date '{input}': {reason}")]
    Parse { input: String, reason: String },

    /// Calendar fields outside their valid range (month 13, February 30, ...).
    #[error("invalid calendar date {year:04}-{month:02}-{day:02}: {reason}")]
    Calendar {
        year: i32,
        month: u32,
        day: u32,
        reason: String,
    },

    /// A keyword required by `load_state` is absent from the store.
    #[error("missing keyword '{key}'")]
    MissingKeyword { key: String },

    /// A keyword value cannot be encoded or decoded as the expected type.
    #[error("keyword '{key}' has unusable value '{value}': {reason}")]
    Serialization {
        key: String,
        value: String,
        reason: String,
    },

    /// A setter received a value outside its domain.
    #[error("invalid value for {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Result alias used throughout the crate.
pub type SarResult<T> = Result<T, SarError>;

impl SarError {
    pub(crate) fn parse(input: &str, reason: impl Into<String>) -> Self {
        SarError::Parse {
            input: input.to_owned(),
            reason: reason.into(),
        }
    }

    pub(crate) fn calendar(year: i32, month: u32, day: u32, reason: impl Into<String>) -> Self {
        SarError::Calendar {
            year,
            month,
            day,
            reason: reason.into(),
        }
    }

    pub(crate) fn serialization(key: &str, value: &str, reason: impl Into<String>) -> Self {
        SarError::Serialization {
            key: key.to_owned(),
            value: value.to_owned(),
            reason: reason.into(),
        }
    }

    /// Legacy integer status for this error. `0` is reserved for success.
    pub fn code(&self) -> i32 {
        match self {
            SarError::Parse { .. } => 1,
            SarError::Calendar { .. } => 2,
            SarError::MissingKeyword { .. } => 3,
            SarError::Serialization { .. } => 4,
            SarError::InvalidParameter { .. } => 5,
        }
    }
}
