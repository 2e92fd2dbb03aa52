// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wire decimal type.
//!
//! Numeric values travel the bus as decimal strings. Inbound values may or
//! may not carry a decimal point (`"19"`, `"22.1"`); outbound values are
//! always formatted to exactly two fraction digits (`"21.50"`), which is
//! what the system access point expects.

use std::fmt;
use std::str::FromStr;

use crate::error::DecodeError;

/// A decimal value in the bus wire encoding.
///
/// Encoding a value that is already expressed to two fraction digits and
/// decoding it again is idempotent.
///
/// # Examples
///
/// ```
/// use freeathome_lib::types::WireDecimal;
///
/// let temp = WireDecimal::parse("22.1").unwrap();
/// assert_eq!(temp.to_wire(), "22.10");
///
/// let setpoint = WireDecimal::new(21.0);
/// assert_eq!(setpoint.to_wire(), "21.00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct WireDecimal(f64);

impl WireDecimal {
    /// Creates a wire decimal from a numeric value.
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Parses a raw bus value.
    ///
    /// Accepts decimal strings with or without a fraction part.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::InvalidDecimal` if the value is not a finite
    /// decimal number.
    pub fn parse(value: &str) -> Result<Self, DecodeError> {
        let invalid = || DecodeError::InvalidDecimal {
            value: value.to_string(),
        };
        let parsed: f64 = value.trim().parse().map_err(|_| invalid())?;
        if parsed.is_finite() {
            Ok(Self(parsed))
        } else {
            Err(invalid())
        }
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Returns the outbound wire encoding, fixed to two fraction digits.
    #[must_use]
    pub fn to_wire(self) -> String {
        format!("{:.2}", self.0)
    }
}

impl fmt::Display for WireDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_wire())
    }
}

impl From<f64> for WireDecimal {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl FromStr for WireDecimal {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
