// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wire boolean type.
//!
//! free@home encodes booleans as the literal strings `"0"` and `"1"`.
//! Anything else is a decode error; there is no tolerant parsing.

use std::fmt;
use std::str::FromStr;

use crate::error::DecodeError;

/// An on/off value in the bus wire encoding.
///
/// # Examples
///
/// ```
/// use freeathome_lib::types::OnOff;
///
/// let on = OnOff::from_wire("1").unwrap();
/// assert!(on.is_on());
/// assert_eq!(on.as_wire(), "1");
///
/// assert!(OnOff::from_wire("ON").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum OnOff {
    /// Off, wire value `"0"`.
    Off,
    /// On, wire value `"1"`.
    On,
}

impl OnOff {
    /// Decodes a raw bus value.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::InvalidBoolean` unless the value is exactly
    /// `"0"` or `"1"`.
    pub fn from_wire(value: &str) -> Result<Self, DecodeError> {
        match value {
            "0" => Ok(Self::Off),
            "1" => Ok(Self::On),
            other => Err(DecodeError::InvalidBoolean {
                value: other.to_string(),
            }),
        }
    }

    /// Returns the wire encoding.
    #[must_use]
    pub const fn as_wire(self) -> &'static str {
        match self {
            Self::Off => "0",
            Self::On => "1",
        }
    }

    /// Returns `true` if the value is [`OnOff::On`].
    #[must_use]
    pub const fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

impl From<bool> for OnOff {
    fn from(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }
}

impl From<OnOff> for bool {
    fn from(value: OnOff) -> Self {
        value.is_on()
    }
}

impl fmt::Display for OnOff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_wire())
    }
}

impl FromStr for OnOff {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_wire(s)
    }
}
