// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Thermostat status bitmask.
//!
//! The status indication datapoint multiplexes several flags into one
//! decimal-encoded integer. Only the eco bit is currently understood; the
//! remaining bits are carried opaquely so future bits can be named here
//! without touching any decode call site.

use std::fmt;
use std::str::FromStr;

use crate::error::DecodeError;

/// Decoded status indication bitmask.
///
/// # Examples
///
/// ```
/// use freeathome_lib::types::StatusFlags;
///
/// // 68 = 0b0100_0100: eco bit (0x04) set
/// let status = StatusFlags::from_wire("68").unwrap();
/// assert!(status.eco_active());
/// assert_eq!(status.bits(), 68);
///
/// let status = StatusFlags::from_wire("65").unwrap();
/// assert!(!status.eco_active());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct StatusFlags(u32);

impl StatusFlags {
    /// Bit flagging eco (temperature reduction) mode.
    pub const ECO_ACTIVE: u32 = 0x04;

    /// Creates status flags from a raw bit pattern.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Decodes a raw bus value.
    ///
    /// The wire encoding is a decimal-string integer.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::InvalidBitmask` if the value is not a decimal
    /// integer.
    pub fn from_wire(value: &str) -> Result<Self, DecodeError> {
        value
            .trim()
            .parse::<u32>()
            .map(Self)
            .map_err(|_| DecodeError::InvalidBitmask {
                value: value.to_string(),
            })
    }

    /// Returns the full bit pattern, including undecoded bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns `true` if eco mode is flagged active.
    #[must_use]
    pub const fn eco_active(self) -> bool {
        self.0 & Self::ECO_ACTIVE == Self::ECO_ACTIVE
    }

    /// Returns `true` if every bit of `mask` is set.
    ///
    /// Gives access to the bits whose meaning is not yet decoded.
    #[must_use]
    pub const fn contains(self, mask: u32) -> bool {
        self.0 & mask == mask
    }
}

impl fmt::Display for StatusFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0b{:08b}", self.0)
    }
}

impl FromStr for StatusFlags {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_wire(s)
    }
}
