// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Derived thermostat modes exposed to consumers.

use std::fmt;

/// Operating mode derived from the controller on/off state.
///
/// The protocol gives a two-state model only; no idle/heating distinction
/// is derivable from the decoded datapoints.
///
/// # Examples
///
/// ```
/// use freeathome_lib::types::HvacMode;
///
/// assert_eq!(HvacMode::Off.as_str(), "off");
/// assert_eq!(HvacMode::HeatCool.as_str(), "heat_cool");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HvacMode {
    /// Controller is off.
    Off,
    /// Controller is regulating towards the target temperature.
    HeatCool,
}

impl HvacMode {
    /// Returns the platform mode string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::HeatCool => "heat_cool",
        }
    }
}

impl fmt::Display for HvacMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Preset mode derived from the status bitmask.
///
/// Absent entirely when no preset is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresetMode {
    /// Eco (temperature reduction) mode.
    Eco,
}

impl PresetMode {
    /// Returns the platform preset string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eco => "eco",
        }
    }
}

impl fmt::Display for PresetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
