// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Room temperature controller state.

use crate::types::{HvacMode, PresetMode, StatusFlags};

/// Tracked state of a room temperature controller channel.
///
/// All fields are optional because state is unknown until the bus reports
/// it. Decimal values are kept in their raw wire form; the read accessors
/// convert lazily.
///
/// # Examples
///
/// ```
/// use freeathome_lib::state::ThermostatState;
/// use freeathome_lib::types::HvacMode;
///
/// let mut state = ThermostatState::default();
/// assert_eq!(state.hvac_mode(), HvacMode::Off);
///
/// state.set_on(true);
/// state.set_target_temperature("21.50");
/// assert_eq!(state.hvac_mode(), HvacMode::HeatCool);
/// assert_eq!(state.target_temperature(), Some(21.5));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct ThermostatState {
    /// Controller on/off, unknown until the first decode.
    on: Option<bool>,
    /// Multiplexed status bitmask.
    status: Option<StatusFlags>,
    /// Measured room temperature, raw wire value.
    measured_temperature: Option<String>,
    /// Measured relative humidity, raw wire value.
    measured_humidity: Option<String>,
    /// Heating valve actuator demand, raw wire value.
    heating_demand: Option<String>,
    /// Last reported target temperature, raw wire value.
    target_temperature: Option<String>,
    /// Temperature correction, fed only by parameter updates.
    temperature_correction: Option<String>,
}

impl ThermostatState {
    // ========== Decode-side setters ==========

    /// Sets the controller on/off state.
    pub fn set_on(&mut self, on: bool) {
        self.on = Some(on);
    }

    /// Sets the status bitmask.
    pub fn set_status(&mut self, status: StatusFlags) {
        self.status = Some(status);
    }

    /// Stores the raw measured temperature.
    pub fn set_measured_temperature(&mut self, raw: impl Into<String>) {
        self.measured_temperature = Some(raw.into());
    }

    /// Stores the raw measured humidity.
    pub fn set_measured_humidity(&mut self, raw: impl Into<String>) {
        self.measured_humidity = Some(raw.into());
    }

    /// Stores the raw heating demand.
    pub fn set_heating_demand(&mut self, raw: impl Into<String>) {
        self.heating_demand = Some(raw.into());
    }

    /// Stores the raw target temperature.
    pub fn set_target_temperature(&mut self, raw: impl Into<String>) {
        self.target_temperature = Some(raw.into());
    }

    /// Stores the raw temperature correction.
    pub fn set_temperature_correction(&mut self, raw: impl Into<String>) {
        self.temperature_correction = Some(raw.into());
    }

    // ========== Raw accessors ==========

    /// Returns the raw controller on/off state, `None` until first decode.
    #[must_use]
    pub const fn on(&self) -> Option<bool> {
        self.on
    }

    /// Returns the decoded status bitmask.
    #[must_use]
    pub const fn status(&self) -> Option<StatusFlags> {
        self.status
    }

    /// Returns the raw target temperature regardless of controller state.
    #[must_use]
    pub fn raw_target_temperature(&self) -> Option<&str> {
        self.target_temperature.as_deref()
    }

    // ========== Derived read model ==========

    /// Returns the operating mode.
    ///
    /// `Off` unless the controller has reported itself on; an unknown
    /// on/off state reads as off.
    #[must_use]
    pub fn hvac_mode(&self) -> HvacMode {
        if self.on == Some(true) {
            HvacMode::HeatCool
        } else {
            HvacMode::Off
        }
    }

    /// Returns the active preset, or `None` when no preset is active.
    #[must_use]
    pub fn preset_mode(&self) -> Option<PresetMode> {
        match self.status {
            Some(status) if status.eco_active() => Some(PresetMode::Eco),
            _ => None,
        }
    }

    /// Returns the target temperature in °C.
    ///
    /// Undefined while the controller is off, regardless of the last seen
    /// raw value. This is read-time policy, not a decode rule.
    #[must_use]
    pub fn target_temperature(&self) -> Option<f64> {
        if self.hvac_mode() == HvacMode::Off {
            return None;
        }
        parse_raw(self.target_temperature.as_deref())
    }

    /// Returns the measured room temperature in °C.
    #[must_use]
    pub fn measured_temperature(&self) -> Option<f64> {
        parse_raw(self.measured_temperature.as_deref())
    }

    /// Returns the measured relative humidity in percent.
    #[must_use]
    pub fn measured_humidity(&self) -> Option<f64> {
        parse_raw(self.measured_humidity.as_deref())
    }

    /// Returns the heating valve demand in percent.
    #[must_use]
    pub fn heating_demand(&self) -> Option<f64> {
        parse_raw(self.heating_demand.as_deref())
    }

    /// Returns the temperature correction in °C.
    ///
    /// `None` until the first parameter update arrives, distinguishing
    /// "unknown" from "zero correction".
    #[must_use]
    pub fn temperature_correction(&self) -> Option<f64> {
        parse_raw(self.temperature_correction.as_deref())
    }
}

fn parse_raw(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|value| value.trim().parse().ok())
}
