// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed device state.
//!
//! Every device carries one [`DeviceState`] variant selected by its
//! function type at construction. Raw decimal values are stored as
//! received from the bus; typed conversion happens lazily in the read
//! accessors, and policy (such as hiding the target temperature while the
//! controller is off) is layered at read time, never at decode time.

mod sensor;
mod thermostat;

pub use sensor::{DeviceClass, SensorKind, SensorState};
pub use thermostat::ThermostatState;

use crate::points::FunctionType;

/// Typed state of one device channel.
///
/// The variant is fixed at construction from the device's function type;
/// decode and read logic dispatch on it instead of a type hierarchy.
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum DeviceState {
    /// Room temperature controller state.
    Thermostat(ThermostatState),
    /// Weather station sensor state.
    Sensor(SensorState),
}

impl DeviceState {
    /// Creates the empty state matching a function type.
    #[must_use]
    pub fn for_function(function: FunctionType) -> Self {
        match SensorKind::from_function(function) {
            Some(kind) => Self::Sensor(SensorState::new(kind)),
            None => Self::Thermostat(ThermostatState::default()),
        }
    }

    /// Returns the thermostat state, if this device is a thermostat.
    #[must_use]
    pub fn as_thermostat(&self) -> Option<&ThermostatState> {
        match self {
            Self::Thermostat(state) => Some(state),
            Self::Sensor(_) => None,
        }
    }

    /// Returns the sensor state, if this device is a sensor.
    #[must_use]
    pub fn as_sensor(&self) -> Option<&SensorState> {
        match self {
            Self::Sensor(state) => Some(state),
            Self::Thermostat(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_variant_follows_function_type() {
        let state = DeviceState::for_function(FunctionType::RoomTemperatureController);
        assert!(state.as_thermostat().is_some());
        assert!(state.as_sensor().is_none());

        let state = DeviceState::for_function(FunctionType::WeatherWindSensor);
        let sensor = state.as_sensor().unwrap();
        assert_eq!(sensor.kind(), SensorKind::WindStrength);
    }
}
