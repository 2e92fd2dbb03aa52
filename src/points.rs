// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Static point registry for free@home function types.
//!
//! Every free@home channel exposes datapoints addressed by a protocol
//! pairing id and parameters addressed by a parameter id. Which ids are
//! meaningful depends on the channel's function type. This module holds the
//! immutable tables mapping a [`FunctionType`] to the pairing and parameter
//! ids this library understands.
//!
//! The tables are consulted once, at device construction, to build a
//! device's wire-address lookup maps. They are plain `&'static` data and
//! never change after process start.

use std::fmt;

/// Protocol pairing identifier for a channel datapoint.
///
/// Pairing ids distinguish datapoint roles on a channel: an input pairing
/// is a command the device accepts, an output pairing is state the device
/// reports. The numeric values are the protocol's pairing function numbers.
///
/// # Examples
///
/// ```
/// use freeathome_lib::points::PairingId;
///
/// assert_eq!(PairingId::SetValueTemperature.value(), 0x0033);
/// assert_eq!(PairingId::MeasuredTemperature.to_string(), "pairing 0x0130");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[repr(u16)]
pub enum PairingId {
    /// Request eco (temperature reduction) mode on or off. Input.
    EcoModeOnOffRequest = 0x003A,
    /// Request the controller on or off. Input.
    ControllerOnOffRequest = 0x0042,
    /// Request an absolute target temperature. Input.
    AbsoluteSetpointTemperature = 0x0140,
    /// Currently active target temperature. Output.
    SetValueTemperature = 0x0033,
    /// Controller on/off state. Output.
    ControllerOnOff = 0x0038,
    /// Multiplexed status bitmask (eco flag and other, undecoded bits). Output.
    StatusIndication = 0x0036,
    /// Measured room temperature. Output.
    MeasuredTemperature = 0x0130,
    /// Measured relative humidity. Output.
    MeasuredHumidity = 0x042B,
    /// Heating valve actuator demand. Output.
    HeatingDemand = 0x0131,
    /// Outdoor temperature from the weather station. Output.
    OutdoorTemperature = 0x0400,
    /// Wind speed in m/s from the weather station. Output.
    WindSpeed = 0x0401,
    /// Brightness level in lux from the weather station. Output.
    BrightnessLevel = 0x0402,
    /// Rain alarm from the weather station. Output.
    RainAlarm = 0x0403,
}

impl PairingId {
    /// Returns the protocol pairing function number.
    #[must_use]
    pub const fn value(self) -> u16 {
        self as u16
    }
}

impl fmt::Display for PairingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pairing 0x{:04X}", self.value())
    }
}

/// Protocol identifier for a channel configuration parameter.
///
/// Parameters change far less frequently than datapoints and arrive on a
/// separate notification channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[repr(u16)]
pub enum ParameterId {
    /// Offset applied to the measured room temperature.
    TemperatureCorrection = 0x0010,
}

impl ParameterId {
    /// Returns the protocol parameter number.
    #[must_use]
    pub const fn value(self) -> u16 {
        self as u16
    }
}

impl fmt::Display for ParameterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "parameter 0x{:04X}", self.value())
    }
}

/// Protocol device category of a channel.
///
/// The function type determines which pairing and parameter ids are
/// meaningful on the channel, and thereby which typed state the device
/// carries and which intents it accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[repr(u16)]
pub enum FunctionType {
    /// Room temperature controller (master, without fan).
    RoomTemperatureController = 0x23,
    /// Room temperature controller (master, with fan).
    RoomTemperatureControllerWithFan = 0x24,
    /// Weather station brightness sensor channel.
    WeatherBrightnessSensor = 0x41,
    /// Weather station rain sensor channel.
    WeatherRainSensor = 0x42,
    /// Weather station temperature sensor channel.
    WeatherTemperatureSensor = 0x43,
    /// Weather station wind sensor channel.
    WeatherWindSensor = 0x44,
}

impl FunctionType {
    /// Resolves a wire function id to a known function type.
    ///
    /// Returns `None` for function ids this library does not model; a
    /// device constructed for such a channel ends up with no usable points.
    #[must_use]
    pub const fn from_wire(id: u16) -> Option<Self> {
        match id {
            0x23 => Some(Self::RoomTemperatureController),
            0x24 => Some(Self::RoomTemperatureControllerWithFan),
            0x41 => Some(Self::WeatherBrightnessSensor),
            0x42 => Some(Self::WeatherRainSensor),
            0x43 => Some(Self::WeatherTemperatureSensor),
            0x44 => Some(Self::WeatherWindSensor),
            _ => None,
        }
    }

    /// Returns the wire function id.
    #[must_use]
    pub const fn value(self) -> u16 {
        self as u16
    }

    /// Returns `true` for room temperature controller function types.
    #[must_use]
    pub const fn is_thermostat(self) -> bool {
        matches!(
            self,
            Self::RoomTemperatureController | Self::RoomTemperatureControllerWithFan
        )
    }

    /// Returns `true` for weather station sensor function types.
    #[must_use]
    pub const fn is_sensor(self) -> bool {
        !self.is_thermostat()
    }
}

impl fmt::Display for FunctionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "function 0x{:02X}", self.value())
    }
}

/// Pairing ids a function type accepts (inputs) and reports (outputs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairingIds {
    /// Commands the channel accepts.
    pub inputs: &'static [PairingId],
    /// State the channel reports.
    pub outputs: &'static [PairingId],
}

impl PairingIds {
    /// Returns `true` if `pairing` appears in the input or output list.
    #[must_use]
    pub fn contains(&self, pairing: PairingId) -> bool {
        self.inputs.contains(&pairing) || self.outputs.contains(&pairing)
    }
}

const THERMOSTAT_PAIRINGS: PairingIds = PairingIds {
    inputs: &[
        PairingId::EcoModeOnOffRequest,
        PairingId::ControllerOnOffRequest,
        PairingId::AbsoluteSetpointTemperature,
    ],
    outputs: &[
        PairingId::SetValueTemperature,
        PairingId::ControllerOnOff,
        PairingId::StatusIndication,
        PairingId::MeasuredTemperature,
        PairingId::MeasuredHumidity,
        PairingId::HeatingDemand,
    ],
};

const THERMOSTAT_PARAMETERS: &[ParameterId] = &[ParameterId::TemperatureCorrection];

const BRIGHTNESS_PAIRINGS: PairingIds = PairingIds {
    inputs: &[],
    outputs: &[PairingId::BrightnessLevel],
};

const RAIN_PAIRINGS: PairingIds = PairingIds {
    inputs: &[],
    outputs: &[PairingId::RainAlarm],
};

const TEMPERATURE_PAIRINGS: PairingIds = PairingIds {
    inputs: &[],
    outputs: &[PairingId::OutdoorTemperature],
};

const WIND_PAIRINGS: PairingIds = PairingIds {
    inputs: &[],
    outputs: &[PairingId::WindSpeed],
};

/// Looks up the pairing ids meaningful for a function type.
///
/// This is a pure table lookup with no side effects.
///
/// # Examples
///
/// ```
/// use freeathome_lib::points::{pairing_ids, FunctionType, PairingId};
///
/// let ids = pairing_ids(FunctionType::RoomTemperatureController).unwrap();
/// assert!(ids.outputs.contains(&PairingId::MeasuredTemperature));
/// assert!(ids.inputs.contains(&PairingId::ControllerOnOffRequest));
/// ```
#[must_use]
pub const fn pairing_ids(function: FunctionType) -> Option<PairingIds> {
    match function {
        FunctionType::RoomTemperatureController
        | FunctionType::RoomTemperatureControllerWithFan => Some(THERMOSTAT_PAIRINGS),
        FunctionType::WeatherBrightnessSensor => Some(BRIGHTNESS_PAIRINGS),
        FunctionType::WeatherRainSensor => Some(RAIN_PAIRINGS),
        FunctionType::WeatherTemperatureSensor => Some(TEMPERATURE_PAIRINGS),
        FunctionType::WeatherWindSensor => Some(WIND_PAIRINGS),
    }
}

/// Looks up the parameter ids meaningful for a function type.
///
/// Returns `None` for function types without configuration parameters.
#[must_use]
pub const fn parameter_ids(function: FunctionType) -> Option<&'static [ParameterId]> {
    match function {
        FunctionType::RoomTemperatureController
        | FunctionType::RoomTemperatureControllerWithFan => Some(THERMOSTAT_PARAMETERS),
        FunctionType::WeatherBrightnessSensor
        | FunctionType::WeatherRainSensor
        | FunctionType::WeatherTemperatureSensor
        | FunctionType::WeatherWindSensor => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thermostat_pairings_cover_all_roles() {
        let ids = pairing_ids(FunctionType::RoomTemperatureController).unwrap();
        assert_eq!(ids.inputs.len(), 3);
        assert_eq!(ids.outputs.len(), 6);
        assert!(ids.contains(PairingId::EcoModeOnOffRequest));
        assert!(ids.contains(PairingId::StatusIndication));
        assert!(!ids.contains(PairingId::WindSpeed));
    }

    #[test]
    fn thermostat_with_fan_shares_tables() {
        assert_eq!(
            pairing_ids(FunctionType::RoomTemperatureController),
            pairing_ids(FunctionType::RoomTemperatureControllerWithFan)
        );
    }

    #[test]
    fn sensors_have_single_output_and_no_inputs() {
        for function in [
            FunctionType::WeatherBrightnessSensor,
            FunctionType::WeatherRainSensor,
            FunctionType::WeatherTemperatureSensor,
            FunctionType::WeatherWindSensor,
        ] {
            let ids = pairing_ids(function).unwrap();
            assert!(ids.inputs.is_empty());
            assert_eq!(ids.outputs.len(), 1);
        }
    }

    #[test]
    fn sensors_have_no_parameters() {
        assert!(parameter_ids(FunctionType::WeatherWindSensor).is_none());
    }

    #[test]
    fn thermostat_parameters() {
        let params = parameter_ids(FunctionType::RoomTemperatureController).unwrap();
        assert_eq!(params, &[ParameterId::TemperatureCorrection]);
    }

    #[test]
    fn function_type_from_wire() {
        assert_eq!(
            FunctionType::from_wire(0x23),
            Some(FunctionType::RoomTemperatureController)
        );
        assert_eq!(
            FunctionType::from_wire(0x44),
            Some(FunctionType::WeatherWindSensor)
        );
        assert_eq!(FunctionType::from_wire(0x7F), None);
    }

    #[test]
    fn thermostat_detection() {
        assert!(FunctionType::RoomTemperatureController.is_thermostat());
        assert!(FunctionType::RoomTemperatureControllerWithFan.is_thermostat());
        assert!(!FunctionType::WeatherRainSensor.is_thermostat());
        assert!(FunctionType::WeatherRainSensor.is_sensor());
    }

    #[test]
    fn pairing_id_display() {
        assert_eq!(
            PairingId::MeasuredTemperature.to_string(),
            "pairing 0x0130"
        );
        assert_eq!(
            ParameterId::TemperatureCorrection.to_string(),
            "parameter 0x0010"
        );
    }
}
