// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Thermostat intent encoding.

use crate::points::{PairingId, ParameterId};
use crate::types::{OnOff, WireDecimal};

/// A single outbound datapoint write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatapointWrite {
    /// The input pairing to write to.
    pub pairing: PairingId,
    /// The raw value in wire encoding.
    pub value: String,
}

impl DatapointWrite {
    fn new(pairing: PairingId, value: impl Into<String>) -> Self {
        Self {
            pairing,
            value: value.into(),
        }
    }
}

/// A single outbound parameter write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterWrite {
    /// The parameter to write to.
    pub parameter: ParameterId,
    /// The raw value in wire encoding.
    pub value: String,
}

/// High-level thermostat intent.
///
/// Each intent encodes to one or more writes that must be issued strictly
/// in the returned order: enabling the controller while eco mode is still
/// flagged active yields undefined device-side behavior, so turning on
/// clears the eco request first.
///
/// # Examples
///
/// ```
/// use freeathome_lib::command::ThermostatCommand;
/// use freeathome_lib::points::PairingId;
///
/// let writes = ThermostatCommand::TurnOn.writes();
/// assert_eq!(writes[0].pairing, PairingId::EcoModeOnOffRequest);
/// assert_eq!(writes[0].value, "0");
/// assert_eq!(writes[1].pairing, PairingId::ControllerOnOffRequest);
/// assert_eq!(writes[1].value, "1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThermostatCommand {
    /// Turn the controller on, clearing the eco request first.
    TurnOn,
    /// Turn the controller off. The eco flag is left untouched.
    TurnOff,
    /// Put the controller into eco mode.
    EcoMode,
    /// Request an absolute target temperature in °C.
    SetTargetTemperature(f64),
}

impl ThermostatCommand {
    /// Encodes the intent into its ordered write sequence.
    #[must_use]
    pub fn writes(self) -> Vec<DatapointWrite> {
        match self {
            Self::TurnOn => vec![
                DatapointWrite::new(PairingId::EcoModeOnOffRequest, OnOff::Off.as_wire()),
                DatapointWrite::new(PairingId::ControllerOnOffRequest, OnOff::On.as_wire()),
            ],
            Self::TurnOff => vec![DatapointWrite::new(
                PairingId::ControllerOnOffRequest,
                OnOff::Off.as_wire(),
            )],
            Self::EcoMode => vec![DatapointWrite::new(
                PairingId::EcoModeOnOffRequest,
                OnOff::On.as_wire(),
            )],
            Self::SetTargetTemperature(temperature) => vec![DatapointWrite::new(
                PairingId::AbsoluteSetpointTemperature,
                WireDecimal::new(temperature).to_wire(),
            )],
        }
    }
}

/// High-level thermostat configuration intent.
///
/// Parameters use the separate parameter write path of the bus client.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThermostatParameter {
    /// Offset applied to the measured room temperature, in °C.
    TemperatureCorrection(f64),
}

impl ThermostatParameter {
    /// Encodes the intent into its parameter write.
    #[must_use]
    pub fn write(self) -> ParameterWrite {
        match self {
            Self::TemperatureCorrection(correction) => ParameterWrite {
                parameter: ParameterId::TemperatureCorrection,
                value: WireDecimal::new(correction).to_wire(),
            },
        }
    }
}
