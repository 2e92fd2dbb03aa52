// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! High-level intents and their wire encoding.
//!
//! A free@home intent is rarely a single write. The physical device's
//! firmware evaluates eco mode and controller on/off together, so some
//! intents expand into an ordered sequence of writes to distinct pairings.
//! This module encodes intents into those sequences; issuing them belongs
//! to [`Device`](crate::Device).
//!
//! # Available Intents
//!
//! | Intent | Writes (in order) |
//! |--------|-------------------|
//! | [`ThermostatCommand::TurnOn`] | eco request `"0"`, controller request `"1"` |
//! | [`ThermostatCommand::TurnOff`] | controller request `"0"` |
//! | [`ThermostatCommand::EcoMode`] | eco request `"1"` |
//! | [`ThermostatCommand::SetTargetTemperature`] | absolute setpoint, 2-decimal |
//! | [`ThermostatParameter::TemperatureCorrection`] | correction parameter, 2-decimal |

mod thermostat;

pub use thermostat::{DatapointWrite, ParameterWrite, ThermostatCommand, ThermostatParameter};
