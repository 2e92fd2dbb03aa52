// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `freeathome_lib` - A Rust library to model Busch-Jaeger free@home
//! devices.
//!
//! This library maps raw bus notifications onto typed device state and
//! encodes high-level intents back into bus writes. It is
//! transport-agnostic: you implement [`BusClient`] over whatever carries
//! your bus session and feed inbound `(datapoint, value)` events into the
//! [`DeviceRegistry`].
//!
//! # Supported Features
//!
//! - **Thermostats**: on/off, eco mode, target temperature, temperature
//!   correction, status decoding
//! - **Weather sensors**: outdoor temperature, wind speed, rain alarm,
//!   brightness
//! - **Update subscriptions**: async listeners fired on every recognized
//!   state change
//! - **Event routing**: registry keyed by serial number and channel
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use freeathome_lib::{BusClient, Device, DeviceRegistry, TransportError};
//! use freeathome_lib::points::{FunctionType, PairingId};
//!
//! struct NullBus;
//!
//! impl BusClient for NullBus {
//!     async fn set_datapoint(
//!         &self,
//!         _serial: &str,
//!         _channel: &str,
//!         _datapoint: &str,
//!         _value: &str,
//!     ) -> Result<(), TransportError> {
//!         Ok(())
//!     }
//!
//!     async fn set_parameter(
//!         &self,
//!         _serial: &str,
//!         _channel: &str,
//!         _parameter: &str,
//!         _value: &str,
//!     ) -> Result<(), TransportError> {
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> freeathome_lib::Result<()> {
//!     let client = Arc::new(NullBus);
//!
//!     let thermostat = Arc::new(
//!         Device::builder(client, FunctionType::RoomTemperatureController)
//!             .serial_number("ABB700D12345")
//!             .channel_id("ch0")
//!             .name("Living room")
//!             .datapoint(PairingId::EcoModeOnOffRequest, "idp0011")
//!             .datapoint(PairingId::ControllerOnOffRequest, "idp0012")
//!             .datapoint(PairingId::AbsoluteSetpointTemperature, "idp0016")
//!             .datapoint(PairingId::ControllerOnOff, "odp0008")
//!             .datapoint(PairingId::SetValueTemperature, "odp0006")
//!             .build(),
//!     );
//!
//!     thermostat.on_device_updated(|update| async move {
//!         println!("{}/{} changed", update.serial_number, update.channel_id);
//!     });
//!
//!     let registry = DeviceRegistry::new();
//!     registry.insert(thermostat.clone());
//!
//!     // Intents encode into bus writes; state follows the bus echo.
//!     thermostat.set_target_temperature(21.0).await?;
//!     registry
//!         .route_datapoint("ABB700D12345", "ch0", "odp0006", "21.00")
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

pub mod bus;
pub mod command;
mod device;
pub mod error;
pub mod points;
mod registry;
pub mod state;
pub mod subscription;
pub mod types;

pub use bus::BusClient;
pub use command::{DatapointWrite, ParameterWrite, ThermostatCommand, ThermostatParameter};
pub use device::{Device, DeviceBuilder};
pub use error::{DecodeError, DeviceError, Error, Result, TransportError};
pub use points::{FunctionType, PairingId, PairingIds, ParameterId};
pub use registry::{DeviceKey, DeviceRegistry};
pub use state::{DeviceState, SensorKind, SensorState, ThermostatState};
pub use subscription::{CallbackRegistry, DeviceUpdate, SubscriptionId};
pub use types::{HvacMode, OnOff, PresetMode, StatusFlags, WireDecimal};
