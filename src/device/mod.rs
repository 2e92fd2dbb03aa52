// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! High-level device abstraction for free@home channels.
//!
//! A [`Device`] represents one physical device channel: its identity,
//! its pairing/parameter wire-address maps (fixed at construction from the
//! point registry), its typed state, and its update listeners.
//!
//! # Update path
//!
//! Raw `(datapoint, value)` notifications enter through
//! [`Device::update_datapoint`] (and [`Device::update_parameter`] for the
//! separate parameter stream). The device decodes the value via its pairing
//! map, mutates exactly one typed field, and then notifies all registered
//! listeners once per recognized event. Events whose datapoint is not
//! mapped for this device are logged and dropped; that is not an error.
//!
//! # Command path
//!
//! Intents such as [`Device::turn_on`] encode into ordered write sequences
//! and go out through the [`BusClient`]. The command path never mutates
//! local state: the device's fields change only when the bus later reports
//! the new values back, keeping a single writer path into device state.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use freeathome_lib::{BusClient, Device, TransportError};
//! use freeathome_lib::points::{FunctionType, PairingId};
//!
//! # struct NullBus;
//! # impl BusClient for NullBus {
//! #     async fn set_datapoint(&self, _: &str, _: &str, _: &str, _: &str)
//! #         -> Result<(), TransportError> { Ok(()) }
//! #     async fn set_parameter(&self, _: &str, _: &str, _: &str, _: &str)
//! #         -> Result<(), TransportError> { Ok(()) }
//! # }
//! # async fn example() -> freeathome_lib::Result<()> {
//! # let client = Arc::new(NullBus);
//! let device = Device::builder(client, FunctionType::RoomTemperatureController)
//!     .serial_number("ABB700D12345")
//!     .channel_id("ch0")
//!     .name("Living room")
//!     .datapoint(PairingId::EcoModeOnOffRequest, "idp0011")
//!     .datapoint(PairingId::ControllerOnOffRequest, "idp0012")
//!     .datapoint(PairingId::ControllerOnOff, "odp0008")
//!     .build();
//!
//! device.turn_on().await?;
//!
//! // State follows the bus, not the command:
//! device.update_datapoint("odp0008", "1").await?;
//! # Ok(())
//! # }
//! ```

mod builder;

pub use builder::DeviceBuilder;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};

use crate::bus::BusClient;
use crate::command::{ThermostatCommand, ThermostatParameter};
use crate::error::{DecodeError, DeviceError, Error, Result};
use crate::points::{FunctionType, PairingId, ParameterId};
use crate::registry::DeviceKey;
use crate::state::{DeviceState, SensorState};
use crate::subscription::{CallbackRegistry, DeviceUpdate, SubscriptionId};
use crate::types::{OnOff, StatusFlags, WireDecimal};

/// A free@home device channel.
///
/// The type parameter `C` is the bus client used for outbound writes.
/// Shared identity and the listener list live here; the typed state is a
/// [`DeviceState`] variant selected by the function type, and decode and
/// intent logic dispatch on that tag.
#[derive(Debug)]
pub struct Device<C: BusClient> {
    client: Arc<C>,
    serial_number: String,
    channel_id: String,
    name: String,
    function: FunctionType,
    /// Abstract pairing id → wire datapoint address (e.g. `"odp0006"`).
    datapoints: HashMap<PairingId, String>,
    /// Abstract parameter id → wire parameter address (e.g. `"pm0001"`).
    parameters: HashMap<ParameterId, String>,
    state: RwLock<DeviceState>,
    callbacks: Arc<CallbackRegistry>,
    last_update: Mutex<Option<DateTime<Utc>>>,
}

impl<C: BusClient> Device<C> {
    /// Creates a builder for a device of the given function type.
    #[must_use]
    pub fn builder(client: Arc<C>, function: FunctionType) -> DeviceBuilder<C> {
        DeviceBuilder::new(client, function)
    }

    pub(crate) fn new(
        client: Arc<C>,
        function: FunctionType,
        serial_number: String,
        channel_id: String,
        name: String,
        datapoints: HashMap<PairingId, String>,
        parameters: HashMap<ParameterId, String>,
    ) -> Self {
        Self {
            client,
            serial_number,
            channel_id,
            name,
            function,
            datapoints,
            parameters,
            state: RwLock::new(DeviceState::for_function(function)),
            callbacks: Arc::new(CallbackRegistry::new()),
            last_update: Mutex::new(None),
        }
    }

    // ========== Identity ==========

    /// Returns the device serial number.
    #[must_use]
    pub fn serial_number(&self) -> &str {
        &self.serial_number
    }

    /// Returns the channel id.
    #[must_use]
    pub fn channel_id(&self) -> &str {
        &self.channel_id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the function type.
    #[must_use]
    pub fn function(&self) -> FunctionType {
        self.function
    }

    /// Returns the registry key for this device.
    #[must_use]
    pub fn key(&self) -> DeviceKey {
        DeviceKey::new(&self.serial_number, &self.channel_id)
    }

    // ========== State access ==========

    /// Returns a snapshot of the current typed state.
    #[must_use]
    pub fn state(&self) -> DeviceState {
        self.state.read().clone()
    }

    /// Returns when the last recognized update was decoded.
    #[must_use]
    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        *self.last_update.lock()
    }

    /// Returns the wire datapoint address mapped to a pairing, if any.
    #[must_use]
    pub fn datapoint_address(&self, pairing: PairingId) -> Option<&str> {
        self.datapoints.get(&pairing).map(String::as_str)
    }

    // ========== Subscriptions ==========

    /// Registers an asynchronous listener invoked after every recognized
    /// update.
    ///
    /// Multiple listeners may be registered; each receives every update.
    pub fn on_device_updated<F, Fut>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(DeviceUpdate) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.callbacks.register(callback)
    }

    /// Unregisters a listener by its subscription ID.
    ///
    /// Returns `true` if a listener was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.callbacks.unsubscribe(id)
    }

    // ========== Update dispatch ==========

    /// Applies a raw datapoint notification.
    ///
    /// Decoding and the state mutation are synchronous; listener fan-out
    /// happens afterwards, once per recognized event. Events for
    /// datapoints not mapped on this device are logged and dropped.
    ///
    /// Updates for the same device must be applied in bus-delivery order;
    /// callers are expected to serialize calls per device.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError` if the raw value is malformed for the mapped
    /// pairing; state is left unchanged and no listener fires.
    pub async fn update_datapoint(&self, datapoint: &str, value: &str) -> Result<()> {
        let Some(pairing) = self.pairing_for(datapoint) else {
            tracing::debug!(
                serial = %self.serial_number,
                channel = %self.channel_id,
                datapoint,
                value,
                "datapoint not mapped for this device, dropping"
            );
            return Ok(());
        };

        let decoded = {
            let mut state = self.state.write();
            Self::decode_datapoint(&mut state, pairing, value)?
        };
        if !decoded {
            tracing::debug!(
                serial = %self.serial_number,
                channel = %self.channel_id,
                %pairing,
                value,
                "no decode rule for pairing, dropping"
            );
            return Ok(());
        }

        tracing::info!(
            serial = %self.serial_number,
            channel = %self.channel_id,
            %pairing,
            datapoint,
            value,
            "datapoint updated"
        );
        self.dispatch_update().await;
        Ok(())
    }

    /// Applies a raw parameter notification.
    ///
    /// Parameters arrive on a channel separate from datapoints but follow
    /// the same decode-then-notify contract.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError` if the raw value is malformed for the mapped
    /// parameter.
    pub async fn update_parameter(&self, parameter: &str, value: &str) -> Result<()> {
        let Some(param) = self.parameter_for(parameter) else {
            tracing::debug!(
                serial = %self.serial_number,
                channel = %self.channel_id,
                parameter,
                value,
                "parameter not mapped for this device, dropping"
            );
            return Ok(());
        };

        {
            let mut state = self.state.write();
            Self::decode_parameter(&mut state, param, value)?;
        }

        tracing::info!(
            serial = %self.serial_number,
            channel = %self.channel_id,
            %param,
            parameter,
            value,
            "parameter updated"
        );
        self.dispatch_update().await;
        Ok(())
    }

    /// Finds the pairing mapped to a wire datapoint address.
    ///
    /// Unordered equality scan; pairings are not shared across datapoints
    /// within one device, so at most one entry matches.
    fn pairing_for(&self, datapoint: &str) -> Option<PairingId> {
        self.datapoints
            .iter()
            .find(|(_, address)| address.as_str() == datapoint)
            .map(|(pairing, _)| *pairing)
    }

    fn parameter_for(&self, parameter: &str) -> Option<ParameterId> {
        self.parameters
            .iter()
            .find(|(_, address)| address.as_str() == parameter)
            .map(|(param, _)| *param)
    }

    /// Decodes one datapoint value into the typed state.
    ///
    /// Returns `Ok(false)` when the pairing carries no decodable output
    /// (e.g. an input pairing echoed back); the caller treats that like an
    /// unmapped datapoint.
    fn decode_datapoint(
        state: &mut DeviceState,
        pairing: PairingId,
        value: &str,
    ) -> std::result::Result<bool, DecodeError> {
        match state {
            DeviceState::Thermostat(thermostat) => match pairing {
                PairingId::ControllerOnOff => {
                    thermostat.set_on(OnOff::from_wire(value)?.is_on());
                }
                PairingId::StatusIndication => {
                    thermostat.set_status(StatusFlags::from_wire(value)?);
                }
                PairingId::SetValueTemperature => {
                    WireDecimal::parse(value)?;
                    thermostat.set_target_temperature(value);
                }
                PairingId::MeasuredTemperature => {
                    WireDecimal::parse(value)?;
                    thermostat.set_measured_temperature(value);
                }
                PairingId::MeasuredHumidity => {
                    WireDecimal::parse(value)?;
                    thermostat.set_measured_humidity(value);
                }
                PairingId::HeatingDemand => {
                    WireDecimal::parse(value)?;
                    thermostat.set_heating_demand(value);
                }
                _ => return Ok(false),
            },
            DeviceState::Sensor(sensor) => {
                if pairing != sensor.kind().pairing() {
                    return Ok(false);
                }
                SensorState::validate(value)?;
                sensor.set_raw(value);
            }
        }
        Ok(true)
    }

    fn decode_parameter(
        state: &mut DeviceState,
        param: ParameterId,
        value: &str,
    ) -> std::result::Result<(), DecodeError> {
        match (state, param) {
            (DeviceState::Thermostat(thermostat), ParameterId::TemperatureCorrection) => {
                WireDecimal::parse(value)?;
                thermostat.set_temperature_correction(value);
                Ok(())
            }
            (DeviceState::Sensor(_), _) => Ok(()),
        }
    }

    async fn dispatch_update(&self) {
        let at = Utc::now();
        *self.last_update.lock() = Some(at);
        let update = DeviceUpdate {
            serial_number: self.serial_number.clone(),
            channel_id: self.channel_id.clone(),
            state: self.state.read().clone(),
            at,
        };
        self.callbacks.notify(update).await;
    }

    // ========== Thermostat intents ==========

    /// Turns the thermostat on.
    ///
    /// Issues two ordered writes: the eco-mode request is cleared before
    /// the controller request is raised, because the device firmware
    /// evaluates both flags together.
    ///
    /// # Errors
    ///
    /// Returns error if the device is not a thermostat, a required
    /// datapoint is unmapped, or the transport fails.
    pub async fn turn_on(&self) -> Result<()> {
        self.send_command(ThermostatCommand::TurnOn).await
    }

    /// Turns the thermostat off. The eco flag is left untouched.
    ///
    /// # Errors
    ///
    /// Returns error if the device is not a thermostat, a required
    /// datapoint is unmapped, or the transport fails.
    pub async fn turn_off(&self) -> Result<()> {
        self.send_command(ThermostatCommand::TurnOff).await
    }

    /// Puts the thermostat into eco mode.
    ///
    /// # Errors
    ///
    /// Returns error if the device is not a thermostat, a required
    /// datapoint is unmapped, or the transport fails.
    pub async fn eco_mode(&self) -> Result<()> {
        self.send_command(ThermostatCommand::EcoMode).await
    }

    /// Requests an absolute target temperature in °C.
    ///
    /// The value goes out as a 2-fraction-digit decimal string.
    ///
    /// # Errors
    ///
    /// Returns error if the device is not a thermostat, a required
    /// datapoint is unmapped, or the transport fails.
    pub async fn set_target_temperature(&self, temperature: f64) -> Result<()> {
        self.send_command(ThermostatCommand::SetTargetTemperature(temperature))
            .await
    }

    /// Sets the temperature correction parameter in °C.
    ///
    /// # Errors
    ///
    /// Returns error if the device is not a thermostat, the parameter is
    /// unmapped, or the transport fails.
    pub async fn set_temperature_correction(&self, correction: f64) -> Result<()> {
        self.check_capability("thermostat control")?;
        let write = ThermostatParameter::TemperatureCorrection(correction).write();
        let address = self.parameters.get(&write.parameter).ok_or(Error::Device(
            DeviceError::MissingParameter {
                parameter: write.parameter,
            },
        ))?;
        self.client
            .set_parameter(&self.serial_number, &self.channel_id, address, &write.value)
            .await?;
        Ok(())
    }

    /// Issues an intent's writes strictly in order.
    ///
    /// Fire-and-forget: local state is never touched here. The write's
    /// effect becomes visible only through the inbound update that the bus
    /// later delivers.
    async fn send_command(&self, command: ThermostatCommand) -> Result<()> {
        self.check_capability("thermostat control")?;
        for write in command.writes() {
            let address = self.datapoints.get(&write.pairing).ok_or(Error::Device(
                DeviceError::MissingDatapoint {
                    pairing: write.pairing,
                },
            ))?;
            self.client
                .set_datapoint(&self.serial_number, &self.channel_id, address, &write.value)
                .await?;
        }
        Ok(())
    }

    /// Checks that the function type supports an intent.
    fn check_capability(&self, name: &str) -> Result<()> {
        if self.function.is_thermostat() {
            Ok(())
        } else {
            Err(Error::Device(DeviceError::UnsupportedCapability {
                capability: name.to_string(),
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::error::TransportError;

    struct NullBus;

    impl BusClient for NullBus {
        async fn set_datapoint(
            &self,
            _serial: &str,
            _channel: &str,
            _datapoint: &str,
            _value: &str,
        ) -> std::result::Result<(), TransportError> {
            Ok(())
        }

        async fn set_parameter(
            &self,
            _serial: &str,
            _channel: &str,
            _parameter: &str,
            _value: &str,
        ) -> std::result::Result<(), TransportError> {
            Ok(())
        }
    }

    fn thermostat() -> Device<NullBus> {
        Device::builder(Arc::new(NullBus), FunctionType::RoomTemperatureController)
            .serial_number("ABB700D12345")
            .channel_id("ch0")
            .name("Living room")
            .datapoint(PairingId::EcoModeOnOffRequest, "idp0011")
            .datapoint(PairingId::ControllerOnOffRequest, "idp0012")
            .datapoint(PairingId::AbsoluteSetpointTemperature, "idp0016")
            .datapoint(PairingId::SetValueTemperature, "odp0006")
            .datapoint(PairingId::ControllerOnOff, "odp0008")
            .datapoint(PairingId::StatusIndication, "odp0009")
            .datapoint(PairingId::MeasuredTemperature, "odp0010")
            .parameter(ParameterId::TemperatureCorrection, "pm0001")
            .build()
    }

    #[tokio::test]
    async fn unknown_datapoint_is_dropped_without_callback() {
        let device = thermostat();
        let fired = Arc::new(std::sync::atomic::AtomicU32::new(0));
        let fired_clone = fired.clone();
        device.on_device_updated(move |_| {
            let fired = fired_clone.clone();
            async move {
                fired.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            }
        });

        device.update_datapoint("odp9999", "1").await.unwrap();

        let state = device.state();
        assert_eq!(state, DeviceState::for_function(device.function()));
        assert_eq!(fired.load(std::sync::atomic::Ordering::SeqCst), 0);
        assert!(device.last_update().is_none());
    }

    #[tokio::test]
    async fn controller_on_off_decodes_wire_boolean() {
        let device = thermostat();
        device.update_datapoint("odp0008", "1").await.unwrap();
        assert_eq!(device.state().as_thermostat().unwrap().on(), Some(true));

        device.update_datapoint("odp0008", "0").await.unwrap();
        assert_eq!(device.state().as_thermostat().unwrap().on(), Some(false));
    }

    #[tokio::test]
    async fn status_indication_decodes_eco_bit() {
        let device = thermostat();

        device.update_datapoint("odp0009", "68").await.unwrap();
        let state = device.state();
        assert!(state.as_thermostat().unwrap().status().unwrap().eco_active());

        device.update_datapoint("odp0009", "65").await.unwrap();
        let state = device.state();
        assert!(!state.as_thermostat().unwrap().status().unwrap().eco_active());
    }

    #[tokio::test]
    async fn malformed_value_fails_and_leaves_state_untouched() {
        let device = thermostat();
        device.update_datapoint("odp0010", "22.1").await.unwrap();

        let err = device.update_datapoint("odp0010", "n/a").await.unwrap_err();
        assert!(matches!(err, Error::Decode(DecodeError::InvalidDecimal { .. })));

        let state = device.state();
        assert_eq!(
            state.as_thermostat().unwrap().measured_temperature(),
            Some(22.1)
        );
    }

    #[tokio::test]
    async fn parameter_stream_feeds_correction_only() {
        let device = thermostat();
        assert!(
            device
                .state()
                .as_thermostat()
                .unwrap()
                .temperature_correction()
                .is_none()
        );

        device.update_parameter("pm0001", "-0.50").await.unwrap();
        assert_eq!(
            device
                .state()
                .as_thermostat()
                .unwrap()
                .temperature_correction(),
            Some(-0.5)
        );

        // Unknown parameter addresses are dropped silently.
        device.update_parameter("pm0042", "3").await.unwrap();
    }

    #[tokio::test]
    async fn every_recognized_update_notifies() {
        let device = thermostat();
        let fired = Arc::new(std::sync::atomic::AtomicU32::new(0));
        let fired_clone = fired.clone();
        device.on_device_updated(move |_| {
            let fired = fired_clone.clone();
            async move {
                fired.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            }
        });

        // Identical payloads still notify: no change suppression.
        device.update_datapoint("odp0008", "1").await.unwrap();
        device.update_datapoint("odp0008", "1").await.unwrap();
        assert_eq!(fired.load(std::sync::atomic::Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn intents_on_sensor_are_unsupported() {
        let device = Device::builder(Arc::new(NullBus), FunctionType::WeatherWindSensor)
            .serial_number("ABB700W00001")
            .channel_id("ch1")
            .datapoint(PairingId::WindSpeed, "odp0001")
            .build();

        let err = device.turn_on().await.unwrap_err();
        assert!(matches!(
            err,
            Error::Device(DeviceError::UnsupportedCapability { .. })
        ));
    }

    #[tokio::test]
    async fn intent_without_mapped_datapoint_fails() {
        let device = Device::builder(Arc::new(NullBus), FunctionType::RoomTemperatureController)
            .serial_number("ABB700D12345")
            .channel_id("ch0")
            .build();

        let err = device.turn_off().await.unwrap_err();
        assert!(matches!(
            err,
            Error::Device(DeviceError::MissingDatapoint {
                pairing: PairingId::ControllerOnOffRequest,
            })
        ));
    }

    #[tokio::test]
    async fn commands_never_mutate_local_state() {
        let device = thermostat();
        device.update_datapoint("odp0008", "0").await.unwrap();

        device.turn_on().await.unwrap();

        // Still off until the bus reports otherwise.
        let state = device.state();
        assert_eq!(state.as_thermostat().unwrap().on(), Some(false));
    }

    #[tokio::test]
    async fn wind_sensor_decodes_and_converts_at_read() {
        let device = Device::builder(Arc::new(NullBus), FunctionType::WeatherWindSensor)
            .serial_number("ABB700W00001")
            .channel_id("ch1")
            .datapoint(PairingId::WindSpeed, "odp0001")
            .build();

        device.update_datapoint("odp0001", "10").await.unwrap();
        let state = device.state();
        let sensor = state.as_sensor().unwrap();
        assert_eq!(sensor.display_value(), Some("36.00".to_string()));
    }
}
