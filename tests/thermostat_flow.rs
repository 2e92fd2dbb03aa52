// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the thermostat command and update flow using a
//! recording bus client.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use parking_lot::Mutex;

use freeathome_lib::points::{FunctionType, PairingId, ParameterId};
use freeathome_lib::{
    BusClient, Device, DeviceError, DeviceRegistry, Error, HvacMode, PresetMode, TransportError,
};

/// One outbound write captured by [`RecordingBus`].
#[derive(Debug, Clone, PartialEq, Eq)]
struct Write {
    kind: &'static str,
    serial: String,
    channel: String,
    address: String,
    value: String,
}

/// Bus client that records every write in order.
#[derive(Default)]
struct RecordingBus {
    writes: Mutex<Vec<Write>>,
    fail: Mutex<bool>,
}

impl RecordingBus {
    fn writes(&self) -> Vec<Write> {
        self.writes.lock().clone()
    }

    fn fail_next(&self) {
        *self.fail.lock() = true;
    }

    fn record(
        &self,
        kind: &'static str,
        serial: &str,
        channel: &str,
        address: &str,
        value: &str,
    ) -> Result<(), TransportError> {
        if std::mem::take(&mut *self.fail.lock()) {
            return Err(TransportError::Rejected("simulated failure".to_string()));
        }
        self.writes.lock().push(Write {
            kind,
            serial: serial.to_string(),
            channel: channel.to_string(),
            address: address.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }
}

impl BusClient for RecordingBus {
    async fn set_datapoint(
        &self,
        serial: &str,
        channel: &str,
        datapoint: &str,
        value: &str,
    ) -> Result<(), TransportError> {
        self.record("datapoint", serial, channel, datapoint, value)
    }

    async fn set_parameter(
        &self,
        serial: &str,
        channel: &str,
        parameter: &str,
        value: &str,
    ) -> Result<(), TransportError> {
        self.record("parameter", serial, channel, parameter, value)
    }
}

fn thermostat(bus: Arc<RecordingBus>) -> Arc<Device<RecordingBus>> {
    Arc::new(
        Device::builder(bus, FunctionType::RoomTemperatureController)
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
            .datapoint(PairingId::MeasuredHumidity, "odp0011")
            .datapoint(PairingId::HeatingDemand, "odp0013")
            .parameter(ParameterId::TemperatureCorrection, "pm0002")
            .build(),
    )
}

#[tokio::test]
async fn turn_on_clears_eco_before_raising_controller() {
    let bus = Arc::new(RecordingBus::default());
    let device = thermostat(bus.clone());

    device.turn_on().await.unwrap();

    let writes = bus.writes();
    assert_eq!(writes.len(), 2);
    assert_eq!(writes[0].address, "idp0011");
    assert_eq!(writes[0].value, "0");
    assert_eq!(writes[1].address, "idp0012");
    assert_eq!(writes[1].value, "1");
    assert!(writes.iter().all(|w| w.kind == "datapoint"));
    assert!(writes.iter().all(|w| w.serial == "ABB700D12345"));
}

#[tokio::test]
async fn turn_off_writes_controller_only() {
    let bus = Arc::new(RecordingBus::default());
    let device = thermostat(bus.clone());

    device.turn_off().await.unwrap();

    let writes = bus.writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].address, "idp0012");
    assert_eq!(writes[0].value, "0");
}

#[tokio::test]
async fn eco_mode_raises_eco_request() {
    let bus = Arc::new(RecordingBus::default());
    let device = thermostat(bus.clone());

    device.eco_mode().await.unwrap();

    let writes = bus.writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].address, "idp0011");
    assert_eq!(writes[0].value, "1");
}

#[tokio::test]
async fn set_target_temperature_writes_two_decimals() {
    let bus = Arc::new(RecordingBus::default());
    let device = thermostat(bus.clone());

    device.set_target_temperature(21.0).await.unwrap();

    let writes = bus.writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].address, "idp0016");
    assert_eq!(writes[0].value, "21.00");
}

#[tokio::test]
async fn temperature_correction_goes_out_as_parameter() {
    let bus = Arc::new(RecordingBus::default());
    let device = thermostat(bus.clone());

    device.set_temperature_correction(-1.5).await.unwrap();

    let writes = bus.writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].kind, "parameter");
    assert_eq!(writes[0].address, "pm0002");
    assert_eq!(writes[0].value, "-1.50");
}

#[tokio::test]
async fn transport_failure_propagates() {
    let bus = Arc::new(RecordingBus::default());
    let device = thermostat(bus.clone());

    bus.fail_next();
    let err = device.turn_off().await.unwrap_err();
    assert!(matches!(err, Error::Transport(TransportError::Rejected(_))));
}

#[tokio::test]
async fn commands_do_not_change_state_until_bus_echo() {
    let bus = Arc::new(RecordingBus::default());
    let device = thermostat(bus.clone());

    device.turn_on().await.unwrap();
    assert_eq!(
        device.state().as_thermostat().unwrap().hvac_mode(),
        HvacMode::Off
    );

    device.update_datapoint("odp0008", "1").await.unwrap();
    assert_eq!(
        device.state().as_thermostat().unwrap().hvac_mode(),
        HvacMode::HeatCool
    );
}

#[tokio::test]
async fn eco_preset_follows_status_indication() {
    let bus = Arc::new(RecordingBus::default());
    let device = thermostat(bus.clone());

    device.update_datapoint("odp0008", "1").await.unwrap();
    device.update_datapoint("odp0009", "68").await.unwrap();
    assert_eq!(
        device.state().as_thermostat().unwrap().preset_mode(),
        Some(PresetMode::Eco)
    );

    device.update_datapoint("odp0009", "65").await.unwrap();
    assert_eq!(device.state().as_thermostat().unwrap().preset_mode(), None);
}

#[tokio::test]
async fn target_temperature_hidden_while_off() {
    let bus = Arc::new(RecordingBus::default());
    let device = thermostat(bus.clone());

    device.update_datapoint("odp0006", "21.50").await.unwrap();
    device.update_datapoint("odp0008", "0").await.unwrap();
    assert_eq!(
        device.state().as_thermostat().unwrap().target_temperature(),
        None
    );

    device.update_datapoint("odp0008", "1").await.unwrap();
    assert_eq!(
        device.state().as_thermostat().unwrap().target_temperature(),
        Some(21.5)
    );
}

#[tokio::test]
async fn registry_routes_updates_and_listeners_fire() {
    let bus = Arc::new(RecordingBus::default());
    let device = thermostat(bus.clone());

    let registry = DeviceRegistry::new();
    registry.insert(device.clone());

    let fired = Arc::new(AtomicU32::new(0));
    let fired_clone = fired.clone();
    let sub_id = device.on_device_updated(move |update| {
        let fired = fired_clone.clone();
        async move {
            assert_eq!(update.serial_number, "ABB700D12345");
            assert_eq!(update.channel_id, "ch0");
            fired.fetch_add(1, Ordering::SeqCst);
        }
    });

    registry
        .route_datapoint("ABB700D12345", "ch0", "odp0010", "22.30")
        .await
        .unwrap();
    registry
        .route_parameter("ABB700D12345", "ch0", "pm0002", "0.50")
        .await
        .unwrap();
    // Wrong serial: dropped, no listener call.
    registry
        .route_datapoint("ABB700D99999", "ch0", "odp0010", "19.00")
        .await
        .unwrap();

    assert_eq!(fired.load(Ordering::SeqCst), 2);
    let state = device.state();
    let thermostat = state.as_thermostat().unwrap();
    assert_eq!(thermostat.measured_temperature(), Some(22.3));
    assert_eq!(thermostat.temperature_correction(), Some(0.5));
    assert!(device.last_update().is_some());

    assert!(device.unsubscribe(sub_id));
    registry
        .route_datapoint("ABB700D12345", "ch0", "odp0010", "23.00")
        .await
        .unwrap();
    assert_eq!(fired.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn sensor_rejects_thermostat_intents() {
    let bus = Arc::new(RecordingBus::default());
    let sensor = Device::builder(bus.clone(), FunctionType::WeatherBrightnessSensor)
        .serial_number("ABB700W00001")
        .channel_id("ch3")
        .datapoint(PairingId::BrightnessLevel, "odp0001")
        .build();

    let err = sensor.set_target_temperature(21.0).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Device(DeviceError::UnsupportedCapability { .. })
    ));
    assert!(bus.writes().is_empty());
}
