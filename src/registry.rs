// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device registry and bus-event routing.
//!
//! The [`DeviceRegistry`] holds every [`Device`] known to the process,
//! keyed by serial number and channel id, and routes raw bus notifications
//! to the owning device. Notifications for unknown devices are logged and
//! dropped; bus traffic routinely covers channels this process does not
//! model.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::bus::BusClient;
use crate::device::Device;
use crate::error::Result;

/// Identity of one device channel on the bus.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceKey {
    serial_number: String,
    channel_id: String,
}

impl DeviceKey {
    /// Creates a key from a serial number and channel id.
    #[must_use]
    pub fn new(serial_number: impl Into<String>, channel_id: impl Into<String>) -> Self {
        Self {
            serial_number: serial_number.into(),
            channel_id: channel_id.into(),
        }
    }

    /// Returns the serial number.
    #[must_use]
    pub fn serial_number(&self) -> &str {
        &self.serial_number
    }

    /// Returns the channel id.
    #[must_use]
    pub fn channel_id(&self) -> &str {
        &self.channel_id
    }
}

impl fmt::Display for DeviceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.serial_number, self.channel_id)
    }
}

/// Registry of devices, keyed by [`DeviceKey`].
#[derive(Debug)]
pub struct DeviceRegistry<C: BusClient> {
    devices: RwLock<HashMap<DeviceKey, Arc<Device<C>>>>,
}

impl<C: BusClient> DeviceRegistry<C> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            devices: RwLock::new(HashMap::new()),
        }
    }

    /// Inserts a device, replacing any previous device under the same key.
    pub fn insert(&self, device: Arc<Device<C>>) -> Option<Arc<Device<C>>> {
        let key = device.key();
        tracing::debug!(%key, function = ?device.function(), "registering device");
        self.devices.write().insert(key, device)
    }

    /// Looks up a device by key.
    #[must_use]
    pub fn get(&self, key: &DeviceKey) -> Option<Arc<Device<C>>> {
        self.devices.read().get(key).cloned()
    }

    /// Removes a device by key.
    pub fn remove(&self, key: &DeviceKey) -> Option<Arc<Device<C>>> {
        self.devices.write().remove(key)
    }

    /// Returns the number of registered devices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.devices.read().len()
    }

    /// Returns `true` if no devices are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.read().is_empty()
    }

    /// Returns a snapshot of all registered devices.
    #[must_use]
    pub fn devices(&self) -> Vec<Arc<Device<C>>> {
        self.devices.read().values().cloned().collect()
    }

    /// Routes a raw datapoint notification to the owning device.
    ///
    /// Notifications for unregistered devices are logged and dropped.
    ///
    /// # Errors
    ///
    /// Returns the device's decode error if the value is malformed.
    pub async fn route_datapoint(
        &self,
        serial_number: &str,
        channel_id: &str,
        datapoint: &str,
        value: &str,
    ) -> Result<()> {
        let key = DeviceKey::new(serial_number, channel_id);
        // Clone out of the lock; the device update awaits listener tasks.
        let device = self.get(&key);
        match device {
            Some(device) => device.update_datapoint(datapoint, value).await,
            None => {
                tracing::debug!(%key, datapoint, value, "no device registered, dropping");
                Ok(())
            }
        }
    }

    /// Routes a raw parameter notification to the owning device.
    ///
    /// # Errors
    ///
    /// Returns the device's decode error if the value is malformed.
    pub async fn route_parameter(
        &self,
        serial_number: &str,
        channel_id: &str,
        parameter: &str,
        value: &str,
    ) -> Result<()> {
        let key = DeviceKey::new(serial_number, channel_id);
        let device = self.get(&key);
        match device {
            Some(device) => device.update_parameter(parameter, value).await,
            None => {
                tracing::debug!(%key, parameter, value, "no device registered, dropping");
                Ok(())
            }
        }
    }
}

impl<C: BusClient> Default for DeviceRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::error::TransportError;
    use crate::points::{FunctionType, PairingId};

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

    fn wind_sensor(serial: &str, channel: &str) -> Arc<Device<NullBus>> {
        Arc::new(
            Device::builder(Arc::new(NullBus), FunctionType::WeatherWindSensor)
                .serial_number(serial)
                .channel_id(channel)
                .datapoint(PairingId::WindSpeed, "odp0001")
                .build(),
        )
    }

    #[test]
    fn key_display_joins_serial_and_channel() {
        let key = DeviceKey::new("ABB700D12345", "ch0");
        assert_eq!(key.to_string(), "ABB700D12345/ch0");
    }

    #[test]
    fn insert_replaces_same_key() {
        let registry = DeviceRegistry::new();
        registry.insert(wind_sensor("ABB700W00001", "ch1"));
        let replaced = registry.insert(wind_sensor("ABB700W00001", "ch1"));

        assert!(replaced.is_some());
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn routes_to_owning_device_only() {
        let registry = DeviceRegistry::new();
        let device = wind_sensor("ABB700W00001", "ch1");
        registry.insert(device.clone());
        registry.insert(wind_sensor("ABB700W00002", "ch1"));

        registry
            .route_datapoint("ABB700W00001", "ch1", "odp0001", "10")
            .await
            .unwrap();

        let state = device.state();
        assert_eq!(state.as_sensor().unwrap().raw(), Some("10"));

        let other = registry
            .get(&DeviceKey::new("ABB700W00002", "ch1"))
            .unwrap();
        assert!(other.state().as_sensor().unwrap().raw().is_none());
    }

    #[tokio::test]
    async fn unknown_device_is_dropped() {
        let registry: DeviceRegistry<NullBus> = DeviceRegistry::new();
        registry
            .route_datapoint("ABB700X99999", "ch0", "odp0001", "10")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn remove_stops_routing() {
        let registry = DeviceRegistry::new();
        let device = wind_sensor("ABB700W00001", "ch1");
        registry.insert(device.clone());
        registry.remove(&device.key()).unwrap();

        assert!(registry.is_empty());
        registry
            .route_datapoint("ABB700W00001", "ch1", "odp0001", "10")
            .await
            .unwrap();
        assert!(device.state().as_sensor().unwrap().raw().is_none());
    }
}
