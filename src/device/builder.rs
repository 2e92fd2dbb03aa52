// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Builder for [`Device`].

use std::collections::HashMap;
use std::sync::Arc;

use crate::bus::BusClient;
use crate::points::{self, FunctionType, PairingId, ParameterId};

use super::Device;

/// Builder for a [`Device`].
///
/// Pairing and parameter mappings are checked against the point registry
/// for the device's function type: entries the function does not declare
/// are logged and dropped rather than rejected, so a misdeclared channel
/// degrades to a device that ignores the unexpected points.
#[derive(Debug)]
pub struct DeviceBuilder<C: BusClient> {
    client: Arc<C>,
    function: FunctionType,
    serial_number: String,
    channel_id: String,
    name: Option<String>,
    datapoints: HashMap<PairingId, String>,
    parameters: HashMap<ParameterId, String>,
}

impl<C: BusClient> DeviceBuilder<C> {
    pub(crate) fn new(client: Arc<C>, function: FunctionType) -> Self {
        Self {
            client,
            function,
            serial_number: String::new(),
            channel_id: String::new(),
            name: None,
            datapoints: HashMap::new(),
            parameters: HashMap::new(),
        }
    }

    /// Sets the device serial number.
    #[must_use]
    pub fn serial_number(mut self, serial_number: impl Into<String>) -> Self {
        self.serial_number = serial_number.into();
        self
    }

    /// Sets the channel id.
    #[must_use]
    pub fn channel_id(mut self, channel_id: impl Into<String>) -> Self {
        self.channel_id = channel_id.into();
        self
    }

    /// Sets the display name. Defaults to the serial number.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Maps a pairing to its wire datapoint address on this channel.
    #[must_use]
    pub fn datapoint(mut self, pairing: PairingId, address: impl Into<String>) -> Self {
        self.datapoints.insert(pairing, address.into());
        self
    }

    /// Maps a parameter to its wire address on this channel.
    #[must_use]
    pub fn parameter(mut self, parameter: ParameterId, address: impl Into<String>) -> Self {
        self.parameters.insert(parameter, address.into());
        self
    }

    /// Builds the device, dropping mappings the function type does not
    /// declare.
    #[must_use]
    pub fn build(self) -> Device<C> {
        let declared = points::pairing_ids(self.function);
        let datapoints: HashMap<_, _> = self
            .datapoints
            .into_iter()
            .filter(|(pairing, address)| {
                let known = declared.is_some_and(|ids| ids.contains(*pairing));
                if !known {
                    tracing::debug!(
                        serial = %self.serial_number,
                        function = ?self.function,
                        %pairing,
                        address,
                        "pairing not declared for function type, dropping"
                    );
                }
                known
            })
            .collect();

        let declared_params = points::parameter_ids(self.function);
        let parameters: HashMap<_, _> = self
            .parameters
            .into_iter()
            .filter(|(parameter, address)| {
                let known = declared_params.is_some_and(|ids| ids.contains(parameter));
                if !known {
                    tracing::debug!(
                        serial = %self.serial_number,
                        function = ?self.function,
                        %parameter,
                        address,
                        "parameter not declared for function type, dropping"
                    );
                }
                known
            })
            .collect();

        let name = self.name.unwrap_or_else(|| self.serial_number.clone());
        Device::new(
            self.client,
            self.function,
            self.serial_number,
            self.channel_id,
            name,
            datapoints,
            parameters,
        )
    }
}
