// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bus client seam towards the system access point.
//!
//! The transport itself (connection, framing, authentication) lives outside
//! this library. Devices only need a way to issue fire-and-forget writes;
//! the feedback loop is the asynchronous datapoint update that later
//! arrives through [`Device::update_datapoint`](crate::Device::update_datapoint).

use crate::error::TransportError;

/// Trait for bus transport implementations that can write to devices.
///
/// Both operations are fire-and-forget: a returned `Ok(())` means the write
/// was handed to the transport, not that the physical device applied it.
/// Retries and timeouts are the transport's responsibility.
#[allow(async_fn_in_trait)]
pub trait BusClient {
    /// Writes a raw value to a channel datapoint.
    ///
    /// # Arguments
    ///
    /// * `serial` - Device serial number
    /// * `channel` - Channel id on the device (e.g. `"ch0"`)
    /// * `datapoint` - Wire datapoint address (e.g. `"idp0011"`)
    /// * `value` - Raw value in wire encoding
    ///
    /// # Errors
    ///
    /// Returns `TransportError` on connectivity loss; the error propagates
    /// unmodified to whoever issued the intent.
    async fn set_datapoint(
        &self,
        serial: &str,
        channel: &str,
        datapoint: &str,
        value: &str,
    ) -> Result<(), TransportError>;

    /// Writes a raw value to a channel configuration parameter.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` on connectivity loss.
    async fn set_parameter(
        &self,
        serial: &str,
        channel: &str,
        parameter: &str,
        value: &str,
    ) -> Result<(), TransportError>;
}
