// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Subscription system for device updates.
//!
//! Every device owns a [`CallbackRegistry`] of asynchronous listeners.
//! After each recognized bus update is decoded into device state, the
//! listeners receive a [`DeviceUpdate`] snapshot. Fan-out runs the
//! listeners as independent tasks: there is no ordering guarantee between
//! them, and one listener failing does not stop the others.
//!
//! # Usage
//!
//! ```no_run
//! use freeathome_lib::{BusClient, Device, TransportError};
//! use freeathome_lib::points::FunctionType;
//!
//! # struct NullBus;
//! # impl BusClient for NullBus {
//! #     async fn set_datapoint(&self, _: &str, _: &str, _: &str, _: &str)
//! #         -> Result<(), TransportError> { Ok(()) }
//! #     async fn set_parameter(&self, _: &str, _: &str, _: &str, _: &str)
//! #         -> Result<(), TransportError> { Ok(()) }
//! # }
//! # async fn example() -> freeathome_lib::Result<()> {
//! # let client = std::sync::Arc::new(NullBus);
//! let device = Device::builder(client, FunctionType::RoomTemperatureController)
//!     .serial_number("ABB700D12345")
//!     .channel_id("ch0")
//!     .build();
//!
//! let sub_id = device.on_device_updated(|update| async move {
//!     println!("{}/{} changed", update.serial_number, update.channel_id);
//! });
//!
//! // Later, unsubscribe
//! device.unsubscribe(sub_id);
//! # Ok(())
//! # }
//! ```

mod callback;

pub use callback::{CallbackRegistry, DeviceUpdate, SubscriptionId};
