// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `FreeAtHome` library.
//!
//! This module provides the error hierarchy for failures across the library:
//! bus transport, wire value decoding, and device operations.

use thiserror::Error;

use crate::points::{PairingId, ParameterId};

/// The main error type for this library.
///
/// This enum encompasses all possible errors that can occur when bridging
/// free@home devices.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred in the bus transport.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Error occurred while decoding a raw wire value.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Error occurred during device operations.
    #[error("device error: {0}")]
    Device(#[from] DeviceError),
}

/// Errors reported by the bus client collaborator.
///
/// The core never retries a failed write; transport errors propagate
/// unmodified to whoever issued the intent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The system access point is not connected.
    #[error("bus is not connected")]
    NotConnected,

    /// Connectivity to the system access point was lost mid-write.
    #[error("connection lost: {0}")]
    ConnectionLost(String),

    /// The write was rejected by the system access point.
    #[error("write rejected: {0}")]
    Rejected(String),
}

/// Errors raised while decoding raw bus values.
///
/// A decode failure is scoped to the single field being decoded: other
/// fields and the callback dispatch for later events are unaffected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A wire boolean was not the literal string `"0"` or `"1"`.
    #[error("invalid wire boolean {value:?}, expected \"0\" or \"1\"")]
    InvalidBoolean {
        /// The raw value received from the bus.
        value: String,
    },

    /// A wire decimal could not be parsed as a number.
    #[error("invalid wire decimal {value:?}")]
    InvalidDecimal {
        /// The raw value received from the bus.
        value: String,
    },

    /// A status bitmask was not a decimal-encoded integer.
    #[error("invalid status bitmask {value:?}")]
    InvalidBitmask {
        /// The raw value received from the bus.
        value: String,
    },
}

/// Errors related to device operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeviceError {
    /// The device's function type does not support the requested intent.
    #[error("device does not support {capability}")]
    UnsupportedCapability {
        /// The capability that is not supported.
        capability: String,
    },

    /// An intent needs a pairing the device has no wire address for.
    #[error("device has no datapoint mapped for {pairing}")]
    MissingDatapoint {
        /// The pairing id with no mapped datapoint.
        pairing: PairingId,
    },

    /// An intent needs a parameter the device has no wire address for.
    #[error("device has no parameter mapped for {parameter}")]
    MissingParameter {
        /// The parameter id with no mapped address.
        parameter: ParameterId,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
