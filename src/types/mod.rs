// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for the free@home wire encoding and derived read model.
//!
//! The wire-side types decode the protocol's textual value formats and
//! re-encode them for outbound writes; the derived types are the state
//! projection exposed to consumers.
//!
//! # Types
//!
//! - [`OnOff`] - wire boolean, literal `"0"`/`"1"`
//! - [`WireDecimal`] - decimal values, fixed 2-fraction-digit outbound format
//! - [`StatusFlags`] - multiplexed status bitmask (eco bit plus opaque bits)
//! - [`HvacMode`] / [`PresetMode`] - derived thermostat modes

mod decimal;
mod hvac;
mod on_off;
mod status_flags;

pub use decimal::WireDecimal;
pub use hvac::{HvacMode, PresetMode};
pub use on_off::OnOff;
pub use status_flags::StatusFlags;
