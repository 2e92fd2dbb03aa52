// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Weather station sensor state.
//!
//! Sensors hold a single raw scalar plus a kind tag selecting static
//! display metadata. The wind sensor reports m/s on the bus but is exposed
//! in km/h; the ×3.6 conversion happens at read time, never at decode time.

use crate::error::DecodeError;
use crate::points::{FunctionType, PairingId};
use crate::types::WireDecimal;

/// Platform device class hint for a sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceClass {
    /// Temperature sensor.
    Temperature,
    /// Illuminance sensor.
    Illuminance,
}

/// Kind tag selecting a sensor's decode metadata.
///
/// # Examples
///
/// ```
/// use freeathome_lib::state::SensorKind;
///
/// let wind = SensorKind::WindStrength;
/// assert_eq!(wind.unit(), Some("km/h"));
/// assert_eq!(wind.label(), "Wind Strength");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    /// Outdoor temperature in °C.
    Temperature,
    /// Wind strength, exposed in km/h.
    WindStrength,
    /// Rain alarm.
    Rain,
    /// Illumination in lux.
    Brightness,
}

impl SensorKind {
    /// Maps a function type to its sensor kind.
    ///
    /// Returns `None` for non-sensor function types.
    #[must_use]
    pub const fn from_function(function: FunctionType) -> Option<Self> {
        match function {
            FunctionType::WeatherTemperatureSensor => Some(Self::Temperature),
            FunctionType::WeatherWindSensor => Some(Self::WindStrength),
            FunctionType::WeatherRainSensor => Some(Self::Rain),
            FunctionType::WeatherBrightnessSensor => Some(Self::Brightness),
            FunctionType::RoomTemperatureController
            | FunctionType::RoomTemperatureControllerWithFan => None,
        }
    }

    /// Returns the output pairing carrying this sensor's value.
    #[must_use]
    pub const fn pairing(self) -> PairingId {
        match self {
            Self::Temperature => PairingId::OutdoorTemperature,
            Self::WindStrength => PairingId::WindSpeed,
            Self::Rain => PairingId::RainAlarm,
            Self::Brightness => PairingId::BrightnessLevel,
        }
    }

    /// Returns the display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Temperature => "Temperature",
            Self::WindStrength => "Wind Strength",
            Self::Rain => "Rain",
            Self::Brightness => "Illumination",
        }
    }

    /// Returns the unit of measurement, if any.
    #[must_use]
    pub const fn unit(self) -> Option<&'static str> {
        match self {
            Self::Temperature => Some("°C"),
            Self::WindStrength => Some("km/h"),
            Self::Rain => None,
            Self::Brightness => Some("lux"),
        }
    }

    /// Returns the frontend icon, if any.
    #[must_use]
    pub const fn icon(self) -> Option<&'static str> {
        match self {
            Self::Temperature => Some("mdi:thermometer"),
            Self::WindStrength => Some("mdi:weather-windy"),
            Self::Rain => Some("mdi:weather-rainy"),
            Self::Brightness => None,
        }
    }

    /// Returns the platform device class, if any.
    #[must_use]
    pub const fn device_class(self) -> Option<DeviceClass> {
        match self {
            Self::Temperature => Some(DeviceClass::Temperature),
            Self::Brightness => Some(DeviceClass::Illuminance),
            Self::WindStrength | Self::Rain => None,
        }
    }
}

/// Tracked state of a weather station sensor channel.
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct SensorState {
    kind: SensorKind,
    /// Last reported value, raw wire form.
    raw: Option<String>,
}

impl SensorState {
    /// Creates an empty sensor state of the given kind.
    #[must_use]
    pub const fn new(kind: SensorKind) -> Self {
        Self { kind, raw: None }
    }

    /// Returns the sensor kind.
    #[must_use]
    pub const fn kind(&self) -> SensorKind {
        self.kind
    }

    /// Stores the raw reported value.
    pub fn set_raw(&mut self, raw: impl Into<String>) {
        self.raw = Some(raw.into());
    }

    /// Returns the raw reported value as received from the bus.
    #[must_use]
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    /// Returns the typed reading, unit-converted for wind.
    #[must_use]
    pub fn reading(&self) -> Option<f64> {
        let value: f64 = self.raw.as_deref()?.trim().parse().ok()?;
        match self.kind {
            SensorKind::WindStrength => Some(value * 3.6),
            _ => Some(value),
        }
    }

    /// Returns the display value string.
    ///
    /// Wind readings are converted from the bus's m/s to km/h and
    /// formatted to two fraction digits; other kinds pass the raw value
    /// through unchanged.
    #[must_use]
    pub fn display_value(&self) -> Option<String> {
        match self.kind {
            SensorKind::WindStrength => self.reading().map(|kmh| WireDecimal::new(kmh).to_wire()),
            _ => self.raw.clone(),
        }
    }

    pub(crate) fn validate(raw: &str) -> Result<(), DecodeError> {
        WireDecimal::parse(raw).map(|_| ())
    }
}
