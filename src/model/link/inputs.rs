/*
Copyright 2021 Jakub Lewandowski

This file is part of SatLink Analyzer (SLA).

SatLink Analyzer (SLA) is a free software: you can redistribute it and/or modify
it under the terms of the GNU General Public License as published by
the Free Software Foundation; either version 3 of the License, or
(at your option) any later version.

SatLink Analyzer (SLA) is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
GNU General Public License for more details.

You should have received a copy of the GNU General Public License
along with SatLink Analyzer (SLA). If not, see https://www.gnu.org/licenses/.
*/

//! Input records of the link budget computation and their validation.
//!
//! The structures are deserialized directly from the link entries
//! of the configuration file, so their fields correspond to the
//! fields of `config.yaml`.

use crate::constants::{
    SATELLITE_NOISE_TEMP, SATELLITE_RX_GAIN, SATELLITE_TX_GAIN, SATELLITE_TX_POWER,
};
use crate::errors::{ValidationError, Violation};
use crate::Float;
use serde::Deserialize;
use std::ops::RangeInclusive;

/// Ground station antenna and position.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Deserialize)]
pub struct GroundStation {
    /// Latitude in degrees, `-90 <= latitude <= 90`.
    pub latitude: Float,

    /// Longitude in degrees, `-180 <= longitude <= 180`.
    pub longitude: Float,

    /// Antenna diameter in meters. Must be positive.
    pub antenna_diameter: Float,

    /// Antenna efficiency in percent, `0 <= efficiency <= 100`.
    pub antenna_efficiency: Float,

    /// Carrier frequency in GHz. Must be positive.
    pub frequency: Float,

    /// Antenna pointing error in degrees. Cannot be negative.
    pub pointing_error: Float,
}

impl GroundStation {
    fn check_bounds(&self, names: StationFields, validator: &mut Validator) {
        validator.within(names.latitude, self.latitude, -90.0..=90.0);
        validator.within(names.longitude, self.longitude, -180.0..=180.0);
        validator.positive(names.antenna_diameter, self.antenna_diameter);
        validator.within(names.antenna_efficiency, self.antenna_efficiency, 0.0..=100.0);
        validator.positive(names.frequency, self.frequency);
        validator.non_negative(names.pointing_error, self.pointing_error);
    }
}

/// Transmitting (uplink) ground station.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Deserialize)]
pub struct TransmitStation {
    #[serde(flatten)]
    pub station: GroundStation,

    /// Transmitter output power in W. Must be positive.
    pub power: Float,
}

/// Receiving (downlink) ground station.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Deserialize)]
pub struct ReceiveStation {
    #[serde(flatten)]
    pub station: GroundStation,

    /// Receiver system noise temperature in K. Must be positive.
    pub system_noise_temp: Float,
}

/// Geostationary satellite and its transponder.
///
/// Only the longitude is read from the configuration,
/// the transponder always uses the built-in values.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Deserialize)]
pub struct SatelliteParameters {
    /// Sub-satellite point longitude in degrees, `-180 <= longitude <= 180`.
    pub longitude: Float,

    #[serde(skip_deserializing, default = "SatelliteParameters::default_rx_gain")]
    pub rx_gain: Float,

    #[serde(skip_deserializing, default = "SatelliteParameters::default_noise_temp")]
    pub noise_temp: Float,

    #[serde(skip_deserializing, default = "SatelliteParameters::default_tx_power")]
    pub tx_power: Float,

    #[serde(skip_deserializing, default = "SatelliteParameters::default_tx_gain")]
    pub tx_gain: Float,
}

impl SatelliteParameters {
    fn default_rx_gain() -> Float {
        SATELLITE_RX_GAIN
    }

    fn default_noise_temp() -> Float {
        SATELLITE_NOISE_TEMP
    }

    fn default_tx_power() -> Float {
        SATELLITE_TX_POWER
    }

    fn default_tx_gain() -> Float {
        SATELLITE_TX_GAIN
    }
}

/// Complete numeric input of a single link budget.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Deserialize)]
pub struct LinkBudgetInputs {
    pub satellite: SatelliteParameters,
    pub transmitter: TransmitStation,
    pub receiver: ReceiveStation,
}

impl LinkBudgetInputs {
    /// Checks every input field and reports all violations at once.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut validator = Validator::default();
        self.check_bounds(&mut validator);
        validator.finish()
    }

    pub(in crate::model) fn check_bounds(&self, validator: &mut Validator) {
        validator.within(
            "satellite.longitude",
            self.satellite.longitude,
            -180.0..=180.0,
        );

        self.transmitter
            .station
            .check_bounds(TRANSMITTER_FIELDS, validator);
        validator.positive("transmitter.power", self.transmitter.power);

        self.receiver.station.check_bounds(RECEIVER_FIELDS, validator);
        validator.positive("receiver.system_noise_temp", self.receiver.system_noise_temp);
    }
}

/// _(Optional)_ Weather conditions at the transmitting station.
///
/// Only used for the rain fade advisory, the numeric
/// link budget is computed for clear sky.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Deserialize)]
pub struct RainConditions {
    /// _(Optional)_ Rain rate in mm/h. Cannot be negative. Defaults to `0.0`.
    #[serde(default)]
    pub rain_rate: Float,

    /// _(Optional)_ Polarization tilt angle in degrees
    /// (0 horizontal, 45 circular, 90 vertical). Defaults to `45.0`.
    #[serde(default = "RainConditions::default_polarization_tilt")]
    pub polarization_tilt: Float,
}

impl RainConditions {
    fn default_polarization_tilt() -> Float {
        45.0
    }

    pub(in crate::model) fn check_bounds(&self, validator: &mut Validator) {
        validator.non_negative("conditions.rain_rate", self.rain_rate);
        validator.within(
            "conditions.polarization_tilt",
            self.polarization_tilt,
            0.0..=90.0,
        );
    }

    pub fn is_raining(&self) -> bool {
        self.rain_rate > 0.0
    }
}

impl Default for RainConditions {
    fn default() -> Self {
        RainConditions {
            rain_rate: 0.0,
            polarization_tilt: RainConditions::default_polarization_tilt(),
        }
    }
}

/// Names of station fields as reported in violations.
#[derive(Copy, Clone, Debug)]
struct StationFields {
    latitude: &'static str,
    longitude: &'static str,
    antenna_diameter: &'static str,
    antenna_efficiency: &'static str,
    frequency: &'static str,
    pointing_error: &'static str,
}

const TRANSMITTER_FIELDS: StationFields = StationFields {
    latitude: "transmitter.latitude",
    longitude: "transmitter.longitude",
    antenna_diameter: "transmitter.antenna_diameter",
    antenna_efficiency: "transmitter.antenna_efficiency",
    frequency: "transmitter.frequency",
    pointing_error: "transmitter.pointing_error",
};

const RECEIVER_FIELDS: StationFields = StationFields {
    latitude: "receiver.latitude",
    longitude: "receiver.longitude",
    antenna_diameter: "receiver.antenna_diameter",
    antenna_efficiency: "receiver.antenna_efficiency",
    frequency: "receiver.frequency",
    pointing_error: "receiver.pointing_error",
};

/// Collects violations instead of stopping at the first one.
#[derive(Clone, PartialEq, Debug, Default)]
pub(in crate::model) struct Validator {
    violations: Vec<Violation>,
}

impl Validator {
    fn push(&mut self, field: &'static str, value: Float, constraint: &'static str) {
        self.violations.push(Violation {
            field,
            value,
            constraint,
        });
    }

    fn within(&mut self, field: &'static str, value: Float, range: RangeInclusive<Float>) {
        if !value.is_finite() {
            self.push(field, value, "must be a finite number");
        } else if !range.contains(&value) {
            self.push(field, value, "out of allowed range");
        }
    }

    fn positive(&mut self, field: &'static str, value: Float) {
        if !value.is_finite() {
            self.push(field, value, "must be a finite number");
        } else if value <= 0.0 {
            self.push(field, value, "must be positive");
        }
    }

    fn non_negative(&mut self, field: &'static str, value: Float) {
        if !value.is_finite() {
            self.push(field, value, "must be a finite number");
        } else if value < 0.0 {
            self.push(field, value, "cannot be negative");
        }
    }

    pub(in crate::model) fn finish(self) -> Result<(), ValidationError> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                violations: self.violations,
            })
        }
    }
}

#[cfg(test)]
pub(in crate::model) mod tests {
    use super::*;

    pub(in crate::model) fn satellite(longitude: Float) -> SatelliteParameters {
        SatelliteParameters {
            longitude,
            rx_gain: SatelliteParameters::default_rx_gain(),
            noise_temp: SatelliteParameters::default_noise_temp(),
            tx_power: SatelliteParameters::default_tx_power(),
            tx_gain: SatelliteParameters::default_tx_gain(),
        }
    }

    pub(in crate::model) fn station(latitude: Float, longitude: Float) -> GroundStation {
        GroundStation {
            latitude,
            longitude,
            antenna_diameter: 2.4,
            antenna_efficiency: 65.0,
            frequency: 14.0,
            pointing_error: 0.2,
        }
    }

    /// Default scenario of the original link form.
    pub(in crate::model) fn madrid_los_angeles() -> LinkBudgetInputs {
        LinkBudgetInputs {
            satellite: satellite(-61.0),
            transmitter: TransmitStation {
                station: station(40.41, -3.70),
                power: 100.0,
            },
            receiver: ReceiveStation {
                station: GroundStation {
                    latitude: 34.05,
                    longitude: -118.24,
                    antenna_diameter: 1.8,
                    antenna_efficiency: 65.0,
                    frequency: 12.0,
                    pointing_error: 0.2,
                },
                system_noise_temp: 150.0,
            },
        }
    }

    fn fields(err: &ValidationError) -> Vec<&'static str> {
        err.violations.iter().map(|v| v.field).collect()
    }

    #[test]
    fn valid_inputs() {
        assert!(madrid_los_angeles().validate().is_ok());
    }

    #[test]
    fn satellite_defaults() {
        let sat = satellite(10.0);

        assert_eq!(sat.rx_gain, 35.0);
        assert_eq!(sat.noise_temp, 500.0);
        assert_eq!(sat.tx_power, 20.0);
        assert_eq!(sat.tx_gain, 35.0);
    }

    #[test]
    fn negative_diameter() {
        let mut inputs = madrid_los_angeles();
        inputs.transmitter.station.antenna_diameter = -1.0;

        let err = inputs.validate().unwrap_err();
        assert_eq!(fields(&err), vec!["transmitter.antenna_diameter"]);
    }

    #[test]
    fn all_violations_reported() {
        let mut inputs = madrid_los_angeles();
        inputs.satellite.longitude = 200.0;
        inputs.transmitter.station.latitude = -91.0;
        inputs.transmitter.power = 0.0;
        inputs.receiver.station.antenna_efficiency = 101.0;
        inputs.receiver.station.pointing_error = -0.1;
        inputs.receiver.system_noise_temp = Float::NAN;

        let err = inputs.validate().unwrap_err();
        assert_eq!(
            fields(&err),
            vec![
                "satellite.longitude",
                "transmitter.latitude",
                "transmitter.power",
                "receiver.antenna_efficiency",
                "receiver.pointing_error",
                "receiver.system_noise_temp",
            ]
        );

        let message = err.to_string();
        assert!(message.starts_with("6 invalid input field(s)"));
        assert!(message.contains("receiver.system_noise_temp = NaN (must be a finite number)"));
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let mut inputs = madrid_los_angeles();
        inputs.satellite.longitude = -180.0;
        inputs.transmitter.station.latitude = 90.0;
        inputs.receiver.station.longitude = 180.0;
        inputs.receiver.station.antenna_efficiency = 0.0;
        inputs.receiver.station.pointing_error = 0.0;

        assert!(inputs.validate().is_ok());
    }

    #[test]
    fn conditions_bounds() {
        let mut validator = Validator::default();
        RainConditions {
            rain_rate: -1.0,
            polarization_tilt: 91.0,
        }
        .check_bounds(&mut validator);

        let err = validator.finish().unwrap_err();
        assert_eq!(
            fields(&err),
            vec!["conditions.rain_rate", "conditions.polarization_tilt"]
        );

        let mut validator = Validator::default();
        RainConditions::default().check_bounds(&mut validator);
        assert!(validator.finish().is_ok());
    }

    #[test]
    fn deserialize_link() {
        let yaml = "
satellite:
  longitude: -61.0
  rx_gain: 99.0
transmitter:
  latitude: 40.41
  longitude: -3.70
  antenna_diameter: 2.4
  antenna_efficiency: 65
  frequency: 14
  pointing_error: 0.2
  power: 100
receiver:
  latitude: 34.05
  longitude: -118.24
  antenna_diameter: 1.8
  antenna_efficiency: 65
  frequency: 12
  pointing_error: 0.2
  system_noise_temp: 150
";
        let inputs: LinkBudgetInputs = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(inputs, madrid_los_angeles());
        // transponder cannot be overridden from the configuration
        assert_eq!(inputs.satellite.rx_gain, 35.0);
    }
}
