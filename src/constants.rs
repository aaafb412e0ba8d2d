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

//! Module containing constants used by the model.

use crate::Float;

///Mean Earth radius (km) of the spherical Earth model
pub const EARTH_RADIUS: Float = 6371.0;

///Altitude (km) of the geostationary orbit above the surface
pub const GEOSTATIONARY_ALTITUDE: Float = 35_786.0;

///Geostationary orbit radius (km) measured from the Earth centre
pub const GEOSTATIONARY_RADIUS: Float = EARTH_RADIUS + GEOSTATIONARY_ALTITUDE;

///Speed of light in vacuum (m/s)
pub const SPEED_OF_LIGHT: Float = 299_792_458.0;

///Boltzmann constant in dBW/K/Hz
pub const BOLTZMANN_DB: Float = -228.6;

///Free-space loss constant for range in km and frequency in GHz
///
///`20log10(4π/c)` with unit conversions folded in.
pub const FSL_CONSTANT_DB: Float = 92.45;

///Empirical factor of the parabolic antenna 3 dB beamwidth
///`θ = 70 / (f·D)` (degrees, GHz, m)
pub const BEAMWIDTH_FACTOR: Float = 70.0;

///Coefficient of the parabolic pointing loss model `12(e/θ)²`
pub const POINTING_LOSS_FACTOR: Float = 12.0;

///Satellite transponder receive antenna gain (dBi)
pub const SATELLITE_RX_GAIN: Float = 35.0;

///Satellite transponder system noise temperature (K)
pub const SATELLITE_NOISE_TEMP: Float = 500.0;

///Satellite transponder transmit power (W)
pub const SATELLITE_TX_POWER: Float = 20.0;

///Satellite transponder transmit antenna gain (dBi)
pub const SATELLITE_TX_GAIN: Float = 35.0;
