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

//! Composition of geometry, path loss and antenna models
//! into the uplink and downlink budget of a transparent
//! geostationary transponder.

use super::antenna::{antenna_gain_db, pointing_loss_db};
use super::geometry::{resolve_geometry, LookAngles};
use super::inputs::{GroundStation, LinkBudgetInputs};
use super::path_loss::free_space_loss_db;
use crate::constants::BOLTZMANN_DB;
use crate::errors::ValidationError;
use crate::Float;
use log::debug;

/// Direction of a link leg.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Leg {
    Uplink,
    Downlink,
}

impl Leg {
    pub fn name(self) -> &'static str {
        match self {
            Leg::Uplink => "uplink",
            Leg::Downlink => "downlink",
        }
    }
}

/// Result of a single link leg. Geometry always refers
/// to the ground station of that leg.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug)]
pub struct LegResult {
    pub leg: Leg,
    pub geometry: LookAngles,

    /// Free-space loss in dB.
    pub fsl: Float,

    /// Figure of merit of the receiving end in dB/K.
    pub gt: Float,

    /// Carrier to noise density ratio in dB·Hz.
    pub cn0: Float,

    /// Pointing loss of the ground station antenna in dB.
    pub pointing_loss: Float,
}

/// Both legs of the link.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug)]
pub struct LinkBudget {
    /// Uplink, ground to satellite.
    pub tx: LegResult,

    /// Downlink, satellite to ground.
    pub rx: LegResult,

    /// Uplink EIRP in dBW.
    pub uplink_eirp: Float,

    /// Downlink EIRP in dBW.
    pub downlink_eirp: Float,
}

/// Computes the complete link budget.
///
/// Inputs are validated first and nothing is computed when any
/// of them is out of bounds, so there are no partial results.
pub fn compute_link_budget(inputs: &LinkBudgetInputs) -> Result<LinkBudget, ValidationError> {
    inputs.validate()?;

    let satellite = &inputs.satellite;
    let tx_station = &inputs.transmitter.station;
    let rx_station = &inputs.receiver.station;

    let tx_geometry = resolve_geometry(tx_station.latitude, tx_station.longitude, satellite.longitude);
    let rx_geometry = resolve_geometry(rx_station.latitude, rx_station.longitude, satellite.longitude);

    let tx_gain = station_gain(tx_station);
    let rx_gain = station_gain(rx_station);
    debug!("Ground antenna gains: tx {:.4} dBi, rx {:.4} dBi", tx_gain, rx_gain);

    let satellite_gt = figure_of_merit(satellite.rx_gain, satellite.noise_temp);

    let uplink_fsl = free_space_loss_db(tx_station.frequency, tx_geometry.range);
    let uplink_eirp = eirp(inputs.transmitter.power, tx_gain);
    let uplink_cn0 = carrier_to_noise_density(uplink_eirp, uplink_fsl, satellite_gt);

    let downlink_gt = figure_of_merit(rx_gain, inputs.receiver.system_noise_temp);
    let downlink_fsl = free_space_loss_db(rx_station.frequency, rx_geometry.range);
    let downlink_eirp = eirp(satellite.tx_power, satellite.tx_gain);
    let downlink_cn0 = carrier_to_noise_density(downlink_eirp, downlink_fsl, downlink_gt);

    Ok(LinkBudget {
        tx: LegResult {
            leg: Leg::Uplink,
            geometry: tx_geometry,
            fsl: uplink_fsl,
            gt: satellite_gt,
            cn0: uplink_cn0,
            pointing_loss: station_pointing_loss(tx_station),
        },
        rx: LegResult {
            leg: Leg::Downlink,
            geometry: rx_geometry,
            fsl: downlink_fsl,
            gt: downlink_gt,
            cn0: downlink_cn0,
            pointing_loss: station_pointing_loss(rx_station),
        },
        uplink_eirp,
        downlink_eirp,
    })
}

fn station_gain(station: &GroundStation) -> Float {
    antenna_gain_db(
        station.antenna_diameter,
        station.frequency,
        station.antenna_efficiency,
    )
}

fn station_pointing_loss(station: &GroundStation) -> Float {
    pointing_loss_db(
        station.pointing_error,
        station.antenna_diameter,
        station.frequency,
    )
}

/// G/T in dB/K for antenna gain in dBi and noise temperature in K.
fn figure_of_merit(gain: Float, noise_temp: Float) -> Float {
    gain - 10.0 * noise_temp.log10()
}

/// EIRP in dBW for power in W and antenna gain in dBi.
fn eirp(power: Float, gain: Float) -> Float {
    10.0 * power.log10() + gain
}

/// C/N₀ in dB·Hz.
fn carrier_to_noise_density(eirp: Float, fsl: Float, gt: Float) -> Float {
    eirp - fsl + gt - BOLTZMANN_DB
}
