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

//! SatLink Analyzer (SLA) is a link budget calculator
//! for geostationary satellite links.
//!
//! For every link scenario listed in the configuration file
//! the model computes pointing geometry, free-space loss, G/T,
//! C/N₀ and pointing loss of both uplink and downlink leg,
//! and optionally asks an external advisor about rain fade.
//!
//! All geometry assumes an idealised spherical Earth and a satellite
//! on the equatorial geostationary orbit.

mod constants;
mod errors;
mod model;

use env_logger::Env;
use log::{error, info};
use std::{env, path::PathBuf};

type Float = f64;

/// The main program function.
/// Prepares the runtime environment and calls the [`model::main`].
///
/// To provide meaningful and high-quality error messages the `env_logger`
/// needs to be initiated before any log messages are possible to occur.
fn main() {
    #[cfg(not(feature = "debug"))]
    let logger_env = Env::new().filter_or("SATLINK_LOG_LEVEL", "info");

    #[cfg(feature = "debug")]
    let logger_env = Env::new().filter_or("SATLINK_LOG_LEVEL", "debug");

    env_logger::Builder::from_env(logger_env)
        .format_timestamp_millis()
        .init();

    let config_path = config_path(env::args());

    match model::main(&config_path) {
        Ok(_) => info!("Link budget computation finished. Check the output directory and log."),
        Err(err) => error!("Link budget computation failed with error: {}", err),
    }
}

/// First positional argument overrides the default config location.
fn config_path(mut args: impl Iterator<Item = String>) -> PathBuf {
    args.nth(1)
        .map_or_else(|| PathBuf::from("config.yaml"), PathBuf::from)
}
