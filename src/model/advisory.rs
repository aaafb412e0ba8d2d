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

//! Rain fade advisory requested from an external advisor.
//!
//! The advisor is a black box: it receives link parameters
//! and answers whether rain will affect the connection and
//! what adjustments could help. The advisory is best-effort
//! and never changes the numeric link budget.

use crate::errors::AdvisoryError;
use crate::model::link::{LinkBudget, LinkBudgetInputs, RainConditions};
use crate::Float;
use log::debug;
use serde::{Deserialize, Serialize};
use std::{
    io::Write,
    process::{Command, Stdio},
};

/// Parameters passed to the advisor.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Serialize)]
pub struct RainFadeQuery {
    #[serde(rename = "frequencyGHz")]
    pub frequency: Float,

    #[serde(rename = "elevationAngleDegrees")]
    pub elevation: Float,

    #[serde(rename = "rainRateMmHr")]
    pub rain_rate: Float,

    #[serde(rename = "polarizationTiltAngleDegrees")]
    pub polarization_tilt: Float,

    #[serde(rename = "siteLatitudeDegrees")]
    pub site_latitude: Float,

    #[serde(rename = "siteLongitudeDegrees")]
    pub site_longitude: Float,
}

/// Answer of the advisor.
#[derive(Clone, PartialEq, Eq, Debug, Deserialize)]
pub struct RainFadeAdvice {
    #[serde(rename = "willRainAffectConnection")]
    pub will_affect_connection: bool,

    #[serde(rename = "suggestedAdjustments")]
    pub suggested_adjustments: String,
}

/// Source of rain fade advisories.
pub trait RainFadeAdvisor {
    fn advise(&self, query: &RainFadeQuery) -> Result<RainFadeAdvice, AdvisoryError>;
}

/// Advisor used when none is configured, every request fails.
#[derive(Copy, Clone, Debug, Default)]
pub struct DisabledAdvisor;

impl RainFadeAdvisor for DisabledAdvisor {
    fn advise(&self, _query: &RainFadeQuery) -> Result<RainFadeAdvice, AdvisoryError> {
        Err(AdvisoryError::NotConfigured)
    }
}

/// Advisor running an external program for each request.
///
/// The query is written to the program stdin as JSON object
/// and the advice is read from its stdout as JSON object.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CommandAdvisor {
    program: String,
    args: Vec<String>,
}

impl CommandAdvisor {
    pub fn new(program: String, args: Vec<String>) -> Self {
        CommandAdvisor { program, args }
    }
}

impl RainFadeAdvisor for CommandAdvisor {
    fn advise(&self, query: &RainFadeQuery) -> Result<RainFadeAdvice, AdvisoryError> {
        debug!("Running rain fade advisor {}", self.program);

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()?;

        // stdin must be closed before waiting, otherwise
        // advisor reading until EOF would never finish
        if let Some(mut stdin) = child.stdin.take() {
            serde_json::to_writer(&mut stdin, query)?;
            stdin.write_all(b"\n")?;
        }

        let output = child.wait_with_output()?;

        if !output.status.success() {
            return Err(AdvisoryError::Failed(output.status));
        }

        let advice = serde_json::from_slice(&output.stdout)?;

        Ok(advice)
    }
}

/// Asks the advisor about rain fade on the uplink.
///
/// Returns `None` without contacting the advisor when it is not raining.
/// Otherwise the advisor is asked exactly once, with the elevation
/// already computed for the transmitting station.
pub fn request_advisory(
    advisor: &dyn RainFadeAdvisor,
    inputs: &LinkBudgetInputs,
    conditions: &RainConditions,
    budget: &LinkBudget,
) -> Option<Result<RainFadeAdvice, AdvisoryError>> {
    if !conditions.is_raining() {
        return None;
    }

    let station = &inputs.transmitter.station;

    let query = RainFadeQuery {
        frequency: station.frequency,
        elevation: budget.tx.geometry.elevation,
        rain_rate: conditions.rain_rate,
        polarization_tilt: conditions.polarization_tilt,
        site_latitude: station.latitude,
        site_longitude: station.longitude,
    };

    Some(advisor.advise(&query))
}
