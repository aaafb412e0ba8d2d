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

use crate::Float;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Error while reading configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Error while creating ThreadPool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Error while handling output: {0}")]
    Output(#[from] std::io::Error),

    #[error("Error while writing CSV output: {0}")]
    Csv(#[from] csv::Error),

    #[error("Output directory is faulty: {0}")]
    FaultyOutput(&'static str),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot open configuration file: {0}")]
    CantOpenFile(#[from] std::io::Error),

    #[error("Cannot deserialize configuration file: {0}")]
    CantDeserialize(#[from] serde_yaml::Error),

    #[error("Configuration component is out of bounds {0}")]
    OutOfBounds(&'static str),

    #[error("Link name {0} is used more than once")]
    DuplicateLink(String),
}

/// Single broken constraint of link input.
#[derive(Error, Clone, PartialEq, Debug)]
#[error("{field} = {value} ({constraint})")]
pub struct Violation {
    pub field: &'static str,
    pub value: Float,
    pub constraint: &'static str,
}

/// Aggregate validation failure naming every violated field.
#[derive(Error, Clone, PartialEq, Debug)]
#[error("{} invalid input field(s): {}", .violations.len(), join_violations(.violations))]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(Violation::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Error, Debug)]
pub enum AdvisoryError {
    #[error("Rain fade advisor is not configured")]
    NotConfigured,

    #[error("Cannot run rain fade advisor: {0}")]
    CantSpawn(#[from] std::io::Error),

    #[error("Rain fade advisor exited with {0}")]
    Failed(std::process::ExitStatus),

    #[error("Cannot exchange data with rain fade advisor: {0}")]
    Protocol(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::{ValidationError, Violation};
    use crate::Float;

    #[test]
    fn validation_message_lists_fields() {
        let err = ValidationError {
            violations: vec![
                Violation {
                    field: "transmitter.antenna_diameter",
                    value: -1.0,
                    constraint: "must be positive",
                },
                Violation {
                    field: "receiver.system_noise_temp",
                    value: Float::NAN,
                    constraint: "must be a finite number",
                },
            ],
        };

        assert_eq!(
            err.to_string(),
            "2 invalid input field(s): transmitter.antenna_diameter = -1 (must be positive); \
             receiver.system_noise_temp = NaN (must be a finite number)"
        );
    }
}
