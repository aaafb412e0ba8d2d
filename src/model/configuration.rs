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

//! Module responsible for parsing and checking the configuration file.
//!
//! To provide meaningful error messages. The configuration file uses
//! [YAML](https://en.wikipedia.org/wiki/YAML) and `serde` to enforce
//! strong typing and automatic type checking.
//!
//! The structures and their fields in this module directly correspond to
//! the fields inside `config.yaml` so you can check this documentation
//! for more details how to set the config file.
//!
//! Structural problems of the configuration stop the model. Numeric
//! inputs of the links are checked separately for each link, so that
//! one broken link does not prevent computing the others.

use crate::errors::{ConfigError, ValidationError};
use crate::model::advisory::{CommandAdvisor, DisabledAdvisor, RainFadeAdvisor};
use crate::model::link::{inputs::Validator, LinkBudgetInputs, RainConditions};
use serde::Deserialize;
use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

/// Single link scenario.
#[derive(Clone, PartialEq, PartialOrd, Debug, Deserialize)]
pub struct Link {
    /// Name identifying the link in the output.
    pub name: String,

    /// Satellite, transmitting and receiving station.
    #[serde(flatten)]
    pub inputs: LinkBudgetInputs,

    /// _(Optional)_ Weather at the transmitting station.
    /// Defaults to no rain.
    #[serde(default)]
    pub conditions: RainConditions,
}

impl Link {
    /// Checks all numeric inputs of the link, including conditions,
    /// and reports every violated field at once.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut validator = Validator::default();

        self.inputs.check_bounds(&mut validator);
        self.conditions.check_bounds(&mut validator);

        validator.finish()
    }
}

/// _(Optional)_ Fields with information about the rain fade advisor.
#[derive(Clone, PartialEq, PartialOrd, Debug, Deserialize)]
pub struct Advisory {
    /// Program and its arguments run for each advisory request.
    ///
    /// The program receives the query on stdin as JSON object and
    /// must print the advice on stdout as JSON object.
    pub command: Vec<String>,
}

impl Advisory {
    pub fn check_bounds(&self) -> Result<(), ConfigError> {
        match self.command.first() {
            Some(program) if !program.trim().is_empty() => Ok(()),
            _ => Err(ConfigError::OutOfBounds(
                "Advisory command cannot be empty",
            )),
        }
    }
}

/// _(Optional)_ Fields with information about
/// resources available for model.
#[derive(Clone, PartialEq, PartialOrd, Debug, Deserialize)]
pub struct Resources {
    /// _(Optional)_ Thread count used by the model.
    /// The thread pool initiated by this model will use
    /// up to this number of workers.
    ///
    /// Cannot be less than `1`. Defaults to `1`.
    #[serde(default = "Resources::default_threads")]
    pub threads: u16,
}

impl Resources {
    fn default_threads() -> u16 {
        1
    }

    /// Checks if thread count is above limit.
    pub fn check_bounds(&self) -> Result<(), ConfigError> {
        if self.threads < 1 {
            return Err(ConfigError::OutOfBounds(
                "Available threads cannot be less than 1",
            ));
        }

        Ok(())
    }
}

impl Default for Resources {
    fn default() -> Self {
        Resources {
            threads: Resources::default_threads(),
        }
    }
}

/// _(Optional)_ Fields with information about model output.
#[derive(Clone, PartialEq, PartialOrd, Debug, Deserialize)]
pub struct Output {
    /// _(Optional)_ Directory to which result files are written.
    /// Created when it does not exist. Defaults to `./output`.
    #[serde(default = "Output::default_directory")]
    pub directory: PathBuf,
}

impl Output {
    fn default_directory() -> PathBuf {
        PathBuf::from("./output")
    }
}

impl Default for Output {
    fn default() -> Self {
        Output {
            directory: Output::default_directory(),
        }
    }
}

/// Main config structure representing the fields in
/// configuration file.
#[derive(Clone, PartialEq, PartialOrd, Debug, Deserialize)]
pub struct Config {
    pub links: Vec<Link>,

    #[serde(default)]
    pub advisory: Option<Advisory>,

    #[serde(default)]
    pub resources: Resources,

    #[serde(default)]
    pub output: Output,
}

impl Config {
    /// Config structure constructor, responsible for
    /// deserializing configuration and checking it.
    pub fn new_from_file(file_path: &Path) -> Result<Config, ConfigError> {
        let data = fs::read(file_path)?;
        let config: Config = serde_yaml::from_slice(data.as_slice())?;

        config.check_bounds()?;

        Ok(config)
    }

    fn check_bounds(&self) -> Result<(), ConfigError> {
        if self.links.is_empty() {
            return Err(ConfigError::OutOfBounds(
                "At least one link must be specified",
            ));
        }

        let mut names = HashSet::with_capacity(self.links.len());
        for link in &self.links {
            if !names.insert(link.name.as_str()) {
                return Err(ConfigError::DuplicateLink(link.name.clone()));
            }
        }

        if let Some(advisory) = &self.advisory {
            advisory.check_bounds()?;
        }

        self.resources.check_bounds()?;

        Ok(())
    }

    /// Creates the rain fade advisor described by configuration.
    pub fn advisor(&self) -> Box<dyn RainFadeAdvisor> {
        let command = self
            .advisory
            .as_ref()
            .and_then(|advisory| advisory.command.split_first());

        match command {
            Some((program, args)) => Box::new(CommandAdvisor::new(program.clone(), args.to_vec())),
            None => Box::new(DisabledAdvisor),
        }
    }
}
