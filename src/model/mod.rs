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

//! Module containing the actual model code.
//!
//! Every link from the configuration is checked and its budget is
//! computed on the threadpool. Budgets are logged and saved before
//! the rain fade advisor is asked about links with rain, so a slow
//! or failing advisor never holds back the numeric results.

mod advisory;
mod configuration;
mod link;
mod output;


use crate::{
    errors::ModelError,
    model::{
        advisory::{request_advisory, RainFadeAdvisor},
        configuration::{Config, Link},
        link::{compute_link_budget, LinkBudget},
        output::LinkReport,
    },
};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::{
    path::{Path, PathBuf},
    sync::mpsc,
};

/// Main model function, responsible for all computation steps.
///
/// It reads the provided configuration, computes budgets of all
/// links, requests advisories and writes the output.
pub fn main(config_path: &Path) -> Result<(), ModelError> {
    info!("Preparing the model core");

    let model_core = Core::new(config_path)?;
    let out_dir = &model_core.config.output.directory;

    output::prepare_output_dir(out_dir)?;

    let advisor = model_core.config.advisor();
    let written = run_links(
        &model_core.config,
        &model_core.threadpool,
        advisor.as_ref(),
        out_dir,
    )?;

    let advised = written
        .reports
        .iter()
        .filter(|report| report.advice.is_some())
        .count();
    info!("Received {} rain fade advisories", advised);

    for path in written.files {
        debug!("Saved {}", path.display());
    }

    Ok(())
}

/// Reports of all computed links and output files written for them.
#[derive(Debug)]
struct RunOutput {
    reports: Vec<LinkReport>,
    files: Vec<PathBuf>,
}

/// Structure containing model parameters.
///
/// Configuration and the threadpool are prepared once
/// before any link is computed.
#[derive(Debug)]
pub struct Core {
    pub config: Config,
    pub threadpool: ThreadPool,
}

impl Core {
    /// Model [`Core`] constructor.
    ///
    /// Before the computation can start configuration provided
    /// by the user must be loaded and checked.
    pub fn new(config_path: &Path) -> Result<Self, ModelError> {
        debug!("Reading configuration from {}", config_path.display());
        let config = Config::new_from_file(config_path)?;

        debug!("Setting up ThreadPool");
        let threadpool = ThreadPoolBuilder::new()
            .num_threads(config.resources.threads as usize)
            .build()?;

        Ok(Core { config, threadpool })
    }
}

/// Computes budgets of all valid links, saves them and only
/// then requests advisories for those with rain.
///
/// Links with invalid inputs are reported and skipped,
/// order of the remaining links is preserved.
fn run_links(
    config: &Config,
    threadpool: &ThreadPool,
    advisor: &dyn RainFadeAdvisor,
    out_dir: &Path,
) -> Result<RunOutput, ModelError> {
    let time_stamp = output::time_stamp();
    let budgets = compute_budgets(&config.links, threadpool);

    info!("Computed {} of {} links", budgets.len(), config.links.len());

    let mut reports: Vec<LinkReport> = budgets
        .iter()
        .map(|(link, budget)| LinkReport {
            name: link.name.clone(),
            budget: *budget,
            advice: None,
        })
        .collect();

    output::log_budgets(&reports);

    info!("Writing link budgets");
    let mut files = vec![output::save_budgets(&reports, out_dir, &time_stamp)?];

    for ((link, budget), report) in budgets.iter().zip(reports.iter_mut()) {
        report.advice = match request_advisory(advisor, &link.inputs, &link.conditions, budget) {
            Some(Ok(advice)) => Some(advice),
            Some(Err(err)) => {
                warn!(
                    "Rain fade advisory for link {} is not available: {}",
                    link.name, err
                );
                None
            }
            None => None,
        };
    }

    output::log_advices(&reports);

    if let Some(advice_path) = output::save_advices(&reports, out_dir, &time_stamp)? {
        files.push(advice_path);
    }

    Ok(RunOutput { reports, files })
}

/// Deploys valid links onto the threadpool and gathers their budgets.
fn compute_budgets<'a>(links: &'a [Link], threadpool: &ThreadPool) -> Vec<(&'a Link, LinkBudget)> {
    info!("Computing link budgets");

    let links_bar = ProgressBar::new(links.len() as u64);
    links_bar.set_style(
        ProgressStyle::default_bar()
            .template("{prefix} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")
            .progress_chars("#>-"),
    );
    links_bar.set_prefix("Computed links");

    let (tx, rx) = mpsc::channel();

    for (index, link) in links.iter().enumerate() {
        if let Err(err) = link.validate() {
            error!("Link {} rejected due to invalid input: {}", link.name, err);
            links_bar.inc(1);
            continue;
        }

        let tx = tx.clone();
        let inputs = link.inputs;

        threadpool.spawn(move || {
            // receiver lives until every sender is dropped
            let _ = tx.send((index, compute_link_budget(&inputs)));
        });
    }

    drop(tx);

    let mut budgets = Vec::with_capacity(links.len());

    for (index, result) in rx {
        match result {
            Ok(budget) => budgets.push((index, budget)),
            Err(err) => error!(
                "Link {} budget computation failed: {}",
                links[index].name, err
            ),
        }
        links_bar.inc(1);
    }

    links_bar.finish_with_message("All links finished");

    budgets.sort_by_key(|(index, _)| *index);

    budgets
        .into_iter()
        .map(|(index, budget)| (&links[index], budget))
        .collect()
}
