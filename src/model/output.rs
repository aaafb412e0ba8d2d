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

//! Presentation of computed link budgets.
//!
//! Here (and only here) values are rounded to two decimal
//! digits and tagged with units. Results are written to CSV
//! files in the output directory and summarised in the log.

use crate::errors::ModelError;
use crate::model::advisory::RainFadeAdvice;
use crate::model::link::{LegResult, LinkBudget};
use crate::Float;
use chrono::Local;
use log::{debug, info, warn};
use serde::Serialize;
use std::{fmt, fs, path::Path, path::PathBuf};

/// Units of presented quantities.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Unit {
    Degree,
    Kilometre,
    Decibel,
    DecibelPerKelvin,
    DecibelHertz,
    DecibelWatt,
}

impl Unit {
    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Degree => "°",
            Unit::Kilometre => "km",
            Unit::Decibel => "dB",
            Unit::DecibelPerKelvin => "dB/K",
            Unit::DecibelHertz => "dB·Hz",
            Unit::DecibelWatt => "dBW",
        }
    }
}

/// Value with unit, displayed with two decimal digits.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug)]
pub struct Quantity {
    pub value: Float,
    pub unit: Unit,
}

impl Quantity {
    pub fn new(value: Float, unit: Unit) -> Self {
        Quantity { value, unit }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", format_value(self.value), self.unit.symbol())
    }
}

/// Formats value with two decimal digits. Special values of
/// indeterminate geometry are written as they are.
pub fn format_value(value: Float) -> String {
    format!("{:.2}", value)
}

/// Classification of leg geometry shown next to the numbers.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum GeometryStatus {
    Ok,
    NegativeElevation,
    Indeterminate,
}

impl GeometryStatus {
    pub fn of(leg: &LegResult) -> Self {
        if leg.geometry.indeterminate {
            GeometryStatus::Indeterminate
        } else if leg.geometry.has_negative_elevation() {
            GeometryStatus::NegativeElevation
        } else {
            GeometryStatus::Ok
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            GeometryStatus::Ok => "ok",
            GeometryStatus::NegativeElevation => "negative-elevation",
            GeometryStatus::Indeterminate => "indeterminate",
        }
    }

    /// Log message for flagged geometry.
    pub fn warning(self) -> Option<&'static str> {
        match self {
            GeometryStatus::Ok => None,
            GeometryStatus::NegativeElevation => {
                Some("negative elevation (sign follows the station hemisphere)")
            }
            GeometryStatus::Indeterminate => {
                Some("station on the equator, elevation is indeterminate")
            }
        }
    }
}

/// Presentation of a single leg.
#[derive(Clone, PartialEq, PartialOrd, Debug)]
pub struct LegReport {
    pub azimuth: Quantity,
    pub elevation: Quantity,
    pub range: Quantity,
    pub fsl: Quantity,
    pub gt: Quantity,
    pub cn0: Quantity,
    pub pointing_loss: Quantity,
    pub status: GeometryStatus,
}

impl LegReport {
    pub fn new(leg: &LegResult) -> Self {
        LegReport {
            azimuth: Quantity::new(leg.geometry.azimuth, Unit::Degree),
            elevation: Quantity::new(leg.geometry.elevation, Unit::Degree),
            range: Quantity::new(leg.geometry.range, Unit::Kilometre),
            fsl: Quantity::new(leg.fsl, Unit::Decibel),
            gt: Quantity::new(leg.gt, Unit::DecibelPerKelvin),
            cn0: Quantity::new(leg.cn0, Unit::DecibelHertz),
            pointing_loss: Quantity::new(leg.pointing_loss, Unit::Decibel),
            status: GeometryStatus::of(leg),
        }
    }
}

impl fmt::Display for LegReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "az {}, el {}, range {}, FSL {}, G/T {}, C/N0 {}, pointing loss {}",
            self.azimuth,
            self.elevation,
            self.range,
            self.fsl,
            self.gt,
            self.cn0,
            self.pointing_loss
        )?;

        if self.status != GeometryStatus::Ok {
            write!(f, " [{}]", self.status.label())?;
        }

        Ok(())
    }
}

/// Link budget of a named link ready to be saved.
#[derive(Clone, PartialEq, Debug)]
pub struct LinkReport {
    pub name: String,
    pub budget: LinkBudget,
    pub advice: Option<RainFadeAdvice>,
}

/// Columns of the link budget CSV file, in [`LegRecord`] field order.
const BUDGET_HEADER: [&str; 10] = [
    "link",
    "leg",
    "azimuth_deg",
    "elevation_deg",
    "range_km",
    "fsl_db",
    "gt_dbk",
    "cn0_dbhz",
    "pointing_loss_db",
    "geometry",
];

/// Row of the link budget CSV file.
#[derive(Serialize)]
struct LegRecord<'a> {
    link: &'a str,
    leg: &'static str,
    azimuth_deg: String,
    elevation_deg: String,
    range_km: String,
    fsl_db: String,
    gt_dbk: String,
    cn0_dbhz: String,
    pointing_loss_db: String,
    geometry: &'static str,
}

impl<'a> LegRecord<'a> {
    fn new(link: &'a str, leg: &LegResult) -> Self {
        let report = LegReport::new(leg);

        LegRecord {
            link,
            leg: leg.leg.name(),
            azimuth_deg: format_value(report.azimuth.value),
            elevation_deg: format_value(report.elevation.value),
            range_km: format_value(report.range.value),
            fsl_db: format_value(report.fsl.value),
            gt_dbk: format_value(report.gt.value),
            cn0_dbhz: format_value(report.cn0.value),
            pointing_loss_db: format_value(report.pointing_loss.value),
            geometry: report.status.label(),
        }
    }
}

/// Row of the rain fade CSV file.
#[derive(Serialize)]
struct AdviceRecord<'a> {
    link: &'a str,
    will_affect_connection: bool,
    suggested_adjustments: &'a str,
}

/// Writes computed budgets of all links to the log.
pub fn log_budgets(reports: &[LinkReport]) {
    for report in reports {
        for leg in [&report.budget.tx, &report.budget.rx] {
            let leg_report = LegReport::new(leg);

            if let Some(warning) = leg_report.status.warning() {
                warn!("Link {} {}: {}", report.name, leg.leg.name(), warning);
            }

            info!("Link {} {}: {}", report.name, leg.leg.name(), leg_report);
        }

        info!(
            "Link {} EIRP: uplink {}, downlink {}",
            report.name,
            Quantity::new(report.budget.uplink_eirp, Unit::DecibelWatt),
            Quantity::new(report.budget.downlink_eirp, Unit::DecibelWatt)
        );
    }
}

/// Writes received rain fade advisories to the log.
pub fn log_advices(reports: &[LinkReport]) {
    for report in reports {
        if let Some(advice) = &report.advice {
            info!(
                "Link {} rain fade: affects connection: {}, suggested adjustments: {}",
                report.name, advice.will_affect_connection, advice.suggested_adjustments
            );
        }
    }
}

/// Creates the output directory if it does not exist.
pub fn prepare_output_dir(out_dir: &Path) -> Result<(), ModelError> {
    debug!("Checking and setting output directory");

    if out_dir.is_dir() {
        debug!("Output directory exists so continuing");
    } else if out_dir.exists() {
        return Err(ModelError::FaultyOutput(
            "Output path exists and is not a directory",
        ));
    } else {
        debug!("Output directory does not exist so creating a new one");
        fs::create_dir_all(out_dir)?;
    }

    Ok(())
}

/// Time stamp shared by output files of a single run.
pub fn time_stamp() -> String {
    Local::now().format("%Y-%m-%dT%H%M%S").to_string()
}

/// Saves budgets of all links to a timestamped CSV file,
/// returns path of the written file.
///
/// The file always carries the header, even when no link was computed.
pub fn save_budgets(
    reports: &[LinkReport],
    out_dir: &Path,
    time_stamp: &str,
) -> Result<PathBuf, ModelError> {
    let out_path = out_dir.join(format!("link_budget_{}.csv", time_stamp));

    let mut out_file = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(&out_path)?;

    out_file.write_record(&BUDGET_HEADER)?;

    for report in reports {
        out_file.serialize(LegRecord::new(&report.name, &report.budget.tx))?;
        out_file.serialize(LegRecord::new(&report.name, &report.budget.rx))?;
    }

    out_file.flush()?;

    Ok(out_path)
}

/// Saves received advisories to a timestamped CSV file.
/// Nothing is written when no link got an advice.
pub fn save_advices(
    reports: &[LinkReport],
    out_dir: &Path,
    time_stamp: &str,
) -> Result<Option<PathBuf>, ModelError> {
    if reports.iter().all(|report| report.advice.is_none()) {
        return Ok(None);
    }

    let out_path = out_dir.join(format!("rain_fade_{}.csv", time_stamp));
    let mut out_file = csv::Writer::from_path(&out_path)?;

    for report in reports {
        if let Some(advice) = &report.advice {
            out_file.serialize(AdviceRecord {
                link: &report.name,
                will_affect_connection: advice.will_affect_connection,
                suggested_adjustments: &advice.suggested_adjustments,
            })?;
        }
    }

    out_file.flush()?;

    Ok(Some(out_path))
}

#[cfg(test)]
pub(super) mod tests {
    use super::*;
    use crate::model::link::{compute_link_budget, inputs::tests::madrid_los_angeles};
    use std::env;

    fn report(name: &str, advice: Option<RainFadeAdvice>) -> LinkReport {
        LinkReport {
            name: name.to_string(),
            budget: compute_link_budget(&madrid_los_angeles()).unwrap(),
            advice,
        }
    }

    pub fn scratch_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("satlink-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn quantity_display() {
        assert_eq!(Quantity::new(21.871_923, Unit::Degree).to_string(), "21.87 °");
        assert_eq!(Quantity::new(39_960.459, Unit::Kilometre).to_string(), "39960.46 km");
        assert_eq!(Quantity::new(98.267_632, Unit::DecibelHertz).to_string(), "98.27 dB·Hz");
        assert_eq!(Quantity::new(8.010_299, Unit::DecibelPerKelvin).to_string(), "8.01 dB/K");
    }

    #[test]
    fn special_values() {
        assert_eq!(format_value(Float::NAN), "NaN");
        assert_eq!(format_value(Float::INFINITY), "inf");
        assert_eq!(format_value(-0.004), "-0.00");
    }

    #[test]
    fn leg_report() {
        let link = report("madrid", None);
        let uplink = LegReport::new(&link.budget.tx);

        assert_eq!(uplink.status, GeometryStatus::Ok);
        assert_eq!(
            uplink.to_string(),
            "az 112.60 °, el 21.87 °, range 39960.46 km, FSL 207.41 dB, \
             G/T 8.01 dB/K, C/N0 98.27 dB·Hz, pointing loss 0.11 dB"
        );
    }

    #[test]
    fn flagged_geometry() {
        let mut link = report("equator", None);
        link.budget.rx.geometry.indeterminate = true;
        link.budget.tx.geometry.elevation = -3.0;

        assert_eq!(GeometryStatus::of(&link.budget.rx), GeometryStatus::Indeterminate);
        assert_eq!(GeometryStatus::of(&link.budget.tx), GeometryStatus::NegativeElevation);
        assert!(LegReport::new(&link.budget.rx).to_string().ends_with(" [indeterminate]"));
        assert!(LegReport::new(&link.budget.tx).to_string().ends_with(" [negative-elevation]"));
    }

    #[test]
    fn geometry_warnings() {
        assert_eq!(GeometryStatus::Ok.warning(), None);

        let negative = GeometryStatus::NegativeElevation.warning().unwrap();
        assert!(negative.starts_with("negative elevation"));
        assert!(!negative.contains("horizon"));

        assert!(GeometryStatus::Indeterminate
            .warning()
            .unwrap()
            .contains("indeterminate"));
    }

    #[test]
    fn csv_output() {
        let out_dir = scratch_dir("csv");
        prepare_output_dir(&out_dir).unwrap();

        let reports = vec![
            report("dry", None),
            report(
                "wet",
                Some(RainFadeAdvice {
                    will_affect_connection: true,
                    suggested_adjustments: "Use uplink power control".to_string(),
                }),
            ),
        ];

        let budget_path = save_budgets(&reports, &out_dir, "stamp").unwrap();
        let advice_path = save_advices(&reports, &out_dir, "stamp").unwrap().unwrap();
        assert_eq!(budget_path, out_dir.join("link_budget_stamp.csv"));
        assert_eq!(advice_path, out_dir.join("rain_fade_stamp.csv"));

        let budgets = fs::read_to_string(&budget_path).unwrap();
        let lines: Vec<&str> = budgets.lines().collect();
        assert_eq!(
            lines[0],
            "link,leg,azimuth_deg,elevation_deg,range_km,fsl_db,gt_dbk,cn0_dbhz,pointing_loss_db,geometry"
        );
        assert_eq!(
            lines[1],
            "dry,uplink,112.60,21.87,39960.46,207.41,8.01,98.27,0.11,ok"
        );
        assert_eq!(
            lines[2],
            "dry,downlink,70.19,27.96,39711.04,206.01,23.46,94.06,0.05,ok"
        );
        assert_eq!(lines.len(), 5);

        let advices = fs::read_to_string(&advice_path).unwrap();
        assert_eq!(
            advices.lines().collect::<Vec<_>>(),
            vec![
                "link,will_affect_connection,suggested_adjustments",
                "wet,true,Use uplink power control"
            ]
        );

        fs::remove_dir_all(&out_dir).unwrap();
    }

    #[test]
    fn no_advice_file_without_advices() {
        let out_dir = scratch_dir("dry");
        prepare_output_dir(&out_dir).unwrap();

        let advice_path = save_advices(&[report("dry", None)], &out_dir, "stamp").unwrap();
        assert!(advice_path.is_none());
        assert!(!out_dir.join("rain_fade_stamp.csv").exists());

        fs::remove_dir_all(&out_dir).unwrap();
    }

    #[test]
    fn budget_header_without_links() {
        let out_dir = scratch_dir("empty");
        prepare_output_dir(&out_dir).unwrap();

        let budget_path = save_budgets(&[], &out_dir, "stamp").unwrap();

        assert_eq!(
            fs::read_to_string(&budget_path).unwrap(),
            "link,leg,azimuth_deg,elevation_deg,range_km,fsl_db,gt_dbk,cn0_dbhz,pointing_loss_db,geometry\n"
        );

        fs::remove_dir_all(&out_dir).unwrap();
    }

    #[test]
    fn output_path_is_file() {
        let out_dir = scratch_dir("file");
        fs::write(&out_dir, "").unwrap();

        assert!(matches!(
            prepare_output_dir(&out_dir),
            Err(ModelError::FaultyOutput(_))
        ));

        fs::remove_file(&out_dir).unwrap();
    }
}
