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

//! Numeric core of the model: pure functions computing
//! the link budget from a single input record.
//!
//! Nothing here keeps state between calls, so budgets of
//! different links can be computed concurrently without
//! any synchronisation.

mod antenna;
mod budget;
mod geometry;
pub(super) mod inputs;
mod path_loss;

pub use budget::{compute_link_budget, LegResult, LinkBudget};
pub use inputs::{LinkBudgetInputs, RainConditions};
