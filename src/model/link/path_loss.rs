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

//! Free-space path loss of a line-of-sight radio path.

use crate::constants::FSL_CONSTANT_DB;
use crate::Float;

/// Free-space loss in dB for frequency in GHz and range in km.
///
/// Both arguments must be positive, which is ensured
/// by input validation and not checked again here.
pub fn free_space_loss_db(frequency: Float, range: Float) -> Float {
    20.0 * range.log10() + 20.0 * frequency.log10() + FSL_CONSTANT_DB
}

#[cfg(test)]
mod tests {
    use super::free_space_loss_db;
    use crate::Float;
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    #[test]
    fn uplink_at_ku_band() {
        let fsl = free_space_loss_db(14.0, 39960.459_061_806_6);
        assert!(approx_eq!(Float, fsl, 207.405, epsilon = 0.001));
    }

    #[test]
    fn unit_distance_and_frequency() {
        assert!(approx_eq!(Float, free_space_loss_db(1.0, 1.0), 92.45));
    }

    #[test]
    fn doubling_adds_six_db() {
        let base = free_space_loss_db(12.0, 36_000.0);

        assert!(approx_eq!(
            Float,
            free_space_loss_db(24.0, 36_000.0) - base,
            6.0206,
            epsilon = 1e-4
        ));
        assert!(approx_eq!(
            Float,
            free_space_loss_db(12.0, 72_000.0) - base,
            6.0206,
            epsilon = 1e-4
        ));
    }

    proptest! {
        #[test]
        fn increases_with_range(
            freq in 0.1f64..100.0,
            range in 1.0f64..50_000.0,
            step in 1.0f64..10_000.0,
        ) {
            prop_assert!(free_space_loss_db(freq, range + step) > free_space_loss_db(freq, range));
        }

        #[test]
        fn increases_with_frequency(
            freq in 0.1f64..100.0,
            range in 1.0f64..50_000.0,
            step in 0.1f64..50.0,
        ) {
            prop_assert!(free_space_loss_db(freq + step, range) > free_space_loss_db(freq, range));
        }
    }
}
