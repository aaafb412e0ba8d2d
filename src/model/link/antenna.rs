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

//! Parabolic antenna model: aperture gain and the penalty
//! for pointing the boresight off the target.

use std::f64::consts::PI;

use crate::constants::{BEAMWIDTH_FACTOR, POINTING_LOSS_FACTOR, SPEED_OF_LIGHT};
use crate::Float;

/// Antenna gain in dBi of a circular aperture
/// with given diameter (m), frequency (GHz) and efficiency (%).
///
/// `G = η(πD/λ)²`
pub fn antenna_gain_db(diameter: Float, frequency: Float, efficiency: Float) -> Float {
    let lambda = wavelength(frequency);
    let gain = (efficiency / 100.0) * ((PI * diameter) / lambda).powi(2);

    10.0 * gain.log10()
}

/// Approximate 3 dB beamwidth in degrees.
pub fn beamwidth(diameter: Float, frequency: Float) -> Float {
    BEAMWIDTH_FACTOR / (frequency * diameter)
}

/// Pointing loss in dB for pointing error in degrees.
///
/// Uses the parabolic main-lobe approximation `12(e/θ)²`,
/// results are reference values only for this exact form.
pub fn pointing_loss_db(pointing_error: Float, diameter: Float, frequency: Float) -> Float {
    POINTING_LOSS_FACTOR * (pointing_error / beamwidth(diameter, frequency)).powi(2)
}

/// Wavelength in meters for frequency in GHz.
fn wavelength(frequency: Float) -> Float {
    SPEED_OF_LIGHT / (frequency * 1e9)
}

#[cfg(test)]
mod tests {
    use super::{antenna_gain_db, beamwidth, pointing_loss_db};
    use crate::Float;
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    #[test]
    fn transmit_antenna() {
        assert!(approx_eq!(Float, antenna_gain_db(2.4, 14.0, 65.0), 49.06, epsilon = 0.005));
    }

    #[test]
    fn receive_antenna() {
        assert!(approx_eq!(Float, antenna_gain_db(1.8, 12.0, 65.0), 45.22, epsilon = 0.005));
    }

    #[test]
    fn doubling_diameter() {
        let gain = antenna_gain_db(2.4, 14.0, 65.0);
        let doubled = antenna_gain_db(4.8, 14.0, 65.0);

        assert!(approx_eq!(Float, doubled - gain, 6.0206, epsilon = 1e-4));
    }

    #[test]
    fn beamwidth_of_small_dish() {
        assert!(approx_eq!(Float, beamwidth(1.0, 10.0), 7.0));
    }

    #[test]
    fn pointing_losses() {
        assert!(approx_eq!(Float, pointing_loss_db(0.2, 2.4, 14.0), 0.110_592, epsilon = 1e-9));
        assert!(approx_eq!(Float, pointing_loss_db(0.2, 1.8, 12.0), 0.045_704, epsilon = 1e-6));
    }

    #[test]
    fn no_error_no_loss() {
        assert_eq!(pointing_loss_db(0.0, 2.4, 14.0), 0.0);
    }

    proptest! {
        #[test]
        fn gain_increases_with_diameter(
            diameter in 0.1f64..20.0,
            step in 0.01f64..5.0,
            eff in 1.0f64..100.0,
        ) {
            prop_assert!(antenna_gain_db(diameter + step, 12.0, eff) > antenna_gain_db(diameter, 12.0, eff));
        }

        #[test]
        fn gain_increases_with_efficiency(
            diameter in 0.1f64..20.0,
            eff in 1.0f64..90.0,
            step in 0.1f64..10.0,
        ) {
            prop_assert!(antenna_gain_db(diameter, 12.0, eff + step) > antenna_gain_db(diameter, 12.0, eff));
        }

        #[test]
        fn pointing_loss_is_quadratic(
            error in 0.001f64..1.0,
            diameter in 0.5f64..10.0,
            freq in 1.0f64..40.0,
        ) {
            let single = pointing_loss_db(error, diameter, freq);
            let double = pointing_loss_db(2.0 * error, diameter, freq);

            prop_assert!(approx_eq!(Float, double, 4.0 * single, epsilon = 1e-9 * single.max(1.0)));
        }
    }
}
