//! Density and spin-polarisation invariants of one grid point.

use super::jet::{Jet, RHO_DOWN, RHO_UP};
use crate::common::constants::{FZETA_FACTOR, RS_FACTOR, THIRD};
use crate::domain::SpinPolarization;

/// Total density and relative polarisation as jets over the host variables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinDensities {
    pub total: Jet,
    pub zeta: Jet,
}

impl SpinDensities {
    /// Returns `None` when the total density is at or below `density_threshold`.
    /// `|zeta|` is clamped to `1 - zeta_threshold`; a clamped zeta is constant.
    pub fn from_rho(
        rho: &[f64],
        spin: SpinPolarization,
        density_threshold: f64,
        zeta_threshold: f64,
    ) -> Option<Self> {
        match spin {
            SpinPolarization::Unpolarized => {
                let total = Jet::variable(rho[0], RHO_UP);
                (total.value > density_threshold).then_some(Self {
                    total,
                    zeta: Jet::constant(0.0),
                })
            }
            SpinPolarization::Polarized => {
                let up = Jet::variable(rho[0], RHO_UP);
                let down = Jet::variable(rho[1], RHO_DOWN);
                let total = up + down;
                if total.value <= density_threshold {
                    return None;
                }
                let mut zeta = (up - down) * total.recip();
                let limit = 1.0 - zeta_threshold;
                if zeta.value.abs() > limit {
                    zeta = Jet::constant(limit.copysign(zeta.value));
                }
                Some(Self { total, zeta })
            }
        }
    }

    pub fn rs(&self) -> Jet {
        self.total.powf(-THIRD).scale(RS_FACTOR)
    }
}

/// `(1+z)^a + (1-z)^a` and its first two derivatives in `z`.
pub fn zeta_power_sum(zeta: f64, exponent: f64) -> [f64; 3] {
    let plus = 1.0 + zeta;
    let minus = 1.0 - zeta;
    [
        plus.powf(exponent) + minus.powf(exponent),
        exponent * (plus.powf(exponent - 1.0) - minus.powf(exponent - 1.0)),
        exponent * (exponent - 1.0) * (plus.powf(exponent - 2.0) + minus.powf(exponent - 2.0)),
    ]
}

/// Spin interpolation `f(zeta)` of the correlation energy, zero when unpolarized.
pub fn fzeta(zeta: f64) -> [f64; 3] {
    let [s, ds, d2s] = zeta_power_sum(zeta, 4.0 * THIRD);
    [(s - 2.0) * FZETA_FACTOR, ds * FZETA_FACTOR, d2s * FZETA_FACTOR]
}

/// Spin-scaling factor `phi = ((1+z)^(2/3) + (1-z)^(2/3)) / 2`.
pub fn phi(zeta: &Jet) -> Jet {
    let [s, ds, d2s] = zeta_power_sum(zeta.value, 2.0 * THIRD);
    zeta.compose(0.5 * s, 0.5 * ds, 0.5 * d2s)
}

/// Exchange spin scaling `((1+z)^(4/3) + (1-z)^(4/3)) / 2`.
pub fn exchange_scaling(zeta: f64) -> [f64; 3] {
    let [s, ds, d2s] = zeta_power_sum(zeta, 4.0 * THIRD);
    [0.5 * s, 0.5 * ds, 0.5 * d2s]
}

#[cfg(test)]
mod tests {
    use super::{SpinDensities, fzeta, phi, zeta_power_sum};
    use crate::common::constants::{FZETA_PP0, RS_FACTOR};
    use crate::domain::SpinPolarization;
    use crate::numerics::jet::{Jet, RHO_DOWN, RHO_UP};

    #[test]
    fn unpolarized_point_has_constant_zero_zeta() {
        let spin = SpinDensities::from_rho(&[0.1], SpinPolarization::Unpolarized, 1.0e-14, 1.0e-10)
            .expect("density above threshold");
        assert_eq!(spin.zeta, Jet::constant(0.0));
        assert!((spin.rs().value - RS_FACTOR * 0.1_f64.powf(-1.0 / 3.0)).abs() < 1.0e-15);
    }

    #[test]
    fn polarized_zeta_derivatives_follow_quotient_rule() {
        let spin =
            SpinDensities::from_rho(&[0.3, 0.1], SpinPolarization::Polarized, 1.0e-14, 1.0e-10)
                .expect("density above threshold");
        assert!((spin.zeta.value - 0.5).abs() < 1.0e-15);
        // dz/dn_up = 2 n_down / n^2, dz/dn_down = -2 n_up / n^2
        assert!((spin.zeta.grad[RHO_UP] - 2.0 * 0.1 / 0.16).abs() < 1.0e-14);
        assert!((spin.zeta.grad[RHO_DOWN] + 2.0 * 0.3 / 0.16).abs() < 1.0e-14);
    }

    #[test]
    fn fully_polarized_zeta_is_clamped_and_frozen() {
        let spin = SpinDensities::from_rho(&[0.2, 0.0], SpinPolarization::Polarized, 1.0e-14, 1.0e-10)
            .expect("density above threshold");
        assert_eq!(spin.zeta.value, 1.0 - 1.0e-10);
        assert_eq!(spin.zeta.grad, [0.0; 5]);
    }

    #[test]
    fn densities_at_threshold_are_rejected() {
        assert!(
            SpinDensities::from_rho(&[1.0e-300], SpinPolarization::Unpolarized, 1.0e-14, 1.0e-10)
                .is_none()
        );
        assert!(
            SpinDensities::from_rho(&[5.0e-15, 5.0e-15], SpinPolarization::Polarized, 1.0e-14, 1.0e-10)
                .is_none()
        );
    }

    #[test]
    fn interpolations_have_expected_limits() {
        let [f0, df0, d2f0] = fzeta(0.0);
        assert_eq!(f0, 0.0);
        assert_eq!(df0, 0.0);
        assert!((d2f0 - FZETA_PP0).abs() < 1.0e-14);
        assert!((fzeta(1.0)[0] - 1.0).abs() < 1.0e-15);

        assert_eq!(phi(&Jet::constant(0.0)).value, 1.0);
        assert_eq!(zeta_power_sum(0.0, 2.0), [2.0, 0.0, 4.0]);
    }
}
