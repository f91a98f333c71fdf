//! Perdew 1986 gradient correction on top of Perdew-Zunger correlation.

use crate::assembly::perdew::total_sigma;
use crate::assembly::{XcPoint, assemble_energy};
use crate::common::constants::THIRD;
use crate::common::settings::EvaluationSettings;
use crate::domain::{DerivativeOrder, SpinPolarization};
use crate::functionals::lda::{LdaFunctional, LdaRecipe, PzVariant};
use crate::numerics::jet::Jet;
use crate::numerics::spin::zeta_power_sum;
use std::f64::consts::FRAC_1_SQRT_2;

const C_OFFSET: f64 = 0.001_667;
const C_NUMERATOR: f64 = 0.002_568;
const ALPHA: f64 = 0.023_266;
const BETA: f64 = 7.389e-6;
const GAMMA: f64 = 8.723;
const DELTA: f64 = 0.472;
const C_INFINITY: f64 = C_OFFSET + C_NUMERATOR;
const F_TILDE: f64 = 0.11;
const PHI_FACTOR: f64 = 1.745 * F_TILDE * C_INFINITY;

#[derive(Debug, Clone, PartialEq)]
pub struct P86Correlation {
    spin: SpinPolarization,
    order: DerivativeOrder,
    settings: EvaluationSettings,
    reference: LdaFunctional,
}

impl P86Correlation {
    pub fn new(spin: SpinPolarization, order: DerivativeOrder, settings: EvaluationSettings) -> Self {
        Self {
            spin,
            order,
            settings,
            reference: LdaFunctional::new(
                LdaRecipe::Pz(PzVariant::Original),
                spin,
                order,
                settings,
            ),
        }
    }

    /// `C(rs)` of the gradient coefficient.
    pub fn coefficient(rs: &Jet) -> Jet {
        let rs2 = *rs * *rs;
        let numerator = rs.scale(ALPHA) + rs2.scale(BETA) + C_NUMERATOR;
        let denominator = rs.scale(GAMMA) + rs2.scale(DELTA) + (rs2 * *rs).scale(1.0e4 * BETA) + 1.0;
        numerator * denominator.recip() + C_OFFSET
    }

    pub fn evaluate_point(&self, rho: &[f64], sigma: &[f64]) -> XcPoint {
        let Some(densities) = self.reference.densities(rho) else {
            return XcPoint::default();
        };
        let density = &densities.total;
        let reference = self.reference.energy(&densities);
        let sigma = total_sigma(sigma, self.spin).floored(self.settings.sigma_threshold);

        let c = Self::coefficient(&densities.rs());
        let phi = c.recip() * sigma.sqrt() * density.powf(-7.0 / 6.0);
        let phi = phi.scale(PHI_FACTOR);

        let [p, dp, d2p] = zeta_power_sum(densities.zeta.value, 5.0 * THIRD);
        let d = densities.zeta.compose(p, dp, d2p).sqrt().scale(FRAC_1_SQRT_2);

        let correction = (-phi).exp() * c * sigma * d.recip() * density.powf(-7.0 / 3.0);
        assemble_energy(&(reference + correction), density, self.spin, self.order)
    }
}

#[cfg(test)]
mod tests {
    use super::P86Correlation;
    use crate::common::settings::EvaluationSettings;
    use crate::domain::{DerivativeOrder, SpinPolarization};
    use crate::functionals::traits::XcKernel;
    use crate::numerics::jet::Jet;

    #[test]
    fn coefficient_interpolates_between_limits() {
        let high_density = P86Correlation::coefficient(&Jet::constant(0.0)).value;
        assert!((high_density - 0.004235).abs() < 1.0e-15);
        let low_density = P86Correlation::coefficient(&Jet::constant(1.0e6)).value;
        assert!((low_density - 0.001667).abs() < 1.0e-6);
    }

    #[test]
    fn correction_is_positive_and_vanishes_without_gradient() {
        let p86 = P86Correlation::new(
            SpinPolarization::Unpolarized,
            DerivativeOrder::Energy,
            EvaluationSettings::default(),
        );
        let flat = p86.evaluate_point(&[0.2], &[0.0]);
        let bent = p86.evaluate_point(&[0.2], &[0.05]);
        assert!(bent.zk > flat.zk);

        let reference = p86.reference.evaluate_point(&[0.2], &[]);
        assert!((flat.zk - reference.zk).abs() < 1.0e-18);
    }
}
