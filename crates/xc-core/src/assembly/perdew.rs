//! Perdew invariants of gradient-corrected correlation.
//!
//! [`PerdewParams::derive`] turns the host variables of one point into jets of
//! `rs`, `zeta`, `phi`, the squared reduced gradient `u = t^2` and the
//! reference correlation `ecunif` of an injected local-density kernel. A kernel
//! then supplies the partials of its energy per particle with respect to
//! `(phi, rs, u, ecunif)` and [`perdew_potentials`] maps them back onto the
//! host arrays.
//!
//! `u` is linear in `sigma`, so every partial stays smooth down to a vanishing
//! gradient.

use super::{XcPoint, assemble_energy, energy_jet};
use crate::common::constants::T_FACTOR;
use crate::common::settings::EvaluationSettings;
use crate::domain::{DerivativeOrder, SpinPolarization};
use crate::functionals::traits::XcKernel;
use crate::numerics::jet::{Jet, SIGMA_DD, SIGMA_UD, SIGMA_UU};
use crate::numerics::spin::{SpinDensities, phi};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerdewParams {
    pub spin: SpinPolarization,
    pub density: Jet,
    pub zeta: Jet,
    pub rs: Jet,
    pub phi: Jet,
    pub sigma: Jet,
    /// `t^2 = T_FACTOR^2 sigma / (phi^2 n^(7/3))`.
    pub u: Jet,
    pub ecunif: Jet,
}

impl PerdewParams {
    /// Returns `None` at or below the density threshold; such points
    /// contribute nothing.
    pub fn derive<K: XcKernel + ?Sized>(
        reference: &K,
        rho: &[f64],
        sigma: &[f64],
        settings: &EvaluationSettings,
    ) -> Option<Self> {
        let spin = reference.spin();
        let densities = SpinDensities::from_rho(
            rho,
            spin,
            settings.density_threshold,
            settings.zeta_threshold,
        )?;
        let sigma = total_sigma(sigma, spin).floored(settings.sigma_threshold);
        let phi = phi(&densities.zeta);

        let u = (sigma * (phi * phi).recip() * densities.total.powf(-7.0 / 3.0))
            .scale(T_FACTOR * T_FACTOR);

        let reference_point = reference.evaluate_point(rho, &[]);
        let ecunif = energy_jet(&reference_point, densities.total.value, spin);

        Some(Self {
            spin,
            density: densities.total,
            zeta: densities.zeta,
            rs: densities.rs(),
            phi,
            sigma,
            u,
            ecunif,
        })
    }
}

/// `sigma_uu + 2 sigma_ud + sigma_dd`, or the single contraction when unpolarized.
pub fn total_sigma(sigma: &[f64], spin: SpinPolarization) -> Jet {
    match spin {
        SpinPolarization::Unpolarized => Jet::variable(sigma[0], SIGMA_UU),
        SpinPolarization::Polarized => {
            Jet::variable(sigma[0], SIGMA_UU)
                + Jet::variable(sigma[1], SIGMA_UD).scale(2.0)
                + Jet::variable(sigma[2], SIGMA_DD)
        }
    }
}

/// Energy per particle of a gradient-corrected correlation kernel and its
/// partials with respect to `(phi, rs, u, ecunif)`. Second partials are only
/// meaningful when the kernel was asked for them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PerdewPartials {
    pub energy: f64,
    pub dphi: f64,
    pub drs: f64,
    pub du: f64,
    pub decunif: f64,
    pub d2phi2: f64,
    pub d2phirs: f64,
    pub d2phiu: f64,
    pub d2phiecunif: f64,
    pub d2rs2: f64,
    pub d2rsu: f64,
    pub d2rsecunif: f64,
    pub d2u2: f64,
    pub d2uecunif: f64,
    pub d2ecunif2: f64,
}

pub fn perdew_potentials(
    params: &PerdewParams,
    partials: &PerdewPartials,
    order: DerivativeOrder,
) -> XcPoint {
    let p = partials;
    let energy = Jet::chain(
        p.energy,
        [&params.phi, &params.rs, &params.u, &params.ecunif],
        [p.dphi, p.drs, p.du, p.decunif],
        [
            [p.d2phi2, p.d2phirs, p.d2phiu, p.d2phiecunif],
            [p.d2phirs, p.d2rs2, p.d2rsu, p.d2rsecunif],
            [p.d2phiu, p.d2rsu, p.d2u2, p.d2uecunif],
            [p.d2phiecunif, p.d2rsecunif, p.d2uecunif, p.d2ecunif2],
        ],
    );
    assemble_energy(&energy, &params.density, params.spin, order)
}

#[cfg(test)]
mod tests {
    use super::{PerdewParams, total_sigma};
    use crate::common::constants::{PI, T_FACTOR};
    use crate::common::settings::EvaluationSettings;
    use crate::domain::{DerivativeOrder, SpinPolarization};
    use crate::functionals::lda::{LdaFunctional, LdaRecipe, PwVariant};
    use crate::functionals::traits::XcKernel;
    use crate::numerics::jet::{SIGMA_UD, SIGMA_UU};

    fn reference(spin: SpinPolarization) -> LdaFunctional {
        LdaFunctional::new(
            LdaRecipe::Pw(PwVariant::Modified),
            spin,
            DerivativeOrder::Kernel,
            EvaluationSettings::default(),
        )
    }

    #[test]
    fn unpolarized_invariants_match_definitions() {
        let settings = EvaluationSettings::default();
        let lda = reference(SpinPolarization::Unpolarized);
        let params = PerdewParams::derive(&lda, &[0.1], &[0.02], &settings)
            .expect("density above threshold");

        let rs = (3.0 / (4.0 * PI * 0.1_f64)).cbrt();
        assert!((params.rs.value - rs).abs() < 1.0e-14);
        assert_eq!(params.phi.value, 1.0);
        let t = T_FACTOR * 0.02_f64.sqrt() / 0.1_f64.powf(7.0 / 6.0);
        assert!((params.u.value - t * t).abs() < 1.0e-13 * t * t);

        let point = lda.evaluate_point(&[0.1], &[]);
        assert_eq!(params.ecunif.value, point.zk);
    }

    #[test]
    fn squared_gradient_is_linear_in_sigma_at_zero_gradient() {
        let settings = EvaluationSettings::default();
        let lda = reference(SpinPolarization::Unpolarized);
        let params = PerdewParams::derive(&lda, &[0.1], &[0.0], &settings)
            .expect("density above threshold");

        let slope = T_FACTOR * T_FACTOR / 0.1_f64.powf(7.0 / 3.0);
        assert!((params.u.grad[SIGMA_UU] - slope).abs() < 1.0e-12 * slope);
        assert_eq!(params.u.hess[SIGMA_UU][SIGMA_UU], 0.0);
        assert!(params.u.value <= slope * settings.sigma_threshold * (1.0 + 1.0e-12));
    }

    #[test]
    fn polarized_sigma_counts_cross_term_twice() {
        let sigma = total_sigma(&[0.1, 0.02, 0.05], SpinPolarization::Polarized);
        assert!((sigma.value - 0.19).abs() < 1.0e-15);
        assert_eq!(sigma.grad[SIGMA_UU], 1.0);
        assert_eq!(sigma.grad[SIGMA_UD], 2.0);
    }

    #[test]
    fn vanishing_density_yields_no_invariants() {
        let settings = EvaluationSettings::default();
        let lda = reference(SpinPolarization::Polarized);
        assert!(PerdewParams::derive(&lda, &[0.0, 0.0], &[0.0, 0.0, 0.0], &settings).is_none());
    }
}
