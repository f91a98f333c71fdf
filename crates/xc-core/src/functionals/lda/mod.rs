//! Local-density kernels.
//!
//! Every kernel is a closed form `e(rs, zeta)` for the energy per particle;
//! [`LdaFunctional`] carries it through the chain rule onto the host
//! variables.

pub mod pw;
pub mod pz;
pub mod slater;
pub mod vwn;

pub use pw::{PwParams, PwVariant};
pub use pz::{PzParams, PzVariant};
pub use vwn::{VwnParams, VwnVariant};

use crate::assembly::{XcPoint, assemble_energy};
use crate::common::settings::EvaluationSettings;
use crate::domain::{DerivativeOrder, Family, SpinPolarization};
use crate::functionals::traits::XcKernel;
use crate::numerics::jet::Jet;
use crate::numerics::spin::{SpinDensities, fzeta};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kernel", content = "variant", rename_all = "snake_case")]
pub enum LdaRecipe {
    Slater,
    Pw(PwVariant),
    Pz(PzVariant),
    Vwn(VwnVariant),
}

/// Parameter tables resolved once when a state is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LdaKernel {
    Slater,
    Pw(&'static PwParams),
    Pz(&'static PzParams),
    Vwn(&'static VwnParams),
}

impl LdaRecipe {
    pub const fn kernel(self) -> LdaKernel {
        match self {
            Self::Slater => LdaKernel::Slater,
            Self::Pw(variant) => LdaKernel::Pw(variant.params()),
            Self::Pz(variant) => LdaKernel::Pz(variant.params()),
            Self::Vwn(variant) => LdaKernel::Vwn(variant.params()),
        }
    }
}

/// `e(rs, zeta)` and its partials up to second order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LdaPartials {
    pub energy: f64,
    pub drs: f64,
    pub dzeta: f64,
    pub d2rs2: f64,
    pub d2rszeta: f64,
    pub d2zeta2: f64,
}

impl LdaKernel {
    pub fn partials(&self, rs: f64, zeta: f64, polarized: bool) -> LdaPartials {
        match self {
            Self::Slater => slater::slater_partials(rs, zeta, polarized),
            Self::Pw(params) => pw::pw_partials(params, rs, zeta, polarized),
            Self::Pz(params) => pz::pz_partials(params, rs, zeta, polarized),
            Self::Vwn(params) => vwn::vwn_partials(params, rs, zeta, polarized),
        }
    }
}

/// Interpolates between the paramagnetic and ferromagnetic limits through the
/// spin stiffness:
/// `e = e_p + alpha f(z) (1 - z^4) / f''(0) + (e_f - e_p) f(z) z^4`.
/// Each input is `[value, d/drs, d2/drs2]`.
pub(crate) fn stiffness_interpolation(
    para: [f64; 3],
    ferro: [f64; 3],
    stiffness: [f64; 3],
    zeta: f64,
    fz20: f64,
) -> LdaPartials {
    let [fz, dfz, d2fz] = fzeta(zeta);
    let z2 = zeta * zeta;
    let z3 = z2 * zeta;
    let z4 = z2 * z2;

    let w1 = fz * (1.0 - z4) / fz20;
    let dw1 = (dfz * (1.0 - z4) - 4.0 * z3 * fz) / fz20;
    let d2w1 = (d2fz * (1.0 - z4) - 8.0 * z3 * dfz - 12.0 * z2 * fz) / fz20;

    let w2 = fz * z4;
    let dw2 = dfz * z4 + 4.0 * z3 * fz;
    let d2w2 = d2fz * z4 + 8.0 * z3 * dfz + 12.0 * z2 * fz;

    let delta = [
        ferro[0] - para[0],
        ferro[1] - para[1],
        ferro[2] - para[2],
    ];

    LdaPartials {
        energy: para[0] + stiffness[0] * w1 + delta[0] * w2,
        drs: para[1] + stiffness[1] * w1 + delta[1] * w2,
        d2rs2: para[2] + stiffness[2] * w1 + delta[2] * w2,
        dzeta: stiffness[0] * dw1 + delta[0] * dw2,
        d2rszeta: stiffness[1] * dw1 + delta[1] * dw2,
        d2zeta2: stiffness[0] * d2w1 + delta[0] * d2w2,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LdaFunctional {
    recipe: LdaRecipe,
    kernel: LdaKernel,
    spin: SpinPolarization,
    order: DerivativeOrder,
    settings: EvaluationSettings,
}

impl LdaFunctional {
    pub fn new(
        recipe: LdaRecipe,
        spin: SpinPolarization,
        order: DerivativeOrder,
        settings: EvaluationSettings,
    ) -> Self {
        Self {
            recipe,
            kernel: recipe.kernel(),
            spin,
            order,
            settings,
        }
    }

    pub fn recipe(&self) -> LdaRecipe {
        self.recipe
    }

    pub fn densities(&self, rho: &[f64]) -> Option<SpinDensities> {
        SpinDensities::from_rho(
            rho,
            self.spin,
            self.settings.density_threshold,
            self.settings.zeta_threshold,
        )
    }

    /// Energy per particle as a jet over the density slots.
    pub fn energy(&self, densities: &SpinDensities) -> Jet {
        let rs = densities.rs();
        let zeta = &densities.zeta;
        let p = self
            .kernel
            .partials(rs.value, zeta.value, matches!(self.spin, SpinPolarization::Polarized));
        Jet::chain(
            p.energy,
            [&rs, zeta],
            [p.drs, p.dzeta],
            [[p.d2rs2, p.d2rszeta], [p.d2rszeta, p.d2zeta2]],
        )
    }
}

impl XcKernel for LdaFunctional {
    fn family(&self) -> Family {
        Family::Lda
    }

    fn spin(&self) -> SpinPolarization {
        self.spin
    }

    fn order(&self) -> DerivativeOrder {
        self.order
    }

    fn evaluate_point(&self, rho: &[f64], _sigma: &[f64]) -> XcPoint {
        let Some(densities) = self.densities(rho) else {
            return XcPoint::default();
        };
        let energy = self.energy(&densities);
        assemble_energy(&energy, &densities.total, self.spin, self.order)
    }
}
