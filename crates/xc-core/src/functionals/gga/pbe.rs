//! Perdew-Burke-Ernzerhof correlation and its close relatives.
//!
//! The energy per particle is `ecunif + H(rs, phi, u, A)` with `u = t^2`,
//! where the coupling `A` is itself a function of `ecunif`, `phi` and (for the
//! revTPSS variant) `rs`. Partials of both formulas are closed form and are combined through
//! `A` before the Perdew chain rule maps them onto the host arrays.

use crate::assembly::{PerdewParams, PerdewPartials, XcPoint, perdew_potentials};
use crate::common::constants::PBE_GAMMA;
use crate::common::settings::EvaluationSettings;
use crate::domain::{DerivativeOrder, SpinPolarization};
use crate::functionals::lda::{LdaFunctional, LdaRecipe, PwVariant};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PbeVariant {
    Original,
    Sol,
    /// xPBE reparametrisation of Xu and Goddard.
    Extended,
    /// `A` rescaled by `(1 + 0.1 rs) / (1 + 0.1778 rs)`; first order only.
    RevTpss,
}

const BETA_PBE: f64 = 0.066_724_550_603_149_22;
const BETA_SOL: f64 = 0.046;
const BETA_EXTENDED: f64 = 0.089_809;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PbeParams {
    pub beta: f64,
    pub gamma: f64,
    pub rs_scaling: bool,
}

impl PbeVariant {
    pub fn params(self) -> PbeParams {
        match self {
            Self::Original => PbeParams {
                beta: BETA_PBE,
                gamma: PBE_GAMMA,
                rs_scaling: false,
            },
            Self::Sol => PbeParams {
                beta: BETA_SOL,
                gamma: PBE_GAMMA,
                rs_scaling: false,
            },
            Self::Extended => PbeParams {
                beta: BETA_EXTENDED,
                gamma: BETA_EXTENDED * BETA_EXTENDED / (2.0 * 0.197_363),
                rs_scaling: false,
            },
            Self::RevTpss => PbeParams {
                beta: BETA_PBE,
                gamma: PBE_GAMMA,
                rs_scaling: true,
            },
        }
    }

    pub const fn max_order(self) -> DerivativeOrder {
        match self {
            Self::RevTpss => DerivativeOrder::Potential,
            _ => DerivativeOrder::Kernel,
        }
    }
}

/// `(1 + 0.1 rs) / (1 + 0.1778 rs)` and its `rs` derivative.
fn rs_factor(rs: f64) -> (f64, f64) {
    let den = 1.0 + 0.1778 * rs;
    ((1.0 + 0.1 * rs) / den, (0.1 - 0.1778) / (den * den))
}

/// Coupling `A` and its partials with respect to `ecunif`, `phi` and `rs`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coupling {
    pub a: f64,
    pub decunif: f64,
    pub dphi: f64,
    pub drs: f64,
    pub d2ecunif2: f64,
    pub d2ecunifphi: f64,
    pub d2phi2: f64,
}

/// Gradient correction `H` and its partials with respect to `phi`, `rs`,
/// `u = t^2` and `A`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GradientCorrection {
    pub h: f64,
    pub dphi: f64,
    pub drs: f64,
    pub du: f64,
    pub da: f64,
    pub d2phi2: f64,
    pub d2phiu: f64,
    pub d2phia: f64,
    pub d2u2: f64,
    pub d2ua: f64,
    pub d2a2: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PbeCorrelation {
    variant: PbeVariant,
    params: PbeParams,
    order: DerivativeOrder,
    settings: EvaluationSettings,
    reference: LdaFunctional,
}

impl PbeCorrelation {
    /// `order` must not exceed [`PbeVariant::max_order`]; the registry
    /// rejects such requests before a kernel is built.
    pub fn new(
        variant: PbeVariant,
        spin: SpinPolarization,
        order: DerivativeOrder,
        settings: EvaluationSettings,
    ) -> Self {
        debug_assert!(order <= variant.max_order());
        Self {
            variant,
            params: variant.params(),
            order,
            settings,
            reference: LdaFunctional::new(
                LdaRecipe::Pw(PwVariant::Modified),
                spin,
                order,
                settings,
            ),
        }
    }

    pub fn variant(&self) -> PbeVariant {
        self.variant
    }

    pub fn reference(&self) -> &LdaFunctional {
        &self.reference
    }

    pub fn coupling(&self, rs: f64, ecunif: f64, phi: f64, order: DerivativeOrder) -> Coupling {
        let PbeParams {
            beta,
            gamma,
            rs_scaling,
        } = self.params;
        let (scale, dscale) = if rs_scaling {
            rs_factor(rs)
        } else {
            (1.0, 0.0)
        };

        let phi3 = phi * phi * phi;
        let f1 = ecunif / (gamma * phi3);
        let f3 = (-f1).exp_m1();
        let f2 = f3 + 1.0;
        let a = scale * beta / (gamma * f3);

        let mut out = Coupling {
            a,
            ..Coupling::default()
        };
        if !order.first() {
            return out;
        }

        let df1dphi = -3.0 * f1 / phi;
        let dx = a * f2 / f3;
        out.decunif = dx / (gamma * phi3);
        out.dphi = dx * df1dphi;
        if rs_scaling {
            out.drs = beta * dscale / (gamma * f3);
        }

        if !order.second() || rs_scaling {
            return out;
        }

        let d2x = dx * (f2 + 1.0) / f3;
        out.d2phi2 = d2x * df1dphi * df1dphi + dx * 12.0 * f1 / (phi * phi);
        out.d2ecunifphi = df1dphi * d2x / (gamma * phi3) - 3.0 * dx / (gamma * phi3 * phi);
        out.d2ecunif2 = d2x / (gamma * gamma * phi3 * phi3);
        out
    }

    pub fn gradient_correction(
        &self,
        rs: f64,
        phi: f64,
        u: f64,
        a: f64,
        order: DerivativeOrder,
    ) -> GradientCorrection {
        let PbeParams {
            beta,
            gamma,
            rs_scaling,
        } = self.params;
        let (scale, dscale) = if rs_scaling {
            rs_factor(rs)
        } else {
            (1.0, 0.0)
        };

        let u2 = u * u;
        let phi3 = phi * phi * phi;
        let prefactor = gamma * phi3;

        let f1 = u + a * u2;
        let f3 = 1.0 + a * f1;
        let f2 = scale * beta * f1 / (gamma * f3);
        let h = prefactor * f2.ln_1p();

        let mut out = GradientCorrection {
            h,
            ..GradientCorrection::default()
        };
        if !order.first() {
            return out;
        }

        let ratio = scale * beta / (gamma * f3 * f3);
        let one_f2 = 1.0 + f2;

        out.dphi = 3.0 * h / phi;

        let df1du = 1.0 + 2.0 * a * u;
        let df2du = ratio * df1du;
        out.du = prefactor * df2du / one_f2;

        let df2da = ratio * (u2 - f1 * f1);
        out.da = prefactor * df2da / one_f2;

        if rs_scaling {
            let df2drs = beta * dscale * f1 / (gamma * f3);
            out.drs = prefactor * df2drs / one_f2;
        }

        if !order.second() || rs_scaling {
            return out;
        }

        out.d2phi2 = 2.0 * out.dphi / phi;
        out.d2phiu = 3.0 * out.du / phi;
        out.d2phia = 3.0 * out.da / phi;

        let one_f2_sq = one_f2 * one_f2;

        let d2f2du2 = 2.0 * a * ratio * (1.0 - df1du * df1du / f3);
        out.d2u2 = prefactor * (d2f2du2 * one_f2 - df2du * df2du) / one_f2_sq;

        let d2f2dua = 2.0 * ratio * (u - df1du * (f1 + a * u2) / f3);
        out.d2ua = prefactor * (d2f2dua * one_f2 - df2du * df2da) / one_f2_sq;

        let d2f2da2 = ratio / f3 * (-2.0) * (2.0 * f1 * u2 - f1 * f1 * f1 + a * u2 * u2);
        out.d2a2 = prefactor * (d2f2da2 * one_f2 - df2da * df2da) / one_f2_sq;
        out
    }

    /// Combines both formulas through `A` into the partials of the energy
    /// per particle.
    pub fn partials(&self, params: &PerdewParams) -> PerdewPartials {
        let order = self.order;
        let rs = params.rs.value;
        let phi = params.phi.value;
        let ecunif = params.ecunif.value;

        let coupling = self.coupling(rs, ecunif, phi, order);
        let h = self.gradient_correction(rs, phi, params.u.value, coupling.a, order);

        let mut out = PerdewPartials {
            energy: ecunif + h.h,
            ..PerdewPartials::default()
        };
        if !order.first() {
            return out;
        }

        out.dphi = h.dphi + h.da * coupling.dphi;
        out.drs = h.drs + h.da * coupling.drs;
        out.du = h.du;
        out.decunif = 1.0 + h.da * coupling.decunif;

        if !order.second() {
            return out;
        }

        out.d2phi2 = h.d2phi2
            + 2.0 * h.d2phia * coupling.dphi
            + h.d2a2 * coupling.dphi * coupling.dphi
            + h.da * coupling.d2phi2;
        out.d2phiu = h.d2phiu + h.d2ua * coupling.dphi;
        out.d2phiecunif = h.d2phia * coupling.decunif
            + h.d2a2 * coupling.dphi * coupling.decunif
            + h.da * coupling.d2ecunifphi;
        out.d2u2 = h.d2u2;
        out.d2uecunif = h.d2ua * coupling.decunif;
        out.d2ecunif2 =
            h.d2a2 * coupling.decunif * coupling.decunif + h.da * coupling.d2ecunif2;
        out
    }

    pub fn evaluate_point(&self, rho: &[f64], sigma: &[f64]) -> XcPoint {
        let Some(params) = PerdewParams::derive(&self.reference, rho, sigma, &self.settings) else {
            return XcPoint::default();
        };
        let partials = self.partials(&params);
        perdew_potentials(&params, &partials, self.order)
    }
}
