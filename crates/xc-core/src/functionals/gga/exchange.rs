//! Gradient-corrected exchange with exact spin scaling.
//!
//! The energy density is a sum of per-channel terms
//! `-X_FACTOR_SPIN n_s^(4/3) F(x_s)`, `x_s = sqrt(sigma_ss) / n_s^(4/3)`.
//! Both enhancement factors are even in `x_s` and are evaluated in
//! `u_s = x_s^2 = sigma_ss / n_s^(8/3)`, which keeps the `sigma` derivatives
//! smooth down to a vanishing gradient.
//! An unpolarized point is twice the channel `(n/2, sigma/4)`.

use crate::assembly::{XcPoint, assemble_energy_density};
use crate::common::constants::{FOUR_THIRDS, X_FACTOR_SPIN, X2S};
use crate::common::settings::EvaluationSettings;
use crate::domain::{DerivativeOrder, SpinPolarization};
use crate::numerics::jet::{Jet, RHO_DOWN, RHO_UP, SIGMA_DD, SIGMA_UU};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExchangeEnhancement {
    Pbe,
    /// revPBE of Zhang and Yang.
    PbeRevised,
    PbeSol,
    Becke88,
}

const PBE_KAPPA: f64 = 0.804;
const PBE_MU: f64 = 0.219_514_972_764_517_1;
const PBE_R_KAPPA: f64 = 1.245;
const PBE_SOL_MU: f64 = 10.0 / 81.0;
const B88_BETA: f64 = 0.0042;
/// Below this `u` the Becke 88 denominator switches to its Taylor series.
const B88_SERIES_LIMIT: f64 = 1.0e-4;

/// Resolved enhancement factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Enhancement {
    /// `F(s) = 1 + kappa - kappa / (1 + mu s^2 / kappa)`, written in `u = x^2`.
    Pbe { kappa: f64, mu: f64 },
    /// `F(x) = 1 + beta / X_FACTOR_SPIN * x^2 / (1 + 6 beta x asinh x)`, written in `u = x^2`.
    Becke88 { beta: f64 },
}

impl ExchangeEnhancement {
    pub const fn resolve(self) -> Enhancement {
        match self {
            Self::Pbe => Enhancement::Pbe {
                kappa: PBE_KAPPA,
                mu: PBE_MU,
            },
            Self::PbeRevised => Enhancement::Pbe {
                kappa: PBE_R_KAPPA,
                mu: PBE_MU,
            },
            Self::PbeSol => Enhancement::Pbe {
                kappa: PBE_KAPPA,
                mu: PBE_SOL_MU,
            },
            Self::Becke88 => Enhancement::Becke88 { beta: B88_BETA },
        }
    }
}

impl Enhancement {
    /// PBE form as a function of `u = x^2`.
    pub fn pbe(kappa: f64, mu: f64, u: f64) -> [f64; 3] {
        let c = mu * X2S * X2S;
        let y = 1.0 + c * u / kappa;
        [
            1.0 + kappa - kappa / y,
            c / (y * y),
            -2.0 * c * c / (kappa * y * y * y),
        ]
    }

    /// `x asinh x` as a function of `u = x^2`, with its first two derivatives.
    pub fn x_asinh_x(u: f64) -> [f64; 3] {
        if u < B88_SERIES_LIMIT {
            return [
                u * (1.0 + u * (-1.0 / 6.0 + u * (3.0 / 40.0 - u * 5.0 / 112.0))),
                1.0 + u * (-1.0 / 3.0 + u * (9.0 / 40.0 - u * 5.0 / 28.0)),
                -1.0 / 3.0 + u * (9.0 / 20.0 + u * (-15.0 / 28.0 + u * 175.0 / 288.0)),
            ];
        }
        let x = u.sqrt();
        let root = (1.0 + u).sqrt();
        let asinh = x.asinh();
        [
            x * asinh,
            0.5 * (asinh / x + 1.0 / root),
            (1.0 / (x * root) - asinh / u - x / (root * root * root)) / (4.0 * x),
        ]
    }

    /// Becke 88 form as a function of `u = x^2`.
    pub fn becke88(beta: f64, u: f64) -> [f64; 3] {
        let [w, dw, d2w] = Self::x_asinh_x(u);
        let g = 1.0 + 6.0 * beta * w;
        let dg = 6.0 * beta * dw;
        let d2g = 6.0 * beta * d2w;

        let inv = 1.0 / g;
        let dinv = -dg * inv * inv;
        let d2inv = (2.0 * dg * dg - g * d2g) * inv * inv * inv;

        let q = u * inv;
        let dq = inv + u * dinv;
        let d2q = 2.0 * dinv + u * d2inv;

        let scale = beta / X_FACTOR_SPIN;
        [1.0 + scale * q, scale * dq, scale * d2q]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GgaExchange {
    enhancement: Enhancement,
    spin: SpinPolarization,
    order: DerivativeOrder,
    settings: EvaluationSettings,
}

impl GgaExchange {
    pub fn new(
        enhancement: ExchangeEnhancement,
        spin: SpinPolarization,
        order: DerivativeOrder,
        settings: EvaluationSettings,
    ) -> Self {
        Self {
            enhancement: enhancement.resolve(),
            spin,
            order,
            settings,
        }
    }

    /// Energy density of one spin channel.
    pub fn channel_energy(&self, density: &Jet, sigma: &Jet) -> Jet {
        let n43 = density.powf(FOUR_THIRDS);
        let u = *sigma * density.powf(-2.0 * FOUR_THIRDS);
        let [f, df, d2f] = match self.enhancement {
            Enhancement::Pbe { kappa, mu } => Enhancement::pbe(kappa, mu, u.value),
            Enhancement::Becke88 { beta } => Enhancement::becke88(beta, u.value),
        };
        (n43 * u.compose(f, df, d2f)).scale(-X_FACTOR_SPIN)
    }

    pub fn evaluate_point(&self, rho: &[f64], sigma: &[f64]) -> XcPoint {
        let threshold = self.settings.density_threshold;
        let floor = self.settings.sigma_threshold;
        match self.spin {
            SpinPolarization::Unpolarized => {
                if rho[0] <= threshold {
                    return XcPoint::default();
                }
                let half = Jet::variable(rho[0], RHO_UP).scale(0.5);
                let quarter = Jet::variable(sigma[0], SIGMA_UU).floored(floor).scale(0.25);
                let energy = self.channel_energy(&half, &quarter).scale(2.0);
                assemble_energy_density(&energy, rho[0], self.spin, self.order)
            }
            SpinPolarization::Polarized => {
                let total = rho[0] + rho[1];
                if total <= threshold {
                    return XcPoint::default();
                }
                let mut energy = Jet::constant(0.0);
                for (channel, (rho_slot, sigma_slot)) in
                    [(RHO_UP, SIGMA_UU), (RHO_DOWN, SIGMA_DD)].into_iter().enumerate()
                {
                    if rho[channel] <= threshold {
                        continue;
                    }
                    let density = Jet::variable(rho[channel], rho_slot);
                    let contraction =
                        Jet::variable(sigma[2 * channel], sigma_slot).floored(floor);
                    energy = energy + self.channel_energy(&density, &contraction);
                }
                assemble_energy_density(&energy, total, self.spin, self.order)
            }
        }
    }
}
