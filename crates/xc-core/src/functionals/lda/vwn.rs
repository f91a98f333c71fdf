//! Vosko-Wilk-Nusair correlation.
//!
//! Fits are written in `x = sqrt(rs)` with `X(x) = x^2 + b x + c` and
//! `Q = sqrt(4c - b^2)`. Both parameter sets use the stiffness
//! interpolation of the fifth VWN form.

use super::{LdaPartials, stiffness_interpolation};
use crate::common::constants::FZETA_PP0;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VwnVariant {
    /// Fit to the Ceperley-Alder Monte Carlo energies.
    MonteCarlo,
    /// Fit to the random-phase approximation.
    Rpa,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VwnFit {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub x0: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VwnParams {
    pub para: VwnFit,
    pub ferro: VwnFit,
    pub stiffness: VwnFit,
}

const A_PARA: f64 = 0.031_090_7;
const A_FERRO: f64 = 0.015_545_35;
const A_STIFFNESS: f64 = -0.016_886_863_940_389_63;

const VWN_MONTE_CARLO: VwnParams = VwnParams {
    para: VwnFit {
        a: A_PARA,
        b: 3.72744,
        c: 12.9352,
        x0: -0.10498,
    },
    ferro: VwnFit {
        a: A_FERRO,
        b: 7.06042,
        c: 18.0578,
        x0: -0.32500,
    },
    stiffness: VwnFit {
        a: A_STIFFNESS,
        b: 1.13107,
        c: 13.0045,
        x0: -0.0047584,
    },
};

const VWN_RPA: VwnParams = VwnParams {
    para: VwnFit {
        a: A_PARA,
        b: 13.0720,
        c: 42.7198,
        x0: -0.409286,
    },
    ferro: VwnFit {
        a: A_FERRO,
        b: 20.1231,
        c: 101.578,
        x0: -0.743294,
    },
    stiffness: VwnFit {
        a: A_STIFFNESS,
        b: 1.06835,
        c: 11.4813,
        x0: -0.228344,
    },
};

impl VwnVariant {
    pub const fn params(self) -> &'static VwnParams {
        match self {
            Self::MonteCarlo => &VWN_MONTE_CARLO,
            Self::Rpa => &VWN_RPA,
        }
    }
}

/// One fit and its first two `rs` derivatives.
pub fn vwn_fit(fit: &VwnFit, rs: f64) -> [f64; 3] {
    let VwnFit { a, b, c, x0 } = *fit;
    let x = rs.sqrt();
    let big_x = x * x + b * x + c;
    let big_x0 = x0 * x0 + b * x0 + c;
    let q = (4.0 * c - b * b).sqrt();
    let two_x_b = 2.0 * x + b;
    let r = two_x_b * two_x_b + q * q;
    let atan = (q / two_x_b).atan();
    let shift = b * x0 / big_x0;

    let value = a
        * ((x * x / big_x).ln() + 2.0 * b / q * atan
            - shift
                * (((x - x0) * (x - x0) / big_x).ln() + 2.0 * (b + 2.0 * x0) / q * atan));

    let dx = a
        * (2.0 / x - two_x_b / big_x - 4.0 * b / r
            - shift * (2.0 / (x - x0) - two_x_b / big_x - 4.0 * (b + 2.0 * x0) / r));

    let d_log_x = (2.0 * big_x - two_x_b * two_x_b) / (big_x * big_x);
    let d2x = a
        * (-2.0 / (x * x) - d_log_x + 16.0 * b * two_x_b / (r * r)
            - shift
                * (-2.0 / ((x - x0) * (x - x0)) - d_log_x
                    + 16.0 * (b + 2.0 * x0) * two_x_b / (r * r)));

    [
        value,
        dx / (2.0 * x),
        d2x / (4.0 * rs) - dx / (4.0 * rs * x),
    ]
}

pub fn vwn_partials(params: &VwnParams, rs: f64, zeta: f64, polarized: bool) -> LdaPartials {
    let para = vwn_fit(&params.para, rs);
    if !polarized {
        return LdaPartials {
            energy: para[0],
            drs: para[1],
            d2rs2: para[2],
            ..LdaPartials::default()
        };
    }
    let ferro = vwn_fit(&params.ferro, rs);
    let stiffness = vwn_fit(&params.stiffness, rs);
    stiffness_interpolation(para, ferro, stiffness, zeta, FZETA_PP0)
}
