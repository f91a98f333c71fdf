//! Perdew-Zunger 1981 parametrisation of the Ceperley-Alder correlation.

use super::LdaPartials;
use crate::numerics::spin::fzeta;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PzVariant {
    Original,
    /// `C` and `D` adjusted so that the two branches join at `rs = 1`.
    Modified,
}

/// One spin limit: `gamma / (1 + beta1 sqrt(rs) + beta2 rs)` for `rs >= 1`,
/// `A ln rs + B + C rs ln rs + D rs` below.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PzBranch {
    pub gamma: f64,
    pub beta1: f64,
    pub beta2: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PzParams {
    pub para: PzBranch,
    pub ferro: PzBranch,
}

const PZ_ORIGINAL: PzParams = PzParams {
    para: PzBranch {
        gamma: -0.1423,
        beta1: 1.0529,
        beta2: 0.3334,
        a: 0.0311,
        b: -0.048,
        c: 0.0020,
        d: -0.0116,
    },
    ferro: PzBranch {
        gamma: -0.0843,
        beta1: 1.3981,
        beta2: 0.2611,
        a: 0.01555,
        b: -0.0269,
        c: 0.0007,
        d: -0.0048,
    },
};

const PZ_MODIFIED: PzParams = PzParams {
    para: PzBranch {
        c: 0.002_019_151_940_622_8,
        d: -0.011_632_066_378_913,
        ..PZ_ORIGINAL.para
    },
    ferro: PzBranch {
        c: 0.000_692_551_213_116_94,
        d: -0.004_801_263_537_906_14,
        ..PZ_ORIGINAL.ferro
    },
};

impl PzVariant {
    pub const fn params(self) -> &'static PzParams {
        match self {
            Self::Original => &PZ_ORIGINAL,
            Self::Modified => &PZ_MODIFIED,
        }
    }
}

pub fn pz_branch(branch: &PzBranch, rs: f64) -> [f64; 3] {
    if rs >= 1.0 {
        let sqrt_rs = rs.sqrt();
        let den = 1.0 + branch.beta1 * sqrt_rs + branch.beta2 * rs;
        let dden = 0.5 * branch.beta1 / sqrt_rs + branch.beta2;
        let d2den = -0.25 * branch.beta1 / (rs * sqrt_rs);
        [
            branch.gamma / den,
            -branch.gamma * dden / (den * den),
            branch.gamma * (2.0 * dden * dden / den - d2den) / (den * den),
        ]
    } else {
        let ln_rs = rs.ln();
        [
            branch.a * ln_rs + branch.b + branch.c * rs * ln_rs + branch.d * rs,
            branch.a / rs + branch.c * (ln_rs + 1.0) + branch.d,
            -branch.a / (rs * rs) + branch.c / rs,
        ]
    }
}

pub fn pz_partials(params: &PzParams, rs: f64, zeta: f64, polarized: bool) -> LdaPartials {
    let para = pz_branch(&params.para, rs);
    if !polarized {
        return LdaPartials {
            energy: para[0],
            drs: para[1],
            d2rs2: para[2],
            ..LdaPartials::default()
        };
    }
    let ferro = pz_branch(&params.ferro, rs);
    let [fz, dfz, d2fz] = fzeta(zeta);
    let delta = [
        ferro[0] - para[0],
        ferro[1] - para[1],
        ferro[2] - para[2],
    ];

    LdaPartials {
        energy: para[0] + fz * delta[0],
        drs: para[1] + fz * delta[1],
        d2rs2: para[2] + fz * delta[2],
        dzeta: dfz * delta[0],
        d2rszeta: dfz * delta[1],
        d2zeta2: d2fz * delta[0],
    }
}
