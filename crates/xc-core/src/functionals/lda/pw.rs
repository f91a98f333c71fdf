//! Perdew-Wang 1992 correlation.
//!
//! Each of the paramagnetic, ferromagnetic and spin-stiffness fits has the
//! form `G(rs) = -2A (1 + a1 rs) ln(1 + 1/(2A Q1))` with
//! `Q1 = b1 rs^(1/2) + b2 rs + b3 rs^(3/2) + b4 rs^2`. The stiffness fit
//! returns `-alpha_c`.

use super::{LdaPartials, stiffness_interpolation};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PwVariant {
    Original,
    /// Full-precision `A` and `f''(0)`, the reference of PBE correlation.
    Modified,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PwParams {
    pub a: [f64; 3],
    pub alpha1: [f64; 3],
    pub beta1: [f64; 3],
    pub beta2: [f64; 3],
    pub beta3: [f64; 3],
    pub beta4: [f64; 3],
    pub fz20: f64,
}

const PW_ORIGINAL: PwParams = PwParams {
    a: [0.031091, 0.015545, 0.016887],
    alpha1: [0.21370, 0.20548, 0.11125],
    beta1: [7.5957, 14.1189, 10.357],
    beta2: [3.5876, 6.1977, 3.6231],
    beta3: [1.6382, 3.3662, 0.88026],
    beta4: [0.49294, 0.62517, 0.49671],
    fz20: 1.709921,
};

const PW_MODIFIED: PwParams = PwParams {
    a: [0.0310907, 0.01554535, 0.0168869],
    fz20: 1.709_920_934_161_365_617_563_962_776_245,
    ..PW_ORIGINAL
};

impl PwVariant {
    pub const fn params(self) -> &'static PwParams {
        match self {
            Self::Original => &PW_ORIGINAL,
            Self::Modified => &PW_MODIFIED,
        }
    }
}

/// `G(rs)` of fit `k` with its first two `rs` derivatives.
pub fn pw_fit(params: &PwParams, rs: f64, k: usize) -> [f64; 3] {
    let a = params.a[k];
    let [b1, b2, b3, b4] = [
        params.beta1[k],
        params.beta2[k],
        params.beta3[k],
        params.beta4[k],
    ];
    let sqrt_rs = rs.sqrt();

    let q0 = -2.0 * a * (1.0 + params.alpha1[k] * rs);
    let dq0 = -2.0 * a * params.alpha1[k];

    let q1 = sqrt_rs * (b1 + sqrt_rs * (b2 + sqrt_rs * (b3 + sqrt_rs * b4)));
    let dq1 = 0.5 * b1 / sqrt_rs + b2 + 1.5 * b3 * sqrt_rs + 2.0 * b4 * rs;
    let d2q1 = -0.25 * b1 / (rs * sqrt_rs) + 0.75 * b3 / sqrt_rs + 2.0 * b4;

    let log = (1.0 / (2.0 * a * q1)).ln_1p();
    let den = q1 + 2.0 * a * q1 * q1;
    let dlog = -dq1 / den;
    let d2log = -d2q1 / den + dq1 * dq1 * (1.0 + 4.0 * a * q1) / (den * den);

    [
        q0 * log,
        dq0 * log + q0 * dlog,
        2.0 * dq0 * dlog + q0 * d2log,
    ]
}

pub fn pw_partials(params: &PwParams, rs: f64, zeta: f64, polarized: bool) -> LdaPartials {
    let para = pw_fit(params, rs, 0);
    if !polarized {
        return LdaPartials {
            energy: para[0],
            drs: para[1],
            d2rs2: para[2],
            ..LdaPartials::default()
        };
    }
    let ferro = pw_fit(params, rs, 1);
    let minus_alpha = pw_fit(params, rs, 2);
    let stiffness = [-minus_alpha[0], -minus_alpha[1], -minus_alpha[2]];
    stiffness_interpolation(para, ferro, stiffness, zeta, params.fz20)
}

#[cfg(test)]
mod tests {
    use super::{PwVariant, pw_fit, pw_partials};

    #[test]
    fn paramagnetic_energy_matches_tabulated_value() {
        // PW92 at rs = 1: -0.0598 Ha within the fit accuracy
        let p = pw_partials(PwVariant::Original.params(), 1.0, 0.0, false);
        assert!((p.energy + 0.0598).abs() < 5.0e-4, "got {}", p.energy);
        assert!(p.drs > 0.0);
    }

    #[test]
    fn fit_derivatives_match_central_differences() {
        let params = PwVariant::Modified.params();
        for rs in [0.3, 1.7, 12.0] {
            for k in 0..3 {
                let h = 1.0e-5 * rs;
                let [_, d1, d2] = pw_fit(params, rs, k);
                let plus = pw_fit(params, rs + h, k);
                let minus = pw_fit(params, rs - h, k);
                let fd1 = (plus[0] - minus[0]) / (2.0 * h);
                let fd2 = (plus[1] - minus[1]) / (2.0 * h);
                assert!((d1 - fd1).abs() <= 1.0e-7 * d1.abs().max(1.0e-3), "rs={rs} k={k}");
                assert!((d2 - fd2).abs() <= 1.0e-6 * d2.abs().max(1.0e-3), "rs={rs} k={k}");
            }
        }
    }

    #[test]
    fn variants_differ_only_in_precision() {
        let original = pw_partials(PwVariant::Original.params(), 2.0, 0.3, true);
        let modified = pw_partials(PwVariant::Modified.params(), 2.0, 0.3, true);
        assert!((original.energy - modified.energy).abs() < 1.0e-5);
        assert_ne!(original.energy, modified.energy);
    }
}
