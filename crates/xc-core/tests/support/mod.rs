#![allow(dead_code)]

use xc_core::{FunctionalState, SpinPolarization, XcKernel, XcPoint};

pub const FIRST_ORDER_TOLERANCE: f64 = 1.0e-6;
pub const SECOND_ORDER_TOLERANCE: f64 = 1.0e-5;
const RELATIVE_STEP: f64 = 1.0e-6;
/// Relative rounding of one evaluation, amplified by the `1/h` of a central
/// difference.
const ROUNDING: f64 = 1.0e-14;

pub fn assert_close(actual: f64, expected: f64, rel_tol: f64, abs_tol: f64, label: &str) {
    let diff = (actual - expected).abs();
    let allowed = abs_tol.max(rel_tol * expected.abs().max(actual.abs()));
    assert!(
        diff <= allowed,
        "{label}: actual={actual:.16e} expected={expected:.16e} diff={diff:.3e} allowed={allowed:.3e}"
    );
}

pub fn energy_density(state: &FunctionalState, rho: &[f64], sigma: &[f64]) -> f64 {
    let total: f64 = rho.iter().sum();
    total * state.evaluate_point(rho, sigma).zk
}

fn rho_pair(i: usize, j: usize) -> usize {
    i + j
}

fn sigma_pair(k: usize, m: usize) -> usize {
    let (k, m) = if k <= m { (k, m) } else { (m, k) };
    [[0, 1, 2], [1, 3, 4], [2, 4, 5]][k][m]
}

fn step(value: f64) -> f64 {
    RELATIVE_STEP * value.abs().max(1.0e-3)
}

/// Absolute allowance for a central difference of values around `scale`.
fn noise_floor(abs_tol: f64, scale: f64, h: f64) -> f64 {
    abs_tol.max(ROUNDING * scale / h)
}

fn shifted(values: &[f64], index: usize, delta: f64) -> Vec<f64> {
    let mut copy = values.to_vec();
    copy[index] += delta;
    copy
}

/// Central differences of the energy density and of the analytic first
/// derivatives, compared against every derivative array the state fills.
pub fn check_derivatives(state: &FunctionalState, rho: &[f64], sigma: &[f64], abs_tol: f64) {
    let name = state.descriptor().name;
    let polarized = state.spin() == SpinPolarization::Polarized;
    let layout = state.spin().layout();
    let second = state.order().second();
    let point = state.evaluate_point(rho, sigma);

    for i in 0..layout.rho {
        let h = step(rho[i]);
        let plus_rho = shifted(rho, i, h);
        let minus_rho = shifted(rho, i, -h);
        let (up, down) = (
            energy_density(state, &plus_rho, sigma),
            energy_density(state, &minus_rho, sigma),
        );
        assert_close(
            point.vrho[i],
            (up - down) / (2.0 * h),
            FIRST_ORDER_TOLERANCE,
            noise_floor(abs_tol, up.abs().max(down.abs()), h),
            &format!("{name} vrho[{i}]"),
        );
        if !second {
            continue;
        }
        let plus = state.evaluate_point(&plus_rho, sigma);
        let minus = state.evaluate_point(&minus_rho, sigma);
        for j in i..layout.rho {
            let fd = (plus.vrho[j] - minus.vrho[j]) / (2.0 * h);
            let index = if polarized { rho_pair(i, j) } else { 0 };
            assert_close(
                point.v2rho2[index],
                fd,
                SECOND_ORDER_TOLERANCE,
                noise_floor(abs_tol, plus.vrho[j].abs().max(minus.vrho[j].abs()), h),
                &format!("{name} v2rho2[{index}]"),
            );
        }
        if sigma.is_empty() {
            continue;
        }
        for k in 0..layout.sigma {
            let fd = (plus.vsigma[k] - minus.vsigma[k]) / (2.0 * h);
            let index = i * layout.sigma + k;
            assert_close(
                point.v2rhosigma[index],
                fd,
                SECOND_ORDER_TOLERANCE,
                noise_floor(abs_tol, plus.vsigma[k].abs().max(minus.vsigma[k].abs()), h),
                &format!("{name} v2rhosigma[{index}]"),
            );
        }
    }

    if sigma.is_empty() {
        return;
    }
    for k in 0..layout.sigma {
        let h = step(sigma[k]);
        let plus_sigma = shifted(sigma, k, h);
        let minus_sigma = shifted(sigma, k, -h);
        let (up, down) = (
            energy_density(state, rho, &plus_sigma),
            energy_density(state, rho, &minus_sigma),
        );
        assert_close(
            point.vsigma[k],
            (up - down) / (2.0 * h),
            FIRST_ORDER_TOLERANCE,
            noise_floor(abs_tol, up.abs().max(down.abs()), h),
            &format!("{name} vsigma[{k}]"),
        );
        if !second {
            continue;
        }
        let plus = state.evaluate_point(rho, &plus_sigma);
        let minus = state.evaluate_point(rho, &minus_sigma);
        for m in k..layout.sigma {
            let fd = (plus.vsigma[m] - minus.vsigma[m]) / (2.0 * h);
            let index = if polarized { sigma_pair(k, m) } else { 0 };
            assert_close(
                point.v2sigma2[index],
                fd,
                SECOND_ORDER_TOLERANCE,
                noise_floor(abs_tol, plus.vsigma[m].abs().max(minus.vsigma[m].abs()), h),
                &format!("{name} v2sigma2[{index}]"),
            );
        }
    }
}

pub fn assert_points_close(actual: &XcPoint, expected: &XcPoint, rel_tol: f64, label: &str) {
    let pairs = std::iter::once((actual.zk, expected.zk))
        .chain(actual.vrho.into_iter().zip(expected.vrho))
        .chain(actual.vsigma.into_iter().zip(expected.vsigma))
        .chain(actual.v2rho2.into_iter().zip(expected.v2rho2))
        .chain(actual.v2rhosigma.into_iter().zip(expected.v2rhosigma))
        .chain(actual.v2sigma2.into_iter().zip(expected.v2sigma2));
    for (index, (a, e)) in pairs.enumerate() {
        assert_close(a, e, rel_tol, 1.0e-14, &format!("{label} entry {index}"));
    }
}
