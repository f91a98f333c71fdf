//! Shared closed-form constants of the homogeneous electron gas.
//!
//! Kernels read these instead of repeating literal prefactors.

pub const PI: f64 = 3.141_592_653_589_793_238_462_643_383_279_5_f64;
pub const THIRD: f64 = 1.0 / 3.0;
pub const TWO_THIRDS: f64 = 2.0 / 3.0;
pub const FOUR_THIRDS: f64 = 4.0 / 3.0;

/// `(3/(4 pi))^(1/3)`, so that `rs = RS_FACTOR * n^(-1/3)`.
pub const RS_FACTOR: f64 = 0.620_350_490_899_400_1_f64;

/// Slater exchange per particle of the unpolarized gas is `-LDA_X_FACTOR / rs`.
pub const LDA_X_FACTOR: f64 = 0.458_165_293_283_142_87_f64;

/// Per-channel exchange prefactor `(3/4)(6/pi)^(1/3)`.
pub const X_FACTOR_SPIN: f64 = 0.930_525_736_349_1_f64;

/// Converts the per-channel reduced gradient `x_s` to the PBE variable `s`.
pub const X2S: f64 = 0.128_278_243_853_042_2_f64;

/// `1/(2^(4/3) - 2)`, the normalisation of the spin interpolation `f(zeta)`.
pub const FZETA_FACTOR: f64 = 1.923_661_050_931_536_2_f64;

/// `f''(0)` of the spin interpolation.
pub const FZETA_PP0: f64 = 1.709_920_934_161_365_3_f64;

/// `sqrt(pi) / (4 (3 pi^2)^(1/6))`, the `t = T_FACTOR sqrt(sigma) / (phi n^(7/6))` prefactor.
pub const T_FACTOR: f64 = 0.251_928_970_342_244_9_f64;

/// `(1 - ln 2) / pi^2`, the high-density coefficient of the PBE gradient term.
pub const PBE_GAMMA: f64 = 0.031_090_690_869_654_9_f64;
