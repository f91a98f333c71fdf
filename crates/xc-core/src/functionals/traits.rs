use crate::assembly::XcPoint;
use crate::domain::{DerivativeOrder, Family, SpinPolarization};

/// Uniform evaluation contract shared by every initialised functional.
///
/// `rho` holds one entry per spin channel and `sigma` the squared-gradient
/// contractions of the point (empty for local-density kernels). Points at or
/// below the density threshold evaluate to [`XcPoint::default`].
pub trait XcKernel: Send + Sync {
    fn family(&self) -> Family;

    fn spin(&self) -> SpinPolarization;

    fn order(&self) -> DerivativeOrder;

    fn evaluate_point(&self, rho: &[f64], sigma: &[f64]) -> XcPoint;
}
