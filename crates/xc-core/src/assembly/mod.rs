//! Potential assembly: maps a jet of the energy density onto the derivative
//! arrays the host reads.

pub mod perdew;

pub use perdew::{PerdewParams, PerdewPartials, perdew_potentials};

use crate::domain::{DerivativeOrder, SpinPolarization};
use crate::numerics::jet::{Jet, RHO_DOWN, RHO_UP, SIGMA_DD, SIGMA_UD, SIGMA_UU};
use serde::Serialize;

/// Results for one grid point in the host layout. Unpolarized points use the
/// leading entry of each array; entries above the evaluated order stay zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct XcPoint {
    pub zk: f64,
    pub vrho: [f64; 2],
    pub vsigma: [f64; 3],
    pub v2rho2: [f64; 3],
    pub v2rhosigma: [f64; 6],
    pub v2sigma2: [f64; 6],
}

const RHO_SLOTS: [usize; 2] = [RHO_UP, RHO_DOWN];
const SIGMA_SLOTS: [usize; 3] = [SIGMA_UU, SIGMA_UD, SIGMA_DD];

impl XcPoint {
    /// Adds `coefficient * other` entry by entry.
    pub fn accumulate(&mut self, coefficient: f64, other: &XcPoint) {
        self.zk += coefficient * other.zk;
        for (acc, value) in self.vrho.iter_mut().zip(other.vrho) {
            *acc += coefficient * value;
        }
        for (acc, value) in self.vsigma.iter_mut().zip(other.vsigma) {
            *acc += coefficient * value;
        }
        for (acc, value) in self.v2rho2.iter_mut().zip(other.v2rho2) {
            *acc += coefficient * value;
        }
        for (acc, value) in self.v2rhosigma.iter_mut().zip(other.v2rhosigma) {
            *acc += coefficient * value;
        }
        for (acc, value) in self.v2sigma2.iter_mut().zip(other.v2sigma2) {
            *acc += coefficient * value;
        }
    }

    /// Clears every entry above `order`.
    pub fn truncated(mut self, order: DerivativeOrder) -> Self {
        if !order.first() {
            self.vrho = [0.0; 2];
            self.vsigma = [0.0; 3];
        }
        if !order.second() {
            self.v2rho2 = [0.0; 3];
            self.v2rhosigma = [0.0; 6];
            self.v2sigma2 = [0.0; 6];
        }
        self
    }

    pub fn is_finite(&self) -> bool {
        std::iter::once(self.zk)
            .chain(self.vrho)
            .chain(self.vsigma)
            .chain(self.v2rho2)
            .chain(self.v2rhosigma)
            .chain(self.v2sigma2)
            .all(f64::is_finite)
    }
}

/// Assembles a point from the energy per particle `energy` and the total
/// density `density`, both as jets.
pub fn assemble_energy(
    energy: &Jet,
    density: &Jet,
    spin: SpinPolarization,
    order: DerivativeOrder,
) -> XcPoint {
    let energy_density = *energy * *density;
    let mut point = assemble_energy_density(&energy_density, density.value, spin, order);
    point.zk = energy.value;
    point
}

/// Assembles a point from the energy density `n * zk` directly.
pub fn assemble_energy_density(
    energy_density: &Jet,
    density: f64,
    spin: SpinPolarization,
    order: DerivativeOrder,
) -> XcPoint {
    let mut point = XcPoint {
        zk: energy_density.value / density,
        ..XcPoint::default()
    };
    let channels = spin.channels();
    let sigmas = spin.layout().sigma;

    if order.first() {
        for (s, &slot) in RHO_SLOTS.iter().take(channels).enumerate() {
            point.vrho[s] = energy_density.grad[slot];
        }
        for (k, &slot) in SIGMA_SLOTS.iter().take(sigmas).enumerate() {
            point.vsigma[k] = energy_density.grad[slot];
        }
    }

    if order.second() {
        let h = &energy_density.hess;
        match spin {
            SpinPolarization::Unpolarized => {
                point.v2rho2[0] = h[RHO_UP][RHO_UP];
                point.v2rhosigma[0] = h[RHO_UP][SIGMA_UU];
                point.v2sigma2[0] = h[SIGMA_UU][SIGMA_UU];
            }
            SpinPolarization::Polarized => {
                point.v2rho2 = [h[RHO_UP][RHO_UP], h[RHO_UP][RHO_DOWN], h[RHO_DOWN][RHO_DOWN]];
                for (s, &rs) in RHO_SLOTS.iter().enumerate() {
                    for (k, &ks) in SIGMA_SLOTS.iter().enumerate() {
                        point.v2rhosigma[3 * s + k] = h[rs][ks];
                    }
                }
                let mut index = 0;
                for a in 0..3 {
                    for b in a..3 {
                        point.v2sigma2[index] = h[SIGMA_SLOTS[a]][SIGMA_SLOTS[b]];
                        index += 1;
                    }
                }
            }
        }
    }

    point
}

/// Rebuilds the energy per particle as a jet over the density slots from an
/// already assembled local-density point.
pub fn energy_jet(point: &XcPoint, density: f64, spin: SpinPolarization) -> Jet {
    let mut jet = Jet::constant(point.zk);
    let e = point.zk;
    match spin {
        SpinPolarization::Unpolarized => {
            let de = (point.vrho[0] - e) / density;
            jet.grad[RHO_UP] = de;
            jet.hess[RHO_UP][RHO_UP] = (point.v2rho2[0] - 2.0 * de) / density;
        }
        SpinPolarization::Polarized => {
            let de = [
                (point.vrho[0] - e) / density,
                (point.vrho[1] - e) / density,
            ];
            jet.grad[RHO_UP] = de[0];
            jet.grad[RHO_DOWN] = de[1];
            let f = [
                [point.v2rho2[0], point.v2rho2[1]],
                [point.v2rho2[1], point.v2rho2[2]],
            ];
            for s in 0..2 {
                for t in 0..2 {
                    jet.hess[RHO_SLOTS[s]][RHO_SLOTS[t]] = (f[s][t] - de[s] - de[t]) / density;
                }
            }
        }
    }
    jet
}
