//! Second-order forward derivative carrier.
//!
//! A [`Jet`] holds a value together with its gradient and Hessian with
//! respect to the host variables of one grid point. Slot `0` is the up (or
//! total) density, slot `1` the down density, slots `2..5` the squared
//! gradient contractions `uu`, `ud`, `dd` (slot `2` alone when unpolarized).
//! Gradients never read Hessian entries, so first derivatives come out
//! bit-identical whether or not second derivatives are requested.

use std::ops::{Add, Mul, Neg, Sub};

pub const SLOTS: usize = 5;

pub const RHO_UP: usize = 0;
pub const RHO_DOWN: usize = 1;
pub const SIGMA_UU: usize = 2;
pub const SIGMA_UD: usize = 3;
pub const SIGMA_DD: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Jet {
    pub value: f64,
    pub grad: [f64; SLOTS],
    pub hess: [[f64; SLOTS]; SLOTS],
}

impl Jet {
    pub const fn constant(value: f64) -> Self {
        Self {
            value,
            grad: [0.0; SLOTS],
            hess: [[0.0; SLOTS]; SLOTS],
        }
    }

    pub const fn variable(value: f64, slot: usize) -> Self {
        let mut jet = Self::constant(value);
        jet.grad[slot] = 1.0;
        jet
    }

    /// Applies a scalar function given its value and first two derivatives
    /// at `self.value`.
    pub fn compose(&self, value: f64, d1: f64, d2: f64) -> Self {
        let mut out = Self::constant(value);
        for i in 0..SLOTS {
            out.grad[i] = d1 * self.grad[i];
        }
        for i in 0..SLOTS {
            for j in 0..SLOTS {
                out.hess[i][j] = d1 * self.hess[i][j] + d2 * self.grad[i] * self.grad[j];
            }
        }
        out
    }

    /// Multivariate chain rule: `value = G(q_1..q_N)` with partials
    /// `grad[a] = dG/dq_a` and `hess[a][b] = d2G/dq_a dq_b`.
    pub fn chain<const N: usize>(
        value: f64,
        inner: [&Jet; N],
        grad: [f64; N],
        hess: [[f64; N]; N],
    ) -> Self {
        let mut out = Self::constant(value);
        for (a, q) in inner.iter().enumerate() {
            if grad[a] == 0.0 {
                continue;
            }
            for i in 0..SLOTS {
                out.grad[i] += grad[a] * q.grad[i];
                for j in 0..SLOTS {
                    out.hess[i][j] += grad[a] * q.hess[i][j];
                }
            }
        }
        for (a, qa) in inner.iter().enumerate() {
            for (b, qb) in inner.iter().enumerate() {
                let g = hess[a][b];
                if g == 0.0 {
                    continue;
                }
                for i in 0..SLOTS {
                    for j in 0..SLOTS {
                        out.hess[i][j] += g * qa.grad[i] * qb.grad[j];
                    }
                }
            }
        }
        out
    }

    /// Raises the value to at least `floor`, keeping the derivatives.
    pub fn floored(mut self, floor: f64) -> Self {
        if self.value < floor {
            self.value = floor;
        }
        self
    }

    pub fn scale(&self, factor: f64) -> Self {
        let mut out = *self;
        out.value *= factor;
        for i in 0..SLOTS {
            out.grad[i] *= factor;
            for j in 0..SLOTS {
                out.hess[i][j] *= factor;
            }
        }
        out
    }

    pub fn recip(&self) -> Self {
        let inv = 1.0 / self.value;
        self.compose(inv, -inv * inv, 2.0 * inv * inv * inv)
    }

    pub fn ln(&self) -> Self {
        let inv = 1.0 / self.value;
        self.compose(self.value.ln(), inv, -inv * inv)
    }

    pub fn exp(&self) -> Self {
        let e = self.value.exp();
        self.compose(e, e, e)
    }

    pub fn sqrt(&self) -> Self {
        let root = self.value.sqrt();
        let d1 = 0.5 / root;
        self.compose(root, d1, -0.5 * d1 / self.value)
    }

    pub fn powf(&self, exponent: f64) -> Self {
        let p = self.value.powf(exponent);
        let d1 = exponent * p / self.value;
        let d2 = (exponent - 1.0) * d1 / self.value;
        self.compose(p, d1, d2)
    }
}

impl Add for Jet {
    type Output = Jet;

    fn add(mut self, rhs: Jet) -> Jet {
        self.value += rhs.value;
        for i in 0..SLOTS {
            self.grad[i] += rhs.grad[i];
            for j in 0..SLOTS {
                self.hess[i][j] += rhs.hess[i][j];
            }
        }
        self
    }
}

impl Add<f64> for Jet {
    type Output = Jet;

    fn add(mut self, rhs: f64) -> Jet {
        self.value += rhs;
        self
    }
}

impl Sub for Jet {
    type Output = Jet;

    fn sub(self, rhs: Jet) -> Jet {
        self + (-rhs)
    }
}

impl Neg for Jet {
    type Output = Jet;

    fn neg(self) -> Jet {
        self.scale(-1.0)
    }
}

impl Mul<f64> for Jet {
    type Output = Jet;

    fn mul(self, rhs: f64) -> Jet {
        self.scale(rhs)
    }
}

impl Mul for Jet {
    type Output = Jet;

    fn mul(self, rhs: Jet) -> Jet {
        let mut out = Jet::constant(self.value * rhs.value);
        for i in 0..SLOTS {
            out.grad[i] = self.value * rhs.grad[i] + rhs.value * self.grad[i];
        }
        for i in 0..SLOTS {
            for j in 0..SLOTS {
                out.hess[i][j] = self.value * rhs.hess[i][j]
                    + rhs.value * self.hess[i][j]
                    + self.grad[i] * rhs.grad[j]
                    + rhs.grad[i] * self.grad[j];
            }
        }
        out
    }
}
