//! Generalized-gradient kernels.

pub mod exchange;
pub mod p86;
pub mod pbe;

pub use exchange::{ExchangeEnhancement, GgaExchange};
pub use p86::P86Correlation;
pub use pbe::{PbeCorrelation, PbeVariant};

use crate::assembly::XcPoint;
use crate::common::settings::EvaluationSettings;
use crate::domain::{DerivativeOrder, Family, SpinPolarization};
use crate::functionals::traits::XcKernel;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kernel", content = "variant", rename_all = "snake_case")]
pub enum GgaRecipe {
    Exchange(ExchangeEnhancement),
    PbeCorrelation(PbeVariant),
    P86Correlation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GgaKernel {
    Exchange(GgaExchange),
    Pbe(PbeCorrelation),
    P86(P86Correlation),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GgaFunctional {
    recipe: GgaRecipe,
    spin: SpinPolarization,
    order: DerivativeOrder,
    kernel: GgaKernel,
}

impl GgaFunctional {
    pub fn new(
        recipe: GgaRecipe,
        spin: SpinPolarization,
        order: DerivativeOrder,
        settings: EvaluationSettings,
    ) -> Self {
        let kernel = match recipe {
            GgaRecipe::Exchange(enhancement) => {
                GgaKernel::Exchange(GgaExchange::new(enhancement, spin, order, settings))
            }
            GgaRecipe::PbeCorrelation(variant) => {
                GgaKernel::Pbe(PbeCorrelation::new(variant, spin, order, settings))
            }
            GgaRecipe::P86Correlation => {
                GgaKernel::P86(P86Correlation::new(spin, order, settings))
            }
        };
        Self {
            recipe,
            spin,
            order,
            kernel,
        }
    }

    pub fn recipe(&self) -> GgaRecipe {
        self.recipe
    }

    pub fn kernel(&self) -> &GgaKernel {
        &self.kernel
    }
}

impl XcKernel for GgaFunctional {
    fn family(&self) -> Family {
        Family::Gga
    }

    fn spin(&self) -> SpinPolarization {
        self.spin
    }

    fn order(&self) -> DerivativeOrder {
        self.order
    }

    fn evaluate_point(&self, rho: &[f64], sigma: &[f64]) -> XcPoint {
        match &self.kernel {
            GgaKernel::Exchange(kernel) => kernel.evaluate_point(rho, sigma),
            GgaKernel::Pbe(kernel) => kernel.evaluate_point(rho, sigma),
            GgaKernel::P86(kernel) => kernel.evaluate_point(rho, sigma),
        }
    }
}
