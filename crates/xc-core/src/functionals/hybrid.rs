//! Linear composition of local and semi-local functionals.
//!
//! A hybrid owns one state per constituent and evaluates to
//! `sum(coefficient_i * point_i)`. The exact-exchange fraction is metadata
//! for the host and never enters the evaluated point.

use super::state::FunctionalState;
use super::traits::XcKernel;
use crate::assembly::XcPoint;
use crate::common::settings::EvaluationSettings;
use crate::domain::{DerivativeOrder, Family, FunctionalId, SpinPolarization, XcError, XcResult};
use serde::Serialize;
use tracing::{debug, trace};

/// One `(identifier, coefficient)` entry of a registered recipe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Mix {
    pub id: FunctionalId,
    pub coefficient: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HybridRecipe {
    pub exx: f64,
    pub lda: &'static [Mix],
    pub gga: &'static [Mix],
}

#[derive(Debug)]
pub struct Constituent {
    pub coefficient: f64,
    pub state: FunctionalState,
}

#[derive(Debug)]
pub struct HybridFunctional {
    exx: f64,
    spin: SpinPolarization,
    order: DerivativeOrder,
    lda: Vec<Constituent>,
    gga: Vec<Constituent>,
}

fn reserve(count: usize) -> XcResult<Vec<Constituent>> {
    let mut parts = Vec::new();
    parts
        .try_reserve_exact(count)
        .map_err(|_| XcError::ResourceExhausted { count })?;
    Ok(parts)
}

impl HybridFunctional {
    fn empty(
        exx: f64,
        spin: SpinPolarization,
        order: DerivativeOrder,
        lda: usize,
        gga: usize,
    ) -> XcResult<Self> {
        Ok(Self {
            exx,
            spin,
            order,
            lda: reserve(lda)?,
            gga: reserve(gga)?,
        })
    }

    /// Initialises every constituent of `recipe`. On failure the constituents
    /// built so far are released before the error is returned.
    pub fn from_recipe(
        recipe: &HybridRecipe,
        spin: SpinPolarization,
        order: DerivativeOrder,
        settings: EvaluationSettings,
    ) -> XcResult<Self> {
        let mut hybrid = Self::empty(recipe.exx, spin, order, recipe.lda.len(), recipe.gga.len())?;
        for (expected, mixes) in [(Family::Lda, recipe.lda), (Family::Gga, recipe.gga)] {
            for mix in mixes {
                let state = FunctionalState::with_settings(mix.id, spin, order, settings)?;
                hybrid.attach(expected, mix.coefficient, state)?;
            }
        }
        Ok(hybrid)
    }

    /// Composes already initialised states. Every part must share `spin`,
    /// belong to the family of its slot and serve at least `order`.
    pub fn from_parts(
        exx: f64,
        lda: Vec<(f64, FunctionalState)>,
        gga: Vec<(f64, FunctionalState)>,
        spin: SpinPolarization,
        order: DerivativeOrder,
    ) -> XcResult<Self> {
        let mut hybrid = Self::empty(exx, spin, order, lda.len(), gga.len())?;
        for (coefficient, state) in lda {
            hybrid.attach(Family::Lda, coefficient, state)?;
        }
        for (coefficient, state) in gga {
            hybrid.attach(Family::Gga, coefficient, state)?;
        }
        Ok(hybrid)
    }

    fn attach(&mut self, expected: Family, coefficient: f64, state: FunctionalState) -> XcResult<()> {
        let id = state.id();
        if state.spin() != self.spin {
            return Err(XcError::SpinMismatch {
                id,
                expected: self.spin.channels(),
                found: state.spin().channels(),
            });
        }
        if state.family() != expected {
            return Err(XcError::FamilyMismatch {
                id,
                expected,
                found: state.family(),
            });
        }
        if state.order() < self.order {
            return Err(XcError::UnsupportedOrder {
                id,
                name: state.descriptor().name,
                order: self.order.as_u8(),
            });
        }

        debug!(
            id,
            name = state.descriptor().name,
            coefficient,
            part = %expected,
            "attached hybrid constituent"
        );
        let part = Constituent { coefficient, state };
        match expected {
            Family::Lda => self.lda.push(part),
            _ => self.gga.push(part),
        }
        Ok(())
    }

    pub fn exx_coefficient(&self) -> f64 {
        self.exx
    }

    /// Constituents in construction order: local part first.
    pub fn constituents(&self) -> impl Iterator<Item = &Constituent> {
        self.lda.iter().chain(self.gga.iter())
    }
}

impl XcKernel for HybridFunctional {
    fn family(&self) -> Family {
        Family::HybridGga
    }

    fn spin(&self) -> SpinPolarization {
        self.spin
    }

    fn order(&self) -> DerivativeOrder {
        self.order
    }

    fn evaluate_point(&self, rho: &[f64], sigma: &[f64]) -> XcPoint {
        let mut total = XcPoint::default();
        for part in self.constituents() {
            let point = part.state.evaluate_point(rho, sigma);
            total.accumulate(part.coefficient, &point);
        }
        total.truncated(self.order)
    }
}

impl Drop for HybridFunctional {
    fn drop(&mut self) {
        while let Some(part) = self.gga.pop() {
            trace!(id = part.state.id(), "releasing hybrid constituent");
        }
        while let Some(part) = self.lda.pop() {
            trace!(id = part.state.id(), "releasing hybrid constituent");
        }
    }
}
