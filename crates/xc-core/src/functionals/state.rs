//! Initialised functional selected from the registry.

use super::gga::GgaFunctional;
use super::grid::{XcInput, XcOutput, evaluate_batch, evaluate_batch_parallel};
use super::hybrid::HybridFunctional;
use super::lda::LdaFunctional;
use super::traits::XcKernel;
use crate::assembly::XcPoint;
use crate::common::settings::EvaluationSettings;
use crate::domain::{DerivativeOrder, Family, FunctionalId, SpinPolarization, XcError, XcResult};
use crate::registry::{self, FunctionalDescriptor, Recipe};
use tracing::{debug, trace};

#[derive(Debug)]
pub enum Functional {
    Lda(LdaFunctional),
    Gga(GgaFunctional),
    Hybrid(HybridFunctional),
}

impl Functional {
    fn kernel(&self) -> &dyn XcKernel {
        match self {
            Self::Lda(kernel) => kernel,
            Self::Gga(kernel) => kernel,
            Self::Hybrid(kernel) => kernel,
        }
    }
}

/// A functional bound to a spin-channel count and a derivative order.
///
/// Construction either yields a fully usable state or an error; nothing half
/// built outlives a failed call.
#[derive(Debug)]
pub struct FunctionalState {
    descriptor: &'static FunctionalDescriptor,
    spin: SpinPolarization,
    order: DerivativeOrder,
    settings: EvaluationSettings,
    functional: Functional,
}

impl FunctionalState {
    pub fn new(id: FunctionalId, spin: SpinPolarization, order: DerivativeOrder) -> XcResult<Self> {
        Self::with_settings(id, spin, order, EvaluationSettings::default())
    }

    pub fn with_settings(
        id: FunctionalId,
        spin: SpinPolarization,
        order: DerivativeOrder,
        settings: EvaluationSettings,
    ) -> XcResult<Self> {
        settings
            .validate()
            .map_err(|reason| XcError::InvalidSettings { reason })?;
        let descriptor = registry::lookup(id)?;
        if !descriptor.capabilities.supports(order) {
            return Err(XcError::UnsupportedOrder {
                id,
                name: descriptor.name,
                order: order.as_u8(),
            });
        }

        let functional = match &descriptor.recipe {
            Recipe::Lda(recipe) => {
                Functional::Lda(LdaFunctional::new(*recipe, spin, order, settings))
            }
            Recipe::Gga(recipe) => {
                Functional::Gga(GgaFunctional::new(*recipe, spin, order, settings))
            }
            Recipe::Hybrid(recipe) => Functional::Hybrid(HybridFunctional::from_recipe(
                recipe, spin, order, settings,
            )?),
        };

        debug!(
            id,
            name = descriptor.name,
            family = %descriptor.family,
            channels = spin.channels(),
            order = order.as_u8(),
            "initialised functional state"
        );
        Ok(Self {
            descriptor,
            spin,
            order,
            settings,
            functional,
        })
    }

    /// Same as [`FunctionalState::new`] with the functional named by its
    /// registry short name or numeric identifier.
    pub fn from_name(name: &str, spin: SpinPolarization, order: DerivativeOrder) -> XcResult<Self> {
        let descriptor = registry::resolve(name)?;
        Self::new(descriptor.id, spin, order)
    }

    pub fn descriptor(&self) -> &'static FunctionalDescriptor {
        self.descriptor
    }

    pub fn id(&self) -> FunctionalId {
        self.descriptor.id
    }

    pub fn settings(&self) -> &EvaluationSettings {
        &self.settings
    }

    pub fn functional(&self) -> &Functional {
        &self.functional
    }

    /// Fraction of exact exchange the host must add itself.
    pub fn exx_coefficient(&self) -> f64 {
        match &self.functional {
            Functional::Hybrid(hybrid) => hybrid.exx_coefficient(),
            _ => 0.0,
        }
    }

    pub fn evaluate_point(&self, rho: &[f64], sigma: &[f64]) -> XcPoint {
        self.functional.kernel().evaluate_point(rho, sigma)
    }

    /// Evaluates every point of `input` in order, writing into `output`.
    ///
    /// # Panics
    ///
    /// When the slice lengths or the set of present buffers do not match the
    /// spin, family and order of this state.
    pub fn evaluate(&self, input: XcInput<'_>, output: XcOutput<'_>) {
        evaluate_batch(self, input, output);
    }

    /// Same contract as [`FunctionalState::evaluate`], spread over the rayon
    /// pool in chunks of at least `parallel_chunk` points.
    pub fn evaluate_parallel(&self, input: XcInput<'_>, output: XcOutput<'_>) {
        evaluate_batch_parallel(self, input, output, self.settings.parallel_chunk);
    }
}

impl XcKernel for FunctionalState {
    fn family(&self) -> Family {
        self.descriptor.family
    }

    fn spin(&self) -> SpinPolarization {
        self.spin
    }

    fn order(&self) -> DerivativeOrder {
        self.order
    }

    fn evaluate_point(&self, rho: &[f64], sigma: &[f64]) -> XcPoint {
        FunctionalState::evaluate_point(self, rho, sigma)
    }
}

impl Drop for FunctionalState {
    fn drop(&mut self) {
        trace!(
            id = self.descriptor.id,
            name = self.descriptor.name,
            "releasing functional state"
        );
    }
}
