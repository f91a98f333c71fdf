//! Exchange-correlation functionals for density-functional codes.
//!
//! A host selects a functional by its numeric identifier, receives a
//! [`FunctionalState`] and evaluates it over grid arrays laid out the way
//! libxc lays them out.

pub mod assembly;
pub mod common;
pub mod domain;
pub mod functionals;
pub mod numerics;
pub mod registry;

pub use assembly::XcPoint;
pub use common::{EvaluationSettings, SettingsError, load_evaluation_settings};
pub use domain::{
    Capabilities, DerivativeOrder, Family, FunctionalId, FunctionalKind, SpinPolarization,
    XcError, XcErrorCategory, XcResult,
};
pub use functionals::{FunctionalState, XcBuffers, XcInput, XcKernel, XcOutput};
pub use registry::FunctionalDescriptor;
