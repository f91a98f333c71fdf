pub mod gga;
pub mod grid;
pub mod hybrid;
pub mod lda;
pub mod state;
pub mod traits;

pub use gga::{GgaFunctional, GgaRecipe};
pub use grid::{XcBuffers, XcInput, XcOutput, evaluate_batch, evaluate_batch_parallel};
pub use hybrid::{HybridFunctional, HybridRecipe, Mix};
pub use lda::{LdaFunctional, LdaRecipe};
pub use state::{Functional, FunctionalState};
pub use traits::XcKernel;
