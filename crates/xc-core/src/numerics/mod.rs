pub mod jet;
pub mod spin;

pub use jet::{Jet, SLOTS};
pub use spin::SpinDensities;
