pub mod constants;
pub mod settings;

pub use settings::{EvaluationSettings, SettingsError, load_evaluation_settings};
