use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_DENSITY_THRESHOLD: f64 = 1.0e-14;
pub const DEFAULT_SIGMA_THRESHOLD: f64 = 1.0e-20;
pub const DEFAULT_ZETA_THRESHOLD: f64 = 1.0e-10;
pub const DEFAULT_PARALLEL_CHUNK: usize = 256;

/// Numerical cut-offs shared by every kernel of one functional state.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct EvaluationSettings {
    pub density_threshold: f64,
    pub sigma_threshold: f64,
    pub zeta_threshold: f64,
    pub parallel_chunk: usize,
}

impl Default for EvaluationSettings {
    fn default() -> Self {
        Self {
            density_threshold: DEFAULT_DENSITY_THRESHOLD,
            sigma_threshold: DEFAULT_SIGMA_THRESHOLD,
            zeta_threshold: DEFAULT_ZETA_THRESHOLD,
            parallel_chunk: DEFAULT_PARALLEL_CHUNK,
        }
    }
}

impl EvaluationSettings {
    /// Rejects thresholds that would let a kernel divide by zero or take a
    /// logarithm of a non-positive number.
    pub fn validate(&self) -> Result<(), String> {
        for (field, value) in [
            ("densityThreshold", self.density_threshold),
            ("sigmaThreshold", self.sigma_threshold),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(format!("{field} must be finite and positive, got {value:e}"));
            }
        }
        if !(self.zeta_threshold > 0.0 && self.zeta_threshold < 1.0) {
            return Err(format!(
                "zetaThreshold must lie in (0, 1), got {:e}",
                self.zeta_threshold
            ));
        }
        if self.parallel_chunk == 0 {
            return Err("parallelChunk must be at least 1".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read evaluation settings '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse evaluation settings '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid evaluation settings '{}': {reason}", path.display())]
    Invalid { path: PathBuf, reason: String },
}

pub fn load_evaluation_settings(
    settings_path: impl AsRef<Path>,
) -> Result<EvaluationSettings, SettingsError> {
    let settings_path = settings_path.as_ref();
    let source = fs::read_to_string(settings_path).map_err(|source| SettingsError::Read {
        path: settings_path.to_path_buf(),
        source,
    })?;
    let settings: EvaluationSettings =
        serde_json::from_str(&source).map_err(|source| SettingsError::Parse {
            path: settings_path.to_path_buf(),
            source,
        })?;
    settings
        .validate()
        .map_err(|reason| SettingsError::Invalid {
            path: settings_path.to_path_buf(),
            reason,
        })?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::{EvaluationSettings, SettingsError, load_evaluation_settings};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_documented_thresholds() {
        let settings = EvaluationSettings::default();
        assert_eq!(settings.density_threshold, 1.0e-14);
        assert_eq!(settings.sigma_threshold, 1.0e-20);
        assert_eq!(settings.zeta_threshold, 1.0e-10);
        assert_eq!(settings.parallel_chunk, 256);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let temp = TempDir::new().expect("tempdir should be created");
        let path = temp.path().join("settings.json");
        fs::write(&path, r#"{ "densityThreshold": 1e-12, "parallelChunk": 64 }"#)
            .expect("settings should be written");

        let settings = load_evaluation_settings(&path).expect("settings should load");
        assert_eq!(settings.density_threshold, 1.0e-12);
        assert_eq!(settings.parallel_chunk, 64);
        assert_eq!(settings.sigma_threshold, 1.0e-20);
    }

    #[test]
    fn loader_reports_read_parse_and_range_failures() {
        let temp = TempDir::new().expect("tempdir should be created");

        let missing = load_evaluation_settings(temp.path().join("missing.json"))
            .expect_err("missing file should fail");
        assert!(matches!(missing, SettingsError::Read { .. }));

        let malformed_path = temp.path().join("malformed.json");
        fs::write(&malformed_path, "{ densityThreshold: }").expect("file should be written");
        let malformed =
            load_evaluation_settings(&malformed_path).expect_err("malformed json should fail");
        assert!(matches!(malformed, SettingsError::Parse { .. }));

        let unknown_path = temp.path().join("unknown.json");
        fs::write(&unknown_path, r#"{ "densityCutoff": 1e-10 }"#).expect("file should be written");
        let unknown = load_evaluation_settings(&unknown_path).expect_err("unknown key should fail");
        assert!(matches!(unknown, SettingsError::Parse { .. }));

        let invalid_path = temp.path().join("invalid.json");
        fs::write(&invalid_path, r#"{ "zetaThreshold": 1.5 }"#).expect("file should be written");
        let invalid = load_evaluation_settings(&invalid_path).expect_err("range check should fail");
        assert!(matches!(invalid, SettingsError::Invalid { .. }));
        assert!(invalid.to_string().contains("zetaThreshold"));
    }
}
