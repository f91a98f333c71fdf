use super::CliError;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use xc_core::{
    DerivativeOrder, EvaluationSettings, FunctionalDescriptor, SettingsError, SpinPolarization,
    XcPoint, load_evaluation_settings,
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct PointsFile {
    pub(super) points: Vec<InputPoint>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct InputPoint {
    pub(super) rho: Vec<f64>,
    #[serde(default)]
    pub(super) sigma: Vec<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct EvaluationReport {
    pub(super) id: u32,
    pub(super) name: &'static str,
    pub(super) family: &'static str,
    pub(super) spin: SpinPolarization,
    pub(super) order: u8,
    pub(super) exx_coefficient: f64,
    pub(super) points: Vec<PointReport>,
}

#[derive(Debug, Serialize)]
pub(super) struct PointReport {
    pub(super) rho: Vec<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(super) sigma: Vec<f64>,
    pub(super) zk: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) vrho: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) vsigma: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) v2rho2: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) v2rhosigma: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) v2sigma2: Option<Vec<f64>>,
}

impl PointReport {
    pub(super) fn new(
        input: InputPoint,
        values: &XcPoint,
        spin: SpinPolarization,
        order: DerivativeOrder,
        gradient: bool,
    ) -> Self {
        let layout = spin.layout();
        let slice = |present: bool, entries: &[f64], stride: usize| {
            present.then(|| entries[..stride].to_vec())
        };
        Self {
            rho: input.rho,
            sigma: input.sigma,
            zk: values.zk,
            vrho: slice(order.first(), &values.vrho[..], layout.rho),
            vsigma: slice(order.first() && gradient, &values.vsigma[..], layout.sigma),
            v2rho2: slice(order.second(), &values.v2rho2[..], layout.v2rho2),
            v2rhosigma: slice(
                order.second() && gradient,
                &values.v2rhosigma[..],
                layout.v2rhosigma,
            ),
            v2sigma2: slice(order.second() && gradient, &values.v2sigma2[..], layout.v2sigma2),
        }
    }
}

pub(super) fn read_points_file(path: &Path) -> Result<Vec<InputPoint>, CliError> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("failed to read points file '{}'", path.display()))?;
    let parsed: PointsFile = serde_json::from_str(&source).map_err(|error| {
        CliError::Usage(format!(
            "failed to parse points file '{}': {error}",
            path.display()
        ))
    })?;
    Ok(parsed.points)
}

pub(super) fn read_settings(path: Option<&Path>) -> Result<EvaluationSettings, CliError> {
    let Some(path) = path else {
        return Ok(EvaluationSettings::default());
    };
    load_evaluation_settings(path).map_err(|error| match error {
        SettingsError::Read { .. } => CliError::Internal(anyhow::Error::new(error)),
        SettingsError::Parse { .. } | SettingsError::Invalid { .. } => {
            CliError::Usage(error.to_string())
        }
    })
}

/// Fills in zero gradients for gradient functionals and checks the shape of
/// every point against the spin layout.
pub(super) fn normalize_points(
    points: Vec<InputPoint>,
    descriptor: &FunctionalDescriptor,
    spin: SpinPolarization,
) -> Result<Vec<InputPoint>, CliError> {
    if points.is_empty() {
        return Err(CliError::Usage(
            "no grid points given; pass --rho or --input".to_string(),
        ));
    }
    let layout = spin.layout();
    let gradient = descriptor.family.needs_gradient();

    points
        .into_iter()
        .enumerate()
        .map(|(index, mut point)| {
            if point.rho.len() != layout.rho {
                return Err(CliError::Usage(format!(
                    "point {index}: expected {} rho value(s) for {} channel(s), got {}",
                    layout.rho,
                    spin.channels(),
                    point.rho.len()
                )));
            }
            if let Some(value) = point.rho.iter().find(|value| value.is_nan() || **value < 0.0) {
                return Err(CliError::Usage(format!(
                    "point {index}: density {value} must be non-negative"
                )));
            }
            if !gradient {
                point.sigma.clear();
            } else if point.sigma.is_empty() {
                point.sigma = vec![0.0; layout.sigma];
            } else if point.sigma.len() != layout.sigma {
                return Err(CliError::Usage(format!(
                    "point {index}: expected {} sigma value(s), got {}",
                    layout.sigma,
                    point.sigma.len()
                )));
            }
            Ok(point)
        })
        .collect()
}
