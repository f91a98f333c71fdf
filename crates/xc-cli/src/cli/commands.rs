use super::CliError;
use super::helpers::{
    EvaluationReport, InputPoint, PointReport, normalize_points, read_points_file, read_settings,
};
use anyhow::Context;
use std::path::PathBuf;
use tracing::info;
use xc_core::registry;
use xc_core::{
    DerivativeOrder, FunctionalState, SpinPolarization, XcBuffers, XcInput, XcKernel,
};

#[derive(clap::Args)]
pub(super) struct DescribeArgs {
    /// Functional identifier or short name (e.g. 130 or gga_c_pbe)
    #[arg(value_name = "functional")]
    functional: String,
}

#[derive(clap::Args)]
pub(super) struct EvaluateArgs {
    /// Functional identifier or short name
    #[arg(value_name = "functional")]
    functional: String,

    /// Evaluate with two spin channels
    #[arg(long)]
    polarized: bool,

    /// Highest derivative order: 0 energy, 1 potential, 2 kernel
    #[arg(long, default_value_t = 1)]
    order: u8,

    /// Density of a single point (one value, or up,down when polarized)
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, conflicts_with = "input")]
    rho: Vec<f64>,

    /// Squared gradients of that point (one value, or uu,ud,dd when polarized)
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, requires = "rho")]
    sigma: Vec<f64>,

    /// JSON file of the form {"points": [{"rho": [...], "sigma": [...]}]}
    #[arg(long)]
    input: Option<PathBuf>,

    /// Evaluation settings JSON
    #[arg(long)]
    settings: Option<PathBuf>,
}

pub(super) fn run_list_command() -> Result<i32, CliError> {
    for descriptor in registry::descriptors() {
        println!(
            "{:>4}  {:<20} {:<11} {}",
            descriptor.id,
            descriptor.name,
            descriptor.family.as_str(),
            descriptor.kind
        );
    }
    Ok(0)
}

pub(super) fn run_describe_command(args: DescribeArgs) -> Result<i32, CliError> {
    let descriptor = registry::resolve(&args.functional)?;
    let rendered =
        serde_json::to_string_pretty(descriptor).context("failed to serialize descriptor")?;
    println!("{rendered}");
    Ok(0)
}

pub(super) fn run_evaluate_command(args: EvaluateArgs) -> Result<i32, CliError> {
    let descriptor = registry::resolve(&args.functional)?;
    let order = DerivativeOrder::from_u8(args.order)?;
    let spin = if args.polarized {
        SpinPolarization::Polarized
    } else {
        SpinPolarization::Unpolarized
    };
    let settings = read_settings(args.settings.as_deref())?;

    let points = match &args.input {
        Some(path) => read_points_file(path)?,
        None if args.rho.is_empty() => Vec::new(),
        None => vec![InputPoint {
            rho: args.rho,
            sigma: args.sigma,
        }],
    };
    let points = normalize_points(points, descriptor, spin)?;

    let state = FunctionalState::with_settings(descriptor.id, spin, order, settings)?;
    let gradient = state.family().needs_gradient();
    let rho: Vec<f64> = points.iter().flat_map(|point| point.rho.iter().copied()).collect();
    let sigma: Vec<f64> = points
        .iter()
        .flat_map(|point| point.sigma.iter().copied())
        .collect();

    let mut buffers = XcBuffers::for_kernel(&state, points.len());
    state.evaluate_parallel(XcInput::gga(&rho, &sigma), buffers.output());
    info!(
        name = descriptor.name,
        points = points.len(),
        "evaluated functional"
    );

    let reports = points
        .into_iter()
        .enumerate()
        .map(|(index, point)| {
            PointReport::new(point, &buffers.point(index, spin), spin, order, gradient)
        })
        .collect();
    let report = EvaluationReport {
        id: descriptor.id,
        name: descriptor.name,
        family: descriptor.family.as_str(),
        spin,
        order: order.as_u8(),
        exx_coefficient: state.exx_coefficient(),
        points: reports,
    };
    let rendered =
        serde_json::to_string_pretty(&report).context("failed to serialize evaluation report")?;
    println!("{rendered}");
    Ok(0)
}
