mod support;

use support::{assert_close, check_derivatives};
use xc_core::functionals::hybrid::{HybridFunctional, HybridRecipe, Mix};
use xc_core::registry::{
    GGA_C_P86, GGA_C_PBE, GGA_X_B88, GGA_X_PBE, HYB_GGA_XC_B3P86, HYB_GGA_XC_PBEH, LDA_C_PW,
    LDA_C_VWN_RPA, LDA_X,
};
use xc_core::{
    DerivativeOrder, EvaluationSettings, Family, FunctionalState, SpinPolarization, XcError,
    XcKernel,
};

fn state(id: u32, spin: SpinPolarization, order: DerivativeOrder) -> FunctionalState {
    FunctionalState::new(id, spin, order)
        .unwrap_or_else(|error| panic!("functional {id} should initialise: {error}"))
}

#[test]
fn registered_hybrids_report_their_exact_exchange_fraction() {
    let b3p86 = state(HYB_GGA_XC_B3P86, SpinPolarization::Unpolarized, DerivativeOrder::Potential);
    let pbeh = state(HYB_GGA_XC_PBEH, SpinPolarization::Polarized, DerivativeOrder::Kernel);
    assert_eq!(b3p86.exx_coefficient(), 0.20);
    assert_eq!(pbeh.exx_coefficient(), 0.25);
    assert_eq!(b3p86.family(), Family::HybridGga);
}

#[test]
fn pbeh_is_the_weighted_sum_of_its_constituents() {
    let spin = SpinPolarization::Polarized;
    let order = DerivativeOrder::Kernel;
    let rho = [0.07, 0.03];
    let sigma = [0.01, 0.004, 0.006];

    let hybrid = state(HYB_GGA_XC_PBEH, spin, order).evaluate_point(&rho, &sigma);
    let exchange = state(GGA_X_PBE, spin, order).evaluate_point(&rho, &sigma);
    let correlation = state(GGA_C_PBE, spin, order).evaluate_point(&rho, &sigma);

    assert_close(hybrid.zk, 0.75 * exchange.zk + correlation.zk, 1.0e-14, 0.0, "zk");
    for channel in 0..2 {
        assert_close(
            hybrid.vrho[channel],
            0.75 * exchange.vrho[channel] + correlation.vrho[channel],
            1.0e-14,
            0.0,
            "vrho",
        );
    }
    for index in 0..6 {
        assert_close(
            hybrid.v2sigma2[index],
            0.75 * exchange.v2sigma2[index] + correlation.v2sigma2[index],
            1.0e-13,
            1.0e-16,
            "v2sigma2",
        );
    }
}

#[test]
fn b3p86_mixes_local_and_gradient_parts() {
    let spin = SpinPolarization::Unpolarized;
    let order = DerivativeOrder::Potential;
    let (rho, sigma) = ([0.2], [0.05]);

    let hybrid = state(HYB_GGA_XC_B3P86, spin, order).evaluate_point(&rho, &sigma);
    let parts = [
        (0.08, state(LDA_X, spin, order).evaluate_point(&rho, &[])),
        (0.19, state(LDA_C_VWN_RPA, spin, order).evaluate_point(&rho, &[])),
        (0.72, state(GGA_X_B88, spin, order).evaluate_point(&rho, &sigma)),
        (0.81, state(GGA_C_P86, spin, order).evaluate_point(&rho, &sigma)),
    ];
    let zk: f64 = parts.iter().map(|(c, point)| c * point.zk).sum();
    let vrho: f64 = parts.iter().map(|(c, point)| c * point.vrho[0]).sum();
    let vsigma: f64 = parts.iter().map(|(c, point)| c * point.vsigma[0]).sum();
    assert_close(hybrid.zk, zk, 1.0e-12, 0.0, "zk");
    assert_close(hybrid.vrho[0], vrho, 1.0e-12, 0.0, "vrho");
    assert_close(hybrid.vsigma[0], vsigma, 1.0e-12, 0.0, "vsigma");
    assert_eq!(hybrid.v2rho2, [0.0; 3]);
}

#[test]
fn composed_parts_sum_linearly_and_keep_derivatives_consistent() {
    let spin = SpinPolarization::Unpolarized;
    let order = DerivativeOrder::Kernel;
    let (c1, c2) = (0.3, 1.7);
    let hybrid = HybridFunctional::from_parts(
        0.0,
        vec![(c1, state(LDA_C_PW, spin, order))],
        vec![(c2, state(GGA_X_PBE, spin, order))],
        spin,
        order,
    )
    .expect("parts share spin and order");

    let (rho, sigma) = ([0.15], [0.03]);
    let e1 = state(LDA_C_PW, spin, order).evaluate_point(&rho, &[]).zk;
    let e2 = state(GGA_X_PBE, spin, order).evaluate_point(&rho, &sigma).zk;
    let point = hybrid.evaluate_point(&rho, &sigma);
    assert_close(point.zk, c1 * e1 + c2 * e2, 1.0e-14, 0.0, "zk");
    assert_eq!(hybrid.constituents().count(), 2);
    assert_eq!(hybrid.exx_coefficient(), 0.0);

    let pbeh = state(HYB_GGA_XC_PBEH, spin, order);
    check_derivatives(&pbeh, &rho, &sigma, 1.0e-10);
}

#[test]
fn mismatched_spin_channels_fail_composition() {
    let error = HybridFunctional::from_parts(
        0.25,
        Vec::new(),
        vec![
            (0.75, state(GGA_X_PBE, SpinPolarization::Unpolarized, DerivativeOrder::Potential)),
            (1.0, state(GGA_C_PBE, SpinPolarization::Polarized, DerivativeOrder::Potential)),
        ],
        SpinPolarization::Unpolarized,
        DerivativeOrder::Potential,
    )
    .expect_err("spin counts differ");
    assert_eq!(
        error,
        XcError::SpinMismatch {
            id: GGA_C_PBE,
            expected: 1,
            found: 2,
        }
    );
    assert_eq!(error.exit_code(), 4);
}

#[test]
fn parts_in_the_wrong_slot_fail_composition() {
    let error = HybridFunctional::from_parts(
        0.0,
        Vec::new(),
        vec![(1.0, state(LDA_X, SpinPolarization::Unpolarized, DerivativeOrder::Energy))],
        SpinPolarization::Unpolarized,
        DerivativeOrder::Energy,
    )
    .expect_err("an LDA state cannot fill the gradient part");
    assert!(matches!(
        error,
        XcError::FamilyMismatch {
            expected: Family::Gga,
            found: Family::Lda,
            ..
        }
    ));
}

#[test]
fn parts_below_the_requested_order_fail_composition() {
    let error = HybridFunctional::from_parts(
        0.0,
        vec![(1.0, state(LDA_X, SpinPolarization::Unpolarized, DerivativeOrder::Potential))],
        Vec::new(),
        SpinPolarization::Unpolarized,
        DerivativeOrder::Kernel,
    )
    .expect_err("the part was built for first order only");
    assert!(matches!(error, XcError::UnsupportedOrder { id: LDA_X, order: 2, .. }));
}

static DANGLING: HybridRecipe = HybridRecipe {
    exx: 0.1,
    lda: &[Mix {
        id: LDA_X,
        coefficient: 0.9,
    }],
    gga: &[Mix {
        id: 9999,
        coefficient: 1.0,
    }],
};

static MISFILED: HybridRecipe = HybridRecipe {
    exx: 0.0,
    lda: &[Mix {
        id: GGA_X_B88,
        coefficient: 1.0,
    }],
    gga: &[],
};

#[test]
fn recipes_with_bad_constituents_fail_initialisation() {
    let settings = EvaluationSettings::default();
    let error = HybridFunctional::from_recipe(
        &DANGLING,
        SpinPolarization::Polarized,
        DerivativeOrder::Potential,
        settings,
    )
    .expect_err("9999 is not registered");
    assert_eq!(error, XcError::UnknownFunctional { id: 9999 });
    assert_eq!(
        error.diagnostic_line(),
        "ERROR: [CONFIG.UNKNOWN_FUNCTIONAL] functional identifier 9999 is not registered"
    );

    let error = HybridFunctional::from_recipe(
        &MISFILED,
        SpinPolarization::Unpolarized,
        DerivativeOrder::Energy,
        settings,
    )
    .expect_err("B88 is a gradient functional");
    assert!(matches!(error, XcError::FamilyMismatch { id: GGA_X_B88, .. }));
}
