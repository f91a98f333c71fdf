//! Batch evaluation over host-owned grid arrays.

use super::traits::XcKernel;
use crate::assembly::XcPoint;
use crate::domain::{DerivativeOrder, Family, GridLayout, SpinPolarization};
use tracing::debug;

/// Borrowed input arrays. `sigma` is ignored for local-density families.
#[derive(Debug, Clone, Copy)]
pub struct XcInput<'a> {
    pub rho: &'a [f64],
    pub sigma: &'a [f64],
}

impl<'a> XcInput<'a> {
    pub fn lda(rho: &'a [f64]) -> Self {
        Self { rho, sigma: &[] }
    }

    pub fn gga(rho: &'a [f64], sigma: &'a [f64]) -> Self {
        Self { rho, sigma }
    }

    fn split_at(self, mid: usize, layout: GridLayout, gradient: bool) -> (Self, Self) {
        let (rho_left, rho_right) = self.rho.split_at(mid * layout.rho);
        let (sigma_left, sigma_right) = if gradient {
            self.sigma.split_at(mid * layout.sigma)
        } else {
            (self.sigma, self.sigma)
        };
        (
            Self {
                rho: rho_left,
                sigma: sigma_left,
            },
            Self {
                rho: rho_right,
                sigma: sigma_right,
            },
        )
    }
}

/// Borrowed output arrays. A derivative buffer is `Some` exactly when the
/// state was initialised for that order and, for the sigma arrays, when the
/// family is gradient dependent.
#[derive(Debug, Default)]
pub struct XcOutput<'a> {
    pub zk: &'a mut [f64],
    pub vrho: Option<&'a mut [f64]>,
    pub vsigma: Option<&'a mut [f64]>,
    pub v2rho2: Option<&'a mut [f64]>,
    pub v2rhosigma: Option<&'a mut [f64]>,
    pub v2sigma2: Option<&'a mut [f64]>,
}

fn split_buffer<'a>(
    buffer: Option<&'a mut [f64]>,
    at: usize,
) -> (Option<&'a mut [f64]>, Option<&'a mut [f64]>) {
    match buffer {
        Some(values) => {
            let (left, right) = values.split_at_mut(at);
            (Some(left), Some(right))
        }
        None => (None, None),
    }
}

fn store(buffer: &mut Option<&mut [f64]>, point: usize, stride: usize, values: &[f64]) {
    if let Some(target) = buffer.as_deref_mut() {
        target[point * stride..(point + 1) * stride].copy_from_slice(&values[..stride]);
    }
}

impl<'a> XcOutput<'a> {
    pub fn energy(zk: &'a mut [f64]) -> Self {
        Self {
            zk,
            ..Self::default()
        }
    }

    /// Shorter-lived view of the same buffers.
    pub fn reborrow(&mut self) -> XcOutput<'_> {
        XcOutput {
            zk: &mut *self.zk,
            vrho: self.vrho.as_deref_mut(),
            vsigma: self.vsigma.as_deref_mut(),
            v2rho2: self.v2rho2.as_deref_mut(),
            v2rhosigma: self.v2rhosigma.as_deref_mut(),
            v2sigma2: self.v2sigma2.as_deref_mut(),
        }
    }

    fn split_at(self, mid: usize, layout: GridLayout) -> (Self, Self) {
        let (zk_left, zk_right) = self.zk.split_at_mut(mid);
        let (vrho_left, vrho_right) = split_buffer(self.vrho, mid * layout.rho);
        let (vsigma_left, vsigma_right) = split_buffer(self.vsigma, mid * layout.sigma);
        let (v2rho2_left, v2rho2_right) = split_buffer(self.v2rho2, mid * layout.v2rho2);
        let (v2rhosigma_left, v2rhosigma_right) =
            split_buffer(self.v2rhosigma, mid * layout.v2rhosigma);
        let (v2sigma2_left, v2sigma2_right) = split_buffer(self.v2sigma2, mid * layout.v2sigma2);
        (
            Self {
                zk: zk_left,
                vrho: vrho_left,
                vsigma: vsigma_left,
                v2rho2: v2rho2_left,
                v2rhosigma: v2rhosigma_left,
                v2sigma2: v2sigma2_left,
            },
            Self {
                zk: zk_right,
                vrho: vrho_right,
                vsigma: vsigma_right,
                v2rho2: v2rho2_right,
                v2rhosigma: v2rhosigma_right,
                v2sigma2: v2sigma2_right,
            },
        )
    }

    fn write(&mut self, point: usize, layout: GridLayout, values: &XcPoint) {
        self.zk[point] = values.zk;
        store(&mut self.vrho, point, layout.rho, &values.vrho);
        store(&mut self.vsigma, point, layout.sigma, &values.vsigma);
        store(&mut self.v2rho2, point, layout.v2rho2, &values.v2rho2);
        store(&mut self.v2rhosigma, point, layout.v2rhosigma, &values.v2rhosigma);
        store(&mut self.v2sigma2, point, layout.v2sigma2, &values.v2sigma2);
    }
}

/// Owned output arrays sized for `points` grid points.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct XcBuffers {
    pub zk: Vec<f64>,
    pub vrho: Option<Vec<f64>>,
    pub vsigma: Option<Vec<f64>>,
    pub v2rho2: Option<Vec<f64>>,
    pub v2rhosigma: Option<Vec<f64>>,
    pub v2sigma2: Option<Vec<f64>>,
}

impl XcBuffers {
    pub fn new(
        points: usize,
        spin: SpinPolarization,
        family: Family,
        order: DerivativeOrder,
    ) -> Self {
        let layout = spin.layout();
        let gradient = family.needs_gradient();
        let sized = |present: bool, stride: usize| present.then(|| vec![0.0; points * stride]);
        Self {
            zk: vec![0.0; points],
            vrho: sized(order.first(), layout.rho),
            vsigma: sized(order.first() && gradient, layout.sigma),
            v2rho2: sized(order.second(), layout.v2rho2),
            v2rhosigma: sized(order.second() && gradient, layout.v2rhosigma),
            v2sigma2: sized(order.second() && gradient, layout.v2sigma2),
        }
    }

    /// Buffers matching an initialised kernel.
    pub fn for_kernel<K: XcKernel + ?Sized>(kernel: &K, points: usize) -> Self {
        Self::new(points, kernel.spin(), kernel.family(), kernel.order())
    }

    pub fn output(&mut self) -> XcOutput<'_> {
        XcOutput {
            zk: &mut self.zk,
            vrho: self.vrho.as_deref_mut(),
            vsigma: self.vsigma.as_deref_mut(),
            v2rho2: self.v2rho2.as_deref_mut(),
            v2rhosigma: self.v2rhosigma.as_deref_mut(),
            v2sigma2: self.v2sigma2.as_deref_mut(),
        }
    }

    /// Reads grid point `point` back into an [`XcPoint`]; absent buffers
    /// read as zero.
    pub fn point(&self, point: usize, spin: SpinPolarization) -> XcPoint {
        let layout = spin.layout();
        let mut values = XcPoint {
            zk: self.zk[point],
            ..XcPoint::default()
        };
        fn load(target: &mut [f64], buffer: &Option<Vec<f64>>, point: usize, stride: usize) {
            if let Some(source) = buffer {
                target[..stride].copy_from_slice(&source[point * stride..(point + 1) * stride]);
            }
        }
        load(&mut values.vrho, &self.vrho, point, layout.rho);
        load(&mut values.vsigma, &self.vsigma, point, layout.sigma);
        load(&mut values.v2rho2, &self.v2rho2, point, layout.v2rho2);
        load(&mut values.v2rhosigma, &self.v2rhosigma, point, layout.v2rhosigma);
        load(&mut values.v2sigma2, &self.v2sigma2, point, layout.v2sigma2);
        values
    }
}

fn check_buffer(name: &str, buffer: &Option<&mut [f64]>, expected: bool, len: usize) {
    match buffer {
        Some(values) => {
            assert!(
                expected,
                "output buffer '{name}' was supplied but is not computed for this functional and order"
            );
            assert_eq!(
                values.len(),
                len,
                "output buffer '{name}' has {} entries, expected {len}",
                values.len()
            );
        }
        None => assert!(
            !expected,
            "output buffer '{name}' is required for this functional and order"
        ),
    }
}

/// Validates the batch against the kernel and returns the point count.
fn check_batch<K: XcKernel + ?Sized>(kernel: &K, input: &XcInput<'_>, output: &XcOutput<'_>) -> usize {
    let layout = kernel.spin().layout();
    let gradient = kernel.family().needs_gradient();
    let order = kernel.order();

    assert_eq!(
        input.rho.len() % layout.rho,
        0,
        "rho has {} entries, not a multiple of {} channel(s)",
        input.rho.len(),
        layout.rho
    );
    let points = input.rho.len() / layout.rho;
    if gradient {
        assert_eq!(
            input.sigma.len(),
            points * layout.sigma,
            "sigma has {} entries, expected {} for {points} point(s)",
            input.sigma.len(),
            points * layout.sigma
        );
    }
    assert_eq!(
        output.zk.len(),
        points,
        "zk has {} entries, expected {points}",
        output.zk.len()
    );

    let first = order.first();
    let second = order.second();
    check_buffer("vrho", &output.vrho, first, points * layout.rho);
    check_buffer("vsigma", &output.vsigma, first && gradient, points * layout.sigma);
    check_buffer("v2rho2", &output.v2rho2, second, points * layout.v2rho2);
    check_buffer(
        "v2rhosigma",
        &output.v2rhosigma,
        second && gradient,
        points * layout.v2rhosigma,
    );
    check_buffer(
        "v2sigma2",
        &output.v2sigma2,
        second && gradient,
        points * layout.v2sigma2,
    );
    points
}

fn evaluate_points<K: XcKernel + ?Sized>(
    kernel: &K,
    input: XcInput<'_>,
    mut output: XcOutput<'_>,
    points: usize,
    layout: GridLayout,
    gradient: bool,
) {
    for point in 0..points {
        let rho = &input.rho[point * layout.rho..(point + 1) * layout.rho];
        let sigma: &[f64] = if gradient {
            &input.sigma[point * layout.sigma..(point + 1) * layout.sigma]
        } else {
            &[]
        };
        let values = kernel.evaluate_point(rho, sigma);
        output.write(point, layout, &values);
    }
}

/// Serial loop over every point of the batch.
///
/// # Panics
///
/// When array lengths or buffer presence disagree with the kernel.
pub fn evaluate_batch<K: XcKernel + ?Sized>(kernel: &K, input: XcInput<'_>, output: XcOutput<'_>) {
    let points = check_batch(kernel, &input, &output);
    evaluate_points(
        kernel,
        input,
        output,
        points,
        kernel.spin().layout(),
        kernel.family().needs_gradient(),
    );
}

fn split_and_join<K: XcKernel + ?Sized>(
    kernel: &K,
    input: XcInput<'_>,
    output: XcOutput<'_>,
    points: usize,
    chunk: usize,
    layout: GridLayout,
    gradient: bool,
) {
    if points <= chunk {
        evaluate_points(kernel, input, output, points, layout, gradient);
        return;
    }
    let mid = points / 2;
    let (input_left, input_right) = input.split_at(mid, layout, gradient);
    let (output_left, output_right) = output.split_at(mid, layout);
    rayon::join(
        || split_and_join(kernel, input_left, output_left, mid, chunk, layout, gradient),
        || {
            split_and_join(
                kernel,
                input_right,
                output_right,
                points - mid,
                chunk,
                layout,
                gradient,
            )
        },
    );
}

/// Parallel counterpart of [`evaluate_batch`]. Points are halved recursively
/// until a leaf holds at most `chunk` of them; no buffer is allocated.
pub fn evaluate_batch_parallel<K: XcKernel + ?Sized>(
    kernel: &K,
    input: XcInput<'_>,
    output: XcOutput<'_>,
    chunk: usize,
) {
    let points = check_batch(kernel, &input, &output);
    let chunk = chunk.max(1);
    debug!(
        points,
        chunk,
        leaves = points.div_ceil(chunk),
        threads = rayon::current_num_threads(),
        "evaluating batch in parallel"
    );
    split_and_join(
        kernel,
        input,
        output,
        points,
        chunk,
        kernel.spin().layout(),
        kernel.family().needs_gradient(),
    );
}
