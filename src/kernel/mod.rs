//! Per-pair interaction kernels and the blocked evaluation primitives.
//!
//! A [`Kernel`] supplies the element types and the per-pair function
//! K(target, source); the free functions below evaluate whole
//! interaction blocks, accumulating into caller-provided result buffers.
//! Zeroing the accumulators is the caller's responsibility.

mod bayesian;
mod invsq;
mod laplace;

pub use bayesian::NonParaBayesian;
pub use invsq::InvSq;
pub use laplace::LaplacePotential;

use crate::comm::Wire;
use rayon::prelude::*;
use std::ops::{AddAssign, Mul};

/// An interaction kernel with its associated element types.
///
/// `eval` must be pure; the blocked evaluators call it once per pair and
/// apply the value to the charge. Kernels are expected to return a zero
/// value at coincident singular points (the fmmtl convention), so that
/// diagonal self-terms of singular kernels vanish.
pub trait Kernel {
    type Source: Wire;
    type Target: Wire;
    type Charge: Wire;
    type Value: Copy + Mul<Self::Charge, Output = Self::Result>;
    type Result: Wire + AddAssign;

    /// Short identifier used in the verifier cache filename.
    fn tag(&self) -> &'static str;

    /// The kernel value K(target, source).
    fn eval(&self, target: &Self::Target, source: &Self::Source) -> Self::Value;
}

/// A kernel whose targets and sources are the same type and whose value
/// is symmetric under exchange, K(a, b) = K(b, a). The symmetric
/// algorithms require this at compile time.
pub trait SymmetricKernel: Kernel<Target = <Self as Kernel>::Source> {}

impl<K> SymmetricKernel for K where K: Kernel<Target = <K as Kernel>::Source> {}

/// Diagonal block: r[i] += Σ_j K(x[i], x[j])·c[j] over one block.
///
/// Sweeps the upper triangle once, applying each kernel value in both
/// directions, plus the self term (which singular kernels zero out).
pub fn p2p_self<K>(kernel: &K, x: &[K::Source], c: &[K::Charge], r: &mut [K::Result])
where
    K: SymmetricKernel,
{
    let n = x.len();
    for i in 0..n {
        r[i] += kernel.eval(&x[i], &x[i]) * c[i];
        for j in (i + 1)..n {
            let v = kernel.eval(&x[i], &x[j]);
            r[i] += v * c[j];
            r[j] += v * c[i];
        }
    }
}

/// Off-diagonal block, one direction: r[i] += Σ_j K(t[i], x[j])·c[j].
///
/// Rows are independent, so targets are processed in parallel; the
/// source order within a row is fixed, keeping the accumulation
/// deterministic.
pub fn p2p_block<K>(
    kernel: &K,
    x: &[K::Source],
    c: &[K::Charge],
    t: &[K::Target],
    r: &mut [K::Result],
) where
    K: Kernel + Sync,
{
    r.par_iter_mut().zip(t.par_iter()).for_each(|(ri, ti)| {
        for (xj, cj) in x.iter().zip(c.iter()) {
            *ri += kernel.eval(ti, xj) * *cj;
        }
    });
}

/// Off-diagonal block, both directions in one pass:
/// rt[i] += Σ_j K(t[i], x[j])·cx[j] and rx[j] += Σ_i K(t[i], x[j])·ct[i].
///
/// Each kernel value is computed once and applied to both accumulators.
pub fn p2p_block_symmetric<K>(
    kernel: &K,
    x: &[K::Source],
    cx: &[K::Charge],
    rx: &mut [K::Result],
    t: &[K::Source],
    ct: &[K::Charge],
    rt: &mut [K::Result],
) where
    K: SymmetricKernel,
{
    for (i, (ti, cti)) in t.iter().zip(ct.iter()).enumerate() {
        for (j, (xj, cxj)) in x.iter().zip(cx.iter()).enumerate() {
            let v = kernel.eval(ti, xj);
            rt[i] += v * *cxj;
            rx[j] += v * *cti;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::points::{random_system, Point3};
    use approx::assert_abs_diff_eq;

    /// Reference: plain full double loop, no symmetry tricks.
    fn naive<K>(kernel: &K, x: &[Point3], c: &[f64]) -> Vec<f64>
    where
        K: Kernel<Source = Point3, Target = Point3, Charge = f64, Result = f64>,
    {
        let mut r = vec![0.0; x.len()];
        for i in 0..x.len() {
            for j in 0..x.len() {
                r[i] += kernel.eval(&x[i], &x[j]) * c[j];
            }
        }
        r
    }

    #[test]
    fn p2p_self_matches_naive_double_loop() {
        let (x, c) = random_system(24, 99);
        for tag in 0..3 {
            let (triangle, full) = match tag {
                0 => {
                    let k = InvSq;
                    let mut r = vec![0.0; x.len()];
                    p2p_self(&k, &x, &c, &mut r);
                    (r, naive(&k, &x, &c))
                }
                1 => {
                    let k = LaplacePotential;
                    let mut r = vec![0.0; x.len()];
                    p2p_self(&k, &x, &c, &mut r);
                    (r, naive(&k, &x, &c))
                }
                _ => {
                    let k = NonParaBayesian::new(1.0, 1.0);
                    let mut r = vec![0.0; x.len()];
                    p2p_self(&k, &x, &c, &mut r);
                    (r, naive(&k, &x, &c))
                }
            };
            for (a, b) in triangle.iter().zip(full.iter()) {
                assert_abs_diff_eq!(a, b, epsilon = 1e-10 * b.abs().max(1.0));
            }
        }
    }

    #[test]
    fn p2p_block_symmetric_matches_two_one_way_blocks() {
        let (pts, chg) = random_system(20, 7);
        let (x, t) = pts.split_at(12);
        let (cx, ct) = chg.split_at(12);
        let kernel = InvSq;

        let mut rx = vec![0.0; x.len()];
        let mut rt = vec![0.0; t.len()];
        p2p_block_symmetric(&kernel, x, cx, &mut rx, t, ct, &mut rt);

        let mut rx_ref = vec![0.0; x.len()];
        let mut rt_ref = vec![0.0; t.len()];
        p2p_block(&kernel, x, cx, t, &mut rt_ref);
        p2p_block(&kernel, t, ct, x, &mut rx_ref);

        for (a, b) in rx.iter().zip(rx_ref.iter()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-12 * b.abs().max(1.0));
        }
        for (a, b) in rt.iter().zip(rt_ref.iter()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-12 * b.abs().max(1.0));
        }
    }

    #[test]
    fn accumulation_is_additive() {
        let (x, c) = random_system(8, 3);
        let kernel = LaplacePotential;
        let mut once = vec![0.0; 8];
        p2p_self(&kernel, &x, &c, &mut once);
        let mut twice = vec![0.0; 8];
        p2p_self(&kernel, &x, &c, &mut twice);
        p2p_self(&kernel, &x, &c, &mut twice);
        for (a, b) in once.iter().zip(twice.iter()) {
            assert_abs_diff_eq!(2.0 * a, *b, epsilon = 1e-12 * b.abs().max(1.0));
        }
    }

    #[test]
    fn singular_kernels_zero_the_self_term() {
        let p = Point3::new(0.25, 0.5, 0.75);
        assert_eq!(InvSq.eval(&p, &p), 0.0);
        assert_eq!(LaplacePotential.eval(&p, &p), 0.0);
        // the covariance kernel is finite at zero separation
        assert_eq!(NonParaBayesian::new(2.0, 1.0).eval(&p, &p), 4.0);
    }
}
