//! Laplace potential kernel, K(t, s) = 1 / |t - s|.

use super::Kernel;
use crate::points::Point3;

/// Single-layer Laplace potential. Returns zero at coincident points.
#[derive(Clone, Copy, Debug, Default)]
pub struct LaplacePotential;

impl Kernel for LaplacePotential {
    type Source = Point3;
    type Target = Point3;
    type Charge = f64;
    type Value = f64;
    type Result = f64;

    fn tag(&self) -> &'static str {
        "laplace"
    }

    fn eval(&self, target: &Point3, source: &Point3) -> f64 {
        let r2 = target.distance_sq(source);
        if r2 < 1e-200 {
            0.0
        } else {
            r2.sqrt().recip()
        }
    }
}
