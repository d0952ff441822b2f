//! Squared-exponential covariance kernel,
//! K(t, s) = σ² · exp(−|t − s|² / (2ℓ²)).

use super::Kernel;
use crate::points::Point3;

/// Smooth covariance kernel used for non-parametric regression problems.
/// Unlike the singular kernels it is finite (σ²) at zero separation, so
/// the diagonal self-term contributes.
#[derive(Clone, Copy, Debug)]
pub struct NonParaBayesian {
    variance: f64,
    inv_two_ell_sq: f64,
}

impl NonParaBayesian {
    /// Build from an amplitude σ and a length scale ℓ.
    pub fn new(sigma: f64, ell: f64) -> Self {
        Self {
            variance: sigma * sigma,
            inv_two_ell_sq: 1.0 / (2.0 * ell * ell),
        }
    }
}

impl Kernel for NonParaBayesian {
    type Source = Point3;
    type Target = Point3;
    type Charge = f64;
    type Value = f64;
    type Result = f64;

    fn tag(&self) -> &'static str {
        "npb"
    }

    fn eval(&self, target: &Point3, source: &Point3) -> f64 {
        let r2 = target.distance_sq(source);
        self.variance * (-r2 * self.inv_two_ell_sq).exp()
    }
}
