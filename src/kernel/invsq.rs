//! Inverse-square kernel, K(t, s) = 1 / |t - s|².

use super::Kernel;
use crate::points::Point3;

/// Gravitational/electrostatic force magnitude kernel. Returns zero at
/// coincident points so diagonal self-terms vanish.
#[derive(Clone, Copy, Debug, Default)]
pub struct InvSq;

impl Kernel for InvSq {
    type Source = Point3;
    type Target = Point3;
    type Charge = f64;
    type Value = f64;
    type Result = f64;

    fn tag(&self) -> &'static str {
        "invsq"
    }

    fn eval(&self, target: &Point3, source: &Point3) -> f64 {
        let r2 = target.distance_sq(source);
        if r2 < 1e-200 {
            0.0
        } else {
            1.0 / r2
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn unit_separation_gives_unit_value() {
        let k = InvSq;
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(1.0, 0.0, 0.0);
        assert_abs_diff_eq!(k.eval(&a, &b), 1.0);
        let c = Point3::new(0.0, 2.0, 0.0);
        assert_abs_diff_eq!(k.eval(&a, &c), 0.25);
    }

    #[test]
    fn value_is_symmetric() {
        let k = InvSq;
        let a = Point3::new(0.1, 0.2, 0.3);
        let b = Point3::new(0.9, 0.5, 0.4);
        assert_eq!(k.eval(&a, &b), k.eval(&b, &a));
    }
}
