//! 3-D point element and seeded random problem data.

use crate::comm::Wire;
use rand::Rng;
use rand_xoshiro::rand_core::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

/// Seed used by the `ts`/`sts` binaries and the verifier cache filename.
pub const DEFAULT_SEED: u64 = 1337;

/// A point in 3-D space. This is the source/target element type of the
/// built-in kernels and is transferable over any transport.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[repr(C)]
#[cfg_attr(feature = "distributed", derive(mpi::traits::Equivalence))]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Squared Euclidean distance to `other`.
    pub fn distance_sq(&self, other: &Point3) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }
}

impl Wire for Point3 {}

/// Generate N points followed by N charges from a single seeded generator,
/// points first, so that a given (N, seed) pair always produces the same
/// problem instance. Coordinates and charges are uniform in [0, 1).
pub fn random_system(n: usize, seed: u64) -> (Vec<Point3>, Vec<f64>) {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let points = (0..n)
        .map(|_| Point3::new(rng.gen(), rng.gen(), rng.gen()))
        .collect();
    let charges = (0..n).map(|_| rng.gen()).collect();
    (points, charges)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_system_is_deterministic() {
        let (p1, c1) = random_system(16, 1337);
        let (p2, c2) = random_system(16, 1337);
        assert_eq!(p1, p2);
        assert_eq!(c1, c2);
    }

    #[test]
    fn random_system_depends_on_seed() {
        let (p1, _) = random_system(4, 1);
        let (p2, _) = random_system(4, 2);
        assert_ne!(p1, p2);
    }

    #[test]
    fn distance_sq_is_symmetric() {
        let a = Point3::new(1.0, 2.0, 3.0);
        let b = Point3::new(-1.0, 0.5, 2.0);
        assert_eq!(a.distance_sq(&b), b.distance_sq(&a));
        assert_eq!(a.distance_sq(&a), 0.0);
    }
}
