//! Master-side verification against a direct O(N²) evaluation.
//!
//! The direct result for a given (kernel, N, seed) triple is cached on
//! disk after its first computation, so repeated runs of the same
//! configuration only pay the quadratic cost once. A broken or missing
//! cache is recomputed; failure to write the cache is tolerated.

use crate::io;
use crate::kernel::{p2p_self, SymmetricKernel};
use crate::points::Point3;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Directory holding cached direct results (and the outputs of the
/// auxiliary binaries).
pub const DATA_DIR: &str = "data";

/// Cache file for a (kernel, N, seed) configuration.
pub fn cache_path(dir: &Path, tag: &str, n: usize, seed: u64) -> PathBuf {
    dir.join(format!("{tag}_n{n}_s{seed}.txt"))
}

/// Square root of the summed per-element squared relative differences,
/// sqrt(Σ_i (exact_i − approx_i)² / exact_i²).
pub fn relative_error(exact: &[f64], approx: &[f64]) -> f64 {
    exact
        .iter()
        .zip(approx.iter())
        .map(|(e, a)| {
            let d = e - a;
            (d * d) / (e * e)
        })
        .sum::<f64>()
        .sqrt()
}

/// Compare `result` against the exact evaluation for this configuration,
/// reading the exact vector from the cache when available and computing
/// and caching it otherwise. Returns the relative error.
pub fn check<K>(kernel: &K, source: &[Point3], charge: &[f64], result: &[f64], seed: u64) -> f64
where
    K: SymmetricKernel<Source = Point3, Charge = f64, Result = f64>,
{
    check_in(Path::new(DATA_DIR), kernel, source, charge, result, seed)
}

/// As [`check`], with an explicit cache directory.
pub fn check_in<K>(
    dir: &Path,
    kernel: &K,
    source: &[Point3],
    charge: &[f64],
    result: &[f64],
    seed: u64,
) -> f64
where
    K: SymmetricKernel<Source = Point3, Charge = f64, Result = f64>,
{
    let n = result.len();
    let path = cache_path(dir, kernel.tag(), n, seed);

    let exact = match read_cache(&path, n) {
        Some(exact) => {
            println!("Reading result from {}", path.display());
            exact
        }
        None => {
            println!("Computing direct matvec...");
            let mut exact = vec![0.0f64; n];
            let t0 = Instant::now();
            p2p_self(kernel, source, charge, &mut exact);
            println!("DirectCompTime: {:e}", t0.elapsed().as_secs_f64());

            if let Err(e) = io::write_scalars(&path, &exact) {
                tracing::warn!("could not cache exact result to {}: {e}", path.display());
            }
            exact
        }
    };

    let error = relative_error(&exact, result);
    println!("Relative error: {error:e}");
    error
}

fn read_cache(path: &Path, n: usize) -> Option<Vec<f64>> {
    if !path.exists() {
        return None;
    }
    match io::read_scalars(path) {
        Ok(exact) if exact.len() == n => Some(exact),
        Ok(exact) => {
            tracing::warn!(
                "cache {} holds {} elements, expected {n}; recomputing",
                path.display(),
                exact.len()
            );
            None
        }
        Err(e) => {
            tracing::warn!("cache {} unreadable ({e}); recomputing", path.display());
            None
        }
    }
}
