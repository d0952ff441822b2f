//! Whitespace-separated text I/O for points and scalars.
//!
//! The on-disk format is a stream of floating-point tokens: three per
//! point for point files, one per element for scalar files. Writers
//! create missing parent directories.

use crate::error::{Result, TeamScatterError};
use crate::points::Point3;
use std::fs;
use std::io::Write;
use std::path::Path;

fn read_tokens(path: &Path) -> Result<Vec<f64>> {
    let text = fs::read_to_string(path)?;
    text.split_whitespace()
        .map(|tok| {
            tok.parse::<f64>().map_err(|_| {
                TeamScatterError::Data(format!(
                    "{}: invalid floating-point token {tok:?}",
                    path.display()
                ))
            })
        })
        .collect()
}

/// Read a scalar-per-element file.
pub fn read_scalars(path: &Path) -> Result<Vec<f64>> {
    read_tokens(path)
}

/// Read a file of 3-D points (three coordinates per point).
pub fn read_points(path: &Path) -> Result<Vec<Point3>> {
    let tokens = read_tokens(path)?;
    if tokens.len() % 3 != 0 {
        return Err(TeamScatterError::Data(format!(
            "{}: point file holds {} values, not a multiple of 3",
            path.display(),
            tokens.len()
        )));
    }
    Ok(tokens
        .chunks_exact(3)
        .map(|c| Point3::new(c[0], c[1], c[2]))
        .collect())
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }
    Ok(())
}

/// Write scalars, one per line.
pub fn write_scalars(path: &Path, values: &[f64]) -> Result<()> {
    create_parent(path)?;
    let mut out = fs::File::create(path)?;
    for v in values {
        writeln!(out, "{v:e}")?;
    }
    Ok(())
}

/// Write points, one "x y z" triple per line.
pub fn write_points(path: &Path, points: &[Point3]) -> Result<()> {
    create_parent(path)?;
    let mut out = fs::File::create(path)?;
    for p in points {
        writeln!(out, "{:e} {:e} {:e}", p.x, p.y, p.z)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "teamscatter-io-{tag}-{}",
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn scalars_round_trip() {
        let dir = scratch_dir("scalars");
        let path = dir.join("values.txt");
        let values = vec![1.5, -2.25, 3e-7, 0.0];
        write_scalars(&path, &values).unwrap();
        assert_eq!(read_scalars(&path).unwrap(), values);
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn points_round_trip() {
        let dir = scratch_dir("points");
        let path = dir.join("points.txt");
        let points = vec![Point3::new(0.5, 0.25, -1.0), Point3::new(2.0, 0.0, 9.5)];
        write_points(&path, &points).unwrap();
        assert_eq!(read_points(&path).unwrap(), points);
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn point_file_with_dangling_values_is_rejected() {
        let dir = scratch_dir("dangling");
        let path = dir.join("bad.txt");
        fs::write(&path, "1.0 2.0 3.0 4.0").unwrap();
        let err = read_points(&path).unwrap_err();
        assert!(err.to_string().contains("multiple of 3"));
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn garbage_token_is_rejected() {
        let dir = scratch_dir("garbage");
        let path = dir.join("bad.txt");
        fs::write(&path, "1.0 banana").unwrap();
        assert!(read_scalars(&path).is_err());
        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn writer_creates_missing_directories() {
        let dir = scratch_dir("mkdir").join("nested");
        let path = dir.join("values.txt");
        write_scalars(&path, &[1.0]).unwrap();
        assert!(path.exists());
        fs::remove_dir_all(dir.parent().unwrap()).ok();
    }
}
