use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::{debug, instrument};

use crate::error::{Result, WktError};
use crate::geometry::Geometry;
use crate::math::Precision;

use super::{FromWkt, ToWkt};

/// Reads one geometry per non-blank line of a text file.
///
/// # Errors
///
/// Returns [`WktError::Io`] if the file cannot be read, and the first parse
/// error otherwise.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn read_file<const D: usize>(path: impl AsRef<Path>, p: Precision) -> Result<Vec<Geometry<D>>> {
    let reader = BufReader::new(File::open(path.as_ref()).map_err(WktError::from)?);
    let mut geometries = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(WktError::from)?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        geometries.push(Geometry::from_wkt(text, p)?);
    }
    debug!(count = geometries.len(), "geometries read");
    Ok(geometries)
}

/// Writes each geometry as one line of WKT, replacing the file.
///
/// # Errors
///
/// Returns [`WktError::Io`] if the file cannot be created or written.
#[instrument(skip_all, fields(path = %path.as_ref().display(), count = geometries.len()))]
pub fn write_file<const D: usize>(
    path: impl AsRef<Path>,
    geometries: &[Geometry<D>],
    p: Precision,
) -> Result<()> {
    let mut out = BufWriter::new(File::create(path.as_ref()).map_err(WktError::from)?);
    for geometry in geometries {
        writeln!(out, "{}", geometry.to_wkt(p)).map_err(WktError::from)?;
    }
    out.flush().map_err(WktError::from)?;
    debug!("geometries written");
    Ok(())
}
