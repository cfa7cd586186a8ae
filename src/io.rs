//! Loading points from `x,y,value` text files.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use flate2::read::GzDecoder;
use log::{debug, warn};

use crate::{error::LoadError, point::Point};

/// Reads every well-formed record of a CSV file. Files ending in `.gz` are
/// decompressed on the fly.
///
/// Lines that do not parse as a point (headers, comments, truncated records)
/// are skipped.
pub fn read_points<P: AsRef<Path>>(path: P) -> Result<Vec<Point>, LoadError> {
    let path = path.as_ref();
    let io_error = |source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_error)?;
    let gzipped = path.extension().map_or(false, |ext| ext == "gz");
    let reader: Box<dyn BufRead> = if gzipped {
        Box::new(BufReader::new(GzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };
    let points = read_points_from(reader).map_err(io_error)?;

    debug!("read {} points from {}", points.len(), path.display());
    Ok(points)
}

/// Reads points from any buffered source, skipping blank and malformed lines.
/// Lines that are not valid UTF-8 count as malformed; only genuine read
/// failures are returned as errors.
pub fn read_points_from<R: BufRead>(mut reader: R) -> std::io::Result<Vec<Point>> {
    let mut points = Vec::new();
    let mut skipped = 0usize;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line,
            Err(e) => {
                debug!("skipping record that is not valid UTF-8: {}", e);
                skipped += 1;
                continue;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<Point>() {
            Ok(p) => points.push(p),
            Err(e) => {
                debug!("skipping record: {}", e);
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        warn!("skipped {} malformed records", skipped);
    }
    Ok(points)
}
