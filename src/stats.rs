//! Per-plot descriptive statistics.
//!
//! Values within a plot are continuous, so the mode is taken over a histogram
//! rather than over raw floats. [`ModeBinning`] selects how that histogram is
//! laid out.

use std::fmt::{Display, Formatter};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{cell_key::CellKey, error::GridError, error::Result, point::Point};

/// Histogram layout used to find the modal value of a plot.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub enum ModeBinning {
    /// `n` equal-width bins spanning the plot's own `[min, max]` range.
    BucketCount(usize),
    /// Bins of a fixed absolute width anchored at `0.0`, so that modes of
    /// different plots fall on the same bin boundaries.
    BinWidth(f64),
}

impl Default for ModeBinning {
    fn default() -> Self {
        ModeBinning::BucketCount(64)
    }
}

impl ModeBinning {
    pub fn validate(&self) -> Result<()> {
        match *self {
            ModeBinning::BucketCount(0) => Err(GridError::invalid(
                "mode_binning",
                "bucket count must be at least 1",
            )),
            ModeBinning::BucketCount(n) if n > u32::MAX as usize => Err(GridError::invalid(
                "mode_binning",
                format!("bucket count must not exceed {}, got {}", u32::MAX, n),
            )),
            ModeBinning::BinWidth(w) if !(w.is_finite() && w > 0.0) => Err(GridError::invalid(
                "mode_binning",
                format!("bin width must be a positive finite number, got {}", w),
            )),
            _ => Ok(()),
        }
    }

    /// Representative value of the most populated bin. Ties go to the lowest
    /// bin. `sorted` must be non-empty and ascending.
    fn mode(&self, sorted: &[f64]) -> f64 {
        let min = sorted[0];
        let max = sorted[sorted.len() - 1];
        match *self {
            ModeBinning::BucketCount(n) => {
                if max <= min {
                    return min;
                }
                // Dividing before subtracting keeps the width finite for
                // values near the ends of the f64 range.
                let width = max / n as f64 - min / n as f64;
                let last = n as i64 - 1;
                let bin = modal_bin(sorted, |v| {
                    ((v / width - min / width).floor() as i64).clamp(0, last)
                });
                min + (bin as f64 + 0.5) * width
            }
            ModeBinning::BinWidth(width) => {
                let bin = modal_bin(sorted, |v| (v / width).floor() as i64);
                (bin as f64 + 0.5) * width
            }
        }
    }
}

/// Bin indices are non-decreasing over sorted input, so each bin is one
/// contiguous run.
fn modal_bin<F>(sorted: &[f64], bin_of: F) -> i64
where
    F: Fn(f64) -> i64,
{
    let runs = sorted.iter().map(|&v| bin_of(v)).group_by(|&bin| bin);

    let mut best: Option<(i64, usize)> = None;
    for (bin, run) in &runs {
        let count = run.count();
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((bin, count)),
        }
    }
    best.map(|(bin, _)| bin).unwrap_or_default()
}

/// Summary of the values binned into one plot.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct PlotStatistics {
    pub key: CellKey,
    pub count: usize,
    pub avg: f64,
    pub mode: f64,
    pub min: f64,
    pub max: f64,
}

impl PlotStatistics {
    /// Computes statistics over points already sorted ascending by value.
    ///
    /// Returns `None` for an empty slice.
    pub fn from_sorted(key: CellKey, points: &[Point], binning: ModeBinning) -> Option<Self> {
        if points.is_empty() {
            None
        } else {
            Some(Self::summarize(key, points, binning))
        }
    }

    /// `points` must be non-empty and sorted ascending by value.
    pub(crate) fn summarize(key: CellKey, points: &[Point], binning: ModeBinning) -> Self {
        let min = points[0].value;
        let max = points[points.len() - 1].value;

        let values = points.iter().map(|p| p.value).collect_vec();
        let avg = incremental_mean(&values).clamp(min, max);
        let mode = binning.mode(&values);

        PlotStatistics {
            key,
            count: points.len(),
            avg,
            mode,
            min,
            max,
        }
    }

    /// Spread between the highest and lowest value, e.g. canopy height.
    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}

/// Running mean; avoids the large intermediate sum of sum-then-divide.
/// Each term is scaled before it is combined so that no step overflows.
fn incremental_mean(values: &[f64]) -> f64 {
    values.iter().enumerate().fold(0.0, |mean, (k, &v)| {
        let k = (k + 1) as f64;
        mean + v / k - mean / k
    })
}

impl Display for PlotStatistics {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({} {}) : {} {} {} {} {}",
            self.key.i, self.key.j, self.count, self.min, self.avg, self.max, self.mode
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted_points(values: &[f64]) -> Vec<Point> {
        let mut points = values
            .iter()
            .map(|&v| Point::new(0.0, 0.0, v))
            .collect_vec();
        points.sort_by(|a, b| a.value.total_cmp(&b.value));
        points
    }

    fn stats(values: &[f64], binning: ModeBinning) -> PlotStatistics {
        PlotStatistics::from_sorted(CellKey::new(0, 0), &sorted_points(values), binning).unwrap()
    }

    #[test]
    fn empty_slice_has_no_statistics() {
        assert!(PlotStatistics::from_sorted(CellKey::new(0, 0), &[], ModeBinning::default())
            .is_none());
    }

    #[test]
    fn basic_summary() {
        let s = stats(&[1.0, 3.0, 2.0, 6.0], ModeBinning::default());
        assert_eq!(s.count, 4);
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 6.0);
        assert_eq!(s.avg, 3.0);
        assert_eq!(s.range(), 5.0);
    }

    #[test]
    fn incremental_mean_is_accurate_with_large_offset() {
        let values = (0..10_000).map(|k| 1.0e9 + (k % 2) as f64).collect_vec();
        let s = stats(&values, ModeBinning::default());
        assert!((s.avg - (1.0e9 + 0.5)).abs() < 1e-3);
    }

    #[test]
    fn extreme_magnitudes_stay_finite() {
        let s = stats(&[-1.0e308, 1.0e308], ModeBinning::default());
        assert!(s.avg.abs() < 1.0e300);
        assert!(s.mode.is_finite());
        assert!(s.min <= s.mode && s.mode <= s.max);

        let s = stats(&[-1.0e308, -1.0e308, 1.0e308], ModeBinning::BucketCount(4));
        assert!(s.mode < 0.0 && s.mode.is_finite());
    }

    #[test]
    fn constant_values_have_that_mode() {
        let s = stats(&[4.25; 5], ModeBinning::BucketCount(64));
        assert_eq!(s.mode, 4.25);
        assert_eq!(s.avg, 4.25);
    }

    #[test]
    fn bucket_count_mode_is_bin_midpoint() {
        // Range [0, 4] in 4 buckets of width 1; bucket 2 holds three values.
        let s = stats(&[0.0, 2.1, 2.5, 2.9, 4.0], ModeBinning::BucketCount(4));
        assert_eq!(s.mode, 2.5);
    }

    #[test]
    fn maximum_lands_in_last_bucket() {
        // Without clamping 4.0 would open a fifth bucket.
        let s = stats(&[0.0, 3.5, 4.0, 4.0], ModeBinning::BucketCount(4));
        assert_eq!(s.mode, 3.5);
    }

    #[test]
    fn ties_go_to_lowest_bin() {
        let s = stats(&[0.1, 0.2, 3.8, 3.9], ModeBinning::BucketCount(4));
        assert!((s.mode - (0.1 + 0.5 * 0.95)).abs() < 1e-12);

        let s = stats(&[1.1, 1.2, 7.6, 7.7], ModeBinning::BinWidth(0.25));
        assert_eq!(s.mode, 1.125);
    }

    #[test]
    fn bin_width_is_anchored_at_zero() {
        let s = stats(&[10.01, 10.3, 10.4, 10.45, 10.9], ModeBinning::BinWidth(0.25));
        // Bin [10.25, 10.5) holds three values.
        assert_eq!(s.mode, 10.375);

        let s = stats(&[-0.3, -0.2, -0.1, 0.1], ModeBinning::BinWidth(0.25));
        assert_eq!(s.mode, -0.125);
    }

    #[test]
    fn rejects_invalid_binning() {
        assert!(ModeBinning::BucketCount(0).validate().is_err());
        assert!(ModeBinning::BinWidth(0.0).validate().is_err());
        assert!(ModeBinning::BinWidth(-1.0).validate().is_err());
        assert!(ModeBinning::BinWidth(f64::NAN).validate().is_err());
        assert!(ModeBinning::BucketCount(u32::MAX as usize + 1).validate().is_err());
        assert!(ModeBinning::BucketCount(u32::MAX as usize).validate().is_ok());
        assert!(ModeBinning::BucketCount(1).validate().is_ok());
        assert!(ModeBinning::BinWidth(0.25).validate().is_ok());
    }

    #[test]
    fn display_format() {
        let s = stats(&[1.0, 3.0], ModeBinning::BucketCount(2));
        assert_eq!(format!("{}", s), "(0 0) : 2 1 2 3 1.5");
    }
}
