use serde::{Deserialize, Serialize};

use crate::{
    error::{GridError, Result},
    stats::ModeBinning,
};

/// Construction parameters for a [`Grid`](crate::Grid).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GridOptions {
    /// Plot width along X.
    pub size_x: f64,
    /// Plot width along Y.
    pub size_y: f64,
    /// Histogram layout used for the per-plot mode.
    pub mode_binning: ModeBinning,
    /// Inputs with fewer points than this are binned on the calling thread.
    pub parallel_threshold: usize,
    /// Number of points each parallel partition bins independently.
    pub partition_size: usize,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            size_x: 5.0,
            size_y: 5.0,
            mode_binning: ModeBinning::default(),
            parallel_threshold: 100_000,
            partition_size: 65_536,
        }
    }
}

impl GridOptions {
    pub fn new(size_x: f64, size_y: f64) -> Self {
        Self {
            size_x,
            size_y,
            ..Self::default()
        }
    }

    pub fn with_mode_binning(mut self, mode_binning: ModeBinning) -> Self {
        self.mode_binning = mode_binning;
        self
    }

    pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }

    pub fn with_partition_size(mut self, partition_size: usize) -> Self {
        self.partition_size = partition_size;
        self
    }

    pub fn validate(&self) -> Result<()> {
        check_cell_size("size_x", self.size_x)?;
        check_cell_size("size_y", self.size_y)?;
        if self.partition_size == 0 {
            return Err(GridError::invalid(
                "partition_size",
                "must be at least 1",
            ));
        }
        self.mode_binning.validate()
    }
}

fn check_cell_size(name: &'static str, size: f64) -> Result<()> {
    if size.is_finite() && size > 0.0 {
        Ok(())
    } else {
        Err(GridError::invalid(
            name,
            format!("cell size must be a positive finite number, got {}", size),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let options = GridOptions::default();
        assert!(options.validate().is_ok());
        assert_eq!(options.size_x, 5.0);
        assert_eq!(options.mode_binning, ModeBinning::BucketCount(64));
    }

    #[test]
    fn rejects_non_positive_sizes() {
        for size in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = GridOptions::new(size, 1.0).validate().unwrap_err();
            assert!(matches!(
                err,
                GridError::InvalidParameter { name: "size_x", .. }
            ));
            let err = GridOptions::new(1.0, size).validate().unwrap_err();
            assert!(matches!(
                err,
                GridError::InvalidParameter { name: "size_y", .. }
            ));
        }
    }

    #[test]
    fn rejects_zero_partition_and_bad_binning() {
        assert!(GridOptions::default()
            .with_partition_size(0)
            .validate()
            .is_err());
        assert!(GridOptions::default()
            .with_mode_binning(ModeBinning::BucketCount(0))
            .validate()
            .is_err());
    }
}
