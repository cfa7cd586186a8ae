use std::sync::OnceLock;

use crate::{
    cell_key::CellKey,
    point::Point,
    stats::{ModeBinning, PlotStatistics},
};

/// The points binned into one plot, sorted ascending by value.
///
/// Statistics for the grid's configured binning are computed on first request
/// and then served from the cell. `OnceLock` runs the computation at most once
/// even under concurrent first access.
#[derive(Debug, Clone)]
pub struct Cell {
    key: CellKey,
    points: Vec<Point>,
    statistics: OnceLock<PlotStatistics>,
}

impl Cell {
    /// Sorts `points` by value with a stable sort, so equal values keep their
    /// input order. `points` must not be empty.
    pub(crate) fn new(key: CellKey, mut points: Vec<Point>) -> Self {
        debug_assert!(!points.is_empty());
        points.sort_by(|a, b| crate::f64::cmp_f64(a.value, b.value));
        Self {
            key,
            points,
            statistics: OnceLock::new(),
        }
    }

    pub fn key(&self) -> CellKey {
        self.key
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn min(&self) -> f64 {
        self.points[0].value
    }

    pub fn max(&self) -> f64 {
        self.points[self.points.len() - 1].value
    }

    pub(crate) fn statistics(&self, binning: ModeBinning) -> PlotStatistics {
        *self
            .statistics
            .get_or_init(|| self.compute_statistics(binning))
    }

    pub(crate) fn compute_statistics(&self, binning: ModeBinning) -> PlotStatistics {
        PlotStatistics::summarize(self.key, &self.points, binning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorts_stably_by_value() {
        let cell = Cell::new(
            CellKey::new(0, 0),
            vec![
                Point::new(0.0, 0.0, 3.0),
                Point::new(1.0, 0.0, 1.0),
                Point::new(2.0, 0.0, 3.0),
                Point::new(3.0, 0.0, 1.0),
            ],
        );
        let xs: Vec<f64> = cell.points().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![1.0, 3.0, 0.0, 2.0]);
        assert_eq!(cell.min(), 1.0);
        assert_eq!(cell.max(), 3.0);
        assert_eq!(cell.len(), 4);
    }

    #[test]
    fn caches_statistics() {
        let cell = Cell::new(
            CellKey::new(2, 1),
            vec![Point::new(0.0, 0.0, 2.0), Point::new(0.0, 0.0, 4.0)],
        );
        let first = cell.statistics(ModeBinning::BucketCount(2));
        assert_eq!(first.key, CellKey::new(2, 1));
        assert_eq!(first.avg, 3.0);
        // The first binning wins for the cached value.
        let second = cell.statistics(ModeBinning::BinWidth(100.0));
        assert_eq!(first, second);
        assert_ne!(
            cell.compute_statistics(ModeBinning::BinWidth(100.0)).mode,
            first.mode
        );
    }
}
