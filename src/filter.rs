//! Selecting plots and observations worth analysing.

use itertools::Itertools;

use crate::{
    cell_key::CellKey,
    error::{GridError, Result},
    grid::Grid,
    point::Point,
};

/// Drops `floor(n * percent / 100)` points from each end of `points`, which
/// must be sorted by value. `percent` must lie in `[0, 50)`.
pub fn trim_tails(points: &[Point], percent: f64) -> Result<&[Point]> {
    if !(0.0..50.0).contains(&percent) {
        return Err(GridError::invalid(
            "percent",
            format!("tail percentage must lie in [0, 50), got {}", percent),
        ));
    }
    let n = points.len();
    let cut = (n as f64 * percent / 100.0).floor() as usize;
    Ok(&points[cut..n - cut])
}

/// Plot sizes, largest first. Plots of equal size are ordered by key.
pub fn plots_by_size(grid: &Grid) -> Vec<(CellKey, usize)> {
    grid.cells()
        .map(|cell| (cell.key(), cell.len()))
        .sorted_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)))
        .collect_vec()
}

/// Every plot holding at least `min_observations` points, with `percent` of
/// its observations trimmed from both tails, in key order.
pub fn filtered_plots(
    grid: &Grid,
    min_observations: usize,
    percent: f64,
) -> Result<Vec<(CellKey, &[Point])>> {
    grid.cells()
        .filter(|cell| cell.len() >= min_observations)
        .map(|cell| trim_tails(cell.points(), percent).map(|kept| (cell.key(), kept)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(points: &[Point]) -> Vec<f64> {
        points.iter().map(|p| p.value).collect()
    }

    fn sorted(n: usize) -> Vec<Point> {
        (0..n).map(|k| Point::new(0.0, 0.0, k as f64)).collect()
    }

    #[test]
    fn trims_both_tails() {
        let points = sorted(20);
        let kept = trim_tails(&points, 10.0).unwrap();
        assert_eq!(kept.len(), 16);
        assert_eq!(kept[0].value, 2.0);
        assert_eq!(kept[15].value, 17.0);
    }

    #[test]
    fn rounds_cut_down() {
        let points = sorted(9);
        // 9 * 10% = 0.9 rounds down to nothing.
        assert_eq!(trim_tails(&points, 10.0).unwrap().len(), 9);
        assert_eq!(values(trim_tails(&points, 20.0).unwrap()), values(&points[1..8]));
    }

    #[test]
    fn zero_percent_and_empty_input() {
        let points = sorted(5);
        assert_eq!(trim_tails(&points, 0.0).unwrap().len(), 5);
        assert!(trim_tails(&[], 25.0).unwrap().is_empty());
    }

    #[test]
    fn rejects_out_of_range_percentages() {
        let points = sorted(10);
        for percent in [-1.0, 50.0, 75.0, f64::NAN] {
            assert!(matches!(
                trim_tails(&points, percent),
                Err(GridError::InvalidParameter { name: "percent", .. })
            ));
        }
    }

    #[test]
    fn orders_plots_by_size_then_key() {
        let points = vec![
            Point::new(0.0, 0.0, 1.0),
            Point::new(9.0, 0.0, 1.0),
            Point::new(9.0, 0.0, 2.0),
            Point::new(0.0, 9.0, 1.0),
        ];
        let grid = Grid::build(5.0, 5.0, &points).unwrap();
        assert_eq!(
            plots_by_size(&grid),
            vec![
                (CellKey::new(1, 0), 2),
                (CellKey::new(0, 0), 1),
                (CellKey::new(0, 1), 1),
            ]
        );
    }

    #[test]
    fn filters_sparse_plots() {
        let mut points = sorted(10);
        points.push(Point::new(9.0, 9.0, 0.0));
        let grid = Grid::build(5.0, 5.0, &points).unwrap();
        let plots = filtered_plots(&grid, 5, 10.0).unwrap();
        assert_eq!(plots.len(), 1);
        assert_eq!(plots[0].0, CellKey::new(0, 0));
        assert_eq!(values(plots[0].1), (1..9).map(|v| v as f64).collect::<Vec<_>>());
    }
}
