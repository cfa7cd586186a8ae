use std::collections::{BTreeMap, HashMap};

use itertools::Itertools;
use log::{debug, trace};
use rayon::prelude::*;

use crate::{
    bounds::Bounds,
    cell::Cell,
    cell_key::CellKey,
    error::{GridError, Result},
    filter,
    options::GridOptions,
    point::Point,
    stats::{ModeBinning, PlotStatistics},
};

/// A 2-dimensional grid of rectangular plots laid over a point collection.
/// Each populated plot owns the points positioned inside it, sorted by value.
///
/// The grid is built once and never changes afterwards, so it can be shared
/// between threads and queried concurrently.
#[derive(Debug, Clone)]
pub struct Grid {
    options: GridOptions,

    /// Extent of the points the grid was built from. [`Bounds::EMPTY`] if
    /// there were none.
    bounds: Bounds,

    /// Maps points onto keys relative to `bounds`.
    indexer: KeyIndexer,

    /// Only populated plots are present. The ordered map gives a stable key
    /// enumeration order.
    cells: BTreeMap<CellKey, Cell>,

    total_points: usize,
}

impl Grid {
    /// Bins `points` into plots of `size_x` by `size_y` using default options
    /// otherwise.
    pub fn build(size_x: f64, size_y: f64, points: &[Point]) -> Result<Self> {
        Self::with_options(GridOptions::new(size_x, size_y), points)
    }

    /// Bins `points` into plots as configured by `options`.
    ///
    /// Construction is atomic: on error no grid is produced. An empty point
    /// collection yields a grid with no plots and [`Bounds::EMPTY`].
    pub fn with_options(options: GridOptions, points: &[Point]) -> Result<Self> {
        options.validate()?;

        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(GridError::NonFinitePoint { index });
        }

        let parallel = points.len() >= options.parallel_threshold;
        let bounds = if parallel {
            points
                .par_iter()
                .fold(|| Bounds::EMPTY, |b, p| b.including(p))
                .reduce(|| Bounds::EMPTY, Bounds::union)
        } else {
            Bounds::new(points)
        };
        let indexer = KeyIndexer::new(&bounds, options.size_x, options.size_y)?;

        let binned = if parallel {
            // Partitions come back in input order, which keeps the merge below
            // deterministic.
            let partitions = points
                .par_chunks(options.partition_size)
                .map(|chunk| indexer.bin(chunk))
                .collect::<Vec<_>>();
            debug!(
                "binned {} points in {} partitions",
                points.len(),
                partitions.len()
            );
            merge_partitions(partitions)
        } else {
            merge_partitions(vec![indexer.bin(points)])
        };

        let cells: BTreeMap<CellKey, Cell> = if parallel {
            binned
                .into_par_iter()
                .map(|(key, points)| (key, Cell::new(key, points)))
                .collect()
        } else {
            binned
                .into_iter()
                .map(|(key, points)| (key, Cell::new(key, points)))
                .collect()
        };

        debug!(
            "built {}x{} grid over {} points: {} populated plots ({})",
            options.size_x,
            options.size_y,
            points.len(),
            cells.len(),
            if parallel { "parallel" } else { "sequential" }
        );

        Ok(Self {
            options,
            bounds,
            indexer,
            cells,
            total_points: points.len(),
        })
    }

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    pub fn size_x(&self) -> f64 {
        self.options.size_x
    }

    pub fn size_y(&self) -> f64 {
        self.options.size_y
    }

    /// Extent of the input points, or [`Bounds::EMPTY`] for an empty grid.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Number of populated plots.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of points the grid was built from.
    pub fn total_points(&self) -> usize {
        self.total_points
    }

    /// Keys of all populated plots in ascending `(i, j)` order.
    pub fn keys(&self) -> Vec<CellKey> {
        self.cells.keys().copied().collect_vec()
    }

    /// Populated plots in key order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.values()
    }

    pub fn cell(&self, key: CellKey) -> Result<&Cell> {
        self.cells.get(&key).ok_or(GridError::KeyNotFound { key })
    }

    pub fn count_points(&self, key: CellKey) -> Result<usize> {
        self.cell(key).map(Cell::len)
    }

    /// Points of a plot sorted ascending by value. Points with equal values
    /// keep their input order.
    pub fn points(&self, key: CellKey) -> Result<&[Point]> {
        self.cell(key).map(Cell::points)
    }

    /// Points of a plot with `percent` of the observations removed from each
    /// tail of the value distribution.
    pub fn trimmed_points(&self, key: CellKey, percent: f64) -> Result<&[Point]> {
        filter::trim_tails(self.points(key)?, percent)
    }

    /// Statistics of a plot using the grid's configured mode binning. The
    /// result is computed once per plot and cached for the grid's lifetime.
    pub fn plot_statistics(&self, key: CellKey) -> Result<PlotStatistics> {
        let binning = self.options.mode_binning;
        self.cell(key).map(|cell| cell.statistics(binning))
    }

    /// Statistics of a plot with an alternative mode binning. Not cached.
    pub fn plot_statistics_with(&self, key: CellKey, binning: ModeBinning) -> Result<PlotStatistics> {
        binning.validate()?;
        self.cell(key).map(|cell| cell.compute_statistics(binning))
    }

    /// The key a point at this position is binned into, or `None` if it lies
    /// outside the grid's bounds.
    pub fn key_for(&self, p: &Point) -> Option<CellKey> {
        if self.bounds.contains(p) {
            Some(self.indexer.key(p))
        } else {
            None
        }
    }

    /// Shape `(max_i + 1, max_j + 1)` of a dense array able to hold every
    /// populated plot; `(0, 0)` for an empty grid.
    pub fn dimensions(&self) -> (usize, usize) {
        self.cells.keys().fold((0, 0), |(ni, nj), key| {
            (ni.max(key.i as usize + 1), nj.max(key.j as usize + 1))
        })
    }

    /// Lays one statistic of every plot out in a dense row-major array of
    /// [`Grid::dimensions`] shape (see [`CellKey::into_dense_index`]).
    /// Unpopulated plots hold `fill`.
    pub fn to_dense<F>(&self, fill: f64, f: F) -> Vec<f64>
    where
        F: Fn(&PlotStatistics) -> f64,
    {
        let dims = self.dimensions();
        let mut dense = vec![fill; dims.0 * dims.1];
        for cell in self.cells.values() {
            if let Some(index) = cell.key().into_dense_index(dims) {
                dense[index] = f(&cell.statistics(self.options.mode_binning));
            }
        }
        dense
    }
}

/// Maps horizontal positions onto plot keys.
///
/// `columns` and `rows` count the plots needed to cover the bounds. Indices
/// are clamped to the last column/row, so a point on `max_x` or `max_y` is
/// binned into the topmost plot rather than one past it.
#[derive(Debug, Clone, Copy)]
struct KeyIndexer {
    min_x: f64,
    min_y: f64,
    size_x: f64,
    size_y: f64,
    columns: u32,
    rows: u32,
}

impl KeyIndexer {
    fn new(bounds: &Bounds, size_x: f64, size_y: f64) -> Result<Self> {
        if bounds.is_empty() {
            return Ok(Self {
                min_x: 0.0,
                min_y: 0.0,
                size_x,
                size_y,
                columns: 0,
                rows: 0,
            });
        }
        Ok(Self {
            min_x: bounds.min_x,
            min_y: bounds.min_y,
            size_x,
            size_y,
            columns: plots_along("size_x", bounds.width_x(), size_x)?,
            rows: plots_along("size_y", bounds.width_y(), size_y)?,
        })
    }

    fn key(&self, p: &Point) -> CellKey {
        CellKey::new(
            axis_index(p.x - self.min_x, self.size_x, self.columns),
            axis_index(p.y - self.min_y, self.size_y, self.rows),
        )
    }

    fn bin(&self, points: &[Point]) -> HashMap<CellKey, Vec<Point>> {
        let mut local: HashMap<CellKey, Vec<Point>> = HashMap::new();
        for p in points {
            local.entry(self.key(p)).or_default().push(*p);
        }
        trace!("partition of {} points -> {} plots", points.len(), local.len());
        local
    }
}

fn plots_along(name: &'static str, width: f64, size: f64) -> Result<u32> {
    let count = (width / size).ceil().max(1.0);
    if count > u32::MAX as f64 {
        return Err(GridError::invalid(
            name,
            format!(
                "cell size {} splits an extent of {} into more than {} plots",
                size,
                width,
                u32::MAX
            ),
        ));
    }
    Ok(count as u32)
}

fn axis_index(offset: f64, size: f64, count: u32) -> u32 {
    // `offset` is non-negative for points inside the bounds; the float to int
    // cast saturates.
    ((offset / size).floor() as u32).min(count.saturating_sub(1))
}

/// Concatenates per-partition point lists key by key, in partition order.
fn merge_partitions(partitions: Vec<HashMap<CellKey, Vec<Point>>>) -> Vec<(CellKey, Vec<Point>)> {
    let mut merged: BTreeMap<CellKey, Vec<Point>> = BTreeMap::new();
    for partition in partitions {
        for (key, mut points) in partition {
            merged.entry(key).or_default().append(&mut points);
        }
    }
    merged.into_iter().collect_vec()
}
