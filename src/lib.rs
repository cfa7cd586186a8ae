//! Bins irregularly sampled LIDAR returns into a regular grid of plots and
//! summarises the values measured in each plot.
//!
//! ```
//! use lidar_grid::{CellKey, Grid, Point};
//!
//! let points = vec![
//!     Point::new(0.0, 0.0, 1.0),
//!     Point::new(0.0, 0.0, 3.0),
//!     Point::new(9.0, 9.0, 5.0),
//! ];
//! let grid = Grid::build(5.0, 5.0, &points).unwrap();
//! let stats = grid.plot_statistics(CellKey::new(0, 0)).unwrap();
//! assert_eq!(stats.count, 2);
//! assert_eq!(stats.avg, 2.0);
//! ```

mod bounds;
mod cell;
mod cell_key;
pub mod error;
mod f64;
pub mod filter;
mod grid;
pub mod io;
mod options;
mod point;
mod stats;

pub use crate::{
    bounds::Bounds,
    cell::Cell,
    cell_key::CellKey,
    error::{GridError, LoadError, Result},
    grid::Grid,
    options::GridOptions,
    point::Point,
    stats::{ModeBinning, PlotStatistics},
};
