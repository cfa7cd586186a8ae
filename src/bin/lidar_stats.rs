//! Prints per-plot statistics of a LIDAR point file.
//!
//! ```bash
//! cargo run --release --bin lidar_stats -- -f returns.csv.gz -w 5.0
//! ```

use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::{error, info};

use lidar_grid::{io::read_points, Grid, GridOptions, ModeBinning};

/// Simple analysis of LIDAR measurements
#[derive(Parser, Debug)]
#[command(name = "lidar_stats", version)]
struct Args {
    /// Input file with `x,y,z` records, optionally gzip-compressed
    #[arg(short = 'f', long)]
    infile: PathBuf,

    /// Plot size in meters
    #[arg(short = 'w', long, default_value_t = 5.0)]
    bin_width: f64,

    /// Histogram bin width for the mode, in value units; by default each
    /// plot's value range is split into `--mode-buckets` bins
    #[arg(long)]
    mode_width: Option<f64>,

    /// Number of histogram bins spanning a plot's value range
    #[arg(long, default_value_t = 64)]
    mode_buckets: usize,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let points = match read_points(&args.infile) {
        Ok(points) => points,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };
    info!("loaded {} points from {}", points.len(), args.infile.display());

    let mode_binning = match args.mode_width {
        Some(width) => ModeBinning::BinWidth(width),
        None => ModeBinning::BucketCount(args.mode_buckets),
    };
    let options = GridOptions::new(args.bin_width, args.bin_width).with_mode_binning(mode_binning);
    let grid = match Grid::with_options(options, &points) {
        Ok(grid) => grid,
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    };

    let bounds = grid.bounds();
    info!(
        "{} plots covering x [{}, {}] y [{}, {}]",
        grid.len(),
        bounds.min_x,
        bounds.max_x,
        bounds.min_y,
        bounds.max_y
    );

    for cell in grid.cells() {
        let stats = match grid.plot_statistics(cell.key()) {
            Ok(stats) => stats,
            Err(e) => {
                error!("{}", e);
                continue;
            }
        };
        println!(
            "{:3} {:3}  {:4}  {:7.2} {:7.2} {:7.2} {:7.2}",
            stats.key.i, stats.key.j, stats.count, stats.min, stats.avg, stats.max, stats.mode
        );
    }
}
