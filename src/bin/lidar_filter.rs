//! Filters LIDAR observations.
//!
//! Discards plots with fewer than `--min-observations` points and, from every
//! remaining plot, removes `--percent` of the observations from both tails of
//! the value distribution. Surviving points are printed one per line.
//!
//! ```bash
//! cargo run --release --bin lidar_filter -- -f returns.csv.gz -m 50 -p 5
//! ```

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::{error, info};

use lidar_grid::{filter::filtered_plots, io::read_points, Grid};

/// Removes sparse plots and outlying observations from LIDAR measurements
#[derive(Parser, Debug)]
#[command(name = "lidar_filter", version)]
struct Args {
    /// Input file with `x,y,z` records, optionally gzip-compressed
    #[arg(short = 'f', long)]
    infile: PathBuf,

    /// Plot size in meters
    #[arg(short = 'w', long, default_value_t = 5.0)]
    bin_width: f64,

    /// Minimum number of observations per plot; sparser plots are discarded
    #[arg(short = 'm', long, default_value_t = 50)]
    min_observations: usize,

    /// Percentage of observations trimmed from each tail of every plot
    #[arg(short = 'p', long, default_value_t = 5.0)]
    percent: f64,
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let points = read_points(&args.infile)?;
    let grid = Grid::build(args.bin_width, args.bin_width, &points)?;
    let plots = filtered_plots(&grid, args.min_observations, args.percent)?;
    info!(
        "{} of {} plots have at least {} observations",
        plots.len(),
        grid.len(),
        args.min_observations
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for (_, points) in plots {
        for p in points {
            writeln!(out, "{}", p)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        error!("{}", e);
        process::exit(1);
    }
}
