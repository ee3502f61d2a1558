use std::path::PathBuf;

use clap::Parser;

/// Fit a line to x/y CSV data with batch gradient descent.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// CSV with `x` and `y` columns used for fitting.
    #[arg(long, default_value = "data/train.csv")]
    pub train: PathBuf,

    /// Held-out CSV used for evaluation.
    #[arg(long, default_value = "data/test.csv")]
    pub test: PathBuf,

    /// Learning rate.
    #[arg(short, long, default_value_t = 0.0001)]
    pub alpha: f64,

    #[arg(short, long, default_value_t = 50)]
    pub iters: usize,

    /// Number of leading iterations rendered with the fit and cost surface.
    #[arg(long, default_value_t = 3)]
    pub plot_iters: usize,

    /// Log the parameters every this many iterations.
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u64).range(1..))]
    pub report_every: u64,

    /// Directory the SVG plots are written to.
    #[arg(short, long, default_value = "plots")]
    pub output: PathBuf,

    #[arg(long)]
    pub no_plots: bool,
}

impl Args {
    pub fn reports(&self, iteration: usize) -> bool {
        iteration as u64 % self.report_every == 0
    }

    pub fn plots_iteration(&self, iteration: usize) -> bool {
        !self.no_plots && iteration < self.plot_iters
    }
}
