use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal, Uniform};

/// Writes train/test CSVs sampled around `y = bias + weight * x`.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long, default_value_t = -3.)]
    bias: f64,

    #[arg(long, default_value_t = 1.)]
    weight: f64,

    /// Standard deviation of the gaussian noise added to y.
    #[arg(long, default_value_t = 3.)]
    noise: f64,

    #[arg(long, default_value_t = 0.)]
    x_min: f64,

    #[arg(long, default_value_t = 100.)]
    x_max: f64,

    #[arg(long, default_value_t = 700)]
    train_size: usize,

    #[arg(long, default_value_t = 300)]
    test_size: usize,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    #[arg(short, long, default_value = "data")]
    output: PathBuf,
}

#[derive(Debug, serde::Serialize)]
struct Record {
    x: f64,
    y: f64,
}

fn sample_line(args: &Args, size: usize, rng: &mut StdRng) -> anyhow::Result<Vec<Record>> {
    let uniform = Uniform::new_inclusive(args.x_min, args.x_max);
    let normal = Normal::new(0., args.noise).context("invalid noise level")?;

    let records = (0..size)
        .map(|_| {
            let x = uniform.sample(rng);
            let y = args.bias + args.weight * x + normal.sample(rng);
            Record { x, y }
        })
        .collect();

    Ok(records)
}

fn write_csv(path: &Path, records: &[Record]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    info!("wrote {} rows to {}", records.len(), path.display());

    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    anyhow::ensure!(args.x_min <= args.x_max, "x_min must not exceed x_max");

    let mut rng = StdRng::seed_from_u64(args.seed);

    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;

    let train = sample_line(&args, args.train_size, &mut rng)?;
    let test = sample_line(&args, args.test_size, &mut rng)?;

    write_csv(&args.output.join("train.csv"), &train)?;
    write_csv(&args.output.join("test.csv"), &test)?;

    Ok(())
}
