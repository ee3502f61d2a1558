use anyhow::Context;
use clap::Parser;
use log::{info, warn};

use gd_line_fit::config::Args;
use gd_line_fit::plots::{
    plot_fit, plot_iteration, plot_learning_curve, plot_predicted_vs_actual, render_svg,
};
use gd_line_fit::{evaluate, train, CostSurface, Dataset};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let train_data = Dataset::from_path(&args.train)
        .with_context(|| format!("loading training data from {}", args.train.display()))?;
    let test_data = Dataset::from_path(&args.test)
        .with_context(|| format!("loading testing data from {}", args.test.display()))?;

    info!(
        "training on {} points, testing on {} points",
        train_data.len(),
        test_data.len()
    );

    if !args.no_plots {
        std::fs::create_dir_all(&args.output)
            .with_context(|| format!("creating {}", args.output.display()))?;
    }

    let surface = (!args.no_plots && args.plot_iters > 0)
        .then(|| CostSurface::around_origin(&train_data));

    let training = train(&train_data, args.alpha, args.iters, |step| {
        if let Some(surface) = surface.as_ref().filter(|_| args.plots_iteration(step.iteration)) {
            render_svg(
                args.output.join(format!("iteration_{}.svg", step.iteration)),
                (800, 1200),
                |area| plot_iteration(step.iteration, &train_data, step.previous, surface, area),
            )?;
        }

        if args.reports(step.iteration) {
            info!(
                "iteration {}: theta_0 = {}, theta_1 = {}, cost = {}",
                step.iteration, step.theta.bias, step.theta.weight, step.cost
            );
        }

        Ok::<_, gd_line_fit::Error>(())
    })?;

    if !(training.theta.bias.is_finite() && training.theta.weight.is_finite()) {
        warn!(
            "training diverged with alpha = {}, parameters are no longer finite",
            args.alpha
        );
    }

    println!(
        "\n*** The final value of theta_0 is {} and theta_1 is {} ***\n",
        training.theta.bias, training.theta.weight
    );

    if !args.no_plots {
        render_svg(
            args.output.join("predicted_vs_actual.svg"),
            (800, 600),
            |area| plot_predicted_vs_actual(&train_data, training.theta, area),
        )?;

        render_svg(args.output.join("learning_curve.svg"), (800, 600), |area| {
            plot_learning_curve(&training.cost_history, area)
        })?;

        render_svg(args.output.join("test_fit.svg"), (800, 600), |area| {
            plot_fit(
                &test_data,
                training.theta,
                "Plotting our hypothesis across the testing data",
                area,
            )
        })?;
    }

    let evaluation = evaluate(training.theta, &test_data);

    println!("{evaluation}");

    Ok(())
}
