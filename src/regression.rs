use std::convert::Infallible;
use std::ops::Range;

use ndarray::{Array, Array1, Array2, Zip};

use crate::dataset::Dataset;

/// Bias and slope of the fitted line.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Theta {
    pub bias: f64,
    pub weight: f64,
}

impl Theta {
    pub fn new(bias: f64, weight: f64) -> Self {
        Theta { bias, weight }
    }

    pub fn hypothesis(&self, x: f64) -> f64 {
        self.bias + self.weight * x
    }
}

pub fn hypothesis(theta: Theta, x: f64) -> f64 {
    theta.hypothesis(x)
}

/// Mean squared error scaled by `1 / 2m`.
pub fn cost(theta: Theta, data: &Dataset) -> f64 {
    let m = data.len() as f64;

    let total_error = Zip::from(data.x())
        .and(data.y())
        .fold(0., |acc, &x, &y| acc + (theta.hypothesis(x) - y).powi(2));

    total_error / (2. * m)
}

/// One batch gradient descent update.
pub fn gradient_step(theta: Theta, data: &Dataset, alpha: f64) -> Theta {
    let m = data.len() as f64;

    let (summation_0, summation_1) = Zip::from(data.x()).and(data.y()).fold(
        (0., 0.),
        |(summation_0, summation_1), &x, &y| {
            let residual = theta.hypothesis(x) - y;
            (summation_0 + residual, summation_1 + x * residual)
        },
    );

    Theta {
        bias: theta.bias - alpha * summation_0 / m,
        weight: theta.weight - alpha * summation_1 / m,
    }
}

/// What the observer sees after every update.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Step {
    pub iteration: usize,
    pub previous: Theta,
    pub theta: Theta,
    pub cost: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Training {
    pub theta: Theta,
    pub cost_history: Vec<f64>,
}

/// Runs exactly `iters` gradient steps from `Theta::default()`.
///
/// `observer` is called once per iteration after the cost of the new
/// parameters is recorded; an error from it aborts training.
pub fn train<F, E>(
    data: &Dataset,
    alpha: f64,
    iters: usize,
    mut observer: F,
) -> Result<Training, E>
where
    F: FnMut(&Step) -> Result<(), E>,
{
    let mut theta = Theta::default();
    let mut cost_history = Vec::with_capacity(iters);

    for iteration in 0..iters {
        let previous = theta;
        theta = gradient_step(theta, data, alpha);

        let cost = cost(theta, data);
        cost_history.push(cost);

        observer(&Step {
            iteration,
            previous,
            theta,
            cost,
        })?;
    }

    Ok(Training {
        theta,
        cost_history,
    })
}

pub fn train_silent(data: &Dataset, alpha: f64, iters: usize) -> Training {
    match train(data, alpha, iters, |_| Ok::<_, Infallible>(())) {
        Ok(training) => training,
        Err(never) => match never {},
    }
}

pub const SURFACE_RESOLUTION: usize = 100;

/// Cost evaluated over a θ₀ × θ₁ grid. Rows follow `theta1`, columns `theta0`.
#[derive(Clone, Debug)]
pub struct CostSurface {
    pub theta0: Array1<f64>,
    pub theta1: Array1<f64>,
    pub cost: Array2<f64>,
}

impl CostSurface {
    pub fn new(data: &Dataset, theta0: Range<f64>, theta1: Range<f64>, resolution: usize) -> Self {
        let theta0 = Array::linspace(theta0.start, theta0.end, resolution);
        let theta1 = Array::linspace(theta1.start, theta1.end, resolution);

        let cost = Array2::from_shape_fn((theta1.len(), theta0.len()), |(i, j)| {
            cost(Theta::new(theta0[j], theta1[i]), data)
        });

        CostSurface {
            theta0,
            theta1,
            cost,
        }
    }

    pub fn around_origin(data: &Dataset) -> Self {
        Self::new(data, -10.0..10.0, -1.0..3.0, SURFACE_RESOLUTION)
    }

    /// Largest finite cost on the grid, zero when there is none.
    pub fn max_cost(&self) -> f64 {
        self.cost
            .iter()
            .cloned()
            .filter(|cost| cost.is_finite())
            .fold(0., f64::max)
    }
}
