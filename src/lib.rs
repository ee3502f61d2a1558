pub mod config;
pub mod dataset;
pub mod error;
pub mod evaluation;
pub mod plots;
pub mod regression;

pub use dataset::Dataset;
pub use error::{Error, Result};
pub use evaluation::{evaluate, Evaluation};
pub use regression::{
    cost, gradient_step, hypothesis, train, train_silent, CostSurface, Step, Theta, Training,
};
