use std::fmt;

use itertools::Itertools;

use crate::dataset::Dataset;
use crate::regression::Theta;

/// Sum-of-squares statistics of a fitted line over held-out data.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Evaluation {
    /// error sum of squares
    pub sse: f64,
    /// regression sum of squares
    pub ssr: f64,
    /// total sum of squares
    pub ssto: f64,
    pub min_error: f64,
    pub max_error: f64,
    pub mean_error: f64,
}

impl Evaluation {
    /// Coefficient of determination `SSR / SSTO` as a percentage, `None`
    /// when the targets have no variance.
    pub fn r_squared(&self) -> Option<f64> {
        if self.ssto == 0. {
            None
        } else {
            Some(self.ssr / self.ssto * 100.)
        }
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "minimum error is : {}", self.min_error)?;
        writeln!(f, "maximum error is : {}", self.max_error)?;
        writeln!(f, "average error is : {}", self.mean_error)?;
        writeln!(f, "sum of squares of error (SSE) : {}", self.sse)?;
        writeln!(f, "regression sum of squares (SSR) : {}", self.ssr)?;
        writeln!(f, "total sum of squares (SSTO) : {}", self.ssto)?;

        match self.r_squared() {
            Some(r_squared) => write!(f, "coefficient of determination R-squared : {r_squared} %"),
            None => write!(f, "coefficient of determination R-squared : undefined (SSTO is 0)"),
        }
    }
}

pub fn evaluate(theta: Theta, data: &Dataset) -> Evaluation {
    let y_mean = data.y_mean();

    let mut ssr = 0.;
    let mut ssto = 0.;

    let errors: Vec<f64> = data
        .points()
        .map(|(x, y)| {
            let prediction = theta.hypothesis(x);

            ssr += (prediction - y_mean).powi(2);
            ssto += (y - y_mean).powi(2);

            (prediction - y).powi(2)
        })
        .collect();

    let sse: f64 = errors.iter().sum();

    let (min_error, max_error) = errors
        .iter()
        .cloned()
        .minmax_by(f64::total_cmp)
        .into_option()
        .unwrap_or((0., 0.));

    Evaluation {
        sse,
        ssr,
        ssto,
        min_error,
        max_error,
        mean_error: sse / errors.len() as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::regression::train_silent;

    #[test]
    fn perfect_fit_on_training_data() {
        let data = Dataset::from_points([(1., 2.), (2., 4.), (3., 6.)]).unwrap();

        let evaluation = evaluate(Theta::new(0., 2.), &data);

        assert_eq!(evaluation.sse, 0.);
        assert_eq!(evaluation.max_error, 0.);
        assert_eq!(evaluation.ssr, evaluation.ssto);
        assert_eq!(evaluation.r_squared(), Some(100.));
    }

    #[test]
    fn error_statistics() {
        let data = Dataset::from_points([(0., 1.), (1., 1.), (2., 4.)]).unwrap();

        // predictions 0, 1, 2 against 1, 1, 4
        let evaluation = evaluate(Theta::new(0., 1.), &data);

        assert_eq!(evaluation.sse, 5.);
        assert_eq!(evaluation.min_error, 0.);
        assert_eq!(evaluation.max_error, 4.);
        assert!((evaluation.mean_error - 5. / 3.).abs() < 1e-12);
        // mean 2: (0-2)² + (1-2)² + (2-2)²
        assert_eq!(evaluation.ssr, 5.);
        assert_eq!(evaluation.ssto, 6.);
    }

    #[test]
    fn decomposition_holds_for_fitted_line() {
        let data = Dataset::from_points([
            (0., 1.2),
            (1., 2.9),
            (2., 5.1),
            (3., 7.2),
            (4., 8.8),
            (5., 11.1),
        ])
        .unwrap();

        let training = train_silent(&data, 0.05, 20_000);
        let evaluation = evaluate(training.theta, &data);

        let total = evaluation.ssr + evaluation.sse;
        assert!((evaluation.ssto - total).abs() < 1e-6 * evaluation.ssto);

        let r_squared = evaluation.r_squared().unwrap();
        assert!(r_squared > 99. && r_squared <= 100.);
    }

    #[test]
    fn constant_targets_have_no_r_squared() {
        let data = Dataset::from_points([(0., 3.), (1., 3.)]).unwrap();

        let evaluation = evaluate(Theta::new(3., 0.), &data);

        assert_eq!(evaluation.r_squared(), None);
        assert!(evaluation.to_string().ends_with("undefined (SSTO is 0)"));
    }
}
