use std::io;
use std::path::Path;

use log::{debug, warn};
use ndarray::Array1;

use crate::error::{DatasetError, Result};

/// Paired `x`/`y` columns of equal, non-zero length.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    x: Array1<f64>,
    y: Array1<f64>,
}

const COLUMNS: [&str; 2] = ["x", "y"];

#[derive(Debug, serde::Deserialize)]
struct Record {
    x: Option<f64>,
    y: Option<f64>,
}

impl Record {
    fn complete(&self) -> Option<(f64, f64)> {
        match (self.x, self.y) {
            (Some(x), Some(y)) if !x.is_nan() && !y.is_nan() => Some((x, y)),
            _ => None,
        }
    }
}

impl Dataset {
    pub fn new(x: Array1<f64>, y: Array1<f64>) -> std::result::Result<Self, DatasetError> {
        if x.len() != y.len() {
            return Err(DatasetError::LengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }

        if x.is_empty() {
            return Err(DatasetError::Empty);
        }

        Ok(Dataset { x, y })
    }

    pub fn from_points(
        points: impl IntoIterator<Item = (f64, f64)>,
    ) -> std::result::Result<Self, DatasetError> {
        let (x, y): (Vec<f64>, Vec<f64>) = points.into_iter().unzip();

        Dataset::new(Array1::from(x), Array1::from(y))
    }

    /// Reads a headed CSV with `x` and `y` columns, dropping rows where
    /// either value is missing, short or NaN. Other columns are ignored.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

        let headers = reader.headers()?;
        for column in COLUMNS {
            if !headers.iter().any(|header| header == column) {
                return Err(DatasetError::MissingColumn(column).into());
            }
        }

        let mut rows = 0usize;

        let points = reader
            .deserialize::<Record>()
            .map(|record| {
                rows += 1;
                record
            })
            .filter_map(|record| match record {
                Ok(record) => record.complete().map(Ok),
                Err(e) => Some(Err(e)),
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        if points.len() < rows {
            warn!("dropped {} of {} rows with missing values", rows - points.len(), rows);
        }

        Ok(Dataset::from_points(points)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("loading dataset from {}", path.display());

        let file = std::fs::File::open(path)?;

        Self::from_reader(io::BufReader::new(file))
    }

    pub fn x(&self) -> &Array1<f64> {
        &self.x
    }

    pub fn y(&self) -> &Array1<f64> {
        &self.y
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Never true for a constructed dataset.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + Clone + '_ {
        self.x.iter().cloned().zip(self.y.iter().cloned())
    }

    pub fn y_mean(&self) -> f64 {
        self.y.sum() / self.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn drops_rows_with_missing_or_nan_values() {
        let csv = "x,y\n1,2\n,3\n4,NaN\n5,6\n";

        let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();

        assert_eq!(dataset.points().collect::<Vec<_>>(), vec![(1., 2.), (5., 6.)]);
    }

    #[test]
    fn ignores_extra_columns() {
        let csv = "id,y,x,comment\n0,10,1,first\n1,20,2,second\n";

        let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();

        assert_eq!(dataset.x().to_vec(), vec![1., 2.]);
        assert_eq!(dataset.y().to_vec(), vec![10., 20.]);
    }

    #[test]
    fn rejects_non_numeric_cells() {
        let csv = "x,y\n1,2\nthree,4\n";

        assert!(matches!(Dataset::from_reader(csv.as_bytes()), Err(Error::Csv(_))));
    }

    #[test]
    fn empty_after_cleaning_is_an_error() {
        let csv = "x,y\nNaN,1\n2,\n";

        assert!(matches!(
            Dataset::from_reader(csv.as_bytes()),
            Err(Error::Dataset(DatasetError::Empty))
        ));
    }

    #[test]
    fn short_rows_are_dropped() {
        let csv = "x,y\n1,2\n3\n4,5\n";

        let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();

        assert_eq!(dataset.points().collect::<Vec<_>>(), vec![(1., 2.), (4., 5.)]);
    }

    #[test]
    fn names_the_missing_column() {
        let csv = "x,z\n1,2\n3,4\n";

        assert!(matches!(
            Dataset::from_reader(csv.as_bytes()),
            Err(Error::Dataset(DatasetError::MissingColumn("y")))
        ));

        assert!(matches!(
            Dataset::from_reader("".as_bytes()),
            Err(Error::Dataset(DatasetError::MissingColumn("x")))
        ));
    }

    #[test]
    fn mismatched_columns() {
        let err = Dataset::new(Array1::from(vec![1., 2.]), Array1::from(vec![1.])).unwrap_err();

        assert_eq!(err, DatasetError::LengthMismatch { x: 2, y: 1 });
    }

    #[test]
    fn mean_of_targets() {
        let dataset = Dataset::from_points([(0., 1.), (1., 2.), (2., 6.)]).unwrap();

        assert_eq!(dataset.y_mean(), 3.);
    }
}
