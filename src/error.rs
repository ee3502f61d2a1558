use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid dataset: {0}")]
    Dataset(#[from] DatasetError),

    #[error("plotting failed: {0}")]
    Plot(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DatasetError {
    #[error("no usable rows")]
    Empty,

    #[error("missing column `{0}`")]
    MissingColumn(&'static str),

    #[error("column length mismatch (x has {x}, y has {y})")]
    LengthMismatch { x: usize, y: usize },
}

impl<E> From<plotters::drawing::DrawingAreaErrorKind<E>> for Error
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        Error::Plot(err.to_string())
    }
}
