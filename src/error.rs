use std::io;

use thiserror::Error;

/// Errors raised while fetching the chart or writing the dataset.
///
/// Extraction itself never fails: extractors return whatever they could
/// recover, possibly nothing.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("chart request returned HTTP {0}")]
    HttpStatus(u16),
    #[error("chart request failed: {0}")]
    Transport(#[from] ureq::Error),
    #[error("invalid chart url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("csv output failed: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
