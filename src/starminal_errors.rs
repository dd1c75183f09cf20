use thiserror::Error;

#[derive(Error, Debug)]
pub enum StarminalError {
    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Catalog CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Catalog is missing required column: {0}")]
    CatalogColumnMissing(String),

    #[error("HTTP reqwest error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("Invalid postal code: {0:?}")]
    InvalidPostalCode(String),

    #[error("No location found for postal code {0:?}")]
    LocationNotFound(String),

    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    #[error("Canvas is not ready (width={width}, height={height})")]
    CanvasNotReady { width: usize, height: usize },

    #[error("Canvas is too large to rasterize (width={width}, height={height})")]
    CanvasTooLarge { width: usize, height: usize },

    #[error("Image encoding error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Clock error: {0}")]
    Clock(#[from] hifitime::HifitimeError),

    #[error("Invalid instant {0:?}")]
    InvalidInstant(String),
}

impl PartialEq for StarminalError {
    fn eq(&self, other: &Self) -> bool {
        use StarminalError::*;
        match (self, other) {
            (CatalogColumnMissing(a), CatalogColumnMissing(b)) => a == b,
            (InvalidPostalCode(a), InvalidPostalCode(b)) => a == b,
            (LocationNotFound(a), LocationNotFound(b)) => a == b,
            (InvalidCoordinate(a), InvalidCoordinate(b)) => a == b,
            (InvalidInstant(a), InvalidInstant(b)) => a == b,
            (
                CanvasNotReady {
                    width: w1,
                    height: h1,
                },
                CanvasNotReady {
                    width: w2,
                    height: h2,
                },
            ) => w1 == w2 && h1 == h2,
            (
                CanvasTooLarge {
                    width: w1,
                    height: h1,
                },
                CanvasTooLarge {
                    width: w2,
                    height: h2,
                },
            ) => w1 == w2 && h1 == h2,

            // wrapped errors are opaque: same variant means equal
            (IoError(_), IoError(_)) => true,
            (CsvError(_), CsvError(_)) => true,
            (ReqwestError(_), ReqwestError(_)) => true,
            (ImageError(_), ImageError(_)) => true,
            (Clock(_), Clock(_)) => true,

            _ => false,
        }
    }
}
