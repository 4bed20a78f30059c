use runlog_core::{RecognizeError, Variant};
use thiserror::Error;

/// A workout field the extractor looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Distance,
    Pace,
    TotalTime,
    Calories,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Distance => write!(f, "distance"),
            Self::Pace => write!(f, "pace"),
            Self::TotalTime => write!(f, "total time"),
            Self::Calories => write!(f, "calories"),
        }
    }
}

/// Recoverable extraction failures. None of these mutate any store.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no extractable workout format found in recognized text")]
    UnrecognizedFormat,

    #[error("could not extract workout details: no {field} found in {variant} text")]
    MissingField { variant: Variant, field: Field },

    #[error("could not read image: {0}")]
    Recognize(#[from] RecognizeError),
}
