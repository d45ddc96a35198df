use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaseMkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error(
        "Item dimensions {width}x{length}x{height}mm (with clearance) exceed max footprint {max_width}x{max_length}mm"
    )]
    OversizeItem {
        width: f64,
        length: f64,
        height: f64,
        max_width: f64,
        max_length: f64,
    },
    #[error("Items do not fit in footprint {max_width}x{max_length}mm")]
    DoesNotFit { max_width: f64, max_length: f64 },
    #[error("Nothing to lay out")]
    Empty,
}

impl CaseMkError {
    /// True for errors caused by the configuration rather than the items.
    pub fn is_config(&self) -> bool {
        matches!(self, CaseMkError::InvalidConfig(_))
    }
}

pub type Result<T> = std::result::Result<T, CaseMkError>;
