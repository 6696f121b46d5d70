use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataTableError {
    #[error("Line not found: {0}")]
    NotFound(String),

    #[error("More than one line has info: {0}")]
    Ambiguous(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl DataTableError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, DataTableError::NotFound(_))
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, DataTableError::Ambiguous(_))
    }
}

pub type Result<T> = std::result::Result<T, DataTableError>;
