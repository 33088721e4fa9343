use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid dimensions: {rows}x{cols}, both must be positive")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("grid too large: {rows}x{cols}")]
    TooLarge { rows: usize, cols: usize },

    #[error("pattern error: {0}")]
    Pattern(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
