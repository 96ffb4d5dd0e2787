use thiserror::Error;

use crate::field::PALETTE_SIZE;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("color count {0} out of range 1..={max}", max = PALETTE_SIZE)]
    ColorCount(usize),
    #[error("field dimensions must be non-zero, got {height}x{width}")]
    EmptyDimensions { height: usize, width: usize },
    #[error("field has {rows} rows, expected {height}")]
    RowCount { rows: usize, height: usize },
    #[error("field row {row} has {len} cells, expected {width}")]
    RaggedRow { row: usize, len: usize, width: usize },
}

#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("cannot read descriptor {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("descriptor is missing token {index} ({name})")]
    MissingToken { index: usize, name: &'static str },
    #[error("descriptor token {name} is not a number: {value:?}")]
    InvalidNumber { name: &'static str, value: String },
    #[error("invalid descriptor: {0}")]
    Invalid(#[from] FieldError),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),
    #[error("descriptor error: {0}")]
    Descriptor(#[from] DescriptorError),
    #[error("field error: {0}")]
    Field(#[from] FieldError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("render error: {0}")]
    Render(#[from] std::fmt::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("http error: {0}")]
    Http(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
