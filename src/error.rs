use thiserror::Error;

/// Failures while importing an image file.
///
/// These are surfaced to the user as a recoverable notice; a corrupt file
/// never crashes the editor.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("failed to read file: {0}")]
    Read(#[from] std::io::Error),
    #[error("dropped file has no accessible data")]
    Empty,
    #[error("not a supported image file: {0}")]
    UnsupportedType(String),
}
