use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Detector Error: {0}")]
    Detector(String),

    #[error("Frame must have 3 channels, got {0}")]
    ChannelCount(usize),

    #[error("Crop region is empty after clipping to the frame")]
    EmptyCrop,

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image Error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Json Error: {0}")]
    Json(#[from] serde_json::Error),
}
