use thiserror::Error;

/// Errors decoding a host message
#[derive(Debug, Error)]
pub enum MessageError {
    #[error("Message has no \"type\" string")]
    MissingType,

    #[error("Malformed message: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Unknown brush type: {0}")]
    UnknownBrushType(String),

    #[error("Brush type {0} requires a color")]
    MissingColor(&'static str),

    #[error("Tool size {0} outside of [1, 16]")]
    SizeOutOfRange(f32),
}

/// Errors loading [`InkSettings`](crate::InkSettings)
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid settings: {0}")]
    Invalid(String),
}
