use thiserror::Error;

/// Main error type for the Caption-Compositor library
#[derive(Error, Debug)]
pub enum CompositorError {
    #[error("Animation error: {0}")]
    Animation(#[from] AnimationError),

    #[error("Font error: {0}")]
    Font(#[from] FontError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Generic error: {0}")]
    Generic(String),
}

/// Errors raised while reading, compositing or writing an animation
#[derive(Error, Debug)]
pub enum AnimationError {
    #[error("Source animation not found: {path}")]
    SourceNotFound { path: String },

    #[error("Failed to decode source animation: {reason}")]
    DecodeFailed { reason: String },

    #[error("Failed to encode output animation: {reason}")]
    EncodeFailed { reason: String },

    #[error("Invalid animation dimensions: {details}")]
    InvalidDimensions { details: String },
}

/// Errors raised by the caption font resource
#[derive(Error, Debug)]
pub enum FontError {
    #[error("Font file not found: {path}")]
    NotFound { path: String },

    #[error("Failed to parse font {path}: {reason}")]
    ParseFailed { path: String, reason: String },

    #[error("Failed to measure text at {size}px: {reason}")]
    MeasureFailed { size: u32, reason: String },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Convenience type alias for Results using CompositorError
pub type Result<T> = std::result::Result<T, CompositorError>;

impl CompositorError {
    /// Create a generic error with a custom message
    pub fn generic<S: Into<String>>(message: S) -> Self {
        Self::Generic(message.into())
    }

    /// True when the source animation file does not exist
    pub fn is_source_not_found(&self) -> bool {
        matches!(self, Self::Animation(AnimationError::SourceNotFound { .. }))
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Animation(AnimationError::SourceNotFound { .. }) => {
                "The source GIF file was not found.".to_string()
            }
            Self::Animation(AnimationError::DecodeFailed { .. }) => {
                "The source GIF file could not be read.".to_string()
            }
            Self::Animation(AnimationError::EncodeFailed { .. }) => {
                "The captioned GIF could not be created.".to_string()
            }
            Self::Font(_) => {
                "The caption font is unavailable. Please check the font configuration.".to_string()
            }
            Self::Config(ConfigError::FileNotFound { path }) => {
                format!("Configuration file '{}' not found.", path)
            }
            _ => self.to_string(),
        }
    }
}
