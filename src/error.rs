//! Error types for the ambient parts of the player (terminal, config,
//! session file, audio output).
//!
//! Playback problems are not errors: an unplayable file only flips
//! `Track::is_valid` and the controller skips it.

/// Error type for fallible startup and persistence operations
#[derive(thiserror::Error, Debug)]
pub enum TonearmError {
    /// IO error from the filesystem or the terminal
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error while loading layered configuration
    #[error("Config error: {0}")]
    Config(#[from] ::config::ConfigError),

    /// Configuration loaded but failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Session file exists but is not valid TOML
    #[error("Session parse error: {0}")]
    SessionParse(#[from] toml::de::Error),

    /// Session state could not be serialized
    #[error("Session encode error: {0}")]
    SessionEncode(#[from] toml::ser::Error),

    /// No usable audio output device
    #[error("Audio output error: {0}")]
    AudioOutput(String),
}

/// Result type for tonearm operations
pub type Result<T> = std::result::Result<T, TonearmError>;
