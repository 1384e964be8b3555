//! Error types for the fuelsense core.

use thiserror::Error;

/// Errors produced by fuelsense components and their hosts.
#[derive(Debug, Error)]
pub enum FxError {
    /// Width or height was zero when describing a drawing surface.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A configuration object held a value the component cannot use.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Form input could not be interpreted (e.g. a non-numeric amount on submit).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A form field name was not recognized.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// An I/O error (file write, snapshot encoding).
    #[error("I/O error: {0}")]
    Io(String),

    /// The host environment is missing something a component needs
    /// (no document, no canvas, no 2D context).
    #[error("host unavailable: {0}")]
    HostUnavailable(String),
}
