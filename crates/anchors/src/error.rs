//! Error types for anchor operations.

use anchors_math::MathError;
use thiserror::Error;

/// Errors that can occur while deriving, combining or exchanging anchors.
#[derive(Error, Debug)]
pub enum AnchorError {
    /// Malformed numeric input (wrong arity, non-finite values).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Input with no well-defined result (zero vector, non-orthonormal frame).
    #[error("degenerate input: {0}")]
    DegenerateInput(String),

    /// The sub-element kind cannot carry an anchor.
    #[error("cannot derive an anchor frame from {0}")]
    NotSupported(String),

    /// Landmark points do not determine a rotation.
    #[error("degenerate transform: {0}")]
    DegenerateTransform(String),

    /// No anchor with this name exists on the object.
    #[error("unknown anchor '{0}'")]
    UnknownAnchor(String),

    /// The shape has no sub-element with this name.
    #[error("shape '{shape}' has no sub-element '{element}'")]
    UnknownElement {
        /// Shape that was searched.
        shape: String,
        /// Requested sub-element name.
        element: String,
    },

    /// An anchor with this name already exists on the object.
    #[error("anchor '{0}' already exists")]
    DuplicateAnchor(String),

    /// The anchor is attached to a different solid.
    #[error("anchor '{anchor}' belongs to '{parent}', not '{expected}'")]
    ParentMismatch {
        /// Anchor name.
        anchor: String,
        /// Solid the anchor is attached to.
        parent: String,
        /// Solid it was expected to be attached to.
        expected: String,
    },

    /// Invalid anchor settings.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// Anchor record could not be read or written.
    #[error("anchor record: {0}")]
    Json(#[from] serde_json::Error),

    /// Settings file could not be parsed.
    #[error("settings file: {0}")]
    Toml(#[from] toml::de::Error),
}

impl From<MathError> for AnchorError {
    fn from(e: MathError) -> Self {
        match e {
            MathError::InvalidInput(msg) => AnchorError::InvalidInput(msg),
            MathError::DegenerateInput(msg) => AnchorError::DegenerateInput(msg),
        }
    }
}

/// Result type for anchor operations.
pub type Result<T> = std::result::Result<T, AnchorError>;
