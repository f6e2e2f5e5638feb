//! Error handling for svg3d
//!
//! Two families of errors exist and they propagate differently:
//! - Import errors (missing input, not SVG, no root element, unparsable markup)
//!   short-circuit the pipeline immediately.
//! - Validation errors (self-intersection, containment, degenerate outer) are
//!   collected across every contour and reported together.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Structural import error
///
/// Raised before any geometry is classified. The first one encountered ends
/// the request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// No file content was supplied
    #[error("No file provided")]
    MissingFile,

    /// Content does not contain an `<svg` tag anywhere
    #[error("File does not look like an SVG document")]
    NotSvgLike,

    /// The document has no `<svg>` root element
    #[error("Root <svg> element not found")]
    NoRootElement,

    /// No shape element produced a contour
    #[error("No closed contours found (path/polygon/rect/circle/ellipse)")]
    NoContoursFound,

    /// Markup could not be parsed
    #[error("Failed to process SVG: {message}")]
    Parse {
        /// The parser's description of the failure.
        message: String,
    },
}

/// Geometric validation error
///
/// Indices refer to the closed contours that survived filtering, 0-based and
/// in document order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// No contour with at least four points and matching ends
    #[error("No closed contours")]
    NoClosedContours,

    /// The largest contour has no area
    #[error("Could not determine the outer contour")]
    DegenerateOuterContour,

    /// Two non-adjacent edges of a contour cross
    #[error("Contour {index} is self-intersecting")]
    SelfIntersectingContour {
        /// Index of the offending contour.
        index: usize,
    },

    /// A vertex of a candidate hole lies outside the outer contour
    #[error("Contour {index} lies outside the outer contour")]
    ContourOutsideOuter {
        /// Index of the offending contour.
        index: usize,
    },

    /// A contour has more vertices than the configured cap
    #[error("Contour {index} has {count} vertices, exceeding the limit of {limit}")]
    TooManyVertices {
        /// Index of the offending contour.
        index: usize,
        /// Number of vertices in the contour.
        count: usize,
        /// The configured vertex cap.
        limit: usize,
    },
}

/// Accumulated validation errors
///
/// Never empty: construct it from the first error and grow it with
/// [`ValidationErrors::push`] or [`ValidationErrors::merge`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", join_messages(.errors))]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    /// Start an accumulator with a single error.
    pub fn new(first: ValidationError) -> Self {
        Self {
            errors: vec![first],
        }
    }

    /// Build an accumulator from a list, returning `None` when the list is empty.
    pub fn from_vec(errors: Vec<ValidationError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self { errors })
        }
    }

    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Append every error of `other`, keeping order.
    pub fn merge(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }

    pub fn into_vec(self) -> Vec<ValidationError> {
        self.errors
    }

    /// One human-readable message per error.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self::new(error)
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

/// Main error type for svg3d
///
/// A unified error type that can represent any failure of a request.
#[derive(Error, Debug)]
pub enum Error {
    /// Structural import error
    #[error(transparent)]
    Import(#[from] ImportError),

    /// One or more validation errors
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a structural import error
    pub fn is_import_error(&self) -> bool {
        matches!(self, Error::Import(_))
    }

    /// Check if this is a geometric validation error
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// Flatten into the list of messages reported to the caller.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Error::Validation(errors) => errors.messages(),
            other => vec![other.to_string()],
        }
    }
}

impl From<ValidationError> for Error {
    fn from(error: ValidationError) -> Self {
        Error::Validation(error.into())
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
