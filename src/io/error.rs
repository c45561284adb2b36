//! Error types for maze construction, mask loading, and export

use std::fmt;
use std::path::{Path, PathBuf};

/// What was being done to an image file when it failed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageAction {
    /// Opening and decoding a mask image
    Load,
    /// Encoding and writing a maze, preview, or animation
    Save,
}

impl fmt::Display for ImageAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Load => "load",
            Self::Save => "save",
        })
    }
}

/// Every failure the crate reports
///
/// Generation itself cannot fail once a generator exists; all variants are
/// raised at construction or around file input and output.
#[derive(Debug)]
pub enum MazeError {
    /// The generator cannot be built as requested
    ///
    /// Covers a start outside the grid or outside the mask, a mask that
    /// selects zero cells or was built for other dimensions, and islands
    /// rejected by `require_connected`.
    Configuration {
        /// What is wrong with the configuration
        reason: String,
    },

    /// A numeric or path argument is out of range
    InvalidParameter {
        /// Name of the argument
        parameter: &'static str,
        /// Value as given
        value: String,
        /// Why it was refused
        reason: String,
    },

    /// No sampled cell centre in a mask image has a mask colour
    EmptyMask {
        /// Colours that were searched for
        colors: Vec<[u8; 3]>,
    },

    /// A render was requested with nothing to draw
    NothingToRender {
        /// Which output was empty
        what: &'static str,
    },

    /// Reading or writing an image file failed
    Image {
        /// Load or save
        action: ImageAction,
        /// File involved
        path: PathBuf,
        /// Decoder or encoder failure
        source: image::ImageError,
    },

    /// A directory or file operation failed
    Io {
        /// Path involved in the operation
        path: PathBuf,
        /// Operation that failed, e.g. "read directory"
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration { reason } => write!(f, "Invalid maze configuration: {reason}"),
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => write!(f, "Invalid {parameter} '{value}': {reason}"),
            Self::EmptyMask { colors } => {
                let hex: Vec<String> = colors
                    .iter()
                    .map(|[r, g, b]| format!("#{r:02x}{g:02x}{b:02x}"))
                    .collect();
                write!(
                    f,
                    "Mask is empty: no cell centre has colour {}",
                    hex.join(" or ")
                )
            }
            Self::NothingToRender { what } => write!(f, "Nothing to render: {what}"),
            Self::Image {
                action,
                path,
                source,
            } => write!(
                f,
                "Failed to {action} image '{}': {source}",
                path.display()
            ),
            Self::Io {
                path,
                operation,
                source,
            } => write!(f, "Failed to {operation} '{}': {source}", path.display()),
        }
    }
}

impl std::error::Error for MazeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Image { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for maze results
pub type Result<T> = std::result::Result<T, MazeError>;

/// Tags raw I/O failures with the operation and file they concern
pub trait IoContext<T> {
    /// Wrap the error as [`MazeError::Io`] for `operation` on `path`
    ///
    /// # Errors
    ///
    /// Returns the wrapped error when `self` is an error
    fn io_context(self, operation: &'static str, path: &Path) -> Result<T>;
}

impl<T> IoContext<T> for std::result::Result<T, std::io::Error> {
    fn io_context(self, operation: &'static str, path: &Path) -> Result<T> {
        self.map_err(|source| MazeError::Io {
            path: path.to_path_buf(),
            operation,
            source,
        })
    }
}

/// Wrap an image codec failure for `path`
pub fn image_error(action: ImageAction, path: &Path, source: image::ImageError) -> MazeError {
    MazeError::Image {
        action,
        path: path.to_path_buf(),
        source,
    }
}

/// Create a configuration error
pub fn configuration_error(reason: &impl ToString) -> MazeError {
    MazeError::Configuration {
        reason: reason.to_string(),
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MazeError {
    MazeError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
