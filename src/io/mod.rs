//! Input/output: configuration, mask images, rendering, and the CLI

/// Command-line parsing and batch maze generation
pub mod cli;
/// Constants and construction-time parameters
pub mod configuration;
/// Error types and path context
pub mod error;
/// Frame rendering and PNG export
pub mod image;
/// Mask derivation from images
pub mod mask_image;
/// Progress bars for maze runs
pub mod progress;
/// Animated GIF capture of the generation process
pub mod visualization;
