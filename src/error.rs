//! Error types for the particle field.

use thiserror::Error;

/// Errors raised by the field's front-ends.
///
/// Nothing inside the animation loop itself fails; these cover acquiring a
/// surface, parsing the command line and writing snapshots.
#[derive(Debug, Error)]
pub enum FieldError {
    /// There is no window or raster to draw into. The field keeps animating
    /// but draws nothing.
    #[error("no drawing surface is available")]
    SurfaceUnavailable,
    /// A window size that isn't `WIDTH,HEIGHT` (or `WIDTHxHEIGHT`).
    #[error("invalid window size '{0}', expected WIDTH,HEIGHT")]
    InvalidWindowSize(String),
    #[error("failed to write snapshot: {0}")]
    Snapshot(#[from] image::ImageError),
}

pub type Result<T, E = FieldError> = std::result::Result<T, E>;
