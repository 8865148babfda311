#![forbid(unsafe_code)]

//! Render-stage errors.
//!
//! All of these are fatal for the render step only; layout data computed
//! before rendering remains valid and usable.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    /// No usable font could be loaded; text cannot be measured or drawn.
    #[error("no usable font: {0}")]
    FontUnavailable(String),

    /// The pixel surface could not be allocated (zero or absurd size).
    #[error("cannot allocate a {width}x{height} surface")]
    SurfaceAlloc { width: u32, height: u32 },

    /// PNG encoding failed.
    #[error("png encoding failed: {0}")]
    Encode(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
