#![forbid(unsafe_code)]

//! Rasterization for skema diagrams.
//!
//! Takes a positioned [`skema_layout::DiagramLayout`] and produces a PNG:
//! connectors are drawn first so node boxes sit visually above them, then
//! each node gets a filled rounded rectangle, a border, and its centered
//! wrapped label. Export is synchronous; there is no streaming or partial
//! rendering.
//!
//! The drawing surface is an explicit [`Surface`] owned by the caller,
//! never ambient state. Text needs a loaded font ([`FontContext`]); a
//! missing font is fatal for rendering only — layout stays available
//! through the deterministic measurer in `skema-core`.

pub mod error;
pub mod renderer;
pub mod surface;
pub mod text;
pub mod theme;

pub use error::RenderError;
pub use renderer::{Renderer, render_png};
pub use surface::Surface;
pub use text::FontContext;
pub use theme::Theme;
