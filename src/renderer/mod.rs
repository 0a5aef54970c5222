//! Rendering module
//!
//! `shapes` turns world state into a display list; `canvas` paints it.

pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use shapes::{DrawCmd, FrameView, TextAlign, build_frame};

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasPainter;
