//! # Composition
//!
//! The frame composer coordinates decoding, font fitting, per-frame compositing
//! and encoding to produce a captioned animation.

pub mod canvas;
pub mod engine;

// Re-exports for convenience
pub use canvas::{CanvasLayout, CompositeCanvas};
pub use engine::FrameComposer;
