//! # Animation Module
//!
//! Reading the source GIF into frames and writing captioned frames back out.

pub mod types;

mod encoder;
mod loader;

pub use encoder::GifSequenceEncoder;
pub use loader::AnimationLoader;
pub use types::{EncodedAnimation, OutputAnimation, SourceAnimation, DEFAULT_FRAME_DURATION_MS};
