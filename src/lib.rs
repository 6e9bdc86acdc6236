//! # Caption-Compositor
//!
//! Caption a looping GIF: the caption is auto-sized into a band above a 3x
//! upscaled copy of the source animation, and the result is returned as a new
//! in-memory GIF.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use caption_compositor::{config::Config, FrameComposer};
//!
//! # fn main() -> caption_compositor::Result<()> {
//! let mut config = Config::default();
//! config.source.path = "grr.gif".into();
//!
//! let composer = FrameComposer::new(config);
//! let gif = composer.compose("when the build is green on the first try")?;
//! std::fs::write("captioned.gif", &gif.bytes)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`text`] - Font loading, ink measurement and the binary-search size fitter
//! - [`animation`] - GIF decoding into frames and encoding back out
//! - [`composition`] - Canvas geometry and the per-request frame composer
//! - [`config`] - Configuration management

pub mod animation;
pub mod composition;
pub mod config;
pub mod error;
pub mod text;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types for convenience
pub use crate::{
    animation::EncodedAnimation,
    composition::FrameComposer,
    config::Config,
    error::{CompositorError, Result},
    text::{CaptionFont, FontFitter},
};
