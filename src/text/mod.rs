//! # Text Module
//!
//! Caption font loading, tight ink measurement and the size fitter.

pub mod fitter;

mod font;

pub use fitter::{FontFitter, TextBounds, TextMeasure};
pub use font::{CaptionFont, FittedFont};
