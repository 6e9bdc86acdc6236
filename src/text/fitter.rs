use tracing::debug;

use crate::error::Result;

/// Tight pixel rectangle enclosing rendered glyph ink
///
/// `left` and `top` are the offsets of the ink from the pen origin, so drawing
/// at `(x - left, y - top)` puts the first inked pixel at `(x, y)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextBounds {
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
}

impl TextBounds {
    /// Check whether the ink fits inside a `max_width` x `max_height` box
    pub fn fits_within(&self, max_width: u32, max_height: u32) -> bool {
        self.width <= max_width && self.height <= max_height
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Capability to measure the ink bounds of a string at a pixel size
pub trait TextMeasure {
    fn measure(&self, text: &str, size: u32) -> Result<TextBounds>;
}

/// Binary search for the largest font size whose ink fits a box
#[derive(Debug, Clone, Copy)]
pub struct FontFitter {
    upper_bound: u32,
}

impl FontFitter {
    /// Smallest size ever returned, also the fallback when nothing fits
    pub const MIN_SIZE: u32 = 1;

    pub fn new(upper_bound: u32) -> Self {
        Self { upper_bound }
    }

    /// Find the largest size in `[1, upper_bound]` whose measured bounds fit
    ///
    /// Returns `MIN_SIZE` when no candidate fits; the text then overflows the
    /// box but the call still succeeds.
    pub fn fit<M: TextMeasure + ?Sized>(
        &self,
        measure: &M,
        text: &str,
        max_width: u32,
        max_height: u32,
    ) -> Result<u32> {
        let mut low = Self::MIN_SIZE;
        let mut high = self.upper_bound;
        let mut best = Self::MIN_SIZE;

        while low <= high {
            let mid = low + (high - low) / 2;
            let bounds = measure.measure(text, mid)?;

            if bounds.fits_within(max_width, max_height) {
                best = mid;
                match mid.checked_add(1) {
                    Some(next) => low = next,
                    None => break,
                }
            } else {
                // mid >= 1 here, so this cannot underflow
                high = mid - 1;
            }
        }

        debug!(
            "Fitted {} chars into {}x{} at {}px (bound {})",
            text.chars().count(),
            max_width,
            max_height,
            best,
            self.upper_bound
        );

        Ok(best)
    }
}
