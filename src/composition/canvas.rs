use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::config::LayoutConfig;
use crate::error::{AnimationError, Result};
use crate::text::FittedFont;

/// Geometry shared by every canvas of one request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasLayout {
    pub scaled_width: u32,
    pub scaled_height: u32,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub caption_band_height: u32,
    /// Box the caption ink must fit in: the band minus padding on every side
    pub fit_width: u32,
    pub fit_height: u32,
}

impl CanvasLayout {
    /// Derive the layout from the source frame size
    pub fn for_source(
        source_width: u32,
        source_height: u32,
        config: &LayoutConfig,
    ) -> Result<Self> {
        let overflow = || AnimationError::InvalidDimensions {
            details: format!(
                "{}x{} scaled by {} with a {}px band overflows",
                source_width, source_height, config.scale_factor, config.caption_band_height
            ),
        };

        let scaled_width = source_width.checked_mul(config.scale_factor).ok_or_else(overflow)?;
        let scaled_height = source_height.checked_mul(config.scale_factor).ok_or_else(overflow)?;
        let canvas_height = scaled_height
            .checked_add(config.caption_band_height)
            .ok_or_else(overflow)?;

        if scaled_width == 0 || scaled_height == 0 {
            return Err(AnimationError::InvalidDimensions {
                details: format!("source frame is {}x{}", source_width, source_height),
            }
            .into());
        }

        let inset = config.padding.saturating_mul(2);
        Ok(Self {
            scaled_width,
            scaled_height,
            canvas_width: scaled_width,
            canvas_height,
            caption_band_height: config.caption_band_height,
            fit_width: scaled_width.saturating_sub(inset),
            fit_height: config.caption_band_height.saturating_sub(inset),
        })
    }
}

/// One output frame under construction
pub struct CompositeCanvas {
    image: RgbaImage,
    layout: CanvasLayout,
}

impl CompositeCanvas {
    /// A blank canvas filled with `background`
    pub fn new(layout: CanvasLayout, background: Rgba<u8>) -> Self {
        Self {
            image: RgbaImage::from_pixel(layout.canvas_width, layout.canvas_height, background),
            layout,
        }
    }

    /// Lanczos-resample `frame` to the scaled size and composite it below the band
    pub fn paste_frame(&mut self, frame: &RgbaImage) {
        let scaled = imageops::resize(
            frame,
            self.layout.scaled_width,
            self.layout.scaled_height,
            FilterType::Lanczos3,
        );
        imageops::overlay(&mut self.image, &scaled, 0, self.layout.caption_band_height as i64);
    }

    /// Draw `text` so its ink box is centered in the caption band
    pub fn draw_caption(
        &mut self,
        font: &FittedFont<'_>,
        text: &str,
        color: Rgba<u8>,
    ) -> Result<()> {
        let bounds = font.bounds(text)?;
        if bounds.is_empty() {
            return Ok(());
        }

        let band_width = self.layout.canvas_width as f32;
        let band_height = self.layout.caption_band_height as f32;
        let x = (band_width - bounds.width as f32) / 2.0 - bounds.left as f32;
        let y = (band_height - bounds.height as f32) / 2.0 - bounds.top as f32;

        font.draw(&mut self.image, text, x.round() as i32, y.round() as i32, color)
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}
