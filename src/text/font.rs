use std::path::Path;

use fontdue::layout::{CoordinateSystem, GlyphRasterConfig, Layout, LayoutSettings, TextStyle};
use fontdue::{Font, FontSettings};
use image::{Rgba, RgbaImage};
use tracing::debug;

use crate::error::{FontError, Result};
use crate::text::fitter::{FontFitter, TextBounds, TextMeasure};

/// A glyph laid out at an integer pixel position relative to the pen origin
struct PlacedGlyph {
    key: GlyphRasterConfig,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
}

/// Scalable font used to render captions
///
/// Glyph placement comes from `fontdue`'s layout engine, so measured bounds
/// include ascent, descent and left-side bearing rather than the nominal size.
#[derive(Clone)]
pub struct CaptionFont {
    font: Font,
    source: String,
}

impl std::fmt::Debug for CaptionFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptionFont")
            .field("source", &self.source)
            .finish()
    }
}

impl CaptionFont {
    /// Load a TrueType/OpenType font from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => FontError::NotFound {
                path: path.display().to_string(),
            }
            .into(),
            _ => crate::error::CompositorError::from(e),
        })?;

        Self::from_bytes(bytes, path.display().to_string())
    }

    /// Parse a font from raw bytes; `source` names it in logs and errors
    pub fn from_bytes<S: Into<String>>(bytes: Vec<u8>, source: S) -> Result<Self> {
        let source = source.into();
        let font = Font::from_bytes(bytes, FontSettings::default()).map_err(|reason| {
            FontError::ParseFailed {
                path: source.clone(),
                reason: reason.to_string(),
            }
        })?;

        debug!("Loaded caption font {} ({} glyphs)", source, font.glyph_count());
        Ok(Self { font, source })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Pick the largest size in `[1, upper_bound]` whose ink fits the box
    pub fn fit(
        &self,
        text: &str,
        max_width: u32,
        max_height: u32,
        upper_bound: u32,
    ) -> Result<FittedFont<'_>> {
        let size = FontFitter::new(upper_bound).fit(self, text, max_width, max_height)?;
        Ok(self.at_size(size))
    }

    pub fn at_size(&self, size: u32) -> FittedFont<'_> {
        FittedFont { font: self, size }
    }

    fn place_glyphs(&self, text: &str, size: u32) -> Result<Vec<PlacedGlyph>> {
        if size == 0 {
            return Err(FontError::MeasureFailed {
                size,
                reason: "pixel size must be positive".to_string(),
            }
            .into());
        }

        let mut layout = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings::default());
        layout.append(&[&self.font], &TextStyle::new(text, size as f32, 0));

        Ok(layout
            .glyphs()
            .iter()
            .filter(|glyph| glyph.width > 0 && glyph.height > 0)
            .map(|glyph| PlacedGlyph {
                key: glyph.key,
                x: glyph.x.round() as i32,
                y: glyph.y.round() as i32,
                width: glyph.width as u32,
                height: glyph.height as u32,
            })
            .collect())
    }
}

fn bounds_of(glyphs: &[PlacedGlyph]) -> TextBounds {
    let Some(first) = glyphs.first() else {
        return TextBounds::default();
    };

    let (mut left, mut top) = (first.x, first.y);
    let (mut right, mut bottom) = (first.x, first.y);
    for glyph in glyphs {
        left = left.min(glyph.x);
        top = top.min(glyph.y);
        right = right.max(glyph.x + glyph.width as i32);
        bottom = bottom.max(glyph.y + glyph.height as i32);
    }

    TextBounds {
        left,
        top,
        width: (right - left) as u32,
        height: (bottom - top) as u32,
    }
}

impl TextMeasure for CaptionFont {
    fn measure(&self, text: &str, size: u32) -> Result<TextBounds> {
        Ok(bounds_of(&self.place_glyphs(text, size)?))
    }
}

/// A caption font bound to the pixel size chosen for one request
#[derive(Debug, Clone, Copy)]
pub struct FittedFont<'a> {
    font: &'a CaptionFont,
    size: u32,
}

impl<'a> FittedFont<'a> {
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Tight ink bounds of `text` at this size
    pub fn bounds(&self, text: &str) -> Result<TextBounds> {
        self.font.measure(text, self.size)
    }

    /// Draw `text` with its pen origin at `(x, y)`, blending `color` by glyph coverage
    ///
    /// Pixels falling outside `image` are clipped.
    pub fn draw(
        &self,
        image: &mut RgbaImage,
        text: &str,
        x: i32,
        y: i32,
        color: Rgba<u8>,
    ) -> Result<()> {
        let (image_width, image_height) = (image.width() as i64, image.height() as i64);

        for glyph in self.font.place_glyphs(text, self.size)? {
            let (_, coverage) = self.font.font.rasterize_config(glyph.key);

            for row in 0..glyph.height {
                let py = y as i64 + glyph.y as i64 + row as i64;
                if py < 0 || py >= image_height {
                    continue;
                }
                for col in 0..glyph.width {
                    let px = x as i64 + glyph.x as i64 + col as i64;
                    if px < 0 || px >= image_width {
                        continue;
                    }
                    let alpha = coverage[(row * glyph.width + col) as usize];
                    if alpha == 0 {
                        continue;
                    }
                    blend(image.get_pixel_mut(px as u32, py as u32), color, alpha);
                }
            }
        }

        Ok(())
    }
}

fn blend(dst: &mut Rgba<u8>, color: Rgba<u8>, coverage: u8) {
    let a = coverage as f32 / 255.0 * color[3] as f32 / 255.0;
    for channel in 0..3 {
        let mixed = dst[channel] as f32 * (1.0 - a) + color[channel] as f32 * a;
        dst[channel] = mixed.round().clamp(0.0, 255.0) as u8;
    }
    let alpha = dst[3] as f32 + (255.0 - dst[3] as f32) * a;
    dst[3] = alpha.round().clamp(0.0, 255.0) as u8;
}
