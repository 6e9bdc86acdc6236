use std::io::Cursor;
use std::path::Path;

use image::codecs::gif::GifDecoder;
use image::AnimationDecoder;
use tracing::{debug, info, warn};

use crate::animation::types::{SourceAnimation, DEFAULT_FRAME_DURATION_MS};
use crate::error::{AnimationError, CompositorError, Result};

/// Reads animated GIFs into [`SourceAnimation`]s
///
/// Nothing is cached: every call re-reads and re-decodes the file.
#[derive(Debug, Clone)]
pub struct AnimationLoader {
    default_frame_duration_ms: u32,
}

impl AnimationLoader {
    pub fn new(default_frame_duration_ms: u32) -> Self {
        Self { default_frame_duration_ms }
    }

    /// Read and decode the GIF at `path`
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<SourceAnimation> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => AnimationError::SourceNotFound {
                path: path.display().to_string(),
            }
            .into(),
            _ => CompositorError::from(e),
        })?;

        let animation = self.decode(&bytes)?;
        info!(
            "Loaded {:?}: {} frames, {}x{}, {}ms/frame",
            path,
            animation.frame_count(),
            animation.dimensions().0,
            animation.dimensions().1,
            animation.frame_duration_ms()
        );
        Ok(animation)
    }

    /// Decode GIF bytes into composited full-size frames
    pub fn decode(&self, bytes: &[u8]) -> Result<SourceAnimation> {
        let decoder = GifDecoder::new(Cursor::new(bytes)).map_err(|e| AnimationError::DecodeFailed {
            reason: e.to_string(),
        })?;

        let frames = decoder
            .into_frames()
            .collect_frames()
            .map_err(|e| AnimationError::DecodeFailed {
                reason: e.to_string(),
            })?;

        let declared_ms = frames.first().map(|frame| {
            let (numer, denom) = frame.delay().numer_denom_ms();
            if denom == 0 { 0 } else { (numer + denom / 2) / denom }
        });

        let frame_duration_ms = match declared_ms {
            Some(ms) if ms > 0 => ms,
            _ => {
                warn!(
                    "Source declares no frame duration, using {}ms",
                    self.default_frame_duration_ms
                );
                self.default_frame_duration_ms
            }
        };

        let buffers: Vec<_> = frames.into_iter().map(|frame| frame.into_buffer()).collect();
        debug!("Decoded {} frames", buffers.len());

        SourceAnimation::new(buffers, frame_duration_ms).ok_or_else(|| {
            AnimationError::DecodeFailed {
                reason: "animation contains no frames".to_string(),
            }
            .into()
        })
    }
}

impl Default for AnimationLoader {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_DURATION_MS)
    }
}
