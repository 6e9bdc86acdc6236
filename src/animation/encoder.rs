use gif::{Encoder, Frame, Repeat};
use tracing::debug;

use crate::animation::types::{EncodedAnimation, OutputAnimation};
use crate::error::{AnimationError, Result};

/// Serializes an [`OutputAnimation`] into an infinitely looping GIF
#[derive(Debug, Clone)]
pub struct GifSequenceEncoder {
    quantizer_speed: i32,
}

impl GifSequenceEncoder {
    /// `quantizer_speed` is NeuQuant's speed, 1 (best) to 30 (fastest)
    pub fn new(quantizer_speed: i32) -> Self {
        Self { quantizer_speed: quantizer_speed.clamp(1, 30) }
    }

    pub fn encode(&self, animation: &OutputAnimation) -> Result<EncodedAnimation> {
        let (width, height) = animation.dimensions().ok_or_else(|| AnimationError::EncodeFailed {
            reason: "no frames to encode".to_string(),
        })?;

        let (gif_width, gif_height) = match (u16::try_from(width), u16::try_from(height)) {
            (Ok(w), Ok(h)) => (w, h),
            _ => {
                return Err(AnimationError::EncodeFailed {
                    reason: format!("{}x{} exceeds the GIF size limit of 65535", width, height),
                }
                .into())
            }
        };

        let delay = centiseconds(animation.frame_duration_ms);
        let mut bytes = Vec::new();
        {
            let mut encoder = Encoder::new(&mut bytes, gif_width, gif_height, &[])
                .map_err(encode_failed)?;
            encoder.set_repeat(Repeat::Infinite).map_err(encode_failed)?;

            for (index, canvas) in animation.frames.iter().enumerate() {
                if canvas.dimensions() != (width, height) {
                    return Err(AnimationError::EncodeFailed {
                        reason: format!(
                            "frame {} is {}x{}, expected {}x{}",
                            index,
                            canvas.width(),
                            canvas.height(),
                            width,
                            height
                        ),
                    }
                    .into());
                }

                let mut pixels = canvas.as_raw().clone();
                let mut frame = Frame::from_rgba_speed(
                    gif_width,
                    gif_height,
                    &mut pixels,
                    self.quantizer_speed,
                );
                frame.delay = delay;
                encoder.write_frame(&frame).map_err(encode_failed)?;
                debug!("Encoded frame {}", index);
            }
            // trailer is written when the encoder drops
        }

        Ok(EncodedAnimation {
            bytes,
            frame_count: animation.frame_count(),
            width,
            height,
            frame_duration_ms: u32::from(delay) * 10,
        })
    }
}

fn encode_failed(e: gif::EncodingError) -> crate::error::CompositorError {
    AnimationError::EncodeFailed { reason: e.to_string() }.into()
}

/// GIF delays are stored in hundredths of a second
fn centiseconds(ms: u32) -> u16 {
    ((ms + 5) / 10).clamp(1, u16::MAX as u32) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::AnimationLoader;
    use crate::test_support::loops_forever;
    use image::{Rgba, RgbaImage};

    fn output(frames: usize, duration_ms: u32) -> OutputAnimation {
        OutputAnimation {
            frames: (0..frames)
                .map(|i| RgbaImage::from_pixel(12, 9, Rgba([(i * 60) as u8, 0, 0, 255])))
                .collect(),
            frame_duration_ms: duration_ms,
        }
    }

    #[test]
    fn test_centisecond_rounding() {
        assert_eq!(centiseconds(100), 10);
        assert_eq!(centiseconds(70), 7);
        assert_eq!(centiseconds(94), 9);
        assert_eq!(centiseconds(95), 10);
        assert_eq!(centiseconds(1), 1);
    }

    #[test]
    fn test_encoded_gif_reads_back() {
        let encoded = GifSequenceEncoder::new(10).encode(&output(4, 100)).unwrap();

        assert_eq!(encoded.frame_count, 4);
        assert_eq!((encoded.width, encoded.height), (12, 9));
        assert_eq!(encoded.frame_duration_ms, 100);
        assert!(loops_forever(&encoded.bytes));

        let decoded = AnimationLoader::default().decode(&encoded.bytes).unwrap();
        assert_eq!(decoded.frame_count(), 4);
        assert_eq!(decoded.dimensions(), (12, 9));
        assert_eq!(decoded.frame_duration_ms(), 100);
    }

    #[test]
    fn test_empty_animation_fails() {
        let result = GifSequenceEncoder::new(10).encode(&output(0, 100));
        assert!(matches!(
            result,
            Err(crate::CompositorError::Animation(AnimationError::EncodeFailed { .. }))
        ));
    }

    #[test]
    fn test_mismatched_frame_sizes_fail() {
        let mut animation = output(2, 100);
        animation.frames.push(RgbaImage::new(3, 3));
        assert!(GifSequenceEncoder::new(10).encode(&animation).is_err());
    }

    #[test]
    fn test_oversized_canvas_fails() {
        let animation = OutputAnimation {
            frames: vec![RgbaImage::new(70_000, 1)],
            frame_duration_ms: 100,
        };
        assert!(GifSequenceEncoder::new(10).encode(&animation).is_err());
    }
}
