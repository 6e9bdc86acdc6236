use image::Rgba;
use tracing::{debug, info};

use crate::{
    animation::{
        AnimationLoader, EncodedAnimation, GifSequenceEncoder, OutputAnimation, SourceAnimation,
    },
    composition::canvas::{CanvasLayout, CompositeCanvas},
    config::Config,
    error::{CompositorError, Result},
    text::CaptionFont,
};

/// Turns a caption into a captioned copy of the source animation
///
/// The composer follows a fixed pipeline per request:
/// 1. Decode - read the source GIF and its frame duration
/// 2. Layout - derive scaled frame and canvas sizes from the first frame
/// 3. Fit - choose one font size for the whole request
/// 4. Composite - paste every scaled frame below the caption band and draw the caption
/// 5. Encode - write all canvases as one infinitely looping GIF
///
/// Holds only configuration, so it is cheap to clone and safe to share
/// across concurrent requests.
#[derive(Debug, Clone)]
pub struct FrameComposer {
    config: Config,
}

impl FrameComposer {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Load the configured source and font, then composite and encode `caption`
    pub fn compose(&self, caption: &str) -> Result<EncodedAnimation> {
        info!("🎬 Composing caption ({} chars)", caption.chars().count());

        let loader = AnimationLoader::new(self.config.output.default_frame_duration_ms);
        let source = loader.load(&self.config.source.path)?;
        let font = CaptionFont::load(&self.config.font.path)?;

        let output = self.compose_animation(&source, &font, caption)?;
        let encoded = GifSequenceEncoder::new(self.config.output.quantizer_speed).encode(&output)?;

        info!(
            "✅ Composed {} frames at {}x{}, {}ms/frame, {} bytes",
            encoded.frame_count,
            encoded.width,
            encoded.height,
            encoded.frame_duration_ms,
            encoded.len()
        );
        Ok(encoded)
    }

    /// Run `compose` on the blocking thread pool
    pub async fn compose_async(&self, caption: impl Into<String>) -> Result<EncodedAnimation> {
        let composer = self.clone();
        let caption = caption.into();

        tokio::task::spawn_blocking(move || composer.compose(&caption))
            .await
            .map_err(|e| CompositorError::generic(format!("composition task failed: {}", e)))?
    }

    /// Composite `caption` over every frame of an already decoded source
    ///
    /// The font size is fitted once from the canvas geometry and reused for
    /// every frame so the caption never jumps between frames.
    pub fn compose_animation(
        &self,
        source: &SourceAnimation,
        font: &CaptionFont,
        caption: &str,
    ) -> Result<OutputAnimation> {
        let (source_width, source_height) = source.dimensions();
        let layout = CanvasLayout::for_source(source_width, source_height, &self.config.layout)?;
        debug!("Canvas layout: {:?}", layout);

        let fitted = font.fit(
            caption,
            layout.fit_width,
            layout.fit_height,
            self.config.font.max_size,
        )?;
        info!("   Caption size: {}px ({})", fitted.size(), font.source());

        let background = Rgba(self.config.caption.background);
        let text_color = Rgba(self.config.caption.text_color);

        let mut frames = Vec::with_capacity(source.frame_count());
        for (index, frame) in source.frames().iter().enumerate() {
            let mut canvas = CompositeCanvas::new(layout, background);
            canvas.paste_frame(frame);
            canvas.draw_caption(&fitted, caption, text_color)?;
            frames.push(canvas.into_image());
            debug!("Composited frame {}/{}", index + 1, source.frame_count());
        }

        Ok(OutputAnimation {
            frames,
            frame_duration_ms: source.frame_duration_ms(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{loops_forever, solid_gif, write_fixture, BUNDLED_FONT};
    use std::path::Path;
    use tempfile::tempdir;

    fn composer_for(source: &Path) -> FrameComposer {
        let mut config = Config::default();
        config.source.path = source.to_path_buf();
        config.font.path = BUNDLED_FONT.into();
        FrameComposer::new(config)
    }

    fn three_frame_source(dir: &Path) -> std::path::PathBuf {
        let bytes = solid_gif(64, 64, &[[200, 40, 40], [40, 200, 40], [40, 40, 200]], 10);
        write_fixture(dir, "grr.gif", &bytes)
    }

    #[test]
    fn test_hello_scenario() {
        let dir = tempdir().unwrap();
        let composer = composer_for(&three_frame_source(dir.path()));

        let encoded = composer.compose("HELLO").unwrap();
        assert_eq!(encoded.frame_count, 3);
        assert_eq!((encoded.width, encoded.height), (192, 392));
        assert_eq!(encoded.frame_duration_ms, 100);
        assert!(loops_forever(&encoded.bytes));

        let decoded = AnimationLoader::default().decode(&encoded.bytes).unwrap();
        assert_eq!(decoded.frame_count(), 3);
        assert_eq!(decoded.dimensions(), (192, 392));
        assert_eq!(decoded.frame_duration_ms(), 100);

        for frame in decoded.frames() {
            // band corners stay white, the caption puts dark ink in the band
            assert!(frame.get_pixel(2, 2)[0] > 240);
            assert!(frame.get_pixel(189, 197)[0] > 240);
            let dark_in_band = (0..200)
                .flat_map(|y| (0..192).map(move |x| (x, y)))
                .filter(|&(x, y)| frame.get_pixel(x, y)[0] < 80)
                .count();
            assert!(dark_in_band > 100, "only {} dark pixels", dark_in_band);
        }

        // frames keep their own colors and order below the band
        let below: Vec<_> = decoded.frames().iter().map(|f| f.get_pixel(96, 300).0).collect();
        assert!(below[0][0] > 150 && below[0][1] < 100);
        assert!(below[1][1] > 150 && below[1][0] < 100);
        assert!(below[2][2] > 150 && below[2][0] < 100);
    }

    #[test]
    fn test_compose_is_deterministic() {
        let dir = tempdir().unwrap();
        let composer = composer_for(&three_frame_source(dir.path()));

        let first = composer.compose("grr").unwrap();
        let second = composer.compose("grr").unwrap();
        assert_eq!(first.bytes, second.bytes);
    }

    #[test]
    fn test_empty_caption_composes() {
        let dir = tempdir().unwrap();
        let composer = composer_for(&three_frame_source(dir.path()));

        let source = AnimationLoader::default().load(&composer.config().source.path).unwrap();
        let font = CaptionFont::load(BUNDLED_FONT).unwrap();
        let output = composer.compose_animation(&source, &font, "").unwrap();

        assert_eq!(output.frame_count(), 3);
        for frame in &output.frames {
            assert!((0..200).all(|y| (0..192).all(|x| frame.get_pixel(x, y)[0] == 255)));
        }
        assert!(composer.compose("").is_ok());
    }

    #[test]
    fn test_all_frames_share_geometry() {
        let dir = tempdir().unwrap();
        let composer = composer_for(&three_frame_source(dir.path()));
        let source = AnimationLoader::default().load(&composer.config().source.path).unwrap();
        let font = CaptionFont::load(BUNDLED_FONT).unwrap();

        let output = composer.compose_animation(&source, &font, "same size everywhere").unwrap();
        assert_eq!(output.frame_duration_ms, 100);

        // the band of every frame is identical: same font size, same placement
        let band = |index: usize| -> Vec<u8> {
            let frame = &output.frames[index];
            (0..200).flat_map(|y| (0..192).map(move |x| frame.get_pixel(x, y)[0])).collect()
        };
        assert_eq!(band(0), band(1));
        assert_eq!(band(1), band(2));
    }

    #[test]
    fn test_source_frame_duration_survives_pipeline() {
        let dir = tempdir().unwrap();
        let bytes = solid_gif(64, 64, &[[200, 40, 40], [40, 200, 40]], 7);
        let composer = composer_for(&write_fixture(dir.path(), "fast.gif", &bytes));

        let encoded = composer.compose("HELLO").unwrap();
        assert_eq!(encoded.frame_count, 2);
        assert_eq!(encoded.frame_duration_ms, 70);

        let decoded = AnimationLoader::default().decode(&encoded.bytes).unwrap();
        assert_eq!(decoded.frame_count(), 2);
        assert_eq!(decoded.frame_duration_ms(), 70);
    }

    #[test]
    fn test_missing_source_fails_without_output() {
        let dir = tempdir().unwrap();
        let composer = composer_for(&dir.path().join("nope.gif"));

        let error = composer.compose("HELLO").unwrap_err();
        assert!(error.is_source_not_found());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_missing_font_is_a_font_error() {
        let dir = tempdir().unwrap();
        let mut composer = composer_for(&three_frame_source(dir.path()));
        composer.config.font.path = dir.path().join("arial.ttf");

        assert!(matches!(composer.compose("HELLO"), Err(CompositorError::Font(_))));
    }

    #[test]
    fn test_source_loop_setting_is_overridden() {
        let dir = tempdir().unwrap();
        let source = three_frame_source(dir.path());
        assert!(!loops_forever(&std::fs::read(&source).unwrap()));

        let encoded = composer_for(&source).compose("loop").unwrap();
        assert!(loops_forever(&encoded.bytes));
    }

    #[tokio::test]
    async fn test_compose_async_matches_sync() {
        let dir = tempdir().unwrap();
        let composer = composer_for(&three_frame_source(dir.path()));

        let from_async = composer.compose_async("HELLO").await.unwrap();
        let from_sync = composer.compose("HELLO").unwrap();
        assert_eq!(from_async.bytes, from_sync.bytes);
    }
}
