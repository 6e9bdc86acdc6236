use image::RgbaImage;

/// Frame duration used when a source declares none
pub const DEFAULT_FRAME_DURATION_MS: u32 = 100;

/// A decoded source animation: full-canvas RGBA frames in display order
///
/// The whole animation shares one frame duration, taken from the first
/// frame's declared delay.
#[derive(Debug, Clone)]
pub struct SourceAnimation {
    frames: Vec<RgbaImage>,
    frame_duration_ms: u32,
}

impl SourceAnimation {
    /// Build an animation from frames; returns `None` when `frames` is empty
    pub fn new(frames: Vec<RgbaImage>, frame_duration_ms: u32) -> Option<Self> {
        if frames.is_empty() {
            return None;
        }
        Some(Self { frames, frame_duration_ms })
    }

    pub fn frames(&self) -> &[RgbaImage] {
        &self.frames
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frame_duration_ms(&self) -> u32 {
        self.frame_duration_ms
    }

    /// Dimensions of the first frame, which define the logical screen
    pub fn dimensions(&self) -> (u32, u32) {
        self.frames[0].dimensions()
    }
}

/// Finalized caption canvases ready for encoding; always loops forever
#[derive(Debug, Clone)]
pub struct OutputAnimation {
    pub frames: Vec<RgbaImage>,
    pub frame_duration_ms: u32,
}

impl OutputAnimation {
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.frames.first().map(|frame| frame.dimensions())
    }
}

/// A self-contained GIF file held in memory
#[derive(Debug, Clone)]
pub struct EncodedAnimation {
    pub bytes: Vec<u8>,
    pub frame_count: usize,
    pub width: u32,
    pub height: u32,
    /// Duration actually written, after rounding to GIF centiseconds
    pub frame_duration_ms: u32,
}

impl EncodedAnimation {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
