//! Fixtures shared by the unit tests.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use crate::text::CaptionFont;

pub const BUNDLED_FONT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/fonts/DejaVuSans.ttf");

pub fn bundled_font() -> CaptionFont {
    CaptionFont::load(BUNDLED_FONT).expect("bundled font should load")
}

/// Encode a GIF whose frames are each filled with one exact palette color
pub fn solid_gif(width: u16, height: u16, colors: &[[u8; 3]], delay_cs: u16) -> Vec<u8> {
    let mut bytes = Vec::new();
    {
        let mut encoder = gif::Encoder::new(&mut bytes, width, height, &[]).unwrap();
        encoder.set_repeat(gif::Repeat::Finite(1)).unwrap();

        for color in colors {
            let mut frame = gif::Frame::default();
            frame.width = width;
            frame.height = height;
            frame.delay = delay_cs;
            frame.palette = Some(vec![color[0], color[1], color[2], 0, 0, 0]);
            frame.buffer = Cow::Owned(vec![0; width as usize * height as usize]);
            encoder.write_frame(&frame).unwrap();
        }
    }
    bytes
}

pub fn write_fixture(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

/// True when the GIF carries a NETSCAPE2.0 block with loop count 0
pub fn loops_forever(bytes: &[u8]) -> bool {
    let marker = b"NETSCAPE2.0";
    bytes
        .windows(marker.len() + 4)
        .any(|window| window.starts_with(marker) && window[marker.len()..] == [3, 1, 0, 0])
}
