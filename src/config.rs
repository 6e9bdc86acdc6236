use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Main configuration for the Caption-Compositor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Source animation settings
    #[serde(default)]
    pub source: SourceConfig,

    /// Caption font settings
    #[serde(default)]
    pub font: FontConfig,

    /// Canvas geometry
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Caption colors
    #[serde(default)]
    pub caption: CaptionConfig,

    /// GIF output settings
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound { path: path.display().to_string() })?;

        let config: Config = toml::from_str(&content)
            .map_err(|_| ConfigError::ParseFailed { path: path.display().to_string() })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidValue {
                key: "config".to_string(),
                value: e.to_string()
            })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.font.validate()?;
        self.layout.validate()?;
        self.output.validate()?;
        Ok(())
    }
}

/// Where the source animation lives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Path to the animated GIF that gets captioned
    pub path: PathBuf,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("grr.gif"),
        }
    }
}

/// Caption font settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontConfig {
    /// Path to a TrueType/OpenType font file
    pub path: PathBuf,

    /// Largest pixel size the fitter may choose
    pub max_size: u32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("assets/fonts/DejaVuSans.ttf"),
            max_size: 200,
        }
    }
}

impl FontConfig {
    /// Largest accepted `max_size`; far beyond any caption band
    pub const MAX_SIZE_LIMIT: u32 = 2000;

    fn validate(&self) -> Result<()> {
        if self.max_size == 0 || self.max_size > Self::MAX_SIZE_LIMIT {
            return Err(ConfigError::InvalidValue {
                key: "font.max_size".to_string(),
                value: self.max_size.to_string()
            }.into());
        }

        Ok(())
    }
}

/// Canvas geometry applied to every frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Multiplier applied to both source dimensions
    pub scale_factor: u32,

    /// Height of the caption band above the scaled frame (pixels)
    pub caption_band_height: u32,

    /// Inset between the band edges and the caption box (pixels)
    pub padding: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            scale_factor: 3,
            caption_band_height: 200,
            padding: 30,
        }
    }
}

impl LayoutConfig {
    fn validate(&self) -> Result<()> {
        if self.scale_factor == 0 {
            return Err(ConfigError::InvalidValue {
                key: "layout.scale_factor".to_string(),
                value: self.scale_factor.to_string()
            }.into());
        }

        if self.caption_band_height == 0 {
            return Err(ConfigError::InvalidValue {
                key: "layout.caption_band_height".to_string(),
                value: self.caption_band_height.to_string()
            }.into());
        }

        if self.padding.saturating_mul(2) >= self.caption_band_height {
            return Err(ConfigError::InvalidValue {
                key: "layout.padding".to_string(),
                value: format!("{} (band height {})", self.padding, self.caption_band_height)
            }.into());
        }

        Ok(())
    }
}

/// Caption colors (RGBA)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionConfig {
    pub text_color: [u8; 4],
    pub background: [u8; 4],
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self {
            text_color: [0, 0, 0, 255],
            background: [255, 255, 255, 255],
        }
    }
}

/// GIF output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Frame duration used when the source declares none (milliseconds)
    pub default_frame_duration_ms: u32,

    /// NeuQuant speed for palette quantization (1 = best, 30 = fastest)
    pub quantizer_speed: i32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_frame_duration_ms: 100,
            quantizer_speed: 10,
        }
    }
}

impl OutputConfig {
    fn validate(&self) -> Result<()> {
        if self.default_frame_duration_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "output.default_frame_duration_ms".to_string(),
                value: self.default_frame_duration_ms.to_string()
            }.into());
        }

        if !(1..=30).contains(&self.quantizer_speed) {
            return Err(ConfigError::InvalidValue {
                key: "output.quantizer_speed".to_string(),
                value: self.quantizer_speed.to_string()
            }.into());
        }

        Ok(())
    }
}
