//! Harness configuration
//!
//! Everything a backend needs to build its surface and styles. The defaults
//! describe the standard run: a 1024x1024 surface cleared to
//! [`Color::BACKGROUND`] and stroked in [`Color::STROKE`].
//!
//! # Environment Variable
//!
//! `STROKEBENCH_PIXEL_OFFSET` selects the raster pixel-offset mode:
//!
//! ```bash
//! STROKEBENCH_PIXEL_OFFSET=half cargo bench
//! ```

use crate::{error::ConfigError, Color};
use std::str::FromStr;

/// Side length of the standard square surface
pub const SURFACE_SIZE: u32 = 1024;

/// Largest side length a backend is asked to allocate
pub const MAX_SURFACE_SIZE: u32 = 16384;

/// Environment variable read by [`HarnessConfig::from_env`]
pub const PIXEL_OFFSET_ENV: &str = "STROKEBENCH_PIXEL_OFFSET";

/// Where pixel centers sit while smoothing is high quality
///
/// Only backends with a context-level pixel-offset setting honor this.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PixelOffsetMode {
    /// Pixel centers at integer + 0.5, no shift
    #[default]
    Default,
    /// Shift drawing by half a pixel when smoothing is high quality
    Half,
}

impl PixelOffsetMode {
    pub fn name(self) -> &'static str {
        match self {
            PixelOffsetMode::Default => "default",
            PixelOffsetMode::Half => "half",
        }
    }

    /// Translation applied to drawing for the given smoothing state
    pub fn offset(self, smoothing: bool) -> f32 {
        match (self, smoothing) {
            (PixelOffsetMode::Half, true) => -0.5,
            _ => 0.0,
        }
    }
}

impl FromStr for PixelOffsetMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "default" | "none" | "" => Ok(PixelOffsetMode::Default),
            "half" | "half-pixel" | "highquality" => Ok(PixelOffsetMode::Half),
            other => Err(ConfigError::InvalidValue {
                key: PIXEL_OFFSET_ENV,
                value: other.to_string(),
            }),
        }
    }
}

/// How every backend surface is built
#[derive(Debug, Clone, PartialEq)]
pub struct HarnessConfig {
    pub width: u32,
    pub height: u32,
    pub background: Color,
    pub stroke: Color,
    pub pixel_offset: PixelOffsetMode,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            width: SURFACE_SIZE,
            height: SURFACE_SIZE,
            background: Color::BACKGROUND,
            stroke: Color::STROKE,
            pixel_offset: PixelOffsetMode::Default,
        }
    }
}

impl HarnessConfig {
    /// Defaults, with the pixel-offset mode taken from the environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Ok(val) = std::env::var(PIXEL_OFFSET_ENV) {
            config.pixel_offset = val.parse()?;
            log::info!(
                "Pixel offset {} selected via {}",
                config.pixel_offset.name(),
                PIXEL_OFFSET_ENV
            );
        }
        Ok(config)
    }

    pub fn with_pixel_offset(mut self, mode: PixelOffsetMode) -> Self {
        self.pixel_offset = mode;
        self
    }

    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Reject sizes no backend should be asked to allocate
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0
            || self.height == 0
            || self.width > MAX_SURFACE_SIZE
            || self.height > MAX_SURFACE_SIZE
        {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_the_standard_surface() {
        let config = HarnessConfig::default();
        assert_eq!((config.width, config.height), (1024, 1024));
        assert_eq!(config.background, Color::BACKGROUND);
        assert_eq!(config.pixel_offset, PixelOffsetMode::Default);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_degenerate_dimensions() {
        for (w, h) in [(0, 10), (10, 0), (MAX_SURFACE_SIZE + 1, 10)] {
            let config = HarnessConfig::default().with_dimensions(w, h);
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidDimensions { .. })
            ));
        }
    }

    #[test]
    fn parses_pixel_offset_names() {
        assert_eq!("HALF".parse::<PixelOffsetMode>().ok(), Some(PixelOffsetMode::Half));
        assert_eq!(
            "highquality".parse::<PixelOffsetMode>().ok(),
            Some(PixelOffsetMode::Half)
        );
        assert_eq!("none".parse::<PixelOffsetMode>().ok(), Some(PixelOffsetMode::Default));
        assert!("sideways".parse::<PixelOffsetMode>().is_err());
    }

    #[test]
    fn offset_only_applies_while_smoothing() {
        assert_eq!(PixelOffsetMode::Half.offset(true), -0.5);
        assert_eq!(PixelOffsetMode::Half.offset(false), 0.0);
        assert_eq!(PixelOffsetMode::Default.offset(true), 0.0);
    }
}
