//! Raster backend - pens and an immediate-mode context via raqote
//!
//! Styling here follows the immediate-mode model. A pen carries color, width,
//! dash pattern and dash style; how smoothly anything gets drawn is a property
//! of the graphics context, not of the pen. Each pen still records the flag it
//! was last given so the harness can check that pen and context agree.
//!
//! With [`PixelOffsetMode::Half`] the context also shifts drawing by half a
//! pixel while smoothing is high quality.

use raqote::{
    AntialiasMode, DrawOptions, DrawTarget, Path, PathBuilder, PathOp, SolidSource, Source,
    StrokeStyle, Transform,
};
use std::sync::Arc;
use strokebench_core::{
    error::{ConfigError, HarnessError, Result},
    types::{DashPattern, LineSegment, StyleSpec},
    Backend, BackendSurface, Color, Fixture, HarnessConfig, PixelOffsetMode, StyleState,
    SurfaceBackend,
};

/// Name used in entry points and logs
pub const NAME: &str = "raster";

/// Context-level quality mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmoothingMode {
    /// Aliased edges
    Default,
    /// Antialiased edges
    HighQuality,
}

impl SmoothingMode {
    pub fn from_antialias(enabled: bool) -> Self {
        if enabled {
            SmoothingMode::HighQuality
        } else {
            SmoothingMode::Default
        }
    }

    pub fn is_smooth(self) -> bool {
        self == SmoothingMode::HighQuality
    }

    fn antialias_mode(self) -> AntialiasMode {
        match self {
            SmoothingMode::Default => AntialiasMode::None,
            SmoothingMode::HighQuality => AntialiasMode::Gray,
        }
    }
}

/// Whether a pen draws continuous or custom-dashed lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashStyle {
    Solid,
    Custom,
}

/// Color, width and dashing for one line style
pub struct Pen {
    source: Source<'static>,
    stroke: StrokeStyle,
    dash_style: DashStyle,
    color: Color,
    antialias: bool,
}

impl Pen {
    pub fn dash_style(&self) -> DashStyle {
        self.dash_style
    }

    pub fn stroke_style(&self) -> &StrokeStyle {
        &self.stroke
    }
}

impl StyleState for Pen {
    fn width(&self) -> f32 {
        self.stroke.width
    }

    /// Read from the stroke style raqote actually dashes with
    fn dash(&self) -> Option<DashPattern> {
        match self.stroke.dash_array.as_slice() {
            [] => None,
            &[on, off] => Some(DashPattern {
                on,
                off,
                phase: self.stroke.dash_offset,
            }),
            // Not a two-interval pattern; report it as-is so readback fails
            other => Some(DashPattern {
                on: other.first().copied().unwrap_or(f32::NAN),
                off: f32::NAN,
                phase: self.stroke.dash_offset,
            }),
        }
    }

    fn color(&self) -> Color {
        self.color
    }

    fn antialias(&self) -> bool {
        self.antialias
    }
}

/// A raqote draw target plus the context state every draw reads
pub struct RasterSurface {
    target: DrawTarget,
    options: DrawOptions,
    smoothing: SmoothingMode,
    pixel_offset: PixelOffsetMode,
    width: u32,
    height: u32,
}

impl RasterSurface {
    pub fn new(config: &HarnessConfig) -> Result<Self> {
        config.validate()?;
        let failed = || ConfigError::SurfaceCreationFailed {
            backend: NAME,
            width: config.width,
            height: config.height,
        };
        let width = i32::try_from(config.width).map_err(|_| failed())?;
        let height = i32::try_from(config.height).map_err(|_| failed())?;

        let smoothing = SmoothingMode::Default;
        let options = DrawOptions {
            antialias: smoothing.antialias_mode(),
            ..DrawOptions::new()
        };
        log::debug!(
            "{}: {}x{} draw target, pixel offset {}",
            NAME,
            width,
            height,
            config.pixel_offset.name()
        );

        Ok(Self {
            target: DrawTarget::new(width, height),
            options,
            smoothing,
            pixel_offset: config.pixel_offset,
            width: config.width,
            height: config.height,
        })
    }

    pub fn smoothing_mode(&self) -> SmoothingMode {
        self.smoothing
    }

    pub fn pixel_offset(&self) -> PixelOffsetMode {
        self.pixel_offset
    }

    /// Translation currently applied to every draw
    pub fn offset(&self) -> f32 {
        self.pixel_offset.offset(self.smoothing.is_smooth())
    }
}

/// Undo raqote's premultiplied ARGB packing
fn unpack(argb: u32) -> Color {
    let a = (argb >> 24) as u8;
    let channel = |shift: u32| {
        let c = ((argb >> shift) & 0xff) as u16;
        match a {
            0 => 0,
            255 => c as u8,
            _ => ((c * 255 + a as u16 / 2) / a as u16).min(255) as u8,
        }
    };
    Color::rgba(channel(16), channel(8), channel(0), a)
}

impl BackendSurface for RasterSurface {
    type Style = Pen;
    type Geometry = Path;

    fn name(&self) -> &'static str {
        NAME
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn create_style(&self, spec: &StyleSpec) -> Result<Pen> {
        if !(spec.width.is_finite() && spec.width > 0.0) {
            return Err(ConfigError::InvalidStroke {
                backend: NAME,
                detail: format!("width {}", spec.width),
            }
            .into());
        }

        // Dash lengths stay absolute; they are not multiplied by the pen width
        let (dash_style, dash_array, dash_offset) = match spec.dash {
            Some(pattern) if pattern.is_valid() => {
                (DashStyle::Custom, pattern.intervals().to_vec(), pattern.phase)
            },
            Some(pattern) => {
                return Err(ConfigError::InvalidDash(format!("{:?}", pattern)).into());
            },
            None => (DashStyle::Solid, Vec::new(), 0.0),
        };

        let c = spec.color;
        Ok(Pen {
            source: Source::Solid(SolidSource::from_unpremultiplied_argb(c.a, c.r, c.g, c.b)),
            stroke: StrokeStyle {
                width: spec.width,
                dash_array,
                dash_offset,
                ..StrokeStyle::default()
            },
            dash_style,
            color: c,
            antialias: false,
        })
    }

    fn prepare_segment(&self, segment: &LineSegment) -> Result<Path> {
        if !segment.is_finite() {
            return Err(HarnessError::InvariantViolation(format!(
                "{}: non-finite segment {:?}",
                NAME, segment
            )));
        }
        let mut pb = PathBuilder::new();
        pb.move_to(segment.x0, segment.y0);
        pb.line_to(segment.x1, segment.y1);
        Ok(pb.finish())
    }

    fn segment_of(&self, path: &Path) -> LineSegment {
        let mut start = (f32::NAN, f32::NAN);
        let mut end = (f32::NAN, f32::NAN);
        for op in &path.ops {
            match op {
                PathOp::MoveTo(p) if start.0.is_nan() => start = (p.x, p.y),
                PathOp::LineTo(p) => end = (p.x, p.y),
                _ => {},
            }
        }
        LineSegment::new(start.0, start.1, end.0, end.1)
    }

    #[inline]
    fn clear(&mut self, color: Color) {
        self.target.clear(SolidSource::from_unpremultiplied_argb(
            color.a, color.r, color.g, color.b,
        ));
    }

    #[inline]
    fn stroke_line(&mut self, path: &Path, pen: &Pen) {
        self.target
            .stroke(path, &pen.source, &pen.stroke, &self.options);
    }

    fn apply_antialias(&mut self, pen: &mut Pen, enabled: bool) -> Result<()> {
        pen.antialias = enabled;
        Ok(())
    }

    fn set_smoothing(&mut self, enabled: bool) -> Result<()> {
        self.smoothing = SmoothingMode::from_antialias(enabled);
        self.options.antialias = self.smoothing.antialias_mode();
        let offset = self.offset();
        self.target
            .set_transform(&Transform::translation(offset, offset));
        Ok(())
    }

    fn smoothing(&self) -> Option<bool> {
        Some(self.smoothing.is_smooth())
    }

    fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = y as usize * self.width as usize + x as usize;
        self.target.get_data().get(index).map(|&argb| unpack(argb))
    }

    fn pixel_bytes(&self) -> &[u8] {
        self.target.get_data_u8()
    }
}

/// Build the raster backend for a harness
///
/// Fits [`strokebench_core::HarnessBuilder::backend`] directly.
pub fn backend(fixture: Arc<Fixture>, config: &HarnessConfig) -> Result<Box<dyn Backend>> {
    let surface = RasterSurface::new(config)?;
    Ok(Box::new(SurfaceBackend::new(surface, fixture, config)?))
}
