//! Vector backend - paints and path effects via tiny-skia
//!
//! Styling here follows the Skia model. A stroke is a paint plus a stroke
//! descriptor; dashing is a path effect attached to the stroke; antialiasing is
//! a flag on each paint. Drawing goes through a retained pixmap that lives for
//! the whole run.
//!
//! The dash effect is built once per dashed style. Lines are pre-built as
//! `tiny_skia::Path`s, so a measured draw is a single `stroke_path` call.

use std::sync::Arc;
use strokebench_core::{
    error::{ConfigError, HarnessError, Result},
    types::{DashPattern, LineSegment, StyleSpec},
    Backend, BackendSurface, Color, Fixture, HarnessConfig, StyleState, SurfaceBackend,
};
use tiny_skia::{Paint, Path, PathBuilder, Pixmap, Stroke, StrokeDash, Transform};

/// Name used in entry points and logs
pub const NAME: &str = "vector";

/// Paint plus stroke, the tiny-skia way of describing a styled line
#[derive(Debug, Clone)]
pub struct VectorPaint {
    paint: Paint<'static>,
    stroke: Stroke,
    // tiny-skia keeps the dash opaque, so the nominal pattern rides along
    dash: Option<DashPattern>,
    color: Color,
}

impl VectorPaint {
    pub fn paint(&self) -> &Paint<'static> {
        &self.paint
    }

    pub fn stroke(&self) -> &Stroke {
        &self.stroke
    }
}

impl StyleState for VectorPaint {
    fn width(&self) -> f32 {
        self.stroke.width
    }

    fn dash(&self) -> Option<DashPattern> {
        self.dash
    }

    fn color(&self) -> Color {
        self.color
    }

    fn antialias(&self) -> bool {
        self.paint.anti_alias
    }
}

/// A tiny-skia pixmap sized once and reused for every operation
pub struct VectorSurface {
    pixmap: Pixmap,
}

impl VectorSurface {
    pub fn new(config: &HarnessConfig) -> Result<Self> {
        config.validate()?;
        let pixmap = Pixmap::new(config.width, config.height).ok_or(
            ConfigError::SurfaceCreationFailed {
                backend: NAME,
                width: config.width,
                height: config.height,
            },
        )?;
        log::debug!("{}: {}x{} pixmap", NAME, config.width, config.height);
        Ok(Self { pixmap })
    }
}

impl BackendSurface for VectorSurface {
    type Style = VectorPaint;
    type Geometry = Path;

    fn name(&self) -> &'static str {
        NAME
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.pixmap.width(), self.pixmap.height())
    }

    fn create_style(&self, spec: &StyleSpec) -> Result<VectorPaint> {
        if !(spec.width.is_finite() && spec.width > 0.0) {
            return Err(ConfigError::InvalidStroke {
                backend: NAME,
                detail: format!("width {}", spec.width),
            }
            .into());
        }

        let mut paint = Paint::default();
        paint.set_color_rgba8(spec.color.r, spec.color.g, spec.color.b, spec.color.a);
        paint.anti_alias = true;

        let dash = match spec.dash {
            Some(pattern) => Some(
                StrokeDash::new(pattern.intervals().to_vec(), pattern.phase)
                    .ok_or_else(|| ConfigError::InvalidDash(format!("{:?}", pattern)))?,
            ),
            None => None,
        };

        let stroke = Stroke {
            width: spec.width,
            dash,
            ..Stroke::default()
        };

        Ok(VectorPaint {
            paint,
            stroke,
            dash: spec.dash,
            color: spec.color,
        })
    }

    fn prepare_segment(&self, segment: &LineSegment) -> Result<Path> {
        let mut pb = PathBuilder::new();
        pb.move_to(segment.x0, segment.y0);
        pb.line_to(segment.x1, segment.y1);
        pb.finish().ok_or_else(|| {
            HarnessError::InvariantViolation(format!("{}: cannot build a path for {:?}", NAME, segment))
        })
    }

    fn segment_of(&self, path: &Path) -> LineSegment {
        let points = path.points();
        let (x0, y0) = points.first().map_or((f32::NAN, f32::NAN), |p| (p.x, p.y));
        let (x1, y1) = points.last().map_or((f32::NAN, f32::NAN), |p| (p.x, p.y));
        LineSegment::new(x0, y0, x1, y1)
    }

    #[inline]
    fn clear(&mut self, color: Color) {
        self.pixmap
            .fill(tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a));
    }

    #[inline]
    fn stroke_line(&mut self, path: &Path, style: &VectorPaint) {
        self.pixmap
            .stroke_path(path, &style.paint, &style.stroke, Transform::identity(), None);
    }

    fn apply_antialias(&mut self, style: &mut VectorPaint, enabled: bool) -> Result<()> {
        style.paint.anti_alias = enabled;
        Ok(())
    }

    fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        // Pixmap::pixel only bounds-checks the flat index, so a column past
        // the right edge would wrap onto the next row
        if x >= self.pixmap.width() || y >= self.pixmap.height() {
            return None;
        }
        let c =self.pixmap.pixel(x, y)?.demultiply();
        Some(Color::rgba(c.red(), c.green(), c.blue(), c.alpha()))
    }

    fn pixel_bytes(&self) -> &[u8] {
        self.pixmap.data()
    }
}

/// Build the vector backend for a harness
///
/// Fits [`strokebench_core::HarnessBuilder::backend`] directly.
pub fn backend(fixture: Arc<Fixture>, config: &HarnessConfig) -> Result<Box<dyn Backend>> {
    let surface = VectorSurface::new(config)?;
    Ok(Box::new(SurfaceBackend::new(surface, fixture, config)?))
}
