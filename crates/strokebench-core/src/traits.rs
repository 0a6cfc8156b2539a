//! The contracts that bind every backend together
//!
//! - [`BackendSurface`] - what a rendering library implements
//! - [`StyleState`] - how its stroke descriptor reads back
//! - [`Backend`] - the object-safe face the harness and runners drive
//!
//! A new backend implements [`BackendSurface`] and wraps it in
//! [`crate::SurfaceBackend`]. Nothing else changes.

use crate::{
    error::Result,
    fixture::Fixture,
    ops::Operation,
    types::{DashPattern, LineSegment, StrokeVariant, StyleSnapshot, StyleSpec},
    Color,
};
use std::sync::Arc;

/// Readback of a backend's reusable stroke descriptor
///
/// Paints, pens, whatever the library calls them: they all know their width,
/// dash, color and whether they antialias.
pub trait StyleState {
    fn width(&self) -> f32;

    fn dash(&self) -> Option<DashPattern>;

    fn color(&self) -> Color;

    fn antialias(&self) -> bool;

    /// Backend-neutral copy of everything above
    fn snapshot(&self) -> StyleSnapshot {
        StyleSnapshot {
            width: self.width(),
            dash: self.dash(),
            color: self.color(),
            antialias: self.antialias(),
        }
    }
}

/// A drawing target plus the capability set every backend exposes
///
/// Construction-time methods return `Result`. The measured methods,
/// [`clear`](Self::clear) and [`stroke_line`](Self::stroke_line), do not:
/// everything they touch was validated when it was built.
///
/// ```ignore
/// struct MySurface { /* pixels, context */ }
///
/// impl BackendSurface for MySurface {
///     type Style = MyPen;
///     type Geometry = MyPath;
///
///     fn name(&self) -> &'static str { "mine" }
///     // ...
/// }
/// ```
pub trait BackendSurface {
    /// The library's stroke descriptor, one per variant
    type Style: StyleState;

    /// A fixture segment in the library's own path form
    type Geometry;

    /// Short stable identifier, used in entry point names
    fn name(&self) -> &'static str;

    fn dimensions(&self) -> (u32, u32);

    /// Build the descriptor for one variant; called once per variant
    fn create_style(&self, spec: &StyleSpec) -> Result<Self::Style>;

    /// Build the native path for one fixture segment; called once per segment
    fn prepare_segment(&self, segment: &LineSegment) -> Result<Self::Geometry>;

    /// Endpoints as the native path actually holds them
    fn segment_of(&self, geometry: &Self::Geometry) -> LineSegment;

    /// Fill the whole surface with one color
    fn clear(&mut self, color: Color);

    /// Draw one prepared segment with one prepared style
    fn stroke_line(&mut self, geometry: &Self::Geometry, style: &Self::Style);

    /// Set the antialias flag carried by a style
    fn apply_antialias(&mut self, style: &mut Self::Style, enabled: bool) -> Result<()>;

    /// Set the context-level smoothing mode, for libraries that have one
    fn set_smoothing(&mut self, _enabled: bool) -> Result<()> {
        Ok(())
    }

    /// Context-level smoothing, or `None` when antialiasing lives only on styles
    fn smoothing(&self) -> Option<bool> {
        None
    }

    /// Unpremultiplied color at a pixel, `None` outside the surface
    fn pixel(&self, x: u32, y: u32) -> Option<Color>;

    /// Raw pixel storage in the library's own layout
    fn pixel_bytes(&self) -> &[u8];
}

/// One backend as the harness sees it
///
/// Object safe so a harness can hold any mix of backends.
pub trait Backend {
    fn name(&self) -> &'static str;

    fn dimensions(&self) -> (u32, u32);

    /// Bring every style and the context smoothing mode to `antialias`
    fn setup(&mut self, antialias: bool) -> Result<()>;

    /// Set the antialias flag of a single variant's style
    fn set_antialias(&mut self, variant: StrokeVariant, enabled: bool) -> Result<()>;

    /// Execute one operation; this is what gets timed
    fn run(&mut self, operation: Operation);

    fn style(&self, variant: StrokeVariant) -> StyleSnapshot;

    fn smoothing(&self) -> Option<bool>;

    /// Fixture segments read back from the prepared native paths
    fn segments(&self) -> Vec<LineSegment>;

    fn fixture(&self) -> &Arc<Fixture>;

    fn pixel(&self, x: u32, y: u32) -> Option<Color>;

    fn pixel_bytes(&self) -> &[u8];
}
