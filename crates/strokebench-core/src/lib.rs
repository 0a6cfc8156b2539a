//! Strokebench Core: one set of drawing operations, many backends
//!
//! Two rendering libraries rarely agree on how a styled line is described.
//! One wants a paint with a dash path effect and an antialias flag, another
//! wants a pen with a dash style and a smoothing mode on its graphics context.
//! This crate holds the equivalence harness that hides those differences, so a
//! benchmark runner times the same logical work on every backend.
//!
//! ## How a run flows
//!
//! 1. **Construction** - every backend gets a fixed-size surface, exactly one
//!    style per [`types::StrokeVariant`], and native paths for the shared fixture.
//! 2. **Setup** - the runner picks an antialias value and calls
//!    [`Harness::setup`]; every style and every context-level smoothing mode follows it.
//! 3. **Measurement** - the runner invokes any of the ten entry points
//!    (five [`Operation`]s times two backends) as often as it likes.
//!
//! ```rust,ignore
//! use strokebench_core::{Harness, Operation};
//!
//! let mut harness = Harness::builder()
//!     .backend(Box::new(vector))
//!     .backend(Box::new(raster))
//!     .build()?;
//!
//! harness.setup(false)?;
//! for entry in harness.entries() {
//!     harness.run(entry);
//! }
//! ```
//!
//! ## The Traits
//!
//! - [`BackendSurface`] - what a rendering library must provide
//! - [`traits::StyleState`] - readback of a backend's stroke descriptor
//! - [`Backend`] - the object-safe view the harness drives

pub mod backend;
pub mod config;
pub mod error;
pub mod fixture;
pub mod harness;
pub mod ops;
pub mod traits;

pub use backend::{StyleSet, SurfaceBackend};
pub use config::{HarnessConfig, PixelOffsetMode};
pub use error::{ConfigError, HarnessError, Result};
pub use fixture::Fixture;
pub use harness::{EntryPoint, Harness, HarnessBuilder};
pub use ops::Operation;
pub use traits::{Backend, BackendSurface, StyleState};

/// The data shared by every backend
pub mod types {
    /// One straight stroke, endpoints in surface units
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct LineSegment {
        pub x0: f32,
        pub y0: f32,
        pub x1: f32,
        pub y1: f32,
    }

    impl LineSegment {
        pub const fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
            Self { x0, y0, x1, y1 }
        }

        pub fn length(&self) -> f32 {
            (self.x1 - self.x0).hypot(self.y1 - self.y0)
        }

        pub fn is_finite(&self) -> bool {
            self.x0.is_finite() && self.y0.is_finite() && self.x1.is_finite() && self.y1.is_finite()
        }
    }

    /// A repeating on/off dash, lengths in absolute units
    ///
    /// Lengths never scale with stroke width, whatever the backend's own
    /// convention is.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct DashPattern {
        pub on: f32,
        pub off: f32,
        pub phase: f32,
    }

    impl DashPattern {
        /// 2 on, 6 off, starting 1 unit into the pattern
        pub const STANDARD: DashPattern = DashPattern {
            on: 2.0,
            off: 6.0,
            phase: 1.0,
        };

        pub fn period(&self) -> f32 {
            self.on + self.off
        }

        pub fn intervals(&self) -> [f32; 2] {
            [self.on, self.off]
        }

        pub fn is_valid(&self) -> bool {
            self.on.is_finite()
                && self.off.is_finite()
                && self.phase.is_finite()
                && self.on > 0.0
                && self.off >= 0.0
        }
    }

    /// The four stroke styles every backend keeps one state for
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum StrokeVariant {
        SolidThick,
        SolidThin,
        DashedThick,
        DashedThin,
    }

    impl StrokeVariant {
        pub const ALL: [StrokeVariant; 4] = [
            StrokeVariant::SolidThick,
            StrokeVariant::SolidThin,
            StrokeVariant::DashedThick,
            StrokeVariant::DashedThin,
        ];

        pub const THICK_WIDTH: f32 = 2.0;
        pub const THIN_WIDTH: f32 = 1.0;

        pub fn width(self) -> f32 {
            match self {
                StrokeVariant::SolidThick | StrokeVariant::DashedThick => Self::THICK_WIDTH,
                StrokeVariant::SolidThin | StrokeVariant::DashedThin => Self::THIN_WIDTH,
            }
        }

        pub fn dash(self) -> Option<DashPattern> {
            match self {
                StrokeVariant::SolidThick | StrokeVariant::SolidThin => None,
                StrokeVariant::DashedThick | StrokeVariant::DashedThin => {
                    Some(DashPattern::STANDARD)
                },
            }
        }

        pub fn name(self) -> &'static str {
            match self {
                StrokeVariant::SolidThick => "solid_thick",
                StrokeVariant::SolidThin => "solid_thin",
                StrokeVariant::DashedThick => "dashed_thick",
                StrokeVariant::DashedThin => "dashed_thin",
            }
        }

        pub(crate) fn index(self) -> usize {
            match self {
                StrokeVariant::SolidThick => 0,
                StrokeVariant::SolidThin => 1,
                StrokeVariant::DashedThick => 2,
                StrokeVariant::DashedThin => 3,
            }
        }

        /// Nominal style for this variant, painted in `color`
        pub fn spec(self, color: crate::Color) -> StyleSpec {
            StyleSpec {
                width: self.width(),
                dash: self.dash(),
                color,
            }
        }
    }

    /// What a backend needs to build its own stroke descriptor
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct StyleSpec {
        pub width: f32,
        pub dash: Option<DashPattern>,
        pub color: crate::Color,
    }

    /// Backend-neutral readback of a stroke descriptor
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct StyleSnapshot {
        pub width: f32,
        pub dash: Option<DashPattern>,
        pub color: crate::Color,
        pub antialias: bool,
    }
}

/// Simple RGBA color that works everywhere
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Opaque gray every surface is cleared to
    pub const BACKGROUND: Color = Color::rgba(145, 145, 156, 255);

    /// Opaque red every line is stroked with
    pub const STROKE: Color = Color::rgba(255, 0, 0, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }
}
