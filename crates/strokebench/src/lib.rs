//! Strokebench - what does a styled line cost on each 2D backend?
//!
//! Two rendering libraries, one set of drawing operations:
//!
//! - **vector** - tiny-skia, styled through paints and dash path effects
//! - **raster** - raqote, styled through pens and a context smoothing mode
//!
//! Both draw the same fixture (one diagonal across a 1024x1024 surface) with
//! the same four stroke styles, so any difference in timing is the backend's.
//!
//! # Example
//!
//! ```ignore
//! let mut harness = strokebench::default_harness()?;
//! harness.setup(true)?;
//! for entry in harness.entries() {
//!     harness.run(entry);
//! }
//! ```
//!
//! # Feature Flags
//!
//! - `vector`: tiny-skia backend (default)
//! - `raster`: raqote backend (default)

pub use strokebench_core::{
    error, fixture, ops, traits, types, Backend, BackendSurface, Color, EntryPoint, Fixture,
    Harness, HarnessBuilder, HarnessConfig, HarnessError, Operation, PixelOffsetMode, Result,
};

#[cfg(feature = "raster")]
pub use strokebench_raster as raster;

#[cfg(feature = "vector")]
pub use strokebench_vector as vector;

/// Common imports for typical usage
pub mod prelude {
    pub use strokebench_core::{
        error::{HarnessError, Result},
        traits::{Backend, BackendSurface, StyleState},
        types::{DashPattern, LineSegment, StrokeVariant, StyleSnapshot},
        Color, EntryPoint, Fixture, Harness, HarnessConfig, Operation,
    };
}

/// Every compiled-in backend, registered on a builder
#[allow(unused_mut)]
pub fn builder_with_backends(config: HarnessConfig) -> HarnessBuilder {
    let mut builder = Harness::builder().config(config);

    #[cfg(feature = "vector")]
    {
        builder = builder.backend(strokebench_vector::backend);
    }

    #[cfg(feature = "raster")]
    {
        builder = builder.backend(strokebench_raster::backend);
    }

    builder
}

/// Harness over every compiled-in backend with the standard fixture
pub fn harness_with(config: HarnessConfig) -> Result<Harness> {
    log::debug!("Building harness, pixel offset {}", config.pixel_offset.name());
    builder_with_backends(config).build()
}

/// Standard harness, honoring `STROKEBENCH_PIXEL_OFFSET`
pub fn default_harness() -> Result<Harness> {
    harness_with(HarnessConfig::from_env()?)
}
