//! Generic glue from a [`BackendSurface`] to the object-safe [`Backend`]

use crate::{
    config::HarnessConfig,
    error::{ConfigError, HarnessError, Result},
    fixture::Fixture,
    ops::{self, Operation},
    traits::{Backend, BackendSurface, StyleState},
    types::{LineSegment, StrokeVariant, StyleSnapshot},
    Color,
};
use std::sync::Arc;

/// Exactly one style per [`StrokeVariant`]
///
/// Built once; afterwards styles are only ever mutated in place.
#[derive(Debug)]
pub struct StyleSet<T> {
    styles: [T; 4],
}

impl<T> StyleSet<T> {
    /// Build every variant's style, stopping at the first failure
    pub fn try_new(mut build: impl FnMut(StrokeVariant) -> Result<T>) -> Result<Self> {
        let styles = StrokeVariant::ALL
            .iter()
            .map(|&variant| build(variant))
            .collect::<Result<Vec<T>>>()?;
        let styles: [T; 4] = styles.try_into().map_err(|_| {
            HarnessError::InvariantViolation("style set must hold four variants".to_string())
        })?;
        Ok(Self { styles })
    }

    pub fn get(&self, variant: StrokeVariant) -> &T {
        &self.styles[variant.index()]
    }

    pub fn get_mut(&mut self, variant: StrokeVariant) -> &mut T {
        &mut self.styles[variant.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (StrokeVariant, &T)> {
        StrokeVariant::ALL.into_iter().zip(self.styles.iter())
    }
}

/// A surface, its four styles and its prepared fixture geometry
pub struct SurfaceBackend<S: BackendSurface> {
    surface: S,
    styles: StyleSet<S::Style>,
    geometry: Vec<S::Geometry>,
    fixture: Arc<Fixture>,
    background: Color,
}

impl<S: BackendSurface> SurfaceBackend<S> {
    /// Build styles and paths for `surface`, then verify them
    ///
    /// Every style must read back the nominal width and dash of its variant
    /// and every prepared path must hold the fixture's exact endpoints.
    /// The backend leaves construction set up for antialias on.
    pub fn new(surface: S, fixture: Arc<Fixture>, config: &HarnessConfig) -> Result<Self> {
        config.validate()?;
        let name = surface.name();
        if surface.dimensions() != (config.width, config.height) {
            return Err(ConfigError::SurfaceCreationFailed {
                backend: name,
                width: config.width,
                height: config.height,
            }
            .into());
        }

        let styles = StyleSet::try_new(|variant| {
            let spec = variant.spec(config.stroke);
            let style = surface.create_style(&spec)?;
            if style.width() != spec.width || style.dash() != spec.dash {
                return Err(HarnessError::InvariantViolation(format!(
                    "{} built {} as width={} dash={:?}",
                    name,
                    variant.name(),
                    style.width(),
                    style.dash()
                )));
            }
            Ok(style)
        })?;

        let geometry = fixture
            .segments()
            .iter()
            .map(|segment| {
                let prepared = surface.prepare_segment(segment)?;
                let read_back = surface.segment_of(&prepared);
                if read_back != *segment {
                    return Err(HarnessError::InvariantViolation(format!(
                        "{} prepared {:?} as {:?}",
                        name, segment, read_back
                    )));
                }
                Ok(prepared)
            })
            .collect::<Result<Vec<_>>>()?;

        let mut backend = Self {
            surface,
            styles,
            geometry,
            fixture,
            background: config.background,
        };
        backend.setup(true)?;
        Ok(backend)
    }
}

impl<S: BackendSurface> Backend for SurfaceBackend<S> {
    fn name(&self) -> &'static str {
        self.surface.name()
    }

    fn dimensions(&self) -> (u32, u32) {
        self.surface.dimensions()
    }

    fn setup(&mut self, antialias: bool) -> Result<()> {
        let name = self.surface.name();
        log::debug!("{}: setup antialias={}", name, antialias);

        for variant in StrokeVariant::ALL {
            self.surface
                .apply_antialias(self.styles.get_mut(variant), antialias)?;
        }
        self.surface.set_smoothing(antialias)?;

        for (variant, style) in self.styles.iter() {
            if style.antialias() != antialias {
                log::warn!("{}: {} ignored antialias={}", name, variant.name(), antialias);
                return Err(ConfigError::AntialiasUnsupported {
                    backend: name,
                    enabled: antialias,
                }
                .into());
            }
        }
        if let Some(smoothing) = self.surface.smoothing() {
            if smoothing != antialias {
                return Err(ConfigError::SmoothingMismatch {
                    backend: name,
                    expected: antialias,
                }
                .into());
            }
        }
        Ok(())
    }

    fn set_antialias(&mut self, variant: StrokeVariant, enabled: bool) -> Result<()> {
        self.surface
            .apply_antialias(self.styles.get_mut(variant), enabled)
    }

    #[inline]
    fn run(&mut self, operation: Operation) {
        ops::run(
            operation,
            &mut self.surface,
            &self.styles,
            &self.geometry,
            self.background,
        );
    }

    fn style(&self, variant: StrokeVariant) -> StyleSnapshot {
        self.styles.get(variant).snapshot()
    }

    fn smoothing(&self) -> Option<bool> {
        self.surface.smoothing()
    }

    fn segments(&self) -> Vec<LineSegment> {
        self.geometry
            .iter()
            .map(|g| self.surface.segment_of(g))
            .collect()
    }

    fn fixture(&self) -> &Arc<Fixture> {
        &self.fixture
    }

    fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.surface.pixel(x, y)
    }

    fn pixel_bytes(&self) -> &[u8] {
        self.surface.pixel_bytes()
    }
}
