//! The harness: backends, shared fixture, and the setup protocol

use crate::{
    config::HarnessConfig,
    error::{ConfigError, HarnessError, Result},
    fixture::Fixture,
    ops::Operation,
    traits::Backend,
    types::StrokeVariant,
};
use std::fmt;
use std::sync::Arc;

type BackendFactory = Box<dyn FnOnce(Arc<Fixture>, &HarnessConfig) -> Result<Box<dyn Backend>>>;

/// One of the runner-visible (backend, operation) pairs
///
/// Only [`Harness::entries`] and [`Harness::entry`] hand these out, and an
/// entry point is only meaningful for the harness that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryPoint {
    backend: usize,
    backend_name: &'static str,
    operation: Operation,
}

impl EntryPoint {
    pub fn backend_name(&self) -> &'static str {
        self.backend_name
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// `"<backend>/<operation>"`, stable across runs
    pub fn name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.backend_name, self.operation.name())
    }
}

/// Every backend, driven through the same operations on the same fixture
///
/// The runner owns sequencing. It calls [`setup`](Self::setup) once per
/// antialias value and then [`run`](Self::run) for whichever entry points it
/// wants, in any order. The harness holds no per-operation state.
pub struct Harness {
    backends: Vec<Box<dyn Backend>>,
    fixture: Arc<Fixture>,
    config: HarnessConfig,
    antialias: Option<bool>,
}

impl Harness {
    pub fn builder() -> HarnessBuilder {
        HarnessBuilder::new()
    }

    /// Apply one antialias value to every backend
    ///
    /// Must complete before any operation measured under that value. The
    /// first backend that cannot honor it aborts the setup.
    pub fn setup(&mut self, antialias: bool) -> Result<()> {
        self.antialias = None;
        for backend in &mut self.backends {
            backend.setup(antialias)?;
        }
        self.antialias = Some(antialias);
        Ok(())
    }

    /// Value of the last setup that completed
    pub fn antialias(&self) -> Option<bool> {
        self.antialias
    }

    /// All entry points, backend-major, operations in table order
    pub fn entries(&self) -> Vec<EntryPoint> {
        self.backends
            .iter()
            .enumerate()
            .flat_map(|(index, backend)| {
                let backend_name = backend.name();
                Operation::ALL.into_iter().map(move |operation| EntryPoint {
                    backend: index,
                    backend_name,
                    operation,
                })
            })
            .collect()
    }

    /// Look an entry point up by its `"<backend>/<operation>"` name
    pub fn entry(&self, name: &str) -> Option<EntryPoint> {
        let (backend_name, op_name) = name.split_once('/')?;
        let operation = Operation::from_name(op_name)?;
        let backend = self
            .backends
            .iter()
            .position(|b| b.name() == backend_name)?;
        Some(EntryPoint {
            backend,
            backend_name: self.backends[backend].name(),
            operation,
        })
    }

    /// Execute one entry point; this is the measured call
    ///
    /// `entry` must come from this harness. Debug builds panic on an entry
    /// point from elsewhere; release builds skip it.
    #[inline]
    pub fn run(&mut self, entry: EntryPoint) {
        let backend = self.backends.get_mut(entry.backend);
        debug_assert!(
            backend
                .as_ref()
                .is_some_and(|b| b.name() == entry.backend_name),
            "entry point {} does not belong to this harness",
            entry
        );
        if let Some(backend) = backend {
            backend.run(entry.operation);
        }
    }

    pub fn backends(&self) -> &[Box<dyn Backend>] {
        &self.backends
    }

    pub fn backend(&self, name: &str) -> Option<&dyn Backend> {
        self.backends
            .iter()
            .find(|b| b.name() == name)
            .map(|b| b.as_ref())
    }

    pub fn backend_mut(&mut self, name: &str) -> Option<&mut (dyn Backend + 'static)> {
        self.backends
            .iter_mut()
            .find(|b| b.name() == name)
            .map(|b| b.as_mut())
    }

    pub fn fixture(&self) -> &Arc<Fixture> {
        &self.fixture
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Check that every backend draws the same thing
    ///
    /// Geometry must match the shared fixture exactly, and each variant must
    /// read back the same width and dash on every backend.
    pub fn verify_equivalence(&self) -> Result<()> {
        for backend in &self.backends {
            if !Arc::ptr_eq(backend.fixture(), &self.fixture)
                && **backend.fixture() != *self.fixture
            {
                return Err(HarnessError::InvariantViolation(format!(
                    "{} was built for a different fixture",
                    backend.name()
                )));
            }
            if backend.segments() != self.fixture.segments() {
                return Err(HarnessError::InvariantViolation(format!(
                    "{} geometry diverges from the fixture",
                    backend.name()
                )));
            }
            if backend.dimensions() != (self.config.width, self.config.height) {
                return Err(HarnessError::InvariantViolation(format!(
                    "{} surface is {:?}, expected {}x{}",
                    backend.name(),
                    backend.dimensions(),
                    self.config.width,
                    self.config.height
                )));
            }
        }

        if let Some((first, rest)) = self.backends.split_first() {
            for variant in StrokeVariant::ALL {
                let reference = first.style(variant);
                for other in rest {
                    let style = other.style(variant);
                    if style.width != reference.width || style.dash != reference.dash {
                        return Err(HarnessError::InvariantViolation(format!(
                            "{} differs between {} and {}: {:?} vs {:?}",
                            variant.name(),
                            first.name(),
                            other.name(),
                            reference,
                            style
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Collects backends and the shared fixture, then checks they agree
pub struct HarnessBuilder {
    fixture: Arc<Fixture>,
    config: HarnessConfig,
    factories: Vec<BackendFactory>,
    prebuilt: Vec<Box<dyn Backend>>,
}

impl HarnessBuilder {
    pub fn new() -> Self {
        Self {
            fixture: Arc::new(Fixture::standard()),
            config: HarnessConfig::default(),
            factories: Vec::new(),
            prebuilt: Vec::new(),
        }
    }

    pub fn fixture(mut self, fixture: Fixture) -> Self {
        self.fixture = Arc::new(fixture);
        self
    }

    pub fn config(mut self, config: HarnessConfig) -> Self {
        self.config = config;
        self
    }

    /// Add a backend built from the harness's fixture and config
    pub fn backend<F>(mut self, factory: F) -> Self
    where
        F: FnOnce(Arc<Fixture>, &HarnessConfig) -> Result<Box<dyn Backend>> + 'static,
    {
        self.factories.push(Box::new(factory));
        self
    }

    /// Add a backend that was built elsewhere
    ///
    /// It must have been built for an equal fixture and config, which
    /// [`build`](Self::build) checks.
    pub fn prebuilt(mut self, backend: Box<dyn Backend>) -> Self {
        self.prebuilt.push(backend);
        self
    }

    pub fn build(self) -> Result<Harness> {
        self.config.validate()?;

        let mut backends = Vec::with_capacity(self.factories.len() + self.prebuilt.len());
        for factory in self.factories {
            backends.push(factory(self.fixture.clone(), &self.config)?);
        }
        backends.extend(self.prebuilt);

        if backends.is_empty() {
            return Err(HarnessError::NoBackends);
        }
        for (i, backend) in backends.iter().enumerate() {
            if backends[..i].iter().any(|b| b.name() == backend.name()) {
                return Err(ConfigError::InvalidValue {
                    key: "backend",
                    value: format!("duplicate backend name {}", backend.name()),
                }
                .into());
            }
        }

        let harness = Harness {
            backends,
            fixture: self.fixture,
            config: self.config,
            antialias: None,
        };
        harness.verify_equivalence()?;

        log::info!(
            "Harness ready: backends=[{}], {} segment(s), {}x{} surface",
            harness
                .backends
                .iter()
                .map(|b| b.name())
                .collect::<Vec<_>>()
                .join(", "),
            harness.fixture.len(),
            harness.config.width,
            harness.config.height
        );
        Ok(harness)
    }
}

impl Default for HarnessBuilder {
    fn default() -> Self {
        Self::new()
    }
}
