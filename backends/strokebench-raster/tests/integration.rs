//! Integration tests for the raster backend

use std::sync::Arc;
use strokebench_core::{
    types::StrokeVariant, Backend, Color, Fixture, HarnessConfig, Operation, PixelOffsetMode,
};

fn build(config: &HarnessConfig) -> Box<dyn Backend> {
    strokebench_raster::backend(Arc::new(Fixture::standard()), config).unwrap()
}

fn diagonal_hits(backend: &dyn Backend) -> usize {
    (0..1024)
        .filter(|&i| backend.pixel(i, i) != Some(Color::BACKGROUND))
        .count()
}

#[test]
fn test_backend_creation() {
    let backend = build(&HarnessConfig::default());
    assert_eq!(backend.name(), "raster");
    assert_eq!(backend.dimensions(), (1024, 1024));
    assert_eq!(backend.segments(), Fixture::standard().segments());
    assert_eq!(backend.smoothing(), Some(true));
}

#[test]
fn setup_moves_pens_and_context_together() {
    let mut backend = build(&HarnessConfig::default());
    for antialias in [false, true, false] {
        backend.setup(antialias).unwrap();
        assert_eq!(backend.smoothing(), Some(antialias));
        for variant in StrokeVariant::ALL {
            assert_eq!(backend.style(variant).antialias, antialias);
        }
    }
}

#[test]
fn every_draw_leaves_a_mark() {
    let mut backend = build(&HarnessConfig::default());
    for antialias in [true, false] {
        backend.setup(antialias).unwrap();
        for variant in StrokeVariant::ALL {
            backend.run(Operation::Clear);
            assert_eq!(diagonal_hits(backend.as_ref()), 0);
            backend.run(Operation::DrawLines(variant));
            assert!(
                diagonal_hits(backend.as_ref()) > 0,
                "{} antialias={}",
                variant.name(),
                antialias
            );
        }
    }
}

#[test]
fn solid_lines_cover_the_diagonal() {
    let mut backend = build(&HarnessConfig::default());
    backend.setup(false).unwrap();
    for variant in [StrokeVariant::SolidThick, StrokeVariant::SolidThin] {
        backend.run(Operation::Clear);
        backend.run(Operation::DrawLines(variant));
        assert!(diagonal_hits(backend.as_ref()) > 900, "{}", variant.name());
    }
}

#[test]
fn dashed_lines_leave_gaps() {
    let mut backend = build(&HarnessConfig::default());
    backend.setup(false).unwrap();
    for variant in [StrokeVariant::DashedThick, StrokeVariant::DashedThin] {
        backend.run(Operation::Clear);
        backend.run(Operation::DrawLines(variant));
        let hits = diagonal_hits(backend.as_ref());
        assert!(hits > 0 && hits < 1024 / 2, "{}: {}", variant.name(), hits);
    }
}

#[test]
fn clear_twice_matches_clear_once() {
    let mut backend = build(&HarnessConfig::default());
    backend.run(Operation::Clear);
    let once = backend.pixel_bytes().to_vec();
    backend.run(Operation::DrawLines(StrokeVariant::SolidThin));
    backend.run(Operation::Clear);
    backend.run(Operation::Clear);
    assert_eq!(backend.pixel_bytes(), &once[..]);
}

#[test]
fn half_pixel_offset_still_draws() {
    let config = HarnessConfig::default().with_pixel_offset(PixelOffsetMode::Half);
    let mut backend = build(&config);
    backend.setup(true).unwrap();
    backend.run(Operation::Clear);
    backend.run(Operation::DrawLines(StrokeVariant::SolidThick));
    assert!(diagonal_hits(backend.as_ref()) > 0);
}
