//! Cross-backend equivalence on the real vector and raster backends

use strokebench::prelude::*;
use strokebench::{harness_with, PixelOffsetMode};

fn harness() -> Harness {
    harness_with(HarnessConfig::default()).unwrap()
}

fn diagonal(backend: &dyn Backend) -> Vec<bool> {
    (0..1024)
        .map(|i| backend.pixel(i, i) != Some(Color::BACKGROUND))
        .collect()
}

#[test]
fn both_backends_are_registered() {
    let harness = harness();
    let names: Vec<_> = harness.backends().iter().map(|b| b.name()).collect();
    assert_eq!(names, vec!["vector", "raster"]);
    assert_eq!(harness.entries().len(), 10);
}

#[test]
fn backends_draw_the_same_geometry() {
    let harness = harness();
    let vector = harness.backend("vector").unwrap();
    let raster = harness.backend("raster").unwrap();
    assert_eq!(vector.segments(), raster.segments());
    assert_eq!(
        vector.segments(),
        vec![LineSegment::new(-10.0, -10.0, 1200.0, 1200.0)]
    );
}

#[test]
fn styles_match_across_backends() {
    let mut harness = harness();
    for antialias in [true, false] {
        harness.setup(antialias).unwrap();
        let vector = harness.backend("vector").unwrap();
        let raster = harness.backend("raster").unwrap();
        for variant in StrokeVariant::ALL {
            let a = vector.style(variant);
            let b = raster.style(variant);
            assert_eq!(a, b, "{}", variant.name());
            assert_eq!(a.width, variant.width());
            assert_eq!(a.antialias, antialias);
        }
    }
    assert!(harness.verify_equivalence().is_ok());
}

#[test]
fn setup_twice_equals_setup_once() {
    let mut once = harness();
    once.setup(false).unwrap();
    let mut twice = harness();
    twice.setup(false).unwrap();
    twice.setup(false).unwrap();

    for (a, b) in once.backends().iter().zip(twice.backends()) {
        for variant in StrokeVariant::ALL {
            assert_eq!(a.style(variant), b.style(variant));
        }
        assert_eq!(a.smoothing(), b.smoothing());
    }
}

#[test]
fn solid_thick_toggle_leaves_other_styles_alone() {
    let mut harness = harness();
    harness.setup(false).unwrap();
    for name in ["vector", "raster"] {
        let backend = harness.backend_mut(name).unwrap();
        backend.set_antialias(StrokeVariant::SolidThick, true).unwrap();
        backend.run(Operation::DrawLines(StrokeVariant::SolidThick));
        backend.set_antialias(StrokeVariant::SolidThick, false).unwrap();
        backend.run(Operation::DrawLines(StrokeVariant::SolidThick));
        for variant in StrokeVariant::ALL {
            assert!(!backend.style(variant).antialias, "{} {}", name, variant.name());
        }
    }
}

#[test]
fn clear_is_idempotent_on_every_backend() {
    let mut harness = harness();
    for name in ["vector", "raster"] {
        let clear = harness.entry(&format!("{}/clear", name)).unwrap();
        let draw = harness
            .entry(&format!("{}/draw_lines_dashed_thick", name))
            .unwrap();
        harness.run(clear);
        let once = harness.backend(name).unwrap().pixel_bytes().to_vec();
        harness.run(draw);
        harness.run(clear);
        harness.run(clear);
        assert_eq!(harness.backend(name).unwrap().pixel_bytes(), &once[..], "{}", name);
    }
}

/// Clear, then the dashed thin line, antialias off, on both backends
#[test]
fn dashed_thin_scenario() {
    let mut harness = harness();
    harness.setup(false).unwrap();

    for name in ["vector", "raster"] {
        harness.run(harness.entry(&format!("{}/clear", name)).unwrap());
        harness.run(
            harness
                .entry(&format!("{}/draw_lines_dashed_thin", name))
                .unwrap(),
        );

        let backend = harness.backend(name).unwrap();
        let style = backend.style(StrokeVariant::DashedThin);
        assert_eq!(style.width, 1.0);
        let dash = style.dash.unwrap();
        assert_eq!((dash.on, dash.off), (2.0, 6.0));
        assert_eq!(dash.period(), 8.0);

        let marks = diagonal(backend);
        let on = marks.iter().filter(|&&m| m).count();
        let runs = marks.windows(2).filter(|w| w[0] != w[1]).count();
        assert!(on > 0, "{}: no dashes", name);
        assert!(on < marks.len() / 2, "{}: {} of {} lit", name, on, marks.len());
        // 1024 diagonal pixels span ~1448 units, about 181 periods of 8
        assert!(runs > 100, "{}: only {} dash edges", name, runs);
    }
}

#[test]
fn pixel_offset_config_reaches_the_raster_backend() {
    let config = HarnessConfig::default().with_pixel_offset(PixelOffsetMode::Half);
    let mut harness = harness_with(config).unwrap();
    harness.setup(true).unwrap();
    assert_eq!(harness.config().pixel_offset, PixelOffsetMode::Half);
    assert!(harness.verify_equivalence().is_ok());
}
