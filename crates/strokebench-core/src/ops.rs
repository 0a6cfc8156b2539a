//! The operation set: what gets timed
//!
//! Each operation is written once, against [`BackendSurface`], and sees only
//! the surface, the prepared geometry and the style for its variant. No
//! harness state reaches in here.

use crate::{
    backend::StyleSet,
    traits::BackendSurface,
    types::StrokeVariant,
    Color,
};

/// One logically equivalent drawing action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Clear,
    DrawLines(StrokeVariant),
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::Clear,
        Operation::DrawLines(StrokeVariant::SolidThick),
        Operation::DrawLines(StrokeVariant::SolidThin),
        Operation::DrawLines(StrokeVariant::DashedThick),
        Operation::DrawLines(StrokeVariant::DashedThin),
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::Clear => "clear",
            Operation::DrawLines(StrokeVariant::SolidThick) => "draw_lines_solid_thick",
            Operation::DrawLines(StrokeVariant::SolidThin) => "draw_lines_solid_thin",
            Operation::DrawLines(StrokeVariant::DashedThick) => "draw_lines_dashed_thick",
            Operation::DrawLines(StrokeVariant::DashedThin) => "draw_lines_dashed_thin",
        }
    }

    pub fn from_name(name: &str) -> Option<Operation> {
        Self::ALL.into_iter().find(|op| op.name() == name)
    }
}

/// Execute `operation` on one surface
pub fn run<S: BackendSurface>(
    operation: Operation,
    surface: &mut S,
    styles: &StyleSet<S::Style>,
    geometry: &[S::Geometry],
    background: Color,
) {
    match operation {
        Operation::Clear => clear(surface, background),
        Operation::DrawLines(variant) => draw_lines(surface, styles.get(variant), geometry),
    }
}

#[inline]
pub fn clear<S: BackendSurface>(surface: &mut S, background: Color) {
    surface.clear(background);
}

#[inline]
pub fn draw_lines<S: BackendSurface>(surface: &mut S, style: &S::Style, geometry: &[S::Geometry]) {
    for segment in geometry {
        surface.stroke_line(segment, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_operations_with_unique_names() {
        let names: Vec<_> = Operation::ALL.iter().map(|op| op.name()).collect();
        assert_eq!(names.len(), 5);
        for (i, a) in names.iter().enumerate() {
            for b in &names[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn names_round_trip() {
        for op in Operation::ALL {
            assert_eq!(Operation::from_name(op.name()), Some(op));
        }
        assert_eq!(Operation::from_name("draw_circles"), None);
    }

    #[test]
    fn every_variant_has_a_draw_operation() {
        for variant in StrokeVariant::ALL {
            assert!(Operation::ALL.contains(&Operation::DrawLines(variant)));
        }
    }
}
