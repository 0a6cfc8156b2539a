//! The geometry every operation draws

use crate::{
    error::{HarnessError, Result},
    types::LineSegment,
};

/// Immutable set of line segments shared by all backends
///
/// Built once, handed out behind an `Arc`, and never mutated. Backends turn
/// each segment into a native path at construction and read the endpoints
/// back so the harness can prove no backend draws different geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Fixture {
    segments: Vec<LineSegment>,
}

impl Fixture {
    /// The diagonal that runs corner to corner and past both edges
    pub const STANDARD_SEGMENT: LineSegment = LineSegment::new(-10.0, -10.0, 1200.0, 1200.0);

    pub fn standard() -> Self {
        Self {
            segments: vec![Self::STANDARD_SEGMENT],
        }
    }

    pub fn new(segments: Vec<LineSegment>) -> Result<Self> {
        if segments.is_empty() {
            return Err(HarnessError::InvariantViolation(
                "fixture has no segments".to_string(),
            ));
        }
        for (i, seg) in segments.iter().enumerate() {
            if !seg.is_finite() {
                return Err(HarnessError::InvariantViolation(format!(
                    "fixture segment {} has a non-finite coordinate: {:?}",
                    i, seg
                )));
            }
            if seg.length() == 0.0 {
                return Err(HarnessError::InvariantViolation(format!(
                    "fixture segment {} has zero length",
                    i
                )));
            }
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[LineSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn standard_fixture_is_one_diagonal() {
        let fixture = Fixture::standard();
        assert_eq!(fixture.len(), 1);
        assert_eq!(
            fixture.segments()[0],
            LineSegment::new(-10.0, -10.0, 1200.0, 1200.0)
        );
    }

    #[test]
    fn rejects_empty_fixture() {
        assert!(matches!(
            Fixture::new(Vec::new()),
            Err(HarnessError::InvariantViolation(_))
        ));
    }

    #[test]
    fn rejects_zero_length_segment() {
        let result = Fixture::new(vec![LineSegment::new(5.0, 5.0, 5.0, 5.0)]);
        assert!(matches!(result, Err(HarnessError::InvariantViolation(_))));
    }

    #[test]
    fn rejects_non_finite_segment() {
        let result = Fixture::new(vec![LineSegment::new(0.0, f32::INFINITY, 5.0, 5.0)]);
        assert!(matches!(result, Err(HarnessError::InvariantViolation(_))));
    }

    proptest! {
        #[test]
        fn accepts_any_finite_non_degenerate_segment(
            x0 in -2000.0f32..2000.0,
            y0 in -2000.0f32..2000.0,
            dx in 1.0f32..500.0,
            dy in -500.0f32..500.0,
        ) {
            let seg = LineSegment::new(x0, y0, x0 + dx, y0 + dy);
            let fixture = Fixture::new(vec![seg]).unwrap();
            prop_assert_eq!(fixture.segments(), &[seg][..]);
        }
    }
}
