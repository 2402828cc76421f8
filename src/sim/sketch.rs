//! Polygon sketching lifecycle
//!
//! A `Sketch` collects clicked vertices while open, then freezes into a
//! completed polygon with computed section properties. Completing a shape
//! normalizes its winding first, so the user can draw in either direction.

use glam::DVec2;
use thiserror::Error;

use super::geometry::{self, SectionProperties};
use super::rotation::Spin;

/// Why a completion attempt was refused; all recoverable, the sketch stays open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SketchError {
    #[error("the shape is already closed")]
    AlreadyClosed,
    #[error("a polygon needs at least three vertices")]
    TooFewVertices,
    #[error("the shape needs a non-zero area")]
    DegenerateShape,
}

/// Sketch lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SketchPhase {
    /// Accepting vertices
    #[default]
    Open,
    /// Metrics computed, immutable until reset
    Closed,
}

/// What became of an `add_vertex` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// Vertex appended
    Added,
    /// Click landed on the first vertex: the caller should `complete()`
    CloseGesture,
    /// Sketch is closed; input dropped
    Ignored,
}

/// One drawable polygon: vertices, phase, metrics, and its spin state
#[derive(Debug, Clone, Default)]
pub struct Sketch {
    vertices: Vec<DVec2>,
    phase: SketchPhase,
    metrics: Option<SectionProperties>,
    /// Rotation state driven by the spin integrator; zeroed on reset
    pub spin: Spin,
}

impl Sketch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertices(&self) -> &[DVec2] {
        &self.vertices
    }

    pub fn metrics(&self) -> Option<&SectionProperties> {
        self.metrics.as_ref()
    }

    pub fn phase(&self) -> SketchPhase {
        self.phase
    }

    pub fn is_closed(&self) -> bool {
        self.phase == SketchPhase::Closed
    }

    /// True once `complete()` could produce a usable polygon
    pub fn can_complete(&self) -> bool {
        self.phase == SketchPhase::Open && self.vertices.len() >= 3
    }

    /// Append a vertex, or detect the close-the-loop gesture
    ///
    /// `close_tolerance` is the gesture radius in model units (the caller
    /// converts its pixel threshold through the view scale). A click within
    /// that distance of the first vertex, once three or more exist, asks
    /// for completion instead of adding a near-duplicate point.
    pub fn add_vertex(&mut self, point: DVec2, close_tolerance: f64) -> AddOutcome {
        if self.phase == SketchPhase::Closed {
            return AddOutcome::Ignored;
        }

        if self.vertices.len() >= 3 {
            let first = self.vertices[0];
            if (point - first).length() <= close_tolerance {
                return AddOutcome::CloseGesture;
            }
        }

        self.vertices.push(point);
        AddOutcome::Added
    }

    /// Close the polygon and compute its section properties
    ///
    /// On failure the sketch stays open with its vertices intact so the
    /// user can adjust and retry.
    pub fn complete(&mut self) -> Result<&SectionProperties, SketchError> {
        if self.phase == SketchPhase::Closed {
            return Err(SketchError::AlreadyClosed);
        }
        if self.vertices.len() < 3 {
            return Err(SketchError::TooFewVertices);
        }

        geometry::ensure_ccw(&mut self.vertices);
        let Some(props) = geometry::section_properties(&self.vertices) else {
            log::warn!("completion rejected: polygon encloses no area");
            return Err(SketchError::DegenerateShape);
        };

        self.metrics = Some(props);
        self.phase = SketchPhase::Closed;
        self.spin.reset();
        Ok(self.metrics.as_ref().unwrap())
    }

    /// Discard everything and return to an empty open sketch
    pub fn reset(&mut self) {
        self.vertices.clear();
        self.metrics = None;
        self.phase = SketchPhase::Open;
        self.spin.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw_square(sketch: &mut Sketch) {
        sketch.add_vertex(DVec2::new(0.0, 0.0), 0.1);
        sketch.add_vertex(DVec2::new(1.0, 0.0), 0.1);
        sketch.add_vertex(DVec2::new(1.0, 1.0), 0.1);
        sketch.add_vertex(DVec2::new(0.0, 1.0), 0.1);
    }

    #[test]
    fn test_lifecycle_open_closed_reset() {
        let mut sketch = Sketch::new();
        assert!(!sketch.can_complete());

        draw_square(&mut sketch);
        assert!(sketch.can_complete());

        let props = sketch.complete().unwrap();
        assert!((props.area - 1.0).abs() < 1e-9);
        assert!(sketch.is_closed());

        // Closed shapes drop further input
        assert_eq!(
            sketch.add_vertex(DVec2::new(5.0, 5.0), 0.1),
            AddOutcome::Ignored
        );
        assert_eq!(sketch.complete(), Err(SketchError::AlreadyClosed));

        sketch.reset();
        assert_eq!(sketch.phase(), SketchPhase::Open);
        assert!(sketch.vertices().is_empty());
        assert!(sketch.metrics().is_none());
    }

    #[test]
    fn test_close_gesture_near_first_vertex() {
        let mut sketch = Sketch::new();
        draw_square(&mut sketch);

        // Within tolerance of vertex 0: gesture, nothing appended
        let outcome = sketch.add_vertex(DVec2::new(0.05, 0.0), 0.1);
        assert_eq!(outcome, AddOutcome::CloseGesture);
        assert_eq!(sketch.vertices().len(), 4);

        // Outside tolerance: plain append
        let outcome = sketch.add_vertex(DVec2::new(0.5, 0.5), 0.1);
        assert_eq!(outcome, AddOutcome::Added);
        assert_eq!(sketch.vertices().len(), 5);
    }

    #[test]
    fn test_no_gesture_below_three_vertices() {
        let mut sketch = Sketch::new();
        sketch.add_vertex(DVec2::new(0.0, 0.0), 0.1);
        sketch.add_vertex(DVec2::new(1.0, 0.0), 0.1);
        // Clicking back on the first point with only two vertices just adds
        assert_eq!(
            sketch.add_vertex(DVec2::new(0.0, 0.0), 0.1),
            AddOutcome::Added
        );
    }

    #[test]
    fn test_too_few_vertices() {
        let mut sketch = Sketch::new();
        sketch.add_vertex(DVec2::ZERO, 0.1);
        sketch.add_vertex(DVec2::X, 0.1);
        assert_eq!(sketch.complete(), Err(SketchError::TooFewVertices));
        assert_eq!(sketch.phase(), SketchPhase::Open);
    }

    #[test]
    fn test_degenerate_completion_stays_open() {
        let mut sketch = Sketch::new();
        sketch.add_vertex(DVec2::new(0.0, 0.0), 0.01);
        sketch.add_vertex(DVec2::new(1.0, 1.0), 0.01);
        sketch.add_vertex(DVec2::new(2.0, 2.0), 0.01);

        assert_eq!(sketch.complete(), Err(SketchError::DegenerateShape));
        assert_eq!(sketch.phase(), SketchPhase::Open);
        assert_eq!(sketch.vertices().len(), 3);
        assert!(sketch.metrics().is_none());
    }

    #[test]
    fn test_clockwise_input_normalized() {
        let mut sketch = Sketch::new();
        // Clockwise square
        sketch.add_vertex(DVec2::new(0.0, 0.0), 0.1);
        sketch.add_vertex(DVec2::new(0.0, 1.0), 0.1);
        sketch.add_vertex(DVec2::new(1.0, 1.0), 0.1);
        sketch.add_vertex(DVec2::new(1.0, 0.0), 0.1);

        let props = *sketch.complete().unwrap();
        assert!(props.area > 0.0);
        assert!((props.centroid.x - 0.5).abs() < 1e-9);
        assert!((props.centroid.y - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_reset_zeroes_spin() {
        let mut sketch = Sketch::new();
        draw_square(&mut sketch);
        sketch.complete().unwrap();
        sketch.spin.omega = 4.0;
        sketch.spin.angle = 1.0;

        sketch.reset();
        assert_eq!(sketch.spin.omega, 0.0);
        assert_eq!(sketch.spin.angle, 0.0);
    }
}
