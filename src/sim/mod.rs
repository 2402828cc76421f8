//! Simulation core
//!
//! Everything in this module is pure and deterministic: geometry over
//! `f64` vectors, closed-form kinematics, and explicit time stepping.
//! No rendering or platform dependencies live here, which keeps the
//! whole layer unit-testable off the browser.

pub mod clock;
pub mod geometry;
pub mod race;
pub mod rotation;
pub mod sketch;

pub use clock::FrameClock;
pub use geometry::{MohrCircle, SectionProperties};
pub use race::{BodyKind, Participant, Race, RaceMetrics, RampConfig};
pub use rotation::Spin;
pub use sketch::{AddOutcome, Sketch, SketchError, SketchPhase};
