//! Tunable parameters and their valid ranges
//!
//! Every slider and numeric input on the page maps to a field here, so the
//! clamping the UI applies and the values the simulation sees come from one
//! place. A page can override the defaults by embedding a JSON blob.

use serde::{Deserialize, Serialize};

/// An inclusive numeric range with a default
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64, default: f64) -> Self {
        Self { min, max, default }
    }

    /// Clamp into the range; non-finite input falls to the minimum
    pub fn clamp(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return self.min;
        }
        value.clamp(self.min, self.max)
    }
}

/// All tunable parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Applied torque on the spin tab (N·m)
    pub moment: Range,
    /// Ramp length along the slope (m)
    pub ramp_length: Range,
    /// Ramp incline (degrees)
    pub ramp_angle: Range,
    /// Gravitational acceleration (m/s²)
    pub gravity: Range,
    /// Racer body radius (m)
    pub body_radius: Range,
    /// Racer body mass (kg)
    pub body_mass: Range,

    /// Pixel distance from the first vertex that closes a sketch
    pub close_gesture_px: f64,
    /// Pixels per model unit on the spin canvas
    pub spin_canvas_scale: f64,
    /// Pixels per model unit on the section canvas
    pub section_canvas_scale: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            moment: Range::new(-5.0, 5.0, 0.0),
            ramp_length: Range::new(1.0, 10.0, 3.0),
            ramp_angle: Range::new(5.0, 60.0, 15.0),
            gravity: Range::new(1.0, 25.0, 9.81),
            body_radius: Range::new(0.05, 0.16, 0.12),
            body_mass: Range::new(0.1, 50.0, 1.5),

            close_gesture_px: crate::consts::CLOSE_DISTANCE_PX,
            spin_canvas_scale: 65.0,
            section_canvas_scale: 35.0,
        }
    }
}

impl Tuning {
    /// Parse overrides from embedded JSON; unknown fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_snaps_to_range() {
        let r = Range::new(1.0, 10.0, 3.0);
        assert_eq!(r.clamp(5.0), 5.0);
        assert_eq!(r.clamp(0.0), 1.0);
        assert_eq!(r.clamp(99.0), 10.0);
    }

    #[test]
    fn test_clamp_rejects_non_finite() {
        let r = Range::new(1.0, 10.0, 3.0);
        assert_eq!(r.clamp(f64::NAN), 1.0);
        assert_eq!(r.clamp(f64::INFINITY), 1.0);
    }

    #[test]
    fn test_json_round_trip() {
        let tuning = Tuning::default();
        let json = tuning.to_json().unwrap();
        let back = Tuning::from_json(&json).unwrap();
        assert_eq!(tuning, back);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{"gravity":{"min":1.0,"max":25.0,"default":1.62}}"#)
            .unwrap();
        assert_eq!(tuning.gravity.default, 1.62);
        assert_eq!(tuning.ramp_length, Tuning::default().ramp_length);
    }
}
