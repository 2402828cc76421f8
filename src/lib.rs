//! Inertia Lab - interactive statics & dynamics explorer
//!
//! Core modules:
//! - `sim`: Deterministic computation (section properties, spin integration, rolling race)
//! - `view`: Presentation math (projection, plot layout, number formatting)
//! - `renderer`: Canvas2D painters (wasm only)
//! - `config`: Data-driven tuning (input ranges, defaults)

pub mod config;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod sim;
pub mod view;

pub use config::Tuning;

use glam::DVec2;

/// Shared numeric constants
pub mod consts {
    /// A completed polygon is degenerate below this absolute area
    pub const AREA_EPSILON: f64 = 1e-8;
    /// A spin inertia at or below this is treated as "not ready"
    pub const INERTIA_EPSILON: f64 = 1e-9;
    /// Longest time step fed to the spin integrator (seconds)
    pub const MAX_TIME_STEP: f64 = 0.05;
    /// Angular velocity safety cap (rad/s)
    pub const MAX_ANGULAR_SPEED: f64 = 60.0;
    /// Clicks this close to the first vertex (screen px) close the polygon
    pub const CLOSE_DISTANCE_PX: f64 = 12.0;
    /// A race needs at least this many valid participants
    pub const MIN_RACERS: usize = 2;
}

/// Rotate a point about the origin by `angle` radians (CCW positive)
#[inline]
pub fn rotate_point(point: DVec2, angle: f64) -> DVec2 {
    let (sin, cos) = angle.sin_cos();
    DVec2::new(
        point.x * cos - point.y * sin,
        point.x * sin + point.y * cos,
    )
}
