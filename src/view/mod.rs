//! Canvas-independent view math
//!
//! Coordinate mapping, plot layout, and number formatting live here rather
//! than in the renderer so they stay testable. All screen positions are CSS
//! pixels; the renderer applies the device-pixel-ratio transform itself.

use glam::DVec2;

use crate::sim::MohrCircle;

/// Maps between math coordinates (origin at canvas center, y up) and
/// screen pixels (origin top-left, y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    /// Pixels per model unit
    pub scale: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, scale: f64) -> Self {
        Self {
            width,
            height,
            scale,
        }
    }

    pub fn math_to_screen(&self, point: DVec2) -> DVec2 {
        DVec2::new(
            self.width / 2.0 + point.x * self.scale,
            self.height / 2.0 - point.y * self.scale,
        )
    }

    pub fn screen_to_math(&self, point: DVec2) -> DVec2 {
        DVec2::new(
            (point.x - self.width / 2.0) / self.scale,
            (self.height / 2.0 - point.y) / self.scale,
        )
    }

    /// Largest model-unit span visible along the shorter canvas axis
    pub fn max_span_units(&self) -> f64 {
        self.width.min(self.height) / self.scale
    }
}

/// Layout for the Mohr's circle plot
///
/// The circle is scaled to fill the canvas minus padding; a degenerate
/// circle (radius below 1e-9) collapses to a fixed 6 px dot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MohrPlot {
    pub center: DVec2,
    /// Pixels per moment unit
    pub scale: f64,
    /// On-screen circle radius in pixels
    pub drawn_radius: f64,
    /// Moment value at the plot center (abscissa offset)
    center_value: f64,
}

impl MohrPlot {
    pub const PADDING: f64 = 28.0;

    pub fn layout(width: f64, height: f64, circle: &MohrCircle) -> Self {
        let available = (width.min(height) / 2.0 - Self::PADDING).max(10.0);
        let radius = circle.radius.abs();
        let degenerate = radius < 1e-9;
        let scale = if degenerate { available } else { available / radius };
        Self {
            center: DVec2::new(width / 2.0, height / 2.0),
            scale,
            drawn_radius: if degenerate { 6.0 } else { radius * scale },
            center_value: circle.center,
        }
    }

    /// Screen position of a point `(I, J)` on the circle
    pub fn project(&self, i_value: f64, j_value: f64) -> DVec2 {
        DVec2::new(
            self.center.x + (i_value - self.center_value) * self.scale,
            self.center.y - j_value * self.scale,
        )
    }
}

/// Screen geometry for the ramp race scene
///
/// Every participant gets its own lane: parallel ramps sharing the same
/// horizontal run, stacked vertically from `padding_y` down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RampLayout {
    pub start_x: f64,
    /// Ramp run in pixels
    pub dx: f64,
    /// Ramp drop in pixels
    pub dy: f64,
    /// Unit normal pointing away from the slope, toward the body center
    pub normal: DVec2,
    pub top_start_y: f64,
    pub row_spacing: f64,
}

impl RampLayout {
    pub const PADDING_X: f64 = 60.0;
    pub const PADDING_Y: f64 = 40.0;

    pub fn new(width: f64, height: f64, angle_radians: f64, lane_count: usize) -> Self {
        let ramp_px = (width - Self::PADDING_X * 2.0).min(width - 140.0).max(220.0);
        let dx = ramp_px * angle_radians.cos();
        let dy = ramp_px * angle_radians.sin();
        let len = dx.hypot(dy).max(1.0);
        let available = (height - Self::PADDING_Y * 2.0 - dy).max(0.0);
        Self {
            start_x: Self::PADDING_X,
            dx,
            dy,
            normal: DVec2::new(dy / len, -dx / len),
            top_start_y: Self::PADDING_Y,
            row_spacing: if lane_count > 1 {
                available / (lane_count - 1) as f64
            } else {
                0.0
            },
        }
    }

    /// Top of lane `index`
    pub fn lane_start(&self, index: usize) -> DVec2 {
        DVec2::new(self.start_x, self.top_start_y + self.row_spacing * index as f64)
    }

    /// Contact point a fraction of the way down lane `index`
    pub fn contact_point(&self, index: usize, fraction: f64) -> DVec2 {
        self.lane_start(index) + DVec2::new(self.dx, self.dy) * fraction
    }

    /// Body center: contact point lifted off the slope by the drawn radius
    pub fn body_center(&self, index: usize, fraction: f64, radius_px: f64) -> DVec2 {
        self.contact_point(index, fraction) + self.normal * radius_px
    }

    /// On-screen body radius for a physical radius in meters
    pub fn radius_px(radius_m: f64) -> f64 {
        (radius_m * 180.0).clamp(12.0, 28.0)
    }
}

/// Angle of the rolling-contact marker dot after `traveled` meters
///
/// The marker starts at the bottom of the body and sweeps through one full
/// turn per circumference, which is what sells the rolling illusion.
pub fn rolling_marker_angle(traveled: f64, radius_m: f64) -> f64 {
    (traveled / radius_m.max(0.01)) % std::f64::consts::TAU - std::f64::consts::FRAC_PI_2
}

/// Fixed-precision display string; em-dash for non-finite values
pub fn format_quantity(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return "\u{2014}".to_string();
    }
    // Snap float dust to zero so the table never shows "-0.000"
    let snapped = if value.abs() < 1e-6 { 0.0 } else { value };
    format!("{snapped:.digits$}")
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_viewport_round_trip() {
        let vp = Viewport::new(640.0, 480.0, 35.0);
        let p = DVec2::new(1.25, -2.5);
        let back = vp.screen_to_math(vp.math_to_screen(p));
        assert!((back - p).length() < EPSILON);
    }

    #[test]
    fn test_viewport_y_flip() {
        let vp = Viewport::new(640.0, 480.0, 65.0);
        let up = vp.math_to_screen(DVec2::new(0.0, 1.0));
        // Positive math y is above the canvas center
        assert!(up.y < 240.0);
        assert!((up.x - 320.0).abs() < EPSILON);
    }

    #[test]
    fn test_mohr_plot_centers_circle() {
        let circle = MohrCircle::from_moments(3.0, 1.0, 0.5);
        let plot = MohrPlot::layout(400.0, 300.0, &circle);
        assert_eq!(plot.center, DVec2::new(200.0, 150.0));
        // The circle center projects onto the canvas center
        let projected = plot.project(circle.center, 0.0);
        assert!((projected - plot.center).length() < EPSILON);
        // The principal points sit one drawn radius out horizontally
        let p_max = plot.project(circle.i_max, 0.0);
        assert!((p_max.x - (plot.center.x + plot.drawn_radius)).abs() < EPSILON);
    }

    #[test]
    fn test_mohr_plot_degenerate_dot() {
        let circle = MohrCircle::from_moments(2.0, 2.0, 0.0);
        let plot = MohrPlot::layout(400.0, 300.0, &circle);
        assert_eq!(plot.drawn_radius, 6.0);
    }

    #[test]
    fn test_ramp_layout_body_off_slope() {
        let layout = RampLayout::new(800.0, 500.0, 15f64.to_radians(), 3);
        let contact = layout.contact_point(1, 0.5);
        let center = layout.body_center(1, 0.5, 20.0);
        assert!((center.distance(contact) - 20.0).abs() < EPSILON);
        // The normal lifts the body up and off the downhill slope
        assert!(center.y < contact.y);
    }

    #[test]
    fn test_ramp_radius_px_clamps() {
        assert_eq!(RampLayout::radius_px(0.05), 12.0);
        assert_eq!(RampLayout::radius_px(0.12), 21.6);
        assert_eq!(RampLayout::radius_px(0.5), 28.0);
    }

    #[test]
    fn test_marker_angle_periodic() {
        let r = 0.12;
        let a = rolling_marker_angle(0.0, r);
        let b = rolling_marker_angle(std::f64::consts::TAU * r, r);
        assert!((a - b).abs() < EPSILON);
        assert!((a + std::f64::consts::FRAC_PI_2).abs() < EPSILON);
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(1.23456, 3), "1.235");
        assert_eq!(format_quantity(-3.4e-9, 3), "0.000");
        assert_eq!(format_quantity(f64::NAN, 3), "\u{2014}");
    }
}
