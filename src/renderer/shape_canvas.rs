//! Polygon sketch canvas
//!
//! Draws the grid, axes, sketched polygon, and the spin-tab overlays
//! (centroid cross, applied-moment arc, rotated axes). Shared by the
//! section and spin tabs, which differ only in which overlays they ask for.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use glam::DVec2;
use web_sys::CanvasRenderingContext2d;

use crate::view::Viewport;

/// Paints one sketch canvas from polygon state
pub struct ShapePainter {
    ctx: CanvasRenderingContext2d,
    pub viewport: Viewport,
}

impl ShapePainter {
    pub fn new(ctx: CanvasRenderingContext2d, viewport: Viewport) -> Self {
        Self { ctx, viewport }
    }

    pub fn clear(&self) {
        self.ctx
            .clear_rect(0.0, 0.0, self.viewport.width, self.viewport.height);
    }

    /// Dashed unit grid, skipping the axis lines themselves
    pub fn draw_grid(&self) {
        let ctx = &self.ctx;
        ctx.save();
        ctx.set_stroke_style_str("#e2e8f0");
        ctx.set_line_width(1.0);
        let dash = js_sys::Array::of2(&2.0.into(), &4.0.into());
        let _ = ctx.set_line_dash(&dash);

        let max_x = ((self.viewport.width / 2.0) / self.viewport.scale).ceil() as i32;
        let max_y = ((self.viewport.height / 2.0) / self.viewport.scale).ceil() as i32;

        for i in -max_x..=max_x {
            if i == 0 {
                continue;
            }
            let screen = self.viewport.math_to_screen(DVec2::new(i as f64, 0.0));
            ctx.begin_path();
            ctx.move_to(screen.x, 0.0);
            ctx.line_to(screen.x, self.viewport.height);
            ctx.stroke();
        }
        for j in -max_y..=max_y {
            if j == 0 {
                continue;
            }
            let screen = self.viewport.math_to_screen(DVec2::new(0.0, j as f64));
            ctx.begin_path();
            ctx.move_to(0.0, screen.y);
            ctx.line_to(self.viewport.width, screen.y);
            ctx.stroke();
        }
        ctx.restore();
    }

    pub fn draw_axes(&self) {
        let ctx = &self.ctx;
        let origin = self.viewport.math_to_screen(DVec2::ZERO);
        ctx.save();
        ctx.set_stroke_style_str("#94a3b8");
        ctx.set_line_width(1.4);
        ctx.begin_path();
        ctx.move_to(0.0, origin.y);
        ctx.line_to(self.viewport.width, origin.y);
        ctx.move_to(origin.x, 0.0);
        ctx.line_to(origin.x, self.viewport.height);
        ctx.stroke();

        ctx.set_fill_style_str("#1f2937");
        ctx.set_font("12px Segoe UI");
        let _ = ctx.fill_text("x", self.viewport.width - 14.0, origin.y - 6.0);
        let _ = ctx.fill_text("y", origin.x + 6.0, 14.0);
        ctx.restore();
    }

    /// The polygon outline; closed shapes are filled, and `highlight`
    /// switches to the red at-speed-limit palette
    pub fn draw_polygon(&self, vertices: &[DVec2], closed: bool, highlight: bool) {
        if vertices.is_empty() {
            return;
        }
        let ctx = &self.ctx;
        ctx.save();
        ctx.set_line_width(2.0);
        ctx.set_stroke_style_str(if highlight { "#dc2626" } else { "#2563eb" });
        ctx.set_fill_style_str(if closed {
            if highlight {
                "rgba(220, 38, 38, 0.25)"
            } else {
                "rgba(37, 99, 235, 0.18)"
            }
        } else {
            "transparent"
        });

        let first = self.viewport.math_to_screen(vertices[0]);
        ctx.begin_path();
        ctx.move_to(first.x, first.y);
        for vertex in &vertices[1..] {
            let screen = self.viewport.math_to_screen(*vertex);
            ctx.line_to(screen.x, screen.y);
        }
        if closed {
            ctx.close_path();
            ctx.fill();
        }
        ctx.stroke();
        ctx.restore();
    }

    pub fn draw_vertices(&self, vertices: &[DVec2], highlight: bool) {
        let ctx = &self.ctx;
        ctx.save();
        ctx.set_fill_style_str(if highlight { "#b91c1c" } else { "#1d4ed8" });
        for vertex in vertices {
            let screen = self.viewport.math_to_screen(*vertex);
            ctx.begin_path();
            let _ = ctx.arc(screen.x, screen.y, 4.0, 0.0, TAU);
            ctx.fill();
        }
        ctx.restore();
    }

    /// Dashed preview edges from the last vertex (and back to the first)
    /// toward the mouse position
    pub fn draw_hover_preview(&self, vertices: &[DVec2], hover: DVec2) {
        let Some(last) = vertices.last() else {
            return;
        };
        let ctx = &self.ctx;
        ctx.save();
        ctx.set_stroke_style_str("#1d4ed8");
        let dash = js_sys::Array::of2(&6.0.into(), &4.0.into());
        let _ = ctx.set_line_dash(&dash);
        ctx.set_line_width(1.5);

        let last_screen = self.viewport.math_to_screen(*last);
        let hover_screen = self.viewport.math_to_screen(hover);
        ctx.begin_path();
        ctx.move_to(last_screen.x, last_screen.y);
        ctx.line_to(hover_screen.x, hover_screen.y);
        ctx.stroke();

        if vertices.len() >= 2 {
            let first = self.viewport.math_to_screen(vertices[0]);
            ctx.begin_path();
            ctx.move_to(hover_screen.x, hover_screen.y);
            ctx.line_to(first.x, first.y);
            ctx.stroke();
        }
        ctx.restore();
    }

    /// Cross marker labelled `C` at the (rotated) centroid
    pub fn draw_centroid_marker(&self, centroid: DVec2) {
        let ctx = &self.ctx;
        let center = self.viewport.math_to_screen(centroid);
        ctx.save();
        ctx.set_stroke_style_str("#0f172a");
        ctx.set_line_width(1.5);
        let size = 10.0;
        ctx.begin_path();
        ctx.move_to(center.x - size, center.y);
        ctx.line_to(center.x + size, center.y);
        ctx.move_to(center.x, center.y - size);
        ctx.line_to(center.x, center.y + size);
        ctx.stroke();
        ctx.set_fill_style_str("#0f172a");
        ctx.set_font("13px Segoe UI");
        let _ = ctx.fill_text("C", center.x + 6.0, center.y - 6.0);
        ctx.restore();
    }

    /// Curved arrow around the origin whose sweep grows with the applied
    /// torque; CCW for positive moments
    pub fn draw_moment_indicator(&self, moment: f64, moment_limit: f64) {
        if moment == 0.0 {
            return;
        }
        let ctx = &self.ctx;
        let center = self.viewport.math_to_screen(DVec2::ZERO);
        let radius = self.viewport.width.min(self.viewport.height) * 0.18;
        let ccw = moment >= 0.0;
        // Canvas angles run clockwise (y down), so a CCW moment sweeps negative
        let direction = if ccw { -1.0 } else { 1.0 };
        let magnitude_ratio = (moment.abs() / moment_limit).min(1.0);
        let sweep = PI / 3.0 + magnitude_ratio * PI * 0.9;
        let start_angle = -FRAC_PI_2;
        let end_angle = start_angle + direction * sweep;

        ctx.save();
        ctx.set_stroke_style_str("#f59e0b");
        ctx.set_line_width(2.3);
        ctx.begin_path();
        let _ = ctx.arc_with_anticlockwise(center.x, center.y, radius, start_angle, end_angle, direction < 0.0);
        ctx.stroke();

        let tip_x = center.x + radius * end_angle.cos();
        let tip_y = center.y + radius * end_angle.sin();
        let head_size = 12.0;
        let tangent = end_angle + direction * FRAC_PI_2;

        ctx.begin_path();
        ctx.move_to(tip_x, tip_y);
        ctx.line_to(
            tip_x - head_size * (tangent - PI / 6.0).cos(),
            tip_y - head_size * (tangent - PI / 6.0).sin(),
        );
        ctx.move_to(tip_x, tip_y);
        ctx.line_to(
            tip_x - head_size * (tangent + PI / 6.0).cos(),
            tip_y - head_size * (tangent + PI / 6.0).sin(),
        );
        ctx.stroke();

        ctx.set_fill_style_str("#b45309");
        ctx.set_font("12px Segoe UI");
        let _ = ctx.fill_text(
            if ccw { "CCW" } else { "CW" },
            center.x + radius + 8.0,
            center.y - 6.0,
        );
        ctx.restore();
    }

    /// Rotated x'/y' axes through `origin`, each with an arrowhead
    pub fn draw_rotated_axes(&self, origin: DVec2, theta: f64) {
        let (sin_theta, cos_theta) = theta.sin_cos();
        let max_span = self.viewport.max_span_units();
        let length = (max_span / 2.0).clamp(1.5, 4.0);

        self.draw_axis_with_arrow(origin, DVec2::new(cos_theta, sin_theta), length, "x'", "#0ea5e9");
        self.draw_axis_with_arrow(origin, DVec2::new(-sin_theta, cos_theta), length, "y'", "#f97316");
    }

    fn draw_axis_with_arrow(
        &self,
        origin: DVec2,
        direction: DVec2,
        length_units: f64,
        label: &str,
        color: &str,
    ) {
        let unit = direction.normalize_or(DVec2::X);
        let negative = self.viewport.math_to_screen(origin - unit * length_units);
        let positive = self.viewport.math_to_screen(origin + unit * length_units);

        let ctx = &self.ctx;
        ctx.save();
        ctx.set_stroke_style_str(color);
        ctx.set_fill_style_str(color);
        ctx.set_line_width(1.6);
        ctx.begin_path();
        ctx.move_to(negative.x, negative.y);
        ctx.line_to(positive.x, positive.y);
        ctx.stroke();

        let angle = (positive.y - negative.y).atan2(positive.x - negative.x);
        let arrow = 9.0;
        ctx.begin_path();
        ctx.move_to(positive.x, positive.y);
        ctx.line_to(
            positive.x - arrow * (angle - PI / 8.0).cos(),
            positive.y - arrow * (angle - PI / 8.0).sin(),
        );
        ctx.line_to(
            positive.x - arrow * (angle + PI / 8.0).cos(),
            positive.y - arrow * (angle + PI / 8.0).sin(),
        );
        ctx.close_path();
        ctx.fill();

        ctx.set_font("13px Segoe UI");
        let _ = ctx.fill_text(label, positive.x + 6.0, positive.y - 6.0);
        ctx.restore();
    }

    /// Green dot marking the parallel-axis reference point
    pub fn draw_reference_point(&self, point: DVec2) {
        let ctx = &self.ctx;
        let screen = self.viewport.math_to_screen(point);
        ctx.save();
        ctx.set_fill_style_str("#10b981");
        ctx.begin_path();
        let _ = ctx.arc(screen.x, screen.y, 5.0, 0.0, TAU);
        ctx.fill();
        ctx.set_font("14px Segoe UI");
        let _ = ctx.fill_text("Ref", screen.x + 6.0, screen.y - 6.0);
        ctx.restore();
    }
}
