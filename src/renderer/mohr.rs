//! Mohr's circle plot

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use crate::sim::MohrCircle;
use crate::view::{MohrPlot, format_quantity};

use super::prefers_dark;

/// Everything the plot displays beyond the circle itself
pub struct MohrPlotData {
    pub circle: MohrCircle,
    /// Moments about the reference axes
    pub ix_ref: f64,
    pub iy_ref: f64,
    pub ixy_ref: f64,
    /// Moments about the rotated axes
    pub ix_rot: f64,
    pub ixy_rot: f64,
}

/// "Awaiting polygon" placeholder while no shape is closed
pub fn draw_mohr_placeholder(ctx: &CanvasRenderingContext2d, width: f64, height: f64) {
    ctx.clear_rect(0.0, 0.0, width, height);
    ctx.save();
    ctx.set_fill_style_str("#9ca3af");
    ctx.set_font("13px Segoe UI");
    ctx.set_text_align("center");
    let _ = ctx.fill_text("Awaiting polygon...", width / 2.0, height / 2.0);
    ctx.restore();
}

pub fn draw_mohr_plot(
    ctx: &CanvasRenderingContext2d,
    width: f64,
    height: f64,
    data: &MohrPlotData,
) {
    ctx.clear_rect(0.0, 0.0, width, height);

    let plot = MohrPlot::layout(width, height, &data.circle);
    let dark = prefers_dark();
    let axis_color = if dark { "#475569" } else { "#d1d5db" };
    let connector_color = if dark { "#64748b" } else { "#9ca3af" };
    let axis_text_color = if dark { "#cbd5f5" } else { "#4b5563" };
    let padding = MohrPlot::PADDING;

    // I / Ixy axes through the plot center
    ctx.save();
    ctx.set_stroke_style_str(axis_color);
    ctx.set_line_width(1.0);
    ctx.begin_path();
    ctx.move_to(padding / 2.0, plot.center.y);
    ctx.line_to(width - padding / 2.0, plot.center.y);
    ctx.stroke();
    ctx.begin_path();
    ctx.move_to(plot.center.x, padding / 2.0);
    ctx.line_to(plot.center.x, height - padding / 2.0);
    ctx.stroke();
    ctx.restore();

    // The circle
    ctx.save();
    ctx.set_stroke_style_str("#2563eb");
    ctx.set_line_width(1.8);
    ctx.begin_path();
    let _ = ctx.arc(plot.center.x, plot.center.y, plot.drawn_radius, 0.0, TAU);
    ctx.stroke();
    ctx.restore();

    // Ixy is plotted with the sign convention that puts (Ix, -Ixy) and
    // (Iy, +Ixy) at opposite ends of a diameter
    let point_x = plot.project(data.ix_ref, -data.ixy_ref);
    let point_y = plot.project(data.iy_ref, data.ixy_ref);
    let point_rot = plot.project(data.ix_rot, -data.ixy_rot);
    let principal_max = plot.project(data.circle.i_max, 0.0);
    let principal_min = plot.project(data.circle.i_min, 0.0);

    ctx.save();
    ctx.set_stroke_style_str(connector_color);
    ctx.set_line_width(1.0);
    ctx.begin_path();
    ctx.move_to(point_x.x, point_x.y);
    ctx.line_to(point_y.x, point_y.y);
    ctx.stroke();
    ctx.restore();

    ctx.save();
    ctx.set_stroke_style_str("#10b981");
    ctx.set_line_width(1.0);
    ctx.begin_path();
    ctx.move_to(plot.center.x, plot.center.y);
    ctx.line_to(point_rot.x, point_rot.y);
    ctx.stroke();
    ctx.restore();

    draw_point(ctx, point_x, "#f87171", "Ix", -8.0);
    draw_point(ctx, point_y, "#3b82f6", "Iy", 14.0);
    draw_point(ctx, point_rot, "#10b981", "Ix'", -8.0);
    draw_point(ctx, principal_max, "#facc15", "I1", -10.0);
    draw_point(ctx, principal_min, "#facc15", "I2", 14.0);

    ctx.save();
    ctx.set_fill_style_str(axis_text_color);
    ctx.set_font("11px Segoe UI");
    let _ = ctx.fill_text(
        &format!("Center = {}", format_quantity(data.circle.center, 3)),
        plot.center.x + 8.0,
        plot.center.y + 16.0,
    );
    let _ = ctx.fill_text(
        &format!("Radius = {}", format_quantity(data.circle.radius, 3)),
        plot.center.x + 8.0,
        plot.center.y + 30.0,
    );
    ctx.restore();
}

fn draw_point(
    ctx: &CanvasRenderingContext2d,
    pos: glam::DVec2,
    color: &str,
    label: &str,
    offset_y: f64,
) {
    if !pos.x.is_finite() || !pos.y.is_finite() {
        return;
    }
    ctx.save();
    ctx.set_fill_style_str(color);
    ctx.begin_path();
    let _ = ctx.arc(pos.x, pos.y, 4.0, 0.0, TAU);
    ctx.fill();
    ctx.set_font("12px Segoe UI");
    let _ = ctx.fill_text(label, pos.x + 6.0, pos.y + offset_y);
    ctx.restore();
}
