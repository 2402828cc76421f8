//! Ramp race scene
//!
//! One lane per participant: parallel ramps with start and finish posts,
//! each body drawn at its current fraction of the way down. Hoops render as
//! thick rings so their inertia is visible at a glance; a contact marker
//! dot rolls around each body as it travels.

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use crate::sim::race::{fraction_along_ramp, BodyKind, Race, RaceMetrics};
use crate::view::{rolling_marker_angle, RampLayout};

use super::COLOR_PALETTE;

pub fn draw_race_scene(
    ctx: &CanvasRenderingContext2d,
    width: f64,
    height: f64,
    race: &Race,
    standings: &[RaceMetrics],
    elapsed: f64,
) {
    ctx.clear_rect(0.0, 0.0, width, height);
    ctx.set_fill_style_str("#f8fafc");
    ctx.fill_rect(0.0, 0.0, width, height);

    let layout = RampLayout::new(width, height, race.ramp.angle_radians(), standings.len());

    if standings.is_empty() {
        ctx.set_font("14px \"Segoe UI\", Tahoma, sans-serif");
        ctx.set_fill_style_str("#1f2937");
        let _ = ctx.fill_text(
            "Add objects to see the race animation.",
            layout.start_x,
            (height / 2.0 - 20.0).max(40.0),
        );
        return;
    }

    for (lane, metrics) in standings.iter().enumerate() {
        let Some(participant) = race.participant(metrics.participant_id) else {
            continue;
        };
        let palette_index = race
            .participants
            .iter()
            .position(|p| p.id == participant.id)
            .unwrap_or(lane);
        let color = COLOR_PALETTE[palette_index % COLOR_PALETTE.len()];

        let frac = fraction_along_ramp(metrics.acceleration, elapsed, race.ramp.length);
        let radius_px = RampLayout::radius_px(participant.radius);
        let lane_start = layout.lane_start(lane);
        let lane_end = lane_start + glam::DVec2::new(layout.dx, layout.dy);
        let center = layout.body_center(lane, frac, radius_px);

        // Lane with start and finish posts
        ctx.set_stroke_style_str("#cbd5f5");
        ctx.set_line_width(4.0);
        ctx.begin_path();
        ctx.move_to(lane_start.x, lane_start.y);
        ctx.line_to(lane_end.x, lane_end.y);
        ctx.stroke();

        ctx.set_line_width(2.0);
        ctx.set_stroke_style_str("#94a3b8");
        for post in [lane_start, lane_end] {
            ctx.begin_path();
            ctx.move_to(post.x, post.y);
            ctx.line_to(post.x, post.y - 24.0);
            ctx.stroke();
        }

        if participant.kind == BodyKind::HollowCylinder {
            let ring_width = (radius_px * 0.35).max(6.0);
            let ring_radius = (radius_px - ring_width / 2.0).max(4.0);

            ctx.set_line_width(ring_width);
            ctx.set_stroke_style_str(color);
            ctx.begin_path();
            let _ = ctx.arc(center.x, center.y, ring_radius, 0.0, TAU);
            ctx.stroke();

            ctx.set_line_width(1.5);
            ctx.set_stroke_style_str("#1f2937");
            ctx.begin_path();
            let _ = ctx.arc(center.x, center.y, ring_radius + ring_width / 2.0, 0.0, TAU);
            ctx.stroke();
        } else {
            ctx.begin_path();
            ctx.set_fill_style_str(color);
            ctx.set_stroke_style_str("#1f2937");
            ctx.set_line_width(1.5);
            let _ = ctx.arc(center.x, center.y, radius_px, 0.0, TAU);
            ctx.fill();
            ctx.stroke();
        }

        // Rolling contact marker
        let traveled = race.ramp.length * frac;
        let dot_angle = rolling_marker_angle(traveled, participant.radius);
        let dot_distance = radius_px * 0.65;
        let dot_radius = (radius_px * 0.18).max(3.0);
        let dot_x = center.x + dot_angle.cos() * dot_distance;
        let dot_y = center.y + dot_angle.sin() * dot_distance;

        ctx.begin_path();
        ctx.set_fill_style_str("#f8fafc");
        ctx.set_stroke_style_str("#1f2937");
        ctx.set_line_width(1.0);
        let _ = ctx.arc(dot_x, dot_y, dot_radius, 0.0, TAU);
        ctx.fill();
        ctx.stroke();

        ctx.set_fill_style_str("#1f2937");
        ctx.set_font("12px \"Segoe UI\", Tahoma, sans-serif");
        let _ = ctx.fill_text(&participant.name, center.x + radius_px + 8.0, center.y + 4.0);
    }

    ctx.set_fill_style_str("#475569");
    ctx.set_font("12px \"Segoe UI\", Tahoma, sans-serif");
    let _ = ctx.fill_text("Start", layout.start_x - 30.0, layout.top_start_y - 28.0);
    let finish = layout.contact_point(standings.len() - 1, 1.0);
    let _ = ctx.fill_text("Finish", finish.x - 10.0, finish.y + 36.0);
}
