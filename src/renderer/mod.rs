//! Canvas 2D rendering
//!
//! Each canvas on the page gets a painter that draws one scene from pure
//! simulation state. Painters never mutate state; the app layer decides when
//! to redraw. All drawing happens in CSS pixels with the device-pixel-ratio
//! baked into the context transform by [`fit_canvas`].

pub mod mohr;
pub mod race_scene;
pub mod shape_canvas;

pub use mohr::draw_mohr_plot;
pub use race_scene::draw_race_scene;
pub use shape_canvas::ShapePainter;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Participant lane colors, reused in order
pub const COLOR_PALETTE: [&str; 6] = [
    "#2563eb", "#dc2626", "#059669", "#d97706", "#7c3aed", "#0891b2",
];

/// Resize the backing store to the element's CSS size times the device
/// pixel ratio and return the CSS-pixel dimensions
///
/// Returns `None` while the element is not laid out yet (zero rect).
pub fn fit_canvas(canvas: &HtmlCanvasElement, ctx: &CanvasRenderingContext2d) -> Option<(f64, f64)> {
    let window = web_sys::window()?;
    let rect = canvas.get_bounding_client_rect();
    if rect.width() == 0.0 || rect.height() == 0.0 {
        return None;
    }
    let dpr = window.device_pixel_ratio().max(1.0);
    canvas.set_width((rect.width() * dpr).round() as u32);
    canvas.set_height((rect.height() * dpr).round() as u32);
    let _ = ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
    Some((rect.width(), rect.height()))
}

/// The 2d context for a canvas element
pub fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|obj| obj.dyn_into().ok())
}

/// Whether the page prefers a dark color scheme
pub fn prefers_dark() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok())
        .flatten()
        .map(|m| m.matches())
        .unwrap_or(false)
}
