//! Section property kernel for simple polygons
//!
//! Signed area, centroid, and second moments of area come from the
//! Green's-theorem edge summation (the shoelace family of formulas).
//! Moments are shifted to centroidal axes via the parallel-axis theorem,
//! and the rotation transform / Mohr's circle give the moments about any
//! rotated or principal axis set.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::AREA_EPSILON;

/// Area, centroid, and second moments of a completed polygon
///
/// All moments are about centroidal axes except `iz_origin`, which is the
/// polar moment about the global origin (the rotation pivot used by the
/// spin tab).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionProperties {
    /// Enclosed area, reported as a magnitude (units^2)
    pub area: f64,
    pub centroid: DVec2,
    pub ix_centroid: f64,
    pub iy_centroid: f64,
    pub ixy_centroid: f64,
    /// Polar moment about the centroid: Ix + Iy
    pub iz_centroid: f64,
    /// Polar moment about the global origin
    pub iz_origin: f64,
}

/// Mohr's-circle decomposition of a second-moment tensor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MohrCircle {
    /// Circle center: (Ix + Iy) / 2
    pub center: f64,
    /// Circle radius: sqrt(((Ix - Iy)/2)^2 + Ixy^2)
    pub radius: f64,
    /// Major principal moment, center + radius
    pub i_max: f64,
    /// Minor principal moment, center - radius
    pub i_min: f64,
}

impl MohrCircle {
    /// Principal decomposition of the tensor (Ix, Iy, Ixy)
    pub fn from_moments(ix: f64, iy: f64, ixy: f64) -> Self {
        let center = (ix + iy) / 2.0;
        let diff = (ix - iy) / 2.0;
        let radius = (diff * diff + ixy * ixy).max(0.0).sqrt();
        Self {
            center,
            radius,
            i_max: center + radius,
            i_min: center - radius,
        }
    }
}

/// Signed area of the cyclic vertex sequence
///
/// Positive for counter-clockwise winding, negative for clockwise.
/// Meaningless (zero-ish) below three vertices.
pub fn signed_area(points: &[DVec2]) -> f64 {
    let mut area2 = 0.0;
    for (i, current) in points.iter().enumerate() {
        let next = points[(i + 1) % points.len()];
        area2 += current.x * next.y - next.x * current.y;
    }
    area2 / 2.0
}

/// Reverse the vertex order when the polygon winds clockwise
///
/// The property summation assumes CCW winding; user-drawn polygons can go
/// either way. No-op below three vertices.
pub fn ensure_ccw(points: &mut [DVec2]) {
    if points.len() < 3 {
        return;
    }
    if signed_area(points) < 0.0 {
        points.reverse();
    }
}

/// Compute the full property set for a closed polygon
///
/// Returns `None` for fewer than three vertices or a degenerate (collinear
/// or self-canceling) loop whose area falls below `AREA_EPSILON`.
///
/// The signed `area2` accumulator must feed the centroid and moment
/// divisions directly; taking its absolute value early flips the centroid
/// and product-of-inertia signs for clockwise input. Only the reported
/// `area` field is a magnitude.
pub fn section_properties(points: &[DVec2]) -> Option<SectionProperties> {
    if points.len() < 3 {
        return None;
    }

    let mut area2 = 0.0;
    let mut cx_6a = 0.0;
    let mut cy_6a = 0.0;
    let mut ix_sum = 0.0;
    let mut iy_sum = 0.0;
    let mut ixy_sum = 0.0;

    for (i, p0) in points.iter().enumerate() {
        let p1 = points[(i + 1) % points.len()];
        let cross = p0.x * p1.y - p1.x * p0.y;

        area2 += cross;
        cx_6a += (p0.x + p1.x) * cross;
        cy_6a += (p0.y + p1.y) * cross;

        ix_sum += (p0.y * p0.y + p0.y * p1.y + p1.y * p1.y) * cross;
        iy_sum += (p0.x * p0.x + p0.x * p1.x + p1.x * p1.x) * cross;
        ixy_sum += (2.0 * p0.x * p0.y + p0.x * p1.y + p1.x * p0.y + 2.0 * p1.x * p1.y) * cross;
    }

    let area_signed = area2 / 2.0;
    if area_signed.abs() < AREA_EPSILON {
        return None;
    }

    let centroid = DVec2::new(cx_6a / (3.0 * area2), cy_6a / (3.0 * area2));

    let ix_origin = ix_sum / 12.0;
    let iy_origin = iy_sum / 12.0;
    let ixy_origin = ixy_sum / 24.0;

    let ix_centroid = ix_origin - area_signed * centroid.y * centroid.y;
    let iy_centroid = iy_origin - area_signed * centroid.x * centroid.x;
    let ixy_centroid = ixy_origin - area_signed * centroid.x * centroid.y;

    let area = area_signed.abs();
    let iz_centroid = ix_centroid + iy_centroid;
    let iz_origin = iz_centroid + area * centroid.length_squared();

    Some(SectionProperties {
        area,
        centroid,
        ix_centroid,
        iy_centroid,
        ixy_centroid,
        iz_centroid,
        iz_origin,
    })
}

/// Moments about axes through an arbitrary reference point
///
/// Parallel-axis theorem away from the centroid:
/// `Ix_ref = Ix_c + A*dy^2`, `Iy_ref = Iy_c + A*dx^2`,
/// `Ixy_ref = Ixy_c + A*dx*dy` with `d = reference - centroid`.
pub fn parallel_axis(props: &SectionProperties, reference: DVec2) -> (f64, f64, f64) {
    let d = reference - props.centroid;
    (
        props.ix_centroid + props.area * d.y * d.y,
        props.iy_centroid + props.area * d.x * d.x,
        props.ixy_centroid + props.area * d.x * d.y,
    )
}

/// Second moments about axes rotated by `theta` radians
///
/// Standard 2D tensor rotation; `theta` is the CCW angle from the x axis
/// to the x' axis.
pub fn transform_axes(ix: f64, iy: f64, ixy: f64, theta: f64) -> (f64, f64, f64) {
    let avg = (ix + iy) / 2.0;
    let diff = (ix - iy) / 2.0;
    let (sin2, cos2) = (2.0 * theta).sin_cos();

    (
        avg + diff * cos2 - ixy * sin2,
        avg - diff * cos2 + ixy * sin2,
        diff * sin2 + ixy * cos2,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f64::consts::PI;

    const EPS: f64 = 1e-9;

    fn unit_square() -> Vec<DVec2> {
        vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(0.0, 1.0),
        ]
    }

    #[test]
    fn test_signed_area_orientation() {
        let ccw = unit_square();
        assert!((signed_area(&ccw) - 1.0).abs() < EPS);

        let mut cw = unit_square();
        cw.reverse();
        assert!((signed_area(&cw) + 1.0).abs() < EPS);
    }

    #[test]
    fn test_unit_square_properties() {
        let props = section_properties(&unit_square()).unwrap();
        assert!((props.area - 1.0).abs() < EPS);
        assert!((props.centroid.x - 0.5).abs() < EPS);
        assert!((props.centroid.y - 0.5).abs() < EPS);
        assert!((props.ix_centroid - 1.0 / 12.0).abs() < EPS);
        assert!((props.iy_centroid - 1.0 / 12.0).abs() < EPS);
        assert!(props.ixy_centroid.abs() < EPS);
        assert!((props.iz_centroid - 1.0 / 6.0).abs() < EPS);
        // Parallel-axis shift to the origin: Iz_c + A * |c|^2
        assert!((props.iz_origin - (1.0 / 6.0 + 0.5)).abs() < EPS);
    }

    #[test]
    fn test_winding_invariance() {
        let ccw = section_properties(&unit_square()).unwrap();

        let mut cw = unit_square();
        cw.reverse();
        ensure_ccw(&mut cw);
        let normalized = section_properties(&cw).unwrap();

        assert!((ccw.area - normalized.area).abs() < EPS);
        assert!((ccw.centroid - normalized.centroid).length() < EPS);
        assert!((ccw.ix_centroid - normalized.ix_centroid).abs() < EPS);
        assert!((ccw.ixy_centroid - normalized.ixy_centroid).abs() < EPS);
    }

    #[test]
    fn test_rectangle_bh_cubed_over_12() {
        // 2 wide, 1 tall, centered anywhere: Ix = b*h^3/12, Iy = h*b^3/12
        let rect = vec![
            DVec2::new(3.0, 2.0),
            DVec2::new(5.0, 2.0),
            DVec2::new(5.0, 3.0),
            DVec2::new(3.0, 3.0),
        ];
        let props = section_properties(&rect).unwrap();
        assert!((props.area - 2.0).abs() < EPS);
        assert!((props.ix_centroid - 2.0 / 12.0).abs() < 1e-8);
        assert!((props.iy_centroid - 8.0 / 12.0).abs() < 1e-8);
        assert!(props.ixy_centroid.abs() < 1e-8);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(section_properties(&[]).is_none());
        assert!(section_properties(&[DVec2::ZERO, DVec2::X]).is_none());

        // Collinear triple encloses no area
        let collinear = [DVec2::ZERO, DVec2::new(1.0, 1.0), DVec2::new(2.0, 2.0)];
        assert!(section_properties(&collinear).is_none());
    }

    #[test]
    fn test_parallel_axis_identity_at_centroid() {
        let props = section_properties(&unit_square()).unwrap();
        let (ix, iy, ixy) = parallel_axis(&props, props.centroid);
        assert!((ix - props.ix_centroid).abs() < EPS);
        assert!((iy - props.iy_centroid).abs() < EPS);
        assert!((ixy - props.ixy_centroid).abs() < EPS);
    }

    #[test]
    fn test_parallel_axis_to_origin() {
        let props = section_properties(&unit_square()).unwrap();
        let (ix, iy, _) = parallel_axis(&props, DVec2::ZERO);
        // Unit square about its own edge: b*h^3/3 = 1/3
        assert!((ix - 1.0 / 3.0).abs() < 1e-8);
        assert!((iy - 1.0 / 3.0).abs() < 1e-8);
    }

    #[test]
    fn test_transform_identity() {
        let (ix, iy, ixy) = transform_axes(3.0, 1.5, -0.25, 0.0);
        assert!((ix - 3.0).abs() < EPS);
        assert!((iy - 1.5).abs() < EPS);
        assert!((ixy + 0.25).abs() < EPS);
    }

    #[test]
    fn test_mohr_circle_unit_square() {
        let circle = MohrCircle::from_moments(1.0 / 12.0, 1.0 / 12.0, 0.0);
        assert!(circle.radius < EPS);
        assert!((circle.i_max - 1.0 / 12.0).abs() < EPS);
        assert!((circle.i_min - 1.0 / 12.0).abs() < EPS);
    }

    proptest! {
        #[test]
        fn prop_transform_is_pi_periodic(
            ix in -50.0..50.0f64,
            iy in -50.0..50.0f64,
            ixy in -50.0..50.0f64,
            theta in -PI..PI,
        ) {
            let a = transform_axes(ix, iy, ixy, theta);
            let b = transform_axes(ix, iy, ixy, theta + PI);
            prop_assert!((a.0 - b.0).abs() < 1e-7);
            prop_assert!((a.1 - b.1).abs() < 1e-7);
            prop_assert!((a.2 - b.2).abs() < 1e-7);
        }

        #[test]
        fn prop_transform_preserves_trace(
            ix in -50.0..50.0f64,
            iy in -50.0..50.0f64,
            ixy in -50.0..50.0f64,
            theta in -PI..PI,
        ) {
            let (rx, ry, _) = transform_axes(ix, iy, ixy, theta);
            prop_assert!(((rx + ry) - (ix + iy)).abs() < 1e-7);
        }

        #[test]
        fn prop_mohr_bounds_rotations(
            ix in -50.0..50.0f64,
            iy in -50.0..50.0f64,
            ixy in -50.0..50.0f64,
        ) {
            let circle = MohrCircle::from_moments(ix, iy, ixy);
            prop_assert!(circle.i_max >= circle.center - 1e-9);
            prop_assert!(circle.center >= circle.i_min - 1e-9);
            prop_assert!(((circle.i_max - circle.i_min) - 2.0 * circle.radius).abs() < 1e-7);
        }
    }
}
