//! World-space to screen-space mapping for the 2D trajectory view.

use glam::IVec2;

/// Maps a point from a continuous world-space window onto pixel coordinates.
///
/// `a` is mapped linearly from `range_a` onto `[0, width]` and `b` from
/// `range_b` onto `[0, height]` with the axis inverted, so larger world
/// values end up on smaller pixel rows ("up is up"). The result is rounded
/// to the nearest pixel.
///
/// Points outside the configured ranges are not clamped; they map to
/// off-surface coordinates and the renderer is responsible for clipping.
///
/// The ranges must have nonzero extent. [`crate::config::AttractorConfig`]
/// validation guarantees this for bounds coming from a configuration.
pub fn to_screen(
    a: f64,
    b: f64,
    range_a: (f64, f64),
    range_b: (f64, f64),
    width: u32,
    height: u32,
) -> IVec2 {
    let (a_min, a_max) = range_a;
    let (b_min, b_max) = range_b;
    let sx = f64::from(width) * ((a - a_min) / (a_max - a_min));
    let sy = f64::from(height) * ((b_max - b) / (b_max - b_min));
    IVec2::new(sx.round() as i32, sy.round() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RANGE_A: (f64, f64) = (-35.0, 35.0);
    const RANGE_B: (f64, f64) = (0.0, 50.0);
    const W: u32 = 800;
    const H: u32 = 600;

    #[test]
    fn corners_map_to_surface_corners() {
        // Bottom-left of the world window is the bottom-left pixel row.
        assert_eq!(
            to_screen(RANGE_A.0, RANGE_B.0, RANGE_A, RANGE_B, W, H),
            IVec2::new(0, 600)
        );
        assert_eq!(
            to_screen(RANGE_A.1, RANGE_B.0, RANGE_A, RANGE_B, W, H),
            IVec2::new(800, 600)
        );
        assert_eq!(
            to_screen(RANGE_A.0, RANGE_B.1, RANGE_A, RANGE_B, W, H),
            IVec2::new(0, 0)
        );
        assert_eq!(
            to_screen(RANGE_A.1, RANGE_B.1, RANGE_A, RANGE_B, W, H),
            IVec2::new(800, 0)
        );
    }

    #[test]
    fn center_maps_to_surface_center() {
        assert_eq!(
            to_screen(0.0, 25.0, RANGE_A, RANGE_B, W, H),
            IVec2::new(400, 300)
        );
    }

    #[test]
    fn second_axis_is_inverted() {
        let low = to_screen(0.0, 5.0, RANGE_A, RANGE_B, W, H);
        let high = to_screen(0.0, 45.0, RANGE_A, RANGE_B, W, H);
        assert!(high.y < low.y, "larger world value must be higher on screen");
    }

    #[test]
    fn out_of_bounds_points_are_not_clamped() {
        let left = to_screen(-70.0, 25.0, RANGE_A, RANGE_B, W, H);
        assert!(left.x < 0);

        let above = to_screen(0.0, 100.0, RANGE_A, RANGE_B, W, H);
        assert!(above.y < 0);
    }

    #[test]
    fn rounds_to_nearest_pixel() {
        // 0.3 of the horizontal range lands between pixels; expect rounding.
        let a = RANGE_A.0 + 0.3 * (RANGE_A.1 - RANGE_A.0);
        let p = to_screen(a, 25.0, RANGE_A, RANGE_B, 101, H);
        assert_eq!(p.x, (0.3f64 * 101.0).round() as i32);
    }
}
