use glam::IVec2;

/// RGB color triple. Cosmetic only, one per trajectory.
pub type Rgb = [u8; 3];

/// Axis-aligned rectangle in pixel coordinates.
///
/// This is the unit of "dirty region" for partial redraw: a renderer
/// draws one line segment and reports back the minimal rectangle that
/// covers it, and only that region needs to be refreshed on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelRect {
    pub min: IVec2,
    pub max: IVec2,
}

impl PixelRect {
    /// Minimal rectangle covering both endpoints of a segment.
    pub fn from_segment(a: IVec2, b: IVec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Smallest rectangle containing both `self` and `other`.
    pub fn union(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn width(&self) -> i32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> i32 {
        self.max.y - self.min.y
    }
}
