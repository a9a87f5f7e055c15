use serde::{Deserialize, Serialize};

use crate::math::{Point3, Vector3};

/// Distance of the default control points from a freshly placed handle.
const DEFAULT_CONTROL_REACH: f64 = 3.0;

/// One control vertex of a path.
///
/// `control0` shapes the segment arriving at the handle and `control1` the
/// segment leaving it. A corner handle ignores both and makes its adjacent
/// segments straight (or degenerate cubics when the other side is curved).
///
/// The editing methods keep the authoring convention: moving the anchor
/// carries the controls along, moving one control mirrors the other through
/// the anchor. Sampling never re-validates it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlHandle {
    pub position: Point3,
    pub control0: Point3,
    pub control1: Point3,
    #[serde(default)]
    pub is_corner: bool,
}

impl ControlHandle {
    /// Creates a curved handle with controls placed 3 units above and below `position` on Y.
    #[must_use]
    pub fn new(position: Point3) -> Self {
        let reach = Vector3::y() * DEFAULT_CONTROL_REACH;
        Self {
            position,
            control0: position + reach,
            control1: position - reach,
            is_corner: false,
        }
    }

    /// Creates a corner handle. Its controls sit on the anchor.
    #[must_use]
    pub fn corner(position: Point3) -> Self {
        Self {
            position,
            control0: position,
            control1: position,
            is_corner: true,
        }
    }

    /// Creates a curved handle from explicit control points.
    #[must_use]
    pub fn with_controls(position: Point3, control0: Point3, control1: Point3) -> Self {
        Self {
            position,
            control0,
            control1,
            is_corner: false,
        }
    }

    /// Moves the anchor to `target`, translating both controls rigidly.
    pub fn set_position(&mut self, target: Point3) {
        self.translate(&(target - self.position));
    }

    /// Translates the anchor and both controls by `offset`.
    pub fn translate(&mut self, offset: &Vector3) {
        self.position += *offset;
        self.control0 += *offset;
        self.control1 += *offset;
    }

    /// Sets `control0` and mirrors `control1` through the anchor.
    pub fn set_control0(&mut self, target: Point3) {
        self.control0 = target;
        self.control1 = self.position + (self.position - target);
    }

    /// Sets `control1` and mirrors `control0` through the anchor.
    pub fn set_control1(&mut self, target: Point3) {
        self.control1 = target;
        self.control0 = self.position + (self.position - target);
    }
}
