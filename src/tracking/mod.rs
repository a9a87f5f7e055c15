mod arc_tracker;

pub use arc_tracker::ArcTracker;

use crate::math::{Point3, Vector3};

/// Position and direction of travel returned by a tracker step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackPose {
    pub position: Point3,
    pub tangent: Vector3,
}

impl TrackPose {
    /// Creates a new pose.
    #[must_use]
    pub fn new(position: Point3, tangent: Vector3) -> Self {
        Self { position, tangent }
    }
}
