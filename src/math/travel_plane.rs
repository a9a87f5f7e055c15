//! Explicit 2.5D angle math on a plane with a fixed up axis.
//!
//! Directions are split into an in-plane heading (an angle measured from a
//! reference axis, counter-clockwise when looking down `up`) and an
//! out-of-plane component along `up`.
use std::f64::consts::{PI, TAU};

use crate::error::{GeometryError, Result};

use super::{Vector3, TOLERANCE};

/// A fixed travel plane described by its up axis and an in-plane basis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelPlane {
    up: Vector3,
    reference: Vector3,
    side: Vector3,
}

impl TravelPlane {
    /// Creates a travel plane orthogonal to `up`.
    ///
    /// The reference axis (heading `0`) is world X projected onto the plane,
    /// or world Y when `up` is parallel to X.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ZeroVector`] if `up` has no direction.
    pub fn new(up: Vector3) -> Result<Self> {
        let up = up.try_normalize(TOLERANCE).ok_or(GeometryError::ZeroVector)?;
        let reference = super::project_on_plane(&Vector3::x(), &up)
            .try_normalize(TOLERANCE)
            .or_else(|| super::project_on_plane(&Vector3::y(), &up).try_normalize(TOLERANCE))
            .ok_or(GeometryError::ZeroVector)?;
        let side = up.cross(&reference);
        Ok(Self {
            up,
            reference,
            side,
        })
    }

    /// Returns the unit up axis.
    #[must_use]
    pub fn up(&self) -> &Vector3 {
        &self.up
    }

    /// Heading of `v` inside the plane, in radians within `[-PI, PI]`.
    ///
    /// A vector parallel to `up` has heading `0`.
    #[must_use]
    pub fn heading(&self, v: &Vector3) -> f64 {
        v.dot(&self.side).atan2(v.dot(&self.reference))
    }

    /// Signed shortest-arc angle from heading of `from` to heading of `to`.
    #[must_use]
    pub fn signed_angle(&self, from: &Vector3, to: &Vector3) -> f64 {
        wrap_angle(self.heading(to) - self.heading(from))
    }

    /// Builds a unit in-plane direction from a heading.
    #[must_use]
    pub fn direction_at(&self, heading: f64) -> Vector3 {
        self.reference * heading.cos() + self.side * heading.sin()
    }

    /// Interpolates between two directions by rotating the heading along the shortest arc.
    ///
    /// The in-plane length and the component along `up` are blended linearly,
    /// then the result is renormalized. Returns `from` unchanged at `rate = 0`
    /// for unit inputs and `to` at `rate = 1`.
    #[must_use]
    pub fn interpolate(&self, from: &Vector3, to: &Vector3, rate: f64) -> Vector3 {
        let heading = self.heading(from) + self.signed_angle(from, to) * rate;
        let planar = lerp(self.planar_length(from), self.planar_length(to), rate);
        let vertical = lerp(from.dot(&self.up), to.dot(&self.up), rate);
        let v = self.direction_at(heading) * planar + self.up * vertical;
        v.try_normalize(TOLERANCE).unwrap_or(*to)
    }

    fn planar_length(&self, v: &Vector3) -> f64 {
        v.dot(&self.reference).hypot(v.dot(&self.side))
    }
}

impl Default for TravelPlane {
    /// The XY plane seen along `-Z`.
    fn default() -> Self {
        Self {
            up: -Vector3::z(),
            reference: Vector3::x(),
            side: -Vector3::y(),
        }
    }
}

/// Wraps an angle into `(-PI, PI]`.
#[must_use]
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
