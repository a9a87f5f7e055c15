use crate::error::Result;
use crate::math::{Point3, Vector3};

use super::{Curve, CurveDomain};

/// A cubic Bézier curve in Bernstein form.
///
/// `B(t) = (1-t)³·P0 + 3(1-t)²t·P1 + 3(1-t)t²·P2 + t³·P3`, `t ∈ [0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct CubicBezier {
    points: [Point3; 4],
}

impl CubicBezier {
    /// Creates a cubic from its four control points.
    #[must_use]
    pub fn new(p0: Point3, p1: Point3, p2: Point3, p3: Point3) -> Self {
        Self {
            points: [p0, p1, p2, p3],
        }
    }

    /// Returns the control points `[P0, P1, P2, P3]`.
    #[must_use]
    pub fn control_points(&self) -> &[Point3; 4] {
        &self.points
    }
}

impl Curve for CubicBezier {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        self.domain().check(t)?;
        let [p0, p1, p2, p3] = &self.points;
        let inv = 1.0 - t;
        let inv2 = inv * inv;
        let t2 = t * t;
        Ok(Point3::from(
            p0.coords * (inv2 * inv)
                + p1.coords * (3.0 * inv2 * t)
                + p2.coords * (3.0 * inv * t2)
                + p3.coords * (t2 * t),
        ))
    }

    /// `B'(t) = 3(1-t)²(P1-P0) + 6(1-t)t(P2-P1) + 3t²(P3-P2)`
    fn derivative(&self, t: f64) -> Result<Vector3> {
        self.domain().check(t)?;
        let [p0, p1, p2, p3] = &self.points;
        let inv = 1.0 - t;
        Ok((p1 - p0) * (3.0 * inv * inv) + (p2 - p1) * (6.0 * inv * t) + (p3 - p2) * (3.0 * t * t))
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::UNIT
    }
}
