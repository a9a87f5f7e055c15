use crate::error::Result;
use crate::math::{Point3, Vector3};

use super::{Curve, CurveDomain};

/// A straight segment between two corner handles.
///
/// The parametric form is: `P(t) = start + t * (end - start)`, `t ∈ [0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSegment {
    start: Point3,
    end: Point3,
}

impl LineSegment {
    /// Creates a new segment. Coincident endpoints are allowed.
    #[must_use]
    pub fn new(start: Point3, end: Point3) -> Self {
        Self { start, end }
    }

    /// Returns the start point.
    #[must_use]
    pub fn start(&self) -> &Point3 {
        &self.start
    }

    /// Returns the end point.
    #[must_use]
    pub fn end(&self) -> &Point3 {
        &self.end
    }

    /// Returns the segment length.
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }
}

impl Curve for LineSegment {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        self.domain().check(t)?;
        Ok(self.start + (self.end - self.start) * t)
    }

    fn derivative(&self, t: f64) -> Result<Vector3> {
        self.domain().check(t)?;
        Ok(self.end - self.start)
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::UNIT
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn evaluate_is_lerp() {
        let line = LineSegment::new(Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 10.0, 0.0));
        assert_relative_eq!(line.evaluate(0.25).unwrap(), Point3::new(0.0, 2.5, 0.0));
        assert_relative_eq!(line.length(), 10.0);
    }

    #[test]
    fn tangent_is_unit_direction() {
        let line = LineSegment::new(Point3::new(1.0, 1.0, 0.0), Point3::new(4.0, 5.0, 0.0));
        assert_relative_eq!(line.tangent(0.5).unwrap(), Vector3::new(0.6, 0.8, 0.0));
    }
}
