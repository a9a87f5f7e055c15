mod cubic_bezier;
mod line_segment;

pub use cubic_bezier::CubicBezier;
pub use line_segment::LineSegment;

use crate::error::{GeometryError, Result};
use crate::math::{normalize_or_zero, Point3, Vector3, TOLERANCE};

/// Parameter domain for a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveDomain {
    /// Start of the parameter range.
    pub t_min: f64,
    /// End of the parameter range.
    pub t_max: f64,
}

impl CurveDomain {
    /// The unit domain `[0, 1]` shared by every path segment.
    pub const UNIT: Self = Self::new(0.0, 1.0);

    /// Creates a new curve domain.
    #[must_use]
    pub const fn new(t_min: f64, t_max: f64) -> Self {
        Self { t_min, t_max }
    }

    /// Checks that `t` lies within the domain.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::ParameterOutOfRange`] if it does not.
    pub fn check(&self, t: f64) -> Result<()> {
        if t.is_nan() || t < self.t_min - TOLERANCE || t > self.t_max + TOLERANCE {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "t",
                value: t,
                min: self.t_min,
                max: self.t_max,
            }
            .into());
        }
        Ok(())
    }
}

/// Trait for parametric curves in 3D space.
pub trait Curve {
    /// Evaluates the curve at parameter `t`, returning the 3D point.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is out of range.
    fn evaluate(&self, t: f64) -> Result<Point3>;

    /// Computes the (unnormalized) first derivative at parameter `t`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is out of range.
    fn derivative(&self, t: f64) -> Result<Vector3>;

    /// Returns the parameter domain of the curve.
    fn domain(&self) -> CurveDomain;

    /// Computes the unit tangent at parameter `t`.
    ///
    /// A vanishing derivative yields the zero vector instead of NaN.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameter is out of range.
    fn tangent(&self, t: f64) -> Result<Vector3> {
        Ok(normalize_or_zero(&self.derivative(t)?))
    }
}

/// The curve connecting two adjacent handles of a path.
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    /// Both handles are corners.
    Straight(LineSegment),
    /// At least one handle contributes a control point.
    Cubic(CubicBezier),
}

impl PathSegment {
    /// Returns `true` for a corner-to-corner segment.
    #[must_use]
    pub fn is_straight(&self) -> bool {
        matches!(self, Self::Straight(_))
    }
}

impl Curve for PathSegment {
    fn evaluate(&self, t: f64) -> Result<Point3> {
        match self {
            Self::Straight(line) => line.evaluate(t),
            Self::Cubic(cubic) => cubic.evaluate(t),
        }
    }

    fn derivative(&self, t: f64) -> Result<Vector3> {
        match self {
            Self::Straight(line) => line.derivative(t),
            Self::Cubic(cubic) => cubic.derivative(t),
        }
    }

    fn domain(&self) -> CurveDomain {
        CurveDomain::UNIT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_domain_bounds() {
        assert!(CurveDomain::UNIT.check(0.0).is_ok());
        assert!(CurveDomain::UNIT.check(1.0).is_ok());
        assert!(CurveDomain::UNIT.check(1.5).is_err());
        assert!(CurveDomain::UNIT.check(-0.1).is_err());
        assert!(CurveDomain::UNIT.check(f64::NAN).is_err());
    }
}
