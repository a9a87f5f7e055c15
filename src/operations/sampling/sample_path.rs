use tracing::{debug, warn};

use crate::error::Result;
use crate::geometry::{Curve, CurvePath, PathSegment};
use crate::math::{normalize_or_zero, Point3, Vector3};

use super::PathSamples;

/// Upper bound for the up-front sample buffer reservation.
const MAX_RESERVED_SAMPLES: usize = 1 << 16;

/// Samples a [`CurvePath`] into positions and tangents.
///
/// Curved segments contribute `divisions` samples at `t = j / divisions`
/// (the segment end is the next segment's start and is never emitted on
/// its own). A run of straight corner-to-corner segments emits each handle
/// position once.
#[derive(Debug)]
pub struct SamplePath<'a> {
    path: &'a CurvePath,
}

impl<'a> SamplePath<'a> {
    /// Creates a new sampling operation.
    #[must_use]
    pub fn new(path: &'a CurvePath) -> Self {
        Self { path }
    }

    /// Executes the sampling.
    ///
    /// # Errors
    ///
    /// Returns an error if the path has fewer than 2 handles or zero divisions.
    pub fn execute(&self) -> Result<PathSamples> {
        self.path.validate()?;
        let handles = self.path.handles();
        let divisions = self.path.divisions();
        let segment_count = handles.len() - 1;

        // Corner runs never use `divisions`.
        let reserved = segment_count.saturating_mul(divisions).min(MAX_RESERVED_SAMPLES);
        let mut samples = PathSamples {
            points: Vec::with_capacity(reserved),
            tangents: Vec::with_capacity(reserved),
        };

        for i in 0..segment_count {
            match self.path.segment(i)? {
                PathSegment::Straight(line) => {
                    let after_corner = i > 0 && handles[i - 1].is_corner;
                    if !after_corner {
                        samples.points.push(*line.start());
                        samples.tangents.push(self.straight_start_tangent(i)?);
                    }
                    samples.points.push(*line.end());
                    samples.tangents.push(self.straight_end_tangent(i)?);
                }
                PathSegment::Cubic(cubic) => {
                    for j in 0..divisions {
                        let t = self.fraction(j);
                        samples.points.push(cubic.evaluate(t)?);
                        samples.tangents.push(cubic.tangent(t)?);
                    }
                }
            }
        }

        debug!(
            handles = handles.len(),
            divisions,
            samples = samples.len(),
            "sampled curve path"
        );
        Ok(samples)
    }

    /// Tangent at the start handle of straight segment `i`.
    ///
    /// The first handle of the path uses the plain edge direction. Otherwise
    /// the direction is blended with the last sample of the previous segment.
    fn straight_start_tangent(&self, i: usize) -> Result<Vector3> {
        let left = &self.path.handles()[i].position;
        let right = &self.path.handles()[i + 1].position;
        if i == 0 {
            return Ok(normalize_or_zero(&(right - left)));
        }
        let divisions = self.path.divisions();
        let prev = self.path.segment(i - 1)?.evaluate(self.fraction(divisions - 1))?;
        Ok(self.joint_tangent(i, left, &prev, right))
    }

    /// Tangent at the end handle of straight segment `i`.
    ///
    /// The last handle of the path uses the plain edge direction. Otherwise
    /// the direction is blended with the first step into the next segment.
    fn straight_end_tangent(&self, i: usize) -> Result<Vector3> {
        let left = &self.path.handles()[i].position;
        let right = &self.path.handles()[i + 1].position;
        if i + 2 == self.path.handles().len() {
            return Ok(normalize_or_zero(&(right - left)));
        }
        let next = self.path.segment(i + 1)?.evaluate(self.fraction(1))?;
        Ok(self.joint_tangent(i + 1, right, left, &next))
    }

    /// `-normalize(normalize(behind - joint) - normalize(ahead - joint))`
    ///
    /// Equals the normalized sum of the incoming and outgoing directions. A
    /// fully reversed joint has no direction and yields the zero vector.
    fn joint_tangent(&self, handle: usize, joint: &Point3, behind: &Point3, ahead: &Point3) -> Vector3 {
        let back = normalize_or_zero(&(behind - joint));
        let forward = normalize_or_zero(&(ahead - joint));
        let tangent = -normalize_or_zero(&(back - forward));
        if tangent == Vector3::zeros() {
            warn!(
                handle,
                divisions = self.path.divisions(),
                "path reverses on itself at a corner, tangent is undefined"
            );
        }
        tangent
    }

    #[allow(clippy::cast_precision_loss)]
    fn fraction(&self, j: usize) -> f64 {
        j as f64 / self.path.divisions() as f64
    }
}
