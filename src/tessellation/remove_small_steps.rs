use crate::error::{MeshError, Result};
use crate::math::{Point3, Vector3};

/// Drops samples that sit closer than a minimum step to the previous kept sample.
///
/// Removes zero-length segments before extrusion. The final sample is never
/// dropped: when it is too close to its predecessor, the predecessor goes
/// instead. That last retained pair may therefore be shorter than the step.
#[derive(Debug, Clone, Copy)]
pub struct RemoveSmallSteps {
    min_step: f64,
}

impl RemoveSmallSteps {
    /// Creates a new filter.
    #[must_use]
    pub fn new(min_step: f64) -> Self {
        Self { min_step }
    }

    /// Filters `points` and `tangents` in place, keeping them index-aligned.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::MismatchedSamples`] if the sequences differ in length.
    pub fn execute(&self, points: &mut Vec<Point3>, tangents: &mut Vec<Vector3>) -> Result<()> {
        if points.len() != tangents.len() {
            return Err(MeshError::MismatchedSamples {
                points: points.len(),
                tangents: tangents.len(),
            }
            .into());
        }
        let n = points.len();
        if n < 2 {
            return Ok(());
        }

        let mut kept = Vec::with_capacity(n);
        kept.push(0);
        for i in 1..n - 1 {
            let prev = kept[kept.len() - 1];
            if (points[i] - points[prev]).norm() >= self.min_step {
                kept.push(i);
            }
        }
        let prev = kept[kept.len() - 1];
        if (points[n - 1] - points[prev]).norm() < self.min_step {
            kept.pop();
        }
        kept.push(n - 1);

        if kept.len() < n {
            *points = kept.iter().map(|&i| points[i]).collect();
            *tangents = kept.iter().map(|&i| tangents[i]).collect();
        }
        Ok(())
    }
}
