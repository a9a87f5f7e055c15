mod sample_path;

pub use sample_path::SamplePath;

use crate::math::{Point3, Vector3};

/// Index-aligned positions and unit tangents produced by sampling a path.
///
/// Both sequences are fully materialized so consumers can iterate them
/// repeatedly or reverse them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathSamples {
    /// Sample positions in path order.
    pub points: Vec<Point3>,
    /// Unit tangent at each sample, pointing along the path.
    pub tangents: Vec<Vector3>,
}

impl PathSamples {
    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if there are no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the samples in travel order from the last point to the first.
    ///
    /// Tangents are reversed and negated so they keep pointing along travel.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            points: self.points.iter().rev().copied().collect(),
            tangents: self.tangents.iter().rev().map(|t| -t).collect(),
        }
    }

    /// Total chord length of the polyline through the samples.
    #[must_use]
    pub fn length(&self) -> f64 {
        polyline_length(&self.points)
    }
}

/// Sum of distances between consecutive points.
#[must_use]
pub fn polyline_length(points: &[Point3]) -> f64 {
    points.windows(2).map(|w| (w[1] - w[0]).norm()).sum()
}
