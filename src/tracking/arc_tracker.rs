use tracing::debug;

use crate::error::{Result, TrackerError};
use crate::geometry::CurvePath;
use crate::math::{Point3, TravelPlane, Vector3, TOLERANCE};
use crate::operations::sampling::PathSamples;

use super::TrackPose;

/// Moves a cursor along the sampled polyline of a path by travel distance.
///
/// The tracker owns a snapshot of the samples taken at [`ArcTracker::init`];
/// later edits to the path do not affect it until it is re-initialized.
/// Once the cursor reaches the last sample the tracker is ended and every
/// further step returns the final pose.
#[derive(Debug, Clone)]
pub struct ArcTracker {
    samples: PathSamples,
    plane: TravelPlane,
    segment: usize,
    offset: f64,
    travelled: f64,
    ended: bool,
}

impl ArcTracker {
    /// Samples `path` and places the cursor at its start (or its end when `reverse`).
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be sampled or yields fewer than 2 samples.
    pub fn new(path: &CurvePath, reverse: bool) -> Result<Self> {
        Self::from_samples(path.sample()?, reverse)
    }

    /// Builds a tracker over already sampled data.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::TooFewSamples`] for fewer than 2 samples.
    pub fn from_samples(samples: PathSamples, reverse: bool) -> Result<Self> {
        let samples = prepare(samples, reverse)?;
        Ok(Self {
            samples,
            plane: TravelPlane::default(),
            segment: 0,
            offset: 0.0,
            travelled: 0.0,
            ended: false,
        })
    }

    /// Uses `plane` for tangent angle interpolation.
    #[must_use]
    pub fn with_plane(mut self, plane: TravelPlane) -> Self {
        self.plane = plane;
        self
    }

    /// Re-samples `path` and resets the cursor.
    ///
    /// On error the tracker keeps its previous samples and cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be sampled or yields fewer than 2 samples.
    pub fn init(&mut self, path: &CurvePath, reverse: bool) -> Result<()> {
        self.samples = prepare(path.sample()?, reverse)?;
        self.reset();
        debug!(
            samples = self.samples.len(),
            length = self.samples.length(),
            reverse,
            "tracker initialized"
        );
        Ok(())
    }

    /// Moves the cursor back to the first sample without resampling.
    pub fn reset(&mut self) {
        self.segment = 0;
        self.offset = 0.0;
        self.travelled = 0.0;
        self.ended = false;
    }

    /// Advances the cursor by up to `max_distance` along the polyline.
    ///
    /// The distance is consumed across as many segments as needed. Reaching
    /// the final sample ends the tracker.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::InvalidDistance`] for a negative or non-finite
    /// distance. The cursor does not move in that case.
    pub fn step(&mut self, max_distance: f64) -> Result<TrackPose> {
        if !max_distance.is_finite() || max_distance < 0.0 {
            return Err(TrackerError::InvalidDistance(max_distance).into());
        }

        let last = self.samples.len() - 1;
        let mut remaining = max_distance;
        while remaining > 0.0 && self.segment < last {
            let left = self.chord(self.segment) - self.offset;
            // Within tolerance of the segment end counts as reaching it.
            if left - remaining > TOLERANCE {
                self.offset += remaining;
                self.travelled += remaining;
                remaining = 0.0;
            } else {
                remaining -= left;
                self.travelled += left;
                self.segment += 1;
                self.offset = 0.0;
            }
        }

        if self.segment >= last && !self.ended {
            self.ended = true;
            debug!(travelled = self.travelled, "tracker reached end of path");
        }
        Ok(self.pose())
    }

    /// Pose at the current cursor.
    #[must_use]
    pub fn pose(&self) -> TrackPose {
        let last = self.samples.len() - 1;
        if self.segment >= last {
            return TrackPose::new(self.samples.points[last], self.samples.tangents[last]);
        }

        let i = self.segment;
        let chord = self.chord(i);
        // A zero-length segment snaps to its end instead of dividing by zero.
        let rate = if chord > TOLERANCE {
            self.offset / chord
        } else {
            1.0
        };
        let (a, b) = (&self.samples.points[i], &self.samples.points[i + 1]);
        let position = a + (b - a) * rate;
        let tangent = self.plane.interpolate(
            &self.samples.tangents[i],
            &self.samples.tangents[i + 1],
            rate,
        );
        TrackPose::new(position, tangent)
    }

    /// Returns `true` once the cursor has reached the last sample.
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.ended
    }

    /// First sample in travel order.
    #[must_use]
    pub fn start_position(&self) -> Point3 {
        self.samples.points[0]
    }

    /// Tangent of the first sample in travel order.
    #[must_use]
    pub fn start_tangent(&self) -> Vector3 {
        self.samples.tangents[0]
    }

    /// Length of the whole polyline.
    #[must_use]
    pub fn total_length(&self) -> f64 {
        self.samples.length()
    }

    /// Distance covered since the last reset.
    #[must_use]
    pub fn distance_travelled(&self) -> f64 {
        self.travelled
    }

    /// The samples in travel order.
    #[must_use]
    pub fn samples(&self) -> &PathSamples {
        &self.samples
    }

    fn chord(&self, segment: usize) -> f64 {
        (self.samples.points[segment + 1] - self.samples.points[segment]).norm()
    }
}

fn prepare(samples: PathSamples, reverse: bool) -> Result<PathSamples> {
    if samples.len() < 2 || samples.tangents.len() != samples.len() {
        return Err(TrackerError::TooFewSamples(samples.len().min(samples.tangents.len())).into());
    }
    Ok(if reverse { samples.reversed() } else { samples })
}
