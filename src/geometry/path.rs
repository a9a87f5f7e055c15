use tracing::trace;

use crate::error::{PathError, Result};
use crate::math::{Point3, Vector3};
use crate::operations::sampling::{PathSamples, SamplePath};

use super::curve::{CubicBezier, LineSegment, PathSegment};
use super::observer::{ChangeObservers, Subscription};
use super::ControlHandle;

/// Samples per curved segment used by freshly authored paths.
pub const DEFAULT_DIVISIONS: usize = 50;

/// Distance below the origin at which a handle without neighbours is placed.
const NEW_HANDLE_DROP: f64 = 5.0;

/// Fraction of the last step by which an appended handle extends the path.
const APPEND_EXTENSION: f64 = 0.3;

/// An ordered chain of [`ControlHandle`]s sampled into a polyline.
///
/// Every mutating method fires the change notification once the data is
/// updated. Listeners receive the path by shared reference and cannot
/// mutate it or the registry while being notified.
#[derive(Debug)]
pub struct CurvePath {
    handles: Vec<ControlHandle>,
    divisions: usize,
    observers: ChangeObservers<CurvePath>,
}

impl CurvePath {
    /// Creates a path. Handle count and divisions are checked when sampling.
    #[must_use]
    pub fn new(handles: Vec<ControlHandle>, divisions: usize) -> Self {
        Self {
            handles,
            divisions,
            observers: ChangeObservers::new(),
        }
    }

    /// Returns the handles in path order.
    #[must_use]
    pub fn handles(&self) -> &[ControlHandle] {
        &self.handles
    }

    /// Returns the handle at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::HandleIndexOutOfRange`] for an invalid index.
    pub fn handle(&self, index: usize) -> Result<&ControlHandle> {
        self.handles
            .get(index)
            .ok_or_else(|| self.out_of_range(index).into())
    }

    /// Returns the number of samples emitted per curved segment.
    #[must_use]
    pub fn divisions(&self) -> usize {
        self.divisions
    }

    /// Checks that the path can be sampled.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::TooFewHandles`] for fewer than 2 handles and
    /// [`PathError::InvalidDivisions`] when `divisions` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.divisions == 0 {
            return Err(PathError::InvalidDivisions(0).into());
        }
        if self.handles.len() < 2 {
            return Err(PathError::TooFewHandles {
                count: self.handles.len(),
            }
            .into());
        }
        Ok(())
    }

    /// Returns the curve between handle `index` and handle `index + 1`.
    ///
    /// Two corners give a straight segment. Otherwise a cubic is built and a
    /// corner side borrows the control point of the curved side.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::HandleIndexOutOfRange`] if `index + 1` is not a handle.
    pub fn segment(&self, index: usize) -> Result<PathSegment> {
        let (left, right) = match (self.handles.get(index), self.handles.get(index + 1)) {
            (Some(l), Some(r)) => (l, r),
            _ => return Err(self.out_of_range(index + 1).into()),
        };
        let segment = match (left.is_corner, right.is_corner) {
            (true, true) => PathSegment::Straight(LineSegment::new(left.position, right.position)),
            (false, false) => PathSegment::Cubic(CubicBezier::new(
                left.position,
                left.control1,
                right.control0,
                right.position,
            )),
            (false, true) => PathSegment::Cubic(CubicBezier::new(
                left.position,
                left.control1,
                left.control1,
                right.position,
            )),
            (true, false) => PathSegment::Cubic(CubicBezier::new(
                left.position,
                right.control0,
                right.control0,
                right.position,
            )),
        };
        Ok(segment)
    }

    /// Samples the path into index-aligned points and unit tangents.
    ///
    /// # Errors
    ///
    /// Returns an error if the path fails [`CurvePath::validate`].
    pub fn sample(&self) -> Result<PathSamples> {
        SamplePath::new(self).execute()
    }

    /// Sampled positions, see [`CurvePath::sample`].
    ///
    /// # Errors
    ///
    /// Returns an error if the path fails [`CurvePath::validate`].
    pub fn points(&self) -> Result<Vec<Point3>> {
        Ok(self.sample()?.points)
    }

    /// Sampled unit tangents, see [`CurvePath::sample`].
    ///
    /// # Errors
    ///
    /// Returns an error if the path fails [`CurvePath::validate`].
    pub fn tangents(&self) -> Result<Vec<Vector3>> {
        Ok(self.sample()?.tangents)
    }

    // --- Change notification ---

    /// Registers a listener fired after every mutation.
    pub fn subscribe(&mut self, listener: impl FnMut(&CurvePath) + 'static) -> Subscription {
        self.observers.subscribe(listener)
    }

    /// Removes a listener. Returns `false` if it was already removed.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.observers.unsubscribe(subscription)
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.observers.len()
    }

    /// Fires the change notification.
    ///
    /// Editors that batch several edits through [`CurvePath::edit_handles`]
    /// get one notification per batch.
    pub fn notify_changed(&mut self) {
        let mut observers = std::mem::take(&mut self.observers);
        trace!(listeners = observers.len(), "curve path changed");
        observers.notify(self);
        self.observers = observers;
    }

    // --- Editing ---

    /// Appends a handle.
    pub fn push_handle(&mut self, handle: ControlHandle) {
        self.handles.push(handle);
        self.notify_changed();
    }

    /// Inserts a handle before `index` (`index == len` appends).
    ///
    /// # Errors
    ///
    /// Returns [`PathError::HandleIndexOutOfRange`] if `index > len`.
    pub fn insert_handle(&mut self, index: usize, handle: ControlHandle) -> Result<()> {
        if index > self.handles.len() {
            return Err(self.out_of_range(index).into());
        }
        self.handles.insert(index, handle);
        self.notify_changed();
        Ok(())
    }

    /// Adds a handle after `after` (at the end for `None`) and returns its index.
    ///
    /// The new handle copies the corner flag of its predecessor. Between two
    /// handles it sits on their midpoint with the predecessor's control
    /// offsets. Appended after two or more handles it continues the last step
    /// by 30 % and takes the predecessor's control offsets swapped. Otherwise
    /// it is a default handle 5 units below the origin.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::HandleIndexOutOfRange`] if `after` is not a handle.
    pub fn add_handle(&mut self, after: Option<usize>) -> Result<usize> {
        let index = match after {
            Some(i) if i < self.handles.len() => i + 1,
            Some(i) => return Err(self.out_of_range(i).into()),
            None => self.handles.len(),
        };

        let mut handle = ControlHandle::new(Point3::new(0.0, -NEW_HANDLE_DROP, 0.0));
        let prev = index.checked_sub(1).and_then(|i| self.handles.get(i)).copied();
        if let Some(prev) = prev {
            handle.is_corner = prev.is_corner;
            let before = index.checked_sub(2).and_then(|i| self.handles.get(i));
            if let Some(next) = self.handles.get(index) {
                let position = nalgebra::center(&prev.position, &next.position);
                handle.position = position;
                handle.control0 = position + (prev.control0 - prev.position);
                handle.control1 = position + (prev.control1 - prev.position);
            } else if let Some(before) = before {
                let position = prev.position + (prev.position - before.position) * APPEND_EXTENSION;
                handle.position = position;
                handle.control0 = position + (prev.control1 - prev.position);
                handle.control1 = position + (prev.control0 - prev.position);
            }
        }

        self.handles.insert(index, handle);
        self.notify_changed();
        Ok(index)
    }

    /// Removes and returns the handle at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::HandleIndexOutOfRange`] for an invalid index.
    pub fn remove_handle(&mut self, index: usize) -> Result<ControlHandle> {
        if index >= self.handles.len() {
            return Err(self.out_of_range(index).into());
        }
        let removed = self.handles.remove(index);
        self.notify_changed();
        Ok(removed)
    }

    /// Removes every handle.
    pub fn clear_handles(&mut self) {
        self.handles.clear();
        self.notify_changed();
    }

    /// Changes the number of samples per curved segment.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::InvalidDivisions`] if `divisions` is zero.
    pub fn set_divisions(&mut self, divisions: usize) -> Result<()> {
        if divisions == 0 {
            return Err(PathError::InvalidDivisions(0).into());
        }
        self.divisions = divisions;
        self.notify_changed();
        Ok(())
    }

    /// Flips the corner flag of the handle at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::HandleIndexOutOfRange`] for an invalid index.
    pub fn toggle_corner(&mut self, index: usize) -> Result<()> {
        self.edit_handle(index, |h| h.is_corner = !h.is_corner)
    }

    /// Moves a handle anchor, carrying its controls along.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::HandleIndexOutOfRange`] for an invalid index.
    pub fn move_handle(&mut self, index: usize, target: Point3) -> Result<()> {
        self.edit_handle(index, |h| h.set_position(target))
    }

    /// Moves `control0` of a handle, mirroring `control1`.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::HandleIndexOutOfRange`] for an invalid index.
    pub fn move_control0(&mut self, index: usize, target: Point3) -> Result<()> {
        self.edit_handle(index, |h| h.set_control0(target))
    }

    /// Moves `control1` of a handle, mirroring `control0`.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::HandleIndexOutOfRange`] for an invalid index.
    pub fn move_control1(&mut self, index: usize, target: Point3) -> Result<()> {
        self.edit_handle(index, |h| h.set_control1(target))
    }

    /// Applies `edit` to one handle and notifies.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::HandleIndexOutOfRange`] for an invalid index.
    pub fn edit_handle(&mut self, index: usize, edit: impl FnOnce(&mut ControlHandle)) -> Result<()> {
        let len = self.handles.len();
        let handle = self
            .handles
            .get_mut(index)
            .ok_or(PathError::HandleIndexOutOfRange { index, len })?;
        edit(handle);
        self.notify_changed();
        Ok(())
    }

    /// Applies `edit` to the whole handle list and notifies once.
    pub fn edit_handles(&mut self, edit: impl FnOnce(&mut Vec<ControlHandle>)) {
        edit(&mut self.handles);
        self.notify_changed();
    }

    fn out_of_range(&self, index: usize) -> PathError {
        PathError::HandleIndexOutOfRange {
            index,
            len: self.handles.len(),
        }
    }
}

impl Default for CurvePath {
    fn default() -> Self {
        Self::new(Vec::new(), DEFAULT_DIVISIONS)
    }
}

impl Clone for CurvePath {
    /// Clones the path data. Listeners stay with the original.
    fn clone(&self) -> Self {
        Self::new(self.handles.clone(), self.divisions)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::RoadlineError;
    use std::cell::Cell;
    use std::rc::Rc;

    fn two_corners() -> CurvePath {
        CurvePath::new(
            vec![
                ControlHandle::corner(Point3::new(0.0, 0.0, 0.0)),
                ControlHandle::corner(Point3::new(0.0, 10.0, 0.0)),
            ],
            DEFAULT_DIVISIONS,
        )
    }

    fn curved_pair() -> CurvePath {
        CurvePath::new(
            vec![
                ControlHandle::with_controls(
                    Point3::new(0.0, 0.0, 0.0),
                    Point3::new(-1.0, 0.0, 0.0),
                    Point3::new(1.0, 2.0, 0.0),
                ),
                ControlHandle::with_controls(
                    Point3::new(10.0, 0.0, 0.0),
                    Point3::new(9.0, 0.0, 0.0),
                    Point3::new(11.0, 0.0, 0.0),
                ),
            ],
            DEFAULT_DIVISIONS,
        )
    }

    fn counting(path: &mut CurvePath) -> Rc<Cell<u32>> {
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        path.subscribe(move |_| counter.set(counter.get() + 1));
        hits
    }

    #[test]
    fn validate_rejects_short_paths() {
        let path = CurvePath::new(vec![ControlHandle::corner(Point3::origin())], 10);
        assert!(matches!(
            path.validate(),
            Err(RoadlineError::Path(PathError::TooFewHandles { count: 1 }))
        ));
    }

    #[test]
    fn validate_rejects_zero_divisions() {
        let mut path = two_corners();
        path.divisions = 0;
        assert!(matches!(
            path.validate(),
            Err(RoadlineError::Path(PathError::InvalidDivisions(0)))
        ));
        assert!(two_corners().set_divisions(0).is_err());
    }

    #[test]
    fn segment_classification() {
        let mut path = two_corners();
        assert!(path.segment(0).unwrap().is_straight());
        assert!(path.segment(1).is_err());

        path.toggle_corner(0).unwrap();
        let PathSegment::Cubic(cubic) = path.segment(0).unwrap() else {
            panic!("expected a cubic segment");
        };
        let left = path.handle(0).unwrap();
        assert_eq!(cubic.control_points()[1], left.control1);
        assert_eq!(cubic.control_points()[2], left.control1);
    }

    #[test]
    fn corner_left_borrows_right_control() {
        let mut path = two_corners();
        path.toggle_corner(1).unwrap();
        let PathSegment::Cubic(cubic) = path.segment(0).unwrap() else {
            panic!("expected a cubic segment");
        };
        let right = path.handle(1).unwrap();
        assert_eq!(cubic.control_points()[1], right.control0);
        assert_eq!(cubic.control_points()[2], right.control0);
    }

    #[test]
    fn every_edit_notifies() {
        let mut path = two_corners();
        let hits = counting(&mut path);

        path.push_handle(ControlHandle::new(Point3::new(5.0, 10.0, 0.0)));
        path.insert_handle(1, ControlHandle::corner(Point3::new(0.0, 5.0, 0.0)))
            .unwrap();
        path.move_handle(0, Point3::new(1.0, 0.0, 0.0)).unwrap();
        path.move_control0(3, Point3::new(5.0, 12.0, 0.0)).unwrap();
        path.move_control1(3, Point3::new(5.0, 7.0, 0.0)).unwrap();
        path.toggle_corner(2).unwrap();
        path.set_divisions(8).unwrap();
        path.remove_handle(1).unwrap();
        path.edit_handles(|handles| handles.reverse());
        path.clear_handles();

        assert_eq!(hits.get(), 10);
        assert!(path.handles().is_empty());
    }

    #[test]
    fn failed_edit_does_not_notify() {
        let mut path = two_corners();
        let hits = counting(&mut path);
        assert!(path.remove_handle(5).is_err());
        assert!(path.insert_handle(7, ControlHandle::new(Point3::origin())).is_err());
        assert!(path.move_handle(2, Point3::origin()).is_err());
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn listener_sees_updated_path() {
        let mut path = two_corners();
        let seen = Rc::new(Cell::new(0usize));
        let sink = Rc::clone(&seen);
        path.subscribe(move |p| sink.set(p.handles().len()));
        path.push_handle(ControlHandle::corner(Point3::new(3.0, 10.0, 0.0)));
        assert_eq!(seen.get(), 3);
    }

    #[test]
    fn unsubscribed_listener_is_silent() {
        let mut path = two_corners();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let token = path.subscribe(move |_| counter.set(counter.get() + 1));
        let other = counting(&mut path);

        assert!(path.unsubscribe(token));
        path.notify_changed();
        assert_eq!(hits.get(), 0);
        assert_eq!(other.get(), 1);
        assert_eq!(path.subscriber_count(), 1);
    }

    #[test]
    fn clone_drops_listeners() {
        let mut path = two_corners();
        let _hits = counting(&mut path);
        assert_eq!(path.clone().subscriber_count(), 0);
    }

    #[test]
    fn added_handle_between_sits_on_midpoint() {
        let mut path = curved_pair();
        let hits = counting(&mut path);
        assert_eq!(path.add_handle(Some(0)).unwrap(), 1);
        assert_eq!(hits.get(), 1);

        let added = path.handle(1).unwrap();
        assert_eq!(added.position, Point3::new(5.0, 0.0, 0.0));
        assert_eq!(added.control0, Point3::new(4.0, 0.0, 0.0));
        assert_eq!(added.control1, Point3::new(6.0, 2.0, 0.0));
        assert!(!added.is_corner);
        assert_eq!(path.handles().len(), 3);
    }

    #[test]
    fn appended_handle_extends_last_step() {
        use approx::assert_relative_eq;

        let mut path = curved_pair();
        assert_eq!(path.add_handle(None).unwrap(), 2);
        let added = path.handle(2).unwrap();
        assert_relative_eq!(added.position, Point3::new(13.0, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(added.control0, Point3::new(14.0, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(added.control1, Point3::new(12.0, 0.0, 0.0), epsilon = 1e-12);

        // Selecting the last handle appends the same way.
        let mut path = curved_pair();
        assert_eq!(path.add_handle(Some(1)).unwrap(), 2);
    }

    #[test]
    fn added_handle_copies_corner_flag() {
        let mut path = two_corners();
        path.add_handle(Some(0)).unwrap();
        let added = path.handle(1).unwrap();
        assert!(added.is_corner);
        assert_eq!(added.position, Point3::new(0.0, 5.0, 0.0));
        assert_eq!(added.control0, added.position);
    }

    #[test]
    fn first_handles_drop_below_origin() {
        let mut path = CurvePath::default();
        assert_eq!(path.add_handle(None).unwrap(), 0);
        assert_eq!(path.handle(0).unwrap(), &ControlHandle::new(Point3::new(0.0, -5.0, 0.0)));

        path.edit_handle(0, |h| h.is_corner = true).unwrap();
        assert_eq!(path.add_handle(None).unwrap(), 1);
        let second = path.handle(1).unwrap();
        assert!(second.is_corner);
        assert_eq!(second.position, Point3::new(0.0, -5.0, 0.0));
    }

    #[test]
    fn add_after_missing_handle_fails_quietly() {
        let mut path = two_corners();
        let hits = counting(&mut path);
        assert!(matches!(
            path.add_handle(Some(2)),
            Err(RoadlineError::Path(PathError::HandleIndexOutOfRange { index: 2, len: 2 }))
        ));
        assert_eq!(hits.get(), 0);
        assert_eq!(path.handles().len(), 2);
    }
}
