pub mod asset;
pub mod curve;
pub mod handle;
pub mod observer;
pub mod path;

pub use asset::PathAsset;
pub use curve::{CubicBezier, Curve, CurveDomain, LineSegment, PathSegment};
pub use handle::ControlHandle;
pub use observer::{ChangeObservers, Subscription};
pub use path::{CurvePath, DEFAULT_DIVISIONS};
