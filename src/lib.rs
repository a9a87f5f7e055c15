pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod tessellation;
pub mod tracking;

pub use error::{Result, RoadlineError};
pub use geometry::{ControlHandle, CurvePath, PathAsset, Subscription};
pub use tessellation::{NormalMode, RibbonMesh, RibbonMeshBuilder, RibbonStyle};
pub use tracking::{ArcTracker, TrackPose};
