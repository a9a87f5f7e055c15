use serde::{Deserialize, Serialize};

use crate::error::{AssetError, PathError, Result};

use super::path::DEFAULT_DIVISIONS;
use super::{ControlHandle, CurvePath};

/// Persisted form of a [`CurvePath`].
///
/// ```json
/// { "handles": [{ "position": [0, 0, 0], "control0": [0, 3, 0],
///                 "control1": [0, -3, 0], "is_corner": false }],
///   "divisions": 50 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathAsset {
    pub handles: Vec<ControlHandle>,
    #[serde(default = "default_divisions")]
    pub divisions: i64,
}

#[allow(clippy::cast_possible_wrap)]
fn default_divisions() -> i64 {
    DEFAULT_DIVISIONS as i64
}

impl PathAsset {
    /// Parses an asset from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::Json`] for malformed input. Values are not
    /// validated here, see [`CurvePath::from_asset`].
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| AssetError::Json(e).into())
    }

    /// Serializes the asset as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| AssetError::Json(e).into())
    }
}

impl CurvePath {
    /// Builds a path from a validated asset.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::InvalidDivisions`] when `divisions <= 0` and
    /// [`PathError::TooFewHandles`] for fewer than 2 handles.
    pub fn from_asset(asset: PathAsset) -> Result<Self> {
        let divisions = usize::try_from(asset.divisions)
            .ok()
            .filter(|&d| d > 0)
            .ok_or(PathError::InvalidDivisions(asset.divisions))?;
        let path = Self::new(asset.handles, divisions);
        path.validate()?;
        Ok(path)
    }

    /// Snapshots the path data as an asset.
    #[must_use]
    pub fn to_asset(&self) -> PathAsset {
        PathAsset {
            handles: self.handles().to_vec(),
            divisions: i64::try_from(self.divisions()).unwrap_or(i64::MAX),
        }
    }
}
