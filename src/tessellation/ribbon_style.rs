use serde::{Deserialize, Serialize};

use crate::error::{MeshError, Result};

/// How the height direction of each cross-section is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalMode {
    /// Every sample projects the fixed down axis, keeping the floor level.
    #[default]
    Upward,
    /// Every sample projects the previous height direction, following banking.
    Smooth,
}

/// Dimensions and switches for ribbon extrusion.
///
/// Deserializes with defaults for missing fields. Call
/// [`RibbonStyle::validate`] (done by the tessellator) before use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RibbonStyle {
    /// Floor width across the path. Also the UV tiling length.
    pub width: f64,
    /// Floor thickness.
    pub height: f64,
    /// Samples closer than this to their predecessor are dropped.
    pub min_position_step: f64,
    /// Whether the floor profile is generated.
    pub has_floor: bool,
    /// Whether the two edge profiles are generated.
    pub has_edge: bool,
    /// Width of each edge profile. Also the edge UV tiling length.
    pub edge_width: f64,
    /// How far an edge rises above the floor.
    pub edge_height: f64,
    pub normal_mode: NormalMode,
}

impl Default for RibbonStyle {
    fn default() -> Self {
        Self {
            width: 3.0,
            height: 1.0,
            min_position_step: 0.5,
            has_floor: true,
            has_edge: true,
            edge_width: 0.3,
            edge_height: 0.2,
            normal_mode: NormalMode::Upward,
        }
    }
}

impl RibbonStyle {
    /// Creates a style with the given floor size and default edges.
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting style fails [`RibbonStyle::validate`].
    pub fn new(width: f64, height: f64) -> Result<Self> {
        let style = Self {
            width,
            height,
            ..Self::default()
        };
        style.validate()?;
        Ok(style)
    }

    /// Checks every dimension.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidParameters`] if `width`, `height` or
    /// `edge_width` is not positive, if `edge_height` or `min_position_step`
    /// is negative, or if any value is not finite.
    pub fn validate(&self) -> Result<()> {
        positive("width", self.width)?;
        positive("height", self.height)?;
        positive("edge_width", self.edge_width)?;
        non_negative("edge_height", self.edge_height)?;
        non_negative("min_position_step", self.min_position_step)?;
        Ok(())
    }
}

fn positive(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(MeshError::InvalidParameters(format!("{name} must be positive, got {value}")).into());
    }
    Ok(())
}

fn non_negative(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(
            MeshError::InvalidParameters(format!("{name} must not be negative, got {value}")).into(),
        );
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let style = RibbonStyle::default();
        assert!(style.validate().is_ok());
        assert!((style.width - 3.0).abs() < f64::EPSILON);
        assert_eq!(style.normal_mode, NormalMode::Upward);
    }

    #[test]
    fn new_with_zero_width_fails() {
        assert!(RibbonStyle::new(0.0, 1.0).is_err());
        assert!(RibbonStyle::new(2.0, -1.0).is_err());
        assert!(RibbonStyle::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn negative_step_fails() {
        let style = RibbonStyle {
            min_position_step: -0.1,
            ..RibbonStyle::default()
        };
        assert!(style.validate().is_err());
    }

    #[test]
    fn partial_config_uses_defaults() {
        let style: RibbonStyle =
            serde_json::from_str(r#"{ "width": 6.0, "normal_mode": "smooth" }"#).unwrap();
        assert!((style.width - 6.0).abs() < f64::EPSILON);
        assert!((style.height - 1.0).abs() < f64::EPSILON);
        assert_eq!(style.normal_mode, NormalMode::Smooth);
        assert!(style.has_edge);
    }
}
