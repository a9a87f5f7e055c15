use crate::error::Result;
use crate::geometry::CurvePath;
use crate::math::{Point3, Vector3};

use super::{RibbonMesh, RibbonStyle, TessellateRibbon};

/// Builds road meshes with a fixed, validated [`RibbonStyle`].
///
/// Each call regenerates the whole mesh. To rebuild on edits, call
/// [`RibbonMeshBuilder::generate_for_path`] from a [`CurvePath`] change
/// listener.
#[derive(Debug, Clone, Copy, Default)]
pub struct RibbonMeshBuilder {
    style: RibbonStyle,
}

impl RibbonMeshBuilder {
    /// Creates a builder.
    ///
    /// # Errors
    ///
    /// Returns an error if `style` fails [`RibbonStyle::validate`].
    pub fn new(style: RibbonStyle) -> Result<Self> {
        style.validate()?;
        Ok(Self { style })
    }

    #[must_use]
    pub fn style(&self) -> &RibbonStyle {
        &self.style
    }

    /// Extrudes the ribbon along sampled points and tangents.
    ///
    /// # Errors
    ///
    /// Returns an error if the point and tangent counts differ.
    pub fn generate(&self, points: &[Point3], tangents: &[Vector3]) -> Result<RibbonMesh> {
        TessellateRibbon::new(points.to_vec(), tangents.to_vec(), self.style).execute()
    }

    /// Samples `path` and extrudes the ribbon along it.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be sampled.
    pub fn generate_for_path(&self, path: &CurvePath) -> Result<RibbonMesh> {
        let samples = path.sample()?;
        TessellateRibbon::new(samples.points, samples.tangents, self.style).execute()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{PathError, RoadlineError};
    use crate::geometry::ControlHandle;
    use crate::tessellation::{EDGE_SUBMESH, FLOOR_SUBMESH};

    fn corner_path() -> CurvePath {
        CurvePath::new(
            vec![
                ControlHandle::corner(Point3::new(0.0, 0.0, 0.0)),
                ControlHandle::corner(Point3::new(0.0, 10.0, 0.0)),
                ControlHandle::corner(Point3::new(10.0, 10.0, 0.0)),
            ],
            8,
        )
    }

    #[test]
    fn invalid_style_is_rejected_up_front() {
        let style = RibbonStyle {
            edge_width: -1.0,
            ..RibbonStyle::default()
        };
        assert!(RibbonMeshBuilder::new(style).is_err());
    }

    #[test]
    fn path_mesh_has_both_submeshes() {
        let builder = RibbonMeshBuilder::default();
        let mesh = builder.generate_for_path(&corner_path()).unwrap();
        // A straight corner run samples each handle once.
        assert_eq!(mesh.vertices.len(), 3 * 4 * 3);
        assert_eq!(mesh.submesh(FLOOR_SUBMESH).len(), 4 + 8 * 2);
        assert_eq!(mesh.submesh(EDGE_SUBMESH).len(), 2 * (4 + 8 * 2));
        let bounds = mesh.bounds.unwrap();
        assert!(bounds.max.y >= 10.0);
    }

    #[test]
    fn floor_only_and_edges_only() {
        let builder = RibbonMeshBuilder::new(RibbonStyle {
            has_edge: false,
            ..RibbonStyle::default()
        })
        .unwrap();
        let mesh = builder.generate_for_path(&corner_path()).unwrap();
        assert!(mesh.edge_indices.is_empty());
        assert_eq!(mesh.vertices.len(), 12);

        let builder = RibbonMeshBuilder::new(RibbonStyle {
            has_floor: false,
            ..RibbonStyle::default()
        })
        .unwrap();
        let mesh = builder.generate_for_path(&corner_path()).unwrap();
        assert!(mesh.floor_indices.is_empty());
        assert_eq!(mesh.vertices.len(), 24);
    }

    #[test]
    fn both_profiles_disabled_gives_empty_mesh() {
        let builder = RibbonMeshBuilder::new(RibbonStyle {
            has_floor: false,
            has_edge: false,
            ..RibbonStyle::default()
        })
        .unwrap();
        assert!(builder.generate_for_path(&corner_path()).unwrap().is_empty());
    }

    #[test]
    fn unsampleable_path_fails() {
        let path = CurvePath::new(vec![ControlHandle::new(Point3::origin())], 10);
        assert!(matches!(
            RibbonMeshBuilder::default().generate_for_path(&path),
            Err(RoadlineError::Path(PathError::TooFewHandles { count: 1 }))
        ));
    }

    #[test]
    fn generate_matches_path_generation() {
        let builder = RibbonMeshBuilder::default();
        let path = corner_path();
        let samples = path.sample().unwrap();
        let direct = builder.generate(&samples.points, &samples.tangents).unwrap();
        assert_eq!(direct, builder.generate_for_path(&path).unwrap());
    }
}
