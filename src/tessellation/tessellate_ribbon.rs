use tracing::debug;

use crate::error::{MeshError, Result};
use crate::math::{angle_between, project_on_plane, Point2, Point3, Vector3, TOLERANCE};

use super::ribbon_style::{NormalMode, RibbonStyle};
use super::{RemoveSmallSteps, RibbonMesh};

/// Share of the edge width by which the outer top corner of a curb is pushed out.
const CURB_SLOPE: f64 = 0.8;

/// Reference axis the first cross-section hangs along.
fn down() -> Vector3 {
    -Vector3::y()
}

/// One independently extruded strip of the ribbon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Floor,
    LeftEdge,
    RightEdge,
}

/// Orientation of one cross-section.
#[derive(Debug, Clone, Copy)]
struct SectionFrame {
    /// Direction the section extends from the path (thickness).
    height_dir: Vector3,
    /// Direction across the path.
    right: Vector3,
}

/// Extrudes a rectangular cross-section along sampled points and tangents.
///
/// Each sample gets four vertices (top-left, top-right, bottom-right,
/// bottom-left relative to the frame). The frame is carried from sample to
/// sample so the ribbon does not twist, flipped when it would cross to the
/// other side of the path, and stretched at turns so width and height stay
/// nominal when measured across the direction of travel.
#[derive(Debug)]
pub struct TessellateRibbon {
    points: Vec<Point3>,
    tangents: Vec<Vector3>,
    style: RibbonStyle,
}

impl TessellateRibbon {
    /// Creates a new ribbon tessellation operation.
    #[must_use]
    pub fn new(points: Vec<Point3>, tangents: Vec<Vector3>, style: RibbonStyle) -> Self {
        Self {
            points,
            tangents,
            style,
        }
    }

    /// Executes the tessellation.
    ///
    /// Samples closer than `min_position_step` are removed first. An empty
    /// input yields an empty mesh.
    ///
    /// # Errors
    ///
    /// Returns an error if the style is invalid or the point and tangent
    /// counts differ.
    pub fn execute(&self) -> Result<RibbonMesh> {
        self.style.validate()?;
        if self.points.len() != self.tangents.len() {
            return Err(MeshError::MismatchedSamples {
                points: self.points.len(),
                tangents: self.tangents.len(),
            }
            .into());
        }

        let mut points = self.points.clone();
        let mut tangents = self.tangents.clone();
        RemoveSmallSteps::new(self.style.min_position_step).execute(&mut points, &mut tangents)?;

        let mut mesh = RibbonMesh::default();
        if points.is_empty() {
            return Ok(mesh);
        }

        if self.style.has_floor {
            self.add_profile(&mut mesh, &points, &tangents, Profile::Floor);
        }
        if self.style.has_edge {
            self.add_profile(&mut mesh, &points, &tangents, Profile::LeftEdge);
            self.add_profile(&mut mesh, &points, &tangents, Profile::RightEdge);
        }
        mesh.recalculate_normals();
        mesh.recalculate_bounds();

        debug!(
            input_samples = self.points.len(),
            samples = points.len(),
            vertices = mesh.vertices.len(),
            floor_triangles = mesh.floor_indices.len(),
            edge_triangles = mesh.edge_indices.len(),
            "tessellated ribbon"
        );
        Ok(mesh)
    }

    /// Appends one profile's vertices, UVs and triangles to `mesh`.
    #[allow(clippy::cast_possible_truncation)]
    fn add_profile(&self, mesh: &mut RibbonMesh, points: &[Point3], tangents: &[Vector3], profile: Profile) {
        let style = &self.style;
        let (width, height) = match profile {
            Profile::Floor => (style.width, style.height),
            Profile::LeftEdge | Profile::RightEdge => (style.edge_width, style.height + style.edge_height),
        };
        let n = points.len();
        let mut frame = SectionFrame {
            height_dir: down(),
            right: Vector3::zeros(),
        };
        let mut distance = 0.0;

        for i in 0..n {
            let center = points[i];
            let prev_frame = frame;
            frame = self.propagate_frame(&prev_frame.height_dir, &tangents[i]);

            let mut section_height = height;
            let mut section_width = width;
            let mut floor_width = style.width;
            if i > 0 {
                let prev = points[i - 1];
                frame = orient_frame(frame, &center, &prev, &prev_frame.height_dir);

                let travel = center - prev;
                let width_stretch = stretch(&travel, &frame.right);
                section_height *= stretch(&travel, &frame.height_dir);
                section_width *= width_stretch;
                floor_width *= width_stretch;
                distance += travel.norm();
            }

            let SectionFrame { height_dir, right } = frame;
            let offset = match profile {
                Profile::Floor => Vector3::zeros(),
                Profile::LeftEdge => {
                    right * (floor_width * 0.5 + style.edge_width * 0.5) - height_dir * (style.edge_height * 0.5)
                }
                Profile::RightEdge => {
                    -right * (floor_width * 0.5 + style.edge_width * 0.5) - height_dir * (style.edge_height * 0.5)
                }
            };
            let half = right * (section_width * 0.5);
            let depth = height_dir * section_height;
            let mut section = [
                center + half + offset,
                center - half + offset,
                center - half + depth + offset,
                center + half + depth + offset,
            ];
            // Curbs lean outward instead of standing as vertical walls.
            match profile {
                Profile::Floor => {}
                Profile::LeftEdge => section[1] += right * (section_width * CURB_SLOPE),
                Profile::RightEdge => section[0] -= right * (section_width * CURB_SLOPE),
            }

            let start = mesh.vertices.len() as u32;
            mesh.vertices.extend_from_slice(&section);

            let v = distance / width;
            mesh.uvs.extend_from_slice(&[
                Point2::new(0.0, v),
                Point2::new(1.0, v),
                Point2::new(1.0, v),
                Point2::new(0.0, v),
            ]);

            let triangles = match profile {
                Profile::Floor => &mut mesh.floor_indices,
                Profile::LeftEdge | Profile::RightEdge => &mut mesh.edge_indices,
            };
            if i == 0 {
                triangles.extend_from_slice(&[[start, start + 1, start + 2], [start, start + 2, start + 3]]);
            } else {
                stitch_sections(triangles, start);
            }
            if i == n - 1 {
                triangles.extend_from_slice(&[[start + 1, start, start + 2], [start + 2, start, start + 3]]);
            }
        }
    }

    /// Derives the frame at a sample from the previous height direction.
    fn propagate_frame(&self, prev_height_dir: &Vector3, tangent: &Vector3) -> SectionFrame {
        let reference = match self.style.normal_mode {
            NormalMode::Upward => down(),
            NormalMode::Smooth => *prev_height_dir,
        };
        let height_dir = project_on_plane(&reference, tangent)
            .try_normalize(TOLERANCE)
            .or_else(|| project_on_plane(prev_height_dir, tangent).try_normalize(TOLERANCE))
            .unwrap_or_else(|| perpendicular(tangent));
        SectionFrame {
            height_dir,
            right: height_dir.cross(tangent),
        }
    }
}

/// Flips `frame` when its height direction falls on the other side of the
/// travel plane than the previous sample's.
///
/// The plane runs through the current point, the previous point and the
/// current point offset along `right`.
fn orient_frame(frame: SectionFrame, center: &Point3, prev: &Point3, prev_height_dir: &Vector3) -> SectionFrame {
    let across = center + frame.right;
    if same_side(
        center,
        prev,
        &across,
        &(center + frame.height_dir),
        &(prev + prev_height_dir),
    ) {
        frame
    } else {
        SectionFrame {
            height_dir: -frame.height_dir,
            right: -frame.right,
        }
    }
}

/// Whether `p` and `q` lie on the same side of the plane through `a`, `b`, `c`.
///
/// Points on the plane count as the negative side. A degenerate plane
/// reports every pair as the same side.
fn same_side(a: &Point3, b: &Point3, c: &Point3, p: &Point3, q: &Point3) -> bool {
    let Some(normal) = (b - a).cross(&(c - a)).try_normalize(TOLERANCE) else {
        return true;
    };
    let dp = normal.dot(&(p - a));
    let dq = normal.dot(&(q - a));
    (dp > 0.0) == (dq > 0.0)
}

/// Factor that keeps a cross-section dimension nominal across `travel`.
///
/// `1 / sin(angle(travel, axis))`, left at `1` when the axis runs along travel.
fn stretch(travel: &Vector3, axis: &Vector3) -> f64 {
    let sin = angle_between(travel, axis).sin();
    if sin.abs() < TOLERANCE {
        1.0
    } else {
        1.0 / sin
    }
}

/// Any unit vector perpendicular to `v`, or the down axis if `v` is zero.
fn perpendicular(v: &Vector3) -> Vector3 {
    v.cross(&Vector3::x())
        .try_normalize(TOLERANCE)
        .or_else(|| v.cross(&Vector3::z()).try_normalize(TOLERANCE))
        .unwrap_or_else(down)
}

/// Connects the section starting at `start` to the one before it.
///
/// Each of the four sides becomes a quad of two triangles; the last side
/// wraps around to the first corner.
fn stitch_sections(triangles: &mut Vec<[u32; 3]>, start: u32) {
    for j in start..start + 4 {
        if j < start + 3 {
            triangles.extend_from_slice(&[[j - 4, j, j + 1], [j - 4, j + 1, j - 3]]);
        } else {
            triangles.extend_from_slice(&[[j - 4, j, j - 3], [j - 4, j - 3, j - 7]]);
        }
    }
}
