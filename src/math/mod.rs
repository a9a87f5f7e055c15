pub mod travel_plane;

pub use travel_plane::TravelPlane;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Normalizes `v`, returning the zero vector when it is too short to have a direction.
#[must_use]
pub fn normalize_or_zero(v: &Vector3) -> Vector3 {
    v.try_normalize(TOLERANCE).unwrap_or_else(Vector3::zeros)
}

/// Projects `v` onto the plane orthogonal to `normal`.
///
/// `normal` does not need to be unit length. A zero normal returns `v` unchanged.
#[must_use]
pub fn project_on_plane(v: &Vector3, normal: &Vector3) -> Vector3 {
    let sq = normal.norm_squared();
    if sq < TOLERANCE * TOLERANCE {
        return *v;
    }
    v - normal * (v.dot(normal) / sq)
}

/// Unsigned angle between two vectors in radians, `0` if either is zero-length.
#[must_use]
pub fn angle_between(a: &Vector3, b: &Vector3) -> f64 {
    let denom = (a.norm_squared() * b.norm_squared()).sqrt();
    if denom < TOLERANCE {
        return 0.0;
    }
    (a.dot(b) / denom).clamp(-1.0, 1.0).acos()
}
