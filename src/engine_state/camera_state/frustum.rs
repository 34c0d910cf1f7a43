//! # View Frustum
//!
//! Six-plane frustum extraction and axis-aligned box tests used to decide which
//! chunk columns the viewer can possibly see.
//!
//! Planes are extracted from a combined view-projection matrix with the
//! Gribb–Hartmann method for OpenGL-style clip space (`-w <= x, y, z <= w`).
//! A point `p` is inside a plane when `normal · p + distance >= 0`.

use cgmath::{InnerSpace, Matrix, Matrix4, Point3, Vector3, Vector4};

/// An oriented plane in Hessian normal form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit normal pointing into the inside half-space.
    pub normal: Vector3<f32>,
    /// Signed offset of the plane along its normal.
    pub distance: f32,
}

impl Plane {
    /// Creates a plane, normalising `normal` (and `distance` with it) when possible.
    pub fn new(normal: Vector3<f32>, distance: f32) -> Self {
        let length = normal.magnitude();
        if length > 0.0 {
            Self {
                normal: normal / length,
                distance: distance / length,
            }
        } else {
            Self { normal, distance }
        }
    }

    fn from_row(row: Vector4<f32>) -> Self {
        Self::new(Vector3::new(row.x, row.y, row.z), row.w)
    }

    /// Signed distance from the plane; positive on the inside.
    #[inline]
    pub fn signed_distance(&self, point: Point3<f32>) -> f32 {
        self.normal.x * point.x + self.normal.y * point.y + self.normal.z * point.z + self.distance
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Point3<f32>,
    /// Maximum corner.
    pub max: Point3<f32>,
}

impl Aabb {
    /// Creates a box from its corners.
    pub fn new(min: Point3<f32>, max: Point3<f32>) -> Self {
        Self { min, max }
    }

    /// Midpoint of the box.
    pub fn center(&self) -> Point3<f32> {
        Point3::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
            (self.min.z + self.max.z) * 0.5,
        )
    }

    /// The corner furthest along `direction`.
    fn positive_vertex(&self, direction: Vector3<f32>) -> Point3<f32> {
        Point3::new(
            if direction.x >= 0.0 { self.max.x } else { self.min.x },
            if direction.y >= 0.0 { self.max.y } else { self.min.y },
            if direction.z >= 0.0 { self.max.z } else { self.min.z },
        )
    }
}

/// A convex view volume bounded by six planes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    /// Left, right, bottom, top, near, far.
    pub planes: [Plane; 6],
}

impl Frustum {
    /// Builds a frustum from explicit planes.
    pub fn new(planes: [Plane; 6]) -> Self {
        Self { planes }
    }

    /// Extracts the six clip planes of a view-projection matrix.
    pub fn from_matrix(view_projection: Matrix4<f32>) -> Self {
        let r0 = view_projection.row(0);
        let r1 = view_projection.row(1);
        let r2 = view_projection.row(2);
        let r3 = view_projection.row(3);

        Self {
            planes: [
                Plane::from_row(r3 + r0),
                Plane::from_row(r3 - r0),
                Plane::from_row(r3 + r1),
                Plane::from_row(r3 - r1),
                Plane::from_row(r3 + r2),
                Plane::from_row(r3 - r2),
            ],
        }
    }

    /// Returns `true` if the point is inside or on every plane.
    pub fn contains_point(&self, point: Point3<f32>) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.signed_distance(point) >= 0.0)
    }

    /// Conservative box test: `false` only when the box lies entirely outside
    /// at least one plane.
    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.signed_distance(aabb.positive_vertex(plane.normal)) >= 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{perspective, Deg};

    fn looking_down_positive_x() -> Frustum {
        let view = Matrix4::look_to_rh(
            Point3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::unit_y(),
        );
        let projection = perspective(Deg(60.0f32), 1.0, 0.1, 100.0);
        Frustum::from_matrix(projection * view)
    }

    #[test]
    fn extracted_planes_bound_the_view_volume() {
        let frustum = looking_down_positive_x();
        assert!(frustum.contains_point(Point3::new(10.0, 0.0, 0.0)));
        assert!(!frustum.contains_point(Point3::new(-10.0, 0.0, 0.0)));
        assert!(!frustum.contains_point(Point3::new(200.0, 0.0, 0.0)));
        assert!(!frustum.contains_point(Point3::new(10.0, 50.0, 0.0)));
    }

    #[test]
    fn boxes_behind_the_viewer_are_rejected() {
        let frustum = looking_down_positive_x();
        let behind = Aabb::new(Point3::new(-40.0, -5.0, -5.0), Point3::new(-8.0, 5.0, 5.0));
        let ahead = Aabb::new(Point3::new(20.0, -5.0, -5.0), Point3::new(30.0, 5.0, 5.0));
        let around = Aabb::new(Point3::new(-5.0, -5.0, -5.0), Point3::new(5.0, 5.0, 5.0));
        assert!(!frustum.intersects_aabb(&behind));
        assert!(frustum.intersects_aabb(&ahead));
        assert!(frustum.intersects_aabb(&around));
    }

    #[test]
    fn plane_new_normalises() {
        let plane = Plane::new(Vector3::new(0.0, 2.0, 0.0), 4.0);
        assert_eq!(plane.normal, Vector3::new(0.0, 1.0, 0.0));
        assert_eq!(plane.distance, 2.0);
        assert_eq!(plane.signed_distance(Point3::new(7.0, -2.0, 3.0)), 0.0);
    }
}
