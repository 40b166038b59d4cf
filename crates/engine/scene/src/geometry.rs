//! Bounding boxes, footprints and pivot recentering

use crate::node::ObjectNode;
use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for Aabb {
    fn default() -> Self {
        Self {
            min: Vec3::ZERO,
            max: Vec3::ZERO,
        }
    }
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Extent along each axis
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Geometric center of the box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Whether a point on the ground plane lies inside the box footprint
    pub fn contains_xz(&self, x: f32, z: f32) -> bool {
        x >= self.min.x && x <= self.max.x && z >= self.min.z && z <= self.max.z
    }

    /// Axis-aligned bounds of this box after applying `matrix`
    pub fn transformed(&self, matrix: Mat4) -> Aabb {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);

        for i in 0..8 {
            let corner = Vec3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            );
            let p = matrix.transform_point3(corner);
            min = min.min(p);
            max = max.max(p);
        }

        Aabb { min, max }
    }
}

/// Compute the footprint center of a bounding box on the ground plane
///
/// Returns half the X extent and half the Z extent. This is measured from
/// the box's minimum corner, so it matches the true center only for assets
/// whose bounds start at the origin.
pub fn footprint_center(min: Vec3, max: Vec3) -> (f32, f32) {
    let width = max.x - min.x;
    let depth = max.z - min.z;
    (width / 2.0, depth / 2.0)
}

/// Pivot matrix with an identity basis and translation `(center_x, 0, center_z)`
pub fn pivot_matrix(center_x: f32, center_z: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(center_x, 0.0, center_z))
}

/// Rewrite a node's pivot so it rotates and scales about its footprint center
///
/// Must run once, right after placement and before any manipulation. The
/// pivot is not recomputed after scaling.
pub fn recenter_pivot(node: &mut ObjectNode, center_x: f32, center_z: f32) {
    node.pivot = pivot_matrix(center_x, center_z);
}
