//! Scene node model

use crate::geometry::Aabb;
use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Handle to a node registered in a [`SceneGraph`](crate::SceneGraph)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// A renderable object with its transform fields
///
/// Rotation is yaw only (about +Y). The pivot is applied before the node's
/// own scale, rotation and translation:
///
/// ```text
/// world = T(position) * R_y(yaw) * S(scale) * pivot⁻¹
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectNode {
    pub name: String,
    pub position: Vec3,
    /// Euler Y angle in radians, unnormalized
    pub yaw: f32,
    pub scale: Vec3,
    pub pivot: Mat4,
    /// Local-space bounds of the node's geometry
    pub bounds: Aabb,
    #[serde(default)]
    pub children: Vec<ObjectNode>,
}

impl ObjectNode {
    /// Create a node at the origin with identity transform
    pub fn new(name: impl Into<String>, bounds: Aabb) -> Self {
        Self {
            name: name.into(),
            position: Vec3::ZERO,
            yaw: 0.0,
            scale: Vec3::ONE,
            pivot: Mat4::IDENTITY,
            bounds,
            children: Vec::new(),
        }
    }

    /// Builder: attach a child node
    pub fn with_child(mut self, child: ObjectNode) -> Self {
        self.children.push(child);
        self
    }

    /// Orientation as a quaternion
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }

    /// Node-to-world matrix including the pivot
    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation(), self.position)
            * self.pivot.inverse()
    }

    /// World-space bounds of the node's geometry
    pub fn world_bounds(&self) -> Aabb {
        self.bounds.transformed(self.world_matrix())
    }

    /// Translate along the node's own axes
    ///
    /// The offset is rotated by the node's orientation but not scaled.
    pub fn local_translate(&mut self, offset: Vec3) {
        self.position += self.rotation() * offset;
    }

    /// Depth-first search for a node by name, including `self`
    pub fn find(&self, name: &str) -> Option<&ObjectNode> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{footprint_center, recenter_pivot};
    use std::f32::consts::FRAC_PI_2;

    fn unit_chair() -> ObjectNode {
        ObjectNode::new("chairNode", Aabb::new(Vec3::ZERO, Vec3::new(2.0, 1.0, 2.0)))
    }

    #[test]
    fn test_world_matrix_identity() {
        let node = unit_chair();
        assert_eq!(node.world_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn test_pivot_moves_footprint_center_to_position() {
        let mut node = unit_chair();
        let (cx, cz) = footprint_center(node.bounds.min, node.bounds.max);
        recenter_pivot(&mut node, cx, cz);
        node.position = Vec3::new(5.0, 0.0, 5.0);

        let center = node.world_matrix().transform_point3(Vec3::new(cx, 0.0, cz));
        assert!((center - node.position).length() < 1e-5);

        // Rotating keeps the footprint center fixed
        node.yaw = FRAC_PI_2;
        let center = node.world_matrix().transform_point3(Vec3::new(cx, 0.0, cz));
        assert!((center - node.position).length() < 1e-5);
    }

    #[test]
    fn test_local_translate_follows_yaw() {
        let mut node = unit_chair();
        node.local_translate(Vec3::new(1.0, 0.0, 0.0));
        assert!((node.position - Vec3::X).length() < 1e-6);

        node.position = Vec3::ZERO;
        node.yaw = FRAC_PI_2;
        node.local_translate(Vec3::new(1.0, 0.0, 0.0));
        // +X rotated a quarter turn about +Y points to -Z
        assert!((node.position - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn test_find_recursive() {
        let root = ObjectNode::new("root", Aabb::default()).with_child(
            ObjectNode::new("group", Aabb::default()).with_child(unit_chair()),
        );

        assert_eq!(root.find("chairNode").map(|n| n.bounds.max.x), Some(2.0));
        assert!(root.find("root").is_some());
        assert!(root.find("table").is_none());
    }
}
