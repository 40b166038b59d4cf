//! Interfaces to the external tracking and rendering collaborator
//!
//! These traits let placement and manipulation query and mutate the scene
//! without depending on a specific AR or rendering framework.

use crate::node::{NodeId, ObjectNode};
use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// What a hit-test is allowed to intersect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitTestFilter {
    /// Only planar surfaces the tracker has already detected
    ExistingPlane,
    /// Any scene geometry
    Any,
}

/// One result of a hit-test, nearest results first
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Scene node under the touch point, if geometry was hit
    pub node: Option<NodeId>,
    /// World-space transform of the intersection
    pub world_transform: Mat4,
}

impl SurfaceHit {
    /// Translation column of the hit transform
    pub fn world_position(&self) -> Vec3 {
        self.world_transform.w_axis.truncate()
    }
}

/// Scene graph owned by the rendering collaborator
pub trait SceneGraph {
    /// Probe the scene at a view-space point
    fn hit_test(&self, point: Vec2, filter: HitTestFilter) -> Vec<SurfaceHit>;

    /// Register a node under the scene root
    fn add_node(&mut self, node: ObjectNode) -> NodeId;

    /// Look up a registered node
    fn node(&self, id: NodeId) -> Option<&ObjectNode>;

    /// Look up a registered node for mutation
    fn node_mut(&mut self, id: NodeId) -> Option<&mut ObjectNode>;
}

/// Which surfaces the tracker should detect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaneDetection {
    #[default]
    Horizontal,
    Vertical,
    Both,
}

/// Configuration handed to the tracking session when it starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TrackingConfig {
    pub plane_detection: PlaneDetection,
}

/// World-tracking session control surface
pub trait TrackingSession {
    fn run(&mut self, config: &TrackingConfig);
    fn pause(&mut self);
}

/// Kind of real-world feature the tracker anchored
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnchorKind {
    /// Horizontal plane centered at `center`, `extent` along X and Z
    Plane { center: Vec3, extent: Vec2 },
    /// Single tracked point
    Point { position: Vec3 },
}

/// Tracker record of a detected surface or point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    pub id: u64,
    #[serde(flatten)]
    pub kind: AnchorKind,
}

impl Anchor {
    pub fn is_plane(&self) -> bool {
        matches!(self.kind, AnchorKind::Plane { .. })
    }
}
