//! In-memory scene and tracking session
//!
//! A stand-in for the rendering and tracking collaborator. The camera looks
//! straight down the -Y axis with an orthographic projection: view point
//! `(x, y)` maps to world `(x / pixels_per_unit, _, y / pixels_per_unit)`.
//! Hits are ordered by height, topmost first, which is nearest to the camera.

use crate::graph::{
    Anchor, AnchorKind, HitTestFilter, PlaneDetection, SceneGraph, SurfaceHit, TrackingConfig,
    TrackingSession,
};
use crate::node::{NodeId, ObjectNode};
use glam::{Mat4, Vec2, Vec3};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// A detected horizontal plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectedPlane {
    pub anchor_id: u64,
    pub center: Vec3,
    pub extent: Vec2,
}

impl DetectedPlane {
    fn contains(&self, x: f32, z: f32) -> bool {
        let half = self.extent * 0.5;
        (x - self.center.x).abs() <= half.x && (z - self.center.z).abs() <= half.y
    }
}

#[derive(Debug, Clone)]
pub struct MemoryScene {
    pixels_per_unit: f32,
    nodes: BTreeMap<NodeId, ObjectNode>,
    next_id: u64,
    planes: Vec<DetectedPlane>,
    tracking: Option<TrackingConfig>,
}

impl Default for MemoryScene {
    fn default() -> Self {
        Self::with_pixels_per_unit(100.0)
    }
}

impl MemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pixels_per_unit(pixels_per_unit: f32) -> Self {
        Self {
            pixels_per_unit,
            nodes: BTreeMap::new(),
            next_id: 1,
            planes: Vec::new(),
            tracking: None,
        }
    }

    /// World X/Z under a view point
    pub fn unproject(&self, point: Vec2) -> Vec2 {
        point / self.pixels_per_unit
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &ObjectNode)> {
        self.nodes.iter().map(|(id, node)| (*id, node))
    }

    pub fn planes(&self) -> &[DetectedPlane] {
        &self.planes
    }

    pub fn is_running(&self) -> bool {
        self.tracking.is_some()
    }

    pub fn tracking_config(&self) -> Option<&TrackingConfig> {
        self.tracking.as_ref()
    }

    /// Feed an anchor as if the tracker had found it
    ///
    /// Horizontal planes become hit-testable while the session runs with
    /// horizontal detection enabled. Returns whether the anchor was accepted.
    pub fn detect(&mut self, anchor: Anchor) -> bool {
        let Some(config) = self.tracking else {
            return false;
        };

        match anchor.kind {
            AnchorKind::Plane { center, extent } => {
                if config.plane_detection == PlaneDetection::Vertical {
                    return false;
                }
                self.planes.push(DetectedPlane {
                    anchor_id: anchor.id,
                    center,
                    extent,
                });
                debug!(anchor = anchor.id, ?center, ?extent, "Plane detected");
                true
            }
            AnchorKind::Point { .. } => true,
        }
    }

    fn plane_hits(&self, x: f32, z: f32) -> impl Iterator<Item = SurfaceHit> + '_ {
        self.planes
            .iter()
            .filter(move |plane| plane.contains(x, z))
            .map(move |plane| SurfaceHit {
                node: None,
                world_transform: Mat4::from_translation(Vec3::new(x, plane.center.y, z)),
            })
    }
}

impl SceneGraph for MemoryScene {
    fn hit_test(&self, point: Vec2, filter: HitTestFilter) -> Vec<SurfaceHit> {
        let ground = self.unproject(point);
        let (x, z) = (ground.x, ground.y);

        let mut hits: Vec<SurfaceHit> = match filter {
            HitTestFilter::ExistingPlane => self.plane_hits(x, z).collect(),
            HitTestFilter::Any => {
                let node_hits = self.nodes.iter().filter_map(|(id, node)| {
                    let bounds = node.world_bounds();
                    bounds.contains_xz(x, z).then(|| SurfaceHit {
                        node: Some(*id),
                        world_transform: Mat4::from_translation(Vec3::new(x, bounds.max.y, z)),
                    })
                });
                node_hits.chain(self.plane_hits(x, z)).collect()
            }
        };

        hits.sort_by(|a, b| b.world_position().y.total_cmp(&a.world_position().y));
        hits
    }

    fn add_node(&mut self, node: ObjectNode) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, node);
        id
    }

    fn node(&self, id: NodeId) -> Option<&ObjectNode> {
        self.nodes.get(&id)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut ObjectNode> {
        self.nodes.get_mut(&id)
    }
}

impl TrackingSession for MemoryScene {
    fn run(&mut self, config: &TrackingConfig) {
        info!(plane_detection = ?config.plane_detection, "Tracking session running");
        self.tracking = Some(*config);
    }

    fn pause(&mut self) {
        info!("Tracking session paused");
        self.tracking = None;
    }
}
