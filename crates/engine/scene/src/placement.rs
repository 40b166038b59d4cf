//! Placing new objects on detected planes

use crate::asset::AssetTemplate;
use crate::geometry::{footprint_center, recenter_pivot};
use crate::graph::{HitTestFilter, SceneGraph, SurfaceHit};
use crate::node::NodeId;
use glam::Vec2;
use tracing::{info, trace};

/// Turns plane hits into placed objects
#[derive(Debug, Clone)]
pub struct PlacementController {
    template: AssetTemplate,
}

impl PlacementController {
    pub fn new(template: AssetTemplate) -> Self {
        Self { template }
    }

    pub fn template(&self) -> &AssetTemplate {
        &self.template
    }

    /// Hit-test detected planes at `location` and place an object on the nearest
    pub fn on_tap<G: SceneGraph + ?Sized>(&self, graph: &mut G, location: Vec2) -> Option<NodeId> {
        let hits = graph.hit_test(location, HitTestFilter::ExistingPlane);
        if hits.is_empty() {
            trace!(?location, "Tap missed every detected plane");
        }
        self.place_object(graph, &hits)
    }

    /// Place one new object at the first hit
    ///
    /// Every call creates a new node; repeated placements stack without limit.
    pub fn place_object<G: SceneGraph + ?Sized>(
        &self,
        graph: &mut G,
        hits: &[SurfaceHit],
    ) -> Option<NodeId> {
        let hit = hits.first()?;

        let mut node = self.template.instantiate();
        node.position = hit.world_position();

        let (center_x, center_z) = footprint_center(node.bounds.min, node.bounds.max);
        recenter_pivot(&mut node, center_x, center_z);

        let position = node.position;
        let id = graph.add_node(node);
        info!(%id, ?position, center_x, center_z, "Placed object");
        Some(id)
    }
}
