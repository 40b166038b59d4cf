//! Gesture-driven scale, yaw and planar translation of placed objects
//!
//! Each handler hit-tests all scene geometry at the touch location and acts
//! on the node under the finger. A miss is a silent no-op. The only state
//! carried between events is the explicit session state passed in by the
//! caller, which keeps the handlers usable without a live UI.

use crate::config::ArConfig;
use crate::graph::{HitTestFilter, SceneGraph};
use crate::node::{NodeId, ObjectNode};
use devices::{GesturePhase, PinchState};
use glam::{Vec2, Vec3};
use tracing::{debug, trace};

/// Yaw carried across successive pan gestures
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct YawSession {
    /// Base yaw committed when the last pan ended
    pub committed: f32,
    /// Most recently applied yaw
    pub current: f32,
}

/// Reference point for incremental long-press drags
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragSession {
    /// Touch location the next delta is measured from
    pub reference: Option<Vec2>,
}

/// All per-gesture state, owned by the dispatching context
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureSessions {
    pub yaw: YawSession,
    pub drag: DragSession,
}

/// Stateless scale/rotate/translate handlers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManipulationController {
    radians_per_pixel: f32,
    translation_scale: f32,
}

impl Default for ManipulationController {
    fn default() -> Self {
        Self::from_config(&ArConfig::default())
    }
}

impl ManipulationController {
    pub fn new(radians_per_pixel: f32, translation_scale: f32) -> Self {
        Self {
            radians_per_pixel,
            translation_scale,
        }
    }

    pub fn from_config(config: &ArConfig) -> Self {
        Self::new(config.radians_per_pixel(), config.translation_scale)
    }

    pub fn radians_per_pixel(&self) -> f32 {
        self.radians_per_pixel
    }

    pub fn translation_scale(&self) -> f32 {
        self.translation_scale
    }

    /// Node under `location`, if any geometry was hit
    fn target<G: SceneGraph + ?Sized>(graph: &G, location: Vec2) -> Option<NodeId> {
        let target = graph
            .hit_test(location, HitTestFilter::Any)
            .first()
            .and_then(|hit| hit.node);
        if target.is_none() {
            trace!(?location, "Gesture hit nothing");
        }
        target
    }

    fn target_node<'g, G: SceneGraph + ?Sized>(
        graph: &'g mut G,
        location: Vec2,
    ) -> Option<(NodeId, &'g mut ObjectNode)> {
        let id = Self::target(graph, location)?;
        graph.node_mut(id).map(|node| (id, node))
    }

    /// Pinch: multiply the target's scale by the pending ratio
    ///
    /// Applies on `Changed` only. The ratio is consumed and reset to 1.0 once
    /// applied; after a miss it stays pending in the recognizer.
    pub fn on_pinch<G: SceneGraph + ?Sized>(
        &self,
        graph: &mut G,
        phase: GesturePhase,
        location: Vec2,
        pinch: &mut PinchState,
    ) {
        if phase != GesturePhase::Changed {
            return;
        }
        let Some((id, node)) = Self::target_node(graph, location) else {
            return;
        };

        let ratio = pinch.take();
        node.scale *= ratio;
        debug!(%id, ratio, scale = ?node.scale, "Scaled object");
    }

    /// Pan: set the target's yaw from horizontal translation plus committed yaw
    ///
    /// The yaw is committed when the gesture ends, whether or not the final
    /// event hit anything.
    pub fn on_pan<G: SceneGraph + ?Sized>(
        &self,
        graph: &mut G,
        phase: GesturePhase,
        location: Vec2,
        translation: Vec2,
        session: &mut YawSession,
    ) {
        if phase == GesturePhase::Changed {
            if let Some((id, node)) = Self::target_node(graph, location) {
                session.current = session.committed + translation.x * self.radians_per_pixel;
                node.yaw = session.current;
                debug!(%id, yaw = node.yaw, "Rotated object");
            }
        }

        if phase == GesturePhase::Ended {
            session.committed = session.current;
            trace!(yaw = session.committed, "Committed yaw");
        }
    }

    /// Long press: drag the target along the ground plane
    ///
    /// Screen X maps to local X and screen Y to local Z, scaled down by the
    /// translation scale. Deltas are relative to the previous applied event.
    /// The reference is dropped when the press ends, hit or not.
    pub fn on_long_press<G: SceneGraph + ?Sized>(
        &self,
        graph: &mut G,
        phase: GesturePhase,
        location: Vec2,
        session: &mut DragSession,
    ) {
        if phase.is_terminal() {
            session.reference = None;
            return;
        }
        let Some((id, node)) = Self::target_node(graph, location) else {
            return;
        };

        match phase {
            GesturePhase::Began => {
                session.reference = Some(location);
                trace!(%id, ?location, "Drag started");
            }
            GesturePhase::Changed => {
                let Some(reference) = session.reference else {
                    return;
                };
                let delta = (location - reference) / self.translation_scale;
                node.local_translate(Vec3::new(delta.x, 0.0, delta.y));
                session.reference = Some(location);
                debug!(%id, ?delta, position = ?node.position, "Translated object");
            }
            GesturePhase::Ended | GesturePhase::Cancelled => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Aabb;
    use crate::memory::MemoryScene;
    use std::f32::consts::FRAC_PI_2;

    /// Scene with one 2x2 footprint node centered under screen point (100, 100)
    fn scene_with_node() -> (MemoryScene, NodeId) {
        let mut scene = MemoryScene::with_pixels_per_unit(100.0);
        let mut node = ObjectNode::new("chairNode", Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0)));
        node.position = Vec3::new(1.0, 0.0, 1.0);
        let id = scene.add_node(node);
        (scene, id)
    }

    const ON: Vec2 = Vec2::new(100.0, 100.0);
    const OFF: Vec2 = Vec2::new(900.0, 900.0);

    #[test]
    fn test_pinch_ignores_non_changed_phases() {
        let (mut scene, id) = scene_with_node();
        let controller = ManipulationController::default();
        let mut pinch = PinchState { scale: 2.0 };

        controller.on_pinch(&mut scene, GesturePhase::Began, ON, &mut pinch);
        controller.on_pinch(&mut scene, GesturePhase::Ended, ON, &mut pinch);

        assert_eq!(scene.node(id).unwrap().scale, Vec3::ONE);
        assert_eq!(pinch.scale, 2.0);
    }

    #[test]
    fn test_pinch_miss_keeps_ratio_pending() {
        let (mut scene, id) = scene_with_node();
        let controller = ManipulationController::default();
        let mut pinch = PinchState { scale: 2.0 };

        controller.on_pinch(&mut scene, GesturePhase::Changed, OFF, &mut pinch);
        assert_eq!(scene.node(id).unwrap().scale, Vec3::ONE);
        assert_eq!(pinch.scale, 2.0);

        controller.on_pinch(&mut scene, GesturePhase::Changed, ON, &mut pinch);
        assert_eq!(scene.node(id).unwrap().scale, Vec3::splat(2.0));
        assert_eq!(pinch.scale, 1.0);
    }

    #[test]
    fn test_pan_sets_yaw_from_translation() {
        let (mut scene, id) = scene_with_node();
        let controller = ManipulationController::default();
        let mut session = YawSession::default();

        controller.on_pan(
            &mut scene,
            GesturePhase::Changed,
            ON,
            Vec2::new(45.0, 30.0),
            &mut session,
        );
        let yaw = scene.node(id).unwrap().yaw;
        assert!((yaw - FRAC_PI_2 / 2.0).abs() < 1e-6);
        assert_eq!(session.committed, 0.0);
    }

    #[test]
    fn test_pan_end_commits_without_hit() {
        let (mut scene, _) = scene_with_node();
        let controller = ManipulationController::default();
        let mut session = YawSession::default();

        controller.on_pan(&mut scene, GesturePhase::Changed, ON, Vec2::new(90.0, 0.0), &mut session);
        controller.on_pan(&mut scene, GesturePhase::Ended, OFF, Vec2::new(90.0, 0.0), &mut session);
        assert!((session.committed - FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_cancelled_pan_does_not_commit() {
        let (mut scene, _) = scene_with_node();
        let controller = ManipulationController::default();
        let mut session = YawSession::default();

        controller.on_pan(&mut scene, GesturePhase::Changed, ON, Vec2::new(90.0, 0.0), &mut session);
        controller.on_pan(&mut scene, GesturePhase::Cancelled, ON, Vec2::ZERO, &mut session);
        assert_eq!(session.committed, 0.0);
    }

    #[test]
    fn test_drag_without_begin_is_ignored() {
        let (mut scene, id) = scene_with_node();
        let controller = ManipulationController::default();
        let mut session = DragSession::default();

        controller.on_long_press(&mut scene, GesturePhase::Changed, ON, &mut session);
        assert_eq!(scene.node(id).unwrap().position, Vec3::new(1.0, 0.0, 1.0));
        assert!(session.reference.is_none());
    }

    #[test]
    fn test_drag_maps_screen_y_to_z() {
        let (mut scene, id) = scene_with_node();
        let controller = ManipulationController::new(0.0, 10.0);
        let mut session = DragSession::default();

        controller.on_long_press(&mut scene, GesturePhase::Began, ON, &mut session);
        controller.on_long_press(
            &mut scene,
            GesturePhase::Changed,
            Vec2::new(100.0, 110.0),
            &mut session,
        );

        let position = scene.node(id).unwrap().position;
        assert!((position - Vec3::new(1.0, 0.0, 2.0)).length() < 1e-6);
        assert_eq!(session.reference, Some(Vec2::new(100.0, 110.0)));
    }

    #[test]
    fn test_drag_end_drops_reference() {
        let (mut scene, id) = scene_with_node();
        let controller = ManipulationController::new(0.0, 10.0);
        let mut session = DragSession::default();

        controller.on_long_press(&mut scene, GesturePhase::Began, ON, &mut session);
        controller.on_long_press(&mut scene, GesturePhase::Ended, OFF, &mut session);
        assert!(session.reference.is_none());

        // A stray change after the press ended has nothing to measure from
        controller.on_long_press(
            &mut scene,
            GesturePhase::Changed,
            Vec2::new(105.0, 100.0),
            &mut session,
        );
        assert_eq!(scene.node(id).unwrap().position, Vec3::new(1.0, 0.0, 1.0));
    }

    #[test]
    fn test_drag_follows_yaw_after_pan() {
        let (mut scene, id) = scene_with_node();
        let controller = ManipulationController::new(FRAC_PI_2 / 90.0, 100.0);
        let mut yaw = YawSession::default();
        let mut drag = DragSession::default();

        controller.on_pan(&mut scene, GesturePhase::Changed, ON, Vec2::new(90.0, 0.0), &mut yaw);
        controller.on_pan(&mut scene, GesturePhase::Ended, ON, Vec2::new(90.0, 0.0), &mut yaw);
        assert!((scene.node(id).unwrap().yaw - FRAC_PI_2).abs() < 1e-6);

        controller.on_long_press(&mut scene, GesturePhase::Began, ON, &mut drag);
        controller.on_long_press(
            &mut scene,
            GesturePhase::Changed,
            Vec2::new(110.0, 100.0),
            &mut drag,
        );

        // Screen +X drags along the node's local +X, which a quarter turn points to -Z
        let position = scene.node(id).unwrap().position;
        assert!((position - Vec3::new(1.0, 0.0, 0.9)).length() < 1e-5);
    }

    #[test]
    fn test_drag_miss_keeps_reference() {
        let (mut scene, id) = scene_with_node();
        let controller = ManipulationController::default();
        let mut session = DragSession::default();

        controller.on_long_press(&mut scene, GesturePhase::Began, ON, &mut session);
        controller.on_long_press(&mut scene, GesturePhase::Changed, OFF, &mut session);

        assert_eq!(session.reference, Some(ON));
        assert_eq!(scene.node(id).unwrap().position, Vec3::new(1.0, 0.0, 1.0));
    }
}
