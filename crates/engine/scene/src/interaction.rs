//! Gesture dispatch
//!
//! [`GestureHandler`] is the surface a platform adapter calls: one method per
//! gesture, no toolkit types. [`Interaction`] implements it on top of the
//! placement and manipulation controllers and owns the per-gesture sessions.

use crate::asset::{AssetSource, AssetTemplate};
use crate::config::ArConfig;
use crate::error::Result;
use crate::graph::SceneGraph;
use crate::manipulation::{GestureSessions, ManipulationController};
use crate::placement::PlacementController;
use devices::{GestureEvent, GesturePhase, PinchState};
use glam::Vec2;
use tracing::trace;

/// Receiver of recognizer-reported gestures
pub trait GestureHandler<G: SceneGraph + ?Sized> {
    fn tapped(&mut self, graph: &mut G, location: Vec2);

    fn pinched(&mut self, graph: &mut G, phase: GesturePhase, location: Vec2, pinch: &mut PinchState);

    fn panned(&mut self, graph: &mut G, phase: GesturePhase, location: Vec2, translation: Vec2);

    fn long_pressed(&mut self, graph: &mut G, phase: GesturePhase, location: Vec2);

    /// Route a gesture event to the matching method
    fn dispatch(&mut self, graph: &mut G, event: &GestureEvent, pinch: &mut PinchState) {
        trace!(phase = ?event.phase(), location = ?event.location(), "Dispatching gesture");
        match *event {
            GestureEvent::Tap { location } => self.tapped(graph, location),
            GestureEvent::Pinch { phase, location } => self.pinched(graph, phase, location, pinch),
            GestureEvent::Pan {
                phase,
                location,
                translation,
            } => self.panned(graph, phase, location, translation),
            GestureEvent::LongPress { phase, location } => {
                self.long_pressed(graph, phase, location)
            }
        }
    }
}

/// Tap-to-place plus pinch/pan/long-press manipulation
#[derive(Debug, Clone)]
pub struct Interaction {
    placement: PlacementController,
    manipulation: ManipulationController,
    sessions: GestureSessions,
}

impl Interaction {
    pub fn new(template: AssetTemplate, config: &ArConfig) -> Self {
        Self {
            placement: PlacementController::new(template),
            manipulation: ManipulationController::from_config(config),
            sessions: GestureSessions::default(),
        }
    }

    /// Resolve the configured asset and build the interaction
    ///
    /// Fails if the asset or its node is missing; callers should treat that
    /// as fatal at startup.
    pub fn from_assets(source: &dyn AssetSource, config: &ArConfig) -> Result<Self> {
        let template = AssetTemplate::load(source, &config.asset.path, &config.asset.node)?;
        Ok(Self::new(template, config))
    }

    pub fn placement(&self) -> &PlacementController {
        &self.placement
    }

    pub fn manipulation(&self) -> &ManipulationController {
        &self.manipulation
    }

    pub fn sessions(&self) -> &GestureSessions {
        &self.sessions
    }
}

impl<G: SceneGraph + ?Sized> GestureHandler<G> for Interaction {
    fn tapped(&mut self, graph: &mut G, location: Vec2) {
        self.placement.on_tap(graph, location);
    }

    fn pinched(&mut self, graph: &mut G, phase: GesturePhase, location: Vec2, pinch: &mut PinchState) {
        self.manipulation.on_pinch(graph, phase, location, pinch);
    }

    fn panned(&mut self, graph: &mut G, phase: GesturePhase, location: Vec2, translation: Vec2) {
        self.manipulation
            .on_pan(graph, phase, location, translation, &mut self.sessions.yaw);
    }

    fn long_pressed(&mut self, graph: &mut G, phase: GesturePhase, location: Vec2) {
        self.manipulation
            .on_long_press(graph, phase, location, &mut self.sessions.drag);
    }
}
