//! Replay scripts
//!
//! A script describes the asset scenes available to the session and a list
//! of steps: tracker anchors, recognizer gestures and clock advances. It is
//! played against [`MemoryScene`] the way a platform adapter would drive a
//! real tracking session.

use anyhow::{Context, Result};
use scene::devices::{GestureEvent, GesturePhase, PinchState};
use scene::glam::{Vec2, Vec3};
use scene::{
    Aabb, Anchor, AnchorKind, ArConfig, GestureHandler, Interaction, MemoryAssets, MemoryScene,
    NodeId, ObjectNode, SessionLifecycle, StatusHud,
};
use serde::Deserialize;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info};

fn default_pixels_per_unit() -> f32 {
    100.0
}

/// Node hierarchy of an asset scene, bounds only
#[derive(Debug, Clone, Deserialize)]
pub struct AssetNodeSpec {
    pub name: String,
    #[serde(default)]
    pub min: Vec3,
    #[serde(default)]
    pub max: Vec3,
    #[serde(default)]
    pub children: Vec<AssetNodeSpec>,
}

impl AssetNodeSpec {
    fn to_node(&self) -> ObjectNode {
        self.children.iter().fold(
            ObjectNode::new(self.name.clone(), Aabb::new(self.min, self.max)),
            |node, child| node.with_child(child.to_node()),
        )
    }
}

/// One loadable asset scene
#[derive(Debug, Clone, Deserialize)]
pub struct AssetSceneSpec {
    pub path: String,
    pub nodes: Vec<AssetNodeSpec>,
}

/// A scripted input
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    /// Tracker found a horizontal plane
    Plane {
        id: u64,
        center: Vec3,
        extent: Vec2,
    },
    /// Tracker found a feature point
    Point { id: u64, position: Vec3 },
    Tap {
        location: Vec2,
    },
    /// Recognizer reports `ratio` since the last reset
    Pinch {
        phase: GesturePhase,
        location: Vec2,
        #[serde(default = "neutral_ratio")]
        ratio: f32,
    },
    Pan {
        phase: GesturePhase,
        location: Vec2,
        translation: Vec2,
    },
    LongPress {
        phase: GesturePhase,
        location: Vec2,
    },
    /// Advance the presentation clock
    Wait { secs: f32 },
}

fn neutral_ratio() -> f32 {
    1.0
}

impl Step {
    /// Gesture carried by this step, if it is one
    pub fn gesture(&self) -> Option<GestureEvent> {
        match *self {
            Step::Tap { location } => Some(GestureEvent::Tap { location }),
            Step::Pinch {
                phase, location, ..
            } => Some(GestureEvent::Pinch { phase, location }),
            Step::Pan {
                phase,
                location,
                translation,
            } => Some(GestureEvent::Pan {
                phase,
                location,
                translation,
            }),
            Step::LongPress { phase, location } => {
                Some(GestureEvent::LongPress { phase, location })
            }
            Step::Plane { .. } | Step::Point { .. } | Step::Wait { .. } => None,
        }
    }

    /// Anchor carried by this step, if it is one
    pub fn anchor(&self) -> Option<Anchor> {
        match *self {
            Step::Plane { id, center, extent } => Some(Anchor {
                id,
                kind: AnchorKind::Plane { center, extent },
            }),
            Step::Point { id, position } => Some(Anchor {
                id,
                kind: AnchorKind::Point { position },
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    #[serde(default = "default_pixels_per_unit")]
    pub pixels_per_unit: f32,
    #[serde(default)]
    pub assets: Vec<AssetSceneSpec>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse replay script")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    pub fn asset_source(&self) -> MemoryAssets {
        self.assets.iter().fold(MemoryAssets::new(), |assets, scene| {
            assets.with_scene(
                scene.path.clone(),
                scene.nodes.iter().map(AssetNodeSpec::to_node).collect(),
            )
        })
    }
}

/// Final state of a replay
#[derive(Debug)]
pub struct Outcome {
    pub scene: MemoryScene,
    pub status_text: String,
    pub status_visible: bool,
}

impl Outcome {
    pub fn objects(&self) -> impl Iterator<Item = (NodeId, &ObjectNode)> {
        self.scene.nodes()
    }
}

/// Play `script` from session start to session stop
pub fn replay(script: &Script, config: &ArConfig) -> Result<Outcome> {
    let assets = script.asset_source();
    let mut interaction = Interaction::from_assets(&assets, config)
        .context("Failed to resolve the placement asset")?;

    let hud = StatusHud::shared();
    let mut lifecycle = SessionLifecycle::new(&hud, config);
    let mut scene = MemoryScene::with_pixels_per_unit(script.pixels_per_unit);
    let mut pinch = PinchState::new();
    let mut clock = Instant::now();

    lifecycle.on_session_start(&mut scene);

    for (index, step) in script.steps.iter().enumerate() {
        debug!(index, ?step, "Replaying step");

        if let Some(anchor) = step.anchor() {
            if scene.detect(anchor) {
                // Anchor callbacks arrive off the presentation thread
                let notifier = lifecycle.notifier();
                std::thread::spawn(move || notifier.on_anchor_added(&anchor))
                    .join()
                    .map_err(|_| anyhow::anyhow!("Tracking thread panicked"))?;
            }
        }

        if let Step::Pinch { ratio, .. } = *step {
            pinch.accumulate(ratio);
        }

        if let Some(event) = step.gesture() {
            interaction.dispatch(&mut scene, &event, &mut pinch);
        }

        if let Step::Wait { secs } = *step {
            let wait = Duration::try_from_secs_f32(secs).unwrap_or(Duration::ZERO);
            clock = clock
                .checked_add(wait)
                .with_context(|| format!("Wait of {secs}s at step {index} overflows the clock"))?;
        }

        lifecycle.pump(clock);
    }

    lifecycle.on_session_stop(&mut scene);
    info!(objects = scene.node_count(), "Replay finished");

    let status = hud.borrow();
    Ok(Outcome {
        status_text: status.text().to_string(),
        status_visible: status.is_visible(),
        scene,
    })
}
