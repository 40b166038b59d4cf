//! Scene crate - object placement and gesture manipulation for Furniture AR
//!
//! Places an asset on a detected horizontal plane and lets the user scale,
//! rotate and drag it. Tracking, plane detection and rendering belong to an
//! external collaborator reached through the [`SceneGraph`] and
//! [`TrackingSession`] traits.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  GestureHandler                                             │
//! │  tap / pinch / pan / long-press, toolkit independent        │
//! ├────────────────────────────┬────────────────────────────────┤
//! │  PlacementController       │  ManipulationController        │
//! │  ├── plane hit-test        │  ├── scale by pinch ratio      │
//! │  ├── clone template        │  ├── yaw from pan + committed  │
//! │  └── recenter pivot        │  └── incremental ground drag   │
//! ├────────────────────────────┴────────────────────────────────┤
//! │  SessionLifecycle                                           │
//! │  ├── run / pause tracking                                   │
//! │  └── status indicator via channel + weak reference          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  SceneGraph / TrackingSession (external collaborator)       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use scene::{
//!     Aabb, Anchor, AnchorKind, ArConfig, AssetTemplate, GestureHandler, Interaction,
//!     MemoryScene, ObjectNode, TrackingConfig, TrackingSession,
//! };
//! use scene::devices::{GesturePhase, PinchState};
//! use scene::glam::{Vec2, Vec3};
//!
//! let mut scene = MemoryScene::new();
//! scene.run(&TrackingConfig::default());
//! scene.detect(Anchor {
//!     id: 1,
//!     kind: AnchorKind::Plane { center: Vec3::ZERO, extent: Vec2::splat(10.0) },
//! });
//!
//! let chair = ObjectNode::new("chairNode", Aabb::new(Vec3::ZERO, Vec3::ONE));
//! let mut interaction = Interaction::new(AssetTemplate::from_node(chair), &ArConfig::default());
//!
//! interaction.tapped(&mut scene, Vec2::new(120.0, 80.0));
//! assert_eq!(scene.node_count(), 1);
//!
//! let mut pinch = PinchState { scale: 2.0 };
//! interaction.pinched(&mut scene, GesturePhase::Changed, Vec2::new(120.0, 80.0), &mut pinch);
//! assert_eq!(pinch.scale, 1.0);
//! ```

mod asset;
mod config;
mod error;
mod geometry;
mod graph;
mod interaction;
mod lifecycle;
mod manipulation;
mod memory;
mod node;
mod placement;
mod status;

pub use asset::{AssetSource, AssetTemplate, MemoryAssets};
pub use config::{ArConfig, AssetConfig, StatusConfig};
pub use error::{Error, Result};
pub use geometry::{footprint_center, pivot_matrix, recenter_pivot, Aabb};
pub use graph::{
    Anchor, AnchorKind, HitTestFilter, PlaneDetection, SceneGraph, SurfaceHit, TrackingConfig,
    TrackingSession,
};
pub use interaction::{GestureHandler, Interaction};
pub use lifecycle::SessionLifecycle;
pub use manipulation::{DragSession, GestureSessions, ManipulationController, YawSession};
pub use memory::{DetectedPlane, MemoryScene};
pub use node::{NodeId, ObjectNode};
pub use placement::PlacementController;
pub use status::{StatusHud, StatusNotifier, StatusPresenter, StatusUpdate};

// Re-export for convenience
pub use devices;
pub use glam;
