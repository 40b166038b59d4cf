//! Input device abstractions for Furniture AR
//!
//! This crate provides toolkit-independent gesture types. Platform adapters
//! convert their recognizer callbacks into these types so that scene
//! manipulation never depends on a UI framework.
//!
//! # Modules
//!
//! - [`gesture`]: Gesture phases, events and pinch recognizer state

pub mod gesture;

// Re-export commonly used types at crate root
pub use gesture::{GestureEvent, GesturePhase, PinchState};

// Re-export glam for convenience
pub use glam;
