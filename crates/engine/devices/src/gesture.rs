//! Gesture input types
//!
//! Recognizer-reported gestures, independent of any UI toolkit. A platform
//! adapter that owns the real input loop translates its recognizer callbacks
//! into [`GestureEvent`]s and hands them to a handler.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Phase of a continuous gesture as reported by its recognizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GesturePhase {
    /// The recognizer has just recognized the gesture
    Began,
    /// The gesture moved or its value changed
    Changed,
    /// The finger(s) were lifted
    Ended,
    /// The gesture was interrupted by the system
    Cancelled,
}

impl GesturePhase {
    /// Whether this phase terminates the gesture
    pub fn is_terminal(self) -> bool {
        matches!(self, GesturePhase::Ended | GesturePhase::Cancelled)
    }
}

/// A single gesture event, in view coordinates (pixels, origin top-left)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GestureEvent {
    /// Discrete single tap
    Tap { location: Vec2 },
    /// Two-finger pinch; the incremental ratio lives in [`PinchState`]
    Pinch { phase: GesturePhase, location: Vec2 },
    /// One-finger pan; `translation` is measured from the gesture start
    Pan {
        phase: GesturePhase,
        location: Vec2,
        translation: Vec2,
    },
    /// Sustained press followed by a drag
    LongPress { phase: GesturePhase, location: Vec2 },
}

impl GestureEvent {
    /// Touch location of the event
    pub fn location(&self) -> Vec2 {
        match *self {
            GestureEvent::Tap { location }
            | GestureEvent::Pinch { location, .. }
            | GestureEvent::Pan { location, .. }
            | GestureEvent::LongPress { location, .. } => location,
        }
    }

    /// Phase of the event; taps are reported as already ended
    pub fn phase(&self) -> GesturePhase {
        match *self {
            GestureEvent::Tap { .. } => GesturePhase::Ended,
            GestureEvent::Pinch { phase, .. }
            | GestureEvent::Pan { phase, .. }
            | GestureEvent::LongPress { phase, .. } => phase,
        }
    }
}

/// Pinch recognizer state shared between the platform and the scale handler
///
/// The recognizer reports `scale` relative to 1.0 at gesture start. The
/// handler consumes it as a ratio and resets it, so every delivered value is
/// independent of the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PinchState {
    pub scale: f32,
}

impl Default for PinchState {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

impl PinchState {
    /// Create a pinch state at the neutral ratio
    pub fn new() -> Self {
        Self::default()
    }

    /// Multiply in a new ratio reported by the recognizer
    ///
    /// Mirrors recognizers that keep accumulating until someone resets them.
    pub fn accumulate(&mut self, ratio: f32) {
        self.scale *= ratio;
    }

    /// Take the pending ratio and reset the baseline to 1.0
    pub fn take(&mut self) -> f32 {
        std::mem::replace(&mut self.scale, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_phases() {
        assert!(!GesturePhase::Began.is_terminal());
        assert!(!GesturePhase::Changed.is_terminal());
        assert!(GesturePhase::Ended.is_terminal());
        assert!(GesturePhase::Cancelled.is_terminal());
    }

    #[test]
    fn test_event_accessors() {
        let pan = GestureEvent::Pan {
            phase: GesturePhase::Changed,
            location: Vec2::new(10.0, 20.0),
            translation: Vec2::new(5.0, 0.0),
        };
        assert_eq!(pan.location(), Vec2::new(10.0, 20.0));
        assert_eq!(pan.phase(), GesturePhase::Changed);

        let tap = GestureEvent::Tap {
            location: Vec2::ONE,
        };
        assert_eq!(tap.phase(), GesturePhase::Ended);
    }

    #[test]
    fn test_pinch_take_resets_baseline() {
        let mut pinch = PinchState::new();
        pinch.accumulate(1.1);
        assert!((pinch.take() - 1.1).abs() < 1e-6);
        assert_eq!(pinch.scale, 1.0);

        pinch.accumulate(2.0);
        pinch.accumulate(0.5);
        assert!((pinch.take() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_event_deserializes_from_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            event: GestureEvent,
        }

        let parsed: Wrapper = toml::from_str(
            r#"
            [event]
            kind = "long_press"
            phase = "began"
            location = [70.0, 0.0]
            "#,
        )
        .unwrap();

        assert_eq!(
            parsed.event,
            GestureEvent::LongPress {
                phase: GesturePhase::Began,
                location: Vec2::new(70.0, 0.0),
            }
        );
    }
}
