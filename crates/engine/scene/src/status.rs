//! Plane-detection status indicator
//!
//! Anchor callbacks may arrive on a tracking thread while the indicator
//! lives on the presentation thread. [`StatusNotifier`] posts updates over a
//! channel; [`StatusPresenter`] applies them when the presentation loop
//! calls [`StatusPresenter::pump`]. The presenter only holds a weak
//! reference to the indicator, so a torn-down view turns updates into no-ops.

use crate::config::StatusConfig;
use crate::graph::Anchor;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

/// On-screen status label
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusHud {
    text: String,
    visible: bool,
}

impl StatusHud {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle owned by the view
    pub fn shared() -> Rc<RefCell<StatusHud>> {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn show(&mut self, text: &str) {
        self.text = text.to_string();
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }
}

/// Update posted from the tracking side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusUpdate {
    PlaneDetected,
}

/// Sending half, safe to move to the tracking thread
#[derive(Debug, Clone)]
pub struct StatusNotifier {
    tx: Sender<StatusUpdate>,
}

impl StatusNotifier {
    /// React to a newly added anchor
    ///
    /// Only plane anchors produce an update. Returns whether one was posted;
    /// posting to a presenter that no longer exists is silently dropped.
    pub fn on_anchor_added(&self, anchor: &Anchor) -> bool {
        if !anchor.is_plane() {
            trace!(anchor = anchor.id, "Ignoring non-plane anchor");
            return false;
        }

        match self.tx.send(StatusUpdate::PlaneDetected) {
            Ok(()) => true,
            Err(_) => {
                debug!(anchor = anchor.id, "Status presenter gone, dropping update");
                false
            }
        }
    }
}

/// Receiving half, lives on the presentation thread
#[derive(Debug)]
pub struct StatusPresenter {
    rx: Receiver<StatusUpdate>,
    hud: Weak<RefCell<StatusHud>>,
    labels: StatusConfig,
    hide_delay: Duration,
    pending_hides: Vec<Instant>,
}

impl StatusPresenter {
    /// Create a presenter bound to `hud` and its matching notifier
    pub fn new(
        hud: &Rc<RefCell<StatusHud>>,
        labels: StatusConfig,
        hide_delay: Duration,
    ) -> (Self, StatusNotifier) {
        let (tx, rx) = channel();
        let presenter = Self {
            rx,
            hud: Rc::downgrade(hud),
            labels,
            hide_delay,
            pending_hides: Vec::new(),
        };
        (presenter, StatusNotifier { tx })
    }

    /// Show the "detecting" label
    pub fn show_detecting(&mut self) {
        let text = self.labels.detecting.clone();
        self.with_hud(|hud| hud.show(&text));
    }

    /// Number of hides scheduled but not yet due
    pub fn pending_hides(&self) -> usize {
        self.pending_hides.len()
    }

    /// Apply posted updates and fire due hides
    ///
    /// Each "plane detected" update schedules a one-shot hide `hide_delay`
    /// after `now`. Scheduled hides are never cancelled. Returns the number
    /// of updates applied.
    pub fn pump(&mut self, now: Instant) -> usize {
        let mut applied = 0;

        while let Ok(update) = self.rx.try_recv() {
            match update {
                StatusUpdate::PlaneDetected => {
                    let text = self.labels.detected.clone();
                    if self.with_hud(|hud| hud.show(&text)) {
                        match now.checked_add(self.hide_delay) {
                            Some(at) => self.pending_hides.push(at),
                            None => warn!(
                                delay = ?self.hide_delay,
                                "Hide delay out of range, status stays visible"
                            ),
                        }
                        applied += 1;
                    }
                }
            }
        }

        let (due, waiting): (Vec<Instant>, Vec<Instant>) =
            self.pending_hides.iter().partition(|&&at| at <= now);
        self.pending_hides = waiting;
        for _ in due {
            self.with_hud(StatusHud::hide);
        }

        applied
    }

    /// Run `f` on the indicator if it is still alive
    fn with_hud(&self, f: impl FnOnce(&mut StatusHud)) -> bool {
        match self.hud.upgrade() {
            Some(hud) => {
                f(&mut hud.borrow_mut());
                true
            }
            None => {
                warn!("Status indicator released, skipping update");
                false
            }
        }
    }
}
