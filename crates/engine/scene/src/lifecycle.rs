//! Tracking session start/stop tied to view appearance

use crate::config::ArConfig;
use crate::graph::{PlaneDetection, TrackingConfig, TrackingSession};
use crate::status::{StatusHud, StatusNotifier, StatusPresenter};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;
use tracing::info;

/// Drives the tracking session and the status indicator
#[derive(Debug)]
pub struct SessionLifecycle {
    tracking: TrackingConfig,
    presenter: StatusPresenter,
    notifier: StatusNotifier,
}

impl SessionLifecycle {
    /// Bind to a status indicator; horizontal plane detection is requested
    pub fn new(hud: &Rc<RefCell<StatusHud>>, config: &ArConfig) -> Self {
        let (presenter, notifier) =
            StatusPresenter::new(hud, config.status.clone(), config.status_hide_delay());
        Self {
            tracking: TrackingConfig {
                plane_detection: PlaneDetection::Horizontal,
            },
            presenter,
            notifier,
        }
    }

    pub fn tracking_config(&self) -> &TrackingConfig {
        &self.tracking
    }

    /// Handle to give the tracking thread for anchor notifications
    pub fn notifier(&self) -> StatusNotifier {
        self.notifier.clone()
    }

    /// View appeared: run tracking and show the "detecting" status
    pub fn on_session_start<S: TrackingSession + ?Sized>(&mut self, session: &mut S) {
        session.run(&self.tracking);
        self.presenter.show_detecting();
        info!("Session started");
    }

    /// View disappeared: pause tracking
    pub fn on_session_stop<S: TrackingSession + ?Sized>(&mut self, session: &mut S) {
        session.pause();
        info!("Session stopped");
    }

    /// Presentation-loop tick; see [`StatusPresenter::pump`]
    pub fn pump(&mut self, now: Instant) -> usize {
        self.presenter.pump(now)
    }
}
