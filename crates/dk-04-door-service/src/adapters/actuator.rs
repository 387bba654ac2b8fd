//! Actuator adapters. Relay hardware drivers live outside this crate; these
//! cover running without hardware and observing what the controller did.

use crate::ports::outbound::Actuator;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tracing::info;

/// Logs every transition instead of switching a relay.
#[derive(Debug, Default)]
pub struct LoggingActuator;

impl Actuator for LoggingActuator {
    fn activate(&self) {
        info!("Unlocking door");
    }

    fn deactivate(&self) {
        info!("Locking door");
    }
}

/// Counts calls and tracks the relay state.
#[derive(Debug, Default)]
pub struct RecordingActuator {
    activations: AtomicUsize,
    deactivations: AtomicUsize,
    active: AtomicBool,
}

impl RecordingActuator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn activations(&self) -> usize {
        self.activations.load(Ordering::SeqCst)
    }

    pub fn deactivations(&self) -> usize {
        self.deactivations.load(Ordering::SeqCst)
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

impl Actuator for RecordingActuator {
    fn activate(&self) {
        self.activations.fetch_add(1, Ordering::SeqCst);
        self.active.store(true, Ordering::SeqCst);
    }

    fn deactivate(&self) {
        self.deactivations.fetch_add(1, Ordering::SeqCst);
        self.active.store(false, Ordering::SeqCst);
    }
}
