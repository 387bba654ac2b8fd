//! # Door Controller
//!
//! Opens the door now and closes it later. Overlapping unlocks extend the
//! open window to the latest deadline any of them asked for; a shorter
//! unlock never cuts a longer one short.

use crate::ports::outbound::Actuator;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

#[derive(Clone)]
pub struct DoorController {
    actuator: Arc<dyn Actuator>,
    /// When the door may lock; `None` while locked.
    open_until: Arc<Mutex<Option<Instant>>>,
}

impl DoorController {
    pub fn new(actuator: Arc<dyn Actuator>) -> Self {
        Self {
            actuator,
            open_until: Arc::new(Mutex::new(None)),
        }
    }

    /// Activate immediately and keep the door open for at least `open_for`.
    ///
    /// Must be called inside a tokio runtime.
    pub fn unlock_for(&self, open_for: Duration) {
        let deadline = Instant::now() + open_for;
        {
            // Deadline update and activation under one guard, so a firing
            // timer cannot lock between them
            let mut open_until = self.open_until.lock();
            let until = open_until.map_or(deadline, |current| current.max(deadline));
            *open_until = Some(until);
            info!(seconds = open_for.as_secs_f64(), "Opening door");
            self.actuator.activate();
        }

        let actuator = Arc::clone(&self.actuator);
        let open_until = Arc::clone(&self.open_until);
        tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let mut open_until = open_until.lock();
            match *open_until {
                Some(until) if Instant::now() >= until => {
                    *open_until = None;
                    info!("Locking door");
                    actuator.deactivate();
                }
                Some(_) => debug!("door held open by a longer unlock"),
                None => debug!("door already locked"),
            }
        });
    }

    pub fn is_open(&self) -> bool {
        self.open_until.lock().is_some()
    }
}

impl std::fmt::Debug for DoorController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DoorController")
            .field("open", &self.is_open())
            .finish()
    }
}
