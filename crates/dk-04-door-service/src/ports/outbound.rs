//! # Outbound Ports (Driven Ports / SPI)

/// The physical lock: a relay that holds the door open while active.
///
/// Both calls must be idempotent; the controller may activate an already
/// active relay when unlock requests overlap.
pub trait Actuator: Send + Sync {
    /// Energize the relay (door unlocked).
    fn activate(&self);

    /// Release the relay (door locked).
    fn deactivate(&self);
}
