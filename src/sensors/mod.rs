//! Sensor source contract for the workstation monitor.
//!
//! The monitor only needs two capabilities from whatever reads the physical
//! sensors: list the current sensors, and subscribe to activity changes.
//! [`DummySensorSource`] and [`BlinkingSensorSource`] stand in for real
//! hardware.

pub mod blinking;
pub mod dummy;

pub use blinking::BlinkingSensorSource;
pub use dummy::DummySensorSource;

use serde::{Deserialize, Serialize};

/// A boolean-state physical input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sensor {
    pub id: u32,
    pub name: String,
    pub active: bool,
}

impl Sensor {
    pub fn new(id: u32, name: impl Into<String>, active: bool) -> Self {
        Self {
            id,
            name: name.into(),
            active,
        }
    }
}

/// Emitted when a sensor's active flag flips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorChangeEvent {
    /// The sensor after the change.
    pub sensor: Sensor,
    pub active: bool,
}

pub type SensorChangeListener = Box<dyn Fn(&SensorChangeEvent) + Send + Sync>;

/// Anything that can report sensor state to the monitor.
///
/// Implementations must be shareable across threads since a real source
/// delivers events from its own polling task.
pub trait SensorSource: Send + Sync {
    /// Current sensor snapshot. Must not block.
    fn list_sensors(&self) -> Vec<Sensor>;

    /// Register a callback for activity changes. Registration never fails and
    /// any number of listeners may be added.
    fn add_sensor_change_listener(&self, listener: SensorChangeListener);
}
