//! Fixed two-sensor source used when no hardware is attached.

use super::{Sensor, SensorChangeListener, SensorSource};
use log::debug;

/// Always reports the same two sensors and never fires change events.
#[derive(Debug, Default, Clone, Copy)]
pub struct DummySensorSource;

impl DummySensorSource {
    pub fn new() -> Self {
        Self
    }
}

impl SensorSource for DummySensorSource {
    fn list_sensors(&self) -> Vec<Sensor> {
        vec![
            Sensor::new(1, "Sensori 1", true),
            Sensor::new(2, "Sensori 2", false),
        ]
    }

    fn add_sensor_change_listener(&self, _listener: SensorChangeListener) {
        // Nothing ever changes, so the listener is dropped
        debug!("[Sensors] Dummy source ignoring change listener");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_two_fixed_sensors() {
        let source = DummySensorSource::new();
        let sensors = source.list_sensors();
        assert_eq!(sensors.len(), 2);
        assert_eq!(sensors[0], Sensor::new(1, "Sensori 1", true));
        assert_eq!(sensors[1], Sensor::new(2, "Sensori 2", false));
    }

    #[test]
    fn test_listing_is_stable() {
        let source = DummySensorSource::new();
        source.add_sensor_change_listener(Box::new(|_| panic!("dummy never fires")));
        assert_eq!(source.list_sensors(), source.list_sensors());
    }
}
