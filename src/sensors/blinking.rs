//! Simulated sensor source for development without hardware.
//!
//! Flips one randomly chosen sensor per tick and pushes the change to every
//! registered listener, the same way a polling hardware driver would.

use super::{Sensor, SensorChangeEvent, SensorChangeListener, SensorSource};
use log::{info, warn};
use parking_lot::{Mutex, RwLock};
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::interval;

/// Shortest period the blinking task accepts.
pub const MIN_BLINK_PERIOD: Duration = Duration::from_millis(1);

struct Shared {
    sensors: RwLock<Vec<Sensor>>,
    listeners: RwLock<Vec<SensorChangeListener>>,
}

impl Shared {
    fn toggle(&self, index: usize) -> Option<SensorChangeEvent> {
        let event = {
            let mut sensors = self.sensors.write();
            let sensor = sensors.get_mut(index)?;
            sensor.active = !sensor.active;
            SensorChangeEvent {
                sensor: sensor.clone(),
                active: sensor.active,
            }
        };

        // Listeners must not register new listeners from inside the callback
        for listener in self.listeners.read().iter() {
            listener(&event);
        }
        Some(event)
    }

    fn toggle_random(&self) -> Option<SensorChangeEvent> {
        let len = self.sensors.read().len();
        if len == 0 {
            return None;
        }
        let index = rand::thread_rng().gen_range(0..len);
        self.toggle(index)
    }
}

/// Sensor source whose sensors blink on a timer.
///
/// # Example
/// ```ignore
/// let source = Arc::new(BlinkingSensorSource::with_count(4));
/// source.start(Duration::from_secs(1));
/// ```
pub struct BlinkingSensorSource {
    shared: Arc<Shared>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl BlinkingSensorSource {
    pub fn new(sensors: Vec<Sensor>) -> Self {
        Self {
            shared: Arc::new(Shared {
                sensors: RwLock::new(sensors),
                listeners: RwLock::new(Vec::new()),
            }),
            task: Mutex::new(None),
        }
    }

    /// `count` sensors numbered from 1, alternating active and inactive.
    pub fn with_count(count: u32) -> Self {
        let sensors = (1..=count)
            .map(|id| Sensor::new(id, format!("Sensori {}", id), id % 2 == 1))
            .collect();
        Self::new(sensors)
    }

    /// Flip the sensor at `index` and notify listeners.
    /// Returns `None` when the index is out of range.
    pub fn toggle(&self, index: usize) -> Option<SensorChangeEvent> {
        self.shared.toggle(index)
    }

    /// Flip a random sensor. Returns `None` when there are no sensors.
    pub fn toggle_random(&self) -> Option<SensorChangeEvent> {
        self.shared.toggle_random()
    }

    /// Start blinking on the current tokio runtime. Restarting replaces the
    /// previous task. A zero period is raised to [`MIN_BLINK_PERIOD`].
    pub fn start(&self, period: Duration) {
        let period = if period.is_zero() {
            warn!("[Sim] Zero blink period, using {:?}", MIN_BLINK_PERIOD);
            MIN_BLINK_PERIOD
        } else {
            period
        };
        let shared = self.shared.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            // First tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if let Some(event) = shared.toggle_random() {
                    info!(
                        "[Sim] {} toggled to: {}",
                        event.sensor.name,
                        if event.active { "active" } else { "inactive" }
                    );
                }
            }
        });

        if let Some(previous) = self.task.lock().replace(handle) {
            previous.abort();
        }
    }

    pub fn stop(&self) {
        if let Some(handle) = self.task.lock().take() {
            handle.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.task
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for BlinkingSensorSource {
    fn drop(&mut self) {
        self.stop();
    }
}

impl SensorSource for BlinkingSensorSource {
    fn list_sensors(&self) -> Vec<Sensor> {
        self.shared.sensors.read().clone()
    }

    fn add_sensor_change_listener(&self, listener: SensorChangeListener) {
        self.shared.listeners.write().push(listener);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_with_count_alternates() {
        let source = BlinkingSensorSource::with_count(4);
        let sensors = source.list_sensors();
        assert_eq!(sensors.len(), 4);
        assert_eq!(sensors[0], Sensor::new(1, "Sensori 1", true));
        assert_eq!(sensors[1], Sensor::new(2, "Sensori 2", false));
        assert!(sensors[2].active);
        assert!(!sensors[3].active);
    }

    #[test]
    fn test_toggle_updates_listing_and_notifies() {
        let source = BlinkingSensorSource::with_count(2);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        source.add_sensor_change_listener(Box::new(move |event| {
            seen_clone.lock().push(event.clone());
        }));

        let event = source.toggle(1).expect("index in range");
        assert!(event.active);
        assert_eq!(event.sensor, Sensor::new(2, "Sensori 2", true));
        assert!(source.list_sensors()[1].active);
        assert_eq!(*seen.lock(), vec![event]);
    }

    #[test]
    fn test_toggle_out_of_range() {
        let source = BlinkingSensorSource::with_count(2);
        assert!(source.toggle(2).is_none());
        assert_eq!(source.list_sensors(), BlinkingSensorSource::with_count(2).list_sensors());
    }

    #[test]
    fn test_toggle_random_empty() {
        let source = BlinkingSensorSource::new(Vec::new());
        assert!(source.toggle_random().is_none());
    }

    #[test]
    fn test_listeners_called_in_order() {
        let source = BlinkingSensorSource::with_count(1);
        let order = Arc::new(Mutex::new(Vec::new()));
        for name in ["a", "b"] {
            let order = order.clone();
            source.add_sensor_change_listener(Box::new(move |_| order.lock().push(name)));
        }
        source.toggle_random();
        assert_eq!(*order.lock(), vec!["a", "b"]);
    }

    #[test]
    fn test_blinking_task_fires_events() {
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = count.clone();
        tokio_test::block_on(async move {
            let source = BlinkingSensorSource::with_count(3);
            source.add_sensor_change_listener(Box::new(move |_| {
                count_clone.fetch_add(1, Ordering::SeqCst);
            }));
            source.start(Duration::from_millis(5));
            assert!(source.is_running());
            tokio::time::sleep(Duration::from_millis(100)).await;
            source.stop();
            assert!(!source.is_running());
        });
        assert!(count.load(Ordering::SeqCst) > 0);
    }

    #[test]
    fn test_zero_period_is_clamped() {
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = count.clone();
        tokio_test::block_on(async move {
            let source = BlinkingSensorSource::with_count(2);
            source.add_sensor_change_listener(Box::new(move |_| {
                count_clone.fetch_add(1, Ordering::SeqCst);
            }));
            source.start(Duration::ZERO);
            tokio::time::sleep(Duration::from_millis(50)).await;
            assert!(source.is_running());
            source.stop();
        });
        assert!(count.load(Ordering::SeqCst) > 0);
    }
}
