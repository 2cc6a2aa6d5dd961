//! The workstation monitor core.
//!
//! All mutation goes through a single update routine that merges a
//! [`StateChange`] into the live state and then calls every listener, in
//! registration order, with that same delta. Everything runs synchronously on
//! the caller's thread.

use super::state::{
    SensorCardState, StateChange, WorkerButtonState, WorkstationMonitorState, WorkstationStatus,
    derive_workstation_status,
};
use crate::error::{MonitorError, Result};
use crate::sensors::SensorSource;
use log::{debug, info, warn};
use std::sync::Arc;

/// Number of options in the worker-count picker (0..MAX_WORKERS).
pub const MAX_WORKERS: usize = 5;

/// Receives the delta of each update along with the merged snapshot.
pub type StateChangeListener = Box<dyn FnMut(&StateChange, &WorkstationMonitorState) + Send>;

/// Handle returned by [`WorkstationMonitor::add_state_change_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub struct WorkstationMonitor {
    sensor_source: Arc<dyn SensorSource>,
    listeners: Vec<(ListenerId, StateChangeListener)>,
    next_listener_id: u64,
    state: WorkstationMonitorState,
    num_workers: usize,
    max_workers: usize,
    initialized: bool,
}

impl WorkstationMonitor {
    /// Build the initial snapshot from the source's current sensors.
    /// No listener can observe construction.
    pub fn new(sensor_source: Arc<dyn SensorSource>) -> Self {
        let sensor_card_states: Vec<SensorCardState> = sensor_source
            .list_sensors()
            .into_iter()
            .map(SensorCardState::from)
            .collect();
        debug!(
            "[Monitor] Created with {} sensor(s)",
            sensor_card_states.len()
        );

        let num_workers = 0;
        let max_workers = MAX_WORKERS;
        let mut state = WorkstationMonitorState {
            sensor_card_states,
            batch_name: String::new(),
            batch_card_code: String::new(),
            worker_button_states: Self::worker_button_states_for(num_workers, max_workers),
            workstation_status: WorkstationStatus::default(),
        };
        state.workstation_status = derive_workstation_status(&state);

        Self {
            sensor_source,
            listeners: Vec::new(),
            next_listener_id: 0,
            state,
            num_workers,
            max_workers,
            initialized: false,
        }
    }

    /// Subscribe to the sensor source. Only the first call registers.
    pub fn init(&mut self) {
        if self.initialized {
            warn!("[Monitor] init() called twice, ignoring");
            return;
        }
        self.initialized = true;

        // TODO: refresh sensor_card_states and re-derive the status here once
        // the sensor-driven rules are decided.
        self.sensor_source.add_sensor_change_listener(Box::new(|_event| {}));
        info!("[Monitor] Subscribed to sensor changes");
    }

    /// Replace the batch card code. Always succeeds.
    pub fn on_batch_card_code_changed(&mut self, batch_card_code: impl Into<String>) -> bool {
        let batch_card_code = batch_card_code.into();
        debug!("[Monitor] batchCardCode = {:?}", batch_card_code);
        self.update_state(StateChange {
            batch_card_code: Some(batch_card_code),
            ..Default::default()
        });
        true
    }

    /// Select `num_workers` in the picker and republish every button.
    ///
    /// Fails without touching the state when `num_workers` is not a picker
    /// option.
    pub fn select_num_workers(&mut self, num_workers: usize) -> Result<()> {
        if num_workers >= self.max_workers {
            return Err(MonitorError::WorkerCountOutOfRange {
                requested: num_workers,
                max: self.max_workers,
            });
        }

        debug!("[Monitor] numWorkers = {}", num_workers);
        self.num_workers = num_workers;
        let worker_button_states = self.create_worker_button_states();
        self.update_state(StateChange {
            worker_button_states: Some(worker_button_states),
            ..Default::default()
        });
        Ok(())
    }

    pub fn add_state_change_listener(&mut self, listener: StateChangeListener) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Returns `false` if the listener was already removed.
    pub fn remove_state_change_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// The live state. Only the monitor's own mutators write to it.
    pub fn state(&self) -> &WorkstationMonitorState {
        &self.state
    }

    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    fn create_worker_button_states(&self) -> Vec<WorkerButtonState> {
        Self::worker_button_states_for(self.num_workers, self.max_workers)
    }

    fn worker_button_states_for(num_workers: usize, max_workers: usize) -> Vec<WorkerButtonState> {
        (0..max_workers)
            .map(|i| WorkerButtonState {
                num_workers: i,
                active: i == num_workers,
            })
            .collect()
    }

    fn update_state(&mut self, mut change: StateChange) {
        change.apply_to(&mut self.state);

        let status = derive_workstation_status(&self.state);
        if status != self.state.workstation_status {
            self.state.workstation_status = status;
            change.workstation_status = Some(status);
        }

        for (_, listener) in self.listeners.iter_mut() {
            listener(&change, &self.state);
        }
    }
}

impl WorkerButtonState {
    /// Click handler for this picker option.
    pub fn click(&self, monitor: &mut WorkstationMonitor) -> Result<()> {
        monitor.select_num_workers(self.num_workers)
    }
}
