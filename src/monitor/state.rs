//! View-state types published by the monitor.

use crate::sensors::Sensor;
use serde::{Deserialize, Serialize};
use strum::Display;

/// Operational state of the monitored station.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkstationStatus {
    #[default]
    Idle,
    InUse,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorCardState {
    pub id: u32,
    pub name: String,
    pub active: bool,
}

impl From<Sensor> for SensorCardState {
    fn from(sensor: Sensor) -> Self {
        Self {
            id: sensor.id,
            name: sensor.name,
            active: sensor.active,
        }
    }
}

/// One option of the worker-count picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerButtonState {
    pub num_workers: usize,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkstationMonitorState {
    pub sensor_card_states: Vec<SensorCardState>,
    pub batch_name: String,
    pub batch_card_code: String,
    /// Exactly one entry is active at any time.
    pub worker_button_states: Vec<WorkerButtonState>,
    pub workstation_status: WorkstationStatus,
}

impl WorkstationMonitorState {
    /// The worker count of the active picker entry.
    pub fn selected_num_workers(&self) -> Option<usize> {
        self.worker_button_states
            .iter()
            .find(|button| button.active)
            .map(|button| button.num_workers)
    }
}

/// Partial update: only the fields touched by one mutation are `Some`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateChange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensor_card_states: Option<Vec<SensorCardState>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_card_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker_button_states: Option<Vec<WorkerButtonState>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workstation_status: Option<WorkstationStatus>,
}

impl StateChange {
    pub fn is_empty(&self) -> bool {
        self.sensor_card_states.is_none()
            && self.batch_name.is_none()
            && self.batch_card_code.is_none()
            && self.worker_button_states.is_none()
            && self.workstation_status.is_none()
    }

    /// Merge the present fields into `state`, leaving the rest untouched.
    pub fn apply_to(&self, state: &mut WorkstationMonitorState) {
        if let Some(cards) = &self.sensor_card_states {
            state.sensor_card_states = cards.clone();
        }
        if let Some(name) = &self.batch_name {
            state.batch_name = name.clone();
        }
        if let Some(code) = &self.batch_card_code {
            state.batch_card_code = code.clone();
        }
        if let Some(buttons) = &self.worker_button_states {
            state.worker_button_states = buttons.clone();
        }
        if let Some(status) = self.workstation_status {
            state.workstation_status = status;
        }
    }
}

/// Status of the station given the rest of the state.
///
/// Always [`WorkstationStatus::Idle`] for now; no transition rules exist yet.
pub fn derive_workstation_status(_state: &WorkstationMonitorState) -> WorkstationStatus {
    WorkstationStatus::Idle
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_state() -> WorkstationMonitorState {
        WorkstationMonitorState {
            sensor_card_states: vec![Sensor::new(1, "Sensori 1", true).into()],
            batch_name: String::new(),
            batch_card_code: "A-1".to_string(),
            worker_button_states: vec![
                WorkerButtonState {
                    num_workers: 0,
                    active: false,
                },
                WorkerButtonState {
                    num_workers: 1,
                    active: true,
                },
            ],
            workstation_status: WorkstationStatus::Idle,
        }
    }

    #[test]
    fn test_status_display() {
        assert_eq!(WorkstationStatus::Idle.to_string(), "IDLE");
        assert_eq!(WorkstationStatus::InUse.to_string(), "IN_USE");
    }

    #[test]
    fn test_apply_merges_only_present_fields() {
        let mut state = sample_state();
        let change = StateChange {
            batch_card_code: Some("B-2".to_string()),
            ..Default::default()
        };
        change.apply_to(&mut state);

        let mut expected = sample_state();
        expected.batch_card_code = "B-2".to_string();
        assert_eq!(state, expected);
    }

    #[test]
    fn test_empty_change() {
        assert!(StateChange::default().is_empty());
        let change = StateChange {
            batch_name: Some(String::new()),
            ..Default::default()
        };
        assert!(!change.is_empty());
    }

    #[test]
    fn test_change_serializes_only_present_fields() {
        let change = StateChange {
            batch_card_code: Some("X".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&change).unwrap();
        assert_eq!(json, serde_json::json!({ "batchCardCode": "X" }));
    }

    #[test]
    fn test_selected_num_workers() {
        assert_eq!(sample_state().selected_num_workers(), Some(1));
    }

    #[test]
    fn test_status_derivation_is_idle() {
        let mut state = sample_state();
        state.workstation_status = WorkstationStatus::InUse;
        assert_eq!(derive_workstation_status(&state), WorkstationStatus::Idle);
    }
}
