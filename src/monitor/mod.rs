//! Workstation monitor: the single source of truth behind the operator screen.
//!
//! [`WorkstationMonitor`] owns a [`WorkstationMonitorState`] snapshot, applies
//! operator input to it, and fans out a [`StateChange`] delta to every
//! subscriber after each mutation.

pub mod state;
pub mod workstation;

pub use state::{
    SensorCardState, StateChange, WorkerButtonState, WorkstationMonitorState, WorkstationStatus,
    derive_workstation_status,
};
pub use workstation::{ListenerId, MAX_WORKERS, StateChangeListener, WorkstationMonitor};
