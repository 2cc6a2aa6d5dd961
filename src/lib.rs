//! Workstation monitor library.
//!
//! Tracks sensor activity, operator batch input and worker count for a
//! manufacturing workstation, and publishes the combined view state to
//! subscribers on every change.

pub mod config;
pub mod display;
pub mod error;
pub mod input;
pub mod monitor;
pub mod sensors;

pub use error::{MonitorError, Result};
pub use monitor::{WorkstationMonitor, WorkstationMonitorState, WorkstationStatus};
pub use sensors::{Sensor, SensorSource};
