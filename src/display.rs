//! Console rendering of the operator screen.

use crate::error::Result;
use crate::monitor::WorkstationMonitorState;
use std::fmt::Write;

const SENSORS_LABEL: &str = "Anturien tila";
const BATCH_LABEL: &str = "Tuotantoerä";
const WORKERS_LABEL: &str = "Työntekijöiden lukumäärä";
const STATUS_LABEL: &str = "Työpisteen tila";

fn sensor_status_label(active: bool) -> &'static str {
    if active { "AKTIIVINEN" } else { "EI AKTIIVINEN" }
}

/// Render the full state as the operator sees it. The selected worker count
/// is bracketed.
pub fn render_text(state: &WorkstationMonitorState) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(out, "{}", SENSORS_LABEL);
    for card in &state.sensor_card_states {
        let _ = writeln!(out, "  {:<16}{}", card.name, sensor_status_label(card.active));
    }

    let _ = writeln!(out, "{}", BATCH_LABEL);
    if !state.batch_name.is_empty() {
        let _ = writeln!(out, "  {}", state.batch_name);
    }
    let _ = writeln!(out, "  > {}", state.batch_card_code);

    let _ = writeln!(out, "{}", WORKERS_LABEL);
    let buttons: Vec<String> = state
        .worker_button_states
        .iter()
        .map(|button| {
            if button.active {
                format!("[{}]", button.num_workers)
            } else {
                format!(" {} ", button.num_workers)
            }
        })
        .collect();
    let _ = writeln!(out, "  {}", buttons.join(" "));

    let _ = write!(out, "{}: {}", STATUS_LABEL, state.workstation_status);
    out
}

pub fn render_json(state: &WorkstationMonitorState) -> Result<String> {
    Ok(serde_json::to_string_pretty(state)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::WorkstationMonitor;
    use crate::sensors::DummySensorSource;
    use std::sync::Arc;

    fn monitor() -> WorkstationMonitor {
        WorkstationMonitor::new(Arc::new(DummySensorSource::new()))
    }

    #[test]
    fn test_render_initial_text() {
        let monitor = monitor();
        let text = render_text(monitor.state());
        let expected = concat!(
            "Anturien tila\n",
            "  Sensori 1       AKTIIVINEN\n",
            "  Sensori 2       EI AKTIIVINEN\n",
            "Tuotantoerä\n",
            "  > \n",
            "Työntekijöiden lukumäärä\n",
            "  [0]  1   2   3   4 \n",
            "Työpisteen tila: IDLE",
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_after_input() {
        let mut monitor = monitor();
        monitor.on_batch_card_code_changed("B-77");
        monitor.select_num_workers(3).unwrap();
        let text = render_text(monitor.state());
        assert!(text.contains("  > B-77\n"));
        assert!(text.contains(" 2  [3]  4 "));
        assert!(!text.contains("[0]"));
    }

    #[test]
    fn test_render_json() {
        let monitor = monitor();
        let json: serde_json::Value =
            serde_json::from_str(&render_json(monitor.state()).unwrap()).unwrap();
        assert_eq!(json["workstationStatus"], "IDLE");
        assert_eq!(json["batchCardCode"], "");
        assert_eq!(json["sensorCardStates"][1]["name"], "Sensori 2");
        assert_eq!(json["workerButtonStates"][0]["numWorkers"], 0);
        assert_eq!(json["workerButtonStates"][0]["active"], true);
    }
}
