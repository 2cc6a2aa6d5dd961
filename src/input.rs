//! Operator console commands.
//!
//! Each line typed at the console maps to one [`Command`]. Mutating commands
//! are forwarded verbatim to the monitor.

use crate::error::{MonitorError, Result};
use crate::monitor::WorkstationMonitor;

pub const HELP: &str = "\
commands:
  code <text>    set the batch card code (empty clears it)
  workers <n>    select the number of workers
  show           print the current state
  help           print this help
  quit           exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    BatchCardCode(String),
    Workers(usize),
    Show,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim_start();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest),
            None => (line.trim_end(), ""),
        };

        match word {
            "code" => Ok(Command::BatchCardCode(rest.trim_end().to_string())),
            "workers" => {
                let count = rest.trim();
                count.parse().map(Command::Workers).map_err(|_| {
                    MonitorError::InvalidCommand(format!("not a worker count: {:?}", count))
                })
            }
            "show" => Ok(Command::Show),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            "" => Err(MonitorError::InvalidCommand("empty line".to_string())),
            other => Err(MonitorError::InvalidCommand(format!(
                "unknown command: {}",
                other
            ))),
        }
    }

    /// Forward a mutating command to the monitor. Returns `false` for commands
    /// the monitor does not handle.
    pub fn apply(&self, monitor: &mut WorkstationMonitor) -> Result<bool> {
        match self {
            Command::BatchCardCode(code) => Ok(monitor.on_batch_card_code_changed(code.as_str())),
            Command::Workers(n) => {
                let button = monitor
                    .state()
                    .worker_button_states
                    .get(*n)
                    .copied()
                    .ok_or(MonitorError::WorkerCountOutOfRange {
                        requested: *n,
                        max: monitor.max_workers(),
                    })?;
                button.click(monitor)?;
                Ok(true)
            }
            Command::Show | Command::Help | Command::Quit => Ok(false),
        }
    }
}
