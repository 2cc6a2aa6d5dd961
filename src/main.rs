use clap::Parser;
use log::{debug, error, info};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use workstation_monitor::config::{Config, OutputFormat, SensorSourceKind, load_dotenv};
use workstation_monitor::display::{render_json, render_text};
use workstation_monitor::input::{Command, HELP};
use workstation_monitor::sensors::{BlinkingSensorSource, DummySensorSource};
use workstation_monitor::{SensorSource, WorkstationMonitor, WorkstationMonitorState};

#[derive(Parser)]
#[command(name = "workstation-monitor")]
#[command(about = "Device-side monitor for a manufacturing workstation")]
struct Cli {
    /// Sensor backend (dummy or blinking)
    #[arg(long)]
    sensor_source: Option<SensorSourceKind>,

    /// Milliseconds between simulated sensor flips
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    blink_interval_ms: Option<u64>,

    /// Number of simulated sensors for the blinking source
    #[arg(long)]
    sensors: Option<u32>,

    /// Screen output format (text or json)
    #[arg(long)]
    output: Option<OutputFormat>,
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if let Some(source) = self.sensor_source {
            config.sensors.source = source;
        }
        if let Some(ms) = self.blink_interval_ms {
            config.sensors.blink_interval_ms = ms;
        }
        if let Some(count) = self.sensors {
            config.sensors.blinking_sensor_count = count;
        }
        if let Some(output) = self.output {
            config.display.output = output;
        }
    }
}

fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

fn print_state(state: &WorkstationMonitorState, output: OutputFormat) {
    match output {
        OutputFormat::Text => println!("{}\n", render_text(state)),
        OutputFormat::Json => match render_json(state) {
            Ok(json) => println!("{}", json),
            Err(e) => error!("Failed to render state: {}", e),
        },
    }
}

fn main() {
    // Environment must be settled before any runtime thread exists
    load_dotenv();
    init_logger();
    let cli = Cli::parse();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to start tokio runtime: {}", e);
            std::process::exit(1);
        }
    };
    runtime.block_on(run(cli));
}

async fn run(cli: Cli) {
    let mut config = Config::from_env();
    cli.apply(&mut config);
    info!("Starting workstation monitor");
    info!("  Sensor source: {}", config.sensors.source);
    info!("  Output: {}", config.display.output);

    let mut blinking = None;
    let source: Arc<dyn SensorSource> = match config.sensors.source {
        SensorSourceKind::Dummy => Arc::new(DummySensorSource::new()),
        SensorSourceKind::Blinking => {
            let source = Arc::new(BlinkingSensorSource::with_count(
                config.sensors.blinking_sensor_count,
            ));
            blinking = Some(source.clone());
            source
        }
    };

    let output = config.display.output;
    let mut monitor = WorkstationMonitor::new(source);
    monitor.init();
    monitor.add_state_change_listener(Box::new(move |change, state| {
        debug!("State change: {:?}", change);
        print_state(state, output);
    }));
    print_state(monitor.state(), output);

    if let Some(source) = &blinking {
        source.start(Duration::from_millis(config.sensors.blink_interval_ms));
    }

    info!("Workstation monitor is running");
    info!("  - Type 'help' for commands");
    info!("  - Press Ctrl+C to exit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let shutdown = signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        error!("Failed to read input: {}", e);
                        break;
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }

                let command = match Command::parse(&line) {
                    Ok(command) => command,
                    Err(e) => {
                        error!("{}", e);
                        continue;
                    }
                };
                match command {
                    Command::Quit => break,
                    Command::Help => println!("{}", HELP),
                    Command::Show => print_state(monitor.state(), output),
                    command => {
                        if let Err(e) = command.apply(&mut monitor) {
                            error!("{}", e);
                        }
                    }
                }
            }
            result = &mut shutdown => {
                match result {
                    Ok(()) => info!("Received shutdown signal"),
                    Err(e) => error!("Failed to listen for shutdown signal: {}", e),
                }
                break;
            }
        }
    }

    if let Some(source) = blinking {
        source.stop();
    }
    info!("Workstation monitor stopped");
}
