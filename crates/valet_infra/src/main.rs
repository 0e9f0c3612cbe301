//! Binary entrypoint: logging, configuration, one interactive session on
//! stdin/stdout.

use std::io;
use std::io::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use valet_core::system::ParkingSystem;
use valet_infra::config::{ConfigError, SessionConfig};
use valet_infra::console;

const EXIT_CODE_CONFIG: u8 = 2;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Config comes from the file named by VALET_CONFIG when set, defaults
/// otherwise.
fn load_config() -> Result<SessionConfig, ConfigError> {
    match std::env::var_os("VALET_CONFIG") {
        Some(path) => SessionConfig::load_from_path(&PathBuf::from(path)),
        None => Ok(SessionConfig::default()),
    }
}

fn main() -> ExitCode {
    init_tracing();
    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("valet: {err}");
            return ExitCode::from(EXIT_CODE_CONFIG);
        }
    };
    let mut system = ParkingSystem::with_zones(config.initial_zones, config.rate_per_tick);
    tracing::info!(
        "session start: {} zones, rate {:.2} per tick",
        config.initial_zones,
        config.rate_per_tick
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut input = stdin.lock();
    let mut output = stdout.lock();
    if let Err(err) = writeln!(
        output,
        "Welcome to the valet lot. Start by adding zones and slots."
    ) {
        eprintln!("valet: io failure: {err}");
        return ExitCode::FAILURE;
    }
    if let Err(err) = console::run_session(&mut system, &mut input, &mut output) {
        eprintln!("valet: io failure: {err}");
        return ExitCode::FAILURE;
    }
    let _ = writeln!(output, "Goodbye");
    ExitCode::SUCCESS
}
