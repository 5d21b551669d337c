use std::path::PathBuf;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use regression_calculator::session::Session;

#[cfg(feature = "gui_app")]
mod gui_app;

#[derive(Parser, Debug)]
#[command(name = "regression-calculator")]
#[command(about = "Fit a linear regression between two CSV columns", long_about = None)]
struct Args {
    /// CSV file to select on startup
    file: Option<PathBuf>,

    /// Write debug logs to this file instead of stderr
    #[arg(long)]
    log: Option<PathBuf>,
}

fn init_logging(log: Option<&PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    match log {
        Some(log_path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(log_path)?;
            let subscriber = FmtSubscriber::builder()
                .with_max_level(Level::DEBUG)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        None => {
            // Silent unless RUST_LOG asks for something
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(EnvFilter::from_default_env())
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }
    Ok(())
}

#[cfg(all(feature = "cli_app", feature = "gui_app"))]
compile_error!("Features 'cli_app' and 'gui_app' are mutually exclusive. Please enable only one.");

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.log.as_ref())?;
    tracing::info!("starting regression calculator");

    let mut session = Session::new();
    let startup_notification = args.file.map(|path| session.select_file(Some(path)));

    #[cfg(feature = "cli_app")]
    {
        if let Some(n) = &startup_notification {
            println!("[{}] {}", n.title, n.message);
        }
        regression_calculator::cli_app::run(session)?;
        return Ok(());
    }

    #[cfg(feature = "gui_app")]
    {
        gui_app::main(session, startup_notification)
            .map_err(|e| Box::new(e) as Box<dyn std::error::Error>)?;
        return Ok(());
    }

    #[cfg(not(any(feature = "cli_app", feature = "gui_app")))]
    {
        let _ = (session, startup_notification);
        eprintln!("Error: No application feature ('cli_app' or 'gui_app') enabled.");
        eprintln!("Build with --features cli_app or --features gui_app");
        Ok(())
    }
}
