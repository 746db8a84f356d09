//! Gaze Keys CLI - gaze-to-keyboard HTTP service.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::serve::ServerSettings;
use commands::{Cli, Commands, ExitCode};
use config::AppConfig;

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config = AppConfig::load();
    let store = commands::model_store(cli.models_dir.as_deref(), &config);

    let result = match cli.command {
        Some(Commands::Serve(ref args)) => {
            commands::serve::run(&ServerSettings::resolve(args, &store, &config))
                .map(|()| ExitCode::Success)
        }
        Some(Commands::Predict(ref args)) => {
            let model = commands::gaze_model_path(args.model.as_deref(), &store, &config);
            commands::predict::run(args, &model)
        }
        Some(Commands::Models(ref args)) => {
            commands::models::run(args, &store).map(|()| ExitCode::Success)
        }
        // Default behavior: serve with flattened args
        None => commands::serve::run(&ServerSettings::resolve(&cli.serve, &store, &config))
            .map(|()| ExitCode::Success),
    };

    match result {
        Ok(code) => code.into(),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::Error.into()
        }
    }
}

/// `RUST_LOG` wins; otherwise `-v` raises the level from info.
fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        })
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
