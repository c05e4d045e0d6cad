use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;
use xfchess_session::core::{load_settings, save_settings, settings_path, Cli};
use xfchess_session::input::CoordinateMapper;
use xfchess_session::ui::TerminalFrontend;
use xfchess_session::{launch_session, SessionOutcome};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(SessionOutcome::Finished(over)) => {
            println!("Game Over! Result: {} ({})", over.result, over.message());
            ExitCode::SUCCESS
        }
        Ok(SessionOutcome::Quit) => ExitCode::SUCCESS,
        Err(e) => {
            error!("[SESSION] {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<SessionOutcome> {
    let mut settings =
        load_settings(cli.config.as_deref()).context("Failed to load settings")?;
    cli.apply_to(&mut settings);
    settings.validate().context("Invalid settings")?;

    if cli.save_config {
        let path = cli.config.clone().unwrap_or_else(settings_path);
        save_settings(&settings, &path).context("Failed to save settings")?;
    }

    let mut frontend = TerminalFrontend::stdio(CoordinateMapper::new(settings.square_size_px));
    launch_session(&settings, &mut frontend).context("Session ended with an error")
}
