//! backspin CLI entry point

use std::process::ExitCode;

use clap::Parser;

use backspin::cli::{
    app::{load_merged_config, run_deck, EXIT_ERROR},
    args::{Cli, Commands, DeckOptions},
    config_cmd::handle_config_command,
    devices::handle_devices_command,
    presenter::Presenter,
};
use backspin::domain::config::AppConfig;
use backspin::infrastructure::XdgConfigStore;
use backspin::logging;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new();

    // Logs go to a file so they never fight the interactive prompt
    if let Err(e) = logging::init_logging() {
        presenter.warn(&format!("logging disabled: {}", e));
    }

    // Handle subcommands
    match cli.command {
        Some(Commands::Config { action }) => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        Some(Commands::Devices) => {
            if let Err(e) = handle_devices_command(&presenter) {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        None => {}
    }

    // Build CLI config from args
    let cli_config = AppConfig {
        device: cli.device.clone(),
        sample_rate: cli.sample_rate,
    };

    // Merge config
    let config = load_merged_config(cli_config).await;

    let options = DeckOptions {
        device: config.device,
        sample_rate: config.sample_rate,
        mute: cli.mute,
    };

    run_deck(options).await
}
