use std::process::exit;

use clap::Parser;
use log::{error, info};

use codenest::{App, Cli, Config, Result, SystemClipboard, TutorialStore};

pub fn initialize_logger(verbose: bool) {
    // the shell shares the terminal with the log, keep it quiet by default
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_secs()
        .format_module_path(true)
        .init();

    info!("Logger initialized");
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    if cli.no_samples {
        config.load_samples = false;
    }
    if cli.clipboard_command.is_some() {
        config.clipboard_command = cli.clipboard_command;
    }

    let store = if config.load_samples {
        TutorialStore::with_samples()?
    } else {
        TutorialStore::new()
    };

    let clipboard = SystemClipboard::new(config.get_clipboard_command())?;
    let mut app = App::new(store, clipboard, config);
    app.run_shell().await
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    initialize_logger(cli.verbose);

    info!("Application starting up");

    if let Err(e) = run(cli).await {
        error!("{}", e);
        eprintln!("Error: {}", e);
        exit(1);
    }

    info!("Application shutting down");
}
