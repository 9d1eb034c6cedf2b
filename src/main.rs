use std::{process::ExitCode, sync::Arc};

use clap::Parser;
use log::{error, info};
use meetlog::{
    App, Cli, Config, EnvPlatform, FileKvStore, KeyValueStore, NoteStore, PreferenceStore,
};
use tokio::sync::Mutex;

pub fn initialize_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_secs()
        .format_module_path(true)
        .init();

    info!("Logger initialized");
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    initialize_logger(cli.verbose);

    let mut config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    info!("Using data directory {}", config.data_dir.display());
    let kv: Arc<dyn KeyValueStore> = Arc::new(FileKvStore::new(config.data_dir.clone()));
    let platform = Arc::new(EnvPlatform);

    let mut notes = NoteStore::new(kv.clone());
    notes.load().await;
    let preferences = PreferenceStore::load(kv, platform.as_ref()).await;

    let app = App::new(
        Arc::new(Mutex::new(notes)),
        Arc::new(Mutex::new(preferences)),
        platform,
        config,
    );

    match app.run(cli.command).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
