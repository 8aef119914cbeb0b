use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use coi_serve::config::{AppState, Config, DEFAULT_CONFIG_FILE};
use coi_serve::error::ServerError;
use coi_serve::{logger, server};
use tokio::sync::Notify;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logger::log_fatal(&e.to_string());
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), ServerError> {
    let cfg = Config::load()?;
    logger::init(&cfg).map_err(ServerError::LogFile)?;

    // Tokio runtime, worker count from the config when given
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build().map_err(ServerError::Runtime)?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), ServerError> {
    let state = Arc::new(AppState::new(&cfg)?);
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_listener(addr)?;

    if Path::new(DEFAULT_CONFIG_FILE).is_file() {
        logger::log_config_file(DEFAULT_CONFIG_FILE);
    }
    logger::log_server_start(&addr, &state.root, &cfg);

    let shutdown = Arc::new(Notify::new());
    server::start_signal_handler(Arc::clone(&shutdown))?;
    server::start_server_loop(listener, state, shutdown).await;

    Ok(())
}
