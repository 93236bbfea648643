use std::path::PathBuf;

use pasteshow_lib::bootstrap::{
    default_config_path, init_tracing_subscriber, load_config_or_empty, log_directory, run,
    RuntimeSettings,
};
use ps_core::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(default_config_path);

    let config = match &config_path {
        Some(path) => load_config_or_empty(path)?,
        None => AppConfig::empty(),
    };

    init_tracing_subscriber(log_directory(&config).as_deref())?;
    if let Some(path) = &config_path {
        tracing::debug!(path = %path.display(), "Loaded configuration");
    }

    run(RuntimeSettings::from_config(&config)).await
}
