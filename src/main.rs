use std::sync::Arc;

use clap::Parser;
use tracing::{debug, info};

use shortcut_kit::cli::{self, CliArgs};
use shortcut_kit::config::{self, Config};
use shortcut_kit::logging;
use shortcut_kit::shortcuts::{JsonFileCache, JsonFileStore, PlatformInfo, ShortcutSession};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(config::default_config_path);
    let config = config::load_config(&config_path);

    let _log_guard = logging::init(&config.get_log_dir(), config.get_log_filter());
    info!(
        config_path = %config_path.display(),
        data_dir = %config.get_data_dir().display(),
        "shortcut-kit starting"
    );

    let platform = match args.platform.as_deref() {
        Some(description) => PlatformInfo::from_description(Some(description)),
        None => config.get_platform(),
    };
    debug!(platform = ?platform.description(), "Platform resolved");

    let mut session = open_session(&config, platform);
    if session.reconcile().await {
        info!("Shortcut overrides updated from settings");
    }

    let result = cli::run(&args.command, &mut session, &mut std::io::stdout().lock());

    session.flush().await;
    result
}

fn open_session(config: &Config, platform: PlatformInfo) -> ShortcutSession {
    ShortcutSession::new(
        Arc::new(platform),
        Box::new(JsonFileCache::new(config.get_cache_path())),
        Arc::new(JsonFileStore::new(config.get_settings_path())),
    )
}
