use log::{error, info};
use std::path::PathBuf;
use winsnap::{Config, Result};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();

    info!("Starting winsnap daemon");

    let config_path = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
        .join(".config")
        .join("winsnap")
        .join("config.toml");

    let config = Config::load(&config_path)?;

    tokio::select! {
        result = run(config) => {
            if let Err(e) = result {
                error!("Daemon error: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}

#[cfg(target_os = "macos")]
async fn run(config: Config) -> Result<()> {
    use tokio::sync::mpsc;
    use winsnap::hotkeys::HotkeyManager;
    use winsnap::ipc::IpcServer;
    use winsnap::macos::{AccessibilityManager, ScreenEnumerator};
    use winsnap::Snapper;

    let (command_tx, command_rx) = mpsc::channel(64);

    let ipc_server = IpcServer::new(&config.ipc, command_tx.clone());
    ipc_server.start().await?;

    let mut hotkey_manager = HotkeyManager::new(&config.hotkeys, command_tx)?;
    hotkey_manager.start().await?;

    let windows = AccessibilityManager::new()?;
    let screens = ScreenEnumerator::new()?;
    let mut snapper = Snapper::new(Box::new(windows), Box::new(screens), command_rx);
    snapper.run().await
}

#[cfg(not(target_os = "macos"))]
async fn run(_config: Config) -> Result<()> {
    Err(anyhow::anyhow!("the winsnap daemon only runs on macOS"))
}
