use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;
use winsnap::ipc::IpcClient;
use winsnap::{Config, Result};

#[derive(Parser)]
#[command(name = "winsnap")]
#[command(about = "Sectional window snapping for macOS")]
struct Cli {
    #[arg(short, long, help = "Configuration file path")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Start the snapping daemon")]
    Start,
    #[command(about = "Stop a running daemon")]
    Stop,
    #[command(about = "Ask a running daemon to reload its configuration")]
    Reload,
    #[command(about = "Show daemon status")]
    Status,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config_path = cli.config.unwrap_or_else(|| {
        PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
            .join(".config")
            .join("winsnap")
            .join("config.toml")
    });

    let config = Config::load(&config_path)?;

    match cli.command {
        Some(Commands::Start) | None => {
            info!("Starting winsnap");
            run_daemon(config).await?;
        }
        Some(Commands::Stop) => {
            IpcClient::run_command(&config.ipc.socket_path, "quit", vec![]).await?;
        }
        Some(Commands::Reload) => {
            IpcClient::run_command(&config.ipc.socket_path, "reload", vec![]).await?;
        }
        Some(Commands::Status) => {
            if !IpcClient::check_connection(&config.ipc.socket_path).await {
                eprintln!("winsnap daemon is not running");
                std::process::exit(1);
            }
            IpcClient::run_command(&config.ipc.socket_path, "status", vec![]).await?;
        }
    }

    Ok(())
}

#[cfg(target_os = "macos")]
async fn run_daemon(config: Config) -> Result<()> {
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
async fn run_daemon(_config: Config) -> Result<()> {
    Err(anyhow::anyhow!(
        "the winsnap daemon only runs on macOS; this build can still drive a remote daemon over IPC"
    ))
}
