use crate::config::IpcConfig;
use crate::engine::Half;
use crate::snapper::Command;
use crate::transition::SnapCommand;
use crate::Result;
use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::mpsc;
use tokio::time::{timeout, Duration};

#[derive(Debug, Serialize, Deserialize)]
pub struct IpcMessage {
    pub command: String,
    pub args: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IpcResponse {
    pub success: bool,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

impl IpcResponse {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }

    fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}

pub struct IpcServer {
    config: IpcConfig,
    command_sender: mpsc::Sender<Command>,
}

impl IpcServer {
    pub fn new(config: &IpcConfig, command_sender: mpsc::Sender<Command>) -> Self {
        Self {
            config: config.clone(),
            command_sender,
        }
    }

    pub async fn start(&self) -> Result<()> {
        let socket_path = &self.config.socket_path;

        // Remove a stale socket from a previous run
        if Path::new(socket_path).exists() {
            std::fs::remove_file(socket_path)?;
        }

        let listener = UnixListener::bind(socket_path)?;
        info!("IPC server listening on {}", socket_path);

        let command_sender = self.command_sender.clone();
        tokio::spawn(async move {
            loop {
                match listener.accept().await {
                    Ok((stream, addr)) => {
                        debug!("IPC client connected: {:?}", addr);
                        let sender = command_sender.clone();
                        tokio::spawn(async move {
                            if let Err(e) = Self::handle_client(stream, sender).await {
                                error!("Error handling IPC client: {}", e);
                            }
                        });
                    }
                    Err(e) => {
                        error!("Error accepting IPC connection: {}", e);
                    }
                }
            }
        });

        Ok(())
    }

    async fn handle_client(
        stream: UnixStream,
        command_sender: mpsc::Sender<Command>,
    ) -> Result<()> {
        let (reader, mut writer) = stream.into_split();
        let mut reader = BufReader::new(reader);
        let mut line = String::new();

        let client_timeout = Duration::from_secs(30);

        while let Ok(Ok(bytes_read)) = timeout(client_timeout, reader.read_line(&mut line)).await {
            if bytes_read == 0 {
                debug!("IPC client disconnected");
                break;
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                line.clear();
                continue;
            }

            debug!("Received IPC message: {}", trimmed);

            let response = match serde_json::from_str::<IpcMessage>(trimmed) {
                Ok(message) => Self::process_message(message, &command_sender).await,
                Err(e) => IpcResponse::err(format!("Invalid JSON: {}", e)),
            };

            let response_json = serde_json::to_string(&response)
                .unwrap_or_else(|_| r#"{"success":false,"message":"Internal server error","data":null}"#.to_string());

            if let Err(e) = writer.write_all(response_json.as_bytes()).await {
                error!("Failed to write response: {}", e);
                break;
            }
            if let Err(e) = writer.write_all(b"\n").await {
                error!("Failed to write newline: {}", e);
                break;
            }
            if let Err(e) = writer.flush().await {
                error!("Failed to flush response: {}", e);
                break;
            }

            line.clear();
        }

        Ok(())
    }

    async fn process_message(
        message: IpcMessage,
        command_sender: &mpsc::Sender<Command>,
    ) -> IpcResponse {
        debug!("Processing IPC command: {}", message.command);

        let command = match message.command.as_str() {
            "snap-left" => Command::Snap(SnapCommand::Left),
            "snap-right" => Command::Snap(SnapCommand::Right),
            "snap-up" => Command::Snap(SnapCommand::Up),
            "snap-down" => Command::Snap(SnapCommand::Down),
            "snap-left-half" => Command::SnapHalf(Half::Left),
            "snap-right-half" => Command::SnapHalf(Half::Right),
            "reload" => Command::ReloadConfig,
            "status" => Command::GetStatus,
            "quit" | "stop" => Command::Quit,
            "ping" => {
                return IpcResponse {
                    success: true,
                    message: "pong".to_string(),
                    data: Some(serde_json::json!({
                        "timestamp": chrono::Utc::now().to_rfc3339(),
                        "version": env!("CARGO_PKG_VERSION")
                    })),
                };
            }
            "help" => {
                return IpcResponse {
                    success: true,
                    message: "Available commands".to_string(),
                    data: Some(serde_json::json!({
                        "commands": [
                            {"name": "snap-left", "description": "Cycle the focused window leftward"},
                            {"name": "snap-right", "description": "Cycle the focused window rightward"},
                            {"name": "snap-up", "description": "Cycle the focused window upward"},
                            {"name": "snap-down", "description": "Cycle the focused window downward (or minimize)"},
                            {"name": "snap-left-half", "description": "Snap directly to the left half"},
                            {"name": "snap-right-half", "description": "Snap directly to the right half"},
                            {"name": "reload", "description": "Reload configuration"},
                            {"name": "status", "description": "Log daemon status"},
                            {"name": "ping", "description": "Test connection"},
                            {"name": "quit", "description": "Stop the daemon"},
                            {"name": "help", "description": "Show this help"}
                        ]
                    })),
                };
            }
            _ => {
                return IpcResponse::err(format!(
                    "Unknown command: '{}'. Use 'help' to see available commands.",
                    message.command
                ));
            }
        };

        match command_sender.send(command).await {
            Ok(()) => IpcResponse::ok("Command sent successfully"),
            Err(e) => IpcResponse::err(format!("Failed to send command: {}", e)),
        }
    }
}

pub struct IpcClient {
    socket_path: String,
}

impl IpcClient {
    pub fn new(socket_path: String) -> Self {
        Self { socket_path }
    }

    pub async fn send_command(&self, command: &str, args: Vec<String>) -> Result<IpcResponse> {
        let stream = UnixStream::connect(&self.socket_path).await?;
        let (reader, mut writer) = stream.into_split();

        let message = IpcMessage {
            command: command.to_string(),
            args,
        };

        let message_json = serde_json::to_string(&message)?;

        writer.write_all(message_json.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;

        let mut reader = BufReader::new(reader);
        let mut response_line = String::new();

        match timeout(Duration::from_secs(10), reader.read_line(&mut response_line)).await {
            Ok(Ok(_)) => {
                let response: IpcResponse = serde_json::from_str(&response_line)?;
                Ok(response)
            }
            Ok(Err(e)) => Err(anyhow::anyhow!("Failed to read response: {}", e)),
            Err(_) => Err(anyhow::anyhow!("Response timeout")),
        }
    }

    pub async fn ping(&self) -> Result<IpcResponse> {
        self.send_command("ping", vec![]).await
    }

    pub async fn get_status(&self) -> Result<IpcResponse> {
        self.send_command("status", vec![]).await
    }

    pub async fn reload_config(&self) -> Result<IpcResponse> {
        self.send_command("reload", vec![]).await
    }

    pub async fn quit(&self) -> Result<IpcResponse> {
        self.send_command("quit", vec![]).await
    }

    /// One-shot helper for CLI use: send, print the response, exit non-zero
    /// on failure.
    pub async fn run_command(socket_path: &str, command: &str, args: Vec<String>) -> Result<()> {
        let client = IpcClient::new(socket_path.to_string());

        let response = client.send_command(command, args).await?;

        if response.success {
            println!("{}", response.message);
            if let Some(data) = response.data {
                println!("{}", serde_json::to_string_pretty(&data)?);
            }
        } else {
            eprintln!("{}", response.message);
            std::process::exit(1);
        }

        Ok(())
    }

    pub async fn check_connection(socket_path: &str) -> bool {
        let client = IpcClient::new(socket_path.to_string());
        client.ping().await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(command: &str) -> IpcMessage {
        IpcMessage {
            command: command.to_string(),
            args: vec![],
        }
    }

    #[tokio::test]
    async fn snap_commands_map_to_dispatcher_commands() {
        let (tx, mut rx) = mpsc::channel(8);

        let cases = [
            ("snap-left", Command::Snap(SnapCommand::Left)),
            ("snap-right", Command::Snap(SnapCommand::Right)),
            ("snap-up", Command::Snap(SnapCommand::Up)),
            ("snap-down", Command::Snap(SnapCommand::Down)),
            ("snap-left-half", Command::SnapHalf(Half::Left)),
            ("snap-right-half", Command::SnapHalf(Half::Right)),
            ("quit", Command::Quit),
        ];

        for (name, expected) in cases {
            let response = IpcServer::process_message(message(name), &tx).await;
            assert!(response.success, "{} should succeed", name);
            assert_eq!(rx.recv().await.unwrap(), expected);
        }
    }

    #[tokio::test]
    async fn ping_answers_without_dispatching() {
        let (tx, mut rx) = mpsc::channel(8);

        let response = IpcServer::process_message(message("ping"), &tx).await;
        assert!(response.success);
        assert_eq!(response.message, "pong");
        assert!(response.data.is_some());

        drop(tx);
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn unknown_command_is_rejected() {
        let (tx, _rx) = mpsc::channel(8);

        let response = IpcServer::process_message(message("snap-diagonally"), &tx).await;
        assert!(!response.success);
        assert!(response.message.contains("Unknown command"));
    }
}
