use crate::engine::{EngineError, Half, SnapEngine, SnapOutcome};
use crate::monitor::MonitorBounds;
use crate::transition::SnapCommand;
use crate::{Rect, Result};
use log::{debug, info, warn};
use tokio::sync::mpsc;

/// Commands the dispatcher accepts, from hotkeys and IPC alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Snap(SnapCommand),
    SnapHalf(Half),
    ReloadConfig,
    GetStatus,
    Quit,
}

/// Read and write the focused window's frame. Rects are in introspection
/// space (top-left origin of the primary display).
pub trait WindowControl {
    /// `None` when nothing has focus; that makes the command a no-op, not an
    /// error.
    fn focused_window_rect(&mut self) -> Result<Option<Rect>>;
    fn set_window_rect(&mut self, rect: Rect) -> Result<()>;
    fn minimize_window(&mut self) -> Result<()>;
}

/// Enumerate monitors in layout space. Called fresh on every command so
/// hot-plugged or rearranged monitors are picked up.
pub trait MonitorEnumerator {
    fn list_monitors(&mut self) -> Result<Vec<MonitorBounds>>;
}

/// The command dispatcher: owns the engine and the two platform collaborators
/// and turns incoming commands into frame writes or minimizes.
///
/// Nothing about the window is cached between commands; every snap re-reads
/// the focused window's frame and the monitor list.
pub struct Snapper {
    engine: SnapEngine,
    windows: Box<dyn WindowControl>,
    monitors: Box<dyn MonitorEnumerator>,
    command_rx: mpsc::Receiver<Command>,
}

impl Snapper {
    pub fn new(
        windows: Box<dyn WindowControl>,
        monitors: Box<dyn MonitorEnumerator>,
        command_rx: mpsc::Receiver<Command>,
    ) -> Self {
        Self {
            engine: SnapEngine::new(),
            windows,
            monitors,
            command_rx,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        info!("Starting snap command loop");

        while let Some(command) = self.command_rx.recv().await {
            if command == Command::Quit {
                info!("Shutting down snap dispatcher");
                break;
            }
            if let Err(e) = self.handle_command(command) {
                warn!("Error handling command {:?}: {}", command, e);
            }
        }

        Ok(())
    }

    /// Dispatch a single command. Errors returned here are platform
    /// failures; the expected degraded cases (no focus, no monitors, a
    /// rejected frame write) are logged and swallowed.
    pub fn handle_command(&mut self, command: Command) -> Result<()> {
        debug!("Handling command: {:?}", command);

        match command {
            Command::Snap(snap) => self.snap(snap),
            Command::SnapHalf(half) => self.snap_half(half),
            Command::ReloadConfig => {
                info!("Reloading configuration");
                Ok(())
            }
            Command::GetStatus => {
                let monitors = self.monitors.list_monitors()?;
                info!("Snapper status: {} monitors attached", monitors.len());
                Ok(())
            }
            Command::Quit => Ok(()),
        }
    }

    fn snap(&mut self, command: SnapCommand) -> Result<()> {
        let Some(window) = self.windows.focused_window_rect()? else {
            info!("Snap {:?}: no focused window, ignoring", command);
            return Ok(());
        };
        let monitors = self.monitors.list_monitors()?;

        match self.engine.compute_target(command, window, &monitors) {
            Ok(SnapOutcome::Move(target)) => {
                if let Err(e) = self.windows.set_window_rect(target) {
                    // The OS can reject writes, e.g. for non-resizable
                    // windows. The window stays where it was.
                    warn!("Snap {:?}: frame write failed: {}", command, e);
                }
            }
            Ok(SnapOutcome::Minimize) => {
                if let Err(e) = self.windows.minimize_window() {
                    warn!("Snap {:?}: minimize failed: {}", command, e);
                }
            }
            Err(EngineError::NoMonitors) => {
                warn!("Snap {:?}: no monitors available, ignoring", command);
            }
        }
        Ok(())
    }

    fn snap_half(&mut self, half: Half) -> Result<()> {
        let Some(window) = self.windows.focused_window_rect()? else {
            info!("Half snap {:?}: no focused window, ignoring", half);
            return Ok(());
        };
        let monitors = self.monitors.list_monitors()?;

        match self.engine.half_target(half, window, &monitors) {
            Ok(target) => {
                if let Err(e) = self.windows.set_window_rect(target) {
                    warn!("Half snap {:?}: frame write failed: {}", half, e);
                }
            }
            Err(EngineError::NoMonitors) => {
                warn!("Half snap {:?}: no monitors available, ignoring", half);
            }
        }
        Ok(())
    }
}
