use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub hotkeys: HotkeyConfig,
    pub ipc: IpcConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotkeyConfig {
    #[serde(default = "default_bindings")]
    pub bindings: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpcConfig {
    #[serde(default = "default_socket_path")]
    pub socket_path: String,
}

fn default_socket_path() -> String {
    "/tmp/winsnap.sock".to_string()
}

fn default_bindings() -> HashMap<String, String> {
    let mut bindings = HashMap::new();
    // Directional cycling on cmd+alt+arrows.
    bindings.insert("cmd+alt+left".to_string(), "snap_left".to_string());
    bindings.insert("cmd+alt+right".to_string(), "snap_right".to_string());
    bindings.insert("cmd+alt+up".to_string(), "snap_up".to_string());
    bindings.insert("cmd+alt+down".to_string(), "snap_down".to_string());

    // Plain half snaps, without the cycling behavior.
    bindings.insert(
        "cmd+alt+shift+left".to_string(),
        "snap_left_half".to_string(),
    );
    bindings.insert(
        "cmd+alt+shift+right".to_string(),
        "snap_right_half".to_string(),
    );

    bindings
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hotkeys: HotkeyConfig {
                bindings: default_bindings(),
            },
            ipc: IpcConfig {
                socket_path: default_socket_path(),
            },
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            log::info!("Config file not found at {:?}, using defaults", path);
            let config = Self::default();
            config.save(path)?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn reload<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        *self = Self::load(path)?;
        Ok(())
    }
}
