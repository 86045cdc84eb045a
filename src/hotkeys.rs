use crate::config::HotkeyConfig;
use crate::engine::Half;
use crate::snapper::Command;
use crate::transition::SnapCommand;
use crate::Result;
use log::{debug, error, info, warn};
use rdev::{listen, Event, EventType, Key};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};
use std::thread;
use tokio::sync::mpsc;

// Global state for the rdev callback - rdev only accepts function pointers
static GLOBAL_HOTKEY_SENDER: OnceLock<std::sync::mpsc::Sender<rdev::Event>> = OnceLock::new();

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCombination {
    pub modifiers: Vec<ModifierKey>,
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ModifierKey {
    Alt,   // Option key on macOS
    Ctrl,  // Control key
    Shift, // Shift key
    Cmd,   // Command key
}

pub struct HotkeyManager {
    bindings: HashMap<KeyCombination, String>,
    command_sender: mpsc::Sender<Command>,
    pressed_keys: Arc<Mutex<Vec<Key>>>,
    event_receiver: Option<std::sync::mpsc::Receiver<rdev::Event>>,
}

impl HotkeyManager {
    pub fn new(config: &HotkeyConfig, command_sender: mpsc::Sender<Command>) -> Result<Self> {
        let bindings = Self::parse_bindings(&config.bindings);

        info!(
            "Hotkey manager initialized with {} bindings",
            bindings.len()
        );
        for (combo, action) in &bindings {
            debug!("  {:?} -> {}", combo, action);
        }

        let (event_sender, event_receiver) = std::sync::mpsc::channel();

        if GLOBAL_HOTKEY_SENDER.set(event_sender).is_err() {
            warn!("Global hotkey sender already initialized");
        }

        Ok(Self {
            bindings,
            command_sender,
            pressed_keys: Arc::new(Mutex::new(Vec::new())),
            event_receiver: Some(event_receiver),
        })
    }

    pub async fn start(&mut self) -> Result<()> {
        info!("Starting global hotkey listener");

        let event_receiver = self
            .event_receiver
            .take()
            .ok_or_else(|| anyhow::anyhow!("Hotkey listener already started"))?;

        let bindings = self.bindings.clone();
        let command_sender = self.command_sender.clone();
        let pressed_keys = self.pressed_keys.clone();

        // rdev's listen blocks, so it gets its own OS thread; events are
        // forwarded through the channel.
        thread::spawn(move || {
            if let Err(e) = listen(global_hotkey_callback) {
                error!("Error in global hotkey listener: {:?}", e);
            }
        });

        // Matching also stays off the async runtime: it blocks on the event
        // channel and pushes commands in with blocking_send.
        thread::spawn(move || {
            Self::process_events(event_receiver, bindings, command_sender, pressed_keys);
        });

        Ok(())
    }

    pub fn reload_bindings(&mut self, config: &HotkeyConfig) {
        self.bindings = Self::parse_bindings(&config.bindings);
        info!("Reloaded {} hotkey bindings", self.bindings.len());
    }

    fn parse_bindings(config_bindings: &HashMap<String, String>) -> HashMap<KeyCombination, String> {
        let mut bindings = HashMap::new();

        for (key_combo, action) in config_bindings {
            match Self::parse_key_combination(key_combo) {
                Some(combination) => {
                    bindings.insert(combination, action.clone());
                }
                None => {
                    warn!("Failed to parse key combination: {}", key_combo);
                }
            }
        }

        bindings
    }

    fn process_events(
        event_receiver: std::sync::mpsc::Receiver<rdev::Event>,
        bindings: HashMap<KeyCombination, String>,
        command_sender: mpsc::Sender<Command>,
        pressed_keys: Arc<Mutex<Vec<Key>>>,
    ) {
        while let Ok(event) = event_receiver.recv() {
            Self::handle_rdev_event(event, &bindings, &command_sender, &pressed_keys);
        }
        warn!("Hotkey event channel disconnected");
    }

    fn handle_rdev_event(
        event: rdev::Event,
        bindings: &HashMap<KeyCombination, String>,
        command_sender: &mpsc::Sender<Command>,
        pressed_keys: &Arc<Mutex<Vec<Key>>>,
    ) {
        match event.event_type {
            EventType::KeyPress(key) => {
                {
                    let mut keys = pressed_keys.lock().unwrap();
                    if !keys
                        .iter()
                        .any(|k| std::mem::discriminant(k) == std::mem::discriminant(&key))
                    {
                        keys.push(key);
                    }
                }

                let keys = pressed_keys.lock().unwrap().clone();
                if let Some(combination) = Self::match_key_combination(&keys, bindings) {
                    info!("Hotkey triggered: {:?}", combination);
                    if let Some(action) = bindings.get(&combination) {
                        match Self::parse_action(action) {
                            Ok(command) => {
                                if let Err(e) = command_sender.blocking_send(command) {
                                    error!("Failed to send command: {}", e);
                                }
                            }
                            Err(e) => warn!("Ignoring unparseable action '{}': {}", action, e),
                        }
                    }
                }
            }
            EventType::KeyRelease(key) => {
                let mut keys = pressed_keys.lock().unwrap();
                keys.retain(|k| std::mem::discriminant(k) != std::mem::discriminant(&key));
            }
            _ => {}
        }
    }

    fn match_key_combination(
        pressed_keys: &[Key],
        bindings: &HashMap<KeyCombination, String>,
    ) -> Option<KeyCombination> {
        bindings
            .keys()
            .find(|combination| Self::is_combination_pressed(combination, pressed_keys))
            .cloned()
    }

    fn is_combination_pressed(combination: &KeyCombination, pressed_keys: &[Key]) -> bool {
        fn key_is_pressed(keys: &[Key], target: &Key) -> bool {
            keys.iter()
                .any(|k| std::mem::discriminant(k) == std::mem::discriminant(target))
        }

        for modifier in &combination.modifiers {
            let down = match modifier {
                ModifierKey::Alt => {
                    key_is_pressed(pressed_keys, &Key::Alt)
                        || key_is_pressed(pressed_keys, &Key::AltGr)
                }
                ModifierKey::Ctrl => {
                    key_is_pressed(pressed_keys, &Key::ControlLeft)
                        || key_is_pressed(pressed_keys, &Key::ControlRight)
                }
                ModifierKey::Shift => {
                    key_is_pressed(pressed_keys, &Key::ShiftLeft)
                        || key_is_pressed(pressed_keys, &Key::ShiftRight)
                }
                ModifierKey::Cmd => {
                    key_is_pressed(pressed_keys, &Key::MetaLeft)
                        || key_is_pressed(pressed_keys, &Key::MetaRight)
                }
            };
            if !down {
                return false;
            }
        }

        match Self::string_to_key(&combination.key) {
            Some(key) => key_is_pressed(pressed_keys, &key),
            None => false,
        }
    }

    fn string_to_key(key_str: &str) -> Option<Key> {
        match key_str.to_lowercase().as_str() {
            "left" => Some(Key::LeftArrow),
            "right" => Some(Key::RightArrow),
            "up" => Some(Key::UpArrow),
            "down" => Some(Key::DownArrow),
            "h" => Some(Key::KeyH),
            "j" => Some(Key::KeyJ),
            "k" => Some(Key::KeyK),
            "l" => Some(Key::KeyL),
            "m" => Some(Key::KeyM),
            "space" => Some(Key::Space),
            "return" | "enter" => Some(Key::Return),
            _ => None,
        }
    }

    fn parse_key_combination(combo: &str) -> Option<KeyCombination> {
        let parts: Vec<&str> = combo.split('+').collect();
        if parts.is_empty() {
            return None;
        }

        let mut modifiers = Vec::new();
        let key_str = parts.last()?;

        for part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "alt" | "option" => modifiers.push(ModifierKey::Alt),
                "ctrl" | "control" => modifiers.push(ModifierKey::Ctrl),
                "shift" => modifiers.push(ModifierKey::Shift),
                "cmd" | "command" => modifiers.push(ModifierKey::Cmd),
                _ => {
                    warn!("Unknown modifier key: {}", part);
                    return None;
                }
            }
        }

        Some(KeyCombination {
            modifiers,
            key: key_str.to_string(),
        })
    }

    fn parse_action(action: &str) -> Result<Command> {
        match action {
            "snap_left" => Ok(Command::Snap(SnapCommand::Left)),
            "snap_right" => Ok(Command::Snap(SnapCommand::Right)),
            "snap_up" => Ok(Command::Snap(SnapCommand::Up)),
            "snap_down" => Ok(Command::Snap(SnapCommand::Down)),
            "snap_left_half" => Ok(Command::SnapHalf(Half::Left)),
            "snap_right_half" => Ok(Command::SnapHalf(Half::Right)),
            "reload" => Ok(Command::ReloadConfig),
            _ => Err(anyhow::anyhow!("Unknown action: {}", action)),
        }
    }
}

// Global callback for rdev - must be a function pointer
fn global_hotkey_callback(event: Event) {
    if let Some(sender) = GLOBAL_HOTKEY_SENDER.get() {
        // Channel may already be closed during shutdown; nothing to do.
        let _ = sender.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_modifiers_and_key() {
        let combo = HotkeyManager::parse_key_combination("cmd+alt+left").unwrap();
        assert_eq!(combo.modifiers, vec![ModifierKey::Cmd, ModifierKey::Alt]);
        assert_eq!(combo.key, "left");
    }

    #[test]
    fn rejects_unknown_modifier() {
        assert!(HotkeyManager::parse_key_combination("hyper+left").is_none());
    }

    #[test]
    fn actions_map_to_commands() {
        assert_eq!(
            HotkeyManager::parse_action("snap_up").unwrap(),
            Command::Snap(SnapCommand::Up)
        );
        assert_eq!(
            HotkeyManager::parse_action("snap_right_half").unwrap(),
            Command::SnapHalf(Half::Right)
        );
        assert!(HotkeyManager::parse_action("snap_diagonally").is_err());
    }

    #[test]
    fn combination_requires_all_modifiers() {
        let combo = HotkeyManager::parse_key_combination("cmd+alt+left").unwrap();
        let without_cmd = [Key::Alt, Key::LeftArrow];
        let with_both = [Key::MetaLeft, Key::Alt, Key::LeftArrow];
        assert!(!HotkeyManager::is_combination_pressed(&combo, &without_cmd));
        assert!(HotkeyManager::is_combination_pressed(&combo, &with_both));
    }
}
