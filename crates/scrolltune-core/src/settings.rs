//! Settings snapshot and the typed base configuration interpreted from it.
//!
//! The persisted settings are an opaque tree owned by whoever stores them. The
//! resolver only ever sees whole snapshots; [`BaseConfig::from_snapshot`] is the
//! single place where that tree is checked for shape.

use std::fmt;
use std::path::{Path, PathBuf};

use bitflags::bitflags;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ConfigError;

/// Key-path addressable settings tree, compared structurally.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsSnapshot(Value);

impl SettingsSnapshot {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Settings used when no settings file exists yet
    pub fn defaults() -> Self {
        Self(serde_json::json!({
            "smooth": "high",
            "speed": "medium",
            "precise": false,
            "reverse_direction": false,
            "trackpad_simulation": true,
            "modifiers": {
                "horizontal": EventFlags::SHIFT.bits(),
                "zoom": EventFlags::COMMAND.bits(),
            },
        }))
    }

    /// Parse a snapshot from TOML text
    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        let value: Value = toml::from_str(content)?;
        Ok(Self(value))
    }

    /// Load a snapshot from a TOML file
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load a snapshot from a TOML file, or fall back to [`SettingsSnapshot::defaults`]
    /// if the file does not exist
    pub fn load_or_default(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::defaults())
        }
    }

    /// Get the settings file path
    /// Always uses ~/.config/scrolltune/scroll.toml on all platforms
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("scrolltune")
            .join("scroll.toml")
    }

    /// Look up a dot-separated key path such as `modifiers.zoom`
    pub fn lookup(&self, key_path: &str) -> Option<&Value> {
        key_path
            .split('.')
            .try_fold(&self.0, |node, segment| node.get(segment))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    fn require(&self, key: &str) -> Result<&Value, ConfigError> {
        self.lookup(key).ok_or_else(|| ConfigError::MissingKey {
            key: key.to_string(),
        })
    }

    fn require_bool(&self, key: &str) -> Result<bool, ConfigError> {
        let value = self.require(key)?;
        value.as_bool().ok_or_else(|| wrong_type(key, "a boolean", value))
    }

    fn require_u64(&self, key: &str) -> Result<u64, ConfigError> {
        let value = self.require(key)?;
        value
            .as_u64()
            .ok_or_else(|| wrong_type(key, "an unsigned integer", value))
    }

    /// Deserialize a string-valued enum setting by its snake_case name
    fn require_enum<T: DeserializeOwned>(&self, key: &str) -> Result<T, ConfigError> {
        let value = self.require(key)?;
        let text = value
            .as_str()
            .ok_or_else(|| wrong_type(key, "a string", value))?;
        serde_json::from_value(value.clone()).map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: text.to_string(),
        })
    }
}

impl From<Value> for SettingsSnapshot {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

fn wrong_type(key: &str, expected: &'static str, found: &Value) -> ConfigError {
    let found = match found {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(n) if n.is_u64() => "an unsigned integer",
        Value::Number(n) if n.is_i64() => "a negative integer",
        Value::Number(_) => "a float",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a table",
    };
    ConfigError::WrongType {
        key: key.to_string(),
        expected,
        found: found.to_string(),
    }
}

/// User-selected smoothness level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollSmoothness {
    Off,
    Regular,
    High,
}

impl ScrollSmoothness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Regular => "regular",
            Self::High => "high",
        }
    }
}

/// User-selected speed tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollSpeed {
    /// Leave acceleration to the operating system
    System,
    Low,
    Medium,
    High,
}

impl ScrollSpeed {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

bitflags! {
    /// Keyboard modifier mask, bit-compatible with the event flags reported by
    /// the input tap.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EventFlags: u64 {
        const SHIFT = 0x0002_0000;
        const CONTROL = 0x0004_0000;
        const OPTION = 0x0008_0000;
        const COMMAND = 0x0010_0000;
    }
}

impl fmt::Display for EventFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        let names: Vec<&str> = self.iter_names().map(|(name, _)| name).collect();
        if names.is_empty() {
            write!(f, "{:#x}", self.bits())
        } else {
            f.write_str(&names.join("+").to_lowercase())
        }
    }
}

/// Typed view of a settings snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseConfig {
    pub smoothness: ScrollSmoothness,
    pub speed: ScrollSpeed,
    pub precise: bool,
    pub reverse_direction: bool,
    pub trackpad_simulation: bool,
    pub horizontal_modifiers: EventFlags,
    pub zoom_modifiers: EventFlags,
}

impl BaseConfig {
    /// Interpret a raw snapshot, failing on the first missing or mistyped key
    pub fn from_snapshot(snapshot: &SettingsSnapshot) -> Result<Self, ConfigError> {
        Ok(Self {
            smoothness: snapshot.require_enum("smooth")?,
            speed: snapshot.require_enum("speed")?,
            precise: snapshot.require_bool("precise")?,
            reverse_direction: snapshot.require_bool("reverse_direction")?,
            trackpad_simulation: snapshot.require_bool("trackpad_simulation")?,
            horizontal_modifiers: EventFlags::from_bits_retain(
                snapshot.require_u64("modifiers.horizontal")?,
            ),
            zoom_modifiers: EventFlags::from_bits_retain(snapshot.require_u64("modifiers.zoom")?),
        })
    }
}
