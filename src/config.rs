use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;

use cross_xdg::BaseDirs;
use tracing::{debug, warn};

use crate::input::InputMode;
use crate::interpreter::DEFAULT_CELLS;

/// Interpreter defaults that may come from `smash.toml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub cells: usize,
    pub input_mode: InputMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cells: DEFAULT_CELLS,
            input_mode: InputMode::Raw,
        }
    }
}

static SETTINGS: OnceLock<Settings> = OnceLock::new();

/// Settings from the config file, loaded once per process.
pub fn settings() -> &'static Settings {
    SETTINGS.get_or_init(|| {
        config_path()
            .and_then(|path| {
                let content = fs::read_to_string(&path).ok()?;
                debug!(path = %path.display(), "loaded config");
                Some(parse_settings(&content))
            })
            .unwrap_or_default()
    })
}

/// `$SMASH_CONFIG`, or `smash.toml` under the XDG config home.
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("SMASH_CONFIG") {
        return Some(PathBuf::from(path));
    }

    // On Linux: resolves to /home/<user>/.config
    let base_dirs = BaseDirs::new().ok()?;
    let mut path = PathBuf::from(base_dirs.config_home());
    path.push("smash.toml");
    Some(path)
}

/// Parse the `[interpreter]` section. Anything unrecognized keeps its default.
pub fn parse_settings(content: &str) -> Settings {
    // Very small line parser: `[section]` headers and `key = value` pairs.
    let mut in_interpreter = false;
    let mut map: HashMap<String, String> = HashMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with('[') && line.ends_with(']') {
            in_interpreter = &line[1..line.len() - 1] == "interpreter";
            continue;
        }
        if !in_interpreter {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            let value = value.trim();
            // Accept quoted or unquoted
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(value);
            map.insert(key.trim().to_string(), value.to_string());
        }
    }

    let mut settings = Settings::default();

    if let Some(raw) = map.get("cells") {
        match raw.replace('_', "").parse::<usize>() {
            Ok(n) if n > 0 => settings.cells = n,
            _ => warn!(value = %raw, "ignoring invalid `cells` in config"),
        }
    }

    if let Some(raw) = map.get("input") {
        match raw.parse::<InputMode>() {
            Ok(mode) => settings.input_mode = mode,
            Err(e) => warn!("ignoring `input` in config: {e}"),
        }
    }

    settings
}
