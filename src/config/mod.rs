//! Runtime configuration: defaults, `.scriptmanrc`, environment overlay.

use std::{
    collections::HashMap,
    env, fs,
    io::{BufRead, BufReader},
    path::PathBuf,
};

use directories::BaseDirs;

#[derive(Debug, Clone)]
pub struct Config {
    inner: HashMap<String, String>,
    pub config_path: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        let mut map = default_map();
        let config_path = default_config_path();

        // Read .scriptmanrc if exists
        if config_path.exists() {
            if let Ok(file) = fs::File::open(&config_path) {
                let reader = BufReader::new(file);
                for line in reader.lines().map_while(Result::ok) {
                    let line = line.trim();
                    if line.is_empty() || line.starts_with('#') {
                        continue;
                    }
                    if let Some((k, v)) = line.split_once('=') {
                        map.insert(k.trim().to_string(), v.trim().to_string());
                    }
                }
            }
        }

        // Overlay environment variables (take precedence)
        for (k, v) in env::vars() {
            if is_config_key(&k) {
                map.insert(k, v);
            }
        }

        Self { inner: map, config_path }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        // ENV first
        if let Ok(v) = env::var(key) {
            return Some(v);
        }
        self.inner.get(key).cloned()
    }

    pub fn get_bool(&self, key: &str) -> bool {
        self.get(key)
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(|v| v.parse::<u64>().ok())
    }

    pub fn script_storage_path(&self) -> PathBuf {
        self.get("SCRIPT_STORAGE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(default_storage_path)
    }
}

fn is_config_key(k: &str) -> bool {
    const KEYS: &[&str] = &[
        "SCRIPT_STORAGE_PATH",
        "SHELL_NAME",
        "DEFAULT_TIMEOUT",
        "EXECUTE_CONFIRM",
    ];

    KEYS.contains(&k) || k.starts_with("SCRIPTMAN_")
}

fn config_base_dir() -> PathBuf {
    BaseDirs::new()
        .map(|b| b.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.config"))
}

fn default_config_path() -> PathBuf {
    config_base_dir().join("scriptman").join(".scriptmanrc")
}

fn default_storage_path() -> PathBuf {
    config_base_dir().join("scriptman").join("scripts")
}

fn default_map() -> HashMap<String, String> {
    let mut m = HashMap::new();

    m.insert(
        "SCRIPT_STORAGE_PATH".into(),
        default_storage_path().to_string_lossy().into_owned(),
    );
    m.insert("SHELL_NAME".into(), "auto".into());
    // Seconds; 0 disables the deadline.
    m.insert("DEFAULT_TIMEOUT".into(), "0".into());
    m.insert("EXECUTE_CONFIRM".into(), "true".into());

    m
}
