use std::{
    collections::HashMap,
    env,
    fs,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
    time::Duration,
};

use directories::BaseDirs;

pub const DEFAULT_API_URL: &str = "https://emkc.org/api/v2/piston";

#[derive(Debug, Clone)]
pub struct Config {
    inner: HashMap<String, String>,
    pub config_path: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        Self::load_from(&default_config_path())
    }

    /// Defaults, overlaid by the rc file at `config_path`, overlaid by the environment.
    pub fn load_from(config_path: &Path) -> Self {
        let mut map = default_map();

        if config_path.exists() {
            if let Ok(file) = fs::File::open(config_path) {
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

        for (k, v) in env::vars() {
            if is_config_key(&k) {
                map.insert(k, v);
            }
        }

        Self { inner: map, config_path: config_path.to_path_buf() }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.get(key).cloned()
    }

    /// Override a value (used for CLI flags, which beat file and env).
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.inner.insert(key.to_string(), value.into());
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(|v| v.trim().parse::<u64>().ok())
    }

    pub fn get_path(&self, key: &str) -> Option<PathBuf> {
        self.get(key).map(PathBuf::from)
    }

    pub fn api_url(&self) -> String {
        self.get("PISTON_API_URL")
            .filter(|s| !s.trim().is_empty() && s != "default")
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.get_u64("REQUEST_TIMEOUT").unwrap_or(60))
    }

    pub fn log_path(&self) -> PathBuf {
        self.get_path("LOG_PATH")
            .unwrap_or_else(|| env::temp_dir().join("syntax_hub"))
    }
}

fn is_config_key(k: &str) -> bool {
    const KEYS: &[&str] = &[
        "PISTON_API_URL",
        "REQUEST_TIMEOUT",
        "DEFAULT_LANGUAGE",
        "THEME",
        "LOG_PATH",
        "LOG_LEVEL",
    ];

    KEYS.contains(&k) || k.starts_with("SYNTAXHUB_")
}

fn default_config_path() -> PathBuf {
    let base = BaseDirs::new()
        .map(|b| b.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~/.config"));
    base.join("syntax_hub").join(".syntaxhubrc")
}

fn default_map() -> HashMap<String, String> {
    let mut m = HashMap::new();
    let temp = env::temp_dir().join("syntax_hub");

    m.insert("PISTON_API_URL".into(), DEFAULT_API_URL.into());
    m.insert("REQUEST_TIMEOUT".into(), "60".into());
    m.insert("DEFAULT_LANGUAGE".into(), "javascript".into());
    m.insert("THEME".into(), "dark".into());
    m.insert("LOG_PATH".into(), temp.to_string_lossy().into_owned());
    m.insert("LOG_LEVEL".into(), "info".into());

    m
}
