use crate::events::AppEvent;
use async_channel::Sender;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use wheelcore::prizes::{DuplicatePolicy, Label, default_labels};
use wheelcore::session::SpinConfig;
use wheelcore::store::StorageKey;
use wheelcore::trivia::TriviaQuestion;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PrizeSettings {
    pub defaults: Vec<Label>,
    pub duplicates: DuplicatePolicy,
    pub storage_key: StorageKey,
    pub lock_while_spinning: bool,
}

impl Default for PrizeSettings {
    fn default() -> Self {
        Self {
            defaults: default_labels(),
            duplicates: DuplicatePolicy::default(),
            storage_key: StorageKey::default(),
            lock_while_spinning: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub spin: SpinConfig,
    #[serde(default)]
    pub prizes: PrizeSettings,
    #[serde(default)]
    pub trivia: Vec<TriviaQuestion>,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("org", "prizewheel", "prizewheel")
        .ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("PRIZEWHEEL")
        .separator("__")
        .try_parsing(true)
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(environment())
        .build()?;

    Ok(s.try_deserialize()?)
}

/// Loads the config, writing the commented default file on first start. Never fails: a broken
/// file is reported and the built-in defaults are used.
pub fn load_or_setup() -> Config {
    if let Ok(path) = get_config_path()
        && !path.exists()
    {
        match write_default_config() {
            Ok(path) => log::info!("Wrote default config to {}", path.display()),
            Err(e) => log::warn!("Could not write default config: {}", e),
        }
    }

    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let Some(config_dir) = config_path.parent().map(|p| p.to_path_buf()) else {
        return;
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", ConfigError::from(e));
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let touches_config = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                ) && event.paths.iter().any(|p| p == &config_path);

                if touches_config && tx.send(AppEvent::ConfigReload).await.is_err() {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};

    fn parse(toml: &str) -> Config {
        config::Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_default_file_matches_built_in_defaults() {
        let config = parse(DEFAULT_CONFIG);
        let builtin = Config::default();

        assert_eq!(config.spin, builtin.spin);
        assert_eq!(config.prizes.defaults, builtin.prizes.defaults);
        assert_eq!(config.prizes.duplicates, DuplicatePolicy::Allow);
        assert_eq!(config.prizes.storage_key, StorageKey::default());
        assert!(config.prizes.lock_while_spinning);
        assert!(config.trivia.is_empty());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = parse(
            r#"
            [spin]
            duration_ms = 4000

            [prizes]
            duplicates = "Reject"
            "#,
        );

        assert_eq!(config.spin.duration_ms, 4000);
        assert_eq!(config.spin.min_turns, 4.0);
        assert_eq!(config.prizes.duplicates, DuplicatePolicy::Reject);
        assert_eq!(config.prizes.defaults, default_labels());
    }

    #[test]
    fn test_trivia_questions() {
        let config = parse(
            r#"
            [[trivia]]
            question = "2 + 2?"
            answers = ["4", "four"]
            "#,
        );

        assert_eq!(config.trivia.len(), 1);
        assert!(config.trivia[0].accepts("FOUR"));
    }

    #[test]
    fn test_empty_config() {
        let config = parse("");
        assert_eq!(config.prizes.defaults.len(), 10);
        assert_eq!(config.spin, SpinConfig::default());
    }

    #[test]
    fn test_environment_override_uses_documented_name() {
        let name = "PRIZEWHEEL__SPIN__DURATION_MS";
        assert!(DEFAULT_CONFIG.contains(name));

        let vars = config::Map::from([(name.to_string(), "4321".to_string())]);
        let config: Config = config::Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(environment().source(Some(vars)))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.spin.duration_ms, 4321);
        assert_eq!(config.spin.min_turns, 4.0);
    }
}
