use colorring::{Palette, Preset, SelectorConfig, SelectorError};
use config::builder::DefaultState;
use config::ConfigBuilder;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub preset: Preset,
    #[serde(default = "default_scale_factor")]
    pub scale_factor: f64,
    #[serde(default)]
    pub ring: SelectorConfig,
}

fn default_scale_factor() -> f64 {
    1.0
}

impl Config {
    pub fn from_preset(preset: Preset) -> Self {
        Self {
            preset,
            scale_factor: default_scale_factor(),
            ring: preset.config(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        Palette::new(self.ring.palette.clone())?;
        if !(self.scale_factor.is_finite() && self.scale_factor > 0.0) {
            return Err(ConfigError::InvalidScale(self.scale_factor));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_preset(Preset::default())
    }
}

/// Only the preset, read first so the rest of the file can layer on top of it.
#[derive(Debug, Deserialize)]
struct PresetProbe {
    #[serde(default)]
    preset: Preset,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid ring: {0}")]
    Selector(#[from] SelectorError),
    #[error("Scale factor must be a positive number, got {0}")]
    InvalidScale(f64),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("org", "colorring", "ringpick")
        .ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// `env` replaces the process environment when set.
fn with_user_sources(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
    env: Option<&config::Map<String, String>>,
) -> ConfigBuilder<DefaultState> {
    builder
        .add_source(config::File::from(path.to_path_buf()).required(false))
        .add_source(
            config::Environment::with_prefix("RINGPICK")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("ring.palette")
                .source(env.cloned()),
        )
}

/// Reads the file at `path` and `RINGPICK_*` variables on top of the chosen
/// preset. `preset_override` wins over the preset named in the file.
pub fn load_config(path: &Path, preset_override: Option<Preset>) -> Result<Config, ConfigError> {
    load_config_with_env(path, preset_override, None)
}

fn load_config_with_env(
    path: &Path,
    preset_override: Option<Preset>,
    env: Option<&config::Map<String, String>>,
) -> Result<Config, ConfigError> {
    let probe: PresetProbe = with_user_sources(config::Config::builder(), path, env)
        .build()?
        .try_deserialize()?;
    let preset = preset_override.unwrap_or(probe.preset);

    let base = config::Config::try_from(&Config::from_preset(preset))?;
    let s = with_user_sources(config::Config::builder().add_source(base), path, env).build()?;

    let mut config: Config = s.try_deserialize()?;
    config.preset = preset;
    config.validate()?;
    Ok(config)
}

pub fn load_or_default(path: &Path, preset_override: Option<Preset>) -> Config {
    match load_config(path, preset_override) {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load {}: {}", path.display(), e);
            Config::from_preset(preset_override.unwrap_or_default())
        }
    }
}

pub fn write_default_config(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(path, DEFAULT_CONFIG)?;
    }
    Ok(())
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

/// Canonical directory to watch and the file path events will report.
/// Creates the directory if needed.
fn watch_target(config_path: &Path) -> std::io::Result<(PathBuf, PathBuf)> {
    let file_name = config_path.file_name().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("{} does not name a file", config_path.display()),
        )
    })?;
    let parent = match config_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs_err::create_dir_all(parent)?;
    let config_dir = fs_err::canonicalize(parent)?;
    let config_path = config_dir.join(file_name);
    Ok((config_dir, config_path))
}

pub async fn run_async_watcher(config_path: PathBuf, tx: Sender<AppEvent>) {
    let (config_dir, config_path) = match watch_target(&config_path) {
        Ok(target) => target,
        Err(e) => {
            log::error!("Failed to prepare config directory for watching: {}", e);
            return;
        }
    };

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
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
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
    use colorring::Swatch;
    use std::time::Duration;

    fn write_config(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("ringpick-test-{}", std::process::id()));
        fs_err::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs_err::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_missing_file_uses_preset() {
        let path = std::env::temp_dir().join("ringpick-test-missing/config.toml");
        let config = load_config(&path, Some(Preset::Confirm)).unwrap();
        assert_eq!(config, Config::from_preset(Preset::Confirm));
    }

    #[test]
    fn test_file_overrides_layer_on_preset() {
        let path = write_config(
            "layered.toml",
            r##"
preset = "confirm"
scale_factor = 2.0

[ring]
palette = ["black", "#fff"]
rotation_offset = 90.0

[ring.button]
label = "Done"
"##,
        );
        let config = load_config(&path, None).unwrap();

        assert_eq!(config.preset, Preset::Confirm);
        assert_eq!(config.scale_factor, 2.0);
        assert_eq!(config.ring.palette, vec![Swatch::BLACK, Swatch::WHITE]);
        assert_eq!(config.ring.rotation_offset, 90.0);
        // untouched fields keep the confirm preset's values
        assert_eq!(config.ring.outer_margin, 80.0);
        assert_eq!(config.ring.inner_fill, Some(Swatch::BLACK));
        let button = config.ring.button.unwrap();
        assert_eq!(button.label, "Done");
        assert_eq!(button.radius, 16.0);
    }

    #[test]
    fn test_preset_override_beats_file() {
        let path = write_config("override.toml", "preset = \"confirm\"\n");
        let config = load_config(&path, Some(Preset::Classic)).unwrap();
        assert_eq!(config.preset, Preset::Classic);
        assert!(config.ring.button.is_none());
    }

    #[test]
    fn test_empty_palette_is_rejected() {
        let path = write_config("empty.toml", "[ring]\npalette = []\n");
        assert!(matches!(
            load_config(&path, None),
            Err(ConfigError::Selector(SelectorError::EmptyPalette))
        ));
        assert_eq!(load_or_default(&path, None), Config::default());
    }

    #[test]
    fn test_bad_color_is_an_error() {
        let path = write_config("bad-color.toml", "[ring]\npalette = [\"chartreuse-ish\"]\n");
        assert!(matches!(
            load_config(&path, None),
            Err(ConfigError::Config(_))
        ));
    }

    #[test]
    fn test_default_config_file_parses() {
        let path = write_config("default.toml", DEFAULT_CONFIG);
        let config = load_config(&path, None).unwrap();
        assert_eq!(config, Config::from_preset(Preset::Confirm));
    }

    #[test]
    fn test_environment_layers_over_file() {
        let path = write_config("env.toml", "preset = \"confirm\"\nscale_factor = 1.5\n");
        let env: config::Map<String, String> = [
            ("RINGPICK_RING__PALETTE", "red,#00f"),
            ("RINGPICK_SCALE_FACTOR", "2"),
            ("RINGPICK_RING__BUTTON__LABEL", "Go"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let config = load_config_with_env(&path, None, Some(&env)).unwrap();

        assert_eq!(config.ring.palette, vec![Swatch::RED, Swatch::BLUE]);
        assert_eq!(config.scale_factor, 2.0);
        let button = config.ring.button.unwrap();
        assert_eq!(button.label, "Go");
        assert_eq!(button.fill, Swatch::BLUE);
    }

    #[test]
    fn test_watch_target_is_absolute() {
        let (dir, path) = watch_target(Path::new("config.toml")).unwrap();
        assert!(dir.is_absolute());
        assert_eq!(path, dir.join("config.toml"));
        assert!(watch_target(Path::new("/")).is_err());
    }

    #[tokio::test]
    async fn test_watcher_reloads_relative_path() {
        let dir = PathBuf::from(format!(".ringpick-watch-{}", std::process::id()));
        let path = dir.join("config.toml");
        fs_err::create_dir_all(&dir).unwrap();
        let (tx, rx) = async_channel::bounded(4);

        let received = tokio::select! {
            _ = run_async_watcher(path.clone(), tx) => None,
            event = async {
                tokio::time::sleep(Duration::from_millis(200)).await;
                fs_err::write(&path, "scale_factor = 2.0\n").unwrap();
                tokio::time::timeout(Duration::from_secs(5), rx.recv()).await
            } => Some(event),
        };
        fs_err::remove_dir_all(&dir).unwrap();

        assert!(matches!(received, Some(Ok(Ok(AppEvent::ConfigReload)))));
    }
}
