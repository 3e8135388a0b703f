use std::{
    path::{Path, PathBuf},
    str::FromStr as _,
    time::Duration,
};

use anyhow::Context as _;
use lark_scan::{DEFAULT_EXTENSIONS, ScanOptions};
use ratatui::style::{Color, Style};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    #[serde(default)]
    pub general: General,
    #[serde(default)]
    pub library: Library,
    #[serde(default)]
    pub style: StyleConfig,
}
impl Config {
    pub const FILENAME: &str = "lark-config.toml";

    pub fn default_path() -> PathBuf {
        PathBuf::from(Self::FILENAME)
    }

    /// Loads the config at `path`, falling back to defaults if it doesn't exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                let mut config: Config = toml::from_str(&contents)
                    .with_context(|| format!("Failed to parse {}", path.display()))?;
                config.general.clamp();
                tracing::info!("loaded config from {}", path.display());
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("no config file found at {}, using defaults", path.display());
                Ok(Config::default())
            }
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let contents = toml::to_string(self).context("Failed to serialize config")?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("saved config to {}", path.display());
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct General {
    pub volume: f32,
    pub tick_rate_ms: u64,
    pub seek_step_secs: i64,
    pub volume_step: f32,
}
impl Default for General {
    fn default() -> Self {
        Self {
            volume: 1.0,
            tick_rate_ms: 100,
            seek_step_secs: 10,
            volume_step: 0.05,
        }
    }
}
impl General {
    pub const MIN_TICK_RATE_MS: u64 = 1;

    /// Raises `tick_rate_ms` to at least [`Self::MIN_TICK_RATE_MS`].
    fn clamp(&mut self) {
        if self.tick_rate_ms < Self::MIN_TICK_RATE_MS {
            tracing::warn!(
                "tick_rate_ms = {} is too low, using {}",
                self.tick_rate_ms,
                Self::MIN_TICK_RATE_MS
            );
            self.tick_rate_ms = Self::MIN_TICK_RATE_MS;
        }
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(Self::MIN_TICK_RATE_MS))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Library {
    pub extensions: Vec<String>,
    pub recursive: bool,
}
impl Default for Library {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            recursive: false,
        }
    }
}
impl Library {
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            extensions: self.extensions.clone(),
            recursive: self.recursive,
        }
    }
}

/// A foreground/background pair, stored as color names (`"cyan"`, `"#ff8800"`, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColorPair {
    pub fg: String,
    pub bg: String,
}
impl ColorPair {
    fn new(fg: &str, bg: &str) -> Self {
        Self {
            fg: fg.to_string(),
            bg: bg.to_string(),
        }
    }

    /// Converts to a ratatui style, replacing unparseable names with `fallback`'s.
    fn to_style(&self, fallback: &ColorPair) -> Style {
        Style::default()
            .fg(parse_color(&self.fg, &fallback.fg))
            .bg(parse_color(&self.bg, &fallback.bg))
    }
}

fn parse_color(name: &str, fallback: &str) -> Color {
    Color::from_str(name).unwrap_or_else(|_| {
        tracing::warn!("unknown color {name:?}, using {fallback:?}");
        Color::from_str(fallback).unwrap_or(Color::Reset)
    })
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StyleConfig {
    /// Unselected entry rows.
    pub normal: ColorPair,
    /// The highlighted entry row.
    pub selected: ColorPair,
    /// Column header, player bar and status bar.
    pub chrome: ColorPair,
}
impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            normal: ColorPair::new("cyan", "black"),
            selected: ColorPair::new("black", "cyan"),
            chrome: ColorPair::new("black", "white"),
        }
    }
}
impl StyleConfig {
    pub fn normal_style(&self) -> Style {
        self.normal.to_style(&Self::default().normal)
    }

    pub fn selected_style(&self) -> Style {
        self.selected.to_style(&Self::default().selected)
    }

    pub fn chrome_style(&self) -> Style {
        self.chrome.to_style(&Self::default().chrome)
    }
}
