use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use ratatui::style::Color;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use termodoro_core::{Phase, TimerConfig};

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub timer: TimerConfig,
    pub theme: Theme,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Theme {
    #[serde(deserialize_with = "hex_to_color")]
    pub background: Color,
    #[serde(deserialize_with = "hex_to_color")]
    pub foreground: Color,
    #[serde(deserialize_with = "hex_to_color")]
    pub black: Color,
    #[serde(deserialize_with = "hex_to_color")]
    pub gray: Color,
    /// Work phase accent.
    #[serde(deserialize_with = "hex_to_color")]
    pub work: Color,
    /// Short break accent.
    #[serde(deserialize_with = "hex_to_color")]
    pub short_break: Color,
    /// Long break accent.
    #[serde(deserialize_with = "hex_to_color")]
    pub long_break: Color,
    #[serde(deserialize_with = "hex_to_color")]
    pub paused: Color,
    #[serde(deserialize_with = "hex_to_color")]
    pub confirm: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::Rgb(9, 14, 19),
            foreground: Color::Rgb(197, 201, 199),
            black: Color::Rgb(13, 12, 12),
            gray: Color::Rgb(164, 167, 164),
            work: Color::Rgb(138, 154, 123),
            short_break: Color::Rgb(228, 104, 118),
            long_break: Color::Rgb(127, 180, 202),
            paused: Color::Rgb(196, 178, 138),
            confirm: Color::Rgb(162, 146, 163),
        }
    }
}

impl Theme {
    pub fn phase_color(&self, phase: Phase) -> Color {
        match phase {
            Phase::Work => self.work,
            Phase::ShortBreak => self.short_break,
            Phase::LongBreak => self.long_break,
        }
    }
}

fn hex_to_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: String = serde::Deserialize::deserialize(deserializer)?;
    if !s.starts_with('#') || s.len() != 7 {
        return Err(serde::de::Error::custom("invalid hex color format"));
    }
    let r = u8::from_str_radix(&s[1..3], 16).map_err(serde::de::Error::custom)?;
    let g = u8::from_str_radix(&s[3..5], 16).map_err(serde::de::Error::custom)?;
    let b = u8::from_str_radix(&s[5..7], 16).map_err(serde::de::Error::custom)?;
    Ok(Color::Rgb(r, g, b))
}

pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "termodoro", "Termodoro")
}

pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join("termodoro.toml"))
}

/// Loads the config file.
///
/// An explicit `path` must exist. Without one the platform config directory
/// is tried, and a missing file there means defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(path) => {
            if !path.exists() {
                bail!("Config file {:?} does not exist", path);
            }
            path.to_path_buf()
        }
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(Config::default()),
        },
    };

    let config_str = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file at {:?}", path))?;
    parse_config(&config_str).with_context(|| format!("Failed to parse config file at {:?}", path))
}

fn parse_config(source: &str) -> Result<Config> {
    let config: Config = toml::from_str(source)?;
    config.timer.validate()?;
    Ok(config)
}
