use anyhow::{anyhow, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::quiz::{Aspect, QuestionCount};

const MIN_FPS: u32 = 1;
const MAX_FPS: u32 = 30;
const MAX_RECORDING_DURATION_SECS: u32 = 600;
const MAX_MODEL_NAME_LEN: usize = 64;
const MAX_SANITIZED_TOPIC_LEN: usize = 120;
const MIN_MUSIC_VOLUME: f32 = 0.0;
const MAX_MUSIC_VOLUME: f32 = 1.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub output: OutputConfig,
    pub recording: RecordingConfig,
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub playback: PlaybackConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    pub directory: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecordingConfig {
    pub fps: u32,
    pub max_duration_secs: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    pub model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlaybackConfig {
    pub music_enabled: bool,
    pub music_volume: f32,
    pub default_question_count: QuestionCount,
    pub default_aspect: Aspect,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            music_enabled: true,
            music_volume: 0.3,
            default_question_count: QuestionCount::Ten,
            default_aspect: Aspect::Landscape,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UiConfig {
    pub theme: Theme,
    pub show_notifications: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            show_notifications: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.recording.fps < MIN_FPS || self.recording.fps > MAX_FPS {
            return Err(anyhow!("fps must be between {} and {}", MIN_FPS, MAX_FPS));
        }
        if self.recording.max_duration_secs == 0
            || self.recording.max_duration_secs > MAX_RECORDING_DURATION_SECS
        {
            return Err(anyhow!(
                "max_duration_secs must be between 1 and {}",
                MAX_RECORDING_DURATION_SECS
            ));
        }
        if self.generator.model.is_empty() || self.generator.model.len() > MAX_MODEL_NAME_LEN {
            return Err(anyhow!("invalid model name length"));
        }
        if !self
            .generator
            .model
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
        {
            return Err(anyhow!("model name contains invalid characters"));
        }
        if !self.playback.music_volume.is_finite()
            || self.playback.music_volume < MIN_MUSIC_VOLUME
            || self.playback.music_volume > MAX_MUSIC_VOLUME
        {
            return Err(anyhow!(
                "music_volume must be between {} and {}",
                MIN_MUSIC_VOLUME,
                MAX_MUSIC_VOLUME
            ));
        }
        Ok(())
    }

    fn sanitize(&mut self) {
        self.recording.fps = self.recording.fps.clamp(MIN_FPS, MAX_FPS);
        self.recording.max_duration_secs = self
            .recording
            .max_duration_secs
            .clamp(1, MAX_RECORDING_DURATION_SECS);
        self.playback.music_volume = if self.playback.music_volume.is_finite() {
            self.playback
                .music_volume
                .clamp(MIN_MUSIC_VOLUME, MAX_MUSIC_VOLUME)
        } else {
            0.3
        };
        if self.generator.model.is_empty()
            || self.generator.model.len() > MAX_MODEL_NAME_LEN
            || !self
                .generator
                .model
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
        {
            self.generator.model = default_model();
        }
    }
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

impl Default for Config {
    fn default() -> Self {
        let videos_dir = directories::UserDirs::new()
            .and_then(|d| d.video_dir().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| {
                directories::BaseDirs::new()
                    .map(|b| b.home_dir().to_path_buf())
                    .unwrap_or_else(|| PathBuf::from("."))
            });

        Self {
            output: OutputConfig {
                directory: videos_dir.join("quizreel"),
            },
            recording: RecordingConfig {
                fps: 10,
                max_duration_secs: 300,
            },
            generator: GeneratorConfig {
                model: default_model(),
            },
            playback: PlaybackConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "quizreel", "quizreel").map(|p| p.config_dir().to_path_buf())
    }

    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let mut config: Config = toml::from_str(&content)?;
                config.sanitize();
                config.validate()?;
                return Ok(config);
            }
        }
        Ok(Config::default())
    }

    pub fn save(&self) -> Result<()> {
        self.validate()?;
        if let Some(dir) = Self::config_dir() {
            fs::create_dir_all(&dir)?;
            if let Some(path) = Self::config_path() {
                let content = toml::to_string_pretty(self)?;
                fs::write(&path, content)?;
            }
        }
        Ok(())
    }

    pub fn ensure_output_dir(&self) -> Result<()> {
        let dir = &self.output.directory;
        if dir.as_os_str().is_empty() {
            return Err(anyhow!("Output directory path is empty"));
        }
        if dir.to_string_lossy().contains("..") {
            return Err(anyhow!("Output directory contains path traversal"));
        }
        fs::create_dir_all(dir)?;
        Ok(())
    }

    /// Full path for a new recording of the given topic.
    pub fn recording_path(&self, topic: &str) -> PathBuf {
        self.output.directory.join(recording_filename(topic))
    }
}

/// Lower-cases the topic and collapses each run of whitespace to a single
/// underscore; anything hostile to filesystems is stripped.
pub fn sanitize_topic(topic: &str) -> String {
    let collapsed = topic
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase();
    let sanitized: String = collapsed
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
        .take(MAX_SANITIZED_TOPIC_LEN)
        .collect();
    if sanitized.is_empty() {
        format!("quiz_{}", chrono::Local::now().format("%Y%m%d_%H%M%S"))
    } else {
        sanitized
    }
}

pub fn recording_filename(topic: &str) -> String {
    format!("{}_quiz.gif", sanitize_topic(topic))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_becomes_lowercase_with_underscores() {
        assert_eq!(recording_filename("World War II"), "world_war_ii_quiz.gif");
    }

    #[test]
    fn whitespace_runs_collapse_to_one_underscore() {
        assert_eq!(sanitize_topic("80s   Pop\t Music"), "80s_pop_music");
    }

    #[test]
    fn hostile_characters_are_stripped() {
        assert_eq!(sanitize_topic("a/b\\c: d"), "abc_d");
    }

    #[test]
    fn blank_topic_falls_back_to_timestamp() {
        let name = sanitize_topic("  \t ");
        assert!(name.starts_with("quiz_"));
    }

    #[test]
    fn long_topics_are_truncated() {
        let topic = "x".repeat(500);
        assert!(sanitize_topic(&topic).len() <= 120);
    }

    #[test]
    fn default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn sanitize_clamps_out_of_range_values() {
        let mut config = Config::default();
        config.recording.fps = 500;
        config.playback.music_volume = 9.0;
        config.generator.model = "bad model!".to_string();
        config.sanitize();
        assert!(config.validate().is_ok());
        assert_eq!(config.recording.fps, MAX_FPS);
        assert_eq!(config.playback.music_volume, MAX_MUSIC_VOLUME);
        assert_eq!(config.generator.model, default_model());
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert!(parsed.validate().is_ok());
        assert_eq!(parsed.recording.fps, config.recording.fps);
    }
}
