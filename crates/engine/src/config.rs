use cadence_common::Key;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Errors from loading or validating a [`LoopConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("tick rate must be a positive finite number of hertz, got {0}")]
    InvalidTickRate(f64),
    #[error("window size must be non-zero, got {width}x{height}")]
    InvalidWindowSize { width: u32, height: u32 },
}

/// Startup configuration. Read once, immutable for the life of the process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopConfig {
    /// Window title.
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Wait for vertical sync when presenting.
    pub vsync: bool,
    /// Fixed update rate in hertz.
    pub tick_rate_hz: f64,
    /// Key that closes the window when held during a fixed step.
    pub quit_key: Key,
    /// Directory holding `bg.vert` and `bg.frag`.
    pub shader_dir: PathBuf,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            title: "Game".into(),
            width: 800,
            height: 600,
            vsync: true,
            tick_rate_hz: 60.0,
            quit_key: Key::ESCAPE,
            shader_dir: PathBuf::from("shaders"),
        }
    }
}

impl LoopConfig {
    /// Load a JSON config file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tick_rate_hz.is_finite() && self.tick_rate_hz > 0.0) {
            return Err(ConfigError::InvalidTickRate(self.tick_rate_hz));
        }
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidWindowSize {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Length of one fixed step in seconds.
    pub fn fixed_step_seconds(&self) -> f64 {
        1.0 / self.tick_rate_hz
    }

    pub fn vertex_shader_path(&self) -> PathBuf {
        self.shader_dir.join("bg.vert")
    }

    pub fn fragment_shader_path(&self) -> PathBuf {
        self.shader_dir.join("bg.frag")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_window() {
        let c = LoopConfig::default();
        assert_eq!(c.title, "Game");
        assert_eq!((c.width, c.height), (800, 600));
        assert!(c.vsync);
        assert_eq!(c.quit_key, Key::ESCAPE);
        assert!((c.fixed_step_seconds() - 1.0 / 60.0).abs() < 1e-15);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn rejects_bad_tick_rate() {
        for rate in [0.0, -60.0, f64::NAN, f64::INFINITY] {
            let c = LoopConfig {
                tick_rate_hz: rate,
                ..LoopConfig::default()
            };
            assert!(matches!(c.validate(), Err(ConfigError::InvalidTickRate(_))));
        }
    }

    #[test]
    fn rejects_zero_size() {
        let c = LoopConfig {
            width: 0,
            ..LoopConfig::default()
        };
        assert!(matches!(
            c.validate(),
            Err(ConfigError::InvalidWindowSize { width: 0, height: 600 })
        ));
    }

    #[test]
    fn loads_partial_json_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cadence.json");
        std::fs::write(
            &path,
            r#"{ "title": "Demo", "tick_rate_hz": 120.0, "quit_key": "q" }"#,
        )
        .unwrap();

        let c = LoopConfig::from_json_file(&path).unwrap();
        assert_eq!(c.title, "Demo");
        assert_eq!(c.tick_rate_hz, 120.0);
        assert_eq!(c.quit_key, Key::Q);
        assert_eq!(c.width, 800);
        assert!(c.vsync);
    }

    #[test]
    fn json_file_is_validated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cadence.json");
        std::fs::write(&path, r#"{ "tick_rate_hz": 0 }"#).unwrap();
        assert!(matches!(
            LoopConfig::from_json_file(&path),
            Err(ConfigError::InvalidTickRate(_))
        ));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cadence.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            LoopConfig::from_json_file(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            LoopConfig::from_json_file("/nonexistent/cadence.json"),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn shader_paths_live_in_shader_dir() {
        let c = LoopConfig {
            shader_dir: PathBuf::from("assets/glsl"),
            ..LoopConfig::default()
        };
        assert_eq!(c.vertex_shader_path(), PathBuf::from("assets/glsl/bg.vert"));
        assert_eq!(c.fragment_shader_path(), PathBuf::from("assets/glsl/bg.frag"));
    }
}
