// Read once on startup, never written back.
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "haptictty.json";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tick_ms: u64, // ui redraw/poll interval
    pub param_step: f32, // slider nudge for the 0..1 params
    pub duration_step: f32, // slider nudge for duration, in seconds

    // The audio backend maps sharpness onto this carrier range.
    pub carrier_min_hz: f32,
    pub carrier_max_hz: f32,
    pub output_gain: f32,

    // false hides the semantic effects and offers the curve presets instead
    pub semantic_feedback: bool,

    pub log_file: PathBuf,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_ms: 16, // ~60fps
            param_step: 0.05,
            duration_step: 0.1,
            carrier_min_hz: 40.0,
            carrier_max_hz: 250.0,
            output_gain: 0.8,
            semantic_feedback: true,
            log_file: PathBuf::from("haptictty.log"),
            log_level: String::from("info"),
        }
    }
}

impl Config {
    // <path> if given, else ./haptictty.json
    pub fn resolve_path(arg: Option<String>) -> PathBuf {
        arg.map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// A missing file means defaults; a file that exists but doesn't parse is
    /// an error so typos don't get silently ignored.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let data = match std::fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(e).with_context(|| format!("reading config {}", path.display()));
            }
        };
        let config: Config = serde_json::from_str(&data)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validated()
    }

    fn validated(mut self) -> anyhow::Result<Self> {
        if !(self.carrier_min_hz > 0.0 && self.carrier_max_hz >= self.carrier_min_hz) {
            anyhow::bail!(
                "carrier range {}..{} Hz is not usable",
                self.carrier_min_hz,
                self.carrier_max_hz
            );
        }
        self.tick_ms = self.tick_ms.max(1);
        self.output_gain = self.output_gain.clamp(0.0, 1.0);
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("haptictty-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("haptictty-definitely-missing.json");
        assert_eq!(Config::load(&path).unwrap(), Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let path = temp_file("partial.json", r#"{ "semantic_feedback": false, "tick_ms": 33 }"#);
        let config = Config::load(&path).unwrap();
        assert!(!config.semantic_feedback);
        assert_eq!(config.tick_ms, 33);
        assert_eq!(config.param_step, 0.05);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path = temp_file("broken.json", "{ not json");
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn inverted_carrier_range_is_rejected() {
        let path = temp_file(
            "carrier.json",
            r#"{ "carrier_min_hz": 300.0, "carrier_max_hz": 100.0 }"#,
        );
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn gain_is_clamped() {
        let path = temp_file("gain.json", r#"{ "output_gain": 4.0, "tick_ms": 0 }"#);
        let config = Config::load(&path).unwrap();
        assert_eq!(config.output_gain, 1.0);
        assert_eq!(config.tick_ms, 1);
    }

    #[test]
    fn resolve_path_defaults_to_cwd_file() {
        assert_eq!(Config::resolve_path(None), PathBuf::from(DEFAULT_CONFIG_FILE));
        assert_eq!(
            Config::resolve_path(Some("x.json".into())),
            PathBuf::from("x.json")
        );
    }
}
