use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use swingtrace_engine::TrajectoryConfig;

/// Resolve the data directory path based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. SWINGTRACE_PATH environment variable (with tilde expansion)
/// 3. XDG data directory (recommended default)
/// 4. ~/.swingtrace (fallback for systems without XDG)
pub fn resolve_data_dir(explicit_path: Option<&str>) -> Result<PathBuf> {
    // Priority 1: Explicit path
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    // Priority 2: SWINGTRACE_PATH environment variable
    if let Ok(env_path) = std::env::var("SWINGTRACE_PATH") {
        return Ok(expand_tilde(&env_path));
    }

    // Priority 3: XDG data directory
    if let Some(data_dir) = dirs::data_dir() {
        return Ok(data_dir.join("swingtrace"));
    }

    // Priority 4: ~/.swingtrace
    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".swingtrace"));
    }

    Err(Error::Config(
        "Could not determine data directory: no HOME directory or XDG data directory found"
            .to_string(),
    ))
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

pub const CONFIG_FILE: &str = "config.toml";
pub const MIN_SAMPLE_RATE_HZ: f64 = 1.0;
pub const MAX_SAMPLE_RATE_HZ: f64 = 1000.0;
pub const DATABASE_FILE: &str = "swingtrace.db";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Nominal sensor delivery rate.
    pub sample_rate_hz: f64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: 60.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub capture: CaptureConfig,
    #[serde(default)]
    pub trajectory: TrajectoryConfig,
}

impl Config {
    /// Load `config.toml` from a data directory. A missing file yields defaults.
    pub fn load(data_dir: &Path) -> Result<Self> {
        Self::load_from(&data_dir.join(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let rate = self.capture.sample_rate_hz;
        if !(MIN_SAMPLE_RATE_HZ..=MAX_SAMPLE_RATE_HZ).contains(&rate) {
            return Err(Error::Config(format!(
                "capture.sample_rate_hz must be between {} and {}, got {}",
                MIN_SAMPLE_RATE_HZ, MAX_SAMPLE_RATE_HZ, rate
            )));
        }

        let t = &self.trajectory;
        if !(t.damping > 0.0 && t.damping <= 1.0) {
            return Err(Error::Config(format!(
                "trajectory.damping must be in (0, 1], got {}",
                t.damping
            )));
        }
        if t.noise_floor.is_nan() || t.noise_floor < 0.0 {
            return Err(Error::Config(format!(
                "trajectory.noise_floor must not be negative, got {}",
                t.noise_floor
            )));
        }
        if t.spring_constant.is_nan() || t.spring_constant < 0.0 {
            return Err(Error::Config(format!(
                "trajectory.spring_constant must not be negative, got {}",
                t.spring_constant
            )));
        }
        if !(t.scale.is_finite() && t.scale > 0.0) {
            return Err(Error::Config(format!(
                "trajectory.scale must be positive, got {}",
                t.scale
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swingtrace_engine::Rgb;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.capture.sample_rate_hz, 60.0);
        assert_eq!(config.trajectory.spring_constant, 2.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_save_and_load() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("nested").join(CONFIG_FILE);

        let mut config = Config::default();
        config.capture.sample_rate_hz = 100.0;
        config.trajectory.colors.high = Rgb::new(0, 255, 0);

        config.save_to(&config_path)?;
        assert!(config_path.exists());

        let loaded = Config::load_from(&config_path)?;
        assert_eq!(loaded, config);

        Ok(())
    }

    #[test]
    fn test_load_nonexistent_returns_default() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config = Config::load(temp_dir.path())?;
        assert_eq!(config, Config::default());
        Ok(())
    }

    #[test]
    fn test_partial_file_fills_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[trajectory]\ndamping = 0.9\n")?;

        let config = Config::load_from(&path)?;
        assert_eq!(config.trajectory.damping, 0.9);
        assert_eq!(config.trajectory.scale, 10.0);
        assert_eq!(config.capture.sample_rate_hz, 60.0);
        Ok(())
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.trajectory.damping = 1.5;
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        for rate in [0.0, 1e-30, f64::NAN, f64::INFINITY, 5000.0] {
            let mut config = Config::default();
            config.capture.sample_rate_hz = rate;
            assert!(matches!(config.validate(), Err(Error::Config(_))), "rate {}", rate);
        }

        let mut config = Config::default();
        config.trajectory.noise_floor = -0.1;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_expand_tilde() {
        assert_eq!(expand_tilde("/abs/path"), PathBuf::from("/abs/path"));
        if let Some(home) = std::env::var_os("HOME") {
            assert_eq!(expand_tilde("~/data"), PathBuf::from(home).join("data"));
        }
    }

    #[test]
    fn test_explicit_data_dir_wins() -> Result<()> {
        let resolved = resolve_data_dir(Some("/tmp/swing-explicit"))?;
        assert_eq!(resolved, PathBuf::from("/tmp/swing-explicit"));
        Ok(())
    }
}
