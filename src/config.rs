use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming a config file when `--config` is not given.
pub const CONFIG_ENV: &str = "PLATFORMSTATS_CONFIG";

/// Picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "platformstats.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub sampling: SamplingConfig,
    pub paths: PathsConfig,
    pub devices: DevicesConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Seconds between power-monitor ticks.
    pub rate_secs: u64,
    /// Number of power-monitor ticks; also the moving-average window.
    pub duration: usize,
    /// Gap between the two `/proc/stat` passes.
    pub cpu_interval_ms: u64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            rate_secs: 1,
            duration: 1,
            cpu_interval_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub proc_root: PathBuf,
    pub sys_root: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            proc_root: PathBuf::from("/proc"),
            sys_root: PathBuf::from("/sys"),
        }
    }
}

/// hwmon `name` attributes of the board's sensors.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DevicesConfig {
    pub power_monitor: String,
    pub system_monitor: String,
}

impl Default for DevicesConfig {
    fn default() -> Self {
        Self {
            power_monitor: "ina260_u14".into(),
            system_monitor: "ams".into(),
        }
    }
}

impl AppConfig {
    /// Loads from `explicit`, else from `$PLATFORMSTATS_CONFIG`, else from
    /// `platformstats.toml` if it exists. With none of those, returns defaults.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let named = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));
        let path = match named {
            Some(p) => p,
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !fallback.exists() {
                    tracing::debug!("no config file, using defaults");
                    return Ok(Self::default());
                }
                fallback
            }
        };
        let s = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("config {}: {}", path.display(), e))?;
        tracing::debug!(path = %path.display(), "loading config");
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Applies `--rate` / `--duration` on top of the file values.
    pub fn with_overrides(
        mut self,
        rate_secs: Option<u64>,
        duration: Option<usize>,
    ) -> anyhow::Result<Self> {
        if let Some(rate) = rate_secs {
            self.sampling.rate_secs = rate;
        }
        if let Some(duration) = duration {
            self.sampling.duration = duration;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.sampling.duration > 0,
            "sampling.duration must be > 0, got {}",
            self.sampling.duration
        );
        anyhow::ensure!(
            self.sampling.cpu_interval_ms > 0,
            "sampling.cpu_interval_ms must be > 0, got {}",
            self.sampling.cpu_interval_ms
        );
        anyhow::ensure!(
            !self.paths.proc_root.as_os_str().is_empty(),
            "paths.proc_root must be non-empty"
        );
        anyhow::ensure!(
            !self.paths.sys_root.as_os_str().is_empty(),
            "paths.sys_root must be non-empty"
        );
        anyhow::ensure!(
            !self.devices.power_monitor.is_empty(),
            "devices.power_monitor must be non-empty"
        );
        anyhow::ensure!(
            !self.devices.system_monitor.is_empty(),
            "devices.system_monitor must be non-empty"
        );
        Ok(())
    }
}
