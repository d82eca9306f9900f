// Configuration loading and management.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const PROD: &str = "prod";
#[allow(dead_code)]
pub const DEV: &str = "dev";
#[allow(dead_code)]
pub const DEBUG: &str = "debug";
#[allow(dead_code)]
pub const TEST: &str = "test";

pub const DEFAULT_MIN_TTL: Duration = Duration::ZERO;
pub const DEFAULT_MAX_TTL: Duration = Duration::from_secs(24 * 60 * 60);
pub const DEFAULT_TTL: Duration = Duration::from_secs(10);
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_millis(100);
pub const DEFAULT_STATS_INTERVAL: Duration = Duration::from_secs(5);
pub const DEFAULT_TAG: &str = "reaper:auto";
pub const DEFAULT_TAGGED_TTL: Duration = Duration::from_secs(1);
pub const DEFAULT_TAGGED_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    #[serde(rename = "reaper")]
    pub reaper: SettingsBox,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SettingsBox {
    pub env: String,
    pub logs: Option<Logs>,
    #[serde(default)]
    pub ttl: Ttl,
    #[serde(default)]
    pub sweep: Sweep,
    #[serde(default)]
    pub tagged: Tagged,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Logs {
    pub level: Option<String>,
}

/// Bounds every registration TTL must lie within, plus the TTL used when a
/// caller does not pass one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Ttl {
    #[serde(with = "humantime_serde", default = "default_min_ttl")]
    pub min: Duration,
    #[serde(with = "humantime_serde", default = "default_max_ttl")]
    pub max: Duration,
    #[serde(with = "humantime_serde", default = "default_ttl")]
    pub default: Duration,
}

impl Default for Ttl {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_TTL,
            max: DEFAULT_MAX_TTL,
            default: DEFAULT_TTL,
        }
    }
}

impl Ttl {
    /// Reports whether `ttl` lies within `[min, max]`.
    pub fn contains(&self, ttl: Duration) -> bool {
        ttl >= self.min && ttl <= self.max
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Sweep {
    /// Tick period of the built-in heartbeat.
    #[serde(with = "humantime_serde", default = "default_sweep_interval")]
    pub interval: Duration,
    #[serde(rename = "stats_interval", with = "humantime_serde", default = "default_stats_interval")]
    pub stats_interval: Duration,
}

impl Default for Sweep {
    fn default() -> Self {
        Self {
            interval: DEFAULT_SWEEP_INTERVAL,
            stats_interval: DEFAULT_STATS_INTERVAL,
        }
    }
}

/// Background enrollment of tag-classified resources.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Tagged {
    pub enabled: bool,
    #[serde(default = "default_tag")]
    pub tag: String,
    #[serde(with = "humantime_serde", default = "default_tagged_ttl")]
    pub ttl: Duration,
    #[serde(with = "humantime_serde", default = "default_tagged_interval")]
    pub interval: Duration,
}

impl Default for Tagged {
    fn default() -> Self {
        Self {
            enabled: false,
            tag: DEFAULT_TAG.to_string(),
            ttl: DEFAULT_TAGGED_TTL,
            interval: DEFAULT_TAGGED_INTERVAL,
        }
    }
}

fn default_min_ttl() -> Duration {
    DEFAULT_MIN_TTL
}

fn default_max_ttl() -> Duration {
    DEFAULT_MAX_TTL
}

fn default_ttl() -> Duration {
    DEFAULT_TTL
}

fn default_sweep_interval() -> Duration {
    DEFAULT_SWEEP_INTERVAL
}

fn default_stats_interval() -> Duration {
    DEFAULT_STATS_INTERVAL
}

fn default_tag() -> String {
    DEFAULT_TAG.to_string()
}

fn default_tagged_ttl() -> Duration {
    DEFAULT_TAGGED_TTL
}

fn default_tagged_interval() -> Duration {
    DEFAULT_TAGGED_INTERVAL
}

// Config trait
pub trait ConfigTrait {
    fn logs(&self) -> Option<&Logs>;
    fn is_prod(&self) -> bool;
    #[allow(dead_code)]
    fn is_debug(&self) -> bool;
    #[allow(dead_code)]
    fn is_dev(&self) -> bool;
    #[allow(dead_code)]
    fn is_test(&self) -> bool;
    fn ttl(&self) -> &Ttl;
    fn sweep(&self) -> &Sweep;
    fn tagged(&self) -> &Tagged;
}

// Config type alias for convenience
pub type Config = Settings;

impl ConfigTrait for Config {
    fn logs(&self) -> Option<&Logs> {
        self.reaper.logs.as_ref()
    }

    fn is_prod(&self) -> bool {
        self.reaper.env == PROD
    }

    fn is_debug(&self) -> bool {
        self.reaper.env == DEBUG
    }

    fn is_dev(&self) -> bool {
        self.reaper.env == DEV
    }

    fn is_test(&self) -> bool {
        self.reaper.env == TEST
    }

    fn ttl(&self) -> &Ttl {
        &self.reaper.ttl
    }

    fn sweep(&self) -> &Sweep {
        &self.reaper.sweep
    }

    fn tagged(&self) -> &Tagged {
        &self.reaper.tagged
    }
}

impl Config {
    /// Loads configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // Resolve absolute path
        let abs_path = path
            .canonicalize()
            .with_context(|| format!("failed to resolve absolute config filepath: {:?}", path))?;

        // Read file
        let data = std::fs::read_to_string(&abs_path)
            .with_context(|| format!("read config yaml file {:?}", abs_path))?;

        Self::parse(&data).with_context(|| format!("unmarshal yaml from {:?}", abs_path))
    }

    /// Parses and validates configuration from YAML text.
    pub fn parse(data: &str) -> Result<Self> {
        let cfg: Settings = serde_yaml::from_str(data)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Checks cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        let ttl = self.ttl();
        if ttl.min > ttl.max {
            anyhow::bail!("ttl.min {:?} exceeds ttl.max {:?}", ttl.min, ttl.max);
        }
        if !ttl.contains(ttl.default) {
            anyhow::bail!(
                "ttl.default {:?} is out of bounds [{:?}, {:?}]",
                ttl.default,
                ttl.min,
                ttl.max
            );
        }

        if self.sweep().interval.is_zero() {
            anyhow::bail!("sweep.interval must be positive");
        }
        if self.sweep().stats_interval.is_zero() {
            anyhow::bail!("sweep.stats_interval must be positive");
        }

        let tagged = self.tagged();
        if tagged.tag.trim().is_empty() {
            anyhow::bail!("tagged.tag must not be empty");
        }
        if tagged.interval.is_zero() {
            anyhow::bail!("tagged.interval must be positive");
        }
        if !ttl.contains(tagged.ttl) {
            anyhow::bail!(
                "tagged.ttl {:?} is out of bounds [{:?}, {:?}]",
                tagged.ttl,
                ttl.min,
                ttl.max
            );
        }

        Ok(())
    }
}

mod test_config;
#[allow(dead_code)]
pub use test_config::new_test_config;
