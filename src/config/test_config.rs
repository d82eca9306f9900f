use super::{Config, Logs, SettingsBox, Sweep, Tagged, Ttl};
use std::time::Duration;

/// Creates a new test configuration.
pub fn new_test_config() -> Config {
    Config {
        reaper: SettingsBox {
            env: super::TEST.to_string(),
            logs: Some(Logs {
                level: Some("debug".to_string()),
            }),
            ttl: Ttl {
                min: Duration::ZERO,
                max: Duration::from_secs(60 * 60),
                default: Duration::from_secs(10),
            },
            sweep: Sweep {
                interval: Duration::from_millis(10),
                stats_interval: Duration::from_secs(60 * 60),
            },
            tagged: Tagged {
                enabled: false,
                tag: "reaper:test".to_string(),
                ttl: Duration::from_secs(1),
                interval: Duration::from_millis(20),
            },
        },
    }
}
