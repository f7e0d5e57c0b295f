use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::time::Duration;

pub const DEFAULT_CACHE_TTL_SECS: u64 = 0;

// Engine configuration sourced from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HallMonitorConfig {
    /// Zero disables the specialization cache.
    pub specialization_cache_ttl: Duration,
}

impl Default for HallMonitorConfig {
    fn default() -> Self {
        Self {
            specialization_cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
        }
    }
}

#[derive(Debug, Deserialize)]
struct HallMonitorConfigOverride {
    specialization_cache_ttl_secs: Option<u64>,
}

impl HallMonitorConfig {
    pub fn from_env() -> Result<Self> {
        let ttl_secs = match std::env::var("HALL_MONITOR_CACHE_TTL_SECS") {
            Ok(value) => value
                .trim()
                .parse::<u64>()
                .with_context(|| "parse HALL_MONITOR_CACHE_TTL_SECS")?,
            Err(_) => DEFAULT_CACHE_TTL_SECS,
        };
        Ok(Self {
            specialization_cache_ttl: Duration::from_secs(ttl_secs),
        })
    }

    pub fn from_env_or_yaml() -> Result<Self> {
        let mut config = Self::from_env()?;
        if let Ok(path) = std::env::var("HALL_MONITOR_CONFIG") {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("read HALL_MONITOR_CONFIG: {path}"))?;
            let override_cfg: HallMonitorConfigOverride = serde_yaml::from_str(&contents)
                .with_context(|| "parse hall monitor config yaml")?;
            if let Some(value) = override_cfg.specialization_cache_ttl_secs {
                config.specialization_cache_ttl = Duration::from_secs(value);
            }
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    struct EnvGuard {
        key: &'static str,
        prev: Option<String>,
    }

    impl EnvGuard {
        fn set(key: &'static str, value: &str) -> Self {
            let prev = std::env::var(key).ok();
            unsafe {
                std::env::set_var(key, value);
            }
            Self { key, prev }
        }

        fn unset(key: &'static str) -> Self {
            let prev = std::env::var(key).ok();
            unsafe {
                std::env::remove_var(key);
            }
            Self { key, prev }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.prev {
                Some(value) => unsafe {
                    std::env::set_var(self.key, value);
                },
                None => unsafe {
                    std::env::remove_var(self.key);
                },
            }
        }
    }

    #[test]
    #[serial]
    fn defaults_disable_cache() {
        let _ttl = EnvGuard::unset("HALL_MONITOR_CACHE_TTL_SECS");
        let _cfg = EnvGuard::unset("HALL_MONITOR_CONFIG");
        let config = HallMonitorConfig::from_env_or_yaml().expect("config");
        assert_eq!(config, HallMonitorConfig::default());
        assert!(config.specialization_cache_ttl.is_zero());
    }

    #[test]
    #[serial]
    fn env_sets_ttl_and_rejects_garbage() {
        let _ttl = EnvGuard::set("HALL_MONITOR_CACHE_TTL_SECS", "30");
        let config = HallMonitorConfig::from_env().expect("config");
        assert_eq!(config.specialization_cache_ttl, Duration::from_secs(30));

        let _bad = EnvGuard::set("HALL_MONITOR_CACHE_TTL_SECS", "soon");
        assert!(HallMonitorConfig::from_env().is_err());
    }

    #[test]
    #[serial]
    fn yaml_overrides_env() {
        let path = std::env::temp_dir().join(format!(
            "hall-monitor-config-{}.yaml",
            std::process::id()
        ));
        fs::write(&path, "specialization_cache_ttl_secs: 5\n").expect("write yaml");
        let _ttl = EnvGuard::set("HALL_MONITOR_CACHE_TTL_SECS", "30");
        let _cfg = EnvGuard::set("HALL_MONITOR_CONFIG", path.to_str().expect("utf8 path"));

        let config = HallMonitorConfig::from_env_or_yaml().expect("config");
        assert_eq!(config.specialization_cache_ttl, Duration::from_secs(5));
        let _ = fs::remove_file(&path);
    }
}
