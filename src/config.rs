//! Runtime settings, read from the environment (and `.env` via dotenv).

use chrono::{NaiveDateTime, SubsecRound};
use chrono_tz::Tz;
use std::path::PathBuf;
use std::str::FromStr;

/// Shortest prefix offered by the network form.
pub const MIN_SELECTABLE_PREFIX: u8 = 8;
/// Longest prefix offered by the network form.
pub const MAX_SELECTABLE_PREFIX: u8 = 30;
/// Report lines are cut to this many characters.
pub const REPORT_LINE_WIDTH: usize = 95;

pub const DEFAULT_LOG_FILE: &str = "logs.txt";
pub const DEFAULT_REPORT_DIR: &str = "reports";
pub const REPORT_FILE_NAME: &str = "soho_guard_report.txt";
pub const DEFAULT_REPORT_TAIL: usize = 12;

/// Clock used to timestamp traffic records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Timezone {
    #[default]
    Local,
    Named(Tz),
}

impl Timezone {
    /// Current wall-clock time in this zone, to whole seconds.
    pub fn now(&self) -> NaiveDateTime {
        let now = match self {
            Timezone::Local => chrono::Local::now().naive_local(),
            Timezone::Named(tz) => chrono::Utc::now().with_timezone(tz).naive_local(),
        };
        now.trunc_subsecs(0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub log_file: PathBuf,
    pub report_dir: PathBuf,
    pub report_tail: usize,
    pub timezone: Timezone,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            report_dir: PathBuf::from(DEFAULT_REPORT_DIR),
            report_tail: DEFAULT_REPORT_TAIL,
            timezone: Timezone::Local,
        }
    }
}

impl Config {
    /// Load from process environment variables.
    pub fn from_env() -> Config {
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` for each `SOHO_GUARD_*` key. Bad values keep the default.
    pub fn from_lookup<F>(lookup: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(path) = lookup("SOHO_GUARD_LOG_FILE").filter(|v| !v.trim().is_empty()) {
            config.log_file = PathBuf::from(path.trim());
        }
        if let Some(dir) = lookup("SOHO_GUARD_REPORT_DIR").filter(|v| !v.trim().is_empty()) {
            config.report_dir = PathBuf::from(dir.trim());
        }
        if let Some(tail) = lookup("SOHO_GUARD_REPORT_TAIL") {
            match tail.trim().parse::<usize>() {
                Ok(n) if n > 0 => config.report_tail = n,
                _ => log::warn!(
                    "Ignoring SOHO_GUARD_REPORT_TAIL={tail}, using {}",
                    DEFAULT_REPORT_TAIL
                ),
            }
        }
        if let Some(tz) = lookup("SOHO_GUARD_TZ") {
            match Tz::from_str(tz.trim()) {
                Ok(tz) => config.timezone = Timezone::Named(tz),
                Err(e) => log::warn!("Ignoring SOHO_GUARD_TZ={tz}: {e}, using local time"),
            }
        }

        log::debug!("Config loaded: {config:?}");
        config
    }

    /// Full path of the rendered report.
    pub fn report_file(&self) -> PathBuf {
        self.report_dir.join(REPORT_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config, Config::default());
        assert_eq!(config.report_tail, 12);
        assert_eq!(
            config.report_file(),
            PathBuf::from("reports").join("soho_guard_report.txt")
        );
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("SOHO_GUARD_LOG_FILE", "/tmp/traffic.txt"),
            ("SOHO_GUARD_REPORT_DIR", "out"),
            ("SOHO_GUARD_REPORT_TAIL", "5"),
            ("SOHO_GUARD_TZ", "Pacific/Auckland"),
        ]));
        assert_eq!(config.log_file, PathBuf::from("/tmp/traffic.txt"));
        assert_eq!(config.report_dir, PathBuf::from("out"));
        assert_eq!(config.report_tail, 5);
        assert_eq!(
            config.timezone,
            Timezone::Named(chrono_tz::Pacific::Auckland)
        );
    }

    #[test]
    fn test_now_has_whole_seconds() {
        use chrono::Timelike;
        assert_eq!(Timezone::Local.now().nanosecond(), 0);
        assert_eq!(
            Timezone::Named(chrono_tz::UTC).now().nanosecond(),
            0
        );
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = Config::from_lookup(lookup_from(&[
            ("SOHO_GUARD_REPORT_TAIL", "zero"),
            ("SOHO_GUARD_TZ", "Mars/Olympus"),
            ("SOHO_GUARD_LOG_FILE", "  "),
        ]));
        assert_eq!(config, Config::default());
    }
}
