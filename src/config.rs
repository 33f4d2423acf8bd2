use std::collections::HashMap;
use std::env;
use std::fs;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_SCHEDULE_URL: &str =
    "https://www.sportovistezamberk.cz/web/cs/sportoviste/gaf-arena-2-7.html?tab_id=web";

#[derive(Debug, Default, Clone)]
pub struct AppConfig {
    values: HashMap<String, String>,
}

impl AppConfig {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut values = HashMap::new();
        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
            let Some((key, value)) = trimmed.split_once('=') else {
                return Err(ConfigError::Line {
                    line: idx + 1,
                    content: line.to_string(),
                });
            };
            let key = key.trim();
            let mut value = value.trim().to_string();
            if value.len() >= 2
                && ((value.starts_with('"') && value.ends_with('"'))
                    || (value.starts_with('\'') && value.ends_with('\'')))
            {
                value = value[1..value.len() - 1].to_string();
            }
            values.insert(key.to_string(), value);
        }
        Ok(Self { values })
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    /// File value first, then the process environment.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).or_else(|| env::var(key).ok())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Api,
    Cli,
}

/// How the schedule page is fetched and how many weeks are walked.
#[derive(Debug, Clone)]
pub struct ScrapeWindow {
    pub schedule_url: String,
    pub weeks: usize,
    pub page_load_timeout: Duration,
    pub ready_timeout: Duration,
    pub settle_delay: Duration,
    pub ready_selector: String,
    pub week_param: String,
}

impl Default for ScrapeWindow {
    fn default() -> Self {
        Self {
            schedule_url: DEFAULT_SCHEDULE_URL.to_string(),
            weeks: 4,
            page_load_timeout: Duration::from_secs(30),
            ready_timeout: Duration::from_secs(15),
            settle_delay: Duration::from_millis(2000),
            ready_selector: "#publish".to_string(),
            week_param: "date".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub run_mode: RunMode,
    pub port: u16,
    pub window: ScrapeWindow,
}

impl Settings {
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let run_mode = match config.lookup("RUN_MODE").as_deref() {
            None | Some("api") => RunMode::Api,
            Some("cli") => RunMode::Cli,
            Some(other) => {
                return Err(ConfigError::Value {
                    key: "RUN_MODE".to_string(),
                    value: other.to_string(),
                });
            }
        };

        let defaults = ScrapeWindow::default();
        let weeks: usize = parse_or(config, "WEEKS", defaults.weeks)?;
        if weeks == 0 {
            return Err(ConfigError::Value {
                key: "WEEKS".to_string(),
                value: "0".to_string(),
            });
        }

        let window = ScrapeWindow {
            schedule_url: config.lookup("SCHEDULE_URL").unwrap_or(defaults.schedule_url),
            weeks,
            page_load_timeout: Duration::from_secs(parse_or(
                config,
                "PAGE_LOAD_TIMEOUT_SECS",
                defaults.page_load_timeout.as_secs(),
            )?),
            ready_timeout: Duration::from_secs(parse_or(
                config,
                "READY_TIMEOUT_SECS",
                defaults.ready_timeout.as_secs(),
            )?),
            settle_delay: Duration::from_millis(parse_or(
                config,
                "SETTLE_MILLIS",
                defaults.settle_delay.as_millis() as u64,
            )?),
            ready_selector: config.lookup("READY_SELECTOR").unwrap_or(defaults.ready_selector),
            week_param: config.lookup("WEEK_PARAM").unwrap_or(defaults.week_param),
        };

        Ok(Self {
            run_mode,
            port: parse_or(config, "PORT", 3000)?,
            window,
        })
    }
}

fn parse_or<T: FromStr>(config: &AppConfig, key: &str, default: T) -> Result<T, ConfigError> {
    match config.lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Value {
            key: key.to_string(),
            value: raw,
        }),
    }
}
