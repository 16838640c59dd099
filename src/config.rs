use crate::error::{config_error, ScheduleResult};
use crate::schedule::time;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;

/// Default timezone label attached to schedules (informational; times are
/// wall-clock in the owning entity's local time)
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// Path of the optional TOML overlay for schedule defaults
const CONFIG_FILE: &str = "config/schedule.toml";

/// Default open/close and break bounds applied by the editor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleDefaults {
    /// Opening time assigned when a day is toggled on
    pub day_start: String,
    /// Closing time assigned when a day is toggled on
    pub day_end: String,
    /// Start assigned to a newly added break
    pub break_start: String,
    /// End assigned to a newly added break
    pub break_end: String,
}

impl Default for ScheduleDefaults {
    fn default() -> Self {
        Self {
            day_start: time::FALLBACK_DAY_START.to_string(),
            day_end: time::FALLBACK_DAY_END.to_string(),
            break_start: time::FALLBACK_BREAK_START.to_string(),
            break_end: time::FALLBACK_BREAK_END.to_string(),
        }
    }
}

/// Overlay read from the optional config file; every field may be omitted
#[derive(Debug, Clone, Default, Deserialize)]
struct FileConfig {
    day_start: Option<String>,
    day_end: Option<String>,
    break_start: Option<String>,
    break_end: Option<String>,
    timezone: Option<String>,
}

/// Configuration for the schedule component
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Editor defaults, also used as normalization fallbacks
    pub defaults: ScheduleDefaults,
    /// Timezone label for the owning entity
    pub timezone: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            defaults: ScheduleDefaults::default(),
            timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from the optional config file and environment
    ///
    /// Precedence: built-in defaults, then the TOML overlay, then
    /// environment variables.
    pub fn load() -> ScheduleResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let mut config = Config::default();

        // Overlay from file if it exists
        if let Ok(content) = fs::read_to_string(CONFIG_FILE) {
            let file_config: FileConfig = toml::from_str(&content)?;
            config.apply_file(file_config);
        }

        // Environment variables win over the file
        if let Ok(value) = env::var("SCHEDULE_DAY_START") {
            config.defaults.day_start = value;
        }
        if let Ok(value) = env::var("SCHEDULE_DAY_END") {
            config.defaults.day_end = value;
        }
        if let Ok(value) = env::var("SCHEDULE_BREAK_START") {
            config.defaults.break_start = value;
        }
        if let Ok(value) = env::var("SCHEDULE_BREAK_END") {
            config.defaults.break_end = value;
        }
        if let Ok(value) = env::var("TIMEZONE") {
            config.timezone = value;
        }

        config.validate()?;

        Ok(config)
    }

    fn apply_file(&mut self, file_config: FileConfig) {
        if let Some(value) = file_config.day_start {
            self.defaults.day_start = value;
        }
        if let Some(value) = file_config.day_end {
            self.defaults.day_end = value;
        }
        if let Some(value) = file_config.break_start {
            self.defaults.break_start = value;
        }
        if let Some(value) = file_config.break_end {
            self.defaults.break_end = value;
        }
        if let Some(value) = file_config.timezone {
            self.timezone = value;
        }
    }

    /// Reject configured defaults that are not well-formed HH:MM times
    pub fn validate(&self) -> ScheduleResult<()> {
        for (name, value) in [
            ("day_start", &self.defaults.day_start),
            ("day_end", &self.defaults.day_end),
            ("break_start", &self.defaults.break_start),
            ("break_end", &self.defaults.break_end),
        ] {
            if time::parse_time(value).is_none() {
                return Err(config_error(&format!(
                    "Invalid {} time: {:?} is not HH:MM",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.defaults.day_start, "09:00");
        assert_eq!(config.defaults.day_end, "18:00");
        assert_eq!(config.defaults.break_start, "12:00");
        assert_eq!(config.defaults.break_end, "13:00");
        assert_eq!(config.timezone, "UTC");
    }

    #[test]
    fn test_validate_rejects_malformed_default() {
        let mut config = Config::default();
        config.defaults.day_end = "26:00".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_file_overlay() {
        let mut config = Config::default();
        let file_config: FileConfig =
            toml::from_str("day_start = \"08:00\"\ntimezone = \"Europe/Helsinki\"").unwrap();
        config.apply_file(file_config);
        assert_eq!(config.defaults.day_start, "08:00");
        assert_eq!(config.defaults.day_end, "18:00");
        assert_eq!(config.timezone, "Europe/Helsinki");
    }
}
