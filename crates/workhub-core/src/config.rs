//! Hub configuration.

use serde::{Deserialize, Serialize};

use crate::error::{HubError, HubResult};
use crate::models::ValidationError;

const DEFAULT_ACTIVITY_LOG_LIMIT: usize = 500;
const DEFAULT_ACTIVE_WINDOW_HOURS: i64 = 24;
const MIN_ACTIVITY_LOG_LIMIT: usize = 10;
const MIN_ACTIVE_WINDOW_HOURS: i64 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HubConfig {
    /// Maximum number of activity entries kept; oldest are dropped first.
    pub activity_log_limit: usize,
    /// Window used for the "active today" admin count.
    pub active_window_hours: i64,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            activity_log_limit: DEFAULT_ACTIVITY_LOG_LIMIT,
            active_window_hours: DEFAULT_ACTIVE_WINDOW_HOURS,
        }
    }
}

impl HubConfig {
    /// Validate configuration values
    pub fn validate(&self) -> HubResult<()> {
        let mut errors = Vec::new();

        if self.activity_log_limit < MIN_ACTIVITY_LOG_LIMIT {
            errors.push(ValidationError::new(
                "activity_log_limit",
                format!("must be at least {}", MIN_ACTIVITY_LOG_LIMIT),
            ));
        }

        if self.active_window_hours < MIN_ACTIVE_WINDOW_HOURS {
            errors.push(ValidationError::new(
                "active_window_hours",
                format!("must be at least {}", MIN_ACTIVE_WINDOW_HOURS),
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(HubError::Validation(errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(HubConfig::default().validate().is_ok());
    }

    #[test]
    fn test_invalid_config_reports_each_field() {
        let config = HubConfig {
            activity_log_limit: 1,
            active_window_hours: 0,
        };
        match config.validate() {
            Err(HubError::Validation(errors)) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: HubConfig = serde_json::from_str(r#"{"activity_log_limit": 50}"#).unwrap();
        assert_eq!(config.activity_log_limit, 50);
        assert_eq!(config.active_window_hours, DEFAULT_ACTIVE_WINDOW_HOURS);
    }
}
