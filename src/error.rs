//! Error types for Crosspost

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CrosspostError>;

#[derive(Error, Debug)]
pub enum CrosspostError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Publish error: {0}")]
    Publish(#[from] PublishError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid platform entry: {0}")]
    InvalidPlatform(String),
}

/// Errors from the publish path.
///
/// Eligibility failures (`AlreadyPending`, `NotEligible`, the schedule
/// variants) are raised before the sink is invoked; `Sink` carries a
/// transport failure reported by the sink itself. In every failure case
/// the draft is preserved so the user can edit and retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PublishError {
    #[error("A publish is already in flight for this draft")]
    AlreadyPending,

    #[error("Draft is not eligible for publishing: {0}")]
    NotEligible(String),

    #[error("Scheduling is enabled but no time is set")]
    ScheduleMissing,

    #[error("Scheduled time {scheduled_at} is in the past (now: {now})")]
    ScheduleInPast { scheduled_at: i64, now: i64 },

    #[error("Publish sink failed: {0}")]
    Sink(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_formatting_invalid_input() {
        let error = CrosspostError::InvalidInput("content cannot be empty".to_string());
        assert_eq!(
            format!("{}", error),
            "Invalid input: content cannot be empty"
        );
    }

    #[test]
    fn test_error_message_formatting_already_pending() {
        let error = CrosspostError::Publish(PublishError::AlreadyPending);
        assert_eq!(
            format!("{}", error),
            "Publish error: A publish is already in flight for this draft"
        );
    }

    #[test]
    fn test_error_message_formatting_schedule_in_past() {
        let error = PublishError::ScheduleInPast {
            scheduled_at: 1_000,
            now: 2_000,
        };
        let message = format!("{}", error);
        assert!(message.contains("1000"));
        assert!(message.contains("2000"));
        assert!(message.contains("in the past"));
    }

    #[test]
    fn test_error_conversion_from_publish_error() {
        let publish_error = PublishError::Sink("connection reset".to_string());
        let error: CrosspostError = publish_error.into();

        match error {
            CrosspostError::Publish(PublishError::Sink(msg)) => {
                assert_eq!(msg, "connection reset");
            }
            _ => panic!("Expected CrosspostError::Publish"),
        }
    }

    #[test]
    fn test_error_conversion_from_config_error() {
        let config_error = ConfigError::MissingField("platforms".to_string());
        let error: CrosspostError = config_error.into();

        assert!(matches!(error, CrosspostError::Config(_)));
    }

    #[test]
    fn test_publish_error_clone_and_eq() {
        // Cloneable and comparable so callers can match on retry logic
        let original = PublishError::Sink("timeout".to_string());
        let cloned = original.clone();
        assert_eq!(original, cloned);
        assert_ne!(original, PublishError::AlreadyPending);
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_ok() -> Result<String> {
            Ok("success".to_string())
        }

        fn returns_err() -> Result<String> {
            Err(CrosspostError::InvalidInput("test".to_string()))
        }

        assert!(returns_ok().is_ok());
        assert!(returns_err().is_err());
    }
}
