use thiserror::Error;

/// Reasons a [`TimerConfig`](crate::TimerConfig) is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
}
