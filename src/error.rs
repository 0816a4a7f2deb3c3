use thiserror::Error;

/// Raised by the on-demand accessors only; building an [`AppConfig`] never fails.
///
/// [`AppConfig`]: crate::config::AppConfig
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
	#[error("missing required environment variable '{key}'")]
	Missing { key: &'static str },

	#[error("invalid port '{value}': expected an integer between 0 and 65535")]
	InvalidPort { value: String },
}
