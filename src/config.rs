use crate::{env, error::ConfigError};
use serde::Deserialize;
use std::{
	fmt,
	path::{Path, PathBuf},
	sync::OnceLock,
};

pub const MAX_SENTENCE_LENGTH: usize = 100;
pub const COLLECTION_NAME: &str = "meditations-collection";
pub const DATA_DIR_NAME: &str = "data";

pub const QDRANT_HOST: &str = "QDRANT_HOST";
pub const QDRANT_PORT: &str = "QDRANT_PORT";
pub const QDRANT_API_KEY: &str = "QDRANT_API_KEY";
pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";

const ENV_KEYS: [&str; 4] = [QDRANT_HOST, QDRANT_PORT, QDRANT_API_KEY, OPENAI_API_KEY];

/// Directory this crate lives in.
pub fn root_dir() -> &'static Path {
	Path::new(env!("CARGO_MANIFEST_DIR"))
}

pub fn data_dir() -> PathBuf {
	root_dir().join(DATA_DIR_NAME)
}

/// Raw variables as read from the environment, before they are grouped.
#[derive(Debug, Default, Deserialize)]
struct EnvVars {
	qdrant_host: Option<String>,
	qdrant_port: Option<String>,
	qdrant_api_key: Option<String>,
	openai_api_key: Option<String>,
}

#[derive(Clone, PartialEq, Eq)]
pub struct QdrantConfig {
	pub host: Option<String>,
	/// Kept as given; parse with [`QdrantConfig::port_number`].
	pub port: Option<String>,
	pub api_key: Option<String>,
	pub collection_name: String,
}

impl QdrantConfig {
	pub fn require_host(&self) -> Result<&str, ConfigError> {
		require(self.host.as_deref(), QDRANT_HOST)
	}

	pub fn port_number(&self) -> Result<Option<u16>, ConfigError> {
		match self.port.as_deref().map(str::trim) {
			None | Some("") => Ok(None),
			Some(raw) => raw
				.parse::<u16>()
				.map(Some)
				.map_err(|_| ConfigError::InvalidPort {
					value: raw.to_string(),
				}),
		}
	}

	/// Connection url built from host and port, e.g. `http://localhost:6333`.
	///
	/// A port already present in the host takes precedence over `QDRANT_PORT`.
	pub fn url(&self) -> Result<String, ConfigError> {
		let host = self.require_host()?.trim().trim_end_matches('/');
		let base = if host.contains("://") {
			host.to_string()
		} else {
			format!("http://{host}")
		};

		let port = self.port_number()?;
		Ok(match port {
			Some(port) if !has_explicit_port(&base) => format!("{base}:{port}"),
			_ => base,
		})
	}
}

/// `http://host:6333` and `https://[::1]:6334` yes, `http://host` and `http://[::1]` no.
fn has_explicit_port(url: &str) -> bool {
	let authority = url.split_once("://").map_or(url, |(_, rest)| rest);
	let authority = authority.split('/').next().unwrap_or(authority);

	match authority.rsplit_once(':') {
		Some((_, port)) => !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()),
		None => false,
	}
}

impl fmt::Debug for QdrantConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("QdrantConfig")
			.field("host", &self.host)
			.field("port", &self.port)
			.field("api_key", &self.api_key.as_deref().map(mask_secret))
			.field("collection_name", &self.collection_name)
			.finish()
	}
}

/// Immutable configuration snapshot, built once at startup and shared by reference.
#[derive(Clone, PartialEq, Eq)]
pub struct AppConfig {
	pub root_dir: PathBuf,
	pub data_dir: PathBuf,
	pub max_sentence_length: usize,
	pub qdrant: QdrantConfig,
	pub openai_api_key: Option<String>,
}

impl AppConfig {
	/// Builds the snapshot from `(key, value)` pairs.
	///
	/// Only the exact variable names are looked at; anything else in `vars` is
	/// ignored. Absent variables stay `None`.
	pub fn from_vars<I>(vars: I) -> Self
	where
		I: IntoIterator<Item = (String, String)>,
	{
		let relevant = vars
			.into_iter()
			.filter(|(key, _)| ENV_KEYS.contains(&key.as_str()));

		let env_vars = envy::from_iter::<_, EnvVars>(relevant).unwrap_or_else(|e| {
			tracing::warn!("could not read configuration from environment: {e}");
			EnvVars::default()
		});

		Self {
			root_dir: root_dir().to_path_buf(),
			data_dir: data_dir(),
			max_sentence_length: MAX_SENTENCE_LENGTH,
			qdrant: QdrantConfig {
				host: env_vars.qdrant_host,
				port: env_vars.qdrant_port,
				api_key: env_vars.qdrant_api_key,
				collection_name: COLLECTION_NAME.to_string(),
			},
			openai_api_key: env_vars.openai_api_key,
		}
	}

	/// Reads the current process environment without touching `.env`.
	pub fn from_env() -> Self {
		let vars = std::env::vars_os().filter_map(|(key, value)| {
			Some((key.into_string().ok()?, value.into_string().ok()?))
		});
		Self::from_vars(vars)
	}

	/// Applies `.env` (existing variables win), then reads the environment.
	pub fn load() -> Self {
		env::load();
		Self::from_env()
	}

	/// Process-wide snapshot. The first call performs [`AppConfig::load`].
	pub fn global() -> &'static AppConfig {
		static CONFIG: OnceLock<AppConfig> = OnceLock::new();
		CONFIG.get_or_init(Self::load)
	}

	pub fn require_openai_api_key(&self) -> Result<&str, ConfigError> {
		require(self.openai_api_key.as_deref(), OPENAI_API_KEY)
	}
}

impl fmt::Debug for AppConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("AppConfig")
			.field("root_dir", &self.root_dir)
			.field("data_dir", &self.data_dir)
			.field("max_sentence_length", &self.max_sentence_length)
			.field("qdrant", &self.qdrant)
			.field("openai_api_key", &self.openai_api_key.as_deref().map(mask_secret))
			.finish()
	}
}

/// Hides all but the last four characters of a secret.
pub fn mask_secret(secret: &str) -> String {
	let chars: Vec<char> = secret.chars().collect();
	if chars.len() <= 8 {
		return "****".to_string();
	}
	let tail: String = chars[chars.len() - 4..].iter().collect();
	format!("****{tail}")
}

fn require<'a>(value: Option<&'a str>, key: &'static str) -> Result<&'a str, ConfigError> {
	match value {
		Some(v) if !v.trim().is_empty() => Ok(v),
		_ => Err(ConfigError::Missing { key }),
	}
}
