pub mod commands;
pub mod config;
pub mod env;
pub mod error;
pub mod logging;

pub use config::{
	AppConfig, COLLECTION_NAME, MAX_SENTENCE_LENGTH, QdrantConfig, data_dir, root_dir,
};
pub use error::ConfigError;
