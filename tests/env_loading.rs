//! `.env` loading against the real process environment.
//!
//! Every test uses its own variable names so they can run in parallel.

use anyhow::Result;
use meditations_config::{AppConfig, COLLECTION_NAME, MAX_SENTENCE_LENGTH, env};
use std::fs;
use tempfile::TempDir;

fn write_env_file(dir: &TempDir, contents: &str) -> Result<()> {
	fs::write(dir.path().join(env::ENV_FILE_NAME), contents)?;
	Ok(())
}

#[test]
fn test_file_values_fill_unset_variables() -> Result<()> {
	let temp_dir = TempDir::new()?;
	write_env_file(
		&temp_dir,
		"MEDITATIONS_IT_FILL_A=from-file\nMEDITATIONS_IT_FILL_B=\"quoted value\"\n",
	)?;

	assert_eq!(env::get("MEDITATIONS_IT_FILL_A"), None);

	let loaded = env::load_from(temp_dir.path());

	assert_eq!(loaded, Some(temp_dir.path().join(".env")));
	assert_eq!(env::get("MEDITATIONS_IT_FILL_A").as_deref(), Some("from-file"));
	assert_eq!(env::get("MEDITATIONS_IT_FILL_B").as_deref(), Some("quoted value"));

	Ok(())
}

#[test]
fn test_existing_variables_win_over_file() -> Result<()> {
	let temp_dir = TempDir::new()?;
	write_env_file(&temp_dir, "MEDITATIONS_IT_PRECEDENCE=value2\n")?;

	// SAFETY: the variable is unique to this test and nothing else reads it.
	unsafe { std::env::set_var("MEDITATIONS_IT_PRECEDENCE", "value1") };

	env::load_from(temp_dir.path());

	assert_eq!(env::get("MEDITATIONS_IT_PRECEDENCE").as_deref(), Some("value1"));

	Ok(())
}

#[test]
fn test_repeated_load_is_idempotent() -> Result<()> {
	let temp_dir = TempDir::new()?;
	write_env_file(&temp_dir, "MEDITATIONS_IT_REPEAT=first\n")?;

	env::load_from(temp_dir.path());
	write_env_file(&temp_dir, "MEDITATIONS_IT_REPEAT=second\n")?;
	env::load_from(temp_dir.path());

	assert_eq!(env::get("MEDITATIONS_IT_REPEAT").as_deref(), Some("first"));

	Ok(())
}

#[test]
fn test_missing_file_is_silent() -> Result<()> {
	let temp_dir = TempDir::new()?;

	assert_eq!(env::load_from(temp_dir.path()), None);
	assert_eq!(env::get("MEDITATIONS_IT_MISSING"), None);

	Ok(())
}

#[test]
fn test_malformed_line_is_skipped() -> Result<()> {
	let temp_dir = TempDir::new()?;
	write_env_file(
		&temp_dir,
		"MEDITATIONS_IT_BEFORE_BAD=ok\nthis line is not valid\nMEDITATIONS_IT_AFTER_BAD=x\n",
	)?;

	let loaded = env::load_from(temp_dir.path());

	assert_eq!(loaded, Some(temp_dir.path().join(".env")));
	assert_eq!(env::get("MEDITATIONS_IT_BEFORE_BAD").as_deref(), Some("ok"));
	assert_eq!(env::get("MEDITATIONS_IT_AFTER_BAD").as_deref(), Some("x"));

	Ok(())
}

#[test]
fn test_unset_variable_reads_as_absent() {
	assert_eq!(env::get("MEDITATIONS_IT_DEFINITELY_NOT_SET_71A0"), None);
}

#[test]
fn test_snapshot_constants_are_stable() {
	let first = AppConfig::from_env();
	let second = AppConfig::load();

	for config in [&first, &second, AppConfig::global()] {
		assert_eq!(config.max_sentence_length, MAX_SENTENCE_LENGTH);
		assert_eq!(config.max_sentence_length, 100);
		assert_eq!(config.qdrant.collection_name, COLLECTION_NAME);
		assert_eq!(config.qdrant.collection_name, "meditations-collection");
		assert_eq!(config.data_dir, config.root_dir.join("data"));
	}
}
