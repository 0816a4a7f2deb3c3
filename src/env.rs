//! Process environment loading.
//!
//! A `.env` file only fills in gaps: variables already present in the process
//! environment are never overwritten.

use std::path::{Path, PathBuf};

pub const ENV_FILE_NAME: &str = ".env";

/// Loads the nearest `.env` found from the current working directory upwards.
///
/// Returns `true` when a file was found and applied. Lines that fail to parse are
/// logged and skipped; the remaining entries still apply.
pub fn load() -> bool {
	match dotenvy::dotenv_iter() {
		Ok(iter) => {
			apply(iter, Path::new(ENV_FILE_NAME));
			true
		}
		Err(e) if e.not_found() => {
			tracing::debug!("no {ENV_FILE_NAME} found from working directory");
			false
		}
		Err(e) => {
			tracing::warn!("failed to open {ENV_FILE_NAME}: {e}");
			false
		}
	}
}

/// Same as [`load`] but starts the search at `dir` instead of the working directory.
///
/// Returns the path of the file that was applied.
pub fn load_from<P: AsRef<Path>>(dir: P) -> Option<PathBuf> {
	let Some(path) = find_env_file(dir.as_ref()) else {
		tracing::debug!("no {ENV_FILE_NAME} found from {}", dir.as_ref().display());
		return None;
	};

	match dotenvy::from_path_iter(&path) {
		Ok(iter) => {
			apply(iter, &path);
			Some(path)
		}
		Err(e) => {
			tracing::warn!("failed to open {}: {e}", path.display());
			None
		}
	}
}

/// Sets every parsed entry whose key is not already present in the environment.
fn apply<I>(entries: I, path: &Path)
where
	I: IntoIterator<Item = dotenvy::Result<(String, String)>>,
{
	let mut applied = 0usize;

	for entry in entries {
		let (key, value) = match entry {
			Ok(pair) => pair,
			Err(e @ dotenvy::Error::Io(_)) => {
				tracing::warn!("stopped reading {}: {e}", path.display());
				break;
			}
			Err(e) => {
				tracing::warn!("skipping entry in {}: {e}", path.display());
				continue;
			}
		};

		if std::env::var_os(&key).is_some() {
			continue;
		}

		// SAFETY: loading runs once at startup, before other threads read the
		// environment.
		unsafe { std::env::set_var(&key, value) };
		applied += 1;
	}

	tracing::debug!("applied {applied} entries from {}", path.display());
}

/// Reads a single variable by exact name. Unset or non-unicode values are `None`.
pub fn get(key: &str) -> Option<String> {
	std::env::var(key).ok()
}

fn find_env_file(start: &Path) -> Option<PathBuf> {
	start
		.ancestors()
		.map(|dir| dir.join(ENV_FILE_NAME))
		.find(|candidate| candidate.is_file())
}
