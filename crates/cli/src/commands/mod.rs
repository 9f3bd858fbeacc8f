mod extract;
mod view;

use std::fs;
use std::path::{Path, PathBuf};

use inky::ReaderConfig;
use tracing::debug;

use crate::cli::Commands;
use crate::error::{CliError, Result};

pub fn dispatch(command: Commands, config: Option<&Path>) -> Result<()> {
	let config = load_config(config)?;
	match command {
		Commands::Extract { file, url, format } => extract::execute(&file, url.as_deref(), format, &config),
		Commands::View { file, url, output, state } => view::execute(view::ViewOptions { file, url, output, state }, config),
	}
}

/// Reads the reader configuration, or the defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> Result<ReaderConfig> {
	let Some(path) = path else {
		return Ok(ReaderConfig::default());
	};
	let json = read_file(path)?;
	debug!(target = "inky.cli", path = %path.display(), "loaded configuration");
	ReaderConfig::from_json(&json).map_err(|source| CliError::Config {
		path: path.to_path_buf(),
		source,
	})
}

fn read_file(path: &Path) -> Result<String> {
	fs::read_to_string(path).map_err(|source| CliError::Read {
		path: path.to_path_buf(),
		source,
	})
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
	fs::write(path, contents).map_err(|source| CliError::Write {
		path: PathBuf::from(path),
		source,
	})
}
