use std::path::PathBuf;

use inky::{ExtractionFailure, RulesError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
	#[error("failed to read {path}: {source}")]
	Read { path: PathBuf, source: std::io::Error },

	#[error("failed to write {path}: {source}")]
	Write { path: PathBuf, source: std::io::Error },

	#[error("invalid configuration in {path}: {source}")]
	Config { path: PathBuf, source: serde_json::Error },

	#[error(transparent)]
	Rules(#[from] RulesError),

	#[error(transparent)]
	Extraction(#[from] ExtractionFailure),

	#[error("reader mode could not be activated for {path}")]
	Activation { path: PathBuf },

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CliError>;
