use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "inky")]
#[command(about = "Inky reader mode - extract articles and render e-ink reading views")]
#[command(version)]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Reader configuration (JSON); built-in defaults when omitted
	#[arg(long, global = true, value_name = "FILE")]
	pub config: Option<PathBuf>,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Extract the main article from an HTML file
	Extract {
		/// HTML file to read
		file: PathBuf,
		/// URL the page was saved from (used for the site name)
		#[arg(long)]
		url: Option<String>,
		/// Output format
		#[arg(short, long, value_enum, default_value_t = ArticleFormat::Json)]
		format: ArticleFormat,
	},

	/// Activate reader mode on an HTML file and write the rendered page
	View {
		/// HTML file to read
		file: PathBuf,
		/// URL the page was saved from
		#[arg(long)]
		url: Option<String>,
		/// Output file (stdout when omitted)
		#[arg(short, long)]
		output: Option<PathBuf>,
		/// Reader state file that records the persisted reader flag
		#[arg(long, value_name = "FILE")]
		state: Option<PathBuf>,
	},
}

/// How `extract` prints an article.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ArticleFormat {
	/// Article record as JSON
	#[default]
	Json,
	/// Cleaned content markup only
	Html,
	/// Title followed by the plain-text content
	Text,
}

impl std::fmt::Display for ArticleFormat {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ArticleFormat::Json => write!(f, "json"),
			ArticleFormat::Html => write!(f, "html"),
			ArticleFormat::Text => write!(f, "text"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn extract_defaults_to_json() {
		let cli = Cli::try_parse_from(["inky", "extract", "page.html"]).unwrap();
		match cli.command {
			Commands::Extract { file, url, format } => {
				assert_eq!(file, PathBuf::from("page.html"));
				assert_eq!(url, None);
				assert_eq!(format, ArticleFormat::Json);
			}
			other => panic!("unexpected command: {other:?}"),
		}
	}

	#[test]
	fn global_flags_follow_subcommands() {
		let cli = Cli::try_parse_from(["inky", "view", "page.html", "--state", "state.json", "-vv", "--config", "inky.json"]).unwrap();
		assert_eq!(cli.verbose, 2);
		assert_eq!(cli.config, Some(PathBuf::from("inky.json")));
		assert!(matches!(cli.command, Commands::View { state: Some(_), output: None, .. }));
	}

	#[test]
	fn unknown_format_is_rejected() {
		assert!(Cli::try_parse_from(["inky", "extract", "page.html", "-f", "markdown"]).is_err());
	}
}
