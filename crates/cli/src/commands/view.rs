use std::path::PathBuf;

use inky::{HtmlPage, LogNotifier, ReaderConfig, ReaderController};
use tracing::info;

use super::{read_file, write_file};
use crate::error::{CliError, Result};
use crate::state_store::FileStateStore;

pub struct ViewOptions {
	pub file: PathBuf,
	pub url: Option<String>,
	pub output: Option<PathBuf>,
	pub state: Option<PathBuf>,
}

pub fn execute(opts: ViewOptions, config: ReaderConfig) -> Result<()> {
	info!(target = "inky.cli", file = %opts.file.display(), url = opts.url.as_deref(), "render reading view");

	let markup = read_file(&opts.file)?;
	let page = HtmlPage::new(markup, opts.url.as_deref());
	let builder = ReaderController::builder(page).config(config).notifier(LogNotifier);
	let mut controller = match &opts.state {
		Some(path) => builder.store(FileStateStore::load(path)).build(),
		None => builder.build(),
	};

	if !controller.toggle().success {
		return Err(CliError::Activation { path: opts.file });
	}

	let rendered = controller.page().render();
	match &opts.output {
		Some(path) => {
			write_file(path, &rendered)?;
			info!(target = "inky.cli", output = %path.display(), "wrote reading view");
		}
		None => println!("{rendered}"),
	}
	Ok(())
}
