use std::path::Path;

use inky::{Article, DocumentSnapshot, Extractor, ReaderConfig};
use tracing::info;

use super::read_file;
use crate::cli::ArticleFormat;
use crate::error::Result;

pub fn execute(file: &Path, url: Option<&str>, format: ArticleFormat, config: &ReaderConfig) -> Result<()> {
	info!(target = "inky.cli", file = %file.display(), url, %format, "extract article");

	let markup = read_file(file)?;
	let extractor = match &config.rules {
		Some(rules) => Extractor::new(rules)?,
		None => Extractor::with_embedded_rules()?,
	};
	let article = extractor.extract(DocumentSnapshot::parse(&markup, url))?;

	println!("{}", render(&article, format)?);
	Ok(())
}

fn render(article: &Article, format: ArticleFormat) -> Result<String> {
	Ok(match format {
		ArticleFormat::Json => serde_json::to_string_pretty(article)?,
		ArticleFormat::Html => article.content().to_string(),
		ArticleFormat::Text if article.title().is_empty() => article.text(),
		ArticleFormat::Text => format!("{}\n\n{}", article.title(), article.text()),
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	fn article() -> Article {
		inky::extract_article(
			"<html><head><title>Orchard</title></head><body><article><p>Apples ripen late.</p></article></body></html>",
			None,
		)
		.unwrap()
	}

	#[test]
	fn json_uses_camel_case_fields() {
		let json: serde_json::Value = serde_json::from_str(&render(&article(), ArticleFormat::Json).unwrap()).unwrap();
		assert_eq!(json["title"], "Orchard");
		assert!(json.get("siteName").is_some());
		assert!(json.get("publishedTime").is_some());
	}

	#[test]
	fn text_leads_with_title() {
		let text = render(&article(), ArticleFormat::Text).unwrap();
		assert!(text.starts_with("Orchard\n\n"));
		assert!(text.contains("Apples ripen late."));
	}
}
