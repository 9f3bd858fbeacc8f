//! Integration tests for article extraction through the public API.

use inky::{DocumentSnapshot, ExtractionFailure, Extractor, ExtractorRules, extract_article};

fn extractor() -> Extractor {
	Extractor::with_embedded_rules().expect("embedded rules should compile")
}

#[test]
fn extracting_twice_yields_the_same_article() {
	let html = r#"<html><head><title>Harbour notes</title><meta name="description" content="Boats and tides"></head>
		<body><nav>Home</nav><article><h2>Morning</h2><p>The tide came in early.</p><div><img src="/boat.png"></div></article></body></html>"#;
	let snapshot = DocumentSnapshot::parse(html, Some("https://harbour.example/notes"));
	let extractor = extractor();

	let first = extractor.extract(snapshot.clone()).unwrap();
	let second = extractor.extract(snapshot).unwrap();
	assert_eq!(first, second);
	assert_eq!(first.excerpt(), "Boats and tides");
}

#[test]
fn article_element_wins_over_denser_container() {
	let html = "<body><div id='dense'><p>one</p><p>two</p><p>three</p><p>four</p><p>five</p></div><article><p>short piece</p></article></body>";
	let article = extract_article(html, None).unwrap();
	assert_eq!(article.content(), "<article><p>short piece</p></article>");
}

#[test]
fn earlier_content_selector_wins_over_enclosing_match() {
	let html = "<html><body><div class='content'><p>Intro to the issue</p><article><p>Story</p></article></div></body></html>";
	let article = extract_article(html, None).unwrap();
	assert_eq!(article.content(), "<article><p>Story</p></article>");
}

#[test]
fn inline_svg_links_keep_their_xlink_prefix() {
	let html = "<body><article><p>See <svg><a xlink:href='#fig'><text>figure</text></a></svg></p></article></body>";
	let article = extract_article(html, None).unwrap();
	assert!(article.content().contains(r##"<a xlink:href="#fig">"##), "{}", article.content());
}

#[test]
fn densest_container_needs_more_than_two_paragraphs() {
	let two = "<body><span>lead</span><div><p>one</p><p>two</p></div></body>";
	let article = extract_article(two, None).unwrap();
	assert!(article.content().starts_with("<body>"), "expected body fallback, got {}", article.content());

	let three = "<body><span>lead</span><div><p>one</p><p>two</p><p>three</p></div></body>";
	let article = extract_article(three, None).unwrap();
	assert_eq!(article.content(), "<div><p>one</p><p>two</p><p>three</p></div>");
}

#[test]
fn empty_wrappers_are_pruned_but_images_stay() {
	let html = "<body><article><p>Caption below</p><div><div>   </div></div><div><img alt=\"chart\"></div></article></body>";
	let article = extract_article(html, None).unwrap();
	assert_eq!(article.content(), "<article><p>Caption below</p><div><img alt=\"chart\"></div></article>");
}

#[test]
fn hidden_and_unlikely_elements_are_dropped() {
	let html = r#"<body><article>
		<p>Visible text.</p>
		<p style="display: none">Hidden by style.</p>
		<p hidden>Hidden by attribute.</p>
		<p data-inky-hidden>Hidden by computed style.</p>
		<aside>Related reading</aside>
		<script>track()</script>
	</article></body>"#;
	let text = extract_article(html, None).unwrap().text();
	assert!(text.contains("Visible text."));
	for gone in ["Hidden by style.", "Hidden by attribute.", "Hidden by computed style.", "Related reading", "track()"] {
		assert!(!text.contains(gone), "{gone:?} should have been removed from {text:?}");
	}
}

#[test]
fn metadata_falls_back_to_document_title_and_domain() {
	let html = "<html><head><title>  Quiet   Streets </title></head><body><article><p>Body</p></article></body></html>";
	let article = extract_article(html, Some("https://www.city.example/streets")).unwrap();
	assert_eq!(article.title(), "Quiet Streets");
	assert_eq!(article.site_name(), "www.city.example");
	assert_eq!(article.byline(), "");
	assert_eq!(article.published_time(), "");
}

#[test]
fn metadata_prefers_open_graph_and_time_elements() {
	let html = r#"<html><head>
		<title>Fallback</title>
		<meta property="og:title" content="Open Graph Title">
		<meta property="og:site_name" content="The Gazette">
	</head><body><article><span class="author">Rui Okada</span><time datetime="2024-03-01">March 1</time><p>Body</p></article></body></html>"#;
	let article = extract_article(html, Some("https://gazette.example/a")).unwrap();
	assert_eq!(article.title(), "Open Graph Title");
	assert_eq!(article.site_name(), "The Gazette");
	assert_eq!(article.byline(), "Rui Okada");
	assert_eq!(article.published_time(), "2024-03-01");
}

#[test]
fn pages_without_readable_content_fail() {
	assert_eq!(extract_article("<html><body></body></html>", None), Err(ExtractionFailure::NoContentFound));
	assert_eq!(
		extract_article("<html><body><article><div> </div></article></body></html>", None),
		Err(ExtractionFailure::NoContentFound)
	);
}

#[test]
fn custom_rules_change_content_selection() -> anyhow::Result<()> {
	let mut rules = ExtractorRules::from_json(&serde_json::to_string(ExtractorRules::embedded())?)?;
	rules.content = vec![".story".to_string()];
	let extractor = Extractor::new(&rules)?;

	let html = "<body><article><p>Teaser</p></article><section class='story'><p>Full story</p></section></body>";
	let article = extractor.extract(DocumentSnapshot::parse(html, None))?;
	assert_eq!(article.content(), "<section class=\"story\"><p>Full story</p></section>");
	Ok(())
}

#[test]
fn invalid_rule_selectors_are_rejected() {
	let mut rules = ExtractorRules::default();
	rules.byline = vec!["[rel=".to_string()];
	let err = Extractor::new(&rules).unwrap_err();
	assert!(err.to_string().contains("[rel="), "unexpected error: {err}");
}
