#![allow(clippy::expect_used, clippy::panic, reason = "Fine in tests")]
use kuchikikiki::NodeRef;
use nirnay_commonmark::{
  Document,
  MarkdownOptions,
  MarkdownOptionsBuilder,
  MarkdownProcessor,
  SectionKind,
  process_document,
  utils::dom::{
    body_of,
    has_class,
    is_tag,
    joined_text,
    parse_fragment,
    select_all,
  },
};

const DIGEST: &str = "# TITLE\n## The Context\nSome text.\n## Key \
                      Analysis\nMore text.\n---\n## Random Topic\nBody.";

fn element_children(node: &NodeRef) -> Vec<NodeRef> {
  node
    .children()
    .filter(|child| child.as_element().is_some())
    .collect()
}

fn render_body(markdown: &str, options: MarkdownOptions) -> NodeRef {
  let result = MarkdownProcessor::new(options).render(markdown);
  body_of(&parse_fragment(&result.html))
}

#[test]
fn test_sections_topics_and_rule() {
  let processor = MarkdownProcessor::new(MarkdownOptions::default());
  let result = processor.render(DIGEST);

  assert_eq!(result.title.as_deref(), Some("TITLE"));
  assert_eq!(result.topics, vec!["Random Topic".to_string()]);
  let kinds: Vec<_> = result.sections.iter().map(|s| s.kind).collect();
  assert_eq!(kinds, vec![SectionKind::Context, SectionKind::Analysis]);

  let body = body_of(&parse_fragment(&result.html));
  let top = element_children(&body);
  let tags: Vec<_> = top
    .iter()
    .map(|node| {
      node
        .as_element()
        .map(|e| e.name.local.to_string())
        .unwrap_or_default()
    })
    .collect();
  assert_eq!(tags, vec!["h1", "div", "div", "hr", "h2", "p"]);

  assert!(has_class(&top[1], "colorbox") && has_class(&top[1], "context"));
  let context = element_children(&top[1]);
  assert_eq!(context.len(), 2);
  assert_eq!(joined_text(&context[0]), "The Context");
  assert_eq!(joined_text(&context[1]), "Some text.");

  assert!(has_class(&top[2], "analysis"));
  let analysis = element_children(&top[2]);
  assert_eq!(joined_text(&analysis[1]), "More text.");

  assert!(has_class(&top[4], "topic-title"));
  assert_eq!(joined_text(&top[5]), "Body.");
}

#[test]
fn test_three_column_table() {
  let body = render_body(
    "| A | B | C |\n|---|---|---|\n| 1 | 2 | 3 |\n",
    MarkdownOptions::default(),
  );
  assert!(select_all(&body, "table").is_empty());

  let rows = select_all(&body, ".gridtable > .gt-row");
  assert_eq!(rows.len(), 2);
  assert!(has_class(&rows[0], "gt-head"));

  let head: Vec<_> = element_children(&rows[0])
    .iter()
    .map(joined_text)
    .collect();
  assert_eq!(head, vec!["A", "B"]);
  let cells: Vec<_> = element_children(&rows[1])
    .iter()
    .map(joined_text)
    .collect();
  assert_eq!(cells, vec!["1", "2"]);
}

#[test]
fn test_table_followed_by_heading() {
  let body = render_body(
    "| K | V |\n|---|---|\n| a | b |\n## Way Forward\nNext.\n",
    MarkdownOptions::default(),
  );
  assert_eq!(select_all(&body, ".gridtable").len(), 1);
  let boxes = select_all(&body, ".colorbox.wayforward");
  assert_eq!(boxes.len(), 1);
  assert_eq!(joined_text(&boxes[0]), "Way Forward Next.");
}

#[test]
fn test_small_logo_image() {
  let body = render_body(
    "<img alt=\"Company logo\" src=\"logo.png\" style=\"width:500px\">\n",
    MarkdownOptions::default(),
  );
  let images = select_all(&body, "img");
  assert_eq!(images.len(), 1);
  let img = &images[0];
  let element = img.as_element().expect("element");
  assert!(element.attributes.borrow().get("style").is_none());
  assert!(has_class(img, "img-small"));

  let wrapper = img.parent().expect("wrapper");
  assert!(has_class(&wrapper, "img-figure"));
  assert!(has_class(&wrapper, "img-small"));
}

#[test]
fn test_markdown_image_paragraph_becomes_figure() {
  let body = render_body(
    "Intro.\n\n![Map of the region](map.png)\n",
    MarkdownOptions::default(),
  );
  let figures = select_all(&body, "figure.img-figure");
  assert_eq!(figures.len(), 1);
  assert_eq!(figures[0].parent(), Some(body.clone()));
  assert!(!has_class(&figures[0], "img-small"));
}

#[test]
fn test_figure_wrapping_disabled() {
  let options = MarkdownOptionsBuilder::new().figure_wrapping(false).build();
  let body = render_body("![icon](i.png){width=20}\n", options);
  assert!(select_all(&body, ".img-figure").is_empty());
  assert_eq!(select_all(&body, "img.img-small").len(), 1);
}

#[test]
fn test_containers_never_nest() {
  let markdown = "## Topic\n\n### The Context\n\n- a\n- b\n\n#### Key \
                  Analysis\n\n> quote\n\n### Way Forward\n\n1. one\n\n\
                  ### Recap\n\n---\n\n### Exercise\n\n## Next Topic\n";
  let body = render_body(markdown, MarkdownOptions::default());

  assert!(select_all(&body, ".colorbox .colorbox").is_empty());
  let boxes = select_all(&body, ".colorbox");
  assert_eq!(boxes.len(), 5);
  for container in &boxes {
    assert_eq!(container.parent(), Some(body.clone()));
  }
}

#[test]
fn test_section_heading_followed_by_rule() {
  let body = render_body(
    "### Recap\n\n---\n\nAfter.\n",
    MarkdownOptions::default(),
  );
  let boxes = select_all(&body, ".colorbox.recap");
  assert_eq!(boxes.len(), 1);
  assert_eq!(element_children(&boxes[0]).len(), 1);

  let next = boxes[0].next_sibling().expect("sibling");
  let next = if next.as_element().is_some() {
    next
  } else {
    next.next_sibling().expect("rule")
  };
  assert!(is_tag(&next, "hr"));
}

#[test]
fn test_ordinal_and_annotation_headings() {
  let processor = MarkdownProcessor::default();
  let result =
    processor.render("## 1. Key Analysis {#ka}\n\nx\n\n## (ii) Way Forward\n");
  let kinds: Vec<_> = result.sections.iter().map(|s| s.kind).collect();
  assert_eq!(kinds, vec![SectionKind::Analysis, SectionKind::WayForward]);
  assert!(result.html.contains("<h2>1. Key Analysis</h2>"));
  assert!(!result.html.contains("{#ka}"));
  assert!(result.topics.is_empty());
}

#[test]
fn test_braces_in_heading_text_kept() {
  let processor = MarkdownProcessor::default();

  let result = processor.render("## Configure `{config}`\n\nx\n");
  assert!(result.html.contains(
    "<h2 class=\"topic-title\">Configure <code>{config}</code></h2>"
  ));

  let result = processor.render("## Sets \\{a, b\\}\n");
  assert!(
    result
      .html
      .contains("<h2 class=\"topic-title\">Sets {a, b}</h2>")
  );
  assert_eq!(result.topics, vec!["Sets {a, b}".to_string()]);
}

#[test]
fn test_leading_raw_style_kept() {
  let result = MarkdownProcessor::default()
    .render("<style>.note { color: red; }</style>\n\n# Title\n");
  assert!(result.html.starts_with("<style>.note { color: red; }</style>"));
  assert_eq!(result.title.as_deref(), Some("Title"));
}

#[test]
fn test_broken_heading_lines_dropped() {
  let result = MarkdownProcessor::default()
    .render("# Title\n\n##\n\nText\n\n#######\n\n\\#hashtag\n");
  assert!(!result.html.contains("<h2>"));
  assert!(!result.html.contains("#######"));
  assert!(result.html.contains("<p>#hashtag</p>"));
}

#[test]
fn test_rendering_is_stable_across_runs() {
  let processor = MarkdownProcessor::default();
  let first = processor.render(DIGEST);
  let second = processor.render(DIGEST);
  assert_eq!(first, second);
}

#[test]
fn test_document_with_invalid_utf8() {
  let document = Document::from_bytes(b"## Rec\xffap\n\nDone.\n", "notes");
  let result = process_document(&MarkdownProcessor::default(), &document);
  assert_eq!(result.sections.len(), 1);
  assert_eq!(result.sections[0].kind, SectionKind::Recap);
  assert_eq!(result.title, None);
}

#[test]
fn test_result_serializes() {
  let result = MarkdownProcessor::default().render(DIGEST);
  let json = serde_json::to_value(&result).expect("serialize");
  assert_eq!(json["sections"][0]["kind"], "context");
  assert_eq!(json["topics"][0], "Random Topic");
}
