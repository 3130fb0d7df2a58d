//! Heading passes that run before partitioning: annotation stripping, stray
//! hash-mark cleanup, topic tagging and title lookup.
use kuchikikiki::NodeRef;

use crate::{
  classify::{is_topic_title, strip_annotation},
  utils::dom::{add_class, heading_level, is_tag, joined_text, select_all},
};

/// Delete paragraphs whose only text is a run of hash marks. These come from
/// broken heading lines the normalizer could not recognize, such as seven or
/// more hashes. Returns the number removed.
pub fn remove_hash_only_paragraphs(root: &NodeRef) -> usize {
  let stray: Vec<NodeRef> = select_all(root, "p")
    .into_iter()
    .filter(|p| {
      let text = p.text_contents();
      let text = text.trim();
      !text.is_empty() && text.chars().all(|c| c == '#')
    })
    .collect();
  for paragraph in &stray {
    paragraph.detach();
  }
  stray.len()
}

/// Selector matching every heading level.
pub const HEADING_SELECTOR: &str = "h1, h2, h3, h4, h5, h6";

/// Class given to unclassified level-2 headings.
pub const TOPIC_TITLE_CLASS: &str = "topic-title";

/// All headings below `root`, in document order.
#[must_use]
pub fn headings(root: &NodeRef) -> Vec<NodeRef> {
  select_all(root, HEADING_SELECTOR)
}

/// Remove trailing attribute annotations that survived into the rendered
/// headings (setext headings, raw HTML headings). Text inside `code` is
/// never touched.
pub fn strip_heading_annotations(root: &NodeRef) {
  for heading in headings(root) {
    let last_text = heading
      .descendants()
      .filter(|node| {
        node
          .as_text()
          .is_some_and(|text| !text.borrow().trim().is_empty())
      })
      .last()
      .filter(|node| !in_code(node, &heading));

    if let Some(node) = last_text
      && let Some(text) = node.as_text()
    {
      let stripped = strip_annotation(&text.borrow());
      if stripped.len() != text.borrow().len() {
        *text.borrow_mut() = stripped;
      }
    }
  }
}

fn in_code(node: &NodeRef, heading: &NodeRef) -> bool {
  node
    .ancestors()
    .take_while(|ancestor| ancestor != heading)
    .any(|ancestor| is_tag(&ancestor, "code") || is_tag(&ancestor, "pre"))
}

/// Add the `topic-title` class to every topic title and return their texts
/// in document order.
pub fn tag_topic_titles(root: &NodeRef) -> Vec<String> {
  let mut topics = Vec::new();
  for heading in headings(root) {
    let Some(level) = heading_level(&heading) else {
      continue;
    };
    let text = joined_text(&heading);
    if is_topic_title(level, &text) {
      add_class(&heading, TOPIC_TITLE_CLASS);
      topics.push(text);
    }
  }
  topics
}

/// Text of the first level-1 heading. An empty heading counts as absent.
#[must_use]
pub fn document_title(root: &NodeRef) -> Option<String> {
  root
    .select_first("h1")
    .ok()
    .map(|h1| joined_text(h1.as_node()))
    .filter(|title| !title.is_empty())
}
