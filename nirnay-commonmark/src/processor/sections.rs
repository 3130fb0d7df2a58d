//! Section partitioning.
//!
//! Every classified heading opens a `div.colorbox.<tag>` container that
//! takes the heading and the siblings after it, up to the next boundary:
//! a thematic break, a topic title or another classified heading.
//! Containers never nest.
use kuchikikiki::NodeRef;
use log::trace;

use super::headings::{TOPIC_TITLE_CLASS, headings};
use crate::{
  classify::{SectionKind, classify_section, is_topic_title},
  types::Section,
  utils::dom::{
    has_ancestor_with_class,
    has_class,
    heading_level,
    is_tag,
    joined_text,
    new_element,
  },
};

/// Class shared by every section container.
pub const CONTAINER_CLASS: &str = "colorbox";

/// Class of the page break marker inserted after the index.
pub const PAGE_BREAK_CLASS: &str = "page-break";

/// Wrap every classified heading and its run of siblings in a section
/// container. Returns the created sections in document order.
pub fn wrap_sections(root: &NodeRef) -> Vec<Section> {
  let mut sections = Vec::new();

  for heading in headings(root) {
    if has_ancestor_with_class(&heading, CONTAINER_CLASS) {
      continue;
    }
    let text = joined_text(&heading);
    let Some(kind) = classify_section(&text) else {
      continue;
    };

    let container = wrap_run(&heading, kind);
    trace!(
      "Wrapped section '{text}' as {kind} ({} nodes)",
      container.children().count()
    );
    sections.push(Section {
      kind,
      heading: text,
    });
  }

  sections
}

/// Whether `node` ends a section run.
#[must_use]
pub fn is_boundary(node: &NodeRef) -> bool {
  if is_tag(node, "hr") {
    return true;
  }
  heading_level(node).is_some_and(|level| {
    let text = joined_text(node);
    is_topic_title(level, &text) || classify_section(&text).is_some()
  })
}

fn wrap_run(heading: &NodeRef, kind: SectionKind) -> NodeRef {
  // Snapshot before any node moves
  let run: Vec<NodeRef> = heading
    .following_siblings()
    .take_while(|sibling| !is_boundary(sibling))
    .collect();

  let class = format!("{CONTAINER_CLASS} {kind}");
  let container = new_element("div", Some(&class));
  heading.insert_before(container.clone());
  container.append(heading.clone());
  for node in run {
    container.append(node);
  }
  container
}

/// Insert a page break marker before the first top-level topic title when
/// some element precedes it. Returns whether a marker was inserted.
pub fn insert_index_page_break(root: &NodeRef) -> bool {
  let Some(first_topic) = root
    .children()
    .find(|child| has_class(child, TOPIC_TITLE_CLASS))
  else {
    return false;
  };

  let has_index = first_topic
    .preceding_siblings()
    .any(|sibling| sibling.as_element().is_some());
  if !has_index {
    return false;
  }

  first_topic.insert_before(new_element("div", Some(PAGE_BREAK_CLASS)));
  true
}
