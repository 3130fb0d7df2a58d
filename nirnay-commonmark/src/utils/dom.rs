//! Small helpers over the `kuchikikiki` tree used by the DOM passes.
use kuchikikiki::{Attribute, ExpandedName, NodeRef};
use markup5ever::{LocalName, QualName, local_name, ns};
use tendril::TendrilSink;

/// Parse an HTML fragment as `<body>` content. Elements that a full document
/// parse would hoist into `<head>`, such as `<style>` or `<meta>`, stay where
/// they were written.
#[must_use]
pub fn parse_fragment(html: &str) -> NodeRef {
  let context = QualName::new(None, ns!(html), local_name!("body"));
  kuchikikiki::parse_fragment(context, Vec::new()).one(html)
}

/// Return the element holding the parsed content: the `<html>` root created
/// by [`parse_fragment`], or the document itself if there is none.
#[must_use]
pub fn body_of(document: &NodeRef) -> NodeRef {
  document
    .children()
    .find(|child| is_tag(child, "html"))
    .unwrap_or_else(|| document.clone())
}

/// Serialize the children of `node` (not the node itself) to a string.
#[must_use]
pub fn serialize_children(node: &NodeRef) -> String {
  let mut out = Vec::new();
  for child in node.children() {
    if let Err(e) = child.serialize(&mut out) {
      log::warn!("Failed to serialize node: {e}");
    }
  }
  String::from_utf8(out).unwrap_or_default()
}

/// Create a new HTML element, optionally with a `class` attribute.
#[must_use]
pub fn new_element(tag: &str, class: Option<&str>) -> NodeRef {
  let attrs = class.map(|class| {
    (ExpandedName::new("", "class"), Attribute {
      prefix: None,
      value:  class.to_string(),
    })
  });
  NodeRef::new_element(
    QualName::new(None, ns!(html), LocalName::from(tag)),
    attrs,
  )
}

/// Local tag name of an element node.
#[must_use]
pub fn tag_name(node: &NodeRef) -> Option<String> {
  node
    .as_element()
    .map(|element| element.name.local.as_ref().to_string())
}

/// Whether `node` is an element with the given tag name.
#[must_use]
pub fn is_tag(node: &NodeRef, tag: &str) -> bool {
  node
    .as_element()
    .is_some_and(|element| element.name.local.as_ref() == tag)
}

/// Heading level (1-6) of an `h1`..`h6` element.
#[must_use]
pub fn heading_level(node: &NodeRef) -> Option<u8> {
  let element = node.as_element()?;
  match element.name.local.as_ref() {
    "h1" => Some(1),
    "h2" => Some(2),
    "h3" => Some(3),
    "h4" => Some(4),
    "h5" => Some(5),
    "h6" => Some(6),
    _ => None,
  }
}

/// Text of a node with each text run trimmed and runs joined by a single
/// space, then whitespace-collapsed. `<strong>Key</strong><em>Analysis</em>`
/// yields `"Key Analysis"`.
#[must_use]
pub fn joined_text(node: &NodeRef) -> String {
  let mut parts = Vec::new();
  for descendant in node.descendants() {
    if let Some(text) = descendant.as_text() {
      let text = text.borrow();
      let trimmed = text.trim();
      if !trimmed.is_empty() {
        parts.push(trimmed.to_string());
      }
    }
  }
  crate::utils::collapse_whitespace(&parts.join(" "))
}

/// Whether `node` is a text node containing only whitespace.
#[must_use]
pub fn is_blank_text(node: &NodeRef) -> bool {
  node.as_text().is_some_and(|text| text.borrow().trim().is_empty())
}

/// Whether the element's `class` attribute contains `class`.
#[must_use]
pub fn has_class(node: &NodeRef, class: &str) -> bool {
  node.as_element().is_some_and(|element| {
    element
      .attributes
      .borrow()
      .get(local_name!("class"))
      .is_some_and(|value| value.split_whitespace().any(|c| c == class))
  })
}

/// Append `class` to the element's class list unless it is already present.
pub fn add_class(node: &NodeRef, class: &str) {
  let Some(element) = node.as_element() else {
    return;
  };
  let mut attributes = element.attributes.borrow_mut();
  let updated = match attributes.get(local_name!("class")) {
    Some(existing) if existing.split_whitespace().any(|c| c == class) => {
      return;
    },
    Some(existing) if !existing.trim().is_empty() => {
      format!("{} {class}", existing.trim())
    },
    _ => class.to_string(),
  };
  attributes.insert(local_name!("class"), updated);
}

/// Whether any ancestor of `node` carries `class`.
#[must_use]
pub fn has_ancestor_with_class(node: &NodeRef, class: &str) -> bool {
  node.ancestors().any(|ancestor| has_class(&ancestor, class))
}

/// Collect all elements matching a CSS selector below `root`, in document
/// order. An invalid selector yields nothing.
#[must_use]
pub fn select_all(root: &NodeRef, selector: &str) -> Vec<NodeRef> {
  root.select(selector).map_or_else(
    |()| {
      log::warn!("Invalid selector: {selector}");
      Vec::new()
    },
    |matches| matches.map(|m| m.as_node().clone()).collect(),
  )
}
