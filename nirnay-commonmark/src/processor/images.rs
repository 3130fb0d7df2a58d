//! Image normalization.
use kuchikikiki::NodeRef;
use markup5ever::local_name;

use crate::utils::dom::{
  add_class,
  has_class,
  is_blank_text,
  is_tag,
  new_element,
  select_all,
};

/// Class of the wrapper placed around every image.
pub const FIGURE_CLASS: &str = "img-figure";

/// Class marking icon-sized images and their wrappers.
pub const SMALL_CLASS: &str = "img-small";

/// Alt-text keywords that mark an image as small.
pub const SMALL_IMAGE_KEYWORDS: [&str; 4] = ["icon", "logo", "emoji", "small"];

const LAYOUT_ATTRIBUTES: [&str; 3] = ["style", "width", "height"];

// Parents in which a block-level `figure` would break the surrounding markup
const PHRASING_PARENTS: &[&str] = &[
  "p", "a", "span", "strong", "em", "b", "i", "u", "s", "small", "sub", "sup",
  "code", "label", "h1", "h2", "h3", "h4", "h5", "h6",
];

/// Whether alt text marks an image as icon-sized.
#[must_use]
pub fn is_small_image(alt: &str) -> bool {
  let alt = alt.to_lowercase();
  SMALL_IMAGE_KEYWORDS
    .iter()
    .any(|keyword| alt.contains(keyword))
}

/// Strip inline sizing from every image and, when `wrap` is set, place each
/// image not already inside a figure container into one. Returns the number of
/// wrappers created.
pub fn normalize_images(root: &NodeRef, wrap: bool) -> usize {
  let mut wrapped = 0;

  for img in select_all(root, "img") {
    let small = strip_layout_attributes(&img);
    if small {
      add_class(&img, SMALL_CLASS);
    }
    if !wrap {
      continue;
    }

    if let Some(existing) = img.ancestors().find(is_figure_like) {
      if small {
        add_class(&existing, SMALL_CLASS);
      }
      continue;
    }

    wrap_image(&img, small);
    wrapped += 1;
  }

  wrapped
}

/// Remove sizing attributes and report whether the image is small.
fn strip_layout_attributes(img: &NodeRef) -> bool {
  let Some(element) = img.as_element() else {
    return false;
  };
  let mut attributes = element.attributes.borrow_mut();
  for name in LAYOUT_ATTRIBUTES {
    attributes.remove(name);
  }
  attributes
    .get(local_name!("alt"))
    .is_some_and(is_small_image)
}

fn is_figure_like(node: &NodeRef) -> bool {
  is_tag(node, "figure") || has_class(node, FIGURE_CLASS)
}

fn wrap_image(img: &NodeRef, small: bool) {
  let class = if small {
    format!("{FIGURE_CLASS} {SMALL_CLASS}")
  } else {
    FIGURE_CLASS.to_string()
  };

  if let Some(paragraph) = sole_paragraph(img) {
    let figure = new_element("figure", Some(&class));
    paragraph.insert_before(figure.clone());
    figure.append(img.clone());
    paragraph.detach();
    return;
  }

  let inline = img.parent().is_some_and(|parent| {
    PHRASING_PARENTS.iter().any(|tag| is_tag(&parent, tag))
  });
  let tag = if inline { "span" } else { "figure" };
  let wrapper = new_element(tag, Some(&class));
  img.insert_before(wrapper.clone());
  wrapper.append(img.clone());
}

/// The enclosing `p` when the image is its only non-blank content.
fn sole_paragraph(img: &NodeRef) -> Option<NodeRef> {
  let parent = img.parent().filter(|parent| is_tag(parent, "p"))?;
  let alone = parent
    .children()
    .all(|child| child == *img || is_blank_text(&child));
  alone.then_some(parent)
}
