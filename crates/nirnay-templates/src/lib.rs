use std::collections::BTreeMap;

pub const PAGE_TEMPLATE: &str = include_str!("../templates/page.html");

pub const BASE_CSS: &str = include_str!("../templates/base.css");
pub const TWO_COLUMN_CSS: &str = include_str!("../templates/two-column.css");
pub const SINGLE_COLUMN_CSS: &str =
  include_str!("../templates/single-column.css");

/// Layout sheet for the given column count. Anything but 1 gets the
/// two-column sheet.
#[must_use]
pub const fn layout_css(columns: u8) -> &'static str {
  if columns == 1 {
    SINGLE_COLUMN_CSS
  } else {
    TWO_COLUMN_CSS
  }
}

/// Every embedded style sheet, keyed by file name.
#[must_use]
pub fn all_stylesheets() -> BTreeMap<&'static str, &'static str> {
  let mut sheets = BTreeMap::new();
  sheets.insert("base.css", BASE_CSS);
  sheets.insert("two-column.css", TWO_COLUMN_CSS);
  sheets.insert("single-column.css", SINGLE_COLUMN_CSS);
  sheets
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_page_template_placeholders() {
    for placeholder in ["{{ title }}", "{{ stylesheet }}", "{{ content }}"] {
      assert!(PAGE_TEMPLATE.contains(placeholder), "{placeholder}");
    }
    assert!(PAGE_TEMPLATE.contains("<div class=\"prose\">"));
  }

  #[test]
  fn test_base_css_covers_every_section_tag() {
    for tag in [
      "syllabus",
      "context",
      "analysis",
      "beyond",
      "wayforward",
      "prelims",
      "exercise",
      "mains",
      "recall",
      "recap",
    ] {
      assert!(BASE_CSS.contains(&format!(".colorbox.{tag}")), "{tag}");
    }
    assert!(BASE_CSS.contains("@page { size: A4; margin: 10mm 9mm; }"));
    assert!(BASE_CSS.contains(".page-break"));
  }

  #[test]
  fn test_layout_selection() {
    assert_eq!(layout_css(1), SINGLE_COLUMN_CSS);
    assert_eq!(layout_css(2), TWO_COLUMN_CSS);
    assert!(TWO_COLUMN_CSS.contains("column-count: 2"));
  }

  #[test]
  fn test_all_stylesheets() {
    let names: Vec<_> = all_stylesheets().into_keys().collect();
    assert_eq!(names, vec!["base.css", "single-column.css", "two-column.css"]);
  }
}
