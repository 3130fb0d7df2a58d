//! Table to grid rewriting.
//!
//! Native tables cannot be split across pages or columns reliably, so each
//! table is flattened into a stack of two-cell rows (`div.gridtable`) that
//! behaves like ordinary flow content.
use kuchikikiki::NodeRef;
use log::debug;

use crate::utils::dom::{
  is_blank_text,
  is_tag,
  joined_text,
  new_element,
  select_all,
};

/// Header labels used when a table has no header row.
pub const DEFAULT_HEADERS: [&str; 2] = ["Category", "Fact / Detail"];

/// Number of cells in every grid row.
pub const GRID_COLUMNS: usize = 2;

/// Replace every `table` below `root` with a grid. Returns the number of
/// tables rewritten.
pub fn rewrite_tables(root: &NodeRef) -> usize {
  let tables = select_all(root, "table");
  for table in &tables {
    rewrite_table(table);
  }
  tables.len()
}

fn rewrite_table(table: &NodeRef) {
  let mut labels = header_labels(table);
  if labels.is_empty() {
    labels = DEFAULT_HEADERS.iter().map(ToString::to_string).collect();
  }
  if labels.len() > GRID_COLUMNS {
    debug!(
      "Truncating table with {} columns to {GRID_COLUMNS}: dropping {:?}",
      labels.len(),
      &labels[GRID_COLUMNS..]
    );
  }

  let grid = new_element("div", Some("gridtable"));

  let head = new_element("div", Some("gt-row gt-head"));
  for index in 0..GRID_COLUMNS {
    let cell = new_element("div", Some("gt-cell"));
    if let Some(label) = labels.get(index).filter(|label| !label.is_empty()) {
      cell.append(NodeRef::new_text(label.as_str()));
    }
    head.append(cell);
  }
  grid.append(head);

  for cells in body_rows(table) {
    if cells.is_empty() {
      continue;
    }
    let row = new_element("div", Some("gt-row"));
    for index in 0..GRID_COLUMNS {
      let cell = new_element("div", Some("gt-cell"));
      if let Some(source) = cells.get(index) {
        move_cell_contents(source, &cell);
      }
      row.append(cell);
    }
    grid.append(row);
  }

  table.insert_before(grid);
  table.detach();
}

/// Text of every `th` in the table's header row group.
fn header_labels(table: &NodeRef) -> Vec<String> {
  table
    .children()
    .filter(|child| is_tag(child, "thead"))
    .flat_map(|thead| select_all(&thead, "th"))
    .map(|th| joined_text(&th))
    .collect()
}

/// Cells of every body row, in order.
fn body_rows(table: &NodeRef) -> Vec<Vec<NodeRef>> {
  table
    .children()
    .filter(|child| is_tag(child, "tbody"))
    .flat_map(|tbody| {
      tbody
        .children()
        .filter(|row| is_tag(row, "tr"))
        .collect::<Vec<_>>()
    })
    .map(|row| {
      row
        .children()
        .filter(|cell| is_tag(cell, "td") || is_tag(cell, "th"))
        .collect()
    })
    .collect()
}

/// Move the children of `source` into `target`, keeping their markup and
/// trimming surrounding whitespace.
fn move_cell_contents(source: &NodeRef, target: &NodeRef) {
  let children: Vec<NodeRef> = source.children().collect();
  for child in children {
    target.append(child);
  }

  while let Some(first) = target.first_child() {
    if is_blank_text(&first) {
      first.detach();
      continue;
    }
    if let Some(text) = first.as_text() {
      let trimmed = text.borrow().trim_start().to_string();
      *text.borrow_mut() = trimmed;
    }
    break;
  }

  while let Some(last) = target.last_child() {
    if is_blank_text(&last) {
      last.detach();
      continue;
    }
    if let Some(text) = last.as_text() {
      let trimmed = text.borrow().trim_end().to_string();
      *text.borrow_mut() = trimmed;
    }
    break;
  }
}
