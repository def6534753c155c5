//! Table model.
//!
//! Mirrors the parts of an HTML table the page works with: header cells with
//! a sort marker, body rows of text cells (optionally spanning columns), and
//! string attributes stored on the table itself.

use std::collections::{BTreeMap, BTreeSet};

use crate::direction::SortDirection;

/// Attribute holding the last applied sort direction (`"asc"` / `"desc"`).
pub const SORT_DIRECTION_ATTR: &str = "data-sort-direction";

/// Attribute set once header click sorting has been wired up.
pub const SORT_INITIALIZED_ATTR: &str = "data-sort-initialized";

/// A body cell.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cell {
    text: String,
    colspan: Option<usize>,
    classes: BTreeSet<String>,
}

impl Cell {
    /// Create a plain text cell.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Create a cell spanning `colspan` columns.
    pub fn spanning(text: impl Into<String>, colspan: usize) -> Self {
        Self {
            text: text.into(),
            colspan: Some(colspan),
            ..Self::default()
        }
    }

    /// Builder-style class addition.
    #[must_use]
    pub fn with_classes<'a>(mut self, classes: impl IntoIterator<Item = &'a str>) -> Self {
        for class in classes {
            self.add_class(class);
        }
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text content with surrounding whitespace removed.
    pub fn trimmed_text(&self) -> &str {
        self.text.trim()
    }

    pub fn colspan(&self) -> Option<usize> {
        self.colspan
    }

    /// Whether the cell declares a column span.
    pub fn is_spanning(&self) -> bool {
        self.colspan.is_some()
    }

    pub fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }
}

/// A body row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Build a row of plain text cells.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: texts.into_iter().map(Cell::new).collect(),
        }
    }

    /// Single-cell row spanning every column (empty or error state).
    pub fn placeholder(text: impl Into<String>, colspan: usize) -> Self {
        Self {
            cells: vec![Cell::spanning(text, colspan)],
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    /// Rows holding a spanning cell are excluded from reordering.
    pub fn is_placeholder(&self) -> bool {
        self.cells.iter().any(Cell::is_spanning)
    }
}

/// A header cell with its current sort marker.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeaderCell {
    label: String,
    marker: Option<SortDirection>,
}

impl HeaderCell {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            marker: None,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn marker(&self) -> Option<SortDirection> {
        self.marker
    }

    /// Visual class for the current marker, if any.
    pub fn marker_class(&self) -> Option<&'static str> {
        self.marker.map(SortDirection::marker_class)
    }

    pub fn set_marker(&mut self, marker: Option<SortDirection>) {
        self.marker = marker;
    }
}

/// What the sort utility needs from a table.
///
/// `Table` is the in-memory implementation; a DOM-backed table can implement
/// the same contract.
pub trait SortSurface {
    /// Body rows, or `None` when the table has no body.
    fn body_rows(&self) -> Option<&[Row]>;

    /// Re-append body rows in `order` (indices into the current body).
    fn reorder_rows(&mut self, order: &[usize]);

    /// Stored direction attribute.
    fn sort_direction_attr(&self) -> Option<&str>;

    fn set_sort_direction_attr(&mut self, value: &str);

    fn header_count(&self) -> usize;

    /// Replace the sort marker on one header.
    fn set_header_marker(&mut self, index: usize, marker: Option<SortDirection>);
}

/// In-memory table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    id: String,
    headers: Vec<HeaderCell>,
    body: Option<Vec<Row>>,
    attributes: BTreeMap<String, String>,
}

impl Table {
    /// Create a table with an empty body.
    pub fn new<I, S>(id: impl Into<String>, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            headers: headers.into_iter().map(HeaderCell::new).collect(),
            body: Some(Vec::new()),
            attributes: BTreeMap::new(),
        }
    }

    /// Create a table without a body section.
    pub fn without_body<I, S>(id: impl Into<String>, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            body: None,
            ..Self::new(id, headers)
        }
    }

    /// Builder-style row population.
    #[must_use]
    pub fn with_rows(mut self, rows: impl IntoIterator<Item = Row>) -> Self {
        for row in rows {
            self.push_row(row);
        }
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn headers(&self) -> &[HeaderCell] {
        &self.headers
    }

    pub fn rows(&self) -> Option<&[Row]> {
        self.body.as_deref()
    }

    pub fn rows_mut(&mut self) -> Option<&mut Vec<Row>> {
        self.body.as_mut()
    }

    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    /// Append a row. Returns false when the table has no body.
    pub fn push_row(&mut self, row: Row) -> bool {
        match self.body.as_mut() {
            Some(body) => {
                body.push(row);
                true
            }
            None => false,
        }
    }

    /// Remove all body rows.
    pub fn clear_rows(&mut self) {
        if let Some(body) = self.body.as_mut() {
            body.clear();
        }
    }

    /// Trimmed text of one column, `None` where a row lacks the cell.
    pub fn column_texts(&self, column: usize) -> Vec<Option<&str>> {
        self.rows()
            .unwrap_or_default()
            .iter()
            .map(|row| row.cell(column).map(Cell::trimmed_text))
            .collect()
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        self.attributes.insert(name.to_string(), value.into());
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }
}

impl SortSurface for Table {
    fn body_rows(&self) -> Option<&[Row]> {
        self.rows()
    }

    fn reorder_rows(&mut self, order: &[usize]) {
        let Some(body) = self.body.as_mut() else {
            return;
        };
        let mut slots: Vec<Option<Row>> = body.drain(..).map(Some).collect();
        body.extend(
            order
                .iter()
                .filter_map(|&index| slots.get_mut(index).and_then(Option::take)),
        );
        // Rows the order did not mention stay, after the ordered ones.
        body.extend(slots.into_iter().flatten());
    }

    fn sort_direction_attr(&self) -> Option<&str> {
        self.attribute(SORT_DIRECTION_ATTR)
    }

    fn set_sort_direction_attr(&mut self, value: &str) {
        self.set_attribute(SORT_DIRECTION_ATTR, value);
    }

    fn header_count(&self) -> usize {
        self.headers.len()
    }

    fn set_header_marker(&mut self, index: usize, marker: Option<SortDirection>) {
        if let Some(header) = self.headers.get_mut(index) {
            header.set_marker(marker);
        }
    }
}
