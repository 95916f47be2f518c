use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell in a column
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value, inferred per cell at load time.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Bool(bool),
    /// Absent data (empty CSV field, empty spreadsheet cell). Distinct from
    /// zero and from the empty string.
    Missing,
}

impl CellValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    /// The numeric reading of the cell, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(v) => write!(f, "{v}"),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Missing => write!(f, "<missing>"),
        }
    }
}

// ---------------------------------------------------------------------------
// Column – one named, homogeneously-typed series
// ---------------------------------------------------------------------------

/// The inferred type of a whole column, derived from its non-missing cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Every non-missing cell is a number.
    Numeric,
    /// Every non-missing cell is a boolean.
    Boolean,
    /// Mixed or textual content.
    Text,
    /// No non-missing cells at all.
    Empty,
}

/// A named column with its cells and inferred type.
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub cells: Vec<CellValue>,
    pub column_type: ColumnType,
}

impl Column {
    /// Build a column, inferring its type from the cells.
    pub fn new(name: impl Into<String>, cells: Vec<CellValue>) -> Self {
        let column_type = infer_column_type(&cells);
        Column {
            name: name.into(),
            cells,
            column_type,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.column_type == ColumnType::Numeric
    }
}

fn infer_column_type(cells: &[CellValue]) -> ColumnType {
    let mut saw_number = false;
    let mut saw_bool = false;
    let mut saw_text = false;
    for cell in cells {
        match cell {
            CellValue::Number(_) => saw_number = true,
            CellValue::Bool(_) => saw_bool = true,
            CellValue::Text(_) => saw_text = true,
            CellValue::Missing => {}
        }
    }
    match (saw_number, saw_bool, saw_text) {
        (true, false, false) => ColumnType::Numeric,
        (false, true, false) => ColumnType::Boolean,
        (false, false, false) => ColumnType::Empty,
        _ => ColumnType::Text,
    }
}

// ---------------------------------------------------------------------------
// Table – the complete loaded dataset
// ---------------------------------------------------------------------------

/// An in-memory table: ordered named columns of equal length.
///
/// Only the loader constructs tables, so the invariants (equal column
/// lengths, unique names) hold everywhere downstream.
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Assemble a table from columns. Callers must have checked name
    /// uniqueness and length alignment; this only records the row count.
    pub(crate) fn from_columns(columns: Vec<Column>) -> Self {
        let row_count = columns.first().map(|c| c.cells.len()).unwrap_or(0);
        debug_assert!(columns.iter().all(|c| c.cells.len() == row_count));
        Table { columns, row_count }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Ordered column names, for the "available columns" prompt.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, index: usize) -> &Column {
        &self.columns[index]
    }

    /// Index of the column with exactly this name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Number of data rows (the header is not a row).
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }
}

// ---------------------------------------------------------------------------
// ColumnRef – a validated column handle
// ---------------------------------------------------------------------------

/// A column reference produced by validation: the name was proven to exist
/// (and, where requested, to be numeric) against a specific table. Ephemeral;
/// recomputed for every plot request.
#[derive(Debug, Clone)]
pub struct ColumnRef {
    pub name: String,
    pub index: usize,
}
