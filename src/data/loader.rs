use std::collections::BTreeSet;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use log::{error, info};

use super::model::{CellValue, Column, Table};
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Recognized input formats. Selection is by filename extension alone; file
/// contents are never sniffed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Delimited text with a header row (`.csv`).
    Csv,
    /// Excel workbook, first worksheet (`.xlsx`).
    Xlsx,
}

impl FileFormat {
    fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "csv" => Some(FileFormat::Csv),
            "xlsx" => Some(FileFormat::Xlsx),
            _ => None,
        }
    }
}

/// Load a table from a file.  Dispatch by extension.
///
/// Every attempt leaves one log record: info on success, error on any of the
/// failure paths. A file that parses to zero data rows is a successful load;
/// rejecting it is the caller's decision.
pub fn load_table(path: &Path) -> Result<Table, LoadError> {
    let result = load_inner(path);
    match &result {
        Ok(table) => info!(
            "loaded {} ({} rows, {} columns)",
            path.display(),
            table.row_count(),
            table.columns().len()
        ),
        Err(err) => error!("loading {} failed: {err}", path.display()),
    }
    result
}

fn load_inner(path: &Path) -> Result<Table, LoadError> {
    if !path.is_file() {
        return Err(LoadError::not_found(path));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match FileFormat::from_extension(&ext) {
        Some(FileFormat::Csv) => load_csv(path),
        Some(FileFormat::Xlsx) => load_xlsx(path),
        None => Err(LoadError::unsupported_format(ext)),
    }
}

// ---------------------------------------------------------------------------
// Cell inference
// ---------------------------------------------------------------------------

/// Interpret one raw text field.  Empty fields and the usual NA spellings are
/// missing-markers; the check runs before the numeric parse so "nan" does not
/// become a float.
fn parse_cell(field: &str) -> CellValue {
    let trimmed = field.trim();
    if is_missing_marker(trimmed) {
        return CellValue::Missing;
    }
    if let Ok(v) = trimmed.parse::<f64>() {
        return CellValue::Number(v);
    }
    if trimmed == "true" || trimmed == "false" {
        return CellValue::Bool(trimmed == "true");
    }
    CellValue::Text(trimmed.to_string())
}

fn is_missing_marker(trimmed: &str) -> bool {
    trimmed.is_empty()
        || matches!(
            trimmed.to_ascii_lowercase().as_str(),
            "na" | "n/a" | "nan" | "null"
        )
}

/// Reject duplicate column names so the table invariant holds from birth.
fn check_unique_names(names: &[String]) -> Result<(), LoadError> {
    let mut seen = BTreeSet::new();
    for name in names {
        if !seen.insert(name.as_str()) {
            return Err(LoadError::parse(format!("duplicate column name '{name}'")));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, then data rows of matching
/// arity (ragged rows are a parse error).
fn load_csv(path: &Path) -> Result<Table, LoadError> {
    let mut reader =
        csv::Reader::from_path(path).map_err(|e| LoadError::parse(format!("opening CSV: {e}")))?;

    let names: Vec<String> = reader
        .headers()
        .map_err(|e| LoadError::parse(format!("reading CSV headers: {e}")))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    check_unique_names(&names)?;

    let mut cells: Vec<Vec<CellValue>> = vec![Vec::new(); names.len()];
    for (row_no, record) in reader.records().enumerate() {
        let record = record.map_err(|e| LoadError::parse(format!("CSV row {row_no}: {e}")))?;
        for (col_idx, slot) in cells.iter_mut().enumerate() {
            slot.push(parse_cell(record.get(col_idx).unwrap_or("")));
        }
    }

    Ok(assemble(names, cells))
}

// ---------------------------------------------------------------------------
// XLSX loader
// ---------------------------------------------------------------------------

/// Read the first worksheet of an Excel workbook; the first row is the
/// header. Typed cells keep their types (numbers, booleans, date serials);
/// string cells stay text apart from missing-markers.
fn load_xlsx(path: &Path) -> Result<Table, LoadError> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| LoadError::parse(format!("opening workbook: {e}")))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| LoadError::parse("workbook has no worksheets"))?
        .map_err(|e| LoadError::parse(format!("reading worksheet: {e}")))?;

    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| LoadError::parse("worksheet is empty"))?;

    let names: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let name = cell.to_string().trim().to_string();
            if name.is_empty() {
                format!("column_{}", i + 1)
            } else {
                name
            }
        })
        .collect();
    check_unique_names(&names)?;

    let mut cells: Vec<Vec<CellValue>> = vec![Vec::new(); names.len()];
    for row in rows {
        for (col_idx, slot) in cells.iter_mut().enumerate() {
            slot.push(convert_excel_cell(row.get(col_idx)));
        }
    }

    Ok(assemble(names, cells))
}

fn convert_excel_cell(cell: Option<&Data>) -> CellValue {
    match cell {
        None | Some(Data::Empty) | Some(Data::Error(_)) => CellValue::Missing,
        Some(Data::String(s)) => {
            if is_missing_marker(s.trim()) {
                CellValue::Missing
            } else {
                CellValue::Text(s.trim().to_string())
            }
        }
        Some(Data::Float(v)) => CellValue::Number(*v),
        Some(Data::Int(i)) => CellValue::Number(*i as f64),
        Some(Data::Bool(b)) => CellValue::Bool(*b),
        // Date serials plot fine as numbers; ISO strings stay text.
        Some(Data::DateTime(dt)) => CellValue::Number(dt.as_f64()),
        Some(Data::DateTimeIso(s)) | Some(Data::DurationIso(s)) => CellValue::Text(s.clone()),
    }
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

fn assemble(names: Vec<String>, cells: Vec<Vec<CellValue>>) -> Table {
    let columns = names
        .into_iter()
        .zip(cells)
        .map(|(name, column_cells)| Column::new(name, column_cells))
        .collect();
    Table::from_columns(columns)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::data::model::ColumnType;

    fn csv_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = load_table(Path::new("/no/such/file.csv")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }));
    }

    #[test]
    fn unrecognized_extension_rejected_without_reading() {
        // Garbage contents: the extension check must fire before any parse.
        let mut file = tempfile::Builder::new()
            .suffix(".txt")
            .tempfile()
            .unwrap();
        file.write_all(b"\x00\x01\x02 not a table").unwrap();
        let err = load_table(file.path()).unwrap_err();
        match err {
            LoadError::UnsupportedFormat { extension } => assert_eq!(extension, "txt"),
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }

    #[test]
    fn well_formed_csv_loads() {
        let file = csv_file("a,b\n1,2\n3,4\n");
        let table = load_table(file.path()).unwrap();
        assert_eq!(table.column_names(), vec!["a", "b"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column(0).cells[1], CellValue::Number(3.0));
        assert!(table.column(1).is_numeric());
    }

    #[test]
    fn header_only_csv_is_an_empty_table_not_an_error() {
        let file = csv_file("a,b\n");
        let table = load_table(file.path()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.column_names(), vec!["a", "b"]);
    }

    #[test]
    fn ragged_row_is_a_parse_error() {
        let file = csv_file("a,b\n1,2\n3\n");
        let err = load_table(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::ParseError { .. }));
    }

    #[test]
    fn duplicate_header_is_a_parse_error() {
        let file = csv_file("a,a\n1,2\n");
        let err = load_table(file.path()).unwrap_err();
        match err {
            LoadError::ParseError { detail } => assert!(detail.contains("duplicate")),
            other => panic!("expected ParseError, got {other:?}"),
        }
    }

    #[test]
    fn empty_fields_and_na_spellings_are_missing() {
        let file = csv_file("a,b\n1,\n2,NA\n3,nan\n4,5\n");
        let table = load_table(file.path()).unwrap();
        let b = table.column(1);
        assert_eq!(b.cells[0], CellValue::Missing);
        assert_eq!(b.cells[1], CellValue::Missing);
        assert_eq!(b.cells[2], CellValue::Missing);
        assert_eq!(b.cells[3], CellValue::Number(5.0));
        // Missing cells do not break numeric inference.
        assert_eq!(b.column_type, ColumnType::Numeric);
    }

    #[test]
    fn text_and_bool_cells_inferred() {
        let file = csv_file("label,flag\nmon,true\ntue,false\n");
        let table = load_table(file.path()).unwrap();
        assert_eq!(table.column(0).column_type, ColumnType::Text);
        assert_eq!(table.column(1).column_type, ColumnType::Boolean);
    }
}
