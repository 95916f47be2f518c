use log::error;

use super::model::{ColumnRef, Table};
use crate::error::PlotError;

/// Check that `name` refers to a column of `table`, and that the column is
/// numeric when the caller requires it.
///
/// Matching is exact and case-sensitive. Non-numeric columns (text, boolean,
/// all-missing) are rejected rather than coerced when numbers are required.
/// Pure apart from logging the rejection reason.
pub fn validate_column(
    table: &Table,
    name: &str,
    require_numeric: bool,
) -> Result<ColumnRef, PlotError> {
    let Some(index) = table.column_index(name) else {
        error!("column '{name}' not found in the data");
        return Err(PlotError::column_missing(name));
    };

    if require_numeric && !table.column(index).is_numeric() {
        error!("column '{name}' is not numeric");
        return Err(PlotError::column_not_numeric(name));
    }

    Ok(ColumnRef {
        name: name.to_string(),
        index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{CellValue, Column};

    fn sample_table() -> Table {
        Table::from_columns(vec![
            Column::new(
                "a",
                vec![
                    CellValue::Text("one".into()),
                    CellValue::Text("two".into()),
                ],
            ),
            Column::new("b", vec![CellValue::Number(1.0), CellValue::Number(2.0)]),
            Column::new("flag", vec![CellValue::Bool(true), CellValue::Bool(false)]),
        ])
    }

    #[test]
    fn unknown_column_is_missing() {
        let table = sample_table();
        let err = validate_column(&table, "z", false).unwrap_err();
        assert!(matches!(err, PlotError::ColumnMissing { .. }));
    }

    #[test]
    fn text_column_rejected_when_numbers_required() {
        let table = sample_table();
        let err = validate_column(&table, "a", true).unwrap_err();
        match err {
            PlotError::ColumnNotNumeric { name } => assert_eq!(name, "a"),
            other => panic!("expected ColumnNotNumeric, got {other:?}"),
        }
    }

    #[test]
    fn boolean_column_rejected_when_numbers_required() {
        let table = sample_table();
        let err = validate_column(&table, "flag", true).unwrap_err();
        assert!(matches!(err, PlotError::ColumnNotNumeric { .. }));
    }

    #[test]
    fn text_column_accepted_without_numeric_requirement() {
        let table = sample_table();
        let col = validate_column(&table, "a", false).unwrap();
        assert_eq!(col.index, 0);
        assert_eq!(col.name, "a");
    }

    #[test]
    fn numeric_column_accepted() {
        let table = sample_table();
        let col = validate_column(&table, "b", true).unwrap();
        assert_eq!(col.index, 1);
    }
}
