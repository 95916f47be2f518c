use std::borrow::Cow;

use log::warn;

use super::model::{Column, ColumnRef, Table};

// ---------------------------------------------------------------------------
// Missing-value policy
// ---------------------------------------------------------------------------

/// What to do with rows whose selected cells are missing.
///
/// The default is [`DropRows`](NullPolicy::DropRows): plotting a line with
/// silent gaps misleads more than plotting a shorter series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NullPolicy {
    /// Keep every row; only report that missing values were seen.
    WarnOnly,
    /// Remove each row in which any selected column is missing.
    #[default]
    DropRows,
}

impl NullPolicy {
    /// Apply the policy to `table` over the selected `columns`.
    ///
    /// Returns the resulting table and whether any selected cell was a
    /// missing-marker. The input table is never mutated: `WarnOnly` (and a
    /// clean `DropRows` pass) hand the original back borrowed, `DropRows`
    /// with hits builds a reduced copy. The copy can be empty.
    pub fn apply<'t>(self, table: &'t Table, columns: &[ColumnRef]) -> (Cow<'t, Table>, bool) {
        let keep: Vec<bool> = (0..table.row_count())
            .map(|row| {
                columns
                    .iter()
                    .all(|col| !table.column(col.index).cells[row].is_missing())
            })
            .collect();
        let had_missing = keep.iter().any(|&k| !k);

        if !had_missing {
            return (Cow::Borrowed(table), false);
        }

        match self {
            NullPolicy::WarnOnly => {
                warn!("missing values found in the selected columns; keeping all rows");
                (Cow::Borrowed(table), true)
            }
            NullPolicy::DropRows => {
                let dropped = keep.iter().filter(|&&k| !k).count();
                warn!("dropping {dropped} rows with missing values in the selected columns");
                (Cow::Owned(drop_rows(table, &keep)), true)
            }
        }
    }
}

/// Rebuild the table keeping only the flagged rows; every column shrinks in
/// step so the equal-length invariant survives.
fn drop_rows(table: &Table, keep: &[bool]) -> Table {
    let columns = table
        .columns()
        .iter()
        .map(|col| {
            let cells = col
                .cells
                .iter()
                .zip(keep)
                .filter(|(_, &k)| k)
                .map(|(cell, _)| cell.clone())
                .collect();
            Column::new(col.name.clone(), cells)
        })
        .collect();
    Table::from_columns(columns)
}
