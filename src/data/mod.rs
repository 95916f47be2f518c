/// Data layer: core types, loading, validation, and missing-value handling.
///
/// Architecture:
/// ```text
///  .csv / .xlsx
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │   Table   │  named columns, aligned rows, inferred types
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐   ┌──────────┐
///   │ validate  │   │  nulls    │  column checks / row filtering
///   └──────────┘   └──────────┘
/// ```
pub mod loader;
pub mod model;
pub mod nulls;
pub mod validate;

pub use loader::load_table;
pub use model::{CellValue, Column, ColumnRef, ColumnType, Table};
pub use nulls::NullPolicy;
pub use validate::validate_column;
