use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Load failures (file → Table)
// ---------------------------------------------------------------------------

/// Everything that can go wrong between a path and an in-memory [`Table`].
///
/// [`Table`]: crate::data::Table
#[derive(Debug, Error)]
pub enum LoadError {
    /// The path does not resolve to an existing file.
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The file extension is outside the recognized set.
    #[error("unsupported file format: .{extension} (supported: .csv, .xlsx)")]
    UnsupportedFormat { extension: String },

    /// The underlying reader failed; `detail` carries its message.
    #[error("failed to parse file: {detail}")]
    ParseError { detail: String },
}

impl LoadError {
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    pub fn unsupported_format(extension: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            extension: extension.into(),
        }
    }

    pub fn parse(detail: impl Into<String>) -> Self {
        Self::ParseError {
            detail: detail.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Plot-session failures (Table → rendered chart)
// ---------------------------------------------------------------------------

/// Failures raised while validating, cleaning, rendering or saving a plot.
#[derive(Debug, Error)]
pub enum PlotError {
    /// The requested column name is not in the table (exact match).
    #[error("column '{name}' not found in the data")]
    ColumnMissing { name: String },

    /// The column exists but holds non-numeric values where numbers are required.
    #[error("column '{name}' is not numeric")]
    ColumnNotNumeric { name: String },

    /// Dropping missing-value rows left nothing to plot.
    #[error("no rows left to plot after removing missing values")]
    NoDataAfterCleaning,

    /// The chart renderer failed; not retried.
    #[error("failed to render the plot: {detail}")]
    RenderFailure { detail: String },

    /// The image could not be written; the render itself already succeeded.
    #[error("failed to save the plot: {detail}")]
    SaveFailure { detail: String },
}

impl PlotError {
    pub fn column_missing(name: impl Into<String>) -> Self {
        Self::ColumnMissing { name: name.into() }
    }

    pub fn column_not_numeric(name: impl Into<String>) -> Self {
        Self::ColumnNotNumeric { name: name.into() }
    }

    pub fn render(detail: impl Into<String>) -> Self {
        Self::RenderFailure {
            detail: detail.into(),
        }
    }

    pub fn save(detail: impl Into<String>) -> Self {
        Self::SaveFailure {
            detail: detail.into(),
        }
    }
}
