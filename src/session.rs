use std::path::Path;

use anyhow::Result;
use log::{debug, error, info};

use crate::console::Prompter;
use crate::data::{validate_column, ColumnRef, ColumnType, NullPolicy, Table};
use crate::error::PlotError;
use crate::render::{normalize_save_name, PlotSpec, Renderer, XSeries};

// ---------------------------------------------------------------------------
// Session outcome & states
// ---------------------------------------------------------------------------

/// How a plot session ended. Both variants are terminal; a new request gets
/// a fresh session.
#[derive(Debug)]
pub enum PlotOutcome {
    Done,
    Rejected(PlotError),
}

/// The phases a session moves through, in order. Tracked for the log trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    AwaitingColumns,
    Validating,
    Cleaning,
    Rendering,
    Saving,
}

// ---------------------------------------------------------------------------
// PlotSession
// ---------------------------------------------------------------------------

/// One complete ask→validate→clean→render→(save) run over a loaded table.
///
/// Every interaction goes through the injected [`Prompter`] and every pixel
/// through the injected [`Renderer`], so the whole flow runs under test.
pub struct PlotSession<'a, P: Prompter, R: Renderer> {
    prompter: &'a mut P,
    renderer: &'a mut R,
    null_policy: NullPolicy,
    state: SessionState,
}

impl<'a, P: Prompter, R: Renderer> PlotSession<'a, P, R> {
    pub fn new(prompter: &'a mut P, renderer: &'a mut R) -> Self {
        PlotSession {
            prompter,
            renderer,
            null_policy: NullPolicy::default(),
            state: SessionState::AwaitingColumns,
        }
    }

    pub fn with_null_policy(mut self, policy: NullPolicy) -> Self {
        self.null_policy = policy;
        self
    }

    fn enter(&mut self, state: SessionState) {
        debug!("session state: {:?} -> {state:?}", self.state);
        self.state = state;
    }

    /// Run the session to one of its terminal outcomes.
    ///
    /// Domain failures end the session as `Rejected`; only genuinely
    /// unexpected conditions (a broken prompt stream) propagate as `Err`
    /// for the application boundary to catch.
    pub fn run(&mut self, table: &Table) -> Result<PlotOutcome> {
        // -- AwaitingColumns --
        self.prompter.say(&format!(
            "Available columns: {}",
            table.column_names().join(", ")
        ));
        let x_name = self.prompter.ask("X column name:")?;
        let y_name = self.prompter.ask("Y column name:")?;
        let title = self.prompter.ask("Plot title:")?;

        // -- Validating --
        // X may be ordinal (dates as text, categories); only Y, the plotted
        // magnitude, must be numeric.
        self.enter(SessionState::Validating);
        let x_col = match validate_column(table, &x_name, false) {
            Ok(col) => col,
            Err(err) => return Ok(self.reject(err)),
        };
        let y_col = match validate_column(table, &y_name, true) {
            Ok(col) => col,
            Err(err) => return Ok(self.reject(err)),
        };

        // -- Cleaning --
        self.enter(SessionState::Cleaning);
        let (cleaned, had_missing) = self
            .null_policy
            .apply(table, &[x_col.clone(), y_col.clone()]);
        if had_missing {
            self.prompter
                .say("Note: the selected columns contain missing values.");
        }
        if cleaned.is_empty() {
            error!("every row was dropped while cleaning missing values");
            return Ok(self.reject(PlotError::NoDataAfterCleaning));
        }

        // -- Rendering --
        self.enter(SessionState::Rendering);
        let spec = build_spec(&cleaned, &x_col, &y_col, title);
        let rendered = match self.renderer.render(&spec) {
            Ok(rendered) => rendered,
            Err(err) => {
                error!("{err}");
                return Ok(self.reject(err));
            }
        };
        info!("rendered '{}' ({} points)", spec.title, spec.y.len());
        self.prompter.say("Plot rendered.");

        // -- Saving (optional) --
        if self.prompter.confirm("Save the plot? (y/n):")? {
            self.enter(SessionState::Saving);
            let raw = self.prompter.ask("Filename to save as:")?;
            let name = normalize_save_name(&raw);
            match self.renderer.persist(&rendered, Path::new(&name)) {
                Ok(()) => {
                    info!("plot saved as {name}");
                    self.prompter.say(&format!("Plot saved as {name}."));
                }
                // The render already succeeded; a failed write is reported
                // but does not reject the session.
                Err(err) => {
                    error!("{err}");
                    self.prompter.say(&format!("Error: {err}"));
                }
            }
        }

        info!("plot session completed");
        Ok(PlotOutcome::Done)
    }

    fn reject(&mut self, err: PlotError) -> PlotOutcome {
        self.prompter.say(&format!("Error: {err}"));
        PlotOutcome::Rejected(err)
    }
}

/// Assemble the renderer input from the cleaned table and validated columns.
fn build_spec(table: &Table, x_col: &ColumnRef, y_col: &ColumnRef, title: String) -> PlotSpec {
    let x_column = table.column(x_col.index);
    let x = if x_column.column_type == ColumnType::Numeric {
        XSeries::Numeric(
            x_column
                .cells
                .iter()
                .map(|c| c.as_f64().unwrap_or(f64::NAN))
                .collect(),
        )
    } else {
        XSeries::Ordinal(x_column.cells.iter().map(|c| c.to_string()).collect())
    };
    let y = table
        .column(y_col.index)
        .cells
        .iter()
        .map(|c| c.as_f64().unwrap_or(f64::NAN))
        .collect();

    PlotSpec {
        title,
        x_label: x_col.name.clone(),
        y_label: y_col.name.clone(),
        x,
        y,
    }
}
