use std::path::Path;

use anyhow::Result;
use log::{error, info};

use crate::console::Prompter;
use crate::data::load_table;
use crate::render::Renderer;
use crate::session::{PlotOutcome, PlotSession};

/// Top-level interactive flow: ask for a path, load the table, hand it to a
/// plot session. Returns the process exit code (0 on a completed plot, 1 on
/// any reported failure).
///
/// Only unexpected conditions (a broken prompt stream) come back as `Err`;
/// `main` converts those into a CRITICAL log record and a generic message.
pub fn run<P: Prompter, R: Renderer>(prompter: &mut P, renderer: &mut R) -> Result<u8> {
    info!("program started");

    let raw_path = prompter.ask("Path to the data file:")?;
    if raw_path.is_empty() {
        error!("no path given");
        prompter.say("Error: no path given.");
        return Ok(1);
    }

    let table = match load_table(Path::new(&raw_path)) {
        Ok(table) => table,
        // The loader already logged the failure; just tell the user.
        Err(err) => {
            prompter.say(&format!("Error: {err}"));
            return Ok(1);
        }
    };

    if table.is_empty() {
        error!("{raw_path} parsed successfully but contains no data rows");
        prompter.say("Error: the file contains no data rows.");
        return Ok(1);
    }

    let outcome = PlotSession::new(prompter, renderer).run(&table)?;
    info!("program finished");
    Ok(match outcome {
        PlotOutcome::Done => 0,
        PlotOutcome::Rejected(_) => 1,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;

    use super::*;
    use crate::console::ScriptedPrompter;
    use crate::render::RecordingRenderer;

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
    fn blank_path_fails_cleanly() {
        let mut prompter = ScriptedPrompter::with_answers(&[""]);
        let mut renderer = RecordingRenderer::default();
        assert_eq!(run(&mut prompter, &mut renderer).unwrap(), 1);
        assert_eq!(renderer.render_calls, 0);
    }

    #[test]
    fn missing_file_is_reported_not_crashed() {
        let mut prompter = ScriptedPrompter::with_answers(&["/no/such/data.csv"]);
        let mut renderer = RecordingRenderer::default();
        assert_eq!(run(&mut prompter, &mut renderer).unwrap(), 1);
        assert!(prompter
            .transcript
            .iter()
            .any(|line| line.contains("not found")));
    }

    #[test]
    fn header_only_file_is_an_empty_table() {
        let file = csv_file("x,y\n");
        let answers = [file.path().to_str().unwrap()];
        let mut prompter = ScriptedPrompter::with_answers(&answers);
        let mut renderer = RecordingRenderer::default();
        assert_eq!(run(&mut prompter, &mut renderer).unwrap(), 1);
        assert!(prompter
            .transcript
            .iter()
            .any(|line| line.contains("no data rows")));
        assert_eq!(renderer.render_calls, 0);
    }

    #[test]
    fn full_flow_from_csv_to_saved_plot() {
        let file = csv_file("x,y\n1,10\n2,20\n3,30\n");
        let path = file.path().to_str().unwrap();
        let answers = [path, "x", "y", "Readings", "y", "readings"];
        let mut prompter = ScriptedPrompter::with_answers(&answers);
        let mut renderer = RecordingRenderer::default();

        assert_eq!(run(&mut prompter, &mut renderer).unwrap(), 0);
        assert_eq!(renderer.render_calls, 1);
        assert_eq!(renderer.persist_calls, vec![PathBuf::from("readings.png")]);
    }

    #[test]
    fn declined_save_never_persists() {
        let file = csv_file("x,y\n1,10\n2,20\n3,30\n");
        let path = file.path().to_str().unwrap();
        let answers = [path, "x", "y", "Readings", "n"];
        let mut prompter = ScriptedPrompter::with_answers(&answers);
        let mut renderer = RecordingRenderer::default();

        assert_eq!(run(&mut prompter, &mut renderer).unwrap(), 0);
        assert_eq!(renderer.render_calls, 1);
        assert!(renderer.persist_calls.is_empty());
    }
}
