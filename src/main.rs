mod app;
mod console;
mod data;
mod error;
mod logging;
mod render;
mod session;

use std::path::Path;
use std::process::ExitCode;

use console::StdPrompter;
use render::BitmapRenderer;

fn main() -> ExitCode {
    // The log file is diagnostic only; if it cannot be opened the tool still
    // runs, it just says so.
    if let Err(err) = logging::init(Path::new(logging::LOG_FILE)) {
        eprintln!("warning: could not open {}: {err}", logging::LOG_FILE);
    }

    let mut prompter = StdPrompter;
    let mut renderer = BitmapRenderer::default();

    match app::run(&mut prompter, &mut renderer) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            logging::critical(&format!("unexpected failure: {err:#}"));
            println!(
                "An unexpected error occurred; see {} for details.",
                logging::LOG_FILE
            );
            ExitCode::from(1)
        }
    }
}
