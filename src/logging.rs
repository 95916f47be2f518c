use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use log::Level;

/// Default event-log file, created in the working directory.
pub const LOG_FILE: &str = "tabplot.log";

/// Target reserved for top-boundary failures; the formatter turns it into
/// the CRITICAL severity.
const CRITICAL_TARGET: &str = "tabplot::critical";

/// Install the process-wide file logger. Called exactly once by `main`;
/// everything else only uses the `log` macros.
///
/// One line per event, appended, never truncated or rotated:
/// `<timestamp> - <SEVERITY> - <message>` with severities
/// INFO / WARNING / ERROR / CRITICAL.
pub fn init(path: &Path) -> anyhow::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format(|buf, record| {
            let severity = if record.target() == CRITICAL_TARGET {
                "CRITICAL"
            } else {
                match record.level() {
                    Level::Warn => "WARNING",
                    level => level.as_str(),
                }
            };
            writeln!(
                buf,
                "{} - {} - {}",
                buf.timestamp_seconds(),
                severity,
                record.args()
            )
        })
        .try_init()?;
    Ok(())
}

/// Record an unexpected top-boundary failure at the highest severity.
pub fn critical(message: &str) {
    log::error!(target: CRITICAL_TARGET, "{message}");
}
