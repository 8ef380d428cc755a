use env_logger::{Builder, Env, Target};
use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;

/// Environment variable that overrides the configured log filter
pub const LOG_ENV: &str = "VERSE_TRAINER_LOG";

/// Send log records to `path`. The terminal belongs to the TUI, so nothing
/// is ever written to stdout or stderr.
pub fn init(path: &Path, default_filter: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;

    Builder::from_env(Env::default().filter_or(LOG_ENV, default_filter))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .map_err(io::Error::other)
}
