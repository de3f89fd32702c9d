//! Log setup
//!
//! Every record goes to stderr and is appended to a log file, both with the
//! same `timestamp [LEVEL]  message` layout.

use eyre::{Context, Result};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Default log file, relative to the working directory
pub const DEFAULT_LOG_FILE: &str = "harness_migration.log";

/// Writer duplicating everything to stderr and a file
#[derive(Debug)]
pub struct TeeWriter {
    file: File,
}

impl TeeWriter {
    /// Open `path` in append mode, creating it when missing
    pub fn append(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file: {}", path.display()))?;
        Ok(Self { file })
    }
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        self.file.flush()
    }
}

/// Install the global logger
///
/// The level is `info`, or `debug` with `debug` set; `LOG_LEVEL` overrides both.
pub fn init(debug: bool, log_file: impl AsRef<Path>) -> Result<()> {
    let log_level = match debug {
        true => "debug",
        false => "info",
    };
    let env = env_logger::Env::default().filter_or("LOG_LEVEL", log_level);

    env_logger::Builder::from_env(env)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{:<7.7}]  {}",
                buf.timestamp_millis(),
                record.level(),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(TeeWriter::append(log_file)?)))
        .try_init()
        .context("Failed to initialize logger")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_tee_writer_appends() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(DEFAULT_LOG_FILE);
        std::fs::write(&path, "previous run\n").unwrap();

        let mut writer = TeeWriter::append(&path).unwrap();
        writer.write_all(b"this run\n").unwrap();
        writer.flush().unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "previous run\nthis run\n"
        );
    }

    #[test]
    fn test_tee_writer_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let result = TeeWriter::append(temp_dir.path().join("nope").join("x.log"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to open log file"));
    }
}
