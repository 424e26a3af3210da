//! CSV metrics logger.
//!
//! Persists `(iteration, policy_value, nash_conv)` triples, one record per
//! line with no header, flushed after every write so a plotting process can
//! tail the file mid-run.

use std::fs::File;
use std::io;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writes training metrics as CSV records.
pub struct MetricsLogger {
    writer: BufWriter<File>,
    path: PathBuf,
}

impl MetricsLogger {
    /// Create (truncating) the log file at `path`.
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            path,
        })
    }

    /// Path this logger writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record and flush.
    ///
    /// Write failures are reported on stderr and do not interrupt training.
    pub fn write_record(&mut self, iteration: u64, policy_value: f64, nash_conv: f64) {
        if let Err(err) = self.try_write(iteration, policy_value, nash_conv) {
            eprintln!("metrics log write failed ({}): {err}", self.path.display());
        }
    }

    fn try_write(&mut self, iteration: u64, policy_value: f64, nash_conv: f64) -> io::Result<()> {
        writeln!(self.writer, "{iteration},{policy_value},{nash_conv}")?;
        self.writer.flush()
    }
}
