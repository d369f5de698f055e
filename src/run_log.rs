//! Append-only CSV run log with two record shapes: free-text messages and
//! per-file processing summaries. One log file per day; the header is written
//! once, by whichever shape appends first.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{SecondsFormat, Utc};

use crate::error::Result;

const MESSAGE_HEADER: &str = "TimestampUTC,Level,Message";
const SUMMARY_HEADER: &str = "Date,Time,Input,Output,Archive,Rows,Duplicates";

pub struct RunLog {
    // Lock spans the whole append so concurrent writers cannot interleave
    // partial lines.
    inner: Mutex<RunLogInner>,
}

struct RunLogInner {
    path: PathBuf,
    header_written: bool,
}

impl RunLog {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        let path = dir
            .as_ref()
            .join(format!("run-log-{}.csv", Utc::now().format("%Y%m%d")));
        Self {
            inner: Mutex::new(RunLogInner {
                path,
                header_written: false,
            }),
        }
    }

    /// Free-text record: `(timestampUTC, level, message)`.
    pub fn message(&self, level: &str, message: &str) -> Result<()> {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
        let line = format!("{timestamp},{},{}", escape(level), escape(message));
        self.append(MESSAGE_HEADER, &line)
    }

    /// Per-file summary record: one line per successfully processed input file.
    pub fn summary(
        &self,
        input: &str,
        output: &str,
        archive: &str,
        rows_read: usize,
        duplicates: usize,
    ) -> Result<()> {
        let now = Utc::now();
        let line = format!(
            "{},{},{},{},{},{},{}",
            now.format("%Y-%m-%d"),
            now.format("%I:%M %p"),
            escape(input),
            escape(output),
            escape(archive),
            escape(&rows_read.to_string()),
            escape(&duplicates.to_string()),
        );
        self.append(SUMMARY_HEADER, &line)
    }

    pub fn path(&self) -> PathBuf {
        self.inner.lock().unwrap().path.clone()
    }

    fn append(&self, header: &str, line: &str) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();

        if let Some(parent) = inner.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let needs_header = !inner.header_written
            && inner
                .path
                .metadata()
                .map(|m| m.len() == 0)
                .unwrap_or(true);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&inner.path)?;
        if needs_header {
            writeln!(file, "{header}")?;
        }
        writeln!(file, "{line}")?;
        inner.header_written = true;

        Ok(())
    }
}

fn escape(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}
