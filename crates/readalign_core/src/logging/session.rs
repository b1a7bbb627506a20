//! Per-session edit logger with file and callback output.
//!
//! Each editing session gets its own logger that:
//! - Writes an audit trail of applied edits to a dedicated log file
//! - Sends lines to a UI callback (if provided)
//! - Maintains a tail buffer of recent lines for display

use std::collections::VecDeque;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use parking_lot::Mutex;

use super::types::{LogConfig, LogLevel, UiLogCallback};

/// Per-session logger with dual output (file + UI).
pub struct SessionLogger {
    /// Session name for identification (usually the chapter).
    session_name: String,
    /// Path to the log file.
    log_path: PathBuf,
    /// File writer (buffered).
    file_writer: Mutex<BufWriter<File>>,
    /// UI callback for mirroring lines.
    ui_callback: Mutex<Option<UiLogCallback>>,
    /// Logging configuration.
    config: LogConfig,
    /// Recent lines, newest last.
    tail_buffer: Mutex<VecDeque<String>>,
}

impl SessionLogger {
    /// Create a new session logger.
    ///
    /// # Arguments
    /// * `session_name` - Name of the session (used in the log filename)
    /// * `log_dir` - Directory to write the log file to
    /// * `config` - Logging configuration
    /// * `ui_callback` - Optional callback for UI output
    pub fn new(
        session_name: impl Into<String>,
        log_dir: impl AsRef<Path>,
        config: LogConfig,
        ui_callback: Option<UiLogCallback>,
    ) -> std::io::Result<Self> {
        let session_name = session_name.into();
        let log_dir = log_dir.as_ref();

        fs::create_dir_all(log_dir)?;

        let log_path = log_dir.join(format!("{}.log", sanitize_filename(&session_name)));
        let file = File::create(&log_path)?;

        Ok(Self {
            session_name,
            log_path,
            file_writer: Mutex::new(BufWriter::new(file)),
            ui_callback: Mutex::new(ui_callback),
            config,
            tail_buffer: Mutex::new(VecDeque::new()),
        })
    }

    /// Get the session name.
    pub fn session_name(&self) -> &str {
        &self.session_name
    }

    /// Get the log file path.
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Log a message at the specified level.
    pub fn log(&self, level: LogLevel, message: &str) {
        if level < self.config.level {
            return;
        }

        let line = if self.config.show_timestamps {
            format!("[{}] {}", Local::now().format("%H:%M:%S"), message)
        } else {
            message.to_string()
        };

        self.output(&line);
    }

    /// Log an info message.
    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    /// Log a warning.
    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, &format!("[WARNING] {}", message));
    }

    /// Log an error.
    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, &format!("[ERROR] {}", message));
    }

    /// Record an applied edit operation.
    ///
    /// The audit trail entry form: `edit: <description>`.
    pub fn edit(&self, description: &str) {
        self.log(LogLevel::Info, &format!("edit: {}", description));
    }

    /// Recent log lines, oldest first.
    pub fn tail(&self) -> Vec<String> {
        self.tail_buffer.lock().iter().cloned().collect()
    }

    /// Flush buffered output to disk.
    pub fn flush(&self) -> std::io::Result<()> {
        self.file_writer.lock().flush()
    }

    fn output(&self, line: &str) {
        {
            let mut writer = self.file_writer.lock();
            let _ = writeln!(writer, "{}", line);
        }

        {
            let mut tail = self.tail_buffer.lock();
            tail.push_back(line.to_string());
            while tail.len() > self.config.tail_lines {
                tail.pop_front();
            }
        }

        if let Some(callback) = self.ui_callback.lock().as_ref() {
            callback(line);
        }
    }
}

impl Drop for SessionLogger {
    fn drop(&mut self) {
        let _ = self.file_writer.lock().flush();
    }
}

/// Replace filesystem-hostile characters in a session name.
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .collect()
}
