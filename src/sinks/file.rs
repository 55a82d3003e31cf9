//! File sink with counter-based rotation
//!
//! In fixed-path mode every line is appended to one file. With a
//! [`FileNameFormatter`] the sink starts on the first free name the template
//! produces and, when rotation is enabled, moves to a new file whenever the
//! template would produce a different path (for example after the date in it
//! changes). Rotation never reopens or truncates an existing file.

use crate::core::{Log, LogEntry, LogError, LogLevel, Result};
use crate::format::{FileNameFormatter, TextFormatter};
use parking_lot::RwLock;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

enum Naming {
    Fixed,
    Template {
        names: FileNameFormatter,
        rotate: bool,
    },
}

struct FileState {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
}

pub struct FileSink {
    level: LogLevel,
    formatter: TextFormatter,
    naming: Naming,
    state: RwLock<FileState>,
}

fn create_parent_dirs(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                LogError::io_operation(
                    "create log directory",
                    format!("Failed to create directory '{}'", parent.display()),
                    e,
                )
            })?;
        }
    }
    Ok(())
}

impl FileSink {
    /// Append to a single file, creating it and its directories if needed
    pub fn new(level: LogLevel, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        create_parent_dirs(&path)?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LogError::file_sink(path.display().to_string(), format!("Failed to open: {}", e))
            })?;

        Ok(Self {
            level,
            formatter: TextFormatter::default_layout(),
            naming: Naming::Fixed,
            state: RwLock::new(FileState {
                path,
                writer: Some(BufWriter::new(file)),
            }),
        })
    }

    /// Write to files named by `names`
    ///
    /// The first file is the first name the template yields that does not
    /// exist yet. With `rotate` set, the sink moves to a new file whenever the
    /// template's current output differs from the open path.
    pub fn with_names(level: LogLevel, names: FileNameFormatter, rotate: bool) -> Result<Self> {
        let (path, file) = Self::open_next(&names)?;
        Ok(Self {
            level,
            formatter: TextFormatter::default_layout(),
            naming: Naming::Template { names, rotate },
            state: RwLock::new(FileState {
                path,
                writer: Some(BufWriter::new(file)),
            }),
        })
    }

    #[must_use]
    pub fn with_formatter(mut self, formatter: TextFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Path currently written to
    pub fn path(&self) -> PathBuf {
        self.state.read().path.clone()
    }

    /// Commit the next free name and create it exclusively
    fn open_next(names: &FileNameFormatter) -> Result<(PathBuf, File)> {
        loop {
            let path = names.commit()?;
            create_parent_dirs(&path)?;
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => return Ok((path, file)),
                // Another writer took the name between commit and open
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(e) => {
                    return Err(LogError::file_rotation(
                        path.display().to_string(),
                        format!("Failed to create: {}", e),
                    ))
                }
            }
        }
    }

    fn rotate_if_needed(&self) -> Result<()> {
        let (names, rotate) = match &self.naming {
            Naming::Template { names, rotate } => (names, *rotate),
            Naming::Fixed => return Ok(()),
        };
        if !rotate {
            return Ok(());
        }

        if names.peek()? == self.state.read().path {
            return Ok(());
        }

        let mut state = self.state.write();
        // Another thread may have rotated while we waited for the lock
        if names.peek()? == state.path {
            return Ok(());
        }

        if let Some(mut writer) = state.writer.take() {
            writer.flush().map_err(|e| {
                LogError::file_rotation(
                    state.path.display().to_string(),
                    format!("Failed to flush before rotation: {}", e),
                )
            })?;
        }

        names.reset_counters();
        let (path, file) = Self::open_next(names)?;
        state.path = path;
        state.writer = Some(BufWriter::new(file));
        Ok(())
    }
}

impl Log for FileSink {
    fn level(&self) -> LogLevel {
        self.level
    }

    fn write(&self, entry: &LogEntry) -> Result<()> {
        let mut line = self.formatter.format(entry)?;
        line.push('\n');

        self.rotate_if_needed()?;

        let mut state = self.state.write();
        let FileState { path, writer } = &mut *state;
        let writer = writer
            .as_mut()
            .ok_or_else(|| LogError::file_sink(path.display().to_string(), "No open file"))?;

        writer
            .write_all(line.as_bytes())
            .and_then(|_| writer.flush())
            .map_err(|e| {
                LogError::file_sink(
                    path.display().to_string(),
                    format!("Failed to write log entry: {}", e),
                )
            })
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        if let Some(mut writer) = self.state.get_mut().writer.take() {
            if let Err(e) = writer.flush() {
                eprintln!("[LOGGER ERROR] Failed to flush log file on drop: {}", e);
            }
        }
    }
}
