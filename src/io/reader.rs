//! Input reading: files, memory-mapped when large, and standard input.

// Mapping a file is unsafe; the map is read-only and never outlives a call
#![allow(unsafe_code)]

use crate::error::{IoError, Result};
use memmap2::Mmap;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::str::Utf8Error;
use tracing::debug;

/// Files at least this large (1 MiB) are mapped instead of buffered.
const MMAP_THRESHOLD: u64 = 1 << 20;

/// Largest accepted input file (1 GiB).
const MAX_FILE_SIZE: u64 = 1 << 30;

/// An opened input file whose size is already checked.
///
/// Files of 1 MiB or more are validated as UTF-8 in place through a
/// read-only map; smaller files are read into a buffer.
///
/// # Examples
///
/// ```no_run
/// use ctx_chunker::io::FileReader;
///
/// let reader = FileReader::open("book.txt").unwrap();
/// let text = reader.read_to_string().unwrap();
/// ```
#[derive(Debug)]
pub struct FileReader {
    file: File,
    size: u64,
    path: PathBuf,
}

impl FileReader {
    /// Opens `path` and checks its size.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::FileNotFound`] for a missing file, and
    /// [`IoError::ReadFailed`] if it cannot be opened or exceeds 1 GiB.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => IoError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => read_failed(&path, &e),
        })?;
        let size = file.metadata().map_err(|e| read_failed(&path, &e))?.len();

        if size > MAX_FILE_SIZE {
            return Err(IoError::ReadFailed {
                path: path.display().to_string(),
                reason: format!("{size} bytes exceeds the {MAX_FILE_SIZE} byte limit"),
            }
            .into());
        }

        Ok(Self { file, size, path })
    }

    /// File size in bytes at open time.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Path the file was opened from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole file as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::MmapFailed`] if a large file cannot be mapped and
    /// [`IoError::ReadFailed`] on read failure or invalid UTF-8.
    pub fn read_to_string(&self) -> Result<String> {
        let mapped = self.size >= MMAP_THRESHOLD;
        let text = if mapped {
            self.read_mapped()?
        } else {
            self.read_buffered()?
        };
        debug!(path = %self.path.display(), bytes = self.size, mapped, "read input file");
        Ok(text)
    }

    fn read_mapped(&self) -> Result<String> {
        // SAFETY: the map is read-only and dropped before this returns.
        let map = unsafe { Mmap::map(&self.file) }.map_err(|e| IoError::MmapFailed {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;
        let text = std::str::from_utf8(&map).map_err(|e| self.invalid_utf8(&e))?;
        Ok(text.to_owned())
    }

    fn read_buffered(&self) -> Result<String> {
        let mut bytes = Vec::with_capacity(usize::try_from(self.size).unwrap_or_default());
        (&self.file)
            .read_to_end(&mut bytes)
            .map_err(|e| read_failed(&self.path, &e))?;
        let text = String::from_utf8(bytes).map_err(|e| self.invalid_utf8(&e.utf8_error()))?;
        Ok(text)
    }

    fn invalid_utf8(&self, err: &Utf8Error) -> IoError {
        IoError::ReadFailed {
            path: self.path.display().to_string(),
            reason: format!("invalid UTF-8: {err}"),
        }
    }
}

fn read_failed(path: &Path, err: &std::io::Error) -> IoError {
    IoError::ReadFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Reads a file to string, choosing the read strategy by size.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid UTF-8.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<String> {
    FileReader::open(path)?.read_to_string()
}

/// Reads a file, or standard input when `path` is `None` or `-`.
///
/// # Errors
///
/// Returns an error if the input cannot be read or is not valid UTF-8.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => read_file(path),
        _ => read_stdin(),
    }
}

fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|e| IoError::ReadFailed {
            path: "<stdin>".to_string(),
            reason: e.to_string(),
        })?;
    debug!(bytes = buffer.len(), "read standard input");
    Ok(buffer)
}
