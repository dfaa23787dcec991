//! Environment and filesystem capabilities
//!
//! Credential resolution and attribute defaults read process-wide state.
//! These traits let callers inject that state instead, so the rest of the
//! crate never touches `std::env` or the filesystem directly.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

/// Lookup of environment variables
pub trait EnvLookup: Send + Sync {
    /// Get the value of a variable, or `None` if it is unset
    fn var(&self, name: &str) -> Option<String>;

    /// Get a variable, treating an empty value as unset
    fn non_empty(&self, name: &str) -> Option<String> {
        self.var(name).filter(|v| !v.is_empty())
    }
}

/// Reader for credential files
pub trait FileReader: Send + Sync {
    /// Read an entire file as UTF-8 text
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// The real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// The real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsReader;

impl FileReader for FsReader {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// Fixed, in-memory environment
#[derive(Debug, Clone, Default)]
pub struct StaticEnv {
    vars: HashMap<String, String>,
}

impl StaticEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable (builder style)
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.vars.insert(name.to_string(), value.to_string());
        self
    }
}

impl EnvLookup for StaticEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

impl<const N: usize> From<[(&str, &str); N]> for StaticEnv {
    fn from(pairs: [(&str, &str); N]) -> Self {
        pairs
            .into_iter()
            .fold(Self::new(), |env, (name, value)| env.with(name, value))
    }
}

/// Fixed, in-memory set of files.
///
/// Reading a path that was never added fails with `NotFound`.
#[derive(Debug, Clone, Default)]
pub struct StaticFiles {
    files: HashMap<PathBuf, String>,
}

impl StaticFiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file (builder style)
    pub fn with(mut self, path: impl Into<PathBuf>, contents: &str) -> Self {
        self.files.insert(path.into(), contents.to_string());
        self
    }
}

impl FileReader for StaticFiles {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such file: {}", path.display()),
            )
        })
    }
}
