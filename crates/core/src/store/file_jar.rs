//! A cookie jar persisted to a text file.
//!
//! One percent-encoded `Set-Cookie` line per cookie. The whole file is
//! rewritten on every change through a temporary file and a rename, so a
//! reader sees either the old jar or the new one.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use cookie::Cookie;
use tracing::{debug, warn};

use super::error::StoreError;
use super::jar::{CookieJar, JarLimits, MemoryJar};

const HEADER: &str = "# expapp cookie jar";

/// Cookie jar backed by a file.
///
/// Two processes sharing one file race; the last write wins.
#[derive(Debug)]
pub struct FileJar {
    path: PathBuf,
    inner: MemoryJar,
}

impl FileJar {
    /// Opens the jar at `path`. A missing file is an empty jar.
    ///
    /// Lines that do not parse, and cookies that break `limits`, are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the file exists but cannot be read.
    pub fn open(path: impl Into<PathBuf>, limits: JarLimits) -> Result<Self, StoreError> {
        let path = path.into();
        let mut inner = MemoryJar::with_limits(limits);

        match fs::read_to_string(&path) {
            Ok(text) => {
                for (index, line) in text.lines().enumerate() {
                    let line = line.trim();
                    if line.is_empty() || line.starts_with('#') {
                        continue;
                    }
                    match Cookie::parse_encoded(line.to_string()) {
                        Ok(cookie) => {
                            if let Err(e) = inner.insert(cookie) {
                                warn!(path = %path.display(), line = index + 1, error = %e, "Dropping cookie from jar file");
                            }
                        }
                        Err(e) => {
                            warn!(path = %path.display(), line = index + 1, error = %e, "Skipping unparsable jar line");
                        }
                    }
                }
                debug!(path = %path.display(), cookies = inner.len(), "Loaded cookie jar");
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "No cookie jar file yet");
            }
            Err(e) => return Err(e.into()),
        }

        Ok(Self { path, inner })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `jar` to disk.
    fn persist(&self, jar: &MemoryJar) -> Result<(), StoreError> {
        let mut text = String::from(HEADER);
        text.push('\n');
        for cookie in jar.iter() {
            text.push_str(&cookie.encoded().to_string());
            text.push('\n');
        }

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, text)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl CookieJar for FileJar {
    fn get(&self, name: &str) -> Option<&Cookie<'static>> {
        self.inner.get(name)
    }

    // Changes are staged on a copy and only kept once they are on disk.

    fn insert(&mut self, cookie: Cookie<'static>) -> Result<(), StoreError> {
        let mut next = self.inner.clone();
        next.insert(cookie)?;
        self.persist(&next)?;
        self.inner = next;
        Ok(())
    }

    fn remove(&mut self, name: &str) -> Result<bool, StoreError> {
        if self.inner.get(name).is_none() {
            return Ok(false);
        }
        let mut next = self.inner.clone();
        next.remove(name)?;
        self.persist(&next)?;
        self.inner = next;
        Ok(true)
    }

    fn names(&self) -> Vec<String> {
        self.inner.names()
    }
}
