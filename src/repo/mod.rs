//! A repository that stores content on the local file system.
//!
//! A `Repository` is the handle every other subsystem starts from: it knows
//! the working directory, the `.git` directory inside it, and the parsed
//! `config`. Obtain one with [`Repository::open`] (a known work dir),
//! [`Repository::find`] (search upward from some directory), or
//! [`Repository::init`] (create a new, empty repository).
//!
//! It intentionally uses the same `.git` folder layout as command-line git.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::Config;

mod error;
pub use error::{Error, Result};

mod find;
mod init;

mod resolver;
pub use resolver::PathResolver;

/// Name of the control directory inside a work dir.
pub const GIT_DIR_NAME: &str = ".git";

/// Only `core.repositoryformatversion` this crate understands.
pub const SUPPORTED_FORMAT_VERSION: &str = "0";

const CONFIG_FILE: &str = "config";

/// A git repository bound to a directory on the local file system.
#[derive(Clone, Debug)]
pub struct Repository {
    work_dir: PathBuf,
    paths: PathResolver,
    config: Config,
}

impl Repository {
    /// Bind to the existing repository whose top-level working directory
    /// is `work_dir`.
    ///
    /// The `.git` directory and its `config` file must exist, and the config
    /// must declare a supported `repositoryformatversion`.
    pub fn open<P: AsRef<Path>>(work_dir: P) -> Result<Self> {
        let work_dir = absolute(work_dir.as_ref())?;
        let git_dir = work_dir.join(GIT_DIR_NAME);

        match fs::metadata(&git_dir) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return Err(Error::PathConflict(git_dir)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(Error::NotARepository(work_dir));
            }
            Err(err) => return Err(err.into()),
        }

        let paths = PathResolver::new(git_dir);

        let config_path = paths
            .resolve_file(CONFIG_FILE, false)?
            .filter(|path| path.is_file())
            .ok_or_else(|| Error::ConfigMissing(paths.resolve_path(CONFIG_FILE)))?;

        // A config we aren't allowed to read is as good as no config.
        let config = Config::load(&config_path).map_err(|err| match err {
            Error::IoError(ref io_err) if io_err.kind() == io::ErrorKind::PermissionDenied => {
                Error::ConfigMissing(config_path.clone())
            }
            err => err,
        })?;
        check_format_version(&config)?;

        tracing::debug!(work_dir = %work_dir.display(), "Opened repository");

        Ok(Repository {
            work_dir,
            paths,
            config,
        })
    }

    // A handle whose `.git` directory doesn't necessarily exist yet.
    // Only used as the first step of `init`.
    pub(crate) fn force_new(work_dir: PathBuf) -> Self {
        let paths = PathResolver::new(work_dir.join(GIT_DIR_NAME));

        Repository {
            work_dir,
            paths,
            config: Config::new(),
        }
    }

    /// Return the working directory for this repo.
    pub fn work_dir(&self) -> &Path {
        self.work_dir.as_path()
    }

    /// Return the path to the `.git` directory.
    pub fn git_dir(&self) -> &Path {
        self.paths.git_dir()
    }

    /// Return the config as it was when the repository was opened.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// See [`PathResolver::resolve_path`].
    pub fn resolve_path<P: AsRef<Path>>(&self, relative: P) -> PathBuf {
        self.paths.resolve_path(relative)
    }

    /// See [`PathResolver::resolve_file`].
    pub fn resolve_file<P: AsRef<Path>>(&self, relative: P, create: bool) -> Result<Option<PathBuf>> {
        self.paths.resolve_file(relative, create)
    }

    /// See [`PathResolver::resolve_dir`].
    pub fn resolve_dir<P: AsRef<Path>>(&self, relative: P, create: bool) -> Result<Option<PathBuf>> {
        self.paths.resolve_dir(relative, create)
    }
}

fn check_format_version(config: &Config) -> Result<()> {
    match config.format_version() {
        Some(SUPPORTED_FORMAT_VERSION) => Ok(()),
        other => Err(Error::UnsupportedFormatVersion(other.map(String::from))),
    }
}

// Lexically anchor a relative path at the current directory.
fn absolute(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(env::current_dir()?.join(path))
    }
}

#[cfg(test)]
mod tests;
