use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use super::{Error, Result};

/// Computes paths under a repository's `.git` directory and, on request,
/// makes sure the directories along the way exist.
///
/// Other subsystems (object store, refs, index) locate their files
/// exclusively through this type.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PathResolver {
    git_dir: PathBuf,
}

impl PathResolver {
    pub(crate) fn new(git_dir: PathBuf) -> PathResolver {
        PathResolver { git_dir }
    }

    /// Return the `.git` directory all paths are resolved against.
    pub fn git_dir(&self) -> &Path {
        self.git_dir.as_path()
    }

    /// Join `relative` onto the `.git` directory. Performs no I/O.
    pub fn resolve_path<P: AsRef<Path>>(&self, relative: P) -> PathBuf {
        self.git_dir.join(relative)
    }

    /// Resolve the path to a file under the `.git` directory.
    ///
    /// The file's parent directory goes through [`resolve_dir`](Self::resolve_dir):
    /// returns `Ok(None)` if it is missing and `create` is false, and creates it
    /// otherwise. The file itself is neither created nor checked.
    pub fn resolve_file<P: AsRef<Path>>(&self, relative: P, create: bool) -> Result<Option<PathBuf>> {
        let relative = relative.as_ref();
        check_relative(relative)?;

        let parent = relative.parent().unwrap_or_else(|| Path::new(""));

        Ok(self
            .resolve_dir(parent, create)?
            .map(|_| self.resolve_path(relative)))
    }

    /// Resolve the path to a directory under the `.git` directory.
    ///
    /// * Existing directory: `Ok(Some(path))`.
    /// * Missing, `create` true: the whole chain is created, `Ok(Some(path))`.
    /// * Missing, `create` false: `Ok(None)`.
    /// * The path, or any existing segment leading to it, is something
    ///   other than a directory: `Error::PathConflict`.
    pub fn resolve_dir<P: AsRef<Path>>(&self, relative: P, create: bool) -> Result<Option<PathBuf>> {
        let relative = relative.as_ref();
        check_relative(relative)?;

        let path = self.resolve_path(relative);

        if !self.check_segments(relative)? {
            return Ok(Some(path));
        }

        if create {
            tracing::trace!(path = %path.display(), "Creating directory");
            fs::create_dir_all(&path)?;
            Ok(Some(path))
        } else {
            Ok(None)
        }
    }

    // Walks from the `.git` directory down to `relative`, failing on the first
    // segment that exists but isn't a directory. Returns true if some segment
    // (and therefore the target) is missing.
    fn check_segments(&self, relative: &Path) -> Result<bool> {
        let mut path = self.git_dir.clone();
        if is_missing_dir(&path)? {
            return Ok(true);
        }

        for component in relative.components() {
            if let Component::Normal(segment) = component {
                path.push(segment);
                if is_missing_dir(&path)? {
                    return Ok(true);
                }
            }
        }

        Ok(false)
    }
}

// True if nothing exists at `path`, false if a directory does.
fn is_missing_dir(path: &Path) -> Result<bool> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(false),
        Ok(_) => Err(Error::PathConflict(path.to_path_buf())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(true),
        Err(err) => Err(err.into()),
    }
}

fn check_relative(relative: &Path) -> Result<()> {
    let escapes = relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));

    if escapes {
        Err(Error::PathOutsideGitDir(relative.to_path_buf()))
    } else {
        Ok(())
    }
}
