use std::env;
use std::path::Path;

use super::{absolute, Error, Repository, Result, GIT_DIR_NAME};

impl Repository {
    /// Discover the repository enclosing `start`.
    ///
    /// Looks for a `.git` entry in `start` and then in each parent directory
    /// in turn, stopping at the filesystem root. The first one found is
    /// opened with [`Repository::open`]; a `.git` that can't be opened is an
    /// error rather than a reason to keep looking.
    ///
    /// Returns `Ok(None)` if no directory up to the root has a `.git` entry.
    /// `start` must exist, since it is canonicalized first.
    pub fn find<P: AsRef<Path>>(start: P) -> Result<Option<Repository>> {
        let start = absolute(start.as_ref())?;
        let mut current = dunce::canonicalize(&start)?;

        loop {
            tracing::trace!(path = %current.display(), "Looking for git directory");

            if current.join(GIT_DIR_NAME).exists() {
                tracing::debug!(work_dir = %current.display(), "Found git directory");
                return Repository::open(current).map(Some);
            }

            let parent = match current.parent() {
                Some(parent) => parent.to_path_buf(),
                None => return Ok(None),
            };

            current = parent;
        }
    }

    /// Like [`Repository::find`], but it is an error for no repository to exist.
    pub fn find_required<P: AsRef<Path>>(start: P) -> Result<Repository> {
        let start = start.as_ref();
        Repository::find(start)?.ok_or_else(|| Error::NotARepository(start.to_path_buf()))
    }

    /// Discover the repository enclosing the current working directory.
    pub fn find_from_current_dir() -> Result<Repository> {
        let path = env::current_dir()?;
        Repository::find_required(path)
    }
}
