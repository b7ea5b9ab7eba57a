use std::fs;
use std::io;
use std::path::Path;

use super::{absolute, Error, Repository, Result, CONFIG_FILE};

use crate::config::Config;

const DESCRIPTION_TXT: &str =
    "Unnamed repository; edit this file 'description' to name the repository.";

const HEAD_TXT: &str = "ref: refs/heads/master";

const SKELETON_DIRS: &[&str] = &["branches", "objects", "refs/tags", "refs/heads"];

impl Repository {
    /// Creates a new, empty git repository on the local file system.
    ///
    /// `work_dir` must either not exist (it is created, along with any
    /// missing parents) or be an empty directory. Creation is not
    /// transactional: if a later step fails, whatever was already written
    /// stays on disk.
    ///
    /// Analogous to [`git init`](https://git-scm.com/docs/git-init).
    pub fn init<P: AsRef<Path>>(work_dir: P) -> Result<Self> {
        let repo = Repository::force_new(absolute(work_dir.as_ref())?);
        prepare_work_dir(repo.work_dir())?;

        // Rebind to the canonical form now that the directory exists, so
        // `find` from inside it reports the same work dir.
        let mut repo = Repository::force_new(dunce::canonicalize(repo.work_dir())?);

        create_git_dir(&repo)?;
        create_skeleton_dirs(&repo)?;
        create_description(&repo)?;
        create_head(&repo)?;
        create_config(&mut repo)?;

        tracing::info!(work_dir = %repo.work_dir().display(), "Initialized empty repository");

        Ok(repo)
    }
}

fn prepare_work_dir(work_dir: &Path) -> Result<()> {
    match fs::metadata(work_dir) {
        Ok(meta) if !meta.is_dir() => Err(Error::TargetNotADirectory(work_dir.to_path_buf())),
        Ok(_) => {
            if fs::read_dir(work_dir)?.next().is_some() {
                Err(Error::TargetNotEmpty(work_dir.to_path_buf()))
            } else {
                Ok(())
            }
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(work_dir)?;
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

// Creating `.git` is the point of no return. If someone else got there
// between the emptiness check and now, back off.
fn create_git_dir(repo: &Repository) -> Result<()> {
    match fs::create_dir(repo.git_dir()) {
        Ok(()) => hide(repo.git_dir()),
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
            Err(Error::TargetNotEmpty(repo.work_dir().to_path_buf()))
        }
        Err(err) => Err(err.into()),
    }
}

#[cfg(windows)]
fn hide(path: &Path) -> Result<()> {
    use std::iter::once;
    use std::os::windows::ffi::OsStrExt;
    use std::os::windows::fs::MetadataExt;

    use windows_sys::Win32::Storage::FileSystem::{SetFileAttributesW, FILE_ATTRIBUTE_HIDDEN};

    let attributes = fs::metadata(path)?.file_attributes() | FILE_ATTRIBUTE_HIDDEN;
    let wide: Vec<u16> = path.as_os_str().encode_wide().chain(once(0)).collect();

    // SAFETY: `wide` is a NUL-terminated UTF-16 path that outlives the call.
    if unsafe { SetFileAttributesW(wide.as_ptr(), attributes) } == 0 {
        return Err(io::Error::last_os_error().into());
    }

    Ok(())
}

// Dot-prefixed names are already hidden by convention.
#[cfg(not(windows))]
fn hide(_path: &Path) -> Result<()> {
    Ok(())
}

fn create_skeleton_dirs(repo: &Repository) -> Result<()> {
    for dir in SKELETON_DIRS {
        repo.resolve_dir(dir, true)?;
    }

    Ok(())
}

fn create_description(repo: &Repository) -> Result<()> {
    write_file(repo, "description", DESCRIPTION_TXT)
}

fn create_head(repo: &Repository) -> Result<()> {
    write_file(repo, "HEAD", HEAD_TXT)
}

fn create_config(repo: &mut Repository) -> Result<()> {
    let config = Config::for_new_repository();
    let config_path = repo.resolve_path(CONFIG_FILE);
    config.save(&config_path)?;

    repo.config = config;
    Ok(())
}

fn write_file(repo: &Repository, name: &str, contents: &str) -> Result<()> {
    match repo.resolve_file(name, true)? {
        Some(path) => fs::write(path, contents).map_err(|e| e.into()),
        None => unreachable!(),
        // unreachable: resolve_file creates missing parents when asked to.
    }
}
