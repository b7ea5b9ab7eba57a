use std::{
    env,
    path::{Path, PathBuf},
};

// Switches the process working directory for the lifetime of the value and
// switches back on drop. Test-only, so failures panic.
//
// The working directory is process-wide: every test that uses this must be
// marked #[serial].
pub(crate) struct TempCwd {
    old_path: PathBuf,
}

impl TempCwd {
    pub fn new<P: AsRef<Path>>(path: P) -> TempCwd {
        let old_path = env::current_dir().unwrap();
        env::set_current_dir(path).unwrap();

        TempCwd { old_path }
    }
}

impl Drop for TempCwd {
    fn drop(&mut self) {
        env::set_current_dir(&self.old_path).unwrap();
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use serial_test::serial;

    use super::TempCwd;

    #[test]
    #[serial]
    fn restores_cwd() {
        let old_path = env::current_dir().unwrap();
        let tempdir = tempfile::tempdir().unwrap();

        {
            let _tcwd = TempCwd::new(tempdir.path());
            assert_eq!(
                env::current_dir().unwrap(),
                dunce::canonicalize(tempdir.path()).unwrap()
            );
        }

        assert_eq!(env::current_dir().unwrap(), old_path);
    }
}
