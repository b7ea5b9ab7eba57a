use std::io::Write;

use crate::{App, Result};

use clap::{Arg, ArgMatches, SubCommand};
use wyag::Repository;

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("find")
        .about("Print the top-level directory of the enclosing repository")
        .arg(
            Arg::with_name("directory")
                .help("Where to start looking (default: current directory)"),
        )
}

pub(crate) fn run(app: &mut App, args: &ArgMatches) -> Result<()> {
    let repo = match args.value_of("directory") {
        Some(dir) => Repository::find_required(dir)?,
        None => Repository::find_from_current_dir()?,
    };

    writeln!(app, "{}", repo.work_dir().display())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serial_test::serial;

    use crate::temp_cwd::TempCwd;
    use crate::App;

    use wyag::Repository;

    #[test]
    fn from_nested_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(temp_dir.path()).unwrap();

        let deep = temp_dir.path().join("sub/deep");
        fs::create_dir_all(&deep).unwrap();

        let stdout = App::run_with_args(vec!["find", deep.to_str().unwrap()]).unwrap();
        let expected = format!("{}\n", repo.work_dir().display());
        assert_eq!(stdout, expected.as_bytes());
    }

    #[test]
    #[serial]
    fn defaults_to_current_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(temp_dir.path()).unwrap();
        let src = temp_dir.path().join("src");
        fs::create_dir(&src).unwrap();

        let stdout = {
            let _tcwd = TempCwd::new(&src);
            App::run_with_args(vec!["find"]).unwrap()
        };

        let expected = format!("{}\n", repo.work_dir().display());
        assert_eq!(stdout, expected.as_bytes());
    }

    #[test]
    fn error_not_a_repository() {
        // Assumes nothing above the temp dir is itself a git repository.
        let temp_dir = tempfile::tempdir().unwrap();

        let err = App::run_with_args(vec!["find", temp_dir.path().to_str().unwrap()]).unwrap_err();

        let errmsg = err.to_string();
        assert!(
            errmsg.starts_with("not a git repository: "),
            "\nincorrect error message:\n\n{}",
            errmsg
        );
    }
}
