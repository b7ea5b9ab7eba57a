use std::{io::Write, path::Path};

use crate::{App, Result};

use clap::{Arg, ArgMatches, SubCommand};
use wyag::Repository;

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("init")
        .about("Create an empty git repository")
        .arg(
            Arg::with_name("directory")
                .default_value(".")
                .help("Where to create the repository"),
        )
}

pub(crate) fn run(app: &mut App, args: &ArgMatches) -> Result<()> {
    let dir = args.value_of("directory").unwrap_or(".");

    let repo = Repository::init(Path::new(dir))?;

    writeln!(
        app,
        "Initialized empty Git repository in {}",
        repo.git_dir().display()
    )?;

    Ok(())
}
