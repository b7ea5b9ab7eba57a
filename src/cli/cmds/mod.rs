use crate::{App, Result};

mod find;
mod init;

pub(crate) fn add_subcommands<'a, 'b>(app: clap::App<'a, 'b>) -> clap::App<'a, 'b> {
    app.subcommand(find::subcommand())
        .subcommand(init::subcommand())
}

pub(crate) fn dispatch(app: &mut App) -> Result<()> {
    let matches = app.arg_matches.clone();
    // ^^ Need an independent copy of matches so the App struct can still
    // be handed to the subcommand as the output sink.

    match matches.subcommand() {
        ("find", Some(m)) => find::run(app, &m),
        ("init", Some(m)) => init::run(app, &m),
        _ => unreachable!(),
        // unreachable: clap exits with help or an error message if no
        // subcommand was given.
    }
}
