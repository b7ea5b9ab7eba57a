#![deny(warnings)]

use std::{
    error::Error,
    io::{self, Write},
};

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod app;
pub(crate) use app::App;

mod cmds;

#[cfg(test)]
mod temp_cwd;

pub(crate) type Result<T> = std::result::Result<T, Box<dyn Error>>;

#[allow(unused_must_use)]
fn main() {
    // Kept as small as possible; everything testable lives in `App`.

    let arg_matches = app::clap_app().get_matches();

    let verbose = arg_matches.is_present("verbose")
        || arg_matches
            .subcommand()
            .1
            .map_or(false, |m| m.is_present("verbose"));

    if verbose {
        init_tracing();
    }

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    let mut app = App {
        arg_matches,
        stdout: &mut stdout,
    };

    let r = app.run();

    app.flush();
    // Intentionally ignoring the result of this flush.

    std::process::exit(match r {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("ERROR: {}", err);
            1
        }
    });
}

fn init_tracing() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .with_writer(io::stderr)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("WARNING: unable to enable logging: {}", err);
    }
}
