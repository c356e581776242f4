mod command;
mod session;

use rustyline::{error::ReadlineError, DefaultEditor};
use session::Session;
use std::{fs, io::{self, IsTerminal, Read}};
use tracing_subscriber::EnvFilter;

/// Runs a line of input in the session, printing the output or reporting the error.
fn run_line(session: &mut Session, line: &str) {
    if line.trim().is_empty() {
        return;
    }
    match session.run(line) {
        Ok(Some(out)) => println!("{}", out),
        Ok(None) => (),
        Err(failure) => failure.report_to_stderr(),
    }
}

/// Runs every line of a script in one session.
fn run_script(script: &str) {
    let mut session = Session::new();
    for line in script.lines() {
        run_line(&mut session, line);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let mut args = std::env::args();
    args.next();

    if let Some(filename) = args.next() {
        // run source file
        run_script(&fs::read_to_string(filename)?);
    } else if !io::stdin().is_terminal() {
        // read source from stdin
        let mut input = String::new();
        io::stdin().read_to_string(&mut input)?;
        run_script(&input);
    } else {
        // run the repl / interactive mode
        let mut rl = DefaultEditor::new()?;
        let mut session = Session::new();

        fn process_line(rl: &mut DefaultEditor, session: &mut Session) -> Result<(), ReadlineError> {
            let input = rl.readline("> ")?;
            if input.trim().is_empty() {
                return Ok(());
            }

            rl.add_history_entry(&input)?;

            run_line(session, &input);
            Ok(())
        }

        loop {
            if let Err(err) = process_line(&mut rl, &mut session) {
                match err {
                    ReadlineError::Eof | ReadlineError::Interrupted => (),
                    _ => eprintln!("{}", err),
                }
                break;
            }
        }
    }

    Ok(())
}
