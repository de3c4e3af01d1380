//! Line-oriented front end: one command per line, feedback and the displayed
//! list on stdout.

use crate::infra;
use applicant_book::config::AppConfig;
use applicant_book::error::AppError;
use applicant_book::logic::commands::CommandResult;
use applicant_book::logic::Logic;
use applicant_book::storage::AddressBookStorage;
use std::io::{self, BufRead, Write};
use tracing::info;

pub(crate) fn run(config: &AppConfig) -> Result<(), AppError> {
    let mut logic = infra::open_logic(&config.storage)?;
    info!(data_file = %config.storage.data_file.display(), "shell started");

    let stdin = io::stdin();
    let stdout = io::stdout();
    repl(&mut logic, stdin.lock(), stdout.lock())
}

/// Runs one command and exits non-zero when it fails.
pub(crate) fn exec(config: &AppConfig, line: &str) -> Result<(), AppError> {
    let mut logic = infra::open_logic(&config.storage)?;
    let result = logic.execute(line)?;

    let stdout = io::stdout();
    render(&logic, &result, &mut stdout.lock())?;
    Ok(())
}

pub(crate) fn repl<S, R, W>(logic: &mut Logic<S>, input: R, mut output: W) -> Result<(), AppError>
where
    S: AddressBookStorage,
    R: BufRead,
    W: Write,
{
    writeln!(
        output,
        "Applicant book with {} applicant(s). Type `help` for commands.",
        logic.book().len()
    )?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match logic.execute(&line) {
            Ok(result) => {
                render(logic, &result, &mut output)?;
                if result.exit {
                    break;
                }
            }
            Err(err) => writeln!(output, "{err}")?,
        }
        output.flush()?;
    }

    Ok(())
}

fn render<S, W>(logic: &Logic<S>, result: &CommandResult, output: &mut W) -> io::Result<()>
where
    S: AddressBookStorage,
    W: Write,
{
    writeln!(output, "{}", result.feedback)?;
    if result.show_help || result.exit {
        return Ok(());
    }
    for (position, applicant) in logic.displayed().into_iter().enumerate() {
        writeln!(output, "{}. {}", position + 1, applicant)?;
    }
    Ok(())
}
