use crate::{infra, server, shell};
use applicant_book::config::AppConfig;
use applicant_book::error::AppError;
use applicant_book::telemetry;
use clap::{Args, Parser, Subcommand};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Applicant Book",
    about = "Track job applicants from the terminal or over HTTP",
    version
)]
struct Cli {
    /// Override the configured address book file
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Read commands from stdin, one per line (default command)
    Shell,
    /// Run a single command, e.g. `exec sort r/ desc`
    Exec(ExecArgs),
    /// Add applicants from a CSV file
    Import(ImportArgs),
    /// Start the HTTP service
    Serve(ServeArgs),
}

#[derive(Args, Debug)]
pub(crate) struct ExecArgs {
    /// Command words, joined with spaces
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub(crate) words: Vec<String>,
}

#[derive(Args, Debug)]
pub(crate) struct ImportArgs {
    /// CSV with headers name,phone,email,address,job_position,status,rating,tags
    #[arg(long)]
    pub(crate) csv: PathBuf,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;
    if let Some(data_file) = cli.data_file {
        config.storage.data_file = data_file;
    }

    telemetry::init(&config.telemetry)?;

    match cli.command.unwrap_or(Command::Shell) {
        Command::Shell => shell::run(&config),
        Command::Exec(args) => shell::exec(&config, &args.words.join(" ")),
        Command::Import(args) => run_import(&config, args),
        Command::Serve(args) => server::run(config, args).await,
    }
}

fn run_import(config: &AppConfig, args: ImportArgs) -> Result<(), AppError> {
    let mut logic = infra::open_logic(&config.storage)?;
    let report = logic.import_csv(File::open(&args.csv)?)?;

    println!("Imported {} applicant(s)", report.added);
    if !report.duplicates.is_empty() {
        println!(
            "Skipped {} duplicate(s): {}",
            report.duplicates.len(),
            report.duplicates.join(", ")
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exec_collects_every_word() {
        let cli = Cli::try_parse_from(["applicant-book", "exec", "sort", "r/", "desc"])
            .expect("parses");
        match cli.command {
            Some(Command::Exec(args)) => assert_eq!(args.words.join(" "), "sort r/ desc"),
            other => panic!("expected exec, got {other:?}"),
        }
    }

    #[test]
    fn data_file_flag_is_global() {
        let cli = Cli::try_parse_from([
            "applicant-book",
            "serve",
            "--port",
            "8080",
            "--data-file",
            "/tmp/book.json",
        ])
        .expect("parses");
        assert_eq!(cli.data_file, Some(PathBuf::from("/tmp/book.json")));
        assert!(matches!(
            cli.command,
            Some(Command::Serve(ServeArgs {
                port: Some(8080),
                ..
            }))
        ));
    }

    #[test]
    fn no_subcommand_means_shell() {
        let cli = Cli::try_parse_from(["applicant-book"]).expect("parses");
        assert!(cli.command.is_none());
    }
}
