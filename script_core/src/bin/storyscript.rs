//! Storyscript CLI entry point.

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use script_core::{Command, Program, Reply, Session};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use world_graph::WorldConfig;

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    script: Option<PathBuf>,
    config: Option<PathBuf>,
    show_help: bool,
    show_version: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-c" | "--config" => {
                i += 1;
                if i >= args.len() {
                    return Err("--config requires a value".into());
                }
                config.config = Some(PathBuf::from(&args[i]));
            }
            arg if arg.starts_with('-') => {
                return Err(format!("unknown option: {arg}").into());
            }
            path => {
                if config.script.is_some() {
                    return Err("only one script can be played at a time".into());
                }
                config.script = Some(PathBuf::from(path));
            }
        }
        i += 1;
    }

    Ok(config)
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let cli = parse_args(args)?;

    if cli.show_help {
        print_help();
        return Ok(());
    }

    if cli.show_version {
        println!("storyscript {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let Some(script) = cli.script else {
        print_help();
        return Err("no script given".into());
    };

    let config = match &cli.config {
        Some(path) => WorldConfig::load(path)?,
        None => WorldConfig::default(),
    };
    let program = Program::load(&script, config)?;
    play(Session::new(program))
}

fn play(mut session: Session) -> Result<(), Box<dyn std::error::Error>> {
    let mut editor = DefaultEditor::new()?;
    println!("{}", session.program().where_am_i());

    loop {
        let line = match editor.readline("> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };

        let Some(command) = Command::parse(&line) else {
            continue;
        };
        let _ = editor.add_history_entry(line.as_str());

        match session.execute(&command) {
            Reply::Say(text) => println!("{text}"),
            Reply::Quit => break,
        }

        if session.has_won() {
            println!("*** you have won ***");
            break;
        }
    }

    Ok(())
}

fn print_help() {
    println!(
        "\
storyscript - play a story written in plain sentences

USAGE:
    storyscript [OPTIONS] <SCRIPT>

OPTIONS:
    -c, --config <FILE>  Load world settings from a TOML file
    -h, --help           Print this help
    -V, --version        Print version

Set RUST_LOG=debug to trace compilation and rule firing."
    );
}
