use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::Builder;
use log::{debug, info};

use snox::ast_printer::AstPrinter;
use snox::error::Diagnostics;
use snox::parser::Parser;
use snox::scanner::Scanner;
use snox::session::{Session, EXIT_STATIC_ERROR};

#[derive(ClapParser, Debug)]
#[command(version, about = "Snox language interpreter", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    commands: Commands,

    /// Enable logging to app.log
    #[arg(long, global = true)]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tokenizes a file, printing each token
    Tokenize {
        filename: PathBuf,

        /// Print the token list as JSON instead of one token per line
        #[arg(long)]
        json: bool,
    },

    /// Parses a file as a single expression and prints its AST
    Parse { filename: PathBuf },

    /// Runs a file as a Snox program, or starts a REPL when no file is given
    Run { filename: Option<PathBuf> },
}

/// Reads the whole file into a String.
fn read_file(filename: &PathBuf) -> Result<String> {
    info!("Reading file: {:?}", filename);

    let file = File::open(filename).context(format!("Failed to open file {:?}", filename))?;
    let mut reader = BufReader::new(file);
    let mut buf = String::new();

    let bytes = reader
        .read_to_string(&mut buf)
        .context(format!("Failed to read file {:?}", filename))?;

    info!("Read {} bytes from {:?}", bytes, filename);

    Ok(buf)
}

fn init_logger() -> Result<()> {
    let log_file = File::create("app.log").context("Failed to create app.log")?;

    Builder::new()
        .format(|buf, record| {
            // Strip 'snox::' from module path
            let module = record
                .module_path()
                .unwrap_or("<unnamed>")
                .strip_prefix("snox::")
                .unwrap_or(record.module_path().unwrap_or("<unnamed>"));
            writeln!(
                buf,
                "[{}:{}] - {}",
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug)
        .parse_default_env() // RUST_LOG overrides the default level
        .init();

    info!("Logger initialized, writing to app.log");
    Ok(())
}

fn tokenize(filename: &PathBuf, json: bool) -> Result<()> {
    let source = read_file(filename)?;
    let mut diagnostics = Diagnostics::new();
    let tokens = Scanner::new(&source).scan_tokens(&mut diagnostics);

    if diagnostics.had_error() {
        eprintln!("{}", diagnostics);
    }

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&tokens).context("Failed to serialize tokens")?
        );
    } else {
        for token in &tokens {
            println!("{}", token);
        }
    }

    if diagnostics.had_error() {
        debug!("Tokenization failed, exiting with code {}", EXIT_STATIC_ERROR);
        process::exit(EXIT_STATIC_ERROR);
    }

    Ok(())
}

fn parse(filename: &PathBuf) -> Result<()> {
    let source = read_file(filename)?;
    let mut diagnostics = Diagnostics::new();
    let tokens = Scanner::new(&source).scan_tokens(&mut diagnostics);

    if diagnostics.had_error() {
        eprintln!("{}", diagnostics);
        process::exit(EXIT_STATIC_ERROR);
    }

    match Parser::new(tokens).parse_expression() {
        Ok(expr) => println!("{}", AstPrinter::print(&expr)),
        Err(e) => {
            eprintln!("{}", e);
            process::exit(EXIT_STATIC_ERROR);
        }
    }

    Ok(())
}

/// File mode: the first failure ends the process with its exit code.
fn run_file(filename: &PathBuf) -> Result<()> {
    let source = read_file(filename)?;
    let mut session = Session::new();

    if let Err(e) = session.run(&source) {
        debug!("Run failed: {}", e);
        eprintln!("{}", e);
        process::exit(e.exit_code());
    }

    info!("Program executed successfully");
    Ok(())
}

/// Interactive mode: errors are printed and the session carries on.
fn run_prompt() -> Result<()> {
    let mut session = Session::new();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush().context("Failed to flush prompt")?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read from stdin")?;

        if let Err(e) = session.run(&line) {
            eprintln!("{}", e);
        }
    }

    println!();
    Ok(())
}

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    if args.log {
        init_logger()?;
    } else {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .init();
    }

    info!("CLI arguments: {:?}", args);

    match &args.commands {
        Commands::Tokenize { filename, json } => tokenize(filename, *json),
        Commands::Parse { filename } => parse(filename),
        Commands::Run {
            filename: Some(filename),
        } => run_file(filename),
        Commands::Run { filename: None } => run_prompt(),
    }
}
