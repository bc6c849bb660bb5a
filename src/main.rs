//! Base Language CLI
//!
//! Command-line interface for the Base language front end.

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{anyhow, Context};
use base_lang::cli::{check_extension, BaseArgs, USAGE};
use base_lang::{BaseError, Diagnostic, Lexer, Parser, VERSION};
use clap::Parser as _;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = BaseArgs::parse();
    init_logging(&args);

    if args.version {
        println!("Base lang {}", VERSION);
        return ExitCode::SUCCESS;
    }

    let Some(file) = args.file.as_deref() else {
        println!("Base {}", VERSION);
        eprintln!("{}", USAGE);
        return ExitCode::FAILURE;
    };

    match run_file(file, &args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(args: &BaseArgs) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Parse a Base source file and print its syntax tree
fn run_file(path: &Path, args: &BaseArgs) -> anyhow::Result<()> {
    check_extension(path).map_err(|ext| anyhow!("Unsupported file extension: {}", ext))?;

    let source = fs::read_to_string(path)
        .with_context(|| format!("File not found: {}", path.display()))?;
    let filename = path.display().to_string();
    tracing::info!(file = %filename, bytes = source.len(), "loaded source");

    if args.tokens {
        show_tokens(&source, &filename, args)?;
    }

    let mut lexer = Lexer::with_options(&source, args.lexer_options());
    let result = Parser::new(&mut lexer).and_then(|mut parser| parser.parse());

    for warning in lexer.warnings() {
        eprint!(
            "{}",
            Diagnostic::warning(warning)
                .with_source(&source)
                .with_filename(filename.as_str())
        );
    }

    let program = result.map_err(|err| report(&err, &source, &filename))?;

    println!("Parsing successful");
    println!("AST:");
    print!("{}", program);
    println!();

    Ok(())
}

/// Print the token stream, scanning on a lexer of its own
fn show_tokens(source: &str, filename: &str, args: &BaseArgs) -> anyhow::Result<()> {
    println!("Tokens for '{}':", filename);
    println!("{}", "=".repeat(60));

    let mut count = 0;
    for (i, token) in Lexer::with_options(source, args.lexer_options()).enumerate() {
        let token = token.map_err(|err| report(&err, source, filename))?;
        println!(
            "{:4}: {:20} | {:?} (line {})",
            i,
            token.kind.to_string(),
            token.text,
            token.line
        );
        count += 1;
    }

    println!("{}", "=".repeat(60));
    println!("Total tokens: {}", count);

    Ok(())
}

fn report(err: &BaseError, source: &str, filename: &str) -> anyhow::Error {
    let diagnostic = Diagnostic::error(err)
        .with_source(source)
        .with_filename(filename);
    anyhow!("{}", diagnostic.format().trim_end())
}
