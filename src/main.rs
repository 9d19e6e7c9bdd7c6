use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use scriptc::pipeline::compile_file;
use tracing::Level;

#[derive(Parser)]
#[command(name = "scriptc")]
#[command(about = "Front end for the script language: lexing, parsing and semantic checks", long_about = None)]
struct Cli {
    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check a source file and report every diagnostic
    Compile {
        file: PathBuf,

        /// Print the token stream
        #[arg(long)]
        tokens: bool,

        /// Print every declared symbol after a clean compile
        #[arg(long)]
        symbols: bool,
    },
}

fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(log_level(cli.verbose))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Compile {
            file,
            tokens,
            symbols,
        } => compile(file, tokens, symbols),
    }
}

fn compile(path: PathBuf, show_tokens: bool, show_symbols: bool) -> ExitCode {
    let (source, compilation) = match compile_file(&path) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error reading {}: {e}", path.display());
            return ExitCode::from(2);
        }
    };

    if show_tokens {
        for token in &compilation.tokens {
            println!("{}", token.debug());
        }
    }

    let file_name = path.display().to_string();
    for diagnostic in compilation.render(&source, &file_name) {
        println!("{}", diagnostic);
    }

    match &compilation.artifact {
        Some(artifact) => {
            if show_symbols {
                for line in artifact.symbols.dump(&artifact.types) {
                    println!("{}", line);
                }
            }
            ExitCode::SUCCESS
        }
        None => ExitCode::from(1),
    }
}
