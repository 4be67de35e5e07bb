use clap::{Parser as ClapParser, Subcommand};
use clove_path::cli::{self, CliError, QueryOptions};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "clove-path")]
#[command(about = "clove-path - Select values from JSON documents with JSONPath")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a path against a JSON document
    Query {
        /// The path to evaluate, e.g. '$..book[?(@.price<10)].title'
        path: String,

        /// JSON input (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Validate a path and print its canonical form
    Check {
        /// The path to validate
        path: String,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Query {
            path,
            input,
            pretty,
        } => run_query(path, input, pretty),
        Commands::Check { path } => cli::execute_check(&path).map(|canonical| println!("{}", canonical)),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_query(path: String, input: Option<String>, pretty: bool) -> Result<(), CliError> {
    let input = match input {
        Some(s) => Some(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Some(buffer)
        }
        None => None,
    };

    let output = cli::execute_query(&QueryOptions { path, input })?;
    let json = if pretty {
        serde_json::to_string_pretty(&output)
    } else {
        serde_json::to_string(&output)
    }?;
    println!("{}", json);
    Ok(())
}
