//! `jpath` CLI — query and reformat JSON documents from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Query via stdin, result on stdout
//! echo '{"books":[{"title":"A"},{"title":"B"}]}' | jpath query '$.books[*].title'
//!
//! # Query a file, pretty-print the result
//! jpath query '$.items[?(@.price < 10)]' -i catalog.json --pretty
//!
//! # Fail (exit nonzero) when the query matches nothing
//! jpath query '$.missing' -i data.json --strict-match
//!
//! # Reformat: minify or pretty-print
//! jpath fmt -i data.json --pretty -o formatted.json
//! ```

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use jpath_core::{parse_str, to_json_string, to_json_string_pretty, JsonPath};
use std::io::{self, Read};

#[derive(Parser)]
#[command(name = "jpath", version, about = "JSONPath queries over JSON documents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a JSONPath expression against a JSON document
    Query {
        /// The JSONPath expression, e.g. '$.books[*].title'
        expression: String,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Pretty-print the result
        #[arg(long)]
        pretty: bool,
        /// Exit with an error when the query matches nothing
        #[arg(long)]
        strict_match: bool,
    },
    /// Parse a JSON document and re-serialize it
    Fmt {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Pretty-print instead of minifying
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Query {
            expression,
            input,
            output,
            pretty,
            strict_match,
        } => {
            let text = read_input(input.as_deref())?;
            let doc = parse_str(&text).context("failed to parse input JSON")?;
            let path = JsonPath::compile(&expression)
                .with_context(|| format!("invalid JSONPath expression {expression:?}"))?;

            match path.query(&doc) {
                Some(result) => {
                    let rendered = if pretty {
                        to_json_string_pretty(&result)?
                    } else {
                        to_json_string(&result)?
                    };
                    write_output(output.as_deref(), &rendered)?;
                }
                None => {
                    if strict_match {
                        bail!("no match for {expression:?}");
                    }
                    // No match is not an error: empty output, exit 0.
                }
            }
        }
        Commands::Fmt {
            input,
            output,
            pretty,
        } => {
            let text = read_input(input.as_deref())?;
            let doc = parse_str(&text).context("failed to parse input JSON")?;
            let rendered = if pretty {
                to_json_string_pretty(&doc)?
            } else {
                to_json_string(&doc)?
            };
            write_output(output.as_deref(), &rendered)?;
        }
    }

    Ok(())
}

/// Read the entire input from a file, or from stdin when no path is given.
fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(p) => std::fs::read_to_string(p).with_context(|| format!("failed to read {p}")),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

/// Write to a file, or to stdout (with a trailing newline) when no path is
/// given.
fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(p) => {
            std::fs::write(p, content).with_context(|| format!("failed to write {p}"))?;
        }
        None => println!("{content}"),
    }
    Ok(())
}
