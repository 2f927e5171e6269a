//! CLI entry point for the scramble generator.
//!
//! Usage:
//!   scramble-gen generate [--puzzle <tag>] [options]
//!   scramble-gen check --puzzle <tag> <scramble>
//!   scramble-gen check --puzzle <tag> --stdin
//!   scramble-gen puzzles
//!
//! Options:
//!   --count <n>    Number of scrambles to generate (default: 1)
//!   --seed <n>     Seed for reproducible output (env: SCRAMBLE_SEED)
//!   --strict       Fail on unknown puzzle tags instead of using 3x3
//!   --json         Print JSON instead of plain text
//!   --message      Print the challenge message body
//!   --verbose      Debug logging

use std::io::{self, Read};
use std::process;

use clap::{Parser, Subcommand};
use serde::Serialize;

use scramble_gen::{
    challenge_body, generate_for_tag, validate_scramble, FallbackPolicy, GeneratorConfig,
    PuzzleType, Result, ScrambleMetrics,
};

#[derive(Parser)]
#[command(name = "scramble-gen")]
#[command(about = "Randomized scrambles for the daily cubing challenge")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate scrambles for a puzzle
    Generate {
        /// Puzzle tag, e.g. "3x3", "3x3 BLD", "Pyraminx"
        #[arg(long, default_value = "3x3")]
        puzzle: String,

        /// Number of scrambles to generate
        #[arg(long, default_value = "1")]
        count: usize,

        /// Seed for reproducible output
        #[arg(long, env = "SCRAMBLE_SEED")]
        seed: Option<u64>,

        /// Reject unknown puzzle tags
        #[arg(long)]
        strict: bool,

        /// Print JSON output
        #[arg(long)]
        json: bool,

        /// Print the challenge message body instead of the bare scramble
        #[arg(long, conflicts_with = "json")]
        message: bool,
    },

    /// Check that a scramble follows the puzzle's move grammar
    Check {
        /// Puzzle tag the scramble was generated for
        #[arg(long)]
        puzzle: String,

        /// Scramble text (use --stdin to read from stdin)
        #[arg(value_name = "SCRAMBLE")]
        scramble: Option<String>,

        /// Read scramble from stdin instead
        #[arg(long)]
        stdin: bool,
    },

    /// List supported puzzle tags
    Puzzles,
}

/// Output format for check result
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckOutput {
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    moves: usize,
    tips: usize,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    match run(cli.command) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(2);
        }
    }
}

fn run(command: Commands) -> Result<i32> {
    match command {
        Commands::Generate {
            puzzle,
            count,
            seed,
            strict,
            json,
            message,
        } => {
            let config = GeneratorConfig {
                fallback: if strict {
                    FallbackPolicy::Strict
                } else {
                    FallbackPolicy::Lenient
                },
                seed,
            };
            let mut source = config.source();

            // only --json needs the whole batch; plain output streams
            let mut batch = Vec::new();
            for _ in 0..count {
                let scramble = generate_for_tag(&puzzle, &config, &mut source)?;
                if json {
                    batch.push(scramble);
                } else if message {
                    println!("{}", challenge_body(&scramble));
                } else {
                    println!("{scramble}");
                }
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&batch)?);
            }
            Ok(0)
        }

        Commands::Check {
            puzzle,
            scramble,
            stdin,
        } => {
            let puzzle: PuzzleType = puzzle.parse()?;

            let text = if stdin {
                let mut buffer = String::new();
                io::stdin().read_to_string(&mut buffer)?;
                buffer.trim_end_matches(['\n', '\r']).to_string()
            } else if let Some(text) = scramble {
                text
            } else {
                eprintln!("Error: Must provide either a scramble or --stdin");
                return Ok(2);
            };

            let output = format_check(validate_scramble(puzzle, &text));
            println!("{}", serde_json::to_string_pretty(&output)?);

            Ok(if output.valid { 0 } else { 1 })
        }

        Commands::Puzzles => {
            for puzzle in PuzzleType::ALL {
                println!("{puzzle}");
            }
            Ok(0)
        }
    }
}

fn format_check(result: Result<ScrambleMetrics>) -> CheckOutput {
    match result {
        Ok(metrics) => CheckOutput {
            valid: true,
            reason: None,
            moves: metrics.moves,
            tips: metrics.tips,
        },
        Err(e) => CheckOutput {
            valid: false,
            reason: Some(e.to_string()),
            moves: 0,
            tips: 0,
        },
    }
}
