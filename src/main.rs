// src/main.rs
use std::{path::PathBuf, process::ExitCode};

use clap::{Args, Parser, Subcommand};
use hufftext::{Config, TableFormat, commands, logger};

#[derive(Parser)]
#[command(name = "hufftext", version = "0.1")]
#[command(about = "Huffman-code a text file into packed bits plus a code table.", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level filter (overridden by RUST_LOG)
    #[arg(long, global = true, default_value = "info")]
    log: String,
}

#[derive(Args)]
struct ArtifactArgs {
    /// Packed code bits
    #[arg(short, long)]
    data: Option<PathBuf>,
    /// Code table record (defaults to <data>.dict)
    #[arg(short, long)]
    table: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = TableFormat::Json)]
    table_format: TableFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a text file
    Encode {
        input: PathBuf,
        #[command(flatten)]
        artifact: ArtifactArgs,
    },
    /// Decode a data/table pair back to text
    Decode {
        #[command(flatten)]
        artifact: ArtifactArgs,
        /// Where to write the decoded text
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Encode, decode and verify the result matches the input
    Roundtrip {
        input: PathBuf,
        #[command(flatten)]
        artifact: ArtifactArgs,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn config(input: Option<PathBuf>, artifact: ArtifactArgs, output: Option<PathBuf>) -> Config {
    Config::new(input, artifact.data, artifact.table, output, artifact.table_format)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logger::init(&cli.log);

    let result = match cli.command {
        Commands::Encode { input, artifact } => {
            commands::encode_file(&config(Some(input), artifact, None))
                .map(|stats| println!("Encoded: {stats}"))
        }
        Commands::Decode { artifact, output } => {
            let config = config(None, artifact, output);
            commands::decode_file(&config)
                .map(|_| println!("Decoded to {}", config.output.display()))
        }
        Commands::Roundtrip {
            input,
            artifact,
            output,
        } => commands::roundtrip_file(&config(Some(input), artifact, output))
            .map(|stats| println!("Round trip OK: {stats}")),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}
