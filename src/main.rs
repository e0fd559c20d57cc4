//! Hypergen - Karabiner-Elements configuration generator
//!
//! Builds a `karabiner.json` containing a Hyper Key launcher layer and a
//! modal Vim editing layer, validated before anything is written.

use clap::{Parser, Subcommand};
use hypergen::cli::{CheckArgs, GenerateArgs};

/// Karabiner-Elements configuration generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the karabiner.json configuration file
    Generate(GenerateArgs),
    /// Validate the generated rules without writing a file
    Check(CheckArgs),
}

fn main() {
    let cli = Cli::parse();

    // Bare invocation generates with defaults
    let result = match cli.command {
        Some(Commands::Generate(args)) => args.execute(),
        Some(Commands::Check(args)) => args.execute(),
        None => GenerateArgs::default().execute(),
    };

    if let Err(error) = result {
        eprintln!("Error: {error}");
        std::process::exit(error.exit_code().code());
    }
}
