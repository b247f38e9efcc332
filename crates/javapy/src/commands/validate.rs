//! Validate command - run the heuristic checks without converting.

use clap::Args;
use javapy_convert::validate::{Side, validate};
use std::path::PathBuf;

/// Validate command arguments
#[derive(Args)]
pub struct ValidateArgs {
    /// File to check, use - for stdin
    pub input: PathBuf,

    /// Check the input as generated Python instead of Java source
    #[arg(long)]
    pub target: bool,

    /// Print findings as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the validate command. Findings never fail the command.
pub fn run(args: ValidateArgs) -> anyhow::Result<()> {
    let text = super::read_input(&args.input)?;
    let side = if args.target { Side::Target } else { Side::Source };
    let findings = validate(&text, side);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&findings)?);
        return Ok(());
    }
    if findings.is_empty() {
        eprintln!("No findings");
    }
    for finding in &findings {
        println!("{finding}");
    }
    Ok(())
}
