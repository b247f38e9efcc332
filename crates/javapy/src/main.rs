use clap::{Parser, Subcommand};

mod commands;
mod config;

use commands::convert::ConvertArgs;
use commands::validate::ValidateArgs;

/// Convert Java source into Python.
#[derive(Parser)]
#[command(name = "javapy", version, about)]
struct Cli {
    /// Log conversion details to stderr (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a file, a directory, or stdin (`-`)
    Convert {
        #[command(flatten)]
        args: ConvertArgs,

        /// Print the JSON schema of this command's arguments and exit
        #[arg(long)]
        input_schema: bool,

        /// Take arguments from a JSON object instead of flags
        #[arg(long)]
        params_json: Option<String>,
    },
    /// Run the heuristic checks on Java source or generated Python
    Validate(ValidateArgs),
}

/// Schema flag support for editor integration.
fn handle_schema_flag() -> bool {
    let args: Vec<String> = std::env::args().collect();
    if args.get(1).map(|s| s.as_str()) == Some("--schema") {
        let response = serde_json::json!({
            "config_path": config::CONFIG_PATH,
            "format": "toml",
            "schema": schemars::schema_for!(config::JavapyConfig)
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&response).unwrap_or_default()
        );
        true
    } else {
        false
    }
}

/// Reset SIGPIPE to default behavior so piping to `head` etc. doesn't panic.
#[cfg(unix)]
fn reset_sigpipe() {
    // SAFETY: libc::signal is a standard POSIX function. Restoring the default
    // disposition only changes how a broken pipe terminates the process.
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}

#[cfg(not(unix))]
fn reset_sigpipe() {}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    reset_sigpipe();

    // Handle --schema before clap parsing
    if handle_schema_flag() {
        return;
    }

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let outcome = match cli.command {
        Command::Convert {
            args,
            input_schema,
            params_json,
        } => commands::convert::run(args, input_schema, params_json.as_deref()),
        Command::Validate(args) => commands::validate::run(args),
    };

    if let Err(e) = outcome {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
