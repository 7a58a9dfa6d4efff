use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cron_compiler::{analyze, compile, display_tokens, parse, tokenize, Schedule};

const USAGE: &str = r#"Usage: cron-parser "<cron string>"
Example:
	cron-parser "*/15 0 1,15 * 1-5 /usr/bin/find"

	Output:
	minute         0 15 30 45
	hour           0
	day of month   1 15
	month          1 2 3 4 5 6 7 8 9 10 11 12
	day of week    1 2 3 4 5
	command        /usr/bin/find
"#;

#[derive(Parser)]
#[command(
    name = "cron-parser",
    about = "Expand a cron string into the times it fires at",
    after_help = USAGE
)]
struct Cli {
    /// Print the schedule as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// The cron string: five time fields followed by a command
    #[arg(allow_hyphen_values = true)]
    args: Vec<String>,
}

fn main() {
    // Any DEBUG value, even empty, turns on the diagnostic dump.
    let debug = std::env::var_os("DEBUG").is_some();
    let default_level = if debug { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(_) => {
            println!("{USAGE}");
            return;
        }
    };

    let [cron] = cli.args.as_slice() else {
        println!("{USAGE}");
        return;
    };

    let result = if debug {
        compile_verbose(cron)
    } else {
        compile(cron)
    };

    match result {
        Ok(schedule) if cli.json => match serde_json::to_string_pretty(&schedule) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                println!("Error: could not serialize the schedule: {e}");
                std::process::exit(1);
            }
        },
        Ok(schedule) => println!("{schedule}"),
        Err(e) => {
            println!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Runs the pipeline stage by stage, dumping the tokens and the syntax tree.
fn compile_verbose(cron: &str) -> cron_compiler::Result<Schedule> {
    let tokens = tokenize(cron)?;
    println!("{}", display_tokens(&tokens));

    let ast = parse(&tokens)?;
    match serde_json::to_string_pretty(&ast) {
        Ok(dump) => println!("{dump}"),
        Err(e) => tracing::warn!("could not dump the syntax tree: {e}"),
    }

    Ok(analyze(&ast)?)
}
