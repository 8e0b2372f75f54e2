use clap::error::ErrorKind;
use green_split::cli::{parse_args, CliArgs, USAGE};
use green_split::control_system::optimize_counts;
use green_split::monitoring::LogNarrator;
use green_split::{OptimizerError, Result};
use log::LevelFilter;
use serde_json::json;
use std::io::Write;
use std::process;

fn init_logger(verbose: bool) {
    let level = if verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();
}

fn run(args: &CliArgs) -> Result<()> {
    let config = args.ga_config()?;
    let counts = args.vehicle_counts;
    log::info!(
        "Starting with cars = [{},{},{},{}]",
        counts[0],
        counts[1],
        counts[2],
        counts[3]
    );

    let mut narrator = LogNarrator;
    let (plan, outcome) = optimize_counts(counts, &config, &mut narrator)?;
    log::debug!(
        "{:?} after {} generations (seed {})",
        outcome.termination,
        outcome.generations,
        outcome.seed
    );

    println!("{}", serde_json::to_string(&plan)?);
    Ok(())
}

fn main() {
    let args = match parse_args(std::env::args_os()) {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            kind => {
                let usage = OptimizerError::Usage(USAGE.to_string());
                eprintln!(
                    "{}",
                    json!({
                        "error": usage.to_string(),
                        "detail": kind.as_str().unwrap_or("invalid arguments"),
                    })
                );
                process::exit(1);
            }
        },
    };

    init_logger(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("{}", json!({ "error": e.to_string() }));
        process::exit(1);
    }
}
