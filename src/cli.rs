use crate::control_system::ga_config::{GaConfig, Profile};
use crate::errors::Result;
use crate::global_variables::NUM_LIGHTS;
use crate::shared_data::Approach;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::ffi::OsString;
use std::path::PathBuf;

pub const USAGE: &str = "green_split north south west east [--verbose|-v]";

#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    pub vehicle_counts: [u32; NUM_LIGHTS],
    pub verbose: bool,
    pub profile: Profile,
    pub config_path: Option<PathBuf>,
    pub seed: Option<u64>,
    pub threads: Option<usize>,
}

/// Lenient vehicle count: an optional sign and the leading run of digits
/// are read, the rest is ignored. Negatives become 0; no digits or a value
/// outside the `i32` range becomes 0.
pub fn parse_vehicle_count(raw: &str) -> u32 {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_end = rest
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(rest.len());

    match rest[..digits_end].parse::<i32>() {
        Ok(n) if negative || n <= 0 => 0,
        Ok(n) => n as u32,
        Err(_) => 0,
    }
}

pub fn cli() -> Command {
    let mut command = Command::new("green_split")
        .about("Splits a signal cycle's green time among the four approaches of an intersection")
        .override_usage(USAGE);

    for approach in Approach::ALL {
        command = command.arg(
            Arg::new(approach.name())
                .help(format!("Vehicles waiting on the {} approach", approach.name()))
                .required(true)
                .allow_hyphen_values(true)
                .value_parser(value_parser!(String)),
        );
    }

    command
        .arg(
            Arg::new("extra")
                .help("Ignored trailing arguments")
                .num_args(1..)
                .allow_hyphen_values(true)
                .hide(true)
                .value_parser(value_parser!(String)),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Narrate the search on stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("profile")
                .long("profile")
                .help("Tuning profile: balanced or strict")
                .default_value("balanced")
                .value_parser(value_parser!(String)),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("JSON file with GA settings layered over the profile")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .help("Run-wide random seed")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("threads")
                .long("threads")
                .help("Worker threads for breeding offspring")
                .value_parser(value_parser!(usize)),
        )
}

fn vehicle_counts(matches: &ArgMatches) -> [u32; NUM_LIGHTS] {
    let mut counts = [0; NUM_LIGHTS];
    for (count, approach) in counts.iter_mut().zip(Approach::ALL) {
        *count = matches
            .get_one::<String>(approach.name())
            .map(|raw| parse_vehicle_count(raw))
            .unwrap_or(0);
    }
    counts
}

fn extra_verbose(matches: &ArgMatches) -> bool {
    matches
        .get_many::<String>("extra")
        .map(|mut extra| extra.any(|a| a == "-v" || a == "--verbose"))
        .unwrap_or(false)
}

/// Parse the command line. Profile names are checked here too, so every
/// usage problem surfaces before the optimizer runs.
pub fn parse_args<I, T>(args: I) -> std::result::Result<CliArgs, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let mut command = cli();
    let matches = command.try_get_matches_from_mut(args)?;

    let profile = match matches.get_one::<String>("profile") {
        Some(raw) => raw.parse::<Profile>().map_err(|e| {
            command.error(clap::error::ErrorKind::InvalidValue, e.to_string())
        })?,
        None => Profile::Balanced,
    };

    Ok(CliArgs {
        vehicle_counts: vehicle_counts(&matches),
        verbose: matches.get_flag("verbose") || extra_verbose(&matches),
        profile,
        config_path: matches.get_one::<PathBuf>("config").cloned(),
        seed: matches.get_one::<u64>("seed").copied(),
        threads: matches.get_one::<usize>("threads").copied(),
    })
}

impl CliArgs {
    /// Profile, then config file, then explicit flags.
    pub fn ga_config(&self) -> Result<GaConfig> {
        let mut config = GaConfig::from_profile(self.profile);
        if let Some(path) = &self.config_path {
            config = config.merge_file(path)?;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.threads.is_some() {
            config.threads = self.threads;
        }
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control_system::ga_config::InfeasiblePolicy;

    #[test]
    fn vehicle_counts_are_coerced() {
        assert_eq!(parse_vehicle_count("12"), 12);
        assert_eq!(parse_vehicle_count(" 7 "), 7);
        assert_eq!(parse_vehicle_count("+3"), 3);
        assert_eq!(parse_vehicle_count("-4"), 0);
        assert_eq!(parse_vehicle_count("abc"), 0);
        assert_eq!(parse_vehicle_count(""), 0);
        assert_eq!(parse_vehicle_count("-"), 0);
        assert_eq!(parse_vehicle_count("2147483647"), 2147483647);
    }

    #[test]
    fn vehicle_counts_read_the_leading_integer() {
        assert_eq!(parse_vehicle_count("3.5"), 3);
        assert_eq!(parse_vehicle_count("12abc"), 12);
        assert_eq!(parse_vehicle_count("-7cars"), 0);
        assert_eq!(parse_vehicle_count("cars12"), 0);
    }

    #[test]
    fn out_of_range_vehicle_counts_become_zero() {
        assert_eq!(parse_vehicle_count("99999999999"), 0);
        assert_eq!(parse_vehicle_count("2147483648"), 0);
        assert_eq!(parse_vehicle_count("123456789012345678901234567890"), 0);
        assert_eq!(parse_vehicle_count("-99999999999"), 0);
    }

    #[test]
    fn four_positionals_and_verbose_flag() {
        let args = parse_args(["green_split", "18", "2", "x", "-5", "--verbose"]).unwrap();
        assert_eq!(args.vehicle_counts, [18, 2, 0, 0]);
        assert!(args.verbose);
        assert_eq!(args.profile, Profile::Balanced);
        assert_eq!(args.seed, None);
    }

    #[test]
    fn short_verbose_flag() {
        let args = parse_args(["green_split", "1", "2", "3", "4", "-v"]).unwrap();
        assert!(args.verbose);
        let args = parse_args(["green_split", "1", "2", "3", "4"]).unwrap();
        assert!(!args.verbose);
    }

    #[test]
    fn trailing_arguments_are_ignored() {
        let args = parse_args(["green_split", "1", "2", "3", "4", "5"]).unwrap();
        assert_eq!(args.vehicle_counts, [1, 2, 3, 4]);
        assert!(!args.verbose);

        let args = parse_args(["green_split", "1", "2", "3", "4", "--foo", "-v"]).unwrap();
        assert_eq!(args.vehicle_counts, [1, 2, 3, 4]);
        assert!(args.verbose);

        let args = parse_args(["green_split", "1", "2", "3", "4", "9", "--verbose"]).unwrap();
        assert!(args.verbose);
    }

    #[test]
    fn missing_positionals_is_a_usage_error() {
        let err = parse_args(["green_split", "1", "2", "3"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn unknown_profile_is_a_usage_error() {
        let err = parse_args(["green_split", "1", "2", "3", "4", "--profile", "fast"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn flags_override_profile() {
        let args = parse_args([
            "green_split",
            "1",
            "2",
            "3",
            "4",
            "--profile",
            "strict",
            "--seed",
            "42",
            "--threads",
            "3",
        ])
        .unwrap();
        let config = args.ga_config().unwrap();
        assert_eq!(config.infeasible_policy, InfeasiblePolicy::Reject);
        assert_eq!(config.beta, 8.0);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.threads, Some(3));
    }

    #[test]
    fn missing_config_file_is_reported() {
        let args = parse_args([
            "green_split",
            "1",
            "2",
            "3",
            "4",
            "--config",
            "/nonexistent/green_split.json",
        ])
        .unwrap();
        assert!(args.ga_config().is_err());
    }
}
