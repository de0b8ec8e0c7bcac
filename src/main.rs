use core::{cmp::Ordering, str::FromStr};

use calspan::{Calendar, CalendarError, CompositeDuration, DurationError, Instant, InstantError};
use clap::{ArgAction, Parser, Subcommand};
use tracing::info;

mod logging;

#[derive(thiserror::Error, Debug)]
pub enum CalspanCliError {
    #[error("{0}")]
    Calendar(#[from] CalendarError),

    #[error("{0}")]
    Duration(#[from] DurationError),

    #[error("{0}")]
    Instant(#[from] InstantError),
}

/// An instant, `now` (local time), `utc` (current UTC time), or `none` for an absent one.
#[derive(Clone, Debug, PartialEq)]
struct MaybeInstant(Option<Instant>);

impl FromStr for MaybeInstant {
    type Err = InstantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self(None)),
            "now" => Ok(Self(Some(Instant::local_now()))),
            "utc" => Ok(Self(Some(Instant::utc_now()))),
            _ => s.parse().map(|instant| Self(Some(instant))),
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` overrides this.
    ///
    /// Must come before any durations, since those may start with `-`.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
#[command(arg_required_else_help(true))]
enum Commands {
    /// Applies durations to an instant, one after another.
    ///
    /// Durations are terms like `30s`, `5min`, `1h`, `5d`, `2mo`, `3y`, or `"1 day, 5 minutes"`.
    /// Pass `now` or `utc` to start from the current time, or `none` to see that an absent
    /// instant stays absent. Flags go before the durations.
    Shift {
        /// The starting instant, as `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS`, `now`, `utc`, or `none`
        instant: MaybeInstant,

        /// The durations to apply, in order
        #[arg(required = true, allow_hyphen_values = true)]
        durations: Vec<CompositeDuration>,
    },

    /// Compares two durations by applying both to a reference instant.
    Compare {
        /// The left-hand duration
        #[arg(allow_hyphen_values = true)]
        lhs: CompositeDuration,

        /// The right-hand duration
        #[arg(allow_hyphen_values = true)]
        rhs: CompositeDuration,

        /// The reference instant both durations are applied to
        #[arg(short, long, value_name = "INSTANT", default_value_t = Instant::EPOCH)]
        reference: Instant,
    },

    /// Decomposes the span from one instant to another into calendar fields.
    Between {
        /// The starting instant
        start: Instant,

        /// The ending instant
        end: Instant,
    },
}

type Output = (String, i32);

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match do_work(cli) {
        Ok((output, exit_code)) => {
            println!("{output}");
            std::process::exit(exit_code);
        }
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

fn do_work(cli: Cli) -> Result<Output, CalspanCliError> {
    match cli.command {
        Commands::Shift {
            instant,
            durations,
        } => {
            let calendar = Calendar::default();
            info!(start = ?instant.0, steps = durations.len(), "shifting instant");
            let shifted = calendar.shift_all(instant.0, durations)?;
            let output = shifted.map_or_else(|| "none".to_string(), |instant| instant.to_string());
            Ok((output, 0))
        }
        Commands::Compare {
            lhs,
            rhs,
            reference,
        } => {
            let calendar = Calendar::default().with_reference(reference);
            let relation = match calendar.compare(lhs, rhs)? {
                Ordering::Less => "<",
                Ordering::Equal => "==",
                Ordering::Greater => ">",
            };
            Ok((format!("{lhs} {relation} {rhs}"), 0))
        }
        Commands::Between { start, end } => {
            let calendar = Calendar::default();
            Ok((calendar.between(start, end)?.to_string(), 0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(args: &[&str]) -> Result<Output, CalspanCliError> {
        let cli = Cli::try_parse_from(args).unwrap();
        do_work(cli)
    }

    #[test]
    fn test_shift() {
        let output = run(&["calspan", "shift", "2015-07-15", "-1 day, -5 minutes"]).unwrap();
        assert_eq!(("2015-07-13T23:55:00".to_string(), 0), output);

        let output = run(&["calspan", "shift", "2015-07-15T00:00:00", "30s", "5min", "1h"]).unwrap();
        assert_eq!(("2015-07-15T01:05:30".to_string(), 0), output);
    }

    #[test]
    fn test_shift_absent() {
        let output = run(&["calspan", "shift", "none", "5d"]).unwrap();
        assert_eq!(("none".to_string(), 0), output);
    }

    #[test]
    fn test_shift_from_now() {
        for start in ["now", "utc", "NOW"] {
            let (output, exit_code) = run(&["calspan", "shift", start, "1d"]).unwrap();
            assert_eq!(0, exit_code);
            assert!(output.parse::<Instant>().is_ok(), "{start}: {output}");
        }
    }

    #[test]
    fn test_verbose_flag_position() {
        for args in [
            vec!["calspan", "-v", "shift", "2015-07-15", "1d"],
            vec!["calspan", "shift", "-vv", "2015-07-15", "1d"],
        ] {
            let cli = Cli::try_parse_from(&args).unwrap();
            assert!(cli.verbose > 0, "{args:?}");
        }

        // after the durations, `-v` is read as another duration and rejected
        assert!(Cli::try_parse_from(["calspan", "shift", "2015-07-15", "1d", "-v"]).is_err());
    }

    #[test]
    fn test_shift_out_of_range() {
        let err = run(&["calspan", "shift", "2015-07-15", "999999y"]).unwrap_err();
        assert!(matches!(
            err,
            CalspanCliError::Calendar(CalendarError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_compare() {
        let args = [
            (vec!["1y", "365d"], "1 year == 365 days"),
            (vec!["11mo", "1y"], "11 months < 1 year"),
            (vec!["1y", "365d", "--reference", "2016-01-01"], "1 year > 365 days"),
        ];

        for (extra, expected) in args {
            let args: Vec<&str> = ["calspan", "compare"].into_iter().chain(extra).collect();
            assert_eq!((expected.to_string(), 0), run(&args).unwrap());
        }
    }

    #[test]
    fn test_between() {
        let output = run(&["calspan", "between", "1970-01-01", "1971-02-03T04:05:06"]).unwrap();
        assert_eq!(
            ("1 year, 1 month, 2 days, 4 hours, 5 minutes, 6 seconds".to_string(), 0),
            output
        );
    }

    #[test]
    fn test_bad_args() {
        assert!(Cli::try_parse_from(["calspan", "shift", "2015-07-15"]).is_err());
        assert!(Cli::try_parse_from(["calspan", "shift", "yesterday", "1d"]).is_err());
        assert!(Cli::try_parse_from(["calspan", "compare", "1m", "1d"]).is_err());
    }
}
