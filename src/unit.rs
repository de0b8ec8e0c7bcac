use core::{
    fmt::{self, Display},
    str::FromStr,
};

use crate::error::DurationError;

/// A calendar unit that a [CalendarDuration](crate::CalendarDuration) is measured in.
///
/// Units are ordered by coarseness: `Second < Minute < Hour < Day < Month < Year`. This order is
/// only a rough guide. It says nothing about how two durations compare: `11 months` is less than
/// `1 year`, but `400 days` is more, even though days are finer than years. Use
/// [Calendar::compare](crate::Calendar::compare) to order durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CalendarUnit {
    /// One second of clock time.
    Second,
    /// Sixty seconds of clock time.
    Minute,
    /// Sixty minutes of clock time.
    Hour,
    /// One calendar day.
    Day,
    /// One calendar month. Months have varying numbers of days.
    Month,
    /// One calendar year. Years have varying numbers of days.
    Year,
}

impl CalendarUnit {
    /// All units, finest first.
    pub const ALL: [CalendarUnit; 6] = [
        CalendarUnit::Second,
        CalendarUnit::Minute,
        CalendarUnit::Hour,
        CalendarUnit::Day,
        CalendarUnit::Month,
        CalendarUnit::Year,
    ];

    /// Returns the singular name of this unit, e.g. `"day"`.
    pub fn name(&self) -> &'static str {
        match self {
            CalendarUnit::Second => "second",
            CalendarUnit::Minute => "minute",
            CalendarUnit::Hour => "hour",
            CalendarUnit::Day => "day",
            CalendarUnit::Month => "month",
            CalendarUnit::Year => "year",
        }
    }

    /// Returns the plural name of this unit, e.g. `"days"`.
    pub fn plural_name(&self) -> &'static str {
        match self {
            CalendarUnit::Second => "seconds",
            CalendarUnit::Minute => "minutes",
            CalendarUnit::Hour => "hours",
            CalendarUnit::Day => "days",
            CalendarUnit::Month => "months",
            CalendarUnit::Year => "years",
        }
    }

    /// Returns the name that reads correctly next to `amount`: singular for 1 and -1, plural
    /// otherwise.
    pub(crate) fn name_for(&self, amount: i64) -> &'static str {
        if amount.unsigned_abs() == 1 {
            self.name()
        } else {
            self.plural_name()
        }
    }
}

impl Display for CalendarUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CalendarUnit {
    type Err = DurationError;

    /// Parses a unit from its long or short spelling, ignoring case.
    ///
    /// `m` is rejected because it could mean either minutes or months; use `min` or `mo`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unit = match s.to_ascii_lowercase().as_str() {
            "s" | "sec" | "secs" | "second" | "seconds" => CalendarUnit::Second,
            "min" | "mins" | "minute" | "minutes" => CalendarUnit::Minute,
            "h" | "hr" | "hrs" | "hour" | "hours" => CalendarUnit::Hour,
            "d" | "day" | "days" => CalendarUnit::Day,
            "mo" | "mon" | "month" | "months" => CalendarUnit::Month,
            "y" | "yr" | "yrs" | "year" | "years" => CalendarUnit::Year,
            _ => {
                return Err(DurationError::UnknownUnit {
                    unit: s.to_owned(),
                })
            }
        };
        Ok(unit)
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for CalendarUnit {
    fn arbitrary(g: &mut quickcheck::Gen) -> CalendarUnit {
        *g.choose(&CalendarUnit::ALL).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_coarseness_order() {
        for pair in CalendarUnit::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[rstest]
    #[case("s", CalendarUnit::Second)]
    #[case("Seconds", CalendarUnit::Second)]
    #[case("min", CalendarUnit::Minute)]
    #[case("minute", CalendarUnit::Minute)]
    #[case("h", CalendarUnit::Hour)]
    #[case("HOURS", CalendarUnit::Hour)]
    #[case("d", CalendarUnit::Day)]
    #[case("day", CalendarUnit::Day)]
    #[case("mo", CalendarUnit::Month)]
    #[case("months", CalendarUnit::Month)]
    #[case("y", CalendarUnit::Year)]
    #[case("yr", CalendarUnit::Year)]
    fn test_parse_ok(#[case] input: &str, #[case] expected: CalendarUnit) {
        assert_eq!(Ok(expected), input.parse());
    }

    #[test]
    fn test_parse_bad() {
        // `m` is ambiguous between minutes and months
        for input in ["m", "", "weeks", "fortnight"] {
            assert_eq!(
                Err(DurationError::UnknownUnit {
                    unit: input.to_owned()
                }),
                input.parse::<CalendarUnit>()
            );
        }
    }

    #[test]
    fn test_names_round_trip() {
        for unit in CalendarUnit::ALL {
            assert_eq!(Ok(unit), unit.name().parse());
            assert_eq!(Ok(unit), unit.plural_name().parse());
        }
    }

    #[test]
    fn test_name_for() {
        let args = [(1, "day"), (-1, "day"), (0, "days"), (2, "days"), (-5, "days")];
        for (amount, expected) in args {
            assert_eq!(expected, CalendarUnit::Day.name_for(amount));
        }
    }
}
