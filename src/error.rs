use crate::{duration::CompositeDuration, instant::Instant};

/// Errors from constructing or parsing an [Instant].
#[derive(thiserror::Error, Debug, PartialEq, Eq, Clone)]
pub enum InstantError {
    /// The explicit arguments do not name a real date and time.
    #[error("Explicit year ({year}), month ({month}), day ({day}), hour ({hour}), minute ({minute}), and second ({second}) arguments cannot be made into a valid instant")]
    InvalidInstantArguments {
        /// The year argument.
        year: i32,
        /// The month argument.
        month: u32,
        /// The day argument.
        day: u32,
        /// The hour argument.
        hour: u32,
        /// The minute argument.
        minute: u32,
        /// The second argument.
        second: u32,
    },

    /// The string is not a `YYYY-MM-DD` date or a `YYYY-MM-DDTHH:MM:SS` date-time.
    #[error("Instant string `{input}` should be formatted as `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SS`")]
    UnparseableInstant {
        /// The string that failed to parse.
        input: String,
    },
}

/// Errors from building, combining, or parsing durations.
#[derive(thiserror::Error, Debug, PartialEq, Eq, Clone)]
pub enum DurationError {
    /// A field left the range of `i64` during `op`.
    #[error("Duration field overflowed during {op}")]
    Overflow {
        /// The operation that overflowed, e.g. `addition`.
        op: &'static str,
    },

    /// The string is not a sequence of `<amount> <unit>` terms.
    #[error("Duration string `{input}` should be a sequence of `<amount> <unit>` terms, e.g. `1 day, 5 minutes`")]
    Unparseable {
        /// The string that failed to parse.
        input: String,
    },

    /// The unit in a duration string is not known, or is ambiguous (`m`).
    #[error("Unknown calendar unit `{unit}`")]
    UnknownUnit {
        /// The unit text that was not recognized.
        unit: String,
    },
}

/// Errors from calendar arithmetic.
#[derive(thiserror::Error, Debug, PartialEq, Eq, Clone)]
pub enum CalendarError {
    /// Adding `duration` to `instant` lands outside the range a calendar system can represent.
    #[error("Adding `{duration}` to {instant} is outside the representable range of instants")]
    OutOfRange {
        /// The instant that was shifted.
        instant: Instant,
        /// The duration that was added.
        duration: CompositeDuration,
    },
}
