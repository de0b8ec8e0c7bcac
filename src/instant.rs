use crate::error::InstantError;
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, SubsecRound, Timelike, Utc};
use core::{
    fmt::{self, Display},
    ops::Deref,
    str::FromStr,
};

/// A civil date and time with no time zone, e.g. `2015-07-15T00:00:00`.
///
/// Instants are whole seconds. Sub-second parts are truncated on conversion from chrono types and
/// rejected when parsing.
///
/// ```
/// use calspan::Instant;
///
/// let explicit = Instant::explicit(2015, 7, 15, 0, 0, 0).unwrap();
/// let parsed: Instant = "2015-07-15T00:00:00".parse().unwrap();
/// let midnight: Instant = "2015-07-15".parse().unwrap();
/// assert_eq!(explicit, parsed);
/// assert_eq!(explicit, midnight);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant(NaiveDateTime);

impl Instant {
    /// 1970-01-01T00:00:00, the default reference instant of a [Calendar](crate::Calendar).
    pub const EPOCH: Instant = Instant(NaiveDateTime::UNIX_EPOCH);

    /// Returns a new [Instant] representing the current date and time in UTC at the time of this
    /// call.
    pub fn utc_now() -> Self {
        Self::from(Utc::now().naive_utc())
    }

    /// Returns a new [Instant] representing the current date and time in the system's local
    /// timezone at the time of this call.
    pub fn local_now() -> Self {
        Self::from(Local::now().naive_local())
    }

    /// Returns result of a new [Instant] representing the given date and time, or
    /// [InstantError::InvalidInstantArguments].
    pub fn explicit(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Self, InstantError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, second))
            .map(Self)
            .ok_or(InstantError::InvalidInstantArguments {
                year,
                month,
                day,
                hour,
                minute,
                second,
            })
    }

    /// The underlying [NaiveDateTime].
    pub fn naive(&self) -> NaiveDateTime {
        self.0
    }
}

impl From<NaiveDateTime> for Instant {
    /// Truncates `datetime` to whole seconds.
    fn from(datetime: NaiveDateTime) -> Self {
        Self(datetime.trunc_subsecs(0))
    }
}

impl From<NaiveDate> for Instant {
    /// Midnight at the start of `date`.
    fn from(date: NaiveDate) -> Self {
        Self(date.and_time(NaiveTime::MIN))
    }
}

impl FromStr for Instant {
    type Err = InstantError;

    /// Parses `YYYY-MM-DDTHH:MM:SS`, or a bare `YYYY-MM-DD` meaning midnight of that day.
    /// Fractional seconds are rejected.
    ///
    /// See [NaiveDateTime::from_str] and [NaiveDate::from_str].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDateTime::from_str(s)
            .ok()
            .filter(|datetime| datetime.nanosecond() == 0)
            .or_else(|| NaiveDate::from_str(s).ok().map(|date| date.and_time(NaiveTime::MIN)))
            .map(Self)
            .ok_or_else(|| InstantError::UnparseableInstant {
                input: s.to_owned(),
            })
    }
}

impl Deref for Instant {
    type Target = NaiveDateTime;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%S"))
    }
}
