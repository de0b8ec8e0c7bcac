use crate::{error::DurationError, unit::CalendarUnit};
use core::{
    fmt::{self, Display},
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
    str::FromStr,
};

/// A signed amount of a single [CalendarUnit], like `30 seconds` or `-2 months`.
///
/// A `CalendarDuration` is not a fixed length of time. `1 month` is 28 to 31 days depending on
/// where it is applied, so two durations can only be compared by applying them to the same
/// instant with a [Calendar](crate::Calendar). For that reason, `==` on this type means
/// "same amount of the same unit", and there is no [PartialOrd] implementation:
///
/// ```
/// use calspan::prelude::*;
///
/// let calendar = Calendar::default(); // reference instant 1970-01-01T00:00:00
/// assert_ne!(1.year(), 365.days());
/// assert!(calendar.equals(1.year(), 365.days()).unwrap());
/// ```
///
/// Adding or subtracting durations yields a [CompositeDuration]:
///
/// ```
/// use calspan::prelude::*;
///
/// let span = 1.day() + 5.minutes() - 30.seconds();
/// assert_eq!(CompositeDuration::new(0, 0, 1, 0, 5, -30), span);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarDuration {
    amount: i64,
    unit: CalendarUnit,
}

impl CalendarDuration {
    /// Returns a duration of `amount` of `unit`. Zero is a valid amount and means "no span".
    pub const fn new(amount: i64, unit: CalendarUnit) -> Self {
        Self { amount, unit }
    }

    /// Returns a duration of `amount` seconds.
    pub const fn seconds(amount: i64) -> Self {
        Self::new(amount, CalendarUnit::Second)
    }

    /// Returns a duration of `amount` minutes.
    pub const fn minutes(amount: i64) -> Self {
        Self::new(amount, CalendarUnit::Minute)
    }

    /// Returns a duration of `amount` hours.
    pub const fn hours(amount: i64) -> Self {
        Self::new(amount, CalendarUnit::Hour)
    }

    /// Returns a duration of `amount` days.
    pub const fn days(amount: i64) -> Self {
        Self::new(amount, CalendarUnit::Day)
    }

    /// Returns a duration of `amount` months.
    pub const fn months(amount: i64) -> Self {
        Self::new(amount, CalendarUnit::Month)
    }

    /// Returns a duration of `amount` years.
    pub const fn years(amount: i64) -> Self {
        Self::new(amount, CalendarUnit::Year)
    }

    /// The signed amount of this duration's unit.
    pub const fn amount(&self) -> i64 {
        self.amount
    }

    /// The unit this duration is measured in.
    pub const fn unit(&self) -> CalendarUnit {
        self.unit
    }

    /// Returns `true` if the amount is zero.
    pub const fn is_zero(&self) -> bool {
        self.amount == 0
    }

    /// Returns the composite form of this duration: every field but this unit's is zero.
    pub fn to_composite(&self) -> CompositeDuration {
        CompositeDuration::ZERO.with(self.unit, self.amount)
    }

    /// Field-wise sum of this duration and `rhs`, or [DurationError::Overflow].
    pub fn checked_add<T: Into<CompositeDuration>>(
        self,
        rhs: T,
    ) -> Result<CompositeDuration, DurationError> {
        self.to_composite().checked_add(rhs)
    }

    /// Field-wise difference of this duration and `rhs`, or [DurationError::Overflow].
    pub fn checked_sub<T: Into<CompositeDuration>>(
        self,
        rhs: T,
    ) -> Result<CompositeDuration, DurationError> {
        self.to_composite().checked_sub(rhs)
    }

    /// Returns this duration with its amount negated, or [DurationError::Overflow] for
    /// `i64::MIN`.
    pub fn checked_neg(self) -> Result<Self, DurationError> {
        self.amount
            .checked_neg()
            .map(|amount| Self::new(amount, self.unit))
            .ok_or(DurationError::Overflow { op: "negation" })
    }
}

impl From<CalendarDuration> for CompositeDuration {
    fn from(duration: CalendarDuration) -> Self {
        duration.to_composite()
    }
}

impl Display for CalendarDuration {
    /// Displays as `<amount> <unit>`, e.g. `1 year`, `5 days`, `-1 day`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.unit.name_for(self.amount))
    }
}

impl FromStr for CalendarDuration {
    type Err = DurationError;

    /// Parses exactly one `<amount> <unit>` term, e.g. `5 days`, `-30s`, `2mo`. See
    /// [CalendarUnit::from_str] for the accepted units.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse_terms(s)?.as_slice() {
            [term] => Ok(*term),
            _ => Err(DurationError::Unparseable {
                input: s.to_owned(),
            }),
        }
    }
}

/// A sum of calendar durations, holding one signed field per [CalendarUnit].
///
/// Fields never carry into each other: `70 seconds` stays `70 seconds`, not `1 minute, 10
/// seconds`, because how many days a month holds (and so on) depends on where the duration is
/// applied.
///
/// ```
/// use calspan::prelude::*;
///
/// let span = 70.seconds() + CompositeDuration::ZERO;
/// assert_eq!(70, span.seconds());
/// assert_eq!(0, span.minutes());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CompositeDuration {
    years: i64,
    months: i64,
    days: i64,
    hours: i64,
    minutes: i64,
    seconds: i64,
}

impl CompositeDuration {
    /// The composite duration with every field zero.
    pub const ZERO: CompositeDuration = CompositeDuration::new(0, 0, 0, 0, 0, 0);

    /// Returns a composite duration with the given fields, largest unit first.
    pub const fn new(
        years: i64,
        months: i64,
        days: i64,
        hours: i64,
        minutes: i64,
        seconds: i64,
    ) -> Self {
        Self {
            years,
            months,
            days,
            hours,
            minutes,
            seconds,
        }
    }

    /// The years field.
    pub const fn years(&self) -> i64 {
        self.years
    }

    /// The months field.
    pub const fn months(&self) -> i64 {
        self.months
    }

    /// The days field.
    pub const fn days(&self) -> i64 {
        self.days
    }

    /// The hours field.
    pub const fn hours(&self) -> i64 {
        self.hours
    }

    /// The minutes field.
    pub const fn minutes(&self) -> i64 {
        self.minutes
    }

    /// The seconds field.
    pub const fn seconds(&self) -> i64 {
        self.seconds
    }

    /// Returns the field for `unit`.
    pub const fn get(&self, unit: CalendarUnit) -> i64 {
        match unit {
            CalendarUnit::Second => self.seconds,
            CalendarUnit::Minute => self.minutes,
            CalendarUnit::Hour => self.hours,
            CalendarUnit::Day => self.days,
            CalendarUnit::Month => self.months,
            CalendarUnit::Year => self.years,
        }
    }

    /// Returns a copy of this duration with the field for `unit` replaced by `amount`.
    pub const fn with(mut self, unit: CalendarUnit, amount: i64) -> Self {
        match unit {
            CalendarUnit::Second => self.seconds = amount,
            CalendarUnit::Minute => self.minutes = amount,
            CalendarUnit::Hour => self.hours = amount,
            CalendarUnit::Day => self.days = amount,
            CalendarUnit::Month => self.months = amount,
            CalendarUnit::Year => self.years = amount,
        }
        self
    }

    /// Returns a copy with the years field replaced.
    pub const fn with_years(self, years: i64) -> Self {
        self.with(CalendarUnit::Year, years)
    }

    /// Returns a copy with the months field replaced.
    pub const fn with_months(self, months: i64) -> Self {
        self.with(CalendarUnit::Month, months)
    }

    /// Returns a copy with the days field replaced.
    pub const fn with_days(self, days: i64) -> Self {
        self.with(CalendarUnit::Day, days)
    }

    /// Returns a copy with the hours field replaced.
    pub const fn with_hours(self, hours: i64) -> Self {
        self.with(CalendarUnit::Hour, hours)
    }

    /// Returns a copy with the minutes field replaced.
    pub const fn with_minutes(self, minutes: i64) -> Self {
        self.with(CalendarUnit::Minute, minutes)
    }

    /// Returns a copy with the seconds field replaced.
    pub const fn with_seconds(self, seconds: i64) -> Self {
        self.with(CalendarUnit::Second, seconds)
    }

    /// Returns `true` if every field is zero.
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Years and months folded into a single month count, or `None` on overflow.
    pub fn total_months(&self) -> Option<i64> {
        self.years.checked_mul(12)?.checked_add(self.months)
    }

    /// Hours, minutes, and seconds folded into a single second count, or `None` on overflow.
    ///
    /// Clock units have fixed lengths in a civil calendar, so they can be folded without a
    /// reference instant. Days cannot, and are left out.
    pub fn clock_seconds(&self) -> Option<i64> {
        self.hours
            .checked_mul(3600)?
            .checked_add(self.minutes.checked_mul(60)?)?
            .checked_add(self.seconds)
    }

    /// The non-zero fields as single-unit durations, largest unit first.
    pub fn terms(&self) -> impl Iterator<Item = CalendarDuration> + '_ {
        CalendarUnit::ALL
            .iter()
            .rev()
            .map(|&unit| CalendarDuration::new(self.get(unit), unit))
            .filter(|term| !term.is_zero())
    }

    fn zip_fields<F>(self, rhs: Self, op: &'static str, f: F) -> Result<Self, DurationError>
    where
        F: Fn(i64, i64) -> Option<i64>,
    {
        let mut out = Self::ZERO;
        for unit in CalendarUnit::ALL {
            let value = f(self.get(unit), rhs.get(unit)).ok_or(DurationError::Overflow { op })?;
            out = out.with(unit, value);
        }
        Ok(out)
    }

    /// Field-wise sum of this duration and `rhs`, or [DurationError::Overflow].
    pub fn checked_add<T: Into<CompositeDuration>>(self, rhs: T) -> Result<Self, DurationError> {
        self.zip_fields(rhs.into(), "addition", i64::checked_add)
    }

    /// Field-wise difference of this duration and `rhs`, or [DurationError::Overflow].
    pub fn checked_sub<T: Into<CompositeDuration>>(self, rhs: T) -> Result<Self, DurationError> {
        self.zip_fields(rhs.into(), "subtraction", i64::checked_sub)
    }

    /// Returns this duration with every field negated, or [DurationError::Overflow].
    pub fn checked_neg(self) -> Result<Self, DurationError> {
        Self::ZERO.checked_sub(self).map_err(|_| DurationError::Overflow { op: "negation" })
    }
}

impl Display for CompositeDuration {
    /// Displays the non-zero fields largest-first, e.g. `1 year, 2 months, 5 minutes`. A zero
    /// duration displays as `0 seconds`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "{}", CalendarDuration::seconds(0));
        }
        for (i, term) in self.terms().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", term)?;
        }
        Ok(())
    }
}

impl FromStr for CompositeDuration {
    type Err = DurationError;

    /// Parses one or more `<amount> <unit>` terms separated by whitespace or commas, e.g.
    /// `1 day, 5 minutes` or `1d 5min`. Repeated units are summed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_terms(s)?
            .into_iter()
            .try_fold(Self::ZERO, |sum, term| sum.checked_add(term))
    }
}

/// Splits a string into `<amount> <unit>` terms. The amount may carry a sign, and whitespace
/// between the amount and the unit is optional.
fn parse_terms(input: &str) -> Result<Vec<CalendarDuration>, DurationError> {
    let unparseable = || DurationError::Unparseable {
        input: input.to_owned(),
    };

    let mut rest = input.trim_start();
    let mut terms = Vec::new();

    while !rest.is_empty() {
        let sign_len = usize::from(rest.starts_with(|c: char| c == '+' || c == '-'));
        let digits_len = rest[sign_len..]
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len() - sign_len);
        if digits_len == 0 {
            return Err(unparseable());
        }
        let (number, after) = rest.split_at(sign_len + digits_len);
        let amount: i64 = number.parse().map_err(|_| unparseable())?;

        let after = after.trim_start();
        let unit_len = after
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(after.len());
        if unit_len == 0 {
            return Err(unparseable());
        }
        let (unit, after) = after.split_at(unit_len);
        terms.push(CalendarDuration::new(amount, unit.parse()?));

        rest = after.trim_start_matches(|c: char| c.is_whitespace() || c == ',');
    }

    if terms.is_empty() {
        Err(unparseable())
    } else {
        Ok(terms)
    }
}

fn unwrap_op<T>(result: Result<T, DurationError>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("{err}"),
    }
}

/// # Panics
///
/// When a field overflows `i64`. Use [CompositeDuration::checked_add] to handle that case.
impl<T: Into<CompositeDuration>> Add<T> for CompositeDuration {
    type Output = CompositeDuration;

    fn add(self, rhs: T) -> CompositeDuration {
        unwrap_op(self.checked_add(rhs))
    }
}

/// # Panics
///
/// When a field overflows `i64`. Use [CompositeDuration::checked_sub] to handle that case.
impl<T: Into<CompositeDuration>> Sub<T> for CompositeDuration {
    type Output = CompositeDuration;

    fn sub(self, rhs: T) -> CompositeDuration {
        unwrap_op(self.checked_sub(rhs))
    }
}

impl<T: Into<CompositeDuration>> AddAssign<T> for CompositeDuration {
    fn add_assign(&mut self, rhs: T) {
        *self = *self + rhs;
    }
}

impl<T: Into<CompositeDuration>> SubAssign<T> for CompositeDuration {
    fn sub_assign(&mut self, rhs: T) {
        *self = *self - rhs;
    }
}

/// # Panics
///
/// When a field is `i64::MIN`. Use [CompositeDuration::checked_neg] to handle that case.
impl Neg for CompositeDuration {
    type Output = CompositeDuration;

    fn neg(self) -> CompositeDuration {
        unwrap_op(self.checked_neg())
    }
}

/// # Panics
///
/// When a field overflows `i64`. Use [CalendarDuration::checked_add] to handle that case.
impl<T: Into<CompositeDuration>> Add<T> for CalendarDuration {
    type Output = CompositeDuration;

    fn add(self, rhs: T) -> CompositeDuration {
        unwrap_op(self.checked_add(rhs))
    }
}

/// # Panics
///
/// When a field overflows `i64`. Use [CalendarDuration::checked_sub] to handle that case.
impl<T: Into<CompositeDuration>> Sub<T> for CalendarDuration {
    type Output = CompositeDuration;

    fn sub(self, rhs: T) -> CompositeDuration {
        unwrap_op(self.checked_sub(rhs))
    }
}

/// # Panics
///
/// When a field is `i64::MIN`. Use [CalendarDuration::checked_neg] to handle that case.
impl Neg for CalendarDuration {
    type Output = CalendarDuration;

    fn neg(self) -> CalendarDuration {
        unwrap_op(self.checked_neg())
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for CalendarDuration {
    fn arbitrary(g: &mut quickcheck::Gen) -> CalendarDuration {
        // i32 amounts leave headroom for sums and differences in i64
        CalendarDuration::new(i32::arbitrary(g).into(), CalendarUnit::arbitrary(g))
    }
}

#[cfg(test)]
impl quickcheck::Arbitrary for CompositeDuration {
    fn arbitrary(g: &mut quickcheck::Gen) -> CompositeDuration {
        CalendarUnit::ALL
            .iter()
            .fold(CompositeDuration::ZERO, |composite, &unit| {
                composite.with(unit, i32::arbitrary(g).into())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::quickcheck;

    #[test]
    fn test_single_to_composite() {
        for unit in CalendarUnit::ALL {
            let composite = CalendarDuration::new(7, unit).to_composite();
            for other in CalendarUnit::ALL {
                let expected = if other == unit { 7 } else { 0 };
                assert_eq!(expected, composite.get(other));
            }
        }
    }

    #[test]
    fn test_no_carry() {
        let span = CalendarDuration::seconds(70) + CompositeDuration::ZERO;
        assert_eq!(70, span.seconds());
        assert_eq!(0, span.minutes());

        let span = CalendarDuration::minutes(59) + CalendarDuration::minutes(1);
        assert_eq!(60, span.minutes());
        assert_eq!(0, span.hours());
    }

    #[test]
    fn test_add_sub_mixed() {
        let span = CalendarDuration::years(1) + CalendarDuration::months(2)
            - CalendarDuration::days(3)
            + CompositeDuration::new(0, 0, 0, 4, 5, 6);
        assert_eq!(CompositeDuration::new(1, 2, -3, 4, 5, 6), span);

        let mut span = CompositeDuration::ZERO;
        span += CalendarDuration::hours(1);
        span -= CalendarDuration::hours(3);
        assert_eq!(CompositeDuration::ZERO.with_hours(-2), span);
    }

    #[test]
    fn test_neg() {
        assert_eq!(CalendarDuration::days(-3), -CalendarDuration::days(3));
        assert_eq!(
            CompositeDuration::new(-1, 2, -3, 4, -5, 6),
            -CompositeDuration::new(1, -2, 3, -4, 5, -6)
        );
    }

    #[test]
    fn test_checked_overflow() {
        let max = CalendarDuration::days(i64::MAX);
        assert_eq!(
            Err(DurationError::Overflow { op: "addition" }),
            max.checked_add(CalendarDuration::days(1))
        );
        assert_eq!(
            Err(DurationError::Overflow { op: "subtraction" }),
            CalendarDuration::seconds(i64::MIN).checked_sub(CalendarDuration::seconds(1))
        );
        assert_eq!(
            Err(DurationError::Overflow { op: "negation" }),
            CalendarDuration::years(i64::MIN).checked_neg()
        );
        assert_eq!(
            Err(DurationError::Overflow { op: "negation" }),
            CompositeDuration::ZERO.with_months(i64::MIN).checked_neg()
        );
        // other units don't interfere
        assert_eq!(
            Ok(CompositeDuration::new(0, 0, i64::MAX, 0, 0, 1)),
            max.checked_add(CalendarDuration::seconds(1))
        );
    }

    #[test]
    #[should_panic(expected = "overflowed during addition")]
    fn test_add_operator_panics_on_overflow() {
        let _ = CalendarDuration::hours(i64::MAX) + CalendarDuration::hours(1);
    }

    #[test]
    #[should_panic(expected = "overflowed during negation")]
    fn test_neg_operator_panics_on_overflow() {
        let _ = -CalendarDuration::days(i64::MIN);
    }

    #[test]
    fn test_total_months_and_clock_seconds() {
        let span = CompositeDuration::new(2, -3, 99, 1, 2, 3);
        assert_eq!(Some(21), span.total_months());
        assert_eq!(Some(3723), span.clock_seconds());
        assert_eq!(None, CompositeDuration::ZERO.with_years(i64::MAX).total_months());
        assert_eq!(None, CompositeDuration::ZERO.with_hours(i64::MAX).clock_seconds());
    }

    #[test]
    fn test_display() {
        let args = [
            (CalendarDuration::years(1).to_string(), "1 year"),
            (CalendarDuration::days(5).to_string(), "5 days"),
            (CalendarDuration::days(-1).to_string(), "-1 day"),
            (CalendarDuration::seconds(0).to_string(), "0 seconds"),
            (CompositeDuration::ZERO.to_string(), "0 seconds"),
            (
                CompositeDuration::new(1, 2, 0, 0, 5, 0).to_string(),
                "1 year, 2 months, 5 minutes",
            ),
            (
                CompositeDuration::ZERO.with_days(-1).with_minutes(-5).to_string(),
                "-1 day, -5 minutes",
            ),
        ];

        for (actual, expected) in args {
            assert_eq!(expected, actual);
        }
    }

    #[test]
    fn test_parse_single() {
        let args = [
            ("5 days", Ok(CalendarDuration::days(5))),
            ("-30s", Ok(CalendarDuration::seconds(-30))),
            ("+2mo", Ok(CalendarDuration::months(2))),
            ("  1 year ", Ok(CalendarDuration::years(1))),
            (
                "1d 5min",
                Err(DurationError::Unparseable {
                    input: "1d 5min".to_owned(),
                }),
            ),
            (
                "",
                Err(DurationError::Unparseable {
                    input: "".to_owned(),
                }),
            ),
            (
                "days",
                Err(DurationError::Unparseable {
                    input: "days".to_owned(),
                }),
            ),
            (
                "5",
                Err(DurationError::Unparseable {
                    input: "5".to_owned(),
                }),
            ),
            (
                "5 m",
                Err(DurationError::UnknownUnit {
                    unit: "m".to_owned(),
                }),
            ),
        ];

        for (input, expected) in args {
            assert_eq!(expected, input.parse::<CalendarDuration>());
        }
    }

    #[test]
    fn test_parse_composite() {
        let args = [
            ("1 day, 5 minutes", CompositeDuration::new(0, 0, 1, 0, 5, 0)),
            ("1d 5min", CompositeDuration::new(0, 0, 1, 0, 5, 0)),
            ("1y2mo3d4h5min6s", CompositeDuration::new(1, 2, 3, 4, 5, 6)),
            ("-1 day, -5 minutes", CompositeDuration::new(0, 0, -1, 0, -5, 0)),
            ("3h 2h -1h", CompositeDuration::ZERO.with_hours(4)),
        ];

        for (input, expected) in args {
            assert_eq!(Ok(expected), input.parse::<CompositeDuration>());
        }
    }

    #[test]
    fn test_display_parse_agree() {
        let span = CompositeDuration::new(-3, 1, 0, 12, 0, -1);
        assert_eq!(Ok(span), span.to_string().parse());
        let single = CalendarDuration::minutes(-1);
        assert_eq!(Ok(single), single.to_string().parse());
    }

    quickcheck! {
        fn prop_add_then_sub_is_identity(a: CompositeDuration, b: CompositeDuration) -> bool {
            (a + b) - b == a
        }

        fn prop_single_add_then_sub_is_identity(a: CalendarDuration, b: CalendarDuration) -> bool {
            (a + b) - b == a.to_composite()
        }

        fn prop_add_zero_is_identity(a: CalendarDuration) -> bool {
            a + CompositeDuration::ZERO == a.to_composite()
                && a + CalendarDuration::new(0, a.unit()) == a.to_composite()
        }

        fn prop_add_commutes(a: CompositeDuration, b: CompositeDuration) -> bool {
            a + b == b + a
        }
    }
}
