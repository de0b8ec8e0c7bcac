use crate::duration::CalendarDuration;

/// Builds a [CalendarDuration] from an integer, so `30.seconds()` reads like `30 seconds`.
///
/// This is only sugar over [CalendarDuration::new] and its per-unit constructors. It must be
/// brought into scope (it is part of the [prelude](crate::prelude)); integers are not extended
/// otherwise.
///
/// ```
/// use calspan::prelude::*;
///
/// assert_eq!(CalendarDuration::seconds(30), 30.seconds());
/// assert_eq!(CalendarDuration::years(1), 1.year());
/// assert_eq!(CompositeDuration::new(0, 0, 1, 0, 5, 0), 1.day() + 5.minutes());
/// ```
pub trait ToCalendarDuration: Sized {
    /// Create a duration of this many seconds.
    fn seconds(self) -> CalendarDuration;

    /// Create a duration of this many minutes.
    fn minutes(self) -> CalendarDuration;

    /// Create a duration of this many hours.
    fn hours(self) -> CalendarDuration;

    /// Create a duration of this many days.
    fn days(self) -> CalendarDuration;

    /// Create a duration of this many months.
    fn months(self) -> CalendarDuration;

    /// Create a duration of this many years.
    fn years(self) -> CalendarDuration;

    /// Equivalent to `seconds()`, but reads better for singular units.
    #[inline]
    fn second(self) -> CalendarDuration {
        self.seconds()
    }

    /// Equivalent to `minutes()`, but reads better for singular units.
    #[inline]
    fn minute(self) -> CalendarDuration {
        self.minutes()
    }

    /// Equivalent to `hours()`, but reads better for singular units.
    #[inline]
    fn hour(self) -> CalendarDuration {
        self.hours()
    }

    /// Equivalent to `days()`, but reads better for singular units.
    #[inline]
    fn day(self) -> CalendarDuration {
        self.days()
    }

    /// Equivalent to `months()`, but reads better for singular units.
    #[inline]
    fn month(self) -> CalendarDuration {
        self.months()
    }

    /// Equivalent to `years()`, but reads better for singular units.
    #[inline]
    fn year(self) -> CalendarDuration {
        self.years()
    }
}

macro_rules! impl_to_calendar_duration {
    ($ty:ty) => {
        impl ToCalendarDuration for $ty {
            #[inline]
            fn seconds(self) -> CalendarDuration {
                CalendarDuration::seconds(i64::from(self))
            }
            #[inline]
            fn minutes(self) -> CalendarDuration {
                CalendarDuration::minutes(i64::from(self))
            }
            #[inline]
            fn hours(self) -> CalendarDuration {
                CalendarDuration::hours(i64::from(self))
            }
            #[inline]
            fn days(self) -> CalendarDuration {
                CalendarDuration::days(i64::from(self))
            }
            #[inline]
            fn months(self) -> CalendarDuration {
                CalendarDuration::months(i64::from(self))
            }
            #[inline]
            fn years(self) -> CalendarDuration {
                CalendarDuration::years(i64::from(self))
            }
        }
    };
}

impl_to_calendar_duration!(i8);
impl_to_calendar_duration!(i16);
impl_to_calendar_duration!(i32);
impl_to_calendar_duration!(i64);
impl_to_calendar_duration!(u8);
impl_to_calendar_duration!(u16);
impl_to_calendar_duration!(u32);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::CalendarUnit;

    #[test]
    fn test_singular_and_plural_agree() {
        let args = [
            (5.second(), 5.seconds(), CalendarUnit::Second),
            (5.minute(), 5.minutes(), CalendarUnit::Minute),
            (5.hour(), 5.hours(), CalendarUnit::Hour),
            (5.day(), 5.days(), CalendarUnit::Day),
            (5.month(), 5.months(), CalendarUnit::Month),
            (5.year(), 5.years(), CalendarUnit::Year),
        ];

        for (singular, plural, unit) in args {
            assert_eq!(singular, plural);
            assert_eq!(CalendarDuration::new(5, unit), plural);
        }
    }

    #[test]
    fn test_integer_types() {
        assert_eq!(CalendarDuration::days(-3), (-3i8).days());
        assert_eq!(CalendarDuration::days(300), 300u16.days());
        assert_eq!(CalendarDuration::days(u32::MAX.into()), u32::MAX.days());
        assert_eq!(CalendarDuration::days(i64::MIN), i64::MIN.days());
    }
}
