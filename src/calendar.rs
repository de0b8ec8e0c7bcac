use crate::{
    duration::{CalendarDuration, CompositeDuration},
    error::CalendarError,
    instant::Instant,
};
use chrono::{Datelike, Days, Months, NaiveDateTime, TimeDelta};
use core::cmp::Ordering;
use tracing::{debug, trace};

const SECONDS_PER_DAY: i64 = 86_400;

/// The date arithmetic a [Calendar] is built on.
///
/// Implementations add the fields of a [CompositeDuration] to an [Instant], and decompose the
/// distance between two instants back into fields. Both are pure functions of their inputs.
pub trait CalendarSystem {
    /// Adds every field of `fields` to `instant`, or returns [CalendarError::OutOfRange] if the
    /// result cannot be represented.
    fn add_fields(
        &self,
        instant: &Instant,
        fields: &CompositeDuration,
    ) -> Result<Instant, CalendarError>;

    /// Returns fields that take `start` to `end` when passed to [CalendarSystem::add_fields].
    fn fields_between(
        &self,
        start: &Instant,
        end: &Instant,
    ) -> Result<CompositeDuration, CalendarError>;
}

/// The proleptic Gregorian calendar, with days of exactly 24 hours.
///
/// Fields are applied largest first:
///
/// 1. Years and months together, as a single count of months. If the day of the month does not
///    exist in the target month, it is clamped to that month's last day, so January 31st plus one
///    month is February 28th (or 29th).
/// 2. Days.
/// 3. Hours, minutes, and seconds together, as an exact clock offset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Gregorian;

fn shift_months(datetime: NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months < 0 {
        datetime.checked_sub_months(magnitude)
    } else {
        datetime.checked_add_months(magnitude)
    }
}

fn shift_days(datetime: NaiveDateTime, days: i64) -> Option<NaiveDateTime> {
    let magnitude = Days::new(days.unsigned_abs());
    if days < 0 {
        datetime.checked_sub_days(magnitude)
    } else {
        datetime.checked_add_days(magnitude)
    }
}

impl CalendarSystem for Gregorian {
    fn add_fields(
        &self,
        instant: &Instant,
        fields: &CompositeDuration,
    ) -> Result<Instant, CalendarError> {
        let shifted = fields
            .total_months()
            .and_then(|months| shift_months(instant.naive(), months))
            .and_then(|datetime| shift_days(datetime, fields.days()))
            .and_then(|datetime| {
                let delta = TimeDelta::try_seconds(fields.clock_seconds()?)?;
                datetime.checked_add_signed(delta)
            });

        match shifted {
            Some(datetime) => Ok(Instant::from(datetime)),
            None => {
                debug!(%instant, %fields, "calendar addition out of range");
                Err(CalendarError::OutOfRange {
                    instant: *instant,
                    duration: *fields,
                })
            }
        }
    }

    fn fields_between(
        &self,
        start: &Instant,
        end: &Instant,
    ) -> Result<CompositeDuration, CalendarError> {
        let (from, to) = (start.naive(), end.naive());
        let out_of_range = |months: i64| CalendarError::OutOfRange {
            instant: *start,
            duration: CompositeDuration::ZERO.with_months(months),
        };

        // whole months first, backing off by one if the clamped day overshoots `end`
        let mut months = (i64::from(to.year()) - i64::from(from.year())) * 12
            + (i64::from(to.month()) - i64::from(from.month()));
        let mut anchor = shift_months(from, months).ok_or_else(|| out_of_range(months))?;
        if to >= from && anchor > to {
            months -= 1;
        } else if to < from && anchor < to {
            months += 1;
        }
        anchor = shift_months(from, months).ok_or_else(|| out_of_range(months))?;

        // what's left is shorter than a month in the same direction, and exact
        let rest = to.signed_duration_since(anchor);
        let days = rest.num_days();
        let clock = rest.num_seconds() - days * SECONDS_PER_DAY;

        let fields = CompositeDuration::new(
            months / 12,
            months % 12,
            days,
            clock / 3600,
            clock % 3600 / 60,
            clock % 60,
        );
        trace!(%start, %end, %fields, "decomposed instants into fields");
        Ok(fields)
    }
}

/// Compares and applies durations by projecting them onto a calendar.
///
/// A `Calendar` pairs a [CalendarSystem] with a *reference instant*. Two durations are compared
/// by adding each of them to the reference instant and comparing the results. This makes
/// comparisons depend on the reference: a year is 365 days starting from 1970-01-01, but 366
/// starting from 2016-01-01.
///
/// ```
/// use calspan::prelude::*;
///
/// let calendar = Calendar::default(); // Gregorian, from 1970-01-01T00:00:00
/// assert!(calendar.equals(1.year(), 365.days()).unwrap());
/// assert!(calendar.equals(1.month(), 31.days()).unwrap());
/// assert!(calendar.less_than(11.months(), 1.year()).unwrap());
///
/// let leap = calendar.with_reference("2016-01-01".parse().unwrap());
/// assert!(!leap.equals(1.year(), 365.days()).unwrap());
/// assert!(leap.equals(1.year(), 366.days()).unwrap());
/// ```
///
/// The same calendar applies durations to arbitrary instants:
///
/// ```
/// use calspan::prelude::*;
///
/// let calendar = Calendar::default();
/// let start: Instant = "2015-07-15T00:00:00".parse().unwrap();
/// let end = calendar.subtract(start, 1.day() + 5.minutes()).unwrap();
/// assert_eq!("2015-07-13T23:55:00", end.to_string());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calendar<C = Gregorian> {
    system: C,
    reference: Instant,
}

impl Default for Calendar<Gregorian> {
    /// The Gregorian calendar with [Instant::EPOCH] as its reference instant.
    fn default() -> Self {
        Self::new(Gregorian, Instant::EPOCH)
    }
}

impl<C: CalendarSystem> Calendar<C> {
    /// Returns a calendar that compares durations by applying them to `reference` with `system`.
    pub fn new(system: C, reference: Instant) -> Self {
        Self { system, reference }
    }

    /// Returns this calendar with a different reference instant.
    pub fn with_reference(self, reference: Instant) -> Self {
        Self { reference, ..self }
    }

    /// The instant durations are projected from.
    pub fn reference(&self) -> Instant {
        self.reference
    }

    /// The underlying calendar system.
    pub fn system(&self) -> &C {
        &self.system
    }

    /// Returns the instant reached by adding `duration` to the reference instant.
    ///
    /// # Errors
    ///
    /// - Returns [CalendarError::OutOfRange] if that instant cannot be represented.
    pub fn project<D: Into<CompositeDuration>>(&self, duration: D) -> Result<Instant, CalendarError> {
        let fields = duration.into();
        let projected = self.system.add_fields(&self.reference, &fields)?;
        trace!(reference = %self.reference, %fields, %projected, "projected duration");
        Ok(projected)
    }

    /// Returns `true` if `lhs` and `rhs` reach the same instant from the reference instant.
    ///
    /// The answer depends on the reference. `1 month` equals `31 days` from January 1st, but
    /// equals `28 days` from February 1st of a common year.
    ///
    /// # Errors
    ///
    /// - Returns [CalendarError::OutOfRange] if either projection cannot be represented.
    pub fn equals<L, R>(&self, lhs: L, rhs: R) -> Result<bool, CalendarError>
    where
        L: Into<CompositeDuration>,
        R: Into<CompositeDuration>,
    {
        Ok(self.compare(lhs, rhs)? == Ordering::Equal)
    }

    /// Orders `lhs` and `rhs` by the instants they reach from the reference instant.
    ///
    /// # Errors
    ///
    /// - Returns [CalendarError::OutOfRange] if either projection cannot be represented.
    pub fn compare<L, R>(&self, lhs: L, rhs: R) -> Result<Ordering, CalendarError>
    where
        L: Into<CompositeDuration>,
        R: Into<CompositeDuration>,
    {
        let lhs = self.project(lhs)?;
        let rhs = self.project(rhs)?;
        Ok(lhs.cmp(&rhs))
    }

    /// Returns `true` if `lhs` reaches an earlier instant than `rhs` from the reference instant.
    ///
    /// # Errors
    ///
    /// - Returns [CalendarError::OutOfRange] if either projection cannot be represented.
    pub fn less_than<L, R>(&self, lhs: L, rhs: R) -> Result<bool, CalendarError>
    where
        L: Into<CompositeDuration>,
        R: Into<CompositeDuration>,
    {
        Ok(self.compare(lhs, rhs)? == Ordering::Less)
    }

    /// Returns `instant` shifted forward by `duration`.
    ///
    /// # Errors
    ///
    /// - Returns [CalendarError::OutOfRange] if the result cannot be represented.
    pub fn add<D: Into<CompositeDuration>>(
        &self,
        instant: Instant,
        duration: D,
    ) -> Result<Instant, CalendarError> {
        self.system.add_fields(&instant, &duration.into())
    }

    /// Returns `instant` shifted back by `duration`: every field is negated, then added in a
    /// single calendar step.
    ///
    /// # Errors
    ///
    /// - Returns [CalendarError::OutOfRange] if the result cannot be represented, including when
    ///   a field of `duration` cannot be negated.
    pub fn subtract<D: Into<CompositeDuration>>(
        &self,
        instant: Instant,
        duration: D,
    ) -> Result<Instant, CalendarError> {
        let fields = duration.into();
        let negated = fields
            .checked_neg()
            .map_err(|_| CalendarError::OutOfRange {
                instant,
                duration: fields,
            })?;
        self.add(instant, negated)
    }

    /// Like [Calendar::add], but an absent instant stays absent instead of failing.
    ///
    /// ```
    /// use calspan::prelude::*;
    ///
    /// let calendar = Calendar::default();
    /// assert_eq!(Ok(None), calendar.shift(None, 5.days()));
    /// ```
    ///
    /// # Errors
    ///
    /// - Returns [CalendarError::OutOfRange] if `instant` is present and the result cannot be
    ///   represented.
    pub fn shift<D: Into<CompositeDuration>>(
        &self,
        instant: Option<Instant>,
        duration: D,
    ) -> Result<Option<Instant>, CalendarError> {
        instant
            .map(|instant| self.add(instant, duration))
            .transpose()
    }

    /// Applies each duration in turn with [Calendar::shift], like writing
    /// `date + 30.seconds() + 5.minutes() + ...`.
    ///
    /// Each step is a separate calendar addition, so day-of-month clamping can happen at every
    /// step. This is not always the same as adding the sum of the durations once.
    ///
    /// # Errors
    ///
    /// - Returns [CalendarError::OutOfRange] from the first step that cannot be represented.
    pub fn shift_all<I>(
        &self,
        instant: Option<Instant>,
        durations: I,
    ) -> Result<Option<Instant>, CalendarError>
    where
        I: IntoIterator,
        I::Item: Into<CompositeDuration>,
    {
        durations
            .into_iter()
            .try_fold(instant, |instant, duration| self.shift(instant, duration))
    }

    /// Returns the fields that take `start` to `end`, so that
    /// `calendar.add(start, calendar.between(start, end)?) == Ok(end)`.
    ///
    /// # Errors
    ///
    /// - Returns [CalendarError::OutOfRange] if the calendar system cannot decompose the span.
    pub fn between(&self, start: Instant, end: Instant) -> Result<CompositeDuration, CalendarError> {
        self.system.fields_between(&start, &end)
    }
}

impl Calendar<Gregorian> {
    /// Orders two single-unit durations without calendar arithmetic, when that is possible.
    ///
    /// Returns `Some` only when the order follows from calendar addition being strictly
    /// increasing in each unit's amount:
    ///
    /// - both amounts are zero,
    /// - the amounts have different signs, or
    /// - the units are the same.
    ///
    /// Otherwise (e.g. `11 months` against `1 year`) returns `None`, and [Calendar::compare] must
    /// be used. Whenever this returns `Some` and [Calendar::compare] succeeds, they agree, for any
    /// reference instant.
    pub fn fast_compare(lhs: &CalendarDuration, rhs: &CalendarDuration) -> Option<Ordering> {
        let (lhs_sign, rhs_sign) = (lhs.amount().signum(), rhs.amount().signum());
        if lhs_sign != rhs_sign || lhs_sign == 0 {
            Some(lhs_sign.cmp(&rhs_sign))
        } else if lhs.unit() == rhs.unit() {
            Some(lhs.amount().cmp(&rhs.amount()))
        } else {
            None
        }
    }
}
