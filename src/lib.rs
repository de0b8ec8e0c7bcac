//! # calspan
//!
//! Durations measured in calendar units (`30 seconds`, `2 months`, `1 year`), combined field by
//! field, and compared or applied through explicit calendar arithmetic.
//!
//! A month is not a fixed number of days, and a year is not either. So this crate never converts
//! between units on its own. Instead, a [Calendar] answers questions like "is `1 month` equal to
//! `31 days`?" by adding both to a *reference instant* and comparing where they land.
//!
//! ## Examples
//!
//! Build durations with integer sugar, and add them together:
//!
//! ```
//! use calspan::prelude::*;
//!
//! let span = 1.day() + 5.minutes();
//! assert_eq!(CompositeDuration::new(0, 0, 1, 0, 5, 0), span);
//!
//! // fields never carry: 70 seconds is not 1 minute, 10 seconds
//! let span = 70.seconds() + CompositeDuration::ZERO;
//! assert_eq!(70, span.seconds());
//! ```
//!
//! Compare them on a calendar. The answer depends on the reference instant, which is explicit:
//!
//! ```
//! use calspan::prelude::*;
//!
//! let epoch = Calendar::default(); // Gregorian, from 1970-01-01T00:00:00
//! assert!(epoch.equals(1.year(), 365.days()).unwrap());
//! assert!(epoch.less_than(59.seconds(), 1.minute()).unwrap());
//!
//! let leap_year = epoch.with_reference("2016-01-01".parse().unwrap());
//! assert!(leap_year.less_than(365.days(), 1.year()).unwrap());
//! ```
//!
//! Apply them to instants. An absent instant stays absent:
//!
//! ```
//! use calspan::prelude::*;
//!
//! let calendar = Calendar::default();
//! let start: Instant = "2015-07-15T00:00:00".parse().unwrap();
//!
//! let earlier = calendar.subtract(start, 1.day() + 5.minutes()).unwrap();
//! assert_eq!("2015-07-13T23:55:00", earlier.to_string());
//!
//! assert_eq!(Ok(None), calendar.shift(None, 5.days()));
//! ```
//!
//! ## Important Terms
//!
//! - **Calendar duration**: a signed amount of one [CalendarUnit], modeled by
//!   [CalendarDuration].
//! - **Composite duration**: one signed field per unit, modeled by [CompositeDuration]. Sums and
//!   differences of durations are composite.
//! - **Projection**: adding a duration to a calendar's reference instant. Equality and ordering
//!   of durations are equality and ordering of their projections.
//!
//! ## Prelude
//!
//! calspan provides a prelude module for convenience. It contains everything needed to interact
//! with the library, including the [ToCalendarDuration] sugar.
//!
//! Use it with:
//!
//! ```
//! use calspan::prelude::*;
//! ```
#![warn(missing_docs)]

mod calendar;
mod duration;
mod error;
mod instant;
mod literal;
mod unit;

pub use crate::calendar::{Calendar, CalendarSystem, Gregorian};
pub use crate::duration::{CalendarDuration, CompositeDuration};
pub use crate::error::{CalendarError, DurationError, InstantError};
pub use crate::instant::Instant;
pub use crate::literal::ToCalendarDuration;
pub use crate::unit::CalendarUnit;

/// A convenience module appropriate for glob imports (`use calspan::prelude::*;`).
pub mod prelude {
    #[doc(no_inline)]
    pub use crate::Calendar;
    #[doc(no_inline)]
    pub use crate::CalendarDuration;
    #[doc(no_inline)]
    pub use crate::CalendarError;
    #[doc(no_inline)]
    pub use crate::CalendarSystem;
    #[doc(no_inline)]
    pub use crate::CalendarUnit;
    #[doc(no_inline)]
    pub use crate::CompositeDuration;
    #[doc(no_inline)]
    pub use crate::DurationError;
    #[doc(no_inline)]
    pub use crate::Gregorian;
    #[doc(no_inline)]
    pub use crate::Instant;
    #[doc(no_inline)]
    pub use crate::InstantError;
    #[doc(no_inline)]
    pub use crate::ToCalendarDuration;
}
