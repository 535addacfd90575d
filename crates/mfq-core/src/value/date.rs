use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display};
use time::{Date as TimeDate, Month, format_description::BorrowedFormatItem, macros::format_description};

const FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

///
/// Date
///
/// Calendar date parsed from the fixed `yyyy-MM-dd` literal pattern.
///

#[derive(Clone, Copy, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Date(TimeDate);

impl Date {
    #[must_use]
    pub fn new_checked(y: i32, m: u8, d: u8) -> Option<Self> {
        let month = Month::try_from(m).ok()?;
        TimeDate::from_calendar_date(y, month, d).ok().map(Self)
    }

    /// Parse an ISO `YYYY-MM-DD` string into a `Date`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        TimeDate::parse(s, FORMAT).ok().map(Self)
    }

    #[must_use]
    pub const fn year(self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1–12)
    #[must_use]
    pub fn month(self) -> u8 {
        self.0.month().into()
    }

    #[must_use]
    pub const fn day(self) -> u8 {
        self.0.day()
    }
}

impl Debug for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Date({self})")
    }
}

impl Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
    }
}
