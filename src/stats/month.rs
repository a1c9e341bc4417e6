use std::fmt;
use std::fmt::{Display, Formatter};

use time::{Date, Month};

/// A calendar month, used to bucket transactions by the year-month of their date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: Month
}

impl YearMonth {
    pub fn previous(self) -> Self {
        match self.month {
            Month::January => Self { year: self.year - 1, month: Month::December },
            month => Self { year: self.year, month: month.previous() }
        }
    }

    pub fn contains(self, date: Date) -> bool {
        YearMonth::from(date) == self
    }
}

impl From<Date> for YearMonth {
    fn from(date: Date) -> Self {
        Self { year: date.year(), month: date.month() }
    }
}

impl Display for YearMonth {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{:04}-{:02}", self.year, u8::from(self.month))
    }
}
