//! Calendar months in display order.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar month. Declaration order is the band order on the chart's y axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    /// All twelve months, January first.
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// Month from its 1-based number as it appears in the dataset.
    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1..=12 => Some(Self::ALL[usize::from(number - 1)]),
            _ => None,
        }
    }

    /// 1-based month number.
    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    /// 0-based month index (the `data-month` attribute value).
    pub fn index(self) -> usize {
        self as usize
    }

    /// English month name.
    pub fn name(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_round_trip() {
        for (i, month) in Month::ALL.iter().enumerate() {
            assert_eq!(month.index(), i);
            assert_eq!(Month::from_number(month.number()), Some(*month));
        }
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(Month::from_number(0), None);
        assert_eq!(Month::from_number(13), None);
    }

    #[test]
    fn test_names() {
        assert_eq!(Month::January.name(), "January");
        assert_eq!(Month::December.to_string(), "December");
    }
}
