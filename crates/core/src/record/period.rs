//! Calendar periods and the figure kinds stored for each of them.

use std::fmt;

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Month {
    /// January.
    Jan,
    /// February.
    Feb,
    /// March.
    Mar,
    /// April.
    Apr,
    /// May.
    May,
    /// June.
    Jun,
    /// July.
    Jul,
    /// August.
    Aug,
    /// September.
    Sep,
    /// October.
    Oct,
    /// November.
    Nov,
    /// December.
    Dec,
}

impl Month {
    /// All months in calendar order.
    pub const ALL: [Self; 12] = [
        Self::Jan,
        Self::Feb,
        Self::Mar,
        Self::Apr,
        Self::May,
        Self::Jun,
        Self::Jul,
        Self::Aug,
        Self::Sep,
        Self::Oct,
        Self::Nov,
        Self::Dec,
    ];

    /// Lower-case field prefix (`"jan"`).
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Jan => "jan",
            Self::Feb => "feb",
            Self::Mar => "mar",
            Self::Apr => "apr",
            Self::May => "may",
            Self::Jun => "jun",
            Self::Jul => "jul",
            Self::Aug => "aug",
            Self::Sep => "sep",
            Self::Oct => "oct",
            Self::Nov => "nov",
            Self::Dec => "dec",
        }
    }

    /// Zero-based position in the year.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Parses a field prefix, ignoring case.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.key().eq_ignore_ascii_case(key))
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A calendar quarter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Quarter {
    /// January to March.
    Q1,
    /// April to June.
    Q2,
    /// July to September.
    Q3,
    /// October to December.
    Q4,
}

impl Quarter {
    /// All quarters in order.
    pub const ALL: [Self; 4] = [Self::Q1, Self::Q2, Self::Q3, Self::Q4];

    /// Lower-case field prefix (`"q1"`).
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Q1 => "q1",
            Self::Q2 => "q2",
            Self::Q3 => "q3",
            Self::Q4 => "q4",
        }
    }

    /// Zero-based position in the year.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The three months aggregated into this quarter.
    #[must_use]
    pub const fn months(self) -> [Month; 3] {
        match self {
            Self::Q1 => [Month::Jan, Month::Feb, Month::Mar],
            Self::Q2 => [Month::Apr, Month::May, Month::Jun],
            Self::Q3 => [Month::Jul, Month::Aug, Month::Sep],
            Self::Q4 => [Month::Oct, Month::Nov, Month::Dec],
        }
    }

    /// Parses a field prefix, ignoring case.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|q| q.key().eq_ignore_ascii_case(key))
    }
}

/// Either a month or a quarter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    /// A single month.
    Month(Month),
    /// A quarter aggregate.
    Quarter(Quarter),
}

impl Period {
    /// All sixteen periods: months first, then quarters.
    pub fn all() -> impl Iterator<Item = Self> {
        Month::ALL
            .into_iter()
            .map(Self::Month)
            .chain(Quarter::ALL.into_iter().map(Self::Quarter))
    }

    /// Lower-case field prefix.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Month(m) => m.key(),
            Self::Quarter(q) => q.key(),
        }
    }

    /// Parses a field prefix, ignoring case.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Month::from_key(key)
            .map(Self::Month)
            .or_else(|| Quarter::from_key(key).map(Self::Quarter))
    }
}

/// Which of the three figures of a period a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FigureKind {
    /// Actual.
    Ac,
    /// Forecast.
    Fc,
    /// Achievement percentage, always derived.
    Diff,
}

impl FigureKind {
    /// All kinds in column order.
    pub const ALL: [Self; 3] = [Self::Ac, Self::Fc, Self::Diff];

    /// Lower-case field suffix (`"ac"`).
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Ac => "ac",
            Self::Fc => "fc",
            Self::Diff => "diff",
        }
    }

    /// Parses a field suffix, ignoring case.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.key().eq_ignore_ascii_case(key))
    }
}

/// Column name for a period figure, e.g. `jan_ac` or `q3_diff`.
#[must_use]
pub fn field_name(period: Period, kind: FigureKind) -> String {
    format!("{}_{}", period.key(), kind.key())
}

/// Splits a field name like `"Jan_AC"` into its period and kind.
#[must_use]
pub fn parse_field_name(name: &str) -> Option<(Period, FigureKind)> {
    let (period, kind) = name.split_once('_')?;
    Some((Period::from_key(period)?, FigureKind::from_key(kind)?))
}
