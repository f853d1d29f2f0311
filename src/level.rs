//! Severity levels, print thresholds and enabled-level sets.
//!
//! [`Level`] orders severities from least to most severe so that a plain
//! ordinal comparison answers "is this at least as severe as that".
//! [`Threshold`] adds an `Off` sentinel above every level; it is only used
//! for the print threshold.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error returned when a level name cannot be parsed.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("no level named `{0}`")]
pub struct ParseLevelError(pub String);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    /// Every level, least severe first.
    pub const ALL: [Level; 5] = [
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
    ];

    /// Upper-case name used when printing.
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TRACE" => Ok(Self::Trace),
            "DEBUG" => Ok(Self::Debug),
            "INFO" => Ok(Self::Info),
            "WARN" | "WARNING" => Ok(Self::Warn),
            "ERROR" => Ok(Self::Error),
            _ => Err(ParseLevelError(s.to_owned())),
        }
    }
}

/// Minimum severity at which events are echoed to the console.
///
/// `Off` sits above [`Level::Error`], so no event ever meets it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Threshold {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    #[default]
    Off,
}

impl Threshold {
    /// Every threshold, lowest first.
    pub const ALL: [Threshold; 6] = [
        Threshold::Trace,
        Threshold::Debug,
        Threshold::Info,
        Threshold::Warn,
        Threshold::Error,
        Threshold::Off,
    ];

    /// Return `true` if `level` meets or exceeds this threshold.
    pub fn admits(self, level: Level) -> bool {
        (level as u8) >= (self as u8)
    }

    pub(crate) fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Threshold::Trace,
            1 => Threshold::Debug,
            2 => Threshold::Info,
            3 => Threshold::Warn,
            4 => Threshold::Error,
            _ => Threshold::Off,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Threshold::Off => "OFF",
            Threshold::Trace => "TRACE",
            Threshold::Debug => "DEBUG",
            Threshold::Info => "INFO",
            Threshold::Warn => "WARN",
            Threshold::Error => "ERROR",
        }
    }
}

impl From<Level> for Threshold {
    fn from(level: Level) -> Self {
        Threshold::from_u8(level as u8)
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Threshold {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("OFF") {
            return Ok(Threshold::Off);
        }
        s.parse::<Level>().map(Threshold::from)
    }
}

/// Set of enabled levels packed into a single byte.
///
/// The packed form lets a logger swap its whole set with one atomic store.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct LevelSet(u8);

impl LevelSet {
    const MASK: u8 = 0b1_1111;

    pub const fn all() -> Self {
        Self(Self::MASK)
    }

    pub const fn none() -> Self {
        Self(0)
    }

    pub fn of(levels: impl IntoIterator<Item = Level>) -> Self {
        Self(levels.into_iter().fold(0, |acc, level| acc | level.bit()))
    }

    /// `level` and every more severe level.
    pub fn at_or_above(level: Level) -> Self {
        Self::of(Level::ALL.into_iter().filter(|l| *l >= level))
    }

    pub fn contains(self, level: Level) -> bool {
        self.0 & level.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Level> {
        Level::ALL.into_iter().filter(move |l| self.contains(*l))
    }

    pub(crate) fn bits(self) -> u8 {
        self.0
    }

    pub(crate) fn from_bits(bits: u8) -> Self {
        Self(bits & Self::MASK)
    }
}

impl Default for LevelSet {
    fn default() -> Self {
        Self::all()
    }
}

impl From<Level> for LevelSet {
    fn from(level: Level) -> Self {
        LevelSet::of([level])
    }
}

impl<const N: usize> From<[Level; N]> for LevelSet {
    fn from(levels: [Level; N]) -> Self {
        LevelSet::of(levels)
    }
}

impl FromIterator<Level> for LevelSet {
    fn from_iter<I: IntoIterator<Item = Level>>(iter: I) -> Self {
        Self::of(iter)
    }
}

impl fmt::Debug for LevelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
