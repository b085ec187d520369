//! Discretized target yield

use serde::{Deserialize, Serialize};

use crate::error::CalcError;

/// Target yield class (3 to 7) used as the innermost table key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct YieldClass(u8);

impl YieldClass {
    pub const MIN: u8 = 3;
    pub const MAX: u8 = 7;

    /// All classes in ascending order
    pub const ALL: [YieldClass; 5] = [
        YieldClass(3),
        YieldClass(4),
        YieldClass(5),
        YieldClass(6),
        YieldClass(7),
    ];

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX)
            .contains(&value)
            .then_some(YieldClass(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Position of this class inside a table row
    pub fn index(self) -> usize {
        usize::from(self.0 - Self::MIN)
    }

    /// Class closest to a continuous yield value.
    ///
    /// Classes are scanned in ascending order and only a strictly smaller
    /// distance replaces the current best, so an exact tie (4.5) goes to the
    /// lower class.
    pub fn nearest(yield_value: f64) -> Self {
        let distance = |class: YieldClass| (f64::from(class.0) - yield_value).abs();
        let mut best = Self::ALL[0];
        for candidate in Self::ALL.into_iter().skip(1) {
            if distance(candidate) < distance(best) {
                best = candidate;
            }
        }
        best
    }
}

impl TryFrom<u8> for YieldClass {
    type Error = CalcError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        YieldClass::new(value).ok_or_else(|| {
            CalcError::Configuration(format!(
                "yield class {} outside {}..={}",
                value,
                YieldClass::MIN,
                YieldClass::MAX
            ))
        })
    }
}

impl From<YieldClass> for u8 {
    fn from(class: YieldClass) -> Self {
        class.0
    }
}

impl std::fmt::Display for YieldClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
