use crate::parser::normalize;
use crate::scheduler::SchedError;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

static MONTH_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]{4})\s*年\s*([0-9]{1,2})\s*月").expect("month label regex")
});

/// Mois cible, tel que saisi sous la forme `2026年4月`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TargetMonth {
    pub year: i32,
    pub month: u32,
}

impl TargetMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, SchedError> {
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(SchedError::Format(format!("{year}年{month}月")));
        }
        Ok(Self { year, month })
    }

    /// Extrait (année, mois) d'un libellé ; chiffres pleine chasse acceptés.
    pub fn parse(label: &str) -> Result<Self, SchedError> {
        let text = normalize(label);
        let caps = MONTH_LABEL
            .captures(&text)
            .ok_or_else(|| SchedError::Format(label.to_string()))?;
        let year: i32 = caps[1]
            .parse()
            .map_err(|_| SchedError::Format(label.to_string()))?;
        let month: u32 = caps[2]
            .parse()
            .map_err(|_| SchedError::Format(label.to_string()))?;
        Self::new(year, month).map_err(|_| SchedError::Format(label.to_string()))
    }

    pub fn first_day(&self) -> NaiveDate {
        // validé à la construction
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Nombre de jours du mois (années bissextiles comprises).
    pub fn days(&self) -> u32 {
        let first = self.first_day();
        let next = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
        };
        next.map_or(31, |n| n.signed_duration_since(first).num_days() as u32)
    }

    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }
}

impl FromStr for TargetMonth {
    type Err = SchedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TargetMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}年{}月", self.year, self.month)
    }
}
