//! Jours ouvrés, week-ends et jours fériés.
//!
//! La table de fériés intégrée ne couvre que 2026 : toute autre année n'a
//! aucun férié, sauf dates ajoutées explicitement par la configuration.

use crate::model::ShiftSet;
use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::BTreeSet;

/// Année couverte par la table de référence.
pub const REFERENCE_YEAR: i32 = 2026;

const REFERENCE_HOLIDAYS: [(u32, u32); 18] = [
    (1, 1),
    (1, 12),
    (2, 11),
    (2, 23),
    (3, 20),
    (4, 29),
    (5, 3),
    (5, 4),
    (5, 5),
    (5, 6), // jour de substitution
    (7, 20),
    (8, 11),
    (9, 21),
    (9, 22), // jour « pont »
    (9, 23),
    (10, 12),
    (11, 3),
    (11, 23),
];

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Libellé court du jour de la semaine (月..日).
pub fn weekday_label(date: NaiveDate) -> char {
    match date.weekday() {
        Weekday::Mon => '月',
        Weekday::Tue => '火',
        Weekday::Wed => '水',
        Weekday::Thu => '木',
        Weekday::Fri => '金',
        Weekday::Sat => '土',
        Weekday::Sun => '日',
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayCalendar {
    dates: BTreeSet<NaiveDate>,
}

impl Default for HolidayCalendar {
    fn default() -> Self {
        Self::reference()
    }
}

impl HolidayCalendar {
    /// Table fixe de l'année de référence.
    pub fn reference() -> Self {
        let dates = REFERENCE_HOLIDAYS
            .iter()
            .filter_map(|(m, d)| NaiveDate::from_ymd_opt(REFERENCE_YEAR, *m, *d))
            .collect();
        Self { dates }
    }

    pub fn empty() -> Self {
        Self {
            dates: BTreeSet::new(),
        }
    }

    pub fn with_extra<I: IntoIterator<Item = NaiveDate>>(mut self, extra: I) -> Self {
        self.dates.extend(extra);
        self
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    /// Postes à pourvoir ce jour-là.
    pub fn required_shifts(&self, date: NaiveDate) -> ShiftSet {
        if is_weekend(date) || self.is_holiday(date) {
            ShiftSet::EARLY | ShiftSet::LATE | ShiftSet::NIGHT
        } else {
            ShiftSet::all()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn weekday_requires_all_four_shifts() {
        let cal = HolidayCalendar::reference();
        // 2026-04-01 est un mercredi
        assert_eq!(cal.required_shifts(ymd(2026, 4, 1)), ShiftSet::all());
        assert_eq!(weekday_label(ymd(2026, 4, 1)), '水');
    }

    #[test]
    fn weekend_and_holiday_drop_day_shift() {
        let cal = HolidayCalendar::reference();
        let reduced = ShiftSet::EARLY | ShiftSet::LATE | ShiftSet::NIGHT;
        assert_eq!(cal.required_shifts(ymd(2026, 4, 4)), reduced);
        assert_eq!(cal.required_shifts(ymd(2026, 4, 29)), reduced);
        assert!(cal.is_holiday(ymd(2026, 9, 22)));
    }

    #[test]
    fn other_years_have_no_holidays_unless_configured() {
        let cal = HolidayCalendar::reference();
        // 2027-04-29 est un jeudi
        assert!(!cal.is_holiday(ymd(2027, 4, 29)));
        assert_eq!(cal.required_shifts(ymd(2027, 4, 29)), ShiftSet::all());

        let cal = cal.with_extra([ymd(2027, 4, 29)]);
        assert!(cal.is_holiday(ymd(2027, 4, 29)));
    }
}
