use super::state::StaffState;
use super::types::{AssignOptions, Ineligible};
use crate::calendar::is_weekend;
use crate::model::{AvailabilityMap, RuleBook, ShiftKind};
use chrono::{Datelike, NaiveDate};

/// Contraintes fixes d'une génération (souhaits, règles, options).
#[derive(Debug, Clone, Copy)]
pub struct Constraints<'a> {
    pub availability: &'a AvailabilityMap,
    pub rules: &'a RuleBook,
    pub opts: &'a AssignOptions,
}

impl Constraints<'_> {
    /// Vérifie qu'une personne peut prendre `kind` le jour `date`.
    /// Ne modifie rien ; l'état est celui d'avant la journée.
    pub fn check(
        &self,
        staff: &str,
        kind: ShiftKind,
        date: NaiveDate,
        state: &StaffState,
    ) -> Result<(), Ineligible> {
        if !self.availability.permits(staff, date.day(), kind) {
            return Err(Ineligible::Unavailable);
        }

        let rule = self.rules.get(staff);
        if rule.weekend_off && is_weekend(date) {
            return Err(Ineligible::WeekendOff);
        }
        if rule.allowed.is_some_and(|set| !set.has(kind)) {
            return Err(Ineligible::ShiftNotAllowed);
        }

        if state.consecutive_days >= self.opts.max_consecutive_days {
            return Err(Ineligible::TooManyConsecutiveDays);
        }

        // après un 準夜 : 準夜 ou 夜勤 ; après un 夜勤 : seulement 夜勤
        match state.last_shift {
            Some(ShiftKind::Late) if !matches!(kind, ShiftKind::Late | ShiftKind::Night) => {
                return Err(Ineligible::RestAfterLate);
            }
            Some(ShiftKind::Night) if kind != ShiftKind::Night => {
                return Err(Ineligible::RestAfterNight);
            }
            _ => {}
        }

        if state.last_shift == Some(kind)
            && state.consecutive_same >= self.opts.max_same_shift_streak
        {
            return Err(Ineligible::SameShiftStreak);
        }

        if let Some(max) = rule.weekly_max {
            if state.week_count(date.iso_week()) >= max {
                return Err(Ineligible::WeeklyCap);
            }
        }

        Ok(())
    }

    pub fn is_eligible(
        &self,
        staff: &str,
        kind: ShiftKind,
        date: NaiveDate,
        state: &StaffState,
    ) -> bool {
        self.check(staff, kind, date, state).is_ok()
    }
}
