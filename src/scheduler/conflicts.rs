use super::eligibility::Constraints;
use super::state::RunState;
use super::{Conflict, ConflictKind, Scheduler};
use crate::model::{Grid, ShiftKind};
use chrono::Datelike;

pub(super) fn detect_conflicts(scheduler: &Scheduler, grid: &Grid) -> Vec<Conflict> {
    let staff = &scheduler.staff;
    let constraints = Constraints {
        availability: &scheduler.availability,
        rules: &scheduler.rules,
        opts: &scheduler.opts,
    };
    let mut state = RunState::new(staff.len());
    let mut out = Vec::new();

    for day in 1..=scheduler.month.days() {
        let Some(date) = scheduler.month.date(day) else {
            continue;
        };
        let mut worked: Vec<Option<ShiftKind>> = vec![None; staff.len()];

        if let Some(slots) = grid.day(day) {
            for kind in ShiftKind::PRIORITY {
                let Some(Some(name)) = slots.get(&kind) else {
                    continue;
                };
                let conflict = |kind_of: ConflictKind| Conflict {
                    staff: name.clone(),
                    day,
                    shift: kind,
                    kind: kind_of,
                };

                let Some(idx) = staff.iter().position(|s| s == name) else {
                    out.push(conflict(ConflictKind::UnknownStaff));
                    continue;
                };
                if worked[idx].is_some() {
                    out.push(conflict(ConflictKind::DoubleAssignment));
                    continue;
                }
                if let Err(reason) = constraints.check(name, kind, date, state.get(idx)) {
                    out.push(conflict(ConflictKind::Violation(reason)));
                }
                worked[idx] = Some(kind);
            }
        }

        let week = date.iso_week();
        for (i, shift) in worked.into_iter().enumerate() {
            state.get_mut(i).close_day(shift, week);
        }
    }

    out
}
