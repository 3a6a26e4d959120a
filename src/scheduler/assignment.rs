use super::eligibility::Constraints;
use super::state::{RunState, StaffState};
use super::types::ScoreWeights;
use super::Scheduler;
use crate::model::{Grid, ShiftKind};
use chrono::Datelike;

/// Écart sous lequel deux scores sont considérés égaux.
const TIE_TOLERANCE: f64 = 1e-9;

/// Score d'équité d'un candidat pour `kind` ; le plus bas gagne.
pub fn score(state: &StaffState, kind: ShiftKind, weights: &ScoreWeights) -> f64 {
    let mut score = 0.0;
    score += f64::from(state.total);
    score += weights.per_kind * f64::from(state.kind_count(kind));
    if state.last_shift == Some(kind) {
        score += weights.same_shift;
    }
    score += weights.fatigue * f64::from(state.consecutive_days);
    score
}

/// Candidats au score minimal, dans l'ordre du roster.
fn lowest(scored: &[(usize, f64)]) -> Vec<usize> {
    let best = scored
        .iter()
        .map(|(_, s)| *s)
        .fold(f64::INFINITY, f64::min);
    scored
        .iter()
        .filter(|(_, s)| (*s - best).abs() <= TIE_TOLERANCE)
        .map(|(i, _)| *i)
        .collect()
}

/// Remplissage glouton jour par jour, poste par poste.
pub(super) fn assign_month(scheduler: &Scheduler) -> Grid {
    let month = scheduler.month;
    let staff = &scheduler.staff;
    let opts = &scheduler.opts;
    let constraints = Constraints {
        availability: &scheduler.availability,
        rules: &scheduler.rules,
        opts,
    };

    let mut grid = Grid::with_days(month.days());
    let mut state = RunState::new(staff.len());

    for day in 1..=month.days() {
        let Some(date) = month.date(day) else {
            continue;
        };
        let required = scheduler.calendar.required_shifts(date);
        let mut worked: Vec<Option<ShiftKind>> = vec![None; staff.len()];

        for kind in ShiftKind::PRIORITY.into_iter().filter(|k| required.has(*k)) {
            let candidates: Vec<usize> = (0..staff.len())
                .filter(|&i| worked[i].is_none())
                .filter(|&i| match constraints.check(&staff[i], kind, date, state.get(i)) {
                    Ok(()) => true,
                    Err(reason) => {
                        tracing::trace!(day, shift = %kind, staff = %staff[i], %reason, "skipped");
                        false
                    }
                })
                .collect();

            if candidates.is_empty() {
                tracing::debug!(day, shift = %kind, "no eligible staff, slot left vacant");
                grid.set(day, kind, None);
                continue;
            }

            let scored: Vec<(usize, f64)> = candidates
                .iter()
                .map(|&i| (i, score(state.get(i), kind, &opts.weights)))
                .collect();
            let chosen = opts.tie_break.pick(&lowest(&scored), day);

            worked[chosen] = Some(kind);
            grid.set(day, kind, Some(staff[chosen].clone()));
        }

        let week = date.iso_week();
        for (i, shift) in worked.into_iter().enumerate() {
            state.get_mut(i).close_day(shift, week);
        }
        tracing::trace!(day, weekday = %date.weekday(), "day closed");
    }

    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn score_follows_weights() {
        let week = NaiveDate::from_ymd_opt(2026, 4, 6).unwrap().iso_week();
        let mut st = StaffState::default();
        st.close_day(Some(ShiftKind::Night), week);
        st.close_day(Some(ShiftKind::Night), week);
        let w = ScoreWeights::default();

        // 2 + 0.8*2 + 1.5 + 0.3*2
        assert!((score(&st, ShiftKind::Night, &w) - 5.7).abs() < 1e-9);
        // 2 + 0 + 0 + 0.3*2
        assert!((score(&st, ShiftKind::Early, &w) - 2.6).abs() < 1e-9);
        assert_eq!(score(&StaffState::default(), ShiftKind::Day, &w), 0.0);
    }

    #[test]
    fn equal_large_scores_tie() {
        let drifted = (0.1 + 0.2) * 100.0;
        assert_ne!(drifted, 30.0);
        assert_eq!(lowest(&[(0, drifted), (1, 30.0), (2, 30.5)]), vec![0, 1]);
    }
}
