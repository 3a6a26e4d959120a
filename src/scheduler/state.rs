use crate::model::ShiftKind;
use chrono::IsoWeek;
use std::collections::HashMap;

/// État courant d'une personne pendant une génération.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaffState {
    pub last_shift: Option<ShiftKind>,
    pub consecutive_days: u32,
    pub consecutive_same: u32,
    pub total: u32,
    per_kind: [u32; 4],
    weekly: HashMap<IsoWeek, u32>,
}

impl StaffState {
    pub fn kind_count(&self, kind: ShiftKind) -> u32 {
        self.per_kind[kind.index()]
    }

    pub fn week_count(&self, week: IsoWeek) -> u32 {
        self.weekly.get(&week).copied().unwrap_or(0)
    }

    /// Fin de journée : appelée exactement une fois par jour et par personne.
    pub fn close_day(&mut self, worked: Option<ShiftKind>, week: IsoWeek) {
        match worked {
            Some(kind) => {
                self.total += 1;
                self.per_kind[kind.index()] += 1;
                *self.weekly.entry(week).or_insert(0) += 1;
                self.consecutive_same = if self.last_shift == Some(kind) {
                    self.consecutive_same + 1
                } else {
                    1
                };
                self.last_shift = Some(kind);
                self.consecutive_days += 1;
            }
            None => {
                self.consecutive_days = 0;
                self.consecutive_same = 0;
                self.last_shift = None;
            }
        }
    }
}

/// États de tout le roster, indexés comme le roster. Propre à une génération.
#[derive(Debug, Clone, Default)]
pub struct RunState {
    staff: Vec<StaffState>,
}

impl RunState {
    pub fn new(roster_len: usize) -> Self {
        Self {
            staff: vec![StaffState::default(); roster_len],
        }
    }

    pub fn get(&self, idx: usize) -> &StaffState {
        &self.staff[idx]
    }

    pub fn get_mut(&mut self, idx: usize) -> &mut StaffState {
        &mut self.staff[idx]
    }
}
