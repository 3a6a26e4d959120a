use crate::model::ShiftKind;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Pondérations du score d'équité (plus bas = prioritaire).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScoreWeights {
    pub per_kind: f64,
    pub same_shift: f64,
    pub fatigue: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            per_kind: 0.8,
            same_shift: 1.5,
            fatigue: 0.3,
        }
    }
}

/// Départage des candidats à score égal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TieBreak {
    /// Le premier dans l'ordre du roster.
    #[default]
    RosterOrder,
    /// Rotation parmi les ex æquo selon le jour du mois.
    RotateByDay,
}

impl TieBreak {
    /// `tied` est non vide et dans l'ordre du roster.
    pub fn pick(self, tied: &[usize], day: u32) -> usize {
        match self {
            TieBreak::RosterOrder => tied[0],
            TieBreak::RotateByDay => tied[(day as usize).saturating_sub(1) % tied.len()],
        }
    }
}

/// Options d'assignation
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AssignOptions {
    pub max_consecutive_days: u32,
    /// Nombre de jours consécutifs sur le même poste au-delà duquel il est refusé
    /// (2 : trois d'affilée au maximum).
    pub max_same_shift_streak: u32,
    pub weights: ScoreWeights,
    pub tie_break: TieBreak,
}

impl Default for AssignOptions {
    fn default() -> Self {
        Self {
            max_consecutive_days: 5,
            max_same_shift_streak: 2,
            weights: ScoreWeights::default(),
            tie_break: TieBreak::default(),
        }
    }
}

/// Raison pour laquelle une personne ne peut pas prendre un poste.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ineligible {
    Unavailable,
    WeekendOff,
    ShiftNotAllowed,
    TooManyConsecutiveDays,
    RestAfterLate,
    RestAfterNight,
    SameShiftStreak,
    WeeklyCap,
}

impl fmt::Display for Ineligible {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Ineligible::Unavailable => "unavailable",
            Ineligible::WeekendOff => "weekend off",
            Ineligible::ShiftNotAllowed => "shift not allowed",
            Ineligible::TooManyConsecutiveDays => "too many consecutive days",
            Ineligible::RestAfterLate => "rest after late shift",
            Ineligible::RestAfterNight => "rest after night shift",
            Ineligible::SameShiftStreak => "same shift streak",
            Ineligible::WeeklyCap => "weekly cap reached",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictKind {
    DoubleAssignment,
    UnknownStaff,
    Violation(Ineligible),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub staff: String,
    pub day: u32,
    pub shift: ShiftKind,
    pub kind: ConflictKind,
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("invalid target month {0:?}: expected e.g. 2026年4月")]
    Format(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
