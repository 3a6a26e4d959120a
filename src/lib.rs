#![forbid(unsafe_code)]
//! Touban : génération locale d'un tableau de service mensuel (sans BD).
//!
//! - Quatre postes par jour : 早番, 日勤, 準夜, 夜勤 (pas de 日勤 le week-end et les fériés).
//! - Souhaits et règles individuelles en texte libre, lus par une table de marqueurs.
//! - Assignation gloutonne par score d'équité, départage déterministe.
//! - Rendu texte canonique (tableau + récapitulatif) et relecture d'un tableau retouché.

pub mod calendar;
#[cfg(feature = "serde")]
pub mod config;
#[cfg(feature = "serde")]
pub mod io;
pub mod model;
pub mod month;
pub mod parser;
pub mod render;
pub mod report;
pub mod scheduler;

pub use calendar::HolidayCalendar;
#[cfg(feature = "serde")]
pub use config::RosterConfig;
pub use model::{
    AvailabilityMap, Counts, Grid, PersonRule, RuleBook, ShiftKind, ShiftSet, ShiftTally,
    StaffCount, StaffRequest,
};
pub use month::TargetMonth;
pub use render::{parse_counts, parse_table, recover_counts, render_counts, render_table};
pub use report::{missing_submissions, totals_with_travel, travel_days, TravelTotal};
pub use scheduler::{
    generate, AssignOptions, Conflict, ConflictKind, Generated, Ineligible, SchedError, Scheduler,
    ScoreWeights, TieBreak,
};
