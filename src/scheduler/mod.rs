mod assignment;
mod conflicts;
mod eligibility;
mod state;
mod types;

pub use assignment::score;
pub use eligibility::Constraints;
pub use state::{RunState, StaffState};
pub use types::{AssignOptions, Conflict, ConflictKind, Ineligible, SchedError, ScoreWeights, TieBreak};

use crate::calendar::HolidayCalendar;
use crate::model::{AvailabilityMap, Counts, Grid, RuleBook, StaffRequest};
use crate::month::TargetMonth;
use crate::parser::{parse_individual_rules, parse_requests};
use crate::render;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Résultat d'une génération.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Generated {
    pub run_id: Uuid,
    pub month: TargetMonth,
    pub grid: Grid,
    pub counts: Counts,
}

impl Generated {
    pub fn table_text(&self) -> String {
        render::render_grid(self.month, &self.grid)
    }

    pub fn counts_text(&self) -> String {
        render::render_counts(&self.counts)
    }
}

/// Scheduler : regroupe les entrées d'une génération mensuelle.
///
/// Chaque appel à [`Scheduler::run`] repart d'un état vierge ; rien n'est
/// partagé entre deux générations.
#[derive(Debug, Clone)]
pub struct Scheduler {
    month: TargetMonth,
    staff: Vec<String>,
    availability: AvailabilityMap,
    rules: RuleBook,
    calendar: HolidayCalendar,
    opts: AssignOptions,
}

impl Scheduler {
    /// L'ordre du roster sert au départage ; les doublons sont ignorés.
    pub fn new<S: AsRef<str>>(month: TargetMonth, staff: &[S]) -> Self {
        let mut roster: Vec<String> = Vec::with_capacity(staff.len());
        for name in staff.iter().map(|s| s.as_ref().trim()) {
            if name.is_empty() || roster.iter().any(|r| r == name) {
                tracing::warn!(name, "ignoring blank or duplicate staff name");
                continue;
            }
            roster.push(name.to_string());
        }
        Self {
            month,
            staff: roster,
            availability: AvailabilityMap::new(),
            rules: RuleBook::new(),
            calendar: HolidayCalendar::reference(),
            opts: AssignOptions::default(),
        }
    }

    pub fn with_requests(mut self, requests: &[StaffRequest]) -> Self {
        self.availability = parse_requests(requests);
        self
    }

    pub fn with_rule_lines<L: AsRef<str>>(mut self, lines: &[L]) -> Self {
        self.rules = parse_individual_rules(lines, self.staff.as_slice());
        self
    }

    pub fn with_calendar(mut self, calendar: HolidayCalendar) -> Self {
        self.calendar = calendar;
        self
    }

    pub fn with_options(mut self, opts: AssignOptions) -> Self {
        self.opts = opts;
        self
    }

    pub fn month(&self) -> TargetMonth {
        self.month
    }

    pub fn staff(&self) -> &[String] {
        &self.staff
    }

    pub fn availability(&self) -> &AvailabilityMap {
        &self.availability
    }

    pub fn rules(&self) -> &RuleBook {
        &self.rules
    }

    pub fn calendar(&self) -> &HolidayCalendar {
        &self.calendar
    }

    pub fn options(&self) -> &AssignOptions {
        &self.opts
    }

    /// Génère le tableau du mois et les compteurs par personne.
    pub fn run(&self) -> Generated {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("generate", run = %run_id, month = %self.month);
        let _enter = span.enter();

        let grid = assignment::assign_month(self);
        let counts = Counts::tally(self.staff.as_slice(), &grid);
        let vacant = grid.vacancies().len();
        tracing::info!(staff = self.staff.len(), vacant, "schedule generated");

        Generated {
            run_id,
            month: self.month,
            grid,
            counts,
        }
    }

    /// Rejoue une grille (éventuellement retouchée à la main) et liste les
    /// affectations qui enfreignent les contraintes.
    pub fn detect_conflicts(&self, grid: &Grid) -> Vec<Conflict> {
        conflicts::detect_conflicts(self, grid)
    }
}

/// Génération complète à partir des entrées brutes.
///
/// Seul un libellé de mois illisible est une erreur ; tout le reste est
/// toléré (texte ignoré, créneaux vacants).
pub fn generate<S: AsRef<str>, L: AsRef<str>>(
    month_text: &str,
    staff: &[S],
    requests: &[StaffRequest],
    rule_lines: &[L],
) -> Result<(Grid, Counts), SchedError> {
    let month = TargetMonth::parse(month_text)?;
    let generated = Scheduler::new(month, staff)
        .with_requests(requests)
        .with_rule_lines(rule_lines)
        .run();
    Ok((generated.grid, generated.counts))
}
