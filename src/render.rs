//! Formats texte canoniques : tableau à barres verticales et récapitulatif CSV.

use crate::calendar::weekday_label;
use crate::model::{Counts, Grid, ShiftKind, ShiftTally};
use crate::month::TargetMonth;
use crate::parser::{extract_day, extract_month};
use std::collections::BTreeSet;
use crate::scheduler::SchedError;
use std::fmt::Write as _;

/// Cellules considérées comme vacantes lors de la relecture.
pub const VACANT_PLACEHOLDERS: [&str; 2] = ["欠員", "空欄"];

const TABLE_HEADER: &str = "| 日付 | 曜 | 早番 | 日勤 | 準夜 | 夜勤 |";
const TABLE_SEPARATOR: &str = "|---|---|---|---|---|---|";
const COUNTS_HEADER: &str = "スタッフ,早番,日勤,準夜,夜勤,合計";
const COUNTS_HEADER_PREFIXES: [&str; 3] = ["スタッフ", "医師", "医者"];

pub fn render_table(month_text: &str, grid: &Grid) -> Result<String, SchedError> {
    let month = TargetMonth::parse(month_text)?;
    Ok(render_grid(month, grid))
}

/// Une ligne par jour, jours croissants ; un créneau vacant est une cellule vide.
pub fn render_grid(month: TargetMonth, grid: &Grid) -> String {
    let mut lines = vec![TABLE_HEADER.to_string(), TABLE_SEPARATOR.to_string()];
    for (day, slots) in grid.days() {
        let weekday = month.date(day).map_or(' ', weekday_label);
        let mut line = format!("| {}/{} | {} |", month.month, day, weekday);
        for kind in ShiftKind::ALL {
            let name = slots.get(&kind).and_then(|s| s.as_deref()).unwrap_or("");
            let _ = write!(line, " {name} |");
        }
        lines.push(line);
    }
    lines.join("\n")
}

pub fn render_counts(counts: &Counts) -> String {
    let mut lines = vec![COUNTS_HEADER.to_string()];
    for row in counts.iter() {
        let t = &row.tally;
        lines.push(format!(
            "{},{},{},{},{},{}",
            row.name,
            t.get(ShiftKind::Early),
            t.get(ShiftKind::Day),
            t.get(ShiftKind::Late),
            t.get(ShiftKind::Night),
            t.total()
        ));
    }
    lines.join("\n")
}

/// Lignes de données du tableau : cellules découpées, vides conservées.
fn table_rows(text: &str) -> impl Iterator<Item = Vec<&str>> {
    text.lines()
        .map(str::trim)
        .filter(|line| line.contains('|'))
        .map(|line| {
            let inner = line.strip_prefix('|').unwrap_or(line);
            let inner = inner.strip_suffix('|').unwrap_or(inner);
            inner.split('|').map(str::trim).collect::<Vec<_>>()
        })
        .filter(|cells| {
            let first = cells.first().copied().unwrap_or("");
            first != "日付" && !first.starts_with("---")
        })
        .filter(|cells| cells.len() >= 6)
}

fn occupant(cell: &str) -> Option<&str> {
    (!cell.is_empty() && !VACANT_PLACEHOLDERS.contains(&cell)).then_some(cell)
}

/// Recompte les postes à partir d'un tableau rendu (ou retouché).
/// Les personnes apparaissent dans l'ordre de lecture.
pub fn recover_counts(table_text: &str) -> Counts {
    let mut counts = Counts::new();
    for cells in table_rows(table_text) {
        for (kind, cell) in ShiftKind::ALL.into_iter().zip(&cells[2..6]) {
            if let Some(name) = occupant(cell) {
                counts.entry_mut(name).tally.add(kind);
            }
        }
    }
    counts
}

/// Relit un tableau en grille ; les lignes sans date lisible sont ignorées.
pub fn parse_table(table_text: &str) -> Grid {
    let mut grid = Grid::default();
    for cells in table_rows(table_text) {
        let Some(day) = extract_day(cells[0]) else {
            tracing::trace!(cell = cells[0], "table row without date");
            continue;
        };
        for (kind, cell) in ShiftKind::ALL.into_iter().zip(&cells[2..6]) {
            if let Some(name) = occupant(cell) {
                grid.set(day, kind, Some(name.to_string()));
            }
        }
    }
    grid
}

/// Mois lus dans la colonne des dates (cellules `M/D` ou `M月D日`).
pub fn table_months(table_text: &str) -> BTreeSet<u32> {
    table_rows(table_text)
        .filter_map(|cells| extract_month(cells[0]))
        .collect()
}

/// Relit un récapitulatif ; le total est recalculé à partir des quatre colonnes.
pub fn parse_counts(text: &str) -> Counts {
    let mut counts = Counts::new();
    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if COUNTS_HEADER_PREFIXES.iter().any(|p| line.starts_with(p)) {
            continue;
        }
        let parts: Vec<&str> = line.split(',').map(str::trim).collect();
        if parts.len() < 6 {
            continue;
        }
        let Ok(values) = parts[1..5]
            .iter()
            .map(|p| p.parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
        else {
            continue;
        };
        let mut tally = ShiftTally::default();
        for (kind, n) in ShiftKind::ALL.into_iter().zip(values) {
            tally.set(kind, n);
        }
        counts.entry_mut(parts[0]).tally = tally;
    }
    counts
}
