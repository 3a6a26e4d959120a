use super::normalize;
use crate::model::{PersonRule, RuleBook, ShiftSet};
use once_cell::sync::Lazy;
use regex::Regex;

static WEEKLY_CAP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"週\s*([0-9]+)\s*回").expect("weekly cap regex"));

/// Restrictions de postes, appliquées dans cet ordre (la dernière trouvée l'emporte).
pub const RULE_MARKERS: &[(&str, ShiftSet)] = &[
    ("早番/日勤のみ", ShiftSet::EARLY.union(ShiftSet::DAY)),
    ("早番もしくは日勤のみ", ShiftSet::EARLY.union(ShiftSet::DAY)),
    ("夜勤のみ", ShiftSet::NIGHT),
];

/// Applique une ligne (déjà normalisée) à la règle d'une personne.
/// Seuls les champs mentionnés dans la ligne sont modifiés.
pub fn parse_rule_line(line: &str, rule: &mut PersonRule) {
    if line.contains("土日") && line.contains('休') {
        rule.weekend_off = true;
    }
    if let Some(cap) = WEEKLY_CAP
        .captures_iter(line)
        .filter_map(|c| c[1].parse::<u32>().ok())
        .last()
    {
        rule.weekly_max = Some(cap);
    }
    if let Some((_, set)) = RULE_MARKERS.iter().rev().find(|(text, _)| line.contains(text)) {
        rule.allowed = Some(*set);
    }
}

/// Règles de chaque personne citée dans les lignes. Une ligne peut viser
/// plusieurs noms ; une ligne sans nom connu est ignorée.
pub fn parse_individual_rules<S: AsRef<str>, L: AsRef<str>>(lines: &[L], staff: &[S]) -> RuleBook {
    let mut book = RuleBook::new();
    for line in lines {
        let line = normalize(line.as_ref());
        let mut matched = false;
        for name in staff.iter().map(AsRef::as_ref) {
            if name.is_empty() || !line.contains(name) {
                continue;
            }
            matched = true;
            parse_rule_line(&line, book.entry_mut(name));
        }
        if !matched {
            tracing::trace!(line = %line, "rule line matches no staff");
        }
    }
    book
}
