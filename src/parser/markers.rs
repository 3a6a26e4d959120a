use crate::model::{ShiftKind, ShiftSet};

/// Marqueur reconnu dans un morceau de souhait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// Poste acceptable ; plusieurs marqueurs s'additionnent.
    Shift(ShiftKind),
    /// « X uniquement » : remplace tous les autres marqueurs.
    Only(ShiftKind),
    /// Repos, congé annuel.
    Off,
    /// Déplacement professionnel, traité comme un repos.
    Travel,
}

/// Table des marqueurs (texte, sens). Recherche par inclusion.
pub const MARKERS: &[(&str, Marker)] = &[
    ("早番のみ", Marker::Only(ShiftKind::Early)),
    ("日勤のみ", Marker::Only(ShiftKind::Day)),
    ("準夜のみ", Marker::Only(ShiftKind::Late)),
    ("夜勤のみ", Marker::Only(ShiftKind::Night)),
    ("早番", Marker::Shift(ShiftKind::Early)),
    ("○", Marker::Shift(ShiftKind::Early)),
    ("日勤", Marker::Shift(ShiftKind::Day)),
    ("ー", Marker::Shift(ShiftKind::Day)),
    ("準夜", Marker::Shift(ShiftKind::Late)),
    ("☆", Marker::Shift(ShiftKind::Late)),
    ("夜勤", Marker::Shift(ShiftKind::Night)),
    ("●", Marker::Shift(ShiftKind::Night)),
    ("休み", Marker::Off),
    ("年休", Marker::Off),
    ("×", Marker::Off),
    ("出張", Marker::Travel),
];

/// Marqueurs présents dans `token`, dans l'ordre de la table.
pub fn scan(token: &str) -> Vec<Marker> {
    MARKERS
        .iter()
        .filter(|(text, _)| token.contains(text))
        .map(|(_, m)| *m)
        .collect()
}

/// Réduit une liste de marqueurs à un ensemble de postes.
///
/// `None` : aucun marqueur, pas de contrainte. `Some(vide)` : indisponible.
pub fn classify(markers: &[Marker]) -> Option<ShiftSet> {
    let only = ShiftKind::ALL
        .into_iter()
        .find(|k| markers.contains(&Marker::Only(*k)));
    if let Some(kind) = only {
        return Some(ShiftSet::only(kind));
    }

    let shifts: ShiftSet = markers
        .iter()
        .filter_map(|m| match m {
            Marker::Shift(k) => Some(*k),
            _ => None,
        })
        .collect();
    if !shifts.is_empty() {
        return Some(shifts);
    }

    if markers
        .iter()
        .any(|m| matches!(m, Marker::Off | Marker::Travel))
    {
        return Some(ShiftSet::empty());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_and_names_are_unioned() {
        let set = classify(&scan("12日 ○ or 夜勤"));
        assert_eq!(set, Some(ShiftSet::EARLY | ShiftSet::NIGHT));
    }

    #[test]
    fn only_marker_overrides_other_shifts() {
        assert_eq!(
            classify(&scan("3日 早番 準夜のみ")),
            Some(ShiftSet::LATE)
        );
        assert_eq!(classify(&scan("夜勤のみ")), Some(ShiftSet::NIGHT));
    }

    #[test]
    fn off_without_shift_is_unavailable() {
        assert_eq!(classify(&scan("5日休み")), Some(ShiftSet::empty()));
        assert_eq!(classify(&scan("5日 ×")), Some(ShiftSet::empty()));
        assert_eq!(classify(&scan("5日 出張")), Some(ShiftSet::empty()));
    }

    #[test]
    fn off_with_shift_keeps_the_shift() {
        assert_eq!(classify(&scan("5日 年休 or 日勤")), Some(ShiftSet::DAY));
    }

    #[test]
    fn unknown_text_is_unconstrained() {
        assert_eq!(classify(&scan("5日 よろしく")), None);
    }
}
