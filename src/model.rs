use bitflags::bitflags;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Type de poste (quatre postes par jour).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ShiftKind {
    Early,
    Day,
    Late,
    Night,
}

impl ShiftKind {
    /// Ordre d'affichage (colonnes du tableau).
    pub const ALL: [ShiftKind; 4] = [
        ShiftKind::Early,
        ShiftKind::Day,
        ShiftKind::Late,
        ShiftKind::Night,
    ];

    /// Ordre de remplissage dans une journée : la nuit d'abord.
    pub const PRIORITY: [ShiftKind; 4] = [
        ShiftKind::Night,
        ShiftKind::Early,
        ShiftKind::Day,
        ShiftKind::Late,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ShiftKind::Early => "早番",
            ShiftKind::Day => "日勤",
            ShiftKind::Late => "準夜",
            ShiftKind::Night => "夜勤",
        }
    }

    pub fn symbol(self) -> char {
        match self {
            ShiftKind::Early => '○',
            ShiftKind::Day => 'ー',
            ShiftKind::Late => '☆',
            ShiftKind::Night => '●',
        }
    }

    pub fn code(self) -> char {
        match self {
            ShiftKind::Early => 'E',
            ShiftKind::Day => 'D',
            ShiftKind::Late => 'S',
            ShiftKind::Night => 'N',
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            ShiftKind::Early => 0,
            ShiftKind::Day => 1,
            ShiftKind::Late => 2,
            ShiftKind::Night => 3,
        }
    }
}

impl fmt::Display for ShiftKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

bitflags! {
    /// Ensemble de postes. L'ensemble vide signifie « indisponible ».
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ShiftSet: u8 {
        const EARLY = 0b0001;
        const DAY = 0b0010;
        const LATE = 0b0100;
        const NIGHT = 0b1000;
    }
}

impl ShiftSet {
    pub fn only(kind: ShiftKind) -> Self {
        match kind {
            ShiftKind::Early => ShiftSet::EARLY,
            ShiftKind::Day => ShiftSet::DAY,
            ShiftKind::Late => ShiftSet::LATE,
            ShiftKind::Night => ShiftSet::NIGHT,
        }
    }

    pub fn has(self, kind: ShiftKind) -> bool {
        self.contains(Self::only(kind))
    }

    pub fn kinds(self) -> impl Iterator<Item = ShiftKind> {
        ShiftKind::ALL.into_iter().filter(move |k| self.has(*k))
    }
}

impl FromIterator<ShiftKind> for ShiftSet {
    fn from_iter<I: IntoIterator<Item = ShiftKind>>(iter: I) -> Self {
        iter.into_iter()
            .fold(ShiftSet::empty(), |acc, k| acc | ShiftSet::only(k))
    }
}

/// Souhait déposé par une personne (texte libre).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StaffRequest {
    pub staff: String,
    pub text: String,
}

impl StaffRequest {
    pub fn new<S: Into<String>, T: Into<String>>(staff: S, text: T) -> Self {
        Self {
            staff: staff.into(),
            text: text.into(),
        }
    }
}

/// Disponibilités par personne et par jour du mois.
///
/// Absence d'entrée = pas de contrainte ; ensemble vide = repos toute la journée.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilityMap {
    entries: HashMap<String, BTreeMap<u32, ShiftSet>>,
}

impl AvailabilityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fusionne une entrée : union si les deux ensembles sont non vides,
    /// sinon le repos l'emporte.
    pub fn merge(&mut self, staff: &str, day: u32, shifts: ShiftSet) {
        let days = self.entries.entry(staff.to_owned()).or_default();
        match days.get_mut(&day) {
            Some(prev) if prev.is_empty() || shifts.is_empty() => *prev = ShiftSet::empty(),
            Some(prev) => *prev |= shifts,
            None => {
                days.insert(day, shifts);
            }
        }
    }

    pub fn get(&self, staff: &str, day: u32) -> Option<ShiftSet> {
        self.entries.get(staff)?.get(&day).copied()
    }

    pub fn permits(&self, staff: &str, day: u32, kind: ShiftKind) -> bool {
        self.get(staff, day).map_or(true, |set| set.has(kind))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.values().all(BTreeMap::is_empty)
    }
}

/// Contraintes individuelles d'une personne.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PersonRule {
    pub weekend_off: bool,
    pub allowed: Option<ShiftSet>,
    pub weekly_max: Option<u32>,
}

/// Règles individuelles indexées par nom.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleBook {
    rules: HashMap<String, PersonRule>,
}

impl RuleBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, staff: &str) -> PersonRule {
        self.rules.get(staff).copied().unwrap_or_default()
    }

    pub fn entry_mut(&mut self, staff: &str) -> &mut PersonRule {
        self.rules.entry(staff.to_owned()).or_default()
    }
}

/// Tableau du mois : jour → poste requis → personne (ou vacant).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Grid {
    days: BTreeMap<u32, BTreeMap<ShiftKind, Option<String>>>,
}

impl Grid {
    /// Grille vide couvrant les jours 1..=n.
    pub fn with_days(n: u32) -> Self {
        Self {
            days: (1..=n).map(|d| (d, BTreeMap::new())).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn set(&mut self, day: u32, kind: ShiftKind, staff: Option<String>) {
        self.days.entry(day).or_default().insert(kind, staff);
    }

    pub fn day(&self, day: u32) -> Option<&BTreeMap<ShiftKind, Option<String>>> {
        self.days.get(&day)
    }

    pub fn assignee(&self, day: u32, kind: ShiftKind) -> Option<&str> {
        self.days.get(&day)?.get(&kind)?.as_deref()
    }

    /// Poste tenu par `staff` ce jour-là (le premier dans l'ordre d'affichage).
    pub fn shift_of(&self, day: u32, staff: &str) -> Option<ShiftKind> {
        let slots = self.days.get(&day)?;
        ShiftKind::ALL
            .into_iter()
            .find(|k| slots.get(k).and_then(|s| s.as_deref()) == Some(staff))
    }

    pub fn days(&self) -> impl Iterator<Item = (u32, &BTreeMap<ShiftKind, Option<String>>)> {
        self.days.iter().map(|(d, slots)| (*d, slots))
    }

    /// Créneaux requis restés vacants.
    pub fn vacancies(&self) -> Vec<(u32, ShiftKind)> {
        self.days
            .iter()
            .flat_map(|(d, slots)| {
                slots
                    .iter()
                    .filter(|(_, s)| s.is_none())
                    .map(move |(k, _)| (*d, *k))
            })
            .collect()
    }
}

/// Compteurs par poste pour une personne.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShiftTally {
    counts: [u32; 4],
}

impl ShiftTally {
    pub fn get(&self, kind: ShiftKind) -> u32 {
        self.counts[kind.index()]
    }

    pub fn add(&mut self, kind: ShiftKind) {
        let slot = &mut self.counts[kind.index()];
        *slot = slot.saturating_add(1);
    }

    pub fn set(&mut self, kind: ShiftKind, n: u32) {
        self.counts[kind.index()] = n;
    }

    /// Somme des quatre postes, plafonnée à `u32::MAX`.
    pub fn total(&self) -> u32 {
        self.counts.iter().fold(0u32, |acc, n| acc.saturating_add(*n))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StaffCount {
    pub name: String,
    pub tally: ShiftTally,
}

/// Récapitulatif par personne, dans l'ordre d'insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Counts {
    rows: Vec<StaffCount>,
}

impl Counts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Une ligne à zéro par personne, dans l'ordre du roster.
    pub fn for_roster<S: AsRef<str>>(staff: &[S]) -> Self {
        let mut counts = Self::new();
        for name in staff {
            counts.entry_mut(name.as_ref());
        }
        counts
    }

    /// Compte la grille ; les personnes apparaissent dans l'ordre de lecture
    /// (jours croissants, colonnes dans l'ordre d'affichage).
    pub fn from_grid(grid: &Grid) -> Self {
        let mut counts = Self::new();
        counts.add_grid(grid);
        counts
    }

    pub fn tally<S: AsRef<str>>(staff: &[S], grid: &Grid) -> Self {
        let mut counts = Self::for_roster(staff);
        counts.add_grid(grid);
        counts
    }

    fn add_grid(&mut self, grid: &Grid) {
        for (_, slots) in grid.days() {
            for kind in ShiftKind::ALL {
                if let Some(Some(name)) = slots.get(&kind) {
                    self.entry_mut(name).tally.add(kind);
                }
            }
        }
    }

    pub fn entry_mut(&mut self, name: &str) -> &mut StaffCount {
        let pos = match self.rows.iter().position(|r| r.name == name) {
            Some(pos) => pos,
            None => {
                self.rows.push(StaffCount {
                    name: name.to_owned(),
                    tally: ShiftTally::default(),
                });
                self.rows.len() - 1
            }
        };
        &mut self.rows[pos]
    }

    pub fn get(&self, name: &str) -> Option<&ShiftTally> {
        self.rows.iter().find(|r| r.name == name).map(|r| &r.tally)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StaffCount> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
