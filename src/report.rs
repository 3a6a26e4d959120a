use crate::model::{Counts, StaffRequest};
use crate::parser::strip_note;
use std::collections::BTreeMap;

const TRAVEL_MARKER: &str = "出張";

/// Ligne du récapitulatif incluant les jours de déplacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TravelTotal {
    pub staff: String,
    pub shifts: u32,
    pub travel: u32,
    pub total: u32,
}

/// Personnes du roster n'ayant déposé aucun souhait.
pub fn missing_submissions<S: AsRef<str>>(staff: &[S], requests: &[StaffRequest]) -> Vec<String> {
    staff
        .iter()
        .map(|s| s.as_ref().trim())
        .filter(|name| !requests.iter().any(|r| r.staff.trim() == *name))
        .map(str::to_string)
        .collect()
}

/// Nombre de mentions de déplacement par personne, remarques exclues.
pub fn travel_days(requests: &[StaffRequest]) -> BTreeMap<String, u32> {
    let mut out = BTreeMap::new();
    for request in requests {
        let n = strip_note(&request.text).matches(TRAVEL_MARKER).count() as u32;
        let days = out.entry(request.staff.trim().to_string()).or_insert(0u32);
        *days = days.saturating_add(n);
    }
    out
}

pub fn totals_with_travel(counts: &Counts, travel: &BTreeMap<String, u32>) -> Vec<TravelTotal> {
    counts
        .iter()
        .map(|row| {
            let shifts = row.tally.total();
            let travel = travel.get(&row.name).copied().unwrap_or(0);
            TravelTotal {
                staff: row.name.clone(),
                shifts,
                travel,
                total: shifts.saturating_add(travel),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Grid, ShiftKind};

    #[test]
    fn missing_keeps_roster_order() {
        let reqs = [StaffRequest::new("B", "3日休み")];
        assert_eq!(missing_submissions(&["A", "B", "C"], &reqs), vec!["A", "C"]);
    }

    #[test]
    fn travel_is_added_to_totals() {
        let reqs = [
            StaffRequest::new("A", "3日出張、4日出張 / 備考: 5日も出張かも"),
            StaffRequest::new("A", "9日 出張"),
        ];
        let travel = travel_days(&reqs);
        assert_eq!(travel.get("A"), Some(&3));

        let mut grid = Grid::with_days(1);
        grid.set(1, ShiftKind::Night, Some("A".into()));
        let counts = Counts::tally(&["A", "B"], &grid);
        let totals = totals_with_travel(&counts, &travel);
        assert_eq!(totals[0].total, 4);
        assert_eq!(totals[1].total, 0);
    }

    #[test]
    fn huge_hand_edited_counts_do_not_overflow() {
        let counts = crate::render::parse_counts("A,4000000000,4000000000,0,0,1");
        let travel = travel_days(&[StaffRequest::new(" A", "3日出張")]);
        let totals = totals_with_travel(&counts, &travel);
        assert_eq!(totals[0].shifts, u32::MAX);
        assert_eq!(totals[0].travel, 1);
        assert_eq!(totals[0].total, u32::MAX);
    }
}
