use super::{classify, normalize, scan, split_tokens};
use crate::model::{AvailabilityMap, ShiftSet, StaffRequest};
use once_cell::sync::Lazy;
use regex::Regex;

/// Tout ce qui suit ce séparateur est une remarque libre.
pub const NOTE_SEPARATOR: &str = "/ 備考:";

static SLASH_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]{1,2})\s*/\s*([0-9]{1,2})").expect("slash date regex"));
static KANJI_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]{1,2})\s*月\s*([0-9]{1,2})\s*日").expect("kanji date regex")
});
static DAY_ONLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]{1,2})\s*日").expect("day regex"));
static LEADING_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{1,2})\b").expect("leading number regex"));

pub fn strip_note(text: &str) -> &str {
    text.split_once(NOTE_SEPARATOR).map_or(text, |(head, _)| head)
}

/// Jour du mois visé par un morceau : `M/D`, `M月D日`, `D日`, puis entier en tête.
pub fn extract_day(token: &str) -> Option<u32> {
    let (re, group) = [
        (&*SLASH_DATE, 2),
        (&*KANJI_DATE, 2),
        (&*DAY_ONLY, 1),
        (&*LEADING_NUMBER, 1),
    ]
    .into_iter()
    .find(|(re, _)| re.is_match(token))?;
    let day: u32 = re.captures(token)?.get(group)?.as_str().parse().ok()?;
    (day > 0).then_some(day)
}

/// Analyse un morceau isolé : `(jour, ensemble)` si les deux sont reconnus.
pub fn parse_token(token: &str) -> Option<(u32, ShiftSet)> {
    let token = normalize(token);
    let day = extract_day(&token)?;
    let shifts = classify(&scan(&token))?;
    Some((day, shifts))
}

/// Mois explicite d'une cellule `M/D` ou `M月D日` ; `None` pour un simple jour.
pub fn extract_month(token: &str) -> Option<u32> {
    let token = normalize(token);
    let caps = SLASH_DATE
        .captures(&token)
        .or_else(|| KANJI_DATE.captures(&token))?;
    caps[1].parse().ok()
}

/// Construit la carte des disponibilités à partir des souhaits, dans l'ordre reçu.
/// Les noms sont comparés sans espaces de bord, comme ceux du roster.
pub fn parse_requests(requests: &[StaffRequest]) -> AvailabilityMap {
    let mut map = AvailabilityMap::new();
    for request in requests {
        let staff = request.staff.trim();
        let text = normalize(strip_note(&request.text));
        for token in split_tokens(&text) {
            match parse_token(token) {
                Some((day, shifts)) => map.merge(staff, day, shifts),
                None => tracing::trace!(staff, token, "ignored request token"),
            }
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ShiftKind;

    #[test]
    fn day_formats_in_priority_order() {
        assert_eq!(extract_day("4/12 夜勤"), Some(12));
        assert_eq!(extract_day("4月12日 夜勤"), Some(12));
        assert_eq!(extract_day("12日 夜勤"), Some(12));
        assert_eq!(extract_day("12 夜勤"), Some(12));
        assert_eq!(extract_day("夜勤 12"), None);
        assert_eq!(extract_day("0日 休み"), None);
    }

    #[test]
    fn note_is_ignored() {
        let reqs = [StaffRequest::new("A", "5日休み / 備考: 6日休み希望かも")];
        let map = parse_requests(&reqs);
        assert_eq!(map.get("A", 5), Some(ShiftSet::empty()));
        assert_eq!(map.get("A", 6), None);
    }

    #[test]
    fn full_width_tokens_are_understood() {
        let reqs = [StaffRequest::new("A", "４／８　早番")];
        let map = parse_requests(&reqs);
        assert!(map.permits("A", 8, ShiftKind::Early));
        assert!(!map.permits("A", 8, ShiftKind::Night));
    }

    #[test]
    fn later_submission_merges_with_earlier_one() {
        let reqs = [
            StaffRequest::new("A", "10日 早番"),
            StaffRequest::new("A", "10日 夜勤、11日 日勤"),
            StaffRequest::new("A", "11日 休み"),
        ];
        let map = parse_requests(&reqs);
        assert_eq!(map.get("A", 10), Some(ShiftSet::EARLY | ShiftSet::NIGHT));
        assert_eq!(map.get("A", 11), Some(ShiftSet::empty()));
    }

    #[test]
    fn padded_staff_name_still_keys_the_request() {
        let reqs = [StaffRequest::new(" A ", "1日休み")];
        let map = parse_requests(&reqs);
        assert_eq!(map.get("A", 1), Some(ShiftSet::empty()));
    }

    #[test]
    fn month_only_from_explicit_dates() {
        assert_eq!(extract_month("4/12"), Some(4));
        assert_eq!(extract_month("１１月３日"), Some(11));
        assert_eq!(extract_month("12日"), None);
    }

    #[test]
    fn unmatched_tokens_leave_no_entry() {
        let reqs = [StaffRequest::new("B", "よろしくお願いします、夜勤希望")];
        assert!(parse_requests(&reqs).is_empty());
    }
}
