//! Lecture des souhaits et des règles individuelles saisis en texte libre.
//!
//! Tout texte inconnu est ignoré : ce module ne renvoie jamais d'erreur.

mod markers;
mod requests;
mod rules;

pub use markers::{classify, scan, Marker, MARKERS};
pub use requests::{
    extract_day, extract_month, parse_requests, parse_token, strip_note, NOTE_SEPARATOR,
};
pub use rules::{parse_individual_rules, parse_rule_line, RULE_MARKERS};

/// Ramène chiffres pleine chasse, `／` et espace idéographique à l'ASCII.
pub(crate) fn normalize(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '０'..='９' => char::from_u32(c as u32 - '０' as u32 + '0' as u32).unwrap_or(c),
            '／' => '/',
            '\u{3000}' => ' ',
            _ => c,
        })
        .collect()
}

/// Découpe sur saut de ligne, `、`, `,` et `;` ; supprime les morceaux vides.
pub fn split_tokens(text: &str) -> Vec<&str> {
    text.split(['\n', '、', ',', ';'])
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}
