use super::domain::ActionRecord;
use std::cmp::Ordering;

/// Default display order: status priority, then city, then action name.
///
/// `sort_by` is stable, so records comparing equal keep their input order.
pub fn sort_actions(records: &[ActionRecord]) -> Vec<ActionRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(compare_actions);
    sorted
}

pub fn compare_actions(a: &ActionRecord, b: &ActionRecord) -> Ordering {
    a.status
        .priority()
        .cmp(&b.status.priority())
        .then_with(|| locale_cmp(&a.city, &b.city))
        .then_with(|| locale_cmp(&a.action_name, &b.action_name))
}

/// Collation for Latin-script names, compared in levels: base letters, then
/// accents (unaccented first), then case (lowercase first). Raw code points
/// settle whatever is still tied.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(collation_key(b))
        .then_with(|| accent_key(a).cmp(accent_key(b)))
        .then_with(|| case_key(a).cmp(case_key(b)))
        .then_with(|| a.cmp(b))
}

fn collation_key(value: &str) -> impl Iterator<Item = char> + '_ {
    value.chars().flat_map(char::to_lowercase).map(fold_accent)
}

/// Zero for a plain letter, the accented letter's code point otherwise.
fn accent_key(value: &str) -> impl Iterator<Item = u32> + '_ {
    value
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| if fold_accent(c) == c { 0 } else { u32::from(c) })
}

fn case_key(value: &str) -> impl Iterator<Item = bool> + '_ {
    value.chars().map(char::is_uppercase)
}

fn fold_accent(c: char) -> char {
    match c {
        'à'..='å' | 'ā' | 'ă' | 'ą' => 'a',
        'ç' | 'ć' | 'č' => 'c',
        'è'..='ë' | 'ē' | 'ė' | 'ę' | 'ě' => 'e',
        'ì'..='ï' | 'ī' | 'į' => 'i',
        'ñ' | 'ń' | 'ň' => 'n',
        'ò'..='ö' | 'ø' | 'ō' | 'ő' => 'o',
        'ù'..='ü' | 'ū' | 'ů' | 'ű' => 'u',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}
