//! Locale-aware ordering for display names.
//!
//! Fossil and region names are German, so names are ordered the way a German
//! dictionary orders them (DIN 5007-1): umlauts sort with their base letter,
//! `ß` sorts as `ss`, and case only breaks ties.

use std::cmp::Ordering;

/// Compare two display names for presentation order.
///
/// Levels, most significant first:
/// 1. base letters (case and diacritics folded)
/// 2. diacritics (`a` before `ä`)
/// 3. case (lowercase before uppercase)
/// 4. code points, so distinct names never compare equal
#[must_use]
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| secondary_key(a).cmp(&secondary_key(b)))
        .then_with(|| tertiary_key(a).cmp(&tertiary_key(b)))
        .then_with(|| a.cmp(b))
}

/// Sort names in place by [`locale_cmp`].
pub fn sort_names(names: &mut [String]) {
    names.sort_by(|a, b| locale_cmp(a, b));
}

fn primary_key(s: &str) -> String {
    let mut key = String::with_capacity(s.len());
    for c in s.chars().flat_map(char::to_lowercase) {
        match fold(c) {
            Folded::One(base) => key.push(base),
            Folded::Two(first, second) => {
                key.push(first);
                key.push(second);
            }
        }
    }
    key
}

fn secondary_key(s: &str) -> Vec<bool> {
    s.chars()
        .flat_map(char::to_lowercase)
        .map(|c| !matches!(fold(c), Folded::One(base) if base == c))
        .collect()
}

fn tertiary_key(s: &str) -> Vec<bool> {
    s.chars().map(char::is_uppercase).collect()
}

enum Folded {
    One(char),
    Two(char, char),
}

fn fold(c: char) -> Folded {
    let base = match c {
        'ä' | 'à' | 'á' | 'â' | 'ã' | 'å' => 'a',
        'ö' | 'ò' | 'ó' | 'ô' | 'õ' | 'ø' => 'o',
        'ü' | 'ù' | 'ú' | 'û' => 'u',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ç' => 'c',
        'ñ' => 'n',
        'ß' => return Folded::Two('s', 's'),
        'æ' => return Folded::Two('a', 'e'),
        'œ' => return Folded::Two('o', 'e'),
        other => other,
    };
    Folded::One(base)
}
