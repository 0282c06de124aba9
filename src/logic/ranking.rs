//! Ranking comparators. Better teams sort first.

use crate::models::Team;
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Ratios closer than this are considered tied.
pub const RATIO_TOLERANCE: f64 = 0.001;

/// Higher ratio first, treating near-equal values as a tie.
fn compare_ratio_desc(a: f64, b: f64) -> Ordering {
    if (b - a).abs() > RATIO_TOLERANCE {
        b.total_cmp(&a)
    } else {
        Ordering::Equal
    }
}

/// Collation key for a name: base letters folded to lowercase without accents, then
/// the accents on each letter, then whether each letter is uppercase.
fn collation_key(name: &str) -> (String, Vec<String>, Vec<bool>) {
    let mut base = String::new();
    let mut accents: Vec<String> = Vec::new();
    let mut uppercase = Vec::new();
    for c in name.nfd() {
        if is_combining_mark(c) {
            if let Some(marks) = accents.last_mut() {
                marks.push(c);
            }
            continue;
        }
        base.extend(c.to_lowercase());
        accents.push(String::new());
        uppercase.push(c.is_uppercase());
    }
    (base, accents, uppercase)
}

/// Locale-aware name order: "Ébla" before "Zeta", "eta" before "Eta" before "éta".
fn compare_names(a: &Team, b: &Team) -> Ordering {
    collation_key(&a.name)
        .cmp(&collation_key(&b.name))
        .then_with(|| a.name.cmp(&b.name))
}

/// Ranking inside one group: championship points, set ratio, point ratio, then name.
pub fn compare_teams(a: &Team, b: &Team) -> Ordering {
    b.championship_points()
        .cmp(&a.championship_points())
        .then_with(|| compare_ratio_desc(a.set_ratio(), b.set_ratio()))
        .then_with(|| compare_ratio_desc(a.point_ratio(), b.point_ratio()))
        .then_with(|| compare_names(a, b))
}

/// Ranking across groups: game-points ratio, set ratio, point ratio.
///
/// Full ties compare equal, so a stable sort keeps their previous order.
pub fn compare_teams_avulsa(a: &Team, b: &Team) -> Ordering {
    b.game_points_ratio()
        .total_cmp(&a.game_points_ratio())
        .then_with(|| compare_ratio_desc(a.set_ratio(), b.set_ratio()))
        .then_with(|| compare_ratio_desc(a.point_ratio(), b.point_ratio()))
}
