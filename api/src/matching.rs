//! Team-name matching between free-text labels and ESPN display names.
//!
//! Policy:
//!   1. Both sides are folded: lowercased, every non-alphanumeric character
//!      becomes a space, whitespace is collapsed.
//!   2. Folded names that are equal match.
//!   3. Otherwise the shorter name must appear in the longer one as a run of
//!      whole words ("chiefs" matches "kansas city chiefs", "city chiefs" does
//!      too, "ers" does not match "san francisco 49ers").
//!   4. A label equal to the team abbreviation ("KC") matches.
//!
//! Callers that need a side assignment must treat a label matching both
//! competitors as ambiguous; see `assign_sides`.

use crate::Side;

/// Lowercase, strip punctuation, collapse whitespace.
pub fn fold(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() { c.to_ascii_lowercase() } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn names_match(a: &str, b: &str) -> bool {
    let a = fold(a);
    let b = fold(b);
    if a.is_empty() || b.is_empty() {
        return false;
    }
    if a == b {
        return true;
    }
    let (short, long) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };
    let short_words: Vec<&str> = short.split(' ').collect();
    let long_words: Vec<&str> = long.split(' ').collect();
    long_words
        .windows(short_words.len())
        .any(|window| window == short_words.as_slice())
}

/// Match a user label against a team's display name or abbreviation.
pub fn matches_team(label: &str, display_name: &str, abbrev: &str) -> bool {
    if !abbrev.trim().is_empty() && fold(label) == fold(abbrev) {
        return true;
    }
    names_match(label, display_name)
}

/// Decide which side of a home/away pair `label_a` refers to, given that
/// `label_b` must be the other side. Returns `None` when the labels do not
/// correlate to exactly one assignment.
pub fn assign_sides(
    label_a: &str,
    label_b: &str,
    home: (&str, &str),
    away: (&str, &str),
) -> Option<Side> {
    let a_home = matches_team(label_a, home.0, home.1);
    let a_away = matches_team(label_a, away.0, away.1);
    let b_home = matches_team(label_b, home.0, home.1);
    let b_away = matches_team(label_b, away.0, away.1);

    match (a_home && b_away, a_away && b_home) {
        (true, false) => Some(Side::Home),
        (false, true) => Some(Side::Away),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_strips_punctuation_and_case() {
        assert_eq!(fold("  St. Louis  Rams "), "st louis rams");
        assert_eq!(fold("Chi/Pit Cards/Steelers"), "chi pit cards steelers");
    }

    #[test]
    fn mascot_only_label_matches_full_name() {
        assert!(names_match("Chiefs", "Kansas City Chiefs"));
        assert!(names_match("Kansas City Chiefs", "chiefs"));
        assert!(names_match("49ers", "San Francisco 49ers"));
    }

    #[test]
    fn partial_words_do_not_match() {
        assert!(!names_match("ers", "San Francisco 49ers"));
        assert!(!names_match("Chief", "Kansas City Chiefs"));
        assert!(!names_match("", "Kansas City Chiefs"));
    }

    #[test]
    fn abbreviation_matches() {
        assert!(matches_team("kc", "Kansas City Chiefs", "KC"));
        assert!(!matches_team("PHI", "Kansas City Chiefs", "KC"));
    }

    #[test]
    fn sides_are_assigned_when_unambiguous() {
        let home = ("Philadelphia Eagles", "PHI");
        let away = ("Kansas City Chiefs", "KC");
        assert_eq!(assign_sides("Chiefs", "Eagles", home, away), Some(Side::Away));
        assert_eq!(assign_sides("Eagles", "Chiefs", home, away), Some(Side::Home));
    }

    #[test]
    fn shared_city_is_ambiguous() {
        let home = ("New York Giants", "NYG");
        let away = ("New York Jets", "NYJ");
        assert_eq!(assign_sides("New York", "New York", home, away), None);
    }

    #[test]
    fn shared_city_resolves_through_the_other_label() {
        let home = ("New York Giants", "NYG");
        let away = ("New York Jets", "NYJ");
        assert_eq!(assign_sides("New York", "Jets", home, away), Some(Side::Home));
    }

    #[test]
    fn unknown_label_declines() {
        let home = ("Philadelphia Eagles", "PHI");
        let away = ("Kansas City Chiefs", "KC");
        assert_eq!(assign_sides("Bills", "Eagles", home, away), None);
    }
}
