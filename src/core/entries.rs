//! Coupled and field entry grouping
//!
//! Starters sharing a program-number root ("1", "1A", "1X") run as a single
//! betting unit, as do all field entries ("12F", "13F").

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::Starter;

/// Group key shared by every field entry
pub const FIELD_ENTRY: &str = "F";

static ENTRY_PROGRAM_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)F|(\d+)[A-Z]?").unwrap());

/// Betting-unit key for a program number: the digits of a coupled entry,
/// `F` for a field entry, or the program itself when it has no digits
pub fn entry_program(program: &str) -> String {
    let program = program.to_uppercase();
    let key = ENTRY_PROGRAM_PATTERN.captures(&program).and_then(|caps| {
        if caps.get(1).is_some() {
            Some(FIELD_ENTRY.to_string())
        } else {
            caps.get(2).map(|m| m.as_str().to_string())
        }
    });
    key.unwrap_or(program)
}

/// Mark every starter that shares its entry program with another starter
pub fn group_entries(starters: Vec<Starter>) -> Vec<Starter> {
    let keys: Vec<Option<String>> = starters.iter().map(|s| s.entry_program.clone()).collect();

    starters
        .into_iter()
        .map(|starter| {
            let grouped = match &starter.entry_program {
                Some(key) => keys.iter().filter(|k| k.as_ref() == Some(key)).count() > 1,
                None => false,
            };
            Starter {
                entry: grouped,
                ..starter
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::starter;

    #[test]
    fn test_entry_program() {
        assert_eq!(entry_program("2"), "2");
        assert_eq!(entry_program("4D"), "4");
        assert_eq!(entry_program("1a"), "1");
        assert_eq!(entry_program("4F"), "F");
        assert_eq!(entry_program("13f"), "F");
        assert_eq!(entry_program("10"), "10");
        assert_eq!(entry_program("X"), "X");
    }

    #[test]
    fn test_group_entries() {
        let programs = ["2", "4D", "1a", "4F", "3F"];
        let starters: Vec<Starter> = programs
            .iter()
            .enumerate()
            .map(|(i, p)| starter(&format!("Horse {}", i), Some(*p)))
            .collect();

        let grouped = group_entries(starters);

        let keys: Vec<&str> = grouped
            .iter()
            .map(|s| s.entry_program.as_deref().unwrap())
            .collect();
        assert_eq!(keys, vec!["2", "4", "1", "F", "F"]);

        // "4D" and "1a" are alone in their groups, so only the field
        // entries are marked, even though a letter suffix usually signals
        // a coupled entry
        let entries: Vec<bool> = grouped.iter().map(|s| s.entry).collect();
        assert_eq!(entries, vec![false, false, false, true, true]);
    }

    #[test]
    fn test_coupled_entry() {
        let starters = vec![
            starter("Alpha", Some("1")),
            starter("Bravo", Some("1A")),
            starter("Charlie", Some("2")),
            starter("Delta", None),
        ];

        let grouped = group_entries(starters);

        assert!(grouped[0].entry);
        assert!(grouped[1].entry);
        assert!(!grouped[2].entry);
        assert!(!grouped[3].entry);
    }
}
