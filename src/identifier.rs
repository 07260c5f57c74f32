//! Random identifiers for content entries.
//!
//! Output is a lower-case, hyphenated version-4 UUID:
//! `xxxxxxxx-xxxx-4xxx-yxxx-xxxxxxxxxxxx`, with `y` in `8..=b`.
//! Identifiers only correlate entries; they are not secrets.

use uuid::Uuid;

/// Generates a new content-entry identifier.
pub fn generate_entry_id() -> String {
    Uuid::new_v4().hyphenated().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn assert_v4_shape(id: &str) {
        assert_eq!(id.len(), 36, "unexpected length for {id}");
        for (i, c) in id.chars().enumerate() {
            match i {
                8 | 13 | 18 | 23 => assert_eq!(c, '-', "hyphen expected at {i} in {id}"),
                14 => assert_eq!(c, '4', "version nibble must be 4 in {id}"),
                19 => assert!(
                    matches!(c, '8' | '9' | 'a' | 'b'),
                    "variant nibble must be 8-b in {id}"
                ),
                _ => assert!(
                    c.is_ascii_hexdigit() && !c.is_ascii_uppercase(),
                    "lower-case hex expected at {i} in {id}"
                ),
            }
        }
    }

    #[test]
    fn ten_thousand_ids_match_v4_pattern() {
        for _ in 0..10_000 {
            assert_v4_shape(&generate_entry_id());
        }
    }

    #[test]
    fn ids_do_not_repeat() {
        let ids: HashSet<String> = (0..1_000).map(|_| generate_entry_id()).collect();
        assert_eq!(ids.len(), 1_000);
    }
}
