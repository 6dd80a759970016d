//! Genre-scoped resource identifiers.
//!
//! An id is the lowercased genre followed by a sequence number zero-padded to
//! three digits, e.g. `tech001`. Two strategies are exposed and callers pick
//! one explicitly:
//!
//! - [`next_id`] appends: it finds the highest sequence already used for the
//!   genre and returns the one after it. Existing ids are never touched.
//! - [`renumber_all`] rebuilds every id in list order. It is destructive and
//!   only meant for an explicit cleanup pass over the whole catalog.
//!
//! Both padded (`tech001`) and unpadded (`tech1`) suffixes are recognised when
//! scanning, so catalogs written by older tools never produce a collision.

use std::collections::HashMap;

use crate::error::ValidationError;
use crate::types::Resource;

/// Width the numeric suffix is padded to.
pub const SEQUENCE_WIDTH: usize = 3;

/// The id prefix derived from a genre.
pub fn genre_prefix(genre: &str) -> String {
    genre.trim().to_lowercase()
}

/// Format a prefix and sequence number into an id.
pub fn format_id(prefix: &str, sequence: u64) -> String {
    format!("{prefix}{sequence:0width$}", width = SEQUENCE_WIDTH)
}

/// Parse the numeric suffix of `id` if it belongs to `prefix`.
///
/// The remainder after the prefix must be non-empty and all ASCII digits, so
/// `technology001` is not counted under the `tech` prefix.
pub fn sequence_for_prefix(id: &str, prefix: &str) -> Option<u64> {
    let lower = id.to_lowercase();
    let rest = lower.strip_prefix(prefix)?;
    if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    rest.parse().ok()
}

/// Return the next free id for `genre` given the current catalog.
///
/// Fails only when the highest existing suffix is already `u64::MAX`.
pub fn next_id(genre: &str, resources: &[Resource]) -> Result<String, ValidationError> {
    let prefix = genre_prefix(genre);
    let max = resources
        .iter()
        .filter_map(|r| sequence_for_prefix(&r.id, &prefix))
        .max()
        .unwrap_or(0);
    let next = max
        .checked_add(1)
        .ok_or_else(|| ValidationError::SequenceExhausted(prefix.clone()))?;
    Ok(format_id(&prefix, next))
}

/// An id rewritten by [`renumber_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdChange {
    pub title: String,
    pub old_id: String,
    pub new_id: String,
}

/// Reassign every id in list order, numbering each genre `1..n`.
///
/// Returns only the ids that actually changed. Running it again on its own
/// output changes nothing.
pub fn renumber_all(resources: &mut [Resource]) -> Vec<IdChange> {
    let mut counters: HashMap<String, u64> = HashMap::new();
    let mut changes = Vec::new();

    for resource in resources.iter_mut() {
        let prefix = genre_prefix(&resource.genre);
        let counter = counters.entry(prefix.clone()).or_insert(0);
        *counter += 1;

        let new_id = format_id(&prefix, *counter);
        if resource.id != new_id {
            changes.push(IdChange {
                title: resource.title.clone(),
                old_id: std::mem::replace(&mut resource.id, new_id.clone()),
                new_id,
            });
        }
    }

    changes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn res(id: &str, genre: &str) -> Resource {
        Resource {
            id: id.to_string(),
            title: format!("title {id}"),
            kind: "book".to_string(),
            genre: genre.to_string(),
            status: "unread".to_string(),
            link: String::new(),
            tags: vec![],
            author: String::new(),
        }
    }

    #[test]
    fn first_id_for_genre() {
        assert_eq!(next_id("Tech", &[]).unwrap(), "tech001");
        assert_eq!(next_id(" self-improvement ", &[]).unwrap(), "self-improvement001");
    }

    #[test]
    fn next_id_takes_max_not_count() {
        let existing = vec![res("tech001", "tech"), res("tech007", "tech"), res("history002", "history")];
        assert_eq!(next_id("tech", &existing).unwrap(), "tech008");
        assert_eq!(next_id("history", &existing).unwrap(), "history003");
    }

    #[test]
    fn next_id_recognises_unpadded_legacy_ids() {
        let existing = vec![res("tech1", "tech"), res("tech001", "tech"), res("tech12", "tech")];
        assert_eq!(next_id("tech", &existing).unwrap(), "tech013");
    }

    #[test]
    fn longer_genre_does_not_share_prefix() {
        let existing = vec![res("technology004", "technology"), res("TECH002", "tech")];
        assert_eq!(next_id("tech", &existing).unwrap(), "tech003");
    }

    #[test]
    fn sequence_grows_past_padding_width() {
        let existing = vec![res("tech999", "tech")];
        assert_eq!(next_id("tech", &existing).unwrap(), "tech1000");
        assert_eq!(sequence_for_prefix("tech1000", "tech"), Some(1000));
    }

    #[test]
    fn exhausted_sequence_is_an_error_not_a_wrap() {
        let existing = vec![res(&format!("tech{}", u64::MAX), "tech")];
        assert_eq!(
            next_id("tech", &existing),
            Err(ValidationError::SequenceExhausted("tech".into()))
        );
    }

    #[test]
    fn repeated_next_id_is_strictly_increasing() {
        let mut catalog = Vec::new();
        for expected in 1..=5u64 {
            let id = next_id("finance", &catalog).unwrap();
            assert_eq!(sequence_for_prefix(&id, "finance"), Some(expected));
            catalog.push(res(&id, "finance"));
        }
    }

    #[test]
    fn renumber_groups_by_lowercased_genre_in_encounter_order() {
        let mut list = vec![
            res("x", "Tech"),
            res("y", "history"),
            res("z", "tech"),
            res("tech001", "TECH"),
        ];
        let changes = renumber_all(&mut list);
        let ids: Vec<_> = list.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["tech001", "history001", "tech002", "tech003"]);
        assert_eq!(changes.len(), 4);
        assert_eq!(changes[3].old_id, "tech001");
        assert_eq!(changes[3].new_id, "tech003");
    }

    #[test]
    fn renumber_is_a_fixed_point() {
        let mut list = vec![res("a", "tech"), res("b", "finance"), res("c", "tech")];
        renumber_all(&mut list);
        let once = list.clone();
        let changes = renumber_all(&mut list);
        assert!(changes.is_empty());
        assert_eq!(list, once);
    }
}
