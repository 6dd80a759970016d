//! Merging ingested candidates into the catalog.
//!
//! Duplicates are detected by [`title_key`]: the trimmed, case-folded title.
//! What happens to a duplicate depends on the adapter's [`DuplicatePolicy`].
//! Applying the same candidate set twice leaves the catalog exactly as one
//! application did.

use std::collections::HashMap;

use shelf_catalog::types::*;
use shelf_catalog::next_id;

use crate::progress::ImportProgress;

/// What to do with a candidate whose title already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Append the candidate's tags that the existing record lacks.
    UnionTags,
    /// Drop the candidate.
    Skip,
}

/// Counts from a single merge.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MergeStats {
    pub added: u64,
    /// Existing records that gained at least one tag.
    pub updated: u64,
    /// Duplicates that changed nothing.
    pub skipped: u64,
    pub total: u64,
}

/// Merge `candidates` into `existing` in order.
///
/// Novel titles are appended under an id from [`next_id`]. Duplicates within
/// the candidate batch itself resolve against the records appended earlier
/// in the same call.
pub fn merge_ingested(
    existing: &mut Vec<Resource>,
    candidates: Vec<NewResource>,
    policy: DuplicatePolicy,
    progress: &dyn ImportProgress,
) -> MergeStats {
    let mut stats = MergeStats {
        total: candidates.len() as u64,
        ..Default::default()
    };

    let mut index: HashMap<String, usize> = HashMap::new();
    for (i, r) in existing.iter().enumerate() {
        index.entry(r.title_key()).or_insert(i);
    }

    let total = candidates.len();
    for (i, candidate) in candidates.into_iter().enumerate() {
        let key = title_key(&candidate.title);
        if key.is_empty() {
            log::warn!("Skipping candidate with empty title");
            stats.skipped += 1;
            continue;
        }

        progress.on_candidate(i + 1, total, &candidate.title);

        match index.get(&key) {
            Some(&pos) => {
                if policy == DuplicatePolicy::UnionTags
                    && union_tags(&mut existing[pos].tags, &candidate.tags)
                {
                    stats.updated += 1;
                } else {
                    stats.skipped += 1;
                }
            }
            None => {
                let id = match next_id(&candidate.genre, existing.as_slice()) {
                    Ok(id) => id,
                    Err(e) => {
                        log::warn!("Skipping '{}': {}", candidate.title, e);
                        stats.skipped += 1;
                        continue;
                    }
                };
                existing.push(candidate.into_resource(id));
                index.insert(key, existing.len() - 1);
                stats.added += 1;
            }
        }
    }

    stats
}

/// Append tags from `incoming` not already in `tags` (case-insensitive).
///
/// Returns `true` if anything was appended.
pub fn union_tags(tags: &mut Vec<String>, incoming: &[String]) -> bool {
    let mut changed = false;
    for tag in incoming {
        let tag = tag.trim();
        if tag.is_empty() || tags.iter().any(|t| t.trim().eq_ignore_ascii_case(tag)) {
            continue;
        }
        tags.push(tag.to_string());
        changed = true;
    }
    changed
}
