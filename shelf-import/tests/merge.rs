use shelf_catalog::*;
use shelf_import::*;

fn candidate(title: &str, genre: &str, tags: &[&str]) -> NewResource {
    NewResource {
        title: title.to_string(),
        kind: "book".to_string(),
        genre: genre.to_string(),
        status: "unread".to_string(),
        link: String::new(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        author: None,
    }
}

fn existing() -> Vec<Resource> {
    vec![candidate("SPQR", "history", &["rome"]).into_resource("history001".to_string())]
}

#[test]
fn novel_titles_are_appended_with_ids() {
    let mut catalog = existing();
    let stats = merge_ingested(
        &mut catalog,
        vec![
            candidate("The Histories", "History", &[]),
            candidate("Refactoring", "tech", &[]),
        ],
        DuplicatePolicy::Skip,
        &SilentProgress,
    );
    assert_eq!(stats.added, 2);
    assert_eq!(catalog[1].id, "history002");
    assert_eq!(catalog[2].id, "tech001");
}

#[test]
fn skip_policy_drops_duplicates_case_insensitively() {
    let mut catalog = existing();
    let stats = merge_ingested(
        &mut catalog,
        vec![candidate("  spqr ", "history", &["empire"])],
        DuplicatePolicy::Skip,
        &SilentProgress,
    );
    assert_eq!(stats.added, 0);
    assert_eq!(stats.skipped, 1);
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog[0].tags, vec!["rome"]);
}

#[test]
fn union_policy_adds_missing_tags() {
    let mut catalog = existing();
    let stats = merge_ingested(
        &mut catalog,
        vec![candidate("SPQR", "history", &["Rome", "empire"])],
        DuplicatePolicy::UnionTags,
        &SilentProgress,
    );
    assert_eq!(stats.updated, 1);
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog[0].tags, vec!["rome", "empire"]);
}

#[test]
fn duplicates_inside_one_batch_collapse() {
    let mut catalog = Vec::new();
    let stats = merge_ingested(
        &mut catalog,
        vec![
            candidate("Deep Work", "self-improvement", &["focus"]),
            candidate("DEEP WORK", "self-improvement", &["productivity"]),
        ],
        DuplicatePolicy::UnionTags,
        &SilentProgress,
    );
    assert_eq!(stats.added, 1);
    assert_eq!(stats.updated, 1);
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog[0].tags, vec!["focus", "productivity"]);
}

#[test]
fn reingesting_same_batch_is_idempotent() {
    let batch = vec![
        candidate("SPQR", "history", &["ancient"]),
        candidate("Deep Work", "self-improvement", &["focus"]),
        candidate("Refactoring", "tech", &["craft"]),
    ];

    for policy in [DuplicatePolicy::Skip, DuplicatePolicy::UnionTags] {
        let mut catalog = existing();
        merge_ingested(&mut catalog, batch.clone(), policy, &SilentProgress);
        let once = catalog.clone();

        let stats = merge_ingested(&mut catalog, batch.clone(), policy, &SilentProgress);
        assert_eq!(stats.added, 0);
        assert_eq!(stats.updated, 0);
        assert_eq!(catalog, once);
    }
}

#[test]
fn empty_titles_are_skipped() {
    let mut catalog = Vec::new();
    let stats = merge_ingested(
        &mut catalog,
        vec![candidate("   ", "tech", &[])],
        DuplicatePolicy::Skip,
        &SilentProgress,
    );
    assert_eq!(stats.skipped, 1);
    assert!(catalog.is_empty());
}

#[test]
fn exhausted_id_sequence_skips_candidate_without_wrapping() {
    let mut catalog =
        vec![candidate("Last", "tech", &[]).into_resource(format!("tech{}", u64::MAX))];
    let stats = merge_ingested(
        &mut catalog,
        vec![candidate("One More", "tech", &[]), candidate("SPQR", "history", &[])],
        DuplicatePolicy::Skip,
        &SilentProgress,
    );
    assert_eq!(stats.added, 1);
    assert_eq!(stats.skipped, 1);
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog[1].id, "history001");
}
