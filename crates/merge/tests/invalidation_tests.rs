use incremental_merge::{
    ApplyOutcome, MergeConfig, MergeEvent, MergeList, RemovalReason, Side, TextRange,
    TwoSideKind, Version,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const BASE: &str = "A\nB\nC\n";

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn conflict() -> MergeList {
    init_logger();
    MergeList::from_texts("A\nX\nC\n", BASE, "A\nY\nC\n", &MergeConfig::default())
}

#[test]
fn test_base_edit_across_range_dissolves_pair() {
    let mut merge = conflict();
    let left = merge.changes(Side::Left).changes()[0];
    let right = merge.changes(Side::Right).changes()[0];
    let pair = merge.change(left).unwrap().two_side().unwrap();

    // Crosses the start of the base range 2..4
    merge.edit(Version::Base, TextRange::new(1, 3), "").unwrap();

    assert!(merge.changes(Side::Left).is_empty());
    assert!(merge.changes(Side::Right).is_empty());
    assert_eq!(
        merge.take_events(),
        vec![
            MergeEvent::Removed {
                change: left,
                side: Side::Left,
                reason: RemovalReason::Invalidated,
            },
            MergeEvent::Removed {
                change: right,
                side: Side::Right,
                reason: RemovalReason::Invalidated,
            },
            MergeEvent::PairDissolved {
                pair,
                kind: TwoSideKind::Conflict,
            },
        ]
    );
}

#[test]
fn test_version_edit_across_range_dissolves_pair() {
    let mut merge = conflict();
    let left = merge.changes(Side::Left).changes()[0];
    let right = merge.changes(Side::Right).changes()[0];

    merge.edit(Version::Left, TextRange::new(3, 5), "").unwrap();

    assert!(!merge.is_valid(left));
    assert!(!merge.is_valid(right));
    assert!(merge.changes(Side::Right).is_empty());

    let events = merge.take_events();
    assert_eq!(
        &events[..2],
        &[
            MergeEvent::Removed {
                change: left,
                side: Side::Left,
                reason: RemovalReason::Invalidated,
            },
            MergeEvent::Removed {
                change: right,
                side: Side::Right,
                reason: RemovalReason::Dissolved,
            },
        ]
    );

    // The UI still holds the handles; applying them is a no-op
    assert_eq!(merge.apply(left).unwrap(), ApplyOutcome::Stale);
    assert_eq!(merge.apply(right).unwrap(), ApplyOutcome::Stale);
    assert_eq!(merge.result_text(), "A\nB\nC\n");
}

#[test]
fn test_invalidated_simple_change_leaves_other_list() {
    init_logger();
    let mut merge = MergeList::from_texts(
        "A\nX\nC\nD\n",
        "A\nB\nC\nD\n",
        "A\nB\nC\nY\n",
        &MergeConfig::default(),
    );
    let right = merge.changes(Side::Right).changes()[0];

    merge.edit(Version::Left, TextRange::new(0, 3), "").unwrap();

    assert!(merge.changes(Side::Left).is_empty());
    assert_eq!(merge.changes(Side::Right).changes(), &[right]);
}

#[test]
fn test_edit_inside_range_is_kept() {
    init_logger();
    let mut merge = MergeList::from_texts(BASE, BASE, "A\nZ\nC\n", &MergeConfig::default());
    let id = merge.changes(Side::Right).changes()[0];

    merge.edit(Version::Right, TextRange::new(2, 3), "QQ").unwrap();
    assert_eq!(merge.change(id).unwrap().text(Version::Right).as_deref(), Some("QQ\n"));

    assert_eq!(merge.apply(id).unwrap(), ApplyOutcome::Applied);
    assert_eq!(merge.result_text(), "A\nQQ\nC\n");
}

#[test]
fn test_edit_before_range_shifts_it() {
    init_logger();
    let mut merge = MergeList::from_texts(BASE, BASE, "A\nZ\nC\n", &MergeConfig::default());
    let id = merge.changes(Side::Right).changes()[0];

    merge.edit(Version::Base, TextRange::empty(0), ">> ").unwrap();
    assert_eq!(merge.range(id, Version::Base), Some(TextRange::new(5, 7)));

    merge.apply(id).unwrap();
    assert_eq!(merge.result_text(), ">> A\nZ\nC\n");
}

#[test]
fn test_with_document_mut_dispatches_after_all_edits() {
    let mut merge = conflict();

    let stamp = merge.with_document_mut(Version::Base, |document| {
        document.insert(0, "x").unwrap();
        // Invalidations are dispatched once the closure returns
        document.delete(TextRange::new(2, 5)).unwrap();
        document.modification_stamp()
    });

    assert_eq!(stamp, 2);
    assert!(merge.changes(Side::Left).is_empty());
    assert!(merge.changes(Side::Right).is_empty());
}

#[test]
fn test_crossing_edit_in_with_document_mut_makes_apply_stale() {
    init_logger();
    let mut merge = MergeList::from_texts(BASE, BASE, "A\nZ\nC\n", &MergeConfig::default());
    let id = merge.changes(Side::Right).changes()[0];

    merge.with_document_mut(Version::Base, |document| {
        document.delete(TextRange::new(1, 3)).unwrap();
        assert_eq!(document.contents(), "A\nC\n");
    });

    assert!(!merge.is_valid(id));
    assert!(merge.changes(Side::Right).is_empty());
    assert_eq!(merge.range(id, Version::Base), None);
    assert_eq!(merge.apply(id).unwrap(), ApplyOutcome::Stale);
    assert_eq!(merge.result_text(), "A\nC\n");
}

#[test]
fn test_applied_change_can_still_be_invalidated() {
    init_logger();
    let mut merge = MergeList::from_texts(BASE, BASE, "A\nZ\nC\n", &MergeConfig::default());
    let id = merge.changes(Side::Right).changes()[0];
    merge.apply(id).unwrap();
    merge.take_events();

    merge.edit(Version::Base, TextRange::new(3, 5), "").unwrap();

    assert!(!merge.is_valid(id));
    assert_eq!(
        merge.take_events(),
        vec![MergeEvent::Removed {
            change: id,
            side: Side::Right,
            reason: RemovalReason::Invalidated,
        }]
    );
}

#[derive(Debug, Clone)]
enum Op {
    Apply(Side, prop::sample::Index),
    Remove(Side, prop::sample::Index),
    Edit(Version, usize, usize, String),
}

fn side() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Left), Just(Side::Right)]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (side(), any::<prop::sample::Index>()).prop_map(|(side, index)| Op::Apply(side, index)),
        (side(), any::<prop::sample::Index>()).prop_map(|(side, index)| Op::Remove(side, index)),
        (
            prop::sample::select(Version::ALL.to_vec()),
            0..40usize,
            0..4usize,
            "[a-z\n]{0,3}",
        )
            .prop_map(|(version, start, len, text)| Op::Edit(version, start, len, text)),
    ]
}

fn lines() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(vec!["a\n", "b\n", "c\n", "d\n"]), 0..10)
        .prop_map(|lines| lines.concat())
}

proptest! {
    #[test]
    fn prop_lists_stay_ordered(
        left in lines(),
        base in lines(),
        right in lines(),
        ops in prop::collection::vec(op(), 0..20),
    ) {
        let mut merge = MergeList::from_texts(&left, &base, &right, &MergeConfig::default());

        for op in ops {
            match op {
                Op::Apply(side, _) | Op::Remove(side, _) if merge.changes(side).is_empty() => {}
                Op::Apply(side, index) => {
                    let ids = merge.changes(side).changes();
                    let id = ids[index.index(ids.len())];
                    prop_assert_ne!(merge.apply(id).unwrap(), ApplyOutcome::Stale);
                }
                Op::Remove(side, index) => {
                    let ids = merge.changes(side).changes();
                    let id = ids[index.index(ids.len())];
                    prop_assert!(merge.remove(id));
                }
                Op::Edit(version, start, len, text) => {
                    let doc_len = merge.document(version).len_chars();
                    let start = start.min(doc_len);
                    let end = (start + len).min(doc_len);
                    merge.edit(version, TextRange::new(start, end), &text).unwrap();
                }
            }

            for side in Side::BOTH {
                prop_assert!(merge.is_ordered(side));
                for id in merge.changes(side).iter() {
                    prop_assert!(merge.is_valid(id));
                    prop_assert!(merge.range(id, Version::Base).is_some());
                    prop_assert!(merge.range(id, side.into()).is_some());
                }
            }
        }
    }
}
