//! Checkout/Commit Protocol Tests
//!
//! End-to-end tests of the version-control protocol:
//! - Optimistic-concurrency conflict rejection
//! - Idempotent advisory checkout
//! - Hash purity and lockstep with content
//! - Action labeling and history ordering

use draftdb::diff::DiffOperation;
use draftdb::store::{ChangeAction, DocumentStore, StoreError, version_hash};
use uuid::Uuid;

// =============================================================================
// Creation
// =============================================================================

/// Creation always succeeds and establishes version 1 with a CREATE entry.
#[test]
fn test_create_establishes_version_one() {
    let store = DocumentStore::new();
    let document = store.create("Demo title", "hello", "u1");

    assert_eq!(document.version(), 1);
    assert_eq!(document.title(), "Demo title");
    assert_eq!(document.content(), "hello");
    assert_eq!(document.version_hash(), version_hash("hello"));
    assert_eq!(document.last_modified_by(), "u1");

    let history: Vec<_> = document.change_history().iter().collect();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].action(), ChangeAction::Create);
    assert_eq!(history[0].content(), "hello");
    assert!(history[0].diff_blocks().is_empty());
}

/// Two documents with identical content carry identical hashes.
#[test]
fn test_hash_is_pure_function_of_content() {
    let store = DocumentStore::new();
    let a = store.create("A", "same text", "u1");
    let b = store.create("B", "same text", "u2");

    assert_ne!(a.id(), b.id());
    assert_eq!(a.version_hash(), b.version_hash());
}

// =============================================================================
// Fetch
// =============================================================================

/// Unknown identities surface NotFound on every operation.
#[test]
fn test_unknown_document_is_not_found() {
    let store = DocumentStore::new();
    let missing = Uuid::new_v4();

    assert_eq!(store.get(missing), Err(StoreError::NotFound(missing)));
    assert_eq!(
        store.checkout(missing, "u1"),
        Err(StoreError::NotFound(missing))
    );
    assert_eq!(
        store.commit(missing, "u1", "text", "hash"),
        Err(StoreError::NotFound(missing))
    );
}

// =============================================================================
// Checkout
// =============================================================================

/// Checkout is advisory bookkeeping: it records the user and a history
/// entry but locks nobody out.
#[test]
fn test_checkout_is_advisory_and_non_exclusive() {
    let store = DocumentStore::new();
    let created = store.create("Notes", "hello", "u1");

    let after_u2 = store.checkout(created.id(), "u2").unwrap();
    let after_u3 = store.checkout(created.id(), "u3").unwrap();

    assert_eq!(after_u2.checked_out_by(), ["u2".to_string()]);
    assert_eq!(
        after_u3.checked_out_by(),
        ["u2".to_string(), "u3".to_string()]
    );

    let checkout_entry = after_u3.change_history().last().unwrap();
    assert_eq!(checkout_entry.action(), ChangeAction::Checkout);
    assert_eq!(checkout_entry.content(), "hello");
    assert!(checkout_entry.diff_blocks().is_empty());
}

/// Checking out twice with the same user leaves exactly one entry for
/// that user and no duplicate history.
#[test]
fn test_checkout_is_idempotent() {
    let store = DocumentStore::new();
    let created = store.create("Notes", "hello", "u1");

    store.checkout(created.id(), "u2").unwrap();
    let after_repeat = store.checkout(created.id(), "u2").unwrap();

    let holders = after_repeat
        .checked_out_by()
        .iter()
        .filter(|u| *u == "u2")
        .count();
    assert_eq!(holders, 1);
    // CREATE plus one CHECKOUT only.
    assert_eq!(after_repeat.change_history().len(), 2);
}

// =============================================================================
// Commit
// =============================================================================

/// The full checkout/edit/commit cycle from the protocol description:
/// create, checkout by another user, commit with the observed hash, then
/// a stale commit that must be rejected.
#[test]
fn test_commit_cycle_and_stale_rejection() {
    let store = DocumentStore::new();
    let created = store.create("Demo title", "hello", "u1");
    let original_hash = created.version_hash().to_string();

    store.checkout(created.id(), "u2").unwrap();
    let committed = store
        .commit(created.id(), "u2", "hello world", &original_hash)
        .unwrap();

    assert_eq!(committed.version(), 2);
    assert_eq!(committed.content(), "hello world");
    assert_eq!(committed.version_hash(), version_hash("hello world"));
    assert!(!committed.is_checked_out_by("u2"));
    assert_eq!(committed.last_modified_by(), "u2");

    let commit_entry = committed.change_history().last().unwrap();
    assert_eq!(commit_entry.action(), ChangeAction::Commit);
    let blocks = commit_entry.diff_blocks();
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].operation, DiffOperation::Equal);
    assert_eq!(blocks[0].content, "hello");
    assert_eq!(blocks[1].operation, DiffOperation::Insert);
    assert_eq!(blocks[1].content, " world");

    // u1 still holds the original hash; the commit must lose.
    let stale = store.commit(created.id(), "u1", "hello there", &original_hash);
    match stale {
        Err(StoreError::VersionConflict {
            submitted, current, ..
        }) => {
            assert_eq!(submitted, original_hash);
            assert_eq!(current, version_hash("hello world"));
        }
        other => panic!("expected VersionConflict, got {other:?}"),
    }

    let unchanged = store.get(created.id()).unwrap();
    assert_eq!(unchanged.version(), 2);
    assert_eq!(unchanged.content(), "hello world");
}

/// A rejected commit is all-or-nothing: content, version, hash, history
/// and checkout state are untouched.
#[test]
fn test_failed_commit_leaves_document_unchanged() {
    let store = DocumentStore::new();
    let created = store.create("Notes", "base", "u1");
    store.checkout(created.id(), "u2").unwrap();
    let before = store.get(created.id()).unwrap();

    let result = store.commit(created.id(), "u2", "replacement", "bogus-hash");
    assert!(matches!(result, Err(StoreError::VersionConflict { .. })));

    let after = store.get(created.id()).unwrap();
    assert_eq!(after.content(), before.content());
    assert_eq!(after.version(), before.version());
    assert_eq!(after.version_hash(), before.version_hash());
    assert_eq!(after.change_history().len(), before.change_history().len());
    assert!(after.is_checked_out_by("u2"));
}

/// The first content submission is labeled COMMIT, later ones UPDATE.
#[test]
fn test_action_labels_follow_submission_order() {
    let store = DocumentStore::new();
    let created = store.create("Notes", "v1", "u1");

    let second = store
        .commit(created.id(), "u2", "v2", created.version_hash())
        .unwrap();
    let third = store
        .commit(created.id(), "u3", "v3", second.version_hash())
        .unwrap();

    let actions: Vec<_> = third.change_history().iter().map(|c| c.action()).collect();
    assert_eq!(
        actions,
        vec![ChangeAction::Create, ChangeAction::Commit, ChangeAction::Update]
    );
}

/// Commit releases only the committer's checkout; other holders remain.
#[test]
fn test_commit_releases_only_the_committer() {
    let store = DocumentStore::new();
    let created = store.create("Notes", "base", "u1");

    store.checkout(created.id(), "u2").unwrap();
    store.checkout(created.id(), "u3").unwrap();
    let committed = store
        .commit(created.id(), "u2", "edited", created.version_hash())
        .unwrap();

    assert!(!committed.is_checked_out_by("u2"));
    assert!(committed.is_checked_out_by("u3"));
}

/// Operations on different documents are independent: a commit to one
/// never disturbs the other.
#[test]
fn test_documents_are_independent() {
    let store = DocumentStore::new();
    let a = store.create("A", "alpha", "u1");
    let b = store.create("B", "beta", "u1");

    store
        .commit(a.id(), "u2", "alpha edited", a.version_hash())
        .unwrap();

    let untouched = store.get(b.id()).unwrap();
    assert_eq!(untouched.version(), 1);
    assert_eq!(untouched.content(), "beta");
}

/// History reflects causal order across the whole cycle.
#[test]
fn test_history_preserves_causal_order() {
    let store = DocumentStore::new();
    let created = store.create("Notes", "one", "u1");

    store.checkout(created.id(), "u2").unwrap();
    let v2 = store
        .commit(created.id(), "u2", "two", created.version_hash())
        .unwrap();
    store.checkout(created.id(), "u1").unwrap();
    let v3 = store
        .commit(created.id(), "u1", "three", v2.version_hash())
        .unwrap();

    let actions: Vec<_> = v3.change_history().iter().map(|c| c.action()).collect();
    assert_eq!(
        actions,
        vec![
            ChangeAction::Create,
            ChangeAction::Checkout,
            ChangeAction::Commit,
            ChangeAction::Checkout,
            ChangeAction::Update,
        ]
    );

    // Every entry snapshots the content at its moment.
    let contents: Vec<_> = v3.change_history().iter().map(|c| c.content()).collect();
    assert_eq!(contents, vec!["one", "one", "two", "two", "three"]);
}
