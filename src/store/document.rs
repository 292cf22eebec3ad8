//! Document - versioned state of one collaboratively edited text
//!
//! The document's `content` is the source of truth; `version` and
//! `version_hash` move in lockstep with it under every accepted mutation.
//! Fields are private so that only the store's protocol path can mutate
//! them; readers get accessors and the API layer gets the serialized form
//! (camelCase, matching the wire format the editing surface consumes).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::change_log::{ChangeAction, ChangeCommit, ChangeLog};
use super::hash::version_hash;
use crate::diff::DiffBlock;

/// A versioned document and its full change history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    id: Uuid,
    title: String,
    content: String,
    version: u64,
    version_hash: String,
    checked_out_by: Vec<String>,
    last_modified_by: String,
    change_history: ChangeLog,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Document {
    /// Create a fresh document at version 1 with a CREATE history entry.
    pub(crate) fn create(title: &str, content: &str, user_id: &str) -> Self {
        let now = Utc::now();
        let mut change_history = ChangeLog::new();
        change_history.append(ChangeCommit::new(
            ChangeAction::Create,
            user_id.to_string(),
            content.to_string(),
            Vec::new(),
        ));

        Self {
            id: Uuid::new_v4(),
            title: title.to_string(),
            version: 1,
            version_hash: version_hash(content),
            content: content.to_string(),
            checked_out_by: Vec::new(),
            last_modified_by: user_id.to_string(),
            change_history,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Current full text, source of truth.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Monotonic version counter; increments once per accepted commit.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Content fingerprint used as the optimistic-concurrency token.
    pub fn version_hash(&self) -> &str {
        &self.version_hash
    }

    /// Users currently holding an advisory checkout, in checkout order.
    pub fn checked_out_by(&self) -> &[String] {
        &self.checked_out_by
    }

    pub fn last_modified_by(&self) -> &str {
        &self.last_modified_by
    }

    pub fn change_history(&self) -> &ChangeLog {
        &self.change_history
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_checked_out_by(&self, user_id: &str) -> bool {
        self.checked_out_by.iter().any(|u| u == user_id)
    }

    /// Record an advisory checkout. Idempotent: a repeat checkout by the
    /// same user changes nothing and appends no history entry. Returns
    /// whether the checkout was newly recorded.
    pub(crate) fn record_checkout(&mut self, user_id: &str) -> bool {
        if self.is_checked_out_by(user_id) {
            return false;
        }
        self.checked_out_by.push(user_id.to_string());
        self.change_history.append(ChangeCommit::new(
            ChangeAction::Checkout,
            user_id.to_string(),
            self.content.clone(),
            Vec::new(),
        ));
        self.updated_at = Utc::now();
        true
    }

    /// True once any content-changing commit has been accepted.
    pub(crate) fn has_content_commit(&self) -> bool {
        self.change_history.iter().any(|c| c.action().alters_content())
    }

    /// Apply an accepted commit: replace content, bump version, recompute
    /// the hash, release the committer's checkout, append the history
    /// entry. The caller has already performed the conflict check.
    pub(crate) fn accept_commit(
        &mut self,
        user_id: &str,
        new_content: String,
        diff_blocks: Vec<DiffBlock>,
        action: ChangeAction,
    ) {
        self.version_hash = version_hash(&new_content);
        self.content = new_content;
        self.version += 1;
        self.checked_out_by.retain(|u| u != user_id);
        self.last_modified_by = user_id.to_string();
        self.updated_at = Utc::now();
        self.change_history.append(ChangeCommit::new(
            action,
            user_id.to_string(),
            self.content.clone(),
            diff_blocks,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_establishes_version_one() {
        let document = Document::create("Notes", "hello", "u1");

        assert_eq!(document.version(), 1);
        assert_eq!(document.content(), "hello");
        assert_eq!(document.version_hash(), version_hash("hello"));
        assert_eq!(document.last_modified_by(), "u1");
        assert!(document.checked_out_by().is_empty());
        assert_eq!(document.change_history().len(), 1);

        let first = document.change_history().last().unwrap();
        assert_eq!(first.action(), ChangeAction::Create);
        assert!(first.diff_blocks().is_empty());
    }

    #[test]
    fn test_checkout_is_idempotent() {
        let mut document = Document::create("Notes", "hello", "u1");

        assert!(document.record_checkout("u2"));
        assert!(!document.record_checkout("u2"));

        assert_eq!(document.checked_out_by(), ["u2".to_string()]);
        // CREATE plus exactly one CHECKOUT.
        assert_eq!(document.change_history().len(), 2);
    }

    #[test]
    fn test_accept_commit_keeps_hash_in_lockstep() {
        let mut document = Document::create("Notes", "hello", "u1");
        document.record_checkout("u2");

        document.accept_commit("u2", "hello world".to_string(), Vec::new(), ChangeAction::Commit);

        assert_eq!(document.version(), 2);
        assert_eq!(document.content(), "hello world");
        assert_eq!(document.version_hash(), version_hash("hello world"));
        assert!(!document.is_checked_out_by("u2"));
        assert_eq!(document.last_modified_by(), "u2");
    }

    #[test]
    fn test_serializes_with_wire_field_names() {
        let document = Document::create("Notes", "hello", "u1");
        let value = serde_json::to_value(&document).unwrap();

        for key in [
            "id",
            "title",
            "content",
            "version",
            "versionHash",
            "checkedOutBy",
            "lastModifiedBy",
            "changeHistory",
            "createdAt",
            "updatedAt",
        ] {
            assert!(value.get(key).is_some(), "missing field {key}");
        }
        assert_eq!(value["changeHistory"][0]["action"], "CREATE");
    }
}
