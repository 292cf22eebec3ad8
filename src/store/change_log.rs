//! Change Log - append-only history of document actions
//!
//! Every action taken against a document is recorded here in causal order:
//! creation, checkouts, and accepted content commits. Entries are immutable
//! once appended and the log is never rewritten, only extended. Only the
//! store side of the crate may append; read access is unrestricted and
//! reflects insertion order exactly.

use serde::{Deserialize, Serialize};

use crate::diff::DiffBlock;

/// The action a history entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeAction {
    /// Document brought into existence.
    Create,
    /// A user declared intent to edit. No content change.
    Checkout,
    /// First accepted content submission.
    Commit,
    /// Subsequent accepted content submission.
    Update,
}

impl ChangeAction {
    /// Returns the wire-format name of the action.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeAction::Create => "CREATE",
            ChangeAction::Checkout => "CHECKOUT",
            ChangeAction::Commit => "COMMIT",
            ChangeAction::Update => "UPDATE",
        }
    }

    /// True for the action labels that carry diff blocks.
    pub fn alters_content(&self) -> bool {
        matches!(self, ChangeAction::Commit | ChangeAction::Update)
    }
}

impl std::fmt::Display for ChangeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One immutable history entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeCommit {
    action: ChangeAction,
    user_id: String,
    content: String,
    diff_blocks: Vec<DiffBlock>,
}

impl ChangeCommit {
    pub(crate) fn new(
        action: ChangeAction,
        user_id: String,
        content: String,
        diff_blocks: Vec<DiffBlock>,
    ) -> Self {
        Self {
            action,
            user_id,
            content,
            diff_blocks,
        }
    }

    /// The recorded action.
    pub fn action(&self) -> ChangeAction {
        self.action
    }

    /// The user who performed the action.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Full content snapshot at the time of the action.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The structured diff this action produced. Empty for CREATE/CHECKOUT.
    pub fn diff_blocks(&self) -> &[DiffBlock] {
        &self.diff_blocks
    }
}

/// Append-only ordered sequence of commits, owned by exactly one document.
///
/// Serializes transparently as the commit array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeLog {
    commits: Vec<ChangeCommit>,
}

impl ChangeLog {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn append(&mut self, commit: ChangeCommit) {
        self.commits.push(commit);
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ChangeCommit> {
        self.commits.iter()
    }

    /// The most recent entry, if any.
    pub fn last(&self) -> Option<&ChangeCommit> {
        self.commits.last()
    }

    pub fn len(&self) -> usize {
        self.commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }
}
