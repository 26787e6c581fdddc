//! Injected script environment.
//!
//! A [`Scope`] is a tree of identifier names describing what the host page
//! exposes to scripts (`mw`, `mw.config`, `$`, ...). It feeds the read-only
//! globals of the lint configuration and drives identifier completion.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::document::{Document, TextSnapshot};

/// Dotted identifier path ending at the cursor, e.g. `mw.config.g`.
static PATH_BEFORE_CURSOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:[A-Za-z_$][\w$]*\.)*[\w$]*$").unwrap());

/// A node in the environment tree. Leaves are empty scopes.
///
/// Serializes as nested JSON objects: `{"mw": {"config": {}}, "$": {}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scope {
    members: BTreeMap<String, Scope>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scope whose members are all leaves.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            members: names.into_iter().map(|n| (n.into(), Scope::new())).collect(),
        }
    }

    /// Builder-style insert of a member with its own sub-scope.
    pub fn with(mut self, name: impl Into<String>, member: Scope) -> Self {
        self.members.insert(name.into(), member);
        self
    }

    /// Get or create the member `name`.
    pub fn member_mut(&mut self, name: &str) -> &mut Scope {
        self.members.entry(name.to_string()).or_default()
    }

    /// Top-level member names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Resolve a member path such as `["mw", "config"]`.
    pub fn resolve(&self, path: &[&str]) -> Option<&Scope> {
        path.iter().try_fold(self, |scope, segment| scope.members.get(*segment))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionKind {
    /// Top-level name.
    Variable,
    /// Member reached through a dotted path.
    Property,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionOption {
    pub label: String,
    #[serde(rename = "type")]
    pub kind: CompletionKind,
}

/// Completions for the identifier ending at the cursor.
///
/// `from` is the offset where the typed prefix starts; accepting an option
/// replaces `from..cursor` with its label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub from: usize,
    pub options: Vec<CompletionOption>,
}

/// Complete the dotted identifier path that ends at character `offset`.
///
/// Returns `None` when no identifier is being typed or the path does not
/// resolve inside `scope`.
pub fn complete_at(scope: &Scope, text: &str, offset: usize) -> Option<Completion> {
    let doc = TextSnapshot::new(text);
    let offset = offset.min(doc.len());
    let before = &text[..doc.byte_index(offset)];

    let path = PATH_BEFORE_CURSOR.find(before)?.as_str();
    if path.is_empty() {
        return None;
    }

    let mut segments: Vec<&str> = path.split('.').collect();
    let prefix = segments.pop().unwrap_or_default();
    let kind = if segments.is_empty() {
        CompletionKind::Variable
    } else {
        CompletionKind::Property
    };

    let target = scope.resolve(&segments)?;
    let options: Vec<CompletionOption> = target
        .names()
        .filter(|name| name.starts_with(prefix))
        .map(|name| CompletionOption {
            label: name.to_string(),
            kind,
        })
        .collect();
    if options.is_empty() {
        return None;
    }

    Some(Completion {
        from: offset - prefix.chars().count(),
        options,
    })
}
