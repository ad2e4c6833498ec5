use std::collections::HashMap;

use crate::error::{Result, VersionTagError};
use crate::git::TagSource;

/// Mock tag source for testing without actual git operations
///
/// Holds a linear history (newest commit first) plus tags that are not
/// reachable from it, e.g. tags on other branches.
pub struct MockTagSource {
    history: Vec<(String, Vec<String>)>,
    detached: Vec<String>,
    refs: HashMap<String, usize>,
}

impl MockTagSource {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockTagSource {
            history: Vec::new(),
            detached: Vec::new(),
            refs: HashMap::new(),
        }
    }

    /// Build a history with one commit per tag, newest first
    pub fn with_history_tags<I, T>(tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut source = Self::new();
        for (i, tag) in tags.into_iter().enumerate() {
            source.push_commit(format!("c{}", i), vec![tag.into()]);
        }
        source
    }

    /// Append an older commit carrying `tags` to the history
    pub fn push_commit(&mut self, id: impl Into<String>, tags: Vec<String>) {
        let id = id.into();
        let index = self.history.len();
        for tag in &tags {
            self.refs.insert(tag.clone(), index);
        }
        self.refs.insert(id.clone(), index);
        self.history.push((id, tags));
    }

    /// Add a tag that exists in the repository but not in the walked history
    pub fn add_detached_tag(&mut self, name: impl Into<String>) {
        self.detached.push(name.into());
    }
}

impl Default for MockTagSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TagSource for MockTagSource {
    fn list_history_tags(&self, reference: Option<&str>) -> Result<Vec<String>> {
        let start = match reference {
            Some(reference) => *self.refs.get(reference).ok_or_else(|| {
                VersionTagError::vcs(format!("Cannot resolve reference '{}'", reference))
            })?,
            None => 0,
        };

        Ok(self.history[start..]
            .iter()
            .flat_map(|(_, tags)| tags.iter().cloned())
            .collect())
    }

    fn list_all_tags(&self) -> Result<Vec<String>> {
        Ok(self
            .history
            .iter()
            .flat_map(|(_, tags)| tags.iter().cloned())
            .chain(self.detached.iter().cloned())
            .collect())
    }
}
