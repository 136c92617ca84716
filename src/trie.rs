//! Prefix tree over fully-qualified message keys.
//!
//! The index records key *existence* only. Values always come from the
//! catalogue that the index was derived from, so a [`TrieIndex`] is rebuilt
//! wholesale alongside each catalogue snapshot rather than patched in place.
//!
//! # Examples
//!
//! ```
//! use lexis::trie::TrieIndex;
//!
//! let mut index = TrieIndex::new();
//! index.insert("base.hello");
//! index.insert("base.help");
//! index.insert("errors.not_found");
//!
//! let mut keys = index.search_prefix("base.hel");
//! keys.sort();
//! assert_eq!(keys, ["base.hello", "base.help"]);
//! assert!(index.search_prefix("missing").is_empty());
//! ```

use std::collections::BTreeMap;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct TrieNode {
    children: BTreeMap<char, TrieNode>,
    terminal: bool,
}

/// Prefix-searchable set of keys.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TrieIndex {
    root: TrieNode,
    len: usize,
}

impl TrieIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `key`, returning `true` when it was not already present.
    ///
    /// Re-inserting a key is a no-op.
    pub fn insert(&mut self, key: &str) -> bool {
        let mut node = &mut self.root;
        for ch in key.chars() {
            node = node.children.entry(ch).or_default();
        }
        if node.terminal {
            return false;
        }
        node.terminal = true;
        self.len += 1;
        true
    }

    /// Return `true` when `key` was inserted as a complete key.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.find(key).is_some_and(|node| node.terminal)
    }

    /// Number of distinct keys in the index.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Return `true` when no key has been inserted.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Return every inserted key that starts with `prefix`.
    ///
    /// `prefix` itself is included when it was inserted as a complete key.
    /// Keys are yielded depth-first with siblings in character order, but
    /// callers should not rely on any particular ordering. A prefix that is
    /// not a path in the tree yields an empty vector.
    #[must_use]
    pub fn search_prefix(&self, prefix: &str) -> Vec<String> {
        let Some(start) = self.find(prefix) else {
            return Vec::new();
        };
        let mut results = Vec::new();
        let mut path = prefix.to_owned();
        collect_keys(start, &mut path, &mut results);
        results
    }

    fn find(&self, prefix: &str) -> Option<&TrieNode> {
        prefix
            .chars()
            .try_fold(&self.root, |node, ch| node.children.get(&ch))
    }
}

fn collect_keys(node: &TrieNode, path: &mut String, results: &mut Vec<String>) {
    if node.terminal {
        results.push(path.clone());
    }
    for (ch, child) in &node.children {
        path.push(*ch);
        collect_keys(child, path, results);
        path.pop();
    }
}

impl<'a> Extend<&'a str> for TrieIndex {
    fn extend<I: IntoIterator<Item = &'a str>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl Extend<String> for TrieIndex {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        for key in iter {
            self.insert(&key);
        }
    }
}

impl<'a> FromIterator<&'a str> for TrieIndex {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut index = Self::new();
        index.extend(iter);
        index
    }
}

impl FromIterator<String> for TrieIndex {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut index = Self::new();
        index.extend(iter);
        index
    }
}
