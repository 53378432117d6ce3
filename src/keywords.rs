// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Flat string key/value stores used to persist sensor state.
//!
//! Sensor records only need two operations from their persistence layer:
//! store a value under a key and look a key up again. [`KeywordStore`]
//! captures that seam so callers can hand in a plain map or the ordered
//! [`Keywordlist`].

use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Minimal string key/value store.
pub trait KeywordStore {
    /// Insert or overwrite `key`.
    fn add(&mut self, key: &str, value: String);

    /// Value stored under `key`, if any.
    fn find(&self, key: &str) -> Option<&str>;
}

impl KeywordStore for BTreeMap<String, String> {
    fn add(&mut self, key: &str, value: String) {
        self.insert(key.to_owned(), value);
    }

    fn find(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl<H: std::hash::BuildHasher> KeywordStore for HashMap<String, String, H> {
    fn add(&mut self, key: &str, value: String) {
        self.insert(key.to_owned(), value);
    }

    fn find(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

/// Join an optional prefix and a keyword name.
pub(crate) fn prefixed(prefix: Option<&str>, name: &str) -> String {
    match prefix {
        Some(prefix) => format!("{prefix}{name}"),
        None => name.to_owned(),
    }
}

/// Keyword list with deterministic, key-sorted iteration.
///
/// `Display` writes one `key: value` line per entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keywordlist {
    entries: BTreeMap<String, String>,
}

impl Keywordlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl KeywordStore for Keywordlist {
    fn add(&mut self, key: &str, value: String) {
        self.entries.add(key, value);
    }

    fn find(&self, key: &str) -> Option<&str> {
        self.entries.find(key)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Keywordlist {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl fmt::Display for Keywordlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.entries {
            writeln!(f, "{key}: {value}")?;
        }
        Ok(())
    }
}
