// this_file: crates/fontres-db/src/substitution.rs

//! Family substitution table
//!
//! Maps a family name (any case) to an ordered list of replacement
//! families. The fallback chain consults it right after the requested
//! families, so `"Arial" -> ["Helvetica"]` lets a request for Arial land on
//! Helvetica when Arial itself is missing.

use std::collections::BTreeMap;

/// Case-insensitive family name to ordered substitutes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutionTable {
    entries: BTreeMap<String, Vec<String>>,
}

fn key(family: &str) -> String {
    family.trim().to_lowercase()
}

impl SubstitutionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `substitute` to `family`'s list unless already present
    pub fn insert(&mut self, family: &str, substitute: &str) {
        let substitute = substitute.trim();
        if substitute.is_empty() {
            return;
        }
        let list = self.entries.entry(key(family)).or_default();
        if !list.iter().any(|s| s.eq_ignore_ascii_case(substitute)) {
            list.push(substitute.to_string());
        }
    }

    pub fn insert_all<I, S>(&mut self, family: &str, substitutes: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for substitute in substitutes {
            self.insert(family, substitute.as_ref());
        }
    }

    /// Drops every substitute of `family`; true if there were any
    pub fn remove(&mut self, family: &str) -> bool {
        self.entries.remove(&key(family)).is_some()
    }

    /// Substitutes for `family`, in insertion order
    pub fn substitutes(&self, family: &str) -> &[String] {
        self.entries
            .get(&key(family))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Families that have substitutes, lowercased and sorted
    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<K, V> FromIterator<(K, V)> for SubstitutionTable
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut table = Self::new();
        for (family, substitute) in iter {
            table.insert(family.as_ref(), substitute.as_ref());
        }
        table
    }
}
