//! Guessed attributes that must stay out of persisted metadata

use indexmap::IndexSet;

/// Insertion-ordered set of attribute names.
///
/// Collaborators that guess values (module discovery, version mining)
/// record the keys they filled in here, so the projection never freezes a
/// guess into the metadata file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    keys: IndexSet<String>,
}

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key; returns false if it was already present.
    pub fn insert(&mut self, key: impl Into<String>) -> bool {
        self.keys.insert(key.into())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_first_seen_order() {
        let mut exclusions = ExclusionSet::new();
        for _ in 0..3 {
            exclusions.insert("foo");
        }
        assert!(exclusions.insert("bar"));
        assert!(!exclusions.insert("bar"));

        assert_eq!(exclusions.iter().collect::<Vec<_>>(), vec!["foo", "bar"]);
        assert_eq!(exclusions.len(), 2);
    }

    #[test]
    fn test_collect() {
        let exclusions: ExclusionSet = ["packages", "version", "packages"].into_iter().collect();
        assert!(exclusions.contains("version"));
        assert_eq!(exclusions.len(), 2);
    }
}
