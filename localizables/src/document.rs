//! A single `.strings` file loaded for a merge.
//!
//! [`ResourceDocument`] owns the parsed literals of one file together with the
//! key bookkeeping the merge needs: the unique key set, the keys that were
//! declared more than once, and the keys the last merge partner did not have.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::{
    atomic::write_file_atomically,
    error::Error,
    strings::{self, Format},
    traits::Parser,
    types::{Literal, compare_keys, sorted_keys},
};

/// One parsed `.strings` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDocument {
    location: PathBuf,
    literals: Vec<Literal>,
    keys: HashSet<String>,
    duplicated_keys: HashSet<String>,
    missing_keys: Vec<String>,
}

impl ResourceDocument {
    /// Builds a document from already parsed literals.
    ///
    /// Literals are sorted case-insensitively by key; entries sharing a key
    /// keep their file order, so the first occurrence stays first.
    pub fn new(location: impl Into<PathBuf>, mut literals: Vec<Literal>) -> Self {
        let mut keys = HashSet::with_capacity(literals.len());
        let mut duplicated_keys = HashSet::new();
        for literal in &literals {
            if !keys.insert(literal.key.clone()) {
                duplicated_keys.insert(literal.key.clone());
            }
        }

        literals.sort_by(|a, b| compare_keys(&a.key, &b.key));

        ResourceDocument {
            location: location.into(),
            literals,
            keys,
            duplicated_keys,
            missing_keys: Vec::new(),
        }
    }

    /// Reads and parses the file at `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let format = Format::read_from(path)?;
        Ok(Self::new(path, format.literals))
    }

    /// Reads the file through `tokio::fs` and parses it.
    pub async fn load_async<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let format = Format::from_bytes(&bytes)?;
        Ok(Self::new(path, format.literals))
    }

    /// Parses in-memory text; `location` is where [`save`](Self::save) writes.
    pub fn from_text(location: impl Into<PathBuf>, text: &str) -> Result<Self, Error> {
        Ok(Self::new(location, strings::parse(text)?))
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    pub fn keys(&self) -> &HashSet<String> {
        &self.keys
    }

    pub fn duplicated_keys(&self) -> &HashSet<String> {
        &self.duplicated_keys
    }

    pub fn sorted_duplicated_keys(&self) -> Vec<String> {
        sorted_keys(&self.duplicated_keys)
    }

    /// Keys missing from the last merge partner, sorted case-insensitively.
    pub fn missing_keys(&self) -> &[String] {
        &self.missing_keys
    }

    /// Number of unique keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Value of the first entry declaring `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.literals
            .iter()
            .find(|literal| literal.key == key)
            .map(|literal| literal.value.as_str())
    }

    /// Refreshes values from `other` while keeping this document's key set.
    ///
    /// For each key, the first value found in `other` wins. Keys `other` does
    /// not provide keep their current (first-occurrence) value and are
    /// returned as missing.
    pub fn merge(&mut self, other: &ResourceDocument) -> &[String] {
        let mut found = HashSet::with_capacity(self.keys.len());
        let mut merged = Vec::with_capacity(self.keys.len());

        for literal in &other.literals {
            if self.keys.contains(&literal.key) && found.insert(literal.key.as_str()) {
                merged.push(literal.clone());
            }
        }

        let missing = self
            .keys
            .iter()
            .filter(|key| !found.contains(key.as_str()))
            .collect::<Vec<_>>();
        let missing_keys = sorted_keys(missing);

        if !missing_keys.is_empty() {
            for literal in &self.literals {
                if found.insert(literal.key.as_str()) {
                    merged.push(literal.clone());
                }
            }
        }

        merged.sort_by(|a, b| compare_keys(&a.key, &b.key));
        self.literals = merged;
        self.missing_keys = missing_keys;

        tracing::trace!(
            location = %self.location.display(),
            keys = self.keys.len(),
            missing = self.missing_keys.len(),
            "merged document"
        );

        &self.missing_keys
    }

    /// Text that [`save`](Self::save) writes.
    pub fn render(&self) -> String {
        strings::render(&self.literals)
    }

    /// Atomically rewrites the backing file.
    pub fn save(&self) -> Result<(), Error> {
        self.save_to(&self.location)
    }

    /// Atomically writes the rendered literals to `path`.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        write_file_atomically(path, self.render().as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn doc(text: &str) -> ResourceDocument {
        ResourceDocument::from_text("Localizable.strings", text).unwrap()
    }

    fn pairs(document: &ResourceDocument) -> Vec<(&str, &str)> {
        document
            .literals()
            .iter()
            .map(|literal| (literal.key.as_str(), literal.value.as_str()))
            .collect()
    }

    #[test]
    fn test_literals_sorted_case_insensitively() {
        let document = doc(r#""b"="2";"C"="3";"a"="1";"#);
        assert_eq!(pairs(&document), vec![("a", "1"), ("b", "2"), ("C", "3")]);
    }

    #[test]
    fn test_duplicates_are_tracked() {
        let document = doc(r#""same"="first";"same"="second";"#);
        assert_eq!(document.len(), 1);
        assert!(document.duplicated_keys().contains("same"));
        assert_eq!(document.get("same"), Some("first"));
        assert!(document.missing_keys().is_empty());
    }

    #[test]
    fn test_merge_refreshes_values_and_reports_missing() {
        let mut destination = doc(r#""a"="1";"b"="2";"#);
        let update = doc(r#""a"="9";"c"="3";"#);

        let missing = destination.merge(&update).to_vec();

        assert_eq!(missing, vec!["b"]);
        assert_eq!(pairs(&destination), vec![("a", "9"), ("b", "2")]);
        assert_eq!(destination.missing_keys(), ["b"]);
    }

    #[test]
    fn test_merge_with_self_is_identity() {
        let mut document = doc(indoc! {r#"
            "Zeta" = "z";
            "alpha" = "a";
            "beta" = "multi
            line";
        "#});
        let before = document.literals().to_vec();
        let copy = document.clone();

        let missing = document.merge(&copy);

        assert!(missing.is_empty());
        assert_eq!(document.literals(), before.as_slice());
    }

    #[test]
    fn test_merge_with_empty_update_keeps_everything() {
        let mut destination = doc(r#""a"="1";"B"="2";"#);
        let update = ResourceDocument::new("empty.strings", Vec::new());

        let missing = destination.merge(&update).to_vec();

        assert_eq!(missing, vec!["a", "B"]);
        assert_eq!(pairs(&destination), vec![("a", "1"), ("B", "2")]);
    }

    #[test]
    fn test_merge_first_update_occurrence_wins() {
        let mut destination = doc(r#""k"="old";"#);
        let update = doc(r#""k"="first";"k"="second";"#);

        destination.merge(&update);

        assert_eq!(pairs(&destination), vec![("k", "first")]);
    }

    #[test]
    fn test_merge_collapses_destination_duplicates() {
        let mut destination = doc(r#""dup"="one";"dup"="two";"x"="1";"#);
        let update = doc(r#""x"="updated";"#);

        let missing = destination.merge(&update).to_vec();

        assert_eq!(missing, vec!["dup"]);
        assert_eq!(pairs(&destination), vec![("dup", "one"), ("x", "updated")]);
        assert!(destination.duplicated_keys().contains("dup"));
    }

    #[test]
    fn test_merge_leaves_other_untouched() {
        let mut destination = doc(r#""a"="1";"#);
        let update = doc(r#""a"="2";"extra"="3";"#);
        let snapshot = update.clone();

        destination.merge(&update);

        assert_eq!(update, snapshot);
    }

    #[test]
    fn test_missing_keys_reset_on_next_merge() {
        let mut destination = doc(r#""a"="1";"b"="2";"#);
        destination.merge(&doc(r#""a"="x";"#));
        assert_eq!(destination.missing_keys(), ["b"]);

        destination.merge(&doc(r#""a"="y";"b"="z";"#));
        assert!(destination.missing_keys().is_empty());
    }

    #[test]
    fn test_render_is_sorted_output() {
        let document = doc(r#""b" = "2"; // two
            "a" = "1";"#);
        assert_eq!(document.render(), "\"a\"=\"1\";\n\"b\"=\"2\";\n");
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Localizable.strings");
        std::fs::write(&path, "/* c */\n\"b\" = \"2\";\n\"a\" = \"1\";\n").unwrap();

        let mut destination = ResourceDocument::load(&path).unwrap();
        destination.merge(&doc(r#""b"="20";"#));
        destination.save().unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "\"a\"=\"1\";\n\"b\"=\"20\";\n"
        );
        let reloaded = ResourceDocument::load(&path).unwrap();
        assert_eq!(reloaded.get("b"), Some("20"));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ResourceDocument::load(dir.path().join("absent.strings"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[tokio::test]
    async fn test_load_async_matches_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Localizable.strings");
        std::fs::write(&path, "\"k\" = \"v\";\n\"K2\" = \"v2\";\n").unwrap();

        let sync = ResourceDocument::load(&path).unwrap();
        let async_loaded = ResourceDocument::load_async(&path).await.unwrap();
        assert_eq!(sync, async_loaded);
    }
}
