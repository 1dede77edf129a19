//! Corpus-wide identifier table: every declared id maps to its owner's canonical id.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::error::Error;
use crate::types::Article;

/// Case-insensitive lookup from any declared id to a canonical `main_id`.
/// Built once from the pooled articles of every chapter, read-only afterward.
#[derive(Debug)]
pub struct Registry {
    /// Case-folded id to owning article's `main_id`.
    owners: HashMap<String, String>,
}

impl Registry {
    /// Register every id of every article.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateId` on the first id already present,
    /// even when it is owned by the same article.
    pub fn build<'a, I>(articles: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = &'a Article>,
    {
        let mut owners: HashMap<String, String> = HashMap::new();

        for article in articles {
            for id in &article.ids {
                match owners.entry(id.to_lowercase()) {
                    Entry::Occupied(existing) => {
                        return Err(Error::DuplicateId {
                            article: article.main_id.clone(),
                            id: existing.key().clone(),
                            owner: existing.get().clone(),
                        });
                    },
                    Entry::Vacant(slot) => {
                        slot.insert(article.main_id.clone());
                    },
                }
            }
        }

        return Ok(Self { owners });
    }

    /// Whether `id` belongs to any article.
    pub fn contains(&self, id: &str) -> bool {
        return self.lookup(id).is_some();
    }

    /// Number of registered ids.
    pub fn id_count(&self) -> usize {
        return self.owners.len();
    }

    /// Canonical id of the article owning `id`, compared case-insensitively.
    pub fn lookup(&self, id: &str) -> Option<&str> {
        return self.owners.get(&id.to_lowercase()).map(String::as_str);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::path::PathBuf;

    use super::*;

    fn article(main_id: &str, ids: &[&str]) -> Article {
        let mut all: BTreeSet<String> = ids.iter().map(|s| s.to_string()).collect();
        all.insert(main_id.to_string());
        Article {
            body: Vec::new(),
            draft: false,
            ids: all,
            main_id: main_id.to_string(),
            source: PathBuf::from("x"),
            title: main_id.to_uppercase(),
        }
    }

    #[test]
    fn maps_synonyms_to_main_id() {
        let articles = [article("set", &["sets", "collection"]), article("map", &["function"])];
        let registry = Registry::build(&articles).unwrap();

        assert_eq!(registry.id_count(), 5);
        assert_eq!(registry.lookup("Collection"), Some("set"));
        assert_eq!(registry.lookup("FUNCTION"), Some("map"));
        assert_eq!(registry.lookup("map"), Some("map"));
        assert!(!registry.contains("graph"));
    }

    #[test]
    fn shared_synonym_is_rejected() {
        let articles = [article("a", &["thing"]), article("b", &["thing"])];
        let err = Registry::build(&articles).unwrap_err();

        match err {
            Error::DuplicateId { id, article, owner } => {
                assert_eq!(id, "thing");
                assert_eq!(article, "b");
                assert_eq!(owner, "a");
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn same_main_id_twice_is_rejected() {
        let articles = [article("a", &[]), article("a", &[])];
        let err = Registry::build(&articles).unwrap_err();
        assert!(matches!(err, Error::DuplicateId { ref id, .. } if id == "a"));
    }
}
