//! Résolution des références entre fichiers (code local → identifiant stable)
//!
//! Les tables sont construites une seule fois par type d'entité avant tout
//! assemblage. [`CodeIndex::resolve`] ne journalise rien et ne panique jamais :
//! l'appelant traite [`Resolution::Missing`] selon son contexte (warning pour un
//! voisin de Delaunay, erreur fatale pour la liste de stations d'une ligne).

use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;

use crate::error::EntityKind;
use crate::types::{Ident, LineCode, StationCode};
use crate::DatasetError;

/// Résultat d'une résolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    Resolved(&'a Ident),
    Missing,
}

impl<'a> Resolution<'a> {
    pub fn ok(self) -> Option<&'a Ident> {
        match self {
            Resolution::Resolved(id) => Some(id),
            Resolution::Missing => None,
        }
    }
}

/// Table code → identifiant pour un type d'entité
#[derive(Debug, Clone)]
pub struct CodeIndex<K> {
    ids: HashMap<K, Ident>,
}

pub type StationIndex = CodeIndex<StationCode>;
pub type LineIndex = CodeIndex<LineCode>;

impl<K> CodeIndex<K>
where
    K: Copy + Eq + Hash + Display,
{
    /// Construit la table en une passe
    ///
    /// # Errors
    ///
    /// `DuplicateCode` si deux entrées partagent le même code.
    pub fn build<'a, I>(kind: EntityKind, entries: I) -> Result<Self, DatasetError>
    where
        I: IntoIterator<Item = (K, &'a Ident)>,
    {
        let entries = entries.into_iter();
        let mut ids = HashMap::with_capacity(entries.size_hint().0);

        for (code, id) in entries {
            if ids.insert(code, id.clone()).is_some() {
                return Err(DatasetError::DuplicateCode {
                    kind,
                    code: code.to_string(),
                });
            }
        }

        Ok(Self { ids })
    }

    pub fn resolve(&self, code: K) -> Resolution<'_> {
        match self.ids.get(&code) {
            Some(id) => Resolution::Resolved(id),
            None => Resolution::Missing,
        }
    }

    pub fn contains(&self, code: K) -> bool {
        self.ids.contains_key(&code)
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        let a = Ident::from("a");
        let b = Ident::from("b");
        let index = StationIndex::build(
            EntityKind::Station,
            [(StationCode(100), &a), (StationCode(200), &b)],
        )
        .unwrap();

        assert!(index.contains(StationCode(100)));
        assert_eq!(index.resolve(StationCode(200)), Resolution::Resolved(&b));
        assert_eq!(index.resolve(StationCode(999)), Resolution::Missing);
        assert_eq!(index.resolve(StationCode(999)).ok(), None);
        assert!(index.contains(StationCode(100)));
    }

    #[test]
    fn test_duplicate_code_is_fatal() {
        let a = Ident::from("a");
        let b = Ident::from("b");
        let result = LineIndex::build(EntityKind::Line, [(LineCode(1000), &a), (LineCode(1000), &b)]);

        match result {
            Err(DatasetError::DuplicateCode { kind, code }) => {
                assert_eq!(kind, EntityKind::Line);
                assert_eq!(code, "1000");
            }
            other => panic!("expected DuplicateCode, got {:?}", other),
        }
    }
}
