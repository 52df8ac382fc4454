//! Catalog vocabulary: the open-ended value lists known to the storage layer.
//!
//! Subtypes, mana symbols, blocks, sets and artists grow as the catalog is
//! populated, so unlike the fixed tables in [`crate::vocabulary`] they are
//! carried as a snapshot. The storage collaborator exports one (JSON), and
//! the query builder validates clause values against it.

use crate::vocabulary::{CardType, Color, Rarity, Supertype, Vocabulary};
use crate::Result;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Cached default vocabulary, built once and shared for the process lifetime
static DEFAULT_VOCABULARY: Lazy<CatalogVocabulary> = Lazy::new(build_default_vocabulary);

/// Get a reference to the cached default vocabulary
pub fn default_vocabulary() -> &'static CatalogVocabulary {
    &DEFAULT_VOCABULARY
}

/// Sorted vocabulary listings, as exposed by a catalog store.
pub trait VocabularySource {
    fn supertypes(&self) -> Vec<&str> {
        Supertype::sorted_labels()
    }

    fn types(&self) -> Vec<&str> {
        CardType::sorted_labels()
    }

    fn rarities(&self) -> Vec<&str> {
        Rarity::sorted_labels()
    }

    fn colors(&self) -> Vec<&str> {
        Color::sorted_labels()
    }

    fn subtypes(&self) -> Vec<&str>;

    fn mana_symbols(&self) -> Vec<&str>;

    fn multi_face_types(&self) -> Vec<&str>;

    fn blocks(&self) -> Vec<&str>;

    fn artists(&self) -> Vec<&str>;

    fn sets(&self) -> Vec<&str>;
}

/// Snapshot of the open vocabularies of a catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogVocabulary {
    #[serde(default)]
    pub subtypes: BTreeSet<String>,
    #[serde(default)]
    pub mana_symbols: BTreeSet<String>,
    #[serde(default)]
    pub multi_face_types: BTreeSet<String>,
    #[serde(default)]
    pub blocks: BTreeSet<String>,
    #[serde(default)]
    pub sets: BTreeSet<String>,
    #[serde(default)]
    pub artists: BTreeSet<String>,
}

/// Case-insensitive lookup returning the stored spelling.
fn find_in<'a>(values: &'a BTreeSet<String>, text: &str) -> Option<&'a str> {
    values
        .iter()
        .find(|v| v.eq_ignore_ascii_case(text))
        .map(String::as_str)
}

fn strs(values: &BTreeSet<String>) -> Vec<&str> {
    values.iter().map(String::as_str).collect()
}

impl CatalogVocabulary {
    /// Load a vocabulary snapshot from a JSON file
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let vocabulary: CatalogVocabulary = serde_json::from_str(&contents)?;
        tracing::info!(
            "Loaded catalog vocabulary from {:?} ({} sets, {} artists)",
            path,
            vocabulary.sets.len(),
            vocabulary.artists.len()
        );
        Ok(vocabulary)
    }

    /// Write the snapshot as pretty JSON
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn subtype(&self, text: &str) -> Option<&str> {
        find_in(&self.subtypes, text)
    }

    pub fn mana_symbol(&self, text: &str) -> Option<&str> {
        find_in(&self.mana_symbols, text)
    }

    pub fn block(&self, text: &str) -> Option<&str> {
        find_in(&self.blocks, text)
    }

    pub fn set(&self, text: &str) -> Option<&str> {
        find_in(&self.sets, text)
    }

    pub fn artist(&self, text: &str) -> Option<&str> {
        find_in(&self.artists, text)
    }

    /// Validate the snapshot for blank entries and case-insensitive duplicates
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let lists = [
            ("subtypes", &self.subtypes),
            ("mana_symbols", &self.mana_symbols),
            ("multi_face_types", &self.multi_face_types),
            ("blocks", &self.blocks),
            ("sets", &self.sets),
            ("artists", &self.artists),
        ];

        for (name, values) in lists {
            let mut folded = BTreeSet::new();
            for value in values {
                if value.trim().is_empty() {
                    errors.push(format!("{} contains a blank entry", name));
                } else if !folded.insert(value.to_lowercase()) {
                    errors.push(format!(
                        "{} contains '{}' more than once (ignoring case)",
                        name, value
                    ));
                }
            }
        }

        errors
    }
}

impl VocabularySource for CatalogVocabulary {
    fn subtypes(&self) -> Vec<&str> {
        strs(&self.subtypes)
    }

    fn mana_symbols(&self) -> Vec<&str> {
        strs(&self.mana_symbols)
    }

    fn multi_face_types(&self) -> Vec<&str> {
        strs(&self.multi_face_types)
    }

    fn blocks(&self) -> Vec<&str> {
        strs(&self.blocks)
    }

    fn artists(&self) -> Vec<&str> {
        strs(&self.artists)
    }

    fn sets(&self) -> Vec<&str> {
        strs(&self.sets)
    }
}

/// Builds a small built-in vocabulary, used when no snapshot is configured
///
/// **Note**: For production use, prefer `default_vocabulary()` which returns a
/// cached reference.
pub fn build_default_vocabulary() -> CatalogVocabulary {
    fn set_of(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    CatalogVocabulary {
        subtypes: set_of(&[
            "Ajani", "Angel", "Aura", "Beast", "Chandra", "Dragon", "Elf", "Equipment",
            "Forest", "Goblin", "Human", "Island", "Jace", "Liliana", "Mountain", "Plains",
            "Swamp", "Vehicle", "Warrior", "Wizard", "Zombie",
        ]),
        mana_symbols: set_of(&[
            "B", "C", "G", "R", "S", "U", "W", "X", "B/G", "B/R", "G/U", "G/W", "R/G",
            "R/W", "U/B", "U/R", "W/B", "W/U", "Generic",
        ]),
        multi_face_types: set_of(&["adventure", "flip", "meld", "split", "transform"]),
        blocks: set_of(&[
            "Innistrad", "Ixalan", "Kaladesh", "Mirrodin", "Ravnica", "Shadowmoor",
            "Theros", "Zendikar",
        ]),
        sets: set_of(&[
            "10E", "ALA", "DOM", "ISD", "KLD", "LEA", "M10", "RTR", "THS", "XLN", "ZEN",
        ]),
        artists: set_of(&[
            "Christopher Moeller", "Christopher Rush", "Jason Chan", "Kev Walker",
            "Mark Poole", "Rebecca Guay", "Seb McKinnon", "Terese Nielsen",
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_vocabulary_validates() {
        let errors = build_default_vocabulary().validate();
        assert!(
            errors.is_empty(),
            "Default vocabulary has validation errors: {:?}",
            errors
        );
    }

    #[test]
    fn test_cached_default_matches_fresh_build() {
        assert_eq!(default_vocabulary(), &build_default_vocabulary());
    }

    #[test]
    fn test_listings_are_sorted() {
        let vocab = build_default_vocabulary();
        for listing in [
            vocab.supertypes(),
            vocab.types(),
            vocab.rarities(),
            vocab.colors(),
            VocabularySource::sets(&vocab),
            VocabularySource::artists(&vocab),
            VocabularySource::subtypes(&vocab),
        ] {
            let mut sorted = listing.clone();
            sorted.sort_unstable();
            assert_eq!(listing, sorted);
        }
    }

    #[test]
    fn test_lookup_returns_canonical_spelling() {
        let vocab = build_default_vocabulary();
        assert_eq!(vocab.set("zen"), Some("ZEN"));
        assert_eq!(vocab.artist("kev walker"), Some("Kev Walker"));
        assert_eq!(vocab.block("INNISTRAD"), Some("Innistrad"));
        assert_eq!(vocab.set("XYZ"), None);
    }

    #[test]
    fn test_validate_reports_blank_and_duplicate_entries() {
        let mut vocab = CatalogVocabulary::default();
        vocab.sets.insert("  ".into());
        vocab.artists.insert("Kev Walker".into());
        vocab.artists.insert("kev walker".into());

        let errors = vocab.validate();
        assert_eq!(errors.len(), 2, "{:?}", errors);
    }

    #[test]
    fn test_load_and_save_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("vocabulary.json");

        let vocab = build_default_vocabulary();
        vocab.save_to(&path).unwrap();

        let loaded = CatalogVocabulary::load_from(&path).unwrap();
        assert_eq!(loaded, vocab);
    }

    #[test]
    fn test_partial_snapshot_defaults_missing_lists() {
        let vocab: CatalogVocabulary = serde_json::from_str(r#"{"sets": ["ABC"]}"#).unwrap();
        assert_eq!(vocab.set("abc"), Some("ABC"));
        assert!(vocab.artists.is_empty());
    }
}
