#![forbid(unsafe_code)]

//! Domain model and query layer of the cardcat card catalog.
//!
//! This crate provides:
//! - Closed vocabularies (supertypes, types, rarities, colors, stats, comparisons)
//! - Cards, printings, decks and deck revisions, validated at construction
//! - A catalog vocabulary snapshot for open-ended values (sets, artists, ...)
//! - A query builder compiling filter clauses into query text
//!
//! Nothing here talks to a database; callers hand the compiled query to the
//! catalog store and rebuild results through these constructors.

pub mod error;
pub mod vocabulary;
pub mod catalog;
pub mod card;
pub mod printing;
pub mod deck;
pub mod query;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use error::{Error, Result};
pub use vocabulary::{CardType, Color, Comparison, Rarity, Stat, Supertype, Vocabulary};
pub use catalog::{default_vocabulary, CatalogVocabulary, VocabularySource};
pub use card::{Card, CardBuilder, CardRelationship};
pub use printing::{CardPrinting, CardPrintingInfo};
pub use deck::{Deck, DeckId, DeckInstance};
pub use query::{parse_filter, CardQuery, NameMatch, Polarity, MATCH_ALL};
pub use config::Config;
