//! Decks and their historical revisions.
//!
//! A [`DeckInstance`] is one immutable snapshot of a deck: which cards sit in
//! which category, and how many copies of each printing are included. A
//! [`Deck`] owns an ordered, non-empty history of such snapshots. Nothing here
//! mutates a deck; new revisions produce a new `Deck` value.

use crate::printing::CardPrinting;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier of a deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeckId(Uuid);

impl DeckId {
    /// Generate a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DeckId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for DeckId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl FromStr for DeckId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| Error::invariant(format!("invalid deck id '{}': {}", s, e)))
    }
}

impl fmt::Display for DeckId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// ============================================================================
// DeckInstance
// ============================================================================

/// One snapshot of a deck's contents.
///
/// Two instances are the same revision when they belong to the same deck and
/// were created at the same instant. Instances order most recent first, so a
/// sorted history starts with the current revision.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "RawInstance", into = "RawInstance")]
pub struct DeckInstance {
    parent_deck_id: DeckId,
    created_at: DateTime<Utc>,
    categories: BTreeMap<String, BTreeSet<String>>,
    printings: BTreeMap<CardPrinting, u32>,
}

impl DeckInstance {
    /// Cross-validate category contents against printing quantities.
    ///
    /// Fails if any printing's card is missing from every category, or if any
    /// quantity is below one.
    pub fn new(
        parent_deck_id: DeckId,
        created_at: DateTime<Utc>,
        categories: BTreeMap<String, BTreeSet<String>>,
        printing_quantities: BTreeMap<CardPrinting, i64>,
    ) -> Result<Self> {
        for (category, cards) in &categories {
            if category.trim().is_empty() {
                return Err(Error::MissingArgument("category"));
            }
            if cards.iter().any(|c| c.trim().is_empty()) {
                return Err(Error::invariant(format!(
                    "category '{}' contains a blank card name",
                    category
                )));
            }
        }

        let mut printings = BTreeMap::new();
        for (printing, quantity) in printing_quantities {
            if quantity < 1 {
                return Err(Error::invariant(format!(
                    "printing {} has quantity {}, must be at least 1",
                    printing, quantity
                )));
            }
            let quantity = u32::try_from(quantity).map_err(|_| {
                Error::invariant(format!("printing {} has quantity {} (too large)", printing, quantity))
            })?;

            let categorized = categories
                .values()
                .any(|cards| cards.contains(printing.card_name()));
            if !categorized {
                return Err(Error::invariant(format!(
                    "printing {} is not listed in any category",
                    printing
                )));
            }

            printings.insert(printing, quantity);
        }

        Ok(Self {
            parent_deck_id,
            created_at,
            categories,
            printings,
        })
    }

    pub fn parent_deck_id(&self) -> DeckId {
        self.parent_deck_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Category name to the card names in it.
    pub fn categories(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.categories
    }

    pub fn printing_quantities(&self) -> &BTreeMap<CardPrinting, u32> {
        &self.printings
    }

    pub fn quantity_of(&self, printing: &CardPrinting) -> u32 {
        self.printings.get(printing).copied().unwrap_or(0)
    }

    /// Total copies per card name, summed over every printing of that card.
    pub fn card_quantities(&self) -> BTreeMap<&str, u64> {
        let mut totals = BTreeMap::new();
        for (printing, quantity) in &self.printings {
            *totals.entry(printing.card_name()).or_insert(0) += u64::from(*quantity);
        }
        totals
    }

    /// Every card name mentioned in any category.
    pub fn card_names(&self) -> BTreeSet<&str> {
        self.categories
            .values()
            .flatten()
            .map(String::as_str)
            .collect()
    }

    pub fn total_cards(&self) -> u64 {
        self.printings.values().map(|&n| u64::from(n)).sum()
    }

    /// Categories listing `card_name`.
    pub fn categories_of<'a>(&'a self, card_name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.categories
            .iter()
            .filter(move |(_, cards)| cards.contains(card_name))
            .map(|(category, _)| category.as_str())
    }

    fn key(&self) -> (DeckId, DateTime<Utc>) {
        (self.parent_deck_id, self.created_at)
    }
}

impl PartialEq for DeckInstance {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for DeckInstance {}

impl Hash for DeckInstance {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for DeckInstance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DeckInstance {
    /// More recent instances compare as `Less`.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .created_at
            .cmp(&self.created_at)
            .then_with(|| self.parent_deck_id.cmp(&other.parent_deck_id))
    }
}

#[derive(Clone, Serialize, Deserialize)]
struct PrintingQuantity {
    printing: CardPrinting,
    quantity: i64,
}

/// Wire shape of a [`DeckInstance`]; printings become a list because their
/// keys are not strings.
#[derive(Clone, Serialize, Deserialize)]
struct RawInstance {
    parent_deck_id: DeckId,
    created_at: DateTime<Utc>,
    #[serde(default)]
    categories: BTreeMap<String, BTreeSet<String>>,
    #[serde(default)]
    printings: Vec<PrintingQuantity>,
}

impl TryFrom<RawInstance> for DeckInstance {
    type Error = Error;

    fn try_from(raw: RawInstance) -> Result<Self> {
        let mut quantities = BTreeMap::new();
        for entry in raw.printings {
            if quantities.insert(entry.printing.clone(), entry.quantity).is_some() {
                return Err(Error::invariant(format!(
                    "printing {} is listed more than once",
                    entry.printing
                )));
            }
        }
        DeckInstance::new(raw.parent_deck_id, raw.created_at, raw.categories, quantities)
    }
}

impl From<DeckInstance> for RawInstance {
    fn from(instance: DeckInstance) -> Self {
        RawInstance {
            parent_deck_id: instance.parent_deck_id,
            created_at: instance.created_at,
            categories: instance.categories,
            printings: instance
                .printings
                .into_iter()
                .map(|(printing, quantity)| PrintingQuantity {
                    printing,
                    quantity: i64::from(quantity),
                })
                .collect(),
        }
    }
}

// ============================================================================
// Deck
// ============================================================================

/// A deck and its full revision history.
///
/// Equality and hashing use the deck id alone, so two values of the same deck
/// with different histories compare equal.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "RawDeck", into = "RawDeck")]
pub struct Deck {
    id: DeckId,
    name: String,
    description: String,
    latest: DeckInstance,
    previous: BTreeSet<DeckInstance>,
}

impl Deck {
    /// Assemble a deck from already-built instances.
    ///
    /// The history must be non-empty, every instance must belong to `id`, and
    /// no two instances may share a creation time.
    pub fn new<I>(
        id: DeckId,
        name: impl Into<String>,
        description: impl Into<String>,
        history: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = DeckInstance>,
    {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::MissingArgument("deck name"));
        }

        let mut sorted = BTreeSet::new();
        for instance in history {
            check_parent(id, &instance)?;
            let created_at = instance.created_at;
            if !sorted.insert(instance) {
                return Err(Error::invariant(format!(
                    "deck {} has two revisions created at {}",
                    id, created_at
                )));
            }
        }

        let latest = sorted
            .pop_first()
            .ok_or_else(|| Error::invariant(format!("deck {} has an empty history", id)))?;

        Ok(Self {
            id,
            name,
            description: description.into(),
            latest,
            previous: sorted,
        })
    }

    pub fn id(&self) -> DeckId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// The most recent revision.
    pub fn latest(&self) -> &DeckInstance {
        &self.latest
    }

    /// Every revision, most recent first.
    pub fn history(&self) -> impl Iterator<Item = &DeckInstance> {
        std::iter::once(&self.latest).chain(self.previous.iter())
    }

    pub fn revision_count(&self) -> usize {
        1 + self.previous.len()
    }

    /// A new deck value with `instance` added to the history.
    pub fn with_instance(&self, instance: DeckInstance) -> Result<Deck> {
        Deck::new(
            self.id,
            self.name.clone(),
            self.description.clone(),
            self.history().cloned().chain(std::iter::once(instance)),
        )
    }
}

fn check_parent(id: DeckId, instance: &DeckInstance) -> Result<()> {
    if instance.parent_deck_id != id {
        return Err(Error::invariant(format!(
            "revision created at {} belongs to deck {}, not {}",
            instance.created_at, instance.parent_deck_id, id
        )));
    }
    Ok(())
}

impl PartialEq for Deck {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Deck {}

impl Hash for Deck {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[derive(Clone, Serialize, Deserialize)]
struct RawDeck {
    id: DeckId,
    name: String,
    #[serde(default)]
    description: String,
    history: Vec<DeckInstance>,
}

impl TryFrom<RawDeck> for Deck {
    type Error = Error;

    fn try_from(raw: RawDeck) -> Result<Self> {
        Deck::new(raw.id, raw.name, raw.description, raw.history)
    }
}

impl From<Deck> for RawDeck {
    fn from(deck: Deck) -> Self {
        let mut history = Vec::with_capacity(deck.revision_count());
        history.push(deck.latest);
        history.extend(deck.previous);
        RawDeck {
            id: deck.id,
            name: deck.name,
            description: deck.description,
            history,
        }
    }
}
