//! The abstract card and its relationship to other cards.
//!
//! A [`Card`] can only be obtained through [`CardBuilder::build`], which is
//! where every field is validated. Once built a card is immutable; accessors
//! hand out shared references only.

use crate::vocabulary::{CardType, Color, Stat, Supertype, Vocabulary};
use crate::{Error, Result};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::hash::{Hash, Hasher};

// ============================================================================
// Relationship
// ============================================================================

/// How a card is linked to other cards (transform, flip, meld, ...).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CardRelationship {
    #[default]
    None,
    Related {
        cards: BTreeSet<String>,
        relation: String,
    },
}

#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum RawRelationship {
    None,
    Related {
        cards: BTreeSet<String>,
        relation: String,
    },
}

impl<'de> Deserialize<'de> for CardRelationship {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match RawRelationship::deserialize(deserializer)? {
            RawRelationship::None => Ok(CardRelationship::None),
            RawRelationship::Related { cards, relation } => {
                CardRelationship::related(cards, relation).map_err(de::Error::custom)
            }
        }
    }
}

impl CardRelationship {
    /// A relationship between at least two named cards.
    pub fn related<I, S>(cards: I, relation: impl Into<String>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cards: BTreeSet<String> = cards.into_iter().map(Into::into).collect();
        let relation = relation.into();

        if cards.iter().any(|c| c.trim().is_empty()) {
            return Err(Error::invariant("related card names must not be blank"));
        }
        if cards.len() < 2 {
            return Err(Error::invariant(format!(
                "a relationship needs at least two distinct cards, got {}",
                cards.len()
            )));
        }
        if relation.trim().is_empty() {
            return Err(Error::MissingArgument("relation"));
        }

        Ok(CardRelationship::Related { cards, relation })
    }

    pub fn is_related(&self) -> bool {
        matches!(self, CardRelationship::Related { .. })
    }

    /// Names of every card in the relationship; empty for `None`.
    pub fn cards(&self) -> impl Iterator<Item = &str> {
        let cards = match self {
            CardRelationship::Related { cards, .. } => Some(cards),
            CardRelationship::None => None,
        };
        cards.into_iter().flatten().map(String::as_str)
    }

    /// The relation label; empty for `None`.
    pub fn relation(&self) -> &str {
        match self {
            CardRelationship::Related { relation, .. } => relation,
            CardRelationship::None => "",
        }
    }
}

// ============================================================================
// Card
// ============================================================================

/// An abstract card, independent of any printing.
///
/// Ordering, equality and hashing consider the name only.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "CardBuilder")]
pub struct Card {
    name: String,
    mana_cost: BTreeMap<String, u32>,
    text: String,
    colors: BTreeSet<Color>,
    color_identity: BTreeSet<Color>,
    supertypes: BTreeSet<Supertype>,
    types: BTreeSet<CardType>,
    subtypes: BTreeSet<String>,
    extra_stats: BTreeMap<Stat, String>,
    relationship: CardRelationship,
}

impl Card {
    pub fn builder(name: impl Into<String>) -> CardBuilder {
        CardBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Mana symbol to count.
    pub fn mana_cost(&self) -> &BTreeMap<String, u32> {
        &self.mana_cost
    }

    /// Converted mana cost: the sum of all symbol counts.
    pub fn cmc(&self) -> u64 {
        self.mana_cost.values().map(|&n| u64::from(n)).sum()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn colors(&self) -> &BTreeSet<Color> {
        &self.colors
    }

    pub fn color_identity(&self) -> &BTreeSet<Color> {
        &self.color_identity
    }

    pub fn supertypes(&self) -> &BTreeSet<Supertype> {
        &self.supertypes
    }

    pub fn types(&self) -> &BTreeSet<CardType> {
        &self.types
    }

    pub fn subtypes(&self) -> &BTreeSet<String> {
        &self.subtypes
    }

    pub fn extra_stats(&self) -> &BTreeMap<Stat, String> {
        &self.extra_stats
    }

    pub fn stat(&self, stat: Stat) -> Option<&str> {
        self.extra_stats.get(&stat).map(String::as_str)
    }

    pub fn relationship(&self) -> &CardRelationship {
        &self.relationship
    }

    pub fn is_creature(&self) -> bool {
        self.types.contains(&CardType::Creature)
    }

    pub fn is_vehicle(&self) -> bool {
        self.subtypes.iter().any(|s| s.eq_ignore_ascii_case("vehicle"))
    }

    pub fn is_planeswalker(&self) -> bool {
        self.types.contains(&CardType::Planeswalker)
    }

    /// Key used for ordering and equality.
    pub fn key(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Card {}

impl Hash for Card {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Card {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(other.key())
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Accumulates raw card fields; [`CardBuilder::build`] validates them.
///
/// Vocabulary fields are kept as text until `build` so that ingestion code
/// can pass through whatever it parsed and get a single, kinded error back.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct CardBuilder {
    name: String,
    mana_cost: BTreeMap<String, u32>,
    text: String,
    colors: Vec<String>,
    color_identity: Vec<String>,
    supertypes: Vec<String>,
    types: Vec<String>,
    subtypes: Vec<String>,
    extra_stats: BTreeMap<String, String>,
    relationship: CardRelationship,
}

impl CardBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn mana(mut self, symbol: impl Into<String>, count: u32) -> Self {
        self.mana_cost.insert(symbol.into(), count);
        self
    }

    pub fn mana_cost<I, S>(mut self, cost: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        self.mana_cost = cost.into_iter().map(|(s, n)| (s.into(), n)).collect();
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.colors = colors.into_iter().map(Into::into).collect();
        self
    }

    pub fn color_identity<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.color_identity = colors.into_iter().map(Into::into).collect();
        self
    }

    pub fn supertypes<I, S>(mut self, supertypes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.supertypes = supertypes.into_iter().map(Into::into).collect();
        self
    }

    pub fn types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn subtypes<I, S>(mut self, subtypes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subtypes = subtypes.into_iter().map(Into::into).collect();
        self
    }

    pub fn stat(mut self, stat: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_stats.insert(stat.into(), value.into());
        self
    }

    pub fn relationship(mut self, relationship: CardRelationship) -> Self {
        self.relationship = relationship;
        self
    }

    /// Validate every field and produce the card.
    pub fn build(self) -> Result<Card> {
        if self.name.trim().is_empty() {
            return Err(Error::MissingArgument("name"));
        }

        for (symbol, count) in &self.mana_cost {
            if symbol.trim().is_empty() {
                return Err(Error::invariant(format!(
                    "card '{}' has a blank mana symbol",
                    self.name
                )));
            }
            if *count == 0 {
                return Err(Error::invariant(format!(
                    "card '{}' lists mana symbol '{}' with a count of zero",
                    self.name, symbol
                )));
            }
        }

        let colors: BTreeSet<Color> = resolve_all(&self.colors)?;
        if colors.is_empty() {
            return Err(Error::invariant(format!(
                "card '{}' must have at least one color (use colorless)",
                self.name
            )));
        }

        let color_identity: BTreeSet<Color> = resolve_all(&self.color_identity)?;
        if color_identity.is_empty() {
            return Err(Error::invariant(format!(
                "card '{}' must have a color identity (use colorless)",
                self.name
            )));
        }

        let supertypes: BTreeSet<Supertype> = resolve_all(&self.supertypes)?;

        let types: BTreeSet<CardType> = resolve_all(&self.types)?;
        if types.is_empty() {
            return Err(Error::invariant(format!(
                "card '{}' must have at least one type",
                self.name
            )));
        }

        if self.subtypes.iter().any(|s| s.trim().is_empty()) {
            return Err(Error::invariant(format!(
                "card '{}' has a blank subtype",
                self.name
            )));
        }
        let subtypes: BTreeSet<String> = self.subtypes.into_iter().collect();

        let mut extra_stats = BTreeMap::new();
        for (stat, value) in self.extra_stats {
            let key = Stat::matches(Some(&stat))?;
            if extra_stats.insert(key, value).is_some() {
                return Err(Error::invariant(format!(
                    "card '{}' lists stat '{}' twice",
                    self.name, key
                )));
            }
        }

        check_stat_shape(&self.name, &types, &subtypes, &extra_stats)?;

        if let CardRelationship::Related { cards, .. } = &self.relationship {
            if !cards.contains(&self.name) {
                return Err(Error::invariant(format!(
                    "relationship of card '{}' does not include the card itself",
                    self.name
                )));
            }
        }

        Ok(Card {
            name: self.name,
            mana_cost: self.mana_cost,
            text: self.text,
            colors,
            color_identity,
            supertypes,
            types,
            subtypes,
            extra_stats,
            relationship: self.relationship,
        })
    }
}

impl TryFrom<CardBuilder> for Card {
    type Error = Error;

    fn try_from(builder: CardBuilder) -> Result<Self> {
        builder.build()
    }
}

impl From<&Card> for CardBuilder {
    fn from(card: &Card) -> Self {
        CardBuilder {
            name: card.name.clone(),
            mana_cost: card.mana_cost.clone(),
            text: card.text.clone(),
            colors: card.colors.iter().map(|c| c.label().to_string()).collect(),
            color_identity: card
                .color_identity
                .iter()
                .map(|c| c.label().to_string())
                .collect(),
            supertypes: card.supertypes.iter().map(|s| s.label().to_string()).collect(),
            types: card.types.iter().map(|t| t.label().to_string()).collect(),
            subtypes: card.subtypes.iter().cloned().collect(),
            extra_stats: card
                .extra_stats
                .iter()
                .map(|(k, v)| (k.label().to_string(), v.clone()))
                .collect(),
            relationship: card.relationship.clone(),
        }
    }
}

fn resolve_all<V: Vocabulary + Ord>(values: &[String]) -> Result<BTreeSet<V>> {
    values.iter().map(|v| V::matches(Some(v))).collect()
}

/// Creatures and vehicles carry exactly power/toughness, planeswalkers exactly
/// loyalty. Other cards are unconstrained.
fn check_stat_shape(
    name: &str,
    types: &BTreeSet<CardType>,
    subtypes: &BTreeSet<String>,
    extra_stats: &BTreeMap<Stat, String>,
) -> Result<()> {
    let keys: BTreeSet<Stat> = extra_stats.keys().copied().collect();

    let needs_body = types.contains(&CardType::Creature)
        || subtypes.iter().any(|s| s.eq_ignore_ascii_case("vehicle"));
    if needs_body {
        let expected = BTreeSet::from([Stat::Power, Stat::Toughness]);
        if keys != expected {
            return Err(Error::invariant(format!(
                "creature or vehicle '{}' must have exactly power and toughness, got {:?}",
                name, keys
            )));
        }
    }

    if types.contains(&CardType::Planeswalker) {
        let expected = BTreeSet::from([Stat::Loyalty]);
        if keys != expected {
            return Err(Error::invariant(format!(
                "planeswalker '{}' must have exactly loyalty, got {:?}",
                name, keys
            )));
        }
    }

    Ok(())
}
