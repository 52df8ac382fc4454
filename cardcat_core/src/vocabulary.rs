//! Closed vocabularies of the catalog.
//!
//! Every vocabulary is a fixed `(id, label)` table. Lookup by label is
//! case-insensitive and exact; anything else is an
//! [`Error::UnrecognizedValue`]. Entity constructors and the query builder
//! both go through [`Vocabulary::matches`], so the accepted values can never
//! drift between the two.

use crate::{Error, Result};
use std::fmt;

/// Behaviour shared by every closed vocabulary.
pub trait Vocabulary: Sized + Copy + Eq + 'static {
    /// Human-readable vocabulary name used in error messages.
    const NAME: &'static str;

    /// Every member, in id order.
    fn all() -> &'static [Self];

    fn id(self) -> u32;

    fn label(self) -> &'static str;

    /// Case-insensitive exact lookup of `text` against every member label.
    ///
    /// `None` (an absent value) fails the same way as an unknown label.
    fn matches(text: Option<&str>) -> Result<Self> {
        let text = text.ok_or(Error::UnrecognizedValue {
            vocabulary: Self::NAME,
            value: String::new(),
        })?;

        Self::all()
            .iter()
            .copied()
            .find(|member| member.label().eq_ignore_ascii_case(text))
            .ok_or_else(|| Error::UnrecognizedValue {
                vocabulary: Self::NAME,
                value: text.to_string(),
            })
    }

    /// Every label, sorted alphabetically.
    fn sorted_labels() -> Vec<&'static str> {
        let mut labels: Vec<_> = Self::all().iter().map(|m| m.label()).collect();
        labels.sort_unstable();
        labels
    }
}

macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident, $vocab:literal {
            $( $variant:ident = ($id:literal, $label:literal) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[derive(serde::Deserialize)]
        #[serde(try_from = "String")]
        pub enum $name {
            $( $variant ),+
        }

        impl $name {
            const ALL: &'static [$name] = &[ $( $name::$variant ),+ ];
        }

        impl Vocabulary for $name {
            const NAME: &'static str = $vocab;

            fn all() -> &'static [Self] {
                Self::ALL
            }

            fn id(self) -> u32 {
                match self {
                    $( $name::$variant => $id ),+
                }
            }

            fn label(self) -> &'static str {
                match self {
                    $( $name::$variant => $label ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl std::str::FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                <$name as Vocabulary>::matches(Some(s))
            }
        }

        impl TryFrom<String> for $name {
            type Error = Error;

            fn try_from(s: String) -> Result<Self> {
                <$name as Vocabulary>::matches(Some(&s))
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.label())
            }
        }
    };
}

vocabulary! {
    /// Card supertype (the words before the main type, e.g. "Legendary").
    Supertype, "supertype" {
        Basic = (1, "basic"),
        Legendary = (2, "legendary"),
        Ongoing = (3, "ongoing"),
        Snow = (4, "snow"),
        World = (5, "world"),
    }
}

vocabulary! {
    /// Card type.
    CardType, "type" {
        Artifact = (1, "artifact"),
        Battle = (2, "battle"),
        Conspiracy = (3, "conspiracy"),
        Creature = (4, "creature"),
        Dungeon = (5, "dungeon"),
        Enchantment = (6, "enchantment"),
        Instant = (7, "instant"),
        Land = (8, "land"),
        Phenomenon = (9, "phenomenon"),
        Plane = (10, "plane"),
        Planeswalker = (11, "planeswalker"),
        Scheme = (12, "scheme"),
        Sorcery = (13, "sorcery"),
        Tribal = (14, "tribal"),
        Vanguard = (15, "vanguard"),
    }
}

vocabulary! {
    /// Printing rarity.
    Rarity, "rarity" {
        Common = (1, "common"),
        Uncommon = (2, "uncommon"),
        Rare = (3, "rare"),
        Mythic = (4, "mythic rare"),
        Special = (5, "special"),
        BasicLand = (6, "basic land"),
    }
}

vocabulary! {
    /// Card color. Colorless is a member in its own right.
    Color, "color" {
        White = (1, "white"),
        Blue = (2, "blue"),
        Black = (3, "black"),
        Red = (4, "red"),
        Green = (5, "green"),
        Colorless = (6, "colorless"),
    }
}

vocabulary! {
    /// Numeric card statistic usable in stat filters.
    Stat, "stat" {
        Cmc = (1, "cmc"),
        Power = (2, "power"),
        Toughness = (3, "toughness"),
        Loyalty = (4, "loyalty"),
    }
}

vocabulary! {
    /// Numeric comparison operator.
    Comparison, "comparison" {
        Eq = (1, "="),
        Ne = (2, "!="),
        Lt = (3, "<"),
        Le = (4, "<="),
        Gt = (5, ">"),
        Ge = (6, ">="),
    }
}
