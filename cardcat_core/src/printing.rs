//! Printings: a card as it physically appears in an expansion.

use crate::vocabulary::Rarity;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Identity of a printing: `(card name, expansion, identifying number)`.
///
/// Field order is significant: the derived ordering compares name, then
/// expansion, then number, and agrees with the derived equality.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawPrinting")]
pub struct CardPrinting {
    card_name: String,
    expansion: String,
    identifying_number: String,
}

#[derive(Deserialize)]
struct RawPrinting {
    card_name: String,
    expansion: String,
    identifying_number: String,
}

impl TryFrom<RawPrinting> for CardPrinting {
    type Error = Error;

    fn try_from(raw: RawPrinting) -> Result<Self> {
        CardPrinting::new(raw.card_name, raw.expansion, raw.identifying_number)
    }
}

impl CardPrinting {
    pub fn new(
        card_name: impl Into<String>,
        expansion: impl Into<String>,
        identifying_number: impl Into<String>,
    ) -> Result<Self> {
        let card_name = card_name.into();
        let expansion = expansion.into();
        let identifying_number = identifying_number.into();

        if card_name.trim().is_empty() {
            return Err(Error::MissingArgument("card_name"));
        }
        if expansion.trim().is_empty() {
            return Err(Error::MissingArgument("expansion"));
        }
        if identifying_number.trim().is_empty() {
            return Err(Error::MissingArgument("identifying_number"));
        }

        Ok(Self {
            card_name,
            expansion,
            identifying_number,
        })
    }

    pub fn card_name(&self) -> &str {
        &self.card_name
    }

    pub fn expansion(&self) -> &str {
        &self.expansion
    }

    pub fn identifying_number(&self) -> &str {
        &self.identifying_number
    }
}

impl fmt::Display for CardPrinting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} #{})",
            self.card_name, self.expansion, self.identifying_number
        )
    }
}

/// A printing plus its print metadata.
///
/// Identity and ordering delegate to the wrapped [`CardPrinting`]; two infos
/// differing only in artists, flavor text or rarity are equal.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "RawPrintingInfo")]
pub struct CardPrintingInfo {
    printing: CardPrinting,
    artists: Vec<String>,
    flavor_text: String,
    rarity: Rarity,
}

#[derive(Deserialize)]
struct RawPrintingInfo {
    printing: CardPrinting,
    artists: Vec<String>,
    #[serde(default)]
    flavor_text: String,
    rarity: Rarity,
}

impl TryFrom<RawPrintingInfo> for CardPrintingInfo {
    type Error = Error;

    fn try_from(raw: RawPrintingInfo) -> Result<Self> {
        CardPrintingInfo::new(raw.printing, raw.artists, raw.flavor_text, raw.rarity)
    }
}

impl CardPrintingInfo {
    /// `artists` keeps its given order; repeated names are dropped after the
    /// first occurrence.
    pub fn new<I, S>(
        printing: CardPrinting,
        artists: I,
        flavor_text: impl Into<String>,
        rarity: Rarity,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut ordered: Vec<String> = Vec::new();
        for artist in artists {
            let artist = artist.into();
            if artist.trim().is_empty() {
                return Err(Error::invariant(format!(
                    "printing {} lists a blank artist",
                    printing
                )));
            }
            if !ordered.contains(&artist) {
                ordered.push(artist);
            }
        }
        if ordered.is_empty() {
            return Err(Error::invariant(format!(
                "printing {} must credit at least one artist",
                printing
            )));
        }

        Ok(Self {
            printing,
            artists: ordered,
            flavor_text: flavor_text.into(),
            rarity,
        })
    }

    pub fn printing(&self) -> &CardPrinting {
        &self.printing
    }

    pub fn artists(&self) -> &[String] {
        &self.artists
    }

    pub fn flavor_text(&self) -> &str {
        &self.flavor_text
    }

    pub fn rarity(&self) -> Rarity {
        self.rarity
    }
}

impl PartialEq for CardPrintingInfo {
    fn eq(&self, other: &Self) -> bool {
        self.printing == other.printing
    }
}

impl Eq for CardPrintingInfo {}

impl Hash for CardPrintingInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.printing.hash(state);
    }
}

impl PartialOrd for CardPrintingInfo {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CardPrintingInfo {
    fn cmp(&self, other: &Self) -> Ordering {
        self.printing.cmp(&other.printing)
    }
}

impl Borrow<CardPrinting> for CardPrintingInfo {
    fn borrow(&self) -> &CardPrinting {
        &self.printing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeSet, HashSet};

    fn printing(name: &str, set: &str, number: &str) -> CardPrinting {
        CardPrinting::new(name, set, number).unwrap()
    }

    #[test]
    fn test_blank_parts_are_rejected() {
        assert!(matches!(
            CardPrinting::new("", "LEA", "1"),
            Err(Error::MissingArgument("card_name"))
        ));
        assert!(matches!(
            CardPrinting::new("Bolt", " ", "1"),
            Err(Error::MissingArgument("expansion"))
        ));
        assert!(matches!(
            CardPrinting::new("Bolt", "LEA", ""),
            Err(Error::MissingArgument("identifying_number"))
        ));
    }

    #[test]
    fn test_order_is_name_then_expansion_then_number() {
        let a = printing("Bolt", "LEA", "161");
        let b = printing("Bolt", "M10", "133");
        let c = printing("Bolt", "M10", "134");
        let d = printing("Counterspell", "ALA", "1");

        assert!(a < b);
        assert!(b < c);
        assert!(c < d);
        assert!(a < d);
    }

    #[test]
    fn test_order_is_total_and_consistent_with_equality() {
        let names = ["Bolt", "bolt", "Shock"];
        let sets = ["LEA", "M10"];
        let numbers = ["1", "10", "2"];

        let mut all = Vec::new();
        for n in names {
            for s in sets {
                for num in numbers {
                    all.push(printing(n, s, num));
                }
            }
        }

        for x in &all {
            for y in &all {
                assert_eq!(x.cmp(y) == Ordering::Equal, x == y);
                assert_eq!(x.cmp(y), y.cmp(x).reverse());
                for z in &all {
                    if x < y && y < z {
                        assert!(x < z, "{} < {} < {} but not transitive", x, y, z);
                    }
                }
            }
        }

        let distinct: BTreeSet<_> = all.iter().cloned().collect();
        assert_eq!(distinct.len(), all.len());
    }

    #[test]
    fn test_info_identity_ignores_metadata() {
        let p = printing("Bolt", "LEA", "161");
        let original =
            CardPrintingInfo::new(p.clone(), ["Christopher Rush"], "", Rarity::Common).unwrap();
        let corrected = CardPrintingInfo::new(
            p.clone(),
            ["Christopher Rush", "Someone Else"],
            "The spark ignites.",
            Rarity::Uncommon,
        )
        .unwrap();

        assert_eq!(original, corrected);
        assert_eq!(original.cmp(&corrected), Ordering::Equal);

        let mut set = HashSet::new();
        set.insert(original);
        assert!(!set.insert(corrected));
        assert!(set.contains(&p));
    }

    #[test]
    fn test_info_requires_artists_and_keeps_order() {
        let p = printing("Bolt", "LEA", "161");
        assert!(CardPrintingInfo::new(p.clone(), Vec::<String>::new(), "", Rarity::Common).is_err());
        assert!(CardPrintingInfo::new(p.clone(), [""], "", Rarity::Common).is_err());

        let info =
            CardPrintingInfo::new(p, ["Zed", "Amy", "Zed"], "", Rarity::Rare).unwrap();
        assert_eq!(info.artists(), &["Zed".to_string(), "Amy".to_string()]);
        assert_eq!(info.rarity(), Rarity::Rare);
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: CardPrinting =
            serde_json::from_str(r#"{"card_name":"Bolt","expansion":"LEA","identifying_number":"161"}"#)
                .unwrap();
        assert_eq!(ok.expansion(), "LEA");

        assert!(serde_json::from_str::<CardPrinting>(
            r#"{"card_name":"","expansion":"LEA","identifying_number":"161"}"#
        )
        .is_err());

        let info: CardPrintingInfo = serde_json::from_str(
            r#"{"printing":{"card_name":"Bolt","expansion":"LEA","identifying_number":"161"},
                "artists":["Christopher Rush"],"rarity":"Common"}"#,
        )
        .unwrap();
        assert_eq!(info.rarity(), Rarity::Common);
        assert_eq!(info.flavor_text(), "");
    }
}
