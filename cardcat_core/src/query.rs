//! Card query builder.
//!
//! A [`CardQuery`] accumulates polarity-tagged clauses and compiles them into
//! a single predicate for the catalog store:
//!
//! - clauses are rendered in insertion order, joined with ` AND `
//! - an excluded clause renders as `NOT (<predicate>)`
//! - string literals are single-quoted with embedded quotes doubled
//! - a builder with no clauses compiles to [`MATCH_ALL`]
//!
//! The builder never deduplicates and never looks for contradictions; two
//! opposing clauses on the same attribute are both rendered.

use crate::catalog::{default_vocabulary, CatalogVocabulary};
use crate::vocabulary::{CardType, Color, Comparison, Rarity, Stat, Supertype, Vocabulary};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Query text that selects every card.
pub const MATCH_ALL: &str = "1 = 1";

const CONJUNCTION: &str = " AND ";

/// Whether a clause keeps or removes the cards it matches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Polarity {
    Include,
    Exclude,
}

impl From<bool> for Polarity {
    fn from(include: bool) -> Self {
        if include {
            Polarity::Include
        } else {
            Polarity::Exclude
        }
    }
}

/// How name clauses match the card name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameMatch {
    #[default]
    Contains,
    Prefix,
    Exact,
}

/// One filter predicate, before polarity is applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Filter {
    Name(String),
    Text(String),
    Color(Color),
    ColorIdentity(Color),
    Supertype(Supertype),
    Type(CardType),
    Subtype(String),
    Rarity(Rarity),
    Block(String),
    Set(String),
    Artist(String),
    Stat {
        stat: Stat,
        comparison: Comparison,
        quantity: i64,
    },
    ManaType {
        symbol: String,
        quantity: u32,
    },
}

/// A filter with its polarity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Clause {
    pub polarity: Polarity,
    pub filter: Filter,
}

impl Clause {
    fn render(&self, name_match: NameMatch) -> String {
        let predicate = self.filter.render(name_match);
        match self.polarity {
            Polarity::Include => predicate,
            Polarity::Exclude => format!("NOT ({})", predicate),
        }
    }
}

fn literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// `LIKE` pattern with `\`, `%` and `_` escaped.
fn like(column: &str, prefix: &str, value: &str, suffix: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    format!(
        "{} LIKE {} ESCAPE '\\'",
        column,
        literal(&format!("{}{}{}", prefix, escaped, suffix))
    )
}

fn card_in(table: &str, condition: String) -> String {
    format!("name IN (SELECT card_name FROM {} WHERE {})", table, condition)
}

fn equals(column: &str, value: &str) -> String {
    format!("{} = {}", column, literal(value))
}

impl Filter {
    fn render(&self, name_match: NameMatch) -> String {
        match self {
            Filter::Name(value) => match name_match {
                NameMatch::Contains => like("name", "%", value, "%"),
                NameMatch::Prefix => like("name", "", value, "%"),
                NameMatch::Exact => equals("name", value),
            },
            Filter::Text(value) => like("text", "%", value, "%"),
            Filter::Color(color) => card_in("card_colors", equals("color", color.label())),
            Filter::ColorIdentity(color) => {
                card_in("card_color_identity", equals("color", color.label()))
            }
            Filter::Supertype(supertype) => {
                card_in("card_supertypes", equals("supertype", supertype.label()))
            }
            Filter::Type(card_type) => card_in("card_types", equals("type", card_type.label())),
            Filter::Subtype(subtype) => card_in("card_subtypes", equals("subtype", subtype)),
            Filter::Rarity(rarity) => card_in("printings", equals("rarity", rarity.label())),
            Filter::Set(set) => card_in("printings", equals("expansion", set)),
            Filter::Block(block) => card_in(
                "printings",
                format!(
                    "expansion IN (SELECT code FROM sets WHERE {})",
                    equals("block", block)
                ),
            ),
            Filter::Artist(artist) => card_in("printing_artists", equals("artist", artist)),
            Filter::Stat {
                stat,
                comparison,
                quantity,
            } => format!("{} {} {}", stat.label(), comparison.label(), quantity),
            Filter::ManaType { symbol, quantity: 0 } => format!(
                "name NOT IN (SELECT card_name FROM mana_costs WHERE {})",
                equals("symbol", symbol)
            ),
            Filter::ManaType { symbol, quantity } => card_in(
                "mana_costs",
                format!("{} AND quantity = {}", equals("symbol", symbol), quantity),
            ),
        }
    }
}

/// Mutable, single-owner accumulator of card filter clauses.
///
/// Every `by_*` operation validates its value first; a rejected value leaves
/// the clauses gathered so far untouched.
#[derive(Clone, Debug)]
pub struct CardQuery<'v> {
    vocabulary: &'v CatalogVocabulary,
    name_match: NameMatch,
    clauses: Vec<Clause>,
}

impl Default for CardQuery<'static> {
    fn default() -> Self {
        Self::new()
    }
}

fn unsupported(attribute: &'static str, value: &str) -> Error {
    Error::UnsupportedValue {
        attribute,
        value: value.to_string(),
    }
}

fn closed<V: Vocabulary>(attribute: &'static str, value: &str) -> Result<V> {
    V::matches(Some(value)).map_err(|_| unsupported(attribute, value))
}

fn required<'a>(attribute: &'static str, value: &'a str) -> Result<&'a str> {
    if value.trim().is_empty() {
        return Err(Error::MissingArgument(attribute));
    }
    Ok(value)
}

impl CardQuery<'static> {
    /// A builder validating against the built-in catalog vocabulary.
    pub fn new() -> Self {
        CardQuery::with_vocabulary(default_vocabulary())
    }
}

impl<'v> CardQuery<'v> {
    pub fn with_vocabulary(vocabulary: &'v CatalogVocabulary) -> Self {
        Self {
            vocabulary,
            name_match: NameMatch::default(),
            clauses: Vec::new(),
        }
    }

    pub fn with_name_match(mut self, name_match: NameMatch) -> Self {
        self.name_match = name_match;
        self
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    fn push(&mut self, filter: Filter, include: bool) -> &mut Self {
        self.clauses.push(Clause {
            polarity: include.into(),
            filter,
        });
        self
    }

    /// Card name contains `value` (or starts with / equals it, depending on
    /// the name match mode).
    pub fn by_name(&mut self, value: &str, include: bool) -> Result<&mut Self> {
        let value = required("name", value)?;
        Ok(self.push(Filter::Name(value.to_string()), include))
    }

    /// Rules text contains `value`.
    pub fn by_text(&mut self, value: &str, include: bool) -> Result<&mut Self> {
        let value = required("text", value)?;
        Ok(self.push(Filter::Text(value.to_string()), include))
    }

    pub fn by_color(&mut self, value: &str, include: bool) -> Result<&mut Self> {
        let color = closed::<Color>("color", value)?;
        Ok(self.push(Filter::Color(color), include))
    }

    pub fn by_color_identity(&mut self, value: &str, include: bool) -> Result<&mut Self> {
        let color = closed::<Color>("color identity", value)?;
        Ok(self.push(Filter::ColorIdentity(color), include))
    }

    pub fn by_supertype(&mut self, value: &str, include: bool) -> Result<&mut Self> {
        let supertype = closed::<Supertype>("supertype", value)?;
        Ok(self.push(Filter::Supertype(supertype), include))
    }

    pub fn by_type(&mut self, value: &str, include: bool) -> Result<&mut Self> {
        let card_type = closed::<CardType>("type", value)?;
        Ok(self.push(Filter::Type(card_type), include))
    }

    pub fn by_subtype(&mut self, value: &str, include: bool) -> Result<&mut Self> {
        let subtype = self
            .vocabulary
            .subtype(value)
            .ok_or_else(|| unsupported("subtype", value))?
            .to_string();
        Ok(self.push(Filter::Subtype(subtype), include))
    }

    pub fn by_rarity(&mut self, value: &str, include: bool) -> Result<&mut Self> {
        let rarity = closed::<Rarity>("rarity", value)?;
        Ok(self.push(Filter::Rarity(rarity), include))
    }

    pub fn by_block(&mut self, value: &str, include: bool) -> Result<&mut Self> {
        let block = self
            .vocabulary
            .block(value)
            .ok_or_else(|| unsupported("block", value))?
            .to_string();
        Ok(self.push(Filter::Block(block), include))
    }

    pub fn by_set(&mut self, value: &str, include: bool) -> Result<&mut Self> {
        let set = self
            .vocabulary
            .set(value)
            .ok_or_else(|| unsupported("set", value))?
            .to_string();
        Ok(self.push(Filter::Set(set), include))
    }

    pub fn by_artist(&mut self, value: &str, include: bool) -> Result<&mut Self> {
        let artist = self
            .vocabulary
            .artist(value)
            .ok_or_else(|| unsupported("artist", value))?
            .to_string();
        Ok(self.push(Filter::Artist(artist), include))
    }

    /// Numeric comparison on a card statistic. Always an include clause.
    pub fn by_stat(&mut self, stat: Stat, comparison: Comparison, quantity: i64) -> &mut Self {
        self.push(
            Filter::Stat {
                stat,
                comparison,
                quantity,
            },
            true,
        )
    }

    /// Cards whose cost holds exactly `quantity` of mana symbol `symbol`.
    pub fn by_mana_type(&mut self, symbol: &str, quantity: u32) -> Result<&mut Self> {
        let symbol = self
            .vocabulary
            .mana_symbol(symbol)
            .ok_or_else(|| unsupported("mana symbol", symbol))?
            .to_string();
        Ok(self.push(Filter::ManaType { symbol, quantity }, true))
    }

    /// Apply one textual filter expression (see [`parse_filter`]).
    pub fn apply(&mut self, expr: &str) -> Result<&mut Self> {
        match parse_filter(expr)? {
            FilterExpr::Stat {
                stat,
                comparison,
                quantity,
            } => Ok(self.by_stat(stat, comparison, quantity)),
            FilterExpr::Mana { symbol, quantity } => self.by_mana_type(&symbol, quantity),
            FilterExpr::Attribute {
                attribute,
                value,
                include,
            } => match attribute {
                Attribute::Name => self.by_name(&value, include),
                Attribute::Text => self.by_text(&value, include),
                Attribute::Color => self.by_color(&value, include),
                Attribute::ColorIdentity => self.by_color_identity(&value, include),
                Attribute::Supertype => self.by_supertype(&value, include),
                Attribute::Type => self.by_type(&value, include),
                Attribute::Subtype => self.by_subtype(&value, include),
                Attribute::Rarity => self.by_rarity(&value, include),
                Attribute::Block => self.by_block(&value, include),
                Attribute::Set => self.by_set(&value, include),
                Attribute::Artist => self.by_artist(&value, include),
            },
        }
    }

    /// Compile the accumulated clauses into query text.
    ///
    /// Pure: calling it repeatedly without intervening changes yields the
    /// same text.
    pub fn as_query(&self) -> String {
        if self.clauses.is_empty() {
            tracing::trace!("compiled empty card query");
            return MATCH_ALL.to_string();
        }

        let text = self
            .clauses
            .iter()
            .map(|clause| clause.render(self.name_match))
            .collect::<Vec<_>>()
            .join(CONJUNCTION);

        tracing::debug!(clauses = self.clauses.len(), "compiled card query");
        text
    }
}

impl fmt::Display for CardQuery<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_query())
    }
}

// ============================================================================
// Textual filter expressions
// ============================================================================

/// Attributes addressable as `attribute:value`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attribute {
    Name,
    Text,
    Color,
    ColorIdentity,
    Supertype,
    Type,
    Subtype,
    Rarity,
    Block,
    Set,
    Artist,
}

impl Attribute {
    fn parse(key: &str) -> Option<Self> {
        let attribute = match key.to_ascii_lowercase().as_str() {
            "name" => Attribute::Name,
            "text" => Attribute::Text,
            "color" => Attribute::Color,
            "identity" => Attribute::ColorIdentity,
            "supertype" => Attribute::Supertype,
            "type" => Attribute::Type,
            "subtype" => Attribute::Subtype,
            "rarity" => Attribute::Rarity,
            "block" => Attribute::Block,
            "set" => Attribute::Set,
            "artist" => Attribute::Artist,
            _ => return None,
        };
        Some(attribute)
    }
}

/// A parsed filter expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterExpr {
    Attribute {
        attribute: Attribute,
        value: String,
        include: bool,
    },
    Stat {
        stat: Stat,
        comparison: Comparison,
        quantity: i64,
    },
    Mana {
        symbol: String,
        quantity: u32,
    },
}

/// Parse a compact filter expression.
///
/// Accepted forms:
/// - `attribute:value`, or `-attribute:value` to exclude
/// - `<stat><op><n>`, e.g. `power>=3` or `cmc!=2`
/// - `mana:<symbol>=<n>`, e.g. `mana:R=2`
pub fn parse_filter(expr: &str) -> Result<FilterExpr> {
    let expr = expr.trim();
    if expr.is_empty() {
        return Err(Error::InvalidFilter("empty filter expression".into()));
    }

    if let Some(parsed) = parse_stat(expr)? {
        return Ok(parsed);
    }

    let (include, body) = match expr.strip_prefix('-') {
        Some(rest) => (false, rest),
        None => (true, expr),
    };

    let (key, value) = body
        .split_once(':')
        .ok_or_else(|| Error::InvalidFilter(format!("expected attribute:value in '{}'", expr)))?;

    if key.eq_ignore_ascii_case("mana") {
        if !include {
            return Err(Error::InvalidFilter(format!(
                "mana filters cannot be excluded: '{}'",
                expr
            )));
        }
        let (symbol, quantity) = value
            .split_once('=')
            .ok_or_else(|| Error::InvalidFilter(format!("expected mana:SYMBOL=N in '{}'", expr)))?;
        let quantity = quantity.trim().parse::<u32>().map_err(|e| {
            Error::InvalidFilter(format!("bad mana quantity in '{}': {}", expr, e))
        })?;
        return Ok(FilterExpr::Mana {
            symbol: symbol.trim().to_string(),
            quantity,
        });
    }

    let attribute = Attribute::parse(key.trim())
        .ok_or_else(|| Error::InvalidFilter(format!("unknown attribute '{}'", key)))?;

    Ok(FilterExpr::Attribute {
        attribute,
        value: value.trim().to_string(),
        include,
    })
}

/// `Some` when `expr` starts with a stat label followed by an operator.
fn parse_stat(expr: &str) -> Result<Option<FilterExpr>> {
    let Some(stat) = Stat::all()
        .iter()
        .copied()
        .find(|s| starts_with_ignore_case(expr, s.label()))
    else {
        return Ok(None);
    };

    let rest = expr[stat.label().len()..].trim_start();
    // Two-character operators first so `<=` is not read as `<`.
    let mut operators: Vec<Comparison> = Comparison::all().to_vec();
    operators.sort_by_key(|c| std::cmp::Reverse(c.label().len()));

    let Some(comparison) = operators.into_iter().find(|c| rest.starts_with(c.label())) else {
        return Ok(None);
    };

    let number = rest[comparison.label().len()..].trim();
    let quantity = number.parse::<i64>().map_err(|e| {
        Error::InvalidFilter(format!("bad {} quantity '{}': {}", stat, number, e))
    })?;

    Ok(Some(FilterExpr::Stat {
        stat,
        comparison,
        quantity,
    }))
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.len() >= prefix.len()
        && text.is_char_boundary(prefix.len())
        && text[..prefix.len()].eq_ignore_ascii_case(prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_default_vocabulary;

    #[test]
    fn test_empty_query_matches_everything() {
        let query = CardQuery::new();
        assert!(query.is_empty());
        assert_eq!(query.as_query(), MATCH_ALL);
    }

    #[test]
    fn test_color_then_type_renders_in_order() {
        crate::logging::init_test();

        let mut query = CardQuery::new();
        query.by_color("red", true).unwrap().by_type("creature", true).unwrap();

        let text = query.as_query();
        assert_eq!(
            text,
            "name IN (SELECT card_name FROM card_colors WHERE color = 'red') AND \
             name IN (SELECT card_name FROM card_types WHERE type = 'creature')"
        );
        let color_at = text.find("color = 'red'").unwrap();
        let type_at = text.find("type = 'creature'").unwrap();
        assert!(color_at < type_at);
    }

    #[test]
    fn test_as_query_is_idempotent() {
        let mut query = CardQuery::new();
        query
            .by_name("bolt", true)
            .unwrap()
            .by_stat(Stat::Cmc, Comparison::Le, 2);

        let first = query.as_query();
        let second = query.as_query();
        assert_eq!(first, second);
        assert_eq!(query.len(), 2);
    }

    #[test]
    fn test_exclude_wraps_in_not() {
        let mut query = CardQuery::new();
        query.by_type("land", false).unwrap();
        assert_eq!(
            query.as_query(),
            "NOT (name IN (SELECT card_name FROM card_types WHERE type = 'land'))"
        );
        assert_eq!(query.clauses()[0].polarity, Polarity::Exclude);
    }

    #[test]
    fn test_text_clause_rendering() {
        let mut query = CardQuery::new();
        query.by_text("flying", true).unwrap();
        assert_eq!(query.as_query(), "text LIKE '%flying%' ESCAPE '\\'");

        let mut query = CardQuery::new();
        query.by_text("flying", false).unwrap();
        assert_eq!(query.as_query(), "NOT (text LIKE '%flying%' ESCAPE '\\')");
    }

    #[test]
    fn test_color_identity_clause_rendering() {
        let mut query = CardQuery::new();
        query.by_color_identity("Green", true).unwrap();
        assert_eq!(
            query.as_query(),
            "name IN (SELECT card_name FROM card_color_identity WHERE color = 'green')"
        );

        let mut query = CardQuery::new();
        query.by_color_identity("green", false).unwrap();
        assert_eq!(
            query.as_query(),
            "NOT (name IN (SELECT card_name FROM card_color_identity WHERE color = 'green'))"
        );
    }

    #[test]
    fn test_subtype_clause_rendering() {
        let mut query = CardQuery::new();
        query.by_subtype("goblin", true).unwrap();
        assert_eq!(
            query.as_query(),
            "name IN (SELECT card_name FROM card_subtypes WHERE subtype = 'Goblin')"
        );

        let mut query = CardQuery::new();
        query.by_subtype("Goblin", false).unwrap();
        assert_eq!(
            query.as_query(),
            "NOT (name IN (SELECT card_name FROM card_subtypes WHERE subtype = 'Goblin'))"
        );
    }

    #[test]
    fn test_opposing_clauses_both_render() {
        let mut query = CardQuery::new();
        query.by_color("blue", true).unwrap();
        query.by_color("blue", false).unwrap();
        query.by_color("blue", true).unwrap();

        assert_eq!(query.len(), 3);
        let text = query.as_query();
        assert_eq!(text.matches("color = 'blue'").count(), 3);
        assert_eq!(text.matches("NOT (").count(), 1);
    }

    #[test]
    fn test_rejected_value_leaves_state_untouched() {
        let mut query = CardQuery::new();
        query.by_rarity("rare", true).unwrap();
        let before = query.as_query();

        let err = query.by_color("purple", true).unwrap_err();
        assert!(matches!(err, Error::UnsupportedValue { attribute: "color", .. }));
        assert!(query.by_type("spell", true).is_err());
        assert!(query.by_set("NOPE", true).is_err());
        assert!(query.by_block("Nowhere", true).is_err());
        assert!(query.by_artist("Nobody", false).is_err());
        assert!(query.by_mana_type("Q", 1).is_err());
        assert!(matches!(
            query.by_name("  ", true),
            Err(Error::MissingArgument("name"))
        ));

        assert_eq!(query.len(), 1);
        assert_eq!(query.as_query(), before);
    }

    #[test]
    fn test_vocabulary_values_render_canonically() {
        let mut query = CardQuery::new();
        query
            .by_set("zen", true)
            .unwrap()
            .by_artist("kev walker", true)
            .unwrap()
            .by_rarity("Mythic Rare", true)
            .unwrap();

        let text = query.as_query();
        assert!(text.contains("expansion = 'ZEN'"));
        assert!(text.contains("artist = 'Kev Walker'"));
        assert!(text.contains("rarity = 'mythic rare'"));
    }

    #[test]
    fn test_block_uses_set_lookup() {
        let mut query = CardQuery::new();
        query.by_block("Zendikar", true).unwrap();
        assert_eq!(
            query.as_query(),
            "name IN (SELECT card_name FROM printings WHERE expansion IN \
             (SELECT code FROM sets WHERE block = 'Zendikar'))"
        );
    }

    #[test]
    fn test_literals_are_escaped() {
        let mut vocab = build_default_vocabulary();
        vocab.artists.insert("Brian O'Neill".into());

        let mut query = CardQuery::with_vocabulary(&vocab);
        query
            .by_name("Urza's 100%_", true)
            .unwrap()
            .by_artist("brian o'neill", true)
            .unwrap();

        let text = query.as_query();
        assert!(text.starts_with("name LIKE '%Urza''s 100\\%\\_%' ESCAPE '\\'"));
        assert!(text.ends_with("artist = 'Brian O''Neill')"));
    }

    #[test]
    fn test_name_match_modes() {
        let mut prefix = CardQuery::new().with_name_match(NameMatch::Prefix);
        prefix.by_name("Light", true).unwrap();
        assert_eq!(prefix.as_query(), "name LIKE 'Light%' ESCAPE '\\'");

        let mut exact = CardQuery::new().with_name_match(NameMatch::Exact);
        exact.by_name("Lightning Bolt", true).unwrap();
        assert_eq!(exact.as_query(), "name = 'Lightning Bolt'");
    }

    #[test]
    fn test_stat_and_mana_rendering() {
        let mut query = CardQuery::new();
        query
            .by_stat(Stat::Power, Comparison::Ge, 3)
            .by_stat(Stat::Loyalty, Comparison::Ne, -1)
            .by_mana_type("r", 2)
            .unwrap()
            .by_mana_type("U", 0)
            .unwrap();

        let parts: Vec<_> = query.as_query().split(CONJUNCTION).map(String::from).collect();
        assert_eq!(parts[0], "power >= 3");
        assert_eq!(parts[1], "loyalty != -1");
        assert_eq!(
            parts[2],
            "name IN (SELECT card_name FROM mana_costs WHERE symbol = 'R' AND quantity = 2)"
        );
        assert_eq!(
            parts[3],
            "name NOT IN (SELECT card_name FROM mana_costs WHERE symbol = 'U')"
        );
    }

    #[test]
    fn test_custom_vocabulary_is_used() {
        let mut vocab = CatalogVocabulary::default();
        vocab.sets.insert("ABC".into());

        let mut query = CardQuery::with_vocabulary(&vocab);
        assert!(query.by_set("abc", true).is_ok());
        assert!(query.by_set("ZEN", true).is_err());
        assert!(query.by_subtype("Goblin", true).is_err());
    }

    #[test]
    fn test_display_matches_as_query() {
        let mut query = CardQuery::default();
        query.by_supertype("legendary", true).unwrap();
        assert_eq!(query.to_string(), query.as_query());
    }

    #[test]
    fn test_parse_filter_forms() {
        assert_eq!(
            parse_filter("color:red").unwrap(),
            FilterExpr::Attribute {
                attribute: Attribute::Color,
                value: "red".into(),
                include: true
            }
        );
        assert_eq!(
            parse_filter("-type:land").unwrap(),
            FilterExpr::Attribute {
                attribute: Attribute::Type,
                value: "land".into(),
                include: false
            }
        );
        assert_eq!(
            parse_filter("power>=3").unwrap(),
            FilterExpr::Stat {
                stat: Stat::Power,
                comparison: Comparison::Ge,
                quantity: 3
            }
        );
        assert_eq!(
            parse_filter("CMC < 2").unwrap(),
            FilterExpr::Stat {
                stat: Stat::Cmc,
                comparison: Comparison::Lt,
                quantity: 2
            }
        );
        assert_eq!(
            parse_filter("mana:R=2").unwrap(),
            FilterExpr::Mana {
                symbol: "R".into(),
                quantity: 2
            }
        );
        assert_eq!(
            parse_filter("name:Lightning Bolt").unwrap(),
            FilterExpr::Attribute {
                attribute: Attribute::Name,
                value: "Lightning Bolt".into(),
                include: true
            }
        );
    }

    #[test]
    fn test_parse_filter_errors() {
        for bad in ["", "color", "flavor:x", "power>=many", "-mana:R=1", "mana:R", "mana:R=-1"] {
            assert!(
                matches!(parse_filter(bad), Err(Error::InvalidFilter(_))),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_apply_routes_to_builder() {
        let mut query = CardQuery::new();
        for expr in ["color:red", "-type:land", "cmc<=2", "mana:R=1", "set:m10"] {
            query.apply(expr).unwrap();
        }
        assert_eq!(query.len(), 5);
        assert!(query.as_query().contains("expansion = 'M10'"));
        assert!(query.apply("color:purple").is_err());
        assert_eq!(query.len(), 5);
    }
}
