//! Category keys and their typed sub-filters.
//!
//! A browse request arrives as two strings: the category key from the URL
//! path and the sub-filter value chosen in the menu. Both are parsed here
//! into a [`CategorySelection`], so the resolver only ever sees well-formed
//! filters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::{CatalogError, CatalogResult};

/// The fixed set of browse categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKey {
    Number,
    Letter,
    Generation,
    Type,
    Statistics,
}

impl CategoryKey {
    pub const ALL: [CategoryKey; 5] = [
        Self::Number,
        Self::Letter,
        Self::Generation,
        Self::Type,
        Self::Statistics,
    ];

    /// URL path segment for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Letter => "letter",
            Self::Generation => "generation",
            Self::Type => "type",
            Self::Statistics => "statistics",
        }
    }

    /// Human-readable heading.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Number => "By Number",
            Self::Letter => "By Initial Letter",
            Self::Generation => "By Generation",
            Self::Type => "By Type",
            Self::Statistics => "By Statistics",
        }
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryKey {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "number" => Ok(Self::Number),
            "letter" => Ok(Self::Letter),
            "generation" => Ok(Self::Generation),
            "type" => Ok(Self::Type),
            "statistics" => Ok(Self::Statistics),
            other => Err(CatalogError::invalid_category(other)),
        }
    }
}

/// Widest id range a single number selection may span. Matches the
/// default bulk index size.
pub const MAX_RANGE_WIDTH: u32 = 10_250;

/// Inclusive range of entry ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdRange {
    pub start: u32,
    pub end: u32,
}

impl IdRange {
    pub fn ids(&self) -> impl Iterator<Item = u32> {
        self.start..=self.end
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        (self.end - self.start) as usize + 1
    }
}

/// Inclusive range of initial letters, stored upper-cased.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LetterRange {
    pub start: char,
    pub end: char,
}

impl LetterRange {
    /// Whether `name` starts with a character inside the range,
    /// compared case-insensitively.
    pub fn matches(&self, name: &str) -> bool {
        name.chars()
            .next()
            .and_then(|c| c.to_uppercase().next())
            .is_some_and(|c| c >= self.start && c <= self.end)
    }
}

/// A generation number as shown to the user (1-9).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationLabel(pub u8);

/// A lower-cased elemental type name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeName(pub String);

/// Which statistic to rank by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatisticKey {
    /// A single named statistic, lower-cased (e.g. `attack`).
    Named(String),
    /// Sum of all base statistics.
    Total,
}

impl StatisticKey {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::Total => "total",
        }
    }
}

/// A parsed (category, sub-filter) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategorySelection {
    Number(IdRange),
    Letter(LetterRange),
    Generation(GenerationLabel),
    Type(TypeName),
    Statistics(StatisticKey),
}

impl CategorySelection {
    /// Parse raw URL strings into a selection.
    pub fn parse(category: &str, filter: &str) -> CatalogResult<Self> {
        let key: CategoryKey = category.parse()?;
        Self::for_key(key, filter)
    }

    /// Parse a sub-filter value for an already known category.
    pub fn for_key(key: CategoryKey, filter: &str) -> CatalogResult<Self> {
        let filter = filter.trim();
        let invalid = |reason: &str| CatalogError::invalid_filter(key.as_str(), filter, reason);

        match key {
            CategoryKey::Number => {
                let (start, end) =
                    split_range(filter).ok_or_else(|| invalid("expected <start>-<end>"))?;
                let start: u32 = start
                    .parse()
                    .map_err(|_| invalid("start is not a number"))?;
                let end: u32 = end.parse().map_err(|_| invalid("end is not a number"))?;
                if start == 0 {
                    return Err(invalid("ids start at 1"));
                }
                if start > end {
                    return Err(invalid("start is after end"));
                }
                if end - start >= MAX_RANGE_WIDTH {
                    return Err(invalid(&format!(
                        "range spans more than {} ids",
                        MAX_RANGE_WIDTH
                    )));
                }
                Ok(Self::Number(IdRange { start, end }))
            }
            CategoryKey::Letter => {
                let (start, end) =
                    split_range(filter).ok_or_else(|| invalid("expected <letter>-<letter>"))?;
                let start =
                    single_char(start).ok_or_else(|| invalid("start must be one letter"))?;
                let end = single_char(end).ok_or_else(|| invalid("end must be one letter"))?;
                if start > end {
                    return Err(invalid("start is after end"));
                }
                Ok(Self::Letter(LetterRange { start, end }))
            }
            CategoryKey::Generation => {
                let label: u8 = filter
                    .parse()
                    .map_err(|_| invalid("expected a generation number"))?;
                if !(1..=9).contains(&label) {
                    return Err(invalid("generation must be between 1 and 9"));
                }
                Ok(Self::Generation(GenerationLabel(label)))
            }
            CategoryKey::Type => {
                if filter.is_empty() {
                    return Err(invalid("type name is empty"));
                }
                let name = filter.to_lowercase();
                if !is_resource_name(&name) {
                    return Err(invalid("type name may only use letters, digits and '-'"));
                }
                Ok(Self::Type(TypeName(name)))
            }
            CategoryKey::Statistics => {
                if filter.is_empty() {
                    return Err(invalid("statistic name is empty"));
                }
                let stat = filter.to_lowercase();
                if !is_resource_name(&stat) {
                    return Err(invalid("statistic name may only use letters, digits and '-'"));
                }
                Ok(Self::Statistics(if stat == "total" {
                    StatisticKey::Total
                } else {
                    StatisticKey::Named(stat)
                }))
            }
        }
    }

    pub fn key(&self) -> CategoryKey {
        match self {
            Self::Number(_) => CategoryKey::Number,
            Self::Letter(_) => CategoryKey::Letter,
            Self::Generation(_) => CategoryKey::Generation,
            Self::Type(_) => CategoryKey::Type,
            Self::Statistics(_) => CategoryKey::Statistics,
        }
    }
}

fn split_range(value: &str) -> Option<(&str, &str)> {
    let (start, end) = value.split_once('-')?;
    Some((start.trim(), end.trim()))
}

/// Upstream resource names are a single lower-case path segment.
fn is_resource_name(value: &str) -> bool {
    !value.is_empty()
        && value
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

fn single_char(value: &str) -> Option<char> {
    let mut chars = value.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    c.to_uppercase().next()
}

/// Maps user-facing generation labels to upstream generation ids.
///
/// Upstream currently numbers generations 1 through 9, but the ids are
/// owned by the source and are not guaranteed to stay sequential.
#[derive(Debug, Clone)]
pub struct GenerationMap {
    ids: Vec<(u8, u32)>,
}

impl Default for GenerationMap {
    fn default() -> Self {
        Self::new((1..=9).map(|label| (label, label as u32)))
    }
}

impl GenerationMap {
    /// Build a mapping from (label, upstream id) pairs.
    pub fn new(pairs: impl IntoIterator<Item = (u8, u32)>) -> Self {
        Self {
            ids: pairs.into_iter().collect(),
        }
    }

    pub fn upstream_id(&self, label: GenerationLabel) -> Option<u32> {
        self.ids
            .iter()
            .find(|(l, _)| *l == label.0)
            .map(|(_, id)| *id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_key_roundtrip() {
        for key in CategoryKey::ALL {
            assert_eq!(key.as_str().parse::<CategoryKey>(), Ok(key));
        }
    }

    #[test]
    fn test_unknown_category() {
        let err = CategorySelection::parse("bogus", "x").unwrap_err();
        assert_eq!(err, CatalogError::InvalidCategory("bogus".to_string()));
    }

    #[test]
    fn test_number_range_with_leading_zeros() {
        let sel = CategorySelection::parse("number", "001-151").unwrap();
        assert_eq!(sel, CategorySelection::Number(IdRange { start: 1, end: 151 }));
    }

    #[test]
    fn test_number_range_rejects_reversed_and_garbage() {
        assert!(matches!(
            CategorySelection::parse("number", "10-2"),
            Err(CatalogError::InvalidFilter { .. })
        ));
        assert!(matches!(
            CategorySelection::parse("number", "abc"),
            Err(CatalogError::InvalidFilter { .. })
        ));
        assert!(matches!(
            CategorySelection::parse("number", "0-3"),
            Err(CatalogError::InvalidFilter { .. })
        ));
    }

    #[test]
    fn test_letter_range_is_upper_cased() {
        let sel = CategorySelection::parse("letter", "a-g").unwrap();
        assert_eq!(
            sel,
            CategorySelection::Letter(LetterRange { start: 'A', end: 'G' })
        );
        assert!(CategorySelection::parse("letter", "AB-C").is_err());
    }

    #[test]
    fn test_letter_range_matches_case_insensitively() {
        let range = LetterRange { start: 'H', end: 'R' };
        assert!(range.matches("ivysaur"));
        assert!(range.matches("Raichu"));
        assert!(!range.matches("squirtle"));
        assert!(!range.matches("abra"));
        assert!(!range.matches(""));
    }

    #[test]
    fn test_generation_bounds() {
        assert_eq!(
            CategorySelection::parse("generation", "3"),
            Ok(CategorySelection::Generation(GenerationLabel(3)))
        );
        assert!(CategorySelection::parse("generation", "0").is_err());
        assert!(CategorySelection::parse("generation", "10").is_err());
    }

    #[test]
    fn test_type_and_stat_are_lower_cased() {
        assert_eq!(
            CategorySelection::parse("type", "Fire"),
            Ok(CategorySelection::Type(TypeName("fire".to_string())))
        );
        assert_eq!(
            CategorySelection::parse("statistics", "ATTACK"),
            Ok(CategorySelection::Statistics(StatisticKey::Named(
                "attack".to_string()
            )))
        );
        assert_eq!(
            CategorySelection::parse("statistics", "Total"),
            Ok(CategorySelection::Statistics(StatisticKey::Total))
        );
    }

    #[test]
    fn test_number_range_width_is_bounded() {
        assert!(CategorySelection::parse("number", "1-10250").is_ok());
        assert!(matches!(
            CategorySelection::parse("number", "1-10251"),
            Err(CatalogError::InvalidFilter { .. })
        ));
        assert!(matches!(
            CategorySelection::parse("number", "1-4000000000"),
            Err(CatalogError::InvalidFilter { .. })
        ));
    }

    #[test]
    fn test_names_must_be_single_path_segments() {
        for bad in ["../pokemon/1", "fire/..", "fire?x=1", "fire water", "%2e%2e"] {
            assert!(
                matches!(
                    CategorySelection::parse("type", bad),
                    Err(CatalogError::InvalidFilter { .. })
                ),
                "type {:?} was accepted",
                bad
            );
            assert!(
                matches!(
                    CategorySelection::parse("statistics", bad),
                    Err(CatalogError::InvalidFilter { .. })
                ),
                "statistic {:?} was accepted",
                bad
            );
        }
        assert!(CategorySelection::parse("statistics", "special-attack").is_ok());
    }

    #[test]
    fn test_generation_map_identity() {
        let map = GenerationMap::default();
        for label in 1..=9u8 {
            assert_eq!(map.upstream_id(GenerationLabel(label)), Some(label as u32));
        }
        assert_eq!(map.upstream_id(GenerationLabel(12)), None);
    }

    #[test]
    fn test_id_range_len() {
        let range = IdRange { start: 4, end: 6 };
        assert_eq!(range.len(), 3);
        assert_eq!(range.ids().collect::<Vec<_>>(), vec![4, 5, 6]);
    }
}
