//! Sub-filter menus offered on each category screen.

use crate::domains::catalog::CategoryKey;

/// One `<option>` in a sub-filter menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOption {
    pub value: &'static str,
    pub label: &'static str,
}

const fn opt(value: &'static str, label: &'static str) -> FilterOption {
    FilterOption { value, label }
}

// National dex ranges, one per generation.
const NUMBER_OPTIONS: &[FilterOption] = &[
    opt("001-151", "001-151"),
    opt("152-251", "152-251"),
    opt("252-386", "252-386"),
    opt("387-493", "387-493"),
    opt("494-649", "494-649"),
    opt("650-721", "650-721"),
    opt("722-809", "722-809"),
    opt("810-905", "810-905"),
    opt("906-1025", "906-1025"),
];

const LETTER_OPTIONS: &[FilterOption] = &[
    opt("A-G", "A-G"),
    opt("H-R", "H-R"),
    opt("S-Z", "S-Z"),
];

const GENERATION_OPTIONS: &[FilterOption] = &[
    opt("1", "Generation 1"),
    opt("2", "Generation 2"),
    opt("3", "Generation 3"),
    opt("4", "Generation 4"),
    opt("5", "Generation 5"),
    opt("6", "Generation 6"),
    opt("7", "Generation 7"),
    opt("8", "Generation 8"),
    opt("9", "Generation 9"),
];

const TYPE_OPTIONS: &[FilterOption] = &[
    opt("normal", "Normal"),
    opt("fighting", "Fighting"),
    opt("flying", "Flying"),
    opt("poison", "Poison"),
    opt("ground", "Ground"),
    opt("rock", "Rock"),
    opt("bug", "Bug"),
    opt("ghost", "Ghost"),
    opt("steel", "Steel"),
    opt("fire", "Fire"),
    opt("water", "Water"),
    opt("grass", "Grass"),
    opt("electric", "Electric"),
    opt("psychic", "Psychic"),
    opt("ice", "Ice"),
    opt("dragon", "Dragon"),
    opt("dark", "Dark"),
    opt("fairy", "Fairy"),
];

const STATISTIC_OPTIONS: &[FilterOption] = &[
    opt("hp", "Health Points (HP)"),
    opt("attack", "Attack"),
    opt("defense", "Defense"),
    opt("special-attack", "Special Attack"),
    opt("special-defense", "Special Defense"),
    opt("speed", "Speed"),
    opt("total", "Total"),
];

/// Menu entries for a category.
pub fn options(key: CategoryKey) -> &'static [FilterOption] {
    match key {
        CategoryKey::Number => NUMBER_OPTIONS,
        CategoryKey::Letter => LETTER_OPTIONS,
        CategoryKey::Generation => GENERATION_OPTIONS,
        CategoryKey::Type => TYPE_OPTIONS,
        CategoryKey::Statistics => STATISTIC_OPTIONS,
    }
}

/// Placeholder text for the empty first option.
pub fn prompt(key: CategoryKey) -> &'static str {
    match key {
        CategoryKey::Number => "Select a range",
        CategoryKey::Letter => "Select a letter range",
        CategoryKey::Generation => "Select a generation",
        CategoryKey::Type => "Select a type",
        CategoryKey::Statistics => "Select a statistic",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::catalog::CategorySelection;

    #[test]
    fn test_every_option_parses() {
        for key in CategoryKey::ALL {
            assert!(!options(key).is_empty());
            for option in options(key) {
                assert!(
                    CategorySelection::for_key(key, option.value).is_ok(),
                    "{} option {} does not parse",
                    key,
                    option.value
                );
            }
        }
    }
}
